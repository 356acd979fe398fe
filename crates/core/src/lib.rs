pub mod config;
pub mod error;
pub mod eval_match;
pub mod labels;
pub mod value;

pub use config::Config;
pub use error::*;
pub use eval_match::*;
pub use labels::*;
pub use value::*;
