//! Serde schema of the legacy classic-condition JSON definition.
//!
//! These types mirror the stored shape one-to-one and perform no
//! validation beyond field presence. [`crate::unmarshal`] turns them into
//! strongly typed [`Condition`](crate::Condition)s.

mod condition;

pub use condition::*;
