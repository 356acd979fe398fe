//! Classic (legacy) alert condition engine.
//!
//! This crate provides:
//! - Reducers that collapse a series to one scalar (avg, min, max, diff, ...)
//! - Threshold and range evaluators selected by their legacy type tag
//! - Conditions that OR their input's series together
//! - [`ConditionsCmd`], which chains conditions with AND/OR into one
//!   firing / not firing / no-data verdict plus [`EvalMatch`] evidence
//! - Parsing of the legacy JSON definition (and a YAML rendering of it)
//!
//! Evaluation is a pure function of the definition and the supplied
//! [`Vars`]; all fallibility lives in parsing.

pub mod command;
pub mod condition;
pub mod error;
pub mod evaluator;
pub mod reducer;
pub mod schema;
pub mod unmarshal;

pub use alertcond_core::{EvalMatch, Results, Value, Vars, NO_DATA_METRIC};
pub use command::ConditionsCmd;
pub use condition::{Condition, ConditionOperator, ConditionOutcome};
pub use error::{ClassicError, Result};
pub use evaluator::{Evaluator, RangeKind, ThresholdKind};
pub use reducer::ReducerKind;
