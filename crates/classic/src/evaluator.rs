//! Evaluators test a reduced scalar against a threshold or a range.
//!
//! The variant is chosen once, at parse time, from the definition's
//! `evaluator.type` tag. Evaluation only ever sees non-null scalars.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ClassicError, Result};

/// Single-threshold comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdKind {
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
}

impl ThresholdKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThresholdKind::Gt => "gt",
            ThresholdKind::Lt => "lt",
            ThresholdKind::Ge => "ge",
            ThresholdKind::Le => "le",
            ThresholdKind::Eq => "eq",
            ThresholdKind::Ne => "ne",
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            ThresholdKind::Gt => ">",
            ThresholdKind::Lt => "<",
            ThresholdKind::Ge => ">=",
            ThresholdKind::Le => "<=",
            ThresholdKind::Eq => "==",
            ThresholdKind::Ne => "!=",
        }
    }
}

impl FromStr for ThresholdKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "gt" => Ok(ThresholdKind::Gt),
            "lt" => Ok(ThresholdKind::Lt),
            "ge" => Ok(ThresholdKind::Ge),
            "le" => Ok(ThresholdKind::Le),
            "eq" => Ok(ThresholdKind::Eq),
            "ne" => Ok(ThresholdKind::Ne),
            other => Err(format!("unknown threshold kind: '{}'", other)),
        }
    }
}

/// Inclusive range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeKind {
    WithinRange,
    OutsideRange,
}

impl RangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeKind::WithinRange => "within_range",
            RangeKind::OutsideRange => "outside_range",
        }
    }
}

impl FromStr for RangeKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "within_range" => Ok(RangeKind::WithinRange),
            "outside_range" => Ok(RangeKind::OutsideRange),
            other => Err(format!("unknown range kind: '{}'", other)),
        }
    }
}

/// A predicate over a reduced scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluator {
    Threshold { kind: ThresholdKind, threshold: f64 },
    Ranged { kind: RangeKind, lower: f64, upper: f64 },
}

impl Evaluator {
    /// Build an evaluator from its legacy `{type, params}` shape.
    ///
    /// Threshold kinds read `params[0]`; range kinds read `params[0]` as the
    /// lower bound and `params[1]` as the upper bound. Extra params are ignored.
    /// `index` is the position of the owning condition, used in errors.
    pub fn from_params(index: usize, type_tag: &str, params: &[f64]) -> Result<Self> {
        if let Ok(kind) = type_tag.parse::<ThresholdKind>() {
            let threshold = *params.first().ok_or_else(|| {
                ClassicError::malformed(
                    index,
                    format!("evaluator '{}' requires 1 parameter", type_tag),
                )
            })?;
            return Ok(Evaluator::Threshold { kind, threshold });
        }

        if let Ok(kind) = type_tag.parse::<RangeKind>() {
            let (lower, upper) = match params {
                [lower, upper, ..] => (*lower, *upper),
                _ => {
                    return Err(ClassicError::malformed(
                        index,
                        format!("evaluator '{}' requires 2 parameters", type_tag),
                    ))
                }
            };
            return Ok(Evaluator::Ranged { kind, lower, upper });
        }

        Err(ClassicError::UnsupportedEvaluatorType {
            index,
            evaluator: type_tag.to_string(),
        })
    }

    /// Evaluate a non-null scalar.
    pub fn eval(&self, value: f64) -> bool {
        match *self {
            Evaluator::Threshold { kind, threshold } => match kind {
                ThresholdKind::Gt => value > threshold,
                ThresholdKind::Lt => value < threshold,
                ThresholdKind::Ge => value >= threshold,
                ThresholdKind::Le => value <= threshold,
                ThresholdKind::Eq => value == threshold,
                ThresholdKind::Ne => value != threshold,
            },
            Evaluator::Ranged { kind, lower, upper } => {
                let within = lower <= value && value <= upper;
                match kind {
                    RangeKind::WithinRange => within,
                    RangeKind::OutsideRange => !within,
                }
            }
        }
    }

    /// The legacy `type` tag.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Evaluator::Threshold { kind, .. } => kind.as_str(),
            Evaluator::Ranged { kind, .. } => kind.as_str(),
        }
    }

    /// The legacy `params` list.
    pub fn params(&self) -> Vec<f64> {
        match *self {
            Evaluator::Threshold { threshold, .. } => vec![threshold],
            Evaluator::Ranged { lower, upper, .. } => vec![lower, upper],
        }
    }
}

impl fmt::Display for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evaluator::Threshold { kind, threshold } => write!(f, "{} {}", kind.symbol(), threshold),
            Evaluator::Ranged { kind, lower, upper } => {
                write!(f, "{} [{}, {}]", kind.as_str(), lower, upper)
            }
        }
    }
}
