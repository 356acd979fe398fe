//! A single reduce-then-evaluate rule bound to one query result.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use alertcond_core::{EvalMatch, Vars};

use crate::evaluator::Evaluator;
use crate::reducer::ReducerKind;

/// How a condition combines with the conditions before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    #[default]
    And,
    Or,
}

impl ConditionOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionOperator::And => "and",
            ConditionOperator::Or => "or",
        }
    }

    pub fn apply(&self, lhs: bool, rhs: bool) -> bool {
        match self {
            ConditionOperator::And => lhs && rhs,
            ConditionOperator::Or => lhs || rhs,
        }
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionOperator {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "and" => Ok(ConditionOperator::And),
            "or" => Ok(ConditionOperator::Or),
            other => Err(format!("unknown operator: '{}'", other)),
        }
    }
}

/// One classic condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Reference ID of the query result this condition reads.
    pub input_ref_id: String,
    pub reducer: ReducerKind,
    pub operator: ConditionOperator,
    pub evaluator: Evaluator,
}

/// Outcome of evaluating one condition against its input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConditionOutcome {
    /// At least one value evaluated true.
    pub firing: bool,
    /// The input was missing, empty, or every value reduced to null.
    pub no_data: bool,
    /// One match per value that evaluated true, in input order.
    pub matches: Vec<EvalMatch>,
}

impl ConditionOutcome {
    fn no_data() -> Self {
        Self {
            firing: false,
            no_data: true,
            matches: Vec::new(),
        }
    }
}

impl Condition {
    /// Evaluate every value of this condition's input.
    ///
    /// The condition fires when any value fires. Values that reduce to null
    /// contribute nothing; if all of them do, the outcome is no-data.
    pub fn evaluate(&self, vars: &Vars) -> ConditionOutcome {
        let results = match vars.get(&self.input_ref_id) {
            Some(results) if !results.is_empty() => results,
            _ => {
                tracing::trace!(ref_id = %self.input_ref_id, "no results for condition input");
                return ConditionOutcome::no_data();
            }
        };

        let mut reduced_count = 0usize;
        let mut matches = Vec::new();

        for value in &results.values {
            let Some(reduced) = self.reducer.reduce_value(value) else {
                continue;
            };
            reduced_count += 1;

            let fired = self.evaluator.eval(reduced);
            tracing::trace!(
                ref_id = %self.input_ref_id,
                reducer = %self.reducer,
                value = reduced,
                fired,
                "evaluated value"
            );
            if fired {
                matches.push(EvalMatch {
                    value: Some(reduced),
                    metric: value.name().map(str::to_string),
                    labels: value.labels().cloned(),
                });
            }
        }

        if reduced_count == 0 {
            return ConditionOutcome::no_data();
        }

        ConditionOutcome {
            firing: !matches.is_empty(),
            no_data: false,
            matches,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}) {}",
            self.reducer, self.input_ref_id, self.evaluator
        )
    }
}

// ── Tests ───────────────────────────────────────────────────────────
