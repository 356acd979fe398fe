//! The classic conditions command: an ordered chain of conditions combined
//! left-to-right with AND/OR into one verdict.

use chrono::{DateTime, Utc};

use alertcond_core::{EvalMatch, Number, Results, Vars};

use crate::condition::Condition;

/// An ordered list of conditions evaluated as one alert verdict.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConditionsCmd {
    /// Reference ID of the expression node this command was parsed for.
    pub ref_id: String,
    pub conditions: Vec<Condition>,
}

impl ConditionsCmd {
    pub fn new(ref_id: impl Into<String>, conditions: Vec<Condition>) -> Self {
        Self {
            ref_id: ref_id.into(),
            conditions,
        }
    }

    /// Distinct input reference IDs, in the order conditions first name them.
    pub fn needs_vars(&self) -> Vec<String> {
        let mut vars: Vec<String> = Vec::new();
        for c in &self.conditions {
            if !vars.contains(&c.input_ref_id) {
                vars.push(c.input_ref_id.clone());
            }
        }
        vars
    }

    /// Evaluate all conditions and produce a single-valued result.
    ///
    /// The result is one [`Number`]: `1` when firing, `0` when not, or null
    /// when the combined state is no-data. Its metadata is the evidence list:
    /// every firing value of every condition, or exactly one `NoData` match.
    pub fn execute(&self, now: DateTime<Utc>, vars: &Vars) -> Results {
        let mut firing = false;
        let mut no_data = false;
        let mut matches: Vec<EvalMatch> = Vec::new();

        for (i, condition) in self.conditions.iter().enumerate() {
            let outcome = condition.evaluate(vars);
            tracing::debug!(
                ref_id = %self.ref_id,
                index = i,
                condition = %condition,
                operator = %condition.operator,
                firing = outcome.firing,
                no_data = outcome.no_data,
                matches = outcome.matches.len(),
                "condition evaluated"
            );

            if i == 0 {
                // The first condition seeds the chain; its operator has
                // nothing to combine with and is not applied.
                firing = outcome.firing;
                no_data = outcome.no_data;
            } else {
                firing = condition.operator.apply(firing, outcome.firing);
                no_data = condition.operator.apply(no_data, outcome.no_data);
            }

            matches.extend(outcome.matches);
        }

        let name = (!self.ref_id.is_empty()).then(|| self.ref_id.clone());
        let mut number = if no_data {
            matches = vec![EvalMatch::no_data()];
            Number::new(name, None)
        } else {
            Number::new(name, Some(if firing { 1.0 } else { 0.0 }))
        };

        tracing::debug!(
            ref_id = %self.ref_id,
            %now,
            firing,
            no_data,
            matches = matches.len(),
            "conditions executed"
        );

        number.set_meta(matches);
        Results::single(number)
    }
}

// ── Tests ───────────────────────────────────────────────────────────
