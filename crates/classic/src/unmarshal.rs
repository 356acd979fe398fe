//! Parsing and validation of legacy condition definitions.
//!
//! Definitions are decoded into the fixed [`schema`](crate::schema) types
//! one condition at a time, then validated into typed [`Condition`]s.
//! Unknown tags are rejected rather than defaulted.

use crate::condition::{Condition, ConditionOperator};
use crate::error::{ClassicError, Result};
use crate::evaluator::Evaluator;
use crate::reducer::ReducerKind;
use crate::schema::{
    ConditionJson, ConditionsJson, EvaluatorJson, OperatorJson, QueryJson, ReducerJson,
};
use crate::ConditionsCmd;

impl ConditionsCmd {
    /// Parse a decoded definition object.
    ///
    /// `ref_id` names the resulting command; it is the reference ID of the
    /// expression node that holds this definition.
    pub fn from_json(raw: &serde_json::Value, ref_id: &str) -> Result<Self> {
        let doc: ConditionsJson = serde_json::from_value(raw.clone())
            .map_err(|e| ClassicError::malformed(0, e.to_string()))?;

        let conditions = doc
            .conditions
            .into_iter()
            .enumerate()
            .map(|(index, raw)| parse_condition(index, raw))
            .collect::<Result<Vec<_>>>()?;

        let cmd = ConditionsCmd::new(ref_id, conditions);
        tracing::debug!(
            ref_id = %cmd.ref_id,
            conditions = cmd.conditions.len(),
            needs = ?cmd.needs_vars(),
            "parsed classic conditions"
        );
        Ok(cmd)
    }

    /// Parse a definition from JSON text.
    pub fn from_json_str(json: &str, ref_id: &str) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json(&raw, ref_id)
    }

    /// Parse a definition written in YAML using the same schema.
    pub fn from_yaml_str(yaml: &str, ref_id: &str) -> Result<Self> {
        let raw: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_json(&raw, ref_id)
    }

    /// Re-emit the definition in the legacy stored shape.
    pub fn to_json(&self) -> serde_json::Value {
        let conditions = self
            .conditions
            .iter()
            .map(|c| {
                let json = ConditionJson {
                    evaluator: EvaluatorJson {
                        kind: c.evaluator.type_tag().to_string(),
                        params: c.evaluator.params(),
                    },
                    operator: Some(OperatorJson {
                        kind: Some(c.operator.as_str().to_string()),
                    }),
                    query: QueryJson {
                        params: vec![c.input_ref_id.clone()],
                    },
                    reducer: ReducerJson {
                        kind: c.reducer.as_str().to_string(),
                        params: Vec::new(),
                    },
                    kind: Some("query".to_string()),
                };
                serde_json::to_value(json).unwrap_or(serde_json::Value::Null)
            })
            .collect();

        serde_json::to_value(ConditionsJson { conditions }).unwrap_or(serde_json::Value::Null)
    }
}

fn parse_condition(index: usize, raw: serde_json::Value) -> Result<Condition> {
    let json: ConditionJson =
        serde_json::from_value(raw).map_err(|e| ClassicError::malformed(index, e.to_string()))?;

    let input_ref_id = json
        .query
        .params
        .first()
        .filter(|id| !id.is_empty())
        .cloned()
        .ok_or_else(|| ClassicError::malformed(index, "query.params must name an input ref ID"))?;

    let reducer: ReducerKind =
        json.reducer
            .kind
            .parse()
            .map_err(|_| ClassicError::UnsupportedReducerType {
                index,
                reducer: json.reducer.kind.clone(),
            })?;

    let operator = match json.operator.and_then(|o| o.kind) {
        Some(kind) => kind
            .parse::<ConditionOperator>()
            .map_err(|e| ClassicError::malformed(index, e))?,
        None => ConditionOperator::And,
    };

    let evaluator = Evaluator::from_params(index, &json.evaluator.kind, &json.evaluator.params)?;

    Ok(Condition {
        input_ref_id,
        reducer,
        operator,
        evaluator,
    })
}

// ── Tests ───────────────────────────────────────────────────────────
