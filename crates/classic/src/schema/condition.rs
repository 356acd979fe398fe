//! Per-condition definition types.

use serde::{Deserialize, Serialize};

/// Top-level definition: `{"conditions": [...]}`.
///
/// Conditions stay untyped here so each one can be decoded on its own and
/// failures can name the offending index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConditionsJson {
    pub conditions: Vec<serde_json::Value>,
}

/// One legacy condition as stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConditionJson {
    pub evaluator: EvaluatorJson,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<OperatorJson>,
    pub query: QueryJson,
    pub reducer: ReducerJson,
    /// Always `"query"` in stored definitions.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// `{"type": "gt", "params": [34]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluatorJson {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub params: Vec<f64>,
}

/// `{"type": "and"}`; a missing type means `and`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperatorJson {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// `{"params": ["A", "5m", "now"]}`; only the first entry is read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryJson {
    #[serde(default)]
    pub params: Vec<String>,
}

/// `{"type": "avg", "params": []}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReducerJson {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub params: Vec<serde_json::Value>,
}
