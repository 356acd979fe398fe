//! Result values produced by upstream queries and consumed by expressions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{EvalMatch, Labels};

/// Results keyed by the reference ID of the query that produced them.
pub type Vars = HashMap<String, Results>;

/// A single sample in a series. `value` is `None` for a null point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub time: DateTime<Utc>,
    pub value: Option<f64>,
}

/// An ordered time series with optional identifying labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
    #[serde(default)]
    pub points: Vec<Point>,
}

impl Series {
    pub fn new(name: Option<String>, labels: Option<Labels>) -> Self {
        Self {
            name,
            labels,
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, time: DateTime<Utc>, value: Option<f64>) {
        self.points.push(Point { time, value });
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Non-null values in input order.
    pub fn non_null_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().filter_map(|p| p.value)
    }
}

/// A single scalar, optionally labelled and carrying evidence metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Number {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Vec<EvalMatch>>,
}

impl Number {
    pub fn new(name: Option<String>, value: Option<f64>) -> Self {
        Self {
            name,
            value,
            ..Self::default()
        }
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn set_meta(&mut self, meta: Vec<EvalMatch>) {
        self.meta = Some(meta);
    }
}

/// One value in a [`Results`] batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Series(Series),
    Number(Number),
    /// The query ran but returned nothing.
    NoData,
}

impl Value {
    pub fn name(&self) -> Option<&str> {
        match self {
            Value::Series(s) => s.name.as_deref(),
            Value::Number(n) => n.name.as_deref(),
            Value::NoData => None,
        }
    }

    pub fn labels(&self) -> Option<&Labels> {
        match self {
            Value::Series(s) => s.labels.as_ref(),
            Value::Number(n) => n.labels.as_ref(),
            Value::NoData => None,
        }
    }
}

impl From<Series> for Value {
    fn from(s: Series) -> Self {
        Value::Series(s)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

/// Ordered batch of values returned for one reference ID.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Results {
    pub values: Vec<Value>,
}

impl Results {
    /// A batch holding exactly one value.
    pub fn single(value: impl Into<Value>) -> Self {
        Self {
            values: vec![value.into()],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<Value> for Results {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Decode a vars document: `{"A": [{"series": {...}}, {"number": {...}}, "no_data"]}`.
pub fn vars_from_json_str(json: &str) -> crate::Result<Vars> {
    serde_json::from_str(json).map_err(|e| crate::CoreError::Serialize(e.to_string()))
}

/// Read and decode a vars document from disk.
pub fn read_vars(path: impl AsRef<std::path::Path>) -> crate::Result<Vars> {
    let json = std::fs::read_to_string(path)?;
    vars_from_json_str(&json)
}
