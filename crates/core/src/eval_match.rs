use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Labels;

/// Metric sentinel reported when a verdict was reached without data.
pub const NO_DATA_METRIC: &str = "NoData";

/// Evidence for a verdict: one firing series, or the no-data marker.
///
/// Notification templates read these to explain why an alert fired.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}

impl EvalMatch {
    /// The single match attached to a no-data verdict.
    pub fn no_data() -> Self {
        Self {
            metric: Some(NO_DATA_METRIC.to_string()),
            ..Self::default()
        }
    }

    pub fn is_no_data(&self) -> bool {
        self.value.is_none() && self.metric.as_deref() == Some(NO_DATA_METRIC)
    }
}

impl fmt::Display for EvalMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_no_data() {
            return f.write_str(NO_DATA_METRIC);
        }
        match self.value {
            Some(v) => write!(f, "value={}", v)?,
            None => f.write_str("value=null")?,
        }
        if let Some(metric) = &self.metric {
            write!(f, " metric={}", metric)?;
        }
        if let Some(labels) = self.labels.as_ref().filter(|l| !l.is_empty()) {
            write!(f, " labels={{{}}}", labels)?;
        }
        Ok(())
    }
}
