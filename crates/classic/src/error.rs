//! Parse-time errors for classic condition commands.
//!
//! Evaluation never fails: no-data is an outcome, not an error. Everything
//! that can go wrong happens while turning a rule definition into a
//! [`ConditionsCmd`](crate::ConditionsCmd).

/// Errors raised while parsing a condition definition.
#[derive(Debug, thiserror::Error)]
pub enum ClassicError {
    /// A required field is missing, has the wrong shape, or a tag is unknown.
    #[error("malformed condition at index {index}: {reason}")]
    MalformedCondition { index: usize, reason: String },

    /// The reducer tag is not one of the known reducers.
    #[error("unsupported reducer type '{reducer}' in condition {index}")]
    UnsupportedReducerType { index: usize, reducer: String },

    /// The evaluator tag is not a threshold or range kind.
    #[error("unsupported evaluator type '{evaluator}' in condition {index}")]
    UnsupportedEvaluatorType { index: usize, evaluator: String },

    /// The definition text is not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The definition text is not valid YAML.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ClassicError {
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        ClassicError::MalformedCondition {
            index,
            reason: reason.into(),
        }
    }

    /// Index of the offending condition, when the error names one.
    pub fn condition_index(&self) -> Option<usize> {
        match self {
            ClassicError::MalformedCondition { index, .. }
            | ClassicError::UnsupportedReducerType { index, .. }
            | ClassicError::UnsupportedEvaluatorType { index, .. } => Some(*index),
            ClassicError::Json(_) | ClassicError::Yaml(_) => None,
        }
    }
}

/// Result alias for classic condition operations.
pub type Result<T> = std::result::Result<T, ClassicError>;
