//! Rendering of execution results for the terminal.

use std::fmt;

use alertcond_core::{Number, Results, Value};

/// The three-way outcome of a conditions command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Firing,
    Ok,
    NoData,
}

impl Verdict {
    pub fn from_number(number: &Number) -> Self {
        match number.value {
            None => Verdict::NoData,
            Some(v) if v != 0.0 => Verdict::Firing,
            Some(_) => Verdict::Ok,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Firing => write!(f, "firing"),
            Verdict::Ok => write!(f, "ok"),
            Verdict::NoData => write!(f, "no_data"),
        }
    }
}

/// The single verdict number of an execution result.
pub fn verdict_number(results: &Results) -> Option<&Number> {
    match results.values.as_slice() {
        [Value::Number(n)] => Some(n),
        _ => None,
    }
}

/// Verdict on the first line, then one indented line per match.
pub fn render_text(number: &Number) -> String {
    let mut out = Verdict::from_number(number).to_string();
    out.push('\n');
    for m in number.meta.iter().flatten() {
        out.push_str("  ");
        out.push_str(&m.to_string());
        out.push('\n');
    }
    out
}

pub fn render_json(results: &Results) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}
