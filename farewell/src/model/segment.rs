use farewell_core::model::IncomeGroup;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// the respondents an estimate or summary was computed over
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    All,
    Income(IncomeGroup),
}

impl Segment {
    pub fn income_group(&self) -> Option<IncomeGroup> {
        match self {
            Segment::All => None,
            Segment::Income(g) => Some(*g),
        }
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::All => write!(f, "All"),
            Segment::Income(g) => write!(f, "{g}"),
        }
    }
}

/// result of one unit of analysis that is allowed to fail without stopping
/// the pipeline. a failure keeps the error message so it can be reported.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum StageOutcome<T> {
    Completed(T),
    Failed { error: String },
}

impl<T> StageOutcome<T> {
    pub fn completed(&self) -> Option<&T> {
        match self {
            StageOutcome::Completed(t) => Some(t),
            StageOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            StageOutcome::Completed(_) => None,
            StageOutcome::Failed { error } => Some(error),
        }
    }
}

impl<T, E: std::error::Error> From<Result<T, E>> for StageOutcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(t) => StageOutcome::Completed(t),
            Err(e) => StageOutcome::Failed {
                error: e.to_string(),
            },
        }
    }
}
