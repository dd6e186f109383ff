use serde::{Deserialize, Serialize};

/// counts of what happened to the rows of a survey file during loading
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub source: String,
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_malformed: usize,
    pub rows_outlier: usize,
}
