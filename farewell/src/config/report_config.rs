use crate::report::ReportFormat;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct ReportConfig {
    pub formats: Vec<ReportFormat>,
    /// replace report files that already exist in the output directory
    pub overwrite: bool,
    pub title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            formats: vec![ReportFormat::Markdown, ReportFormat::Json, ReportFormat::Html],
            overwrite: false,
            title: String::from("Fare and Welfare Analysis of Dhaka Public Transport"),
        }
    }
}
