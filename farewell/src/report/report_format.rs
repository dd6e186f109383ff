use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// full written report
    Markdown,
    /// every analysis result with run metadata
    Json,
    /// static dashboard of the report tables
    Html,
    /// welfare outcome and policy scenario tables
    Csv,
}

impl ReportFormat {
    /// files written into the output directory for this format
    pub fn file_names(&self) -> &'static [&'static str] {
        match self {
            ReportFormat::Markdown => &["report.md"],
            ReportFormat::Json => &["results.json"],
            ReportFormat::Html => &["report.html"],
            ReportFormat::Csv => &["welfare_outcomes.csv", "policy_scenarios.csv"],
        }
    }
}

impl Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Markdown => write!(f, "markdown"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Html => write!(f, "html"),
            ReportFormat::Csv => write!(f, "csv"),
        }
    }
}
