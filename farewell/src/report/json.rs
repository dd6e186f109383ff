use super::ReportError;
use crate::model::AnalysisResults;

pub fn render_json(results: &AnalysisResults) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(results)?)
}
