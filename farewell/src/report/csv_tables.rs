use super::ReportError;
use crate::model::{policy::ScenarioOutcome, welfare::WelfareOutcomeRow, AnalysisResults};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize, Debug, Clone)]
struct PolicyScenarioRow<'a> {
    scenario: &'a str,
    low_income_rate: f64,
    mid_income_rate: f64,
    high_income_rate: f64,
    trips_subsidized: usize,
    total_subsidy_cost: f64,
    accessibility_improvement: usize,
    cost_effectiveness: f64,
    induced_demand: f64,
    unaffordable_before: usize,
    unaffordable_after: usize,
}

impl<'a> From<&'a ScenarioOutcome> for PolicyScenarioRow<'a> {
    fn from(s: &'a ScenarioOutcome) -> Self {
        PolicyScenarioRow {
            scenario: &s.name,
            low_income_rate: s.rates.low,
            mid_income_rate: s.rates.mid,
            high_income_rate: s.rates.high,
            trips_subsidized: s.trips_subsidized,
            total_subsidy_cost: s.total_subsidy_cost,
            accessibility_improvement: s.accessibility_improvement,
            cost_effectiveness: s.cost_effectiveness,
            induced_demand: s.induced_demand,
            unaffordable_before: s.unaffordable_before,
            unaffordable_after: s.unaffordable_after,
        }
    }
}

pub fn write_welfare_outcomes(results: &AnalysisResults, path: &Path) -> Result<(), ReportError> {
    write_rows(
        path,
        results.welfare.outcomes.iter().map(WelfareOutcomeRow::from),
    )
}

pub fn write_policy_scenarios(results: &AnalysisResults, path: &Path) -> Result<(), ReportError> {
    write_rows(
        path,
        results.policy.scenarios.iter().map(PolicyScenarioRow::from),
    )
}

fn write_rows<T: Serialize>(
    path: &Path,
    rows: impl Iterator<Item = T>,
) -> Result<(), ReportError> {
    let csv_error = |source: csv::Error| ReportError::Csv {
        path: path.to_string_lossy().to_string(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    for row in rows {
        writer.serialize(row).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| ReportError::Write {
        path: path.to_string_lossy().to_string(),
        source,
    })
}
