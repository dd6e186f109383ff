use itertools::Itertools;
use farewell_core::model::{SurveyRecord, TransportMode};
use serde::{Deserialize, Serialize};

/// inequality of affordability ratios among the users of a mode
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModeEquity {
    pub mode: TransportMode,
    pub respondents: usize,
    pub mean_affordability_ratio: f64,
    pub gini: f64,
}

/// Gini coefficient of non-negative values, from 0 (all equal) toward 1.
/// an empty or all-zero sample is 0.
pub fn gini(values: &[f64]) -> f64 {
    let n = values.len();
    let total: f64 = values.iter().sum();
    if n == 0 || total <= 0.0 {
        return 0.0;
    }
    let sorted = values
        .iter()
        .copied()
        .sorted_by(|a, b| a.total_cmp(b))
        .collect_vec();
    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, x)| (i + 1) as f64 * x)
        .sum();
    let n = n as f64;
    (2.0 * weighted) / (n * total) - (n + 1.0) / n
}

pub fn mode_equity(mode: TransportMode, records: &[&SurveyRecord]) -> Option<ModeEquity> {
    if records.is_empty() {
        return None;
    }
    let ratios = records.iter().map(|r| r.affordability_ratio()).collect_vec();
    Some(ModeEquity {
        mode,
        respondents: records.len(),
        mean_affordability_ratio: ratios.iter().sum::<f64>() / ratios.len() as f64,
        gini: gini(&ratios),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gini() {
        assert_eq!(gini(&[2.0, 2.0, 2.0]), 0.0);
        // one holder of everything among four: (n - 1) / n
        assert!((gini(&[0.0, 0.0, 0.0, 8.0]) - 0.75).abs() < 1e-12);
        assert!((gini(&[1.0, 3.0]) - 0.25).abs() < 1e-12);
        assert_eq!(gini(&[]), 0.0);
    }
}
