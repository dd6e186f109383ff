mod criteria;
mod mcda_error;

pub use criteria::{CriteriaWeights, CriterionDirection, CriterionValues, WEIGHT_SUM_TOLERANCE};
pub use mcda_error::McdaError;

use super::welfare::{WelfareObjective, WelfareResults};
use farewell_core::model::{IncomeGroup, SurveyDataset, TransportMode};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModeCriteria {
    pub mode: TransportMode,
    pub values: CriterionValues,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModeScore {
    pub mode: TransportMode,
    pub raw: CriterionValues,
    pub normalized: CriterionValues,
    pub composite: f64,
    /// 1 is best
    pub rank: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct McdaResults {
    pub weights: CriteriaWeights,
    /// ordered by rank
    pub scores: Vec<ModeScore>,
}

/// raw criterion values per mode, in mode order
pub fn mode_criteria(
    dataset: &SurveyDataset,
    modes: &[TransportMode],
    welfare: &WelfareResults,
) -> Result<Vec<ModeCriteria>, McdaError> {
    let by_mode = dataset.by_mode();
    modes
        .iter()
        .map(|mode| {
            let records = by_mode.get(mode).map(|r| r.as_slice()).unwrap_or(&[]);
            let social_welfare = welfare
                .get(*mode, WelfareObjective::SocialWelfare)
                .map(|o| o.market.social_welfare)
                .ok_or_else(|| McdaError::MissingWelfare(mode.to_string()))?;
            let market = welfare
                .markets
                .iter()
                .find(|m| m.mode == *mode)
                .ok_or_else(|| McdaError::MissingWelfare(mode.to_string()))?;
            let n = records.len();
            let low_income = records
                .iter()
                .filter(|r| r.income_group == IncomeGroup::Low)
                .count();
            Ok(ModeCriteria {
                mode: *mode,
                values: CriterionValues {
                    social_welfare,
                    accessibility: n as f64,
                    environmental_impact: market.emission_factor,
                    cost_effectiveness: market.base_price,
                    equity: if n > 0 { low_income as f64 / n as f64 } else { 0.0 },
                },
            })
        })
        .collect()
}

/// min-max normalizes each criterion across modes, benefit criteria as
/// `(x - min) / (max - min)` and cost criteria as `(max - x) / (max - min)`,
/// then ranks modes by the weighted sum. a criterion on which every mode is
/// equal scores 1 for all of them. ties keep the input order.
pub fn score_modes(
    criteria: &[ModeCriteria],
    weights: &CriteriaWeights,
) -> Result<McdaResults, McdaError> {
    weights.validate()?;
    if criteria.is_empty() {
        return Err(McdaError::NoAlternatives);
    }
    for c in criteria.iter() {
        let values = c.values.to_array();
        if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
            return Err(McdaError::NonFiniteCriterion {
                mode: c.mode.to_string(),
                criterion: CriterionValues::NAMES[idx].to_string(),
            });
        }
    }

    let w = weights.to_array();
    let mut normalized = vec![[0.0; 5]; criteria.len()];
    for k in 0..5 {
        let column = criteria.iter().map(|c| c.values.to_array()[k]).collect_vec();
        let min = column.iter().copied().fold(f64::INFINITY, f64::min);
        let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let spread = max - min;
        for (i, x) in column.iter().enumerate() {
            normalized[i][k] = if spread <= 0.0 {
                1.0
            } else {
                match CriterionValues::DIRECTIONS[k] {
                    CriterionDirection::Benefit => (x - min) / spread,
                    CriterionDirection::Cost => (max - x) / spread,
                }
            };
        }
    }

    let mut scores = criteria
        .iter()
        .zip(normalized)
        .map(|(c, n)| {
            let composite = n
                .iter()
                .zip(w.iter())
                .map(|(score, weight)| score * weight)
                .sum::<f64>()
                .clamp(0.0, 1.0);
            ModeScore {
                mode: c.mode,
                raw: c.values,
                normalized: CriterionValues::from_array(n),
                composite,
                rank: 0,
            }
        })
        .collect_vec();
    scores.sort_by(|a, b| b.composite.total_cmp(&a.composite));
    for (i, s) in scores.iter_mut().enumerate() {
        s.rank = i + 1;
    }
    if let Some(top) = scores.first() {
        log::info!("mcda: {} ranks first with {:.3}", top.mode, top.composite);
    }
    Ok(McdaResults {
        weights: *weights,
        scores,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(mode: TransportMode, v: [f64; 5]) -> ModeCriteria {
        ModeCriteria {
            mode,
            values: CriterionValues::from_array(v),
        }
    }

    #[test]
    fn test_scores_and_ranks() {
        let input = vec![
            criteria(TransportMode::Bus, [100.0, 200.0, 0.08, 40.0, 0.5]),
            criteria(TransportMode::Mrt, [300.0, 100.0, 0.05, 120.0, 0.1]),
            criteria(TransportMode::Leguna, [50.0, 150.0, 0.12, 30.0, 0.6]),
        ];
        let result = score_modes(&input, &CriteriaWeights::default()).expect("scores");
        assert_eq!(result.scores.len(), 3);
        for s in result.scores.iter() {
            assert!((0.0..=1.0).contains(&s.composite));
        }
        let ranks = result.scores.iter().map(|s| s.rank).collect_vec();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert!(result
            .scores
            .windows(2)
            .all(|w| w[0].composite >= w[1].composite));
        let mrt = result
            .scores
            .iter()
            .find(|s| s.mode == TransportMode::Mrt)
            .expect("mrt scored");
        // best welfare and lowest emissions, worst on the other three
        assert_eq!(mrt.normalized.social_welfare, 1.0);
        assert_eq!(mrt.normalized.environmental_impact, 1.0);
        assert_eq!(mrt.normalized.cost_effectiveness, 0.0);
        assert!((mrt.composite - 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_no_spread_and_ties() {
        let input = vec![
            criteria(TransportMode::Leguna, [10.0, 10.0, 0.1, 20.0, 0.3]),
            criteria(TransportMode::Bus, [10.0, 10.0, 0.1, 20.0, 0.3]),
        ];
        let result = score_modes(&input, &CriteriaWeights::default()).expect("scores");
        assert!(result.scores.iter().all(|s| s.composite == 1.0));
        assert_eq!(result.scores[0].mode, TransportMode::Leguna);
        assert_eq!(result.scores[1].rank, 2);
    }

    #[test]
    fn test_errors() {
        let input = vec![criteria(TransportMode::Bus, [f64::NAN, 1.0, 0.1, 20.0, 0.3])];
        assert!(matches!(
            score_modes(&input, &CriteriaWeights::default()),
            Err(McdaError::NonFiniteCriterion { .. })
        ));
        assert!(matches!(
            score_modes(&[], &CriteriaWeights::default()),
            Err(McdaError::NoAlternatives)
        ));
        let bad = CriteriaWeights::from_array([0.5, 0.5, 0.5, 0.0, 0.0]);
        assert!(matches!(
            score_modes(&input, &bad),
            Err(McdaError::InvalidWeights(_))
        ));
    }
}
