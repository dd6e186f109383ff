use super::{AlternativeAttributes, FareElasticity, PredictedShares};
use crate::model::{Segment, StageOutcome};
use farewell_core::model::{IncomeGroup, TransportMode};
use serde::{Deserialize, Serialize};

/// coefficients of the linear utility
/// `V_j = ASC_j + fare*fare_j + travel_time*time_j + wait_time*wait_j + comfort*comfort_j`,
/// plus `income_fare * fare_j * (income level - 2)` when estimated on all
/// income groups together.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UtilityParameters {
    pub modes: Vec<TransportMode>,
    /// one constant per mode, the first fixed at 0
    pub asc: Vec<f64>,
    pub fare: f64,
    pub travel_time: f64,
    pub wait_time: f64,
    pub comfort: f64,
    pub income_fare: Option<f64>,
}

impl UtilityParameters {
    /// number of free parameters for `n_modes` alternatives
    pub fn dimension(n_modes: usize, with_income: bool) -> usize {
        n_modes - 1 + 4 + usize::from(with_income)
    }

    /// names of the free parameters in estimation order
    pub fn parameter_names(modes: &[TransportMode], with_income: bool) -> Vec<String> {
        let mut names = modes
            .iter()
            .skip(1)
            .map(|m| format!("ASC_{}", m.label().replace(' ', "_")))
            .collect::<Vec<_>>();
        names.extend(
            ["fare", "travel_time", "wait_time", "comfort"]
                .iter()
                .map(|s| s.to_string()),
        );
        if with_income {
            names.push(String::from("fare_x_income"));
        }
        names
    }

    pub fn from_parameters(modes: &[TransportMode], beta: &[f64], with_income: bool) -> Self {
        let j = modes.len();
        let mut asc = vec![0.0];
        asc.extend_from_slice(&beta[0..j - 1]);
        let base = j - 1;
        UtilityParameters {
            modes: modes.to_vec(),
            asc,
            fare: beta[base],
            travel_time: beta[base + 1],
            wait_time: beta[base + 2],
            comfort: beta[base + 3],
            income_fare: if with_income { Some(beta[base + 4]) } else { None },
        }
    }

    /// fare coefficient for a respondent at the given centered income level
    pub fn fare_coefficient_at(&self, income_level: f64) -> f64 {
        self.fare + self.income_fare.unwrap_or(0.0) * income_level
    }

    /// fare coefficient for an income group, or for the middle income level
    /// when no group is given
    pub fn fare_coefficient(&self, income_group: Option<IncomeGroup>) -> f64 {
        self.fare_coefficient_at(income_group.map(|g| g.centered_level()).unwrap_or(0.0))
    }

    /// utility of alternative `j` without its fare term
    pub fn non_fare_utility(&self, j: usize, attrs: &AlternativeAttributes) -> f64 {
        self.asc[j]
            + self.travel_time * attrs.travel_time
            + self.wait_time * attrs.wait_time
            + self.comfort * attrs.comfort
    }

    pub fn utility(&self, j: usize, attrs: &AlternativeAttributes, income_level: f64) -> f64 {
        self.non_fare_utility(j, attrs) + self.fare_coefficient_at(income_level) * attrs.fare
    }

    /// logit choice probabilities over `alternatives`, ordered like `modes`
    pub fn probabilities(&self, alternatives: &[AlternativeAttributes], income_level: f64) -> Vec<f64> {
        let v = alternatives
            .iter()
            .enumerate()
            .map(|(j, a)| self.utility(j, a, income_level))
            .collect::<Vec<_>>();
        softmax(&v)
    }
}

pub fn softmax(v: &[f64]) -> Vec<f64> {
    let max = v.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps = v.iter().map(|u| (u - max).exp()).collect::<Vec<_>>();
    let total: f64 = exps.iter().sum();
    exps.iter().map(|e| e / total).collect()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Coefficient {
    pub name: String,
    pub value: f64,
    pub std_error: f64,
    pub t_stat: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ModeValue {
    pub mode: TransportMode,
    pub value: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ModeAttributes {
    pub mode: TransportMode,
    pub attributes: AlternativeAttributes,
}

/// a fitted multinomial logit model for one segment of respondents
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChoiceModelEstimate {
    pub parameters: UtilityParameters,
    pub coefficients: Vec<Coefficient>,
    pub log_likelihood: f64,
    pub null_log_likelihood: f64,
    pub rho_squared: f64,
    pub iterations: usize,
    pub observations: usize,
    pub mean_probabilities: Vec<ModeValue>,
    pub observed_shares: Vec<ModeValue>,
    /// mean attributes of each mode over the segment, used for modeled WTP
    pub mean_attributes: Vec<ModeAttributes>,
    pub elasticities: Vec<FareElasticity>,
    /// base and what-if mode shares predicted by the fitted model
    pub scenario_shares: Vec<PredictedShares>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SegmentEstimate {
    pub segment: Segment,
    pub observations: usize,
    pub outcome: StageOutcome<ChoiceModelEstimate>,
}

/// choice models for all respondents and for each income group
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChoiceModelResults {
    pub modes: Vec<TransportMode>,
    pub segments: Vec<SegmentEstimate>,
}

impl ChoiceModelResults {
    pub fn get(&self, segment: Segment) -> Option<&ChoiceModelEstimate> {
        self.segments
            .iter()
            .find(|s| s.segment == segment)
            .and_then(|s| s.outcome.completed())
    }

    pub fn completed(&self) -> impl Iterator<Item = (Segment, &ChoiceModelEstimate)> {
        self.segments
            .iter()
            .filter_map(|s| s.outcome.completed().map(|e| (s.segment, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_softmax_sums_to_one() {
        let p = softmax(&[1000.0, 999.0, -5.0]);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(p.iter().all(|x| x.is_finite()));
        assert!(p[0] > p[1] && p[1] > p[2]);
    }

    #[test]
    fn test_parameter_layout() {
        let modes = [TransportMode::Bus, TransportMode::Mrt, TransportMode::Leguna];
        let names = UtilityParameters::parameter_names(&modes, true);
        assert_eq!(names.len(), UtilityParameters::dimension(3, true));
        assert_eq!(names[0], "ASC_MRT");
        let beta = [0.5, -0.2, -0.03, -0.01, -0.02, 0.3, 0.005];
        let params = UtilityParameters::from_parameters(&modes, &beta, true);
        assert_eq!(params.asc, vec![0.0, 0.5, -0.2]);
        assert_eq!(params.fare, -0.03);
        assert_eq!(params.income_fare, Some(0.005));
        assert!((params.fare_coefficient(Some(IncomeGroup::High)) + 0.025).abs() < 1e-12);
        assert_eq!(params.fare_coefficient(None), -0.03);
    }
}
