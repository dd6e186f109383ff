use super::{ChoiceObservation, UtilityParameters};
use farewell_core::model::TransportMode;
use serde::{Deserialize, Serialize};

/// below this magnitude an elasticity is reported as zero
pub const ZERO_ELASTICITY: f64 = 1e-9;

/// mean elasticity of the probability of choosing `mode` with respect to the
/// fare of `fare_of`. direct when the two are the same mode.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FareElasticity {
    pub mode: TransportMode,
    pub fare_of: TransportMode,
    pub value: f64,
}

impl FareElasticity {
    pub fn is_direct(&self) -> bool {
        self.mode == self.fare_of
    }

    pub fn is_zero(&self) -> bool {
        self.value.abs() < ZERO_ELASTICITY
    }
}

/// direct elasticity `b * fare_j * (1 - P_j)` and cross elasticity
/// `-b * fare_k * P_k`, averaged over respondents. `b` is the fare
/// coefficient at each respondent's income level.
pub fn fare_elasticities(
    params: &UtilityParameters,
    observations: &[ChoiceObservation],
) -> Vec<FareElasticity> {
    let modes = &params.modes;
    let j_count = modes.len();
    let mut totals = vec![vec![0.0; j_count]; j_count];
    for obs in observations.iter() {
        let p = params.probabilities(&obs.alternatives, obs.income_level);
        let b = params.fare_coefficient_at(obs.income_level);
        for j in 0..j_count {
            for k in 0..j_count {
                let e = if j == k {
                    b * obs.alternatives[j].fare * (1.0 - p[j])
                } else {
                    -b * obs.alternatives[k].fare * p[k]
                };
                totals[j][k] += e;
            }
        }
    }
    let n = observations.len().max(1) as f64;
    let mut result = vec![];
    for (j, mode) in modes.iter().enumerate() {
        for (k, fare_of) in modes.iter().enumerate() {
            result.push(FareElasticity {
                mode: *mode,
                fare_of: *fare_of,
                value: totals[j][k] / n,
            });
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::choice::AlternativeAttributes;

    fn attrs(fare: f64) -> AlternativeAttributes {
        AlternativeAttributes {
            fare,
            travel_time: 30.0,
            wait_time: 5.0,
            comfort: 3.0,
        }
    }

    #[test]
    fn test_equal_utilities() {
        let params = UtilityParameters {
            modes: vec![TransportMode::Bus, TransportMode::Mrt],
            asc: vec![0.0, 0.0],
            fare: -0.02,
            travel_time: 0.0,
            wait_time: 0.0,
            comfort: 0.0,
            income_fare: None,
        };
        let obs = vec![ChoiceObservation {
            chosen: 0,
            income_level: 0.0,
            alternatives: vec![attrs(50.0), attrs(50.0)],
        }];
        let e = fare_elasticities(&params, &obs);
        assert_eq!(e.len(), 4);
        // P = 0.5 for both: direct -0.02*50*0.5, cross +0.02*50*0.5
        assert!((e[0].value + 0.5).abs() < 1e-12);
        assert!(e[0].is_direct());
        assert!((e[1].value - 0.5).abs() < 1e-12);
        assert!(!e[1].is_zero());
    }

    #[test]
    fn test_zero_fare_coefficient_is_flagged() {
        let params = UtilityParameters {
            modes: vec![TransportMode::Bus, TransportMode::Mrt],
            asc: vec![0.0, 1.0],
            fare: 0.0,
            travel_time: -0.01,
            wait_time: 0.0,
            comfort: 0.0,
            income_fare: None,
        };
        let obs = vec![ChoiceObservation {
            chosen: 1,
            income_level: 1.0,
            alternatives: vec![attrs(30.0), attrs(80.0)],
        }];
        assert!(fare_elasticities(&params, &obs).iter().all(|e| e.is_zero()));
    }
}
