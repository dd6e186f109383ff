use super::{AlternativeAttributes, ChoiceModelError, ChoiceObservation, ModeValue, UtilityParameters};
use farewell_core::model::TransportMode;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// name of the prediction with unchanged attributes
pub const BASE_SCENARIO: &str = "base";

/// relative changes to level-of-service attributes, 0.1 meaning +10%
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct AttributeChanges {
    pub fare: f64,
    pub travel_time: f64,
    pub wait_time: f64,
    pub comfort: f64,
}

impl AttributeChanges {
    pub fn apply(&self, a: &AlternativeAttributes) -> AlternativeAttributes {
        AlternativeAttributes {
            fare: a.fare * (1.0 + self.fare),
            travel_time: a.travel_time * (1.0 + self.travel_time),
            wait_time: a.wait_time * (1.0 + self.wait_time),
            comfort: a.comfort * (1.0 + self.comfort),
        }
    }
}

/// a what-if change to the alternatives a fitted model is asked about
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModeShareScenario {
    pub name: String,
    /// modes the changes apply to, every mode when empty
    #[serde(default)]
    pub modes: Vec<TransportMode>,
    #[serde(default)]
    pub changes: AttributeChanges,
}

impl ModeShareScenario {
    pub fn new(name: &str, changes: AttributeChanges) -> Self {
        ModeShareScenario {
            name: name.to_string(),
            modes: vec![],
            changes,
        }
    }

    pub fn defaults() -> Vec<ModeShareScenario> {
        let none = AttributeChanges::default();
        vec![
            ModeShareScenario::new("fare_increase_10", AttributeChanges { fare: 0.1, ..none }),
            ModeShareScenario::new("fare_decrease_10", AttributeChanges { fare: -0.1, ..none }),
            ModeShareScenario::new(
                "time_reduction_20",
                AttributeChanges {
                    travel_time: -0.2,
                    ..none
                },
            ),
            ModeShareScenario::new("comfort_improvement", AttributeChanges { comfort: 0.2, ..none }),
        ]
    }

    pub fn applies_to(&self, mode: TransportMode) -> bool {
        self.modes.is_empty() || self.modes.contains(&mode)
    }

    /// every change must be finite and above -100%
    pub fn validate(&self) -> Result<(), ChoiceModelError> {
        let c = &self.changes;
        let changes = [
            ("fare", c.fare),
            ("travel_time", c.travel_time),
            ("wait_time", c.wait_time),
            ("comfort", c.comfort),
        ];
        match changes.iter().find(|(_, v)| !v.is_finite() || *v <= -1.0) {
            Some((attribute, v)) => Err(ChoiceModelError::InvalidScenario(format!(
                "{}: {attribute} change {v} must be finite and above -1",
                self.name
            ))),
            None => Ok(()),
        }
    }
}

/// mean predicted mode shares under one scenario
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PredictedShares {
    pub scenario: String,
    pub shares: Vec<ModeValue>,
    /// share minus the base share, per mode
    pub change: Vec<ModeValue>,
}

/// mean choice probabilities with the fitted parameters held fixed, first for
/// the alternatives as observed and then with each scenario's changes applied.
pub fn predict_mode_shares(
    parameters: &UtilityParameters,
    observations: &[ChoiceObservation],
    scenarios: &[ModeShareScenario],
) -> Vec<PredictedShares> {
    let base = mean_shares(parameters, observations, None);
    std::iter::once((BASE_SCENARIO, base.clone()))
        .chain(
            scenarios
                .iter()
                .map(|s| (s.name.as_str(), mean_shares(parameters, observations, Some(s)))),
        )
        .map(|(name, shares)| PredictedShares {
            scenario: name.to_string(),
            shares: mode_values(&parameters.modes, shares.iter().copied()),
            change: mode_values(
                &parameters.modes,
                shares.iter().zip(base.iter()).map(|(s, b)| s - b),
            ),
        })
        .collect()
}

fn mode_values(modes: &[TransportMode], values: impl Iterator<Item = f64>) -> Vec<ModeValue> {
    modes
        .iter()
        .zip(values)
        .map(|(mode, value)| ModeValue { mode: *mode, value })
        .collect()
}

fn mean_shares(
    parameters: &UtilityParameters,
    observations: &[ChoiceObservation],
    scenario: Option<&ModeShareScenario>,
) -> Vec<f64> {
    let mut totals = vec![0.0; parameters.modes.len()];
    for obs in observations.iter() {
        let alternatives = obs
            .alternatives
            .iter()
            .zip(parameters.modes.iter())
            .map(|(a, mode)| match scenario {
                Some(s) if s.applies_to(*mode) => s.changes.apply(a),
                _ => *a,
            })
            .collect_vec();
        let p = parameters.probabilities(&alternatives, obs.income_level);
        for (total, p_j) in totals.iter_mut().zip(p) {
            *total += p_j;
        }
    }
    let n = observations.len().max(1) as f64;
    totals.into_iter().map(|t| t / n).collect()
}
