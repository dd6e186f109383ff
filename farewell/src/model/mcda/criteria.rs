use super::McdaError;
use serde::{Deserialize, Serialize};

/// tolerance on the sum of the weights
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// whether larger raw values of a criterion are preferred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriterionDirection {
    Benefit,
    Cost,
}

/// one mode's value on each criterion, either raw or normalized to [0, 1]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CriterionValues {
    /// Max-S social welfare, more is better
    pub social_welfare: f64,
    /// respondents using the mode, more is better
    pub accessibility: f64,
    /// kg CO2 per trip, less is better
    pub environmental_impact: f64,
    /// mean fare paid, less is better
    pub cost_effectiveness: f64,
    /// share of users with low income, more is better
    pub equity: f64,
}

impl CriterionValues {
    pub const NAMES: [&'static str; 5] = [
        "social_welfare",
        "accessibility",
        "environmental_impact",
        "cost_effectiveness",
        "equity",
    ];

    pub const DIRECTIONS: [CriterionDirection; 5] = [
        CriterionDirection::Benefit,
        CriterionDirection::Benefit,
        CriterionDirection::Cost,
        CriterionDirection::Cost,
        CriterionDirection::Benefit,
    ];

    pub fn to_array(&self) -> [f64; 5] {
        [
            self.social_welfare,
            self.accessibility,
            self.environmental_impact,
            self.cost_effectiveness,
            self.equity,
        ]
    }

    pub fn from_array(v: [f64; 5]) -> Self {
        Self {
            social_welfare: v[0],
            accessibility: v[1],
            environmental_impact: v[2],
            cost_effectiveness: v[3],
            equity: v[4],
        }
    }
}

/// importance of each criterion in the composite score
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct CriteriaWeights {
    pub social_welfare: f64,
    pub accessibility: f64,
    pub environmental_impact: f64,
    pub cost_effectiveness: f64,
    pub equity: f64,
}

impl Default for CriteriaWeights {
    fn default() -> Self {
        Self {
            social_welfare: 0.35,
            accessibility: 0.25,
            environmental_impact: 0.20,
            cost_effectiveness: 0.15,
            equity: 0.05,
        }
    }
}

impl CriteriaWeights {
    pub fn to_array(&self) -> [f64; 5] {
        [
            self.social_welfare,
            self.accessibility,
            self.environmental_impact,
            self.cost_effectiveness,
            self.equity,
        ]
    }

    pub fn from_array(v: [f64; 5]) -> Self {
        Self {
            social_welfare: v[0],
            accessibility: v[1],
            environmental_impact: v[2],
            cost_effectiveness: v[3],
            equity: v[4],
        }
    }

    /// weights must be finite, non-negative and sum to 1
    pub fn validate(&self) -> Result<(), McdaError> {
        let w = self.to_array();
        if let Some((name, value)) = CriterionValues::NAMES
            .iter()
            .zip(w.iter())
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(McdaError::InvalidWeights(format!(
                "{name} weight is {value}"
            )));
        }
        let total: f64 = w.iter().sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(McdaError::InvalidWeights(format!(
                "weights sum to {total}, expected 1"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!(CriteriaWeights::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_weights() {
        let short = CriteriaWeights {
            equity: 0.0,
            ..Default::default()
        };
        assert!(matches!(short.validate(), Err(McdaError::InvalidWeights(_))));
        let negative = CriteriaWeights::from_array([0.6, 0.5, -0.1, 0.0, 0.0]);
        assert!(matches!(negative.validate(), Err(McdaError::InvalidWeights(_))));
        let nan = CriteriaWeights::from_array([f64::NAN, 0.25, 0.2, 0.15, 0.05]);
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_partial_weights_fill_defaults_but_values_do_not() {
        let weights: CriteriaWeights =
            serde_json::from_str(r#"{"social_welfare": 0.4, "equity": 0.0}"#).expect("weights");
        assert_eq!(weights.accessibility, 0.25);
        assert_eq!(weights.social_welfare, 0.4);
        let values = serde_json::from_str::<CriterionValues>(r#"{"social_welfare": 120.0}"#);
        assert!(values.is_err());
    }
}
