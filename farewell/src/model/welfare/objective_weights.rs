use super::{MarketOutcome, OptimizationError};
use serde::{Deserialize, Serialize};

/// weights of the combined objective. values are mixed units, BDT for the
/// money terms and trips for demand, summed as given.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ObjectiveWeights {
    pub revenue: f64,
    pub profit: f64,
    pub benefit: f64,
    pub demand: f64,
    pub social_welfare: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            revenue: 0.2,
            profit: 0.2,
            benefit: 0.2,
            demand: 0.2,
            social_welfare: 0.2,
        }
    }
}

impl ObjectiveWeights {
    fn to_array(self) -> [(&'static str, f64); 5] {
        [
            ("revenue", self.revenue),
            ("profit", self.profit),
            ("benefit", self.benefit),
            ("demand", self.demand),
            ("social_welfare", self.social_welfare),
        ]
    }

    /// weights must be finite and non-negative, with at least one positive
    pub fn validate(&self) -> Result<(), OptimizationError> {
        let weights = self.to_array();
        if let Some((name, w)) = weights.iter().find(|(_, w)| !w.is_finite() || *w < 0.0) {
            return Err(OptimizationError::InvalidObjectiveWeights(format!(
                "{name} weight is {w}"
            )));
        }
        if weights.iter().all(|(_, w)| *w == 0.0) {
            return Err(OptimizationError::InvalidObjectiveWeights(String::from(
                "every weight is zero",
            )));
        }
        Ok(())
    }

    pub fn value(&self, outcome: &MarketOutcome) -> f64 {
        self.revenue * outcome.revenue
            + self.profit * outcome.profit
            + self.benefit * outcome.consumer_surplus
            + self.demand * outcome.demand
            + self.social_welfare * outcome.social_welfare
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_value() {
        let outcome = MarketOutcome {
            price: 40.0,
            demand: 10.0,
            revenue: 400.0,
            cost: 240.0,
            profit: 160.0,
            consumer_surplus: 50.0,
            externality: 1.0,
            social_welfare: 209.0,
        };
        let w = ObjectiveWeights::default();
        assert!((w.value(&outcome) - 0.2 * (400.0 + 160.0 + 50.0 + 10.0 + 209.0)).abs() < 1e-9);
        let revenue_only = ObjectiveWeights {
            revenue: 1.0,
            profit: 0.0,
            benefit: 0.0,
            demand: 0.0,
            social_welfare: 0.0,
        };
        assert_eq!(revenue_only.value(&outcome), 400.0);
    }

    #[test]
    fn test_invalid_weights() {
        let negative = ObjectiveWeights {
            demand: -0.1,
            ..Default::default()
        };
        assert!(negative.validate().is_err());
        let zero = ObjectiveWeights {
            revenue: 0.0,
            profit: 0.0,
            benefit: 0.0,
            demand: 0.0,
            social_welfare: 0.0,
        };
        assert!(matches!(
            zero.validate(),
            Err(OptimizationError::InvalidObjectiveWeights(_))
        ));
        assert!(ObjectiveWeights::default().validate().is_ok());
    }
}
