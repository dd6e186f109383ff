use super::OptimizationError;
use serde::{Deserialize, Serialize};

/// trips demanded at a price, given the observed demand at the base price
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DemandFunction {
    /// `Q = Q0 * (P / P0)^elasticity`
    ConstantElasticity { elasticity: f64 },
    /// `Q = max(0, Q0 * (1 - slope * (P - P0) / P0))`
    Linear { slope: f64 },
}

impl Default for DemandFunction {
    fn default() -> Self {
        DemandFunction::ConstantElasticity { elasticity: -0.5 }
    }
}

impl DemandFunction {
    pub fn demand(&self, base_demand: f64, base_price: f64, price: f64) -> f64 {
        match self {
            DemandFunction::ConstantElasticity { elasticity } => {
                base_demand * (price / base_price).powf(*elasticity)
            }
            DemandFunction::Linear { slope } => {
                (base_demand * (1.0 - slope * (price - base_price) / base_price)).max(0.0)
            }
        }
    }

    /// a constant elasticity curve is undefined at a zero price
    pub fn requires_positive_price(&self) -> bool {
        matches!(self, DemandFunction::ConstantElasticity { .. })
    }

    pub fn validate(&self) -> Result<(), OptimizationError> {
        match self {
            DemandFunction::ConstantElasticity { elasticity } if !elasticity.is_finite() => Err(
                OptimizationError::InvalidDemandFunction(format!("elasticity {elasticity}")),
            ),
            DemandFunction::Linear { slope } if !slope.is_finite() || *slope < 0.0 => Err(
                OptimizationError::InvalidDemandFunction(format!("linear slope {slope}")),
            ),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_price_returns_base_demand() {
        for f in [
            DemandFunction::default(),
            DemandFunction::Linear { slope: 0.5 },
        ] {
            assert!((f.demand(120.0, 40.0, 40.0) - 120.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_shapes() {
        let ce = DemandFunction::ConstantElasticity { elasticity: -1.0 };
        assert!((ce.demand(100.0, 50.0, 100.0) - 50.0).abs() < 1e-12);
        let linear = DemandFunction::Linear { slope: 0.5 };
        assert!((linear.demand(100.0, 50.0, 100.0) - 50.0).abs() < 1e-12);
        // linear demand never goes negative
        assert_eq!(linear.demand(100.0, 50.0, 1000.0), 0.0);
        assert!(DemandFunction::Linear { slope: -1.0 }.validate().is_err());
    }
}
