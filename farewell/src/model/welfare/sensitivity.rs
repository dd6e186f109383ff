use super::{OptimizationError, OptimumLocation};
use crate::model::StageOutcome;
use farewell_core::model::TransportMode;
use serde::{Deserialize, Serialize};

/// constant price elasticities to re-solve the social welfare problem for
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SensitivityRange {
    pub min_elasticity: f64,
    pub max_elasticity: f64,
    pub steps: usize,
}

impl Default for SensitivityRange {
    fn default() -> Self {
        Self {
            min_elasticity: -2.0,
            max_elasticity: -0.2,
            steps: 10,
        }
    }
}

impl SensitivityRange {
    pub fn validate(&self) -> Result<(), OptimizationError> {
        if !self.min_elasticity.is_finite() || !self.max_elasticity.is_finite() {
            Err(OptimizationError::InvalidSensitivityRange(String::from(
                "elasticities must be finite",
            )))
        } else if self.min_elasticity > self.max_elasticity {
            Err(OptimizationError::InvalidSensitivityRange(format!(
                "min elasticity {} exceeds max elasticity {}",
                self.min_elasticity, self.max_elasticity
            )))
        } else {
            Ok(())
        }
    }

    /// evenly spaced elasticities from min to max inclusive
    pub fn elasticities(&self) -> Vec<f64> {
        match self.steps {
            0 => vec![],
            1 => vec![self.min_elasticity],
            n => (0..n)
                .map(|i| {
                    if i == n - 1 {
                        self.max_elasticity
                    } else {
                        self.min_elasticity
                            + (self.max_elasticity - self.min_elasticity) * i as f64
                                / (n - 1) as f64
                    }
                })
                .collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SensitivityPoint {
    pub elasticity: f64,
    pub price: f64,
    pub demand: f64,
    pub social_welfare: f64,
    pub location: OptimumLocation,
}

/// welfare-maximizing fares of one mode across elasticities
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SensitivityCurve {
    pub mode: TransportMode,
    pub outcome: StageOutcome<Vec<SensitivityPoint>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_elasticities() {
        let e = SensitivityRange::default().elasticities();
        assert_eq!(e.len(), 10);
        assert_eq!(e[0], -2.0);
        assert_eq!(e[9], -0.2);
        assert!((e[1] + 1.8).abs() < 1e-12);
        assert!(e.windows(2).all(|w| w[0] < w[1]));
    }
}
