use super::{DemandFunction, OptimizationError};
use farewell_core::model::TransportMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// feasible fares for one mode. a range with `min == max` is a single point.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// checks the range against the demand function it will be searched with
    pub fn validated(
        mode: TransportMode,
        min: f64,
        max: f64,
        demand: &DemandFunction,
    ) -> Result<PriceRange, OptimizationError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(OptimizationError::NonFiniteBounds {
                mode: mode.to_string(),
                min,
                max,
            });
        }
        if min > max {
            return Err(OptimizationError::InvertedBounds {
                mode: mode.to_string(),
                min,
                max,
            });
        }
        if min < 0.0 || (min == 0.0 && demand.requires_positive_price()) {
            return Err(OptimizationError::NonPositivePrice {
                mode: mode.to_string(),
                min,
            });
        }
        Ok(PriceRange { min, max })
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PriceBoundsConfig {
    /// bounds as multiples of each mode's base fare
    Relative { lower_factor: f64, upper_factor: f64 },
    /// BDT bounds per mode
    Fixed { bounds: BTreeMap<TransportMode, PriceRange> },
}

impl Default for PriceBoundsConfig {
    fn default() -> Self {
        PriceBoundsConfig::Relative {
            lower_factor: 0.5,
            upper_factor: 2.0,
        }
    }
}

impl PriceBoundsConfig {
    pub fn resolve(
        &self,
        mode: TransportMode,
        base_price: f64,
        demand: &DemandFunction,
    ) -> Result<PriceRange, OptimizationError> {
        match self {
            PriceBoundsConfig::Relative {
                lower_factor,
                upper_factor,
            } => PriceRange::validated(
                mode,
                lower_factor * base_price,
                upper_factor * base_price,
                demand,
            ),
            PriceBoundsConfig::Fixed { bounds } => {
                let range = bounds
                    .get(&mode)
                    .ok_or_else(|| OptimizationError::MissingBounds(mode.to_string()))?;
                PriceRange::validated(mode, range.min, range.max, demand)
            }
        }
    }
}
