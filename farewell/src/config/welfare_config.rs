use crate::model::welfare::{DemandFunction, ObjectiveWeights, OptimizationError, PriceBoundsConfig, SensitivityRange};
use farewell_core::model::TransportMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// parameters of the per-mode fare optimization problems
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct WelfareConfig {
    pub demand_function: DemandFunction,
    /// unit operating cost as a share of the base fare
    pub cost_share: f64,
    /// BDT per kg CO2
    pub carbon_price: f64,
    /// kg CO2 per trip
    pub emission_factors: BTreeMap<TransportMode, f64>,
    pub price_bounds: PriceBoundsConfig,
    pub grid_points: usize,
    pub golden_section_tolerance: f64,
    pub sensitivity: SensitivityRange,
    /// weights of the combined Max-W objective
    pub objective_weights: ObjectiveWeights,
    /// operating cost ceiling in BDT for the Max-D fare, unconstrained when absent
    pub demand_budget: Option<f64>,
}

impl Default for WelfareConfig {
    fn default() -> Self {
        Self {
            demand_function: DemandFunction::default(),
            cost_share: 0.6,
            carbon_price: 0.5,
            emission_factors: default_emission_factors(),
            price_bounds: PriceBoundsConfig::default(),
            grid_points: 100,
            golden_section_tolerance: 1e-6,
            sensitivity: SensitivityRange::default(),
            objective_weights: ObjectiveWeights::default(),
            demand_budget: None,
        }
    }
}

impl WelfareConfig {
    /// kg CO2 per trip for a mode, 0 when not configured
    pub fn validate(&self) -> Result<(), OptimizationError> {
        self.demand_function.validate()?;
        self.sensitivity.validate()?;
        self.objective_weights.validate()?;
        match self.demand_budget {
            Some(budget) if !budget.is_finite() || budget <= 0.0 => {
                Err(OptimizationError::InvalidBudget(budget))
            }
            _ => Ok(()),
        }
    }

    pub fn emission_factor(&self, mode: TransportMode) -> f64 {
        self.emission_factors.get(&mode).copied().unwrap_or(0.0)
    }
}

pub fn default_emission_factors() -> BTreeMap<TransportMode, f64> {
    BTreeMap::from([
        (TransportMode::Bus, 0.08),
        (TransportMode::Mrt, 0.05),
        (TransportMode::Leguna, 0.12),
        (TransportMode::Rickshaw, 0.0),
        (TransportMode::PrivateCar, 0.20),
    ])
}
