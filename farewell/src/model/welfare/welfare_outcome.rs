use super::{MarketOutcome, OptimumLocation, PriceRange, WelfareObjective};
use farewell_core::model::TransportMode;
use serde::{Deserialize, Serialize};

/// the fare solving one objective for one mode, and the market it produces
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WelfareOutcome {
    pub mode: TransportMode,
    pub objective: WelfareObjective,
    pub bounds: PriceRange,
    pub location: OptimumLocation,
    pub objective_value: f64,
    #[serde(flatten)]
    pub market: MarketOutcome,
}

/// flat row for CSV export
#[derive(Serialize, Debug, Clone)]
pub struct WelfareOutcomeRow {
    pub mode: String,
    pub objective: String,
    pub min_price: f64,
    pub max_price: f64,
    pub location: String,
    pub price: f64,
    pub demand: f64,
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
    pub consumer_surplus: f64,
    pub externality: f64,
    pub social_welfare: f64,
    pub objective_value: f64,
}

impl From<&WelfareOutcome> for WelfareOutcomeRow {
    fn from(o: &WelfareOutcome) -> Self {
        WelfareOutcomeRow {
            mode: o.mode.to_string(),
            objective: o.objective.to_string(),
            min_price: o.bounds.min,
            max_price: o.bounds.max,
            location: o.location.to_string(),
            price: o.market.price,
            demand: o.market.demand,
            revenue: o.market.revenue,
            cost: o.market.cost,
            profit: o.market.profit,
            consumer_surplus: o.market.consumer_surplus,
            externality: o.market.externality,
            social_welfare: o.market.social_welfare,
            objective_value: o.objective_value,
        }
    }
}
