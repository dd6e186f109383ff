use super::DemandFunction;
use farewell_core::model::{SurveyRecord, TransportMode};
use serde::{Deserialize, Serialize};

/// observed demand and costs of one mode, the setting of its fare problems
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModeMarket {
    pub mode: TransportMode,
    /// trips observed at the base price
    pub base_demand: f64,
    /// mean fare paid, BDT
    pub base_price: f64,
    /// operating cost per trip, BDT
    pub unit_cost: f64,
    /// external cost per trip, BDT
    pub externality_per_trip: f64,
    pub emission_factor: f64,
}

impl ModeMarket {
    /// None when no respondent uses the mode
    pub fn from_records(
        mode: TransportMode,
        records: &[&SurveyRecord],
        cost_share: f64,
        emission_factor: f64,
        carbon_price: f64,
    ) -> Option<ModeMarket> {
        if records.is_empty() {
            return None;
        }
        let base_demand = records.len() as f64;
        let base_price = records.iter().map(|r| r.fare).sum::<f64>() / base_demand;
        Some(ModeMarket {
            mode,
            base_demand,
            base_price,
            unit_cost: cost_share * base_price,
            externality_per_trip: emission_factor * carbon_price,
            emission_factor,
        })
    }

    pub fn evaluate(&self, price: f64, demand_function: &DemandFunction) -> MarketOutcome {
        let demand = demand_function.demand(self.base_demand, self.base_price, price);
        let revenue = price * demand;
        let cost = self.unit_cost * demand;
        let profit = revenue - cost;
        let consumer_surplus = 0.5 * (self.base_price - price) * demand;
        let externality = self.externality_per_trip * demand;
        MarketOutcome {
            price,
            demand,
            revenue,
            cost,
            profit,
            consumer_surplus,
            externality,
            social_welfare: consumer_surplus + profit - externality,
        }
    }
}

/// the market at one fare
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MarketOutcome {
    pub price: f64,
    pub demand: f64,
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
    pub consumer_surplus: f64,
    pub externality: f64,
    pub social_welfare: f64,
}

impl MarketOutcome {
    pub fn is_finite(&self) -> bool {
        [
            self.price,
            self.demand,
            self.revenue,
            self.cost,
            self.profit,
            self.consumer_surplus,
            self.externality,
            self.social_welfare,
        ]
        .iter()
        .all(|x| x.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farewell_core::model::IncomeGroup;

    #[test]
    fn test_market_accounting() {
        let records = [30.0, 50.0]
            .iter()
            .map(|f| SurveyRecord::new("1", TransportMode::Leguna, IncomeGroup::Low, *f, 30.0, 5.0, 2, 60.0))
            .collect::<Vec<_>>();
        let refs = records.iter().collect::<Vec<_>>();
        let market = ModeMarket::from_records(TransportMode::Leguna, &refs, 0.6, 0.12, 0.5)
            .expect("market");
        assert_eq!(market.base_price, 40.0);
        assert_eq!(market.base_demand, 2.0);
        assert!((market.unit_cost - 24.0).abs() < 1e-12);
        assert!((market.externality_per_trip - 0.06).abs() < 1e-12);

        let at_base = market.evaluate(40.0, &DemandFunction::default());
        assert_eq!(at_base.demand, 2.0);
        assert_eq!(at_base.revenue, 80.0);
        assert_eq!(at_base.consumer_surplus, 0.0);
        assert!((at_base.social_welfare - (80.0 - 48.0 - 0.12)).abs() < 1e-9);
    }
}
