use super::{SubsidyRates, SubsidyTargeting};
use farewell_core::model::IncomeGroup;
use serde::{Deserialize, Serialize};

/// effect of a scenario on the trips of one income group
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GroupPolicyImpact {
    pub income_group: IncomeGroup,
    pub rate: f64,
    pub trips: usize,
    pub trips_subsidized: usize,
    pub subsidy_cost: f64,
    /// subsidized trips moved out of the unaffordable band
    pub accessibility_improvement: usize,
    pub unaffordable_before: usize,
    pub unaffordable_after: usize,
    /// additional trips implied by the lower fare
    pub induced_demand: f64,
}

impl GroupPolicyImpact {
    pub fn empty(income_group: IncomeGroup, rate: f64) -> GroupPolicyImpact {
        GroupPolicyImpact {
            income_group,
            rate,
            trips: 0,
            trips_subsidized: 0,
            subsidy_cost: 0.0,
            accessibility_improvement: 0,
            unaffordable_before: 0,
            unaffordable_after: 0,
            induced_demand: 0.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub name: String,
    pub rates: SubsidyRates,
    pub targeting: SubsidyTargeting,
    pub total_subsidy_cost: f64,
    pub accessibility_improvement: usize,
    /// trips made affordable per BDT of subsidy, 0 when nothing is spent
    pub cost_effectiveness: f64,
    pub induced_demand: f64,
    pub trips_subsidized: usize,
    pub unaffordable_before: usize,
    pub unaffordable_after: usize,
    pub by_income_group: Vec<GroupPolicyImpact>,
}

impl ScenarioOutcome {
    /// rolls the group impacts up into scenario totals
    pub fn from_groups(
        name: &str,
        rates: SubsidyRates,
        targeting: SubsidyTargeting,
        by_income_group: Vec<GroupPolicyImpact>,
    ) -> ScenarioOutcome {
        let total_subsidy_cost = by_income_group.iter().map(|g| g.subsidy_cost).sum::<f64>();
        let accessibility_improvement = by_income_group
            .iter()
            .map(|g| g.accessibility_improvement)
            .sum::<usize>();
        let cost_effectiveness = if total_subsidy_cost > 0.0 {
            accessibility_improvement as f64 / total_subsidy_cost
        } else {
            0.0
        };
        ScenarioOutcome {
            name: name.to_string(),
            rates,
            targeting,
            total_subsidy_cost,
            accessibility_improvement,
            cost_effectiveness,
            induced_demand: by_income_group.iter().map(|g| g.induced_demand).sum(),
            trips_subsidized: by_income_group.iter().map(|g| g.trips_subsidized).sum(),
            unaffordable_before: by_income_group.iter().map(|g| g.unaffordable_before).sum(),
            unaffordable_after: by_income_group.iter().map(|g| g.unaffordable_after).sum(),
            by_income_group,
        }
    }
}
