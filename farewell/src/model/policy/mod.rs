mod policy_error;
mod policy_scenario;
mod scenario_outcome;
mod subsidy_targeting;

pub use policy_error::PolicyError;
pub use policy_scenario::{PolicyScenario, SubsidyRates};
pub use scenario_outcome::{GroupPolicyImpact, ScenarioOutcome};
pub use subsidy_targeting::SubsidyTargeting;

use crate::config::PolicyConfig;
use farewell_core::model::{AffordabilityBand, IncomeGroup, SurveyDataset, SurveyRecord};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// a fully subsidized trip is priced at this share of its fare when
/// computing induced demand, keeping `(1 - rate)^e` finite
pub const MIN_PRICE_SHARE: f64 = 0.01;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PolicyResults {
    pub targeting: SubsidyTargeting,
    pub induced_demand_elasticity: f64,
    /// in configured scenario order
    pub scenarios: Vec<ScenarioOutcome>,
}

impl PolicyResults {
    /// the scenario that buys the most affordability per BDT, if any spends anything
    pub fn most_cost_effective(&self) -> Option<&ScenarioOutcome> {
        self.scenarios
            .iter()
            .filter(|s| s.total_subsidy_cost > 0.0)
            .max_by(|a, b| a.cost_effectiveness.total_cmp(&b.cost_effectiveness))
    }
}

/// evaluates every configured scenario independently against the same trips.
pub fn evaluate_policies(
    dataset: &SurveyDataset,
    conf: &PolicyConfig,
) -> Result<PolicyResults, PolicyError> {
    if !conf.induced_demand_elasticity.is_finite() {
        return Err(PolicyError::InvalidElasticity(
            conf.induced_demand_elasticity,
        ));
    }
    let mut names = HashSet::new();
    for scenario in conf.scenarios.iter() {
        scenario.validate()?;
        if !names.insert(scenario.name.as_str()) {
            return Err(PolicyError::DuplicateScenario(scenario.name.clone()));
        }
    }
    let groups = dataset.by_income_group();
    let scenarios = conf
        .scenarios
        .iter()
        .map(|scenario| {
            let impacts = IncomeGroup::ALL
                .iter()
                .map(|g| {
                    let records = groups.get(g).map(|r| r.as_slice()).unwrap_or(&[]);
                    group_impact(
                        *g,
                        records,
                        scenario.rates.rate(*g),
                        conf.targeting,
                        conf.induced_demand_elasticity,
                    )
                })
                .collect_vec();
            let outcome = ScenarioOutcome::from_groups(
                &scenario.name,
                scenario.rates,
                conf.targeting,
                impacts,
            );
            log::debug!(
                "policy '{}': cost {:.2} BDT, {} trips made affordable",
                outcome.name,
                outcome.total_subsidy_cost,
                outcome.accessibility_improvement
            );
            outcome
        })
        .collect_vec();

    let results = PolicyResults {
        targeting: conf.targeting,
        induced_demand_elasticity: conf.induced_demand_elasticity,
        scenarios,
    };
    if let Some(best) = results.most_cost_effective() {
        log::info!(
            "policy: '{}' is most cost-effective at {:.4} trips per BDT",
            best.name,
            best.cost_effectiveness
        );
    }
    Ok(results)
}

/// applies one subsidy rate to the trips of one income group
pub fn group_impact(
    income_group: IncomeGroup,
    records: &[&SurveyRecord],
    rate: f64,
    targeting: SubsidyTargeting,
    elasticity: f64,
) -> GroupPolicyImpact {
    let mut impact = GroupPolicyImpact::empty(income_group, rate);
    impact.trips = records.len();
    for r in records.iter() {
        let before = r.affordability_band();
        if before == AffordabilityBand::Unaffordable {
            impact.unaffordable_before += 1;
        }
        let eligible = match targeting {
            SubsidyTargeting::UnaffordableOnly => before == AffordabilityBand::Unaffordable,
            SubsidyTargeting::AllTrips => true,
        };
        if !eligible || rate <= 0.0 {
            continue;
        }
        let subsidy = r.fare * rate;
        impact.trips_subsidized += 1;
        impact.subsidy_cost += subsidy;
        let after = AffordabilityBand::from_ratio((r.fare - subsidy) / r.wtp);
        if before == AffordabilityBand::Unaffordable && after.is_affordable() {
            impact.accessibility_improvement += 1;
        }
        let price_share = (1.0 - rate).max(MIN_PRICE_SHARE);
        impact.induced_demand += price_share.powf(elasticity) - 1.0;
    }
    impact.unaffordable_after = impact.unaffordable_before - impact.accessibility_improvement;
    impact
}

#[cfg(test)]
mod tests {
    use super::*;
    use farewell_core::model::TransportMode;

    fn trip(id: usize, group: IncomeGroup, fare: f64, wtp: f64) -> SurveyRecord {
        SurveyRecord::new(&id.to_string(), TransportMode::Bus, group, fare, 30.0, 5.0, 3, wtp)
    }

    fn universal(rate: f64) -> PolicyConfig {
        PolicyConfig {
            scenarios: vec![PolicyScenario::new(
                "universal_subsidy",
                SubsidyRates::new(rate, rate, rate),
            )],
            ..Default::default()
        }
    }

    /// 51 trips become affordable under a 20% subsidy, 35 stay unaffordable
    fn literal_trips() -> SurveyDataset {
        let groups = IncomeGroup::ALL;
        let mut records = vec![];
        for i in 0..51 {
            records.push(trip(i, groups[i % 3], 100.0, 90.0));
        }
        for i in 51..85 {
            records.push(trip(i, groups[i % 3], 100.0, 50.0));
        }
        records.push(trip(85, IncomeGroup::Low, 10.2, 5.0));
        SurveyDataset::new(records)
    }

    #[test]
    fn test_universal_subsidy_literal() {
        let results = evaluate_policies(&literal_trips(), &universal(0.2)).expect("policies");
        let s = &results.scenarios[0];
        assert!((s.total_subsidy_cost - 1702.04).abs() < 1e-9);
        assert_eq!(s.accessibility_improvement, 51);
        assert!((s.cost_effectiveness - 0.030).abs() < 5e-4);
        assert_eq!(s.trips_subsidized, 86);
        assert_eq!(s.unaffordable_before, 86);
        assert_eq!(s.unaffordable_after, 35);
        let groups = s
            .by_income_group
            .iter()
            .map(|g| g.trips)
            .collect_vec();
        assert_eq!(groups.iter().sum::<usize>(), 86);
        // 0.8^-0.5 - 1 per subsidized trip
        let expected = 86.0 * (0.8_f64.powf(-0.5) - 1.0);
        assert!((s.induced_demand - expected).abs() < 1e-9);
    }

    #[test]
    fn test_zero_rate_costs_nothing() {
        let results = evaluate_policies(&literal_trips(), &PolicyConfig::default())
            .expect("policies");
        let current = &results.scenarios[0];
        assert_eq!(current.name, "current");
        assert_eq!(current.total_subsidy_cost, 0.0);
        assert_eq!(current.cost_effectiveness, 0.0);
        assert_eq!(current.unaffordable_after, current.unaffordable_before);
        assert_eq!(results.scenarios.len(), 5);
        assert!(results.most_cost_effective().is_some());
    }

    #[test]
    fn test_all_trips_targeting() {
        let dataset = SurveyDataset::new(vec![
            trip(0, IncomeGroup::Low, 20.0, 100.0),
            trip(1, IncomeGroup::Low, 120.0, 100.0),
        ]);
        let mut conf = universal(0.5);
        let only = evaluate_policies(&dataset, &conf).expect("policies");
        assert_eq!(only.scenarios[0].trips_subsidized, 1);
        assert!((only.scenarios[0].total_subsidy_cost - 60.0).abs() < 1e-12);
        conf.targeting = SubsidyTargeting::AllTrips;
        let all = evaluate_policies(&dataset, &conf).expect("policies");
        assert_eq!(all.scenarios[0].trips_subsidized, 2);
        assert!((all.scenarios[0].total_subsidy_cost - 70.0).abs() < 1e-12);
        assert_eq!(all.scenarios[0].accessibility_improvement, 1);
    }

    #[test]
    fn test_full_subsidy_keeps_induced_demand_finite() {
        let dataset = SurveyDataset::new(vec![trip(0, IncomeGroup::Low, 120.0, 100.0)]);
        let results = evaluate_policies(&dataset, &universal(1.0)).expect("policies");
        assert!(results.scenarios[0].induced_demand.is_finite());
        assert_eq!(results.scenarios[0].accessibility_improvement, 1);
    }

    #[test]
    fn test_invalid_scenarios() {
        let dataset = literal_trips();
        let result = evaluate_policies(&dataset, &universal(-0.1));
        assert!(matches!(result, Err(PolicyError::InvalidSubsidyRate { .. })));
        let mut conf = universal(0.2);
        conf.scenarios.push(conf.scenarios[0].clone());
        let result = evaluate_policies(&dataset, &conf);
        assert!(matches!(result, Err(PolicyError::DuplicateScenario(_))));
    }
}
