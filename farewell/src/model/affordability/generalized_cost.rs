use crate::model::DescriptiveStatistics;
use farewell_core::model::{SurveyRecord, TransportMode};
use serde::{Deserialize, Serialize};

/// fare plus the respondent's own value of in-vehicle and weighted waiting time
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GeneralizedCost {
    pub mode: TransportMode,
    pub cost: DescriptiveStatistics,
}

pub fn generalized_cost(
    mode: TransportMode,
    records: &[&SurveyRecord],
    wait_time_weight: f64,
) -> Option<GeneralizedCost> {
    let costs = records
        .iter()
        .map(|r| r.generalized_cost(wait_time_weight))
        .collect::<Vec<_>>();
    DescriptiveStatistics::from_values(&costs).map(|cost| GeneralizedCost { mode, cost })
}

#[cfg(test)]
mod tests {
    use super::*;
    use farewell_core::model::IncomeGroup;

    #[test]
    fn test_generalized_cost() {
        // VOT = 60 / (30 + 10) = 1.5 BDT/min; cost = 20 + 1.5 * (30 + 1.5 * 10)
        let r = SurveyRecord::new("1", TransportMode::Leguna, IncomeGroup::Low, 20.0, 30.0, 10.0, 2, 60.0);
        let gc = generalized_cost(TransportMode::Leguna, &[&r], 1.5).expect("one record");
        assert!((gc.cost.mean - 87.5).abs() < 1e-12);
        assert_eq!(gc.cost.count, 1);
    }
}
