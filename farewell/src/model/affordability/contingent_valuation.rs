use crate::model::{mean, Segment};
use farewell_core::model::SurveyRecord;
use serde::{Deserialize, Serialize};

/// answers to the lower-fare and higher-comfort offers of the survey
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ContingentValuation {
    pub segment: Segment,
    pub respondents: usize,
    pub lower_fare_acceptance: f64,
    pub higher_comfort_acceptance: f64,
    /// mean stated WTP of respondents accepting the lower-fare offer
    pub lower_fare_mean_wtp: Option<f64>,
    pub higher_comfort_mean_wtp: Option<f64>,
}

pub fn contingent_valuation(
    segment: Segment,
    records: &[&SurveyRecord],
) -> Option<ContingentValuation> {
    if records.is_empty() {
        return None;
    }
    let n = records.len() as f64;
    let lower = records
        .iter()
        .filter(|r| r.wtp_lower_fare)
        .map(|r| r.wtp)
        .collect::<Vec<_>>();
    let higher = records
        .iter()
        .filter(|r| r.wtp_higher_comfort)
        .map(|r| r.wtp)
        .collect::<Vec<_>>();
    Some(ContingentValuation {
        segment,
        respondents: records.len(),
        lower_fare_acceptance: lower.len() as f64 / n,
        higher_comfort_acceptance: higher.len() as f64 / n,
        lower_fare_mean_wtp: mean(&lower),
        higher_comfort_mean_wtp: mean(&higher),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use farewell_core::model::{IncomeGroup, TransportMode};

    #[test]
    fn test_acceptance_rates() {
        let mut records = (0..4)
            .map(|i| SurveyRecord::new(&i.to_string(), TransportMode::Bus, IncomeGroup::Mid, 40.0, 30.0, 5.0, 3, 50.0 + 10.0 * i as f64))
            .collect::<Vec<_>>();
        records[0].wtp_lower_fare = true;
        records[2].wtp_lower_fare = true;
        records[3].wtp_higher_comfort = true;
        let refs = records.iter().collect::<Vec<_>>();
        let cv = contingent_valuation(Segment::All, &refs).expect("non-empty");
        assert_eq!(cv.lower_fare_acceptance, 0.5);
        assert_eq!(cv.higher_comfort_acceptance, 0.25);
        assert_eq!(cv.lower_fare_mean_wtp, Some(60.0));
        assert_eq!(cv.higher_comfort_mean_wtp, Some(80.0));
    }
}
