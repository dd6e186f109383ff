use super::ChoiceModelError;
use farewell_core::model::{SurveyRecord, TransportMode};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// level-of-service attributes of one alternative as seen by one respondent
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct AlternativeAttributes {
    pub fare: f64,
    pub travel_time: f64,
    pub wait_time: f64,
    pub comfort: f64,
}

impl From<&SurveyRecord> for AlternativeAttributes {
    fn from(r: &SurveyRecord) -> Self {
        AlternativeAttributes {
            fare: r.fare,
            travel_time: r.travel_time,
            wait_time: r.wait_time,
            comfort: f64::from(r.comfort),
        }
    }
}

/// one respondent's choice situation over the analysed modes. `alternatives`
/// is ordered like the mode list it was built from.
#[derive(Debug, Clone)]
pub struct ChoiceObservation {
    pub chosen: usize,
    pub income_level: f64,
    pub alternatives: Vec<AlternativeAttributes>,
}

/// mean attributes of the respondents who chose each mode
pub fn mean_attributes(records: &[&SurveyRecord]) -> BTreeMap<TransportMode, AlternativeAttributes> {
    records
        .iter()
        .map(|r| (r.mode, AlternativeAttributes::from(*r)))
        .into_group_map()
        .into_iter()
        .map(|(mode, attrs)| {
            let n = attrs.len() as f64;
            let sum = attrs.iter().fold([0.0; 4], |acc, a| {
                [
                    acc[0] + a.fare,
                    acc[1] + a.travel_time,
                    acc[2] + a.wait_time,
                    acc[3] + a.comfort,
                ]
            });
            let mean = AlternativeAttributes {
                fare: sum[0] / n,
                travel_time: sum[1] / n,
                wait_time: sum[2] / n,
                comfort: sum[3] / n,
            };
            (mode, mean)
        })
        .collect()
}

/// builds choice observations from revealed choices. the chosen alternative
/// carries the respondent's own attributes; every other alternative is
/// imputed with the mean attributes of respondents in `records` who chose
/// it, or with `fallback` means when nobody in `records` chose it.
pub fn build_choice_set(
    records: &[&SurveyRecord],
    modes: &[TransportMode],
    fallback: &BTreeMap<TransportMode, AlternativeAttributes>,
) -> Result<Vec<ChoiceObservation>, ChoiceModelError> {
    let local = mean_attributes(records);
    let imputed = modes
        .iter()
        .map(|m| {
            local
                .get(m)
                .or_else(|| fallback.get(m))
                .copied()
                .ok_or_else(|| ChoiceModelError::UnobservedAlternative(m.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let observations = records
        .iter()
        .filter_map(|r| {
            let chosen = modes.iter().position(|m| *m == r.mode)?;
            let mut alternatives = imputed.clone();
            alternatives[chosen] = AlternativeAttributes::from(*r);
            Some(ChoiceObservation {
                chosen,
                income_level: r.income_group.centered_level(),
                alternatives,
            })
        })
        .collect_vec();
    Ok(observations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use farewell_core::model::IncomeGroup;

    #[test]
    fn test_imputation_uses_group_then_fallback_means() {
        let records = vec![
            SurveyRecord::new("1", TransportMode::Bus, IncomeGroup::Low, 30.0, 40.0, 10.0, 3, 50.0),
            SurveyRecord::new("2", TransportMode::Bus, IncomeGroup::Low, 40.0, 50.0, 12.0, 2, 50.0),
            SurveyRecord::new("3", TransportMode::Leguna, IncomeGroup::Low, 20.0, 60.0, 8.0, 1, 50.0),
        ];
        let refs = records.iter().collect_vec();
        let mut fallback = BTreeMap::new();
        let mrt = AlternativeAttributes {
            fare: 100.0,
            travel_time: 20.0,
            wait_time: 4.0,
            comfort: 5.0,
        };
        fallback.insert(TransportMode::Mrt, mrt);
        let modes = [TransportMode::Bus, TransportMode::Mrt, TransportMode::Leguna];
        let obs = build_choice_set(&refs, &modes, &fallback).expect("choice set");
        assert_eq!(obs.len(), 3);
        assert_eq!(obs[0].chosen, 0);
        assert_eq!(obs[0].alternatives[0].fare, 30.0);
        assert_eq!(obs[0].alternatives[1], mrt);
        assert_eq!(obs[0].alternatives[2].fare, 20.0);
        // leguna chooser sees the mean bus trip
        assert_eq!(obs[2].alternatives[0].fare, 35.0);
        assert_eq!(obs[2].income_level, -1.0);
    }

    #[test]
    fn test_unobserved_alternative() {
        let records = vec![SurveyRecord::new(
            "1",
            TransportMode::Bus,
            IncomeGroup::Low,
            30.0,
            40.0,
            10.0,
            3,
            50.0,
        )];
        let refs = records.iter().collect_vec();
        let modes = [TransportMode::Bus, TransportMode::Mrt];
        let result = build_choice_set(&refs, &modes, &BTreeMap::new());
        assert!(matches!(result, Err(ChoiceModelError::UnobservedAlternative(_))));
    }
}
