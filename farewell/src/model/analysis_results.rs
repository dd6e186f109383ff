use super::{
    affordability::AffordabilityResults,
    choice::{ChoiceModelResults, ModeValue},
    mcda::McdaResults,
    policy::PolicyResults,
    welfare::WelfareResults,
    Segment,
};
use chrono::{DateTime, Utc};
use farewell_core::{
    io::LoadSummary,
    model::{IncomeGroup, SurveyDataset, SurveyRecord, TransportMode},
};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnalysisMetadata {
    pub generated_at: DateTime<Utc>,
    pub crate_version: String,
    pub observations: usize,
    pub income_groups: Vec<IncomeGroup>,
    pub modes: Vec<TransportMode>,
}

impl AnalysisMetadata {
    pub fn new(dataset: &SurveyDataset, modes: &[TransportMode]) -> AnalysisMetadata {
        AnalysisMetadata {
            generated_at: Utc::now(),
            crate_version: env!("CARGO_PKG_VERSION").to_string(),
            observations: dataset.len(),
            income_groups: dataset.income_groups_present(),
            modes: modes.to_vec(),
        }
    }
}

/// observed share of trips by mode within one segment
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModeShares {
    pub segment: Segment,
    pub trips: usize,
    pub shares: Vec<ModeValue>,
}

impl ModeShares {
    pub fn from_records(
        segment: Segment,
        records: &[&SurveyRecord],
        modes: &[TransportMode],
    ) -> ModeShares {
        let trips = records.len();
        let counts = records.iter().counts_by(|r| r.mode);
        let shares = modes
            .iter()
            .map(|mode| {
                let count = counts.get(mode).copied().unwrap_or(0);
                let value = if trips > 0 {
                    count as f64 / trips as f64
                } else {
                    0.0
                };
                ModeValue { mode: *mode, value }
            })
            .collect_vec();
        ModeShares {
            segment,
            trips,
            shares,
        }
    }
}

/// overall mode shares followed by the shares within each income group
pub fn mode_shares(dataset: &SurveyDataset, modes: &[TransportMode]) -> Vec<ModeShares> {
    let all = dataset.iter().collect_vec();
    std::iter::once(ModeShares::from_records(Segment::All, &all, modes))
        .chain(
            dataset
                .by_income_group()
                .iter()
                .map(|(g, records)| ModeShares::from_records(Segment::Income(*g), records, modes)),
        )
        .collect_vec()
}

/// everything one analysis run produced, in the order the stages ran
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnalysisResults {
    pub metadata: AnalysisMetadata,
    pub load_summary: LoadSummary,
    pub mode_shares: Vec<ModeShares>,
    pub choice_models: ChoiceModelResults,
    pub affordability: AffordabilityResults,
    pub welfare: WelfareResults,
    pub mcda: McdaResults,
    pub policy: PolicyResults,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_shares_sum_to_one() {
        let records = vec![
            SurveyRecord::new("1", TransportMode::Bus, IncomeGroup::Low, 30.0, 40.0, 5.0, 2, 50.0),
            SurveyRecord::new("2", TransportMode::Bus, IncomeGroup::High, 30.0, 40.0, 5.0, 2, 50.0),
            SurveyRecord::new("3", TransportMode::Mrt, IncomeGroup::High, 90.0, 20.0, 3.0, 4, 150.0),
            SurveyRecord::new("4", TransportMode::Leguna, IncomeGroup::Low, 20.0, 50.0, 9.0, 1, 40.0),
        ];
        let dataset = SurveyDataset::new(records);
        let modes = [TransportMode::Bus, TransportMode::Mrt, TransportMode::Leguna];
        let shares = mode_shares(&dataset, &modes);
        assert_eq!(shares.len(), 3);
        assert_eq!(shares[0].segment, Segment::All);
        assert_eq!(shares[0].shares[0].value, 0.5);
        for s in shares.iter() {
            let total = s.shares.iter().map(|m| m.value).sum::<f64>();
            assert!((total - 1.0).abs() < 1e-12);
        }
        let high = &shares[2];
        assert_eq!(high.segment, Segment::Income(IncomeGroup::High));
        assert_eq!(high.shares[2].value, 0.0);
    }
}
