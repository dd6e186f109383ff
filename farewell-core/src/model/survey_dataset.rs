use super::{IncomeGroup, SurveyRecord, TransportMode};
use itertools::Itertools;
use std::collections::BTreeMap;

/// the cleaned survey. created once when the survey is loaded and shared by
/// reference with every analysis stage; records cannot be modified afterward.
#[derive(Debug, Clone, Default)]
pub struct SurveyDataset {
    records: Vec<SurveyRecord>,
}

impl SurveyDataset {
    pub fn new(records: Vec<SurveyRecord>) -> SurveyDataset {
        SurveyDataset { records }
    }

    pub fn records(&self) -> &[SurveyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SurveyRecord> {
        self.records.iter()
    }

    /// records grouped by income group, ordered Low, Mid, High. groups with no
    /// respondents are absent.
    pub fn by_income_group(&self) -> BTreeMap<IncomeGroup, Vec<&SurveyRecord>> {
        self.records
            .iter()
            .map(|r| (r.income_group, r))
            .into_group_map()
            .into_iter()
            .collect()
    }

    /// records grouped by chosen mode. modes nobody chose are absent.
    pub fn by_mode(&self) -> BTreeMap<TransportMode, Vec<&SurveyRecord>> {
        self.records
            .iter()
            .map(|r| (r.mode, r))
            .into_group_map()
            .into_iter()
            .collect()
    }

    pub fn income_groups_present(&self) -> Vec<IncomeGroup> {
        self.records
            .iter()
            .map(|r| r.income_group)
            .unique()
            .sorted()
            .collect()
    }

    pub fn modes_present(&self) -> Vec<TransportMode> {
        self.records
            .iter()
            .map(|r| r.mode)
            .unique()
            .sorted()
            .collect()
    }

    /// the configured modes that at least one respondent chose, in configured order
    pub fn analysed_modes(&self, configured: &[TransportMode]) -> Vec<TransportMode> {
        let present = self.modes_present();
        configured
            .iter()
            .filter(|m| present.contains(m))
            .unique()
            .copied()
            .collect()
    }

    /// keeps only records whose chosen mode is in `modes`
    pub fn restricted_to(&self, modes: &[TransportMode]) -> SurveyDataset {
        let records = self
            .records
            .iter()
            .filter(|r| modes.contains(&r.mode))
            .cloned()
            .collect_vec();
        SurveyDataset { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> SurveyDataset {
        SurveyDataset::new(vec![
            SurveyRecord::new("1", TransportMode::Leguna, IncomeGroup::High, 20.0, 30.0, 5.0, 2, 40.0),
            SurveyRecord::new("2", TransportMode::Bus, IncomeGroup::Low, 30.0, 40.0, 10.0, 3, 35.0),
            SurveyRecord::new("3", TransportMode::Bus, IncomeGroup::High, 35.0, 45.0, 8.0, 3, 60.0),
            SurveyRecord::new("4", TransportMode::Rickshaw, IncomeGroup::Low, 50.0, 20.0, 2.0, 2, 45.0),
        ])
    }

    #[test]
    fn test_grouping() {
        let ds = dataset();
        let groups = ds.by_income_group();
        assert_eq!(groups.keys().copied().collect_vec(), vec![IncomeGroup::Low, IncomeGroup::High]);
        assert_eq!(groups[&IncomeGroup::High].len(), 2);
        let modes = ds.by_mode();
        assert_eq!(modes[&TransportMode::Bus].len(), 2);
        assert_eq!(ds.income_groups_present(), vec![IncomeGroup::Low, IncomeGroup::High]);
    }

    #[test]
    fn test_analysed_modes_keeps_configured_order() {
        let ds = dataset();
        let configured = [TransportMode::Leguna, TransportMode::Mrt, TransportMode::Bus];
        assert_eq!(
            ds.analysed_modes(&configured),
            vec![TransportMode::Leguna, TransportMode::Bus]
        );
        let restricted = ds.restricted_to(&ds.analysed_modes(&configured));
        assert_eq!(restricted.len(), 3);
    }
}
