use crate::model::{DescriptiveStatistics, Segment};
use farewell_core::model::{AffordabilityBand, SurveyRecord};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BandCounts {
    pub highly_affordable: usize,
    pub affordable: usize,
    pub unaffordable: usize,
}

impl BandCounts {
    pub fn from_records(records: &[&SurveyRecord]) -> BandCounts {
        let mut counts = BandCounts::default();
        for r in records.iter() {
            counts.add(r.affordability_band());
        }
        counts
    }

    pub fn add(&mut self, band: AffordabilityBand) {
        match band {
            AffordabilityBand::HighlyAffordable => self.highly_affordable += 1,
            AffordabilityBand::Affordable => self.affordable += 1,
            AffordabilityBand::Unaffordable => self.unaffordable += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.highly_affordable + self.affordable + self.unaffordable
    }
}

/// stated willingness to pay and affordability of the fares respondents paid
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StatedWtpSummary {
    pub segment: Segment,
    pub wtp: DescriptiveStatistics,
    pub mean_affordability_ratio: f64,
    pub bands: BandCounts,
    pub unaffordable_percentage: f64,
}

/// None for an empty segment
pub fn stated_wtp_summary(segment: Segment, records: &[&SurveyRecord]) -> Option<StatedWtpSummary> {
    let wtp = records.iter().map(|r| r.wtp).collect::<Vec<_>>();
    let stats = DescriptiveStatistics::from_values(&wtp)?;
    let ratios = records
        .iter()
        .map(|r| r.affordability_ratio())
        .collect::<Vec<_>>();
    let bands = BandCounts::from_records(records);
    Some(StatedWtpSummary {
        segment,
        wtp: stats,
        mean_affordability_ratio: ratios.iter().sum::<f64>() / ratios.len() as f64,
        bands,
        unaffordable_percentage: 100.0 * bands.unaffordable as f64 / records.len() as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use farewell_core::model::{IncomeGroup, TransportMode};

    #[test]
    fn test_summary_bands() {
        let records = [(20.0, 50.0), (40.0, 50.0), (50.0, 50.0), (60.0, 50.0)]
            .iter()
            .enumerate()
            .map(|(i, (fare, wtp))| {
                SurveyRecord::new(&i.to_string(), TransportMode::Bus, IncomeGroup::Low, *fare, 30.0, 5.0, 3, *wtp)
            })
            .collect::<Vec<_>>();
        let refs = records.iter().collect::<Vec<_>>();
        let summary = stated_wtp_summary(Segment::Income(IncomeGroup::Low), &refs).expect("summary");
        assert_eq!(summary.bands.highly_affordable, 1);
        assert_eq!(summary.bands.affordable, 1);
        // a ratio of exactly 1.0 is unaffordable
        assert_eq!(summary.bands.unaffordable, 2);
        assert_eq!(summary.bands.total(), 4);
        assert_eq!(summary.unaffordable_percentage, 50.0);
        assert!((summary.mean_affordability_ratio - 0.85).abs() < 1e-12);
        assert!(stated_wtp_summary(Segment::All, &[]).is_none());
    }
}
