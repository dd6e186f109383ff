use crate::model::SurveyRecord;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// removes records whose fare or stated WTP falls outside the Tukey fences
/// `[Q1 - k*IQR, Q3 + k*IQR]`, where quartiles are computed over the whole
/// set of records.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct OutlierFilter {
    pub fence_factor: f64,
}

impl OutlierFilter {
    pub fn new(fence_factor: f64) -> OutlierFilter {
        OutlierFilter { fence_factor }
    }

    /// splits records into those kept and the number removed
    pub fn apply(&self, records: Vec<SurveyRecord>) -> (Vec<SurveyRecord>, usize) {
        let fares = records.iter().map(|r| r.fare).collect_vec();
        let wtps = records.iter().map(|r| r.wtp).collect_vec();
        let (fare_fences, wtp_fences) = match (
            tukey_fences(&fares, self.fence_factor),
            tukey_fences(&wtps, self.fence_factor),
        ) {
            (Some(f), Some(w)) => (f, w),
            _ => return (records, 0),
        };
        let inside = |x: f64, (lo, hi): (f64, f64)| lo <= x && x <= hi;
        let before = records.len();
        let kept = records
            .into_iter()
            .filter(|r| inside(r.fare, fare_fences) && inside(r.wtp, wtp_fences))
            .collect_vec();
        let removed = before - kept.len();
        (kept, removed)
    }
}

/// lower and upper Tukey fences of `values`, or None when `values` is empty.
/// quartiles use linear interpolation between closest ranks.
pub fn tukey_fences(values: &[f64], k: f64) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let sorted = values.iter().copied().sorted_by(|a, b| a.total_cmp(b)).collect_vec();
    let q1 = quantile(&sorted, 0.25);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    Some((q1 - k * iqr, q3 + k * iqr))
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IncomeGroup, TransportMode};

    #[test]
    fn test_fences() {
        // quartiles of 1..=9 are 3 and 7
        let values = (1..=9).map(f64::from).collect_vec();
        let (lo, hi) = tukey_fences(&values, 1.5).expect("non-empty input");
        assert_eq!(lo, -3.0);
        assert_eq!(hi, 13.0);
        assert!(tukey_fences(&[], 1.5).is_none());
    }

    #[test]
    fn test_removes_extreme_fare() {
        let mut records = (0..9)
            .map(|i| {
                let fare = 20.0 + i as f64;
                SurveyRecord::new(&i.to_string(), TransportMode::Bus, IncomeGroup::Mid, fare, 30.0, 5.0, 3, 40.0 + i as f64)
            })
            .collect_vec();
        records.push(SurveyRecord::new("x", TransportMode::Bus, IncomeGroup::Mid, 900.0, 30.0, 5.0, 3, 45.0));
        let (kept, removed) = OutlierFilter::new(1.5).apply(records);
        assert_eq!(removed, 1);
        assert_eq!(kept.len(), 9);
        assert!(kept.iter().all(|r| r.fare < 900.0));
    }
}
