use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// summary of a sample of values. the standard deviation is the sample
/// (n - 1) deviation and is 0 for a single value.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DescriptiveStatistics {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl DescriptiveStatistics {
    /// None when `values` is empty
    pub fn from_values(values: &[f64]) -> Option<DescriptiveStatistics> {
        if values.is_empty() {
            return None;
        }
        let n = values.len();
        let sorted = values
            .iter()
            .copied()
            .sorted_by(|a, b| a.total_cmp(b))
            .collect_vec();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };
        let std_dev = if n > 1 {
            let ss = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>();
            (ss / (n - 1) as f64).sqrt()
        } else {
            0.0
        };
        Some(DescriptiveStatistics {
            count: n,
            mean,
            median,
            std_dev,
            min: sorted[0],
            max: sorted[n - 1],
        })
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics() {
        let stats = DescriptiveStatistics::from_values(&[4.0, 1.0, 3.0, 2.0]).expect("non-empty");
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert!((stats.std_dev - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert!(DescriptiveStatistics::from_values(&[]).is_none());
        assert_eq!(
            DescriptiveStatistics::from_values(&[7.0]).map(|s| s.std_dev),
            Some(0.0)
        );
    }
}
