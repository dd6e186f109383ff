use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// affordability of a trip given the ratio of fare paid to willingness to pay.
///
/// the three bands partition the real line:
///   - ratio < 0.5          => [`AffordabilityBand::HighlyAffordable`]
///   - 0.5 <= ratio < 1.0   => [`AffordabilityBand::Affordable`]
///   - ratio >= 1.0         => [`AffordabilityBand::Unaffordable`]
///
/// a NaN ratio falls through to [`AffordabilityBand::Unaffordable`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AffordabilityBand {
    HighlyAffordable,
    Affordable,
    Unaffordable,
}

impl AffordabilityBand {
    pub const HIGHLY_AFFORDABLE_LIMIT: f64 = 0.5;
    pub const AFFORDABLE_LIMIT: f64 = 1.0;

    pub fn from_ratio(ratio: f64) -> AffordabilityBand {
        if ratio < Self::HIGHLY_AFFORDABLE_LIMIT {
            AffordabilityBand::HighlyAffordable
        } else if ratio < Self::AFFORDABLE_LIMIT {
            AffordabilityBand::Affordable
        } else {
            AffordabilityBand::Unaffordable
        }
    }

    pub fn is_affordable(&self) -> bool {
        !matches!(self, AffordabilityBand::Unaffordable)
    }
}

impl Display for AffordabilityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AffordabilityBand::HighlyAffordable => write!(f, "highly affordable"),
            AffordabilityBand::Affordable => write!(f, "affordable"),
            AffordabilityBand::Unaffordable => write!(f, "unaffordable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AffordabilityBand as B;

    #[test]
    fn test_band_edges() {
        assert_eq!(B::from_ratio(0.0), B::HighlyAffordable);
        assert_eq!(B::from_ratio(0.4999999), B::HighlyAffordable);
        assert_eq!(B::from_ratio(0.5), B::Affordable);
        assert_eq!(B::from_ratio(0.9999999), B::Affordable);
        assert_eq!(B::from_ratio(1.0), B::Unaffordable);
        assert_eq!(B::from_ratio(3.2), B::Unaffordable);
        assert_eq!(B::from_ratio(f64::NAN), B::Unaffordable);
    }

    #[test]
    fn test_bands_partition_without_gaps() {
        // walk across both edges in small steps, every ratio lands in exactly one band
        // and the band never moves backwards.
        let mut previous = B::HighlyAffordable;
        for i in 0..=3000 {
            let ratio = f64::from(i) * 0.0005;
            let band = B::from_ratio(ratio);
            assert!(band >= previous, "band regressed at ratio {ratio}");
            previous = band;
        }
        assert_eq!(previous, B::Unaffordable);
    }
}
