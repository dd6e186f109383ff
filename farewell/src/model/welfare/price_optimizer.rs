use super::PriceRange;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// golden ratio conjugate, (sqrt(5) - 1) / 2
const INV_PHI: f64 = 0.618_033_988_749_894_9;
const MAX_GOLDEN_ITERATIONS: usize = 200;
const MAX_BISECTIONS: usize = 200;

/// where in the feasible range an optimum was found
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OptimumLocation {
    LowerBound,
    UpperBound,
    Interior,
    /// the lowest fare whose operating cost fits the budget
    BudgetLimit,
}

impl Display for OptimumLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptimumLocation::LowerBound => write!(f, "lower bound"),
            OptimumLocation::UpperBound => write!(f, "upper bound"),
            OptimumLocation::Interior => write!(f, "interior"),
            OptimumLocation::BudgetLimit => write!(f, "budget limit"),
        }
    }
}

/// maximizes a function of one price over a closed range.
///
/// both bounds and a uniform grid are evaluated, then the best grid point is
/// refined with golden-section search inside its neighbouring grid cells. a
/// bound wins any tie, so monotone objectives settle exactly on a bound.
#[derive(Debug, Clone, Copy)]
pub struct PriceOptimizer {
    pub grid_points: usize,
    pub tolerance: f64,
}

impl PriceOptimizer {
    /// returns the maximizing price and its location
    pub fn maximize<F: Fn(f64) -> f64>(&self, range: PriceRange, f: F) -> (f64, OptimumLocation) {
        let PriceRange { min, max } = range;
        if min == max {
            return (min, OptimumLocation::LowerBound);
        }
        let n = self.grid_points.max(2);
        let grid = (0..n)
            .map(|i| {
                if i == n - 1 {
                    max
                } else {
                    min + (max - min) * i as f64 / (n - 1) as f64
                }
            })
            .collect::<Vec<_>>();
        let values = grid.iter().map(|p| f(*p)).collect::<Vec<_>>();

        let mut best_idx = 0;
        for (i, v) in values.iter().enumerate() {
            if *v > values[best_idx] {
                best_idx = i;
            }
        }

        let mut candidates = vec![(min, values[0]), (max, values[n - 1])];
        if best_idx != 0 && best_idx != n - 1 {
            candidates.push((grid[best_idx], values[best_idx]));
        }
        let lo = grid[best_idx.saturating_sub(1)];
        let hi = grid[(best_idx + 1).min(n - 1)];
        let refined = self.golden_section(lo, hi, &f);
        candidates.push((refined, f(refined)));

        let mut best = candidates[0];
        for c in candidates.iter().skip(1) {
            if c.1 > best.1 {
                best = *c;
            }
        }
        let price = best.0.clamp(min, max);
        let location = if price == min {
            OptimumLocation::LowerBound
        } else if price == max {
            OptimumLocation::UpperBound
        } else {
            OptimumLocation::Interior
        };
        (price, location)
    }

    /// smallest price in `range` satisfying `feasible`, for a condition that
    /// keeps holding as the price rises. None when the upper bound fails it.
    pub fn lowest_feasible<F: Fn(f64) -> bool>(&self, range: PriceRange, feasible: F) -> Option<f64> {
        let PriceRange { min, max } = range;
        if feasible(min) {
            return Some(min);
        }
        if !feasible(max) {
            return None;
        }
        let (mut lo, mut hi) = (min, max);
        for _ in 0..MAX_BISECTIONS {
            if hi - lo <= self.tolerance * (1.0 + hi.abs()) {
                break;
            }
            let mid = 0.5 * (lo + hi);
            if feasible(mid) {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        Some(hi)
    }

    fn golden_section<F: Fn(f64) -> f64>(&self, lo: f64, hi: f64, f: &F) -> f64 {
        let (mut a, mut b) = (lo, hi);
        let mut c = b - INV_PHI * (b - a);
        let mut d = a + INV_PHI * (b - a);
        let mut fc = f(c);
        let mut fd = f(d);
        for _ in 0..MAX_GOLDEN_ITERATIONS {
            if (b - a).abs() <= self.tolerance * (1.0 + a.abs().max(b.abs())) {
                break;
            }
            if fc > fd {
                b = d;
                d = c;
                fd = fc;
                c = b - INV_PHI * (b - a);
                fc = f(c);
            } else {
                a = c;
                c = d;
                fc = fd;
                d = a + INV_PHI * (b - a);
                fd = f(d);
            }
        }
        (a + b) / 2.0
    }
}
