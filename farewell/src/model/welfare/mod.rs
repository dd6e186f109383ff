mod demand_function;
mod mode_market;
mod objective_weights;
mod optimization_error;
mod price_bounds;
mod price_optimizer;
mod sensitivity;
mod welfare_objective;
mod welfare_outcome;

pub use demand_function::DemandFunction;
pub use mode_market::{MarketOutcome, ModeMarket};
pub use objective_weights::ObjectiveWeights;
pub use optimization_error::OptimizationError;
pub use price_bounds::{PriceBoundsConfig, PriceRange};
pub use price_optimizer::{OptimumLocation, PriceOptimizer};
pub use sensitivity::{SensitivityCurve, SensitivityPoint, SensitivityRange};
pub use welfare_objective::WelfareObjective;
pub use welfare_outcome::{WelfareOutcome, WelfareOutcomeRow};

use crate::config::WelfareConfig;
use farewell_core::model::{IncomeGroup, SurveyDataset, SurveyRecord, TransportMode};
use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// a mode whose fare problems could not be solved
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModeFailure {
    pub mode: TransportMode,
    pub error: String,
}

/// fare problems solved over the trips of one income group
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GroupWelfare {
    pub income_group: IncomeGroup,
    pub markets: Vec<ModeMarket>,
    pub outcomes: Vec<WelfareOutcome>,
    pub failures: Vec<ModeFailure>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WelfareResults {
    pub demand_function: DemandFunction,
    pub objective_weights: ObjectiveWeights,
    pub demand_budget: Option<f64>,
    /// modes whose every objective was solved
    pub markets: Vec<ModeMarket>,
    /// ordered by mode, then objective
    pub outcomes: Vec<WelfareOutcome>,
    pub failures: Vec<ModeFailure>,
    pub sensitivity: Vec<SensitivityCurve>,
    pub by_income_group: Vec<GroupWelfare>,
}

impl WelfareResults {
    pub fn get(&self, mode: TransportMode, objective: WelfareObjective) -> Option<&WelfareOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.mode == mode && o.objective == objective)
    }

    /// modes with a full set of outcomes, in analysed order
    pub fn optimized_modes(&self) -> Vec<TransportMode> {
        self.markets.iter().map(|m| m.mode).collect()
    }
}

/// markets, outcomes and failures of one set of trips
struct SegmentWelfare {
    markets: Vec<ModeMarket>,
    outcomes: Vec<WelfareOutcome>,
    failures: Vec<ModeFailure>,
}

/// solves every (mode, objective) fare problem over all trips, then again
/// within each income group. problems are independent and solved in
/// parallel; results keep mode order, then objective order. a mode whose
/// market, bounds or any objective fails is listed with its error and left
/// out of the outcomes, so only an invalid configuration stops the stage.
pub fn optimize_fares(
    dataset: &SurveyDataset,
    modes: &[TransportMode],
    conf: &WelfareConfig,
) -> Result<WelfareResults, OptimizationError> {
    conf.validate()?;
    let optimizer = PriceOptimizer {
        grid_points: conf.grid_points,
        tolerance: conf.golden_section_tolerance,
    };

    let SegmentWelfare {
        markets,
        outcomes,
        failures,
    } = optimize_segment(&dataset.by_mode(), modes, conf, &optimizer);
    for f in failures.iter() {
        log::warn!("welfare: {} fares not optimized: {}", f.mode, f.error);
    }
    for o in outcomes
        .iter()
        .filter(|o| o.objective == WelfareObjective::SocialWelfare)
    {
        log::info!(
            "welfare: {} Max-S fare {:.2} BDT ({}), welfare {:.2}",
            o.mode,
            o.market.price,
            o.location,
            o.market.social_welfare
        );
    }

    let sensitivity = markets
        .par_iter()
        .map(|market| sensitivity_curve(market, conf, &optimizer))
        .collect::<Vec<_>>();

    let by_income_group = dataset
        .by_income_group()
        .into_iter()
        .map(|(income_group, records)| {
            let by_mode: BTreeMap<TransportMode, Vec<&SurveyRecord>> =
                records.into_iter().map(|r| (r.mode, r)).into_group_map().into_iter().collect();
            let group_modes = modes
                .iter()
                .filter(|m| by_mode.contains_key(m))
                .copied()
                .collect_vec();
            let segment = optimize_segment(&by_mode, &group_modes, conf, &optimizer);
            for f in segment.failures.iter() {
                log::warn!("welfare [{income_group} income]: {} fares not optimized: {}", f.mode, f.error);
            }
            GroupWelfare {
                income_group,
                markets: segment.markets,
                outcomes: segment.outcomes,
                failures: segment.failures,
            }
        })
        .collect_vec();

    Ok(WelfareResults {
        demand_function: conf.demand_function,
        objective_weights: conf.objective_weights,
        demand_budget: conf.demand_budget,
        markets,
        outcomes,
        failures,
        sensitivity,
        by_income_group,
    })
}

fn optimize_segment(
    by_mode: &BTreeMap<TransportMode, Vec<&SurveyRecord>>,
    modes: &[TransportMode],
    conf: &WelfareConfig,
    optimizer: &PriceOptimizer,
) -> SegmentWelfare {
    let mut failures = vec![];
    let mut problems = vec![];
    for mode in modes.iter() {
        let records = by_mode.get(mode).map(|r| r.as_slice()).unwrap_or(&[]);
        match mode_problem(*mode, records, conf) {
            Ok(problem) => problems.push(problem),
            Err(e) => failures.push(ModeFailure {
                mode: *mode,
                error: e.to_string(),
            }),
        }
    }

    let solved = problems
        .par_iter()
        .map(|(market, range)| {
            WelfareObjective::ALL
                .par_iter()
                .map(|objective| {
                    solve(market, *range, *objective, &conf.demand_function, conf, optimizer)
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Vec<_>>();

    let mut markets = vec![];
    let mut outcomes = vec![];
    for ((market, _), result) in problems.into_iter().zip(solved) {
        match result {
            Ok(mode_outcomes) => {
                markets.push(market);
                outcomes.extend(mode_outcomes);
            }
            Err(e) => failures.push(ModeFailure {
                mode: market.mode,
                error: e.to_string(),
            }),
        }
    }
    failures.sort_by_key(|f| modes.iter().position(|m| *m == f.mode));
    SegmentWelfare {
        markets,
        outcomes,
        failures,
    }
}

/// the observed market of a mode and the fares it may be charged
fn mode_problem(
    mode: TransportMode,
    records: &[&SurveyRecord],
    conf: &WelfareConfig,
) -> Result<(ModeMarket, PriceRange), OptimizationError> {
    let market = ModeMarket::from_records(
        mode,
        records,
        conf.cost_share,
        conf.emission_factor(mode),
        conf.carbon_price,
    )
    .ok_or_else(|| OptimizationError::EmptyMarket(mode.to_string()))?;
    if !(market.base_price > 0.0) {
        return Err(OptimizationError::ZeroBasePrice(mode.to_string()));
    }
    let range = conf
        .price_bounds
        .resolve(mode, market.base_price, &conf.demand_function)?;
    Ok((market, range))
}

fn solve(
    market: &ModeMarket,
    range: PriceRange,
    objective: WelfareObjective,
    demand_function: &DemandFunction,
    conf: &WelfareConfig,
    optimizer: &PriceOptimizer,
) -> Result<WelfareOutcome, OptimizationError> {
    let weights = &conf.objective_weights;
    let value = |p: f64| objective.value(&market.evaluate(p, demand_function), weights);
    let (price, location) = match (objective, conf.demand_budget) {
        (WelfareObjective::Demand, Some(budget)) => {
            // demand, and with it operating cost, falls as the fare rises
            let lowest = optimizer
                .lowest_feasible(range, |p| market.evaluate(p, demand_function).cost <= budget)
                .ok_or_else(|| OptimizationError::InfeasibleBudget {
                    mode: market.mode.to_string(),
                    budget,
                    min_cost: market.evaluate(range.max, demand_function).cost,
                })?;
            let feasible = PriceRange {
                min: lowest,
                max: range.max,
            };
            match optimizer.maximize(feasible, value) {
                (price, OptimumLocation::LowerBound) if lowest > range.min => {
                    (price, OptimumLocation::BudgetLimit)
                }
                found => found,
            }
        }
        _ => optimizer.maximize(range, value),
    };
    let outcome = market.evaluate(price, demand_function);
    if !outcome.is_finite() {
        return Err(OptimizationError::NonFiniteObjective {
            mode: market.mode.to_string(),
            objective: objective.to_string(),
            price,
        });
    }
    Ok(WelfareOutcome {
        mode: market.mode,
        objective,
        bounds: range,
        location,
        objective_value: objective.value(&outcome, weights),
        market: outcome,
    })
}

/// Max-S re-solved under constant elasticity demand for each configured elasticity
fn sensitivity_curve(
    market: &ModeMarket,
    conf: &WelfareConfig,
    optimizer: &PriceOptimizer,
) -> SensitivityCurve {
    let result = conf
        .sensitivity
        .elasticities()
        .into_iter()
        .map(|elasticity| {
            let demand_function = DemandFunction::ConstantElasticity { elasticity };
            let range = conf
                .price_bounds
                .resolve(market.mode, market.base_price, &demand_function)?;
            let o = solve(
                market,
                range,
                WelfareObjective::SocialWelfare,
                &demand_function,
                conf,
                optimizer,
            )?;
            Ok(SensitivityPoint {
                elasticity,
                price: o.market.price,
                demand: o.market.demand,
                social_welfare: o.market.social_welfare,
                location: o.location,
            })
        })
        .collect::<Result<Vec<_>, OptimizationError>>();
    if let Err(e) = &result {
        log::warn!("sensitivity analysis for {} skipped: {e}", market.mode);
    }
    SensitivityCurve {
        mode: market.mode,
        outcome: result.into(),
    }
}
