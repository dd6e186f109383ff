use crate::model::{
    welfare::{OptimumLocation, WelfareObjective},
    AnalysisResults, Segment,
};
use farewell_core::model::IncomeGroup;

/// share of low income trips above which subsidies are recommended to target them
pub const LOW_INCOME_UNAFFORDABLE_PERCENT: f64 = 30.0;
/// gini of affordability ratios above which a mode is flagged as uneven
pub const UNEVEN_GINI: f64 = 0.3;
/// relative fare change below which the current fare is called near optimal
pub const FARE_CHANGE_TOLERANCE: f64 = 0.05;

/// policy recommendations read off the analysis results, most general first
pub fn recommendations(results: &AnalysisResults) -> Vec<String> {
    let mut out = vec![];

    if let Some(top) = results.mcda.scores.first() {
        out.push(format!(
            "{} ranks first in the multi-criteria assessment with a score of {:.3}; \
             prioritise investment and service expansion there.",
            top.mode, top.composite
        ));
    }

    for market in results.welfare.markets.iter() {
        let Some(best) = results
            .welfare
            .get(market.mode, WelfareObjective::SocialWelfare)
        else {
            continue;
        };
        let price = best.market.price;
        let change = (price - market.base_price) / market.base_price;
        let boundary = match best.location {
            OptimumLocation::Interior => String::new(),
            location => format!(", at the {location} of the fare range searched"),
        };
        if change.abs() < FARE_CHANGE_TOLERANCE {
            out.push(format!(
                "The current {} fare of {:.2} BDT is close to the welfare-maximising fare of {:.2} BDT{boundary}.",
                market.mode, market.base_price, price
            ));
        } else {
            let direction = if change < 0.0 { "Lower" } else { "Raise" };
            out.push(format!(
                "{direction} the {} fare from {:.2} BDT towards {:.2} BDT to maximise social welfare{boundary}.",
                market.mode, market.base_price, price
            ));
        }
    }

    let low_income = results
        .affordability
        .stated_wtp
        .iter()
        .find(|s| s.segment == Segment::Income(IncomeGroup::Low));
    match low_income {
        Some(low) if low.unaffordable_percentage > LOW_INCOME_UNAFFORDABLE_PERCENT => {
            out.push(format!(
                "{:.1}% of low income trips cost more than respondents are willing to pay; \
                 direct fare support at low income riders.",
                low.unaffordable_percentage
            ));
        }
        Some(low) => out.push(format!(
            "{:.1}% of low income trips are unaffordable; monitor affordability before \
             committing to broad subsidies.",
            low.unaffordable_percentage
        )),
        None => {}
    }

    if let Some(best) = results.policy.most_cost_effective() {
        out.push(format!(
            "Of the subsidy scenarios, '{}' makes the most trips affordable per BDT spent \
             ({} trips for {:.2} BDT).",
            best.name, best.accessibility_improvement, best.total_subsidy_cost
        ));
    }

    let uneven = results
        .affordability
        .equity
        .iter()
        .filter(|e| e.gini > UNEVEN_GINI)
        .max_by(|a, b| a.gini.total_cmp(&b.gini));
    if let Some(e) = uneven {
        out.push(format!(
            "Affordability is least even on {} (Gini {:.3}); review its fare structure for \
             regressive effects.",
            e.mode, e.gini
        ));
    }

    let trade_offs = results
        .affordability
        .modeled_wtp
        .iter()
        .find(|w| w.segment == Segment::All)
        .and_then(|w| w.outcome.completed())
        .map(|w| w.trade_offs);
    if let Some(t) = trade_offs {
        if t.value_of_travel_time_per_hour > 0.0 {
            out.push(format!(
                "Travellers value in-vehicle time at {:.2} BDT per hour and waiting at {:.2} BDT \
                 per minute; frequency and speed improvements carry real value.",
                t.value_of_travel_time_per_hour, t.value_of_waiting_time
            ));
        }
    }
    out
}
