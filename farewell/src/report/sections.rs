use super::{
    recommendations::recommendations,
    report_section::{f2, f4, opt_f2, pct, ReportSection, ReportTable},
};
use crate::model::{
    choice::BASE_SCENARIO,
    welfare::{DemandFunction, WelfareObjective},
    AnalysisResults, StageOutcome,
};
use itertools::Itertools;

/// the report content shared by the markdown and html renderers, in reading order
pub fn report_sections(results: &AnalysisResults) -> Vec<ReportSection> {
    vec![
        executive_summary(results),
        data_summary(results),
        mode_shares(results),
        choice_models(results),
        elasticities(results),
        affordability(results),
        contingent_valuation(results),
        value_of_time(results),
        generalized_cost(results),
        equity(results),
        welfare(results),
        sensitivity(results),
        mcda(results),
        policy(results),
        recommendations_section(results),
    ]
}

fn mode_headers(results: &AnalysisResults, first: &str) -> Vec<String> {
    std::iter::once(first.to_string())
        .chain(results.metadata.modes.iter().map(|m| m.to_string()))
        .collect_vec()
}

fn executive_summary(results: &AnalysisResults) -> ReportSection {
    let mut s = ReportSection::new("Executive Summary");
    let m = &results.metadata;
    s.paragraph(format!(
        "{} trips by respondents in {} income groups were analysed over the modes {}.",
        m.observations,
        m.income_groups.len(),
        m.modes.iter().join(", ")
    ));
    if let Some(all) = results.affordability.stated_wtp.first() {
        s.paragraph(format!(
            "Mean stated willingness to pay is {} BDT per trip and {:.1}% of trips cost more than \
             the respondent is willing to pay.",
            f2(all.wtp.mean),
            all.unaffordable_percentage
        ));
    }
    if let Some(top) = results.mcda.scores.first() {
        s.paragraph(format!(
            "{} is the highest ranked mode in the multi-criteria assessment.",
            top.mode
        ));
    }
    let failed = results
        .choice_models
        .segments
        .iter()
        .filter(|e| e.outcome.error().is_some())
        .count();
    if failed > 0 {
        s.paragraph(format!(
            "{failed} of {} choice models could not be estimated, see Choice Models.",
            results.choice_models.segments.len()
        ));
    }
    s
}

fn data_summary(results: &AnalysisResults) -> ReportSection {
    let mut s = ReportSection::new("Data Summary");
    let l = &results.load_summary;
    s.paragraph(format!("Survey source: {}", l.source));
    let mut t = ReportTable::new(&["Rows read", "Rows kept", "Malformed", "Outliers", "Analysed"]);
    t.push_row(vec![
        l.rows_read.to_string(),
        l.rows_kept.to_string(),
        l.rows_malformed.to_string(),
        l.rows_outlier.to_string(),
        results.metadata.observations.to_string(),
    ]);
    s.table(t);
    s
}

fn mode_shares(results: &AnalysisResults) -> ReportSection {
    let mut s = ReportSection::new("Mode Shares by Income Group");
    let headers = mode_headers(results, "Segment");
    let mut t = ReportTable {
        caption: None,
        headers: headers.into_iter().chain([String::from("Trips")]).collect(),
        rows: vec![],
    };
    for shares in results.mode_shares.iter() {
        t.push_row(
            std::iter::once(shares.segment.to_string())
                .chain(shares.shares.iter().map(|m| pct(m.value)))
                .chain([shares.trips.to_string()])
                .collect(),
        );
    }
    s.table(t);
    s
}

fn choice_models(results: &AnalysisResults) -> ReportSection {
    let mut s = ReportSection::new("Choice Models");
    s.paragraph(String::from(
        "Multinomial logit models of mode choice with fare, in-vehicle time, waiting time and \
         comfort attributes, estimated by maximum likelihood.",
    ));
    let mut fit = ReportTable::new(&[
        "Segment",
        "Observations",
        "Status",
        "Iterations",
        "Log-likelihood",
        "Null log-likelihood",
        "rho²",
    ]);
    for e in results.choice_models.segments.iter() {
        match &e.outcome {
            StageOutcome::Completed(m) => fit.push_row(vec![
                e.segment.to_string(),
                e.observations.to_string(),
                String::from("estimated"),
                m.iterations.to_string(),
                f2(m.log_likelihood),
                f2(m.null_log_likelihood),
                f4(m.rho_squared),
            ]),
            StageOutcome::Failed { error } => {
                fit.push_row(vec![
                    e.segment.to_string(),
                    e.observations.to_string(),
                    String::from("failed"),
                    String::from("-"),
                    String::from("-"),
                    String::from("-"),
                    String::from("-"),
                ]);
                s.paragraph(format!("{} model: {error}", e.segment));
            }
        }
    }
    s.table(fit.with_caption("Model fit"));

    for (segment, m) in results.choice_models.completed() {
        let mut coefficients = ReportTable::new(&["Parameter", "Estimate", "Std. error", "t"]);
        for c in m.coefficients.iter() {
            coefficients.push_row(vec![
                c.name.clone(),
                format!("{:.5}", c.value),
                format!("{:.5}", c.std_error),
                f2(c.t_stat),
            ]);
        }
        s.table(coefficients.with_caption(&format!("Coefficients, {segment}")));

        let mut shares = ReportTable::new(&["Mode", "Predicted share", "Observed share"]);
        for (p, o) in m.mean_probabilities.iter().zip(m.observed_shares.iter()) {
            shares.push_row(vec![p.mode.to_string(), pct(p.value), pct(o.value)]);
        }
        s.table(shares.with_caption(&format!("Choice probabilities, {segment}")));

        let mut scenarios = ReportTable {
            caption: Some(format!("Predicted mode shares, {segment}")),
            headers: mode_headers(results, "Scenario"),
            rows: vec![],
        };
        for p in m.scenario_shares.iter() {
            let cells = p.shares.iter().zip(p.change.iter()).map(|(share, change)| {
                if p.scenario == BASE_SCENARIO {
                    pct(share.value)
                } else {
                    format!("{} ({:+.2} pp)", pct(share.value), 100.0 * change.value)
                }
            });
            scenarios.push_row(std::iter::once(p.scenario.clone()).chain(cells).collect());
        }
        s.table(scenarios);
    }
    s
}

fn elasticities(results: &AnalysisResults) -> ReportSection {
    let mut s = ReportSection::new("Fare Elasticities");
    s.paragraph(String::from(
        "Change in each mode's choice probability for a 1% change in the fare of the row mode, \
         averaged over respondents.",
    ));
    for (segment, m) in results.choice_models.completed() {
        if m.elasticities.iter().all(|e| e.is_zero()) {
            s.paragraph(format!(
                "All {segment} elasticities are zero: the fare coefficient was not identified."
            ));
            continue;
        }
        let mut t = ReportTable {
            caption: Some(format!("Elasticities, {segment}")),
            headers: mode_headers(results, "Fare of"),
            rows: vec![],
        };
        for fare_of in results.metadata.modes.iter() {
            let row = results
                .metadata
                .modes
                .iter()
                .map(|mode| {
                    m.elasticities
                        .iter()
                        .find(|e| e.fare_of == *fare_of && e.mode == *mode)
                        .map(|e| f4(e.value))
                        .unwrap_or_else(|| String::from("-"))
                })
                .collect_vec();
            t.push_row(std::iter::once(fare_of.to_string()).chain(row).collect());
        }
        s.table(t);
    }
    s
}

fn affordability(results: &AnalysisResults) -> ReportSection {
    let mut s = ReportSection::new("Willingness to Pay and Affordability");
    let mut stated = ReportTable::new(&[
        "Segment",
        "Respondents",
        "Mean WTP",
        "Median WTP",
        "Mean fare/WTP",
        "Highly affordable",
        "Affordable",
        "Unaffordable",
        "% unaffordable",
    ]);
    for w in results.affordability.stated_wtp.iter() {
        stated.push_row(vec![
            w.segment.to_string(),
            w.wtp.count.to_string(),
            f2(w.wtp.mean),
            f2(w.wtp.median),
            f2(w.mean_affordability_ratio),
            w.bands.highly_affordable.to_string(),
            w.bands.affordable.to_string(),
            w.bands.unaffordable.to_string(),
            format!("{:.1}%", w.unaffordable_percentage),
        ]);
    }
    s.table(stated.with_caption("Stated willingness to pay (BDT)"));

    let mut modeled = ReportTable::new(&["Segment", "Mode", "Mean fare", "Modeled WTP", "Fare/WTP"]);
    let mut trade_offs = ReportTable::new(&[
        "Segment",
        "Fare coefficient",
        "VOT (BDT/min)",
        "VOT (BDT/hour)",
        "Waiting (BDT/min)",
        "Comfort (BDT/level)",
    ]);
    for w in results.affordability.modeled_wtp.iter() {
        match &w.outcome {
            StageOutcome::Completed(m) => {
                for mode in m.by_mode.iter() {
                    modeled.push_row(vec![
                        w.segment.to_string(),
                        mode.mode.to_string(),
                        f2(mode.mean_fare),
                        f2(mode.wtp),
                        opt_f2(mode.affordability_ratio),
                    ]);
                }
                let t = &m.trade_offs;
                trade_offs.push_row(vec![
                    w.segment.to_string(),
                    format!("{:.5}", m.fare_coefficient),
                    f2(t.value_of_travel_time),
                    f2(t.value_of_travel_time_per_hour),
                    f2(t.value_of_waiting_time),
                    f2(t.value_of_comfort),
                ]);
            }
            StageOutcome::Failed { error } => {
                s.paragraph(format!("Modeled WTP, {}: {error}", w.segment));
            }
        }
    }
    s.table(modeled.with_caption("Willingness to pay implied by the choice models (BDT)"));
    s.table(trade_offs.with_caption("Trade-offs implied by the choice models"));
    s
}

fn contingent_valuation(results: &AnalysisResults) -> ReportSection {
    let mut s = ReportSection::new("Contingent Valuation");
    let mut t = ReportTable::new(&[
        "Segment",
        "Respondents",
        "Accept lower fare",
        "Mean WTP (lower fare)",
        "Accept higher comfort",
        "Mean WTP (higher comfort)",
    ]);
    for c in results.affordability.contingent_valuation.iter() {
        t.push_row(vec![
            c.segment.to_string(),
            c.respondents.to_string(),
            pct(c.lower_fare_acceptance),
            opt_f2(c.lower_fare_mean_wtp),
            pct(c.higher_comfort_acceptance),
            opt_f2(c.higher_comfort_mean_wtp),
        ]);
    }
    s.table(t);
    s
}

fn value_of_time(results: &AnalysisResults) -> ReportSection {
    let mut s = ReportSection::new("Value of Time");
    s.paragraph(String::from(
        "Stated willingness to pay divided by door-to-door time (travel plus waiting).",
    ));
    let mut t = ReportTable::new(&["Segment", "Mean BDT/min", "Median BDT/min", "Std. dev.", "Mean BDT/hour"]);
    for v in results.affordability.value_of_time.iter() {
        t.push_row(vec![
            v.segment.to_string(),
            f2(v.per_minute.mean),
            f2(v.per_minute.median),
            f2(v.per_minute.std_dev),
            f2(v.mean_per_hour),
        ]);
    }
    s.table(t);
    s
}

fn generalized_cost(results: &AnalysisResults) -> ReportSection {
    let mut s = ReportSection::new("Generalized Cost");
    let mut t = ReportTable::new(&["Mode", "Trips", "Mean (BDT)", "Median (BDT)", "Min", "Max"]);
    for g in results.affordability.generalized_cost.iter() {
        t.push_row(vec![
            g.mode.to_string(),
            g.cost.count.to_string(),
            f2(g.cost.mean),
            f2(g.cost.median),
            f2(g.cost.min),
            f2(g.cost.max),
        ]);
    }
    s.table(t);
    s
}

fn equity(results: &AnalysisResults) -> ReportSection {
    let mut s = ReportSection::new("Equity");
    s.paragraph(String::from(
        "Gini coefficient of fare/WTP ratios among each mode's riders; 0 is perfectly even.",
    ));
    let mut t = ReportTable::new(&["Mode", "Respondents", "Mean fare/WTP", "Gini"]);
    for e in results.affordability.equity.iter() {
        t.push_row(vec![
            e.mode.to_string(),
            e.respondents.to_string(),
            f2(e.mean_affordability_ratio),
            f4(e.gini),
        ]);
    }
    s.table(t);
    s
}

fn welfare(results: &AnalysisResults) -> ReportSection {
    let mut s = ReportSection::new("Welfare Optimization");
    s.paragraph(format!(
        "Fares maximising revenue (Max-R), profit (Max-P), consumer benefit (Max-B), demand \
         (Max-D), social welfare (Max-S) and a weighted sum of the five (Max-W) under {} demand.",
        match results.welfare.demand_function {
            DemandFunction::ConstantElasticity { elasticity } => {
                format!("constant elasticity ({elasticity})")
            }
            DemandFunction::Linear { slope } => format!("linear (slope {slope})"),
        }
    ));
    let mut markets = ReportTable::new(&["Mode", "Trips", "Mean fare", "Unit cost", "External cost/trip"]);
    for m in results.welfare.markets.iter() {
        markets.push_row(vec![
            m.mode.to_string(),
            format!("{:.0}", m.base_demand),
            f2(m.base_price),
            f2(m.unit_cost),
            format!("{:.3}", m.externality_per_trip),
        ]);
    }
    s.table(markets.with_caption("Observed markets"));
    let w = &results.welfare.objective_weights;
    s.paragraph(format!(
        "Max-W weights: revenue {:.2}, profit {:.2}, benefit {:.2}, demand {:.2}, social welfare {:.2}.",
        w.revenue, w.profit, w.benefit, w.demand, w.social_welfare
    ));
    if let Some(budget) = results.welfare.demand_budget {
        s.paragraph(format!(
            "Max-D keeps operating cost within a budget of {} BDT.",
            f2(budget)
        ));
    }
    for f in results.welfare.failures.iter() {
        s.paragraph(format!("{} fares were not optimized: {}", f.mode, f.error));
    }

    let mut t = ReportTable::new(&[
        "Mode",
        "Model",
        "Fare",
        "Optimum",
        "Demand",
        "Revenue",
        "Profit",
        "Consumer surplus",
        "Externality",
        "Social welfare",
    ]);
    for o in results.welfare.outcomes.iter() {
        let m = &o.market;
        t.push_row(vec![
            o.mode.to_string(),
            o.objective.label().to_string(),
            f2(m.price),
            o.location.to_string(),
            f2(m.demand),
            f2(m.revenue),
            f2(m.profit),
            f2(m.consumer_surplus),
            f2(m.externality),
            f2(m.social_welfare),
        ]);
    }
    s.table(t.with_caption("Optimal fares (BDT)"));

    let mut groups = ReportTable::new(&["Income group", "Mode", "Trips", "Mean fare", "Max-R", "Max-P", "Max-S", "Max-W"]);
    for g in results.welfare.by_income_group.iter() {
        for m in g.markets.iter() {
            let fare = |objective: WelfareObjective| {
                g.outcomes
                    .iter()
                    .find(|o| o.mode == m.mode && o.objective == objective)
                    .map(|o| f2(o.market.price))
                    .unwrap_or_else(|| String::from("-"))
            };
            groups.push_row(vec![
                g.income_group.to_string(),
                m.mode.to_string(),
                format!("{:.0}", m.base_demand),
                f2(m.base_price),
                fare(WelfareObjective::Revenue),
                fare(WelfareObjective::Profit),
                fare(WelfareObjective::SocialWelfare),
                fare(WelfareObjective::Weighted),
            ]);
        }
        for f in g.failures.iter() {
            s.paragraph(format!("{} income, {}: {}", g.income_group, f.mode, f.error));
        }
    }
    s.table(groups.with_caption("Optimal fares by income group (BDT)"));
    s
}

fn sensitivity(results: &AnalysisResults) -> ReportSection {
    let mut s = ReportSection::new("Sensitivity Analysis");
    s.paragraph(format!(
        "{} fare re-optimised over a range of constant price elasticities.",
        WelfareObjective::SocialWelfare.label()
    ));
    for curve in results.welfare.sensitivity.iter() {
        match &curve.outcome {
            StageOutcome::Completed(points) => {
                let mut t =
                    ReportTable::new(&["Elasticity", "Fare", "Demand", "Social welfare", "Optimum"]);
                for p in points.iter() {
                    t.push_row(vec![
                        format!("{:.2}", p.elasticity),
                        f2(p.price),
                        f2(p.demand),
                        f2(p.social_welfare),
                        p.location.to_string(),
                    ]);
                }
                s.table(t.with_caption(&curve.mode.to_string()));
            }
            StageOutcome::Failed { error } => {
                s.paragraph(format!("{}: {error}", curve.mode));
            }
        }
    }
    s
}

fn mcda(results: &AnalysisResults) -> ReportSection {
    let mut s = ReportSection::new("Multi-Criteria Decision Analysis");
    let w = &results.mcda.weights;
    s.paragraph(format!(
        "Weights: social welfare {:.2}, accessibility {:.2}, environmental impact {:.2}, \
         cost effectiveness {:.2}, equity {:.2}.",
        w.social_welfare, w.accessibility, w.environmental_impact, w.cost_effectiveness, w.equity
    ));
    let mut t = ReportTable::new(&[
        "Rank",
        "Mode",
        "Composite",
        "Social welfare",
        "Accessibility",
        "Environmental impact",
        "Cost effectiveness",
        "Equity",
    ]);
    for score in results.mcda.scores.iter() {
        let n = &score.normalized;
        t.push_row(vec![
            score.rank.to_string(),
            score.mode.to_string(),
            format!("{:.3}", score.composite),
            format!("{:.3}", n.social_welfare),
            format!("{:.3}", n.accessibility),
            format!("{:.3}", n.environmental_impact),
            format!("{:.3}", n.cost_effectiveness),
            format!("{:.3}", n.equity),
        ]);
    }
    s.table(t.with_caption("Normalized criteria and composite scores"));
    s
}

fn policy(results: &AnalysisResults) -> ReportSection {
    let mut s = ReportSection::new("Policy Evaluation");
    s.paragraph(format!(
        "Subsidies applied to {} with induced demand at elasticity {:.2}.",
        results.policy.targeting, results.policy.induced_demand_elasticity
    ));
    let mut t = ReportTable::new(&[
        "Scenario",
        "Low",
        "Mid",
        "High",
        "Trips subsidized",
        "Subsidy cost (BDT)",
        "Trips made affordable",
        "Trips per BDT",
        "Induced trips",
        "Unaffordable after",
    ]);
    for p in results.policy.scenarios.iter() {
        t.push_row(vec![
            p.name.clone(),
            pct(p.rates.low),
            pct(p.rates.mid),
            pct(p.rates.high),
            p.trips_subsidized.to_string(),
            f2(p.total_subsidy_cost),
            p.accessibility_improvement.to_string(),
            f4(p.cost_effectiveness),
            f2(p.induced_demand),
            format!("{} of {}", p.unaffordable_after, p.unaffordable_before),
        ]);
    }
    s.table(t);
    s
}

fn recommendations_section(results: &AnalysisResults) -> ReportSection {
    let mut s = ReportSection::new("Recommendations");
    s.items = recommendations(results);
    s
}
