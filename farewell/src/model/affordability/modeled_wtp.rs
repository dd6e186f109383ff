use super::{AffordabilityError, WtpThreshold};
use crate::model::{choice::ChoiceModelEstimate, Segment};
use farewell_core::model::TransportMode;
use serde::{Deserialize, Serialize};

/// willingness to pay derived from a fitted choice model for one mode
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModeWtp {
    pub mode: TransportMode,
    /// mean fare of the mode over the segment
    pub mean_fare: f64,
    pub non_fare_utility: f64,
    pub threshold_utility: f64,
    /// fare at which the mode's utility equals the threshold
    pub wtp: f64,
    /// mean fare over modeled WTP, absent when WTP is not positive
    pub affordability_ratio: Option<f64>,
}

/// monetary values implied by the ratio of utility coefficients
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TradeOffs {
    /// BDT per minute of in-vehicle time
    pub value_of_travel_time: f64,
    pub value_of_travel_time_per_hour: f64,
    /// BDT per minute of waiting
    pub value_of_waiting_time: f64,
    /// BDT per comfort level
    pub value_of_comfort: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModeledWtp {
    pub segment: Segment,
    pub fare_coefficient: f64,
    pub trade_offs: TradeOffs,
    pub by_mode: Vec<ModeWtp>,
}

/// solves `threshold = V_j^{-fare} + b_fare * fare` for the fare of each mode,
/// with every attribute at its segment mean.
pub fn modeled_wtp(
    segment: Segment,
    estimate: &ChoiceModelEstimate,
    threshold: WtpThreshold,
) -> Result<ModeledWtp, AffordabilityError> {
    let params = &estimate.parameters;
    let income_group = segment.income_group();
    let income_level = income_group.map(|g| g.centered_level()).unwrap_or(0.0);
    let b_fare = params.fare_coefficient(income_group);
    if !(b_fare < 0.0) {
        return Err(AffordabilityError::NonNegativeFareCoefficient {
            segment: segment.to_string(),
            value: b_fare,
        });
    }
    let attrs = estimate
        .mean_attributes
        .iter()
        .map(|m| m.attributes)
        .collect::<Vec<_>>();

    let mut by_mode = vec![];
    for (j, mode_attrs) in estimate.mean_attributes.iter().enumerate() {
        let mode = mode_attrs.mode;
        let non_fare_utility = params.non_fare_utility(j, &mode_attrs.attributes);
        let threshold_utility = match threshold {
            WtpThreshold::Fixed { utility } => utility,
            WtpThreshold::BestAlternative => attrs
                .iter()
                .enumerate()
                .filter(|(k, _)| *k != j)
                .map(|(k, a)| params.utility(k, a, income_level))
                .reduce(f64::max)
                .ok_or_else(|| AffordabilityError::NoComparisonAlternative(mode.to_string()))?,
        };
        let wtp = (threshold_utility - non_fare_utility) / b_fare;
        if !wtp.is_finite() {
            return Err(AffordabilityError::NonFiniteWtp {
                segment: segment.to_string(),
                mode: mode.to_string(),
            });
        }
        let mean_fare = mode_attrs.attributes.fare;
        by_mode.push(ModeWtp {
            mode,
            mean_fare,
            non_fare_utility,
            threshold_utility,
            wtp,
            affordability_ratio: (wtp > 0.0).then(|| mean_fare / wtp),
        });
    }

    let value_of_travel_time = params.travel_time / b_fare;
    let trade_offs = TradeOffs {
        value_of_travel_time,
        value_of_travel_time_per_hour: value_of_travel_time * 60.0,
        value_of_waiting_time: params.wait_time / b_fare,
        value_of_comfort: -params.comfort / b_fare,
    };
    Ok(ModeledWtp {
        segment,
        fare_coefficient: b_fare,
        trade_offs,
        by_mode,
    })
}
