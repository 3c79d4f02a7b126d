//! Skill evaluation and final scoring for finished negotiations.
//!
//! Five behavioral dimensions, each a deterministic function of the offer
//! history, scored 0-100. The serialized mapping keeps the display-name
//! keys that candidate profiles already store.

use serde::{Deserialize, Serialize};

use crate::game::engine::{GameConfig, NegotiationState};

const WEIGHT_VALUE_PERCEPTION: f64 = 0.25;
const WEIGHT_PATIENCE: f64 = 0.15;
const WEIGHT_RISK_TOLERANCE: f64 = 0.20;
const WEIGHT_COMMUNICATION_STYLE: f64 = 0.15;
const WEIGHT_DECISION_MAKING: f64 = 0.25;

/// Lower and upper bounds of the "optimal" closing range, as fractions of
/// the maximum offer.
const OPTIMAL_BAND: (f64, f64) = (0.6, 0.8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillAssessment {
    /// How close the final offer landed to the optimal value band.
    #[serde(rename = "Value perception")]
    pub value_perception: u8,
    /// Share of the available rounds actually used.
    #[serde(rename = "Patience")]
    pub patience: u8,
    /// Average size of round-over-round offer moves.
    #[serde(rename = "Risk tolerance")]
    pub risk_tolerance: u8,
    /// Consistency of those moves (low variance scores high).
    #[serde(rename = "Communication style")]
    pub communication_style: u8,
    /// Closing quality: zero without a deal, else the final offer's share
    /// of the maximum.
    #[serde(rename = "Decision making")]
    pub decision_making: u8,
}

/// Scores the five dimensions from the state's history.
pub fn evaluate_skills(state: &NegotiationState, config: &GameConfig) -> SkillAssessment {
    let history = &state.history;
    let max = config.max_offer as f64;

    let final_offer = history.last().map_or(0, |h| h.player_offer) as f64;

    let (band_low, band_high) = (max * OPTIMAL_BAND.0, max * OPTIMAL_BAND.1);
    let value_perception = if final_offer >= band_low && final_offer <= band_high {
        100.0
    } else {
        let band_distance = (final_offer - band_low)
            .abs()
            .min((final_offer - band_high).abs());
        100.0 - band_distance / (max * 0.2) * 100.0
    };

    let patience = (history.len() as f64 / config.rounds as f64 * 100.0).min(100.0);

    // Offer deltas carry a leading zero for the first round, and that zero
    // participates in both the mean and the variance.
    let deltas: Vec<f64> = history
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                0.0
            } else {
                (h.player_offer - history[i - 1].player_offer).abs() as f64
            }
        })
        .collect();
    let count = deltas.len().max(1) as f64;
    let avg_change = deltas.iter().sum::<f64>() / count;
    let risk_tolerance = (avg_change / (max * 0.1) * 100.0).min(100.0);

    let variance = deltas.iter().map(|d| (d - avg_change).powi(2)).sum::<f64>() / count;
    let communication_style = 100.0 - (variance / (max * 0.05) * 100.0).min(100.0);

    let decision_making = match history.last() {
        Some(last) if last.accepted => last.player_offer as f64 / max * 100.0,
        _ => 0.0,
    };

    SkillAssessment {
        value_perception: to_score(value_perception),
        patience: to_score(patience),
        risk_tolerance: to_score(risk_tolerance),
        communication_style: to_score(communication_style),
        decision_making: to_score(decision_making),
    }
}

/// Weighted average of the five dimensions. Weights sum to 1.0, so the
/// result stays in [0, 100] for any well-formed assessment.
pub fn final_score(assessment: &SkillAssessment) -> u8 {
    let weighted = assessment.value_perception as f64 * WEIGHT_VALUE_PERCEPTION
        + assessment.patience as f64 * WEIGHT_PATIENCE
        + assessment.risk_tolerance as f64 * WEIGHT_RISK_TOLERANCE
        + assessment.communication_style as f64 * WEIGHT_COMMUNICATION_STYLE
        + assessment.decision_making as f64 * WEIGHT_DECISION_MAKING;

    weighted.round() as u8
}

fn to_score(raw: f64) -> u8 {
    raw.clamp(0.0, 100.0).round() as u8
}
