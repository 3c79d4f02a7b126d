//! AI counter-offer model.
//!
//! Heuristic, not statistical: a baseline that concedes as rounds pass,
//! scaled by how volatile the player's own offers have been, then pulled
//! 20% toward the player's stated position.

use crate::game::engine::{GameConfig, OfferRecord};

/// Fraction of the offer span the baseline gives up by the final round.
const MAX_CONCESSION: f64 = 0.7;

/// Weight of the player's offer in the counter.
const PLAYER_PULL: f64 = 0.2;

/// Mean absolute offer change above which the AI turns conservative.
const VOLATILITY_THRESHOLD: f64 = 1000.0;

const CONSERVATIVE_FACTOR: f64 = 0.8;
const CONCESSIVE_FACTOR: f64 = 1.2;

/// Computes the AI's counter to `player_offer` in `round`, given the prior
/// exchange history. Always lands inside `[min_offer, max_offer]`.
pub fn calculate_ai_response(
    player_offer: i64,
    round: u32,
    history: &[OfferRecord],
    config: &GameConfig,
) -> i64 {
    let round_factor = round as f64 / config.rounds as f64;
    let span = (config.max_offer - config.min_offer) as f64;
    let base_offer = config.min_offer as f64 + span * (1.0 - round_factor * MAX_CONCESSION);

    let counter = (base_offer * adaptive_factor(history) - player_offer as f64 * PLAYER_PULL)
        .clamp(config.min_offer as f64, config.max_offer as f64);

    counter.floor() as i64
}

/// Reads the player's style from history: big jumps between consecutive
/// offers make the AI conservative, steady offers earn extra concession.
/// Neutral until at least two player offers exist.
fn adaptive_factor(history: &[OfferRecord]) -> f64 {
    if history.len() < 2 {
        return 1.0;
    }

    let offers: Vec<i64> = history.iter().map(|h| h.player_offer).collect();
    let total_change: i64 = offers.windows(2).map(|w| (w[1] - w[0]).abs()).sum();
    let avg_change = total_change as f64 / (offers.len() - 1) as f64;

    if avg_change > VOLATILITY_THRESHOLD {
        CONSERVATIVE_FACTOR
    } else {
        CONCESSIVE_FACTOR
    }
}
