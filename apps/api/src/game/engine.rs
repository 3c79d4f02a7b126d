//! Negotiation game state machine.
//!
//! Every operation is a pure, synchronous transform of a caller-held
//! [`NegotiationState`]: no I/O, no background work, no internal clock. The
//! caller drives the 1-second cadence by invoking [`tick`] and owns
//! persistence of terminal results. Once a state reaches `completed` or
//! `timeout` it never changes again; all further transforms are no-ops.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::ai::calculate_ai_response;
use crate::game::skills::{self, SkillAssessment};

/// Offers closer than this (strict) settle the deal.
pub const ACCEPT_PROXIMITY: i64 = 1000;

/// Bounds and pacing for a negotiation session. Supplied by the caller
/// (loaded from env in this service); the engine owns no constants beyond
/// the acceptance proximity.
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub min_offer: i64,
    pub max_offer: i64,
    /// Maximum number of rounds R; reaching it ends the game.
    pub rounds: u32,
    pub time_limit_secs: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_offer: 500,
            max_offer: 10_000,
            rounds: 5,
            time_limit_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    InProgress,
    Completed,
    Timeout,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Completed | GameStatus::Timeout)
    }
}

/// One player-offer / counter-offer exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferRecord {
    pub round: u32,
    pub player_offer: i64,
    pub ai_offer: i64,
    pub accepted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationState {
    /// 1-indexed, never exceeds the configured round count.
    pub round: u32,
    pub player_offer: i64,
    pub ai_offer: i64,
    pub time_remaining: u32,
    pub history: Vec<OfferRecord>,
    pub status: GameStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_assessment: Option<SkillAssessment>,
}

/// What [`submit_offer`] did with the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Offer recorded; the next round begins.
    Continued,
    /// Deal reached or rounds exhausted; state is now terminal.
    Completed,
    /// Offer outside `[min_offer, max_offer]`; state untouched.
    OutOfRange,
    /// Session already terminal; state untouched.
    AlreadyTerminal,
}

/// Fresh state for a new session using the ambient thread rng.
pub fn initialize(config: &GameConfig) -> NegotiationState {
    initialize_with(config, &mut rand::thread_rng())
}

/// Fresh state with an injected rng, so tests (and replays) can pin the
/// AI's opening anchor. The anchor is drawn from the lower half of the
/// offer range, deliberately low, to be negotiated upward.
pub fn initialize_with<R: Rng>(config: &GameConfig, rng: &mut R) -> NegotiationState {
    let half_span = (config.max_offer - config.min_offer) / 2;
    let ai_offer = if half_span > 0 {
        rng.gen_range(config.min_offer..config.min_offer + half_span)
    } else {
        config.min_offer
    };

    NegotiationState {
        round: 1,
        player_offer: 0,
        ai_offer,
        time_remaining: config.time_limit_secs,
        history: Vec::new(),
        status: GameStatus::InProgress,
        final_score: None,
        skill_assessment: None,
    }
}

/// One second of wall-clock elapsing, driven by the caller's timer.
///
/// On reaching zero while still in progress the game times out and the
/// assessment + final score are attached. No effect on terminal states.
pub fn tick(state: &mut NegotiationState, config: &GameConfig) {
    if state.status != GameStatus::InProgress {
        return;
    }

    state.time_remaining = state.time_remaining.saturating_sub(1);
    if state.time_remaining == 0 {
        finish(state, GameStatus::Timeout, config);
    }
}

/// Records a player offer and the AI's counter.
///
/// Out-of-range input is rejected without touching the state (the caller
/// re-prompts). Acceptance is purely the proximity rule; the final round
/// forces the *game* to end but never forces acceptance.
pub fn submit_offer(
    state: &mut NegotiationState,
    offer: i64,
    config: &GameConfig,
) -> SubmitOutcome {
    if state.status.is_terminal() {
        return SubmitOutcome::AlreadyTerminal;
    }
    if offer < config.min_offer || offer > config.max_offer {
        return SubmitOutcome::OutOfRange;
    }

    let counter = calculate_ai_response(offer, state.round, &state.history, config);
    state.player_offer = offer;
    state.ai_offer = counter;

    let accepted = (offer - counter).abs() < ACCEPT_PROXIMITY;
    state.history.push(OfferRecord {
        round: state.round,
        player_offer: offer,
        ai_offer: counter,
        accepted,
    });

    if accepted || state.round == config.rounds {
        finish(state, GameStatus::Completed, config);
        SubmitOutcome::Completed
    } else {
        state.round += 1;
        SubmitOutcome::Continued
    }
}

/// Forward-only transition into a terminal status, attaching the skill
/// assessment and weighted final score.
fn finish(state: &mut NegotiationState, status: GameStatus, config: &GameConfig) {
    state.status = status;
    let assessment = skills::evaluate_skills(state, config);
    state.final_score = Some(skills::final_score(&assessment));
    state.skill_assessment = Some(assessment);
}
