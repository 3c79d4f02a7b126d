use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::game::engine::{self, GameStatus, NegotiationState, OfferRecord, SubmitOutcome};
use crate::game::session::{lock_session, GameSession, SharedSession};
use crate::game::skills::SkillAssessment;
use crate::state::AppState;

/// Session view returned by every game endpoint: the engine state plus the
/// envelope the server keeps around it.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub state: NegotiationState,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<&GameSession> for SessionView {
    fn from(session: &GameSession) -> Self {
        Self {
            id: session.id,
            state: session.state.clone(),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OfferRequest {
    pub offer: i64,
}

#[derive(Debug, Serialize)]
pub struct OfferResponse {
    /// What the engine did: `continued`, `completed`, or `already-terminal`.
    pub outcome: &'static str,
    #[serde(flatten)]
    pub session: SessionView,
}

/// Terminal summary in the shape callers persist to their own store.
#[derive(Debug, Serialize)]
pub struct GameResultSummary {
    pub session_id: Uuid,
    pub game_type: &'static str,
    pub score: u8,
    pub status: GameStatus,
    pub rounds: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_offer: Option<i64>,
    pub accepted: bool,
    pub skill_assessment: SkillAssessment,
    pub history: Vec<OfferRecord>,
}

/// POST /api/v1/games/negotiation
pub async fn handle_create_game(State(state): State<AppState>) -> (StatusCode, Json<SessionView>) {
    let session = GameSession::new(engine::initialize(&state.config.game));
    let view = SessionView::from(&session);
    let id = state.sessions.insert(session);

    info!(session_id = %id, "negotiation session created");
    (StatusCode::CREATED, Json(view))
}

/// GET /api/v1/games/negotiation/:id
pub async fn handle_get_game(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = find_session(&state, id)?;
    let guard = lock_session(&session);
    Ok(Json(SessionView::from(&*guard)))
}

/// POST /api/v1/games/negotiation/:id/offer
///
/// Out-of-range offers are rejected with 400 and the session untouched.
/// Submitting to a finished game is a no-op that echoes the frozen state.
pub async fn handle_submit_offer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<OfferRequest>,
) -> Result<Json<OfferResponse>, AppError> {
    let session = find_session(&state, id)?;
    let mut guard = lock_session(&session);

    let outcome = engine::submit_offer(&mut guard.state, req.offer, &state.config.game);
    let label = match outcome {
        SubmitOutcome::OutOfRange => {
            let cfg = &state.config.game;
            return Err(AppError::Validation(format!(
                "offer must be between {} and {}",
                cfg.min_offer, cfg.max_offer
            )));
        }
        SubmitOutcome::AlreadyTerminal => "already-terminal",
        SubmitOutcome::Continued => {
            guard.touch();
            "continued"
        }
        SubmitOutcome::Completed => {
            guard.touch();
            info!(
                session_id = %id,
                score = guard.state.final_score,
                "negotiation finished"
            );
            "completed"
        }
    };

    Ok(Json(OfferResponse {
        outcome: label,
        session: SessionView::from(&*guard),
    }))
}

/// POST /api/v1/games/negotiation/:id/tick
///
/// One second of the caller-owned clock. Ticking a finished game is a no-op.
pub async fn handle_tick(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = find_session(&state, id)?;
    let mut guard = lock_session(&session);

    let was_in_progress = guard.state.status == GameStatus::InProgress;
    engine::tick(&mut guard.state, &state.config.game);
    if was_in_progress {
        guard.touch();
        if guard.state.status == GameStatus::Timeout {
            info!(session_id = %id, "negotiation timed out");
        }
    }

    Ok(Json(SessionView::from(&*guard)))
}

/// GET /api/v1/games/negotiation/:id/result
///
/// 409 until the session is terminal; the summary only exists once the
/// assessment has been attached.
pub async fn handle_get_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameResultSummary>, AppError> {
    let session = find_session(&state, id)?;
    let guard = lock_session(&session);
    let game = &guard.state;

    if !game.status.is_terminal() {
        return Err(AppError::Conflict(
            "negotiation still in progress; no result yet".to_string(),
        ));
    }

    // Terminal states always carry both fields; guard anyway rather than
    // panic on a violated invariant.
    let (score, assessment) = match (game.final_score, game.skill_assessment) {
        (Some(score), Some(assessment)) => (score, assessment),
        _ => {
            return Err(AppError::Internal(anyhow::anyhow!(
                "terminal session {id} is missing its assessment"
            )))
        }
    };

    let last = game.history.last();
    Ok(Json(GameResultSummary {
        session_id: id,
        game_type: "negotiation",
        score,
        status: game.status,
        rounds: game.history.len(),
        final_offer: last.map(|r| r.player_offer),
        accepted: last.is_some_and(|r| r.accepted),
        skill_assessment: assessment,
        history: game.history.clone(),
    }))
}

/// DELETE /api/v1/games/negotiation/:id
pub async fn handle_abandon_game(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(id) {
        return Err(AppError::NotFound(format!("session {id} not found")));
    }
    info!(session_id = %id, "negotiation session abandoned");
    Ok(StatusCode::NO_CONTENT)
}

fn find_session(state: &AppState, id: Uuid) -> Result<SharedSession, AppError> {
    state
        .sessions
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("session {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::game::engine::GameConfig;
    use crate::game::session::SessionStore;
    use crate::search::fuzzy::DEFAULT_THRESHOLD;
    use crate::search::matcher::matcher_from_config;

    fn make_state() -> AppState {
        AppState {
            config: Config {
                port: 0,
                rust_log: "info".to_string(),
                game: GameConfig::default(),
                fuzzy_threshold: DEFAULT_THRESHOLD,
                fuzzy_tokenized: false,
            },
            matcher: matcher_from_config(false),
            sessions: SessionStore::new(),
        }
    }

    async fn create_session(state: &AppState) -> SessionView {
        let (status, Json(view)) = handle_create_game(State(state.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        view
    }

    #[tokio::test]
    async fn test_create_then_fetch_session() {
        let state = make_state();
        let view = create_session(&state).await;
        assert_eq!(view.state.round, 1);
        assert_eq!(view.state.status, GameStatus::InProgress);

        let Json(fetched) = handle_get_game(State(state), Path(view.id)).await.unwrap();
        assert_eq!(fetched.id, view.id);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let state = make_state();
        let err = handle_get_game(State(state), Path(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_out_of_range_offer_is_validation_error() {
        let state = make_state();
        let view = create_session(&state).await;

        let err = handle_submit_offer(
            State(state.clone()),
            Path(view.id),
            Json(OfferRequest { offer: 50 }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // and the session was not touched
        let Json(after) = handle_get_game(State(state), Path(view.id)).await.unwrap();
        assert_eq!(after.state, view.state);
    }

    #[tokio::test]
    async fn test_result_conflicts_until_terminal_then_summarizes() {
        let state = make_state();
        let view = create_session(&state).await;

        let err = handle_get_result(State(state.clone()), Path(view.id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // 8000 is countered with 7070 in round 1: within proximity, deal done
        let Json(resp) = handle_submit_offer(
            State(state.clone()),
            Path(view.id),
            Json(OfferRequest { offer: 8000 }),
        )
        .await
        .unwrap();
        assert_eq!(resp.outcome, "completed");

        let Json(summary) = handle_get_result(State(state), Path(view.id))
            .await
            .unwrap();
        assert_eq!(summary.game_type, "negotiation");
        assert_eq!(summary.status, GameStatus::Completed);
        assert_eq!(summary.rounds, 1);
        assert_eq!(summary.final_offer, Some(8000));
        assert!(summary.accepted);
        assert_eq!(summary.score, 63);
    }

    #[tokio::test]
    async fn test_offer_on_finished_game_is_noop() {
        let state = make_state();
        let view = create_session(&state).await;

        handle_submit_offer(
            State(state.clone()),
            Path(view.id),
            Json(OfferRequest { offer: 8000 }),
        )
        .await
        .unwrap();

        let Json(resp) = handle_submit_offer(
            State(state.clone()),
            Path(view.id),
            Json(OfferRequest { offer: 6000 }),
        )
        .await
        .unwrap();
        assert_eq!(resp.outcome, "already-terminal");
        assert_eq!(resp.session.state.history.len(), 1);
    }

    #[tokio::test]
    async fn test_tick_counts_down_to_timeout() {
        let state = make_state();
        let view = create_session(&state).await;

        for _ in 0..state.config.game.time_limit_secs {
            handle_tick(State(state.clone()), Path(view.id)).await.unwrap();
        }

        let Json(after) = handle_get_game(State(state), Path(view.id)).await.unwrap();
        assert_eq!(after.state.status, GameStatus::Timeout);
        assert_eq!(after.state.time_remaining, 0);
        assert!(after.state.final_score.is_some());
    }

    #[tokio::test]
    async fn test_abandon_drops_session() {
        let state = make_state();
        let view = create_session(&state).await;

        let status = handle_abandon_game(State(state.clone()), Path(view.id))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let err = handle_get_game(State(state), Path(view.id)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
