pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::game::handlers as game_handlers;
use crate::search::handlers as search_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job search
        .route("/api/v1/jobs/search", post(search_handlers::handle_search))
        // Negotiation game
        .route(
            "/api/v1/games/negotiation",
            post(game_handlers::handle_create_game),
        )
        .route(
            "/api/v1/games/negotiation/:id",
            get(game_handlers::handle_get_game).delete(game_handlers::handle_abandon_game),
        )
        .route(
            "/api/v1/games/negotiation/:id/offer",
            post(game_handlers::handle_submit_offer),
        )
        .route(
            "/api/v1/games/negotiation/:id/tick",
            post(game_handlers::handle_tick),
        )
        .route(
            "/api/v1/games/negotiation/:id/result",
            get(game_handlers::handle_get_result),
        )
        .with_state(state)
}
