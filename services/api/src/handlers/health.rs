use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Ready once the database answers a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    foodgram_core::health::database_ready(&state.db).await
}
