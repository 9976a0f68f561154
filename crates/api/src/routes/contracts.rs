//! Route definitions for contract generation.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::contracts;
use crate::state::AppState;

/// Routes mounted at `/contracts`.
///
/// ```text
/// POST   /generate            -> generate_contract
/// GET    /generations/{id}    -> get_generation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(contracts::generate_contract))
        .route("/generations/{id}", get(contracts::get_generation))
}
