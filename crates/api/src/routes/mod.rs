pub mod contract_templates;
pub mod contracts;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /contract-templates                 list (?category=&attorney_id=), create
/// /contract-templates/{id}            get, update, deactivate
///
/// /contracts/generate                 generate from a template (POST)
/// /contracts/generations/{id}         audit read of a generation record
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Template store.
        .nest("/contract-templates", contract_templates::router())
        // Contract generation engine.
        .nest("/contracts", contracts::router())
}
