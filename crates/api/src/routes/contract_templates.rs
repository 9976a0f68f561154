//! Route definitions for the contract template store.

use axum::routing::get;
use axum::Router;

use crate::handlers::contract_templates;
use crate::state::AppState;

/// Routes mounted at `/contract-templates`.
///
/// ```text
/// GET    /        -> list_templates
/// POST   /        -> create_template
/// GET    /{id}    -> get_template
/// PUT    /{id}    -> update_template
/// DELETE /{id}    -> deactivate_template
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(contract_templates::list_templates).post(contract_templates::create_template),
        )
        .route(
            "/{id}",
            get(contract_templates::get_template)
                .put(contract_templates::update_template)
                .delete(contract_templates::deactivate_template),
        )
}
