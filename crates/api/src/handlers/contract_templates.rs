//! Handlers for the contract template store.
//!
//! Templates are soft-deleted only; every read path filters on
//! `is_active` so retired templates vanish from the API while historical
//! generation records keep referencing them.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use serde::Deserialize;

use agentfree_core::contract;
use agentfree_core::error::CoreError;
use agentfree_core::types::DbId;
use agentfree_db::models::contract_template::{
    ContractTemplate, CreateContractTemplate, UpdateContractTemplate,
};
use agentfree_db::repositories::ContractTemplateRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Query parameters for listing templates.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub attorney_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that an active template exists, returning the full row.
pub(crate) async fn ensure_template_exists(
    pool: &sqlx::PgPool,
    id: DbId,
) -> AppResult<ContractTemplate> {
    ContractTemplateRepo::find_active_by_id(pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Contract template",
                id,
            })
        })
}

/// Validate the always-required template fields.
fn validate_required_fields(
    name: &str,
    template_type: &str,
    category: &str,
    content: &str,
) -> AppResult<()> {
    contract::validate_template_name(name)?;
    contract::validate_template_type(template_type)?;
    contract::validate_category(category)?;
    contract::validate_template_content(content)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// GET /contract-templates
// ---------------------------------------------------------------------------

/// List active templates, most popular first.
pub async fn list_templates(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let items = ContractTemplateRepo::list(
        &state.pool,
        params.category.as_deref(),
        params.attorney_id,
    )
    .await?;
    tracing::debug!(count = items.len(), "Listed contract templates");
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// POST /contract-templates
// ---------------------------------------------------------------------------

/// Create a new contract template.
pub async fn create_template(
    State(state): State<AppState>,
    Json(input): Json<CreateContractTemplate>,
) -> AppResult<impl IntoResponse> {
    validate_required_fields(
        &input.template_name,
        &input.template_type,
        &input.category,
        &input.template_content,
    )?;
    if let Some(ref fields) = input.form_fields {
        contract::validate_form_fields(fields)?;
    }

    let created = ContractTemplateRepo::create(&state.pool, &input).await?;
    tracing::info!(id = created.id, name = %created.template_name, "Contract template created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// GET /contract-templates/{id}
// ---------------------------------------------------------------------------

/// Get a single active template by ID.
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let template = ensure_template_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: template }))
}

// ---------------------------------------------------------------------------
// PUT /contract-templates/{id}
// ---------------------------------------------------------------------------

/// Update an existing template. Only provided fields are applied.
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContractTemplate>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref name) = input.template_name {
        contract::validate_template_name(name)?;
    }
    if let Some(ref template_type) = input.template_type {
        contract::validate_template_type(template_type)?;
    }
    if let Some(ref category) = input.category {
        contract::validate_category(category)?;
    }
    if let Some(ref content) = input.template_content {
        contract::validate_template_content(content)?;
    }
    if let Some(ref fields) = input.form_fields {
        contract::validate_form_fields(fields)?;
    }

    let updated = ContractTemplateRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Contract template",
            id,
        }))?;
    tracing::info!(id = updated.id, "Contract template updated");
    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /contract-templates/{id}
// ---------------------------------------------------------------------------

/// Soft-deactivate a template. Generation records referencing it survive.
pub async fn deactivate_template(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deactivated = ContractTemplateRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Contract template",
            id,
        }));
    }
    tracing::info!(id, "Contract template deactivated");
    Ok(StatusCode::NO_CONTENT)
}
