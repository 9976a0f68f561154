//! Handlers for contract generation.
//!
//! Generation is a synchronous request/response operation: load the
//! template, substitute the submitted bag into its content, persist the
//! audit record together with the usage increment, return the result.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use serde::{Deserialize, Serialize};

use agentfree_core::contract;
use agentfree_core::error::CoreError;
use agentfree_core::types::DbId;
use agentfree_db::models::contract_generation::{ContractGeneration, CreateContractGeneration};
use agentfree_db::repositories::ContractGenerationRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::contract_templates::ensure_template_exists;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for generating a contract from a template.
#[derive(Debug, Deserialize)]
pub struct GenerateContractRequest {
    pub template_id: DbId,
    pub transaction_id: Option<DbId>,
    pub attorney_id: DbId,
    pub client_id: Option<DbId>,
    /// Flat key/value bag substituted into the template's `{{key}}` tokens.
    #[serde(default)]
    pub contract_data: serde_json::Map<String, serde_json::Value>,
}

/// Response payload: the persisted audit record plus the generated text.
#[derive(Debug, Serialize)]
pub struct GeneratedContract {
    pub contract: ContractGeneration,
    pub generated_content: String,
}

// ---------------------------------------------------------------------------
// POST /contracts/generate
// ---------------------------------------------------------------------------

/// Generate a contract from a template and a data bag.
///
/// Tokens with no matching key stay verbatim in the output; the audit
/// record and the template's usage counter are written in one transaction.
pub async fn generate_contract(
    State(state): State<AppState>,
    Json(input): Json<GenerateContractRequest>,
) -> AppResult<impl IntoResponse> {
    if input.contract_data.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Contract data must not be empty".to_string(),
        )));
    }

    let template = ensure_template_exists(&state.pool, input.template_id).await?;

    let data = contract::coerce_input(&input.contract_data);
    let generated_content = contract::render(&template.template_content, &data);

    let unresolved = contract::extract_placeholders(&generated_content);
    if !unresolved.is_empty() {
        tracing::debug!(
            template_id = template.id,
            unresolved = ?unresolved,
            "Generated contract still contains unresolved tokens"
        );
    }

    let record = ContractGenerationRepo::create(
        &state.pool,
        &CreateContractGeneration {
            template_id: template.id,
            transaction_id: input.transaction_id,
            attorney_id: input.attorney_id,
            client_id: input.client_id,
            contract_data: serde_json::Value::Object(input.contract_data),
            generated_content,
        },
    )
    .await?;

    tracing::info!(
        generation_id = record.id,
        template_id = template.id,
        "Contract generated"
    );

    let generated_content = record.generated_content.clone();
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: GeneratedContract {
                contract: record,
                generated_content,
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /contracts/generations/{id}
// ---------------------------------------------------------------------------

/// Fetch a single generation record for audit review.
pub async fn get_generation(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = ContractGenerationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Contract generation",
            id,
        }))?;
    Ok(Json(DataResponse { data: record }))
}
