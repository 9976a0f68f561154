//! Contract generation models.
//!
//! Defines the database row struct for `contract_generations`. Rows are
//! immutable audit artifacts, so there is no update DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use agentfree_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// An immutable generation record row from the `contract_generations` table.
///
/// `contract_data` is the submitted bag stored verbatim; `generated_content`
/// is the substituted text at generation time and is never regenerated, so
/// later template edits do not alter historical records.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContractGeneration {
    pub id: DbId,
    pub template_id: DbId,
    pub transaction_id: Option<DbId>,
    pub attorney_id: DbId,
    pub client_id: Option<DbId>,
    pub contract_data: serde_json::Value,
    pub generated_content: String,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for persisting a new generation record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContractGeneration {
    pub template_id: DbId,
    pub transaction_id: Option<DbId>,
    pub attorney_id: DbId,
    pub client_id: Option<DbId>,
    pub contract_data: serde_json::Value,
    pub generated_content: String,
}
