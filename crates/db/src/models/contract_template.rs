//! Contract template models and DTOs.
//!
//! Defines the database row struct for `contract_templates` and the
//! create/update types used by the API layer.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use agentfree_core::contract::FormField;
use agentfree_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A contract template row from the `contract_templates` table.
///
/// `form_fields` is the JSONB column as stored; create/update inputs are
/// validated against the typed [`FormField`] descriptors before writing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContractTemplate {
    pub id: DbId,
    /// Owning attorney; `None` means the template is firm-wide.
    pub attorney_id: Option<DbId>,
    pub template_name: String,
    pub template_type: String,
    pub category: String,
    pub description: Option<String>,
    pub template_content: String,
    pub form_fields: serde_json::Value,
    pub is_public: bool,
    pub usage_count: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a new contract template.
///
/// The required text fields deserialize to empty strings when absent from
/// the request body; validation rejects empty values, so a missing field
/// surfaces as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContractTemplate {
    pub attorney_id: Option<DbId>,
    #[serde(default)]
    pub template_name: String,
    #[serde(default)]
    pub template_type: String,
    #[serde(default)]
    pub category: String,
    pub description: Option<String>,
    #[serde(default)]
    pub template_content: String,
    pub form_fields: Option<Vec<FormField>>,
    pub is_public: Option<bool>,
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// Input for updating an existing contract template.
/// All fields are optional; only provided fields are updated.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContractTemplate {
    pub template_name: Option<String>,
    pub template_type: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub template_content: Option<String>,
    pub form_fields: Option<Vec<FormField>>,
    pub is_public: Option<bool>,
}
