//! Repository for the `contract_templates` table.

use sqlx::PgPool;

use agentfree_core::types::DbId;

use crate::models::contract_template::{
    ContractTemplate, CreateContractTemplate, UpdateContractTemplate,
};

const COLUMNS: &str = "id, attorney_id, template_name, template_type, category, \
     description, template_content, form_fields, is_public, usage_count, \
     is_active, created_at, updated_at";

/// Provides CRUD-lite operations for contract templates.
pub struct ContractTemplateRepo;

impl ContractTemplateRepo {
    /// Insert a new template, returning the created row with `usage_count = 0`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContractTemplate,
    ) -> Result<ContractTemplate, sqlx::Error> {
        let form_fields = match &input.form_fields {
            Some(fields) => {
                serde_json::to_value(fields).map_err(|e| sqlx::Error::Encode(Box::new(e)))?
            }
            None => serde_json::Value::Array(Vec::new()),
        };

        let query = format!(
            "INSERT INTO contract_templates \
                (attorney_id, template_name, template_type, category, description, \
                 template_content, form_fields, is_public) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, false)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContractTemplate>(&query)
            .bind(input.attorney_id)
            .bind(&input.template_name)
            .bind(&input.template_type)
            .bind(&input.category)
            .bind(&input.description)
            .bind(&input.template_content)
            .bind(&form_fields)
            .bind(input.is_public)
            .fetch_one(pool)
            .await
    }

    /// Find an active template by ID. Soft-deleted templates are invisible.
    pub async fn find_active_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContractTemplate>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM contract_templates WHERE id = $1 AND is_active = true");
        sqlx::query_as::<_, ContractTemplate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active templates, most popular first.
    ///
    /// Visibility rule: with an `attorney_id`, templates owned by that
    /// attorney plus all public ones; without, public templates only.
    /// Ties on `usage_count` break alphabetically by name.
    pub async fn list(
        pool: &PgPool,
        category: Option<&str>,
        attorney_id: Option<DbId>,
    ) -> Result<Vec<ContractTemplate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contract_templates \
             WHERE is_active = true \
               AND ($1::text IS NULL OR category = $1) \
               AND (CASE WHEN $2::bigint IS NULL THEN is_public \
                    ELSE attorney_id = $2 OR is_public END) \
             ORDER BY usage_count DESC, template_name ASC"
        );
        sqlx::query_as::<_, ContractTemplate>(&query)
            .bind(category)
            .bind(attorney_id)
            .fetch_all(pool)
            .await
    }

    /// Update an active template. Only non-`None` fields are applied.
    /// Returns `None` if no active template matches.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateContractTemplate,
    ) -> Result<Option<ContractTemplate>, sqlx::Error> {
        let form_fields = match &input.form_fields {
            Some(fields) => {
                Some(serde_json::to_value(fields).map_err(|e| sqlx::Error::Encode(Box::new(e)))?)
            }
            None => None,
        };

        let query = format!(
            "UPDATE contract_templates SET \
                template_name    = COALESCE($2, template_name), \
                template_type    = COALESCE($3, template_type), \
                category         = COALESCE($4, category), \
                description      = COALESCE($5, description), \
                template_content = COALESCE($6, template_content), \
                form_fields      = COALESCE($7, form_fields), \
                is_public        = COALESCE($8, is_public), \
                updated_at       = now() \
             WHERE id = $1 AND is_active = true \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContractTemplate>(&query)
            .bind(id)
            .bind(&input.template_name)
            .bind(&input.template_type)
            .bind(&input.category)
            .bind(&input.description)
            .bind(&input.template_content)
            .bind(form_fields)
            .bind(input.is_public)
            .fetch_optional(pool)
            .await
    }

    /// Soft-deactivate a template (set `is_active = false`).
    ///
    /// Returns `true` if a row changed; a second call returns `false`.
    /// Templates are never hard-deleted: generation records keep their
    /// foreign-key references to retired templates.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE contract_templates SET is_active = false, updated_at = now() \
             WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
