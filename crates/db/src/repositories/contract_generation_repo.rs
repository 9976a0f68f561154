//! Repository for the `contract_generations` table.

use sqlx::PgPool;

use agentfree_core::types::DbId;

use crate::models::contract_generation::{ContractGeneration, CreateContractGeneration};

const COLUMNS: &str = "id, template_id, transaction_id, attorney_id, client_id, \
     contract_data, generated_content, created_at";

/// Persists immutable generation records and their usage accounting.
pub struct ContractGenerationRepo;

impl ContractGenerationRepo {
    /// Persist a generation record and bump the template's usage counter.
    ///
    /// Both writes run in one transaction: the record insert and the
    /// `usage_count` increment either both commit or neither does. The
    /// increment is executed server-side (`usage_count = usage_count + 1`)
    /// so concurrent generations against the same template never lose
    /// updates, and it is guarded on `is_active` — a template deactivated
    /// mid-flight aborts the whole unit of work.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContractGeneration,
    ) -> Result<ContractGeneration, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO contract_generations \
                (template_id, transaction_id, attorney_id, client_id, \
                 contract_data, generated_content) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let generation = sqlx::query_as::<_, ContractGeneration>(&insert_query)
            .bind(input.template_id)
            .bind(input.transaction_id)
            .bind(input.attorney_id)
            .bind(input.client_id)
            .bind(&input.contract_data)
            .bind(&input.generated_content)
            .fetch_one(&mut *tx)
            .await?;

        let incremented = sqlx::query(
            "UPDATE contract_templates SET usage_count = usage_count + 1 \
             WHERE id = $1 AND is_active = true",
        )
        .bind(input.template_id)
        .execute(&mut *tx)
        .await?;

        if incremented.rows_affected() == 0 {
            // Dropping the transaction rolls back the insert.
            return Err(sqlx::Error::RowNotFound);
        }

        tx.commit().await?;

        tracing::debug!(
            generation_id = generation.id,
            template_id = generation.template_id,
            "Generation record persisted"
        );
        Ok(generation)
    }

    /// Find a generation record by ID. Records are immutable, so this is
    /// the only read shape the audit trail needs.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContractGeneration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contract_generations WHERE id = $1");
        sqlx::query_as::<_, ContractGeneration>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
