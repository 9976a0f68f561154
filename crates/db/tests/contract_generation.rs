//! Integration tests for generation persistence and usage accounting.
//!
//! Verifies the transactional unit of work from the design: the record
//! insert and the counter increment commit together or not at all, and
//! the increment is exact under concurrency.

use assert_matches::assert_matches;
use sqlx::PgPool;

use agentfree_db::models::contract_generation::CreateContractGeneration;
use agentfree_db::models::contract_template::CreateContractTemplate;
use agentfree_db::repositories::{ContractGenerationRepo, ContractTemplateRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_template(name: &str) -> CreateContractTemplate {
    CreateContractTemplate {
        attorney_id: None,
        template_name: name.to_string(),
        template_type: "purchase_agreement".to_string(),
        category: "purchase".to_string(),
        description: None,
        template_content: "Buyer: {{buyer}}".to_string(),
        form_fields: None,
        is_public: Some(true),
    }
}

fn new_generation(template_id: i64) -> CreateContractGeneration {
    CreateContractGeneration {
        template_id,
        transaction_id: None,
        attorney_id: 1,
        client_id: None,
        contract_data: serde_json::json!({"buyer": "Alice"}),
        generated_content: "Buyer: Alice".to_string(),
    }
}

async fn usage_count(pool: &PgPool, template_id: i64) -> i32 {
    sqlx::query_scalar("SELECT usage_count FROM contract_templates WHERE id = $1")
        .bind(template_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn generation_count(pool: &PgPool, template_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM contract_generations WHERE template_id = $1")
        .bind(template_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Test: one generation increments usage by exactly one
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn generation_increments_usage_once(pool: PgPool) {
    let template = ContractTemplateRepo::create(&pool, &new_template("Counted"))
        .await
        .unwrap();
    assert_eq!(usage_count(&pool, template.id).await, 0);

    let generation = ContractGenerationRepo::create(&pool, &new_generation(template.id))
        .await
        .unwrap();

    assert_eq!(generation.template_id, template.id);
    assert_eq!(generation.generated_content, "Buyer: Alice");
    assert_eq!(usage_count(&pool, template.id).await, 1);
}

// ---------------------------------------------------------------------------
// Test: K concurrent generations land exactly K increments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_generations_count_exactly(pool: PgPool) {
    const K: usize = 8;

    let template = ContractTemplateRepo::create(&pool, &new_template("Contended"))
        .await
        .unwrap();

    let mut handles = Vec::with_capacity(K);
    for _ in 0..K {
        let pool = pool.clone();
        let input = new_generation(template.id);
        handles.push(tokio::spawn(async move {
            ContractGenerationRepo::create(&pool, &input).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(usage_count(&pool, template.id).await, K as i32);
    assert_eq!(generation_count(&pool, template.id).await, K as i64);
}

// ---------------------------------------------------------------------------
// Test: failed increment rolls back the record insert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_increment_leaves_no_generation_record(pool: PgPool) {
    let template = ContractTemplateRepo::create(&pool, &new_template("Doomed"))
        .await
        .unwrap();

    // Deactivating the template makes the guarded increment affect zero
    // rows, failing the transaction after the insert already ran.
    ContractTemplateRepo::deactivate(&pool, template.id)
        .await
        .unwrap();

    let err = ContractGenerationRepo::create(&pool, &new_generation(template.id))
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::RowNotFound);

    assert_eq!(
        generation_count(&pool, template.id).await,
        0,
        "rolled-back generation must not be visible"
    );
    assert_eq!(usage_count(&pool, template.id).await, 0);
}

// ---------------------------------------------------------------------------
// Test: the submitted bag is stored verbatim
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn contract_data_is_stored_verbatim(pool: PgPool) {
    let template = ContractTemplateRepo::create(&pool, &new_template("Audited"))
        .await
        .unwrap();

    let bag = serde_json::json!({"buyer": "Alice", "price": 450000, "financed": true});
    let generation = ContractGenerationRepo::create(
        &pool,
        &CreateContractGeneration {
            contract_data: bag.clone(),
            ..new_generation(template.id)
        },
    )
    .await
    .unwrap();

    let found = ContractGenerationRepo::find_by_id(&pool, generation.id)
        .await
        .unwrap()
        .expect("generation record should exist");
    assert_eq!(found.contract_data, bag);
    assert_eq!(found.generated_content, generation.generated_content);
}
