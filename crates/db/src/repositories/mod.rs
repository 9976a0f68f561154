//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod contract_generation_repo;
pub mod contract_template_repo;

pub use contract_generation_repo::ContractGenerationRepo;
pub use contract_template_repo::ContractTemplateRepo;
