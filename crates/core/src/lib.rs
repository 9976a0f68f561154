//! Domain logic for the Agent Free contract engine.
//!
//! Pure, I/O-free building blocks shared by the database and API crates:
//! the error taxonomy, common type aliases, and the contract template
//! validation + placeholder substitution engine.

pub mod contract;
pub mod error;
pub mod types;
