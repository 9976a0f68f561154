//! HTTP handler implementations, one module per resource.

pub mod contract_templates;
pub mod contracts;
