//! Contract template validation and placeholder substitution.
//!
//! Provides constants, validation functions, form-field descriptors,
//! placeholder extraction, and the rendering engine that turns a template
//! plus a flat data bag into a generated contract.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length for a template name in characters.
pub const MAX_TEMPLATE_NAME_LENGTH: usize = 200;

/// Maximum length for a template type in characters.
pub const MAX_TEMPLATE_TYPE_LENGTH: usize = 100;

/// Maximum length for a template category in characters.
pub const MAX_CATEGORY_LENGTH: usize = 100;

/// Maximum length for template content in characters.
pub const MAX_TEMPLATE_CONTENT_LENGTH: usize = 200_000;

/// Regex pattern matching `{{placeholder}}` tokens in template content.
pub const PLACEHOLDER_PATTERN: &str = r"\{\{([a-zA-Z_][a-zA-Z0-9_]*)\}\}";

/// Compiled regex for `{{placeholder}}` matching. Compiled once, reused forever.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Form fields
// ---------------------------------------------------------------------------

/// Input widget type for a form field descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Currency,
    Date,
    Number,
    Select,
}

/// A single entry in a template's ordered `form_fields` list.
///
/// Describes one data-entry field the client renders when collecting the
/// bag for generation. The `required` flag drives client-side forms only;
/// generation never rejects a bag for missing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    /// Placeholder name this field fills (the `x` in `{{x}}`).
    pub name: String,
    /// Human-readable label shown next to the input.
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    /// Choices for `select` fields; absent for all other types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a template name: must be non-empty and within length limit.
pub fn validate_template_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Template name must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_TEMPLATE_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Template name exceeds maximum length of {MAX_TEMPLATE_NAME_LENGTH} characters (got {})",
            name.len()
        )));
    }
    Ok(())
}

/// Validate a template type: must be non-empty and within length limit.
pub fn validate_template_type(template_type: &str) -> Result<(), CoreError> {
    if template_type.trim().is_empty() {
        return Err(CoreError::Validation(
            "Template type must not be empty".to_string(),
        ));
    }
    if template_type.len() > MAX_TEMPLATE_TYPE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Template type exceeds maximum length of {MAX_TEMPLATE_TYPE_LENGTH} characters (got {})",
            template_type.len()
        )));
    }
    Ok(())
}

/// Validate a template category: must be non-empty and within length limit.
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if category.trim().is_empty() {
        return Err(CoreError::Validation(
            "Category must not be empty".to_string(),
        ));
    }
    if category.len() > MAX_CATEGORY_LENGTH {
        return Err(CoreError::Validation(format!(
            "Category exceeds maximum length of {MAX_CATEGORY_LENGTH} characters (got {})",
            category.len()
        )));
    }
    Ok(())
}

/// Validate template content: must be non-empty and within length limit.
pub fn validate_template_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation(
            "Template content must not be empty".to_string(),
        ));
    }
    if content.len() > MAX_TEMPLATE_CONTENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Template content exceeds maximum length of {MAX_TEMPLATE_CONTENT_LENGTH} characters (got {})",
            content.len()
        )));
    }
    Ok(())
}

/// Validate a template's form field descriptors.
///
/// Field names must be non-empty and unique within the template, and
/// `select` fields must carry at least one option.
pub fn validate_form_fields(fields: &[FormField]) -> Result<(), CoreError> {
    let mut seen: Vec<&str> = Vec::with_capacity(fields.len());
    for field in fields {
        if field.name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Form field name must not be empty".to_string(),
            ));
        }
        if seen.contains(&field.name.as_str()) {
            return Err(CoreError::Validation(format!(
                "Duplicate form field name: {}",
                field.name
            )));
        }
        seen.push(&field.name);

        if field.field_type == FieldType::Select
            && field.options.as_ref().map_or(true, |o| o.is_empty())
        {
            return Err(CoreError::Validation(format!(
                "Select field '{}' must define at least one option",
                field.name
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Placeholder extraction
// ---------------------------------------------------------------------------

/// Extract all `{{placeholder}}` tokens from template content.
///
/// Returns a de-duplicated, sorted list of placeholder names (without braces).
pub fn extract_placeholders(content: &str) -> Vec<String> {
    let mut placeholders: Vec<String> = PLACEHOLDER_RE
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .collect();
    placeholders.sort();
    placeholders.dedup();
    placeholders
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Substitute `{{key}}` tokens in `content` with values from `data`.
///
/// A single pass over the content replaces every token whose name is a key
/// in `data`; tokens with no matching key are left verbatim. Matching is
/// exact and case-sensitive. Because each token is matched as a whole,
/// key iteration order cannot affect the result and no key can corrupt
/// another key's token.
pub fn render(content: &str, data: &HashMap<String, String>) -> String {
    PLACEHOLDER_RE
        .replace_all(content, |caps: &Captures<'_>| match data.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Coerce a submitted JSON data bag to the flat string map `render` expects.
///
/// Strings substitute unquoted; every other JSON value substitutes as its
/// compact JSON text (`12`, `true`, `null`).
pub fn coerce_input(data: &serde_json::Map<String, serde_json::Value>) -> HashMap<String, String> {
    data.iter()
        .map(|(key, value)| {
            let text = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), text)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
