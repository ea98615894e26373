use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// Maximum length of titles and objective texts, in Unicode characters.
pub const MAX_TEXT_LEN: usize = 500;

/// Serde helper for PATCH semantics on nullable fields.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Validate a trimmed text field (1-500 Unicode characters).
pub fn validate_text(field: &str, value: &str) -> Result<(), AppError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > MAX_TEXT_LEN {
        return Err(AppError::Validation(format!(
            "{field} must be 1-{MAX_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

/// Body of the PATCH endpoints that only toggle completion.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CompletionUpdate {
    pub completed: bool,
}

/// Encode chapter titles for a JSONB column.
pub fn chapters_to_json(chapters: Vec<String>) -> serde_json::Value {
    serde_json::Value::from(chapters)
}

/// Decode chapter titles from a JSONB column; anything but a string array is empty.
pub fn chapters_from_json(value: serde_json::Value) -> Vec<String> {
    serde_json::from_value(value).unwrap_or_default()
}
