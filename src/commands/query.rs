use crate::error::ValidationError;

/// Leading keywords accepted by the editor, compared case-insensitively.
pub const VALID_START_KEYWORDS: [&str; 8] = [
    "SELECT", "INSERT", "UPDATE", "DELETE", "CREATE", "ALTER", "DROP", "SHOW",
];

/// Check query text before it is resolved.
///
/// Only the leading keyword is inspected, so `SELECTED` passes the same way
/// `SELECT` does.
pub fn validate_query(sql: &str) -> Result<(), ValidationError> {
    let trimmed = sql.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    let upper = trimmed.to_uppercase();
    if !VALID_START_KEYWORDS
        .iter()
        .any(|keyword| upper.starts_with(keyword))
    {
        return Err(ValidationError::MissingKeyword);
    }

    Ok(())
}
