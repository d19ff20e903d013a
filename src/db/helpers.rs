//! Identifier checks for statements built from tool input.

use crate::db::{DbError, DbResult};

/// Longest identifier PostgreSQL keeps without truncation (NAMEDATALEN - 1).
const MAX_IDENTIFIER_LEN: usize = 63;

/// Validate a plain or schema-qualified table name before it is spliced into
/// SQL text.
///
/// Each dot-separated part must match `[A-Za-z_][A-Za-z0-9_$]*`. Accepted
/// names are returned unchanged (unquoted, so PostgreSQL's case folding still
/// applies); anything else is rejected rather than escaped.
pub fn validate_identifier(name: &str) -> DbResult<&str> {
    let invalid = || DbError::InvalidIdentifier {
        identifier: name.to_string(),
    };

    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() > 2 {
        return Err(invalid());
    }

    for part in parts {
        let mut chars = part.chars();
        let starts_ok = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
        if !starts_ok || !rest_ok || part.len() > MAX_IDENTIFIER_LEN {
            return Err(invalid());
        }
    }

    Ok(name)
}
