//! PostgreSQL repository implementations.

mod coverage_repository;
mod member_repository;

pub use coverage_repository::PgCoverageRepository;
pub use member_repository::PgMemberRepository;

use serde_json::Value;
use tracing::warn;

/// Leniently decodes a stored JSON blob column.
///
/// Malformed documents are logged at warn level and substituted with an
/// empty default so a single bad blob never fails the whole row. The
/// corrupted field heals on the next write.
pub(crate) fn decode_blob(field: &'static str, raw: Option<String>) -> Value {
    match raw {
        None => Value::Null,
        Some(s) if s.trim().is_empty() => Value::Null,
        Some(s) => match serde_json::from_str(&s) {
            Ok(value) => value,
            Err(e) => {
                warn!(field, error = %e, "Malformed stored JSON blob; substituting empty document");
                Value::Null
            }
        },
    }
}

/// Encodes an opaque blob for storage; `Null` becomes an absent column.
pub(crate) fn encode_blob(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
