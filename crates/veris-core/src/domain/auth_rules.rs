//! Prior-authorization rule sets.
//!
//! The rule schema is genuinely open-ended (each payer ships its own
//! shape), so the document is kept opaque and interpreted lazily at the
//! point of use. The matching policy implemented here is a placeholder:
//! a requested service code requires authorization when it appears as a
//! rule entry. Real rule evaluation is owned by an external engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An opaque per-coverage prior-authorization rule document.
///
/// Two shapes are recognized:
/// - an object keyed by service code, where a non-null, non-false value
///   marks the code as requiring authorization:
///   `{"99245": true, "99244": {"reason": "specialist consult"}}`
/// - an object carrying a `codes` array: `{"codes": ["99245", "99244"]}`
///
/// Anything else (including an absent or malformed document) matches no
/// codes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthRuleSet(pub Value);

impl AuthRuleSet {
    /// Creates an empty rule set that matches nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self(Value::Null)
    }

    /// Creates a rule set from a raw JSON document.
    #[must_use]
    pub const fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Checks whether a single service code matches a rule entry.
    #[must_use]
    pub fn requires_auth(&self, code: &str) -> bool {
        match &self.0 {
            Value::Object(map) => {
                if let Some(Value::Array(codes)) = map.get("codes") {
                    return codes.iter().any(|c| c.as_str() == Some(code));
                }
                match map.get(code) {
                    None | Some(Value::Null) | Some(Value::Bool(false)) => false,
                    Some(_) => true,
                }
            }
            _ => false,
        }
    }

    /// Checks whether the document carries any rule entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Object(map) => map.is_empty(),
            _ => true,
        }
    }
}
