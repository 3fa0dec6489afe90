//! Member entity.

use super::MemberStatus;
use crate::MemberId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A plan member (patient). Owned by the coverage store; read-only to the
/// eligibility engine — it is fetched once per request and never mutated.
///
/// Name, contact, and address follow FHIR shapes that vary by source
/// system, so they stay opaque JSON documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Internal row ID.
    pub id: Uuid,

    /// National identifier; the key used by all inbound lookups.
    pub identifier: MemberId,

    /// FHIR HumanName document.
    #[serde(default)]
    pub name: Value,

    /// Date of birth.
    pub birth_date: NaiveDate,

    /// Administrative gender.
    pub gender: String,

    /// FHIR ContactPoint document.
    #[serde(default)]
    pub contact_info: Value,

    /// FHIR Address document.
    #[serde(default)]
    pub address: Value,

    /// Enrollment status.
    pub status: MemberStatus,

    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Row update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Creates a new active member with the given identifier.
    #[must_use]
    pub fn new(identifier: MemberId, birth_date: NaiveDate, gender: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            identifier,
            name: Value::Null,
            birth_date,
            gender: gender.into(),
            contact_info: Value::Null,
            address: Value::Null,
            status: MemberStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_member_is_active() {
        let member = Member::new(
            MemberId::new("1234567890"),
            NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
            "female",
        );
        assert!(member.status.is_active());
        assert_eq!(member.identifier.as_str(), "1234567890");
    }
}
