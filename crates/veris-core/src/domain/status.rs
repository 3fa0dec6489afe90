//! Status and type value objects for members and coverages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coverage lifecycle status, mirroring the FHIR Coverage status codes
/// plus the soft-delete marker used by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CoverageStatus {
    /// Coverage is in effect (subject to the effective/expiration window).
    Active,
    /// Coverage has been cancelled by the payer or member.
    Cancelled,
    /// Coverage has been drafted but is not yet in effect.
    #[default]
    Draft,
    /// Coverage was recorded in error.
    EnteredInError,
    /// Coverage has been soft-deleted.
    Deleted,
}

impl CoverageStatus {
    /// Checks whether the status alone permits the coverage to be in force.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// All possible statuses.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Active,
            Self::Cancelled,
            Self::Draft,
            Self::EnteredInError,
            Self::Deleted,
        ]
    }

    /// Parses a status from its wire/store representation. Unknown values
    /// fall back to `Draft`, the most conservative state.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "active" => Self::Active,
            "cancelled" => Self::Cancelled,
            "entered-in-error" => Self::EnteredInError,
            "deleted" => Self::Deleted,
            _ => Self::Draft,
        }
    }
}

impl fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Draft => write!(f, "draft"),
            Self::EnteredInError => write!(f, "entered-in-error"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

/// Coverage product type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CoverageType {
    #[default]
    Medical,
    Dental,
    Vision,
    Pharmacy,
    Other,
}

impl CoverageType {
    /// The service category this coverage type maps to in benefit and
    /// limitation projections.
    #[must_use]
    pub const fn as_category(&self) -> &'static str {
        match self {
            Self::Medical => "medical",
            Self::Dental => "dental",
            Self::Vision => "vision",
            Self::Pharmacy => "pharmacy",
            Self::Other => "other",
        }
    }

    /// Parses a coverage type from its store representation.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "medical" => Self::Medical,
            "dental" => Self::Dental,
            "vision" => Self::Vision,
            "pharmacy" => Self::Pharmacy,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for CoverageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Medical => write!(f, "medical"),
            Self::Dental => write!(f, "dental"),
            Self::Vision => write!(f, "vision"),
            Self::Pharmacy => write!(f, "pharmacy"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Member enrollment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    #[default]
    Active,
    Inactive,
}

impl MemberStatus {
    /// Checks if the member is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Parses a member status from its store representation.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "active" => Self::Active,
            _ => Self::Inactive,
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_status_serde_kebab_case() {
        let json = serde_json::to_string(&CoverageStatus::EnteredInError).unwrap();
        assert_eq!(json, "\"entered-in-error\"");
        let parsed: CoverageStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, CoverageStatus::Cancelled);
    }

    #[test]
    fn test_coverage_status_parse_roundtrip() {
        for status in CoverageStatus::all() {
            assert_eq!(CoverageStatus::parse(&status.to_string()), status);
        }
    }

    #[test]
    fn test_unknown_status_is_draft() {
        assert_eq!(CoverageStatus::parse("pending"), CoverageStatus::Draft);
    }

    #[test]
    fn test_only_active_permits_in_force() {
        for status in CoverageStatus::all() {
            assert_eq!(status.is_active(), status == CoverageStatus::Active);
        }
    }

    #[test]
    fn test_member_status_parse() {
        assert_eq!(MemberStatus::parse("active"), MemberStatus::Active);
        assert_eq!(MemberStatus::parse("terminated"), MemberStatus::Inactive);
    }
}
