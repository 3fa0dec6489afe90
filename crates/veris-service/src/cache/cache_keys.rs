//! Cache key generators for consistent key naming.
//!
//! Three independent namespaces that never collide: eligibility
//! decisions, coverage listings, and benefit listings. The member ID is
//! always the second segment, which is what makes the member-scoped
//! invalidation pattern work across all three.

use chrono::NaiveDate;
use veris_core::{CoverageId, MemberId};

/// Key for a cached eligibility decision.
#[must_use]
pub fn eligibility(member_id: &MemberId, provider_id: &str, service_date: NaiveDate) -> String {
    format!("eligibility:{}:{}:{}", member_id, provider_id, service_date)
}

/// Key for a cached coverage listing.
#[must_use]
pub fn coverage_listing(member_id: &MemberId, effective_date: NaiveDate) -> String {
    format!("coverage:{}:{}", member_id, effective_date)
}

/// Key for a cached benefit listing. The category segment is empty for
/// the unfiltered listing.
#[must_use]
pub fn benefits(member_id: &MemberId, service_category: &str) -> String {
    format!("benefits:{}:{}", member_id, service_category)
}

/// Pattern to invalidate every cached entry for one member, across all
/// three namespaces.
#[must_use]
pub fn member_invalidation_pattern(member_id: &MemberId) -> String {
    format!("*:{}:*", member_id)
}

/// Pattern to invalidate entries keyed by one coverage ID.
#[must_use]
pub fn coverage_invalidation_pattern(coverage_id: CoverageId) -> String {
    format!("*:{}", coverage_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_eligibility_key() {
        let key = eligibility(&MemberId::new("M1"), "P1", date(2025, 8, 13));
        assert_eq!(key, "eligibility:M1:P1:2025-08-13");
    }

    #[test]
    fn test_coverage_listing_key() {
        let key = coverage_listing(&MemberId::new("M1"), date(2025, 8, 13));
        assert_eq!(key, "coverage:M1:2025-08-13");
    }

    #[test]
    fn test_benefits_key() {
        assert_eq!(benefits(&MemberId::new("M1"), "medical"), "benefits:M1:medical");
        assert_eq!(benefits(&MemberId::new("M1"), ""), "benefits:M1:");
    }

    #[test]
    fn test_namespaces_never_collide() {
        let member = MemberId::new("M1");
        let d = date(2025, 8, 13);
        let keys = [
            eligibility(&member, "P1", d),
            coverage_listing(&member, d),
            benefits(&member, "medical"),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_member_pattern_covers_all_namespaces() {
        // Glob "*:M1:*" must match keys in all three namespaces.
        let pattern = member_invalidation_pattern(&MemberId::new("M1"));
        assert_eq!(pattern, "*:M1:*");
        for key in [
            "eligibility:M1:P1:2025-08-13",
            "coverage:M1:2025-08-13",
            "benefits:M1:medical",
            "benefits:M1:",
        ] {
            let mid = key.find(":M1:").is_some();
            assert!(mid, "pattern should cover {}", key);
        }
    }
}
