//! Coverage entity and the in-force window invariant.

use super::{AuthRuleSet, CoverageStatus, CoverageType};
use crate::{CoverageId, MemberId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An insurance coverage belonging to exactly one member.
///
/// A member may hold several coverages that are simultaneously in force
/// (coordination of benefits); callers order them by effective date,
/// newest first, and treat the first as the primary coverage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coverage {
    /// Unique coverage ID.
    pub id: CoverageId,

    /// Owning member's national identifier.
    pub member_id: MemberId,

    /// Payer organization ID.
    pub payer_id: String,

    /// Policy number assigned by the payer.
    pub policy_number: String,

    /// Employer/group number, when group-sponsored.
    #[serde(default)]
    pub group_number: String,

    /// Lifecycle status.
    pub status: CoverageStatus,

    /// Product type.
    #[serde(rename = "type")]
    pub kind: CoverageType,

    /// First date the coverage is in effect.
    pub effective_date: NaiveDate,

    /// Last date the coverage is in effect; open-ended when absent.
    pub expiration_date: Option<NaiveDate>,

    /// Payer-specific benefit schedule; opaque, projected at point of use.
    #[serde(default)]
    pub benefit_details: Value,

    /// Payer-specific cost-sharing terms; opaque, projected at point of use.
    #[serde(default)]
    pub cost_sharing: Value,

    /// Provider network identifier.
    #[serde(default)]
    pub network: String,

    /// Prior-authorization rule document.
    #[serde(default)]
    pub prior_auth_rules: AuthRuleSet,

    /// Benefit limitation terms; opaque, projected at point of use.
    #[serde(default)]
    pub limitations: Value,

    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Row update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Coverage {
    /// Creates a new draft coverage for a member.
    #[must_use]
    pub fn new(
        member_id: MemberId,
        payer_id: impl Into<String>,
        policy_number: impl Into<String>,
        effective_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: CoverageId::new(),
            member_id,
            payer_id: payer_id.into(),
            policy_number: policy_number.into(),
            group_number: String::new(),
            status: CoverageStatus::Draft,
            kind: CoverageType::Medical,
            effective_date,
            expiration_date: None,
            benefit_details: Value::Null,
            cost_sharing: Value::Null,
            network: String::new(),
            prior_auth_rules: AuthRuleSet::empty(),
            limitations: Value::Null,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks whether the coverage is in force on a service date.
    ///
    /// In force iff the status is active and the effective/expiration
    /// window contains the date (an absent expiration is open-ended).
    #[must_use]
    pub fn is_in_force(&self, service_date: NaiveDate) -> bool {
        self.status.is_active()
            && self.effective_date <= service_date
            && self.expiration_date.map_or(true, |exp| exp >= service_date)
    }

    /// Marks the coverage active.
    pub fn activate(&mut self) {
        self.status = CoverageStatus::Active;
        self.updated_at = Utc::now();
    }

    /// Soft-deletes the coverage.
    pub fn mark_deleted(&mut self) {
        self.status = CoverageStatus::Deleted;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn coverage(status: CoverageStatus, effective: NaiveDate, expiration: Option<NaiveDate>) -> Coverage {
        let mut c = Coverage::new(MemberId::new("M1"), "PAYER-1", "POL-1", effective);
        c.status = status;
        c.expiration_date = expiration;
        c
    }

    #[test]
    fn test_open_ended_coverage_in_force() {
        let c = coverage(
            CoverageStatus::Active,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            None,
        );
        assert!(c.is_in_force(NaiveDate::from_ymd_opt(2025, 8, 13).unwrap()));
    }

    #[test]
    fn test_future_effective_date_not_in_force() {
        let c = coverage(
            CoverageStatus::Active,
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            None,
        );
        assert!(!c.is_in_force(NaiveDate::from_ymd_opt(2025, 8, 13).unwrap()));
    }

    #[test]
    fn test_expiration_boundary_is_inclusive() {
        let d = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let c = coverage(
            CoverageStatus::Active,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            Some(d),
        );
        assert!(c.is_in_force(d));
        assert!(!c.is_in_force(d.succ_opt().unwrap()));
    }

    #[test]
    fn test_inactive_statuses_never_in_force() {
        let effective = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let service = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        for status in CoverageStatus::all() {
            let c = coverage(status, effective, None);
            assert_eq!(c.is_in_force(service), status == CoverageStatus::Active);
        }
    }

    fn arb_date() -> impl Strategy<Value = NaiveDate> {
        (2020i32..2030, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn arb_status() -> impl Strategy<Value = CoverageStatus> {
        prop::sample::select(CoverageStatus::all().to_vec())
    }

    proptest! {
        #[test]
        fn prop_in_force_matches_window_definition(
            status in arb_status(),
            effective in arb_date(),
            expiration in prop::option::of(arb_date()),
            service in arb_date(),
        ) {
            let c = coverage(status, effective, expiration);
            let expected = status == CoverageStatus::Active
                && effective <= service
                && expiration.map_or(true, |exp| exp >= service);
            prop_assert_eq!(c.is_in_force(service), expected);
        }
    }
}
