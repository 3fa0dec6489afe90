//! Eligibility service trait definition.

use crate::dto::{
    BenefitInformation, CoverageVerificationRequest, CoverageVerificationResponse,
    EligibilityRequest, EligibilityResponse,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use veris_core::{Coverage, Interface, MemberId, VerisResult};

/// The eligibility read path.
///
/// All lookups are cache-aside over the coverage store. A member or
/// coverage being absent is a successful negative outcome, never an
/// error; errors are reserved for the store itself being unreachable and
/// for invalid requests.
#[async_trait]
pub trait EligibilityService: Interface + Send + Sync {
    /// Determines whether a member is eligible for services on a date.
    async fn check_eligibility(
        &self,
        request: EligibilityRequest,
    ) -> VerisResult<EligibilityResponse>;

    /// Lists the coverages in force for a member. The date defaults to
    /// today when not given.
    async fn member_coverage(
        &self,
        member_id: &MemberId,
        on: Option<NaiveDate>,
    ) -> VerisResult<Vec<Coverage>>;

    /// Verifies coverage for specific service codes, including the
    /// prior-authorization predicate.
    async fn verify_coverage(
        &self,
        member_id: &MemberId,
        request: CoverageVerificationRequest,
    ) -> VerisResult<CoverageVerificationResponse>;

    /// Lists benefit projections for a member, optionally scoped to one
    /// service category.
    async fn member_benefits(
        &self,
        member_id: &MemberId,
        category: Option<&str>,
    ) -> VerisResult<Vec<BenefitInformation>>;
}
