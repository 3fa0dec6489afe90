//! Repository trait definitions.

use async_trait::async_trait;
use chrono::NaiveDate;
use veris_core::{Coverage, CoverageId, CoverageStatus, Interface, Member, MemberId, VerisResult};

/// Member repository trait. The eligibility read path only ever looks a
/// member up by national identifier; members are owned elsewhere.
#[async_trait]
pub trait MemberRepository: Interface + Send + Sync {
    /// Finds an active member by national identifier.
    ///
    /// Returns `Ok(None)` when the member is unknown or inactive — a
    /// terminal negative outcome for the caller, not an error.
    async fn find_by_identifier(&self, identifier: &MemberId) -> VerisResult<Option<Member>>;
}

/// Filter for coverage searches.
#[derive(Debug, Clone)]
pub struct CoverageFilter {
    /// Restrict to one member.
    pub member_id: Option<MemberId>,
    /// Restrict to one payer.
    pub payer_id: Option<String>,
    /// Restrict to one lifecycle status.
    pub status: Option<CoverageStatus>,
    /// Restrict to coverages effective on or before this date.
    pub effective_on: Option<NaiveDate>,
    /// Page size (capped by the implementation).
    pub count: i64,
    /// Page offset.
    pub offset: i64,
}

impl Default for CoverageFilter {
    fn default() -> Self {
        Self {
            member_id: None,
            payer_id: None,
            status: None,
            effective_on: None,
            count: 20,
            offset: 0,
        }
    }
}

/// Coverage repository trait.
#[async_trait]
pub trait CoverageRepository: Interface + Send + Sync {
    /// Finds a coverage by ID, excluding soft-deleted rows.
    async fn find_by_id(&self, id: CoverageId) -> VerisResult<Option<Coverage>>;

    /// Finds the coverages in force for a member on a service date,
    /// ordered by effective date descending (primary coverage first).
    async fn find_in_force(
        &self,
        member_id: &MemberId,
        service_date: NaiveDate,
    ) -> VerisResult<Vec<Coverage>>;

    /// Searches coverages with optional filters and pagination.
    async fn search(&self, filter: CoverageFilter) -> VerisResult<Vec<Coverage>>;

    /// Inserts a new coverage row.
    async fn insert(&self, coverage: &Coverage) -> VerisResult<Coverage>;

    /// Updates an existing coverage row.
    async fn update(&self, coverage: &Coverage) -> VerisResult<Coverage>;

    /// Soft-deletes a coverage by setting its status to `deleted`.
    ///
    /// Returns `true` if a row was affected.
    async fn soft_delete(&self, id: CoverageId) -> VerisResult<bool>;
}
