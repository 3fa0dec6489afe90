//! Coverage admin service trait definition.

use crate::dto::{CreateCoverageRequest, UpdateCoverageRequest};
use async_trait::async_trait;
use veris_core::{Coverage, CoverageId, Interface, VerisResult};
use veris_repository::CoverageFilter;

/// The coverage write path.
///
/// Every mutation invalidates the cached entries for the affected member
/// so the read path never serves a decision computed from superseded
/// coverage data past the invalidation.
#[async_trait]
pub trait CoverageAdminService: Interface + Send + Sync {
    /// Creates a coverage record.
    async fn create_coverage(&self, request: CreateCoverageRequest) -> VerisResult<Coverage>;

    /// Gets a coverage by ID. Soft-deleted coverages are not found.
    async fn get_coverage(&self, id: CoverageId) -> VerisResult<Coverage>;

    /// Searches coverages with optional filters and pagination.
    async fn search_coverage(&self, filter: CoverageFilter) -> VerisResult<Vec<Coverage>>;

    /// Updates a coverage record.
    async fn update_coverage(
        &self,
        id: CoverageId,
        request: UpdateCoverageRequest,
    ) -> VerisResult<Coverage>;

    /// Soft-deletes a coverage record.
    async fn delete_coverage(&self, id: CoverageId) -> VerisResult<()>;
}
