//! Coverage admin service implementation.

use crate::audit::{publish_best_effort, AuditEvent, AuditPublisher};
use crate::cache::{cache_keys, CacheInterface};
use crate::coverage_admin::CoverageAdminService;
use crate::dto::{CreateCoverageRequest, UpdateCoverageRequest};
use crate::retry::RetryPolicy;
use async_trait::async_trait;
use serde_json::json;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info, warn};
use veris_core::{Coverage, CoverageId, MemberId, ValidateExt, VerisError, VerisResult};
use veris_repository::{CoverageFilter, CoverageRepository};

/// Coverage write path with member-scoped cache invalidation.
#[derive(Component)]
#[shaku(interface = CoverageAdminService)]
pub struct CoverageAdminServiceImpl {
    #[shaku(inject)]
    coverages: Arc<dyn CoverageRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(inject)]
    audit: Arc<dyn AuditPublisher>,
    #[shaku(default)]
    retry: RetryPolicy,
}

impl CoverageAdminServiceImpl {
    /// Creates a new coverage admin service.
    #[must_use]
    pub fn new(
        coverages: Arc<dyn CoverageRepository>,
        cache: Arc<dyn CacheInterface>,
        audit: Arc<dyn AuditPublisher>,
    ) -> Self {
        Self {
            coverages,
            cache,
            audit,
            retry: RetryPolicy::default(),
        }
    }

    /// Drops every cached entry derived from the member's coverage data,
    /// plus entries keyed by the coverage itself. A cache failure here is
    /// logged but does not fail the mutation; entries then age out by TTL.
    async fn invalidate(&self, member_id: &MemberId, coverage_id: CoverageId) {
        for pattern in [
            cache_keys::member_invalidation_pattern(member_id),
            cache_keys::coverage_invalidation_pattern(coverage_id),
        ] {
            match self.cache.delete_pattern(&pattern).await {
                Ok(count) => debug!("Invalidated {} cache entries for '{}'", count, pattern),
                Err(e) => warn!("Cache invalidation failed for '{}': {}", pattern, e),
            }
        }
    }

    async fn audit_event(&self, event_type: &str, coverage: &Coverage) {
        let event = AuditEvent::new(
            event_type,
            "system",
            "",
            json!({
                "coverage_id": coverage.id,
                "member_id": coverage.member_id,
                "payer_id": coverage.payer_id,
                "status": coverage.status,
            }),
        );
        publish_best_effort(self.audit.as_ref(), &self.retry, event).await;
    }
}

#[async_trait]
impl CoverageAdminService for CoverageAdminServiceImpl {
    async fn create_coverage(&self, request: CreateCoverageRequest) -> VerisResult<Coverage> {
        request.validate_request()?;
        debug!("Creating coverage for member {}", request.member_id);

        let coverage = request.into_coverage();
        let saved = self.coverages.insert(&coverage).await?;

        self.invalidate(&saved.member_id, saved.id).await;
        self.audit_event("coverage.create", &saved).await;

        info!("Coverage {} created for member {}", saved.id, saved.member_id);
        Ok(saved)
    }

    async fn get_coverage(&self, id: CoverageId) -> VerisResult<Coverage> {
        self.coverages
            .find_by_id(id)
            .await?
            .ok_or_else(|| VerisError::not_found("Coverage", id))
    }

    async fn search_coverage(&self, filter: CoverageFilter) -> VerisResult<Vec<Coverage>> {
        self.coverages.search(filter).await
    }

    async fn update_coverage(
        &self,
        id: CoverageId,
        request: UpdateCoverageRequest,
    ) -> VerisResult<Coverage> {
        debug!("Updating coverage {}", id);

        let mut coverage = self
            .coverages
            .find_by_id(id)
            .await?
            .ok_or_else(|| VerisError::not_found("Coverage", id))?;

        request.apply_to(&mut coverage);
        let updated = self.coverages.update(&coverage).await?;

        self.invalidate(&updated.member_id, id).await;
        self.audit_event("coverage.update", &updated).await;

        info!("Coverage {} updated", id);
        Ok(updated)
    }

    async fn delete_coverage(&self, id: CoverageId) -> VerisResult<()> {
        debug!("Deleting coverage {}", id);

        let coverage = self
            .coverages
            .find_by_id(id)
            .await?
            .ok_or_else(|| VerisError::not_found("Coverage", id))?;

        let deleted = self.coverages.soft_delete(id).await?;
        if !deleted {
            return Err(VerisError::not_found("Coverage", id));
        }

        self.invalidate(&coverage.member_id, id).await;
        self.audit_event("coverage.delete", &coverage).await;

        info!("Coverage {} soft-deleted", id);
        Ok(())
    }
}

impl std::fmt::Debug for CoverageAdminServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoverageAdminServiceImpl").finish_non_exhaustive()
    }
}
