//! Eligibility service implementation.

use crate::audit::{publish_best_effort, AuditEvent, AuditPublisher};
use crate::benefits::{self, NetworkDirectory};
use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::dto::{
    message_codes, CoverageDisposition, CoverageVerificationRequest, CoverageVerificationResponse,
    EligibilityRequest, EligibilityResponse, ResponseMessage, ServiceStatus, ServiceVerification,
    VerificationStatus,
};
use crate::eligibility_service::EligibilityService;
use crate::metrics::EligibilityMetrics;
use crate::retry::RetryPolicy;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde_json::json;
use shaku::Component;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use veris_config::BusinessConfig;
use veris_core::{Coverage, MemberId, RequestId, ValidateExt, VerificationId, VerisError, VerisResult};
use veris_repository::{CoverageRepository, MemberRepository};

use crate::dto::BenefitInformation;

const fn disposition_label(disposition: CoverageDisposition) -> &'static str {
    match disposition {
        CoverageDisposition::Active => "active",
        CoverageDisposition::MemberNotFound => "member_not_found",
        CoverageDisposition::NoCoverage => "no_coverage",
    }
}

/// Cache-aside eligibility engine over the coverage store.
#[derive(Component)]
#[shaku(interface = EligibilityService)]
pub struct EligibilityServiceImpl {
    #[shaku(inject)]
    members: Arc<dyn MemberRepository>,
    #[shaku(inject)]
    coverages: Arc<dyn CoverageRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(inject)]
    audit: Arc<dyn AuditPublisher>,
    #[shaku(default)]
    business: BusinessConfig,
    #[shaku(default)]
    networks: NetworkDirectory,
    #[shaku(default)]
    retry: RetryPolicy,
}

impl EligibilityServiceImpl {
    /// Creates a new eligibility service. The network directory is built
    /// from the business configuration.
    #[must_use]
    pub fn new(
        members: Arc<dyn MemberRepository>,
        coverages: Arc<dyn CoverageRepository>,
        cache: Arc<dyn CacheInterface>,
        audit: Arc<dyn AuditPublisher>,
        business: BusinessConfig,
    ) -> Self {
        let networks = NetworkDirectory::new(business.networks.clone());
        Self {
            members,
            coverages,
            cache,
            audit,
            business,
            networks,
            retry: RetryPolicy::default(),
        }
    }

    /// Cache read that degrades to a miss when the cache is unreachable.
    async fn cached<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        match self.cache.get::<T>(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Cache read failed for key '{}', degrading to store: {}", key, e);
                None
            }
        }
    }

    /// Cache write whose failure is logged and swallowed.
    async fn store_in_cache<T: serde::Serialize + Send + Sync>(&self, key: &str, value: &T) {
        if let Err(e) = self.cache.set(key, value, self.business.cache_ttl()).await {
            warn!("Cache write failed for key '{}': {}", key, e);
        }
    }

    fn negative_response(
        request_id: RequestId,
        member_id: &MemberId,
        disposition: CoverageDisposition,
        message: ResponseMessage,
    ) -> EligibilityResponse {
        EligibilityResponse {
            request_id,
            member_id: member_id.to_string(),
            eligible: false,
            coverage_status: disposition,
            effective_date: String::new(),
            expiration_date: String::new(),
            benefits: vec![],
            limitations: vec![],
            messages: vec![message],
            response_time: Utc::now(),
            cache_hit: false,
        }
    }

    async fn audit_check(
        &self,
        request: &EligibilityRequest,
        response: &EligibilityResponse,
        duration: std::time::Duration,
    ) {
        let event = AuditEvent::new(
            "eligibility.check",
            request.requested_by.as_deref().unwrap_or("system"),
            "",
            json!({
                "request_id": response.request_id,
                "member_id": response.member_id,
                "provider_id": request.provider_id,
                "service_date": request.service_date,
                "request_time": request.request_time,
                "eligible": response.eligible,
                "coverage_status": disposition_label(response.coverage_status),
                "cache_hit": response.cache_hit,
                "duration_ms": duration.as_millis() as u64,
            }),
        );
        publish_best_effort(self.audit.as_ref(), &self.retry, event).await;
    }

    /// Soft SLA accounting. The response has already been produced; a
    /// breach is logged and counted, never turned into a failure.
    fn finish(&self, started: Instant, response: &EligibilityResponse) {
        let elapsed = started.elapsed();
        let sla = self.business.max_response_time();
        EligibilityMetrics::request_duration(elapsed, sla);
        EligibilityMetrics::check(disposition_label(response.coverage_status), response.cache_hit);
        if elapsed > sla {
            warn!(
                "Eligibility check for member {} took {:?}, exceeding the {:?} SLA",
                response.member_id, elapsed, sla
            );
        }
    }

    /// The coverages in force for a member on a date, cache-aside.
    async fn in_force_coverages(
        &self,
        member_id: &MemberId,
        on: NaiveDate,
    ) -> VerisResult<Vec<Coverage>> {
        let cache_key = cache_keys::coverage_listing(member_id, on);

        if let Some(cached) = self.cached::<Vec<Coverage>>(&cache_key).await {
            debug!("Cache hit for coverage listing: {}", member_id);
            return Ok(cached);
        }

        EligibilityMetrics::store_query("find_in_force");
        let coverages = self.coverages.find_in_force(member_id, on).await?;
        self.store_in_cache(&cache_key, &coverages).await;
        Ok(coverages)
    }
}

#[async_trait]
impl EligibilityService for EligibilityServiceImpl {
    async fn check_eligibility(
        &self,
        mut request: EligibilityRequest,
    ) -> VerisResult<EligibilityResponse> {
        let started = Instant::now();
        request.validate_request()?;

        let request_id = request.request_id.unwrap_or_default();
        request.request_time = Some(Utc::now());
        let member_id = MemberId::new(request.member_id.clone());
        debug!(
            "Checking eligibility for member {} with provider {} on {}",
            member_id, request.provider_id, request.service_date
        );

        let cache_key =
            cache_keys::eligibility(&member_id, &request.provider_id, request.service_date);

        // Cached decisions are served as-is apart from the per-request
        // envelope. Hits are audited and duration-accounted like misses.
        if let Some(mut cached) = self.cached::<EligibilityResponse>(&cache_key).await {
            debug!("Cache hit for eligibility check: {}", cache_key);
            cached.request_id = request_id;
            cached.response_time = Utc::now();
            cached.cache_hit = true;
            self.audit_check(&request, &cached, started.elapsed()).await;
            self.finish(started, &cached);
            return Ok(cached);
        }

        EligibilityMetrics::store_query("find_member");
        let member = self.members.find_by_identifier(&member_id).await?;
        if member.is_none() {
            let response = Self::negative_response(
                request_id,
                &member_id,
                CoverageDisposition::MemberNotFound,
                ResponseMessage::information(
                    message_codes::MEMBER_NOT_FOUND,
                    "Member not found in the system",
                ),
            );
            self.store_in_cache(&cache_key, &response).await;
            self.audit_check(&request, &response, started.elapsed()).await;
            self.finish(started, &response);
            return Ok(response);
        }

        EligibilityMetrics::store_query("find_in_force");
        let coverages = self
            .coverages
            .find_in_force(&member_id, request.service_date)
            .await?;

        if coverages.is_empty() {
            let response = Self::negative_response(
                request_id,
                &member_id,
                CoverageDisposition::NoCoverage,
                ResponseMessage::information(
                    message_codes::NO_ACTIVE_COVERAGE,
                    "No active coverage found for the service date",
                ),
            );
            self.store_in_cache(&cache_key, &response).await;
            self.audit_check(&request, &response, started.elapsed()).await;
            self.finish(started, &response);
            return Ok(response);
        }

        let mut benefits_info = Vec::with_capacity(coverages.len());
        let mut limitations = Vec::with_capacity(coverages.len());
        let mut messages = Vec::new();

        for coverage in &coverages {
            benefits_info.push(benefits::calculate_benefits(
                coverage,
                &request.service_codes,
                &request.provider_id,
                &self.networks,
            ));
            limitations.push(benefits::calculate_limitations(coverage, request.service_date));

            // The store query filters on status, but a stale row can slip
            // in between write and invalidation. Serve it, flagged.
            if !coverage.status.is_active() {
                messages.push(ResponseMessage::warning(
                    message_codes::COVERAGE_STATUS_WARNING,
                    format!("Coverage {} has status '{}'", coverage.id, coverage.status),
                ));
            }
        }

        // Primary coverage (newest effective date) provides the top-level
        // date projection.
        let primary = &coverages[0];
        let response = EligibilityResponse {
            request_id,
            member_id: member_id.to_string(),
            eligible: true,
            coverage_status: CoverageDisposition::Active,
            effective_date: primary.effective_date.to_string(),
            expiration_date: primary
                .expiration_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            benefits: benefits_info,
            limitations,
            messages,
            response_time: Utc::now(),
            cache_hit: false,
        };

        self.store_in_cache(&cache_key, &response).await;
        self.audit_check(&request, &response, started.elapsed()).await;
        self.finish(started, &response);

        info!(
            "Member {} eligible on {} under {} coverage(s)",
            member_id,
            request.service_date,
            response.benefits.len()
        );
        Ok(response)
    }

    async fn member_coverage(
        &self,
        member_id: &MemberId,
        on: Option<NaiveDate>,
    ) -> VerisResult<Vec<Coverage>> {
        let on = on.unwrap_or_else(|| Utc::now().date_naive());
        debug!("Listing coverage for member {} on {}", member_id, on);
        self.in_force_coverages(member_id, on).await
    }

    async fn verify_coverage(
        &self,
        member_id: &MemberId,
        request: CoverageVerificationRequest,
    ) -> VerisResult<CoverageVerificationResponse> {
        request.validate_request()?;
        debug!(
            "Verifying {} service(s) for member {} on {}",
            request.service_codes.len(),
            member_id,
            request.service_date
        );

        let coverages = self.in_force_coverages(member_id, request.service_date).await?;

        let mut messages = Vec::new();
        let services: Vec<ServiceVerification> = if coverages.is_empty() {
            messages.push(ResponseMessage::information(
                message_codes::NO_ACTIVE_COVERAGE,
                "No active coverage found for the service date",
            ));
            request
                .service_codes
                .iter()
                .map(|code| ServiceVerification {
                    service_code: code.clone(),
                    status: ServiceStatus::NotCovered,
                    coverage_level: 0.0,
                    estimated_cost: 0.0,
                    patient_cost: 0.0,
                    auth_required: false,
                    auth_reference: None,
                    reason_codes: vec![message_codes::NO_ACTIVE_COVERAGE.to_string()],
                })
                .collect()
        } else {
            request
                .service_codes
                .iter()
                .map(|code| benefits::verify_service(code, &coverages))
                .collect()
        };

        let covered = services
            .iter()
            .filter(|s| s.status != ServiceStatus::NotCovered)
            .count();
        let overall_status = if covered == 0 {
            VerificationStatus::NotCovered
        } else if covered < services.len() {
            VerificationStatus::Partial
        } else {
            VerificationStatus::Covered
        };
        let auth_required = services.iter().any(|s| s.auth_required);

        let response = CoverageVerificationResponse {
            member_id: member_id.to_string(),
            verification_id: VerificationId::new(),
            service_date: request.service_date,
            services,
            overall_status,
            auth_required,
            messages,
            valid_until: Utc::now() + chrono::Duration::hours(self.business.verification_valid_hours),
        };

        let event = AuditEvent::new(
            "eligibility.verify",
            "system",
            "",
            json!({
                "verification_id": response.verification_id,
                "member_id": response.member_id,
                "service_date": request.service_date,
                "service_codes": request.service_codes,
                "auth_required": response.auth_required,
            }),
        );
        publish_best_effort(self.audit.as_ref(), &self.retry, event).await;

        Ok(response)
    }

    async fn member_benefits(
        &self,
        member_id: &MemberId,
        category: Option<&str>,
    ) -> VerisResult<Vec<BenefitInformation>> {
        let cache_key = cache_keys::benefits(member_id, category.unwrap_or(""));

        if let Some(cached) = self.cached::<Vec<BenefitInformation>>(&cache_key).await {
            debug!("Cache hit for member benefits: {}", cache_key);
            return Ok(cached);
        }

        EligibilityMetrics::store_query("find_member");
        self.members
            .find_by_identifier(member_id)
            .await?
            .ok_or_else(|| VerisError::not_found("Member", member_id))?;

        EligibilityMetrics::store_query("find_in_force");
        let coverages = self
            .coverages
            .find_in_force(member_id, Utc::now().date_naive())
            .await?;

        let benefits_info: Vec<BenefitInformation> = coverages
            .iter()
            .filter_map(|c| benefits::member_benefit(c, category))
            .collect();

        self.store_in_cache(&cache_key, &benefits_info).await;
        Ok(benefits_info)
    }
}

impl std::fmt::Debug for EligibilityServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EligibilityServiceImpl").finish_non_exhaustive()
    }
}
