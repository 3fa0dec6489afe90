//! Coverage verification DTOs.
//!
//! Verification results are advisory, time-boxed cost/auth estimates:
//! they carry a `valid_until` horizon and are always recomputed rather
//! than cached with the business TTL.

use super::ResponseMessage;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use veris_core::VerificationId;

/// Request to verify coverage for specific services.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CoverageVerificationRequest {
    /// Date the services are (to be) rendered.
    pub service_date: NaiveDate,

    /// Service codes to verify; at least one.
    #[validate(length(min = 1, message = "At least one service code is required"))]
    pub service_codes: Vec<String>,

    /// Rendering provider.
    #[validate(length(min = 1, message = "Provider ID is required"))]
    pub provider_id: String,

    /// Place-of-service code.
    #[serde(default)]
    pub place_of_service: Option<String>,
}

/// Overall verification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Covered,
    NotCovered,
    Partial,
}

/// Per-service verification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Covered,
    NotCovered,
    RequiresAuth,
}

/// Verification result for one service code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceVerification {
    pub service_code: String,
    pub status: ServiceStatus,
    /// Fraction of the allowed amount the plan covers.
    pub coverage_level: f64,
    pub estimated_cost: f64,
    pub patient_cost: f64,
    pub auth_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reason_codes: Vec<String>,
}

/// The response to a coverage verification request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageVerificationResponse {
    pub member_id: String,
    pub verification_id: VerificationId,
    pub service_date: NaiveDate,
    pub services: Vec<ServiceVerification>,
    pub overall_status: VerificationStatus,
    /// OR across all per-service auth flags.
    pub auth_required: bool,
    pub messages: Vec<ResponseMessage>,
    /// Advisory horizon; estimates should not be relied on past it.
    pub valid_until: DateTime<Utc>,
}
