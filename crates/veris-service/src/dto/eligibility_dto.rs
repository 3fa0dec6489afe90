//! Eligibility check DTOs.
//!
//! Dates at the response's top level are `YYYY-MM-DD` strings (empty when
//! unset) to match the established wire contract of the service.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use veris_core::RequestId;

/// An eligibility check request. Ephemeral — constructed per call, never
/// persisted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EligibilityRequest {
    /// Caller-supplied request ID; generated when absent.
    #[serde(default)]
    pub request_id: Option<RequestId>,

    /// Member national identifier.
    #[validate(length(min = 1, message = "Member ID is required"))]
    pub member_id: String,

    /// Provider identifier.
    #[validate(length(min = 1, message = "Provider ID is required"))]
    pub provider_id: String,

    /// Date the service is (to be) rendered.
    pub service_date: NaiveDate,

    /// Requested service codes, if known up front.
    #[serde(default)]
    pub service_codes: Vec<String>,

    /// Identity of the requesting party, for the audit trail.
    #[serde(default)]
    pub requested_by: Option<String>,

    /// Stamped by the engine on receipt.
    #[serde(default)]
    pub request_time: Option<DateTime<Utc>>,
}

/// Top-level coverage disposition of an eligibility response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageDisposition {
    /// At least one coverage is in force.
    Active,
    /// The member is unknown to the system.
    MemberNotFound,
    /// The member exists but holds no in-force coverage for the date.
    NoCoverage,
}

/// The response to an eligibility check.
///
/// `eligible` is true iff at least one coverage is in force for the
/// request's service date. Negative outcomes are successful responses
/// with informational messages, never errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityResponse {
    pub request_id: RequestId,
    pub member_id: String,
    pub eligible: bool,
    pub coverage_status: CoverageDisposition,
    /// Effective date of the primary (most recently effective) in-force
    /// coverage; empty when none.
    #[serde(default)]
    pub effective_date: String,
    /// Expiration date of the primary coverage; empty when open-ended.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub expiration_date: String,
    pub benefits: Vec<BenefitInformation>,
    pub limitations: Vec<CoverageLimitation>,
    pub messages: Vec<ResponseMessage>,
    pub response_time: DateTime<Utc>,
    pub cache_hit: bool,
}

/// Coverage level a benefit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CoverageLevel {
    #[default]
    Individual,
    Family,
}

/// Benefit projection for one service category. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitInformation {
    pub service_category: String,
    pub in_network: bool,
    pub copay_amount: f64,
    pub coinsurance_rate: f64,
    pub deductible_amount: f64,
    pub deductible_met: bool,
    pub remaining_deductible: f64,
    pub out_of_pocket_max: f64,
    pub remaining_oop_max: f64,
    pub prior_auth_required: bool,
    pub coverage_level: CoverageLevel,
}

/// Kind of benefit limitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitationType {
    AnnualMaximum,
    LifetimeMaximum,
    VisitLimit,
}

/// Limitation projection for one service category. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageLimitation {
    pub service_category: String,
    pub limitation_type: LimitationType,
    pub limit_value: f64,
    pub used_amount: f64,
    pub remaining_amount: f64,
    pub period: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reset_date: String,
}

/// Message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Information,
    Warning,
    Error,
}

/// Structured informational message attached to a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub details: String,
}

impl ResponseMessage {
    /// Creates an informational message.
    #[must_use]
    pub fn information(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Information,
            code: code.into(),
            message: message.into(),
            details: String::new(),
        }
    }

    /// Creates a warning message.
    #[must_use]
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Warning,
            code: code.into(),
            message: message.into(),
            details: String::new(),
        }
    }

    /// Creates an error message.
    #[must_use]
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            code: code.into(),
            message: message.into(),
            details: String::new(),
        }
    }
}

/// Message codes used by the engine.
pub mod message_codes {
    /// Member is unknown to the system.
    pub const MEMBER_NOT_FOUND: &str = "MEMBER_NOT_FOUND";
    /// No coverage in force for the requested date.
    pub const NO_ACTIVE_COVERAGE: &str = "NO_ACTIVE_COVERAGE";
    /// A served coverage carries a non-active status (stale data).
    pub const COVERAGE_STATUS_WARNING: &str = "COVERAGE_STATUS_WARNING";
}

#[cfg(test)]
mod tests {
    use super::*;
    use veris_core::ValidateExt;

    fn request() -> EligibilityRequest {
        EligibilityRequest {
            request_id: None,
            member_id: "M1".to_string(),
            provider_id: "P1".to_string(),
            service_date: NaiveDate::from_ymd_opt(2025, 8, 13).unwrap(),
            service_codes: vec![],
            requested_by: None,
            request_time: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(request().validate_request().is_ok());
    }

    #[test]
    fn test_missing_member_id_fails_validation() {
        let mut req = request();
        req.member_id = String::new();
        let err = req.validate_request().unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_request_deserializes_with_minimal_body() {
        let req: EligibilityRequest = serde_json::from_str(
            r#"{"member_id": "M1", "provider_id": "P1", "service_date": "2025-08-13"}"#,
        )
        .unwrap();
        assert!(req.request_id.is_none());
        assert!(req.service_codes.is_empty());
    }

    #[test]
    fn test_empty_expiration_date_is_omitted() {
        let response = EligibilityResponse {
            request_id: veris_core::RequestId::new(),
            member_id: "M1".to_string(),
            eligible: true,
            coverage_status: CoverageDisposition::Active,
            effective_date: "2025-01-01".to_string(),
            expiration_date: String::new(),
            benefits: vec![],
            limitations: vec![],
            messages: vec![],
            response_time: Utc::now(),
            cache_hit: false,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("expiration_date"));
        assert!(json.contains("\"coverage_status\":\"active\""));
    }

    #[test]
    fn test_message_type_field_name() {
        let msg = ResponseMessage::information(message_codes::NO_ACTIVE_COVERAGE, "none");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"information\""));
    }
}
