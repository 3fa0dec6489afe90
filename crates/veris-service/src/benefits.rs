//! Benefit, limitation, and prior-auth calculations.
//!
//! Everything here is a pure projection of coverage blobs plus business
//! configuration. Nothing is persisted; responses are recomputed on every
//! cache miss.

use crate::dto::{
    BenefitInformation, CoverageLevel, CoverageLimitation, LimitationType, ServiceStatus,
    ServiceVerification,
};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use veris_core::Coverage;

/// Plan coverage fraction assumed for service-level estimates.
const SERVICE_COVERAGE_LEVEL: f64 = 0.80;
/// Estimated allowed amount per service, pending a fee-schedule lookup.
const SERVICE_ESTIMATED_COST: f64 = 150.0;

/// Cost-sharing terms parsed from a coverage's `cost_sharing` blob.
///
/// Every field is individually defaulted so a partial blob still yields a
/// complete projection.
#[derive(Debug, Clone, Deserialize)]
pub struct CostSharingTerms {
    #[serde(default = "default_copay")]
    pub copay_amount: f64,
    #[serde(default = "default_coinsurance")]
    pub coinsurance_rate: f64,
    #[serde(default = "default_deductible")]
    pub deductible_amount: f64,
    #[serde(default)]
    pub deductible_met: bool,
    #[serde(default = "default_deductible")]
    pub remaining_deductible: f64,
    #[serde(default = "default_oop_max")]
    pub out_of_pocket_max: f64,
    #[serde(default = "default_remaining_oop")]
    pub remaining_oop_max: f64,
    #[serde(default)]
    pub coverage_level: CoverageLevel,
}

fn default_copay() -> f64 {
    25.0
}

fn default_coinsurance() -> f64 {
    0.20
}

fn default_deductible() -> f64 {
    500.0
}

fn default_oop_max() -> f64 {
    2000.0
}

fn default_remaining_oop() -> f64 {
    1500.0
}

impl Default for CostSharingTerms {
    fn default() -> Self {
        Self {
            copay_amount: default_copay(),
            coinsurance_rate: default_coinsurance(),
            deductible_amount: default_deductible(),
            deductible_met: false,
            remaining_deductible: default_deductible(),
            out_of_pocket_max: default_oop_max(),
            remaining_oop_max: default_remaining_oop(),
            coverage_level: CoverageLevel::default(),
        }
    }
}

impl CostSharingTerms {
    /// Parses terms from a cost-sharing blob. Null, non-object, or
    /// partially-populated blobs fall back to defaults field by field.
    #[must_use]
    pub fn from_blob(blob: &Value) -> Self {
        serde_json::from_value(blob.clone()).unwrap_or_default()
    }
}

/// Limitation terms parsed from a coverage's `limitations` blob.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitationTerms {
    #[serde(default = "default_annual_maximum")]
    pub annual_maximum: f64,
    #[serde(default = "default_used_amount")]
    pub used_amount: f64,
}

fn default_annual_maximum() -> f64 {
    5000.0
}

fn default_used_amount() -> f64 {
    1200.0
}

impl Default for LimitationTerms {
    fn default() -> Self {
        Self {
            annual_maximum: default_annual_maximum(),
            used_amount: default_used_amount(),
        }
    }
}

impl LimitationTerms {
    #[must_use]
    pub fn from_blob(blob: &Value) -> Self {
        serde_json::from_value(blob.clone()).unwrap_or_default()
    }
}

/// Provider network membership, keyed by network identifier.
///
/// An unknown or empty network is treated as in-network so that thin
/// configuration never silently downgrades benefits.
#[derive(Debug, Clone, Default)]
pub struct NetworkDirectory {
    networks: HashMap<String, Vec<String>>,
}

impl NetworkDirectory {
    #[must_use]
    pub fn new(networks: HashMap<String, Vec<String>>) -> Self {
        Self { networks }
    }

    /// Whether the provider participates in the given network.
    #[must_use]
    pub fn is_in_network(&self, network: &str, provider_id: &str) -> bool {
        if network.is_empty() {
            return true;
        }
        match self.networks.get(network) {
            Some(providers) => providers.iter().any(|p| p == provider_id),
            None => true,
        }
    }
}

/// Projects benefit information for a coverage against the requested
/// service codes and provider. The prior-auth flag holds iff one of the
/// requested codes matches the coverage's rule set; no requested codes
/// means no auth is required.
#[must_use]
pub fn calculate_benefits(
    coverage: &Coverage,
    service_codes: &[String],
    provider_id: &str,
    networks: &NetworkDirectory,
) -> BenefitInformation {
    let terms = CostSharingTerms::from_blob(&coverage.cost_sharing);
    BenefitInformation {
        service_category: coverage.kind.as_category().to_string(),
        in_network: networks.is_in_network(&coverage.network, provider_id),
        copay_amount: terms.copay_amount,
        coinsurance_rate: terms.coinsurance_rate,
        deductible_amount: terms.deductible_amount,
        deductible_met: terms.deductible_met,
        remaining_deductible: terms.remaining_deductible,
        out_of_pocket_max: terms.out_of_pocket_max,
        remaining_oop_max: terms.remaining_oop_max,
        prior_auth_required: service_codes
            .iter()
            .any(|code| coverage.prior_auth_rules.requires_auth(code)),
        coverage_level: terms.coverage_level,
    }
}

/// Projects the annual-maximum limitation for a coverage.
///
/// The reset date is the first day of the year after the service date.
#[must_use]
pub fn calculate_limitations(coverage: &Coverage, service_date: NaiveDate) -> CoverageLimitation {
    let terms = LimitationTerms::from_blob(&coverage.limitations);
    let remaining = (terms.annual_maximum - terms.used_amount).max(0.0);
    CoverageLimitation {
        service_category: coverage.kind.as_category().to_string(),
        limitation_type: LimitationType::AnnualMaximum,
        limit_value: terms.annual_maximum,
        used_amount: terms.used_amount,
        remaining_amount: remaining,
        period: "annual".to_string(),
        reset_date: format!("{}-01-01", service_date.year() + 1),
    }
}

/// Whether any of the requested service codes require prior authorization
/// under any of the given coverages.
#[must_use]
pub fn requires_prior_auth(service_codes: &[String], coverages: &[Coverage]) -> bool {
    service_codes.iter().any(|code| {
        coverages
            .iter()
            .any(|coverage| coverage.prior_auth_rules.requires_auth(code))
    })
}

/// Verifies a single service code against the coverages in force.
#[must_use]
pub fn verify_service(service_code: &str, coverages: &[Coverage]) -> ServiceVerification {
    let auth_required = coverages
        .iter()
        .any(|coverage| coverage.prior_auth_rules.requires_auth(service_code));
    let terms = coverages
        .first()
        .map(|c| CostSharingTerms::from_blob(&c.cost_sharing))
        .unwrap_or_default();

    let estimated_cost = SERVICE_ESTIMATED_COST;
    let patient_cost = estimated_cost * terms.coinsurance_rate;

    ServiceVerification {
        service_code: service_code.to_string(),
        status: if auth_required {
            ServiceStatus::RequiresAuth
        } else {
            ServiceStatus::Covered
        },
        coverage_level: SERVICE_COVERAGE_LEVEL,
        estimated_cost,
        patient_cost,
        auth_required,
        auth_reference: None,
        reason_codes: vec![],
    }
}

/// Projects a member-level benefit for a coverage, scoped to an optional
/// service category. No provider context exists on this path, so network
/// participation is not evaluated. Returns `None` when the coverage
/// carries no benefit details or the category does not match.
#[must_use]
pub fn member_benefit(coverage: &Coverage, category: Option<&str>) -> Option<BenefitInformation> {
    if coverage.benefit_details.is_null() {
        return None;
    }
    if let Some(category) = category {
        if coverage.kind.as_category() != category {
            return None;
        }
    }
    let terms = CostSharingTerms::from_blob(&coverage.cost_sharing);
    Some(BenefitInformation {
        service_category: coverage.kind.as_category().to_string(),
        in_network: true,
        copay_amount: terms.copay_amount,
        coinsurance_rate: terms.coinsurance_rate,
        deductible_amount: terms.deductible_amount,
        deductible_met: terms.deductible_met,
        remaining_deductible: terms.remaining_deductible,
        out_of_pocket_max: terms.out_of_pocket_max,
        remaining_oop_max: terms.remaining_oop_max,
        prior_auth_required: !coverage.prior_auth_rules.is_empty(),
        coverage_level: terms.coverage_level,
    })
}
