//! Coverage admin DTOs (the write path behind the invalidation contract).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;
use veris_core::{AuthRuleSet, Coverage, CoverageStatus, CoverageType, MemberId};

/// Request to create a coverage record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCoverageRequest {
    #[validate(length(min = 1, message = "Member ID is required"))]
    pub member_id: String,

    #[validate(length(min = 1, message = "Payer ID is required"))]
    pub payer_id: String,

    #[validate(length(min = 1, message = "Policy number is required"))]
    pub policy_number: String,

    #[serde(default)]
    pub group_number: String,

    /// Defaults to active; admin-created coverages are expected to serve.
    #[serde(default)]
    pub status: Option<CoverageStatus>,

    #[serde(default, rename = "type")]
    pub kind: CoverageType,

    pub effective_date: NaiveDate,

    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,

    #[serde(default)]
    pub benefit_details: Value,

    #[serde(default)]
    pub cost_sharing: Value,

    #[serde(default)]
    pub network: String,

    #[serde(default)]
    pub prior_auth_rules: Value,

    #[serde(default)]
    pub limitations: Value,
}

impl CreateCoverageRequest {
    /// Builds the coverage entity this request describes.
    #[must_use]
    pub fn into_coverage(self) -> Coverage {
        let mut coverage = Coverage::new(
            MemberId::new(self.member_id),
            self.payer_id,
            self.policy_number,
            self.effective_date,
        );
        coverage.group_number = self.group_number;
        coverage.status = self.status.unwrap_or(CoverageStatus::Active);
        coverage.kind = self.kind;
        coverage.expiration_date = self.expiration_date;
        coverage.benefit_details = self.benefit_details;
        coverage.cost_sharing = self.cost_sharing;
        coverage.network = self.network;
        coverage.prior_auth_rules = AuthRuleSet::from_value(self.prior_auth_rules);
        coverage.limitations = self.limitations;
        coverage
    }
}

/// Request to update a coverage record. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateCoverageRequest {
    #[serde(default)]
    pub payer_id: Option<String>,
    #[serde(default)]
    pub policy_number: Option<String>,
    #[serde(default)]
    pub group_number: Option<String>,
    #[serde(default)]
    pub status: Option<CoverageStatus>,
    #[serde(default, rename = "type")]
    pub kind: Option<CoverageType>,
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub benefit_details: Option<Value>,
    #[serde(default)]
    pub cost_sharing: Option<Value>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub prior_auth_rules: Option<Value>,
    #[serde(default)]
    pub limitations: Option<Value>,
}

impl UpdateCoverageRequest {
    /// Applies the present fields onto an existing coverage.
    pub fn apply_to(self, coverage: &mut Coverage) {
        if let Some(payer_id) = self.payer_id {
            coverage.payer_id = payer_id;
        }
        if let Some(policy_number) = self.policy_number {
            coverage.policy_number = policy_number;
        }
        if let Some(group_number) = self.group_number {
            coverage.group_number = group_number;
        }
        if let Some(status) = self.status {
            coverage.status = status;
        }
        if let Some(kind) = self.kind {
            coverage.kind = kind;
        }
        if let Some(effective_date) = self.effective_date {
            coverage.effective_date = effective_date;
        }
        if let Some(expiration_date) = self.expiration_date {
            coverage.expiration_date = Some(expiration_date);
        }
        if let Some(benefit_details) = self.benefit_details {
            coverage.benefit_details = benefit_details;
        }
        if let Some(cost_sharing) = self.cost_sharing {
            coverage.cost_sharing = cost_sharing;
        }
        if let Some(network) = self.network {
            coverage.network = network;
        }
        if let Some(prior_auth_rules) = self.prior_auth_rules {
            coverage.prior_auth_rules = AuthRuleSet::from_value(prior_auth_rules);
        }
        if let Some(limitations) = self.limitations {
            coverage.limitations = limitations;
        }
        coverage.updated_at = chrono::Utc::now();
    }
}
