//! Request/response DTOs for the eligibility engine.

mod coverage_dto;
mod eligibility_dto;
mod verification_dto;

pub use coverage_dto::{CreateCoverageRequest, UpdateCoverageRequest};
pub use eligibility_dto::{
    message_codes, BenefitInformation, CoverageDisposition, CoverageLevel, CoverageLimitation,
    EligibilityRequest, EligibilityResponse, LimitationType, MessageKind, ResponseMessage,
};
pub use verification_dto::{
    CoverageVerificationRequest, CoverageVerificationResponse, ServiceStatus, ServiceVerification,
    VerificationStatus,
};
