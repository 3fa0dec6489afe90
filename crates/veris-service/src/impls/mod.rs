//! Service implementations.
//!
//! This module contains the concrete implementations of service traits.
//! Trait definitions live in the parent module (e.g. `eligibility_service.rs`).

pub mod coverage_admin_impl;
pub mod eligibility_service_impl;

pub use coverage_admin_impl::CoverageAdminServiceImpl;
pub use eligibility_service_impl::EligibilityServiceImpl;
