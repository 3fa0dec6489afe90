//! # Veris Service
//!
//! Business logic for the Veris eligibility engine: the cache-aside
//! eligibility read path, the benefit and prior-auth calculators, and the
//! coverage admin write path with its invalidation contract.

pub mod audit;
pub mod benefits;
pub mod cache;
pub mod coverage_admin;
pub mod dto;
pub mod eligibility_service;
pub mod impls;
pub mod metrics;
pub mod retry;

pub use cache::*;
pub use coverage_admin::*;
pub use dto::*;
pub use eligibility_service::*;
pub use impls::*;
