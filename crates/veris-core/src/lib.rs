//! # Veris Core
//!
//! Core types, traits, and error definitions for the Veris eligibility
//! engine. This crate provides the foundational abstractions used across
//! the repository and service layers: the unified error taxonomy, typed
//! identifiers, and the Member/Coverage domain model.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
