//! Domain model: members, coverages, and their value objects.

mod auth_rules;
mod coverage;
mod member;
mod status;

pub use auth_rules::AuthRuleSet;
pub use coverage::Coverage;
pub use member::Member;
pub use status::{CoverageStatus, CoverageType, MemberStatus};
