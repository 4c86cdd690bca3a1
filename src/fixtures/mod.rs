// SPDX-License-Identifier: MPL-2.0
//! Static demo data for the case-review workbench.
//!
//! There is no backend: every case, assessment and rule decision comes from
//! a JSON fixture, either the one bundled with the crate or one supplied on
//! the command line.

mod catalog;
mod model;

pub use catalog::CaseCatalog;
pub use model::{
    Applicant, Case, CaseStatus, EhrSummary, Policy, RiskAssessment, RiskLevel, RuleDecision,
    RuleOutcome,
};
