// SPDX-License-Identifier: MPL-2.0
//! Read-only case records shown by the review workbench.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a case sits in the review flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    New,
    InReview,
    Referred,
    Approved,
    Declined,
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CaseStatus::New => "new",
            CaseStatus::InReview => "in review",
            CaseStatus::Referred => "referred",
            CaseStatus::Approved => "approved",
            CaseStatus::Declined => "declined",
        };
        f.write_str(label)
    }
}

/// Severity band of a risk assessment. Ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Result of one underwriting rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleOutcome {
    Pass,
    Refer,
    Decline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    pub name: String,
    pub age: u8,
    pub occupation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub product: String,
    pub coverage_amount: u64,
    /// Zero for permanent products.
    pub term_years: u8,
}

/// Simulated electronic health record extract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EhrSummary {
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    pub bmi: f32,
    pub blood_pressure: String,
    pub smoker: bool,
    pub last_visit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub category: String,
    pub score: u8,
    pub level: RiskLevel,
    pub rationale: String,
}

/// One row of the rule-decision table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDecision {
    pub rule_id: String,
    pub rule_name: String,
    pub outcome: RuleOutcome,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: String,
    pub applicant: Applicant,
    pub policy: Policy,
    pub status: CaseStatus,
    pub submitted_on: String,
    pub ehr: EhrSummary,
    #[serde(default)]
    pub assessments: Vec<RiskAssessment>,
    #[serde(default)]
    pub rule_decisions: Vec<RuleDecision>,
}

impl Case {
    /// Highest assessed risk level, or `None` before any assessment.
    #[must_use]
    pub fn overall_risk(&self) -> Option<RiskLevel> {
        self.assessments.iter().map(|a| a.level).max()
    }

    /// Rule decisions that did not pass.
    pub fn flagged_rules(&self) -> impl Iterator<Item = &RuleDecision> {
        self.rule_decisions
            .iter()
            .filter(|decision| decision.outcome != RuleOutcome::Pass)
    }

    /// The most severe rule outcome, if any rule ran.
    #[must_use]
    pub fn worst_outcome(&self) -> Option<RuleOutcome> {
        self.rule_decisions
            .iter()
            .map(|decision| decision.outcome)
            .max_by_key(|outcome| match outcome {
                RuleOutcome::Pass => 0,
                RuleOutcome::Refer => 1,
                RuleOutcome::Decline => 2,
            })
    }
}
