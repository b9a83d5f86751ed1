use serde::Serialize;

use crate::models::Contribution;
use crate::rules::{compute_required, RequiredFieldSet, RequirementInput};

pub mod rules;

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationReason {
    Missing,
    BelowThreshold,
    AboveThreshold,
    InvalidType,
}

/// One violated field, with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub reason: ViolationReason,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub violations: Vec<FieldViolation>,
}

impl ValidationReport {
    pub fn ok(&self) -> bool {
        self.violations.is_empty()
    }
}

/// The contract every rule must fulfill. Rules never derive their own
/// requirement state: they read the [`RequiredFieldSet`] the engine
/// computed, so the form and the validator cannot disagree.
pub trait ContributionRule {
    fn id(&self) -> &'static str;
    fn check(&self, contribution: &Contribution, required: &RequiredFieldSet)
        -> Vec<FieldViolation>;
}

/// Registry of rules, run in registration order. Reports every violated
/// field, not just the first.
pub struct ValidationEngine {
    rules: Vec<Box<dyn ContributionRule + Send + Sync>>,
}

impl ValidationEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule<R: ContributionRule + Send + Sync + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn run(&self, contribution: &Contribution) -> ValidationReport {
        let required = compute_required(&RequirementInput::from_contribution(contribution));
        let mut violations = Vec::new();
        for rule in &self.rules {
            violations.append(&mut rule.check(contribution, &required));
        }
        ValidationReport { violations }
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Validates a draft with the standard rule registry.
pub fn validate(contribution: &Contribution) -> ValidationReport {
    crate::standard_validator().run(contribution)
}
