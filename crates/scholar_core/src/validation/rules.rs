use crate::fields;
use crate::models::{Contribution, FieldValue, PublicationType};
use crate::rules::{Constraint, RequiredFieldSet};
use crate::validation::{ContributionRule, FieldViolation, ViolationReason};

fn missing(field: &str) -> FieldViolation {
    FieldViolation {
        field: field.to_string(),
        reason: ViolationReason::Missing,
        message: format!("{field} is required"),
    }
}

// =========================================================================
// RULE: REQ-001
// Every required field without a numeric constraint must be non-empty.
// The selection fields live outside the field bag and are checked from
// their typed slots.
// =========================================================================
pub struct RequiredPresenceRule;

impl ContributionRule for RequiredPresenceRule {
    fn id(&self) -> &'static str {
        "REQ-001"
    }

    fn check(
        &self,
        contribution: &Contribution,
        required: &RequiredFieldSet,
    ) -> Vec<FieldViolation> {
        let mut violations = Vec::new();

        for (field, constraint) in required.iter() {
            if constraint.is_some() {
                continue; // constrained fields belong to REQ-002
            }
            match field {
                fields::INDEXING_CATEGORIES => {
                    if contribution.publication_type() == PublicationType::ResearchPaper
                        && contribution.selected_indexing_categories.is_empty()
                    {
                        violations.push(FieldViolation {
                            field: field.to_string(),
                            reason: ViolationReason::Missing,
                            message: "at least one indexing category must be selected".to_string(),
                        });
                    }
                }
                fields::CONFERENCE_SUB_TYPE => {
                    if contribution.conference_sub_type().is_none() {
                        violations.push(missing(field));
                    }
                }
                _ => {
                    let empty = contribution
                        .field(field)
                        .map(FieldValue::is_empty)
                        .unwrap_or(true);
                    if empty {
                        violations.push(missing(field));
                    }
                }
            }
        }

        violations
    }
}

// =========================================================================
// RULE: REQ-002
// Required fields carrying a constraint: present, parseable, and within
// the threshold or vocabulary the rule table attached.
// =========================================================================
pub struct ConstraintRule;

impl ContributionRule for ConstraintRule {
    fn id(&self) -> &'static str {
        "REQ-002"
    }

    fn check(
        &self,
        contribution: &Contribution,
        required: &RequiredFieldSet,
    ) -> Vec<FieldViolation> {
        let mut violations = Vec::new();

        for (field, constraint) in required.iter() {
            let Some(constraint) = constraint else {
                continue;
            };

            let Some(value) = contribution.field(field) else {
                violations.push(missing(field));
                continue;
            };
            if value.is_empty() {
                violations.push(missing(field));
                continue;
            }

            match constraint {
                Constraint::OneOf(allowed) => {
                    let token = value.as_token().unwrap_or_default();
                    if !allowed.contains(&token) {
                        violations.push(FieldViolation {
                            field: field.to_string(),
                            reason: ViolationReason::InvalidType,
                            message: format!(
                                "{field} must be one of [{}], found '{token}'",
                                allowed.join(", ")
                            ),
                        });
                    }
                }
                Constraint::Numeric
                | Constraint::GreaterThan(_)
                | Constraint::AtLeast(_)
                | Constraint::AtMost(_) => {
                    let Some(number) = value.as_number() else {
                        violations.push(FieldViolation {
                            field: field.to_string(),
                            reason: ViolationReason::InvalidType,
                            message: format!("{field} must be numeric"),
                        });
                        continue;
                    };
                    match constraint {
                        Constraint::GreaterThan(limit) if number <= *limit => {
                            violations.push(FieldViolation {
                                field: field.to_string(),
                                reason: ViolationReason::BelowThreshold,
                                message: format!(
                                    "{field} must be strictly greater than {limit}, found {number}"
                                ),
                            });
                        }
                        Constraint::AtLeast(limit) if number < *limit => {
                            violations.push(FieldViolation {
                                field: field.to_string(),
                                reason: ViolationReason::BelowThreshold,
                                message: format!(
                                    "{field} must be at least {limit}, found {number}"
                                ),
                            });
                        }
                        Constraint::AtMost(limit) if number > *limit => {
                            violations.push(FieldViolation {
                                field: field.to_string(),
                                reason: ViolationReason::AboveThreshold,
                                message: format!(
                                    "{field} must be at most {limit}, found {number}"
                                ),
                            });
                        }
                        _ => {}
                    }
                }
            }
        }

        violations
    }
}
