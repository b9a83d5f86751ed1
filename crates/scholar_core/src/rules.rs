//! Requirement rule table.
//!
//! One pure function, [`compute_required`], decides which fields are
//! mandatory for the current selection state and which numeric thresholds
//! apply, so the form and the pre-submit validator agree on a single
//! source of truth. For research papers the governing dimension is the
//! *set* of selected indexing categories, which are not mutually
//! exclusive, and each selected category contributes its own demands.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::fields;
use crate::models::{
    Category, ConferenceSubType, Contribution, PublicationType, TargetedResearchType, YesNo,
};

pub const QUARTILE_TOKENS: &[&str] = &["top1", "top5", "q1", "q2", "q3", "q4"];
pub const RESEARCH_TYPE_TOKENS: &[&str] = &["scopus", "wos", "both"];

/// Numeric or membership constraint attached to a required field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "limit", rename_all = "snake_case")]
pub enum Constraint {
    /// Present and parseable as a number; no bound beyond that.
    Numeric,
    /// Strictly greater than the limit.
    GreaterThan(f64),
    /// Greater than or equal to the limit.
    AtLeast(f64),
    /// Less than or equal to the limit.
    AtMost(f64),
    /// One of a fixed token vocabulary.
    OneOf(&'static [&'static str]),
}

/// Derived requirement state, never stored. `required` maps each
/// mandatory field to its optional constraint; `cleared` names fields
/// whose values must be dropped atomically with the selection change
/// that produced this set, so a stale metric is never resubmitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequiredFieldSet {
    required: BTreeMap<&'static str, Option<Constraint>>,
    cleared: BTreeSet<&'static str>,
}

impl RequiredFieldSet {
    fn require(&mut self, field: &'static str, constraint: Option<Constraint>) {
        self.required.insert(field, constraint);
    }

    fn clear(&mut self, field: &'static str) {
        self.required.remove(field);
        self.cleared.insert(field);
    }

    pub fn is_required(&self, field: &str) -> bool {
        self.required.contains_key(field)
    }

    pub fn constraint_for(&self, field: &str) -> Option<&Constraint> {
        self.required.get(field).and_then(Option::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&Constraint>)> + '_ {
        self.required.iter().map(|(f, c)| (*f, c.as_ref()))
    }

    pub fn cleared(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cleared.iter().copied()
    }
}

/// Selection state the rule table reads. Built from a draft with
/// [`RequirementInput::from_contribution`], or assembled directly by a
/// caller previewing a selection change.
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementInput {
    pub publication_type: PublicationType,
    pub categories: BTreeSet<Category>,
    pub targeted_research_type: Option<TargetedResearchType>,
    pub conference_sub_type: Option<ConferenceSubType>,
    pub communicated_with_official_id: Option<YesNo>,
}

impl RequirementInput {
    pub fn from_contribution(contribution: &Contribution) -> Self {
        Self {
            publication_type: contribution.publication_type(),
            categories: contribution.selected_indexing_categories.clone(),
            targeted_research_type: contribution.targeted_research_type(),
            conference_sub_type: contribution.conference_sub_type(),
            communicated_with_official_id: contribution.communicated_with_official_id(),
        }
    }
}

/// Pure, deterministic requirement computation. No I/O, no hidden state.
pub fn compute_required(input: &RequirementInput) -> RequiredFieldSet {
    match input.publication_type {
        PublicationType::ResearchPaper => research_paper_requirements(input),
        PublicationType::Book => book_requirements(input, true),
        PublicationType::BookChapter => book_requirements(input, false),
        PublicationType::ConferencePaper => conference_requirements(input),
        PublicationType::Grant => grant_requirements(),
    }
}

// =========================================================================
// Research paper: driven by the selected indexing category set
// =========================================================================
fn research_paper_requirements(input: &RequirementInput) -> RequiredFieldSet {
    let mut set = RequiredFieldSet::default();
    let cats = &input.categories;

    // Zero categories selected is always invalid for a research paper.
    set.require(fields::INDEXING_CATEGORIES, None);
    set.require(
        fields::TARGETED_RESEARCH_TYPE,
        Some(Constraint::OneOf(RESEARCH_TYPE_TOKENS)),
    );

    if cats.contains(&Category::Scopus) || cats.contains(&Category::AbdcScopusWos) {
        set.require(fields::QUARTILE, Some(Constraint::OneOf(QUARTILE_TOKENS)));
        set.require(fields::SJR, Some(Constraint::Numeric));
    }

    if cats.contains(&Category::NatureScienceLancetCellNejm)
        || cats.contains(&Category::SubsidiaryIfAbove20)
        || cats.contains(&Category::ScieWos)
        || cats.contains(&Category::AbdcScopusWos)
    {
        // Subsidiary journals demand IF strictly above 20, not at it.
        let constraint = if cats.contains(&Category::SubsidiaryIfAbove20) {
            Constraint::GreaterThan(20.0)
        } else {
            Constraint::Numeric
        };
        set.require(fields::IMPACT_FACTOR, Some(constraint));
    }

    if cats.contains(&Category::NaasRating6Plus) {
        set.require(fields::NAAS_RATING, Some(Constraint::AtLeast(6.0)));
    }

    // The targeted research type overrides category demands: a metric the
    // chosen index never reports is cleared, not merely hidden.
    match input.targeted_research_type {
        Some(TargetedResearchType::Scopus) => {
            set.clear(fields::IMPACT_FACTOR);
        }
        Some(TargetedResearchType::Wos) => {
            set.clear(fields::SJR);
            set.clear(fields::QUARTILE);
        }
        Some(TargetedResearchType::Both) | None => {}
    }

    set
}

// =========================================================================
// Book / book chapter
// =========================================================================
fn book_requirements(input: &RequirementInput, is_book: bool) -> RequiredFieldSet {
    let mut set = RequiredFieldSet::default();

    set.require(fields::PUBLISHER_NAME, None);
    set.require(fields::ISBN, None);
    set.require(fields::PUBLICATION_DATE, None);
    set.require(fields::NATIONAL_INTERNATIONAL, None);
    set.require(fields::BOOK_INDEXING_TYPE, None);

    if is_book {
        set.require(fields::BOOK_PUBLICATION_TYPE, None);
    }

    // Authors publishing outside the official id must leave a reachable
    // address: a dependency on another field, not on a category.
    if input.communicated_with_official_id == Some(YesNo::No) {
        set.require(fields::PERSONAL_EMAIL, None);
    }

    set
}

// =========================================================================
// Conference activity: keyed off the immutable sub-type
// =========================================================================
fn conference_requirements(input: &RequirementInput) -> RequiredFieldSet {
    let mut set = RequiredFieldSet::default();

    match input.conference_sub_type {
        Some(ConferenceSubType::PaperIndexedScopus) | Some(ConferenceSubType::PaperNotIndexed) => {
            set.require(fields::CONFERENCE_TYPE, None);
            set.require(fields::PUBLICATION_DATE, None);
            if input.conference_sub_type == Some(ConferenceSubType::PaperIndexedScopus) {
                set.require(
                    fields::PROCEEDINGS_QUARTILE,
                    Some(Constraint::OneOf(QUARTILE_TOKENS)),
                );
            }
            if input.communicated_with_official_id == Some(YesNo::No) {
                set.require(fields::PERSONAL_EMAIL, None);
            }
        }
        Some(ConferenceSubType::KeynoteSpeakerInvitedTalks)
        | Some(ConferenceSubType::OrganizerCoordinatorMember) => {
            set.require(fields::VENUE, None);
            set.require(fields::TOPIC, None);
            set.require(fields::CONFERENCE_DATE, None);
            if input.conference_sub_type == Some(ConferenceSubType::OrganizerCoordinatorMember) {
                set.require(fields::EVENT_CATEGORY, None);
            }
        }
        // A conference entry without its sub-type cannot state its own
        // requirements; the validator reports the sub-type itself.
        None => {
            set.require(fields::CONFERENCE_SUB_TYPE, None);
        }
    }

    set
}

// =========================================================================
// Grant
// =========================================================================
fn grant_requirements() -> RequiredFieldSet {
    let mut set = RequiredFieldSet::default();
    set.require(fields::FUNDING_AGENCY, None);
    set.require(fields::GRANT_AMOUNT, Some(Constraint::Numeric));
    set.require(fields::START_DATE, None);
    set
}

// =========================================================================
// Field partitions per publication type
// =========================================================================

/// All fields semantically meaningful for a publication type. Fields
/// outside the partition are ignored by validation and submission.
pub fn partition(publication_type: PublicationType) -> &'static [&'static str] {
    match publication_type {
        PublicationType::ResearchPaper => &[
            fields::TARGETED_RESEARCH_TYPE,
            fields::QUARTILE,
            fields::SJR,
            fields::IMPACT_FACTOR,
            fields::NAAS_RATING,
            fields::SDG_GOALS,
            fields::PUBLICATION_DATE,
        ],
        PublicationType::Book | PublicationType::BookChapter => &[
            fields::PUBLISHER_NAME,
            fields::ISBN,
            fields::PUBLICATION_DATE,
            fields::NATIONAL_INTERNATIONAL,
            fields::BOOK_INDEXING_TYPE,
            fields::BOOK_PUBLICATION_TYPE,
            fields::COMMUNICATED_WITH_OFFICIAL_ID,
            fields::PERSONAL_EMAIL,
            fields::SDG_GOALS,
        ],
        PublicationType::ConferencePaper => &[
            fields::CONFERENCE_TYPE,
            fields::PUBLICATION_DATE,
            fields::PROCEEDINGS_QUARTILE,
            fields::COMMUNICATED_WITH_OFFICIAL_ID,
            fields::PERSONAL_EMAIL,
            fields::VENUE,
            fields::TOPIC,
            fields::CONFERENCE_DATE,
            fields::EVENT_CATEGORY,
        ],
        PublicationType::Grant => &[
            fields::FUNDING_AGENCY,
            fields::GRANT_AMOUNT,
            fields::START_DATE,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper_input(categories: &[Category], trt: Option<TargetedResearchType>) -> RequirementInput {
        RequirementInput {
            publication_type: PublicationType::ResearchPaper,
            categories: categories.iter().copied().collect(),
            targeted_research_type: trt,
            conference_sub_type: None,
            communicated_with_official_id: None,
        }
    }

    #[test]
    fn deterministic_for_same_input() {
        let input = paper_input(
            &[Category::Scopus, Category::NaasRating6Plus],
            Some(TargetedResearchType::Both),
        );
        assert_eq!(compute_required(&input), compute_required(&input));
    }

    #[test]
    fn scopus_category_requires_quartile_and_sjr() {
        let set = compute_required(&paper_input(&[Category::Scopus], None));
        assert_eq!(
            set.constraint_for(fields::QUARTILE),
            Some(&Constraint::OneOf(QUARTILE_TOKENS))
        );
        assert_eq!(set.constraint_for(fields::SJR), Some(&Constraint::Numeric));
        assert!(!set.is_required(fields::IMPACT_FACTOR));
    }

    #[test]
    fn abdc_category_requires_both_metric_families() {
        let set = compute_required(&paper_input(&[Category::AbdcScopusWos], None));
        assert!(set.is_required(fields::QUARTILE));
        assert!(set.is_required(fields::SJR));
        assert_eq!(
            set.constraint_for(fields::IMPACT_FACTOR),
            Some(&Constraint::Numeric)
        );
    }

    #[test]
    fn subsidiary_category_demands_strict_threshold() {
        let set = compute_required(&paper_input(
            &[Category::ScieWos, Category::SubsidiaryIfAbove20],
            None,
        ));
        assert_eq!(
            set.constraint_for(fields::IMPACT_FACTOR),
            Some(&Constraint::GreaterThan(20.0))
        );
    }

    #[test]
    fn naas_category_is_inclusive_at_six() {
        let set = compute_required(&paper_input(&[Category::NaasRating6Plus], None));
        assert_eq!(
            set.constraint_for(fields::NAAS_RATING),
            Some(&Constraint::AtLeast(6.0))
        );
    }

    #[test]
    fn scopus_target_clears_impact_factor() {
        let set = compute_required(&paper_input(
            &[Category::ScieWos],
            Some(TargetedResearchType::Scopus),
        ));
        assert!(!set.is_required(fields::IMPACT_FACTOR));
        let cleared: Vec<_> = set.cleared().collect();
        assert_eq!(cleared, vec![fields::IMPACT_FACTOR]);
    }

    #[test]
    fn wos_target_clears_sjr_and_quartile() {
        let set = compute_required(&paper_input(
            &[Category::Scopus],
            Some(TargetedResearchType::Wos),
        ));
        assert!(!set.is_required(fields::SJR));
        assert!(!set.is_required(fields::QUARTILE));
        let cleared: BTreeSet<_> = set.cleared().collect();
        assert!(cleared.contains(fields::SJR));
        assert!(cleared.contains(fields::QUARTILE));
        assert!(!cleared.contains(fields::IMPACT_FACTOR));
    }

    #[test]
    fn both_target_clears_nothing() {
        let set = compute_required(&paper_input(
            &[Category::Scopus, Category::ScieWos],
            Some(TargetedResearchType::Both),
        ));
        assert_eq!(set.cleared().count(), 0);
        assert!(set.is_required(fields::SJR));
        assert!(set.is_required(fields::IMPACT_FACTOR));
    }

    #[test]
    fn book_requires_publication_type_field_but_chapter_does_not() {
        let mut input = RequirementInput {
            publication_type: PublicationType::Book,
            categories: BTreeSet::new(),
            targeted_research_type: None,
            conference_sub_type: None,
            communicated_with_official_id: Some(YesNo::Yes),
        };
        let set = compute_required(&input);
        assert!(set.is_required(fields::BOOK_PUBLICATION_TYPE));
        assert!(!set.is_required(fields::PERSONAL_EMAIL));

        input.publication_type = PublicationType::BookChapter;
        let set = compute_required(&input);
        assert!(!set.is_required(fields::BOOK_PUBLICATION_TYPE));
        assert!(set.is_required(fields::ISBN));
    }

    #[test]
    fn communicating_off_official_id_requires_personal_email() {
        let input = RequirementInput {
            publication_type: PublicationType::Book,
            categories: BTreeSet::new(),
            targeted_research_type: None,
            conference_sub_type: None,
            communicated_with_official_id: Some(YesNo::No),
        };
        assert!(compute_required(&input).is_required(fields::PERSONAL_EMAIL));
    }

    #[test]
    fn conference_requirements_follow_sub_type() {
        let mut input = RequirementInput {
            publication_type: PublicationType::ConferencePaper,
            categories: BTreeSet::new(),
            targeted_research_type: None,
            conference_sub_type: Some(ConferenceSubType::PaperIndexedScopus),
            communicated_with_official_id: Some(YesNo::No),
        };
        let set = compute_required(&input);
        assert!(set.is_required(fields::CONFERENCE_TYPE));
        assert!(set.is_required(fields::PROCEEDINGS_QUARTILE));
        assert!(set.is_required(fields::PERSONAL_EMAIL));

        input.conference_sub_type = Some(ConferenceSubType::PaperNotIndexed);
        let set = compute_required(&input);
        assert!(!set.is_required(fields::PROCEEDINGS_QUARTILE));

        input.conference_sub_type = Some(ConferenceSubType::KeynoteSpeakerInvitedTalks);
        let set = compute_required(&input);
        assert!(set.is_required(fields::VENUE));
        assert!(set.is_required(fields::TOPIC));
        assert!(set.is_required(fields::CONFERENCE_DATE));
        assert!(!set.is_required(fields::EVENT_CATEGORY));

        input.conference_sub_type = Some(ConferenceSubType::OrganizerCoordinatorMember);
        assert!(compute_required(&input).is_required(fields::EVENT_CATEGORY));
    }

    #[test]
    fn grant_partition_is_minimal() {
        let input = RequirementInput {
            publication_type: PublicationType::Grant,
            categories: BTreeSet::new(),
            targeted_research_type: None,
            conference_sub_type: None,
            communicated_with_official_id: None,
        };
        let set = compute_required(&input);
        assert!(set.is_required(fields::FUNDING_AGENCY));
        assert_eq!(
            set.constraint_for(fields::GRANT_AMOUNT),
            Some(&Constraint::Numeric)
        );
    }
}
