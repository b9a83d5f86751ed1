use uuid::Uuid;

use scholar_core::fields;
use scholar_core::models::{
    Category, ConferenceSubType, Contribution, FieldValue, PublicationType,
};
use scholar_core::validation::{validate, ViolationReason};

fn research_paper(categories: &[Category]) -> Contribution {
    let mut c = Contribution::new(Uuid::new_v4(), PublicationType::ResearchPaper, None);
    c.selected_indexing_categories = categories.iter().copied().collect();
    c
}

fn set(c: &mut Contribution, field: &str, value: FieldValue) {
    c.set_field(field, value).expect("draft should be editable");
}

#[test]
fn scopus_paper_with_blank_quartile_reports_exactly_one_violation() {
    let mut c = research_paper(&[Category::Scopus]);
    set(&mut c, fields::TARGETED_RESEARCH_TYPE, FieldValue::Token("both".into()));
    set(&mut c, fields::QUARTILE, FieldValue::Token("".into()));
    set(&mut c, fields::SJR, FieldValue::Text("0.5".into()));

    let report = validate(&c);
    assert_eq!(report.violations.len(), 1, "{:?}", report.violations);
    let v = &report.violations[0];
    assert_eq!(v.field, fields::QUARTILE);
    assert_eq!(v.reason, ViolationReason::Missing);
}

#[test]
fn impact_factor_at_twenty_is_below_the_subsidiary_threshold() {
    let mut c = research_paper(&[Category::SubsidiaryIfAbove20]);
    set(&mut c, fields::TARGETED_RESEARCH_TYPE, FieldValue::Token("both".into()));
    set(&mut c, fields::IMPACT_FACTOR, FieldValue::Number(20.0));

    let report = validate(&c);
    let v = report
        .violations
        .iter()
        .find(|v| v.field == fields::IMPACT_FACTOR)
        .expect("expected an impact_factor violation");
    assert_eq!(v.reason, ViolationReason::BelowThreshold);

    // Strictly greater: 20.01 passes.
    set(&mut c, fields::IMPACT_FACTOR, FieldValue::Number(20.01));
    let report = validate(&c);
    assert!(!report.violations.iter().any(|v| v.field == fields::IMPACT_FACTOR));
}

#[test]
fn naas_rating_of_six_satisfies_the_inclusive_threshold() {
    let mut c = research_paper(&[Category::NaasRating6Plus]);
    set(&mut c, fields::TARGETED_RESEARCH_TYPE, FieldValue::Token("both".into()));
    set(&mut c, fields::NAAS_RATING, FieldValue::Number(6.0));

    let report = validate(&c);
    assert!(
        !report.violations.iter().any(|v| v.field == fields::NAAS_RATING),
        "{:?}",
        report.violations
    );

    set(&mut c, fields::NAAS_RATING, FieldValue::Number(5.9));
    let report = validate(&c);
    assert!(report
        .violations
        .iter()
        .any(|v| v.field == fields::NAAS_RATING && v.reason == ViolationReason::BelowThreshold));
}

#[test]
fn unparseable_metric_reports_invalid_type() {
    let mut c = research_paper(&[Category::Scopus]);
    set(&mut c, fields::TARGETED_RESEARCH_TYPE, FieldValue::Token("both".into()));
    set(&mut c, fields::QUARTILE, FieldValue::Token("q1".into()));
    set(&mut c, fields::SJR, FieldValue::Text("very good".into()));

    let report = validate(&c);
    assert!(report
        .violations
        .iter()
        .any(|v| v.field == fields::SJR && v.reason == ViolationReason::InvalidType));
}

#[test]
fn empty_category_set_is_always_invalid_for_research_paper() {
    let mut c = research_paper(&[]);
    set(&mut c, fields::TARGETED_RESEARCH_TYPE, FieldValue::Token("both".into()));

    let report = validate(&c);
    assert!(report
        .violations
        .iter()
        .any(|v| v.field == fields::INDEXING_CATEGORIES && v.reason == ViolationReason::Missing));
}

#[test]
fn switching_communicated_flag_surfaces_personal_email() {
    let mut c = Contribution::new(Uuid::new_v4(), PublicationType::Book, None);
    set(&mut c, fields::PUBLISHER_NAME, FieldValue::Text("University Press".into()));
    set(&mut c, fields::ISBN, FieldValue::Text("978-3-16-148410-0".into()));
    set(&mut c, fields::PUBLICATION_DATE, FieldValue::Text("2024-01-15".into()));
    set(&mut c, fields::NATIONAL_INTERNATIONAL, FieldValue::Token("international".into()));
    set(&mut c, fields::BOOK_INDEXING_TYPE, FieldValue::Token("scopus".into()));
    set(&mut c, fields::BOOK_PUBLICATION_TYPE, FieldValue::Token("authored".into()));
    set(&mut c, fields::COMMUNICATED_WITH_OFFICIAL_ID, FieldValue::Token("yes".into()));

    let report = validate(&c);
    assert!(
        !report.violations.iter().any(|v| v.field == fields::PERSONAL_EMAIL),
        "{:?}",
        report.violations
    );

    set(&mut c, fields::COMMUNICATED_WITH_OFFICIAL_ID, FieldValue::Token("no".into()));
    let report = validate(&c);
    assert!(report
        .violations
        .iter()
        .any(|v| v.field == fields::PERSONAL_EMAIL && v.reason == ViolationReason::Missing));
}

#[test]
fn conference_entry_without_sub_type_is_flagged() {
    let c = Contribution::new(Uuid::new_v4(), PublicationType::ConferencePaper, None);
    let report = validate(&c);
    assert!(report
        .violations
        .iter()
        .any(|v| v.field == fields::CONFERENCE_SUB_TYPE));
}

#[test]
fn indexed_conference_paper_requires_proceedings_quartile() {
    let mut c = Contribution::new(
        Uuid::new_v4(),
        PublicationType::ConferencePaper,
        Some(ConferenceSubType::PaperIndexedScopus),
    );
    set(&mut c, fields::CONFERENCE_TYPE, FieldValue::Token("international".into()));
    set(&mut c, fields::PUBLICATION_DATE, FieldValue::Text("2024-03-01".into()));

    let report = validate(&c);
    assert!(report
        .violations
        .iter()
        .any(|v| v.field == fields::PROCEEDINGS_QUARTILE && v.reason == ViolationReason::Missing));

    set(&mut c, fields::PROCEEDINGS_QUARTILE, FieldValue::Token("q2".into()));
    assert!(validate(&c).ok());
}
