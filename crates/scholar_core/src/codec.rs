//! Canonical value codec.
//!
//! Bidirectional mapping between the display representations users see
//! (`"Top 1%"`, `"SCI/SCIE"`) and the canonical tokens the engine stores
//! (`top1`, `wos`). Both directions are total: when no explicit table
//! covers a field, `to_canonical` falls back to a trimmed lower-case of
//! the input and `to_display` to identity.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde_json::Value;

use crate::fields;
use crate::models::FieldValue;

// ---------------------------------------------------------------------------
// Explicit mapping tables (display, canonical)
// ---------------------------------------------------------------------------

pub const QUARTILE_TABLE: &[(&str, &str)] = &[
    ("Top 1%", "top1"),
    ("Top 5%", "top5"),
    ("Q1", "q1"),
    ("Q2", "q2"),
    ("Q3", "q3"),
    ("Q4", "q4"),
];

pub const RESEARCH_TYPE_TABLE: &[(&str, &str)] = &[
    ("Scopus", "scopus"),
    ("SCI/SCIE", "wos"),
    ("Both", "both"),
];

pub const YES_NO_TABLE: &[(&str, &str)] = &[("Yes", "yes"), ("No", "no")];

pub const CATEGORY_TABLE: &[(&str, &str)] = &[
    ("SCOPUS", "scopus"),
    ("ABDC/SCOPUS/WOS", "abdc_scopus_wos"),
    ("Nature/Science/Lancet/Cell/NEJM", "nature_science_lancet_cell_nejm"),
    ("Subsidiary journals (IF > 20)", "subsidiary_if_above_20"),
    ("SCIE/WOS", "scie_wos"),
    ("NAAS rating 6+", "naas_rating_6_plus"),
];

fn table_for(field: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match field {
        fields::QUARTILE | fields::PROCEEDINGS_QUARTILE => Some(QUARTILE_TABLE),
        fields::TARGETED_RESEARCH_TYPE => Some(RESEARCH_TYPE_TABLE),
        fields::INDEXING_CATEGORIES => Some(CATEGORY_TABLE),
        _ => None,
    }
}

fn yes_no_field(field: &str) -> bool {
    field == fields::COMMUNICATED_WITH_OFFICIAL_ID
}

/// Display -> canonical token. Total; unknown values fall back to a
/// trimmed lower-case identity so the caller never has to handle failure.
pub fn to_canonical(field: &str, display: &str) -> String {
    if yes_no_field(field) {
        return coerce_yes_no(display).to_string();
    }
    if let Some(table) = table_for(field) {
        if let Some((_, canonical)) = table.iter().find(|(d, _)| *d == display) {
            return (*canonical).to_string();
        }
    }
    display.trim().to_lowercase()
}

/// Canonical token -> display. Total; unknown tokens pass through.
pub fn to_display(field: &str, canonical: &str) -> String {
    let table = if yes_no_field(field) {
        Some(YES_NO_TABLE)
    } else {
        table_for(field)
    };
    if let Some(table) = table {
        if let Some((display, _)) = table.iter().find(|(_, c)| *c == canonical) {
            return (*display).to_string();
        }
    }
    canonical.to_string()
}

/// Folds reviewer-entered booleans: `"true"` / `"Yes"` in any casing
/// become `yes`, anything else becomes `no`.
pub fn coerce_yes_no(raw: &str) -> &'static str {
    let t = raw.trim();
    if t.eq_ignore_ascii_case("true") || t.eq_ignore_ascii_case("yes") {
        "yes"
    } else {
        "no"
    }
}

// ---------------------------------------------------------------------------
// List parsing
// ---------------------------------------------------------------------------

/// Splits a comma-separated string into a token set, trimming whitespace
/// and dropping empty entries. Order is irrelevant by construction.
pub fn parse_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Same as [`parse_list`] but accepts the backend's loose payloads: either
/// a comma-separated JSON string or an already-structured array.
pub fn parse_list_json(value: &Value) -> BTreeSet<String> {
    match value {
        Value::String(s) => parse_list(s),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        _ => BTreeSet::new(),
    }
}

// ---------------------------------------------------------------------------
// Backend <-> form-local field name map
// ---------------------------------------------------------------------------

// The backend API kept its original camelCase names; the form uses
// snake_case. One table, consumed only at the suggestion boundary.
const FIELD_NAME_MAP: &[(&str, &str)] = &[
    ("publicationType", fields::PUBLICATION_TYPE),
    ("conferenceSubType", fields::CONFERENCE_SUB_TYPE),
    ("publicationDate", fields::PUBLICATION_DATE),
    ("sdgGoals", fields::SDG_GOALS),
    ("communicatedWithOfficialId", fields::COMMUNICATED_WITH_OFFICIAL_ID),
    ("personalEmail", fields::PERSONAL_EMAIL),
    ("indexingCategories", fields::INDEXING_CATEGORIES),
    ("targetedResearchType", fields::TARGETED_RESEARCH_TYPE),
    ("quartile", fields::QUARTILE),
    ("sjr", fields::SJR),
    ("impactFactor", fields::IMPACT_FACTOR),
    ("naasRating", fields::NAAS_RATING),
    ("publisherName", fields::PUBLISHER_NAME),
    ("isbn", fields::ISBN),
    ("nationalInternational", fields::NATIONAL_INTERNATIONAL),
    ("bookIndexingType", fields::BOOK_INDEXING_TYPE),
    ("bookPublicationType", fields::BOOK_PUBLICATION_TYPE),
    ("conferenceType", fields::CONFERENCE_TYPE),
    ("proceedingsQuartile", fields::PROCEEDINGS_QUARTILE),
    ("venue", fields::VENUE),
    ("topic", fields::TOPIC),
    ("conferenceDate", fields::CONFERENCE_DATE),
    ("eventCategory", fields::EVENT_CATEGORY),
    ("fundingAgency", fields::FUNDING_AGENCY),
    ("grantAmount", fields::GRANT_AMOUNT),
    ("startDate", fields::START_DATE),
];

/// Backend canonical name -> form-local name; unmapped names pass through.
pub fn to_local_name(backend: &str) -> &str {
    FIELD_NAME_MAP
        .iter()
        .find(|(b, _)| *b == backend)
        .map(|(_, l)| *l)
        .unwrap_or(backend)
}

/// Form-local name -> backend canonical name; unmapped names pass through.
pub fn to_backend_name(local: &str) -> &str {
    FIELD_NAME_MAP
        .iter()
        .find(|(_, l)| *l == local)
        .map(|(b, _)| *b)
        .unwrap_or(local)
}

// ---------------------------------------------------------------------------
// Field-specific coercion of raw suggestion strings
// ---------------------------------------------------------------------------

const NUMERIC_FIELDS: &[&str] = &[
    fields::SJR,
    fields::IMPACT_FACTOR,
    fields::NAAS_RATING,
    fields::GRANT_AMOUNT,
];

const DATE_FIELDS: &[&str] = &[
    fields::PUBLICATION_DATE,
    fields::CONFERENCE_DATE,
    fields::START_DATE,
];

const LIST_FIELDS: &[&str] = &[fields::SDG_GOALS, fields::INDEXING_CATEGORIES];

/// Turns a raw suggested value into the form-native [`FieldValue`] for the
/// given form-local field. Never fails: values that do not parse into the
/// field's native shape are kept as text for the validator to flag.
pub fn coerce_for_field(local: &str, raw: &str) -> FieldValue {
    if yes_no_field(local) {
        return FieldValue::Token(coerce_yes_no(raw).to_string());
    }
    if LIST_FIELDS.contains(&local) {
        return FieldValue::Tokens(parse_list(raw));
    }
    if table_for(local).is_some() {
        return FieldValue::Token(to_canonical(local, raw));
    }
    if NUMERIC_FIELDS.contains(&local) {
        return match raw.trim().parse::<f64>() {
            Ok(n) => FieldValue::Number(n),
            Err(_) => FieldValue::Text(raw.to_string()),
        };
    }
    if DATE_FIELDS.contains(&local) {
        return match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(d) => FieldValue::Date(d),
            Err(_) => FieldValue::Text(raw.to_string()),
        };
    }
    FieldValue::Text(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn explicit_tables_round_trip() {
        let cases: &[(&str, &[(&str, &str)])] = &[
            (fields::QUARTILE, QUARTILE_TABLE),
            (fields::TARGETED_RESEARCH_TYPE, RESEARCH_TYPE_TABLE),
            (fields::COMMUNICATED_WITH_OFFICIAL_ID, YES_NO_TABLE),
            (fields::INDEXING_CATEGORIES, CATEGORY_TABLE),
        ];
        for (field, table) in cases {
            for (display, canonical) in *table {
                let c = to_canonical(field, display);
                assert_eq!(c, *canonical, "{field}: {display}");
                assert_eq!(to_display(field, &c), *display, "{field}: {canonical}");
            }
        }
    }

    #[test]
    fn unmapped_values_fall_back_without_failing() {
        assert_eq!(to_canonical(fields::QUARTILE, "  Q9 "), "q9");
        assert_eq!(to_display(fields::QUARTILE, "q9"), "q9");
        assert_eq!(to_canonical("unknown_field", "Whatever"), "whatever");
        assert_eq!(to_display("unknown_field", "whatever"), "whatever");
    }

    #[test]
    fn yes_no_coercion() {
        assert_eq!(coerce_yes_no("true"), "yes");
        assert_eq!(coerce_yes_no("TRUE"), "yes");
        assert_eq!(coerce_yes_no("Yes"), "yes");
        assert_eq!(coerce_yes_no("no"), "no");
        assert_eq!(coerce_yes_no("1"), "no");
        assert_eq!(coerce_yes_no(""), "no");
    }

    #[test]
    fn parse_list_trims_and_drops_empties() {
        let set = parse_list(" sdg3 , sdg7 ,, sdg3 ,");
        assert_eq!(set.len(), 2);
        assert!(set.contains("sdg3"));
        assert!(set.contains("sdg7"));
    }

    #[test]
    fn parse_list_accepts_json_arrays() {
        let set = parse_list_json(&json!(["scopus", " scie_wos ", ""]));
        assert_eq!(set.len(), 2);
        assert!(set.contains("scopus"));
        assert!(set.contains("scie_wos"));

        let set = parse_list_json(&json!("scopus, naas_rating_6_plus"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn name_map_is_bidirectional_with_passthrough() {
        assert_eq!(to_local_name("impactFactor"), fields::IMPACT_FACTOR);
        assert_eq!(to_backend_name(fields::IMPACT_FACTOR), "impactFactor");
        for (backend, local) in FIELD_NAME_MAP {
            assert_eq!(to_local_name(backend), *local);
            assert_eq!(to_backend_name(local), *backend);
        }
        assert_eq!(to_local_name("somethingElse"), "somethingElse");
        assert_eq!(to_backend_name("something_else"), "something_else");
    }

    #[test]
    fn coercion_matches_field_shape() {
        assert_eq!(
            coerce_for_field(fields::QUARTILE, "Top 1%"),
            FieldValue::Token("top1".into())
        );
        assert_eq!(
            coerce_for_field(fields::TARGETED_RESEARCH_TYPE, "SCI/SCIE"),
            FieldValue::Token("wos".into())
        );
        assert_eq!(
            coerce_for_field(fields::COMMUNICATED_WITH_OFFICIAL_ID, "true"),
            FieldValue::Token("yes".into())
        );
        assert_eq!(
            coerce_for_field(fields::IMPACT_FACTOR, "23.5"),
            FieldValue::Number(23.5)
        );
        // Unparseable numbers stay text so validation can report invalid_type.
        assert_eq!(
            coerce_for_field(fields::IMPACT_FACTOR, "very high"),
            FieldValue::Text("very high".into())
        );
        assert!(matches!(
            coerce_for_field(fields::PUBLICATION_DATE, "2024-05-17"),
            FieldValue::Date(_)
        ));
        assert!(matches!(
            coerce_for_field(fields::SDG_GOALS, "sdg3, sdg7"),
            FieldValue::Tokens(_)
        ));
    }
}
