//! Form-local field names.
//!
//! Every field of the contribution draft is addressed by one of these
//! constants. The backend uses its own (camelCase) naming; the codec's
//! name map translates between the two at the suggestion boundary.

// Shared across publication types
pub const PUBLICATION_TYPE: &str = "publication_type";
pub const CONFERENCE_SUB_TYPE: &str = "conference_sub_type";
pub const PUBLICATION_DATE: &str = "publication_date";
pub const SDG_GOALS: &str = "sdg_goals";
pub const COMMUNICATED_WITH_OFFICIAL_ID: &str = "communicated_with_official_id";
pub const PERSONAL_EMAIL: &str = "personal_email";

// Research paper metrics
pub const INDEXING_CATEGORIES: &str = "indexing_categories";
pub const TARGETED_RESEARCH_TYPE: &str = "targeted_research_type";
pub const QUARTILE: &str = "quartile";
pub const SJR: &str = "sjr";
pub const IMPACT_FACTOR: &str = "impact_factor";
pub const NAAS_RATING: &str = "naas_rating";

// Book / book chapter
pub const PUBLISHER_NAME: &str = "publisher_name";
pub const ISBN: &str = "isbn";
pub const NATIONAL_INTERNATIONAL: &str = "national_international";
pub const BOOK_INDEXING_TYPE: &str = "book_indexing_type";
pub const BOOK_PUBLICATION_TYPE: &str = "book_publication_type";

// Conference activity
pub const CONFERENCE_TYPE: &str = "conference_type";
pub const PROCEEDINGS_QUARTILE: &str = "proceedings_quartile";
pub const VENUE: &str = "venue";
pub const TOPIC: &str = "topic";
pub const CONFERENCE_DATE: &str = "conference_date";
pub const EVENT_CATEGORY: &str = "event_category";

// Grant
pub const FUNDING_AGENCY: &str = "funding_agency";
pub const GRANT_AMOUNT: &str = "grant_amount";
pub const START_DATE: &str = "start_date";
