use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FieldEditError;
use crate::fields;

// ---------------------------------------------------------------------------
// Publication taxonomy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationType {
    ResearchPaper,
    Book,
    BookChapter,
    ConferencePaper,
    Grant,
}

impl PublicationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationType::ResearchPaper => "research_paper",
            PublicationType::Book => "book",
            PublicationType::BookChapter => "book_chapter",
            PublicationType::ConferencePaper => "conference_paper",
            PublicationType::Grant => "grant",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "research_paper" => Some(PublicationType::ResearchPaper),
            "book" => Some(PublicationType::Book),
            "book_chapter" => Some(PublicationType::BookChapter),
            "conference_paper" => Some(PublicationType::ConferencePaper),
            "grant" => Some(PublicationType::Grant),
            _ => None,
        }
    }
}

/// Kind of conference contribution. Fixed at creation, like the
/// publication type itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConferenceSubType {
    PaperIndexedScopus,
    PaperNotIndexed,
    KeynoteSpeakerInvitedTalks,
    OrganizerCoordinatorMember,
}

impl ConferenceSubType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConferenceSubType::PaperIndexedScopus => "paper_indexed_scopus",
            ConferenceSubType::PaperNotIndexed => "paper_not_indexed",
            ConferenceSubType::KeynoteSpeakerInvitedTalks => "keynote_speaker_invited_talks",
            ConferenceSubType::OrganizerCoordinatorMember => "organizer_coordinator_member",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "paper_indexed_scopus" => Some(ConferenceSubType::PaperIndexedScopus),
            "paper_not_indexed" => Some(ConferenceSubType::PaperNotIndexed),
            "keynote_speaker_invited_talks" => Some(ConferenceSubType::KeynoteSpeakerInvitedTalks),
            "organizer_coordinator_member" => Some(ConferenceSubType::OrganizerCoordinatorMember),
            _ => None,
        }
    }
}

/// Indexing category tags selected by the author on a research paper.
/// Categories are not mutually exclusive; the *set* drives which metric
/// fields become mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "scopus")]
    Scopus,
    #[serde(rename = "abdc_scopus_wos")]
    AbdcScopusWos,
    #[serde(rename = "nature_science_lancet_cell_nejm")]
    NatureScienceLancetCellNejm,
    #[serde(rename = "subsidiary_if_above_20")]
    SubsidiaryIfAbove20,
    #[serde(rename = "scie_wos")]
    ScieWos,
    #[serde(rename = "naas_rating_6_plus")]
    NaasRating6Plus,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Scopus => "scopus",
            Category::AbdcScopusWos => "abdc_scopus_wos",
            Category::NatureScienceLancetCellNejm => "nature_science_lancet_cell_nejm",
            Category::SubsidiaryIfAbove20 => "subsidiary_if_above_20",
            Category::ScieWos => "scie_wos",
            Category::NaasRating6Plus => "naas_rating_6_plus",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "scopus" => Some(Category::Scopus),
            "abdc_scopus_wos" => Some(Category::AbdcScopusWos),
            "nature_science_lancet_cell_nejm" => Some(Category::NatureScienceLancetCellNejm),
            "subsidiary_if_above_20" => Some(Category::SubsidiaryIfAbove20),
            "scie_wos" => Some(Category::ScieWos),
            "naas_rating_6_plus" => Some(Category::NaasRating6Plus),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetedResearchType {
    Scopus,
    Wos,
    Both,
}

impl TargetedResearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetedResearchType::Scopus => "scopus",
            TargetedResearchType::Wos => "wos",
            TargetedResearchType::Both => "both",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "scopus" => Some(TargetedResearchType::Scopus),
            "wos" => Some(TargetedResearchType::Wos),
            "both" => Some(TargetedResearchType::Both),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::Yes => "yes",
            YesNo::No => "no",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "yes" => Some(YesNo::Yes),
            "no" => Some(YesNo::No),
            _ => None,
        }
    }
}

/// Read-only mirror of the workflow collaborator's state. The engine never
/// transitions this locally; it only refuses edits once terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    Draft,
    UnderReview,
    ChangesRequested,
    Resubmitted,
    Approved,
    Rejected,
}

impl WorkflowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Draft => "draft",
            WorkflowStatus::UnderReview => "under_review",
            WorkflowStatus::ChangesRequested => "changes_requested",
            WorkflowStatus::Resubmitted => "resubmitted",
            WorkflowStatus::Approved => "approved",
            WorkflowStatus::Rejected => "rejected",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "draft" => Some(WorkflowStatus::Draft),
            "under_review" => Some(WorkflowStatus::UnderReview),
            "changes_requested" => Some(WorkflowStatus::ChangesRequested),
            "resubmitted" => Some(WorkflowStatus::Resubmitted),
            "approved" => Some(WorkflowStatus::Approved),
            "rejected" => Some(WorkflowStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowStatus::Approved | WorkflowStatus::Rejected)
    }
}

// ---------------------------------------------------------------------------
// Field values
// ---------------------------------------------------------------------------

/// A declared semantic value for one draft field. The backend stores
/// everything as loosely typed JSON; we decode into an explicit variant
/// instead of indexing into an untyped bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Token(String),
    Tokens(BTreeSet<String>),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) | FieldValue::Token(s) => s.trim().is_empty(),
            FieldValue::Tokens(set) => set.is_empty(),
            FieldValue::Number(_) | FieldValue::Date(_) => false,
        }
    }

    /// Numeric view of the value, tolerating numbers stored as text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) | FieldValue::Token(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_token(&self) -> Option<&str> {
        match self {
            FieldValue::Token(s) | FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// The draft itself
// ---------------------------------------------------------------------------

/// A draft research-output record being edited by its author.
///
/// `publication_type` and `conference_sub_type` are fixed at creation and
/// private here so every mutation goes through [`Contribution::set_field`],
/// which rejects them. The `fields` bag is a superset of all fields across
/// publication types; only the type's own partition is consulted by
/// validation and submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contribution {
    pub id: Uuid,
    publication_type: PublicationType,
    conference_sub_type: Option<ConferenceSubType>,
    pub status: WorkflowStatus,
    pub selected_indexing_categories: BTreeSet<Category>,
    pub fields: BTreeMap<String, FieldValue>,
}

impl Contribution {
    pub fn new(
        id: Uuid,
        publication_type: PublicationType,
        conference_sub_type: Option<ConferenceSubType>,
    ) -> Self {
        Self {
            id,
            publication_type,
            conference_sub_type,
            status: WorkflowStatus::Draft,
            selected_indexing_categories: BTreeSet::new(),
            fields: BTreeMap::new(),
        }
    }

    /// Rehydrates a draft from the backing store.
    pub fn from_parts(
        id: Uuid,
        publication_type: PublicationType,
        conference_sub_type: Option<ConferenceSubType>,
        status: WorkflowStatus,
        selected_indexing_categories: BTreeSet<Category>,
        fields: BTreeMap<String, FieldValue>,
    ) -> Self {
        Self {
            id,
            publication_type,
            conference_sub_type,
            status,
            selected_indexing_categories,
            fields,
        }
    }

    pub fn publication_type(&self) -> PublicationType {
        self.publication_type
    }

    pub fn conference_sub_type(&self) -> Option<ConferenceSubType> {
        self.conference_sub_type
    }

    /// Whether a write to `name` would be allowed right now. Same refusals
    /// as [`Contribution::set_field`], without the write, so callers can
    /// probe before committing anything remote.
    pub fn check_editable(&self, name: &str) -> Result<(), FieldEditError> {
        if self.status.is_terminal() {
            return Err(FieldEditError::Terminal(self.status));
        }
        if name == fields::PUBLICATION_TYPE || name == fields::CONFERENCE_SUB_TYPE {
            return Err(FieldEditError::Immutable(name.to_string()));
        }
        Ok(())
    }

    /// Writes one field of the draft, rejecting the immutable ones and any
    /// edit once the workflow state is terminal.
    pub fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldEditError> {
        self.check_editable(name)?;
        self.fields.insert(name.to_string(), value);
        Ok(())
    }

    /// Drops a field value entirely. Used to apply the rule table's
    /// `cleared` set so stale metrics never survive a selection switch.
    pub fn remove_field(&mut self, name: &str) {
        self.fields.remove(name);
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn targeted_research_type(&self) -> Option<TargetedResearchType> {
        self.field(fields::TARGETED_RESEARCH_TYPE)
            .and_then(FieldValue::as_token)
            .and_then(TargetedResearchType::from_token)
    }

    pub fn communicated_with_official_id(&self) -> Option<YesNo> {
        self.field(fields::COMMUNICATED_WITH_OFFICIAL_ID)
            .and_then(FieldValue::as_token)
            .and_then(YesNo::from_token)
    }
}
