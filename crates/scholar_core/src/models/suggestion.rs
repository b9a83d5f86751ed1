use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a reviewer suggestion. Monotonic: once non-pending the
/// status never reverts, which is the guard against duplicate responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStatus {
    Pending,
    Accepted,
    Rejected,
}

impl SuggestionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionStatus::Pending => "pending",
            SuggestionStatus::Accepted => "accepted",
            SuggestionStatus::Rejected => "rejected",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "pending" => Some(SuggestionStatus::Pending),
            "accepted" => Some(SuggestionStatus::Accepted),
            "rejected" => Some(SuggestionStatus::Rejected),
            _ => None,
        }
    }
}

/// A reviewer's proposed replacement for one field of a contribution.
///
/// `field_name` is the backend canonical name, not the form-local one;
/// the codec's name map translates at the apply boundary. The raw value
/// strings are kept exactly as the reviewer stored them; coercion into
/// form-native types happens only on accept. Suggestions are never
/// deleted; resolved ones remain as the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSuggestion {
    pub id: Uuid,
    pub field_name: String,
    pub original_value: String,
    pub suggested_value: String,
    pub suggestion_note: Option<String>,
    pub reviewer_id: Uuid,
    pub status: SuggestionStatus,
}
