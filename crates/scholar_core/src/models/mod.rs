pub mod contribution;
pub mod suggestion;

pub use contribution::{
    Category, ConferenceSubType, Contribution, FieldValue, PublicationType, TargetedResearchType,
    WorkflowStatus, YesNo,
};
pub use suggestion::{FieldSuggestion, SuggestionStatus};
