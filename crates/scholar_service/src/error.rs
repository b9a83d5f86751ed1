use thiserror::Error;
use uuid::Uuid;

use scholar_core::error::FieldEditError;
use scholar_core::models::WorkflowStatus;
use scholar_core::validation::FieldViolation;

use crate::store::StoreError;

/// Everything that can go wrong while reconciling a contribution.
/// Nothing here is fatal: every variant is returned as a value and the
/// caller decides whether to retry, surface, or drop.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// One or more fields violate the requirement rule table. Blocks
    /// submission only; the draft stays editable.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    /// The suggestion was already accepted or rejected. A no-op guard
    /// against double clicks and duplicate network retries.
    #[error("suggestion {suggestion} was already resolved")]
    AlreadyResolved { suggestion: Uuid },

    /// A backend call failed before any local state was touched. Safe to
    /// retry verbatim.
    #[error("persistence failure: {0}")]
    Persistence(#[from] StoreError),

    #[error("field '{0}' is fixed at creation and cannot be edited")]
    ImmutableField(String),

    #[error("contribution is {} and no longer editable", .0.as_str())]
    ContributionLocked(WorkflowStatus),

    #[error("no suggestion with id {0}")]
    UnknownSuggestion(Uuid),

    /// The resubmission gate is closed: pending suggestions remain.
    #[error("{0} suggestion(s) still pending; resolve them before resubmitting")]
    SuggestionsPending(usize),
}

impl From<FieldEditError> for ReconcileError {
    fn from(err: FieldEditError) -> Self {
        match err {
            FieldEditError::Immutable(field) => ReconcileError::ImmutableField(field),
            FieldEditError::Terminal(status) => ReconcileError::ContributionLocked(status),
        }
    }
}
