//! The persistence boundary.
//!
//! The engine never talks to a database directly; it consumes these four
//! opaque async operations from whatever backend the deployment wires in.
//! Field names crossing this boundary use the backend canonical naming,
//! translated through the codec's name map, never the form-local naming.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use scholar_core::models::{Contribution, FieldSuggestion, FieldValue};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("contribution not found: {0}")]
    NotFound(Uuid),

    #[error("conflicting update: {0}")]
    Conflict(String),

    #[error("backend call failed: {0}")]
    Backend(String),
}

/// What a fetch returns: the draft plus every suggestion ever filed
/// against it, resolved ones included (they are the audit trail).
#[derive(Debug, Clone)]
pub struct ContributionSnapshot {
    pub contribution: Contribution,
    pub edit_suggestions: Vec<FieldSuggestion>,
}

#[async_trait]
pub trait ContributionStore: Send + Sync {
    async fn fetch_contribution(&self, id: Uuid) -> Result<ContributionSnapshot, StoreError>;

    /// Persists a partial field map, keyed by backend names. An empty
    /// value overwrites (clears) whatever the backend held for that field.
    async fn update_contribution(
        &self,
        id: Uuid,
        fields: &BTreeMap<String, FieldValue>,
    ) -> Result<(), StoreError>;

    async fn respond_to_suggestion(&self, id: Uuid, accept: bool) -> Result<(), StoreError>;

    async fn resubmit_contribution(&self, id: Uuid) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: ContributionStore + ?Sized> ContributionStore for Arc<S> {
    async fn fetch_contribution(&self, id: Uuid) -> Result<ContributionSnapshot, StoreError> {
        (**self).fetch_contribution(id).await
    }

    async fn update_contribution(
        &self,
        id: Uuid,
        fields: &BTreeMap<String, FieldValue>,
    ) -> Result<(), StoreError> {
        (**self).update_contribution(id, fields).await
    }

    async fn respond_to_suggestion(&self, id: Uuid, accept: bool) -> Result<(), StoreError> {
        (**self).respond_to_suggestion(id, accept).await
    }

    async fn resubmit_contribution(&self, id: Uuid) -> Result<(), StoreError> {
        (**self).resubmit_contribution(id).await
    }
}
