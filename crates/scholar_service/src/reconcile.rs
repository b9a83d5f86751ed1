//! Reconciliation controller.
//!
//! Orchestrates the accept/reject lifecycle over one contribution and
//! owns the resubmission gate. Every store call is awaited to completion
//! before the next; a failed call surfaces as an error value with no
//! local state touched, so the caller can retry verbatim.

use std::collections::{BTreeMap, BTreeSet};

use uuid::Uuid;

use scholar_core::codec;
use scholar_core::fields;
use scholar_core::models::{
    Category, Contribution, FieldSuggestion, FieldValue, PublicationType, SuggestionStatus,
};
use scholar_core::rules::{compute_required, partition, RequirementInput};
use scholar_core::validation::{validate, ValidationReport};

use crate::error::ReconcileError;
use crate::ledger::SuggestionLedger;
use crate::store::ContributionStore;

pub struct ReconciliationController<S> {
    store: S,
    contribution: Contribution,
    ledger: SuggestionLedger,
}

impl<S: ContributionStore> ReconciliationController<S> {
    /// Fetches the draft and its suggestion ledger from the store.
    pub async fn load(store: S, id: Uuid) -> Result<Self, ReconcileError> {
        let snapshot = store.fetch_contribution(id).await?;
        Ok(Self {
            store,
            contribution: snapshot.contribution,
            ledger: SuggestionLedger::from_records(snapshot.edit_suggestions),
        })
    }

    /// Re-fetches draft and ledger, discarding unsaved local edits.
    pub async fn refresh(&mut self) -> Result<(), ReconcileError> {
        let snapshot = self.store.fetch_contribution(self.contribution.id).await?;
        self.contribution = snapshot.contribution;
        self.ledger = SuggestionLedger::from_records(snapshot.edit_suggestions);
        Ok(())
    }

    pub fn contribution(&self) -> &Contribution {
        &self.contribution
    }

    pub fn ledger(&self) -> &SuggestionLedger {
        &self.ledger
    }

    /// The actionable suggestion for a backend field name, if any.
    pub fn pending_suggestion_for(&self, field_name: &str) -> Option<&FieldSuggestion> {
        self.ledger.pending_for(field_name)
    }

    /// The resubmission gate: a single stray pending suggestion blocks
    /// resubmission no matter how many were already resolved.
    pub fn can_resubmit(&self) -> bool {
        self.ledger.all_pending().is_empty()
    }

    pub fn validate(&self) -> ValidationReport {
        validate(&self.contribution)
    }

    // ---------------------------------------------------------------------
    // Direct author edits
    // ---------------------------------------------------------------------

    /// Writes one field of the draft by its form-local name, then applies
    /// whatever the rule table says must be cleared, atomically with the
    /// change, so a stale metric never survives a selection switch.
    pub fn edit_field(&mut self, name: &str, value: FieldValue) -> Result<(), ReconcileError> {
        self.contribution.set_field(name, value)?;
        if name == fields::TARGETED_RESEARCH_TYPE {
            self.apply_clearing();
        }
        Ok(())
    }

    /// Replaces the selected indexing category set (research papers).
    pub fn set_categories(&mut self, categories: BTreeSet<Category>) -> Result<(), ReconcileError> {
        if self.contribution.status.is_terminal() {
            return Err(ReconcileError::ContributionLocked(self.contribution.status));
        }
        self.contribution.selected_indexing_categories = categories;
        self.apply_clearing();
        Ok(())
    }

    fn apply_clearing(&mut self) {
        let required = compute_required(&RequirementInput::from_contribution(&self.contribution));
        for field in required.cleared() {
            self.contribution.remove_field(field);
        }
    }

    // ---------------------------------------------------------------------
    // Suggestion lifecycle
    // ---------------------------------------------------------------------

    pub async fn accept(&mut self, suggestion_id: Uuid) -> Result<(), ReconcileError> {
        self.respond(suggestion_id, true).await
    }

    pub async fn reject(&mut self, suggestion_id: Uuid) -> Result<(), ReconcileError> {
        self.respond(suggestion_id, false).await
    }

    /// One-shot response. Applicability is probed up front so a suggestion
    /// that could never land (immutable field, terminal draft) is refused
    /// outright instead of being marked accepted anywhere. The status
    /// change is persisted *before* anything is applied locally: if the
    /// store call fails the suggestion stays pending and the draft is
    /// untouched. An accepted value is then written back through
    /// `update_contribution` so it outlives this controller instance.
    async fn respond(&mut self, suggestion_id: Uuid, accept: bool) -> Result<(), ReconcileError> {
        let (field_name, suggested_value) = {
            let entry = self
                .ledger
                .get(suggestion_id)
                .ok_or(ReconcileError::UnknownSuggestion(suggestion_id))?;
            if entry.status != SuggestionStatus::Pending {
                return Err(ReconcileError::AlreadyResolved {
                    suggestion: suggestion_id,
                });
            }
            (entry.field_name.clone(), entry.suggested_value.clone())
        };

        if accept {
            self.contribution
                .check_editable(codec::to_local_name(&field_name))?;
        }

        self.store.respond_to_suggestion(suggestion_id, accept).await?;
        self.ledger.mark_resolved(suggestion_id, accept);

        if accept {
            self.apply_accepted(&field_name, &suggested_value)?;
            let payload = self.accepted_payload(&field_name);
            self.store
                .update_contribution(self.contribution.id, &payload)
                .await?;
        }
        Ok(())
    }

    /// Applies an accepted value: translate the backend field name,
    /// coerce the raw string into the form-native type, and run the
    /// clearing side effect when the accepted field triggers one.
    fn apply_accepted(&mut self, backend_field: &str, raw: &str) -> Result<(), ReconcileError> {
        let local = codec::to_local_name(backend_field);

        if local == fields::INDEXING_CATEGORIES {
            let categories = codec::parse_list(raw)
                .iter()
                .filter_map(|t| Category::from_token(t))
                .collect();
            return self.set_categories(categories);
        }

        let value = codec::coerce_for_field(local, raw);
        self.contribution.set_field(local, value)?;
        if local == fields::TARGETED_RESEARCH_TYPE {
            self.apply_clearing();
        }
        Ok(())
    }

    /// Write-back for one accepted suggestion: the applied field plus,
    /// when the field triggers clearing, the cleared metrics as empty
    /// text so they are erased remotely as well.
    fn accepted_payload(&self, backend_field: &str) -> BTreeMap<String, FieldValue> {
        let mut payload = BTreeMap::new();
        let local = codec::to_local_name(backend_field);

        if local == fields::INDEXING_CATEGORIES {
            let tokens = self
                .contribution
                .selected_indexing_categories
                .iter()
                .map(|c| c.as_str().to_string())
                .collect();
            payload.insert(
                codec::to_backend_name(local).to_string(),
                FieldValue::Tokens(tokens),
            );
        } else {
            let value = self
                .contribution
                .field(local)
                .cloned()
                .unwrap_or_else(|| FieldValue::Text(String::new()));
            payload.insert(codec::to_backend_name(local).to_string(), value);
        }

        if local == fields::TARGETED_RESEARCH_TYPE || local == fields::INDEXING_CATEGORIES {
            let required =
                compute_required(&RequirementInput::from_contribution(&self.contribution));
            for field in required.cleared() {
                payload.insert(
                    codec::to_backend_name(field).to_string(),
                    FieldValue::Text(String::new()),
                );
            }
        }
        payload
    }

    // ---------------------------------------------------------------------
    // Resubmission
    // ---------------------------------------------------------------------

    /// Resubmits the draft: gate, validate, persist field edits, and only
    /// then hand the workflow transition to the backend. The ordering
    /// guarantees workflow state and field edits cannot diverge: if the
    /// field save fails, no transition is attempted.
    pub async fn resubmit(&mut self) -> Result<(), ReconcileError> {
        let pending = self.ledger.all_pending().len();
        if pending > 0 {
            return Err(ReconcileError::SuggestionsPending(pending));
        }

        let report = self.validate();
        if !report.ok() {
            return Err(ReconcileError::Validation(report.violations));
        }

        let payload = self.wire_fields();
        self.store
            .update_contribution(self.contribution.id, &payload)
            .await?;
        self.store
            .resubmit_contribution(self.contribution.id)
            .await?;
        Ok(())
    }

    /// The active partition of the draft, keyed by backend names. Fields
    /// the partition names but the draft no longer holds are sent as
    /// empty text so a cleared metric is erased remotely too.
    fn wire_fields(&self) -> BTreeMap<String, FieldValue> {
        let mut payload = BTreeMap::new();
        for field in partition(self.contribution.publication_type()) {
            let value = self
                .contribution
                .field(field)
                .cloned()
                .unwrap_or_else(|| FieldValue::Text(String::new()));
            payload.insert(codec::to_backend_name(field).to_string(), value);
        }
        if self.contribution.publication_type() == PublicationType::ResearchPaper {
            let tokens = self
                .contribution
                .selected_indexing_categories
                .iter()
                .map(|c| c.as_str().to_string())
                .collect();
            payload.insert(
                codec::to_backend_name(fields::INDEXING_CATEGORIES).to_string(),
                FieldValue::Tokens(tokens),
            );
        }
        payload
    }
}
