//! Per-contribution suggestion ledger.
//!
//! Tracks every suggestion filed against one contribution. Entries are
//! never removed (resolved suggestions stay as the audit trail) and a
//! status transition happens at most once per entry.

use uuid::Uuid;

use scholar_core::models::{FieldSuggestion, SuggestionStatus};

#[derive(Debug, Default)]
pub struct SuggestionLedger {
    entries: Vec<FieldSuggestion>,
}

impl SuggestionLedger {
    /// Builds the ledger from the store's records. At most one pending
    /// suggestion may target a field; should the backend ever hand us
    /// more, the extras are kept for audit but only the first counts as
    /// pending, and we log the anomaly.
    pub fn from_records(records: Vec<FieldSuggestion>) -> Self {
        let mut seen_pending: Vec<&str> = Vec::new();
        for entry in records.iter().filter(|e| e.status == SuggestionStatus::Pending) {
            if seen_pending.contains(&entry.field_name.as_str()) {
                tracing::warn!(
                    suggestion = %entry.id,
                    field = %entry.field_name,
                    "duplicate pending suggestion for field; only the first is actionable"
                );
            } else {
                seen_pending.push(entry.field_name.as_str());
            }
        }
        Self { entries: records }
    }

    pub fn get(&self, id: Uuid) -> Option<&FieldSuggestion> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// The actionable suggestion for a backend field name, if any.
    pub fn pending_for(&self, field_name: &str) -> Option<&FieldSuggestion> {
        self.entries
            .iter()
            .find(|e| e.status == SuggestionStatus::Pending && e.field_name == field_name)
    }

    pub fn all_pending(&self) -> Vec<&FieldSuggestion> {
        self.entries
            .iter()
            .filter(|e| e.status == SuggestionStatus::Pending)
            .collect()
    }

    pub fn all(&self) -> &[FieldSuggestion] {
        &self.entries
    }

    /// One-shot local transition, called only after the store confirmed
    /// the same transition. Monotonic: a resolved entry is never touched.
    pub(crate) fn mark_resolved(&mut self, id: Uuid, accept: bool) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.id == id && e.status == SuggestionStatus::Pending)
        {
            entry.status = if accept {
                SuggestionStatus::Accepted
            } else {
                SuggestionStatus::Rejected
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(field: &str, status: SuggestionStatus) -> FieldSuggestion {
        FieldSuggestion {
            id: Uuid::new_v4(),
            field_name: field.to_string(),
            original_value: "old".to_string(),
            suggested_value: "new".to_string(),
            suggestion_note: None,
            reviewer_id: Uuid::new_v4(),
            status,
        }
    }

    #[test]
    fn pending_lookup_ignores_resolved_entries() {
        let ledger = SuggestionLedger::from_records(vec![
            suggestion("impactFactor", SuggestionStatus::Accepted),
            suggestion("impactFactor", SuggestionStatus::Pending),
            suggestion("sjr", SuggestionStatus::Rejected),
        ]);
        assert!(ledger.pending_for("impactFactor").is_some());
        assert!(ledger.pending_for("sjr").is_none());
        assert_eq!(ledger.all_pending().len(), 1);
    }

    #[test]
    fn mark_resolved_is_one_shot() {
        let pending = suggestion("quartile", SuggestionStatus::Pending);
        let id = pending.id;
        let mut ledger = SuggestionLedger::from_records(vec![pending]);

        ledger.mark_resolved(id, true);
        assert_eq!(ledger.get(id).unwrap().status, SuggestionStatus::Accepted);

        // A second call with the opposite verdict must not flip it.
        ledger.mark_resolved(id, false);
        assert_eq!(ledger.get(id).unwrap().status, SuggestionStatus::Accepted);
    }

    #[test]
    fn audit_trail_is_retained() {
        let ledger = SuggestionLedger::from_records(vec![
            suggestion("venue", SuggestionStatus::Accepted),
            suggestion("topic", SuggestionStatus::Rejected),
        ]);
        assert_eq!(ledger.all().len(), 2);
        assert!(ledger.all_pending().is_empty());
    }
}
