//! Async orchestration layer: the persistence boundary trait, the
//! per-contribution suggestion ledger, and the reconciliation controller
//! that gates resubmission.

pub mod error;
pub mod ledger;
pub mod reconcile;
pub mod store;

pub use error::ReconcileError;
pub use ledger::SuggestionLedger;
pub use reconcile::ReconciliationController;
pub use store::{ContributionSnapshot, ContributionStore, StoreError};
