pub mod error;
pub mod schema;
pub mod store;

// Re-export common types for convenience
pub use store::PgContributionStore;
