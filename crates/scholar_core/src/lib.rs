//! Pure domain core of the research contribution review engine: the
//! canonical value codec, the requirement rule table, and draft
//! validation. No I/O lives here.

pub mod codec;
pub mod error;
pub mod fields;
pub mod models;
pub mod rules;
pub mod validation;

use validation::{rules as vrules, ValidationEngine};

/// The standard rule registry used by [`validation::validate`].
pub fn standard_validator() -> ValidationEngine {
    ValidationEngine::new()
        .add_rule(vrules::RequiredPresenceRule)
        .add_rule(vrules::ConstraintRule)
}
