use anyhow::Result;
use clap::Args;
use sqlx::PgPool;
use uuid::Uuid;

use scholar_core::models::{FieldSuggestion, SuggestionStatus};
use scholar_db::PgContributionStore;

#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Contribution id
    #[arg(long)]
    pub contribution: Uuid,

    /// Backend canonical field name (e.g. impactFactor)
    #[arg(long)]
    pub field: String,

    /// The value the reviewer proposes
    #[arg(long)]
    pub value: String,

    /// Current value, for the audit trail
    #[arg(long, default_value = "")]
    pub original: String,

    /// Reviewer id
    #[arg(long)]
    pub reviewer: Uuid,

    /// Optional note to the author
    #[arg(long)]
    pub note: Option<String>,
}

pub async fn run(pool: PgPool, args: SuggestArgs) -> Result<()> {
    let suggestion = FieldSuggestion {
        id: Uuid::new_v4(),
        field_name: args.field,
        original_value: args.original,
        suggested_value: args.value,
        suggestion_note: args.note,
        reviewer_id: args.reviewer,
        status: SuggestionStatus::Pending,
    };

    let store = PgContributionStore::new(pool);
    match store.insert_suggestion(args.contribution, &suggestion).await {
        Ok(id) => {
            println!("✅ Suggestion filed");
            println!("   Suggestion ID: {id}");
        }
        // One open suggestion per field; resolve it before filing another.
        Err(scholar_db::error::Error::Conflict(reason)) => {
            println!("❌ Not filed: {reason}");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
