use anyhow::Result;
use clap::Args;
use sqlx::PgPool;
use uuid::Uuid;

use scholar_db::PgContributionStore;
use scholar_service::{ContributionStore, ReconciliationController};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Contribution id
    #[arg(long)]
    pub id: Uuid,
}

pub async fn run(pool: PgPool, args: ShowArgs) -> Result<()> {
    let store = PgContributionStore::new(pool);
    let snapshot = store.fetch_contribution(args.id).await?;
    println!("{}", serde_json::to_string_pretty(&snapshot.contribution)?);

    let controller = ReconciliationController::load(store, args.id).await?;
    let pending = controller.ledger().all_pending();
    println!(
        "Suggestions: {} total, {} pending",
        controller.ledger().all().len(),
        pending.len()
    );
    for suggestion in pending {
        println!(
            "   ⏳ {}  {} -> '{}'",
            suggestion.id, suggestion.field_name, suggestion.suggested_value
        );
    }
    println!(
        "Resubmission gate: {}",
        if controller.can_resubmit() { "open" } else { "closed" }
    );
    Ok(())
}
