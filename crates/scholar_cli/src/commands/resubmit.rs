use anyhow::Result;
use clap::Args;
use sqlx::PgPool;
use uuid::Uuid;

use scholar_db::PgContributionStore;
use scholar_service::{ReconcileError, ReconciliationController};

#[derive(Args, Debug)]
pub struct ResubmitArgs {
    /// Contribution id
    #[arg(long)]
    pub id: Uuid,
}

pub async fn run(pool: PgPool, args: ResubmitArgs) -> Result<()> {
    let store = PgContributionStore::new(pool);
    let mut controller = ReconciliationController::load(store, args.id).await?;

    match controller.resubmit().await {
        Ok(()) => {
            println!("✅ Contribution {} resubmitted", args.id);
            Ok(())
        }
        Err(ReconcileError::SuggestionsPending(count)) => {
            println!("❌ Gate closed: {count} suggestion(s) still pending");
            Ok(())
        }
        Err(ReconcileError::Validation(violations)) => {
            println!("❌ {} field(s) violate the requirements:", violations.len());
            for violation in &violations {
                println!("   {}", violation.message);
            }
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
