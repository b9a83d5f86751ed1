use anyhow::Result;
use clap::Args;
use sqlx::PgPool;
use uuid::Uuid;

use scholar_db::PgContributionStore;
use scholar_service::{ReconcileError, ReconciliationController};

#[derive(Args, Debug)]
pub struct RespondArgs {
    /// Contribution id
    #[arg(long)]
    pub contribution: Uuid,

    /// Suggestion id
    #[arg(long)]
    pub suggestion: Uuid,

    /// Accept the suggested value; omit to reject
    #[arg(long)]
    pub accept: bool,
}

pub async fn run(pool: PgPool, args: RespondArgs) -> Result<()> {
    let store = PgContributionStore::new(pool);
    let mut controller = ReconciliationController::load(store, args.contribution).await?;

    let result = if args.accept {
        controller.accept(args.suggestion).await
    } else {
        controller.reject(args.suggestion).await
    };

    match result {
        Ok(()) => {
            println!(
                "✅ Suggestion {} {}",
                args.suggestion,
                if args.accept { "accepted" } else { "rejected" }
            );
            if args.accept {
                println!("   Pending suggestions left: {}", controller.ledger().all_pending().len());
            }
        }
        // Informational, not an error: someone already resolved it.
        Err(ReconcileError::AlreadyResolved { suggestion }) => {
            println!("ℹ️  Suggestion {suggestion} was already resolved; nothing changed");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
