use anyhow::Result;
use clap::Args;
use sqlx::PgPool;
use uuid::Uuid;

use scholar_db::PgContributionStore;
use scholar_service::ReconciliationController;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Contribution id
    #[arg(long)]
    pub id: Uuid,
}

pub async fn run(pool: PgPool, args: ValidateArgs) -> Result<()> {
    let store = PgContributionStore::new(pool);
    let controller = ReconciliationController::load(store, args.id).await?;

    let report = controller.validate();
    if report.ok() {
        println!("✅ Contribution satisfies every requirement");
        return Ok(());
    }

    println!("❌ {} violation(s):", report.violations.len());
    for violation in &report.violations {
        println!("   [{:?}] {}", violation.reason, violation.message);
    }
    Ok(())
}
