use anyhow::{Context, Result};
use clap::Args;
use sqlx::PgPool;

#[derive(Args, Debug)]
pub struct InitDbArgs {}

pub async fn run(pool: PgPool, _args: InitDbArgs) -> Result<()> {
    scholar_db::schema::init_schema(&pool)
        .await
        .context("failed to apply schema")?;
    println!("✅ Schema applied");
    Ok(())
}
