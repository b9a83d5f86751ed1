use anyhow::{anyhow, Result};
use clap::Args;
use sqlx::PgPool;
use uuid::Uuid;

use scholar_core::models::{ConferenceSubType, Contribution, PublicationType};
use scholar_db::PgContributionStore;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Publication type token (research_paper, book, book_chapter,
    /// conference_paper, grant)
    #[arg(long)]
    pub publication_type: String,

    /// Conference sub-type token; mandatory for conference_paper and
    /// fixed once the draft exists
    #[arg(long)]
    pub conference_sub_type: Option<String>,
}

pub async fn run(pool: PgPool, args: InitArgs) -> Result<()> {
    let publication_type = PublicationType::from_token(&args.publication_type)
        .ok_or_else(|| anyhow!("unknown publication type '{}'", args.publication_type))?;
    let sub_type = match &args.conference_sub_type {
        Some(token) => Some(
            ConferenceSubType::from_token(token)
                .ok_or_else(|| anyhow!("unknown conference sub-type '{token}'"))?,
        ),
        None => None,
    };

    let contribution = Contribution::new(Uuid::new_v4(), publication_type, sub_type);
    let store = PgContributionStore::new(pool);
    let id = store.create_contribution(&contribution).await?;

    println!("✅ Draft created");
    println!("   Contribution ID: {id}");
    Ok(())
}
