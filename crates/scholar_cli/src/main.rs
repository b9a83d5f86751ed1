// scholar_cli/src/main.rs
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;

use scholar_cli::commands;
use scholar_cli::config::Config;

#[derive(Parser)]
#[command(name = "scholar")]
#[command(about = "Research contribution review & reconciliation toolchain", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the database schema
    InitDb(commands::init_db::InitDbArgs),

    /// Create a new empty contribution draft
    Init(commands::init::InitArgs),

    /// File a reviewer suggestion against a contribution
    Suggest(commands::suggest::SuggestArgs),

    /// Print a contribution, its suggestions, and the resubmission gate
    Show(commands::show::ShowArgs),

    /// Check a contribution against the requirement rule table
    Validate(commands::validate::ValidateArgs),

    /// Accept or reject one suggestion
    Respond(commands::respond::RespondArgs),

    /// Resubmit a contribution once the gate is open
    Resubmit(commands::resubmit::ResubmitArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config first so a missing DATABASE_URL fails fast.
    let config = Config::from_env()?;

    let cli = Cli::parse();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    match cli.command {
        Commands::InitDb(args) => commands::init_db::run(pool, args).await,
        Commands::Init(args) => commands::init::run(pool, args).await,
        Commands::Suggest(args) => commands::suggest::run(pool, args).await,
        Commands::Show(args) => commands::show::run(pool, args).await,
        Commands::Validate(args) => commands::validate::run(pool, args).await,
        Commands::Respond(args) => commands::respond::run(pool, args).await,
        Commands::Resubmit(args) => commands::resubmit::run(pool, args).await,
    }
}
