use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use dbseed_db::MongoAdmin;
use dbseed_kernel::settings::{ConflictPolicy, Settings};

/// Provision a MongoDB database with a scoped user and an initial collection.
#[derive(Debug, Parser)]
#[command(name = "dbseed", version, about)]
struct Cli {
    /// Directory holding `base.toml` and `<env>.toml`
    #[arg(long, global = true, env = "DBSEED_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Deployment environment: local, staging or production
    #[arg(long = "env", global = true, env = "DBSEED_ENV", default_value = "local")]
    environment: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Connect, then select the database, create the user and the collection
    Run {
        /// Leave an existing user or collection alone instead of failing
        #[arg(long)]
        skip_existing: bool,
    },
    /// Check that the user and collection exist as configured
    Verify {
        /// Report a non-empty collection as a warning rather than a failure
        #[arg(long)]
        allow_documents: bool,
    },
    /// Print the provisioning steps as JSON without connecting
    Plan,
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()
            .map(|cwd| cwd.join("config"))
            .with_context(|| "unable to resolve current directory")?,
    };

    Settings::load_from(&config_dir, &cli.environment)
        .with_context(|| "failed to load dbseed settings")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Allow missing `.env` files without failing.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    dbseed_telemetry::init(&settings.telemetry)?;

    if settings.uses_local_default_password() {
        tracing::warn!("no bootstrap password configured; using the local default");
    }

    match cli.command {
        Command::Plan => {
            let plan = dbseed_app::default_plan(&settings.bootstrap);
            println!("{}", serde_json::to_string_pretty(&plan.describe())?);
        }
        Command::Run { skip_existing } => {
            let policy = if skip_existing {
                ConflictPolicy::Skip
            } else {
                settings.bootstrap.if_exists
            };

            tracing::info!(
                env = ?settings.environment,
                database = %settings.bootstrap.database,
                "dbseed run starting"
            );

            let admin = MongoAdmin::connect(&settings.database)
                .await
                .with_context(|| "failed to connect to MongoDB")?;
            let reports = dbseed_app::bootstrap(&settings, &admin, policy).await?;

            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        Command::Verify { allow_documents } => {
            let admin = MongoAdmin::connect(&settings.database)
                .await
                .with_context(|| "failed to connect to MongoDB")?;
            let report = dbseed_app::verify(&settings.bootstrap, &admin, allow_documents)
                .await
                .with_context(|| "verification could not complete")?;

            println!("{}", serde_json::to_string_pretty(&report)?);

            if !report.passed() {
                bail!(
                    "verification failed: {} check(s) did not pass",
                    report.failures().count()
                );
            }
        }
    }

    Ok(())
}
