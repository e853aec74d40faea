mod bootstrap;
mod config;
mod logging;
mod registered_plugins;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use feature_onboarding::{FeatureOnboardingContext, PluginDescriptor};
use finance::{LocalClient, TransactionQuery, TransactionStatus, TransactionType, TransactionsApi};
use serde::Serialize;
use steward_security::SecurityContext;
use uuid::Uuid;

use crate::bootstrap::App;
use crate::config::AppConfig;

/// Steward onboarding tool - seeds tenant data for granted features
#[derive(Parser)]
#[command(name = "steward-onboard")]
#[command(about = "Steward onboarding tool - seeds tenant data for granted features")]
#[command(version)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database connection string (overrides config)
    #[arg(long)]
    database: Option<String>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every applicable feature plugin for a tenant
    Onboard {
        #[arg(long)]
        tenant: Uuid,

        /// User performing the onboarding
        #[arg(long)]
        user: Uuid,

        /// Subscription tier label
        #[arg(long, default_value = "standard")]
        tier: String,

        /// Granted feature code (repeatable)
        #[arg(long = "feature", required = true)]
        features: Vec<String>,
    },
    /// Print the enriched transactions of a tenant
    Transactions {
        #[arg(long)]
        tenant: Uuid,

        #[arg(long)]
        status: Option<TransactionStatus>,

        #[arg(long = "type")]
        transaction_type: Option<TransactionType>,

        /// Case-insensitive match on number or description
        #[arg(long)]
        text: Option<String>,
    },
    /// Print registered plugins in execution order
    Plugins,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config
        && !Path::new(path).is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.display());
    }

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(dsn) = cli.database {
        config.database.dsn = dsn;
    }

    logging::init_logging(&config.logging, cli.verbose);
    tracing::debug!(?config, "Effective configuration");

    let app = App::start(&config).await?;

    match cli.command {
        Commands::Onboard {
            tenant,
            user,
            tier,
            features,
        } => onboard(&app, tenant, user, tier, features).await,
        Commands::Transactions {
            tenant,
            status,
            transaction_type,
            text,
        } => {
            let query = TransactionQuery {
                status,
                transaction_type,
                text,
                ..TransactionQuery::default()
            };
            transactions(&app, tenant, &query).await
        }
        Commands::Plugins => plugins(&app),
    }
}

async fn onboard(
    app: &App,
    tenant: Uuid,
    user: Uuid,
    tier: String,
    features: Vec<String>,
) -> Result<()> {
    let ctx = FeatureOnboardingContext::new(tenant, user, tier, features);
    let summary = app
        .onboarding
        .run(&ctx)
        .await
        .context("onboarding rejected")?;

    print_json(&summary)?;

    if !summary.is_complete_success() {
        anyhow::bail!("feature plugins failed: {}", summary.failed.join(", "));
    }
    Ok(())
}

async fn transactions(app: &App, tenant: Uuid, query: &TransactionQuery) -> Result<()> {
    let ctx = SecurityContext::builder()
        .tenant_id(tenant)
        .subject_type("cli")
        .build();
    let client = LocalClient::new(app.finance.clone());

    let found = client
        .search_transactions(&ctx, query)
        .await
        .context("failed to list transactions")?;
    print_json(&found)
}

fn plugins(app: &App) -> Result<()> {
    let ordered: Vec<PluginDescriptor> = app
        .onboarding
        .registry()
        .get_all_sorted()
        .iter()
        .map(|plugin| plugin.descriptor().clone())
        .collect();
    print_json(&ordered)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
