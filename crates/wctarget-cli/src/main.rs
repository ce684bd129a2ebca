mod upload;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::upload::RunOutcome;

#[derive(Debug, Parser)]
#[command(name = "target-woocommerce")]
#[command(about = "Export product records to a WooCommerce store")]
struct Cli {
    /// JSON config file naming the site, credentials and input directory
    #[arg(short, long, value_name = "FILE")]
    config: PathBuf,

    /// Map and log what would be uploaded without contacting the store
    #[arg(long)]
    dry_run: bool,

    /// Exit with status 1 when the store rejects any upload step
    #[arg(long)]
    fail_on_error: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = wctarget_core::load_config(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(?config, "configuration loaded");

    let outcome = if cli.dry_run {
        upload::preview(&config.input_path)?
    } else {
        let client = wctarget_client::WooCommerceClient::new(&config)
            .context("failed to build WooCommerce client")?;
        upload::upload(&client, &config.input_path).await?
    };

    let fail_on_error = cli.fail_on_error || config.fail_on_error;
    Ok(exit_code(&outcome, fail_on_error))
}

fn exit_code(outcome: &RunOutcome, fail_on_error: bool) -> ExitCode {
    match outcome {
        RunOutcome::Rejected { report, error } if fail_on_error => {
            tracing::error!(
                error = %error,
                products_created = report.products_created,
                "exiting with failure status"
            );
            ExitCode::FAILURE
        }
        RunOutcome::Previewed { products } => {
            tracing::debug!(products, "dry run finished");
            ExitCode::SUCCESS
        }
        RunOutcome::NoInput | RunOutcome::Uploaded(_) | RunOutcome::Rejected { .. } => {
            ExitCode::SUCCESS
        }
    }
}
