use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finsight::client::{is_pdf_path, FinSightClient};
use finsight::config::Config;
use finsight::dashboard::{HistoryState, UploadPhase};
use finsight::errors::AppError;
use finsight::models::AnalysisReport;
use finsight::render;
use finsight::tax::calculate_tax;

/// Terminal client for the FinSight tax optimization backend.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Backend base URL (overrides FINSIGHT_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a PDF document for analysis
    Upload {
        /// PDF file to analyze
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Show the most recent analysis report
    Latest {
        /// Show the built-in demo report instead of querying the backend
        #[arg(long)]
        sample: bool,
    },

    /// List all stored analysis reports
    History,

    /// Delete a stored report by id
    Delete {
        /// Backend-assigned report id
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Calculate income tax under the AY 2024-25 slab schedule
    Calc {
        /// Annual income in rupees
        #[arg(long)]
        income: f64,

        /// Total deductions in rupees
        #[arg(long, default_value_t = 0.0)]
        deductions: f64,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finsight=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", style("error:").red().bold(), e);
        process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    // `calc` is pure arithmetic and needs no backend
    if let Commands::Calc { income, deductions } = &cli.command {
        let computation = calculate_tax(*income, *deductions)?;
        print!("{}", render::render_tax(&computation));
        return Ok(());
    }

    let mut config = Config::from_env()
        .map_err(|e| AppError::InternalError(format!("Configuration error: {}", e)))?;
    if let Some(url) = cli.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }
    let client = FinSightClient::from_config(&config)?;

    match cli.command {
        Commands::Upload { file } => cmd_upload(&client, &file).await,
        Commands::Latest { sample } => cmd_latest(&client, sample).await,
        Commands::History => cmd_history(&client).await,
        Commands::Delete { id } => cmd_delete(&client, &id).await,
        Commands::Calc { .. } => unreachable!("handled above"),
    }
}

async fn cmd_upload(client: &FinSightClient, file: &PathBuf) -> Result<(), AppError> {
    // Reject wrong file types before entering the upload phase, so no
    // network call is ever made for them.
    if !is_pdf_path(file) {
        return Err(AppError::BadRequest(format!(
            "'{}' is not a PDF document",
            file.display()
        )));
    }

    let document_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    let mut phase = UploadPhase::Idle;
    phase.begin(document_name.clone())?;

    let spinner = render::upload_spinner(&document_name);
    match client.upload_document(file).await {
        Ok(outcome) => {
            spinner.finish_and_clear();
            println!(
                "{} {} analyzed",
                style("✓").green(),
                style(&document_name).bold()
            );
            print!("{}", render::render_outcome(&outcome));
            phase.complete(outcome)?;
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            phase.fail(e.to_string())?;
            Err(e)
        }
    }
}

async fn cmd_latest(client: &FinSightClient, sample: bool) -> Result<(), AppError> {
    let report = if sample {
        AnalysisReport::sample()
    } else {
        client.fetch_latest().await?
    };
    print!("{}", render::render_report(&report));
    Ok(())
}

async fn cmd_history(client: &FinSightClient) -> Result<(), AppError> {
    let reports = client.fetch_history().await?;
    print!("{}", render::render_history(&reports));
    Ok(())
}

async fn cmd_delete(client: &FinSightClient, id: &str) -> Result<(), AppError> {
    let mut history = HistoryState::new(client.fetch_history().await?);
    client.delete_report(id).await?;
    history.remove(id);
    println!("{} Report {} deleted", style("✓").green(), style(id).bold());
    print!("{}", render::render_history(history.entries()));
    Ok(())
}
