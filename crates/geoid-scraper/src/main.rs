//! `geoid-scraper` binary: parses the CLI and drives [`geoid_scraper::scraper`].

use clap::Parser;
use geoid_scraper::scraper::{
    commands,
    config::{CliArgs, Command, ScrapeConfig},
    fetch::LinkFetcher,
    telemetry::init_telemetry,
};
use tokio::signal;
use tokio_util::sync::CancellationToken;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ScrapeConfig::try_from(args)?;

    init_telemetry()?;
    log_startup_info(&config);

    match config.command.clone() {
        Command::Plan => {
            let report = commands::plan(&config)?;
            println!("{report}");
            Ok(())
        }
        Command::Urls { output } => {
            commands::urls(&config, &output).await?;
            Ok(())
        }
        Command::Run => run(&config).await,
    }
}

async fn run(config: &ScrapeConfig) -> anyhow::Result<()> {
    let token = CancellationToken::new();
    let signal_task = tokio::spawn(shutdown_signal(token.clone()));

    let fetcher = LinkFetcher::new(&config.base_url);
    tracing::info!("Resolving county pages under {}", fetcher.base_url());
    let outcome = commands::run(config, fetcher, token).await;
    signal_task.abort();

    let outcome = outcome?;
    if outcome.summary.cancelled {
        tracing::info!(
            "Interrupted after {} of {} identifiers, partial results in {}",
            outcome.summary.scraped,
            outcome.summary.expected,
            outcome.files.results.display()
        );
        return Ok(());
    }
    if outcome.summary.failed_outright() {
        let errors = outcome.files.errors.as_ref().unwrap_or(&outcome.files.results);
        anyhow::bail!("no county was scraped successfully, see {}", errors.display());
    }
    Ok(())
}

fn log_startup_info(config: &ScrapeConfig) {
    if cfg!(debug_assertions) {
        tracing::info!("Starting geoid-scraper with full config: {:#?}", config);
    } else {
        tracing::info!(
            "Starting geoid-scraper over {} with {} workers",
            config.generator.range(),
            config.num_workers
        );
    }
    if let Some(advice) = config.worker_count_advice() {
        tracing::warn!("{advice}");
    }
}

/// Cancels `token` on Ctrl+C or SIGTERM. Workers stop after their current
/// identifier and the run saves what it has.
async fn shutdown_signal(token: CancellationToken) {
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Shutdown signal received, finishing current identifiers...");
    token.cancel();
}
