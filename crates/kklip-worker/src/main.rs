//! Clip selection worker binary.

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kklip_ranking::HttpRankingClient;
use kklip_worker::{pipeline, WorkerConfig};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("kklip=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting kklip-worker");

    let config = match WorkerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let ranking = match HttpRankingClient::new(
        &config.ranking_api_base,
        config.ranking_api_key.clone(),
        config.ranking_timeout,
    ) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create ranking client: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = pipeline::run(&config, &ranking).await {
        error!(job_id = %config.job_id, "Job failed: {}", e);
        std::process::exit(1);
    }

    info!(job_id = %config.job_id, "Worker shutdown complete");
}
