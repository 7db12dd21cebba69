//! Cultural narration pipeline binary.
//!
//! Reads an image from the path given as the first argument, runs the full
//! pipeline against the AWS-backed collaborators, and prints the structured
//! result as JSON.

use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use achamin_pipeline::{ProcessingContext, ThreadRandom};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("achamin=info,warn"));

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

    let Some(image_path) = std::env::args().nth(1) else {
        error!("Usage: achamin-pipeline <image-path>");
        std::process::exit(2);
    };

    info!("Starting achamin-pipeline for {}", image_path);

    let image = tokio::fs::read(&image_path).await?;

    let ctx = ProcessingContext::from_env().await;
    let mut rng = ThreadRandom;

    let outcome = ctx.process_image(&image, &mut rng).await?;
    if outcome.is_degraded() {
        let stages: Vec<_> = outcome
            .degradations
            .iter()
            .map(|d| d.as_str())
            .collect();
        warn!("Completed with degraded stages: {}", stages.join(", "));
    }

    println!("{}", serde_json::to_string_pretty(&outcome.result)?);
    Ok(())
}
