use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use nv_client::logging::init_logging;
use nv_client::{AnalysisClient, AnalysisSession, ClientConfig, BASE_URL_ENV};
use nv_core::AnalysisState;
use tracing::info;

mod render;

#[derive(Parser, Debug)]
#[command(author, version, about = "Check how trustworthy an article is", long_about = None)]
pub struct Cli {
    /// Backend address; read once at startup
    #[arg(long, env = BASE_URL_ENV)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Analyze the article behind a URL
    Analyze {
        /// Absolute URL of the article (e.g. https://example.com/news/story)
        url: String,
        /// Print the result as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Check whether the backend is up
    Health,
}

/// Callers validate before anything goes over the wire.
fn validate_url(raw: &str) -> nv_core::Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(nv_core::Error::InvalidUrl("Please enter a URL".to_string()));
    }
    url::Url::parse(trimmed)?;
    Ok(trimmed.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_logging();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    let base_url = config.base_url.clone();
    let client = AnalysisClient::new(config).context("failed to build HTTP client")?;

    match cli.command {
        Commands::Analyze { url, json } => {
            let url = validate_url(&url)
                .with_context(|| format!("Please enter a valid URL (e.g., https://example.com), got {:?}", url))?;

            let mut session = AnalysisSession::new(client);
            match session.submit(&url).await? {
                AnalysisState::Success(result) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(result.as_ref())?);
                    } else {
                        print!("{}", render::render_result(result));
                    }
                    Ok(ExitCode::SUCCESS)
                }
                AnalysisState::Error(failure) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(failure)?);
                    } else {
                        eprintln!("{}", render::render_failure(failure, &base_url));
                    }
                    Ok(ExitCode::FAILURE)
                }
                state => anyhow::bail!("analysis ended in unexpected state: {}", state.name()),
            }
        }
        Commands::Health => {
            if client.check_health().await {
                info!("✅ Backend at {} is healthy", base_url);
                Ok(ExitCode::SUCCESS)
            } else {
                info!("❌ Backend at {} is not responding", base_url);
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
