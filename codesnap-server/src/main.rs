use clap::Parser;
use codesnap_exec::ExecutionConfig;
use codesnap_server::{create_app, run_server, AppState};
use codesnap_tutor::{TutorConfig, DEFAULT_API_URL, DEFAULT_MODEL};
use std::{net::SocketAddr, path::PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to listen on
    #[arg(short, long, default_value = "0.0.0.0:8000")]
    addr: SocketAddr,

    /// TOML file with execution settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum number of concurrent executions (overrides the config file)
    #[arg(short, long)]
    max_concurrent: Option<usize>,

    /// API key for the explain and tutor endpoints
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    groq_api_key: Option<String>,

    /// Chat model used by explain and tutor
    #[arg(long, default_value = DEFAULT_MODEL)]
    groq_model: String,

    /// Base URL of the OpenAI-compatible chat API
    #[arg(long, default_value = DEFAULT_API_URL)]
    groq_api_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::from_filename(".env.local").ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ExecutionConfig::from_toml_file(path).await?,
        None => ExecutionConfig::default(),
    };
    if let Some(max_concurrent) = args.max_concurrent {
        config.max_concurrent_executions = max_concurrent;
    }

    let mut tutor_config = TutorConfig::new()
        .with_model(args.groq_model)
        .with_api_url(args.groq_api_url);
    if let Some(api_key) = args.groq_api_key {
        tutor_config = tutor_config.with_api_key(api_key);
    }
    if !tutor_config.is_configured() {
        info!("GROQ_API_KEY not set; explain and tutor will answer with fallbacks");
    }

    let state = AppState::new(config, tutor_config)?;
    let languages = state.service.available_languages();
    info!(
        "Languages ready: {}",
        languages
            .iter()
            .map(|language| language.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let app = create_app(state);
    run_server(app, args.addr).await?;

    Ok(())
}
