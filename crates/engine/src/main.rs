//! Holocron - command line entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use holocron_engine::cli::{self, Arguments};
use holocron_engine::infrastructure::config::EngineConfig;
use holocron_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    // Logs go to stderr so stdout stays pure JSON.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "holocron_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let arguments = Arguments::parse();
    let config = arguments.apply(EngineConfig::from_env()?);
    tracing::debug!(?config, "Configuration loaded");

    let app = App::from_config(&config).await?;
    let output = cli::execute(&app, arguments.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn load_dotenv() {
    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let _ = dotenvy::from_filename(filename);
    }
}
