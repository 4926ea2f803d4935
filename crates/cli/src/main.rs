use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use placement_cli::args::Cli;
use placement_cli::commands::{self, Context};
use placement_client::api::PlacementApi;
use placement_client::config::ClientConfig;
use placement_client::file_store::JsonFileStore;
use placement_core::session::SessionStore;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "placement_cli=info,placement_client=info,placement_core=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    // --- Configuration ---
    let config = ClientConfig::from_env()?;
    tracing::debug!(api_url = %config.api_url, session_file = %config.session_file.display(), "Loaded client configuration");

    // --- Session ---
    let sessions = SessionStore::restore(JsonFileStore::new(&config.session_file));
    let api = PlacementApi::from_config(&config)?;
    let today = chrono::Local::now().date_naive();

    let mut ctx = Context::new(api, sessions, config.email_domain.clone(), today);
    commands::run(&mut ctx, cli.command).await
}
