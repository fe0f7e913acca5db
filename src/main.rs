use anyhow::Result;
use clap::{Parser, Subcommand};
use lichtblick::client::{ContactClient, SubmitFields, UiState};
use lichtblick::email::EmailService;
use lichtblick::routes::AppState;

/// lichtblick - Werbetechnik website and contact relay
#[derive(Parser)]
#[command(name = "lichtblick")]
#[command(about = "Marketing site and contact-form relay for Lichtblick Werbetechnik", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Submit a test contact request against a running instance
    SendTest {
        /// Base URL of the instance to probe
        #[arg(long, default_value = "http://127.0.0.1:3000")]
        base_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = lichtblick::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    lichtblick::observability::init_observability(
        "lichtblick",
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => serve_command(config, host, port).await,
        Commands::SendTest { base_url } => send_test_command(base_url).await,
    }
}

#[tracing::instrument(skip(config))]
async fn serve_command(
    config: lichtblick::config::Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting lichtblick server...");

    // Use CLI overrides if provided, otherwise use config
    let host = host_override.unwrap_or(config.server.host);
    let port = port_override.unwrap_or(config.server.port);

    let email = EmailService::new(&config.email)?;
    let app = lichtblick::create_app(AppState { email });

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Smoke the full pipeline after a deployment: one real submission through
/// the public endpoint, delivered to the operator mailbox.
async fn send_test_command(base_url: String) -> Result<()> {
    let client = ContactClient::new(&base_url)?;

    let outcome = client
        .submit(SubmitFields {
            name: "Testlauf".to_owned(),
            email: "testlauf@lichtblick-werbetechnik.de".to_owned(),
            phone: None,
            interest: Some("Funktionstest".to_owned()),
            message: "Automatischer Testversand über lichtblick send-test.".to_owned(),
        })
        .await;

    match outcome {
        UiState::Sent { confirmation } => {
            tracing::info!(confirmation = %confirmation, "Test submission accepted");
            Ok(())
        }
        UiState::Error { message } => anyhow::bail!("test submission failed: {message}"),
    }
}
