use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use paraph_blob::DocumentStore;
use paraph_blob_memory::MemoryDocumentStore;
use paraph_docusign::DocuSignClient;
use paraph_gateway::CallbackProcessor;
use paraph_provider::DynEnvelopeClient;
use paraph_server::api::AppState;
use paraph_server::config::ParaphConfig;
use paraph_state::SignatureRepository;
use paraph_state_memory::MemorySignatureRepository;

/// Paraph e-signature callback server.
#[derive(Parser, Debug)]
#[command(name = "paraph-server", about = "Standalone HTTP server for Paraph")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "paraph.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration from TOML file, or use defaults if the file does not exist.
    let mut config: ParaphConfig = if Path::new(&cli.config).exists() {
        let contents = std::fs::read_to_string(&cli.config)?;
        toml::from_str(&contents)?
    } else {
        ParaphConfig::default()
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if !Path::new(&cli.config).exists() {
        info!(path = %cli.config, "config file not found, using defaults");
    }

    // Resolve DocuSign credentials (TOML first, then environment).
    let docusign_config = config.docusign.resolve()?;
    let provider: Arc<dyn DynEnvelopeClient> = Arc::new(DocuSignClient::new(docusign_config));
    info!(provider = provider.name(), "provider client initialized");

    let repository: Arc<dyn SignatureRepository> = Arc::new(MemorySignatureRepository::new());
    let documents: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());

    let processor = CallbackProcessor::builder()
        .repository(Arc::clone(&repository))
        .provider(Arc::clone(&provider))
        .documents(Arc::clone(&documents))
        .build()?;

    let external_url = config.server.external_url();
    let state = AppState {
        processor: Arc::new(processor),
        repository,
        documents,
        provider,
        callback_url: format!("{external_url}/v1/callback"),
        return_url: format!("{external_url}/"),
    };

    let app = paraph_server::api::router(state);
    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, %external_url, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    // Terminate cleanly on ctrl-c; in-flight callbacks finish first.
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install ctrl-c handler");
    }
    info!("shutdown signal received");
}
