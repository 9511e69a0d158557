use anyhow::{Context, Result};
use clap::Parser;
use panel_application::FocusGroupService;
use panel_core::persona::PersonaStore;
use panel_infrastructure::{ConfigService, InMemoryResultStore, JsonPersonaStore};
use panel_interaction::build_reasoner;
use panel_server::{AppState, build_router, resolve_frontend_dir, telemetry};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "synth-panel")]
#[command(about = "Synthetic focus group panel - test hypotheses against persona panels", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/synth-panel/config.toml if present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Listen address, overrides config and PANEL_BIND
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigService::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    telemetry::init_tracing(&config.logging)?;
    tracing::debug!("[Server] Reasoning settings: {:?}", config.reasoning);

    let personas = JsonPersonaStore::load(&config.panel).context("Failed to load persona panel")?;
    tracing::info!("[Server] Loaded {} personas", personas.len());

    let reasoner = build_reasoner(&config.reasoning, &config.panel)?;
    let service = FocusGroupService::new(
        Arc::new(personas),
        Arc::new(InMemoryResultStore::new()),
        reasoner,
        &config.panel,
    );

    let frontend_dir = resolve_frontend_dir(&config.server);
    if let Some(dir) = &frontend_dir {
        tracing::info!("[Server] Serving frontend from {}", dir.display());
    }
    let app = build_router(AppState::new(service), frontend_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;
    tracing::info!("[Server] Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("[Server] Shutting down");
        })
        .await?;

    Ok(())
}
