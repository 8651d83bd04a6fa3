mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use clap::Parser;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use reword_engine::Engine;
use reword_lex::{LexicalSource, WordnetFile};
use routes::AppState;

#[derive(Parser)]
#[command(name = "reword-server", about = "Paraphrase and synonym lookup — API server")]
struct Cli {
    /// HTTP port
    #[arg(long, default_value = "3000")]
    port: u16,
    /// Bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Pre-processed lexical database (JSON, built by reword-wn-build)
    #[arg(long, default_value = "./data/wordnet.json")]
    db: PathBuf,
    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    tracing::info!("Loading lexical database from {:?} ...", cli.db);
    let source = WordnetFile::load(&cli.db)?;
    tracing::info!("Loaded {} sense groups", source.len());

    let engine = Engine::new(Arc::new(source));
    let state = Arc::new(AppState::new(engine));

    let app = Router::new()
        .merge(routes::routes())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("{}:{}", cli.host, cli.port);
    tracing::info!("reword server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
