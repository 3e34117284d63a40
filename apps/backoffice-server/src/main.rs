use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Result};
use axum::{routing::get, Json, Router};
use clap::{Parser, Subcommand};
use sea_orm::{ConnectOptions, Database};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;

use runtime::AppConfig;

mod openapi;

/// Backoffice Server - relational back-office CRUD service
#[derive(Parser)]
#[command(name = "backoffice-server")]
#[command(about = "Backoffice Server - relational back-office CRUD service")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// Keeps "sqlite::memory:" as-is and preserves any query string.
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path) -> Result<String> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok("sqlite::memory:".to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }
    if let Some(dir) = p.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.port, cli.verbose);

    let logging = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging(&logging, Path::new(&config.server.home_dir));
    tracing::info!("Backoffice Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    let mut dsn = config.database.url.trim().to_string();
    if dsn.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }
    // Absolutize sqlite DSNs to avoid cwd issues.
    if dsn.starts_with("sqlite://") {
        dsn = absolutize_sqlite_dsn(&dsn, Path::new(&config.server.home_dir))?;
    }

    let mut opts = ConnectOptions::new(dsn.clone());
    if let Some(max) = config.database.max_conns {
        opts.max_connections(max);
    }
    if let Some(timeout) = config.database.acquire_timeout {
        opts.acquire_timeout(timeout);
    }

    tracing::info!("Connecting to database: {}", dsn);
    let db = Database::connect(opts).await?;
    directory::ensure_schema(&db).await?;

    let state = directory::build_state(db);
    let app = Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(openapi::ApiDoc::openapi()) }),
        )
        .merge(directory::router(state))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Backoffice Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_memory_dsn_is_kept() {
        let out = absolutize_sqlite_dsn("sqlite::memory:", Path::new("/base")).unwrap();
        assert_eq!(out, "sqlite::memory:");
    }

    #[test]
    fn relative_sqlite_path_is_anchored_to_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let dsn = absolutize_sqlite_dsn("sqlite://data/app.db?mode=rwc", dir.path()).unwrap();
        assert!(dsn.starts_with("sqlite://"));
        assert!(dsn.ends_with("data/app.db?mode=rwc"));
        assert!(dsn.contains(&dir.path().to_string_lossy().replace('\\', "/")));
    }

    #[test]
    fn non_sqlite_prefix_is_rejected() {
        assert!(absolutize_sqlite_dsn("postgres://x/y", Path::new("/base")).is_err());
    }
}
