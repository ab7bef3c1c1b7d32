//! seisviz API server

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use seisviz_api::config::{DataConfig, FileConfig};
use seisviz_api::create_router;
use seisviz_api::state::AppState;

/// seisviz API server
#[derive(Parser, Debug)]
#[command(name = "seisviz-api")]
#[command(about = "Serves SEG-Y and DEM visualizations over HTTP")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:5000", env = "SEISVIZ_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "SEISVIZ_WORKER_THREADS")]
    worker_threads: Option<usize>,

    /// Directory searched for dem.tif/dem.tiff and seismic.sgy/seismic.segy
    #[arg(long, default_value = "data", env = "SEISVIZ_DATA_DIR")]
    data_dir: PathBuf,

    /// Explicit DEM path
    #[arg(long, env = "SEISVIZ_DEM_PATH")]
    dem_path: Option<PathBuf>,

    /// Explicit SEG-Y path
    #[arg(long, env = "SEISVIZ_SEGY_PATH")]
    segy_path: Option<PathBuf>,

    /// YAML file with request limits
    #[arg(long, env = "SEISVIZ_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;
    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    info!("Starting seisviz API server");

    let file_config = FileConfig::load_optional(args.config.as_deref())?;
    let data = DataConfig::resolve(&args.data_dir, args.dem_path, args.segy_path);

    info!(
        data_dir = %data.data_dir.display(),
        dem_path = ?data.dem_path,
        segy_path = ?data.segy_path,
        "Resolved data sources"
    );
    if data.dem_path.is_none() {
        tracing::warn!("No DEM file found; /api/dem will return 404");
    }
    if data.segy_path.is_none() {
        tracing::warn!("No SEG-Y file found; /api/segy/* will return 404");
    }

    let state = Arc::new(AppState::new(data, file_config.limits).with_prometheus(prometheus_handle));
    let app = create_router(state);

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;

    info!("seisviz API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}
