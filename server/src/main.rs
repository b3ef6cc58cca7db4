use anyhow::Result;
use axum::Router;
use clap::Parser;
use rumdb_core::config::{DEFAULT_LOAD_FACTOR_THRESHOLD, DEFAULT_TABLE_SIZE};
use rumdb_core::IndexConfig;
use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};
use server::build_app;
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// Movie file, or a directory of .txt movie files
    #[arg(long)]
    movies: String,
    /// Noise word file
    #[arg(long)]
    noise: String,
    /// Initial number of hash buckets
    #[arg(long, default_value_t = DEFAULT_TABLE_SIZE)]
    table_size: usize,
    /// Load factor that triggers a rehash
    #[arg(long, default_value_t = DEFAULT_LOAD_FACTOR_THRESHOLD)]
    threshold: f64,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = IndexConfig::new(args.table_size, args.threshold);
    let app: Router = build_app(&args.movies, &args.noise, config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
