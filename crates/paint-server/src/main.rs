mod cli;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use paint_common::PaintError;
use paint_config::{config_to_json, load_config, KitConfig};
use paint_kit::UiKit;
use paint_server::{build_router, MiddlewareOptions};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_FILE: &str = "paint.toml";
const DEFAULT_LOG_DIRECTIVE: &str = "paint_server=info,paint_kit=info,tower_http=info";

fn load(args: &cli::Args) -> Result<KitConfig, PaintError> {
    let path = match &args.config {
        Some(p) => Some(PathBuf::from(p)),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => Some(DEFAULT_CONFIG_FILE.into()),
        None => None,
    };
    let mut config = match path {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            load_config(&path)?
        }
        None => {
            info!("no {DEFAULT_CONFIG_FILE} found, using built-in defaults");
            KitConfig::default()
        }
    };

    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    Ok(config)
}

async fn run(args: cli::Args) -> Result<(), PaintError> {
    let config = load(&args)?;
    if args.print_config {
        println!("{}", config_to_json(&config));
        return Ok(());
    }

    let kit = Arc::new(UiKit::from_config(&config)?);

    let app = build_router(kit, MiddlewareOptions::from_config(&config.middleware));
    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = cli::parse();

    // --log-level wins over RUST_LOG
    let filter = match args.log_level.as_deref() {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE)),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(args).await {
        error!("{e}");
        std::process::exit(1);
    }
}
