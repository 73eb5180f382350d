use clap::Parser;

/// paint: per-request UI composition server.
#[derive(Parser, Debug)]
#[command(name = "paint-server", version, about)]
pub struct Args {
    /// Config file path. Defaults to ./paint.toml when present.
    #[arg(short = 'c', long)]
    pub config: Option<String>,

    /// Listen address override.
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port override.
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Log filter override (e.g. debug, paint_kit=trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
