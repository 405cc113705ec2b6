use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use concert_mashup::{
    clients::errors::Result,
    mashup::{ConfigBuilder, DEFAULT_CONCURRENCY, Mashup},
    server,
};
use log::info;

#[derive(Parser)]
#[command(name = "concert-mashup")]
#[command(version, about = "Upcoming concerts, weather and top tracks for an artist", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Address to listen on
        #[arg(long, env = "MASHUP_BIND", default_value = "127.0.0.1:5000")]
        bind: String,

        /// Directory served under /static
        #[arg(long, env = "MASHUP_STATIC_DIR", default_value = "static")]
        static_dir: PathBuf,

        /// Concerts enriched with weather and coordinates at the same time
        #[arg(long, env = "MASHUP_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            static_dir,
            concurrency,
        } => {
            serve(&bind, static_dir, concurrency).await?;
        }
    }
    Ok(())
}

async fn serve(bind: &str, static_dir: PathBuf, concurrency: usize) -> Result<()> {
    info!("Building config ...");
    // Credentials come from the environment (or .env)
    let config = ConfigBuilder::new().concurrency(concurrency).build()?;
    let mashup = Arc::new(Mashup::new(config));

    info!("Serving static files from {}", static_dir.display());
    let router = server::build_router(mashup, static_dir);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    server::serve(listener, router).await
}
