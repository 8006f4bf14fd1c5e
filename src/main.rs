mod app;
mod config;
mod error;

use clap::{Parser, Subcommand, ValueEnum};
use config::{AppConfig, DEFAULT_CONFIG_FILE};
use error::AppError;
use photo_gallery::{Platform, SystemClock};
use std::path::PathBuf;
use std::sync::Arc;

/// Local photo diary: capture photos and list the gallery
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Config file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Overrides the configured data directory
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Overrides the configured platform
    #[arg(long, value_enum)]
    platform: Option<PlatformArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Capture an image file into the gallery
    Capture {
        /// Image to import as the new photo
        image: PathBuf,
    },
    /// List the gallery, newest first
    List,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PlatformArg {
    Hybrid,
    Web,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Hybrid => Platform::Hybrid,
            PlatformArg::Web => Platform::Web,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        log::error!("{}", e);
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = AppConfig::load(&cli.config)?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(platform) = cli.platform {
        config.platform = platform.into();
    }
    log::debug!("Using config: {:?}", config);

    let source = match &cli.command {
        Command::Capture { image } => Some(image.as_path()),
        Command::List => None,
    };
    let mut store = app::build_store(&config, source, Arc::new(SystemClock))?;
    store.restore().await?;

    if let Command::Capture { .. } = cli.command {
        let record = store.capture_and_store().await?;
        println!("Saved {}", record.storage_path);
    }

    for (i, photo) in store.photos().iter().enumerate() {
        println!(
            "{:>3}  {}  {}",
            i,
            photo.storage_path,
            app::abbreviate(&photo.display_reference)
        );
    }

    Ok(())
}
