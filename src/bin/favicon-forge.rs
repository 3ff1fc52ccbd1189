//! Command-line front end for [`favicon_forge::FaviconGenerator`].

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use favicon_forge::{FaviconConfig, FaviconError, FaviconGenerator};
use log::error;

/// Generate a favicon bundle from one PNG, JPEG or GIF image.
#[derive(Debug, Parser)]
#[command(name = "favicon-forge", version)]
struct Args {
    /// Source image
    source: PathBuf,

    /// Destination directory (created if missing)
    destination: String,

    /// JSON configuration file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Leave the 48x48 frame out of favicon.ico
    #[arg(long)]
    no_ico48: bool,

    /// Leave the 64x64 frame out of favicon.ico
    #[arg(long)]
    no_ico64: bool,

    #[arg(long)]
    exclude_old_apple: bool,

    #[arg(long)]
    exclude_android: bool,

    #[arg(long)]
    exclude_ms: bool,

    /// Hex color behind Windows tiles
    #[arg(long)]
    tile_background: Option<String>,

    /// Padding of Windows tiles in pixels
    #[arg(long)]
    tile_padding: Option<u32>,

    /// Print the HTML tags for the generated files
    #[arg(long)]
    html: bool,
}

impl Args {
    fn load_config(&self) -> Result<FaviconConfig, FaviconError> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .map_err(|e| FaviconError::wrap(path, "cannot read configuration", e))?;
                FaviconConfig::from_json(&json)
                    .map_err(|e| FaviconError::wrap(path, "cannot parse configuration", e))?
            }
            None => FaviconConfig::new(),
        };

        config.ico48 &= !self.no_ico48;
        config.ico64 &= !self.no_ico64;
        config.exclude_old_apple |= self.exclude_old_apple;
        config.exclude_android |= self.exclude_android;
        config.exclude_ms |= self.exclude_ms;
        if let Some(background) = &self.tile_background {
            config.tile_background = background.clone();
        }
        if let Some(padding) = self.tile_padding {
            config.tile_padding = padding;
        }
        Ok(config)
    }
}

fn run(args: &Args) -> Result<FaviconGenerator, FaviconError> {
    let config = args.load_config()?;
    let mut generator = FaviconGenerator::new(&args.source, &args.destination, config);
    generator.generate()?;
    Ok(generator)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(generator) => {
            for path in generator.produced() {
                println!("{}", path.display());
            }
            if args.html {
                print!("{}", generator.html_snippet());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                error!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
