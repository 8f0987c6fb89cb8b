//! photoboost: photo enhancement server and offline enhancer.

use anyhow::Context;
use clap::{Parser, Subcommand};
use photoboost_core::config::{Config, ConfigSchema};
use photoboost_image::{enhance_upload, OutputOptions};
use photoboost_telemetry::TelemetryConfig;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Automatic photo enhancement
#[derive(Parser)]
#[command(name = "photoboost")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// Configuration file (defaults to photoboost.toml in the working directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Interface to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory for stored images
        #[arg(long)]
        storage_dir: Option<PathBuf>,
    },

    /// Enhance a single file without starting the server
    Enhance {
        /// Image to enhance
        input: PathBuf,

        /// Where to write the enhanced JPEG [default: <stem>_enhanced.jpg]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JPEG quality (1-100)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
        quality: Option<u8>,

        /// Also write the normalized original as <stem>_original.jpg
        #[arg(long)]
        keep_original: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve {
            config,
            host,
            port,
            storage_dir,
        } => {
            let mut schema = Config::load(config.as_deref())?.schema;
            if let Some(host) = host {
                schema.server.host = host;
            }
            if let Some(port) = port {
                schema.server.port = port;
            }
            if let Some(dir) = storage_dir {
                schema.storage.dir = dir;
            }
            schema.validate()?;
            init_logging(&schema, cli.verbose)?;

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("Failed to start async runtime")?;
            runtime.block_on(photoboost_server::serve(schema))?;
        }

        Commands::Enhance {
            input,
            output,
            quality,
            keep_original,
        } => {
            let schema = Config::load(None)?.schema;
            init_logging(&schema, cli.verbose)?;

            let data = std::fs::read(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let options = OutputOptions {
                quality: quality.unwrap_or(schema.output.jpeg_quality),
            };
            let pair = enhance_upload(&data, &options)
                .with_context(|| format!("Failed to enhance {}", input.display()))?;

            let output = output.unwrap_or_else(|| sibling_path(&input, "enhanced"));
            std::fs::write(&output, &pair.enhanced)
                .with_context(|| format!("Failed to write {}", output.display()))?;

            if keep_original {
                let original = sibling_path(&input, "original");
                std::fs::write(&original, &pair.original)
                    .with_context(|| format!("Failed to write {}", original.display()))?;
                println!("Original: {}", original.display());
            }

            println!(
                "Enhanced: {} ({}x{}, {}) -> {}",
                input.display(),
                pair.width,
                pair.height,
                pair.source_format.mime_type(),
                output.display()
            );
        }
    }

    Ok(())
}

fn init_logging(schema: &ConfigSchema, verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        "debug".to_string()
    } else {
        schema.logging.level.clone()
    };

    photoboost_telemetry::init_with_config(TelemetryConfig {
        log_level,
        json: schema.logging.json,
        ..TelemetryConfig::default()
    })
}

/// `<dir>/<stem>_<suffix>.jpg` next to `input`
fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "image".into(), |s| s.to_string_lossy());
    input.with_file_name(format!("{stem}_{suffix}.jpg"))
}
