use bmp2map::{bmp_to_map, default_output_path, describe_bmp, log_filter};
use libbmpmap::{ConvertOptions, PaddingPolicy};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[cfg(not(debug_assertions))]
const DEFAULT_DEBUG_LEVEL: u8 = 1;
#[cfg(debug_assertions)]
const DEFAULT_DEBUG_LEVEL: u8 = 99;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Turn debugging information on
    #[arg(short, long, default_value_t = DEFAULT_DEBUG_LEVEL, action = clap::ArgAction::Count)]
    verbosity: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// converts a 256-color BMP image to a map file
    Convert {
        /// The 256-color bitmap
        bmp_file: PathBuf,

        /// The output map file name
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// How row padding is checked: `trust-header` or `require-aligned`
        #[arg(long, default_value_t = PaddingPolicy::TrustHeader)]
        padding: PaddingPolicy,
    },

    /// prints the header fields of a BMP image
    Info {
        /// The bitmap
        bmp_file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbosity, rust_log.as_deref()))
        .with_file(true)
        .with_line_number(true)
        .init();

    match cli.command {
        Commands::Convert {
            bmp_file,
            output,
            padding,
        } => {
            let output = match output {
                Some(o) => o,
                None => default_output_path(&bmp_file)?,
            };
            let options = ConvertOptions::builder().padding(padding).build();
            let summary = bmp_to_map(&bmp_file, &output, &options)?;
            println!(
                "done! {}x{} map ({}) written to {}",
                summary.width,
                summary.height,
                summary.counts,
                output.display()
            );
        }
        Commands::Info { bmp_file } => {
            println!("{}", describe_bmp(&bmp_file)?);
        }
    }
    Ok(())
}
