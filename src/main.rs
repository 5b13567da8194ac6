//! Rekindle command line
//!
//! `apply` writes highlights from a clippings export into an EPUB,
//! `split` breaks a combined `My Clippings.txt` into one file per title.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rekindle::clippings::split_txt_clippings_by_title;
use rekindle::config::Config;
use rekindle::process_book;

#[derive(Parser, Debug)]
#[command(name = "rekindle")]
#[command(about = "Re-inject e-reader highlights and notes into an EPUB")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a clippings file to a book
    Apply {
        /// EPUB to annotate
        #[arg(long)]
        ebook: PathBuf,

        /// Clippings export (.txt or .html)
        #[arg(long)]
        clippings: PathBuf,

        /// Palette name or hex code for the marker background
        #[arg(long)]
        highlight_color: Option<String>,

        /// Use the colour recorded on each clipping when present
        #[arg(long)]
        clipping_colors: bool,

        /// Directory for the annotated EPUB
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Directory for the per-book log
        #[arg(long)]
        log_dir: Option<PathBuf>,

        /// Also write the full report as JSON
        #[arg(long)]
        report_json: Option<PathBuf>,
    },

    /// Split `My Clippings.txt` into one file per title
    Split {
        /// Combined clippings file
        #[arg(long)]
        raw: PathBuf,

        /// Output directory
        #[arg(long)]
        clippings_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rekindle=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    dotenvy::dotenv().ok();
    let mut config = Config::from_env();
    let cli = Cli::parse();

    match cli.command {
        Command::Apply {
            ebook,
            clippings,
            highlight_color,
            clipping_colors,
            output_dir,
            log_dir,
            report_json,
        } => {
            if let Some(color) = highlight_color {
                config.highlight.color = color;
            }
            config.highlight.use_clipping_colors |= clipping_colors;
            if let Some(dir) = output_dir {
                config.paths.processed_dir = dir;
            }
            if let Some(dir) = log_dir {
                config.paths.logs_dir = dir;
            }

            let processed = process_book(&ebook, &clippings, &config)
                .with_context(|| format!("Failed to process {}", ebook.display()))?;

            if let Some(path) = report_json {
                let json = serde_json::to_string_pretty(&processed.report)?;
                std::fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }

            println!("{}", processed.report);
            println!("Saved to {}", processed.output.display());
            println!("Log written to {}", processed.log.display());
        }
        Command::Split { raw, clippings_dir } => {
            let out_dir = clippings_dir.unwrap_or(config.paths.clippings_dir);
            let written = split_txt_clippings_by_title(&raw, &out_dir)
                .with_context(|| format!("Failed to split {}", raw.display()))?;
            println!("Wrote {} clippings files to {}", written.len(), out_dir.display());
        }
    }

    Ok(())
}
