//! fa-search command line entry point.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use fa_search::config::clamp_max_results;
use fa_search::services::recolor::install_fallback_icon;
use fa_search::{AssetPaths, Catalog, Config, CopyFormat, SearchEngine};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fa-search")]
#[command(about = "Search FontAwesome icons and copy them in a ready-to-paste format", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Asset root holding images/ and data/ (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    base_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search icons by name or synonym
    Search {
        query: String,

        /// Maximum number of results
        #[arg(long)]
        limit: Option<usize>,

        /// Copy format: html, class, unicode or svg
        #[arg(long)]
        format: Option<String>,
    },

    /// Print the copy payload of one icon
    Copy {
        name: String,

        /// Copy format: html, class, unicode or svg
        #[arg(long)]
        format: Option<String>,
    },

    /// Recolor the fallback icon and every icon SVG
    Recolor {
        /// Fill color, e.g. '#7dcfff'
        color: String,
    },

    /// Convert upstream FontAwesome icons.json metadata into the catalog file
    Import { metadata: PathBuf },

    /// Write the built-in catalog and default icon if they don't exist yet
    Init,
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load();
    if let Some(base_dir) = cli.base_dir {
        config.paths.base_dir = base_dir;
    }
    let assets = AssetPaths::new(&config.paths.base_dir);

    match cli.command {
        Commands::Search {
            query,
            limit,
            format,
        } => {
            if let Some(limit) = limit {
                config.preferences.max_results = clamp_max_results(limit) as u32;
            }
            if let Some(format) = format {
                config.preferences.copy_format = format;
            }

            let mut engine = SearchEngine::new(&config);
            for result in engine.query(&query) {
                println!("{}", result.name);
                println!("  {}", result.description);
                if let Some(content) = result.action.clipboard_text() {
                    println!("  {}", content);
                }
            }
        }
        Commands::Copy { name, format } => {
            let format = format
                .as_deref()
                .map(CopyFormat::parse)
                .unwrap_or_else(|| CopyFormat::parse(&config.preferences.copy_format));

            let mut engine = SearchEngine::new(&config);
            let catalog = engine.catalog().clone();
            let Some(icon) = catalog.get(&name) else {
                bail!("No icon named '{}'", name);
            };
            println!("{}", engine.copy_content(icon, format));
        }
        Commands::Recolor { color } => {
            let report = fa_search::recolor_all(&color, assets.base_dir());
            println!(
                "Recolored {} files, {} failed",
                report.recolored.len(),
                report.failed.len()
            );
            for path in &report.failed {
                println!("  failed: {}", path.display());
            }
        }
        Commands::Import { metadata } => {
            let json = fs::read_to_string(&metadata)
                .with_context(|| format!("Failed to read {}", metadata.display()))?;
            let catalog = Catalog::from_upstream_metadata(&json).context("Invalid icon metadata")?;
            catalog
                .write_json(&assets.catalog_file())
                .context("Failed to write catalog")?;
            println!(
                "Wrote {} icons to {}",
                catalog.len(),
                assets.catalog_file().display()
            );
        }
        Commands::Init => {
            let path = assets.catalog_file();
            if path.exists() {
                println!("Catalog already present at {}", path.display());
            } else {
                let catalog = Catalog::builtin();
                catalog.write_json(&path).context("Failed to write catalog")?;
                println!("Wrote {} icons to {}", catalog.len(), path.display());
            }

            let color = &config.preferences.icon_color;
            if install_fallback_icon(assets.base_dir(), color)
                .context("Failed to create default icon")?
            {
                println!("Created default icon at {}", assets.fallback_icon().display());
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "fa_search=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
