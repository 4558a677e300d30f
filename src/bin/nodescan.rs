use anyhow::Context;
use clap::{Parser, Subcommand};
use nodescan::extractor::core::Extractor;
use nodescan::extractor::loader;
use nodescan::schema::NodeMap;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract node schemas from node definition files and print them as JSON
    Extract {
        /// Paths of the node definition source files
        files: Vec<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Extract { files, pretty } => {
            let mut extractor = Extractor::new()?;
            let mut merged = NodeMap::new();

            for file in files {
                info!("Parsing {:?}", file);

                // 1. Load source
                let source = loader::load_source_from_file(&file.to_string_lossy())?;

                // 2. Extract schemas; later files overwrite earlier entries
                let nodes = extractor
                    .extract(&source)
                    .with_context(|| format!("Could not parse file {:?}", file))?;
                info!("Extracted {} node type(s) from {:?}", nodes.len(), file);
                merged.extend(nodes);
            }

            // 3. Emit the merged mapping
            let json = if *pretty {
                serde_json::to_string_pretty(&merged)?
            } else {
                serde_json::to_string(&merged)?
            };
            println!("{json}");
        }
    }

    Ok(())
}
