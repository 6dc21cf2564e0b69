use anyhow::Context;
use clap::{Parser, Subcommand};
use cycle_config::Result;
use cycle_config::doc::json;
use cycle_config::loader::CycleConfig;

#[derive(Parser)]
#[command(name = "cycle-config")]
#[command(about = "Analysis-cycle configuration checker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a configuration document and report the grouped datasets.
    Report {
        /// Path to the JSON configuration document.
        config: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Report { config } => {
            // 1) Parse the document.
            let text = std::fs::read_to_string(&config)
                .with_context(|| format!("read configuration file {}", config))?;
            let root = json::parse_document(&text)?;

            // 2) Walk it: build datasets, regroup by type, validate. No
            //    properties are declared here, so every UserConfig item
            //    shows up as an unknown-property warning.
            let mut cycle = CycleConfig::new();
            cycle.load(&root)?;

            // 3) Print per-dataset summaries plus a diagnostics tally.
            for data in &cycle.datasets {
                println!("{}", data);
            }
            println!(
                "{} dataset(s), {} warning(s), {} error(s)",
                cycle.datasets.len(),
                cycle.diagnostics.warning_count(),
                cycle.diagnostics.error_count()
            );
        }
    }

    Ok(())
}
