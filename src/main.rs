//! csvsift CLI - transform CSV files with regex rules
//!
//! # Main Commands
//!
//! ```bash
//! csvsift run -i data/ -o out.csv -c rules.json    # Transform CSVs
//! csvsift check rules.json                         # Validate a config
//! csvsift example-config                           # Print an example config
//! ```
//!
//! Repeat `-v` on `run` for more detail (per-file, per-match, per-row).

use clap::{ArgAction, Parser, Subcommand};
use csvsift::{example_config, logs, pipeline, Config, RuleAction};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "csvsift")]
#[command(about = "Transform CSV files with ordered regex rules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a transformation: input CSVs through the rules to one output CSV
    Run {
        /// Input CSV file or directory
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Path to the rules config JSON
        #[arg(short, long)]
        config: PathBuf,

        /// Increase verbosity (-v per-file, -vv per-match, -vvv per-row)
        #[arg(short, long, action = ArgAction::Count)]
        verbose: u8,
    },

    /// Load and compile a config, reporting its rules without touching data
    Check {
        /// Path to the rules config JSON
        config: PathBuf,
    },

    /// Print an example config
    ExampleConfig,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            input,
            output,
            config,
            verbose,
        } => cmd_run(&input, &output, &config, verbose),

        Commands::Check { config } => cmd_check(&config),

        Commands::ExampleConfig => cmd_example_config(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_run(
    input: &Path,
    output: &Path,
    config_path: &Path,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    logs::set_verbosity(verbose);

    let config = Config::load(config_path)?;
    eprintln!(
        "Loaded {} rule(s) from {}",
        config.rules.len(),
        config_path.display()
    );

    let summary = pipeline::run(config, input, output)?;

    eprintln!("{}", summary.summary());
    eprintln!("Output written to: {}", output.display());
    Ok(())
}

fn cmd_check(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(config_path)?;
    let compiled = config.compile_rules()?;

    eprintln!("Config OK: {}", config_path.display());
    eprintln!("  Rules: {}", compiled.len());
    for rule in &compiled {
        let action = match rule.action {
            RuleAction::DropRow => "drop-row",
            RuleAction::Replace => "replace",
            RuleAction::CreateRow => "create-row",
            RuleAction::Pipe => "pipe",
        };
        println!(
            "  - {} ({}, {} assertion(s))",
            rule.name,
            action,
            rule.assertions.len()
        );
    }

    if !config.add_fields.is_empty() {
        let names: Vec<&str> = config
            .add_fields
            .iter()
            .map(|field| field.name.as_str())
            .collect();
        eprintln!("  Added fields: {}", names.join(", "));
    }
    match &config.output.fields {
        Some(fields) => eprintln!("  Output fields (explicit): {}", fields.join(", ")),
        None => eprintln!("  Output fields: derived from the first record"),
    }
    eprintln!(
        "  Provenance: rule field '{}', file field '{}'",
        config.output.rule_match_field, config.output.file_processed_field
    );
    if config.output.drop_unmatched {
        eprintln!("  Unmatched rows are dropped");
    }

    Ok(())
}

fn cmd_example_config() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", example_config().to_json()?);
    Ok(())
}
