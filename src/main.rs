//! Command line front end for the sheetsmith generators.
//!
//! # Usage
//!
//! ```sh
//! sheetsmith assets --dir assets
//! sheetsmith inflation --base-year 2014 --amount 400 -o Inflationsrechner.ods
//! sheetsmith fleet --demo-seed 47 -o KIOWA_V47.ods
//! sheetsmith names -o Namensliste.xlsx
//! sheetsmith salary gehaltsdaten_template.txt > salary_data_output.java
//! ```
//!
//! Defaults come from an optional TOML file given with `--config`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sheetsmith::config::Config;
use sheetsmith::generators::assets::{self, RenderMode};
use sheetsmith::generators::fleet::{self, FleetOptions, SUMMARY_SHEETS};
use sheetsmith::generators::inflation::{self, InflationOptions};
use sheetsmith::generators::{format_thousands, names};
use sheetsmith::logging::{Verbosity, init_logging};
use sheetsmith::salary;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Generate spreadsheets, workbooks, image assets and salary code
#[derive(Parser, Debug)]
#[command(name = "sheetsmith", version, about)]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the placeholder app assets
    Assets {
        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Write solid placeholders instead of rendering shapes and text
        #[arg(long)]
        minimal: bool,
    },

    /// Create the inflation calculator spreadsheet
    Inflation {
        /// Year of the base amount (2010-2025)
        #[arg(long)]
        base_year: Option<u16>,

        /// Base amount
        #[arg(long)]
        amount: Option<f64>,

        /// Year to adjust to (2026-2030)
        #[arg(long)]
        target_year: Option<u16>,

        /// Output file
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Create the fleet tracking spreadsheet
    Fleet {
        /// Fill the logs with reproducible demo flights
        #[arg(long, value_name = "SEED")]
        demo_seed: Option<u64>,

        /// Output file
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Create the attendance list workbook
    Names {
        /// Output file
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Print Java map initialisers for a salary template
    Salary {
        /// Template file
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,
    },
}

fn run_assets(config: &Config, dir: Option<PathBuf>, minimal: bool) -> Result<()> {
    let dir = dir.unwrap_or_else(|| config.assets.directory.clone());
    let mode = if minimal {
        RenderMode::Minimal
    } else {
        RenderMode::Rendered
    };

    println!("🎨 Erstelle Platzhalter-Assets...");
    println!();
    let reports = assets::generate_assets(&dir, mode)
        .with_context(|| format!("cannot write assets to '{}'", dir.display()))?;

    let mut minimal_written = false;
    for report in &reports {
        match report.mode {
            RenderMode::Rendered => println!("✓ {} erstellt", report.file_name),
            RenderMode::Minimal => {
                minimal_written = true;
                println!("✓ {} (minimales PNG) erstellt", report.file_name)
            },
        }
    }

    println!();
    if minimal_written {
        println!("⚠️  Minimale Platzhalter erstellt");
    } else {
        println!("✅ Alle Assets wurden erfolgreich erstellt!");
    }
    println!();
    println!("Dateien:");
    for report in &reports {
        println!("  ✓ {} ({} bytes)", report.file_name, format_thousands(report.size));
    }
    Ok(())
}

fn run_inflation(
    config: &Config,
    base_year: Option<u16>,
    amount: Option<f64>,
    target_year: Option<u16>,
    output: Option<PathBuf>,
) -> Result<()> {
    let opts = InflationOptions {
        base_year: base_year.unwrap_or(config.inflation.base_year),
        base_amount: amount.unwrap_or(config.inflation.base_amount),
        target_year: target_year.unwrap_or(config.inflation.target_year),
    };
    let output = output.unwrap_or_else(|| config.inflation.output.clone());

    inflation::generate(&opts, &output)
        .with_context(|| format!("cannot create '{}'", output.display()))?;
    println!("✓ {} wurde erfolgreich erstellt!", output.display());
    Ok(())
}

fn run_fleet(config: &Config, demo_seed: Option<u64>, output: Option<PathBuf>) -> Result<()> {
    let opts = FleetOptions::from_config(&config.fleet, demo_seed);
    let output = output.unwrap_or_else(|| config.fleet.output.clone());

    println!("🚁 Erstelle {}...", opts.title);
    let report = fleet::generate(&opts, &output)
        .with_context(|| format!("cannot create '{}'", output.display()))?;

    println!("  ✓ Einzelblätter für Flotte:");
    for name in &report.sheets[..report.log_sheets] {
        println!("    - {}", name);
    }
    for name in &report.sheets[report.log_sheets..] {
        println!("  ✓ {}", name);
    }
    if report.demo {
        println!("  ✓ Demo-Flüge eingetragen");
    }

    println!();
    println!("✅ {} wurde erfolgreich erstellt!", output.display());
    println!();
    println!("📊 System-Übersicht:");
    println!("   - {} Einzelblätter (Logbücher)", report.log_sheets);
    let roles = [
        "Aggregation",
        "Kommandozentrale",
        "Sollwerte",
        "Wartungsintervalle",
        "Terminplanung",
    ];
    for (sheet, role) in SUMMARY_SHEETS.iter().zip(roles) {
        println!("   - {} ({})", sheet, role);
    }
    println!("   - {} bytes", format_thousands(report.size as u64));
    Ok(())
}

fn run_names(config: &Config, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| config.names.output.clone());
    let report = names::generate(&config.names.sheet_title, &output)
        .with_context(|| format!("cannot create '{}'", output.display()))?;
    println!("Excel-Datei erstellt: {}", output.display());
    println!("Anzahl der Namen: {}", report.count);
    println!("Dateigröße: {} bytes", format_thousands(report.size as u64));
    Ok(())
}

fn run(args: Args) -> Result<ExitCode> {
    let config = Config::load(args.config.as_deref()).context("cannot load configuration")?;

    match args.command {
        Command::Assets { dir, minimal } => run_assets(&config, dir, minimal)?,
        Command::Inflation {
            base_year,
            amount,
            target_year,
            output,
        } => run_inflation(&config, base_year, amount, target_year, output)?,
        Command::Fleet { demo_seed, output } => run_fleet(&config, demo_seed, output)?,
        Command::Names { output } => run_names(&config, output)?,
        Command::Salary { template } => {
            let code = salary::run(&template, &mut io::stdout().lock(), &mut io::stderr().lock())
                .context("cannot write salary code")?;
            return Ok(ExitCode::from(code));
        },
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(Verbosity::from_flags(args.quiet, args.verbose));

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        },
    }
}
