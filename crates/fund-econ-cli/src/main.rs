mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::fees::{DefaultScheduleArgs, ProjectArgs, ValidateScheduleArgs};

/// Fund management-fee modelling with decimal precision
#[derive(Parser)]
#[command(
    name = "fefee",
    version,
    about = "Management fee schedule validation and projection",
    long_about = "A CLI for modelling private-fund management fees with decimal precision. \
                  Validates piecewise fee schedules and projects year-by-year and lifetime \
                  fees across committed-capital, invested-cost, and NAV valuation bases."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Project fees year by year over the full fund term
    Project(ProjectArgs),
    /// Check a fee schedule for gaps, overlaps, and rate-bound breaches
    ValidateSchedule(ValidateScheduleArgs),
    /// Emit the canonical step-down schedule for a fund
    DefaultSchedule(DefaultScheduleArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Project(args) => commands::fees::run_project(args),
        Commands::ValidateSchedule(args) => commands::fees::run_validate_schedule(args),
        Commands::DefaultSchedule(args) => commands::fees::run_default_schedule(args),
        Commands::Version => {
            println!("fefee {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
