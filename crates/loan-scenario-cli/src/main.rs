mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::compare::{CompareArgs, ScenarioArgs};
use commands::loan::{EffectiveRateArgs, PaymentArgs};

/// Loan scenario comparison with decimal precision
#[derive(Parser)]
#[command(
    name = "lsc",
    version,
    about = "Loan scenario comparison with decimal precision",
    long_about = "A CLI for comparing borrowing scenarios under the Danish convention of \
                  quarterly interest compounding with monthly annuity payments. Computes \
                  per-loan payments, kurstab, IRR-based effective rates, scenario totals, \
                  and savings rankings across offers."
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
    /// Compare a set of scenarios and rank them by total cost
    Compare(CompareArgs),
    /// Compute the full breakdown for a single scenario
    Scenario(ScenarioArgs),
    /// Monthly annuity payment for a single loan
    Payment(PaymentArgs),
    /// IRR-derived effective annual rate for a kurs-adjusted loan
    EffectiveRate(EffectiveRateArgs),
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
        Commands::Compare(args) => commands::compare::run_compare(args),
        Commands::Scenario(args) => commands::compare::run_scenario(args),
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::EffectiveRate(args) => commands::loan::run_effective_rate(args),
        Commands::Version => {
            println!("lsc {}", env!("CARGO_PKG_VERSION"));
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
