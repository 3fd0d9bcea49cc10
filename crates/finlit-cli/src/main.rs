mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::advice::AdviceArgs;
use commands::budgeting::BudgetArgs;
use commands::calculate::CalculateArgs;
use commands::interest::{CompoundInterestArgs, SimpleInterestArgs};
use commands::investing::SipArgs;
use commands::loans::EmiArgs;

/// Personal-finance practice calculators
#[derive(Parser)]
#[command(
    name = "finlit",
    version,
    about = "Personal-finance practice calculators",
    long_about = "Decimal-precision calculators for compound and simple interest, \
                  loan EMIs, systematic investment plans and monthly budgets. \
                  Rates are annual percentages (8 means 8%)."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log calculation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Annually compounded growth of a lump sum
    CompoundInterest(CompoundInterestArgs),
    /// Interest on the original principal only
    SimpleInterest(SimpleInterestArgs),
    /// Equated monthly installment for a loan
    Emi(EmiArgs),
    /// Future value of a monthly investment plan
    Sip(SipArgs),
    /// Income vs expenses, savings and category shares
    Budget(BudgetArgs),
    /// Run a {"kind", "inputs"} request from a file or stdin
    Calculate(CalculateArgs),
    /// Life-stage money advice
    Advice(AdviceArgs),
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

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::CompoundInterest(args) => commands::interest::run_compound_interest(args),
        Commands::SimpleInterest(args) => commands::interest::run_simple_interest(args),
        Commands::Emi(args) => commands::loans::run_emi(args),
        Commands::Sip(args) => commands::investing::run_sip(args),
        Commands::Budget(args) => commands::budgeting::run_budget(args),
        Commands::Calculate(args) => commands::calculate::run_calculate(args),
        Commands::Advice(args) => commands::advice::run_advice(args),
        Commands::Version => {
            println!("finlit {}", env!("CARGO_PKG_VERSION"));
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
