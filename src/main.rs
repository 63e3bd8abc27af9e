use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use fencost::core::cost::{AlternativeMaterial, OwnershipBand};
use fencost::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Compare lifetime fence costs and display savings
    Compare(CompareArgs),
}

#[derive(Args)]
struct CompareArgs {
    /// Total fence length in feet
    #[arg(short, long, value_parser = parse_amount)]
    length: Option<f64>,

    /// Planned ownership duration in years (10, 15, 30, 40, 45 or 50)
    #[arg(short = 'y', long, value_parser = parse_ownership)]
    years: Option<OwnershipBand>,

    /// Alternative fence material (wood or vinyl)
    #[arg(short, long, value_parser = parse_material)]
    material: Option<AlternativeMaterial>,

    /// Material cost for the alternative fence in $/ft
    #[arg(long, value_parser = parse_amount)]
    material_cost: Option<f64>,

    /// Maintenance cost for the alternative fence in $/ft per year
    #[arg(long, value_parser = parse_amount)]
    maintenance_cost: Option<f64>,

    /// Skip the purchase suggestion lookup
    #[arg(long)]
    no_suggestions: bool,
}

/// Monetary and length arguments coerce instead of failing: non-numeric
/// and negative values become 0.
fn parse_amount(s: &str) -> Result<f64, String> {
    Ok(fencost::core::config::coerce_amount(
        s.trim().parse().unwrap_or(0.0),
    ))
}

fn parse_ownership(s: &str) -> Result<OwnershipBand, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

fn parse_material(s: &str) -> Result<AlternativeMaterial, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

impl From<CompareArgs> for fencost::CompareOptions {
    fn from(args: CompareArgs) -> fencost::CompareOptions {
        fencost::CompareOptions {
            length_feet: args.length,
            ownership: args.years,
            material: args.material,
            material_cost: args.material_cost,
            maintenance_cost: args.maintenance_cost,
            no_suggestions: args.no_suggestions,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fencost::cli::setup::setup(),
        Some(Commands::Compare(args)) => {
            fencost::run_command(
                fencost::AppCommand::Compare(args.into()),
                cli.config_path.as_deref(),
            )
            .await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
