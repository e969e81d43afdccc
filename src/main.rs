use clap::{Parser, ValueEnum};
use log::info;
use resource_shapley::{
    ComparisonRow, ProportionalAllocatorBuilder, ShapleyAllocatorBuilder, average_satisfaction,
    compare, consumers_from_csv, validation::require_consumers,
};
use serde::Serialize;
use std::{path::PathBuf, process::ExitCode};
use tabled::{Table, settings::Style};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// Compare Shapley and proportional allocation of a resource pool among VMs
#[derive(Debug, Parser)]
#[command(version, about)]
struct Opts {
    /// CSV file with an `Id,Demand` header, one consumer per row
    #[arg(short, long)]
    consumers: PathBuf,

    /// Total divisible capacity to share
    #[arg(short, long)]
    pool: f64,

    /// Give every consumer its full demand when the pool covers all of them
    /// (proportional policy only)
    #[arg(long)]
    cap_at_demand: bool,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Enable verbose output. Specify multiple times to increase verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Serialize)]
struct Report {
    pool: f64,
    rows: Vec<ComparisonRow>,
    shapley_average_satisfaction: f64,
    proportional_average_satisfaction: f64,
    warnings: Vec<String>,
}

fn init_logging(verbose: u8) -> Result<(), log::SetLoggerError> {
    let llv = match verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Error)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        llv,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
}

fn run(opts: &Opts) -> resource_shapley::Result<Report> {
    let consumers = consumers_from_csv(&opts.consumers)?;
    require_consumers(&consumers)?;
    info!(
        "Loaded {} consumers from {}",
        consumers.len(),
        opts.consumers.display()
    );

    let shapley = ShapleyAllocatorBuilder::default()
        .consumers(consumers.clone())
        .pool(opts.pool)
        .build()?
        .compute()?;
    let proportional = ProportionalAllocatorBuilder::default()
        .consumers(consumers.clone())
        .pool(opts.pool)
        .cap_at_demand(opts.cap_at_demand)
        .build()?
        .compute()?;

    let warnings = shapley
        .warnings
        .iter()
        .map(|w| format!("shapley: {w}"))
        .chain(proportional.warnings.iter().map(|w| format!("proportional: {w}")))
        .collect();

    Ok(Report {
        pool: opts.pool,
        rows: compare(&consumers, &shapley, &proportional),
        shapley_average_satisfaction: average_satisfaction(&consumers, &shapley),
        proportional_average_satisfaction: average_satisfaction(&consumers, &proportional),
        warnings,
    })
}

fn print_table(report: &Report) {
    println!("Total resources: {}", report.pool);
    let table = Table::new(&report.rows)
        .with(Style::psql().remove_horizontals())
        .to_string();
    println!("{table}");
    println!(
        "Average demand satisfaction (Shapley): {:.2}%",
        report.shapley_average_satisfaction * 100.0
    );
    println!(
        "Average demand satisfaction (Proportional): {:.2}%",
        report.proportional_average_satisfaction * 100.0
    );
    for warning in &report.warnings {
        println!("Warning: {warning}");
    }
}

fn main() -> ExitCode {
    let opts = Opts::parse();

    if let Err(e) = init_logging(opts.verbose) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let report = match run(&opts) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error computing allocations: {e}");
            return ExitCode::FAILURE;
        }
    };

    match opts.format {
        OutputFormat::Table => print_table(&report),
        OutputFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize report: {e}");
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}
