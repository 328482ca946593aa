use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use knossos::ops;
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "knossos")]
#[command(about = "Parse Wikipedia wikitext into sections, infoboxes, links, and references")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available operations
    List(ListArgs),
    /// Show the full description of an operation
    Describe(DescribeArgs),
    /// Run an operation with key=value parameters
    Run(RunArgs),
}

#[derive(Args)]
struct ListArgs {
    /// Show one-line summaries next to the names
    #[arg(short, long)]
    long: bool,
}

#[derive(Args)]
struct DescribeArgs {
    /// Operation name
    operation: String,
}

#[derive(Args)]
struct RunArgs {
    /// Operation name
    operation: String,

    /// Parameters in key=value format (values parsed as JSON when possible)
    params: Vec<String>,

    /// Read the wikitext parameter from a file
    #[arg(short, long)]
    input: Option<PathBuf>,
}

fn find_operation(name: &str) -> Result<&'static ops::Operation> {
    match ops::find(name) {
        Some(op) => Ok(op),
        None => bail!("operation '{}' not found (see 'knossos list')", name),
    }
}

fn run_list(args: ListArgs) -> Result<()> {
    for op in ops::operations() {
        if args.long {
            println!("{}: {}", op.name, op.summary);
        } else {
            println!("{}", op.name);
        }
    }
    Ok(())
}

fn run_describe(args: DescribeArgs) -> Result<()> {
    let op = find_operation(&args.operation)?;
    println!("{}", op.details);
    Ok(())
}

fn run_operation(args: RunArgs) -> Result<()> {
    let op = find_operation(&args.operation)?;

    let mut params = ops::parse_kv_params(&args.params)?;
    if let Some(path) = &args.input {
        ops::load_input(&mut params, path)?;
    }

    // Plain strings print raw; structured results print as pretty JSON.
    match ops::invoke(op, &params)? {
        Value::String(s) => println!("{}", s),
        other => println!("{}", serde_json::to_string_pretty(&other)?),
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let result = match cli.command {
        Commands::List(args) => run_list(args),
        Commands::Describe(args) => run_describe(args),
        Commands::Run(args) => run_operation(args),
    };

    match result {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
