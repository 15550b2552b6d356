use std::process::ExitCode;

use clap::{error::ErrorKind, CommandFactory, Parser};
use dice_sums::{format_summary, report_lines, SumDistribution, SumProbabilityError, Value};
use tracing::debug;

/// Print the probability of every sum from 1 up to a specified sum when throwing fair dice
#[derive(Parser, Debug)]
#[command(name = "dice-sums", version)]
struct Args {
    /// Number of fair dice thrown
    #[arg(value_name = "number_of_dice", allow_negative_numbers = true)]
    dice: Value,

    /// Largest sum to report, every sum from 1 up to it gets a line
    #[arg(value_name = "specified_sum", allow_negative_numbers = true)]
    sum: Value,

    /// Number of sides of each die
    #[arg(value_name = "number_of_sides", allow_negative_numbers = true)]
    sides: Value,

    /// Append mean, standard deviation, median and mode of the sum
    #[arg(long)]
    summary: bool,

    /// Log diagnostics to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => {
            println!("{}", Args::command().render_usage());
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(if args.verbose {
            "dice_sums=debug"
        } else {
            "dice_sums=warn"
        })
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "parsed arguments");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(?e, "cannot compute sum probabilities");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), SumProbabilityError> {
    for line in report_lines(args.dice, args.sum, args.sides)? {
        println!("{line}");
    }
    if args.summary {
        let distribution = SumDistribution::new(args.dice, args.sides)?;
        println!("{}", format_summary(&distribution));
    }
    Ok(())
}
