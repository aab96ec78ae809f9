//! balance - chemical equation balancer
//!
//! Prints the input equation, a separator and the balanced equation.
//!
//! # Usage
//!
//! ```bash
//! balance "C2H5OH + O2 -> CO2 + H2O"
//! ```

use std::process::ExitCode;

use clap::Parser;
use reaction_balancer::{
    equation, BalanceError, BalancedEquation, Balancer, BalancerConfig, DegeneracyPolicy,
    Normalization, ParseOptions, SEPARATOR,
};

/// Balance a chemical equation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The equation to balance, e.g. "H2 + O2 -> H2O"
    #[arg(value_name = "EQUATION")]
    equation: String,

    /// Fix the coefficient of the N-th compound (1-based) instead of
    /// minimizing the coefficient sum
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    fix_column: Option<u64>,

    /// Pick the minimum-sum solution when several independent balancings exist
    #[arg(long)]
    allow_under_determined: bool,

    /// Reject hydrate notation and leading multipliers inside formulas
    #[arg(long)]
    no_hydrates: bool,

    /// Accept element symbols that are not in the periodic table
    #[arg(long)]
    lenient_elements: bool,

    /// Print the element-balance matrix before the result
    #[arg(long)]
    show_matrix: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions::new()
            .with_hydrates(!self.no_hydrates)
            .with_strict_elements(!self.lenient_elements)
    }

    fn solver_config(&self) -> BalancerConfig {
        let normalization = match self.fix_column {
            Some(n) => Normalization::FixColumn((n - 1) as usize),
            None => Normalization::MinimumSum,
        };
        let policy = if self.allow_under_determined {
            DegeneracyPolicy::MinimumSum
        } else {
            DegeneracyPolicy::Reject
        };
        BalancerConfig::new()
            .with_normalization(normalization)
            .with_policy(policy)
    }
}

fn run(args: &Args) -> Result<(), BalanceError> {
    let (equation, matrix) = equation::build_with(&args.equation, &args.parse_options())?;

    if args.show_matrix {
        print!("{}", matrix);
    }

    let coefficients = Balancer::with_config(args.solver_config()).solve(&matrix)?;
    let balanced = BalancedEquation::new(equation, coefficients)?;

    println!("{}", args.equation);
    println!("{}", SEPARATOR);
    println!("{}", balanced);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("reaction_balancer=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
