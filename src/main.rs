mod report;

use clap::Parser;
use env_logger::Env;
use log::info;
use report::render_report;
use rodchain::RodSystem;
use std::error::Error;
use std::path::PathBuf;

/// Analyse an axially loaded rod chain described by a JSON project file.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the project file.
    project: PathBuf,
    /// Print the solution as JSON instead of a text report.
    #[arg(long)]
    json: bool,
    /// Increase log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Map the verbosity count onto a default log filter.
fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    // RUST_LOG still takes precedence over the command line, see
    // https://docs.rs/env_logger for the filter syntax.
    env_logger::Builder::from_env(Env::default().default_filter_or(log_filter(cli.verbose)))
        .init();

    // Load the chain: rods, nodal forces and which ends are anchored.
    let system = RodSystem::load(&cli.project)?;

    // Assemble and solve the stiffness system with the direct stiffness
    // method (https://en.wikipedia.org/wiki/Direct_stiffness_method), then
    // recover rod forces and nodal stresses from the displacements.
    let calculator = system.calculator()?;
    let solution = calculator.calculate(system.left_anchor, system.right_anchor)?;
    info!("analysis of {} finished", cli.project.display());

    // Either hand the raw solution to another tool or print a report for
    // a human reader.
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&solution)?);
    } else {
        print!("{}", render_report(&calculator, &solution));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_line_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verbosity_flags_are_counted() {
        let cli = Cli::parse_from(["rodchain", "-vv", "--json", "chain.json"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.json);
        assert_eq!(cli.project, PathBuf::from("chain.json"));
        assert_eq!(log_filter(cli.verbose), "debug");
        assert_eq!(log_filter(7), "trace");
    }
}
