mod cli;

use crate::cli::CliOptions;
use anyhow::{bail, Result};
use clap::Parser;
use lind_skel::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use lind_skel::interface::init_logging;
use lind_skel::scenario::{self, Scenario};
use lind_skel::run_scenario;

/// Entry point of the lind-skel runner.
///
/// Runs the named scenarios in this process, one after another, and prints a
/// line per scenario that a harness can parse:
///
///     TEST:<name>:PASS
///     TEST:<name>:FAIL:<reason>
///
/// Exits 0 only if every scenario passed.  Unlike the leaf programs, a
/// failing scenario does not abort the runner; the remaining ones still run.
fn main() -> Result<()> {
    let cli = CliOptions::parse();
    init_logging(cli.verbose);

    if cli.list {
        for scenario in scenario::registry() {
            println!("{:<8} {}", scenario.name, scenario.description);
        }
        return Ok(());
    }

    let selected = select(&cli.scenarios)?;
    let config = cli.config();

    let mut failed = 0;
    for scenario in &selected {
        match run_scenario(scenario, &config) {
            Ok(()) => println!("TEST:{}:PASS", scenario.name),
            Err(e) => {
                failed += 1;
                println!("TEST:{}:FAIL:{}", scenario.name, e);
            }
        }
    }

    println!(
        "total {} passed {} failed {}",
        selected.len(),
        selected.len() - failed,
        failed
    );
    std::process::exit(if failed == 0 { EXIT_SUCCESS } else { EXIT_FAILURE });
}

fn select(names: &[String]) -> Result<Vec<&'static Scenario>> {
    if names.is_empty() {
        return Ok(scenario::registry().iter().collect());
    }
    let mut selected = Vec::with_capacity(names.len());
    for name in names {
        match scenario::find(name) {
            Some(scenario) => selected.push(scenario),
            None => bail!("unknown scenario {:?} (try --list)", name),
        }
    }
    Ok(selected)
}
