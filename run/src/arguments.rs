use std::str::FromStr;

use anyhow::Context;
use clap::{App, Arg};
use log::{info, warn};

extern crate serde;

use labour_market_sim::EconomyConfig;
use serde::{Deserialize, Serialize};

const VERSION_NUMBER: &str = "V1.0";

fn get_cmd_arguments() -> clap::ArgMatches<'static> {
    App::new("Labour Market Agent Simulation")
        .version("1.0")
        .author("Sam Ralph <sr1474@york.ac.uk")
        .about("Simulates a labour market of Workers and Firms, one week at a time")
        .usage("run --mode=<mode> [--config=<file>] [--workers=<n>] [--firms=<n>] [--weeks=<n>]
            \n    Every option has a default, so a bare 'run' will simulate a default economy\
            \n    There are several modes available to choose from:\
            \n        simulate      ->      Runs the economy, writes the metrics (csv) and final agents (json), and prints a summary\
            \n        summary       ->      Runs the economy and only prints the summary")
        .arg(
            Arg::with_name("mode")
                .long("mode")
                .help("Specifies the mode of the simulator")
                .require_equals(true)
                .takes_value(true))
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .help("A JSON file of economy parameters, overridden by any flags below")
                .require_equals(true)
                .takes_value(true))
        .arg(
            Arg::with_name("workers")
                .long("workers")
                .help("The number of Workers in the economy")
                .require_equals(true)
                .takes_value(true))
        .arg(
            Arg::with_name("firms")
                .long("firms")
                .help("The number of Firms in the economy")
                .require_equals(true)
                .takes_value(true))
        .arg(
            Arg::with_name("weeks")
                .long("weeks")
                .help("The number of weeks to simulate")
                .require_equals(true)
                .takes_value(true))
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .help("Seeds the random source, making the run reproducible")
                .require_equals(true)
                .takes_value(true))
        .arg(
            Arg::with_name("inflation")
                .long("inflation")
                .help("The annual inflation rate, as a fraction (0.02 is 2%)")
                .require_equals(true)
                .takes_value(true))
        .arg(
            Arg::with_name("output_directory")
                .long("output_directory")
                .help("Specifies the name of the output directory to store statistics")
                .takes_value(true)
                .require_equals(true))
        .arg(
            Arg::with_name("run_name")
                .long("run_name")
                .help("Prefix for the output files of this run")
                .takes_value(true)
                .require_equals(true))
        .get_matches()
}

pub struct Arguments {
    pub mode: SimMode,
    pub economy: EconomyConfig,
    pub output_directory: String,
    pub run_name: String,
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SimMode {
    Simulate,
    Summary,
}

/// Parses a numeric flag, keeping the current value if it's malformed
fn parse_flag<T: FromStr + std::fmt::Display>(name: &str, value: Option<&str>, current: &mut T)
where
    T::Err: std::fmt::Display,
{
    if let Some(value) = value {
        match value.parse() {
            Ok(parsed) => *current = parsed,
            Err(e) => {
                warn!("Failed to parse {} with value: '{}' and error {}. Using value of: {}", name, value, e, current)
            }
        }
    }
}

impl Arguments {
    pub fn load_from_arguments() -> anyhow::Result<Arguments> {
        let mut arguments = Arguments::default();
        let matches = get_cmd_arguments();
        if let Some(mode) = matches.value_of("mode") {
            arguments.mode = serde_plain::from_str(mode)
                .with_context(|| format!("Unknown mode '{}' received! Use --help for a list of valid modes", mode))?;
        }

        if let Some(config) = matches.value_of("config") {
            info!("Loading economy config from {}", config);
            arguments.economy = EconomyConfig::from_json_file(config)?;
        }

        parse_flag("workers", matches.value_of("workers"), &mut arguments.economy.num_workers);
        parse_flag("firms", matches.value_of("firms"), &mut arguments.economy.num_firms);
        parse_flag("weeks", matches.value_of("weeks"), &mut arguments.economy.weeks);
        parse_flag("inflation", matches.value_of("inflation"), &mut arguments.economy.annual_inflation_rate);
        if let Some(seed) = matches.value_of("seed") {
            match seed.parse() {
                Ok(seed) => arguments.economy.seed = Some(seed),
                Err(e) => {
                    warn!("Failed to parse seed with value: '{}' and error {}. Using an unseeded run", seed, e)
                }
            }
        }

        if let Some(directory) = matches.value_of("output_directory") {
            arguments.output_directory = directory.to_string();
        }
        if let Some(run_name) = matches.value_of("run_name") {
            arguments.run_name = run_name.to_string();
        }
        Ok(arguments)
    }
}

impl Default for Arguments {
    fn default() -> Self {
        Arguments {
            mode: SimMode::Simulate,
            economy: EconomyConfig::default(),
            output_directory: "simulator_output/".to_string() + VERSION_NUMBER,
            run_name: "economy".to_string(),
        }
    }
}
