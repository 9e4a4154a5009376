/*
 * Labour Market Agent Simulation (LMAS)
 * Copyright (c)  2022. Sam Ralph
 *
 * This file is part of LMAS.
 *
 * LMAS is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, version 3 of the License.
 *
 * LMAS is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with LMAS.  If not, see <https://www.gnu.org/licenses/>.
 *
 */

use std::fmt::{Debug, Display, Formatter};
use std::fs::{create_dir_all, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use log::{debug, info};
use num_format::ToFormattedString;

use labour_market_sim::config::NUMBER_FORMATTING;
use labour_market_sim::statistics::MetricsRecord;
use labour_market_sim::{Economy, MetricsCollector};

use crate::arguments::SimMode;
use crate::execute_modes::RuntimeError::EmptyRun;
use crate::Arguments;

pub enum RuntimeError {
    EmptyRun(String),
}

impl Debug for RuntimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeError::EmptyRun(err) => {
                write!(f, "Nothing was recorded: {}", err)
            }
        }
    }
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for RuntimeError {}

/// Builds the economy and runs it for the configured number of weeks
fn run_economy(arguments: &Arguments) -> anyhow::Result<(Economy, MetricsCollector)> {
    let total_time = Instant::now();
    let mut economy =
        Economy::new(arguments.economy.clone()).context("Failed to initialise economy")?;
    info!(
        "Initialised economy in {:.2} seconds, starting sim...",
        total_time.elapsed().as_secs_f64()
    );
    let mut collector = MetricsCollector::default();
    economy.simulate(arguments.economy.weeks, &mut collector)?;
    info!("Finished in {:?}", total_time.elapsed());
    Ok((economy, collector))
}

/// The output path for one of this run's files, with the run name made safe to use as a filename
fn output_file(arguments: &Arguments, suffix: &str) -> PathBuf {
    let run_name = sanitize_filename::sanitize(&arguments.run_name);
    Path::new(&arguments.output_directory).join(format!("{}_{}", run_name, suffix))
}

pub fn write_metrics_csv(collector: &MetricsCollector, path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Creating metrics file {}", path.display()))?;
    let mut header = vec!["Week"];
    header.extend(collector.header());
    writer.write_record(&header)?;
    for (record, row) in collector.records().iter().zip(collector.rows()) {
        let mut fields = vec![record.week().to_string()];
        fields.extend(row.iter().map(|value| value.to_string()));
        writer.write_record(&fields)?;
    }
    writer.flush()?;
    debug!("Wrote {} weeks of metrics to {}", collector.len(), path.display());
    Ok(())
}

pub fn write_agents_json(economy: &Economy, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("Creating agents file {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &economy.snapshot())
        .context("Dumping agents to json")?;
    debug!("Wrote final agent state to {}", path.display());
    Ok(())
}

fn formatted(value: f64) -> String {
    (value.round() as i64).to_formatted_string(&NUMBER_FORMATTING)
}

fn metric(record: &MetricsRecord, name: &str) -> f64 {
    record.get(name).unwrap_or_default()
}

pub fn print_summary(economy: &Economy, collector: &MetricsCollector) -> anyhow::Result<()> {
    let latest = collector
        .latest()
        .ok_or_else(|| EmptyRun("The metrics collector has no records".to_string()))?;
    let stats = economy.get_unemployment_stats();
    println!("\n=== Labour Market Summary (week {}) ===", latest.week());
    println!(
        "Workers: {}, Firms: {}, Firm owners: {}",
        economy.workers().len().to_formatted_string(&NUMBER_FORMATTING),
        economy.firms().len().to_formatted_string(&NUMBER_FORMATTING),
        economy.firm_owner_count().to_formatted_string(&NUMBER_FORMATTING)
    );
    println!(
        "Unemployment: {:.1}% ({} long term, {:.1}%)",
        stats.unemployment_rate * 100.0,
        stats.long_term_unemployed.to_formatted_string(&NUMBER_FORMATTING),
        stats.long_term_unemployment_rate * 100.0
    );
    println!("Wage share: {:.1}%", metric(latest, "Wage Share") * 100.0);
    println!("Gini coefficient: {:.3}", metric(latest, "Gini Coefficient"));
    println!(
        "Average exploitation rate: {:.1}%",
        metric(latest, "Average Exploitation Rate") * 100.0
    );
    println!(
        "Total worker wealth: {}, net of debt: {}",
        formatted(metric(latest, "Total Worker Wealth")),
        formatted(metric(latest, "Net Worker Wealth"))
    );
    println!(
        "Total worker debt: {} across {} workers, {} bankrupt",
        formatted(metric(latest, "Total Worker Debt")),
        formatted(metric(latest, "Workers in Debt")),
        formatted(metric(latest, "Bankrupt Workers"))
    );
    println!(
        "Debt to income ratio: {:.2}",
        metric(latest, "Debt to Income Ratio")
    );
    println!(
        "Price index: {:.3} ({:.2}% since the start)",
        economy.price_index(),
        metric(latest, "Annual Inflation Rate") * 100.0
    );
    println!(
        "Skills: High: {}, Medium: {}, Low: {}",
        formatted(metric(latest, "High Skill Workers")),
        formatted(metric(latest, "Medium Skill Workers")),
        formatted(metric(latest, "Low Skill Workers"))
    );
    println!(
        "Average weekly wage: High: {}, Medium: {}, Low: {}",
        formatted(metric(latest, "High Skill Average Wage")),
        formatted(metric(latest, "Medium Skill Average Wage")),
        formatted(metric(latest, "Low Skill Average Wage"))
    );
    Ok(())
}

pub fn simulate(arguments: Arguments) -> anyhow::Result<()> {
    info!(
        "Using mode simulate for {} workers and {} firms over {} weeks",
        arguments.economy.num_workers, arguments.economy.num_firms, arguments.economy.weeks
    );
    let (economy, collector) = run_economy(&arguments)?;

    create_dir_all(&arguments.output_directory).with_context(|| {
        format!("Creating output directory {}", arguments.output_directory)
    })?;
    let metrics_path = output_file(&arguments, "metrics.csv");
    write_metrics_csv(&collector, &metrics_path)?;
    let agents_path = output_file(&arguments, "agents.json");
    write_agents_json(&economy, &agents_path)?;
    info!(
        "Saved results to {} and {}",
        metrics_path.display(),
        agents_path.display()
    );
    print_summary(&economy, &collector)
}

pub fn summary(arguments: Arguments) -> anyhow::Result<()> {
    info!("Using mode summary");
    let (economy, collector) = run_economy(&arguments)?;
    print_summary(&economy, &collector)
}

pub fn execute_arguments(arguments: Arguments) -> anyhow::Result<()> {
    match arguments.mode {
        SimMode::Simulate => simulate(arguments)?,
        SimMode::Summary => summary(arguments)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use labour_market_sim::{Economy, EconomyConfig, MetricsCollector};

    use crate::arguments::SimMode;
    use crate::execute_modes::{output_file, print_summary, write_metrics_csv};
    use crate::Arguments;

    #[test]
    fn run_names_cannot_escape_the_output_directory() {
        let arguments = Arguments {
            mode: SimMode::Simulate,
            economy: EconomyConfig::default(),
            output_directory: "out".to_string(),
            run_name: "../../etc/passwd".to_string(),
        };
        let path = output_file(&arguments, "metrics.csv");
        assert_eq!(path.parent().unwrap(), std::path::Path::new("out"));
    }

    #[test]
    fn summary_needs_a_record() {
        let economy = Economy::new(EconomyConfig::new(10, 1, 1).with_seed(1)).unwrap();
        assert!(print_summary(&economy, &MetricsCollector::default()).is_err());
    }

    #[test]
    fn metrics_csv_has_a_row_per_week() {
        let mut economy = Economy::new(EconomyConfig::new(30, 2, 3).with_seed(4)).unwrap();
        let mut collector = MetricsCollector::default();
        economy.simulate(3, &mut collector).unwrap();

        let path = std::env::temp_dir().join("labour_market_metrics_test.csv");
        write_metrics_csv(&collector, &path).unwrap();
        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), collector.header().len() + 1);
        assert_eq!(&headers[0], "Week");
        assert_eq!(reader.records().count(), 4);
        std::fs::remove_file(path).ok();
    }
}
