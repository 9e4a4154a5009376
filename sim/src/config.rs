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

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use num_format::Locale;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

pub const NUMBER_FORMATTING: Locale = Locale::en;

/// How often (in weeks) progress is logged during a run
pub const DEBUG_ITERATION_PRINT: u32 = 26;

pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Hours a Worker supplies per week
pub const WORK_HOURS: f64 = 40.0;
/// Value created by one hour of labour at a productivity of 1.0
pub const BASE_VALUE_PER_HOUR: f64 = 25.0;

/// Base weekly spending required to cover a Worker's needs, before the skill multiplier
pub const BASE_WEEKLY_NEEDS: f64 = 500.0;

/// Weeks of unemployment after which a Worker starts lowering their reservation wage
pub const DESPERATION_GRACE_WEEKS: u32 = 4;
pub const DESPERATION_RATE_PER_WEEK: f64 = 0.05;
pub const DESPERATION_FLOOR: f64 = 0.7;
pub const DEBT_DESPERATION_WEIGHT: f64 = 0.4;
pub const DEBT_DESPERATION_FLOOR: f64 = 0.6;

/// Fraction of outstanding debt due as the minimum weekly payment
pub const MINIMUM_DEBT_PAYMENT_RATE: f64 = 0.02;
pub const MINIMUM_DEBT_PAYMENT: f64 = 20.0;

pub const STRESS_UNEMPLOYMENT: f64 = 0.4;
pub const STRESS_DEBT_WEIGHT: f64 = 0.3;
pub const STRESS_UNMET_NEEDS_WEIGHT: f64 = 0.3;

/// High skill Workers above this wealth may see investment growth
pub const INVESTMENT_WEALTH_THRESHOLD: f64 = 10000.0;
pub const INVESTMENT_CHANCE: f64 = 0.3;

/// Firms losing more than this consider firing
pub const FIRING_LOSS_THRESHOLD: f64 = -500.0;
/// Firms never fire below this roster size
pub const MINIMUM_ROSTER_FOR_FIRING: usize = 5;
pub const FIRING_CHANCE: f64 = 0.45;

pub const MAX_HIRES_PER_STEP: usize = 3;
pub const HIRE_CHANCE_NEEDED_SKILL: f64 = 0.8;
pub const HIRE_CHANCE_SURPLUS_SKILL: f64 = 0.3;
pub const HIRE_PROFITABLE_MULTIPLIER: f64 = 1.5;
pub const HIRE_HEAVY_LOSS_THRESHOLD: f64 = -1000.0;
pub const HIRE_HEAVY_LOSS_MULTIPLIER: f64 = 0.3;

/// Unemployment spells longer than this are counted as long term
pub const LONG_TERM_UNEMPLOYMENT_WEEKS: u32 = 12;

/// The parameters needed to construct an Economy
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EconomyConfig {
    pub num_workers: usize,
    pub num_firms: usize,
    /// The simulation horizon
    pub weeks: u32,
    pub annual_inflation_rate: f64,
    /// Half width of the uniform noise added to the weekly inflation rate
    pub inflation_noise: f64,
    /// If set, the run is fully reproducible
    pub seed: Option<u64>,
}

impl EconomyConfig {
    pub fn new(num_workers: usize, num_firms: usize, weeks: u32) -> EconomyConfig {
        EconomyConfig {
            num_workers,
            num_firms,
            weeks,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> EconomyConfig {
        self.seed = Some(seed);
        self
    }

    /// Reads a config from a JSON file, where missing fields take their default values
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<EconomyConfig> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Opening economy config file {}", path.display()))?;
        let config: EconomyConfig = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Parsing economy config file {}", path.display()))?;
        Ok(config)
    }

    /// Rejects population sizes and rates that cannot produce a meaningful run
    pub fn validate(&self) -> Result<(), SimError> {
        if self.num_workers == 0 {
            return Err(SimError::InitializationError {
                message: "An economy needs at least one worker (num_workers was 0)".to_string(),
            });
        }
        if self.num_firms == 0 {
            return Err(SimError::InitializationError {
                message: "An economy needs at least one firm (num_firms was 0)".to_string(),
            });
        }
        if !self.annual_inflation_rate.is_finite() || self.annual_inflation_rate <= -1.0 {
            return Err(SimError::InitializationError {
                message: format!(
                    "Annual inflation rate must be finite and above -100%, got {}",
                    self.annual_inflation_rate
                ),
            });
        }
        if !self.inflation_noise.is_finite() || self.inflation_noise < 0.0 {
            return Err(SimError::InitializationError {
                message: format!(
                    "Inflation noise must be finite and non negative, got {}",
                    self.inflation_noise
                ),
            });
        }
        Ok(())
    }

    /// The weekly rate that compounds to the annual inflation rate over a year
    pub fn weekly_inflation_rate(&self) -> f64 {
        (1.0 + self.annual_inflation_rate).powf(1.0 / WEEKS_PER_YEAR) - 1.0
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        EconomyConfig {
            num_workers: 1500,
            num_firms: 30,
            weeks: 260,
            annual_inflation_rate: 0.02,
            inflation_noise: 0.001,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::EconomyConfig;

    #[test]
    fn rejects_empty_populations() {
        assert!(EconomyConfig::new(0, 5, 10).validate().is_err());
        assert!(EconomyConfig::new(5, 0, 10).validate().is_err());
        assert!(EconomyConfig::new(5, 5, 10).validate().is_ok());
    }

    #[test]
    fn rejects_bad_rates() {
        let mut config = EconomyConfig::new(10, 1, 1);
        config.annual_inflation_rate = f64::NAN;
        assert!(config.validate().is_err());
        config.annual_inflation_rate = 0.02;
        config.inflation_noise = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn weekly_rate_compounds_to_annual() {
        let config = EconomyConfig::default();
        let compounded = (1.0 + config.weekly_inflation_rate()).powf(52.0) - 1.0;
        assert!((compounded - 0.02).abs() < 1e-12);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: EconomyConfig =
            serde_json::from_str(r#"{"num_workers": 20, "seed": 7}"#).unwrap();
        assert_eq!(config.num_workers, 20);
        assert_eq!(config.num_firms, 30);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        assert!(EconomyConfig::from_json_file("no/such/economy_config.json").is_err());
    }
}
