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

use std::fmt::{Display, Formatter};

use log::debug;
use serde::Serialize;

use crate::config::WEEKS_PER_YEAR;
use crate::economy::Economy;
use crate::models::SkillLevel;

/// Computes one named metric from the current state of the economy
pub type Reporter = fn(&Economy) -> f64;

/// The Gini coefficient of the given values, from 0 (all equal) towards 1 (one holds everything)
///
/// Returns 0 for an empty slice, when every value is equal, or when every value is zero
pub fn gini_coefficient(values: &[f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let total: f64 = sorted.iter().sum();
    if total == 0.0 {
        debug!("Gini coefficient of {} values with a zero total, using 0", n);
        return 0.0;
    }
    if sorted.first() == sorted.last() {
        return 0.0;
    }
    let n = n as f64;
    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, value)| value * (n - i as f64))
        .sum();
    let b = weighted / (n * total);
    // Rounding can leave near equal values a hair below zero
    (1.0 + 1.0 / n - 2.0 * b).max(0.0)
}

/// The metrics recorded for a single week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsRecord {
    week: u32,
    values: Vec<(&'static str, f64)>,
}

impl MetricsRecord {
    pub fn week(&self) -> u32 {
        self.week
    }
    pub fn values(&self) -> &[(&'static str, f64)] {
        &self.values
    }
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(metric, _)| *metric == name)
            .map(|(_, value)| *value)
    }
}

impl Display for MetricsRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Week {}", self.week)?;
        for (name, value) in &self.values {
            write!(f, ", {}: {:.3}", name, value)?;
        }
        Ok(())
    }
}

/// Records a row of named metrics every time it is given the economy
pub struct MetricsCollector {
    reporters: Vec<(&'static str, Reporter)>,
    records: Vec<MetricsRecord>,
}

impl MetricsCollector {
    pub fn new(reporters: Vec<(&'static str, Reporter)>) -> MetricsCollector {
        MetricsCollector {
            reporters,
            records: Vec::new(),
        }
    }

    /// Appends a record of the current week
    ///
    /// Metrics that come out NaN or infinite are stored as 0, so one bad week doesn't poison
    /// the output
    pub fn collect(&mut self, economy: &Economy) {
        let values = self
            .reporters
            .iter()
            .map(|(name, reporter)| {
                let value = reporter(economy);
                if value.is_finite() {
                    (*name, value)
                } else {
                    debug!("Metric {} was {} in week {}, recording 0", name, value, economy.week());
                    (*name, 0.0)
                }
            })
            .collect();
        self.records.push(MetricsRecord {
            week: economy.week(),
            values,
        });
    }

    /// The metric names, in column order
    pub fn header(&self) -> Vec<&'static str> {
        self.reporters.iter().map(|(name, _)| *name).collect()
    }

    /// Every record as a row of values, in the same order as the header
    pub fn rows(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        self.records
            .iter()
            .map(|record| record.values.iter().map(|(_, value)| *value).collect())
    }

    pub fn records(&self) -> &[MetricsRecord] {
        &self.records
    }
    pub fn latest(&self) -> Option<&MetricsRecord> {
        self.records.last()
    }
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        MetricsCollector::new(default_reporters())
    }
}

fn average_real_wage(economy: &Economy, skill: SkillLevel) -> f64 {
    let price_index = economy.price_index();
    economy.employed_skill_average(skill, |worker| worker.get_real_wage(price_index))
}

fn average_exploitation(economy: &Economy, skill: SkillLevel) -> f64 {
    economy.employed_skill_average(skill, |worker| worker.get_exploitation_rate())
}

fn metric(name: &'static str, reporter: Reporter) -> (&'static str, Reporter) {
    (name, reporter)
}

/// Every metric reported for a run, in output order
pub fn default_reporters() -> Vec<(&'static str, Reporter)> {
    vec![
        metric("Total Profit", |e| e.total_profit()),
        metric("Total Wages", |e| e.total_wages()),
        metric("Total Surplus Value", |e| e.total_surplus_value()),
        metric("Wage Share", |e| e.get_wage_share()),
        metric("Unemployment Rate", |e| e.get_unemployment_rate()),
        metric("Price Index", |e| e.price_index()),
        metric("Total Tax Revenue", |e| e.total_tax_revenue()),
        metric("Total Unmet Needs", |e| e.total_unmet_needs()),
        metric("Average Financial Stress", |e| e.average_financial_stress()),
        metric("Total Worker Wealth", |e| e.total_worker_wealth()),
        metric("Average Exploitation Rate", |e| e.get_avg_exploitation_rate()),
        metric("Total Worker Debt", |e| e.total_worker_debt()),
        metric("Average Debt per Worker", |e| {
            e.total_worker_debt() / e.workers().len().max(1) as f64
        }),
        metric("Workers in Debt", |e| e.workers_in_debt() as f64),
        metric("Debt to Income Ratio", |e| e.get_avg_debt_to_income()),
        metric("Bankrupt Workers", |e| e.bankrupt_workers() as f64),
        metric("Total Debt Payments", |e| e.total_debt_payments()),
        metric("Gini Coefficient", |e| e.compute_gini()),
        metric("Long-term Unemployed", |e| e.long_term_unemployed_count() as f64),
        metric("Long-term Unemployment Rate", |e| {
            e.get_unemployment_stats().long_term_unemployment_rate
        }),
        metric("Employed Workers", |e| e.employed().len() as f64),
        metric("Net Worker Wealth", |e| e.net_worker_wealth()),
        metric("High Skill Workers", |e| e.skill_counts()[SkillLevel::High] as f64),
        metric("Medium Skill Workers", |e| e.skill_counts()[SkillLevel::Medium] as f64),
        metric("Low Skill Workers", |e| e.skill_counts()[SkillLevel::Low] as f64),
        metric("Firm Owners", |e| e.firm_owner_count() as f64),
        metric("High Skill Average Wage", |e| e.average_wage_by_skill()[SkillLevel::High]),
        metric("Medium Skill Average Wage", |e| e.average_wage_by_skill()[SkillLevel::Medium]),
        metric("Low Skill Average Wage", |e| e.average_wage_by_skill()[SkillLevel::Low]),
        metric("Real Wage Total", |e| {
            let price_index = e.price_index();
            e.workers()
                .iter()
                .map(|worker| worker.get_real_wage(price_index))
                .sum()
        }),
        metric("High Skill Real Wage", |e| average_real_wage(e, SkillLevel::High)),
        metric("Medium Skill Real Wage", |e| average_real_wage(e, SkillLevel::Medium)),
        metric("Low Skill Real Wage", |e| average_real_wage(e, SkillLevel::Low)),
        metric("Weekly Inflation Rate", |e| {
            e.price_index().powf(1.0 / WEEKS_PER_YEAR) - 1.0
        }),
        metric("Annual Inflation Rate", |e| e.price_index() - 1.0),
        metric("High Skill Exploitation", |e| average_exploitation(e, SkillLevel::High)),
        metric("Medium Skill Exploitation", |e| average_exploitation(e, SkillLevel::Medium)),
        metric("Low Skill Exploitation", |e| average_exploitation(e, SkillLevel::Low)),
    ]
}
