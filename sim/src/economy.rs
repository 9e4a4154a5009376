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

use std::collections::BTreeSet;
use std::time::Instant;

use anyhow::Context;
use enum_map::enum_map;
use log::{debug, info};
use num_format::ToFormattedString;
use rand::prelude::IteratorRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::config::{
    EconomyConfig, DEBUG_ITERATION_PRINT, LONG_TERM_UNEMPLOYMENT_WEEKS, MAX_HIRES_PER_STEP,
    NUMBER_FORMATTING,
};
use crate::error::SimError;
use crate::models::firm::FirmAgent;
use crate::models::worker::WorkerAgent;
use crate::models::{FirmID, SkillLevel, SkillTable, WorkerID};
use crate::statistics::{gini_coefficient, MetricsCollector};

/// The whole labour market: every Worker and Firm, who is employed, and the price level
pub struct Economy {
    config: EconomyConfig,
    workers: Vec<WorkerAgent>,
    firms: Vec<FirmAgent>,
    /// Together with `unemployed`, partitions `workers`
    employed: BTreeSet<WorkerID>,
    unemployed: BTreeSet<WorkerID>,
    price_index: f64,
    /// The number of completed steps
    week: u32,
    rng: StdRng,
}

/// A read only view of every agent, taken between steps
#[derive(Debug, Serialize)]
pub struct EconomySnapshot<'a> {
    pub week: u32,
    pub price_index: f64,
    pub workers: &'a [WorkerAgent],
    pub firms: &'a [FirmAgent],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnemploymentStats {
    pub total_workers: usize,
    pub unemployed_count: usize,
    pub employed_count: usize,
    pub unemployment_rate: f64,
    pub long_term_unemployed: usize,
    pub long_term_unemployment_rate: f64,
}

/// Initialisation Methods
impl Economy {
    /// Builds the population, with every Worker unemployed and every Firm empty
    pub fn new(config: EconomyConfig) -> anyhow::Result<Economy> {
        let start = Instant::now();
        config.validate().context("Invalid economy configuration")?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let workers: Vec<WorkerAgent> = (0..config.num_workers)
            .map(|index| WorkerAgent::new(WorkerID::new(index), &mut rng))
            .collect();
        let firms: Vec<FirmAgent> = (0..config.num_firms)
            .map(|index| FirmAgent::new(FirmID::new(index, config.num_workers), &mut rng))
            .collect();
        let unemployed = workers.iter().map(|worker| worker.id()).collect();

        let economy = Economy {
            config,
            workers,
            firms,
            employed: BTreeSet::new(),
            unemployed,
            price_index: 1.0,
            week: 0,
            rng,
        };
        info!(
            "Created economy with {} workers and {} firms in {:?}",
            economy.workers.len().to_formatted_string(&NUMBER_FORMATTING),
            economy.firms.len().to_formatted_string(&NUMBER_FORMATTING),
            start.elapsed()
        );
        let skill_counts = economy.skill_counts();
        info!(
            "Skill distribution: High: {}, Medium: {}, Low: {}",
            skill_counts[SkillLevel::High],
            skill_counts[SkillLevel::Medium],
            skill_counts[SkillLevel::Low]
        );
        let owners = economy.firm_owner_count();
        info!(
            "Firm owners: {} ({:.1}%)",
            owners,
            owners as f64 / economy.workers.len() as f64 * 100.0
        );
        Ok(economy)
    }
}

/// Runtime Simulation Methods
impl Economy {
    /// Runs the economy for the given number of weeks, recording the metrics after every step
    ///
    /// The starting state is recorded first, if the collector is empty
    pub fn simulate(&mut self, weeks: u32, collector: &mut MetricsCollector) -> anyhow::Result<()> {
        let start_time = Instant::now();
        info!("Starting simulation for {} weeks...", weeks);
        if collector.is_empty() {
            collector.collect(self);
        }
        for _ in 0..weeks {
            self.step()
                .with_context(|| format!("Simulating week {}", self.week + 1))?;
            collector.collect(self);
            if self.week % DEBUG_ITERATION_PRINT == 0 {
                info!(
                    "{:?}       - Week {}, Unemployment: {:.1}%, Gini: {:.3}, Price Index: {:.3}",
                    start_time.elapsed(),
                    self.week,
                    self.get_unemployment_rate() * 100.0,
                    self.compute_gini(),
                    self.price_index
                );
            }
        }
        info!("Finished simulation in {:?}", start_time.elapsed());
        Ok(())
    }

    /// Advances the economy by one week
    ///
    /// Prices move first, then every Worker settles their finances, then every Firm produces
    /// and makes its employment decisions
    pub fn step(&mut self) -> anyhow::Result<()> {
        self.advance_price_index();
        for worker in &mut self.workers {
            worker.step(&mut self.rng);
        }
        for index in 0..self.firms.len() {
            self.step_firm(index)
                .with_context(|| format!("Executing step for firm at index {}", index))?;
        }
        self.week += 1;
        self.verify_invariants()
            .with_context(|| format!("End of week {}", self.week))?;
        Ok(())
    }

    fn advance_price_index(&mut self) {
        let noise = if self.config.inflation_noise > 0.0 {
            self.rng
                .gen_range(-self.config.inflation_noise..=self.config.inflation_noise)
        } else {
            0.0
        };
        self.price_index *= 1.0 + self.config.weekly_inflation_rate() + noise;
    }

    fn step_firm(&mut self, index: usize) -> Result<(), SimError> {
        let firm_id = self.firms[index].id();
        self.firms[index].produce(&mut self.workers, &mut self.rng)?;

        if let Some(worker_id) = self.firms[index].choose_worker_to_fire(&mut self.rng) {
            self.transfer_employment(worker_id, Some(firm_id), None)?;
            debug!("{} fired {}", firm_id, worker_id);
        }

        let attempts = MAX_HIRES_PER_STEP.min(self.unemployed.len());
        for _ in 0..attempts {
            if !self.firms[index].has_capacity() {
                break;
            }
            let candidate = match self.unemployed.iter().choose(&mut self.rng) {
                Some(candidate) => *candidate,
                None => break,
            };
            let worker = &self.workers[candidate.index()];
            if self.firms[index].should_hire_worker(worker, &mut self.rng) {
                self.hire(firm_id, candidate)?;
            }
        }
        Ok(())
    }

    /// Makes the Firm a wage offer to the Worker, and completes the hire if the Worker accepts
    ///
    /// This is the only place a hire is finalised, so no Worker is ever hired below their
    /// reservation wage
    fn hire(&mut self, firm_id: FirmID, worker_id: WorkerID) -> Result<bool, SimError> {
        self.firm(firm_id)?;
        self.worker(worker_id)?;
        let firm = &self.firms[firm_id.index()];
        let worker = &self.workers[worker_id.index()];
        let offer = firm.calculate_worker_wage_offer(worker, &mut self.rng);
        let reservation_wage = worker.get_reservation_wage();
        if offer < reservation_wage {
            debug!(
                "{} declined an offer of {:.2} from {}, below their reservation wage {:.2}",
                worker_id, offer, firm_id, reservation_wage
            );
            return Ok(false);
        }
        let hourly_wage = offer / worker.work_hours();
        let firm_profit = firm.profit();

        self.transfer_employment(worker_id, None, Some(firm_id))?;
        self.workers[worker_id.index()]
            .work_for_firm(firm_id, hourly_wage, firm_profit, &mut self.rng)
            .ok_or_else(|| {
                SimError::new_invariant_violation(
                    "hired workers work for their employer",
                    format!("{} was hired by {} but could not work there", worker_id, firm_id),
                )
            })?;
        debug!("{} hired {} at {:.2} per week", firm_id, worker_id, offer);
        Ok(true)
    }

    /// Moves a Worker from one employer (or unemployment) to another, as a single transaction
    ///
    /// The Worker's employer, both Firm rosters, and the employed/unemployed partition are all
    /// updated together. Every precondition is checked before anything is changed, so on error
    /// the economy is left as it was
    pub fn transfer_employment(
        &mut self,
        worker_id: WorkerID,
        from: Option<FirmID>,
        to: Option<FirmID>,
    ) -> Result<(), SimError> {
        let worker = self.worker(worker_id)?;
        if worker.employer() != from {
            return Err(SimError::new_invariant_violation(
                "transfers start from the current employer",
                format!(
                    "{} is employed by {:?}, not {:?}",
                    worker_id,
                    worker.employer(),
                    from
                ),
            ));
        }
        if from == to {
            return Ok(());
        }
        let skill = worker.skill_level();
        let partition_matches = match from {
            Some(_) => self.employed.contains(&worker_id) && !self.unemployed.contains(&worker_id),
            None => self.unemployed.contains(&worker_id) && !self.employed.contains(&worker_id),
        };
        if !partition_matches {
            return Err(SimError::new_invariant_violation(
                "every worker is in exactly one partition",
                format!("{} is not in the partition matching employer {:?}", worker_id, from),
            ));
        }
        if let Some(from) = from {
            if !self.firm(from)?.has_worker(&worker_id) {
                return Err(SimError::new_invariant_violation(
                    "employers list their workers",
                    format!("{} is missing from the roster of {}", worker_id, from),
                ));
            }
        }
        if let Some(to) = to {
            if !self.firm(to)?.has_capacity() {
                return Err(SimError::new_invariant_violation(
                    "roster within capacity",
                    format!("{} cannot join {}, as it is full", worker_id, to),
                ));
            }
        }

        if let Some(from) = from {
            self.firms[from.index()].remove_worker(worker_id, skill)?;
        }
        let worker = &mut self.workers[worker_id.index()];
        match to {
            Some(to) => {
                self.firms[to.index()].add_worker(worker_id, skill)?;
                worker.join_firm(to);
                self.unemployed.remove(&worker_id);
                self.employed.insert(worker_id);
            }
            None => {
                worker.lose_job();
                self.employed.remove(&worker_id);
                self.unemployed.insert(worker_id);
            }
        }
        Ok(())
    }

    /// Checks the employment partition, roster bounds, back references, and balances
    ///
    /// Any failure means a hire or fire was applied partially, and the run can't continue
    pub fn verify_invariants(&self) -> Result<(), SimError> {
        if self.employed.len() + self.unemployed.len() != self.workers.len() {
            return Err(SimError::new_invariant_violation(
                "every worker is in exactly one partition",
                format!(
                    "{} employed + {} unemployed != {} workers",
                    self.employed.len(),
                    self.unemployed.len(),
                    self.workers.len()
                ),
            ));
        }
        for worker in &self.workers {
            let id = worker.id();
            let in_employed = self.employed.contains(&id);
            if in_employed == self.unemployed.contains(&id) || in_employed != worker.is_employed() {
                return Err(SimError::new_invariant_violation(
                    "every worker is in exactly one partition",
                    format!("{} has inconsistent employment status", id),
                ));
            }
            match worker.employer() {
                Some(firm_id) => {
                    if !worker.is_employed() || !self.firm(firm_id)?.has_worker(&id) {
                        return Err(SimError::new_invariant_violation(
                            "employers list their workers",
                            format!("{} claims {} as employer, which does not list them", id, firm_id),
                        ));
                    }
                }
                None => {
                    if worker.is_employed() {
                        return Err(SimError::new_invariant_violation(
                            "employed workers have an employer",
                            format!("{} is employed with no employer", id),
                        ));
                    }
                }
            }
            if !(worker.wealth() >= 0.0) || !(worker.debt() >= 0.0) {
                return Err(SimError::new_invariant_violation(
                    "wealth and debt are non negative",
                    format!("{} has wealth {} and debt {}", id, worker.wealth(), worker.debt()),
                ));
            }
        }
        for firm in &self.firms {
            if firm.worker_count() > firm.max_workers() {
                return Err(SimError::new_invariant_violation(
                    "roster within capacity",
                    format!("{} has {} of {} workers", firm.id(), firm.worker_count(), firm.max_workers()),
                ));
            }
            for worker_id in firm.workers() {
                let worker = self.worker(*worker_id)?;
                if worker.employer() != Some(firm.id()) || !worker.is_employed() {
                    return Err(SimError::new_invariant_violation(
                        "roster members are employed by the firm",
                        format!("{} lists {}, who works elsewhere", firm.id(), worker_id),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Aggregate Queries
///
/// These run every step for the whole run, so numeric edge cases resolve to 0 rather than an
/// error
impl Economy {
    /// The Gini coefficient of Worker wealth, 0 when no one has any wealth
    pub fn compute_gini(&self) -> f64 {
        let wealth: Vec<f64> = self.workers.iter().map(|worker| worker.wealth()).collect();
        gini_coefficient(&wealth)
    }

    /// Wages as a share of wages plus surplus value
    ///
    /// Capped at 1 for weeks where firms pay out more than they produce
    pub fn get_wage_share(&self) -> f64 {
        let total_wages = self.total_wages();
        let total_output = total_wages + self.total_surplus_value();
        if total_output > 0.0 {
            (total_wages / total_output).max(0.0).min(1.0)
        } else {
            0.0
        }
    }

    /// The mean exploitation rate of employed Workers
    pub fn get_avg_exploitation_rate(&self) -> f64 {
        let employed: Vec<&WorkerAgent> = self.employed_workers().collect();
        if employed.is_empty() {
            return 0.0;
        }
        let total: f64 = employed
            .iter()
            .map(|worker| {
                let value_produced = worker.get_productive_value();
                if value_produced > 0.0 {
                    1.0 - worker.wage() / value_produced
                } else {
                    0.0
                }
            })
            .sum();
        total / employed.len() as f64
    }

    /// The mean debt to income ratio of employed, paid Workers
    ///
    /// Workers whose ratio is undefined are left out of the average
    pub fn get_avg_debt_to_income(&self) -> f64 {
        let ratios: Vec<f64> = self
            .employed_workers()
            .filter(|worker| worker.wage() > 0.0)
            .filter_map(|worker| worker.get_debt_to_income_ratio())
            .collect();
        if ratios.is_empty() {
            0.0
        } else {
            ratios.iter().sum::<f64>() / ratios.len() as f64
        }
    }

    pub fn get_unemployment_rate(&self) -> f64 {
        ratio(self.unemployed.len() as f64, self.workers.len() as f64)
    }

    pub fn get_unemployment_stats(&self) -> UnemploymentStats {
        let total_workers = self.workers.len();
        let long_term_unemployed = self.long_term_unemployed_count();
        UnemploymentStats {
            total_workers,
            unemployed_count: self.unemployed.len(),
            employed_count: self.employed.len(),
            unemployment_rate: self.get_unemployment_rate(),
            long_term_unemployed,
            long_term_unemployment_rate: ratio(long_term_unemployed as f64, total_workers as f64),
        }
    }

    pub fn long_term_unemployed_count(&self) -> usize {
        self.unemployed
            .iter()
            .filter(|id| self.workers[id.index()].weeks_unemployed() > LONG_TERM_UNEMPLOYMENT_WEEKS)
            .count()
    }

    /// Sum of the current weekly wage of every Worker
    pub fn total_wages(&self) -> f64 {
        self.workers.iter().map(|worker| worker.wage()).sum()
    }

    pub fn total_surplus_value(&self) -> f64 {
        self.firms.iter().map(|firm| firm.total_surplus_value()).sum()
    }

    pub fn total_profit(&self) -> f64 {
        self.firms.iter().map(|firm| firm.profit()).sum()
    }

    /// Corporate taxes from the last step, plus all income tax Workers have paid
    pub fn total_tax_revenue(&self) -> f64 {
        self.firms.iter().map(|firm| firm.taxes_paid()).sum::<f64>()
            + self.workers.iter().map(|worker| worker.total_taxes_paid()).sum::<f64>()
    }

    pub fn total_unmet_needs(&self) -> f64 {
        self.workers.iter().map(|worker| worker.get_unmet_needs()).sum()
    }

    pub fn average_financial_stress(&self) -> f64 {
        ratio(
            self.workers.iter().map(|worker| worker.calculate_financial_stress()).sum(),
            self.workers.len() as f64,
        )
    }

    pub fn total_worker_wealth(&self) -> f64 {
        self.workers.iter().map(|worker| worker.wealth()).sum()
    }

    pub fn total_worker_debt(&self) -> f64 {
        self.workers.iter().map(|worker| worker.debt()).sum()
    }

    pub fn net_worker_wealth(&self) -> f64 {
        self.workers
            .iter()
            .map(|worker| worker.wealth() - worker.debt())
            .sum()
    }

    pub fn workers_in_debt(&self) -> usize {
        self.workers.iter().filter(|worker| worker.debt() > 0.0).count()
    }

    pub fn bankrupt_workers(&self) -> usize {
        self.workers.iter().filter(|worker| worker.is_bankrupt()).count()
    }

    /// What every indebted Worker owes as a minimum payment this week
    pub fn total_debt_payments(&self) -> f64 {
        self.workers
            .iter()
            .map(|worker| worker.minimum_debt_payment())
            .sum()
    }

    pub fn firm_owner_count(&self) -> usize {
        self.workers.iter().filter(|worker| worker.owns_firm()).count()
    }

    pub fn skill_counts(&self) -> SkillTable<usize> {
        let mut counts = enum_map! { _ => 0 };
        for worker in &self.workers {
            counts[worker.skill_level()] += 1;
        }
        counts
    }

    /// The mean of the given measure over employed Workers of one skill level
    ///
    /// Divides by at least one, so a skill with no one employed averages to 0
    pub fn employed_skill_average<F: Fn(&WorkerAgent) -> f64>(&self, skill: SkillLevel, measure: F) -> f64 {
        let (total, count) = self
            .employed_workers()
            .filter(|worker| worker.skill_level() == skill)
            .fold((0.0, 0_usize), |(total, count), worker| (total + measure(worker), count + 1));
        total / count.max(1) as f64
    }

    pub fn average_wage_by_skill(&self) -> SkillTable<f64> {
        let mut averages = enum_map! { _ => 0.0 };
        for skill in SkillLevel::iter() {
            averages[skill] = self.employed_skill_average(skill, |worker| worker.wage());
        }
        averages
    }

    pub fn employed_workers(&self) -> impl Iterator<Item = &WorkerAgent> {
        self.employed.iter().map(move |id| &self.workers[id.index()])
    }

    pub fn unemployed_workers(&self) -> impl Iterator<Item = &WorkerAgent> {
        self.unemployed.iter().map(move |id| &self.workers[id.index()])
    }
}

/// Accessors
impl Economy {
    pub fn snapshot(&self) -> EconomySnapshot<'_> {
        EconomySnapshot {
            week: self.week,
            price_index: self.price_index,
            workers: &self.workers,
            firms: &self.firms,
        }
    }
    pub fn workers(&self) -> &[WorkerAgent] {
        &self.workers
    }
    pub fn firms(&self) -> &[FirmAgent] {
        &self.firms
    }
    pub fn worker(&self, id: WorkerID) -> Result<&WorkerAgent, SimError> {
        SimError::from_option(
            self.workers.get(id.index()),
            id,
            "Retrieving worker from the population".to_string(),
        )
    }
    pub fn firm(&self, id: FirmID) -> Result<&FirmAgent, SimError> {
        SimError::from_option(
            self.firms.get(id.index()),
            id,
            "Retrieving firm from the population".to_string(),
        )
    }
    pub fn employed(&self) -> &BTreeSet<WorkerID> {
        &self.employed
    }
    pub fn unemployed(&self) -> &BTreeSet<WorkerID> {
        &self.unemployed
    }
    pub fn price_index(&self) -> f64 {
        self.price_index
    }
    pub fn week(&self) -> u32 {
        self.week
    }
    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
