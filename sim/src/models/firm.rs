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
use std::fmt::{Display, Formatter};

use enum_map::enum_map;
use log::debug;
use rand::distributions::Distribution;
use rand::prelude::IteratorRandom;
use rand::{Rng, RngCore};
use serde::Serialize;

use crate::config::{
    FIRING_CHANCE, FIRING_LOSS_THRESHOLD, HIRE_CHANCE_NEEDED_SKILL, HIRE_CHANCE_SURPLUS_SKILL,
    HIRE_HEAVY_LOSS_MULTIPLIER, HIRE_HEAVY_LOSS_THRESHOLD, HIRE_PROFITABLE_MULTIPLIER,
    MINIMUM_ROSTER_FOR_FIRING,
};
use crate::error::SimError;
use crate::models::worker::WorkerAgent;
use crate::models::{
    sample_range, sample_skill_table, FirmID, SkillLevel, SkillTable, WorkerID,
    RANDOM_DISTRIBUTION,
};

/// An employer, which turns the labour of its Workers into output and keeps the surplus
#[derive(Debug, Clone, Serialize)]
pub struct FirmAgent {
    id: FirmID,
    pub(crate) capital: f64,
    /// Net profit from the last step, negative for a loss
    pub(crate) profit: f64,
    /// The Workers currently employed here
    workers: BTreeSet<WorkerID>,
    /// The number of Workers of each skill on the roster
    skill_counts: SkillTable<usize>,
    pub(crate) max_workers: usize,
    /// The hourly rate paid per skill level, before adjusting for the Firm's needs
    wage_rates: SkillTable<f64>,
    /// The share of the roster the Firm wants at each skill level, sums to 1
    preferred_skill_mix: SkillTable<f64>,
    tax_rate: f64,
    gross_output: f64,
    total_surplus_value: f64,
    wages_paid: f64,
    taxes_paid: f64,
}

impl FirmAgent {
    /// Generates a Firm with no Workers, and random capital, size, and pay
    pub fn new(id: FirmID, rng: &mut dyn RngCore) -> FirmAgent {
        let capital = sample_range(&(50000.0..=200000.0), rng);
        let max_workers = rng.gen_range(30..=80);
        let preferred_skill_mix =
            normalise(sample_skill_table(|skill| skill.firm_preference_range(), rng));
        let wage_rates = sample_skill_table(|skill| skill.firm_wage_rate_range(), rng);
        let tax_rate = sample_range(&(0.20..=0.35), rng);
        FirmAgent {
            id,
            capital,
            profit: 0.0,
            workers: BTreeSet::new(),
            skill_counts: enum_map! { _ => 0 },
            max_workers,
            wage_rates,
            preferred_skill_mix,
            tax_rate,
            gross_output: 0.0,
            total_surplus_value: 0.0,
            wages_paid: 0.0,
            taxes_paid: 0.0,
        }
    }

    /// Runs a week of production with the current roster
    ///
    /// Every Worker produces their productive value and is paid a fresh wage offer. The
    /// difference is the surplus, which is taxed (only when positive) and added to capital
    pub fn produce(
        &mut self,
        workers: &mut [WorkerAgent],
        rng: &mut dyn RngCore,
    ) -> Result<(), SimError> {
        let mut gross_output = 0.0;
        let mut wages_paid = 0.0;
        for worker_id in &self.workers {
            let worker = workers.get_mut(worker_id.index()).ok_or_else(|| {
                SimError::new_invariant_violation(
                    "roster members exist",
                    format!("{} has {} on its roster, who does not exist", self.id, worker_id),
                )
            })?;
            gross_output += worker.get_productive_value();

            let weekly_offer = self.calculate_worker_wage_offer(worker, rng);
            let payslip = worker
                .work_for_firm(self.id, weekly_offer / worker.work_hours(), self.profit, rng)
                .ok_or_else(|| {
                    SimError::new_invariant_violation(
                        "roster members are employed by the firm",
                        format!("{} is on the roster of {} but works elsewhere", worker_id, self.id),
                    )
                })?;
            wages_paid += payslip.gross;
        }
        self.gross_output = gross_output;
        self.wages_paid = wages_paid;
        self.total_surplus_value = gross_output - wages_paid;
        self.taxes_paid = (self.total_surplus_value * self.tax_rate).max(0.0);
        self.profit = self.total_surplus_value - self.taxes_paid;
        self.capital += self.profit;
        Ok(())
    }

    /// The weekly wage this Firm offers the given Worker
    ///
    /// Skills the Firm is short of are paid a premium, others are discounted. Never below the
    /// Worker's reservation wage
    pub fn calculate_worker_wage_offer(&self, worker: &WorkerAgent, rng: &mut dyn RngCore) -> f64 {
        let skill = worker.skill_level();
        let multiplier = if self.is_below_preferred_mix(skill) {
            sample_range(&(1.1..=1.3), rng)
        } else {
            sample_range(&(0.8..=1.0), rng)
        };
        let weekly_wage = self.wage_rates[skill] * multiplier * worker.work_hours();
        weekly_wage.max(worker.get_reservation_wage())
    }

    /// The chance this Firm takes on a Worker of the given skill this week
    pub fn hire_probability(&self, skill: SkillLevel) -> f64 {
        let mut probability = if self.is_below_preferred_mix(skill) {
            HIRE_CHANCE_NEEDED_SKILL
        } else {
            HIRE_CHANCE_SURPLUS_SKILL
        };
        if self.profit > 0.0 {
            probability *= HIRE_PROFITABLE_MULTIPLIER;
        } else if self.profit < HIRE_HEAVY_LOSS_THRESHOLD {
            probability *= HIRE_HEAVY_LOSS_MULTIPLIER;
        }
        probability
    }

    /// Decides whether to hire the candidate, using one random draw
    ///
    /// Full Firms, and candidates already on the roster, are always turned down
    pub fn should_hire_worker(&self, worker: &WorkerAgent, rng: &mut dyn RngCore) -> bool {
        if !self.has_capacity() || self.workers.contains(&worker.id()) {
            return false;
        }
        RANDOM_DISTRIBUTION.sample(rng) < self.hire_probability(worker.skill_level())
    }

    /// Picks a Worker to let go, if the Firm is losing enough money to consider it
    pub fn choose_worker_to_fire(&self, rng: &mut dyn RngCore) -> Option<WorkerID> {
        if self.profit >= FIRING_LOSS_THRESHOLD || self.workers.len() <= MINIMUM_ROSTER_FOR_FIRING {
            return None;
        }
        if RANDOM_DISTRIBUTION.sample(rng) < FIRING_CHANCE {
            let chosen = self.workers.iter().choose(rng).copied();
            debug!("{} is losing {:.2} and chose to fire {:?}", self.id, self.profit, chosen);
            chosen
        } else {
            None
        }
    }

    /// Only called by the Economy, as part of moving a Worker between the employment partitions
    pub(crate) fn add_worker(&mut self, worker: WorkerID, skill: SkillLevel) -> Result<(), SimError> {
        if !self.has_capacity() {
            return Err(SimError::new_invariant_violation(
                "roster within capacity",
                format!("{} is full ({} workers) and cannot take {}", self.id, self.max_workers, worker),
            ));
        }
        if !self.workers.insert(worker) {
            return Err(SimError::new_invariant_violation(
                "workers appear on a roster once",
                format!("{} is already on the roster of {}", worker, self.id),
            ));
        }
        self.skill_counts[skill] += 1;
        Ok(())
    }

    /// Only called by the Economy, as part of moving a Worker between the employment partitions
    pub(crate) fn remove_worker(
        &mut self,
        worker: WorkerID,
        skill: SkillLevel,
    ) -> Result<(), SimError> {
        if !self.workers.remove(&worker) {
            return Err(SimError::new_invariant_violation(
                "fired workers are on the roster",
                format!("{} is not on the roster of {}", worker, self.id),
            ));
        }
        self.skill_counts[skill] = self.skill_counts[skill].saturating_sub(1);
        Ok(())
    }

    /// The share of the roster at each skill level, all zero for an empty roster
    pub fn get_current_skill_mix(&self) -> SkillTable<f64> {
        let total = self.workers.len();
        let mut mix = enum_map! { _ => 0.0 };
        if total == 0 {
            return mix;
        }
        for (skill, share) in mix.iter_mut() {
            *share = self.skill_counts[skill] as f64 / total as f64;
        }
        mix
    }

    fn is_below_preferred_mix(&self, skill: SkillLevel) -> bool {
        self.get_current_skill_mix()[skill] < self.preferred_skill_mix[skill]
    }

    /// Surplus as a fraction of the value produced in the last step
    pub fn get_exploitation_rate(&self) -> f64 {
        let total_value = self.total_surplus_value + self.wages_paid;
        if total_value > 0.0 {
            self.total_surplus_value / total_value
        } else {
            0.0
        }
    }

    pub fn has_capacity(&self) -> bool {
        self.workers.len() < self.max_workers
    }
    pub fn has_worker(&self, worker: &WorkerID) -> bool {
        self.workers.contains(worker)
    }
    pub fn id(&self) -> FirmID {
        self.id
    }
    pub fn capital(&self) -> f64 {
        self.capital
    }
    pub fn profit(&self) -> f64 {
        self.profit
    }
    pub fn workers(&self) -> &BTreeSet<WorkerID> {
        &self.workers
    }
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }
    pub fn max_workers(&self) -> usize {
        self.max_workers
    }
    pub fn wage_rates(&self) -> &SkillTable<f64> {
        &self.wage_rates
    }
    pub fn preferred_skill_mix(&self) -> &SkillTable<f64> {
        &self.preferred_skill_mix
    }
    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }
    pub fn gross_output(&self) -> f64 {
        self.gross_output
    }
    pub fn total_surplus_value(&self) -> f64 {
        self.total_surplus_value
    }
    pub fn wages_paid(&self) -> f64 {
        self.wages_paid
    }
    pub fn taxes_paid(&self) -> f64 {
        self.taxes_paid
    }
}

fn normalise(mut table: SkillTable<f64>) -> SkillTable<f64> {
    let total: f64 = table.values().sum();
    if total > 0.0 {
        for value in table.values_mut() {
            *value /= total;
        }
    }
    table
}

impl Display for FirmAgent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, Workers: {}/{}, Capital: {:.2}, Profit: {:.2}",
            self.id,
            self.workers.len(),
            self.max_workers,
            self.capital,
            self.profit
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use strum::IntoEnumIterator;

    use crate::models::firm::FirmAgent;
    use crate::models::worker::{test_worker, WorkerAgent};
    use crate::models::{FirmID, SkillLevel, WorkerID};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    /// A Firm with the given Workers already on its roster
    fn staffed_firm(workers: &mut Vec<WorkerAgent>, count: usize) -> FirmAgent {
        let mut rng = rng();
        let firm_id = FirmID::new(0, count);
        let mut firm = FirmAgent::new(firm_id, &mut rng);
        firm.max_workers = firm.max_workers.max(count);
        for index in 0..count {
            let mut worker = test_worker(index, SkillLevel::Low, 0.0, 0.0);
            worker.join_firm(firm_id);
            firm.add_worker(worker.id(), worker.skill_level()).unwrap();
            workers.push(worker);
        }
        firm
    }

    #[test]
    fn new_firms_are_empty_with_normalised_preferences() {
        let mut rng = rng();
        for index in 0..50 {
            let firm = FirmAgent::new(FirmID::new(index, 100), &mut rng);
            assert_eq!(firm.worker_count(), 0);
            assert!((30..=80).contains(&firm.max_workers()));
            let total: f64 = firm.preferred_skill_mix().values().sum();
            assert!((total - 1.0).abs() < 1e-9);
            assert!((0.20..=0.35).contains(&firm.tax_rate()));
        }
    }

    #[test]
    fn production_pays_roster_and_books_surplus() {
        let mut workers = Vec::new();
        let mut firm = staffed_firm(&mut workers, 4);
        firm.produce(&mut workers, &mut rng()).unwrap();

        let wages: f64 = workers.iter().map(|w| w.wage()).sum();
        assert!((firm.wages_paid() - wages).abs() < 1e-9);
        assert!((firm.gross_output() - 4.0 * 40.0 * 25.0).abs() < 1e-9);
        assert!((firm.total_surplus_value() - (firm.gross_output() - wages)).abs() < 1e-9);
        assert!(firm.taxes_paid() >= 0.0);
        assert!((firm.profit() - (firm.total_surplus_value() - firm.taxes_paid())).abs() < 1e-9);
        for worker in &workers {
            assert!(worker.wage() >= worker.get_reservation_wage() - 1e-9);
            assert!(worker.wealth() > 0.0);
        }
    }

    #[test]
    fn losses_are_not_taxed() {
        let mut workers = Vec::new();
        let mut firm = staffed_firm(&mut workers, 3);
        for rate in firm.wage_rates.values_mut() {
            *rate = 100.0;
        }
        let capital = firm.capital();
        firm.produce(&mut workers, &mut rng()).unwrap();
        assert!(firm.total_surplus_value() < 0.0);
        assert_eq!(firm.taxes_paid(), 0.0);
        assert_eq!(firm.profit(), firm.total_surplus_value());
        assert!((firm.capital() - (capital + firm.profit())).abs() < 1e-6);
        assert!(firm.get_exploitation_rate() < 0.0);
    }

    #[test]
    fn producing_with_a_stranger_on_the_roster_is_fatal() {
        let mut workers = Vec::new();
        let mut firm = staffed_firm(&mut workers, 2);
        workers[1].lose_job();
        assert!(firm.produce(&mut workers, &mut rng()).is_err());
    }

    #[test]
    fn wage_offers_meet_the_reservation_wage() {
        let mut rng = rng();
        let mut firm = FirmAgent::new(FirmID::new(0, 10), &mut rng);
        for rate in firm.wage_rates.values_mut() {
            *rate = 1.0;
        }
        for skill in SkillLevel::iter() {
            let worker = test_worker(0, skill, 0.0, 0.0);
            let offer = firm.calculate_worker_wage_offer(&worker, &mut rng);
            assert_eq!(offer, worker.get_reservation_wage());
        }
    }

    #[test]
    fn needed_skills_get_a_premium() {
        let mut rng = rng();
        let firm = FirmAgent::new(FirmID::new(0, 10), &mut rng);
        let worker = test_worker(0, SkillLevel::High, 0.0, 0.0);
        let base = firm.wage_rates()[SkillLevel::High] * 40.0;
        for _ in 0..20 {
            let offer = firm.calculate_worker_wage_offer(&worker, &mut rng);
            assert!(offer >= (base * 1.1).max(worker.get_reservation_wage()) - 1e-9);
            assert!(offer <= (base * 1.3).max(worker.get_reservation_wage()) + 1e-9);
        }
    }

    #[test]
    fn hire_probability_tracks_profit() {
        let mut rng = rng();
        let mut firm = FirmAgent::new(FirmID::new(0, 10), &mut rng);
        assert!((firm.hire_probability(SkillLevel::Low) - 0.8).abs() < 1e-12);
        firm.profit = 10.0;
        assert!((firm.hire_probability(SkillLevel::Low) - 1.2).abs() < 1e-12);
        firm.profit = -5000.0;
        assert!((firm.hire_probability(SkillLevel::Low) - 0.24).abs() < 1e-12);
        firm.profit = -600.0;
        assert!((firm.hire_probability(SkillLevel::Low) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn full_firms_never_hire() {
        let mut workers = Vec::new();
        let mut firm = staffed_firm(&mut workers, 3);
        firm.max_workers = 3;
        firm.profit = 1000.0;
        let candidate = test_worker(3, SkillLevel::Low, 0.0, 0.0);
        let mut rng = rng();
        for _ in 0..100 {
            assert!(!firm.should_hire_worker(&candidate, &mut rng));
        }
        assert!(firm.add_worker(WorkerID::new(3), SkillLevel::Low).is_err());
    }

    #[test]
    fn losing_firms_shrink_but_not_below_the_floor() {
        let mut workers = Vec::new();
        let mut firm = staffed_firm(&mut workers, 6);
        let mut rng = rng();
        let mut sizes = Vec::new();
        for _ in 0..200 {
            firm.profit = -600.0;
            if let Some(worker_id) = firm.choose_worker_to_fire(&mut rng) {
                let skill = workers[worker_id.index()].skill_level();
                firm.remove_worker(worker_id, skill).unwrap();
            }
            sizes.push(firm.worker_count());
        }
        assert!(sizes.iter().all(|size| *size >= 5));
        assert_eq!(firm.worker_count(), 5);
    }

    #[test]
    fn profitable_firms_never_fire() {
        let mut workers = Vec::new();
        let mut firm = staffed_firm(&mut workers, 10);
        firm.profit = -499.0;
        let mut rng = rng();
        for _ in 0..100 {
            assert_eq!(firm.choose_worker_to_fire(&mut rng), None);
        }
    }

    #[test]
    fn skill_mix_follows_the_roster() {
        let mut workers = Vec::new();
        let mut firm = staffed_firm(&mut workers, 3);
        firm.add_worker(WorkerID::new(3), SkillLevel::High).unwrap();
        let mix = firm.get_current_skill_mix();
        assert!((mix[SkillLevel::Low] - 0.75).abs() < 1e-12);
        assert!((mix[SkillLevel::High] - 0.25).abs() < 1e-12);
        assert_eq!(mix[SkillLevel::Medium], 0.0);
        firm.remove_worker(WorkerID::new(3), SkillLevel::High).unwrap();
        assert!(firm.remove_worker(WorkerID::new(3), SkillLevel::High).is_err());
        assert_eq!(firm.get_current_skill_mix()[SkillLevel::Low], 1.0);
    }
}
