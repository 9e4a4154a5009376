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

use log::{debug, info};
use rand::distributions::Distribution;
use rand::RngCore;
use serde::Serialize;

use crate::config::{
    BASE_VALUE_PER_HOUR, BASE_WEEKLY_NEEDS, DEBT_DESPERATION_FLOOR, DEBT_DESPERATION_WEIGHT,
    DESPERATION_FLOOR, DESPERATION_GRACE_WEEKS, DESPERATION_RATE_PER_WEEK, INVESTMENT_CHANCE,
    INVESTMENT_WEALTH_THRESHOLD, MINIMUM_DEBT_PAYMENT, MINIMUM_DEBT_PAYMENT_RATE,
    STRESS_DEBT_WEIGHT, STRESS_UNEMPLOYMENT, STRESS_UNMET_NEEDS_WEIGHT, WEEKS_PER_YEAR,
    WORK_HOURS,
};
use crate::models::{sample_range, FirmID, SkillLevel, WorkerID, RANDOM_DISTRIBUTION};

/// The breakdown of a single week's pay
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Payslip {
    pub gross: f64,
    pub taxes: f64,
    pub net: f64,
    /// Paid on top of wages to Workers who own part of a profitable employer
    pub dividend: f64,
}

/// This is used to represent a single Worker in the labour market
#[derive(Debug, Clone, Serialize)]
pub struct WorkerAgent {
    /// A unique identifier for this Worker
    id: WorkerID,
    skill_level: SkillLevel,
    pub(crate) wealth: f64,
    pub(crate) debt: f64,
    is_employed: bool,
    employer: Option<FirmID>,
    /// Weekly gross wage, zero while unemployed
    wage: f64,
    weeks_unemployed: u32,
    work_hours: f64,
    pub(crate) productivity: f64,
    /// Debt beyond which a Worker with sustained unmet needs is declared bankrupt
    pub(crate) debt_capacity: f64,
    /// Annual interest charged on debt
    pub(crate) interest_rate: f64,
    /// Weekly cost of living
    pub(crate) basic_needs: f64,
    is_bankrupt: bool,
    pub(crate) owns_firm: bool,
    /// The stress level computed at the start of the last step
    financial_stress: f64,
    /// Running total of the needs savings could not pay for, reset in any week where savings
    /// pay the full cost of needs
    sustained_unmet_needs: f64,
    total_wages_earned: f64,
    total_taxes_paid: f64,
}

impl WorkerAgent {
    /// Generates a new unemployed Worker with a random skill level and finances
    pub fn new(id: WorkerID, rng: &mut dyn RngCore) -> WorkerAgent {
        let skill_level = SkillLevel::random(rng);
        let initial_wealth = sample_range(&skill_level.initial_wealth_range(), rng);
        // Negative starting wealth is held as debt instead
        let (wealth, debt) = if initial_wealth < 0.0 {
            (0.0, -initial_wealth)
        } else {
            (initial_wealth, 0.0)
        };
        let debt_capacity = rng_uniform(5000.0, 15000.0, rng);
        let interest_rate = rng_uniform(0.10, 0.26, rng);
        let productivity = sample_range(&skill_level.productivity_range(), rng);
        let owns_firm = RANDOM_DISTRIBUTION.sample(rng) < skill_level.firm_ownership_chance();
        WorkerAgent {
            id,
            skill_level,
            wealth,
            debt,
            is_employed: false,
            employer: None,
            wage: 0.0,
            weeks_unemployed: 0,
            work_hours: WORK_HOURS,
            productivity,
            debt_capacity,
            interest_rate,
            basic_needs: BASE_WEEKLY_NEEDS * skill_level.needs_multiplier(),
            is_bankrupt: false,
            owns_firm,
            financial_stress: 0.0,
            sustained_unmet_needs: 0.0,
            total_wages_earned: 0.0,
            total_taxes_paid: 0.0,
        }
    }

    /// Executes one week of the Worker's finances
    ///
    /// Pays for basic needs, services debt, and applies wealth decay or investment growth.
    /// Never changes who the Worker is employed by
    pub fn step(&mut self, rng: &mut dyn RngCore) {
        self.financial_stress = self.calculate_financial_stress();

        let needs_cost = self.basic_needs;
        // The part of this week's needs that savings could not pay for
        let shortfall = if self.wealth >= needs_cost {
            self.wealth -= needs_cost;
            0.0
        } else if !self.is_employed {
            // Borrow to survive
            let borrowed = needs_cost - self.wealth;
            self.debt += borrowed;
            self.wealth = 0.0;
            borrowed
        } else {
            needs_cost
        };
        if !self.is_employed {
            self.weeks_unemployed += 1;
        }

        if shortfall > 0.0 {
            self.sustained_unmet_needs += shortfall;
        } else {
            self.sustained_unmet_needs = 0.0;
        }

        self.handle_debt_mechanics();

        if !self.is_employed && self.wealth > 0.0 {
            self.wealth *= 1.0 - self.skill_level.unemployed_wealth_decay();
        }

        // Investment returns
        if self.skill_level == SkillLevel::High
            && self.wealth > INVESTMENT_WEALTH_THRESHOLD
            && RANDOM_DISTRIBUTION.sample(rng) < INVESTMENT_CHANCE
        {
            self.wealth *= rng_uniform(1.001, 1.003, rng);
        }
    }

    /// Charges a week of interest, takes the minimum payment if it can be afforded, and
    /// checks for bankruptcy
    fn handle_debt_mechanics(&mut self) {
        if self.debt <= 0.0 {
            return;
        }
        self.debt += self.debt * (self.interest_rate / WEEKS_PER_YEAR);

        let minimum_payment = self.minimum_debt_payment();
        if self.wealth >= minimum_payment {
            let payment = minimum_payment.min(self.debt);
            self.wealth -= payment;
            self.debt -= payment;
        }

        if self.debt > self.debt_capacity && self.sustained_unmet_needs > self.basic_needs * 2.0 {
            if !self.is_bankrupt {
                info!(
                    "{} is bankrupt with debt {:.2} against a capacity of {:.2}",
                    self.id, self.debt, self.debt_capacity
                );
            }
            self.is_bankrupt = true;
            self.debt = self.debt_capacity;
        }
    }

    /// Accepts a week of work from the given Firm and receives the pay for it
    ///
    /// Returns `None` without changing anything if the Worker is not on that Firm's roster, so
    /// a Worker only ever works for the first Firm that hired them
    pub fn work_for_firm(
        &mut self,
        firm: FirmID,
        hourly_wage: f64,
        firm_profit: f64,
        rng: &mut dyn RngCore,
    ) -> Option<Payslip> {
        if self.employer != Some(firm) {
            debug!("{} ignored work from {}, as they are not employed there", self.id, firm);
            return None;
        }
        self.wage = hourly_wage.max(0.0) * self.work_hours;

        let gross = self.wage;
        let taxes = gross * sample_range(&self.skill_level.income_tax_range(), rng);
        let net = gross - taxes;
        self.wealth += net;
        self.total_wages_earned += gross;
        self.total_taxes_paid += taxes;

        let dividend = if self.owns_firm && firm_profit > 0.0 {
            firm_profit * rng_uniform(0.01, 0.05, rng)
        } else {
            0.0
        };
        self.wealth += dividend;
        Some(Payslip {
            gross,
            taxes,
            net,
            dividend,
        })
    }

    /// Only called by the Economy, as part of moving a Worker between the employment partitions
    pub(crate) fn join_firm(&mut self, firm: FirmID) {
        self.is_employed = true;
        self.employer = Some(firm);
        self.weeks_unemployed = 0;
    }

    /// Only called by the Economy, as part of moving a Worker between the employment partitions
    pub(crate) fn lose_job(&mut self) {
        self.is_employed = false;
        self.employer = None;
        self.wage = 0.0;
    }

    /// The lowest weekly wage this Worker will accept
    ///
    /// Long unemployment and heavy debt each lower it, down to their own floor
    pub fn get_reservation_wage(&self) -> f64 {
        let mut reservation_hourly = self.skill_level.base_reservation_hourly();
        if !self.is_employed && self.weeks_unemployed > DESPERATION_GRACE_WEEKS {
            let desperation = (1.0 - self.weeks_unemployed as f64 * DESPERATION_RATE_PER_WEEK)
                .max(DESPERATION_FLOOR);
            reservation_hourly *= desperation;
        }
        if self.debt > 0.0 && self.debt_capacity > 0.0 {
            let debt_desperation = (1.0 - self.debt / self.debt_capacity * DEBT_DESPERATION_WEIGHT)
                .max(DEBT_DESPERATION_FLOOR);
            reservation_hourly *= debt_desperation;
        }
        reservation_hourly * self.work_hours
    }

    /// The part of this week's needs that current wealth can't cover
    pub fn get_unmet_needs(&self) -> f64 {
        self.basic_needs - self.wealth.min(self.basic_needs).max(0.0)
    }

    /// A 0-1 composite of unemployment, debt and unmet needs
    pub fn calculate_financial_stress(&self) -> f64 {
        let mut stress = 0.0;
        if !self.is_employed {
            stress += STRESS_UNEMPLOYMENT;
        }
        if self.debt > 0.0 && self.debt_capacity > 0.0 {
            stress += self.debt / self.debt_capacity * STRESS_DEBT_WEIGHT;
        }
        if self.basic_needs > 0.0 {
            stress += (self.get_unmet_needs() / self.basic_needs).min(1.0) * STRESS_UNMET_NEEDS_WEIGHT;
        }
        stress.min(1.0)
    }

    /// The value of one week of this Worker's labour
    pub fn get_productive_value(&self) -> f64 {
        self.work_hours * self.productivity * BASE_VALUE_PER_HOUR
    }

    /// The fraction of the value this Worker produces that is not paid back as wages
    pub fn get_exploitation_rate(&self) -> f64 {
        if self.wage == 0.0 {
            return 0.0;
        }
        let value_produced = self.get_productive_value();
        if value_produced > 0.0 {
            1.0 - self.wage / value_produced
        } else {
            0.0
        }
    }

    /// Debt over annualised wage
    ///
    /// `None` if the Worker has debt but no wage, as the ratio is unbounded
    pub fn get_debt_to_income_ratio(&self) -> Option<f64> {
        let annual_income = self.wage * WEEKS_PER_YEAR;
        if annual_income > 0.0 {
            Some(self.debt / annual_income)
        } else if self.debt > 0.0 {
            None
        } else {
            Some(0.0)
        }
    }

    pub fn get_real_wage(&self, price_index: f64) -> f64 {
        if price_index > 0.0 {
            self.wage / price_index
        } else {
            self.wage
        }
    }

    /// The payment due on the current debt, zero when debt free
    pub fn minimum_debt_payment(&self) -> f64 {
        if self.debt > 0.0 {
            (self.debt * MINIMUM_DEBT_PAYMENT_RATE).max(MINIMUM_DEBT_PAYMENT)
        } else {
            0.0
        }
    }

    pub fn id(&self) -> WorkerID {
        self.id
    }
    pub fn skill_level(&self) -> SkillLevel {
        self.skill_level
    }
    pub fn wealth(&self) -> f64 {
        self.wealth
    }
    pub fn debt(&self) -> f64 {
        self.debt
    }
    pub fn is_employed(&self) -> bool {
        self.is_employed
    }
    pub fn employer(&self) -> Option<FirmID> {
        self.employer
    }
    pub fn wage(&self) -> f64 {
        self.wage
    }
    pub fn weeks_unemployed(&self) -> u32 {
        self.weeks_unemployed
    }
    pub fn work_hours(&self) -> f64 {
        self.work_hours
    }
    pub fn productivity(&self) -> f64 {
        self.productivity
    }
    pub fn debt_capacity(&self) -> f64 {
        self.debt_capacity
    }
    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }
    pub fn basic_needs(&self) -> f64 {
        self.basic_needs
    }
    pub fn is_bankrupt(&self) -> bool {
        self.is_bankrupt
    }
    pub fn owns_firm(&self) -> bool {
        self.owns_firm
    }
    pub fn financial_stress(&self) -> f64 {
        self.financial_stress
    }
    pub fn total_wages_earned(&self) -> f64 {
        self.total_wages_earned
    }
    pub fn total_taxes_paid(&self) -> f64 {
        self.total_taxes_paid
    }
}

fn rng_uniform(low: f64, high: f64, rng: &mut dyn RngCore) -> f64 {
    sample_range(&(low..=high), rng)
}

impl Display for WorkerAgent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let employment = match self.employer {
            Some(firm) => format!("Works at {}", firm),
            None => format!("Unemployed for {} weeks", self.weeks_unemployed),
        };
        write!(
            f,
            "{} ({} skill), Wealth: {:.2}, Debt: {:.2}, Wage: {:.2}, {}",
            self.id, self.skill_level, self.wealth, self.debt, self.wage, employment
        )
    }
}

/// Builds Workers with fixed finances, for exercising the weekly rules deterministically
#[cfg(test)]
pub(crate) fn test_worker(id: usize, skill_level: SkillLevel, wealth: f64, debt: f64) -> WorkerAgent {
    WorkerAgent {
        id: WorkerID::new(id),
        skill_level,
        wealth,
        debt,
        is_employed: false,
        employer: None,
        wage: 0.0,
        weeks_unemployed: 0,
        work_hours: WORK_HOURS,
        productivity: 1.0,
        debt_capacity: 10000.0,
        interest_rate: 0.0,
        basic_needs: 500.0,
        is_bankrupt: false,
        owns_firm: false,
        financial_stress: 0.0,
        sustained_unmet_needs: 0.0,
        total_wages_earned: 0.0,
        total_taxes_paid: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::models::worker::{test_worker, WorkerAgent};
    use crate::models::{FirmID, SkillLevel, WorkerID};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn new_workers_start_unemployed_and_solvent() {
        let mut rng = rng();
        for id in 0..500 {
            let worker = WorkerAgent::new(WorkerID::new(id), &mut rng);
            assert!(!worker.is_employed());
            assert_eq!(worker.employer(), None);
            assert_eq!(worker.wage(), 0.0);
            assert!(worker.wealth() >= 0.0);
            assert!(worker.debt() >= 0.0);
            assert!(worker.wealth() == 0.0 || worker.debt() == 0.0);
            assert!(worker.skill_level().productivity_range().contains(&worker.productivity()));
            assert!((5000.0..=15000.0).contains(&worker.debt_capacity()));
            assert!((0.10..=0.26).contains(&worker.interest_rate()));
        }
    }

    #[test]
    fn unemployed_shortfall_becomes_debt() {
        let mut worker = test_worker(0, SkillLevel::Low, 0.0, 0.0);
        worker.step(&mut rng());
        assert_eq!(worker.debt(), 500.0);
        assert_eq!(worker.wealth(), 0.0);
        assert_eq!(worker.weeks_unemployed(), 1);
    }

    #[test]
    fn interest_accrues_when_no_payment_is_possible() {
        let mut worker = test_worker(0, SkillLevel::Low, 0.0, 1000.0);
        worker.debt_capacity = 1200.0;
        worker.interest_rate = 0.26;
        worker.join_firm(FirmID::new(0, 1));
        worker.step(&mut rng());
        assert!((worker.debt() - 1000.0 * (1.0 + 0.26 / 52.0)).abs() < 1e-9);
        assert_eq!(worker.wealth(), 0.0);
        assert!(!worker.is_bankrupt());
    }

    #[test]
    fn employed_workers_do_not_borrow_for_needs() {
        let mut worker = test_worker(0, SkillLevel::Medium, 100.0, 0.0);
        worker.join_firm(FirmID::new(0, 1));
        worker.step(&mut rng());
        assert_eq!(worker.debt(), 0.0);
        assert_eq!(worker.wealth(), 100.0);
    }

    #[test]
    fn minimum_payment_reduces_wealth_and_debt() {
        let mut worker = test_worker(0, SkillLevel::Medium, 5000.0, 2000.0);
        worker.join_firm(FirmID::new(0, 1));
        worker.step(&mut rng());
        // 500 of needs, then 2% of 2000 towards the debt
        assert!((worker.wealth() - 4460.0).abs() < 1e-9);
        assert!((worker.debt() - 1960.0).abs() < 1e-9);
    }

    #[test]
    fn small_debts_pay_the_flat_minimum() {
        let worker = test_worker(0, SkillLevel::Low, 0.0, 100.0);
        assert_eq!(worker.minimum_debt_payment(), 20.0);
        let worker = test_worker(0, SkillLevel::Low, 0.0, 0.0);
        assert_eq!(worker.minimum_debt_payment(), 0.0);
    }

    #[test]
    fn sustained_shortfall_over_capacity_is_bankruptcy() {
        let mut worker = test_worker(0, SkillLevel::Low, 0.0, 900.0);
        worker.debt_capacity = 1000.0;
        let mut rng = rng();
        for _ in 0..4 {
            worker.step(&mut rng);
        }
        assert!(worker.is_bankrupt());
        assert!(worker.debt() <= worker.debt_capacity() + 500.0);
        // Bankruptcy is never undone
        worker.wealth = 1_000_000.0;
        worker.step(&mut rng);
        assert!(worker.is_bankrupt());
    }

    #[test]
    fn paying_needs_every_week_is_never_bankruptcy() {
        let mut worker = test_worker(0, SkillLevel::Low, 600.0, 11_000.0);
        worker.join_firm(FirmID::new(0, 1));
        let mut rng = rng();
        for _ in 0..10 {
            worker.step(&mut rng);
            assert_eq!(worker.sustained_unmet_needs, 0.0);
            assert!(!worker.is_bankrupt());
            // Paid just enough to cover next week
            worker.wealth += 500.0;
        }
        assert!(worker.debt() > worker.debt_capacity());
    }

    #[test]
    fn unpaid_needs_accumulate_until_a_week_is_covered() {
        let mut worker = test_worker(0, SkillLevel::Low, 0.0, 0.0);
        worker.join_firm(FirmID::new(0, 1));
        let mut rng = rng();
        worker.step(&mut rng);
        worker.step(&mut rng);
        assert_eq!(worker.sustained_unmet_needs, 1000.0);
        worker.wealth = 500.0;
        worker.step(&mut rng);
        assert_eq!(worker.sustained_unmet_needs, 0.0);
    }

    #[test]
    fn unemployed_savings_decay_by_skill() {
        let mut low = test_worker(0, SkillLevel::Low, 1500.0, 0.0);
        let mut high = test_worker(1, SkillLevel::High, 1500.0, 0.0);
        let mut rng = rng();
        low.step(&mut rng);
        high.step(&mut rng);
        assert!((low.wealth() - 1000.0 * 0.95).abs() < 1e-9);
        assert!((high.wealth() - 1000.0 * 0.98).abs() < 1e-9);
    }

    #[test]
    fn high_skill_investments_only_grow() {
        let mut worker = test_worker(0, SkillLevel::High, 50_000.0, 0.0);
        worker.join_firm(FirmID::new(0, 1));
        let mut rng = rng();
        let mut previous = worker.wealth();
        for _ in 0..50 {
            worker.step(&mut rng);
            let after_needs = previous - 500.0;
            assert!(worker.wealth() >= after_needs - 1e-9);
            assert!(worker.wealth() <= after_needs * 1.003 + 1e-9);
            previous = worker.wealth();
        }
    }

    #[test]
    fn reservation_wage_floors_hold() {
        let mut worker = test_worker(0, SkillLevel::High, 0.0, 0.0);
        assert_eq!(worker.get_reservation_wage(), 20.0 * 40.0);

        worker.weeks_unemployed = 4;
        assert_eq!(worker.get_reservation_wage(), 20.0 * 40.0);
        worker.weeks_unemployed = 5;
        assert!((worker.get_reservation_wage() - 20.0 * 40.0 * 0.75).abs() < 1e-9);
        worker.weeks_unemployed = 100;
        assert!((worker.get_reservation_wage() - 20.0 * 40.0 * 0.7).abs() < 1e-9);

        worker.debt = worker.debt_capacity * 10.0;
        assert!((worker.get_reservation_wage() - 20.0 * 40.0 * 0.7 * 0.6).abs() < 1e-9);
    }

    #[test]
    fn financial_stress_is_bounded() {
        let mut worker = test_worker(0, SkillLevel::Low, 0.0, 0.0);
        assert!((worker.calculate_financial_stress() - 0.7).abs() < 1e-12);
        worker.debt = worker.debt_capacity * 5.0;
        assert_eq!(worker.calculate_financial_stress(), 1.0);

        let mut comfortable = test_worker(1, SkillLevel::Low, 10_000.0, 0.0);
        comfortable.join_firm(FirmID::new(0, 2));
        assert_eq!(comfortable.calculate_financial_stress(), 0.0);
    }

    #[test]
    fn unmet_needs_are_never_negative() {
        let worker = test_worker(0, SkillLevel::Low, 200.0, 0.0);
        assert_eq!(worker.get_unmet_needs(), 300.0);
        let worker = test_worker(0, SkillLevel::Low, 2000.0, 0.0);
        assert_eq!(worker.get_unmet_needs(), 0.0);
    }

    #[test]
    fn only_the_employer_can_pay() {
        let mut rng = rng();
        let employer = FirmID::new(0, 1);
        let rival = FirmID::new(1, 1);
        let mut worker = test_worker(0, SkillLevel::Medium, 0.0, 0.0);
        assert!(worker.work_for_firm(employer, 15.0, 0.0, &mut rng).is_none());

        worker.join_firm(employer);
        let payslip = worker.work_for_firm(employer, 15.0, 0.0, &mut rng).unwrap();
        assert_eq!(payslip.gross, 600.0);
        assert!(payslip.taxes >= 600.0 * 0.12 && payslip.taxes <= 600.0 * 0.20);
        assert!((worker.wealth() - payslip.net).abs() < 1e-9);
        assert_eq!(worker.wage(), 600.0);

        let wealth = worker.wealth();
        assert!(worker.work_for_firm(rival, 50.0, 0.0, &mut rng).is_none());
        assert_eq!(worker.wealth(), wealth);
        assert_eq!(worker.employer(), Some(employer));
    }

    #[test]
    fn owners_receive_dividends_from_profitable_employers() {
        let mut rng = rng();
        let employer = FirmID::new(0, 1);
        let mut worker = test_worker(0, SkillLevel::High, 0.0, 0.0);
        worker.owns_firm = true;
        worker.join_firm(employer);
        let payslip = worker.work_for_firm(employer, 30.0, 10_000.0, &mut rng).unwrap();
        assert!(payslip.dividend >= 100.0 && payslip.dividend <= 500.0);

        let payslip = worker.work_for_firm(employer, 30.0, -10_000.0, &mut rng).unwrap();
        assert_eq!(payslip.dividend, 0.0);
    }

    #[test]
    fn debt_to_income_is_undefined_without_wage() {
        let mut rng = rng();
        let employer = FirmID::new(0, 1);
        let mut worker = test_worker(0, SkillLevel::Low, 0.0, 520.0);
        assert_eq!(worker.get_debt_to_income_ratio(), None);
        worker.join_firm(employer);
        worker.work_for_firm(employer, 10.0, 0.0, &mut rng);
        assert!((worker.get_debt_to_income_ratio().unwrap() - 520.0 / (400.0 * 52.0)).abs() < 1e-12);
        let debt_free = test_worker(1, SkillLevel::Low, 0.0, 0.0);
        assert_eq!(debt_free.get_debt_to_income_ratio(), Some(0.0));
    }

    #[test]
    fn losing_a_job_clears_the_wage() {
        let mut rng = rng();
        let employer = FirmID::new(0, 1);
        let mut worker = test_worker(0, SkillLevel::Low, 0.0, 0.0);
        worker.join_firm(employer);
        worker.work_for_firm(employer, 10.0, 0.0, &mut rng);
        worker.lose_job();
        assert_eq!(worker.wage(), 0.0);
        assert_eq!(worker.employer(), None);
        assert!(!worker.is_employed());
        assert_eq!(worker.get_exploitation_rate(), 0.0);
    }
}
