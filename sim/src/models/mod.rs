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
use std::ops::RangeInclusive;

use enum_map::{enum_map, Enum, EnumMap};
use lazy_static::lazy_static;
use rand::distributions::{Distribution, Uniform};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString};

pub mod firm;
pub mod worker;

lazy_static! {
    /// This is a random uniform distribution, for fast random generation
    pub(crate) static ref RANDOM_DISTRIBUTION: Uniform<f64> = Uniform::new(0.0, 1.0);
}

/// Draws a value uniformly from the inclusive range
pub(crate) fn sample_range(range: &RangeInclusive<f64>, rng: &mut dyn RngCore) -> f64 {
    rng.gen_range(*range.start()..=*range.end())
}

#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Copy, Clone, Serialize, Deserialize)]
pub struct WorkerID {
    id: usize,
}

impl WorkerID {
    pub(crate) fn new(id: usize) -> WorkerID {
        WorkerID { id }
    }
    pub fn id(&self) -> usize {
        self.id
    }
    /// Workers occupy the start of the id range, so the id is also the position in the population
    pub(crate) fn index(&self) -> usize {
        self.id
    }
}

impl Display for WorkerID {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Worker ID: {}", self.id)
    }
}

/// Firms are numbered after the Workers, so the two id ranges never overlap
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Copy, Clone, Serialize, Deserialize)]
pub struct FirmID {
    id: usize,
    index: usize,
}

impl FirmID {
    pub(crate) fn new(index: usize, worker_count: usize) -> FirmID {
        FirmID {
            id: worker_count + index,
            index,
        }
    }
    pub fn id(&self) -> usize {
        self.id
    }
    pub(crate) fn index(&self) -> usize {
        self.index
    }
}

impl Display for FirmID {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Firm ID: {}", self.id)
    }
}

/// The skill level of a Worker, fixed for their lifetime
#[derive(
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Copy,
    Clone,
    Enum,
    EnumIter,
    EnumString,
    strum_macros::Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SkillLevel {
    Low,
    Medium,
    High,
}

impl SkillLevel {
    /// Draws a skill level from the population distribution
    ///
    /// 65% Low, 20% Medium, 15% High
    pub fn random(rng: &mut dyn RngCore) -> SkillLevel {
        let roll = RANDOM_DISTRIBUTION.sample(rng);
        if roll < 0.65 {
            SkillLevel::Low
        } else if roll < 0.85 {
            SkillLevel::Medium
        } else {
            SkillLevel::High
        }
    }

    /// Starting savings
    pub fn initial_wealth_range(&self) -> RangeInclusive<f64> {
        match self {
            SkillLevel::High => 5000.0..=25000.0,
            SkillLevel::Medium => 1500.0..=8000.0,
            SkillLevel::Low => 0.0..=2000.0,
        }
    }

    /// Multiplier on the base value created per hour
    pub fn productivity_range(&self) -> RangeInclusive<f64> {
        match self {
            SkillLevel::High => 1.3..=1.8,
            SkillLevel::Medium => 1.0..=1.4,
            SkillLevel::Low => 0.7..=1.2,
        }
    }

    /// Progressive income tax band, drawn afresh for each pay packet
    pub fn income_tax_range(&self) -> RangeInclusive<f64> {
        match self {
            SkillLevel::High => 0.20..=0.30,
            SkillLevel::Medium => 0.12..=0.20,
            SkillLevel::Low => 0.05..=0.12,
        }
    }

    /// Hourly wage below which a Worker of this skill refuses work
    pub fn base_reservation_hourly(&self) -> f64 {
        match self {
            SkillLevel::High => 20.0,
            SkillLevel::Medium => 12.0,
            SkillLevel::Low => 8.0,
        }
    }

    pub fn needs_multiplier(&self) -> f64 {
        match self {
            SkillLevel::High => 1.3,
            SkillLevel::Medium => 1.0,
            SkillLevel::Low => 0.8,
        }
    }

    /// Weekly fraction of savings lost while unemployed
    pub fn unemployed_wealth_decay(&self) -> f64 {
        match self {
            SkillLevel::High => 0.02,
            SkillLevel::Medium => 0.03,
            SkillLevel::Low => 0.05,
        }
    }

    pub fn firm_ownership_chance(&self) -> f64 {
        match self {
            SkillLevel::High => 0.15,
            SkillLevel::Medium => 0.05,
            SkillLevel::Low => 0.01,
        }
    }

    /// The hourly rate a Firm pays before adjusting for its needs
    pub fn firm_wage_rate_range(&self) -> RangeInclusive<f64> {
        match self {
            SkillLevel::High => 25.0..=45.0,
            SkillLevel::Medium => 15.0..=25.0,
            SkillLevel::Low => 8.0..=18.0,
        }
    }

    /// Un-normalised weight a Firm gives this skill in its preferred workforce
    pub fn firm_preference_range(&self) -> RangeInclusive<f64> {
        match self {
            SkillLevel::High => 0.1..=0.3,
            SkillLevel::Medium => 0.2..=0.4,
            SkillLevel::Low => 0.4..=0.7,
        }
    }
}

/// A table with one value per skill level
pub type SkillTable<T> = EnumMap<SkillLevel, T>;

/// Draws one value per skill level from the given ranges
pub(crate) fn sample_skill_table(
    ranges: impl Fn(SkillLevel) -> RangeInclusive<f64>,
    rng: &mut dyn RngCore,
) -> SkillTable<f64> {
    let mut table = enum_map! { _ => 0.0 };
    for (skill, value) in table.iter_mut() {
        *value = sample_range(&ranges(skill), rng);
    }
    table
}
