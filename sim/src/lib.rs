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

//! A weekly, agent based model of a labour market
//!
//! Workers look for work, get paid, spend, borrow and go bankrupt, while Firms hire, fire and
//! keep the surplus value their Workers produce. The [`economy::Economy`] owns every agent and
//! advances them one week at a time, and [`statistics::MetricsCollector`] records the
//! aggregate picture after each week.

extern crate log;

pub mod config;
pub mod economy;
pub mod error;
pub mod models;
pub mod statistics;

pub use config::EconomyConfig;
pub use economy::{Economy, EconomySnapshot, UnemploymentStats};
pub use error::SimError;
pub use statistics::MetricsCollector;
