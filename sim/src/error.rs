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

pub enum SimError {
    InitializationError {
        message: String,
    },
    /// The employment partition, a firm roster, or a worker balance is in a state that no valid
    /// sequence of hires and fires can produce
    InvariantViolation {
        invariant: String,
        context: String,
    },
    OptionRetrievalFailure {
        message: String,
        key: String,
    },
}

impl SimError {
    pub fn new_invariant_violation<T: Display>(invariant: T, context: String) -> SimError {
        SimError::InvariantViolation {
            invariant: invariant.to_string(),
            context,
        }
    }

    pub fn from_option<T: Display, U>(
        value: Option<U>,
        key: T,
        message: String,
    ) -> Result<U, SimError> {
        if let Some(value) = value {
            Ok(value)
        } else {
            Err(SimError::OptionRetrievalFailure {
                message,
                key: key.to_string(),
            })
        }
    }
}

impl Debug for SimError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::InitializationError { message } => {
                write!(f, "Failed to initialise the economy: {}", message)
            }
            SimError::InvariantViolation { invariant, context } => {
                write!(
                    f,
                    "Invariant '{}' was violated, the simulation state is corrupt: {}",
                    invariant, context
                )
            }
            SimError::OptionRetrievalFailure { message, key } => {
                write!(
                    f,
                    "Failed to retrieve value with key ({}), context: {}",
                    key, message
                )
            }
        }
    }
}

impl Display for SimError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error: {:?}", self)
    }
}

impl std::error::Error for SimError {}
