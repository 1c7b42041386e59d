/*
 * Copyright (c):
 * 2025 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of motor-sim.
 *
 * motor-sim is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * motor-sim is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with motor-sim. If not, see <https://www.gnu.org/licenses/>.
 */

use std::result;

pub type Result<T> = result::Result<T, Error>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid configuration `{parameter}` = {value}. {reason}")]
    Configuration {
        parameter: &'static str,
        value: f64,
        reason: &'static str
    },
    #[error("failed to cover {target} m within {steps} steps. Reached {displacement:.3} m after {elapsed:.2} s")]
    NonConvergence {
        steps: usize,
        elapsed: f64,
        displacement: f64,
        target: f64
    }
}

impl Error {
    pub(crate) fn configuration(parameter: &'static str, value: f64, reason: &'static str) -> Error {
        Error::Configuration { parameter, value, reason }
    }

    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Error::Configuration { .. })
    }

    pub fn is_non_convergence(&self) -> bool {
        matches!(self, Error::NonConvergence { .. })
    }
}

pub(crate) fn require_positive(parameter: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::configuration(parameter, value, "value must be finite"));
    }
    if value <= 0.0 {
        return Err(Error::configuration(parameter, value, "value must be greater than zero"));
    }
    Ok(value)
}

pub(crate) fn require_non_negative(parameter: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::configuration(parameter, value, "value must be finite"));
    }
    if value < 0.0 {
        return Err(Error::configuration(parameter, value, "value must not be negative"));
    }
    Ok(value)
}
