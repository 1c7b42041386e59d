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

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use utils::units::rpm_to_rad_s;
use crate::error::{Error, Result, require_non_negative, require_positive};

/// A single row of the motor definition table. Speeds are in RPM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorSpec {
    #[serde(rename = "Motor")]
    pub label: String,
    #[serde(rename = "w3")]
    pub max_speed_rpm: f64,
    #[serde(rename = "w1")]
    pub transition_speed_rpm: f64,
    #[serde(rename = "T_nominal")]
    pub nominal_torque: f64,
    #[serde(rename = "P_nominal")]
    pub nominal_power: f64,
    #[serde(rename = "T_peak")]
    pub peak_torque: f64,
    #[serde(rename = "P_peak")]
    pub peak_power: f64
}

/// Piecewise torque/power model of an electric motor.
///
/// Below (and at) the transition speed the motor delivers its nominal torque and
/// power rises linearly with speed. Above it torque decays as `1/w` so that power
/// holds at `nominal_torque · transition_speed`.
#[derive(Debug, Clone, PartialEq)]
pub struct MotorCurveModel {
    label: String,
    max_speed: f64,
    transition_speed: f64,
    nominal_torque: f64,
    nominal_power: f64,
    peak_torque: f64,
    peak_power: f64
}

impl MotorCurveModel {
    /// - `max_speed`: end of the motor's speed range (rad/s)
    /// - `transition_speed`: end of the constant-torque region (rad/s)
    pub fn new(label: &str,
               max_speed: f64,
               transition_speed: f64,
               nominal_torque: f64,
               nominal_power: f64,
               peak_torque: f64,
               peak_power: f64) -> Result<MotorCurveModel>
    {
        require_positive("max_speed", max_speed)?;
        require_positive("transition_speed", transition_speed)?;
        if transition_speed > max_speed {
            return Err(Error::configuration("transition_speed",
                                            transition_speed,
                                            "transition speed can't exceed the max speed"));
        }
        require_non_negative("nominal_torque", nominal_torque)?;
        require_non_negative("nominal_power", nominal_power)?;
        require_non_negative("peak_torque", peak_torque)?;
        require_non_negative("peak_power", peak_power)?;
        Ok(MotorCurveModel {
            label: label.to_string(),
            max_speed,
            transition_speed,
            nominal_torque,
            nominal_power,
            peak_torque,
            peak_power
        })
    }

    pub fn from_spec(spec: &MotorSpec) -> Result<MotorCurveModel> {
        MotorCurveModel::new(&spec.label,
                             rpm_to_rad_s(spec.max_speed_rpm),
                             rpm_to_rad_s(spec.transition_speed_rpm),
                             spec.nominal_torque,
                             spec.nominal_power,
                             spec.peak_torque,
                             spec.peak_power)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn transition_speed(&self) -> f64 {
        self.transition_speed
    }

    pub fn nominal_torque(&self) -> f64 {
        self.nominal_torque
    }

    pub fn nominal_power(&self) -> f64 {
        self.nominal_power
    }

    pub fn peak_torque(&self) -> f64 {
        self.peak_torque
    }

    pub fn peak_power(&self) -> f64 {
        self.peak_power
    }

    /// Power held across the constant-power region (W)
    pub fn plateau_power(&self) -> f64 {
        self.nominal_torque * self.transition_speed
    }

    fn clamp_speed(&self, angular_speed: f64) -> f64 {
        if angular_speed.is_nan() {
            return 0.0;
        }
        angular_speed.clamp(0.0, self.max_speed)
    }

    /// Torque (N·m) at the given motor speed (rad/s). Speeds past the end of the
    /// range read the value at `max_speed`
    pub fn torque_at(&self, angular_speed: f64) -> f64 {
        let w = self.clamp_speed(angular_speed);
        if w <= self.transition_speed {
            self.nominal_torque
        } else {
            self.plateau_power() / w
        }
    }

    /// Power (W) at the given motor speed (rad/s)
    pub fn power_at(&self, angular_speed: f64) -> f64 {
        let w = self.clamp_speed(angular_speed);
        if w <= self.transition_speed {
            w * self.nominal_torque
        } else {
            self.plateau_power()
        }
    }

    /// Sample the torque and power curves across `0..=max_speed`
    pub fn curve(&self, resolution: usize) -> Result<CurveTable> {
        if resolution < 2 {
            return Err(Error::configuration("curve_resolution",
                                            resolution as f64,
                                            "at least 2 samples are needed"));
        }
        let mut speeds = Array1::linspace(0.0, self.max_speed, resolution);
        // linspace can overshoot the end point by an ulp
        speeds[resolution - 1] = self.max_speed;
        let torques = speeds.mapv(|w| self.torque_at(w));
        let powers = speeds.mapv(|w| self.power_at(w));
        let transition_index = speeds.iter()
            .take_while(|w| **w <= self.transition_speed)
            .count()
            .saturating_sub(1);
        Ok(CurveTable {
            max_speed: self.max_speed,
            transition_index,
            speeds,
            torques,
            powers
        })
    }
}

/// Torque and power sampled on an evenly spaced speed axis
#[derive(Debug, Clone, PartialEq)]
pub struct CurveTable {
    speeds: Array1<f64>,
    torques: Array1<f64>,
    powers: Array1<f64>,
    max_speed: f64,
    transition_index: usize
}

impl CurveTable {
    pub fn len(&self) -> usize {
        self.speeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speeds.is_empty()
    }

    /// Speed between adjacent samples (rad/s)
    pub fn step(&self) -> f64 {
        self.max_speed / (self.len() - 1) as f64
    }

    /// Index of the last sample in the constant-torque region
    pub fn transition_index(&self) -> usize {
        self.transition_index
    }

    pub fn speeds(&self) -> &Array1<f64> {
        &self.speeds
    }

    pub fn torques(&self) -> &Array1<f64> {
        &self.torques
    }

    pub fn powers(&self) -> &Array1<f64> {
        &self.powers
    }

    /// Nearest sample at or below `angular_speed`. Out of range speeds clamp to
    /// the first/last sample
    pub fn lookup_index(&self, angular_speed: f64) -> usize {
        if angular_speed.is_nan() || angular_speed <= 0.0 {
            return 0;
        }
        let last = self.len() - 1;
        let mut idx = ((angular_speed / self.step()).floor() as usize).min(last);
        // floor can land a sample either side of an exact grid speed
        if idx < last && self.speeds[idx + 1] <= angular_speed {
            idx += 1;
        } else if idx > 0 && self.speeds[idx] > angular_speed {
            idx -= 1;
        }
        idx
    }

    pub fn torque_at_index(&self, idx: usize) -> f64 {
        self.torques[idx.min(self.len() - 1)]
    }

    pub fn power_at_index(&self, idx: usize) -> f64 {
        self.powers[idx.min(self.len() - 1)]
    }

    pub fn lookup_torque(&self, angular_speed: f64) -> f64 {
        self.torque_at_index(self.lookup_index(angular_speed))
    }

    pub fn lookup_power(&self, angular_speed: f64) -> f64 {
        self.power_at_index(self.lookup_index(angular_speed))
    }

    pub fn torque_points(&self) -> Vec<(f64, f64)> {
        self.speeds.iter().copied().zip(self.torques.iter().copied()).collect()
    }

    pub fn power_points(&self) -> Vec<(f64, f64)> {
        self.speeds.iter().copied().zip(self.powers.iter().copied()).collect()
    }
}
