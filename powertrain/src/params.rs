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

use serde::{Deserialize, Serialize};
use crate::error::{Error, Result, require_non_negative, require_positive};

pub const DEFAULT_TIME_STEP: f64 = 0.01; // s
pub const DEFAULT_TARGET_DISTANCE: f64 = 75.0; // m
pub const DEFAULT_DRIVELINE_EFFICIENCY: f64 = 0.88; // 12% drivetrain losses
pub const DEFAULT_AIR_DENSITY: f64 = 1.2; // kg/m³
pub const DEFAULT_CURVE_RESOLUTION: usize = 1000;
pub const DEFAULT_MAX_STEPS: usize = 10_000;
pub const DEFAULT_ROTATION_DERATE: f64 = 0.85;

/// How the integrator derives the next velocity from a step
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocityUpdate {
    /// `v = ds/dt + a·dt`. Equivalent to `v + 1.5·a·dt`
    AsDerived,
    /// `v = v + a·dt`
    Euler
}

impl VelocityUpdate {
    pub fn next_velocity(&self, velocity: f64, displacement_step: f64, acceleration: f64, dt: f64) -> f64 {
        match self {
            VelocityUpdate::AsDerived => (displacement_step / dt) + acceleration * dt,
            VelocityUpdate::Euler => velocity + acceleration * dt
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VelocityUpdate::AsDerived => "as_derived",
            VelocityUpdate::Euler => "euler"
        }
    }
}

impl Default for VelocityUpdate {
    fn default() -> Self {
        VelocityUpdate::AsDerived
    }
}

/// Where the force balance reads motor torque from
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TorqueLookup {
    /// Evaluate the torque curve directly at the queried speed
    Analytic,
    /// Read the sampled curve at the nearest lower sample
    Tabulated
}

impl TorqueLookup {
    pub fn as_str(&self) -> &'static str {
        match self {
            TorqueLookup::Analytic => "analytic",
            TorqueLookup::Tabulated => "tabulated"
        }
    }
}

impl Default for TorqueLookup {
    fn default() -> Self {
        TorqueLookup::Analytic
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub time_step: f64,
    pub target_distance: f64,
    pub driveline_efficiency: f64,
    pub air_density: f64,
    pub curve_resolution: usize,
    pub max_steps: usize,
    pub rotation_derate: f64,
    pub velocity_update: VelocityUpdate,
    pub torque_lookup: TorqueLookup
}

impl Default for SimulationParams {
    fn default() -> Self {
        SimulationParams {
            time_step: DEFAULT_TIME_STEP,
            target_distance: DEFAULT_TARGET_DISTANCE,
            driveline_efficiency: DEFAULT_DRIVELINE_EFFICIENCY,
            air_density: DEFAULT_AIR_DENSITY,
            curve_resolution: DEFAULT_CURVE_RESOLUTION,
            max_steps: DEFAULT_MAX_STEPS,
            rotation_derate: DEFAULT_ROTATION_DERATE,
            velocity_update: VelocityUpdate::default(),
            torque_lookup: TorqueLookup::default()
        }
    }
}

impl SimulationParams {
    pub fn validate(&self) -> Result<()> {
        require_positive("time_step", self.time_step)?;
        require_positive("target_distance", self.target_distance)?;
        require_non_negative("driveline_efficiency", self.driveline_efficiency)?;
        if self.driveline_efficiency > 1.0 {
            return Err(Error::configuration("driveline_efficiency",
                                            self.driveline_efficiency,
                                            "efficiency can't exceed 1.0"));
        }
        require_non_negative("air_density", self.air_density)?;
        if self.curve_resolution < 2 {
            return Err(Error::configuration("curve_resolution",
                                            self.curve_resolution as f64,
                                            "at least 2 samples are needed"));
        }
        if self.max_steps == 0 {
            return Err(Error::configuration("max_steps", 0.0, "at least 1 step is needed"));
        }
        require_positive("rotation_derate", self.rotation_derate)?;
        if self.rotation_derate > 1.0 {
            return Err(Error::configuration("rotation_derate",
                                            self.rotation_derate,
                                            "derate can't exceed 1.0"));
        }
        Ok(())
    }

    /// Longest stretch of simulated time the integrator will run for
    pub fn max_simulated_time(&self) -> f64 {
        self.max_steps as f64 * self.time_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = SimulationParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.max_simulated_time(), 100.0);
    }

    #[test]
    fn zero_efficiency_is_allowed() {
        let params = SimulationParams { driveline_efficiency: 0.0, ..SimulationParams::default() };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn invalid_params_rejected() {
        let bad = [
            SimulationParams { time_step: 0.0, ..SimulationParams::default() },
            SimulationParams { target_distance: -75.0, ..SimulationParams::default() },
            SimulationParams { driveline_efficiency: 1.2, ..SimulationParams::default() },
            SimulationParams { curve_resolution: 1, ..SimulationParams::default() },
            SimulationParams { max_steps: 0, ..SimulationParams::default() },
            SimulationParams { rotation_derate: 0.0, ..SimulationParams::default() },
        ];
        for params in bad {
            assert!(params.validate().unwrap_err().is_configuration_error());
        }
    }

    #[test]
    fn velocity_update_forms() {
        // ds/dt = v + a·dt/2 so the derived form lands half a step further
        let (v, a, dt) = (10.0, 4.0, 0.01);
        let ds = v * dt + 0.5 * a * dt * dt;
        let derived = VelocityUpdate::AsDerived.next_velocity(v, ds, a, dt);
        let euler = VelocityUpdate::Euler.next_velocity(v, ds, a, dt);
        assert!((euler - 10.04).abs() < 1e-12);
        assert!((derived - 10.06).abs() < 1e-12);
    }
}
