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

//! Longitudinal acceleration model of an electric race car.
//!
//! A [`MotorCurveModel`] and a [`VehicleModel`] feed a [`ForceBalance`], which the
//! [`AccelerationIntegrator`] steps forward from a standstill to produce an
//! [`AccelerationTrace`]. [`PerformanceReport`] summarises the run.

pub mod error;
pub mod params;
pub mod motor;
pub mod vehicle;
pub mod force;
pub mod integrator;
pub mod report;
pub mod run;

pub use error::{Error, Result};
pub use params::{SimulationParams, TorqueLookup, VelocityUpdate};
pub use motor::{CurveTable, MotorCurveModel, MotorSpec};
pub use vehicle::{VehicleModel, VehicleSpec};
pub use force::{ForceBalance, ForceSample};
pub use integrator::{AccelerationIntegrator, AccelerationTrace};
pub use report::{PerformanceReport, TopSpeedLimit};
pub use run::{MotorRun, simulate_all};

pub const GRAVITY: f64 = 9.81; // m/s^2
