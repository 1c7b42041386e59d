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

use crate::error::Result;
use crate::motor::{CurveTable, MotorCurveModel};
use crate::params::{SimulationParams, TorqueLookup};
use crate::vehicle::VehicleModel;

/// Longitudinal forces acting on the car at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceSample {
    pub speed: f64,
    pub motor_angular_speed: f64,
    pub motor_torque: f64,
    pub motor_force: f64,
    pub drag_force: f64,
    /// Wheel power left over once drag losses are paid for (W)
    pub power_margin: f64,
    pub acceleration: f64
}

pub struct ForceBalance<'a> {
    motor: &'a MotorCurveModel,
    vehicle: &'a VehicleModel,
    params: &'a SimulationParams,
    table: Option<CurveTable>
}

impl<'a> ForceBalance<'a> {
    pub fn new(motor: &'a MotorCurveModel,
               vehicle: &'a VehicleModel,
               params: &'a SimulationParams) -> Result<ForceBalance<'a>>
    {
        let table = match params.torque_lookup {
            TorqueLookup::Analytic => None,
            TorqueLookup::Tabulated => Some(motor.curve(params.curve_resolution)?)
        };
        Ok(ForceBalance { motor, vehicle, params, table })
    }

    fn motor_torque_at(&self, angular_speed: f64) -> f64 {
        match &self.table {
            Some(table) => table.lookup_torque(angular_speed),
            None => self.motor.torque_at(angular_speed)
        }
    }

    pub fn sample(&self, speed: f64) -> ForceSample {
        let motor_angular_speed = self.vehicle.speed_to_motor_angular_speed(speed);
        let motor_torque = self.motor_torque_at(motor_angular_speed);
        let motor_force = self.vehicle.wheel_force_from_torque(motor_torque);
        let drag_force = self.vehicle.drag_force_at(speed, self.params.air_density);

        // Checked against peak power rather than the power at this speed
        let power_margin = self.params.driveline_efficiency * self.motor.peak_power() - drag_force * speed;
        let net_acceleration = (motor_force - drag_force) / self.vehicle.mass();

        // Once drag matches either the drive force or the available power the car
        // stops accelerating. Deceleration isn't modelled
        let acceleration = if net_acceleration > 0.0 && power_margin > 0.0 {
            net_acceleration
        } else {
            0.0
        };
        ForceSample {
            speed,
            motor_angular_speed,
            motor_torque,
            motor_force,
            drag_force,
            power_margin,
            acceleration
        }
    }

    /// Net acceleration (m/s²) at `speed` m/s. Never negative
    pub fn acceleration_at(&self, speed: f64) -> f64 {
        self.sample(speed).acceleration
    }

    /// Drive force (N) available from a standstill
    pub fn launch_force(&self) -> f64 {
        self.sample(0.0).motor_force
    }
}
