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
use crate::error::{Result, require_non_negative, require_positive};
use crate::GRAVITY;

// On the limit of wheel-lift only the rear axle carries load
const DRIVEN_AXLE_LOAD_FRACTION: f64 = 0.5;

/// Car definition as it appears in the settings file.
///
/// The gear ratio can either be given directly or worked out from the sprocket
/// diameters, and the grip limit either given directly or worked out from a
/// friction coefficient. A direct value always wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleSpec {
    pub gear_ratio: Option<f64>,
    pub motor_sprocket_diameter: f64,
    pub axle_sprocket_diameter: f64,
    pub mass: f64,
    pub grip_limit: Option<f64>,
    pub grip_coefficient: f64,
    pub wheel_radius: f64,
    pub drag_coefficient: f64,
    pub frontal_area: f64
}

impl Default for VehicleSpec {
    fn default() -> Self {
        VehicleSpec {
            gear_ratio: None,
            motor_sprocket_diameter: 23.0, // mm
            axle_sprocket_diameter: 100.0, // mm
            mass: 240.0,
            grip_limit: None,
            grip_coefficient: 4.0,
            wheel_radius: 0.225,
            drag_coefficient: 0.728,
            frontal_area: 2.0
        }
    }
}

impl VehicleSpec {
    pub fn resolved_gear_ratio(&self) -> Result<f64> {
        match self.gear_ratio {
            Some(ratio) => Ok(ratio),
            None => {
                let motor_side = require_positive("motor_sprocket_diameter", self.motor_sprocket_diameter)?;
                let axle_side = require_positive("axle_sprocket_diameter", self.axle_sprocket_diameter)?;
                Ok(axle_side / motor_side)
            }
        }
    }

    pub fn resolved_grip_limit(&self) -> Result<f64> {
        match self.grip_limit {
            Some(limit) => Ok(limit),
            None => {
                let mu = require_non_negative("grip_coefficient", self.grip_coefficient)?;
                Ok(mu * self.mass * GRAVITY * DRIVEN_AXLE_LOAD_FRACTION)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleModel {
    gear_ratio: f64,
    mass: f64,
    grip_limit: f64,
    wheel_radius: f64,
    drag_coefficient: f64,
    frontal_area: f64
}

impl VehicleModel {
    pub fn new(gear_ratio: f64,
               mass: f64,
               grip_limit: f64,
               wheel_radius: f64,
               drag_coefficient: f64,
               frontal_area: f64) -> Result<VehicleModel>
    {
        Ok(VehicleModel {
            gear_ratio: require_positive("gear_ratio", gear_ratio)?,
            mass: require_positive("mass", mass)?,
            grip_limit: require_non_negative("grip_limit", grip_limit)?,
            wheel_radius: require_positive("wheel_radius", wheel_radius)?,
            drag_coefficient: require_non_negative("drag_coefficient", drag_coefficient)?,
            frontal_area: require_non_negative("frontal_area", frontal_area)?
        })
    }

    pub fn from_spec(spec: &VehicleSpec) -> Result<VehicleModel> {
        VehicleModel::new(spec.resolved_gear_ratio()?,
                          require_positive("mass", spec.mass)?,
                          spec.resolved_grip_limit()?,
                          spec.wheel_radius,
                          spec.drag_coefficient,
                          spec.frontal_area)
    }

    pub fn gear_ratio(&self) -> f64 {
        self.gear_ratio
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn grip_limit(&self) -> f64 {
        self.grip_limit
    }

    pub fn wheel_radius(&self) -> f64 {
        self.wheel_radius
    }

    pub fn drag_coefficient(&self) -> f64 {
        self.drag_coefficient
    }

    pub fn frontal_area(&self) -> f64 {
        self.frontal_area
    }

    /// Cd·A (m²)
    pub fn drag_area(&self) -> f64 {
        self.drag_coefficient * self.frontal_area
    }

    /// Aerodynamic drag (N) at `speed` m/s
    pub fn drag_force_at(&self, speed: f64, air_density: f64) -> f64 {
        0.5 * self.drag_area() * air_density * speed.powi(2)
    }

    /// Motor shaft speed (rad/s) for a vehicle speed (m/s)
    pub fn speed_to_motor_angular_speed(&self, speed: f64) -> f64 {
        speed * self.gear_ratio / self.wheel_radius
    }

    /// Vehicle speed (m/s) for a motor shaft speed (rad/s)
    pub fn motor_angular_speed_to_speed(&self, angular_speed: f64) -> f64 {
        angular_speed * self.wheel_radius / self.gear_ratio
    }

    /// Tractive force (N) at the contact patch for a motor torque (N·m)
    pub fn wheel_force_from_torque(&self, motor_torque: f64) -> f64 {
        motor_torque * self.gear_ratio / self.wheel_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_car() -> VehicleModel {
        VehicleModel::new(4.35, 240.0, 4709.0, 0.225, 0.728, 2.0).unwrap()
    }

    #[test]
    fn default_spec_matches_reference_car() {
        let car = VehicleModel::from_spec(&VehicleSpec::default()).unwrap();
        assert!((car.gear_ratio() - 100.0 / 23.0).abs() < 1e-12);
        assert!((car.grip_limit() - 4708.8).abs() < 1e-9);
        assert_eq!(car.mass(), 240.0);
        assert_eq!(car.wheel_radius(), 0.225);
    }

    #[test]
    fn direct_values_win() {
        let spec = VehicleSpec { gear_ratio: Some(4.35), grip_limit: Some(4709.0), ..VehicleSpec::default() };
        assert_eq!(VehicleModel::from_spec(&spec).unwrap(), reference_car());
    }

    #[test]
    fn drag_force() {
        let car = reference_car();
        assert_eq!(car.drag_force_at(0.0, 1.2), 0.0);
        // 0.5 * 0.728 * 2 * 1.2 * 100
        assert!((car.drag_force_at(10.0, 1.2) - 87.36).abs() < 1e-9);
        assert_eq!(car.drag_force_at(-10.0, 1.2), car.drag_force_at(10.0, 1.2));
    }

    #[test]
    fn speed_conversions_round_trip() {
        let car = reference_car();
        let w = car.speed_to_motor_angular_speed(10.0);
        assert!((w - 193.333_333).abs() < 1e-6);
        assert!((car.motor_angular_speed_to_speed(w) - 10.0).abs() < 1e-12);
        assert!((car.wheel_force_from_torque(20.0) - 386.666_666).abs() < 1e-6);
    }

    #[test]
    fn invalid_vehicles_rejected() {
        assert!(VehicleModel::new(0.0, 240.0, 4709.0, 0.225, 0.728, 2.0).is_err());
        assert!(VehicleModel::new(4.35, -240.0, 4709.0, 0.225, 0.728, 2.0).is_err());
        assert!(VehicleModel::new(4.35, 240.0, 4709.0, 0.0, 0.728, 2.0).is_err());
        assert!(VehicleModel::new(4.35, 240.0, 4709.0, 0.225, -0.1, 2.0).is_err());
        assert!(VehicleModel::new(4.35, 240.0, 4709.0, 0.225, 0.728, -2.0).is_err());
        assert!(VehicleModel::new(4.35, 240.0, -1.0, 0.225, 0.728, 2.0).is_err());
        // no drag at all is fine
        assert!(VehicleModel::new(4.35, 240.0, 4709.0, 0.225, 0.0, 0.0).is_ok());

        let no_sprocket = VehicleSpec { motor_sprocket_diameter: 0.0, ..VehicleSpec::default() };
        assert!(VehicleModel::from_spec(&no_sprocket).unwrap_err().is_configuration_error());
    }
}
