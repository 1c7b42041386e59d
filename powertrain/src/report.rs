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

use std::fmt::{Display, Formatter};
use utils::units::ms_to_kmh;
use crate::integrator::AccelerationTrace;
use crate::motor::MotorCurveModel;
use crate::params::SimulationParams;
use crate::vehicle::VehicleModel;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TopSpeedLimit {
    /// Motor power is used up overcoming drag
    Drag,
    /// Motor reaches its (derated) max speed first
    MotorSpeed
}

impl TopSpeedLimit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopSpeedLimit::Drag => "drag limited",
            TopSpeedLimit::MotorSpeed => "motor speed limited"
        }
    }
}

impl Display for TopSpeedLimit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceReport {
    /// Time taken to cover the target distance (s)
    pub elapsed_time: f64,
    /// Distance actually covered by the last step (m)
    pub distance: f64,
    /// Estimated top speed (m/s)
    pub top_speed: f64,
    pub top_speed_limit: TopSpeedLimit
}

impl PerformanceReport {
    pub fn from_trace(trace: &AccelerationTrace,
                      motor: &MotorCurveModel,
                      vehicle: &VehicleModel,
                      params: &SimulationParams) -> PerformanceReport
    {
        let drag_limited = drag_limited_top_speed(motor, vehicle, params);
        let rotation_limited = rotation_limited_top_speed(motor, vehicle, params);
        let (top_speed, top_speed_limit) = if drag_limited <= rotation_limited {
            (drag_limited, TopSpeedLimit::Drag)
        } else {
            (rotation_limited, TopSpeedLimit::MotorSpeed)
        };
        PerformanceReport {
            elapsed_time: trace.final_time(),
            distance: trace.final_displacement(),
            top_speed,
            top_speed_limit
        }
    }

    pub fn top_speed_kmh(&self) -> f64 {
        ms_to_kmh(self.top_speed)
    }
}

/// Speed (m/s) at which drag consumes all of the power reaching the wheels.
/// Without any drag there is no such speed and this is infinite
pub fn drag_limited_top_speed(motor: &MotorCurveModel, vehicle: &VehicleModel, params: &SimulationParams) -> f64 {
    let wheel_power = 2.0 * motor.peak_power() * params.driveline_efficiency;
    let drag_term = vehicle.drag_area() * params.air_density;
    if drag_term <= 0.0 {
        return f64::INFINITY;
    }
    (wheel_power / drag_term).cbrt()
}

/// Speed (m/s) of the car at the derated max motor speed
pub fn rotation_limited_top_speed(motor: &MotorCurveModel, vehicle: &VehicleModel, params: &SimulationParams) -> f64 {
    vehicle.motor_angular_speed_to_speed(params.rotation_derate * motor.max_speed())
}

#[cfg(test)]
mod tests {
    use crate::force::ForceBalance;
    use crate::integrator::AccelerationIntegrator;
    use super::*;

    fn reference_motor() -> MotorCurveModel {
        MotorCurveModel::new("reference", 1000.0, 200.0, 20.0, 4000.0, 40.0, 8000.0).unwrap()
    }

    fn reference_car() -> VehicleModel {
        VehicleModel::new(4.35, 240.0, 4709.0, 0.225, 0.728, 2.0).unwrap()
    }

    fn reference_trace(motor: &MotorCurveModel, car: &VehicleModel, params: &SimulationParams) -> AccelerationTrace {
        let balance = ForceBalance::new(motor, car, params).unwrap();
        AccelerationIntegrator::new(balance, params).run().unwrap()
    }

    #[test]
    fn drag_limited_report() {
        let (motor, car, params) = (reference_motor(), reference_car(), SimulationParams::default());
        let trace = reference_trace(&motor, &car, &params);
        let report = PerformanceReport::from_trace(&trace, &motor, &car, &params);
        assert_eq!(report.elapsed_time, trace.final_time());
        assert_eq!(report.distance, trace.final_displacement());
        assert_eq!(report.top_speed_limit, TopSpeedLimit::Drag);
        // cbrt(2 * 8000 * 0.88 / (0.728 * 2 * 1.2))
        assert!((report.top_speed - 20.048_721).abs() < 1e-5);
        assert!((report.top_speed_kmh() - 72.175_397).abs() < 1e-4);
    }

    #[test]
    fn motor_speed_limited_report() {
        let motor = MotorCurveModel::new("low revving", 300.0, 100.0, 60.0, 6000.0, 80.0, 8000.0).unwrap();
        let (car, params) = (reference_car(), SimulationParams::default());
        let trace = reference_trace(&motor, &car, &params);
        let report = PerformanceReport::from_trace(&trace, &motor, &car, &params);
        assert_eq!(report.top_speed_limit, TopSpeedLimit::MotorSpeed);
        // 0.85 * 300 * 0.225 / 4.35
        assert!((report.top_speed - 13.189_655).abs() < 1e-5);
    }

    #[test]
    fn no_drag_is_motor_speed_limited() {
        let motor = reference_motor();
        let car = VehicleModel::new(4.35, 240.0, 4709.0, 0.225, 0.0, 0.0).unwrap();
        let params = SimulationParams::default();
        assert_eq!(drag_limited_top_speed(&motor, &car, &params), f64::INFINITY);
        let trace = reference_trace(&motor, &car, &params);
        let report = PerformanceReport::from_trace(&trace, &motor, &car, &params);
        assert_eq!(report.top_speed_limit, TopSpeedLimit::MotorSpeed);
        assert!(report.top_speed.is_finite());
    }

    #[test]
    fn report_is_idempotent() {
        let (motor, car, params) = (reference_motor(), reference_car(), SimulationParams::default());
        let trace = reference_trace(&motor, &car, &params);
        let first = PerformanceReport::from_trace(&trace, &motor, &car, &params);
        let second = PerformanceReport::from_trace(&trace, &motor, &car, &params);
        assert_eq!(first, second);
    }
}
