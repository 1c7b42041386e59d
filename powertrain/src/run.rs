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

use tracing::{debug, error, info, warn};
use crate::error::Result;
use crate::force::ForceBalance;
use crate::integrator::{AccelerationIntegrator, AccelerationTrace};
use crate::motor::{CurveTable, MotorCurveModel};
use crate::params::SimulationParams;
use crate::report::PerformanceReport;
use crate::vehicle::VehicleModel;

/// Everything produced for one motor
#[derive(Debug, Clone)]
pub struct MotorRun {
    pub motor: MotorCurveModel,
    pub curve: CurveTable,
    pub trace: AccelerationTrace,
    pub report: PerformanceReport
}

impl MotorRun {
    pub fn simulate(motor: &MotorCurveModel,
                    vehicle: &VehicleModel,
                    params: &SimulationParams) -> Result<MotorRun>
    {
        params.validate()?;
        debug!("{}: dt {} s, {} velocity update, {} torque lookup, giving up after {:.1} s",
               motor.label(), params.time_step, params.velocity_update.as_str(),
               params.torque_lookup.as_str(), params.max_simulated_time());
        let curve = motor.curve(params.curve_resolution)?;
        let balance = ForceBalance::new(motor, vehicle, params)?;

        // Informational only, the force balance doesn't limit traction
        let launch_force = balance.launch_force();
        if launch_force > vehicle.grip_limit() {
            warn!("{}: launch force {:.0} N exceeds the grip limit of {:.0} N",
                  motor.label(), launch_force, vehicle.grip_limit());
        }

        let trace = AccelerationIntegrator::new(balance, params).run()?;
        let report = PerformanceReport::from_trace(&trace, motor, vehicle, params);
        info!("{}: {:.2} m in {:.2} s at {:.2} m/s. Top speed {:.1} km/h ({})",
              motor.label(), report.distance, report.elapsed_time, trace.final_velocity(),
              report.top_speed_kmh(), report.top_speed_limit);
        Ok(MotorRun { motor: motor.clone(), curve, trace, report })
    }
}

/// Simulate each motor in turn. A failure for one motor doesn't stop the others
pub fn simulate_all(motors: &[MotorCurveModel],
                    vehicle: &VehicleModel,
                    params: &SimulationParams) -> Vec<(String, Result<MotorRun>)>
{
    motors.iter().map(|motor| {
        let result = MotorRun::simulate(motor, vehicle, params);
        if let Err(e) = &result {
            error!("Simulation of {} failed. {}", motor.label(), e);
        }
        (motor.label().to_string(), result)
    }).collect()
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use super::*;

    fn reference_car() -> VehicleModel {
        VehicleModel::new(4.35, 240.0, 4709.0, 0.225, 0.728, 2.0).unwrap()
    }

    #[test]
    fn single_motor_run() {
        let motor = MotorCurveModel::new("reference", 1000.0, 200.0, 20.0, 4000.0, 40.0, 8000.0).unwrap();
        let run = MotorRun::simulate(&motor, &reference_car(), &SimulationParams::default()).unwrap();
        assert_eq!(run.curve.len(), 1000);
        assert_eq!(run.report.elapsed_time, run.trace.final_time());
        assert_eq!(run.motor.label(), "reference");
    }

    #[test]
    fn invalid_params_are_rejected_up_front() {
        let motor = MotorCurveModel::new("reference", 1000.0, 200.0, 20.0, 4000.0, 40.0, 8000.0).unwrap();
        let params = SimulationParams { time_step: -0.01, ..SimulationParams::default() };
        let err = MotorRun::simulate(&motor, &reference_car(), &params).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn failures_dont_stop_the_batch() {
        let motors = vec![
            MotorCurveModel::new("first", 1000.0, 200.0, 20.0, 4000.0, 40.0, 8000.0).unwrap(),
            MotorCurveModel::new("no torque", 1000.0, 200.0, 0.0, 0.0, 0.0, 8000.0).unwrap(),
            MotorCurveModel::new("third", 800.0, 300.0, 30.0, 9000.0, 60.0, 15000.0).unwrap(),
        ];
        let results = simulate_all(&motors, &reference_car(), &SimulationParams::default());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, "first");
        assert!(results[0].1.is_ok());
        assert!(matches!(results[1].1, Err(Error::NonConvergence { .. })));
        assert!(results[2].1.is_ok());
    }
}
