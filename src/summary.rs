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


use powertrain::{MotorRun, PerformanceReport};
use utils::numeric::round_float_to;
use utils::units::w_to_kw;

pub fn motor_heading(run: &MotorRun) -> String {
    let motor = &run.motor;
    format!("{}: {} kW nominal, {} kW peak, {} kW plateau, {} Nm peak",
            motor.label(),
            round_float_to(w_to_kw(motor.nominal_power()), 1),
            round_float_to(w_to_kw(motor.peak_power()), 1),
            round_float_to(w_to_kw(motor.plateau_power()), 1),
            round_float_to(motor.peak_torque(), 1))
}

pub fn displacement_line(report: &PerformanceReport) -> String {
    format!("Displacement: {:.2} m with Time taken: {:.2} s", report.distance, report.elapsed_time)
}

pub fn top_speed_line(report: &PerformanceReport) -> String {
    format!("Maximum speed: {:.1} km/hr ({})", report.top_speed_kmh(), report.top_speed_limit)
}

pub fn failure_line(label: &str, error: &powertrain::Error) -> String {
    format!("{}: simulation failed. {}", label, error)
}

pub fn summary_lines(run: &MotorRun) -> Vec<String> {
    vec![
        motor_heading(run),
        displacement_line(&run.report),
        top_speed_line(&run.report)
    ]
}

#[cfg(test)]
mod tests {
    use powertrain::{MotorCurveModel, SimulationParams, VehicleModel};
    use super::*;

    #[test]
    fn reference_summary() {
        let motor = MotorCurveModel::new("reference", 1000.0, 200.0, 20.0, 4000.0, 40.0, 8000.0).unwrap();
        let car = VehicleModel::new(4.35, 240.0, 4709.0, 0.225, 0.728, 2.0).unwrap();
        let run = MotorRun::simulate(&motor, &car, &SimulationParams::default()).unwrap();
        assert_eq!(summary_lines(&run), vec![
            "reference: 4 kW nominal, 8 kW peak, 4 kW plateau, 40 Nm peak".to_string(),
            "Displacement: 75.07 m with Time taken: 8.57 s".to_string(),
            "Maximum speed: 72.2 km/hr (drag limited)".to_string()
        ]);
    }

    #[test]
    fn failure_names_the_motor() {
        let error = powertrain::Error::NonConvergence { steps: 0, elapsed: 0.0, displacement: 0.0, target: 75.0 };
        assert!(failure_line("stalled", &error).starts_with("stalled: simulation failed. "));
    }
}
