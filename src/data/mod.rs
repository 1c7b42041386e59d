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

use std::fs::File;
use std::io;
use std::path::Path;
use tracing::{info, warn};
use powertrain::{MotorCurveModel, MotorSpec, VehicleModel, VehicleSpec};
use crate::error::AppError;

/// Read the motor table. Expects a header row of
/// `Motor,w3,w1,T_nominal,P_nominal,T_peak,P_peak` with speeds in RPM.
/// Lines starting with `#` are ignored
pub fn load_motor_specs_from_path(path: &Path) -> Result<Vec<MotorSpec>, AppError> {
    let file = File::open(path)?;
    info!("Loading motor definitions from {}", path.display());
    let specs = load_motor_specs_from_reader(file)?;
    if specs.is_empty() {
        return Err(AppError::NoMotors(path.display().to_string()));
    }
    Ok(specs)
}

pub fn load_motor_specs_from_reader<R: io::Read>(reader: R) -> Result<Vec<MotorSpec>, AppError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);
    let mut specs = Vec::new();
    for result in rdr.deserialize() {
        let spec: MotorSpec = result?;
        specs.push(spec);
    }
    Ok(specs)
}

/// Keep the first `max_motors` rows
pub fn limit_motor_specs(mut specs: Vec<MotorSpec>, max_motors: usize) -> Vec<MotorSpec> {
    if specs.len() > max_motors {
        for skipped in &specs[max_motors..] {
            warn!("Skipping {}. Only the first {} motors are simulated", skipped.label, max_motors);
        }
        specs.truncate(max_motors);
    }
    specs
}

pub fn build_motor_models(specs: &[MotorSpec]) -> Result<Vec<MotorCurveModel>, AppError> {
    specs.iter().map(|spec| {
        MotorCurveModel::from_spec(spec).map_err(|e| AppError::InvalidMotor(spec.label.clone(), e))
    }).collect()
}

pub fn build_vehicle_model(spec: &VehicleSpec) -> Result<VehicleModel, AppError> {
    VehicleModel::from_spec(spec).map_err(AppError::InvalidVehicle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOTOR_TABLE: &str = "\
Motor,w3,w1,T_nominal,P_nominal,T_peak,P_peak
EMRAX 188 HV,6500,4500,50,28000,100,52000
# bench motor, not for the car
EMRAX 208 HV, 7000, 5000, 80, 56000, 150, 86000
Fischer TI085,20000,6000,21,20000,42,40000
Spare,9000,3000,30,10000,60,20000
";

    #[test]
    fn reads_motor_table() {
        let specs = load_motor_specs_from_reader(MOTOR_TABLE.as_bytes()).unwrap();
        assert_eq!(specs.len(), 4);
        assert_eq!(specs[0].label, "EMRAX 188 HV");
        assert_eq!(specs[1].label, "EMRAX 208 HV");
        assert_eq!(specs[1].max_speed_rpm, 7000.0);
        assert_eq!(specs[1].peak_power, 86000.0);
        assert_eq!(specs[2].transition_speed_rpm, 6000.0);
    }

    #[test]
    fn bad_rows_are_reported() {
        let table = "Motor,w3,w1,T_nominal,P_nominal,T_peak,P_peak\nBroken,fast,4500,50,28000,100,52000\n";
        let err = load_motor_specs_from_reader(table.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::MotorTableError(_)));

        let missing_column = "Motor,w3,w1\nShort,6500,4500\n";
        assert!(load_motor_specs_from_reader(missing_column.as_bytes()).is_err());
    }

    #[test]
    fn only_first_motors_are_kept() {
        let specs = load_motor_specs_from_reader(MOTOR_TABLE.as_bytes()).unwrap();
        let kept = limit_motor_specs(specs, 3);
        assert_eq!(kept.len(), 3);
        assert_eq!(kept[2].label, "Fischer TI085");
        assert_eq!(limit_motor_specs(kept, 10).len(), 3);
    }

    #[test]
    fn invalid_motor_names_the_row() {
        let table = "Motor,w3,w1,T_nominal,P_nominal,T_peak,P_peak\nBackwards,3000,4500,50,28000,100,52000\n";
        let specs = load_motor_specs_from_reader(table.as_bytes()).unwrap();
        match build_motor_models(&specs) {
            Err(AppError::InvalidMotor(label, e)) => {
                assert_eq!(label, "Backwards");
                assert!(e.is_configuration_error());
            }
            other => panic!("Expected an invalid motor, got {:?}", other)
        }
    }

    #[test]
    fn missing_file() {
        let err = load_motor_specs_from_path(Path::new("no-such-dir/Motors_def.csv")).unwrap_err();
        assert!(matches!(err, AppError::IoError(_)));
    }
}
