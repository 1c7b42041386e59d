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

use std::io;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("io error. {0}")]
    IoError(#[from] io::Error),
    #[error("settings error. {0}")]
    SettingsError(#[from] config::ConfigError),
    #[error("failed to read motor table. {0}")]
    MotorTableError(#[from] csv::Error),
    #[error("no motors defined in `{0}`")]
    NoMotors(String),
    #[error("invalid motor `{0}`. {1}")]
    InvalidMotor(String, powertrain::Error),
    #[error("invalid vehicle. {0}")]
    InvalidVehicle(powertrain::Error),
    #[error("failed to draw `{0}`. {1}")]
    PlotError(String, String)
}
