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


mod data;
mod error;
mod plot;
mod settings;
mod summary;

use std::env;
use std::process::ExitCode;
use tracing::{error, info};

use powertrain::simulate_all;
use crate::error::AppError;
use crate::settings::GlobalSettings;

fn init_logging() {
    match env::current_dir() {
        Ok(current_dir) => {
            let file_appender = tracing_appender::rolling::never(current_dir, "motor_sim.log");
            let subscriber = tracing_subscriber::fmt()
                .with_writer(file_appender)
                .with_ansi(false)
                .compact()
                .finish();
            match tracing::subscriber::set_global_default(subscriber) {
                Ok(_) => {
                    info!("Logging initialised");
                }
                Err(e) => {
                    eprintln!("Failed to init logging. {}", e.to_string());
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to init logging. Couldn't determine current dir {}", e.to_string());
        }
    }
}

fn run() -> Result<(), AppError> {
    let settings = GlobalSettings::load()?;
    let vehicle = data::build_vehicle_model(settings.vehicle())?;
    info!("Vehicle: gear ratio {:.3}, mass {} kg, grip limit {:.0} N",
          vehicle.gear_ratio(), vehicle.mass(), vehicle.grip_limit());

    let specs = data::load_motor_specs_from_path(&settings.motor_file())?;
    let specs = data::limit_motor_specs(specs, settings.max_motors());
    let motors = data::build_motor_models(&specs)?;

    let graphs_folder = settings.graphs_folder();
    for (label, result) in simulate_all(&motors, &vehicle, settings.simulation()) {
        match result {
            Ok(motor_run) => {
                for line in summary::summary_lines(&motor_run) {
                    println!("{}", line);
                }
                if let Err(e) = plot::render_motor_run(&motor_run, &graphs_folder) {
                    error!("{}", e);
                    eprintln!("{}", e);
                }
            }
            Err(e) => {
                println!("{}", summary::failure_line(&label, &e));
            }
        }
        println!();
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
