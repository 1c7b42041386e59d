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

use std::fs;
use std::path::{Path, PathBuf};
use config::{Config, ConfigError};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use powertrain::{SimulationParams, VehicleSpec};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GlobalSettings {
    motor_file: String,
    graphs_folder: String,
    max_motors: usize,
    vehicle: VehicleSpec,
    simulation: SimulationParams
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            motor_file: GlobalSettings::DEFAULT_MOTOR_FILE.to_string(),
            graphs_folder: GlobalSettings::DEFAULT_GRAPHS_FOLDER.to_string(),
            max_motors: GlobalSettings::DEFAULT_MAX_MOTORS,
            vehicle: VehicleSpec::default(),
            simulation: SimulationParams::default()
        }
    }
}

impl GlobalSettings {
    const MOTOR_FILE: &'static str = "motor_file";
    const GRAPHS_FOLDER: &'static str = "graphs_folder";
    const MAX_MOTORS: &'static str = "max_motors";
    const CONFIG_FILENAME: &'static str = "motor-sim-conf";
    const ENV_PREFIX: &'static str = "MOTORSIM";

    const DEFAULT_MOTOR_FILE: &'static str = "Motors_def.csv";
    const DEFAULT_GRAPHS_FOLDER: &'static str = "Graphs";
    const DEFAULT_MAX_MOTORS: usize = 3;

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default(GlobalSettings::MOTOR_FILE, GlobalSettings::DEFAULT_MOTOR_FILE)?
            .set_default(GlobalSettings::GRAPHS_FOLDER, GlobalSettings::DEFAULT_GRAPHS_FOLDER)?
            .set_default(GlobalSettings::MAX_MOTORS, GlobalSettings::DEFAULT_MAX_MOTORS as i64)
    }

    /// Load from `motor-sim-conf.toml` in the working directory, with `MOTORSIM_`
    /// environment overrides (`MOTORSIM_SIMULATION__TIME_STEP=0.005`).
    pub fn load() -> Result<Self, ConfigError> {
        GlobalSettings::load_from(&GlobalSettings::default_path())
    }

    /// If the file doesn't exist the defaults are used and written out to it.
    /// A file that exists but can't be read is an error and is left untouched
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            warn!("No settings found at {}. Using defaults", path.display());
            let settings = GlobalSettings::builder()?
                .add_source(GlobalSettings::environment())
                .build()?;
            let ret: GlobalSettings = settings.try_deserialize()?;
            ret.check()?;
            ret.write_to(path).unwrap_or_else(|e| { error!("Failed to write settings. {}", e.to_string())});
            return Ok(ret);
        }
        let ret: GlobalSettings = GlobalSettings::builder()?
            .add_source(config::File::from(path))
            .add_source(GlobalSettings::environment())
            .build()?
            .try_deserialize()?;
        ret.check()?;
        Ok(ret)
    }

    fn default_path() -> PathBuf {
        PathBuf::from(format!("{}.toml", GlobalSettings::CONFIG_FILENAME))
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.max_motors == 0 {
            return Err(ConfigError::Message(format!("`{}` must be at least 1", GlobalSettings::MAX_MOTORS)));
        }
        Ok(())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(GlobalSettings::ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    pub fn from_toml_str(data: &str) -> Result<Self, ConfigError> {
        let ret: GlobalSettings = GlobalSettings::builder()?
            .add_source(config::File::from_str(data, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        ret.check()?;
        Ok(ret)
    }

    pub fn motor_file(&self) -> PathBuf {
        PathBuf::from(&self.motor_file)
    }

    pub fn graphs_folder(&self) -> PathBuf {
        PathBuf::from(&self.graphs_folder)
    }

    pub fn max_motors(&self) -> usize {
        self.max_motors
    }

    pub fn vehicle(&self) -> &VehicleSpec {
        &self.vehicle
    }

    pub fn simulation(&self) -> &SimulationParams {
        &self.simulation
    }

    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        fs::write(path, toml::to_string(&self).map_err(|_e|{
            std::io::Error::new(std::io::ErrorKind::Other, "Failed to encode settings to toml")
        })?)
    }
}
