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

use tracing::debug;
use crate::error::{Error, Result};
use crate::force::ForceBalance;
use crate::params::SimulationParams;

/// Time/displacement history of a standing start run. Always begins at (0, 0)
#[derive(Debug, Clone, PartialEq)]
pub struct AccelerationTrace {
    times: Vec<f64>,
    displacements: Vec<f64>,
    velocities: Vec<f64>
}

impl AccelerationTrace {
    fn starting_at_rest(capacity: usize) -> AccelerationTrace {
        let mut trace = AccelerationTrace {
            times: Vec::with_capacity(capacity),
            displacements: Vec::with_capacity(capacity),
            velocities: Vec::with_capacity(capacity)
        };
        trace.push(0.0, 0.0, 0.0);
        trace
    }

    fn push(&mut self, time: f64, displacement: f64, velocity: f64) {
        self.times.push(time);
        self.displacements.push(displacement);
        self.velocities.push(velocity);
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn displacements(&self) -> &[f64] {
        &self.displacements
    }

    /// Speed (m/s) at each sample
    pub fn velocities(&self) -> &[f64] {
        &self.velocities
    }

    pub fn final_time(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }

    pub fn final_displacement(&self) -> f64 {
        self.displacements.last().copied().unwrap_or(0.0)
    }

    pub fn final_velocity(&self) -> f64 {
        self.velocities.last().copied().unwrap_or(0.0)
    }

    /// (time, displacement) pairs
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.times.iter().copied().zip(self.displacements.iter().copied()).collect()
    }
}

pub struct AccelerationIntegrator<'a> {
    balance: ForceBalance<'a>,
    params: &'a SimulationParams
}

impl<'a> AccelerationIntegrator<'a> {
    pub fn new(balance: ForceBalance<'a>, params: &'a SimulationParams) -> AccelerationIntegrator<'a> {
        AccelerationIntegrator { balance, params }
    }

    /// Step the car forward from a standstill until it passes the target distance.
    ///
    /// Each step assumes constant acceleration over `time_step`. Fails with
    /// [`Error::NonConvergence`] if the target isn't passed within `max_steps`
    /// or the car can't get moving at all.
    pub fn run(&self) -> Result<AccelerationTrace> {
        let dt = self.params.time_step;
        let target = self.params.target_distance;
        let mut trace = AccelerationTrace::starting_at_rest(self.params.max_steps.min(4096) + 1);
        let mut velocity = 0.0;
        let mut displacement = 0.0;

        for step in 1..=self.params.max_steps {
            let acceleration = self.balance.acceleration_at(velocity);
            let displacement_step = velocity * dt + 0.5 * acceleration * dt.powi(2);
            if displacement_step <= 0.0 {
                debug!("Stalled after {} steps at {:.3} m", step - 1, displacement);
                return Err(Error::NonConvergence {
                    steps: step - 1,
                    elapsed: trace.final_time(),
                    displacement,
                    target
                });
            }
            velocity = self.params.velocity_update.next_velocity(velocity, displacement_step, acceleration, dt);
            displacement += displacement_step;
            trace.push(step as f64 * dt, displacement, velocity);

            if displacement > target {
                debug!("Covered {:.3} m in {} steps", displacement, step);
                return Ok(trace);
            }
        }

        Err(Error::NonConvergence {
            steps: self.params.max_steps,
            elapsed: trace.final_time(),
            displacement,
            target
        })
    }
}
