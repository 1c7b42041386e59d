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


use std::error::Error;
use std::path::{Path, PathBuf};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;
use powertrain::MotorRun;
use utils::filesystem::{ensure_dir, safe_filename_in_path};
use utils::numeric::round_up_to_nearest_multiple;
use utils::units::rad_s_to_rpm;
use crate::error::AppError;

const IMAGE_SIZE: (u32, u32) = (800, 900);

type DrawResult = Result<(), Box<dyn Error>>;

/// One line chart on a third of the output image
struct LineChart {
    caption: String,
    x_desc: &'static str,
    y_desc: &'static str,
    x_limit: f64,
    y_limit: f64,
    legend: String,
    colour: RGBColor,
    points: Vec<(f64, f64)>
}

impl LineChart {
    fn torque(run: &MotorRun) -> LineChart {
        let motor = &run.motor;
        LineChart {
            caption: format!("Torque curve --- Max speed: {:.2} rad/s ({:.0} RPM)",
                             motor.max_speed(), rad_s_to_rpm(motor.max_speed())),
            x_desc: "Angular speed (rad/s)",
            y_desc: "Torque (Nm)",
            x_limit: round_up_to_nearest_multiple(motor.max_speed(), 100.0),
            y_limit: round_up_to_nearest_multiple(motor.peak_torque() * 1.1, 10.0),
            legend: format!("Peak torque: {:.2} Nm", motor.peak_torque()),
            colour: YELLOW,
            points: run.curve.torque_points()
        }
    }

    fn power(run: &MotorRun) -> LineChart {
        let motor = &run.motor;
        LineChart {
            caption: format!("Power curve --- Torque/power transition speed: {:.2} rad/s",
                             motor.transition_speed()),
            x_desc: "Angular speed (rad/s)",
            y_desc: "Power (W)",
            x_limit: round_up_to_nearest_multiple(motor.max_speed(), 100.0),
            y_limit: round_up_to_nearest_multiple(motor.plateau_power().max(motor.peak_power()) * 1.1, 1000.0),
            legend: format!("Peak power: {:.2} W", motor.peak_power()),
            colour: CYAN,
            points: run.curve.power_points()
        }
    }

    fn displacement(run: &MotorRun) -> LineChart {
        LineChart {
            caption: format!("Displacement-Time curve (Acc. event). Motor: {}", run.motor.label()),
            x_desc: "Time (s)",
            y_desc: "Displacement (m)",
            x_limit: round_up_to_nearest_multiple(run.trace.final_time(), 1.0),
            y_limit: round_up_to_nearest_multiple(run.trace.final_displacement(), 10.0),
            legend: format!("Time elapsed: {:.3}s", run.report.elapsed_time),
            colour: GREEN,
            points: run.trace.points()
        }
    }

    fn draw(self, area: &DrawingArea<BitMapBackend, Shift>) -> DrawResult {
        let font = FontDesc::new(FontFamily::Name("sans-serif"), 18.0, FontStyle::Normal);
        let mut context = ChartBuilder::on(area)
            .margin(15)
            .caption(&self.caption, font.color(&WHITE))
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .build_cartesian_2d(0f64..self.x_limit, 0f64..self.y_limit)?;

        context
            .configure_mesh()
            .x_desc(self.x_desc)
            .y_desc(self.y_desc)
            .label_style(&WHITE)
            .bold_line_style(&WHITE.mix(0.2))
            .light_line_style(&WHITE.mix(0.1))
            .draw()?;

        let colour = self.colour;
        context
            .draw_series(LineSeries::new(self.points, &colour))?
            .label(self.legend)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &colour));

        context
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .label_font(&WHITE)
            .background_style(&BLACK.mix(0.8))
            .border_style(&WHITE)
            .draw()?;
        Ok(())
    }
}

/// Draw the torque, power and displacement charts for a run into
/// `<graphs_folder>/<label>.png`, replacing any previous image
pub fn render_motor_run(run: &MotorRun, graphs_folder: &Path) -> Result<PathBuf, AppError> {
    ensure_dir(graphs_folder)?;
    let path = safe_filename_in_path(graphs_folder, run.motor.label(), "png");
    draw_motor_run(run, &path).map_err(|e| {
        AppError::PlotError(path.display().to_string(), e.to_string())
    })?;
    info!("Wrote graphs for {} to {}", run.motor.label(), path.display());
    Ok(path)
}

fn draw_motor_run(run: &MotorRun, path: &Path) -> DrawResult {
    let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&BLACK)?;
    let areas = root.split_evenly((3, 1));
    LineChart::torque(run).draw(&areas[0])?;
    LineChart::power(run).draw(&areas[1])?;
    LineChart::displacement(run).draw(&areas[2])?;
    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use powertrain::{MotorCurveModel, SimulationParams, VehicleModel};
    use super::*;

    fn reference_run() -> MotorRun {
        let motor = MotorCurveModel::new("reference", 1000.0, 200.0, 20.0, 4000.0, 40.0, 8000.0).unwrap();
        let car = VehicleModel::new(4.35, 240.0, 4709.0, 0.225, 0.728, 2.0).unwrap();
        MotorRun::simulate(&motor, &car, &SimulationParams::default()).unwrap()
    }

    #[test]
    fn chart_labels() {
        let run = reference_run();
        let torque = LineChart::torque(&run);
        assert_eq!(torque.caption, "Torque curve --- Max speed: 1000.00 rad/s (9549 RPM)");
        assert_eq!(torque.legend, "Peak torque: 40.00 Nm");
        assert_eq!(LineChart::power(&run).legend, "Peak power: 8000.00 W");
        assert_eq!(LineChart::power(&run).caption,
                   "Power curve --- Torque/power transition speed: 200.00 rad/s");
        let displacement = LineChart::displacement(&run);
        assert_eq!(displacement.legend, "Time elapsed: 8.570s");
        assert!(displacement.caption.ends_with("Motor: reference"));
    }

    #[test]
    fn axes_contain_the_data() {
        let run = reference_run();
        for chart in [LineChart::torque(&run), LineChart::power(&run), LineChart::displacement(&run)] {
            assert_eq!(chart.points.is_empty(), false);
            assert!(chart.points.iter().all(|(x, y)| *x <= chart.x_limit && *y <= chart.y_limit),
                    "{} doesn't fit its axes", chart.caption);
        }
        assert_eq!(LineChart::displacement(&run).x_limit, 9.0);
        assert_eq!(LineChart::displacement(&run).y_limit, 80.0);
    }
}
