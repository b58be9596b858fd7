use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crosswind_sim::gnc::ControlMode;
use crosswind_sim::sim::{compare_strategies, RunResult};
use crosswind_sim::SimulationConfig;

fn main() -> eframe::Result {
    tracing_subscriber::fmt().with_target(false).init();

    let config = SimulationConfig::default();
    let runs = match compare_strategies(&config, &ControlMode::ALL) {
        Ok(runs) => runs,
        Err(e) => {
            eprintln!("simulation failed: {e}");
            std::process::exit(1);
        }
    };

    let app = DriftViz { runs, config };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Crosswind Drift", options, Box::new(|_| Ok(Box::new(app))))
}

struct DriftViz {
    runs: Vec<(ControlMode, RunResult)>,
    config: SimulationConfig,
}

impl eframe::App for DriftViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Aircraft: {}", self.config.aircraft_model));
            ui.label(format!(
                "Wind: {:.1} m/s from {:.0} deg  |  Turbulence: {:.2}  |  Airspeed: {:.0} kts  |  Track: {:.0} deg",
                self.config.crosswind_speed,
                self.config.crosswind_direction,
                self.config.turbulence,
                self.config.init_airspeed,
                self.config.controller.target_heading_deg,
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let full_h = available.y - 24.0;

            ui.horizontal(|ui| {
                // Lateral deviation vs Time
                ui.vertical(|ui| {
                    ui.label("Lateral deviation (m)");
                    Plot::new("lateral")
                        .width(half_w)
                        .height(full_h)
                        .x_axis_label("Time (s)")
                        .legend(Legend::default())
                        .show(ui, |plot_ui| {
                            for (mode, run) in &self.runs {
                                let points: PlotPoints = run
                                    .rows
                                    .iter()
                                    .map(|r| [r.time_s, r.lateral_deviation_m])
                                    .collect();
                                plot_ui.line(Line::new(mode.as_str(), points));
                            }
                        });
                });

                // Track-frame ground track
                ui.vertical(|ui| {
                    ui.label("Ground track (m)");
                    Plot::new("ground_track")
                        .width(half_w)
                        .height(full_h)
                        .x_axis_label("Lateral (m)")
                        .legend(Legend::default())
                        .data_aspect(1.0)
                        .show(ui, |plot_ui| {
                            for (mode, run) in &self.runs {
                                let points: PlotPoints = run
                                    .rows
                                    .iter()
                                    .map(|r| [r.lateral_deviation_m, r.along_track_m])
                                    .collect();
                                plot_ui.line(Line::new(mode.as_str(), points));
                            }
                        });
                });
            });
        });
    }
}
