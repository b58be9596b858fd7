use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crosswind_sim::gnc::ControlMode;
use crosswind_sim::io::{csv, json, DeviationSummary};
use crosswind_sim::sim::{compare_strategies, sweep_wind_speeds, RunResult};
use crosswind_sim::SimulationConfig;

#[derive(Parser, Debug)]
#[command(name = "crosswind-sim")]
#[command(about = "Crosswind drift simulator: compares pilot correction strategies")]
#[command(version)]
struct Args {
    /// JSON scenario file; CLI flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write per-strategy CSV history and JSON summary here
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Run only this strategy instead of all four
    #[arg(short, long)]
    mode: Option<ControlMode>,

    // ── Scenario overrides ────────────────────────────────────
    #[arg(long)]
    aircraft: Option<String>,

    #[arg(long)]
    wind_speed: Option<f64>, // m/s

    #[arg(long)]
    wind_from: Option<f64>, // deg

    #[arg(long)]
    turbulence: Option<f64>,

    #[arg(long)]
    airspeed: Option<f64>, // kts

    #[arg(long)]
    altitude: Option<f64>, // ft

    #[arg(long)]
    heading: Option<f64>, // deg

    #[arg(long)]
    dt: Option<f64>,

    #[arg(long)]
    duration: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Also sweep these wind speeds (m/s, comma separated) for the selected mode
    #[arg(long, value_delimiter = ',')]
    sweep: Vec<f64>,

    /// Log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn scenario(&self) -> Result<SimulationConfig> {
        let mut c = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SimulationConfig::default(),
        };
        if let Some(v) = &self.aircraft { c.aircraft_model = v.clone(); }
        if let Some(v) = self.wind_speed { c.crosswind_speed = v; }
        if let Some(v) = self.wind_from { c.crosswind_direction = v; }
        if let Some(v) = self.turbulence { c.turbulence = v; }
        if let Some(v) = self.airspeed { c.init_airspeed = v; }
        if let Some(v) = self.altitude { c.init_altitude = v; }
        if let Some(v) = self.heading { c.controller.target_heading_deg = v; }
        if let Some(v) = self.dt { c.dt = v; }
        if let Some(v) = self.duration { c.duration = v; }
        if self.seed.is_some() { c.seed = self.seed; }
        if let Some(m) = self.mode { c.controller.mode = m; }
        c.validate().context("invalid scenario")?;
        Ok(c)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let config = args.scenario()?;
    let modes: Vec<ControlMode> = match args.mode {
        Some(m) => vec![m],
        None => ControlMode::ALL.to_vec(),
    };

    // -----------------------------------------------------------------------
    // Run strategies
    // -----------------------------------------------------------------------
    let results = compare_strategies(&config, &modes)?;

    print_scenario(&config);
    print_comparison(&results);

    if let Some(dir) = &args.output_dir {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        for (mode, run) in &results {
            let stem = mode.as_str().to_lowercase();
            let csv_path = dir.join(format!("{stem}.csv"));
            let json_path = dir.join(format!("{stem}.json"));
            let mut c = config.clone();
            c.controller.mode = *mode;
            csv::write_history_file(&csv_path, &run.rows)
                .with_context(|| format!("writing {}", csv_path.display()))?;
            json::write_summary_file(&json_path, &c, run)
                .with_context(|| format!("writing {}", json_path.display()))?;
            info!(csv = %csv_path.display(), json = %json_path.display(), "wrote run output");
        }
    }

    // -----------------------------------------------------------------------
    // Optional wind sweep
    // -----------------------------------------------------------------------
    if !args.sweep.is_empty() {
        let sweep = sweep_wind_speeds(&config, &args.sweep)?;
        print_sweep(&config, &sweep);
    }

    Ok(())
}

fn print_scenario(c: &SimulationConfig) {
    println!();
    println!("====================================================================");
    println!("  CROSSWIND DRIFT SIMULATION - {}", c.aircraft_model);
    println!("====================================================================");
    println!();
    println!("  Scenario");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Wind:          {:>8.1} m/s   from:         {:>8.0} deg",
        c.crosswind_speed, c.crosswind_direction
    );
    println!(
        "  Turbulence:    {:>8.2}       Track:        {:>8.0} deg",
        c.turbulence, c.controller.target_heading_deg
    );
    println!(
        "  Airspeed:      {:>8.0} kts   Altitude:     {:>8.0} ft",
        c.init_airspeed, c.init_altitude
    );
    println!(
        "  dt:            {:>8.3} s     Duration:     {:>8.0} s",
        c.dt, c.duration
    );
    println!();
}

fn print_comparison(results: &[(ControlMode, RunResult)]) {
    println!("  Strategy Comparison");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:<16}  {:>9}  {:>9}  {:>9}  {:>7}  {:>6}",
        "mode", "final (m)", "max (m)", "rms (m)", "ail max", "status"
    );
    println!("  {}", "─".repeat(64));

    for (mode, run) in results {
        let s = DeviationSummary::from_history(&run.rows);
        let status = if run.truncated { "TRUNC" } else { "OK" };
        println!(
            "  {:<16}  {:>9.1}  {:>9.1}  {:>9.1}  {:>7.2}  {:>6}",
            mode.as_str(),
            s.final_lateral_m,
            s.max_abs_lateral_m,
            s.rms_lateral_m,
            s.max_abs_aileron,
            status
        );
        if run.truncated {
            println!("      -> {:?}", run.termination_reason);
        }
    }
    println!();
}

fn print_sweep(c: &SimulationConfig, sweep: &[(f64, RunResult)]) {
    println!("  Wind Sweep ({})", c.controller.mode);
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  {:>10}  {:>12}  {:>12}", "wind (m/s)", "final (m)", "max (m)");
    println!("  {}", "─".repeat(40));
    for (speed, run) in sweep {
        println!(
            "  {:>10.1}  {:>12.1}  {:>12.1}",
            speed,
            run.final_lateral_m().unwrap_or(0.0),
            run.max_abs_lateral_m()
        );
    }
    println!("====================================================================");
    println!();
}
