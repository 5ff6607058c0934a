//! rustctl demo - analyze an element chain from the command line
//!
//! ```text
//! rustctl [SETUP_JSON_FILE] [SETTINGS_JSON_FILE]
//! ```
//!
//! Without a setup file a PI controller driving a second order plant is
//! analyzed. Set `RUST_LOG=info` (or `debug`) to see the engine's log.

use std::error::Error;
use std::process::ExitCode;

use log::{error, info};
use rustctl::types::{AnalysisSettings, ElementSetup, InputType};
use rustctl::{AnalysisReport, SimpleElements};

const DEFAULT_SETUP: &str = r#"[["PI", 2.0, 1.5], ["2", 1.0, 3.0, 0.4]]"#;

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);

    let setup = match args.next() {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEFAULT_SETUP.to_string(),
    };
    let settings = match args.next() {
        Some(path) => AnalysisSettings::from_json(&std::fs::read_to_string(path)?)?,
        None => AnalysisSettings::default(),
    };

    let chain = SimpleElements::from_setup(&ElementSetup::from_json(&setup)?)?;
    for element in chain.iter() {
        info!("{} {:?}", element.kind().name(), element.values());
    }

    let report = AnalysisReport::new(&chain, &settings, InputType::Step)?;

    println!("rustctl - Control Loop Analysis");
    println!("===============================\n");
    println!("Open loop:   {}", report.open_loop);
    println!("Closed loop: {}\n", report.closed_loop);

    match report.gain_margin {
        Some(margin) => println!(
            "Gain margin:  {:.2} dB at {:.4} rad/s",
            margin.margin(),
            margin.frequency
        ),
        None => println!("Gain margin:  none"),
    }
    match report.phase_margin {
        Some(margin) => println!(
            "Phase margin: {:.2} deg at {:.4} rad/s",
            margin.margin(),
            margin.frequency
        ),
        None => println!("Phase margin: none"),
    }
    match report.settling_time {
        Some(t) => println!("Settling time ({}%): {:.3} s", settings.settling_band * 100.0, t),
        None => println!("Not settled within {} s", settings.time.t_max),
    }

    println!("\n{}", report.to_json()?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
