mod cli;

use std::fs;
use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use csvdrive_importer_core::{generate, MemoryHost, Report, ReportLevel};

use crate::cli::Args;

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .init();

    match run(&args) {
        Ok(report) if report.level == ReportLevel::Info => {
            println!("{}", report.message);
            ExitCode::SUCCESS
        }
        Ok(report) => {
            eprintln!("error: {}", report.message);
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Load the scene, run one import and write the keyframe log if requested.
fn run(args: &Args) -> Result<Report> {
    let config = args.import_config()?;
    let scene_text = fs::read_to_string(&args.scene)
        .with_context(|| format!("failed to read scene {}", args.scene.display()))?;
    let mut host = MemoryHost::from_json(&scene_text)
        .with_context(|| format!("failed to parse scene {}", args.scene.display()))?;
    if host.project_dir.is_none() {
        host.project_dir = args.project_dir();
    }

    let outcome = generate(&config, &mut host);
    let report = Report::from_outcome(&outcome);
    info!("{:?}: {}", report.level, report.message);

    if let Some(out) = &args.keyframes_out {
        let json = serde_json::to_string_pretty(&host.keyframes)?;
        if out.as_os_str() == "-" {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        } else {
            fs::write(out, json)
                .with_context(|| format!("failed to write keyframes to {}", out.display()))?;
        }
    }
    Ok(report)
}
