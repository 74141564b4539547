// SPDX-License-Identifier: GPL-3.0-or-later
use anyhow::Context as _;
use structopt::StructOpt;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use std::convert::TryFrom;
use std::process;

use holo_diff::runner::{self, Report, Runner};
use holo_diff::settings::{Args, Settings};
use holo_diff::target::ArtifactSource;

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> anyhow::Result<Report> {
    let settings = Settings::load(args).context("Error loading settings")?;
    let source = Box::<dyn ArtifactSource>::try_from(&settings.target)
        .context("Error configuring target")?;
    let tasks = runner::discover(&settings.references)?;
    let runner = Runner::new(source, settings.task_settings(), settings.jobs)?;
    Ok(runner.run(&tasks))
}

fn main() {
    let args = Args::from_args();
    init_tracing(args.verbose);
    match run(&args) {
        Ok(report) => {
            for name in report.failed.iter() {
                error!(name = %name, "comparison failed");
            }
            info!(
                "{} of {} images matched",
                report.passed.len(),
                report.total()
            );
            if !report.is_success() {
                process::exit(1);
            }
        }
        Err(e) => {
            error!("{:?}", e);
            process::exit(2);
        }
    }
}
