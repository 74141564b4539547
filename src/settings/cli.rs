// SPDX-License-Identifier: GPL-3.0-or-later
use structopt::StructOpt;

use std::path::PathBuf;

#[derive(Debug, Default, StructOpt)]
#[structopt(about = "Compare theme screenshots on a target against reference images.")]
pub struct Args {
    /// Path to a configuration file. Defaults to `config.toml`, which may be absent.
    #[structopt(short, long, parse(from_os_str))]
    pub config_path: Option<PathBuf>,

    /// Largest difference allowed in any channel of any pixel.
    #[structopt(short, long)]
    pub threshold: Option<u32>,

    /// Directory of reference images.
    #[structopt(short, long, parse(from_os_str))]
    pub references: Option<PathBuf>,

    /// Directory diff images are written to.
    #[structopt(short, long, parse(from_os_str))]
    pub output: Option<PathBuf>,

    /// Serial number of the target.
    #[structopt(short, long)]
    pub serial: Option<String>,

    /// Number of comparisons to run at once.
    #[structopt(short, long)]
    pub jobs: Option<usize>,

    /// Log more details. Can be repeated.
    #[structopt(short, long, parse(from_occurrences))]
    pub verbose: u8,
}
