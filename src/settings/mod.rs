// SPDX-License-Identifier: GPL-3.0-or-later
use anyhow::Context as _;
use serde::Deserialize;
use tracing::debug;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

mod cli;
mod target;

use crate::compare::DEFAULT_THRESHOLD;
use crate::render::Palette;
use crate::task::TaskSettings;
pub use cli::Args;
pub use target::{TargetKind, TargetSettings};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Deserialize, PartialEq)]
pub struct Settings {
    /// The largest difference allowed in any channel of any pixel. Defaults to 2.
    #[serde(default = "Settings::default_threshold")]
    pub threshold: u32,

    /// Directory of reference images. Defaults to `references`.
    #[serde(default = "Settings::default_references")]
    pub references: PathBuf,

    /// Directory diff images are written to.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Directory candidate images are copied into while being compared.
    #[serde(default)]
    pub scratch: Option<PathBuf>,

    /// Number of comparisons to run at once, 0 to use one per CPU.
    #[serde(default)]
    pub jobs: usize,

    /// The target images are rendered on.
    #[serde(default)]
    pub target: TargetSettings,

    /// Colors used in diff images.
    #[serde(default)]
    pub palette: Palette,
}

impl Settings {
    fn default_threshold() -> u32 {
        DEFAULT_THRESHOLD
    }

    fn default_references() -> PathBuf {
        PathBuf::from("references")
    }

    /// Load settings from the config file named in `args`, then apply any overrides in `args`.
    ///
    /// If no config file was given and the default one doesn't exist, the defaults are used.
    pub fn load(args: &Args) -> anyhow::Result<Self> {
        let (path, required) = match &args.config_path {
            Some(path) => (path.as_path(), true),
            None => (Path::new(DEFAULT_CONFIG_PATH), false),
        };
        let mut settings = match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("Unable to parse {}", path.display()))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
                debug!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Unable to read {}", path.display()));
            }
        };
        settings.apply_args(args);
        Ok(settings)
    }

    fn apply_args(&mut self, args: &Args) {
        if let Some(threshold) = args.threshold {
            self.threshold = threshold;
        }
        if let Some(references) = &args.references {
            self.references = references.clone();
        }
        if let Some(output) = &args.output {
            self.output = Some(output.clone());
        }
        if let Some(serial) = &args.serial {
            self.target.serial = serial.clone();
        }
        if let Some(jobs) = args.jobs {
            self.jobs = jobs;
        }
    }

    /// The per-comparison subset of these settings.
    pub fn task_settings(&self) -> TaskSettings {
        TaskSettings {
            threshold: self.threshold,
            palette: self.palette,
            output: self.output.clone(),
            scratch: self.scratch.clone(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            threshold: Self::default_threshold(),
            references: Self::default_references(),
            output: None,
            scratch: None,
            jobs: 0,
            target: TargetSettings::default(),
            palette: Palette::default(),
        }
    }
}
