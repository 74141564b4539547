// SPDX-License-Identifier: GPL-3.0-or-later
use anyhow::Context as _;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, warn};

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use crate::target::ArtifactSource;
use crate::task::{ComparisonTask, TaskSettings};

/// Create a task for every PNG in `directory`, named by the file's stem.
///
/// Tasks are sorted by name. Subdirectories and other files are ignored.
pub fn discover(directory: &Path) -> anyhow::Result<Vec<ComparisonTask>> {
    let entries = fs::read_dir(directory)
        .with_context(|| format!("Unable to list references in {}", directory.display()))?;
    let mut tasks = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Unable to list references in {}", directory.display()))?
            .path();
        let is_png = path
            .extension()
            .and_then(OsStr::to_str)
            .map_or(false, |ext| ext.eq_ignore_ascii_case("png"));
        if !path.is_file() || !is_png {
            continue;
        }
        match path.file_stem().and_then(OsStr::to_str) {
            Some(name) => tasks.push(ComparisonTask::new(name.to_string(), path.clone())),
            None => warn!(path = %path.display(), "skipping reference with a non-UTF-8 name"),
        }
    }
    tasks.sort_by(|l, r| l.name().cmp(r.name()));
    debug!(count = tasks.len(), "discovered reference images");
    Ok(tasks)
}

/// The outcome of a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    /// Names of the images that matched their reference.
    pub passed: Vec<String>,

    /// Names of the images that didn't match, or couldn't be compared.
    pub failed: Vec<String>,
}

impl Report {
    /// `true` if every comparison passed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.passed.len() + self.failed.len()
    }
}

/// Runs comparisons in parallel against a single target.
pub struct Runner<S> {
    source: S,
    settings: TaskSettings,
    pool: ThreadPool,
}

impl<S: ArtifactSource> Runner<S> {
    /// Create a runner with `jobs` worker threads. When `jobs` is 0, rayon picks the number of
    /// threads (usually the number of CPUs).
    pub fn new(source: S, settings: TaskSettings, jobs: usize) -> anyhow::Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(jobs)
            .thread_name(|index| format!("compare-{}", index))
            .build()
            .context("Unable to create comparison thread pool")?;
        let palette = &settings.palette;
        debug!(
            threshold = settings.threshold,
            background = %palette.background,
            mismatch = %palette.mismatch,
            only_first = %palette.only_first,
            only_second = %palette.only_second,
            neither = %palette.neither,
            "comparison settings"
        );
        Ok(Self {
            source,
            settings,
            pool,
        })
    }

    /// Run every task, returning which ones passed and failed.
    ///
    /// Tasks don't depend on each other, so they are run in no particular order. The names in the
    /// report keep the order the tasks were given in.
    pub fn run(&self, tasks: &[ComparisonTask]) -> Report {
        info!(
            count = tasks.len(),
            threads = self.pool.current_num_threads(),
            serial = self.source.serial(),
            "starting comparisons"
        );
        let results: Vec<(&str, bool)> = self.pool.install(|| {
            tasks
                .par_iter()
                .map(|task| (task.name(), task.run(&self.source, &self.settings)))
                .collect()
        });
        let mut report = Report::default();
        for (name, matched) in results {
            if matched {
                report.passed.push(name.to_string());
            } else {
                report.failed.push(name.to_string());
            }
        }
        info!(
            passed = report.passed.len(),
            failed = report.failed.len(),
            "finished comparisons"
        );
        report
    }
}
