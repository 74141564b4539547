// SPDX-License-Identifier: GPL-3.0-or-later
use anyhow::Context as _;
use tempfile::{Builder, NamedTempFile};
use tracing::{debug, error, info, info_span};

use std::fs;
use std::path::{Path, PathBuf};

use crate::compare::{compare, DEFAULT_THRESHOLD};
use crate::error::TaskError;
use crate::image_buffer::{self, RasterImage};
use crate::render::{render_with, Palette};
use crate::target::ArtifactSource;

/// The settings shared by every comparison in a run.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskSettings {
    /// The largest difference allowed in any channel of any pixel.
    pub threshold: u32,

    /// Colors used for diff images.
    pub palette: Palette,

    /// The directory diff images are saved to. When not set, each diff is saved as a new file in
    /// the system temporary directory.
    pub output: Option<PathBuf>,

    /// The directory candidate images are copied into. Defaults to the system temporary directory.
    pub scratch: Option<PathBuf>,
}

impl Default for TaskSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            palette: Palette::default(),
            output: None,
            scratch: None,
        }
    }
}

/// Compares one rendered image on a target with its reference image.
#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonTask {
    name: String,
    reference: PathBuf,
}

impl ComparisonTask {
    /// Create a task for the image called `name` on the target, compared against the image file
    /// at `reference`.
    pub fn new(name: String, reference: PathBuf) -> Self {
        Self { name, reference }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reference(&self) -> &Path {
        &self.reference
    }

    /// Run the comparison, returning `true` if the images match.
    ///
    /// Any error along the way is logged and counted as a failed comparison. The copy of the
    /// candidate image is removed before returning, whatever the outcome.
    pub fn run(&self, source: &dyn ArtifactSource, settings: &TaskSettings) -> bool {
        let span = info_span!("compare", name = %self.name);
        let _enter = span.enter();
        match self.try_run(source, settings) {
            Ok(matched) => matched,
            Err(e) => {
                error!(kind = e.kind(), "{}", e);
                false
            }
        }
    }

    fn try_run(
        &self,
        source: &dyn ArtifactSource,
        settings: &TaskSettings,
    ) -> Result<bool, TaskError> {
        // Dropping this removes the file, so it's cleaned up on every return path.
        let scratch = self
            .scratch_file(settings.scratch.as_deref())
            .map_err(TaskError::Retrieval)?;
        let remote = source.layout().remote_path(&self.name);
        if !source.exists(&remote).map_err(TaskError::Retrieval)? {
            return Err(TaskError::MissingArtifact(remote));
        }
        source
            .pull(&remote, scratch.path())
            .map_err(TaskError::Retrieval)?;

        let reference = image_buffer::decode(&self.reference).map_err(TaskError::Decode)?;
        let candidate = image_buffer::decode(scratch.path()).map_err(TaskError::Decode)?;
        if compare(&reference, &candidate, settings.threshold) {
            debug!("images match");
            return Ok(true);
        }
        info!(
            reference = ?reference.dimensions(),
            candidate = ?candidate.dimensions(),
            "images do not match"
        );
        let diff = render_with(&reference, &candidate, &settings.palette);
        match self.save_diff(&diff, settings.output.as_deref()) {
            Ok(path) => info!(path = %path.display(), "Diff created"),
            // The images still don't match, even if the diff couldn't be saved.
            Err(e) => error!(kind = e.kind(), "{}", e),
        }
        Ok(false)
    }

    fn scratch_file(&self, directory: Option<&Path>) -> anyhow::Result<NamedTempFile> {
        let prefix = format!("gen_{}", self.name);
        let mut builder = Builder::new();
        builder.prefix(&prefix).suffix(".png");
        let file = match directory {
            Some(directory) => builder.tempfile_in(directory),
            None => builder.tempfile(),
        };
        file.context("Unable to create scratch file")
    }

    fn save_diff(&self, diff: &RasterImage, output: Option<&Path>) -> Result<PathBuf, TaskError> {
        let save = || -> anyhow::Result<PathBuf> {
            match output {
                Some(directory) => {
                    fs::create_dir_all(directory).with_context(|| {
                        format!("Unable to create directory {}", directory.display())
                    })?;
                    let path = directory.join(format!("diff_{}.png", self.name));
                    image_buffer::encode_png(diff, &path)?;
                    Ok(path)
                }
                None => {
                    let prefix = format!("diff_{}", self.name);
                    let file = Builder::new()
                        .prefix(&prefix)
                        .suffix(".png")
                        .tempfile()
                        .context("Unable to create diff file")?;
                    image_buffer::encode_png(diff, file.path())?;
                    let (_, path) = file.keep().context("Unable to keep diff file")?;
                    Ok(path)
                }
            }
        };
        save().map_err(TaskError::Serialization)
    }
}
