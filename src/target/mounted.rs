// SPDX-License-Identifier: GPL-3.0-or-later
use anyhow::{anyhow, Context as _};
use tracing::debug;

use std::fs;
use std::path::{Component, Path, PathBuf};

use super::{ArtifactSource, StorageLayout};

/// A target whose storage is available as a local directory.
///
/// Remote paths are resolved relative to `root`, so `/sdcard/foo.png` is read from
/// `<root>/sdcard/foo.png`. This covers snapshots copied off a target ahead of time, as well as
/// filesystems mounted over the network.
#[derive(Clone, Debug, PartialEq)]
pub struct MountedSource {
    root: PathBuf,
    serial: String,
    layout: StorageLayout,
}

impl MountedSource {
    /// Create a new source for the storage rooted at `root`.
    ///
    /// If `layout` isn't given, it is chosen based on the serial number.
    pub fn new(root: PathBuf, serial: String, layout: Option<StorageLayout>) -> Self {
        let layout = layout.unwrap_or_else(|| StorageLayout::for_serial(&serial));
        Self {
            root,
            serial,
            layout,
        }
    }

    /// Map a path on the target to the local path.
    ///
    /// Only plain path components are allowed, so a remote path can't point outside of the root.
    fn local_path(&self, remote: &str) -> anyhow::Result<PathBuf> {
        let mut path = self.root.clone();
        for component in Path::new(remote).components() {
            match component {
                Component::RootDir | Component::CurDir => (),
                Component::Normal(part) => path.push(part),
                Component::ParentDir | Component::Prefix(_) => {
                    return Err(anyhow!("Invalid remote path {}", remote));
                }
            }
        }
        Ok(path)
    }
}

impl ArtifactSource for MountedSource {
    fn serial(&self) -> &str {
        &self.serial
    }

    fn layout(&self) -> StorageLayout {
        self.layout
    }

    fn exists(&self, remote: &str) -> anyhow::Result<bool> {
        let local = self.local_path(remote)?;
        let found = local.is_file();
        debug!(remote, local = %local.display(), found, "checked for file on target");
        Ok(found)
    }

    fn pull(&self, remote: &str, local: &Path) -> anyhow::Result<()> {
        let source = self.local_path(remote)?;
        fs::copy(&source, local).with_context(|| {
            format!(
                "Unable to copy {} to {}",
                source.display(),
                local.display()
            )
        })?;
        Ok(())
    }
}
