// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::Path;

mod adb;
mod layout;
mod mounted;

pub use adb::AdbSource;
pub use layout::StorageLayout;
pub use mounted::MountedSource;

/// Something rendered images can be copied off of.
///
/// Sources are shared between all comparisons running at the same time, so implementations must
/// not assume calls are made one at a time.
pub trait ArtifactSource: Send + Sync {
    /// The serial number identifying the target.
    fn serial(&self) -> &str;

    /// Where rendered images are stored on this target.
    fn layout(&self) -> StorageLayout;

    /// Check if a file exists on the target.
    fn exists(&self, remote: &str) -> anyhow::Result<bool>;

    /// Copy a file from the target to a local path, overwriting anything already there.
    fn pull(&self, remote: &str, local: &Path) -> anyhow::Result<()>;
}

impl<T: ArtifactSource + ?Sized> ArtifactSource for Box<T> {
    fn serial(&self) -> &str {
        (**self).serial()
    }

    fn layout(&self) -> StorageLayout {
        (**self).layout()
    }

    fn exists(&self, remote: &str) -> anyhow::Result<bool> {
        (**self).exists(remote)
    }

    fn pull(&self, remote: &str, local: &Path) -> anyhow::Result<()> {
        (**self).pull(remote, local)
    }
}
