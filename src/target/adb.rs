// SPDX-License-Identifier: GPL-3.0-or-later
use anyhow::{anyhow, Context as _};
use tracing::{debug, trace};

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use super::{ArtifactSource, StorageLayout};

/// A target reached through the Android Debug Bridge.
#[derive(Clone, Debug, PartialEq)]
pub struct AdbSource {
    program: PathBuf,
    serial: String,
    layout: StorageLayout,
}

/// Quote `arg` so the target's shell passes it through as a single word.
fn shell_quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}

impl AdbSource {
    /// Create a new source for the target with the given serial.
    ///
    /// If `layout` isn't given, it is chosen based on the serial number.
    pub fn new(program: PathBuf, serial: String, layout: Option<StorageLayout>) -> Self {
        let layout = layout.unwrap_or_else(|| StorageLayout::for_serial(&serial));
        Self {
            program,
            serial,
            layout,
        }
    }

    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.program);
        command.arg("-s").arg(&self.serial).args(args);
        command
    }

    fn run(&self, mut command: Command) -> anyhow::Result<Output> {
        trace!(?command, "running adb");
        command
            .output()
            .with_context(|| format!("Unable to run {}", self.program.display()))
    }
}

impl ArtifactSource for AdbSource {
    fn serial(&self) -> &str {
        &self.serial
    }

    fn layout(&self) -> StorageLayout {
        self.layout
    }

    fn exists(&self, remote: &str) -> anyhow::Result<bool> {
        // `ls` exits successfully on older shells even when the file is missing, so look at the
        // output as well. The arguments are joined and run by the target's shell.
        let quoted = shell_quote(remote);
        let output = self.run(self.command(&["shell", "ls", &quoted]))?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let found = output.status.success()
            && stdout.lines().any(|line| line.trim() == remote);
        debug!(remote, found, "checked for file on target");
        Ok(found)
    }

    fn pull(&self, remote: &str, local: &Path) -> anyhow::Result<()> {
        let mut command = self.command(&["pull", remote]);
        command.arg(local);
        let output = self.run(command)?;
        if output.status.success() {
            Ok(())
        } else {
            Err(anyhow!(
                "adb pull of {} failed ({}): {}",
                remote,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ))
        }
    }
}
