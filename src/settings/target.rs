// SPDX-License-Identifier: GPL-3.0-or-later
use anyhow::anyhow;
use serde::Deserialize;

use std::convert::TryFrom;
use std::path::PathBuf;

use crate::target::{AdbSource, ArtifactSource, MountedSource, StorageLayout};

/// How the target's storage is reached.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Pull files with `adb`.
    Adb,

    /// Read files from a local directory.
    Mounted,
}

impl Default for TargetKind {
    fn default() -> Self {
        Self::Adb
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TargetSettings {
    /// The target's serial number. Defaults to the first emulator, `emulator-5554`.
    #[serde(default = "TargetSettings::default_serial")]
    pub serial: String,

    #[serde(default)]
    pub kind: TargetKind,

    /// Override the storage layout normally chosen from the serial number.
    #[serde(default)]
    pub layout: Option<StorageLayout>,

    /// The `adb` executable. Defaults to finding `adb` on the `PATH`.
    #[serde(default = "TargetSettings::default_adb")]
    pub adb: PathBuf,

    /// The local directory standing in for the target's storage. Required when `kind` is
    /// `mounted`.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

impl TargetSettings {
    fn default_serial() -> String {
        "emulator-5554".to_string()
    }

    fn default_adb() -> PathBuf {
        PathBuf::from("adb")
    }
}

impl Default for TargetSettings {
    fn default() -> Self {
        Self {
            serial: Self::default_serial(),
            kind: TargetKind::default(),
            layout: None,
            adb: Self::default_adb(),
            root: None,
        }
    }
}

impl TryFrom<&TargetSettings> for Box<dyn ArtifactSource> {
    type Error = anyhow::Error;

    fn try_from(settings: &TargetSettings) -> anyhow::Result<Self> {
        let serial = settings.serial.clone();
        match settings.kind {
            TargetKind::Adb => Ok(Box::new(AdbSource::new(
                settings.adb.clone(),
                serial,
                settings.layout,
            ))),
            TargetKind::Mounted => {
                let root = settings
                    .root
                    .clone()
                    .ok_or_else(|| anyhow!("'root' is required for mounted targets"))?;
                Ok(Box::new(MountedSource::new(root, serial, settings.layout)))
            }
        }
    }
}
