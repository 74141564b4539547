// SPDX-License-Identifier: GPL-3.0-or-later
use serde::Deserialize;

/// Where rendered images are stored on a target.
///
/// Emulators and physical devices mount shared storage at different paths.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StorageLayout {
    Emulator,
    Device,
}

impl StorageLayout {
    const EMULATOR_PREFIX: &'static str = "emulator-";

    const EMULATOR_DIRECTORY: &'static str = "/sdcard/cts-holo-assets";

    const DEVICE_DIRECTORY: &'static str = "/storage/emulated/legacy/cts-holo-assets";

    /// Pick a layout based on a target's serial number.
    pub fn for_serial(serial: &str) -> Self {
        if serial.starts_with(Self::EMULATOR_PREFIX) {
            Self::Emulator
        } else {
            Self::Device
        }
    }

    /// The directory rendered images are written to.
    pub fn directory(&self) -> &'static str {
        match self {
            Self::Emulator => Self::EMULATOR_DIRECTORY,
            Self::Device => Self::DEVICE_DIRECTORY,
        }
    }

    /// The full path on the target of the rendered image with the given name.
    pub fn remote_path(&self, name: &str) -> String {
        format!("{}/{}.png", self.directory(), name)
    }
}
