// SPDX-License-Identifier: GPL-3.0-or-later
use std::error::Error as StdError;
use std::fmt;

/// The ways a single comparison can fail before (or after) reaching a verdict.
///
/// None of these are fatal to the process. They are reported by the task that hit them, and the
/// task is counted as failed.
pub enum TaskError {
    /// The candidate image was never written on the target.
    MissingArtifact(String),

    /// The candidate image exists, but copying it off the target failed.
    Retrieval(anyhow::Error),

    /// One of the two images could not be decoded.
    Decode(anyhow::Error),

    /// The diff image could not be written.
    Serialization(anyhow::Error),
}

impl TaskError {
    /// A short, stable name for the error kind, used as a logging field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingArtifact(_) => "missing_artifact",
            Self::Retrieval(_) => "retrieval",
            Self::Decode(_) => "decode",
            Self::Serialization(_) => "serialization",
        }
    }
}

impl fmt::Debug for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MissingArtifact(p) => f.debug_tuple("MissingArtifact").field(p).finish(),
            Self::Retrieval(e) => f.debug_tuple("Retrieval").field(e).finish(),
            Self::Decode(e) => f.debug_tuple("Decode").field(e).finish(),
            Self::Serialization(e) => f.debug_tuple("Serialization").field(e).finish(),
        }
    }
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MissingArtifact(p) => write!(f, "File {} has not been saved on the target", p),
            Self::Retrieval(e) => write!(f, "Unable to retrieve candidate image: {:#}", e),
            Self::Decode(e) => write!(f, "Unable to decode image: {:#}", e),
            Self::Serialization(e) => write!(f, "Unable to save diff image: {:#}", e),
        }
    }
}

impl StdError for TaskError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::MissingArtifact(_) => None,
            Self::Retrieval(e) | Self::Decode(e) | Self::Serialization(e) => Some(&**e),
        }
    }
}

#[cfg(test)]
mod test {
    use super::TaskError;
    use anyhow::anyhow;
    use std::error::Error as _;

    #[test]
    fn missing_artifact_message() {
        let err = TaskError::MissingArtifact("/sdcard/cts-holo-assets/foo.png".to_string());
        assert_eq!(
            err.to_string(),
            "File /sdcard/cts-holo-assets/foo.png has not been saved on the target"
        );
        assert!(err.source().is_none());
        assert_eq!(err.kind(), "missing_artifact");
    }

    #[test]
    fn wrapped_source() {
        let err = TaskError::Decode(anyhow!("bad header"));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "Unable to decode image: bad header");
    }
}
