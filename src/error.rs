// Error types shared across the version manager core

use thiserror::Error;

/// Failure taxonomy for the resolution/installation core.
///
/// Everything here is reported to the user as a message; only `Io` wraps
/// conditions (permissions, disk full) that were not anticipated by the
/// design.
#[derive(Debug, Error)]
pub enum GdError {
    #[error("invalid version '{input}': {reason}")]
    Format { input: String, reason: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response from the GitHub API, with the `message` field of
    /// the error body when one was provided.
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("no release matches version '{0}'")]
    NoMatchingVersion(String),

    #[error(
        "multiple releases match: {}. Narrow the version or pass --latest",
        .0.join(", ")
    )]
    AmbiguousVersion(Vec<String>),

    #[error("release '{tag}' has no download matching the requested platform criteria")]
    NoMatchingAsset { tag: String },

    #[error(
        "release '{tag}' has multiple downloads matching the requested criteria: {}",
        .names.join(", ")
    )]
    AmbiguousAsset { tag: String, names: Vec<String> },

    #[error("download of {url} failed with HTTP status {status}")]
    Download { url: String, status: u16 },

    #[error("architecture {architecture} is not supported on {platform}")]
    UnsupportedArchitecture {
        platform: &'static str,
        architecture: &'static str,
    },

    #[error("cannot find executable file in version directory {0}")]
    ExecutableNotFound(String),

    #[error("version directory '{name}' does not match the expected format: {reason}")]
    DirectoryName { name: String, reason: String },

    #[error("failed to update the active version pointer: {0}")]
    Activation(String),

    #[error("cannot uninstall {0} because it is currently active. Install or activate another version first")]
    UninstallActive(String),

    #[error("multiple versions can only be uninstalled with the --force or --unused options: {}", .0.join(", "))]
    UninstallAmbiguous(Vec<String>),

    #[error("archive entry '{0}' escapes the target directory")]
    UnsafeArchivePath(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, GdError>;
