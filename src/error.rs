use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors produced while loading fonts or writing reports.
///
/// Building alternates never fails; these only come from the I/O surfaces.
#[derive(Debug, Error)]
pub enum AlternatesError {
    #[error("Unknown file type for file {path:?}")]
    /// The file type is unknown
    UnknownFileType {
        /// The path of the file
        path: PathBuf,
    },

    #[error("IO Error: {0}")]
    /// IO error
    IO(#[from] io::Error),

    #[error("Error parsing font model: {0}")]
    /// The font model JSON was malformed
    Json(#[from] serde_json::Error),
}
