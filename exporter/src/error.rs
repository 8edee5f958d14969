//! Error types for the fatal stages of an export run.
//!
//! Remote-call failures are deliberately absent: the exporter reports them as
//! [`crate::exporter::ExportOutcome::Failed`] instead of an error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// The profile file could not be read.
    #[error("failed to read profile from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a valid protobuf encoding of a profile record.
    #[error("failed to decode profile: {0}")]
    Decode(#[from] prost::DecodeError),

    /// The target cannot be turned into a plaintext gRPC endpoint.
    #[error("invalid target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T, E = ExportError> = std::result::Result<T, E>;
