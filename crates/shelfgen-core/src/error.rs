//! Error types for the shelfgen-core library.
//!
//! Encoding never fails on generator-produced values, so most variants here
//! describe I/O on the output artifacts or problems found while reading an
//! artifact back for verification.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for shelfgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all shelfgen operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to read an artifact back from disk
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an output artifact
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        /// Path to the file that failed to write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the output directory
    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreate {
        /// Path to the directory that failed to create
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A record carried a value outside the domain of its wire field
    #[error("field {field} of {message} cannot encode value {value}")]
    FieldOutOfRange {
        /// Message type being composed
        message: &'static str,
        /// Field number in the schema
        field: u32,
        /// The rejected value
        value: i64,
    },

    /// gzip stream could not be produced or read
    #[error("compression failed: {0}")]
    Compression(#[source] std::io::Error),

    /// Invalid protobuf wire format
    #[error("invalid protobuf wire format at offset {offset}: {details}")]
    InvalidWireFormat {
        /// Byte offset where the error occurred
        offset: usize,
        /// Detailed description of the issue
        details: String,
    },

    /// Failed to decode varint
    #[error("failed to decode varint at offset {offset}: buffer too small or invalid encoding")]
    VarintDecode {
        /// Byte offset where the error occurred
        offset: usize,
    },

    /// Backup bytes were not accepted by the mirror schema
    #[error("failed to decode backup: {0}")]
    Decode(#[from] prost::DecodeError),

    /// Compressed and raw artifacts do not hold the same backup
    #[error("artifact mismatch: {0}")]
    ArtifactMismatch(String),
}

impl Error {
    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new file write error
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a new directory creation error
    pub fn directory_create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryCreate {
            path: path.into(),
            source,
        }
    }

    /// Creates a new out-of-range field error
    pub fn field_out_of_range(message: &'static str, field: u32, value: i64) -> Self {
        Self::FieldOutOfRange {
            message,
            field,
            value,
        }
    }

    /// Creates a new wire format error
    pub fn invalid_wire_format(offset: usize, details: impl Into<String>) -> Self {
        Self::InvalidWireFormat {
            offset,
            details: details.into(),
        }
    }

    /// Creates a new varint decode error
    pub fn varint_decode(offset: usize) -> Self {
        Self::VarintDecode { offset }
    }

    /// Creates a new artifact mismatch error
    pub fn artifact_mismatch(msg: impl Into<String>) -> Self {
        Self::ArtifactMismatch(msg.into())
    }

    /// Returns true if the error came from the file system rather than from
    /// the data itself
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Self::FileRead { .. } | Self::FileWrite { .. } | Self::DirectoryCreate { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::field_out_of_range("Chapter", 6, -5);
        assert!(err.to_string().contains("field 6 of Chapter"));
        assert!(err.to_string().contains("-5"));
    }

    #[test]
    fn test_is_io() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert!(Error::file_write("/tmp/out.bin", io).is_io());
        assert!(!Error::varint_decode(3).is_io());
    }
}
