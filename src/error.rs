use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::color::VertexId;

/** errors reported by the instance reader, the graph model and the exporters */
#[derive(Debug, Error)]
pub enum ColoringError {
    /// malformed instance description (line is 1-based, 0 when not tied to a line)
    #[error("format error (line {line}): {message}")]
    Format {
        /// line of the offending input
        line: usize,
        /// what went wrong
        message: String,
    },
    /// weight queried on a pair of vertices that are not adjacent
    #[error("no edge between vertices {u} and {v}")]
    InvalidEdge {
        /// first endpoint
        u: VertexId,
        /// second endpoint
        v: VertexId,
    },
    /// parameter out of its valid range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// unable to read or write a file
    #[error("i/o error on {path:?}: {source}")]
    Io {
        /// file involved
        path: PathBuf,
        /// underlying error
        #[source]
        source: io::Error,
    },
    /// unable to serialize an export
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ColoringError {
    /// builds a format error located at `line`
    pub fn format<S:Into<String>>(line:usize, message:S) -> Self {
        ColoringError::Format { line, message: message.into() }
    }

    /// wraps an i/o error with the path it occurred on
    pub fn io<P:Into<PathBuf>>(path:P, source:io::Error) -> Self {
        ColoringError::Io { path: path.into(), source }
    }
}

/// result type of the crate
pub type Result<T> = std::result::Result<T, ColoringError>;
