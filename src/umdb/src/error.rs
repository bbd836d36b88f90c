//! Error type for the export pipeline.

use std::path::PathBuf;

/// Errors that abort an export run
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to open master database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Query failed ({context}): {source}")]
    Query {
        context: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Succession member {member_id} references unknown relation type {relation_type}")]
    OrphanRelationMember { member_id: i32, relation_type: i32 },

    #[error("Protobuf encoding failed: {0}")]
    Encode(#[from] prost::EncodeError),

    #[error("Protobuf decoding failed: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;
