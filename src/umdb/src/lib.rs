//! # umdb
//!
//! Master data export for the training companion client.
//!
//! This library reads a `master.mdb` snapshot and produces one versioned
//! document containing:
//! - Characters (with inlined training icons), cards, support cards
//! - Succession relations and their members
//! - Race instances, wins saddles, and special-case races
//! - Skills, team stadium score bonus labels, story labels
//! - Live squares with curated annotations
//!
//! The document is written twice: gzip-compressed protobuf for the client,
//! and pretty-printed JSON for diffing between versions.
//!
//! ## Example
//!
//! ```no_run
//! use umdb::{build_document, write_artifacts, ArtifactPaths, ExportOptions, MasterDb};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let db = MasterDb::open("master.mdb")?;
//! let options = ExportOptions {
//!     version: "10004000".to_string(),
//!     ..Default::default()
//! };
//!
//! let doc = build_document(&db, &options)?;
//! write_artifacts(&doc, &ArtifactPaths::default())?;
//! # Ok(())
//! # }
//! ```

pub mod annotations;
pub mod db;
pub mod document;
pub mod error;
pub mod extract;
pub mod icon;
pub mod model;
pub mod output;

#[cfg(test)]
mod testing;

#[doc(inline)]
pub use db::{MasterDb, DEFAULT_DB_PATH};
#[doc(inline)]
pub use document::{build_document, DocumentSummary, ExportOptions, DEFAULT_VERSION};
#[doc(inline)]
pub use error::{ExportError, Result};
#[doc(inline)]
pub use extract::SchemaVersion;
#[doc(inline)]
pub use icon::{IconEmbedder, DEFAULT_ICON_DIR};
#[doc(inline)]
pub use model::UmDatabase;
#[doc(inline)]
pub use output::{
    decode_binary, decode_json, encode_binary, encode_json, read_artifacts, write_artifacts,
    ArtifactPaths, DEFAULT_OUT_DIR,
};
