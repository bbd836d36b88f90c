//! CLI argument definitions for umdb-export

use clap::Parser;
use std::path::PathBuf;
use umdb::{SchemaVersion, DEFAULT_DB_PATH, DEFAULT_ICON_DIR, DEFAULT_OUT_DIR, DEFAULT_VERSION};

/// Snapshot layout selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SchemaArg {
    /// Snapshots without support card commands or live squares
    Legacy,
    #[default]
    Current,
}

impl From<SchemaArg> for SchemaVersion {
    fn from(arg: SchemaArg) -> Self {
        match arg {
            SchemaArg::Legacy => SchemaVersion::Legacy,
            SchemaArg::Current => SchemaVersion::Current,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "umdb-export")]
#[command(about = "Export master.mdb into the umdb client document", long_about = None)]
pub struct Cli {
    /// Path to the master data snapshot
    #[arg(
        long = "db_path",
        visible_alias = "db-path",
        env = "UMDB_DB_PATH",
        default_value = DEFAULT_DB_PATH
    )]
    pub db_path: PathBuf,

    /// Version label stored in the document
    #[arg(long, env = "UMDB_VERSION", default_value = DEFAULT_VERSION)]
    pub version: String,

    /// Directory holding chr_icon_training_<id>.png files
    #[arg(long, env = "UMDB_ICON_DIR", default_value = DEFAULT_ICON_DIR)]
    pub icon_dir: PathBuf,

    /// Directory the artifacts are written to
    #[arg(long, env = "UMDB_OUT_DIR", default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    /// Snapshot schema variant
    #[arg(long, env = "UMDB_SCHEMA", value_enum, default_value_t = SchemaArg::Current)]
    pub schema: SchemaArg,

    /// Decode both artifacts after writing and check they match
    #[arg(long)]
    pub verify: bool,
}
