//! Character icon embedding.
//!
//! Icons are looked up in an unpacked texture directory by the fixed name
//! `chr_icon_training_<id>.png` and inlined as base64 data URIs. A missing or
//! unreadable icon never fails the export; the record keeps an empty icon.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default location of the unpacked `Texture2D` export
pub const DEFAULT_ICON_DIR: &str = "export/Texture2D";

const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// File name of a character's training icon
pub fn icon_file_name(chara_id: i32) -> String {
    format!("chr_icon_training_{}.png", chara_id)
}

/// Encode PNG bytes as a data URI
pub fn png_data_uri(bytes: &[u8]) -> String {
    let mut uri = String::with_capacity(DATA_URI_PREFIX.len() + bytes.len().div_ceil(3) * 4);
    uri.push_str(DATA_URI_PREFIX);
    BASE64.encode_string(bytes, &mut uri);
    uri
}

/// Resolves and inlines character icons from one directory
#[derive(Debug, Clone)]
pub struct IconEmbedder {
    dir: PathBuf,
}

impl IconEmbedder {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn icon_path(&self, chara_id: i32) -> PathBuf {
        self.dir.join(icon_file_name(chara_id))
    }

    /// Data URI for the character's icon, or an empty string if there is none
    pub fn embed(&self, chara_id: i32) -> String {
        let path = self.icon_path(chara_id);
        match fs::read(&path) {
            Ok(bytes) => png_data_uri(&bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::trace!(chara_id, path = %path.display(), "no icon");
                String::new()
            }
            Err(e) => {
                tracing::warn!(chara_id, path = %path.display(), "failed to read icon: {}", e);
                String::new()
            }
        }
    }
}
