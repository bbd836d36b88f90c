//! Binary and JSON encodings of the export document.
//!
//! The binary artifact is the protobuf encoding wrapped in gzip with a zeroed
//! modification time, so identical documents always produce identical bytes.
//! The JSON artifact is pretty-printed UTF-8 with keys in schema order.

use crate::error::{ExportError, Result};
use crate::model::UmDatabase;
use flate2::read::GzDecoder;
use flate2::{Compression, GzBuilder};
use prost::Message;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Default output directory
pub const DEFAULT_OUT_DIR: &str = "assets/data";

pub const BINARY_FILE_NAME: &str = "umdb.binarypb.gz";
pub const JSON_FILE_NAME: &str = "umdb.json";

/// Protobuf-encode and gzip a document
pub fn encode_binary(doc: &UmDatabase) -> Result<Vec<u8>> {
    let mut raw = Vec::with_capacity(doc.encoded_len());
    doc.encode(&mut raw)?;

    let mut encoder = GzBuilder::new()
        .mtime(0)
        .write(Vec::new(), Compression::best());
    encoder
        .write_all(&raw)
        .map_err(|e| ExportError::io(BINARY_FILE_NAME, e))?;
    encoder
        .finish()
        .map_err(|e| ExportError::io(BINARY_FILE_NAME, e))
}

/// Inverse of [`encode_binary`]
pub fn decode_binary(bytes: &[u8]) -> Result<UmDatabase> {
    let mut raw = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut raw)
        .map_err(|e| ExportError::io(BINARY_FILE_NAME, e))?;
    Ok(UmDatabase::decode(raw.as_slice())?)
}

/// Pretty-printed JSON rendering of a document
pub fn encode_json(doc: &UmDatabase) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Inverse of [`encode_json`]
pub fn decode_json(text: &str) -> Result<UmDatabase> {
    Ok(serde_json::from_str(text)?)
}

/// Locations of the two artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub binary: PathBuf,
    pub json: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            binary: dir.join(BINARY_FILE_NAME),
            json: dir.join(JSON_FILE_NAME),
        }
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::in_dir(DEFAULT_OUT_DIR)
    }
}

/// Encode both artifacts, then replace the files on disk as a pair.
///
/// Nothing is written unless both encodings succeed. Both files are staged
/// as sibling `.tmp` files before either target is touched. If the second
/// rename fails the previous binary artifact is restored, so a failed run
/// never leaves a new binary beside an old JSON file.
pub fn write_artifacts(doc: &UmDatabase, paths: &ArtifactPaths) -> Result<()> {
    let binary = encode_binary(doc)?;
    let json = encode_json(doc)?;

    let binary_tmp = stage(&paths.binary, &binary)?;
    let json_tmp = match stage(&paths.json, json.as_bytes()) {
        Ok(tmp) => tmp,
        Err(e) => {
            discard(&binary_tmp);
            return Err(e);
        }
    };

    if let Err(e) = commit(paths, &binary_tmp, &json_tmp) {
        discard(&binary_tmp);
        discard(&json_tmp);
        return Err(e);
    }

    tracing::info!(path = %paths.binary.display(), bytes = binary.len(), "wrote artifact");
    tracing::info!(path = %paths.json.display(), bytes = json.len(), "wrote artifact");
    Ok(())
}

/// Read both artifacts back
pub fn read_artifacts(paths: &ArtifactPaths) -> Result<(UmDatabase, UmDatabase)> {
    let binary = fs::read(&paths.binary).map_err(|e| ExportError::io(&paths.binary, e))?;
    let json = fs::read_to_string(&paths.json).map_err(|e| ExportError::io(&paths.json, e))?;
    Ok((decode_binary(&binary)?, decode_json(&json)?))
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Write `contents` next to `path` and return the staged file
fn stage(path: &Path, contents: &[u8]) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
    }
    let tmp = sibling(path, ".tmp");
    if let Err(e) = fs::write(&tmp, contents) {
        discard(&tmp);
        return Err(ExportError::io(&tmp, e));
    }
    Ok(tmp)
}

/// Move both staged files into place, rolling the binary back on failure
fn commit(paths: &ArtifactPaths, binary_tmp: &Path, json_tmp: &Path) -> Result<()> {
    let backup = sibling(&paths.binary, ".bak");
    let had_previous = match fs::rename(&paths.binary, &backup) {
        Ok(()) => true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => return Err(ExportError::io(&paths.binary, e)),
    };

    let result = fs::rename(binary_tmp, &paths.binary)
        .map_err(|e| ExportError::io(&paths.binary, e))
        .and_then(|()| {
            fs::rename(json_tmp, &paths.json).map_err(|e| ExportError::io(&paths.json, e))
        });

    match (&result, had_previous) {
        (Ok(()), true) => discard(&backup),
        (Ok(()), false) => {}
        (Err(_), true) => {
            if let Err(e) = fs::rename(&backup, &paths.binary) {
                tracing::warn!(
                    path = %backup.display(),
                    "Failed to restore previous artifact: {}",
                    e
                );
            }
        }
        (Err(_), false) => discard(&paths.binary),
    }
    result
}

fn discard(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), "Failed to remove: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Chara, LiveSong, Skill, WinsSaddle};

    fn sample() -> UmDatabase {
        UmDatabase {
            version: "10004000".to_string(),
            chara: vec![Chara {
                id: 1001,
                name: "スペシャルウィーク".to_string(),
                cast_name: "和氣あず未".to_string(),
                icon_url: String::new(),
            }],
            wins_saddle: vec![WinsSaddle {
                id: 1,
                name: "クラシック三冠".to_string(),
                race_instance_id: vec![100501, 101001, 101501],
                priority: 1,
                group_id: 0,
                r#type: 1,
            }],
            skill: vec![Skill {
                id: 200011,
                name: "右回り◎".to_string(),
                grade_value: 217,
                tag_id: vec!["101".to_string(), "".to_string()],
            }],
            live_song: vec![LiveSong {
                id: 40000,
                perf_type: vec![1, 3],
                perf_value: vec![10, 15],
                live_show_context: "擅长率 +5".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_binary_is_deterministic() {
        let doc = sample();
        let first = encode_binary(&doc).unwrap();
        let second = encode_binary(&doc).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_gzip_header_has_zero_mtime() {
        let bytes = encode_binary(&sample()).unwrap();
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
        assert_eq!(&bytes[4..8], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_binary_and_json_decode_to_same_document() {
        let doc = sample();
        let from_binary = decode_binary(&encode_binary(&doc).unwrap()).unwrap();
        let from_json = decode_json(&encode_json(&doc).unwrap()).unwrap();
        assert_eq!(from_binary, doc);
        assert_eq!(from_json, from_binary);
    }

    #[test]
    fn test_json_layout() {
        let json = encode_json(&sample()).unwrap();
        assert!(json.contains("スペシャルウィーク"));
        assert!(!json.contains("\\u"));
        assert!(json.starts_with("{\n  \"version\": \"10004000\",\n  \"chara\": ["));
        assert!(json.contains("\"type\": 1"));
        assert!(json.contains("\"cast_name\""));
    }

    #[test]
    fn test_decode_binary_rejects_garbage() {
        assert!(decode_binary(b"not gzip").is_err());
    }

    #[test]
    fn test_write_and_read_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::in_dir(dir.path().join("assets").join("data"));
        let doc = sample();

        write_artifacts(&doc, &paths).unwrap();
        assert!(paths.binary.ends_with("assets/data/umdb.binarypb.gz"));
        assert!(!dir.path().join("assets/data/umdb.json.tmp").exists());

        let (from_binary, from_json) = read_artifacts(&paths).unwrap();
        assert_eq!(from_binary, doc);
        assert_eq!(from_json, doc);
    }

    #[test]
    fn test_rewrite_replaces_previous_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::in_dir(dir.path());

        write_artifacts(&sample(), &paths).unwrap();
        let empty = UmDatabase {
            version: "next".to_string(),
            ..Default::default()
        };
        write_artifacts(&empty, &paths).unwrap();

        let (from_binary, _) = read_artifacts(&paths).unwrap();
        assert_eq!(from_binary.version, "next");
        assert!(from_binary.chara.is_empty());
    }

    #[test]
    fn test_failed_json_replace_restores_previous_binary() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::in_dir(dir.path());
        write_artifacts(&sample(), &paths).unwrap();

        // A non-empty directory at the JSON target makes its rename fail
        fs::remove_file(&paths.json).unwrap();
        fs::create_dir(&paths.json).unwrap();
        fs::write(paths.json.join("keep"), b"x").unwrap();

        let next = UmDatabase {
            version: "next".to_string(),
            ..Default::default()
        };
        assert!(write_artifacts(&next, &paths).is_err());

        let previous = decode_binary(&fs::read(&paths.binary).unwrap()).unwrap();
        assert_eq!(previous.version, "10004000");
        assert!(!sibling(&paths.binary, ".tmp").exists());
        assert!(!sibling(&paths.json, ".tmp").exists());
        assert!(!sibling(&paths.binary, ".bak").exists());
    }

    #[test]
    fn test_failed_first_write_leaves_no_binary() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::in_dir(dir.path());
        fs::create_dir(&paths.json).unwrap();
        fs::write(paths.json.join("keep"), b"x").unwrap();

        assert!(write_artifacts(&sample(), &paths).is_err());
        assert!(!paths.binary.exists());
        assert!(!sibling(&paths.binary, ".tmp").exists());
    }
}
