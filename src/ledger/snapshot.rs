//! Snapshot persistence of the latest committed state
//!
//! File layout (UTF-8):
//!
//! ```text
//! RLSNAP1 <crc32 of body, 8 hex digits>\n
//! <body: one JSON object>\n
//! ```
//!
//! The body holds the highest commit identity and, for every key, its latest
//! value (base64) and commit identity. Writes go to a fsynced sibling temp
//! file that is renamed into place, followed by a directory fsync.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::checksum::{compute_checksum, verify_checksum};
use super::commit::CommitId;
use super::errors::{SnapshotError, SnapshotResult};
use super::world_state::WorldState;

const MAGIC: &str = "RLSNAP1";

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotBody {
    highest_commit: CommitId,
    entries: Vec<SnapshotEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEntry {
    key: String,
    commit_id: CommitId,
    value: String,
}

/// Serializes `state` into snapshot file contents.
pub fn render(state: &WorldState) -> Result<String, serde_json::Error> {
    let body = SnapshotBody {
        highest_commit: state.highest_commit_id(),
        entries: state
            .latest_entries()
            .map(|(key, version)| SnapshotEntry {
                key: key.to_string(),
                commit_id: version.commit_id(),
                value: STANDARD.encode(version.value()),
            })
            .collect(),
    };

    let body = serde_json::to_string(&body)?;
    let checksum = compute_checksum(body.as_bytes());
    Ok(format!("{} {:08x}\n{}\n", MAGIC, checksum, body))
}

/// Writes `state` to `path`, replacing any previous snapshot.
///
/// Sequence: write the sibling temp file, fsync it, rename it over `path`,
/// fsync the parent directory. The new snapshot is durable on return.
pub fn save(state: &WorldState, path: &Path) -> SnapshotResult<()> {
    let contents = render(state).map_err(|e| SnapshotError::Format {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let tmp = path.with_extension("tmp");
    write_synced(&tmp, contents.as_bytes())?;
    fs::rename(&tmp, path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fsync_dir(parent)
}

fn write_synced(path: &Path, bytes: &[u8]) -> SnapshotResult<()> {
    let io_err = |source: io::Error| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(io_err)?;
    file.write_all(bytes).map_err(io_err)?;
    // fsync is mandatory before the rename publishes the file
    file.sync_all().map_err(io_err)
}

fn fsync_dir(path: &Path) -> SnapshotResult<()> {
    let io_err = |source: io::Error| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = OpenOptions::new().read(true).open(path).map_err(io_err)?;
    dir.sync_all().map_err(io_err)
}

/// Parses snapshot file contents read from `path`.
pub fn parse(contents: &str, path: &Path) -> SnapshotResult<WorldState> {
    let format_err = |reason: String| SnapshotError::Format {
        path: path.to_path_buf(),
        reason,
    };

    let (header, rest) = contents
        .split_once('\n')
        .ok_or_else(|| format_err("missing header line".to_string()))?;
    let body = rest.strip_suffix('\n').unwrap_or(rest);

    let expected = match header.split_once(' ') {
        Some((MAGIC, hex)) => u32::from_str_radix(hex, 16)
            .map_err(|_| format_err(format!("bad checksum field {}", hex)))?,
        _ => return Err(format_err("not a snapshot file".to_string())),
    };

    if !verify_checksum(body.as_bytes(), expected) {
        return Err(SnapshotError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected,
            actual: compute_checksum(body.as_bytes()),
        });
    }

    let body: SnapshotBody =
        serde_json::from_str(body).map_err(|e| format_err(format!("invalid body: {}", e)))?;

    let entries = body
        .entries
        .into_iter()
        .map(|entry| {
            let value = STANDARD
                .decode(&entry.value)
                .map_err(|e| format_err(format!("key {}: invalid base64: {}", entry.key, e)))?;
            Ok((entry.key, entry.commit_id, value))
        })
        .collect::<SnapshotResult<Vec<_>>>()?;

    WorldState::restore(body.highest_commit, entries).map_err(format_err)
}

/// Loads a snapshot from `path`.
pub fn load(path: &Path) -> SnapshotResult<WorldState> {
    let contents = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&contents, path)
}
