// SPDX-FileCopyrightText: 2026 Agora Contributors
// SPDX-License-Identifier: MIT

//! The durable mirror of a board.
//!
//! One fixed file under the store root holds the entire discussion sequence as
//! a single JSON document. Every commit overwrites the whole file; there is no
//! diffing, batching, versioning, or migration path. A file that is absent or
//! does not match the expected shape loads as an empty board.

use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::model::{Board, Discussion, Post};

/// The fixed storage key: the one file name the board is persisted under.
pub const BOARD_FILENAME: &str = "discussions.json";

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl StoreError {
    fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Attempts to flush written file contents and rename operations to stable
    /// storage where possible. Exact guarantees are platform/filesystem-dependent.
    Durable,
}

/// Wire shape of one persisted discussion.
///
/// Ids are deliberately absent: the layout is fixed to
/// `{topic, posts: [{content, replies, count}]}` and ids are re-allocated on
/// load.
#[derive(Debug, Serialize, Deserialize)]
struct DiscussionJson {
    topic: String,
    posts: Vec<PostJson>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PostJson {
    content: String,
    replies: Vec<String>,
    count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardFile {
    root: PathBuf,
    durability: WriteDurability,
}

impl BoardFile {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(BOARD_FILENAME)
    }

    /// Strict load, for callers that want the failure.
    pub fn load(&self) -> Result<Board, StoreError> {
        let path = self.path();
        let raw =
            fs::read_to_string(&path).map_err(|source| StoreError::io(path.clone(), source))?;
        let entries: Vec<DiscussionJson> =
            serde_json::from_str(&raw).map_err(|source| StoreError::json(path, source))?;
        Ok(board_from_wire(entries))
    }

    /// The startup load: an absent file, unreadable file, or shape mismatch
    /// all yield an empty board. Corrupted storage is silently discarded, a
    /// documented limitation of the single-document layout.
    pub fn load_or_default(&self) -> Board {
        self.load().unwrap_or_default()
    }

    /// Serializes the entire board and overwrites the fixed file, temp file +
    /// atomic rename.
    pub fn save(&self, board: &Board) -> Result<(), StoreError> {
        let path = self.path();
        let entries = board_to_wire(board);
        let mut raw = serde_json::to_string_pretty(&entries)
            .map_err(|source| StoreError::json(path.clone(), source))?;
        raw.push('\n');
        write_atomic(&self.root, &path, raw.as_bytes(), self.durability)
    }
}

fn board_from_wire(entries: Vec<DiscussionJson>) -> Board {
    let mut board = Board::new();
    for entry in entries {
        let discussion_id = board.allocate_discussion_id();
        let mut discussion = Discussion::new(discussion_id, entry.topic);
        for post in entry.posts {
            let post_id = board.allocate_post_id();
            discussion.posts_mut().push(Post::with_state(
                post_id,
                post.content,
                post.replies,
                post.count,
            ));
        }
        board.discussions_mut().push(discussion);
    }
    board
}

fn board_to_wire(board: &Board) -> Vec<DiscussionJson> {
    board
        .discussions()
        .iter()
        .map(|discussion| DiscussionJson {
            topic: discussion.topic().to_owned(),
            posts: discussion
                .posts()
                .iter()
                .map(|post| PostJson {
                    content: post.content().to_owned(),
                    replies: post.replies().to_vec(),
                    count: post.count(),
                })
                .collect(),
        })
        .collect()
}

fn write_atomic(
    root: &Path,
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    fs::create_dir_all(root).map_err(|source| StoreError::io(root, source))?;

    let Some(parent) = path.parent() else {
        return Err(StoreError::io(
            path,
            io::Error::other("path has no parent"),
        ));
    };
    let Some(file_name) = path.file_name() else {
        return Err(StoreError::io(
            path,
            io::Error::other("path has no file name"),
        ));
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".agora.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::io(tmp_path.clone(), source))?;

    file.write_all(contents)
        .map_err(|source| StoreError::io(tmp_path.clone(), source))?;

    if durability == WriteDurability::Durable {
        file.sync_all()
            .map_err(|source| StoreError::io(tmp_path.clone(), source))?;
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::io(path, source));
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(|source| StoreError::io(parent, source))?;
            dir.sync_all()
                .map_err(|source| StoreError::io(parent, source))?;
        }
    }

    Ok(())
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::remove_file(to) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
    }
    fs::rename(from, to)
}

#[cfg(test)]
mod tests;
