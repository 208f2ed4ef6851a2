// SPDX-FileCopyrightText: 2026 Agora Contributors
// SPDX-License-Identifier: MIT

use std::env;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rstest::{fixture, rstest};

use super::{BoardFile, StoreError, WriteDurability, BOARD_FILENAME};
use crate::model::{Board, DiscussionRef, PostRef};
use crate::ops::{apply, Op, VoteDelta};

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: std::path::PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("agora-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

struct BoardFileTestCtx {
    #[allow(dead_code)]
    tmp: TempDir,
    file: BoardFile,
}

impl BoardFileTestCtx {
    fn new(prefix: &str) -> Self {
        let tmp = TempDir::new(prefix);
        let file = BoardFile::new(tmp.path().join("board"));
        Self { tmp, file }
    }
}

#[fixture]
fn ctx() -> BoardFileTestCtx {
    BoardFileTestCtx::new("board-file")
}

fn apply_ok(board: &Board, op: Op) -> Board {
    apply(board, &op).expect("apply").board
}

fn sample_board() -> Board {
    let mut board = Board::new();
    for topic in ["Travel", "Food", "Travel"] {
        board = apply_ok(
            &board,
            Op::AddDiscussion {
                topic: topic.to_owned(),
            },
        );
    }
    board = apply_ok(
        &board,
        Op::AddPost {
            discussion: DiscussionRef::topic("Food"),
            content: "Dal Baati".to_owned(),
        },
    );
    board = apply_ok(
        &board,
        Op::AddReply {
            discussion: DiscussionRef::topic("Food"),
            post: PostRef::content("Dal Baati"),
            text: "Yes!".to_owned(),
        },
    );
    board = apply_ok(
        &board,
        Op::Vote {
            discussion: DiscussionRef::topic("Food"),
            post: PostRef::content("Dal Baati"),
            delta: VoteDelta::Down,
        },
    );
    board
}

/// Id-free projection for comparing a loaded board against a saved one.
fn shape(board: &Board) -> Vec<(String, Vec<(String, Vec<String>, i64)>)> {
    board
        .discussions()
        .iter()
        .map(|discussion| {
            (
                discussion.topic().to_owned(),
                discussion
                    .posts()
                    .iter()
                    .map(|post| {
                        (
                            post.content().to_owned(),
                            post.replies().to_vec(),
                            post.count(),
                        )
                    })
                    .collect(),
            )
        })
        .collect()
}

#[rstest]
fn save_then_load_round_trips_topics_posts_replies_and_counts(ctx: BoardFileTestCtx) {
    let board = sample_board();

    ctx.file.save(&board).unwrap();
    let loaded = ctx.file.load().unwrap();

    assert_eq!(shape(&loaded), shape(&board));
}

#[rstest]
fn load_or_default_on_absent_file_is_an_empty_board(ctx: BoardFileTestCtx) {
    assert!(ctx.file.load_or_default().is_empty());
}

#[rstest]
fn strict_load_on_absent_file_reports_not_found(ctx: BoardFileTestCtx) {
    let err = ctx.file.load().unwrap_err();
    match err {
        StoreError::Io { path, source } => {
            assert_eq!(path, ctx.file.path());
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("expected Io, got: {other:?}"),
    }
}

#[rstest]
fn load_or_default_on_malformed_json_is_an_empty_board(ctx: BoardFileTestCtx) {
    std::fs::create_dir_all(ctx.file.root()).unwrap();
    std::fs::write(ctx.file.path(), "{not json").unwrap();

    assert!(ctx.file.load_or_default().is_empty());
}

#[rstest]
fn load_or_default_on_shape_mismatch_is_an_empty_board(ctx: BoardFileTestCtx) {
    std::fs::create_dir_all(ctx.file.root()).unwrap();

    for raw in [
        r#"{"topic": "not an array"}"#,
        r#"[{"topic": 5, "posts": []}]"#,
        r#"[{"posts": []}]"#,
        r#"[{"topic": "T", "posts": [{"content": "c"}]}]"#,
    ] {
        std::fs::write(ctx.file.path(), raw).unwrap();
        assert!(ctx.file.load_or_default().is_empty(), "raw: {raw}");
    }
}

#[rstest]
fn save_overwrites_the_whole_document(ctx: BoardFileTestCtx) {
    ctx.file.save(&sample_board()).unwrap();

    let mut small = Board::new();
    small = apply_ok(
        &small,
        Op::AddDiscussion {
            topic: "Only".to_owned(),
        },
    );
    ctx.file.save(&small).unwrap();

    let loaded = ctx.file.load().unwrap();
    assert_eq!(shape(&loaded), shape(&small));
}

#[rstest]
fn persisted_layout_is_the_fixed_id_free_shape(ctx: BoardFileTestCtx) {
    ctx.file.save(&sample_board()).unwrap();

    let raw = std::fs::read_to_string(ctx.file.root().join(BOARD_FILENAME)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    let food = &entries[1];
    assert_eq!(food["topic"], "Food");
    let post = &food["posts"][0];
    assert_eq!(post["content"], "Dal Baati");
    assert_eq!(post["replies"][0], "Yes!");
    assert_eq!(post["count"], -1);
    assert!(post.get("post_id").is_none());
    assert!(food.get("discussion_id").is_none());
}

#[rstest]
fn durable_mode_round_trips_too(ctx: BoardFileTestCtx) {
    let file = ctx.file.clone().with_durability(WriteDurability::Durable);
    let board = sample_board();

    file.save(&board).unwrap();
    assert_eq!(shape(&file.load().unwrap()), shape(&board));
}

#[rstest]
fn save_leaves_no_temp_files_behind(ctx: BoardFileTestCtx) {
    ctx.file.save(&sample_board()).unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(ctx.file.root())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name != BOARD_FILENAME)
        .collect();
    assert!(leftovers.is_empty(), "unexpected files: {leftovers:?}");
}
