// SPDX-FileCopyrightText: 2026 Agora Contributors
// SPDX-License-Identifier: MIT

//! Agora — a single-user discussion-board state engine.
//!
//! Discussions hold posts, posts hold append-only replies and a net vote
//! count. Mutations are computed as whole new boards, committed atomically by
//! the state store, and mirrored to one JSON document on disk after every
//! commit. The presentation layer stays outside this crate: it reads
//! snapshots, invokes operations, and polls the transient notice.

pub mod model;
pub mod notify;
pub mod ops;
pub mod state;
pub mod store;
pub mod ui;

pub use model::{Board, Discussion, DiscussionId, DiscussionRef, Post, PostId, PostRef};
pub use notify::{Notice, NoticeKind, Notifier, NOTICE_TTL};
pub use ops::{apply, ApplyError, ApplyResult, InputField, Op, VoteDelta};
pub use state::BoardStore;
pub use store::{BoardFile, StoreError, WriteDurability, BOARD_FILENAME};
pub use ui::ViewState;
