// SPDX-FileCopyrightText: 2026 Agora Contributors
// SPDX-License-Identifier: MIT

//! Core data model.
//!
//! A board holds an ordered sequence of discussions; each discussion holds an
//! ordered sequence of posts with append-only replies and a net vote count.

pub mod board;
pub mod ids;
pub mod refs;

pub use board::{Board, Discussion, Post};
pub use ids::{DiscussionId, Id, IdError, PostId};
pub use refs::{DiscussionRef, PostRef};
