// SPDX-FileCopyrightText: 2026 Agora Contributors
// SPDX-License-Identifier: MIT

//! Mutation operations over boards.
//!
//! Operations are pure: `apply` takes the current board plus one operation and
//! returns either a whole new board or a validation failure, never a partial
//! mutation. Equality-keyed refs fan out to every entity whose key matches;
//! a ref that matches nothing is a successful no-op, not an error.

use std::fmt;

use crate::model::{Board, Discussion, DiscussionRef, Post, PostRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    AddDiscussion {
        topic: String,
    },
    DeleteDiscussion {
        discussion: DiscussionRef,
    },
    AddPost {
        discussion: DiscussionRef,
        content: String,
    },
    DeletePost {
        discussion: DiscussionRef,
        post: PostRef,
    },
    AddReply {
        discussion: DiscussionRef,
        post: PostRef,
        text: String,
    },
    Vote {
        discussion: DiscussionRef,
        post: PostRef,
        delta: VoteDelta,
    },
}

/// A single vote step. Votes are additive with no floor, no ceiling, and no
/// per-caller tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDelta {
    Up,
    Down,
}

impl VoteDelta {
    pub fn value(self) -> i64 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub board: Board,
    /// Number of entities the operation touched (created, removed, or
    /// mutated). Exposes fan-out width to callers without a diff.
    pub touched: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Topic,
    PostContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    EmptyInput { field: InputField },
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput {
                field: InputField::Topic,
            } => f.write_str("Discussion topic cannot be empty."),
            Self::EmptyInput {
                field: InputField::PostContent,
            } => f.write_str("Post cannot be empty."),
        }
    }
}

impl std::error::Error for ApplyError {}

pub fn apply(board: &Board, op: &Op) -> Result<ApplyResult, ApplyError> {
    match op {
        Op::AddDiscussion { topic } => add_discussion(board, topic),
        Op::DeleteDiscussion { discussion } => delete_discussion(board, discussion),
        Op::AddPost {
            discussion,
            content,
        } => add_post(board, discussion, content),
        Op::DeletePost { discussion, post } => delete_post(board, discussion, post),
        Op::AddReply {
            discussion,
            post,
            text,
        } => add_reply(board, discussion, post, text),
        Op::Vote {
            discussion,
            post,
            delta,
        } => vote(board, discussion, post, *delta),
    }
}

fn add_discussion(board: &Board, topic: &str) -> Result<ApplyResult, ApplyError> {
    if topic.trim().is_empty() {
        return Err(ApplyError::EmptyInput {
            field: InputField::Topic,
        });
    }

    let mut next = board.clone();
    let discussion_id = next.allocate_discussion_id();
    // Stored verbatim; no uniqueness check against existing topics.
    next.discussions_mut()
        .push(Discussion::new(discussion_id, topic));

    Ok(ApplyResult {
        board: next,
        touched: 1,
    })
}

fn delete_discussion(board: &Board, target: &DiscussionRef) -> Result<ApplyResult, ApplyError> {
    let mut next = board.clone();
    let before = next.discussions().len();
    next.discussions_mut()
        .retain(|discussion| !target.matches(discussion));
    let touched = before - next.discussions().len();

    Ok(ApplyResult {
        board: next,
        touched,
    })
}

fn add_post(
    board: &Board,
    target: &DiscussionRef,
    content: &str,
) -> Result<ApplyResult, ApplyError> {
    if content.trim().is_empty() {
        return Err(ApplyError::EmptyInput {
            field: InputField::PostContent,
        });
    }

    let mut next = board.clone();
    let mut touched = 0;
    // Index loop so each appended post can allocate its own id.
    for idx in 0..next.discussions().len() {
        if !target.matches(&next.discussions()[idx]) {
            continue;
        }
        let post_id = next.allocate_post_id();
        next.discussions_mut()[idx]
            .posts_mut()
            .push(Post::new(post_id, content));
        touched += 1;
    }

    Ok(ApplyResult {
        board: next,
        touched,
    })
}

fn delete_post(
    board: &Board,
    target: &DiscussionRef,
    post: &PostRef,
) -> Result<ApplyResult, ApplyError> {
    let mut next = board.clone();
    let mut touched = 0;
    for discussion in next
        .discussions_mut()
        .iter_mut()
        .filter(|discussion| target.matches(discussion))
    {
        let before = discussion.posts().len();
        discussion.posts_mut().retain(|entry| !post.matches(entry));
        touched += before - discussion.posts().len();
    }

    Ok(ApplyResult {
        board: next,
        touched,
    })
}

fn add_reply(
    board: &Board,
    target: &DiscussionRef,
    post: &PostRef,
    text: &str,
) -> Result<ApplyResult, ApplyError> {
    let mut next = board.clone();
    let mut touched = 0;
    // Reply text is appended verbatim, empty strings included.
    for discussion in next
        .discussions_mut()
        .iter_mut()
        .filter(|discussion| target.matches(discussion))
    {
        for entry in discussion
            .posts_mut()
            .iter_mut()
            .filter(|entry| post.matches(entry))
        {
            entry.push_reply(text);
            touched += 1;
        }
    }

    Ok(ApplyResult {
        board: next,
        touched,
    })
}

fn vote(
    board: &Board,
    target: &DiscussionRef,
    post: &PostRef,
    delta: VoteDelta,
) -> Result<ApplyResult, ApplyError> {
    let mut next = board.clone();
    let mut touched = 0;
    for discussion in next
        .discussions_mut()
        .iter_mut()
        .filter(|discussion| target.matches(discussion))
    {
        for entry in discussion
            .posts_mut()
            .iter_mut()
            .filter(|entry| post.matches(entry))
        {
            entry.add_votes(delta.value());
            touched += 1;
        }
    }

    Ok(ApplyResult {
        board: next,
        touched,
    })
}
