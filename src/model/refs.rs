// SPDX-FileCopyrightText: 2026 Agora Contributors
// SPDX-License-Identifier: MIT

use std::fmt;

use super::board::{Discussion, Post};
use super::ids::{DiscussionId, PostId};

/// How an operation addresses discussions.
///
/// `Topic` is the equality-keyed default: it matches every discussion whose
/// topic string is equal, so duplicate topics fan out. `Id` matches exactly
/// the one discussion carrying that generated id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscussionRef {
    Topic(String),
    Id(DiscussionId),
}

impl DiscussionRef {
    pub fn topic(topic: impl Into<String>) -> Self {
        Self::Topic(topic.into())
    }

    pub fn matches(&self, discussion: &Discussion) -> bool {
        match self {
            Self::Topic(topic) => discussion.topic() == topic,
            Self::Id(discussion_id) => discussion.discussion_id() == discussion_id,
        }
    }
}

impl fmt::Display for DiscussionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Topic(topic) => write!(f, "topic={topic}"),
            Self::Id(discussion_id) => write!(f, "discussion_id={discussion_id}"),
        }
    }
}

/// How an operation addresses posts within a matched discussion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostRef {
    Content(String),
    Id(PostId),
}

impl PostRef {
    pub fn content(content: impl Into<String>) -> Self {
        Self::Content(content.into())
    }

    pub fn matches(&self, post: &Post) -> bool {
        match self {
            Self::Content(content) => post.content() == content,
            Self::Id(post_id) => post.post_id() == post_id,
        }
    }
}

impl fmt::Display for PostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Content(content) => write!(f, "content={content}"),
            Self::Id(post_id) => write!(f, "post_id={post_id}"),
        }
    }
}
