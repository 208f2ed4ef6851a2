// SPDX-FileCopyrightText: 2026 Agora Contributors
// SPDX-License-Identifier: MIT

use super::ids::{DiscussionId, PostId};
use super::refs::DiscussionRef;

/// The full ordered sequence of discussions at a point in time.
///
/// A `Board` is the unit of commit and of persistence: the state store always
/// replaces the whole board, never merges into it. The board also allocates
/// the process-lifetime entity ids used by the exactly-one addressing mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    discussions: Vec<Discussion>,
    next_discussion_seq: u64,
    next_post_seq: u64,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn discussions(&self) -> &[Discussion] {
        &self.discussions
    }

    pub fn discussions_mut(&mut self) -> &mut Vec<Discussion> {
        &mut self.discussions
    }

    pub fn is_empty(&self) -> bool {
        self.discussions.is_empty()
    }

    /// All discussions the ref currently resolves to: zero, one, or several.
    ///
    /// Topic refs resolve by string equality against every entry (fan-out);
    /// id refs resolve to at most one entry.
    pub fn matching_discussions<'a>(&'a self, target: &DiscussionRef) -> Vec<&'a Discussion> {
        self.discussions
            .iter()
            .filter(|discussion| target.matches(discussion))
            .collect()
    }

    pub fn allocate_discussion_id(&mut self) -> DiscussionId {
        self.next_discussion_seq += 1;
        DiscussionId::new(format!("d:{}", self.next_discussion_seq))
            .expect("generated discussion id is a valid segment")
    }

    pub fn allocate_post_id(&mut self) -> PostId {
        self.next_post_seq += 1;
        PostId::new(format!("p:{}", self.next_post_seq))
            .expect("generated post id is a valid segment")
    }
}

/// A top-level topic entity containing an ordered sequence of posts.
///
/// Public identity is the topic string itself. Topic uniqueness is not
/// enforced: two discussions may carry the same topic, and equality-keyed
/// operations then touch both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discussion {
    discussion_id: DiscussionId,
    topic: String,
    posts: Vec<Post>,
}

impl Discussion {
    pub fn new(discussion_id: DiscussionId, topic: impl Into<String>) -> Self {
        Self {
            discussion_id,
            topic: topic.into(),
            posts: Vec::new(),
        }
    }

    pub fn discussion_id(&self) -> &DiscussionId {
        &self.discussion_id
    }

    /// The topic text, stored verbatim (untrimmed) as entered.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn posts_mut(&mut self) -> &mut Vec<Post> {
        &mut self.posts
    }
}

/// A message within a discussion, carrying replies and a net vote count.
///
/// Public identity is the content string within the parent discussion. The
/// count has no floor or ceiling and no per-user tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    post_id: PostId,
    content: String,
    replies: Vec<String>,
    count: i64,
}

impl Post {
    pub fn new(post_id: PostId, content: impl Into<String>) -> Self {
        Self {
            post_id,
            content: content.into(),
            replies: Vec::new(),
            count: 0,
        }
    }

    pub fn with_state(
        post_id: PostId,
        content: impl Into<String>,
        replies: Vec<String>,
        count: i64,
    ) -> Self {
        Self {
            post_id,
            content: content.into(),
            replies,
            count,
        }
    }

    pub fn post_id(&self) -> &PostId {
        &self.post_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn replies(&self) -> &[String] {
        &self.replies
    }

    /// Replies are append-only and never validated or edited.
    pub fn push_reply(&mut self, text: impl Into<String>) {
        self.replies.push(text.into());
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn add_votes(&mut self, delta: i64) {
        self.count += delta;
    }
}
