// SPDX-FileCopyrightText: 2026 Agora Contributors
// SPDX-License-Identifier: MIT

//! The state store: owner of the live board.
//!
//! Every operation runs the same commit path: compute a candidate board with
//! `ops::apply`, replace the live board wholesale on success, mirror it to the
//! durable store, and surface the outcome as a transient notice. A validation
//! failure leaves the board untouched. A failed mirror write keeps the
//! in-memory commit and surfaces the write error as a notice.

use crate::model::{Board, Discussion, DiscussionRef, PostRef};
use crate::notify::{Notice, Notifier};
use crate::ops::{self, Op, VoteDelta};
use crate::store::BoardFile;
use crate::ui::ViewState;

#[derive(Debug)]
pub struct BoardStore {
    board: Board,
    mirror: Option<BoardFile>,
    notifier: Notifier,
    view: ViewState,
}

impl BoardStore {
    /// Opens against a durable mirror, loading whatever it holds. Absent or
    /// corrupted storage starts empty.
    pub fn open(mirror: BoardFile) -> Self {
        let board = mirror.load_or_default();
        Self {
            board,
            mirror: Some(mirror),
            notifier: Notifier::new(),
            view: ViewState::default(),
        }
    }

    /// A store without a durable mirror; commits stay in memory.
    pub fn in_memory() -> Self {
        Self {
            board: Board::new(),
            mirror: None,
            notifier: Notifier::new(),
            view: ViewState::default(),
        }
    }

    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = notifier;
        self
    }

    /// The current snapshot, read-only.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Pass-through read point for the current transient notice.
    pub fn notice(&self) -> Option<Notice> {
        self.notifier.current()
    }

    pub fn view_rev(&self) -> u64 {
        self.view.rev()
    }

    pub fn add_discussion(&mut self, topic: &str) {
        self.commit(
            Op::AddDiscussion {
                topic: topic.to_owned(),
            },
            "Discussion added successfully!",
        );
    }

    pub fn add_post(&mut self, discussion: DiscussionRef, content: &str) {
        self.commit(
            Op::AddPost {
                discussion,
                content: content.to_owned(),
            },
            "Post added successfully!",
        );
    }

    pub fn delete_discussion(&mut self, discussion: DiscussionRef) {
        self.commit(
            Op::DeleteDiscussion { discussion },
            "Discussion deleted successfully.",
        );
    }

    pub fn delete_post(&mut self, discussion: DiscussionRef, post: PostRef) {
        self.commit(
            Op::DeletePost { discussion, post },
            "Post deleted successfully.",
        );
    }

    pub fn add_reply(&mut self, discussion: DiscussionRef, post: PostRef, text: &str) {
        self.commit(
            Op::AddReply {
                discussion,
                post,
                text: text.to_owned(),
            },
            "Reply added successfully.",
        );
    }

    pub fn vote(&mut self, discussion: DiscussionRef, post: PostRef, delta: VoteDelta) {
        self.commit(Op::Vote { discussion, post, delta }, "Vote updated.");
    }

    pub fn select_discussion(&mut self, discussion: DiscussionRef) {
        self.view.set_selected(Some(discussion));
    }

    pub fn clear_selection(&mut self) {
        self.view.set_selected(None);
    }

    pub fn selected_key(&self) -> Option<&DiscussionRef> {
        self.view.selected()
    }

    /// The discussions the selection currently resolves to, re-derived from
    /// the live board: zero, one, or several entries.
    pub fn selected(&self) -> Vec<&Discussion> {
        self.view.resolve(&self.board)
    }

    fn commit(&mut self, op: Op, success_text: &str) {
        match ops::apply(&self.board, &op) {
            Ok(result) => {
                self.board = result.board;
                self.view.bump_rev();
                if let Some(mirror) = &self.mirror {
                    if let Err(err) = mirror.save(&self.board) {
                        // Optimistic commit: the in-memory board stands even
                        // when the mirror write fails.
                        self.notifier
                            .error(format!("Saving discussions failed: {err}"));
                        return;
                    }
                }
                self.notifier.success(success_text);
            }
            Err(err) => {
                self.notifier.error(err.to_string());
            }
        }
    }
}
