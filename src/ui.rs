// SPDX-FileCopyrightText: 2026 Agora Contributors
// SPDX-License-Identifier: MIT

//! Presentation-facing view state.
//!
//! Selection stores only the addressing key, never an entity copy. Callers
//! re-resolve the key against the latest board on every read, so a selected
//! topic may refer to zero, one, or several discussions after a mutation.

use crate::model::{Board, Discussion, DiscussionRef};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    rev: u64,
    selected: Option<DiscussionRef>,
}

impl ViewState {
    /// Monotonic change counter; bumped on every committed mutation and on
    /// selection changes, so a renderer can skip unchanged frames.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn selected(&self) -> Option<&DiscussionRef> {
        self.selected.as_ref()
    }

    pub fn set_selected(&mut self, selected: Option<DiscussionRef>) {
        if self.selected == selected {
            return;
        }
        self.selected = selected;
        self.rev = self.rev.wrapping_add(1);
    }

    pub fn bump_rev(&mut self) {
        self.rev = self.rev.wrapping_add(1);
    }

    pub fn resolve<'a>(&self, board: &'a Board) -> Vec<&'a Discussion> {
        match &self.selected {
            Some(target) => board.matching_discussions(target),
            None => Vec::new(),
        }
    }
}
