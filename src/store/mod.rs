// SPDX-FileCopyrightText: 2026 Agora Contributors
// SPDX-License-Identifier: MIT

//! Persistence for boards on disk.
//!
//! The store module reads/writes the single JSON document that mirrors the
//! live board after every commit.

pub mod board_file;

pub use board_file::{BoardFile, StoreError, WriteDurability, BOARD_FILENAME};
