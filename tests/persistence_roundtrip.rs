// SPDX-FileCopyrightText: 2026 Agora Contributors
// SPDX-License-Identifier: MIT

//! End-to-end: mutate through the state store, reopen from the durable
//! mirror, and check the whole tree survived.

use std::env;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use agora::{BoardFile, BoardStore, DiscussionRef, Notifier, PostRef, VoteDelta};

struct TempDir {
    path: std::path::PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let mut path = env::temp_dir();
        path.push(format!("agora-{prefix}-{}-{nanos}", std::process::id()));
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

fn quiet_store(file: &BoardFile) -> BoardStore {
    BoardStore::open(file.clone()).with_notifier(Notifier::with_ttl(Duration::from_secs(30)))
}

#[test]
fn board_built_through_the_store_survives_a_reopen() {
    let tmp = TempDir::new("roundtrip");
    let file = BoardFile::new(tmp.path().join("board"));

    {
        let mut store = quiet_store(&file);
        store.add_discussion("Travel");
        store.add_discussion("Food");
        store.add_post(DiscussionRef::topic("Travel"), "Hello");
        store.add_post(DiscussionRef::topic("Travel"), "Jaipur or Udaipur?");
        store.add_reply(
            DiscussionRef::topic("Travel"),
            PostRef::content("Hello"),
            "Nice!",
        );
        for delta in [VoteDelta::Up, VoteDelta::Up, VoteDelta::Down] {
            store.vote(
                DiscussionRef::topic("Travel"),
                PostRef::content("Hello"),
                delta,
            );
        }
    }

    let store = quiet_store(&file);
    let discussions = store.board().discussions();
    assert_eq!(discussions.len(), 2);

    let travel = &discussions[0];
    assert_eq!(travel.topic(), "Travel");
    assert_eq!(travel.posts().len(), 2);
    assert_eq!(travel.posts()[0].content(), "Hello");
    assert_eq!(travel.posts()[0].replies(), ["Nice!".to_owned()]);
    assert_eq!(travel.posts()[0].count(), 1);
    assert_eq!(travel.posts()[1].content(), "Jaipur or Udaipur?");

    assert_eq!(discussions[1].topic(), "Food");
    assert!(discussions[1].posts().is_empty());
}

#[test]
fn duplicate_topic_fan_out_survives_a_reopen() {
    let tmp = TempDir::new("fanout");
    let file = BoardFile::new(tmp.path().join("board"));

    {
        let mut store = quiet_store(&file);
        store.add_discussion("T");
        store.add_discussion("T");
        store.add_post(DiscussionRef::topic("T"), "hi");
    }

    let store = quiet_store(&file);
    let discussions = store.board().discussions();
    assert_eq!(discussions.len(), 2);
    assert_eq!(discussions[0].posts().len(), 1);
    assert_eq!(discussions[1].posts().len(), 1);
}
