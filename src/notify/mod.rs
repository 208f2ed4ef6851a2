// SPDX-FileCopyrightText: 2026 Agora Contributors
// SPDX-License-Identifier: MIT

//! Transient status notices.
//!
//! One notice is visible at a time and expires after a fixed delay. Expiry is
//! driven by a background worker waiting on a condvar; every `show` replaces
//! the notice and re-arms the deadline under the same lock, so a superseded
//! deadline never wipes a newer notice. This is the cancel-on-replace
//! behavior: a notice stays visible for the full delay after the latest
//! `show`, regardless of how many earlier notices it replaced.

use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// How long a notice stays visible after the latest `show`.
pub const NOTICE_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Debug, Default)]
struct NoticeState {
    current: Option<Notice>,
    deadline: Option<Instant>,
    shutdown: bool,
}

#[derive(Debug)]
struct NoticeInner {
    state: Mutex<NoticeState>,
    cv: Condvar,
}

#[derive(Debug)]
pub struct Notifier {
    inner: Arc<NoticeInner>,
    ttl: Duration,
    worker: Option<JoinHandle<()>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::with_ttl(NOTICE_TTL)
    }

    /// TTL override, used by tests to keep expiry timing short.
    pub fn with_ttl(ttl: Duration) -> Self {
        let inner = Arc::new(NoticeInner {
            state: Mutex::new(NoticeState::default()),
            cv: Condvar::new(),
        });

        let worker = std::thread::Builder::new()
            .name("agora-notice-expiry".to_owned())
            .spawn({
                let inner = inner.clone();
                move || Self::run_worker(inner)
            })
            .expect("spawn notice expiry worker thread");

        Self {
            inner,
            ttl,
            worker: Some(worker),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Replaces the current notice immediately and re-arms the expiry
    /// deadline.
    pub fn show(&self, kind: NoticeKind, text: impl Into<String>) {
        let mut state = self.inner.state.lock().expect("notice lock poisoned");
        state.current = Some(Notice {
            kind,
            text: text.into(),
        });
        state.deadline = Some(Instant::now() + self.ttl);
        self.inner.cv.notify_one();
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(NoticeKind::Success, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(NoticeKind::Error, text);
    }

    /// The presentation read point.
    pub fn current(&self) -> Option<Notice> {
        self.inner
            .state
            .lock()
            .expect("notice lock poisoned")
            .current
            .clone()
    }

    fn run_worker(inner: Arc<NoticeInner>) {
        let mut state = inner.state.lock().expect("notice lock poisoned");
        loop {
            if state.shutdown {
                return;
            }
            match state.deadline {
                None => {
                    state = inner.cv.wait(state).expect("notice cv poisoned");
                }
                Some(deadline) => {
                    let now = Instant::now();
                    if now < deadline {
                        // Re-reads the deadline after waking; a `show` in the
                        // meantime moved it forward.
                        state = inner
                            .cv
                            .wait_timeout(state, deadline - now)
                            .expect("notice cv poisoned")
                            .0;
                    } else {
                        state.current = None;
                        state.deadline = None;
                    }
                }
            }
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        {
            let mut state = self.inner.state.lock().expect("notice lock poisoned");
            state.shutdown = true;
            self.inner.cv.notify_one();
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
