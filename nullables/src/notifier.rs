//! Nullable notifier: record notices instead of showing them.

use chainvote_contracts::{Notice, NoticeLevel, Notifier};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct NullNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl NullNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all notices (for assertions).
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    pub fn levels(&self) -> Vec<NoticeLevel> {
        self.notices().into_iter().map(|n| n.level).collect()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices().pop()
    }

    pub fn reset(&self) {
        if let Ok(mut n) = self.notices.lock() {
            n.clear();
        }
    }
}

impl Notifier for NullNotifier {
    fn notify(&self, notice: Notice) {
        if let Ok(mut n) = self.notices.lock() {
            n.push(notice);
        }
    }
}
