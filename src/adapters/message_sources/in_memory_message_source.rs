use std::sync::Mutex;

use crate::core::errors::{KintaiError, Result};
use crate::core::models::raw_message::{MessageCursor, RawMessage};
use crate::core::traits::message_source::MessageSource;

/// Scripted message source that serves pre-built pages in order.
///
/// Page `n` is returned on the `n`-th successful fetch regardless of the
/// cursor; fetches past the script return an empty page. Every call
/// records the cursor it was given, and failures can be injected.
pub struct InMemoryMessageSource {
    pages: Vec<Vec<RawMessage>>,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    served: usize,
    pending_failures: u32,
    fail_from_page: Option<usize>,
    cursors: Vec<Option<MessageCursor>>,
}

impl InMemoryMessageSource {
    pub fn new(pages: Vec<Vec<RawMessage>>) -> Self {
        Self {
            pages,
            state: Mutex::new(State::default()),
        }
    }

    /// Fail the next `times` fetches, then behave normally.
    pub fn failing(self, times: u32) -> Self {
        self.lock().pending_failures = times;
        self
    }

    /// Fail every fetch of page `page` (0-based) and beyond.
    pub fn failing_from_page(self, page: usize) -> Self {
        self.lock().fail_from_page = Some(page);
        self
    }

    /// Cursors passed to each fetch call, failed calls included.
    pub fn requested_cursors(&self) -> Vec<Option<MessageCursor>> {
        self.lock().cursors.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().cursors.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MessageSource for InMemoryMessageSource {
    fn fetch_batch(&self, before: Option<&MessageCursor>, limit: usize) -> Result<Vec<RawMessage>> {
        let mut state = self.lock();
        state.cursors.push(before.cloned());

        if state.pending_failures > 0 {
            state.pending_failures -= 1;
            return Err(KintaiError::SourceUnavailable {
                reason: "injected failure".into(),
            });
        }
        if state.fail_from_page.is_some_and(|p| state.served >= p) {
            return Err(KintaiError::SourceUnavailable {
                reason: format!("injected failure at page {}", state.served),
            });
        }

        let page = self
            .pages
            .get(state.served)
            .map(|p| p.iter().take(limit).cloned().collect())
            .unwrap_or_default();
        state.served += 1;
        Ok(page)
    }
}
