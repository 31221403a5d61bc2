//! Internal label management
//!
//! Keeps the ordered variable labels of a cover and generates sequential
//! fallback names (`x0`, `x1`, … / `y0`, `y1`, …) when dimensions grow past
//! the labels the caller supplied.

use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub(super) struct LabelManager<const PREFIX: char> {
    labels: Vec<Arc<str>>,
}

impl<const PREFIX: char> LabelManager<PREFIX> {
    pub(super) fn new() -> Self {
        Self { labels: Vec::new() }
    }

    pub(super) fn from_labels(labels: Vec<Arc<str>>) -> Self {
        Self { labels }
    }

    pub(super) fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub(super) fn as_slice(&self) -> &[Arc<str>] {
        &self.labels
    }

    /// Extend with generated names up to `target_size`, skipping names the
    /// caller already used.
    pub(super) fn backfill_to(&mut self, target_size: usize) {
        let mut n = self.labels.len();
        while self.labels.len() < target_size {
            let candidate: Arc<str> = Arc::from(format!("{}{}", PREFIX, n).as_str());
            if !self.labels.contains(&candidate) {
                self.labels.push(candidate);
            }
            n += 1;
        }
    }
}
