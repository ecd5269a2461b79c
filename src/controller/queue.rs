// SPDX-License-Identifier: MPL-2.0
//! User-curated "play next" queue.
//!
//! The queue is independent of the related-video list: it survives source
//! video changes and is only emptied by the user or by playing its entries.
//! Newly added entries go to the front.

use crate::domain::video::{RelatedVideo, VideoId};
use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct Queue {
    entries: VecDeque<RelatedVideo>,
}

impl Queue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `entry` at the front. An entry with the same id is moved to
    /// the front instead of being duplicated.
    pub fn push_front(&mut self, entry: RelatedVideo) {
        self.remove(entry.id());
        self.entries.push_front(entry);
    }

    /// Removes and returns the entry with `id`, if queued.
    pub fn remove(&mut self, id: &VideoId) -> Option<RelatedVideo> {
        let index = self.entries.iter().position(|entry| entry.id() == id)?;
        self.entries.remove(index)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn contains(&self, id: &VideoId) -> bool {
        self.entries.iter().any(|entry| entry.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RelatedVideo> {
        self.entries.iter()
    }
}
