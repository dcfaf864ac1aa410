//! Visibility signals for incremental loading.
//!
//! A browser would report when the last table row scrolls into view. The
//! terminal shell has no viewport events, so the list controller only sees an
//! [`Observer`] armed on a row and a [`VisibilitySignal`] that says whether the
//! last rendered row is currently visible. Any source works as long as it
//! answers that one question.

use std::ops::Range;

use crate::models::MediaId;

/// Watches one rendered row for visibility
///
/// Each re-creation bumps the generation. The list only acts on an event
/// whose observer equals the armed one, so an event captured before a
/// re-creation is ignored even when the target row is the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observer {
    generation: u64,
    target: MediaId,
}

impl Observer {
    pub(crate) fn new(generation: u64, target: MediaId) -> Self {
        Self { generation, target }
    }

    /// Id of the row being observed
    pub fn target(&self) -> MediaId {
        self.target
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True when a visibility event for `row` belongs to this observer
    pub fn observes(&self, row: MediaId) -> bool {
        self.target == row
    }
}

/// Source of "the last rendered row is visible" events
pub trait VisibilitySignal {
    /// Polls the signal for a list currently rendering `rendered_rows` rows
    fn last_row_visible(&mut self, rendered_rows: usize) -> bool;
}

/// Explicit "load more" action standing in for a viewport event
#[derive(Debug, Default)]
pub struct ManualTrigger {
    pending: bool,
}

impl ManualTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a request; consumed by the next poll
    pub fn trigger(&mut self) {
        self.pending = true;
    }
}

impl VisibilitySignal for ManualTrigger {
    fn last_row_visible(&mut self, rendered_rows: usize) -> bool {
        std::mem::take(&mut self.pending) && rendered_rows > 0
    }
}

/// Scroll-position poll over a fixed-height window of rows
#[derive(Debug, Clone)]
pub struct ScrollPoll {
    offset: usize,
    viewport_rows: usize,
}

impl ScrollPoll {
    pub fn new(viewport_rows: usize) -> Self {
        Self {
            offset: 0,
            viewport_rows: viewport_rows.max(1),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Moves the window one screen down, stopping at the last row
    pub fn scroll_down(&mut self, rendered_rows: usize) {
        let max_offset = rendered_rows.saturating_sub(self.viewport_rows);
        self.offset = (self.offset + self.viewport_rows).min(max_offset);
    }

    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(self.viewport_rows);
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Pulls the window back after rows were removed below it
    pub fn clamp(&mut self, rendered_rows: usize) {
        let max_offset = rendered_rows.saturating_sub(self.viewport_rows);
        self.offset = self.offset.min(max_offset);
    }

    /// Row indices currently inside the window
    pub fn visible_range(&self, rendered_rows: usize) -> Range<usize> {
        let start = self.offset.min(rendered_rows);
        let end = (self.offset + self.viewport_rows).min(rendered_rows);
        start..end
    }
}

impl VisibilitySignal for ScrollPoll {
    fn last_row_visible(&mut self, rendered_rows: usize) -> bool {
        rendered_rows > 0 && self.visible_range(rendered_rows).contains(&(rendered_rows - 1))
    }
}
