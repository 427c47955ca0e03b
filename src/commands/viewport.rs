use serde::Serialize;
use std::ops::Range;

use crate::models::ResultsSettings;

/// Fixed-row-height scrolling viewport over the sorted rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub row_height: u32,
    pub container_height: u32,
    /// Extra rows rendered above and below the visible ones
    pub overscan: usize,
}

/// Half-open range of row indices to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowWindow {
    pub start: usize,
    pub end: usize,
}

impl RowWindow {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl Viewport {
    pub fn new(row_height: u32, container_height: u32, overscan: usize) -> Self {
        Viewport {
            row_height: row_height.max(1),
            container_height,
            overscan,
        }
    }

    pub fn from_settings(settings: &ResultsSettings) -> Self {
        Self::new(settings.row_height, settings.container_height, settings.overscan)
    }

    /// Height left for rows once the header row is drawn.
    pub fn list_height(&self) -> u32 {
        self.container_height.saturating_sub(self.row_height)
    }

    /// Record a new container measurement. Returns whether it changed.
    pub fn resize(&mut self, container_height: u32) -> bool {
        if self.container_height == container_height {
            return false;
        }
        self.container_height = container_height;
        true
    }

    /// Largest useful scroll offset for `total_rows` rows.
    pub fn max_scroll_offset(&self, total_rows: usize) -> u64 {
        let content = total_rows as u64 * u64::from(self.row_height.max(1));
        content.saturating_sub(u64::from(self.list_height()))
    }

    pub fn visible_window(&self, total_rows: usize, scroll_offset: u64) -> RowWindow {
        let row_height = u64::from(self.row_height.max(1));
        let offset = scroll_offset.min(self.max_scroll_offset(total_rows));
        let bottom = offset + u64::from(self.list_height());

        let first = usize::try_from(offset / row_height).unwrap_or(usize::MAX);
        let last = usize::try_from(bottom.div_ceil(row_height)).unwrap_or(usize::MAX);

        let start = first.saturating_sub(self.overscan).min(total_rows);
        let end = last.saturating_add(self.overscan).min(total_rows);

        RowWindow {
            start,
            end: end.max(start),
        }
    }

    /// Pixel offset of the first rendered row.
    pub fn offset_of(&self, window: &RowWindow) -> u64 {
        window.start as u64 * u64::from(self.row_height.max(1))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_settings(&ResultsSettings::default())
    }
}
