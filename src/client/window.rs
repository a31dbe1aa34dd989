//! Windowed rendering: only the rows that can be seen are produced.

use std::ops::Range;

use crate::domain::entities::Bookmark;

pub const ROW_HEIGHT: u32 = 120;
pub const OVERSCAN: usize = 2;
pub const MAX_LIST_HEIGHT: u32 = 600;

/// Key of the trailing loading row.
pub const LOADING_ROW_KEY: &str = "__loading__";

/// The scrollable area as reported by the presenting layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub height: u32,
    pub scroll_offset: u32,
}

impl Viewport {
    pub fn new(height: u32, scroll_offset: u32) -> Self {
        Self {
            height,
            scroll_offset,
        }
    }
}

/// Rows touched by a viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRange {
    /// Rows actually on screen.
    pub visible: Range<usize>,
    /// Visible rows plus overscan, which is what gets rendered.
    pub rendered: Range<usize>,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row<'a> {
    Item {
        index: usize,
        top: u32,
        bookmark: &'a Bookmark,
    },
    Loading {
        index: usize,
        top: u32,
    },
}

impl Row<'_> {
    /// Stable identity for the row: the bookmark id, never the index.
    pub fn key(&self) -> &str {
        match self {
            Row::Item { bookmark, .. } => &bookmark.id,
            Row::Loading { .. } => LOADING_ROW_KEY,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Row::Item { index, .. } | Row::Loading { index, .. } => *index,
        }
    }

    pub fn top(&self) -> u32 {
        match self {
            Row::Item { top, .. } | Row::Loading { top, .. } => *top,
        }
    }
}

/// Fixed-row-height list geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowedList {
    pub row_height: u32,
    pub overscan: usize,
    pub max_height: u32,
}

impl Default for WindowedList {
    fn default() -> Self {
        Self {
            row_height: ROW_HEIGHT,
            overscan: OVERSCAN,
            max_height: MAX_LIST_HEIGHT,
        }
    }
}

impl WindowedList {
    /// Height of the list box: grows with the rows up to `max_height`.
    pub fn list_height(&self, row_count: usize) -> u32 {
        let content = (row_count as u64).saturating_mul(self.row_height as u64);
        content.min(self.max_height as u64) as u32
    }

    /// Total scrollable height of all rows.
    pub fn content_height(&self, row_count: usize) -> u64 {
        row_count as u64 * self.row_height as u64
    }

    pub fn range(&self, row_count: usize, viewport: Viewport) -> RenderRange {
        if row_count == 0 || self.row_height == 0 {
            return RenderRange {
                visible: 0..0,
                rendered: 0..0,
            };
        }

        let row_height = self.row_height as u64;
        let top = viewport.scroll_offset as u64;
        let bottom = top + viewport.height as u64;

        let start = ((top / row_height) as usize).min(row_count);
        let end = (bottom.div_ceil(row_height) as usize).clamp(start, row_count);

        RenderRange {
            visible: start..end,
            rendered: start.saturating_sub(self.overscan)..(end + self.overscan).min(row_count),
        }
    }

    /// Produces the rows to draw for `items` (the filtered view).
    ///
    /// When `has_more` is set a loading row follows the last item.
    pub fn rows<'a>(
        &self,
        items: &[&'a Bookmark],
        has_more: bool,
        viewport: Viewport,
    ) -> Vec<Row<'a>> {
        let row_count = items.len() + usize::from(has_more);
        let range = self.range(row_count, viewport);

        range
            .rendered
            .map(|index| {
                let top = index as u32 * self.row_height;
                match items.get(index).copied() {
                    Some(bookmark) => Row::Item {
                        index,
                        top,
                        bookmark,
                    },
                    None => Row::Loading { index, top },
                }
            })
            .collect()
    }
}
