//! Size estimates for text popovers.
//!
//! A popover cannot be measured before its first layout. For text content
//! (a location's name and address), wrapping the lines against a fixed
//! character cell gives a provisional size much closer to the real one than
//! a constant fallback, so the refined placement barely moves.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::geometry::Size;

/// Approximate font metrics for a popover's text block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// Width of one display column, in pixels.
    pub column_width: f32,
    pub line_height: f32,
    /// Maximum popover width, including horizontal padding.
    pub max_width: f32,
    pub padding_x: f32,
    pub padding_y: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            column_width: 6.0,
            line_height: 14.0,
            max_width: 240.0,
            padding_x: 10.0,
            padding_y: 8.0,
        }
    }
}

impl TextMetrics {
    /// Columns that fit on one line (at least one).
    #[must_use]
    pub fn max_columns(&self) -> usize {
        let inner = self.max_width - 2.0 * self.padding_x;
        if !(inner.is_finite() && self.column_width.is_finite()) || self.column_width <= 0.0 {
            return 1;
        }
        ((inner / self.column_width).floor() as usize).max(1)
    }
}

/// Estimate the rendered size of `lines`, word-wrapped to `metrics.max_width`.
#[must_use]
pub fn estimate_text_size(lines: &[&str], metrics: &TextMetrics) -> Size {
    let max_columns = metrics.max_columns();
    let mut rows = 0usize;
    let mut widest = 0usize;

    for line in lines {
        for row_width in wrap_widths(line, max_columns) {
            rows += 1;
            widest = widest.max(row_width);
        }
    }

    let width = widest as f32 * metrics.column_width + 2.0 * metrics.padding_x;
    let height = rows as f32 * metrics.line_height + 2.0 * metrics.padding_y;
    Size::new(width.min(metrics.max_width), height)
}

/// Display width of each wrapped row of `line`.
fn wrap_widths(line: &str, max_columns: usize) -> Vec<usize> {
    let mut rows = Vec::new();
    let mut current = 0usize;
    // Whitespace only counts once a word follows it on the same row.
    let mut pending_space = 0usize;

    for segment in line.split_word_bounds() {
        let width = segment.width();
        if segment.chars().all(char::is_whitespace) {
            if current > 0 {
                pending_space += width;
            }
            continue;
        }
        if current > 0 && current + pending_space + width > max_columns {
            rows.push(current);
            current = 0;
        } else if current > 0 {
            current += pending_space;
        }
        pending_space = 0;
        // Words longer than a whole row are hard-broken.
        let mut remaining = width;
        while remaining > max_columns {
            rows.push(max_columns);
            remaining -= max_columns;
        }
        current += remaining;
    }

    if current > 0 || rows.is_empty() {
        rows.push(current);
    }
    rows
}
