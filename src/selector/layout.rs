//! Derived positioning for the three selector presentations.
//!
//! All values are percentages along the variant's axis. These are pure
//! functions of `(active index, item count, progress, calibration)`; the
//! selector only feeds its current state in.

use crate::direction::Direction;
use crate::geometry::{clamp_percent, lerp};

/// Minimum track height per item in the vertical list, in pixels.
pub const VERTICAL_ROW_HEIGHT_PX: f32 = 72.0;

/// Fraction of a row's height between the row top and the label text top.
const VERTICAL_TEXT_TOP_RATIO: f32 = 0.1;

/// Per-index marker offsets (percentage points), one table per direction.
///
/// Offsets are calibration data measured against the rendered labels. They
/// are not derived from the index; indices past the end of a table get no
/// offset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OffsetTable {
    ltr: Vec<f32>,
    rtl: Vec<f32>,
}

impl OffsetTable {
    #[must_use]
    pub fn new(ltr: &[f32], rtl: &[f32]) -> Self {
        Self {
            ltr: ltr.to_vec(),
            rtl: rtl.to_vec(),
        }
    }

    /// No adjustment in either direction.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Offsets used by the site's business-area label strip (up to 7 labels).
    #[must_use]
    pub fn cpd_strip() -> Self {
        Self::new(
            &[6.0, -2.0, -7.0, -3.0, -4.0, -5.0, -6.0],
            &[4.0, 1.0, -3.0, 3.0, 4.0, 5.0, 1.0],
        )
    }

    #[must_use]
    pub fn offset(&self, index: usize, direction: Direction) -> f32 {
        let table = match direction {
            Direction::Ltr => &self.ltr,
            Direction::Rtl => &self.rtl,
        };
        table.get(index).copied().unwrap_or(0.0)
    }
}

/// Marker position along a horizontal label strip, in `[0, 100]`.
///
/// Markers are spread evenly from 0% (first label) to 100% (last label),
/// then nudged by the calibration offset for the active index.
#[must_use]
pub fn strip_marker_position(
    active: usize,
    count: usize,
    offsets: &OffsetTable,
    direction: Direction,
) -> f32 {
    let base = if count > 1 {
        100.0 / (count - 1) as f32 * active as f32
    } else {
        0.0
    };
    clamp_percent(base + offsets.offset(active, direction))
}

/// Horizontal label strip: marker plus a progress line growing from the start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StripLayout {
    pub marker_left: f32,
    pub bar_width: f32,
}

impl StripLayout {
    #[must_use]
    pub fn compute(
        active: usize,
        count: usize,
        progress: f32,
        offsets: &OffsetTable,
        direction: Direction,
    ) -> Self {
        Self {
            marker_left: strip_marker_position(active, count, offsets, direction),
            bar_width: progress_percent(progress),
        }
    }

    /// The progress line is only drawn once it has length.
    #[must_use]
    pub fn bar_visible(&self) -> bool {
        self.bar_width > 0.0
    }
}

/// Vertical label list: square marker at the active label's text top, a
/// filled line above it, and a progress line running toward the next label.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VerticalTrack {
    pub indicator_top: f32,
    /// Where the progress line ends: the next label's text top, or 100.
    pub next_top: f32,
    pub progress_height: f32,
    pub filled_height: f32,
}

impl VerticalTrack {
    #[must_use]
    pub fn compute(active: usize, count: usize, progress: f32) -> Self {
        if count == 0 {
            return Self::default();
        }
        let row = 100.0 / count as f32;
        let text_top = row * VERTICAL_TEXT_TOP_RATIO;
        let indicator_top = active as f32 * row + text_top;
        let next_top = if active + 1 < count {
            (active + 1) as f32 * row + text_top
        } else {
            100.0
        };
        let progress_height = lerp(0.0, next_top - indicator_top, progress.clamp(0.0, 1.0));
        Self {
            indicator_top,
            next_top,
            progress_height,
            filled_height: indicator_top,
        }
    }

    /// Minimum track height in pixels for `count` rows.
    #[must_use]
    pub fn min_height_px(count: usize) -> f32 {
        count as f32 * VERTICAL_ROW_HEIGHT_PX
    }
}

/// Image slide: one dot per slide plus a full-width progress bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideIndicators {
    pub active: usize,
    pub count: usize,
    pub bar_width: f32,
}

impl SlideIndicators {
    #[must_use]
    pub fn compute(active: usize, count: usize, progress: f32) -> Self {
        Self {
            active,
            count,
            bar_width: progress_percent(progress),
        }
    }

    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        index == self.active && index < self.count
    }

    #[must_use]
    pub fn bar_visible(&self) -> bool {
        self.bar_width > 0.0
    }
}

fn progress_percent(progress: f32) -> f32 {
    clamp_percent(progress * 100.0)
}
