//! Popover placement.
//!
//! Places a popover above (preferred) or below a trigger point and keeps it
//! inside the container's padded bounds. The calculation is a pure function
//! of its inputs; callers recompute whenever the trigger, the container, or
//! the popover's measured size changes.

use crate::direction::Direction;
use crate::error::{Error, Result};
use crate::geometry::{Point, Rect, Size, clamp_span};

/// Side of the trigger the popover ended up on.
///
/// The caller uses this to draw the pointer arrow on the right edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
}

/// Whether the placement used real measurements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementPhase {
    /// Computed from the fallback size before the popover was laid out.
    Provisional,
    /// Computed from the measured popover size.
    Refined,
}

/// Computed popover position, in container-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopoverPlacement {
    pub left: f32,
    pub top: f32,
    pub side: Side,
    pub phase: PlacementPhase,
    /// The size the placement was computed for.
    pub size: Size,
}

impl PopoverPlacement {
    /// The popover box this placement describes.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.size.width, self.size.height)
    }

    #[must_use]
    pub fn is_provisional(&self) -> bool {
        self.phase == PlacementPhase::Provisional
    }
}

/// Placement tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementOptions {
    /// Minimum distance between the popover and the container edges.
    pub padding: f32,
    /// Distance between the trigger point and the popover.
    pub gap: f32,
    /// Size assumed until the popover has been measured.
    pub fallback_size: Size,
    /// Edge to pin to when the popover is wider than the container.
    pub direction: Direction,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            padding: 8.0,
            gap: 12.0,
            fallback_size: Size::new(200.0, 120.0),
            direction: Direction::Ltr,
        }
    }
}

impl PlacementOptions {
    #[must_use]
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    #[must_use]
    pub fn with_fallback_size(mut self, size: Size) -> Self {
        self.fallback_size = size;
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Spacing must be finite and non-negative; the fallback must have area.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("padding", self.padding), ("gap", self.gap)] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidSpacing {
                    name,
                    value: value.to_string(),
                });
            }
        }
        if self.fallback_size.is_degenerate() {
            return Err(Error::InvalidSpacing {
                name: "fallback size",
                value: format!(
                    "{}x{}",
                    self.fallback_size.width, self.fallback_size.height
                ),
            });
        }
        Ok(())
    }
}

/// Place a popover for `trigger` (page space) inside `container` (page space).
///
/// `popover_size` is `None` until the popover has been laid out; the fallback
/// size is used instead and the result is marked provisional. The result is
/// always refined once a real size is supplied.
///
/// Vertical choice:
/// 1. above the trigger when `trigger_y >= height + gap + padding`;
/// 2. otherwise below when there is as much room underneath;
/// 3. otherwise whichever side has more room, clamped into the container.
///
/// Horizontally the popover is centred on the trigger and clamped to the
/// padded bounds. A popover wider than the padded container is pinned to the
/// start edge for the current direction.
///
/// A degenerate container (zero or non-finite size) yields an unclamped
/// placement centred above the trigger.
#[must_use]
pub fn compute_placement(
    trigger: Point,
    container: Rect,
    popover_size: Option<Size>,
    options: &PlacementOptions,
) -> PopoverPlacement {
    let (size, phase) = match popover_size {
        Some(size) if !size.is_degenerate() => (size, PlacementPhase::Refined),
        _ => (options.fallback_size, PlacementPhase::Provisional),
    };
    let local = container.to_local(trigger);
    let centred_left = local.x - size.width / 2.0;
    let above_top = local.y - options.gap - size.height;

    if container.is_degenerate() || !local.is_finite() {
        return PopoverPlacement {
            left: centred_left,
            top: above_top,
            side: Side::Top,
            phase,
            size,
        };
    }

    let needed = size.height + options.gap + options.padding;
    let room_above = local.y;
    let room_below = container.height - local.y;
    let side = if room_above >= needed {
        Side::Top
    } else if room_below >= needed {
        Side::Bottom
    } else if room_below > room_above {
        Side::Bottom
    } else {
        Side::Top
    };

    let preferred_top = match side {
        Side::Top => above_top,
        Side::Bottom => local.y + options.gap,
    };
    let pad = options.padding;
    let top = clamp_span(preferred_top, size.height, pad, container.height - pad, false);
    let left = clamp_span(
        centred_left,
        size.width,
        pad,
        container.width - pad,
        options.direction.is_rtl(),
    );

    PopoverPlacement {
        left,
        top,
        side,
        phase,
        size,
    }
}
