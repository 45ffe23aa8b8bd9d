//! Hover-intent debounce.
//!
//! Leaving a trigger does not close its popover straight away: the close is
//! delayed so the pointer can travel from the marker into the popover.
//! Re-entering either the trigger or the popover before the delay runs out
//! cancels the close.
//!
//! ```text
//!            enter trigger                leave last zone
//!   Closed ───────────────▶ Open ─────────────────────────▶ PendingClose
//!     ▲                      ▲                                  │  │
//!     │                      └──────── enter either zone ───────┘  │
//!     └──────────────────────────── delay elapsed ─────────────────┘
//! ```
//!
//! A popover opened without a hover (keyboard, click, host code) enters
//! `Open` through [`HoverIntent::show`] with no zone hovered, so moving the
//! pointer over it and away still closes it.

use bitflags::bitflags;

use crate::timer::OneShot;

/// Default delay between leaving the last zone and closing.
pub const DEFAULT_CLOSE_DELAY_MS: u64 = 100;

bitflags! {
    /// Zones the pointer is currently inside.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct HoverZone: u8 {
        /// The marker that opened the popover.
        const TRIGGER = 0x01;
        /// The popover itself.
        const POPOVER = 0x02;
    }
}

/// Debounce state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverState {
    Closed,
    Open,
    /// Pointer left every zone; the close timer is running.
    PendingClose,
}

/// Hover-intent state machine.
#[derive(Clone, Debug)]
pub struct HoverIntent {
    zones: HoverZone,
    open: bool,
    close_timer: OneShot,
    delay_ms: u64,
}

impl Default for HoverIntent {
    fn default() -> Self {
        Self::new(DEFAULT_CLOSE_DELAY_MS)
    }
}

impl HoverIntent {
    #[must_use]
    pub fn new(delay_ms: u64) -> Self {
        Self {
            zones: HoverZone::empty(),
            open: false,
            close_timer: OneShot::new(),
            delay_ms,
        }
    }

    #[must_use]
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    #[must_use]
    pub fn zones(&self) -> HoverZone {
        self.zones
    }

    #[must_use]
    pub fn state(&self) -> HoverState {
        if !self.open {
            HoverState::Closed
        } else if self.close_timer.is_armed() {
            HoverState::PendingClose
        } else {
            HoverState::Open
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Pointer entered `zone`.
    ///
    /// Entering the trigger opens. Entering the popover only matters while
    /// it is shown, since a closed popover cannot be hovered.
    pub fn enter(&mut self, zone: HoverZone) {
        if !self.open && !zone.contains(HoverZone::TRIGGER) {
            return;
        }
        self.zones.insert(zone);
        self.open = true;
        self.close_timer.cancel();
    }

    /// Mark the popover shown without any zone hovered.
    ///
    /// Discards zones and any pending close left over from a previous
    /// popover. The close delay only starts once a zone is entered and left.
    pub fn show(&mut self) {
        self.zones = HoverZone::empty();
        self.open = true;
        self.close_timer.cancel();
    }

    /// Pointer left `zone`. Starts the close delay once no zone is hovered.
    pub fn leave(&mut self, zone: HoverZone) {
        self.zones.remove(zone);
        if self.open && self.zones.is_empty() && !self.close_timer.is_armed() {
            self.close_timer.arm(self.delay_ms);
        }
    }

    /// Report elapsed time. Returns `true` when the popover should close now.
    pub fn advance(&mut self, elapsed_ms: u64) -> bool {
        if self.close_timer.advance(elapsed_ms) {
            self.open = false;
            self.zones = HoverZone::empty();
            return true;
        }
        false
    }

    /// Close immediately, cancelling any pending close.
    pub fn reset(&mut self) {
        self.open = false;
        self.zones = HoverZone::empty();
        self.close_timer.cancel();
    }
}
