//! Viewport-aware popover positioning.
//!
//! [`PopoverPositioner`] tracks the single active popover of a container
//! (the office map, a navbar dropdown), its trigger, its measured size, and
//! the hover-intent debounce that decides when it closes.
//!
//! Placement is computed in two phases. Opening a popover yields a
//! provisional placement from the fallback size, because the content has not
//! been laid out yet. Once the host measures the content and calls
//! [`PopoverPositioner::measure`], the placement is refined. Refinement is
//! best effort: when neither placement is clamped, the popover moves by at
//! most the estimate's error (half the width difference horizontally, the
//! height difference vertically).

pub mod estimate;
pub mod hover;
pub mod placement;

use std::fmt;

use crate::error::Result;
use crate::event::{LogLevel, emit_event, log_fmt, names};
use crate::geometry::{Point, Rect, Size};
use crate::notify::{BoxedSink, Sink};

pub use estimate::{TextMetrics, estimate_text_size};
pub use hover::{DEFAULT_CLOSE_DELAY_MS, HoverIntent, HoverState, HoverZone};
pub use placement::{PlacementOptions, PlacementPhase, PopoverPlacement, Side, compute_placement};

/// Content attached to a trigger: one entry, or a caller-built group of
/// entries that share a single marker.
#[derive(Clone, Debug, PartialEq)]
pub enum TriggerPayload<P> {
    Single(P),
    Group(Vec<P>),
}

impl<P> TriggerPayload<P> {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Group(items) => items.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// Entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = &P> {
        let slice: &[P] = match self {
            Self::Single(item) => std::slice::from_ref(item),
            Self::Group(items) => items,
        };
        slice.iter()
    }
}

/// A pointer entering a marker, in page coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Trigger<P> {
    /// Identifies the marker; re-entering the same id keeps the popover.
    pub id: String,
    pub point: Point,
    pub payload: TriggerPayload<P>,
}

impl<P> Trigger<P> {
    pub fn single(id: impl Into<String>, point: Point, payload: P) -> Self {
        Self {
            id: id.into(),
            point,
            payload: TriggerPayload::Single(payload),
        }
    }

    pub fn group(id: impl Into<String>, point: Point, payload: Vec<P>) -> Self {
        Self {
            id: id.into(),
            point,
            payload: TriggerPayload::Group(payload),
        }
    }
}

/// Open/close notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PopoverEvent {
    Opened { id: String },
    Closed { id: String },
}

/// Positioner configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionerOptions {
    pub placement: PlacementOptions,
    /// Delay between the pointer leaving and the popover closing.
    pub close_delay_ms: u64,
}

impl Default for PositionerOptions {
    fn default() -> Self {
        Self {
            placement: PlacementOptions::default(),
            close_delay_ms: DEFAULT_CLOSE_DELAY_MS,
        }
    }
}

impl PositionerOptions {
    #[must_use]
    pub fn with_placement(mut self, placement: PlacementOptions) -> Self {
        self.placement = placement;
        self
    }

    #[must_use]
    pub fn with_close_delay_ms(mut self, delay_ms: u64) -> Self {
        self.close_delay_ms = delay_ms;
        self
    }
}

/// Single active popover with two-phase placement and hover intent.
pub struct PopoverPositioner<P> {
    options: PositionerOptions,
    container: Option<Rect>,
    active: Option<Trigger<P>>,
    measured: Option<Size>,
    placement: Option<PopoverPlacement>,
    hover: HoverIntent,
    sink: Option<BoxedSink<PopoverEvent>>,
    disposed: bool,
}

impl<P> PopoverPositioner<P> {
    /// Build a positioner. Fails when the placement spacing is invalid.
    pub fn new(options: PositionerOptions) -> Result<Self> {
        if let Err(err) = options.placement.validate() {
            log_fmt!(LogLevel::Warn, "popover rejected options: {err}");
            return Err(err);
        }
        Ok(Self {
            options,
            container: None,
            active: None,
            measured: None,
            placement: None,
            hover: HoverIntent::new(options.close_delay_ms),
            sink: None,
            disposed: false,
        })
    }

    pub fn set_sink<S>(&mut self, sink: S)
    where
        S: Sink<PopoverEvent> + 'static,
    {
        self.sink = Some(Box::new(sink));
    }

    #[must_use]
    pub fn with_sink<S>(mut self, sink: S) -> Self
    where
        S: Sink<PopoverEvent> + 'static,
    {
        self.set_sink(sink);
        self
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    #[must_use]
    pub fn active(&self) -> Option<&Trigger<P>> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Current placement, container-local. `None` while closed.
    #[must_use]
    pub fn placement(&self) -> Option<PopoverPlacement> {
        self.placement
    }

    #[must_use]
    pub fn hover_state(&self) -> HoverState {
        if self.active.is_none() {
            HoverState::Closed
        } else {
            self.hover.state()
        }
    }

    #[must_use]
    pub fn container(&self) -> Option<Rect> {
        self.container
    }

    #[must_use]
    pub fn options(&self) -> &PositionerOptions {
        &self.options
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // ------------------------------------------------------------------
    // Layout input
    // ------------------------------------------------------------------

    /// Update the container bounds (page space).
    pub fn set_container(&mut self, container: Rect) {
        if self.disposed {
            return;
        }
        self.container = Some(container);
        self.recompute();
    }

    /// Report the popover's measured size; refines the placement.
    ///
    /// Ignored while closed. A degenerate size keeps the placement
    /// provisional.
    pub fn measure(&mut self, size: Size) {
        if self.disposed || self.active.is_none() {
            return;
        }
        self.measured = Some(size);
        self.recompute();
    }

    // ------------------------------------------------------------------
    // Open / close
    // ------------------------------------------------------------------

    /// Show the popover for `trigger`, replacing any other.
    ///
    /// Opening a different trigger closes the current popover first, so
    /// `Closed` is always reported before the next `Opened`, and a hover
    /// close pending for the old popover is dropped. Reopening the same
    /// trigger id only moves the anchor.
    pub fn open(&mut self, trigger: Trigger<P>) {
        if self.disposed {
            return;
        }
        let same = self.active.as_ref().is_some_and(|a| a.id == trigger.id);
        if same {
            self.active = Some(trigger);
            self.recompute();
            return;
        }

        self.close_active();
        // Hover state belongs to the popover being replaced.
        self.hover.show();
        let id = trigger.id.clone();
        log_fmt!(
            LogLevel::Debug,
            "popover open {id} ({} entries)",
            trigger.payload.len()
        );
        self.active = Some(trigger);
        self.measured = None;
        self.recompute();
        self.notify(PopoverEvent::Opened { id });
    }

    /// Close immediately, cancelling any pending hover close.
    pub fn close(&mut self) {
        if self.disposed {
            return;
        }
        self.hover.reset();
        self.close_active();
    }

    // ------------------------------------------------------------------
    // Hover intent
    // ------------------------------------------------------------------

    pub fn pointer_enter_trigger(&mut self, trigger: Trigger<P>) {
        if self.disposed {
            return;
        }
        self.open(trigger);
        self.hover.enter(HoverZone::TRIGGER);
    }

    pub fn pointer_leave_trigger(&mut self) {
        if self.disposed {
            return;
        }
        self.hover.leave(HoverZone::TRIGGER);
    }

    pub fn pointer_enter_popover(&mut self) {
        if self.disposed || self.active.is_none() {
            return;
        }
        self.hover.enter(HoverZone::POPOVER);
    }

    pub fn pointer_leave_popover(&mut self) {
        if self.disposed {
            return;
        }
        self.hover.leave(HoverZone::POPOVER);
    }

    /// Feed elapsed wall time to the hover close delay.
    pub fn advance(&mut self, elapsed_ms: u64) {
        if self.disposed {
            return;
        }
        if self.hover.advance(elapsed_ms) {
            log_fmt!(LogLevel::Debug, "popover hover close delay elapsed");
            self.close_active();
        }
    }

    /// Cancel the pending close and drop the active popover without
    /// notifying. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.hover.reset();
        self.active = None;
        self.measured = None;
        self.placement = None;
        log_fmt!(LogLevel::Debug, "popover positioner disposed");
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn recompute(&mut self) {
        self.placement = self.active.as_ref().map(|trigger| {
            compute_placement(
                trigger.point,
                self.container.unwrap_or_default(),
                self.measured,
                &self.options.placement,
            )
        });
    }

    fn close_active(&mut self) {
        if let Some(old) = self.active.take() {
            self.measured = None;
            self.placement = None;
            log_fmt!(LogLevel::Debug, "popover close {}", old.id);
            self.notify(PopoverEvent::Closed { id: old.id });
        }
    }

    fn notify(&mut self, event: PopoverEvent) {
        let (name, id) = match &event {
            PopoverEvent::Opened { id } => (names::POPOVER_OPENED, id),
            PopoverEvent::Closed { id } => (names::POPOVER_CLOSED, id),
        };
        emit_event(name, &format!("id={id}"));
        if let Some(sink) = self.sink.as_mut() {
            sink.deliver(event);
        }
    }
}

impl<P> Drop for PopoverPositioner<P> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<P: fmt::Debug> fmt::Debug for PopoverPositioner<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopoverPositioner")
            .field("container", &self.container)
            .field("active", &self.active)
            .field("measured", &self.measured)
            .field("placement", &self.placement)
            .field("hover", &self.hover)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}
