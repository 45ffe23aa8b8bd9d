//! Auto-advancing selector.
//!
//! [`AdvancingSelector`] owns (or observes) an active index into an ordered
//! item list, fills a progress indicator over a fixed interval, and moves to
//! the next item when the indicator completes. Manual selection overrides
//! the timer at any point.
//!
//! # Ownership
//!
//! The index source is chosen once, at construction:
//!
//! - [`IndexSource::Owned`]: the selector stores the index and updates it on
//!   every advance or selection.
//! - [`IndexSource::External`]: the owner stores the index and the selector
//!   reads it through a getter. The selector never writes it; advances and
//!   selections are emitted as requests and the owner decides whether to
//!   apply them.
//!
//! # Delivery
//!
//! Manual selections are reported immediately. Automatic advances are
//! reported immediately in owned mode and on the next event-loop turn
//! (the next `tick`/`advance`, or [`AdvancingSelector::flush_deferred`]) in
//! external mode, so an owner never receives a request while it is in the
//! middle of updating itself.
//!
//! # Example
//!
//! ```
//! use cpd_interact::selector::{AdvancingSelector, IndexSource, SelectorItem, SelectorOptions};
//!
//! let items = vec![
//!     SelectorItem::new("energy", "Energy"),
//!     SelectorItem::new("tech", "Technology"),
//!     SelectorItem::new("real-estate", "Real Estate"),
//! ];
//! let options = SelectorOptions::default().with_interval_ms(3000);
//! let mut selector = AdvancingSelector::new(items, options, IndexSource::Owned).unwrap();
//!
//! selector.advance(3000);
//! assert_eq!(selector.active_index(), 1);
//! assert_eq!(selector.progress_fraction(), 0.0);
//! ```

pub mod layout;

use std::fmt;

use crate::direction::Direction;
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_event, log_fmt, names};
use crate::notify::{BoxedSink, Outbox, Sink};
use crate::timer::RepeatingTimer;

pub use layout::{OffsetTable, SlideIndicators, StripLayout, VerticalTrack, strip_marker_position};

/// Default auto-advance interval.
pub const DEFAULT_INTERVAL_MS: u64 = 5000;
/// Default progress update period.
pub const DEFAULT_SUB_TICK_MS: u64 = 50;

/// One entry in a selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorItem<T> {
    /// Unique within the list.
    pub id: String,
    pub payload: T,
}

impl<T> SelectorItem<T> {
    pub fn new(id: impl Into<String>, payload: T) -> Self {
        Self {
            id: id.into(),
            payload,
        }
    }
}

/// What caused an index change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeCause {
    /// The progress indicator completed.
    Auto,
    /// The user picked an item.
    Manual,
}

impl ChangeCause {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
        }
    }
}

/// Notification sent to the selector's owner.
///
/// In owned mode this reports a change that already happened. In external
/// mode it is a request the owner may apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexChange {
    pub index: usize,
    pub cause: ChangeCause,
}

/// Where the active index lives.
pub enum IndexSource {
    Owned,
    External(Box<dyn Fn() -> usize>),
}

impl IndexSource {
    /// External source backed by a getter.
    pub fn external<F>(getter: F) -> Self
    where
        F: Fn() -> usize + 'static,
    {
        Self::External(Box::new(getter))
    }

    #[must_use]
    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

impl fmt::Debug for IndexSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owned => f.write_str("Owned"),
            Self::External(_) => f.write_str("External(..)"),
        }
    }
}

/// Selector configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectorOptions {
    /// Starting index in owned mode. Clamped to the list.
    pub initial_index: usize,
    /// Start the timer on construction.
    pub auto_advance: bool,
    /// Time for the progress indicator to fill.
    pub interval_ms: u64,
    /// Period of the progress timer.
    pub sub_tick_ms: u64,
    pub direction: Direction,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self {
            initial_index: 0,
            auto_advance: true,
            interval_ms: DEFAULT_INTERVAL_MS,
            sub_tick_ms: DEFAULT_SUB_TICK_MS,
            direction: Direction::Ltr,
        }
    }
}

impl SelectorOptions {
    #[must_use]
    pub fn with_initial_index(mut self, index: usize) -> Self {
        self.initial_index = index;
        self
    }

    #[must_use]
    pub fn with_auto_advance(mut self, enabled: bool) -> Self {
        self.auto_advance = enabled;
        self
    }

    #[must_use]
    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    #[must_use]
    pub fn with_sub_tick_ms(mut self, sub_tick_ms: u64) -> Self {
        self.sub_tick_ms = sub_tick_ms;
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Reject intervals the timer cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(Error::InvalidInterval {
                interval_ms: self.interval_ms,
            });
        }
        if self.sub_tick_ms == 0 {
            return Err(Error::InvalidSubTick {
                sub_tick_ms: self.sub_tick_ms,
            });
        }
        Ok(())
    }
}

/// Coarse state of the selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectorPhase {
    /// Timer running, progress at zero.
    Idle,
    /// Timer running, progress between zero and one.
    Advancing,
    /// Auto-advance off, or nothing to advance through.
    Paused,
    Disposed,
}

/// Auto-advancing active-index state machine.
///
/// Single-threaded: every operation takes `&mut self`, so an automatic
/// advance and a manual selection can never interleave.
pub struct AdvancingSelector<T> {
    items: Vec<SelectorItem<T>>,
    options: SelectorOptions,
    source: IndexSource,
    owned_index: usize,
    /// Last index seen from the source, for detecting external changes.
    observed_index: usize,
    /// Target of the last auto request in external mode, until the owner
    /// applies it or something else moves the index.
    requested_index: Option<usize>,
    elapsed_ms: u64,
    auto_advance: bool,
    timer: RepeatingTimer,
    deferred: Outbox<IndexChange>,
    sink: Option<BoxedSink<IndexChange>>,
    disposed: bool,
}

impl<T> AdvancingSelector<T> {
    /// Build a selector over `items`.
    ///
    /// Fails only when the interval or sub-tick is zero.
    pub fn new(
        items: Vec<SelectorItem<T>>,
        options: SelectorOptions,
        source: IndexSource,
    ) -> Result<Self> {
        if let Err(err) = options.validate() {
            log_fmt!(LogLevel::Warn, "selector rejected options: {err}");
            return Err(err);
        }

        let owned_index = clamp_index(options.initial_index, items.len());
        let mut timer = RepeatingTimer::new(options.sub_tick_ms);
        if options.auto_advance {
            timer.start();
        }

        let mut selector = Self {
            items,
            options,
            source,
            owned_index,
            observed_index: 0,
            requested_index: None,
            elapsed_ms: 0,
            auto_advance: options.auto_advance,
            timer,
            deferred: Outbox::new(),
            sink: None,
            disposed: false,
        };
        selector.observed_index = selector.active_index();
        log_fmt!(
            LogLevel::Debug,
            "selector created: items={} index={} external={} interval={}ms",
            selector.items.len(),
            selector.observed_index,
            selector.source.is_external(),
            selector.options.interval_ms
        );
        Ok(selector)
    }

    /// Install the owner's notification sink, replacing any previous one.
    pub fn set_sink<S>(&mut self, sink: S)
    where
        S: Sink<IndexChange> + 'static,
    {
        self.sink = Some(Box::new(sink));
    }

    /// Builder form of [`set_sink`](Self::set_sink).
    #[must_use]
    pub fn with_sink<S>(mut self, sink: S) -> Self
    where
        S: Sink<IndexChange> + 'static,
    {
        self.set_sink(sink);
        self
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    /// Current active index, always inside the list (0 when empty).
    ///
    /// In external mode this reads the owner's getter and clamps the value.
    #[must_use]
    pub fn active_index(&self) -> usize {
        let raw = match &self.source {
            IndexSource::Owned => self.owned_index,
            IndexSource::External(get) => get(),
        };
        clamp_index(raw, self.items.len())
    }

    #[must_use]
    pub fn active_item(&self) -> Option<&SelectorItem<T>> {
        self.items.get(self.active_index())
    }

    /// Fill of the progress indicator in `[0, 1]`.
    #[must_use]
    pub fn progress_fraction(&self) -> f32 {
        if self.items.is_empty() {
            return 0.0;
        }
        (self.elapsed_ms as f64 / self.options.interval_ms as f64).min(1.0) as f32
    }

    #[must_use]
    pub fn is_auto_advancing(&self) -> bool {
        self.auto_advance && !self.disposed
    }

    #[must_use]
    pub fn is_external(&self) -> bool {
        self.source.is_external()
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    #[must_use]
    pub fn phase(&self) -> SelectorPhase {
        if self.disposed {
            SelectorPhase::Disposed
        } else if !self.auto_advance || self.items.is_empty() {
            SelectorPhase::Paused
        } else if self.elapsed_ms == 0 {
            SelectorPhase::Idle
        } else {
            SelectorPhase::Advancing
        }
    }

    #[must_use]
    pub fn items(&self) -> &[SelectorItem<T>] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn options(&self) -> &SelectorOptions {
        &self.options
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.options.direction
    }

    /// Update the writing direction for the next render.
    pub fn set_direction(&mut self, direction: Direction) {
        self.options.direction = direction;
    }

    /// Requests waiting for the next event-loop turn (external mode only).
    #[must_use]
    pub fn pending_notifications(&self) -> usize {
        self.deferred.len()
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Feed elapsed wall time. Runs one [`tick`](Self::tick) per completed
    /// progress period.
    pub fn advance(&mut self, elapsed_ms: u64) {
        if self.disposed {
            return;
        }
        self.flush_deferred();
        let fires = self.timer.advance(elapsed_ms);
        for _ in 0..fires {
            self.tick(self.options.sub_tick_ms);
        }
    }

    /// Move the progress indicator forward by `delta_ms`.
    ///
    /// When the indicator completes, the next index (wrapping) becomes
    /// active, progress returns to zero, and exactly one [`IndexChange`]
    /// with [`ChangeCause::Auto`] is produced. A single tick completes at
    /// most one interval; overshoot is discarded.
    pub fn tick(&mut self, delta_ms: u64) {
        if self.disposed {
            return;
        }
        self.flush_deferred();
        self.observe_source();
        if !self.auto_advance || self.items.is_empty() {
            return;
        }

        let interval = self.options.interval_ms;
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms).min(interval);
        if self.elapsed_ms < interval {
            return;
        }

        let next = (self.active_index() + 1) % self.items.len();
        self.elapsed_ms = 0;
        let change = IndexChange {
            index: next,
            cause: ChangeCause::Auto,
        };
        match self.source {
            IndexSource::Owned => {
                self.owned_index = next;
                self.observed_index = next;
                log_fmt!(LogLevel::Debug, "selector advanced to {next}");
                self.deliver(change);
            }
            IndexSource::External(_) => {
                log_fmt!(LogLevel::Debug, "selector requests advance to {next}");
                self.requested_index = Some(next);
                self.deferred.push(change);
            }
        }
    }

    /// Manually select item `index`.
    ///
    /// Out-of-range indices are ignored without notification. Otherwise the
    /// progress indicator restarts and the owner is notified immediately;
    /// in external mode the selector's view of the index is left alone.
    pub fn select_index(&mut self, index: usize) {
        if self.disposed {
            return;
        }
        self.observe_source();
        if index >= self.items.len() {
            log_fmt!(
                LogLevel::Debug,
                "selector ignored out-of-range selection {index} (len {})",
                self.items.len()
            );
            return;
        }

        self.restart_progress();
        // A manual choice supersedes auto requests not yet delivered.
        self.requested_index = None;
        self.deferred.clear();
        if let IndexSource::Owned = self.source {
            self.owned_index = index;
            self.observed_index = index;
        }
        self.deliver(IndexChange {
            index,
            cause: ChangeCause::Manual,
        });
    }

    /// Enable or disable automatic advancing.
    ///
    /// Disabling stops the timer and keeps the active index. Enabling
    /// restarts the indicator from zero.
    pub fn set_auto_advance(&mut self, enabled: bool) {
        if self.disposed {
            return;
        }
        self.auto_advance = enabled;
        self.elapsed_ms = 0;
        if enabled {
            self.timer.start();
        } else {
            self.timer.stop();
        }
        log_fmt!(LogLevel::Debug, "selector auto-advance {enabled}");
    }

    /// Replace the item list (e.g. after a locale change).
    ///
    /// Progress restarts and the owned index is clamped into the new list.
    pub fn set_items(&mut self, items: Vec<SelectorItem<T>>) {
        self.items = items;
        self.owned_index = clamp_index(self.owned_index, self.items.len());
        self.observed_index = self.active_index();
        self.requested_index = None;
        if !self.disposed {
            self.restart_progress();
        }
        log_fmt!(
            LogLevel::Debug,
            "selector items replaced: len={} index={}",
            self.items.len(),
            self.observed_index
        );
    }

    /// Pick up an external index change without advancing time.
    ///
    /// Owners in external mode call this after applying a new index so the
    /// progress indicator restarts on the same render.
    pub fn sync(&mut self) {
        if !self.disposed {
            self.observe_source();
        }
    }

    /// Deliver requests held for the next turn (external mode).
    pub fn flush_deferred(&mut self) {
        if self.deferred.is_empty() {
            return;
        }
        for change in self.deferred.take() {
            self.deliver(change);
        }
    }

    /// Stop all timers and drop pending notifications. Idempotent.
    ///
    /// After disposal every operation is a no-op and no notification is
    /// ever delivered.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.timer.cancel();
        self.deferred.clear();
        self.requested_index = None;
        self.elapsed_ms = 0;
        emit_event(names::SELECTOR_DISPOSED, &format!("items={}", self.items.len()));
        log_fmt!(LogLevel::Debug, "selector disposed");
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Label-strip layout for the current state.
    #[must_use]
    pub fn strip_layout(&self, offsets: &OffsetTable) -> StripLayout {
        StripLayout::compute(
            self.active_index(),
            self.items.len(),
            self.progress_fraction(),
            offsets,
            self.options.direction,
        )
    }

    /// Vertical-list layout for the current state.
    #[must_use]
    pub fn vertical_track(&self) -> VerticalTrack {
        VerticalTrack::compute(
            self.active_index(),
            self.items.len(),
            self.progress_fraction(),
        )
    }

    /// Image-slide indicators for the current state.
    #[must_use]
    pub fn slide_indicators(&self) -> SlideIndicators {
        SlideIndicators::compute(
            self.active_index(),
            self.items.len(),
            self.progress_fraction(),
        )
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Restart the indicator after an external index change.
    ///
    /// The owner applying our own auto request is not a new change: progress
    /// already restarted when the request was made.
    fn observe_source(&mut self) {
        if !self.source.is_external() {
            return;
        }
        let current = self.active_index();
        if current == self.observed_index {
            return;
        }
        let acknowledged = self.requested_index.take() == Some(current);
        log_fmt!(
            LogLevel::Debug,
            "selector observed external index {} -> {current} (ack={acknowledged})",
            self.observed_index
        );
        self.observed_index = current;
        if !acknowledged {
            // Requests still queued were computed from the old index.
            self.deferred.clear();
            self.restart_progress();
        }
    }

    fn restart_progress(&mut self) {
        self.elapsed_ms = 0;
        if self.timer.is_running() {
            self.timer.start();
        }
    }

    fn deliver(&mut self, change: IndexChange) {
        emit_event(
            names::SELECTOR_INDEX_CHANGED,
            &format!("index={};cause={}", change.index, change.cause.as_str()),
        );
        if let Some(sink) = self.sink.as_mut() {
            sink.deliver(change);
        }
    }
}

impl<T> Drop for AdvancingSelector<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<T: fmt::Debug> fmt::Debug for AdvancingSelector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvancingSelector")
            .field("items", &self.items)
            .field("source", &self.source)
            .field("active_index", &self.active_index())
            .field("elapsed_ms", &self.elapsed_ms)
            .field("auto_advance", &self.auto_advance)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn labels(n: usize) -> Vec<SelectorItem<String>> {
        (0..n)
            .map(|i| SelectorItem::new(format!("item-{i}"), format!("Label {i}")))
            .collect()
    }

    fn recorder() -> (Rc<RefCell<Vec<IndexChange>>>, impl FnMut(IndexChange)) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        (seen, move |c: IndexChange| log.borrow_mut().push(c))
    }

    fn owned(n: usize, interval_ms: u64) -> AdvancingSelector<String> {
        let options = SelectorOptions::default().with_interval_ms(interval_ms);
        AdvancingSelector::new(labels(n), options, IndexSource::Owned).unwrap()
    }

    // ============================================
    // Construction
    // ============================================

    #[test]
    fn new_rejects_zero_interval() {
        let options = SelectorOptions::default().with_interval_ms(0);
        let err = AdvancingSelector::new(labels(3), options, IndexSource::Owned).unwrap_err();
        assert_eq!(err, Error::InvalidInterval { interval_ms: 0 });
    }

    #[test]
    fn new_rejects_zero_sub_tick() {
        let options = SelectorOptions::default().with_sub_tick_ms(0);
        let err = AdvancingSelector::new(labels(3), options, IndexSource::Owned).unwrap_err();
        assert_eq!(err, Error::InvalidSubTick { sub_tick_ms: 0 });
    }

    #[test]
    fn new_starts_at_zero_idle() {
        let sel = owned(3, 5000);
        assert_eq!(sel.active_index(), 0);
        assert_eq!(sel.progress_fraction(), 0.0);
        assert!(sel.is_auto_advancing());
        assert_eq!(sel.phase(), SelectorPhase::Idle);
    }

    #[test]
    fn new_clamps_initial_index() {
        let options = SelectorOptions::default().with_initial_index(9);
        let sel = AdvancingSelector::new(labels(3), options, IndexSource::Owned).unwrap();
        assert_eq!(sel.active_index(), 2);
    }

    #[test]
    fn empty_list_is_paused_noop() {
        let (seen, sink) = recorder();
        let mut sel = owned(0, 1000).with_sink(sink);
        assert_eq!(sel.phase(), SelectorPhase::Paused);
        sel.advance(10_000);
        sel.tick(5_000);
        sel.select_index(0);
        assert_eq!(sel.active_index(), 0);
        assert_eq!(sel.progress_fraction(), 0.0);
        assert!(sel.active_item().is_none());
        assert!(seen.borrow().is_empty());
    }

    // ============================================
    // Ticking
    // ============================================

    #[test]
    fn tick_accumulates_progress() {
        let mut sel = owned(3, 1000);
        sel.tick(250);
        assert!((sel.progress_fraction() - 0.25).abs() < 1e-6);
        assert_eq!(sel.phase(), SelectorPhase::Advancing);
    }

    #[test]
    fn tick_crossing_advances_and_notifies_once() {
        let (seen, sink) = recorder();
        let mut sel = owned(3, 1000).with_sink(sink);
        sel.tick(600);
        sel.tick(600);
        assert_eq!(sel.active_index(), 1);
        assert_eq!(sel.progress_fraction(), 0.0);
        assert_eq!(
            *seen.borrow(),
            vec![IndexChange {
                index: 1,
                cause: ChangeCause::Auto
            }]
        );
    }

    #[test]
    fn huge_tick_crosses_only_once() {
        let (seen, sink) = recorder();
        let mut sel = owned(3, 1000).with_sink(sink);
        sel.tick(10_000);
        assert_eq!(sel.active_index(), 1);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn advance_wraps_around() {
        let mut sel = owned(3, 1000);
        sel.advance(1000);
        sel.advance(1000);
        assert_eq!(sel.active_index(), 2);
        sel.advance(1000);
        assert_eq!(sel.active_index(), 0);
    }

    #[test]
    fn advance_carries_partial_sub_ticks() {
        let mut sel = owned(3, 1000);
        for _ in 0..40 {
            sel.advance(25);
        }
        assert_eq!(sel.active_index(), 1);
    }

    // ============================================
    // Manual selection
    // ============================================

    #[test]
    fn select_index_resets_progress_and_notifies() {
        let (seen, sink) = recorder();
        let mut sel = owned(4, 1000).with_sink(sink);
        sel.tick(500);
        sel.select_index(3);
        assert_eq!(sel.active_index(), 3);
        assert_eq!(sel.progress_fraction(), 0.0);
        assert_eq!(
            seen.borrow().last(),
            Some(&IndexChange {
                index: 3,
                cause: ChangeCause::Manual
            })
        );
    }

    #[test]
    fn select_out_of_range_is_noop() {
        let (seen, sink) = recorder();
        let mut sel = owned(3, 1000).with_sink(sink);
        sel.tick(500);
        sel.select_index(5);
        assert_eq!(sel.active_index(), 0);
        assert!((sel.progress_fraction() - 0.5).abs() < 1e-6);
        assert!(seen.borrow().is_empty());
    }

    // ============================================
    // Auto-advance toggle
    // ============================================

    #[test]
    fn disable_auto_advance_halts_without_changing_index() {
        let mut sel = owned(3, 1000);
        sel.advance(1000);
        sel.advance(500);
        sel.set_auto_advance(false);
        assert_eq!(sel.phase(), SelectorPhase::Paused);
        sel.advance(10_000);
        assert_eq!(sel.active_index(), 1);
        assert_eq!(sel.progress_fraction(), 0.0);
    }

    #[test]
    fn enable_auto_advance_restarts_from_zero() {
        let mut sel = owned(3, 1000);
        sel.set_auto_advance(false);
        sel.set_auto_advance(true);
        assert_eq!(sel.progress_fraction(), 0.0);
        sel.advance(999);
        assert_eq!(sel.active_index(), 0);
        sel.advance(1);
        assert_eq!(sel.active_index(), 1);
    }

    // ============================================
    // Item replacement
    // ============================================

    #[test]
    fn set_items_clamps_and_resets() {
        let mut sel = owned(5, 1000);
        sel.select_index(4);
        sel.tick(300);
        sel.set_items(labels(2));
        assert_eq!(sel.active_index(), 1);
        assert_eq!(sel.progress_fraction(), 0.0);

        sel.set_items(Vec::new());
        assert_eq!(sel.active_index(), 0);
        assert_eq!(sel.phase(), SelectorPhase::Paused);
    }

    // ============================================
    // External source
    // ============================================

    #[test]
    fn external_tick_requests_without_mutating() {
        let index = Rc::new(Cell::new(0usize));
        let getter = Rc::clone(&index);
        let (seen, sink) = recorder();
        let mut sel = AdvancingSelector::new(
            labels(3),
            SelectorOptions::default().with_interval_ms(1000),
            IndexSource::external(move || getter.get()),
        )
        .unwrap()
        .with_sink(sink);

        sel.tick(1000);
        assert_eq!(sel.active_index(), 0);
        assert_eq!(sel.progress_fraction(), 0.0);
        // deferred to the next turn
        assert!(seen.borrow().is_empty());
        assert_eq!(sel.pending_notifications(), 1);

        sel.flush_deferred();
        assert_eq!(
            *seen.borrow(),
            vec![IndexChange {
                index: 1,
                cause: ChangeCause::Auto
            }]
        );
        assert_eq!(sel.active_index(), 0);
    }

    #[test]
    fn external_change_restarts_progress() {
        let index = Rc::new(Cell::new(0usize));
        let getter = Rc::clone(&index);
        let mut sel = AdvancingSelector::new(
            labels(3),
            SelectorOptions::default().with_interval_ms(1000),
            IndexSource::external(move || getter.get()),
        )
        .unwrap();

        sel.tick(400);
        index.set(2);
        sel.sync();
        assert_eq!(sel.active_index(), 2);
        assert_eq!(sel.progress_fraction(), 0.0);

        // Same value fed back: nothing to restart.
        sel.tick(400);
        sel.sync();
        assert!((sel.progress_fraction() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn late_acknowledgement_does_not_restart_progress() {
        let index = Rc::new(Cell::new(0usize));
        let getter = Rc::clone(&index);
        let (seen, sink) = recorder();
        let mut sel = AdvancingSelector::new(
            labels(3),
            SelectorOptions::default().with_interval_ms(1000),
            IndexSource::external(move || getter.get()),
        )
        .unwrap()
        .with_sink(sink);

        sel.tick(1000);
        sel.tick(100);
        sel.tick(100);
        assert_eq!(seen.borrow().len(), 1);
        assert!((sel.progress_fraction() - 0.2).abs() < 1e-6);

        // Owner drains its queue late and applies the request.
        index.set(seen.borrow()[0].index);
        sel.sync();
        assert_eq!(sel.active_index(), 1);
        assert!((sel.progress_fraction() - 0.2).abs() < 1e-6);

        // The next crossing is measured from the original request.
        sel.tick(800);
        assert_eq!(sel.pending_notifications(), 1);
    }

    #[test]
    fn acknowledgement_keeps_sub_tick_remainder() {
        let index = Rc::new(Cell::new(0usize));
        let getter = Rc::clone(&index);
        let owner = Rc::clone(&index);
        let mut sel = AdvancingSelector::new(
            labels(3),
            SelectorOptions::default()
                .with_interval_ms(1000)
                .with_sub_tick_ms(50),
            IndexSource::external(move || getter.get()),
        )
        .unwrap()
        .with_sink(move |c: IndexChange| owner.set(c.index));

        // 1030ms: crossing at 1000, 30ms carried into the next period
        sel.advance(1030);
        sel.flush_deferred();
        sel.sync();
        // 20ms completes the carried period.
        sel.advance(20);
        assert_eq!(sel.active_index(), 1);
        assert!((sel.progress_fraction() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn other_external_value_after_request_restarts_progress() {
        let index = Rc::new(Cell::new(0usize));
        let getter = Rc::clone(&index);
        let mut sel = AdvancingSelector::new(
            labels(3),
            SelectorOptions::default().with_interval_ms(1000),
            IndexSource::external(move || getter.get()),
        )
        .unwrap();

        sel.tick(1000);
        sel.flush_deferred();
        sel.tick(300);
        // Owner ignores the request for index 1 and jumps to 2.
        index.set(2);
        sel.sync();
        assert_eq!(sel.progress_fraction(), 0.0);

        // A stale acknowledgement later is an ordinary change.
        sel.tick(300);
        index.set(1);
        sel.sync();
        assert_eq!(sel.progress_fraction(), 0.0);
    }

    #[test]
    fn manual_selection_forgets_pending_request() {
        let index = Rc::new(Cell::new(0usize));
        let getter = Rc::clone(&index);
        let mut sel = AdvancingSelector::new(
            labels(3),
            SelectorOptions::default().with_interval_ms(1000),
            IndexSource::external(move || getter.get()),
        )
        .unwrap();

        sel.tick(1000);
        sel.flush_deferred();
        sel.select_index(2);
        sel.tick(300);
        index.set(1);
        sel.sync();
        assert_eq!(sel.progress_fraction(), 0.0);
    }

    #[test]
    fn queued_request_dropped_by_manual_select_or_owner_jump() {
        let index = Rc::new(Cell::new(0usize));
        let getter = Rc::clone(&index);
        let (seen, sink) = recorder();
        let mut sel = AdvancingSelector::new(
            labels(3),
            SelectorOptions::default().with_interval_ms(1000),
            IndexSource::external(move || getter.get()),
        )
        .unwrap()
        .with_sink(sink);

        sel.tick(1000);
        assert_eq!(sel.pending_notifications(), 1);
        sel.select_index(2);
        assert_eq!(sel.pending_notifications(), 0);
        sel.flush_deferred();
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].cause, ChangeCause::Manual);

        index.set(2);
        sel.sync();
        sel.tick(1000);
        assert_eq!(sel.pending_notifications(), 1);
        // Owner moves before the request for 0 goes out.
        index.set(1);
        sel.sync();
        assert_eq!(sel.pending_notifications(), 0);
        assert_eq!(sel.progress_fraction(), 0.0);
    }

    #[test]
    fn external_manual_selection_is_immediate_request() {
        let index = Rc::new(Cell::new(1usize));
        let getter = Rc::clone(&index);
        let (seen, sink) = recorder();
        let mut sel = AdvancingSelector::new(
            labels(3),
            SelectorOptions::default(),
            IndexSource::external(move || getter.get()),
        )
        .unwrap()
        .with_sink(sink);

        sel.select_index(2);
        assert_eq!(sel.active_index(), 1);
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].cause, ChangeCause::Manual);
    }

    #[test]
    fn external_out_of_range_value_is_clamped() {
        let mut sel = AdvancingSelector::<String>::new(
            labels(3),
            SelectorOptions::default(),
            IndexSource::external(|| 42),
        )
        .unwrap();
        assert_eq!(sel.active_index(), 2);
        sel.tick(10);
        assert_eq!(sel.active_index(), 2);
    }

    // ============================================
    // Disposal
    // ============================================

    #[test]
    fn dispose_is_idempotent_and_silences() {
        let (seen, sink) = recorder();
        let mut sel = owned(3, 1000).with_sink(sink);
        sel.dispose();
        sel.dispose();
        assert_eq!(sel.phase(), SelectorPhase::Disposed);
        assert!(!sel.is_auto_advancing());
        sel.advance(100_000);
        sel.tick(100_000);
        sel.select_index(1);
        assert!(seen.borrow().is_empty());
        assert_eq!(sel.active_index(), 0);
    }

    #[test]
    fn dispose_drops_deferred_requests() {
        let (seen, sink) = recorder();
        let mut sel = AdvancingSelector::new(
            labels(3),
            SelectorOptions::default().with_interval_ms(1000),
            IndexSource::external(|| 0),
        )
        .unwrap()
        .with_sink(sink);
        sel.tick(1000);
        assert_eq!(sel.pending_notifications(), 1);
        sel.dispose();
        sel.flush_deferred();
        sel.advance(5000);
        assert!(seen.borrow().is_empty());
    }

    // ============================================
    // Layout passthrough
    // ============================================

    #[test]
    fn layout_reflects_state() {
        let mut sel = owned(5, 1000);
        sel.select_index(2);
        sel.tick(500);
        let strip = sel.strip_layout(&OffsetTable::none());
        assert_eq!(strip.marker_left, 50.0);
        assert!((strip.bar_width - 50.0).abs() < 1e-4);

        let dots = sel.slide_indicators();
        assert!(dots.is_active(2));

        sel.set_direction(Direction::Rtl);
        let strip = sel.strip_layout(&OffsetTable::cpd_strip());
        assert_eq!(strip.marker_left, 47.0);
    }
}
