//! Property-based tests for popover placement.
//!
//! Verifies containment inside the padded container, the top/bottom flip
//! rule, and that refinement is always reachable from a provisional result.

use cpd::Direction;
use cpd::geometry::{Point, Rect, Size};
use cpd::popover::{PlacementOptions, PlacementPhase, Side, compute_placement};
use cpd_interact as cpd;
use proptest::prelude::*;

const EPS: f32 = 1e-3;

// ============================================================================
// Strategies
// ============================================================================

fn options_strategy() -> impl Strategy<Value = PlacementOptions> {
    (0.0f32..=24.0, 0.0f32..=24.0, any::<bool>()).prop_map(|(padding, gap, rtl)| {
        let direction = if rtl { Direction::Rtl } else { Direction::Ltr };
        PlacementOptions::default()
            .with_padding(padding)
            .with_gap(gap)
            .with_direction(direction)
    })
}

fn size_strategy() -> impl Strategy<Value = Size> {
    (1.0f32..=300.0, 1.0f32..=200.0).prop_map(|(w, h)| Size::new(w, h))
}

/// Container large enough to hold the popover plus padding on both sides,
/// with a trigger somewhere inside it.
fn fitting_case() -> impl Strategy<Value = (PlacementOptions, Size, Rect, Point)> {
    (options_strategy(), size_strategy()).prop_flat_map(|(opts, size)| {
        let min_w = size.width + 2.0 * opts.padding;
        let min_h = size.height + 2.0 * opts.padding;
        (
            -500.0f32..=500.0,
            -500.0f32..=500.0,
            min_w..=min_w + 1200.0,
            min_h..=min_h + 900.0,
        )
            .prop_flat_map(move |(left, top, w, h)| {
                let container = Rect::new(left, top, w, h);
                (0.0f32..=w, 0.0f32..=h).prop_map(move |(dx, dy)| {
                    (opts, size, container, Point::new(left + dx, top + dy))
                })
            })
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A popover that fits stays inside the padded container.
    #[test]
    fn placement_is_contained((opts, size, container, trigger) in fitting_case()) {
        let placement = compute_placement(trigger, container, Some(size), &opts);
        let pad = opts.padding;

        prop_assert!(placement.left >= pad - EPS, "left {} < pad {}", placement.left, pad);
        prop_assert!(placement.top >= pad - EPS, "top {} < pad {}", placement.top, pad);
        prop_assert!(
            placement.left + size.width <= container.width - pad + EPS,
            "right edge {} past {}",
            placement.left + size.width,
            container.width - pad
        );
        prop_assert!(
            placement.top + size.height <= container.height - pad + EPS,
            "bottom edge {} past {}",
            placement.top + size.height,
            container.height - pad
        );
        prop_assert_eq!(placement.phase, PlacementPhase::Refined);
    }

    /// Too little room above but enough below always flips to the bottom.
    #[test]
    fn flips_below_when_only_below_fits((opts, size, container, trigger) in fitting_case()) {
        let local_y = trigger.y - container.top;
        let needed = size.height + opts.gap + opts.padding;
        prop_assume!(local_y < needed);
        prop_assume!(container.height - local_y >= needed);

        let placement = compute_placement(trigger, container, Some(size), &opts);
        prop_assert_eq!(placement.side, Side::Bottom);
    }

    /// Enough room above always keeps the preferred top side.
    #[test]
    fn stays_above_when_room_above((opts, size, container, trigger) in fitting_case()) {
        let local_y = trigger.y - container.top;
        prop_assume!(local_y >= size.height + opts.gap + opts.padding);

        let placement = compute_placement(trigger, container, Some(size), &opts);
        prop_assert_eq!(placement.side, Side::Top);
    }

    /// The unmeasured placement is provisional; measuring always refines it.
    #[test]
    fn refinement_is_reachable((opts, size, container, trigger) in fitting_case()) {
        let provisional = compute_placement(trigger, container, None, &opts);
        prop_assert!(provisional.is_provisional());
        prop_assert_eq!(provisional.size, opts.fallback_size);

        let refined = compute_placement(trigger, container, Some(size), &opts);
        prop_assert!(!refined.is_provisional());
        prop_assert_eq!(refined.size, size);
    }

    /// Away from the edges, refinement moves the popover by exactly the
    /// estimate's error.
    #[test]
    fn refinement_jump_is_bounded_by_estimate_error(
        x in 700.0f32..1300.0,
        y in 700.0f32..1300.0,
        size in size_strategy(),
    ) {
        let opts = PlacementOptions::default();
        let container = Rect::new(0.0, 0.0, 2000.0, 2000.0);
        let trigger = Point::new(x, y);

        let provisional = compute_placement(trigger, container, None, &opts);
        let refined = compute_placement(trigger, container, Some(size), &opts);
        prop_assert_eq!(provisional.side, Side::Top);
        prop_assert_eq!(refined.side, Side::Top);

        let dw = (size.width - opts.fallback_size.width).abs();
        let dh = (size.height - opts.fallback_size.height).abs();
        prop_assert!(((refined.left - provisional.left).abs() - dw / 2.0).abs() < 1e-2);
        prop_assert!(((refined.top - provisional.top).abs() - dh).abs() < 1e-2);
    }

    /// Arbitrary input never panics and never yields NaN for finite input.
    #[test]
    fn finite_input_gives_finite_output(
        x in -2000.0f32..2000.0,
        y in -2000.0f32..2000.0,
        w in 0.0f32..1000.0,
        h in 0.0f32..1000.0,
        size in size_strategy(),
        opts in options_strategy(),
    ) {
        let placement = compute_placement(
            Point::new(x, y),
            Rect::new(0.0, 0.0, w, h),
            Some(size),
            &opts,
        );
        prop_assert!(placement.left.is_finite());
        prop_assert!(placement.top.is_finite());
    }
}
