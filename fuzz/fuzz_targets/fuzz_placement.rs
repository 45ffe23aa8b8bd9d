//! Fuzz target for popover placement.
//!
//! compute_placement must never panic, whatever the geometry: NaN,
//! infinities, negative sizes and containers smaller than the popover.

#![no_main]

use arbitrary::Arbitrary;
use cpd_interact::Direction;
use cpd_interact::geometry::{Point, Rect, Size};
use cpd_interact::popover::{PlacementOptions, compute_placement};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    trigger: (f32, f32),
    container: (f32, f32, f32, f32),
    size: Option<(f32, f32)>,
    padding: f32,
    gap: f32,
    rtl: bool,
}

fuzz_target!(|input: Input| {
    let options = PlacementOptions {
        padding: input.padding,
        gap: input.gap,
        direction: if input.rtl { Direction::Rtl } else { Direction::Ltr },
        ..PlacementOptions::default()
    };
    let (l, t, w, h) = input.container;
    let container = Rect::new(l, t, w, h);
    let trigger = Point::new(input.trigger.0, input.trigger.1);
    let size = input.size.map(|(w, h)| Size::new(w, h));

    let placement = compute_placement(trigger, container, size, &options);

    // Valid options, finite input and a popover that fits must stay inside.
    let Some(size) = size.filter(|s| !s.is_degenerate()) else {
        return;
    };
    let fits = container.width >= size.width + 2.0 * options.padding
        && container.height >= size.height + 2.0 * options.padding;
    if options.validate().is_ok()
        && container.to_local(trigger).is_finite()
        && !container.is_degenerate()
        && fits
    {
        let slack = 1e-3 * container.width.max(container.height).max(1.0);
        assert!(placement.left >= options.padding - slack);
        assert!(placement.left + size.width <= container.width - options.padding + slack);
    }
});
