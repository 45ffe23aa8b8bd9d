//! Fuzz target for popover text estimation.
//!
//! Arbitrary strings (mixed scripts, control characters, very long words)
//! must produce a finite size no wider than the configured maximum.

#![no_main]

use cpd_interact::popover::{TextMetrics, estimate_text_size};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let metrics = TextMetrics::default();
    let lines: Vec<&str> = data.lines().take(64).collect();
    let size = estimate_text_size(&lines, &metrics);

    assert!(size.width.is_finite());
    assert!(size.height.is_finite());
    assert!(size.width <= metrics.max_width);
});
