//! Fuzz target for selector operation sequences.
//!
//! Any sequence of operations must keep the active index inside the list
//! and deliver nothing after dispose.

#![no_main]

use arbitrary::Arbitrary;
use cpd_interact::selector::{AdvancingSelector, IndexChange, IndexSource, SelectorItem, SelectorOptions};
use libfuzzer_sys::fuzz_target;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Arbitrary, Debug)]
enum Op {
    Tick(u16),
    Advance(u16),
    Select(u8),
    SetAuto(bool),
    SetExternal(u8),
    Resize(u8),
    Flush,
    Dispose,
}

#[derive(Arbitrary, Debug)]
struct Input {
    count: u8,
    interval_ms: u16,
    sub_tick_ms: u8,
    external: bool,
    ops: Vec<Op>,
}

fn items(n: usize) -> Vec<SelectorItem<()>> {
    (0..n).map(|i| SelectorItem::new(i.to_string(), ())).collect()
}

fuzz_target!(|input: Input| {
    let options = SelectorOptions::default()
        .with_interval_ms(u64::from(input.interval_ms))
        .with_sub_tick_ms(u64::from(input.sub_tick_ms));
    let owner = Rc::new(Cell::new(0usize));
    let source = if input.external {
        let getter = Rc::clone(&owner);
        IndexSource::external(move || getter.get())
    } else {
        IndexSource::Owned
    };

    let Ok(selector) = AdvancingSelector::new(items(usize::from(input.count)), options, source)
    else {
        assert!(input.interval_ms == 0 || input.sub_tick_ms == 0);
        return;
    };
    let log: Rc<RefCell<Vec<IndexChange>>> = Rc::default();
    let sink = Rc::clone(&log);
    let mut selector = selector.with_sink(move |c: IndexChange| sink.borrow_mut().push(c));

    let mut delivered_at_dispose = None;
    for op in input.ops.iter().take(256) {
        match *op {
            Op::Tick(ms) => selector.tick(u64::from(ms)),
            Op::Advance(ms) => selector.advance(u64::from(ms)),
            Op::Select(i) => selector.select_index(usize::from(i)),
            Op::SetAuto(on) => selector.set_auto_advance(on),
            Op::SetExternal(i) => owner.set(usize::from(i)),
            Op::Resize(n) => selector.set_items(items(usize::from(n))),
            Op::Flush => selector.flush_deferred(),
            Op::Dispose => {
                selector.dispose();
                delivered_at_dispose.get_or_insert(log.borrow().len());
            }
        }

        let len = selector.len();
        assert!(len == 0 || selector.active_index() < len);
        let progress = selector.progress_fraction();
        assert!((0.0..=1.0).contains(&progress));
        if let Some(n) = delivered_at_dispose {
            assert_eq!(log.borrow().len(), n);
        }
    }
});
