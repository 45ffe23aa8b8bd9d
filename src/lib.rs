//! `cpd_interact` - interaction engines for the CPD site
//!
//! Two small, host-driven state machines behind the site's interactive
//! sections:
//!
//! - [`selector`]: the auto-advancing selector behind the business-area
//!   label strip, the vertical about list, and the image slider.
//! - [`popover`]: viewport-aware popover placement with hover intent, used
//!   by the office map and the navbar dropdowns.
//!
//! Neither engine reads a clock or touches a DOM. The host reports elapsed
//! time and measured layout, and receives notifications through a
//! [`Sink`](notify::Sink).
//!
//! # Example
//!
//! ```
//! use cpd_interact::geometry::{Point, Rect, Size};
//! use cpd_interact::popover::{compute_placement, PlacementOptions, Side};
//!
//! let placement = compute_placement(
//!     Point::new(200.0, 20.0),
//!     Rect::new(0.0, 0.0, 400.0, 300.0),
//!     Some(Size::new(100.0, 80.0)),
//!     &PlacementOptions::default(),
//! );
//! assert_eq!(placement.side, Side::Bottom);
//! assert_eq!((placement.left, placement.top), (150.0, 32.0));
//! ```

// Crate-level lint configuration
#![forbid(unsafe_code)] // Pure state machines, no FFI
#![allow(clippy::cast_possible_truncation)] // Intentional f64 -> f32 coordinate casts
#![allow(clippy::cast_precision_loss)] // Index and millisecond counts as f32
#![allow(clippy::cast_sign_loss)] // floor() of a positive column count
#![allow(clippy::module_name_repetitions)] // Allow PopoverPlacement in popover etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::float_cmp)] // Exact comparisons in tests are on representable values
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod direction;
pub mod error;
pub mod event;
pub mod geometry;
pub mod map;
pub mod notify;
pub mod popover;
pub mod selector;
pub mod timer;

// Re-export core types at crate root
pub use direction::Direction;
pub use error::{Error, Result};
pub use event::{LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};
pub use geometry::{Point, Rect, Size};
pub use notify::{ChannelSink, Sink};

// Re-export engine types
pub use popover::{
    PlacementOptions, PopoverEvent, PopoverPlacement, PopoverPositioner, PositionerOptions, Side,
    Trigger, TriggerPayload, compute_placement,
};
pub use selector::{
    AdvancingSelector, ChangeCause, IndexChange, IndexSource, SelectorItem, SelectorOptions,
    SelectorPhase,
};
