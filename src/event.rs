//! Host hooks for engine diagnostics.
//!
//! The selector and the positioner never print. Two process-wide hooks carry
//! what they have to say:
//!
//! - the **log hook** receives transitions (`selector advanced to 2`,
//!   `popover hover close delay elapsed`, rejected options) tagged with a
//!   [`LogLevel`]. Engines only format a message when a log hook is
//!   installed, so an idle hook costs one lock per transition.
//! - the **event hook** receives the named notifications in [`names`] with a
//!   `key=value` payload, in addition to whatever [`Sink`](crate::Sink) the
//!   engine was built with. Analytics-style hosts use it to observe every
//!   engine without wiring each sink.
//!
//! Both hooks are called synchronously on the thread driving the engine.

use std::sync::Mutex;

/// Severity attached to engine log lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Per-transition detail (index moves, timer expiry).
    Debug,
    Info,
    /// Recoverable misuse, such as rejected options.
    Warn,
    Error,
}

impl LogLevel {
    /// Lowercase name, suitable for prefixing log lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Event names passed to the event hook.
///
/// Payloads are `;`-separated `key=value` pairs.
pub mod names {
    /// `index=<n>;cause=<auto|manual>`
    pub const SELECTOR_INDEX_CHANGED: &str = "selector.index_changed";
    /// `items=<len>`
    pub const SELECTOR_DISPOSED: &str = "selector.disposed";
    /// `id=<trigger id>`
    pub const POPOVER_OPENED: &str = "popover.opened";
    /// `id=<trigger id>`
    pub const POPOVER_CLOSED: &str = "popover.closed";
}

type EventHook = Box<dyn Fn(&str, &str) + Send + Sync + 'static>;
type LogHook = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

/// A replaceable process-wide callback.
///
/// A poisoned slot behaves as empty for emitters; only installing a hook
/// treats poisoning as fatal.
struct HookSlot<H> {
    hook: Mutex<Option<H>>,
}

impl<H> HookSlot<H> {
    const fn new() -> Self {
        Self {
            hook: Mutex::new(None),
        }
    }

    fn install(&self, hook: H, what: &str) {
        let mut guard = self.hook.lock().expect(what);
        *guard = Some(hook);
    }

    fn remove(&self) {
        if let Ok(mut guard) = self.hook.lock() {
            *guard = None;
        }
    }

    fn call(&self, f: impl FnOnce(&H)) {
        if let Ok(guard) = self.hook.lock() {
            if let Some(hook) = guard.as_ref() {
                f(hook);
            }
        }
    }

    fn is_set(&self) -> bool {
        self.hook.lock().is_ok_and(|guard| guard.is_some())
    }
}

static EVENT_HOOK: HookSlot<EventHook> = HookSlot::new();
static LOG_HOOK: HookSlot<LogHook> = HookSlot::new();

/// Install the event hook, replacing any previous one.
pub fn set_event_callback<F>(callback: F)
where
    F: Fn(&str, &str) + Send + Sync + 'static,
{
    EVENT_HOOK.install(Box::new(callback), "event hook lock");
}

/// Remove the event hook.
pub fn clear_event_callback() {
    EVENT_HOOK.remove();
}

/// Send a named engine event to the event hook, if one is installed.
pub fn emit_event(name: &str, data: &str) {
    EVENT_HOOK.call(|hook| hook(name, data));
}

/// Install the log hook, replacing any previous one.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    LOG_HOOK.install(Box::new(callback), "log hook lock");
}

/// Remove the log hook.
pub fn clear_log_callback() {
    LOG_HOOK.remove();
}

/// Send a log line to the log hook, if one is installed.
pub fn emit_log(level: LogLevel, message: &str) {
    LOG_HOOK.call(|hook| hook(level, message));
}

/// `format!` into the log hook, skipping the formatting when none is set.
macro_rules! log_fmt {
    ($level:expr, $($arg:tt)*) => {
        if $crate::event::has_log_callback() {
            $crate::event::emit_log($level, &format!($($arg)*));
        }
    };
}
pub(crate) use log_fmt;

pub(crate) fn has_log_callback() -> bool {
    LOG_HOOK.is_set()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    // Hooks are process-global and engine tests log concurrently, so each
    // test only looks for its own lines.

    #[test]
    fn event_hook_receives_named_payload() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        set_event_callback(move |name, data| {
            sink.lock().unwrap().push(format!("{name}:{data}"));
        });
        emit_event(names::POPOVER_OPENED, "id=office-riyadh");
        assert!(
            seen.lock()
                .unwrap()
                .iter()
                .any(|e| e == "popover.opened:id=office-riyadh")
        );
    }

    #[test]
    fn log_fmt_reaches_log_hook() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        set_log_callback(move |level, msg| {
            sink.lock().unwrap().push((level, msg.to_string()));
        });
        emit_log(LogLevel::Info, "selector hook check");
        log_fmt!(LogLevel::Warn, "selector rejected options: interval {}", 0);
        let seen = seen.lock().unwrap();
        assert!(
            seen.iter()
                .any(|(l, m)| *l == LogLevel::Info && m == "selector hook check")
        );
        assert!(
            seen.iter().any(|(l, m)| *l == LogLevel::Warn
                && m == "selector rejected options: interval 0")
        );
    }

    #[test]
    fn empty_slot_ignores_calls() {
        let slot: HookSlot<Box<dyn Fn(&str)>> = HookSlot::new();
        assert!(!slot.is_set());
        slot.call(|_| panic!("no hook installed"));
        slot.install(Box::new(|_| {}), "test slot");
        assert!(slot.is_set());
        slot.remove();
        assert!(!slot.is_set());
    }

    #[test]
    fn log_levels_order_by_severity() {
        assert!(LogLevel::Debug < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!(LogLevel::Error.as_str(), "error");
    }
}
