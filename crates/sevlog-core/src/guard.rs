//! Panic capture
//!
//! [`catch`] runs a closure and turns a panic into a [`Fault`] carrying the
//! panic value and a stack trace taken at the panic site. The trace comes
//! from a process-wide panic hook, installed on first use, that records
//! into a thread-local slot while the current thread is inside `catch`.
//! Panics outside `catch` go to the previously installed hook unchanged.
//!
//! Installing another panic hook after the first `catch` replaces this one;
//! faults are still caught, only without location and stack trace.

use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use once_cell::sync::Lazy;

struct Captured {
    location: Option<String>,
    backtrace: String,
}

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
    static CAPTURED: RefCell<Option<Captured>> = const { RefCell::new(None) };
}

static PANIC_HOOK: Lazy<()> = Lazy::new(|| {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if DEPTH.with(|depth| depth.get()) == 0 {
            previous(info);
            return;
        }
        let captured = Captured {
            location: info
                .location()
                .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column())),
            backtrace: Backtrace::force_capture().to_string(),
        };
        CAPTURED.with(|slot| *slot.borrow_mut() = Some(captured));
    }));
});

/// A panic intercepted by [`catch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    /// Rendered panic value
    pub message: String,
    /// `file:line:column` of the panic, when the hook saw it
    pub location: Option<String>,
    /// Stack trace at the panic site (empty when unavailable)
    pub backtrace: String,
}

impl Fault {
    fn from_payload(payload: Box<dyn Any + Send>, captured: Option<Captured>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Box<dyn Any>".to_string()
        };

        let (location, backtrace) = match captured {
            Some(c) => (c.location, c.backtrace),
            None => (None, String::new()),
        };

        Self {
            message,
            location,
            backtrace,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(location) = &self.location {
            write!(f, " at {}", location)?;
        }
        if !self.backtrace.is_empty() {
            write!(f, "\n{}", self.backtrace)?;
        }
        Ok(())
    }
}

impl std::error::Error for Fault {}

/// Run `f`, converting a panic into a [`Fault`]
///
/// The panic does not propagate and the default panic message is not
/// printed. Only the textual stack snapshot survives the unwind.
pub fn catch<F, R>(f: F) -> Result<R, Fault>
where
    F: FnOnce() -> R,
{
    Lazy::force(&PANIC_HOOK);

    DEPTH.with(|depth| depth.set(depth.get() + 1));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    DEPTH.with(|depth| depth.set(depth.get() - 1));

    let captured = CAPTURED.with(|slot| slot.borrow_mut().take());
    result.map_err(|payload| Fault::from_payload(payload, captured))
}
