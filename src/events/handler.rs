//! Event handlers with a stable identity.
//!
//! Closures cannot be compared, so every handler gets a process-wide
//! [`HandlerId`] when it is created. Clones share the id (and the callable);
//! [`EventHandler::take`] moves both out and leaves the source invalid.
//!
//! # Shared state
//!
//! A clone does not copy the closure. Every clone of a handler calls the
//! same closure instance, so state captured by value (a counter, a buffer)
//! is shared between the clone bound to a dispatcher and the one kept by
//! the caller.
//!
//! # Re-entrancy
//!
//! Two rules apply while events are being dispatched:
//!
//! - A dispatcher iterates a snapshot of its handlers, so binding or
//!   unbinding from inside a handler takes effect from the next dispatch
//!   (see [`EventDispatcher`](super::EventDispatcher)).
//! - A handler is never re-entered. If a handler triggers a nested dispatch
//!   that would call it again, that nested call skips it with a warning
//!   while the other handlers of the nested dispatch still run.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity token of a handler. Zero is reserved for [`HandlerId::INVALID`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(1);

impl HandlerId {
    pub const INVALID: HandlerId = HandlerId(0);

    fn next() -> Self {
        HandlerId(NEXT_HANDLER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    /// Raw token value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            f.write_str("#invalid")
        }
    }
}

type Callback<E> = Rc<RefCell<dyn FnMut(&mut E)>>;

/// A callable bound to one event type plus its identity token.
///
/// Equality compares tokens only.
pub struct EventHandler<E> {
    id: HandlerId,
    callback: Option<Callback<E>>,
}

impl<E> EventHandler<E> {
    /// Wraps `f` and assigns it a fresh, valid id.
    ///
    /// # Example
    ///
    /// ```
    /// use strata::events::{EventHandler, KeyEvent};
    ///
    /// let handler = EventHandler::new(|e: &mut KeyEvent| println!("{e}"));
    /// let copy = handler.clone();
    /// assert_eq!(handler, copy);
    /// assert!(handler.is_valid());
    /// ```
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut(&mut E) + 'static,
    {
        Self {
            id: HandlerId::next(),
            callback: Some(Rc::new(RefCell::new(f))),
        }
    }

    /// A handler with no callable and the invalid token.
    pub fn invalid() -> Self {
        Self {
            id: HandlerId::INVALID,
            callback: None,
        }
    }

    /// The identity token shared by this handler and its clones.
    pub fn id(&self) -> HandlerId {
        self.id
    }

    /// `false` for moved-from and default handlers.
    pub fn is_valid(&self) -> bool {
        self.id.is_valid()
    }

    /// Moves the callable and token into a new handler, leaving `self`
    /// invalid and empty.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Runs the callable.
    ///
    /// Calling an invalid handler is a precondition violation: it asserts in
    /// debug builds and does nothing in release builds. A handler that is
    /// already running further up the stack is not re-entered.
    pub fn call(&self, event: &mut E) {
        debug_assert!(self.is_valid(), "invoked an invalid event handler");
        let Some(callback) = &self.callback else {
            return;
        };
        match callback.try_borrow_mut() {
            Ok(mut f) => (&mut *f)(event),
            Err(_) => tracing::warn!(handler = %self.id, "handler re-entered during dispatch, skipped"),
        }
    }
}

impl<E> Default for EventHandler<E> {
    fn default() -> Self {
        Self::invalid()
    }
}

impl<E> Clone for EventHandler<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            callback: self.callback.clone(),
        }
    }
}

impl<E> PartialEq for EventHandler<E> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<E> Eq for EventHandler<E> {}

impl<E> fmt::Debug for EventHandler<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandler")
            .field("id", &self.id)
            .field("bound", &self.callback.is_some())
            .finish()
    }
}

impl<E, F> From<F> for EventHandler<E>
where
    F: FnMut(&mut E) + 'static,
{
    fn from(f: F) -> Self {
        Self::new(f)
    }
}
