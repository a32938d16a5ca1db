//! Ordered fan-out of one event type to its bound handlers.
//!
//! ```text
//! bind(A) bind(B) bind(C) unbind(B)
//!            │
//!            ▼
//! dispatch(e) ──► A(e) ──► C(e)        (bind order, every handler, no short-circuit)
//! ```
//!
//! # Re-entrancy
//!
//! `dispatch` iterates a snapshot of the handler list taken when it starts.
//! A handler may bind or unbind handlers of the same dispatcher while it
//! runs; the change is visible from the next dispatch, never from the one in
//! progress. A handler unbound mid-dispatch still runs in that dispatch if
//! it was bound when the dispatch began.

use std::cell::RefCell;
use std::fmt;

use super::handler::EventHandler;
use super::input::InputEvent;

/// Handlers bound for one event type, in bind order.
///
/// All methods take `&self`, so handlers may bind and unbind on the
/// dispatcher that is calling them.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use strata::events::{EventDispatcher, EventHandler, WindowCloseEvent, WindowRef};
///
/// let dispatcher = EventDispatcher::<WindowCloseEvent>::new();
/// let closed = Rc::new(Cell::new(false));
/// let flag = Rc::clone(&closed);
/// let handler = EventHandler::new(move |_: &mut WindowCloseEvent| flag.set(true));
///
/// assert!(dispatcher.bind(&handler));
/// assert!(!dispatcher.bind(&handler));
/// dispatcher.dispatch(&mut WindowCloseEvent::new(WindowRef::detached()));
/// assert!(closed.get());
///
/// assert!(dispatcher.unbind(&handler));
/// assert!(dispatcher.is_empty());
/// ```
pub struct EventDispatcher<E> {
    handlers: RefCell<Vec<EventHandler<E>>>,
}

impl<E> EventDispatcher<E> {
    /// An empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Number of bound handlers.
    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// `true` when no handler is bound.
    pub fn is_empty(&self) -> bool {
        self.handlers.borrow().is_empty()
    }

    /// Whether a handler with the same id as `handler` is bound.
    pub fn contains(&self, handler: &EventHandler<E>) -> bool {
        self.handlers.borrow().contains(handler)
    }

    /// Drops every bound handler.
    pub fn clear(&self) {
        self.handlers.borrow_mut().clear();
    }
}

impl<E: InputEvent> EventDispatcher<E> {
    /// Appends `handler` unless a handler with the same id is already bound.
    ///
    /// Returns `false` without changing anything for a duplicate or for an
    /// invalid (moved-from or default) handler.
    pub fn bind(&self, handler: &EventHandler<E>) -> bool {
        if !handler.is_valid() {
            tracing::warn!(event = E::TYPE.name(), "refusing to bind an invalid handler");
            return false;
        }
        let mut handlers = self.handlers.borrow_mut();
        if handlers.contains(handler) {
            return false;
        }
        handlers.push(handler.clone());
        tracing::trace!(event = E::TYPE.name(), handler = %handler.id(), "handler bound");
        true
    }

    /// Removes the handler with the same id, keeping the order of the rest.
    ///
    /// Returns `false` if no such handler is bound or `handler` is invalid.
    pub fn unbind(&self, handler: &EventHandler<E>) -> bool {
        if !handler.is_valid() {
            tracing::warn!(event = E::TYPE.name(), "refusing to unbind an invalid handler");
            return false;
        }
        let mut handlers = self.handlers.borrow_mut();
        let Some(index) = handlers.iter().position(|h| h == handler) else {
            return false;
        };
        handlers.remove(index);
        tracing::trace!(event = E::TYPE.name(), handler = %handler.id(), "handler unbound");
        true
    }

    /// Calls every handler bound at the start of the call, in bind order.
    ///
    /// Handlers run even after one of them marks the event handled.
    pub fn dispatch(&self, event: &mut E) {
        debug_assert_eq!(event.event_type(), E::TYPE);
        let snapshot = self.handlers.borrow().clone();
        for handler in &snapshot {
            handler.call(event);
        }
    }
}

impl<E> Default for EventDispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventDispatcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{KeyCode, KeyEvent, Modifiers, WindowRef};
    use std::cell::Cell;
    use std::rc::Rc;

    fn key_event() -> KeyEvent {
        KeyEvent::new(WindowRef::detached(), KeyCode::KeyD, 0, Modifiers::NONE, true, false)
    }

    #[test]
    fn duplicate_bind_is_rejected() {
        let dispatcher = EventDispatcher::<KeyEvent>::new();
        let handler = EventHandler::new(|_: &mut KeyEvent| {});
        assert!(dispatcher.bind(&handler));
        assert!(!dispatcher.bind(&handler));
        assert!(!dispatcher.bind(&handler.clone()));
        assert_eq!(dispatcher.len(), 1);
    }

    #[test]
    fn unbind_absent_handler_fails() {
        let dispatcher = EventDispatcher::<KeyEvent>::new();
        let bound = EventHandler::new(|_: &mut KeyEvent| {});
        let stranger = EventHandler::new(|_: &mut KeyEvent| {});
        dispatcher.bind(&bound);
        assert!(!dispatcher.unbind(&stranger));
        assert_eq!(dispatcher.len(), 1);
    }

    #[test]
    fn invalid_handlers_are_refused() {
        let dispatcher = EventDispatcher::<KeyEvent>::new();
        let mut handler = EventHandler::new(|_: &mut KeyEvent| {});
        assert!(dispatcher.bind(&handler));

        let moved = handler.take();
        assert!(!dispatcher.unbind(&handler));
        assert!(!dispatcher.bind(&handler));
        assert!(dispatcher.contains(&moved));
        assert!(dispatcher.unbind(&moved));
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn handled_flag_does_not_stop_dispatch() {
        let dispatcher = EventDispatcher::<KeyEvent>::new();
        let later = Rc::new(Cell::new(false));
        let seen = later.clone();
        dispatcher.bind(&EventHandler::new(|e: &mut KeyEvent| e.mark_handled()));
        dispatcher.bind(&EventHandler::new(move |e: &mut KeyEvent| {
            seen.set(e.was_handled());
        }));

        let mut event = key_event();
        dispatcher.dispatch(&mut event);
        assert!(later.get());
        assert!(event.was_handled());
    }

    #[test]
    fn clear_drops_everything() {
        let dispatcher = EventDispatcher::<KeyEvent>::new();
        dispatcher.bind(&EventHandler::new(|_: &mut KeyEvent| {}));
        dispatcher.bind(&EventHandler::new(|_: &mut KeyEvent| {}));
        dispatcher.clear();
        assert!(dispatcher.is_empty());
    }
}
