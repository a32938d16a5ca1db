//! Per-window registry holding one dispatcher for each event type.
//!
//! The ten dispatchers are plain fields created with the registry. An event
//! type finds its field through [`EventSlot`], so picking the wrong slot is a
//! type error rather than a runtime check.

use std::fmt;

use super::dispatcher::EventDispatcher;
use super::handler::EventHandler;
use super::input::{
    CharInputEvent, CursorEnterEvent, CursorPositionEvent, CursorScrollEvent, InputEvent,
    KeyEvent, MouseEvent, WindowCloseEvent, WindowFocusEvent, WindowPositionEvent,
    WindowResizeEvent,
};
use super::types::InputEventType;

/// An event type with a dispatcher slot in [`WindowEvents`].
pub trait EventSlot: InputEvent + Sized {
    /// This event type's dispatcher inside `events`.
    fn slot(events: &WindowEvents) -> &EventDispatcher<Self>;
}

macro_rules! window_events {
    ($($field:ident: $event:ident => $tag:ident),* $(,)?) => {
        /// One [`EventDispatcher`] per event type, all created up front.
        ///
        /// # Example
        ///
        /// ```
        /// use strata::events::{CharInputEvent, InputEventType, WindowEvents, WindowRef};
        ///
        /// let events = WindowEvents::new();
        /// let handler = events.bind_fn(|e: &mut CharInputEvent| println!("{e}"));
        /// assert_eq!(events.handler_count(InputEventType::CharInput), 1);
        ///
        /// events.dispatch(&mut CharInputEvent::new(WindowRef::detached(), 0x41));
        /// assert!(events.unbind_event(&handler));
        /// ```
        #[derive(Default)]
        pub struct WindowEvents {
            $($field: EventDispatcher<$event>,)*
        }

        $(
            impl EventSlot for $event {
                fn slot(events: &WindowEvents) -> &EventDispatcher<Self> {
                    &events.$field
                }
            }
        )*

        impl WindowEvents {
            /// Number of handlers bound for `event_type`.
            pub fn handler_count(&self, event_type: InputEventType) -> usize {
                match event_type {
                    $(InputEventType::$tag => self.$field.len(),)*
                }
            }

            /// Drops every handler of every event type.
            pub fn clear(&self) {
                $(self.$field.clear();)*
            }
        }
    };
}

window_events! {
    key: KeyEvent => Key,
    mouse: MouseEvent => Mouse,
    cursor_scroll: CursorScrollEvent => CursorScroll,
    cursor_position: CursorPositionEvent => CursorPosition,
    cursor_enter: CursorEnterEvent => CursorEnter,
    char_input: CharInputEvent => CharInput,
    window_close: WindowCloseEvent => WindowClose,
    window_focus: WindowFocusEvent => WindowFocus,
    window_position: WindowPositionEvent => WindowPosition,
    window_resize: WindowResizeEvent => WindowResize,
}

impl WindowEvents {
    /// A registry with all ten dispatchers empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// The dispatcher for `E`, for direct access.
    pub fn dispatcher<E: EventSlot>(&self) -> &EventDispatcher<E> {
        E::slot(self)
    }

    /// Binds an existing handler. `false` if it is already bound or invalid.
    pub fn bind_event<E: EventSlot>(&self, handler: &EventHandler<E>) -> bool {
        self.dispatcher::<E>().bind(handler)
    }

    /// Wraps `f` in a fresh handler and binds it.
    ///
    /// The returned handler is the only way to unbind `f` later.
    #[must_use = "dropping the handler makes it impossible to unbind"]
    pub fn bind_fn<E, F>(&self, f: F) -> EventHandler<E>
    where
        E: EventSlot,
        F: FnMut(&mut E) + 'static,
    {
        let handler = EventHandler::new(f);
        self.bind_event(&handler);
        handler
    }

    /// Unbinds by handler id. `false` if no such handler is bound.
    pub fn unbind_event<E: EventSlot>(&self, handler: &EventHandler<E>) -> bool {
        self.dispatcher::<E>().unbind(handler)
    }

    /// Runs every handler bound for `E`, in bind order.
    pub fn dispatch<E: EventSlot>(&self, event: &mut E) {
        self.dispatcher::<E>().dispatch(event);
    }
}

impl fmt::Debug for WindowEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for event_type in InputEventType::ALL {
            map.entry(&event_type.name(), &self.handler_count(event_type));
        }
        map.finish()
    }
}
