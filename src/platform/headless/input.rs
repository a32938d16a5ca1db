//! Bridge from native callbacks to a window's event registry.
//!
//! Each callback captures a weak reference to its window instead of looking
//! the window up through a user pointer. A callback that fires after the
//! window is gone finds nothing to upgrade and does nothing.

use std::rc::{Rc, Weak};

use super::backend::{HeadlessBackend, NativeCallbacks};
use super::window::HeadlessWindow;
use crate::events::{
    CharInputEvent, CursorEnterEvent, CursorPositionEvent, CursorScrollEvent, EventSlot,
    KeyAction, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, WindowCloseEvent,
    WindowEvents, WindowFocusEvent, WindowPositionEvent, WindowRef, WindowResizeEvent,
};
use crate::window::{NativeHandle, Window, WindowInput};

pub struct HeadlessWindowInput {
    handle: NativeHandle,
    backend: Rc<HeadlessBackend>,
    events: WindowEvents,
}

impl HeadlessWindowInput {
    /// Creates the registry and installs the ten native callbacks of
    /// `handle`, routed to `window`.
    pub(crate) fn new(
        window: &Weak<HeadlessWindow>,
        handle: NativeHandle,
        backend: Rc<HeadlessBackend>,
    ) -> Self {
        let events = WindowEvents::new();
        backend.set_callbacks(handle, native_callbacks(window));
        Self {
            handle,
            backend,
            events,
        }
    }

    /// Removes the native callbacks. The registry stays usable.
    pub(crate) fn detach(&self) {
        self.backend.clear_callbacks(self.handle);
    }
}

impl WindowInput for HeadlessWindowInput {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.backend
            .with_window(self.handle, |w| w.is_key_down(key.raw()))
            .unwrap_or(false)
    }

    fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.backend
            .with_window(self.handle, |w| w.is_button_down(button.raw()))
            .unwrap_or(false)
    }

    fn events(&self) -> &WindowEvents {
        &self.events
    }
}

/// Builds the event for a live window and dispatches it to the window's
/// registry slot.
fn deliver<E: EventSlot>(window: &Weak<HeadlessWindow>, build: impl FnOnce(WindowRef) -> Option<E>) {
    let Some(this) = window.upgrade() else {
        return;
    };
    let sender: Weak<dyn Window> = window.clone();
    if let Some(mut event) = build(WindowRef::from_weak(sender)) {
        this.input().events().dispatch(&mut event);
    }
}

fn native_callbacks(window: &Weak<HeadlessWindow>) -> NativeCallbacks {
    NativeCallbacks {
        key: Some({
            let w = window.clone();
            Rc::new(move |_: NativeHandle, key: i32, scancode: i32, action: i32, mods: i32| {
                deliver(&w, |sender| {
                    let action = KeyAction::from_raw(action);
                    Some(KeyEvent::new(
                        sender,
                        KeyCode::from_raw(key),
                        scancode,
                        Modifiers::from_bits(mods as u32),
                        action.is_down(),
                        action == KeyAction::Repeat,
                    ))
                })
            })
        }),
        mouse_button: Some({
            let w = window.clone();
            Rc::new(move |_: NativeHandle, button: i32, action: i32, mods: i32| {
                deliver(&w, |sender| {
                    let Some(button) = MouseButton::from_raw(button) else {
                        tracing::warn!(button, "ignoring unknown mouse button");
                        return None;
                    };
                    Some(MouseEvent::new(
                        sender,
                        button,
                        Modifiers::from_bits(mods as u32),
                        action == KeyAction::PRESS,
                    ))
                })
            })
        }),
        scroll: Some({
            let w = window.clone();
            Rc::new(move |_: NativeHandle, x: f64, y: f64| {
                deliver(&w, |sender| Some(CursorScrollEvent::new(sender, x, y)))
            })
        }),
        cursor_pos: Some({
            let w = window.clone();
            Rc::new(move |_: NativeHandle, x: f64, y: f64| {
                deliver(&w, |sender| Some(CursorPositionEvent::new(sender, x, y)))
            })
        }),
        cursor_enter: Some({
            let w = window.clone();
            Rc::new(move |_: NativeHandle, entered: i32| {
                deliver(&w, |sender| Some(CursorEnterEvent::new(sender, entered != 0)))
            })
        }),
        char: Some({
            let w = window.clone();
            Rc::new(move |_: NativeHandle, code_point: u32| {
                deliver(&w, |sender| Some(CharInputEvent::new(sender, code_point)))
            })
        }),
        resize: Some({
            let w = window.clone();
            Rc::new(move |_: NativeHandle, width: i32, height: i32| {
                deliver(&w, |sender| {
                    Some(WindowResizeEvent::new(
                        sender,
                        width.max(0) as u32,
                        height.max(0) as u32,
                    ))
                })
            })
        }),
        focus: Some({
            let w = window.clone();
            Rc::new(move |_: NativeHandle, focused: i32| {
                deliver(&w, |sender| Some(WindowFocusEvent::new(sender, focused != 0)))
            })
        }),
        close: Some({
            let w = window.clone();
            Rc::new(move |_: NativeHandle| {
                deliver(&w, |sender| Some(WindowCloseEvent::new(sender)))
            })
        }),
        moved: Some({
            let w = window.clone();
            Rc::new(move |_: NativeHandle, x: i32, y: i32| {
                deliver(&w, |sender| {
                    Some(WindowPositionEvent::new(sender, f64::from(x), f64::from(y)))
                })
            })
        }),
    }
}
