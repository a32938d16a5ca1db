//! The ten typed input events.
//!
//! Each event carries the window that produced it, an immutable payload and
//! a `handled` flag that handlers may set. Events live on the stack of the
//! callback that built them and are gone once dispatch returns.

use std::fmt;
use std::rc::{Rc, Weak};

use super::types::{InputEventType, KeyCode, Modifiers, MouseButton};
use crate::window::{NativeHandle, Window};

/// Non-owning reference to the window an event came from.
///
/// Events built outside a backend (tests, synthetic input) may be detached.
#[derive(Clone, Default)]
pub struct WindowRef(Option<Weak<dyn Window>>);

impl WindowRef {
    pub fn new(window: &Rc<dyn Window>) -> Self {
        Self(Some(Rc::downgrade(window)))
    }

    pub fn from_weak(window: Weak<dyn Window>) -> Self {
        Self(Some(window))
    }

    pub fn detached() -> Self {
        Self(None)
    }

    /// The window, while it is alive.
    pub fn upgrade(&self) -> Option<Rc<dyn Window>> {
        self.0.as_ref().and_then(Weak::upgrade)
    }

    pub fn native_window(&self) -> Option<NativeHandle> {
        self.upgrade().map(|w| w.native_window())
    }

    pub fn is_detached(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Debug for WindowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.native_window() {
            Some(handle) => write!(f, "WindowRef({handle})"),
            None if self.is_detached() => f.write_str("WindowRef(detached)"),
            None => f.write_str("WindowRef(dropped)"),
        }
    }
}

/// Common surface of every input event.
///
/// `Display` gives the diagnostic string, [`name`](InputEvent::name) the short
/// type name.
pub trait InputEvent: fmt::Display + 'static {
    const TYPE: InputEventType;

    fn name(&self) -> &'static str;
    fn window(&self) -> &WindowRef;
    fn was_handled(&self) -> bool;
    fn mark_handled(&mut self);

    fn event_type(&self) -> InputEventType {
        Self::TYPE
    }

    fn sender(&self) -> Option<Rc<dyn Window>> {
        self.window().upgrade()
    }
}

macro_rules! impl_input_event {
    ($($event:ident => $tag:ident),* $(,)?) => {
        $(
            impl InputEvent for $event {
                const TYPE: InputEventType = InputEventType::$tag;

                fn name(&self) -> &'static str {
                    stringify!($event)
                }

                fn window(&self) -> &WindowRef {
                    &self.sender
                }

                fn was_handled(&self) -> bool {
                    self.handled
                }

                fn mark_handled(&mut self) {
                    self.handled = true;
                }
            }
        )*
    };
}

impl_input_event! {
    KeyEvent => Key,
    MouseEvent => Mouse,
    CursorScrollEvent => CursorScroll,
    CursorPositionEvent => CursorPosition,
    CursorEnterEvent => CursorEnter,
    CharInputEvent => CharInput,
    WindowCloseEvent => WindowClose,
    WindowFocusEvent => WindowFocus,
    WindowPositionEvent => WindowPosition,
    WindowResizeEvent => WindowResize,
}

#[derive(Debug)]
pub struct KeyEvent {
    sender: WindowRef,
    handled: bool,
    key: KeyCode,
    scan_code: i32,
    modifiers: Modifiers,
    down: bool,
    repeating: bool,
}

impl KeyEvent {
    pub fn new(
        sender: WindowRef,
        key: KeyCode,
        scan_code: i32,
        modifiers: Modifiers,
        down: bool,
        repeating: bool,
    ) -> Self {
        Self {
            sender,
            handled: false,
            key,
            scan_code,
            modifiers,
            down,
            repeating,
        }
    }

    pub fn key(&self) -> KeyCode {
        self.key
    }

    pub fn scan_code(&self) -> i32 {
        self.scan_code
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn is_down(&self) -> bool {
        self.down
    }

    pub fn is_repeating(&self) -> bool {
        self.repeating
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.down { "Pressed" } else { "Released" };
        write!(
            f,
            "Key {state}: {:?} (scancode {}, modifiers {}",
            self.key, self.scan_code, self.modifiers
        )?;
        if self.repeating {
            f.write_str(", repeat")?;
        }
        f.write_str(")")
    }
}

#[derive(Debug)]
pub struct MouseEvent {
    sender: WindowRef,
    handled: bool,
    button: MouseButton,
    modifiers: Modifiers,
    down: bool,
}

impl MouseEvent {
    pub fn new(sender: WindowRef, button: MouseButton, modifiers: Modifiers, down: bool) -> Self {
        Self {
            sender,
            handled: false,
            button,
            modifiers,
            down,
        }
    }

    pub fn button(&self) -> MouseButton {
        self.button
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn is_down(&self) -> bool {
        self.down
    }
}

impl fmt::Display for MouseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.down { "Pressed" } else { "Released" };
        write!(f, "Mouse {state}: {:?}", self.button)
    }
}

/// Scroll offsets, in scroll steps.
#[derive(Debug)]
pub struct CursorScrollEvent {
    sender: WindowRef,
    handled: bool,
    x: f64,
    y: f64,
}

impl CursorScrollEvent {
    pub fn new(sender: WindowRef, x: f64, y: f64) -> Self {
        Self {
            sender,
            handled: false,
            x,
            y,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

impl fmt::Display for CursorScrollEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cursor Scroll: ({:.2}, {:.2})", self.x, self.y)
    }
}

/// Cursor position relative to the window's content area.
#[derive(Debug)]
pub struct CursorPositionEvent {
    sender: WindowRef,
    handled: bool,
    x: f64,
    y: f64,
}

impl CursorPositionEvent {
    pub fn new(sender: WindowRef, x: f64, y: f64) -> Self {
        Self {
            sender,
            handled: false,
            x,
            y,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

impl fmt::Display for CursorPositionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cursor Position : ({:.2}, {:.2})", self.x, self.y)
    }
}

#[derive(Debug)]
pub struct CursorEnterEvent {
    sender: WindowRef,
    handled: bool,
    entered: bool,
}

impl CursorEnterEvent {
    pub fn new(sender: WindowRef, entered: bool) -> Self {
        Self {
            sender,
            handled: false,
            entered,
        }
    }

    pub fn entered(&self) -> bool {
        self.entered
    }
}

impl fmt::Display for CursorEnterEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.entered {
            "Cursor Entered"
        } else {
            "Cursor Left"
        })
    }
}

/// A Unicode scalar typed into the window.
#[derive(Debug)]
pub struct CharInputEvent {
    sender: WindowRef,
    handled: bool,
    code_point: u32,
}

impl CharInputEvent {
    pub const PLACEHOLDER: char = '?';

    pub fn new(sender: WindowRef, code_point: u32) -> Self {
        Self {
            sender,
            handled: false,
            code_point,
        }
    }

    pub fn code_point(&self) -> u32 {
        self.code_point
    }

    /// The character, if the code point is a Unicode scalar value.
    pub fn as_char(&self) -> Option<char> {
        char::from_u32(self.code_point)
    }

    /// UTF-8 rendering of the code point: one to four bytes, or `?` for
    /// surrogates and values above U+10FFFF.
    pub fn to_utf8(&self) -> String {
        self.as_char().unwrap_or(Self::PLACEHOLDER).to_string()
    }
}

impl fmt::Display for CharInputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Char Typed: {}", self.to_utf8())
    }
}

#[derive(Debug)]
pub struct WindowCloseEvent {
    sender: WindowRef,
    handled: bool,
}

impl WindowCloseEvent {
    pub fn new(sender: WindowRef) -> Self {
        Self {
            sender,
            handled: false,
        }
    }
}

impl fmt::Display for WindowCloseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Window Close")
    }
}

#[derive(Debug)]
pub struct WindowFocusEvent {
    sender: WindowRef,
    handled: bool,
    focused: bool,
}

impl WindowFocusEvent {
    pub fn new(sender: WindowRef, focused: bool) -> Self {
        Self {
            sender,
            handled: false,
            focused,
        }
    }

    pub fn focused(&self) -> bool {
        self.focused
    }
}

impl fmt::Display for WindowFocusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.focused {
            "Window Focussed"
        } else {
            "Window Unfocussed"
        })
    }
}

/// New position of the window's top-left corner, in screen coordinates.
#[derive(Debug)]
pub struct WindowPositionEvent {
    sender: WindowRef,
    handled: bool,
    x: f64,
    y: f64,
}

impl WindowPositionEvent {
    pub fn new(sender: WindowRef, x: f64, y: f64) -> Self {
        Self {
            sender,
            handled: false,
            x,
            y,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

impl fmt::Display for WindowPositionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Window Position: ({}, {})", self.x, self.y)
    }
}

#[derive(Debug)]
pub struct WindowResizeEvent {
    sender: WindowRef,
    handled: bool,
    width: u32,
    height: u32,
}

impl WindowResizeEvent {
    pub fn new(sender: WindowRef, width: u32, height: u32) -> Self {
        Self {
            sender,
            handled: false,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Display for WindowResizeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Window Resize: ({}, {})", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_input_encodes_by_range() {
        let ascii = CharInputEvent::new(WindowRef::detached(), 0x41);
        assert_eq!(ascii.to_utf8(), "A");

        let two = CharInputEvent::new(WindowRef::detached(), 0xE9);
        assert_eq!(two.to_utf8().as_bytes(), &[0xC3, 0xA9]);

        let three = CharInputEvent::new(WindowRef::detached(), 0x5BB6);
        assert_eq!(three.to_utf8().as_bytes(), &[0xE5, 0xAE, 0xB6]);

        let four = CharInputEvent::new(WindowRef::detached(), 0x1F600);
        assert_eq!(four.to_utf8().len(), 4);
    }

    #[test]
    fn char_input_out_of_range_uses_placeholder() {
        let event = CharInputEvent::new(WindowRef::detached(), 0x110000);
        assert_eq!(event.to_utf8(), "?");
        assert_eq!(event.to_string(), "Char Typed: ?");

        let surrogate = CharInputEvent::new(WindowRef::detached(), 0xD800);
        assert_eq!(surrogate.to_utf8(), "?");
    }

    #[test]
    fn key_event_display_mentions_repeat() {
        let event = KeyEvent::new(
            WindowRef::detached(),
            KeyCode::KeyD,
            52,
            Modifiers::CONTROL | Modifiers::ALT,
            true,
            true,
        );
        assert_eq!(
            event.to_string(),
            "Key Pressed: KeyD (scancode 52, modifiers Control|Alt, repeat)"
        );
    }

    #[test]
    fn handled_flag_starts_clear() {
        let mut event = WindowCloseEvent::new(WindowRef::detached());
        assert!(!event.was_handled());
        event.mark_handled();
        assert!(event.was_handled());
    }

    #[test]
    fn names_and_tags_match() {
        let event = WindowResizeEvent::new(WindowRef::detached(), 1, 2);
        assert_eq!(event.name(), "WindowResizeEvent");
        assert_eq!(event.event_type(), InputEventType::WindowResize);
        assert!(event.sender().is_none());
    }
}
