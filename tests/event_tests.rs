//! Payloads and diagnostic strings of the input events.

mod common;

use common::approx_eq;
use strata::events::{
    CharInputEvent, CursorEnterEvent, CursorPositionEvent, CursorScrollEvent, InputEvent,
    InputEventType, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, WindowCloseEvent,
    WindowFocusEvent, WindowPositionEvent, WindowRef, WindowResizeEvent,
};

fn detached() -> WindowRef {
    WindowRef::detached()
}

// === Payloads ===

#[test]
fn resize_stores_values() {
    let event = WindowResizeEvent::new(detached(), 1024, 768);
    assert_eq!(event.width(), 1024);
    assert_eq!(event.height(), 768);
}

#[test]
fn resize_string_embeds_the_dimensions() {
    let text = WindowResizeEvent::new(detached(), 1024, 768).to_string();
    assert!(text.contains("1024"));
    assert!(text.contains("768"));
    assert_eq!(
        WindowResizeEvent::new(detached(), 800, 600).to_string(),
        "Window Resize: (800, 600)"
    );
}

#[test]
fn char_input_stores_code_point() {
    let event = CharInputEvent::new(detached(), u32::from('A'));
    assert_eq!(event.code_point(), 0x41);
    assert_eq!(event.as_char(), Some('A'));

    let house = CharInputEvent::new(detached(), 0x5BB6);
    assert_eq!(house.code_point(), 0x5BB6);
    assert_eq!(house.to_utf8(), "\u{5BB6}");
}

#[test]
fn char_input_utf8_lengths_follow_code_point_ranges() {
    let cases = [(0x7F_u32, 1_usize), (0x80, 2), (0x7FF, 2), (0x800, 3), (0xFFFF, 3), (0x10000, 4), (0x10FFFF, 4)];
    for (code_point, len) in cases {
        let event = CharInputEvent::new(detached(), code_point);
        assert_eq!(event.to_utf8().len(), len, "U+{code_point:X}");
    }
}

#[test]
fn char_input_rejects_non_scalar_values() {
    for code_point in [0xD800_u32, 0xDFFF, 0x110000, u32::MAX] {
        let event = CharInputEvent::new(detached(), code_point);
        assert_eq!(event.as_char(), None);
        assert_eq!(event.to_utf8(), "?");
    }
}

#[test]
fn mouse_event_stores_button() {
    let event = MouseEvent::new(detached(), MouseButton::Button4, Modifiers::NONE, false);
    assert_eq!(event.button(), MouseButton::Button4);
    assert!(!event.is_down());
    assert!(event.modifiers().is_empty());
}

#[test]
fn cursor_position_stores_coordinates() {
    let event = CursorPositionEvent::new(detached(), 300.5, 400.25);
    assert!(approx_eq(event.x(), 300.5));
    assert!(approx_eq(event.y(), 400.25));
}

#[test]
fn cursor_scroll_stores_offsets() {
    let event = CursorScrollEvent::new(detached(), 0.0, -1.5);
    assert!(approx_eq(event.x(), 0.0));
    assert!(approx_eq(event.y(), -1.5));
}

#[test]
fn key_event_stores_everything() {
    let mods = Modifiers::CONTROL | Modifiers::ALT;
    let event = KeyEvent::new(detached(), KeyCode::KeyD, 52, mods, true, true);
    assert_eq!(event.key(), KeyCode::KeyD);
    assert_eq!(event.modifiers(), mods);
    assert!(event.is_down());
    assert_eq!(event.scan_code(), 52);
    assert!(event.is_repeating());
}

// === Diagnostic strings ===

#[test]
fn every_event_formats_its_payload() {
    let mods = Modifiers::CONTROL | Modifiers::ALT;
    let cases: Vec<(String, &str)> = vec![
        (
            KeyEvent::new(detached(), KeyCode::KeyD, 52, mods, true, true).to_string(),
            "Key Pressed: KeyD (scancode 52, modifiers Control|Alt, repeat)",
        ),
        (
            KeyEvent::new(detached(), KeyCode::Escape, 9, Modifiers::NONE, false, false).to_string(),
            "Key Released: Escape (scancode 9, modifiers None)",
        ),
        (
            MouseEvent::new(detached(), MouseButton::Button4, Modifiers::NONE, false).to_string(),
            "Mouse Released: Button4",
        ),
        (
            CursorScrollEvent::new(detached(), 0.0, -1.5).to_string(),
            "Cursor Scroll: (0.00, -1.50)",
        ),
        (
            CursorPositionEvent::new(detached(), 300.5, 400.25).to_string(),
            "Cursor Position : (300.50, 400.25)",
        ),
        (CursorEnterEvent::new(detached(), true).to_string(), "Cursor Entered"),
        (CursorEnterEvent::new(detached(), false).to_string(), "Cursor Left"),
        (CharInputEvent::new(detached(), 0x41).to_string(), "Char Typed: A"),
        (WindowCloseEvent::new(detached()).to_string(), "Window Close"),
        (WindowFocusEvent::new(detached(), true).to_string(), "Window Focussed"),
        (WindowFocusEvent::new(detached(), false).to_string(), "Window Unfocussed"),
        (
            WindowPositionEvent::new(detached(), 10.0, 20.0).to_string(),
            "Window Position: (10, 20)",
        ),
    ];
    for (actual, expected) in cases {
        assert_eq!(actual, expected);
    }
}

// === Taxonomy ===

#[test]
fn every_event_reports_its_own_tag() {
    assert_eq!(KeyEvent::TYPE, InputEventType::Key);
    assert_eq!(MouseEvent::TYPE, InputEventType::Mouse);
    assert_eq!(CursorScrollEvent::TYPE, InputEventType::CursorScroll);
    assert_eq!(CursorPositionEvent::TYPE, InputEventType::CursorPosition);
    assert_eq!(CursorEnterEvent::TYPE, InputEventType::CursorEnter);
    assert_eq!(CharInputEvent::TYPE, InputEventType::CharInput);
    assert_eq!(WindowCloseEvent::TYPE, InputEventType::WindowClose);
    assert_eq!(WindowFocusEvent::TYPE, InputEventType::WindowFocus);
    assert_eq!(WindowPositionEvent::TYPE, InputEventType::WindowPosition);
    assert_eq!(WindowResizeEvent::TYPE, InputEventType::WindowResize);
    assert_eq!(InputEventType::COUNT, 10);
}

#[test]
fn event_type_round_trips_through_its_index() {
    for ty in InputEventType::ALL {
        assert_eq!(InputEventType::try_from(ty.index() as i32), Ok(ty));
    }
    assert!(InputEventType::try_from(10).is_err());
    assert!(InputEventType::try_from(-1).is_err());
}

#[test]
fn detached_events_have_no_sender() {
    let event = CharInputEvent::new(detached(), 0x41);
    assert!(event.window().is_detached());
    assert!(event.sender().is_none());
    assert_eq!(event.name(), "CharInputEvent");
}
