//! Input vocabulary: event tags, key codes, mouse buttons and modifier bits.
//!
//! Key and button numbering follows the GLFW tables so raw backend codes map
//! onto these enums without a lookup table.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Tag identifying one of the ten input event kinds.
///
/// The discriminant doubles as the slot index inside a
/// [`WindowEvents`](super::WindowEvents) registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum InputEventType {
    Key = 0,
    Mouse,
    CursorScroll,
    CursorPosition,
    CursorEnter,
    CharInput,
    WindowClose,
    WindowFocus,
    WindowPosition,
    WindowResize,
}

impl InputEventType {
    /// Number of event kinds.
    pub const COUNT: usize = 10;

    /// Every tag in slot order.
    pub const ALL: [InputEventType; Self::COUNT] = [
        InputEventType::Key,
        InputEventType::Mouse,
        InputEventType::CursorScroll,
        InputEventType::CursorPosition,
        InputEventType::CursorEnter,
        InputEventType::CharInput,
        InputEventType::WindowClose,
        InputEventType::WindowFocus,
        InputEventType::WindowPosition,
        InputEventType::WindowResize,
    ];

    /// Slot index of this tag, `0..COUNT`.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Tag name without the `Event` suffix.
    pub const fn name(self) -> &'static str {
        match self {
            InputEventType::Key => "Key",
            InputEventType::Mouse => "Mouse",
            InputEventType::CursorScroll => "CursorScroll",
            InputEventType::CursorPosition => "CursorPosition",
            InputEventType::CursorEnter => "CursorEnter",
            InputEventType::CharInput => "CharInput",
            InputEventType::WindowClose => "WindowClose",
            InputEventType::WindowFocus => "WindowFocus",
            InputEventType::WindowPosition => "WindowPosition",
            InputEventType::WindowResize => "WindowResize",
        }
    }
}

impl TryFrom<i32> for InputEventType {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(value)
    }
}

impl fmt::Display for InputEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a raw key or button callback reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Release,
    Press,
    Repeat,
}

impl KeyAction {
    pub const RELEASE: i32 = 0;
    pub const PRESS: i32 = 1;
    pub const REPEAT: i32 = 2;

    /// Unrecognised actions are treated as a release.
    pub fn from_raw(action: i32) -> Self {
        match action {
            Self::PRESS => KeyAction::Press,
            Self::REPEAT => KeyAction::Repeat,
            _ => KeyAction::Release,
        }
    }

    /// The backend value for this action.
    pub fn raw(self) -> i32 {
        match self {
            KeyAction::Release => Self::RELEASE,
            KeyAction::Press => Self::PRESS,
            KeyAction::Repeat => Self::REPEAT,
        }
    }

    /// Press and repeat both mean the key is held.
    pub fn is_down(self) -> bool {
        matches!(self, KeyAction::Press | KeyAction::Repeat)
    }
}

macro_rules! key_codes {
    ($($name:ident = $value:literal),* $(,)?) => {
        /// Physical key, numbered like the GLFW key table.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum KeyCode {
            Unknown = -1,
            $($name = $value),*
        }

        impl KeyCode {
            /// Maps a raw backend key code. Codes outside the table become
            /// [`KeyCode::Unknown`].
            pub fn from_raw(raw: i32) -> Self {
                match raw {
                    $($value => KeyCode::$name,)*
                    _ => KeyCode::Unknown,
                }
            }
        }
    };
}

key_codes! {
    Space = 32,
    Apostrophe = 39,
    Comma = 44,
    Minus = 45,
    Period = 46,
    Slash = 47,
    Key0 = 48,
    Key1 = 49,
    Key2 = 50,
    Key3 = 51,
    Key4 = 52,
    Key5 = 53,
    Key6 = 54,
    Key7 = 55,
    Key8 = 56,
    Key9 = 57,
    Semicolon = 59,
    Equal = 61,
    KeyA = 65,
    KeyB = 66,
    KeyC = 67,
    KeyD = 68,
    KeyE = 69,
    KeyF = 70,
    KeyG = 71,
    KeyH = 72,
    KeyI = 73,
    KeyJ = 74,
    KeyK = 75,
    KeyL = 76,
    KeyM = 77,
    KeyN = 78,
    KeyO = 79,
    KeyP = 80,
    KeyQ = 81,
    KeyR = 82,
    KeyS = 83,
    KeyT = 84,
    KeyU = 85,
    KeyV = 86,
    KeyW = 87,
    KeyX = 88,
    KeyY = 89,
    KeyZ = 90,
    LeftBracket = 91,
    Backslash = 92,
    RightBracket = 93,
    GraveAccent = 96,
    World1 = 161,
    World2 = 162,
    Escape = 256,
    Enter = 257,
    Tab = 258,
    Backspace = 259,
    Insert = 260,
    Delete = 261,
    Right = 262,
    Left = 263,
    Down = 264,
    Up = 265,
    PageUp = 266,
    PageDown = 267,
    Home = 268,
    End = 269,
    CapsLock = 280,
    ScrollLock = 281,
    NumLock = 282,
    PrintScreen = 283,
    Pause = 284,
    F1 = 290,
    F2 = 291,
    F3 = 292,
    F4 = 293,
    F5 = 294,
    F6 = 295,
    F7 = 296,
    F8 = 297,
    F9 = 298,
    F10 = 299,
    F11 = 300,
    F12 = 301,
    F13 = 302,
    F14 = 303,
    F15 = 304,
    F16 = 305,
    F17 = 306,
    F18 = 307,
    F19 = 308,
    F20 = 309,
    F21 = 310,
    F22 = 311,
    F23 = 312,
    F24 = 313,
    F25 = 314,
    Kp0 = 320,
    Kp1 = 321,
    Kp2 = 322,
    Kp3 = 323,
    Kp4 = 324,
    Kp5 = 325,
    Kp6 = 326,
    Kp7 = 327,
    Kp8 = 328,
    Kp9 = 329,
    KpDecimal = 330,
    KpDivide = 331,
    KpMultiply = 332,
    KpSubtract = 333,
    KpAdd = 334,
    KpEnter = 335,
    KpEqual = 336,
    LeftShift = 340,
    LeftControl = 341,
    LeftAlt = 342,
    LeftSuper = 343,
    RightShift = 344,
    RightControl = 345,
    RightAlt = 346,
    RightSuper = 347,
    Menu = 348,
}

impl KeyCode {
    pub const LAST: KeyCode = KeyCode::Menu;

    /// The backend value for this variant.
    pub fn raw(self) -> i32 {
        self as i32
    }

    /// Key produced by the first character of a layout key name, if the
    /// character is a digit, a letter or one of the mapped punctuation keys.
    pub fn from_key_name(name: &str) -> Option<Self> {
        let c = name.chars().next()?;
        let key = match c {
            '0'..='9' => KeyCode::from_raw(KeyCode::Key0.raw() + (c as i32 - '0' as i32)),
            'A'..='Z' => KeyCode::from_raw(KeyCode::KeyA.raw() + (c as i32 - 'A' as i32)),
            'a'..='z' => KeyCode::from_raw(KeyCode::KeyA.raw() + (c as i32 - 'a' as i32)),
            '`' => KeyCode::GraveAccent,
            '-' => KeyCode::Minus,
            '=' => KeyCode::Equal,
            '[' => KeyCode::LeftBracket,
            ']' => KeyCode::RightBracket,
            '\\' => KeyCode::Backslash,
            ';' => KeyCode::Semicolon,
            '\'' => KeyCode::Apostrophe,
            ',' => KeyCode::Comma,
            '.' => KeyCode::Period,
            '/' => KeyCode::Slash,
            _ => return None,
        };
        Some(key)
    }
}

/// Mouse button, numbered from zero like the backend reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum MouseButton {
    Button1 = 0,
    Button2,
    Button3,
    Button4,
    Button5,
    Button6,
    Button7,
    Button8,
}

impl MouseButton {
    pub const LEFT: MouseButton = MouseButton::Button1;
    pub const RIGHT: MouseButton = MouseButton::Button2;
    pub const MIDDLE: MouseButton = MouseButton::Button3;
    pub const LAST: MouseButton = MouseButton::Button8;

    /// Maps a zero-based backend button number. `None` past [`MouseButton::LAST`].
    pub fn from_raw(raw: i32) -> Option<Self> {
        let button = match raw {
            0 => MouseButton::Button1,
            1 => MouseButton::Button2,
            2 => MouseButton::Button3,
            3 => MouseButton::Button4,
            4 => MouseButton::Button5,
            5 => MouseButton::Button6,
            6 => MouseButton::Button7,
            7 => MouseButton::Button8,
            _ => return None,
        };
        Some(button)
    }

    /// The backend value for this variant.
    pub fn raw(self) -> i32 {
        self as i32
    }
}

/// Modifier keys held while a key or button event fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u32);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(0x0001);
    pub const CONTROL: Modifiers = Modifiers(0x0002);
    pub const ALT: Modifiers = Modifiers(0x0004);
    pub const SUPER: Modifiers = Modifiers(0x0008);
    pub const CAPS_LOCK: Modifiers = Modifiers(0x0010);
    pub const NUM_LOCK: Modifiers = Modifiers(0x0020);

    const NAMED: [(Modifiers, &'static str); 6] = [
        (Modifiers::SHIFT, "Shift"),
        (Modifiers::CONTROL, "Control"),
        (Modifiers::ALT, "Alt"),
        (Modifiers::SUPER, "Super"),
        (Modifiers::CAPS_LOCK, "CapsLock"),
        (Modifiers::NUM_LOCK, "NumLock"),
    ];

    /// Keeps unknown bits so the raw mask survives a round trip.
    pub const fn from_bits(bits: u32) -> Self {
        Modifiers(bits)
    }

    /// The raw modifier mask.
    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Modifiers) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }
        let mut first = true;
        for (flag, name) in Self::NAMED {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        if first {
            write!(f, "{:#x}", self.0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_indices_follow_declaration_order() {
        for (i, ty) in InputEventType::ALL.iter().enumerate() {
            assert_eq!(ty.index(), i);
            assert_eq!(InputEventType::try_from(i as i32), Ok(*ty));
        }
        assert_eq!(InputEventType::try_from(10), Err(10));
        assert_eq!(InputEventType::try_from(-1), Err(-1));
    }

    #[test]
    fn key_code_from_raw_maps_known_and_unknown() {
        assert_eq!(KeyCode::from_raw(68), KeyCode::KeyD);
        assert_eq!(KeyCode::from_raw(256), KeyCode::Escape);
        assert_eq!(KeyCode::from_raw(348), KeyCode::LAST);
        assert_eq!(KeyCode::from_raw(58), KeyCode::Unknown);
        assert_eq!(KeyCode::from_raw(-1), KeyCode::Unknown);
    }

    #[test]
    fn key_name_translation() {
        assert_eq!(KeyCode::from_key_name("q"), Some(KeyCode::KeyQ));
        assert_eq!(KeyCode::from_key_name("Z"), Some(KeyCode::KeyZ));
        assert_eq!(KeyCode::from_key_name("7"), Some(KeyCode::Key7));
        assert_eq!(KeyCode::from_key_name(";"), Some(KeyCode::Semicolon));
        assert_eq!(KeyCode::from_key_name("é"), None);
        assert_eq!(KeyCode::from_key_name(""), None);
    }

    #[test]
    fn mouse_button_aliases() {
        assert_eq!(MouseButton::from_raw(0), Some(MouseButton::LEFT));
        assert_eq!(MouseButton::from_raw(2), Some(MouseButton::MIDDLE));
        assert_eq!(MouseButton::from_raw(8), None);
    }

    #[test]
    fn key_action_down_states() {
        assert!(KeyAction::from_raw(KeyAction::PRESS).is_down());
        assert!(KeyAction::from_raw(KeyAction::REPEAT).is_down());
        assert!(!KeyAction::from_raw(KeyAction::RELEASE).is_down());
        assert_eq!(KeyAction::from_raw(42), KeyAction::Release);
    }

    #[test]
    fn modifiers_display_and_contains() {
        let mods = Modifiers::CONTROL | Modifiers::ALT;
        assert!(mods.contains(Modifiers::ALT));
        assert!(!mods.contains(Modifiers::SHIFT));
        assert_eq!(mods.to_string(), "Control|Alt");
        assert_eq!(Modifiers::NONE.to_string(), "None");
        assert_eq!(Modifiers::from_bits(0x100).to_string(), "0x100");
    }
}
