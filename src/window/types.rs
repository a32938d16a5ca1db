//! Plain data shared by windows, monitors and the window manager.

use std::ops::{BitAnd, BitOr};

use serde::{Deserialize, Serialize};

/// Backend identifier of a native window or instance.
pub type NativeHandle = u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Fractional size, used for content scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FSize {
    pub width: f32,
    pub height: f32,
}

impl FSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for FSize {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorMode {
    /// Visible and free.
    #[default]
    Normal,
    /// Hidden while over the window, still free.
    Hidden,
    /// Hidden and locked to the window.
    Locked,
}

/// Standard cursor shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorType {
    Arrow,
    Crosshair,
    Hand,
    HResize,
    IBeam,
    NESWResize,
    NotAllowed,
    NWSEResize,
    Resize,
    VResize,
}

/// How [`WindowManager::translate_key`](super::WindowManager::translate_key)
/// interprets a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// Layout independent.
    Physical,
    /// Layout dependent, after translation through the key name.
    Logical,
}

/// Creation flags for a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowCreateFlags(u32);

impl WindowCreateFlags {
    pub const NONE: Self = Self(0x0000_0000);
    pub const RESIZABLE: Self = Self(0x0000_0001);
    pub const DECORATED: Self = Self(0x0000_0002);
    pub const VISIBLE: Self = Self(0x0000_0004);
    pub const FOCUSED: Self = Self(0x0000_0008);
    pub const PASSTHROUGH: Self = Self(0x0000_0010);
    pub const TOP_MOST: Self = Self(0x0000_0020);
    pub const HIGH_DPI: Self = Self(0x0000_0040);

    pub const DEFAULT: Self =
        Self(Self::RESIZABLE.0 | Self::DECORATED.0 | Self::VISIBLE.0 | Self::FOCUSED.0);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for WindowCreateFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl BitOr for WindowCreateFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for WindowCreateFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Everything needed to create a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowInfo {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub initial_state: WindowState,
    pub flags: WindowCreateFlags,
}

impl Default for WindowInfo {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: String::from("strata"),
            initial_state: WindowState::Normal,
            flags: WindowCreateFlags::DEFAULT,
        }
    }
}
