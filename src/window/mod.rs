//! Window, monitor and window-manager interfaces.
//!
//! Everything here is backend independent. The windowing backend is chosen
//! once at build time and exposed as [`PlatformWindowManager`]; callers talk
//! to it through the [`WindowManager`] trait and get [`Window`] trait objects
//! back.
//!
//! All `Window` methods take `&self`: windows are shared (`Rc`) between the
//! manager, the application and the events that name them as sender, and
//! every call happens on the thread that polls events.

pub mod types;

use std::rc::Rc;

use crate::error::PlatformResult;
use crate::events::WindowEvents;
use crate::events::{KeyCode, MouseButton};

pub use types::{
    CursorMode, CursorType, FSize, KeySource, NativeHandle, Point, Size, WindowCreateFlags,
    WindowInfo, WindowState,
};

#[cfg(feature = "windowing-headless")]
pub type PlatformWindowManager = crate::platform::headless::HeadlessWindowManager;

#[cfg(not(feature = "windowing-headless"))]
compile_error!("no windowing backend selected; enable the `windowing-headless` feature");

/// A display attached to the system.
pub trait Monitor {
    fn name(&self) -> String;
    fn position(&self) -> Point;
    /// Physical size in millimetres.
    fn physical_size(&self) -> Size;
    fn resolution(&self) -> Size;
    fn work_area(&self) -> Size;
    fn content_scale(&self) -> FSize;
    /// Refresh rate in Hz, 0 when unknown.
    fn refresh_rate(&self) -> u32;
}

/// A cursor shape created by the window manager.
pub trait Cursor {
    fn kind(&self) -> CursorType;
}

/// Per-window input state and event registry.
pub trait WindowInput {
    fn is_key_down(&self, key: KeyCode) -> bool;
    fn is_mouse_down(&self, button: MouseButton) -> bool;
    fn events(&self) -> &WindowEvents;
}

pub trait Window {
    fn size(&self) -> Size;
    fn position(&self) -> Point;
    fn cursor_position(&self) -> Point;
    fn opacity(&self) -> f32;

    fn set_size(&self, size: Size);
    fn set_position(&self, point: Point);
    fn set_cursor_position(&self, point: Point);
    fn set_cursor_visible(&self, visible: bool);
    fn set_cursor_locked_to_window(&self, locked: bool);
    fn set_opacity(&self, opacity: f32);

    /// `None` restores the default cursor.
    fn set_cursor(&self, cursor: Option<&dyn Cursor>);
    /// `None` leaves fullscreen.
    fn set_fullscreen(&self, monitor: Option<&dyn Monitor>);

    fn set_window_state(&self, state: WindowState);
    fn window_state(&self) -> WindowState;

    fn minimize(&self) {
        self.set_window_state(WindowState::Minimized);
    }

    fn maximize(&self) {
        self.set_window_state(WindowState::Maximized);
    }

    fn restore(&self) {
        self.set_window_state(WindowState::Normal);
    }

    fn is_minimized(&self) -> bool {
        self.window_state() == WindowState::Minimized
    }

    fn is_maximized(&self) -> bool {
        self.window_state() == WindowState::Maximized
    }

    fn title(&self) -> String;
    fn set_title(&self, title: &str);

    fn framebuffer_size(&self) -> Size;
    /// Framebuffer width over window width.
    fn dpi_scale(&self) -> f32;
    fn content_scale(&self) -> FSize;

    fn cursor_mode(&self) -> CursorMode;
    fn is_sticky_keys_enabled(&self) -> bool;
    fn is_sticky_mouse_buttons_enabled(&self) -> bool;
    fn is_raw_mouse_motion_enabled(&self) -> bool;
    fn set_cursor_mode(&self, mode: CursorMode);
    fn set_sticky_keys_enabled(&self, enabled: bool);
    fn set_sticky_mouse_buttons_enabled(&self, enabled: bool);
    fn set_raw_mouse_motion_enabled(&self, enabled: bool);

    fn show(&self);
    fn hide(&self);

    /// Marks the window as wanting to close.
    fn close(&self);
    /// Clears the close mark.
    fn cancel_close(&self);
    fn focus(&self);
    /// Lets mouse input pass through the window.
    fn set_passthrough(&self, passthrough: bool);
    fn set_top_most(&self, top_most: bool);
    /// Flash the taskbar entry / bounce the dock icon.
    fn request_attention(&self);

    fn is_visible(&self) -> bool;
    fn should_close(&self) -> bool;
    fn is_focused(&self) -> bool;
    fn is_hovered(&self) -> bool;

    fn input(&self) -> &dyn WindowInput;

    fn native_window(&self) -> NativeHandle;
    fn native_instance(&self) -> NativeHandle;
}

/// Owns the windowing backend: event pumping, windows, cursors, monitors.
///
/// Every method except [`init`](WindowManager::init) fails with
/// [`PlatformError::NotInitialised`](crate::PlatformError::NotInitialised)
/// until `init` has succeeded.
pub trait WindowManager {
    fn init(&mut self) -> PlatformResult<()>;
    fn terminate(&mut self) -> PlatformResult<()>;

    /// Delivers every pending native event, then returns.
    fn poll_events(&self) -> PlatformResult<()>;
    /// Waits for at least one native event, then delivers every pending one.
    fn wait_events(&self) -> PlatformResult<()>;

    fn has_clipboard_text(&self) -> PlatformResult<bool>;
    fn clipboard_text(&self) -> PlatformResult<String>;
    fn set_clipboard_text(&self, text: &str) -> PlatformResult<()>;

    fn monitors(&self) -> PlatformResult<Vec<Rc<dyn Monitor>>>;
    fn primary_monitor(&self) -> PlatformResult<Option<Rc<dyn Monitor>>>;

    fn create_window(&mut self, info: &WindowInfo) -> PlatformResult<Rc<dyn Window>>;
    /// Detaches the window's native callbacks, destroys the native window and
    /// drops the manager's reference.
    fn destroy_window(&mut self, window: Rc<dyn Window>) -> PlatformResult<()>;

    fn create_cursor(&mut self, kind: CursorType) -> PlatformResult<Rc<dyn Cursor>>;
    fn destroy_cursor(&mut self, cursor: Rc<dyn Cursor>) -> PlatformResult<()>;

    fn translate_key(&self, key: i32, scancode: i32, source: KeySource)
        -> PlatformResult<KeyCode>;
}
