//! Headless implementation of [`Window`].
//!
//! Every call forwards to the native record held by the backend. Setters
//! that a desktop windowing library reports back asynchronously (size,
//! position, focus) queue the matching native event, so bound handlers see
//! the change on the next poll.

use std::cell::Cell;
use std::rc::Rc;

use super::backend::{HeadlessBackend, NativeEvent, NativeWindow};
use super::input::HeadlessWindowInput;
use crate::window::{
    Cursor, CursorMode, FSize, Monitor, NativeHandle, Point, Size, Window, WindowInfo,
    WindowInput, WindowState,
};

pub struct HeadlessWindow {
    handle: NativeHandle,
    backend: Rc<HeadlessBackend>,
    input: HeadlessWindowInput,
    destroyed: Cell<bool>,
}

impl HeadlessWindow {
    pub(crate) fn create(backend: &Rc<HeadlessBackend>, info: &WindowInfo) -> Rc<Self> {
        let handle = backend.create_window(info);
        Rc::new_cyclic(|weak| Self {
            handle,
            backend: Rc::clone(backend),
            input: HeadlessWindowInput::new(weak, handle, Rc::clone(backend)),
            destroyed: Cell::new(false),
        })
    }

    /// Detaches the native callbacks and destroys the native window. The
    /// registry lives on until the last reference to this window is gone.
    pub(crate) fn destroy(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        self.input.detach();
        self.backend.destroy_window(self.handle);
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    /// Number of times attention was requested.
    pub fn attention_requests(&self) -> u32 {
        self.read(|w| w.attention_requests)
    }

    /// Name of the monitor the window is fullscreen on.
    pub fn fullscreen_monitor(&self) -> Option<String> {
        self.backend
            .with_window(self.handle, |w| w.fullscreen.clone())
            .flatten()
    }

    fn read<R: Default>(&self, f: impl FnOnce(&NativeWindow) -> R) -> R {
        self.backend.with_window(self.handle, f).unwrap_or_default()
    }

    fn write(&self, f: impl FnOnce(&mut NativeWindow)) {
        if !self.backend.update_window(self.handle, f) {
            tracing::warn!(handle = self.handle, "call on destroyed window ignored");
        }
    }

    fn post(&self, event: NativeEvent) {
        if !self.destroyed.get() {
            self.backend.post(self.handle, event);
        }
    }
}

impl Drop for HeadlessWindow {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl Window for HeadlessWindow {
    fn size(&self) -> Size {
        self.read(|w| w.size)
    }

    fn position(&self) -> Point {
        self.read(|w| w.position)
    }

    fn cursor_position(&self) -> Point {
        let (x, y) = self.read(|w| w.cursor);
        Point::new(x as i32, y as i32)
    }

    fn opacity(&self) -> f32 {
        self.read(|w| w.opacity)
    }

    fn set_size(&self, size: Size) {
        self.post(NativeEvent::Resize {
            width: i32::try_from(size.width).unwrap_or(i32::MAX),
            height: i32::try_from(size.height).unwrap_or(i32::MAX),
        });
    }

    fn set_position(&self, point: Point) {
        self.post(NativeEvent::Move {
            x: point.x,
            y: point.y,
        });
    }

    fn set_cursor_position(&self, point: Point) {
        self.write(|w| w.cursor = (f64::from(point.x), f64::from(point.y)));
    }

    fn set_cursor_visible(&self, visible: bool) {
        self.set_cursor_mode(if visible {
            CursorMode::Normal
        } else {
            CursorMode::Hidden
        });
    }

    fn set_cursor_locked_to_window(&self, locked: bool) {
        self.set_cursor_mode(if locked {
            CursorMode::Locked
        } else {
            CursorMode::Normal
        });
    }

    fn set_opacity(&self, opacity: f32) {
        self.write(|w| w.opacity = opacity.clamp(0.0, 1.0));
    }

    fn set_cursor(&self, cursor: Option<&dyn Cursor>) {
        let shape = cursor.map(|c| c.kind());
        self.write(|w| w.cursor_shape = shape);
    }

    fn set_fullscreen(&self, monitor: Option<&dyn Monitor>) {
        let Some(monitor) = monitor else {
            self.write(|w| w.fullscreen = None);
            return;
        };
        let name = monitor.name();
        let origin = monitor.position();
        let scale = monitor.content_scale();
        self.write(|w| {
            w.fullscreen = Some(name);
            w.content_scale = scale;
        });
        self.set_position(origin);
    }

    fn set_window_state(&self, state: WindowState) {
        self.write(|w| w.state = state);
    }

    fn window_state(&self) -> WindowState {
        self.read(|w| w.state)
    }

    fn title(&self) -> String {
        self.read(|w| w.title.clone())
    }

    fn set_title(&self, title: &str) {
        self.write(|w| w.title = title.to_owned());
    }

    fn framebuffer_size(&self) -> Size {
        self.read(NativeWindow::framebuffer_size)
    }

    fn dpi_scale(&self) -> f32 {
        let window = self.size();
        if window.width == 0 {
            return 1.0;
        }
        self.framebuffer_size().width as f32 / window.width as f32
    }

    fn content_scale(&self) -> FSize {
        self.read(|w| w.content_scale)
    }

    fn cursor_mode(&self) -> CursorMode {
        self.read(|w| w.cursor_mode)
    }

    fn is_sticky_keys_enabled(&self) -> bool {
        self.read(|w| w.sticky_keys)
    }

    fn is_sticky_mouse_buttons_enabled(&self) -> bool {
        self.read(|w| w.sticky_mouse_buttons)
    }

    fn is_raw_mouse_motion_enabled(&self) -> bool {
        self.read(|w| w.raw_mouse_motion)
    }

    fn set_cursor_mode(&self, mode: CursorMode) {
        self.write(|w| w.cursor_mode = mode);
    }

    fn set_sticky_keys_enabled(&self, enabled: bool) {
        self.write(|w| w.sticky_keys = enabled);
    }

    fn set_sticky_mouse_buttons_enabled(&self, enabled: bool) {
        self.write(|w| w.sticky_mouse_buttons = enabled);
    }

    fn set_raw_mouse_motion_enabled(&self, enabled: bool) {
        self.write(|w| w.raw_mouse_motion = enabled);
    }

    fn show(&self) {
        self.write(|w| w.visible = true);
    }

    fn hide(&self) {
        self.write(|w| w.visible = false);
    }

    fn close(&self) {
        self.write(|w| w.should_close = true);
    }

    fn cancel_close(&self) {
        self.write(|w| w.should_close = false);
    }

    fn focus(&self) {
        if !self.destroyed.get() {
            self.backend.focus_window(self.handle);
        }
    }

    fn set_passthrough(&self, passthrough: bool) {
        self.write(|w| w.passthrough = passthrough);
    }

    fn set_top_most(&self, top_most: bool) {
        self.write(|w| w.top_most = top_most);
    }

    fn request_attention(&self) {
        self.write(|w| w.attention_requests += 1);
    }

    fn is_visible(&self) -> bool {
        self.read(|w| w.visible)
    }

    fn should_close(&self) -> bool {
        self.read(|w| w.should_close)
    }

    fn is_focused(&self) -> bool {
        self.read(|w| w.focused)
    }

    fn is_hovered(&self) -> bool {
        self.read(|w| w.hovered)
    }

    fn input(&self) -> &dyn WindowInput {
        &self.input
    }

    fn native_window(&self) -> NativeHandle {
        self.handle
    }

    fn native_instance(&self) -> NativeHandle {
        self.backend.instance()
    }
}
