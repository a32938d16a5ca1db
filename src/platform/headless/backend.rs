//! In-process native windowing layer.
//!
//! Plays the part a native windowing library plays for a desktop backend:
//! it owns the native window records, the ten per-window native callbacks,
//! the monitor list and the clipboard, and it queues raw events that are
//! only delivered from [`HeadlessBackend::poll`] on the calling thread.
//!
//! Native state changes when an event is delivered, not when it is queued,
//! so a callback always sees state that matches the event it receives.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::MonitorConfig;
use crate::events::{KeyAction, KeyCode};
use crate::window::{
    CursorMode, CursorType, FSize, NativeHandle, Point, Size, WindowCreateFlags, WindowInfo,
    WindowState,
};

/// Raw window event, with parameters as a native library reports them.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeEvent {
    Key {
        key: i32,
        scancode: i32,
        action: i32,
        mods: i32,
    },
    MouseButton {
        button: i32,
        action: i32,
        mods: i32,
    },
    Scroll {
        x: f64,
        y: f64,
    },
    CursorPos {
        x: f64,
        y: f64,
    },
    CursorEnter {
        entered: i32,
    },
    Char {
        code_point: u32,
    },
    Resize {
        width: i32,
        height: i32,
    },
    Focus {
        focused: i32,
    },
    Close,
    Move {
        x: i32,
        y: i32,
    },
}

pub type KeyCallback = Rc<dyn Fn(NativeHandle, i32, i32, i32, i32)>;
pub type MouseButtonCallback = Rc<dyn Fn(NativeHandle, i32, i32, i32)>;
pub type ScrollCallback = Rc<dyn Fn(NativeHandle, f64, f64)>;
pub type CursorPosCallback = Rc<dyn Fn(NativeHandle, f64, f64)>;
pub type CursorEnterCallback = Rc<dyn Fn(NativeHandle, i32)>;
pub type CharCallback = Rc<dyn Fn(NativeHandle, u32)>;
pub type ResizeCallback = Rc<dyn Fn(NativeHandle, i32, i32)>;
pub type FocusCallback = Rc<dyn Fn(NativeHandle, i32)>;
pub type CloseCallback = Rc<dyn Fn(NativeHandle)>;
pub type MoveCallback = Rc<dyn Fn(NativeHandle, i32, i32)>;

/// The ten callbacks one native window reports through.
#[derive(Default, Clone)]
pub struct NativeCallbacks {
    pub key: Option<KeyCallback>,
    pub mouse_button: Option<MouseButtonCallback>,
    pub scroll: Option<ScrollCallback>,
    pub cursor_pos: Option<CursorPosCallback>,
    pub cursor_enter: Option<CursorEnterCallback>,
    pub char: Option<CharCallback>,
    pub resize: Option<ResizeCallback>,
    pub focus: Option<FocusCallback>,
    pub close: Option<CloseCallback>,
    pub moved: Option<MoveCallback>,
}

impl NativeCallbacks {
    /// Number of callbacks installed.
    pub fn installed(&self) -> usize {
        [
            self.key.is_some(),
            self.mouse_button.is_some(),
            self.scroll.is_some(),
            self.cursor_pos.is_some(),
            self.cursor_enter.is_some(),
            self.char.is_some(),
            self.resize.is_some(),
            self.focus.is_some(),
            self.close.is_some(),
            self.moved.is_some(),
        ]
        .into_iter()
        .filter(|installed| *installed)
        .count()
    }
}

pub type MonitorConnectedCallback = Rc<dyn Fn(&MonitorConfig)>;
pub type MonitorDisconnectedCallback = Rc<dyn Fn(&MonitorConfig)>;

/// Native record of one window.
#[derive(Debug, Clone)]
pub struct NativeWindow {
    pub title: String,
    pub size: Size,
    pub position: Point,
    pub cursor: (f64, f64),
    pub opacity: f32,
    pub state: WindowState,
    pub content_scale: FSize,
    pub high_dpi: bool,
    pub resizable: bool,
    pub decorated: bool,
    pub visible: bool,
    pub focused: bool,
    pub hovered: bool,
    pub passthrough: bool,
    pub top_most: bool,
    pub should_close: bool,
    pub cursor_mode: CursorMode,
    pub cursor_shape: Option<CursorType>,
    pub fullscreen: Option<String>,
    pub sticky_keys: bool,
    pub sticky_mouse_buttons: bool,
    pub raw_mouse_motion: bool,
    pub attention_requests: u32,
    keys: HashSet<i32>,
    buttons: HashSet<i32>,
}

impl NativeWindow {
    fn new(info: &WindowInfo, content_scale: FSize) -> Self {
        let flags = info.flags;
        Self {
            title: info.title.clone(),
            size: Size::new(info.width, info.height),
            position: Point::default(),
            cursor: (0.0, 0.0),
            opacity: 1.0,
            state: info.initial_state,
            content_scale,
            high_dpi: flags.contains(WindowCreateFlags::HIGH_DPI),
            resizable: flags.contains(WindowCreateFlags::RESIZABLE),
            decorated: flags.contains(WindowCreateFlags::DECORATED),
            visible: flags.contains(WindowCreateFlags::VISIBLE),
            focused: flags.contains(WindowCreateFlags::FOCUSED),
            hovered: false,
            passthrough: flags.contains(WindowCreateFlags::PASSTHROUGH),
            top_most: flags.contains(WindowCreateFlags::TOP_MOST),
            should_close: false,
            cursor_mode: CursorMode::Normal,
            cursor_shape: None,
            fullscreen: None,
            sticky_keys: false,
            sticky_mouse_buttons: false,
            raw_mouse_motion: false,
            attention_requests: 0,
            keys: HashSet::new(),
            buttons: HashSet::new(),
        }
    }

    pub fn framebuffer_size(&self) -> Size {
        if !self.high_dpi {
            return self.size;
        }
        Size::new(
            (self.size.width as f32 * self.content_scale.width).round() as u32,
            (self.size.height as f32 * self.content_scale.height).round() as u32,
        )
    }

    pub fn is_key_down(&self, key: i32) -> bool {
        self.keys.contains(&key)
    }

    pub fn is_button_down(&self, button: i32) -> bool {
        self.buttons.contains(&button)
    }

    fn apply(&mut self, event: &NativeEvent) {
        match *event {
            NativeEvent::Key { key, action, .. } => {
                if KeyAction::from_raw(action).is_down() {
                    self.keys.insert(key);
                } else {
                    self.keys.remove(&key);
                }
            }
            NativeEvent::MouseButton { button, action, .. } => {
                if action == KeyAction::PRESS {
                    self.buttons.insert(button);
                } else {
                    self.buttons.remove(&button);
                }
            }
            NativeEvent::CursorPos { x, y } => self.cursor = (x, y),
            NativeEvent::CursorEnter { entered } => self.hovered = entered != 0,
            NativeEvent::Resize { width, height } => {
                self.size = Size::new(width.max(0) as u32, height.max(0) as u32);
            }
            NativeEvent::Focus { focused } => self.focused = focused != 0,
            NativeEvent::Close => self.should_close = true,
            NativeEvent::Move { x, y } => self.position = Point::new(x, y),
            NativeEvent::Scroll { .. } | NativeEvent::Char { .. } => {}
        }
    }
}

enum Pending {
    Window(NativeHandle, NativeEvent),
    MonitorConnected(MonitorConfig),
    MonitorDisconnected(String),
}

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Shared native layer. Handed out as `Rc` to every window it owns.
pub struct HeadlessBackend {
    instance: NativeHandle,
    next_window: Cell<NativeHandle>,
    windows: RefCell<HashMap<NativeHandle, NativeWindow>>,
    callbacks: RefCell<HashMap<NativeHandle, NativeCallbacks>>,
    queue: RefCell<VecDeque<Pending>>,
    monitors: RefCell<Vec<MonitorConfig>>,
    on_monitor_connected: RefCell<Option<MonitorConnectedCallback>>,
    on_monitor_disconnected: RefCell<Option<MonitorDisconnectedCallback>>,
    clipboard: RefCell<Option<String>>,
    key_names: BTreeMap<i32, String>,
}

impl HeadlessBackend {
    pub fn new(monitors: Vec<MonitorConfig>, key_names: BTreeMap<i32, String>) -> Self {
        Self {
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
            next_window: Cell::new(1),
            windows: RefCell::new(HashMap::new()),
            callbacks: RefCell::new(HashMap::new()),
            queue: RefCell::new(VecDeque::new()),
            monitors: RefCell::new(monitors),
            on_monitor_connected: RefCell::new(None),
            on_monitor_disconnected: RefCell::new(None),
            clipboard: RefCell::new(None),
            key_names,
        }
    }

    pub fn instance(&self) -> NativeHandle {
        self.instance
    }

    // --- windows -------------------------------------------------------

    pub fn create_window(&self, info: &WindowInfo) -> NativeHandle {
        let handle = self.next_window.get();
        self.next_window.set(handle + 1);
        let scale = self
            .monitors
            .borrow()
            .first()
            .map(|m| m.content_scale)
            .unwrap_or_default();
        self.windows
            .borrow_mut()
            .insert(handle, NativeWindow::new(info, scale));
        handle
    }

    /// Forgets the window. Queued events for it are dropped on delivery.
    pub fn destroy_window(&self, handle: NativeHandle) -> bool {
        self.callbacks.borrow_mut().remove(&handle);
        self.windows.borrow_mut().remove(&handle).is_some()
    }

    pub fn window_exists(&self, handle: NativeHandle) -> bool {
        self.windows.borrow().contains_key(&handle)
    }

    pub fn window_count(&self) -> usize {
        self.windows.borrow().len()
    }

    /// Reads the native record of `handle`.
    pub fn with_window<R>(&self, handle: NativeHandle, f: impl FnOnce(&NativeWindow) -> R) -> Option<R> {
        self.windows.borrow().get(&handle).map(f)
    }

    /// Changes the native record of `handle` without reporting anything.
    pub fn update_window(&self, handle: NativeHandle, f: impl FnOnce(&mut NativeWindow)) -> bool {
        match self.windows.borrow_mut().get_mut(&handle) {
            Some(window) => {
                f(window);
                true
            }
            None => false,
        }
    }

    /// Gives focus to `handle`, reporting the loss of focus to the window
    /// that held it.
    pub fn focus_window(&self, handle: NativeHandle) {
        let previous: Vec<NativeHandle> = self
            .windows
            .borrow()
            .iter()
            .filter(|(h, w)| **h != handle && w.focused)
            .map(|(h, _)| *h)
            .collect();
        for other in previous {
            self.post(other, NativeEvent::Focus { focused: 0 });
        }
        self.post(handle, NativeEvent::Focus { focused: 1 });
    }

    // --- callbacks -----------------------------------------------------

    pub fn set_callbacks(&self, handle: NativeHandle, callbacks: NativeCallbacks) {
        self.callbacks.borrow_mut().insert(handle, callbacks);
    }

    /// Detaches every callback of `handle`.
    pub fn clear_callbacks(&self, handle: NativeHandle) {
        self.callbacks.borrow_mut().remove(&handle);
    }

    pub fn installed_callbacks(&self, handle: NativeHandle) -> usize {
        self.callbacks
            .borrow()
            .get(&handle)
            .map_or(0, NativeCallbacks::installed)
    }

    pub fn set_monitor_callbacks(
        &self,
        connected: Option<MonitorConnectedCallback>,
        disconnected: Option<MonitorDisconnectedCallback>,
    ) {
        *self.on_monitor_connected.borrow_mut() = connected;
        *self.on_monitor_disconnected.borrow_mut() = disconnected;
    }

    // --- event queue ---------------------------------------------------

    /// Queues a raw event for `handle`.
    pub fn post(&self, handle: NativeHandle, event: NativeEvent) {
        self.queue.borrow_mut().push_back(Pending::Window(handle, event));
    }

    pub fn connect_monitor(&self, monitor: MonitorConfig) {
        self.queue
            .borrow_mut()
            .push_back(Pending::MonitorConnected(monitor));
    }

    pub fn disconnect_monitor(&self, name: &str) {
        self.queue
            .borrow_mut()
            .push_back(Pending::MonitorDisconnected(name.to_owned()));
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Delivers every event queued before the call. Events queued by the
    /// callbacks themselves wait for the next poll. Returns the number of
    /// events taken from the queue.
    pub fn poll(&self) -> usize {
        let batch = std::mem::take(&mut *self.queue.borrow_mut());
        let count = batch.len();
        for pending in batch {
            match pending {
                Pending::Window(handle, event) => self.deliver(handle, &event),
                Pending::MonitorConnected(monitor) => {
                    self.monitors.borrow_mut().push(monitor.clone());
                    let callback = self.on_monitor_connected.borrow().clone();
                    if let Some(callback) = callback {
                        callback(&monitor);
                    }
                }
                Pending::MonitorDisconnected(name) => {
                    let removed = {
                        let mut monitors = self.monitors.borrow_mut();
                        monitors
                            .iter()
                            .position(|m| m.name == name)
                            .map(|index| monitors.remove(index))
                    };
                    let callback = self.on_monitor_disconnected.borrow().clone();
                    if let (Some(monitor), Some(callback)) = (removed, callback) {
                        callback(&monitor);
                    }
                }
            }
        }
        count
    }

    fn deliver(&self, handle: NativeHandle, event: &NativeEvent) {
        if !self.update_window(handle, |window| window.apply(event)) {
            tracing::trace!(handle, ?event, "dropping event for destroyed window");
            return;
        }
        let Some(callbacks) = self.callbacks.borrow().get(&handle).cloned() else {
            return;
        };
        match *event {
            NativeEvent::Key {
                key,
                scancode,
                action,
                mods,
            } => {
                if let Some(cb) = callbacks.key {
                    cb(handle, key, scancode, action, mods);
                }
            }
            NativeEvent::MouseButton { button, action, mods } => {
                if let Some(cb) = callbacks.mouse_button {
                    cb(handle, button, action, mods);
                }
            }
            NativeEvent::Scroll { x, y } => {
                if let Some(cb) = callbacks.scroll {
                    cb(handle, x, y);
                }
            }
            NativeEvent::CursorPos { x, y } => {
                if let Some(cb) = callbacks.cursor_pos {
                    cb(handle, x, y);
                }
            }
            NativeEvent::CursorEnter { entered } => {
                if let Some(cb) = callbacks.cursor_enter {
                    cb(handle, entered);
                }
            }
            NativeEvent::Char { code_point } => {
                if let Some(cb) = callbacks.char {
                    cb(handle, code_point);
                }
            }
            NativeEvent::Resize { width, height } => {
                if let Some(cb) = callbacks.resize {
                    cb(handle, width, height);
                }
            }
            NativeEvent::Focus { focused } => {
                if let Some(cb) = callbacks.focus {
                    cb(handle, focused);
                }
            }
            NativeEvent::Close => {
                if let Some(cb) = callbacks.close {
                    cb(handle);
                }
            }
            NativeEvent::Move { x, y } => {
                if let Some(cb) = callbacks.moved {
                    cb(handle, x, y);
                }
            }
        }
    }

    // --- monitors, clipboard, keys ---------------------------------------

    pub fn monitors(&self) -> Vec<MonitorConfig> {
        self.monitors.borrow().clone()
    }

    pub fn primary_monitor(&self) -> Option<MonitorConfig> {
        self.monitors.borrow().first().cloned()
    }

    pub fn clipboard(&self) -> Option<String> {
        self.clipboard.borrow().clone()
    }

    pub fn set_clipboard(&self, text: &str) {
        *self.clipboard.borrow_mut() = Some(text.to_owned());
    }

    /// Layout name of a key: the configured name for `scancode`, else the
    /// US-layout character of printable keys.
    pub fn key_name(&self, key: i32, scancode: i32) -> Option<String> {
        if let Some(name) = self.key_names.get(&scancode) {
            return Some(name.clone());
        }
        let printable = KeyCode::Apostrophe.raw()..=KeyCode::GraveAccent.raw();
        if !printable.contains(&key) || KeyCode::from_raw(key) == KeyCode::Unknown {
            return None;
        }
        let c = char::from_u32(key as u32)?;
        Some(c.to_ascii_lowercase().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> HeadlessBackend {
        HeadlessBackend::new(vec![MonitorConfig::default()], BTreeMap::new())
    }

    #[test]
    fn events_wait_for_poll() {
        let backend = backend();
        let handle = backend.create_window(&WindowInfo::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        backend.set_callbacks(
            handle,
            NativeCallbacks {
                resize: Some(Rc::new(move |_, w, h| sink.borrow_mut().push((w, h)))),
                ..Default::default()
            },
        );

        backend.post(handle, NativeEvent::Resize { width: 640, height: 480 });
        assert!(seen.borrow().is_empty());
        assert_eq!(backend.poll(), 1);
        assert_eq!(*seen.borrow(), vec![(640, 480)]);
        assert_eq!(
            backend.with_window(handle, |w| w.size),
            Some(Size::new(640, 480))
        );
    }

    #[test]
    fn destroyed_window_drops_its_events() {
        let backend = backend();
        let handle = backend.create_window(&WindowInfo::default());
        backend.post(handle, NativeEvent::Close);
        assert!(backend.destroy_window(handle));
        assert_eq!(backend.poll(), 1);
        assert!(!backend.window_exists(handle));
    }

    #[test]
    fn key_state_follows_actions() {
        let backend = backend();
        let handle = backend.create_window(&WindowInfo::default());
        let key = KeyCode::Space.raw();
        backend.post(handle, NativeEvent::Key { key, scancode: 65, action: KeyAction::PRESS, mods: 0 });
        backend.poll();
        assert_eq!(backend.with_window(handle, |w| w.is_key_down(key)), Some(true));
        backend.post(handle, NativeEvent::Key { key, scancode: 65, action: KeyAction::RELEASE, mods: 0 });
        backend.poll();
        assert_eq!(backend.with_window(handle, |w| w.is_key_down(key)), Some(false));
    }

    #[test]
    fn key_names_prefer_configured_scancodes() {
        let mut names = BTreeMap::new();
        names.insert(24, String::from("a"));
        let backend = HeadlessBackend::new(Vec::new(), names);
        assert_eq!(backend.key_name(KeyCode::KeyQ.raw(), 24).as_deref(), Some("a"));
        assert_eq!(backend.key_name(KeyCode::KeyQ.raw(), 0).as_deref(), Some("q"));
        assert_eq!(backend.key_name(KeyCode::Escape.raw(), 0), None);
    }

    #[test]
    fn focus_moves_between_windows() {
        let backend = backend();
        let first = backend.create_window(&WindowInfo::default());
        let second = backend.create_window(&WindowInfo::default());
        backend.focus_window(second);
        backend.poll();
        assert_eq!(backend.with_window(first, |w| w.focused), Some(false));
        assert_eq!(backend.with_window(second, |w| w.focused), Some(true));
    }
}
