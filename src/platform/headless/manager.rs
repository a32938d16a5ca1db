//! Headless [`WindowManager`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::Dispatch;

use super::backend::HeadlessBackend;
use super::monitor::{HeadlessCursor, HeadlessMonitor};
use super::window::HeadlessWindow;
use crate::config::{MonitorConfig, PlatformConfig};
use crate::error::{PlatformError, PlatformResult};
use crate::events::KeyCode;
use crate::window::{
    Cursor, CursorType, KeySource, Monitor, Window, WindowInfo, WindowManager,
};

type MonitorList = Rc<RefCell<Vec<Rc<HeadlessMonitor>>>>;

pub struct HeadlessWindowManager {
    backend: Option<Rc<HeadlessBackend>>,
    windows: Vec<Rc<HeadlessWindow>>,
    cursors: Vec<Rc<HeadlessCursor>>,
    monitors: MonitorList,
    monitor_configs: Vec<MonitorConfig>,
    key_names: BTreeMap<i32, String>,
    log: Option<Dispatch>,
}

impl HeadlessWindowManager {
    /// `log` receives everything the manager and its windows emit, including
    /// output of handlers run from [`poll_events`](WindowManager::poll_events).
    /// Without it the global default subscriber is used.
    pub fn new(config: &PlatformConfig, log: Option<Dispatch>) -> Self {
        Self {
            backend: None,
            windows: Vec::new(),
            cursors: Vec::new(),
            monitors: Rc::new(RefCell::new(Vec::new())),
            monitor_configs: config.monitors.clone(),
            key_names: config.key_names.clone(),
            log,
        }
    }

    pub fn is_initialised(&self) -> bool {
        self.backend.is_some()
    }

    /// The native layer, for feeding it raw events.
    pub fn backend(&self) -> PlatformResult<&Rc<HeadlessBackend>> {
        self.backend.as_ref().ok_or(PlatformError::NotInitialised)
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    fn logged<R>(&self, f: impl FnOnce() -> R) -> R {
        match &self.log {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }

    fn install_monitor_callbacks(backend: &HeadlessBackend, monitors: &MonitorList) {
        let connected = Rc::downgrade(monitors);
        let disconnected = Rc::downgrade(monitors);
        backend.set_monitor_callbacks(
            Some(Rc::new(move |config: &MonitorConfig| {
                tracing::info!(monitor = %config.name, "monitor connected");
                if let Some(list) = connected.upgrade() {
                    list.borrow_mut()
                        .push(Rc::new(HeadlessMonitor::new(config.clone())));
                }
            })),
            Some(Rc::new(move |config: &MonitorConfig| {
                tracing::info!(monitor = %config.name, "monitor disconnected");
                if let Some(list) = disconnected.upgrade() {
                    list.borrow_mut().retain(|m| m.config().name != config.name);
                }
            })),
        );
    }

    /// Index of `window` among the windows this manager created. Handles
    /// are only unique per backend, so windows are matched by identity.
    fn find_window(&self, window: &Rc<dyn Window>) -> Option<usize> {
        self.windows
            .iter()
            .position(|w| std::ptr::addr_eq(Rc::as_ptr(w), Rc::as_ptr(window)))
    }
}

impl WindowManager for HeadlessWindowManager {
    fn init(&mut self) -> PlatformResult<()> {
        if self.backend.is_some() {
            return Err(PlatformError::AlreadyInitialised);
        }
        let backend = Rc::new(HeadlessBackend::new(
            self.monitor_configs.clone(),
            self.key_names.clone(),
        ));
        Self::install_monitor_callbacks(&backend, &self.monitors);
        *self.monitors.borrow_mut() = backend
            .monitors()
            .into_iter()
            .map(|config| Rc::new(HeadlessMonitor::new(config)))
            .collect();
        let count = self.monitors.borrow().len();
        self.backend = Some(backend);
        self.logged(|| tracing::info!(monitors = count, "headless backend initialised"));
        Ok(())
    }

    fn terminate(&mut self) -> PlatformResult<()> {
        let backend = self.backend.take().ok_or(PlatformError::NotInitialised)?;
        self.logged(|| tracing::trace!("terminating headless backend"));
        for window in self.windows.drain(..) {
            window.destroy();
        }
        self.cursors.clear();
        self.monitors.borrow_mut().clear();
        backend.set_monitor_callbacks(None, None);
        Ok(())
    }

    fn poll_events(&self) -> PlatformResult<()> {
        let backend = self.backend()?;
        self.logged(|| backend.poll());
        Ok(())
    }

    /// The headless backend has no outside event source, so an empty queue
    /// returns at once instead of blocking forever.
    fn wait_events(&self) -> PlatformResult<()> {
        let backend = self.backend()?;
        self.logged(|| {
            if backend.pending() == 0 {
                tracing::trace!("wait on empty event queue");
            }
            backend.poll()
        });
        Ok(())
    }

    fn has_clipboard_text(&self) -> PlatformResult<bool> {
        Ok(self.backend()?.clipboard().is_some())
    }

    fn clipboard_text(&self) -> PlatformResult<String> {
        Ok(self.backend()?.clipboard().unwrap_or_default())
    }

    fn set_clipboard_text(&self, text: &str) -> PlatformResult<()> {
        self.backend()?.set_clipboard(text);
        Ok(())
    }

    fn monitors(&self) -> PlatformResult<Vec<Rc<dyn Monitor>>> {
        self.backend()?;
        Ok(self
            .monitors
            .borrow()
            .iter()
            .map(|m| Rc::clone(m) as Rc<dyn Monitor>)
            .collect())
    }

    fn primary_monitor(&self) -> PlatformResult<Option<Rc<dyn Monitor>>> {
        let primary = self.backend()?.primary_monitor();
        let found = primary.and_then(|primary| {
            self.monitors
                .borrow()
                .iter()
                .find(|m| m.config().name == primary.name)
                .map(|m| Rc::clone(m) as Rc<dyn Monitor>)
        });
        if found.is_none() {
            self.logged(|| tracing::error!("no primary monitor found"));
        }
        Ok(found)
    }

    fn create_window(&mut self, info: &WindowInfo) -> PlatformResult<Rc<dyn Window>> {
        let backend = Rc::clone(self.backend()?);
        if info.width == 0 || info.height == 0 {
            return Err(PlatformError::WindowCreation(format!(
                "window \"{}\" has zero size {}x{}",
                info.title, info.width, info.height
            )));
        }
        self.logged(|| {
            tracing::trace!(
                "creating window \"{}\" with size {}x{}",
                info.title,
                info.width,
                info.height
            )
        });
        let window = HeadlessWindow::create(&backend, info);
        self.windows.push(Rc::clone(&window));
        Ok(window as Rc<dyn Window>)
    }

    fn destroy_window(&mut self, window: Rc<dyn Window>) -> PlatformResult<()> {
        self.backend()?;
        let index = self
            .find_window(&window)
            .ok_or(PlatformError::UnknownWindow(window.native_window()))?;
        let title = window.title();
        self.logged(|| tracing::trace!("destroying window \"{}\"", title));
        let owned = self.windows.remove(index);
        owned.destroy();
        Ok(())
    }

    fn create_cursor(&mut self, kind: CursorType) -> PlatformResult<Rc<dyn Cursor>> {
        self.backend()?;
        let cursor = Rc::new(HeadlessCursor::new(kind));
        self.cursors.push(Rc::clone(&cursor));
        Ok(cursor as Rc<dyn Cursor>)
    }

    fn destroy_cursor(&mut self, cursor: Rc<dyn Cursor>) -> PlatformResult<()> {
        self.backend()?;
        let before = self.cursors.len();
        self.cursors
            .retain(|c| !std::ptr::addr_eq(Rc::as_ptr(c), Rc::as_ptr(&cursor)));
        if self.cursors.len() == before {
            self.logged(|| tracing::warn!(kind = ?cursor.kind(), "destroying unknown cursor"));
        }
        Ok(())
    }

    fn translate_key(&self, key: i32, scancode: i32, source: KeySource) -> PlatformResult<KeyCode> {
        let backend = self.backend()?;
        let raw = KeyCode::from_raw(key);
        if source == KeySource::Physical {
            return Ok(raw);
        }
        Ok(backend
            .key_name(key, scancode)
            .and_then(|name| KeyCode::from_key_name(&name))
            .unwrap_or(raw))
    }
}

impl Drop for HeadlessWindowManager {
    fn drop(&mut self) {
        if self.backend.is_some() {
            let _ = self.terminate();
        }
    }
}
