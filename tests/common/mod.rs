//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use strata::events::{KeyCode, KeyEvent, Modifiers, WindowRef};
use strata::platform::headless::{HeadlessBackend, HeadlessWindowManager};
use strata::window::WindowInfo;
use strata::{PlatformConfig, Window, WindowManager};

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

/// A key-down for `D` with no window attached.
pub fn key_d() -> KeyEvent {
    KeyEvent::new(
        WindowRef::detached(),
        KeyCode::KeyD,
        0,
        Modifiers::NONE,
        true,
        false,
    )
}

/// Records what handlers saw, in call order.
pub type Log<T> = Rc<RefCell<Vec<T>>>;

pub fn log<T>() -> Log<T> {
    Rc::new(RefCell::new(Vec::new()))
}

/// An initialised headless manager with one default window.
pub struct Headless {
    pub manager: HeadlessWindowManager,
    pub backend: Rc<HeadlessBackend>,
    pub window: Rc<dyn Window>,
}

impl Headless {
    pub fn new() -> Self {
        Self::with_config(&PlatformConfig::default())
    }

    pub fn with_config(config: &PlatformConfig) -> Self {
        let mut manager = HeadlessWindowManager::new(config, None);
        manager.init().expect("init headless backend");
        let backend = Rc::clone(manager.backend().expect("backend after init"));
        let window = manager
            .create_window(&WindowInfo::default())
            .expect("create window");
        Self {
            manager,
            backend,
            window,
        }
    }

    pub fn handle(&self) -> u64 {
        self.window.native_window()
    }

    pub fn poll(&self) {
        self.manager.poll_events().expect("poll events");
    }
}
