//! Headless demo: opens a window, logs every input event it receives from a
//! scripted sequence of native events, and exits on the close event.
//!
//! Usage: `strata-demo [config.json]`

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use strata::events::{
    CharInputEvent, CursorEnterEvent, CursorPositionEvent, CursorScrollEvent, EventHandler,
    EventSlot, InputEvent, KeyAction, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent,
    WindowCloseEvent, WindowEvents, WindowFocusEvent, WindowPositionEvent, WindowResizeEvent,
};
use strata::platform::headless::NativeEvent;
use strata::window::KeySource;
use strata::{logging, PlatformConfig, PlatformFactory, PlatformResult, WindowManager};

fn main() {
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("strata.json"));
    // Logging is configured by the file, so load problems are reported
    // once the subscriber is up.
    let loaded = PlatformConfig::try_load(&config_path);
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        Ok(None) | Err(_) => PlatformConfig::default(),
    };
    let _logging = logging::init(&config.logging);
    match loaded {
        Ok(Some(_)) => tracing::info!(path = %config_path.display(), "config loaded"),
        Ok(None) => tracing::info!(path = %config_path.display(), "no config file, using defaults"),
        Err(e) => {
            tracing::warn!(path = %config_path.display(), error = %e, "ignoring unreadable config");
        }
    }

    if let Err(e) = run(&config) {
        tracing::error!(error = %e, "demo failed");
        std::process::exit(1);
    }
}

/// Binds a handler that logs every `E` it sees.
fn log_events<E: EventSlot>(events: &WindowEvents) -> EventHandler<E> {
    events.bind_fn(|event: &mut E| {
        tracing::info!(event = event.name(), "{event}");
    })
}

fn run(config: &PlatformConfig) -> PlatformResult<()> {
    let clock = PlatformFactory::clock();
    let fs = PlatformFactory::file_system();
    tracing::info!(
        cwd = %fs.working_directory()?.display(),
        exe_dir = %fs.executable_directory()?.display(),
        "platform ready"
    );

    let mut manager = PlatformFactory::window_manager(config, None);
    manager.init()?;
    if let Some(monitor) = manager.primary_monitor()? {
        tracing::info!(
            monitor = %monitor.name(),
            width = monitor.resolution().width,
            height = monitor.resolution().height,
            "primary monitor"
        );
    }

    let window = manager.create_window(&config.window)?;
    let closed = Rc::new(Cell::new(false));
    {
        let events = window.input().events();
        let _ = log_events::<KeyEvent>(events);
        let _ = log_events::<MouseEvent>(events);
        let _ = log_events::<CursorScrollEvent>(events);
        let _ = log_events::<CursorPositionEvent>(events);
        let _ = log_events::<CursorEnterEvent>(events);
        let _ = log_events::<CharInputEvent>(events);
        let _ = log_events::<WindowCloseEvent>(events);
        let _ = log_events::<WindowFocusEvent>(events);
        let _ = log_events::<WindowPositionEvent>(events);
        let _ = log_events::<WindowResizeEvent>(events);

        let flag = Rc::clone(&closed);
        let _ = events.bind_fn(move |event: &mut WindowCloseEvent| {
            flag.set(true);
            event.mark_handled();
        });
    }

    let backend = Rc::clone(manager.backend()?);
    let handle = window.native_window();
    let ctrl_alt = (Modifiers::CONTROL | Modifiers::ALT).bits() as i32;
    let script = [
        NativeEvent::Focus { focused: 1 },
        NativeEvent::CursorEnter { entered: 1 },
        NativeEvent::CursorPos { x: 300.5, y: 400.25 },
        NativeEvent::MouseButton { button: MouseButton::LEFT.raw(), action: KeyAction::PRESS, mods: 0 },
        NativeEvent::MouseButton { button: MouseButton::LEFT.raw(), action: KeyAction::RELEASE, mods: 0 },
        NativeEvent::Key { key: KeyCode::KeyD.raw(), scancode: 40, action: KeyAction::PRESS, mods: ctrl_alt },
        NativeEvent::Key { key: KeyCode::KeyD.raw(), scancode: 40, action: KeyAction::REPEAT, mods: ctrl_alt },
        NativeEvent::Key { key: KeyCode::KeyD.raw(), scancode: 40, action: KeyAction::RELEASE, mods: 0 },
        NativeEvent::Char { code_point: u32::from('h') },
        NativeEvent::Char { code_point: u32::from('i') },
        NativeEvent::Scroll { x: 0.0, y: -1.5 },
        NativeEvent::Move { x: 10, y: 20 },
        NativeEvent::Resize { width: 800, height: 600 },
        NativeEvent::CursorEnter { entered: 0 },
        NativeEvent::Close,
    ];
    for event in script {
        backend.post(handle, event);
    }

    while !closed.get() {
        manager.wait_events()?;
        if backend.pending() == 0 && !closed.get() {
            tracing::warn!("event queue drained without a close event");
            break;
        }
    }

    let logical = manager.translate_key(KeyCode::KeyQ.raw(), 24, KeySource::Logical)?;
    tracing::info!(?logical, "scancode 24 translated");

    manager.destroy_window(window)?;
    manager.terminate()?;
    tracing::info!(elapsed = clock.time_elapsed(), "demo finished");
    Ok(())
}
