//! In-process windowing backend.
//!
//! ```text
//! HeadlessWindowManager ── owns ──► HeadlessBackend (Rc, native layer)
//!        │                               ▲      │ poll(): ten callbacks
//!        │ create_window                 │      ▼
//!        └────────────► HeadlessWindow ──┘  HeadlessWindowInput ──► WindowEvents
//! ```
//!
//! Nothing here touches the OS, which makes it usable in tests and on
//! machines without a display. Raw input is fed through
//! [`HeadlessBackend::post`] and delivered by
//! [`WindowManager::poll_events`](crate::window::WindowManager::poll_events).

pub mod backend;
pub mod input;
pub mod manager;
pub mod monitor;
pub mod window;

pub use backend::{HeadlessBackend, NativeCallbacks, NativeEvent, NativeWindow};
pub use input::HeadlessWindowInput;
pub use manager::HeadlessWindowManager;
pub use monitor::{HeadlessCursor, HeadlessMonitor};
pub use window::HeadlessWindow;
