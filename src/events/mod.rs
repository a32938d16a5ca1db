//! Typed input events and their per-window dispatch.
//!
//! A windowing backend reports raw input through native callbacks. The
//! window's input source turns each report into one of ten typed events and
//! hands it to the matching dispatcher of the window's [`WindowEvents`]
//! registry, which calls every bound handler in bind order.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              native backend (poll/wait)             │
//! └─────────────────────────┬───────────────────────────┘
//!                           │ key / button / scroll / ... callback
//!                           ▼
//! ┌─────────────────────────────────────────────────────┐
//! │          window input source (per window)           │
//! │        raw parameters ──► KeyEvent, MouseEvent, ... │
//! └─────────────────────────┬───────────────────────────┘
//!                           │ WindowEvents::dispatch::<E>()
//!                           ▼
//! ┌─────────────────────────────────────────────────────┐
//! │   WindowEvents: one EventDispatcher per event type  │
//! └─────────────────────────┬───────────────────────────┘
//!                           │ handler(&mut event), bind order
//!                           ▼
//!                     EventHandler<E> ...
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use strata::events::{InputEvent, KeyEvent};
//!
//! let handler = window.input().events().bind_fn(|e: &mut KeyEvent| {
//!     tracing::info!("{e}");
//!     e.mark_handled();
//! });
//!
//! // later
//! window.input().events().unbind_event(&handler);
//! ```
//!
//! # Module Structure
//!
//! - [`types`]: event tags, key codes, mouse buttons, modifiers
//! - [`input`]: the ten event structs and the [`InputEvent`] trait
//! - [`handler`]: [`EventHandler`] and its identity token
//! - [`dispatcher`]: [`EventDispatcher`]
//! - [`registry`]: [`WindowEvents`]

pub mod dispatcher;
pub mod handler;
pub mod input;
pub mod registry;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::{EventHandler, HandlerId};
pub use input::{
    CharInputEvent, CursorEnterEvent, CursorPositionEvent, CursorScrollEvent, InputEvent,
    KeyEvent, MouseEvent, WindowCloseEvent, WindowFocusEvent, WindowPositionEvent,
    WindowRef, WindowResizeEvent,
};
pub use registry::{EventSlot, WindowEvents};
pub use types::{InputEventType, KeyAction, KeyCode, Modifiers, MouseButton};
