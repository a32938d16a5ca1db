//! Error type shared by every platform service.
//!
//! Logical no-ops of the event system (binding a handler twice, unbinding
//! one that is not bound) are reported as `bool`, not as errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::window::NativeHandle;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("window manager not initialised")]
    NotInitialised,
    #[error("window manager already initialised")]
    AlreadyInitialised,
    #[error("unknown native window {0}")]
    UnknownWindow(NativeHandle),
    #[error("failed to create window: {0}")]
    WindowCreation(String),
    #[error("failed to create cursor: {0}")]
    CursorCreation(String),
    #[error("failed to load library {path}: {reason}")]
    LibraryLoad { path: PathBuf, reason: String },
    #[error("symbol {name} not found: {reason}")]
    SymbolNotFound { name: String, reason: String },
    #[error("invalid symbol name {0:?}")]
    InvalidSymbolName(String),
    #[error("could not resolve executable path")]
    ExecutablePath,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type PlatformResult<T> = Result<T, PlatformError>;
