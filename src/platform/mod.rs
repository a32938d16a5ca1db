//! Platform-specific implementations.
//!
//! Each service is a trait here with one implementation per operating
//! system, picked by `cfg` at compile time:
//! - File system queries (working and executable directory)
//! - Dynamic library loading
//! - Monotonic clock
//!
//! The windowing backend lives in [`headless`] and is selected by cargo
//! feature rather than by target.

use std::ffi::c_void;
use std::path::{Path, PathBuf};

use crate::error::PlatformResult;

#[cfg(feature = "windowing-headless")]
pub mod headless;

#[cfg(unix)]
pub mod unix;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "windows")]
pub mod windows;

// Re-export the current platform's services for convenience
#[cfg(target_os = "linux")]
pub use self::linux::LinuxFileSystem as PlatformFileSystem;

#[cfg(target_os = "macos")]
pub use self::macos::MacFileSystem as PlatformFileSystem;

#[cfg(target_os = "windows")]
pub use self::windows::WinFileSystem as PlatformFileSystem;

#[cfg(unix)]
pub use self::unix::{UnixClock as PlatformClock, UnixLibraryLoader as PlatformLibraryLoader};

#[cfg(target_os = "windows")]
pub use self::windows::{WinClock as PlatformClock, WinLibraryLoader as PlatformLibraryLoader};

pub trait FileSystem: Send + Sync {
    fn working_directory(&self) -> PlatformResult<PathBuf>;
    /// Directory holding the running executable.
    fn executable_directory(&self) -> PlatformResult<PathBuf>;
}

/// A loaded shared library. Unloaded when dropped.
pub trait DynamicLibrary {
    fn path(&self) -> &Path;

    /// Address of the exported symbol `name`.
    ///
    /// The pointer is only valid while the library is loaded, and calling
    /// through it requires the caller to know the symbol's real signature.
    fn symbol(&self, name: &str) -> PlatformResult<*mut c_void>;
}

pub trait LibraryLoader: Send + Sync {
    fn load(&self, path: &Path) -> PlatformResult<Box<dyn DynamicLibrary>>;

    fn unload(&self, library: Box<dyn DynamicLibrary>) {
        tracing::trace!(path = %library.path().display(), "unloading library");
        drop(library);
    }
}

pub trait Clock: Send + Sync {
    /// Seconds since the clock was created.
    fn time_elapsed(&self) -> f64;
    fn sleep_milliseconds(&self, milliseconds: u32);
}

/// Directory part of an executable path.
fn parent_directory(executable: PathBuf) -> PlatformResult<PathBuf> {
    executable
        .parent()
        .map(Path::to_path_buf)
        .ok_or(crate::PlatformError::ExecutablePath)
}
