//! Windows services using the Win32 API.
//!
//! - Executable path (`GetModuleFileNameW`)
//! - Library loading (`LoadLibraryW` / `GetProcAddress` / `FreeLibrary`)
//! - High resolution clock (`QueryPerformanceCounter`)

use std::ffi::{c_void, CString, OsString};
use std::iter;
use std::os::windows::ffi::{OsStrExt, OsStringExt};
use std::path::{Path, PathBuf};

use windows::core::{PCSTR, PCWSTR};
use windows::Win32::Foundation::{GetLastError, HMODULE};
use windows::Win32::System::LibraryLoader::{
    FreeLibrary, GetModuleFileNameW, GetProcAddress, LoadLibraryW,
};
use windows::Win32::System::Performance::{QueryPerformanceCounter, QueryPerformanceFrequency};
use windows::Win32::System::Threading::Sleep;

use crate::error::{PlatformError, PlatformResult};
use crate::platform::{parent_directory, Clock, DynamicLibrary, FileSystem, LibraryLoader};

#[derive(Debug, Default, Clone, Copy)]
pub struct WinFileSystem;

impl FileSystem for WinFileSystem {
    fn working_directory(&self) -> PlatformResult<PathBuf> {
        Ok(std::env::current_dir()?)
    }

    fn executable_directory(&self) -> PlatformResult<PathBuf> {
        let mut buffer = vec![0u16; 260];
        loop {
            // SAFETY: the buffer is writable for its whole length.
            let len = unsafe { GetModuleFileNameW(None, &mut buffer) } as usize;
            if len == 0 {
                return Err(PlatformError::ExecutablePath);
            }
            if len < buffer.len() {
                let path = OsString::from_wide(&buffer[..len]);
                return parent_directory(PathBuf::from(path));
            }
            // Truncated: retry with a larger buffer.
            buffer.resize(buffer.len() * 2, 0);
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WinLibraryLoader;

impl LibraryLoader for WinLibraryLoader {
    fn load(&self, path: &Path) -> PlatformResult<Box<dyn DynamicLibrary>> {
        let wide: Vec<u16> = path
            .as_os_str()
            .encode_wide()
            .chain(iter::once(0))
            .collect();
        // SAFETY: wide is NUL-terminated and outlives the call.
        let module = unsafe { LoadLibraryW(PCWSTR(wide.as_ptr())) }.map_err(|e| {
            PlatformError::LibraryLoad {
                path: path.to_path_buf(),
                reason: e.message(),
            }
        })?;
        tracing::trace!(path = %path.display(), "library loaded");
        Ok(Box::new(WinDynamicLibrary {
            module,
            path: path.to_path_buf(),
        }))
    }
}

pub struct WinDynamicLibrary {
    module: HMODULE,
    path: PathBuf,
}

impl DynamicLibrary for WinDynamicLibrary {
    fn path(&self) -> &Path {
        &self.path
    }

    fn symbol(&self, name: &str) -> PlatformResult<*mut c_void> {
        let c_name =
            CString::new(name).map_err(|_| PlatformError::InvalidSymbolName(name.to_owned()))?;
        // SAFETY: the module is loaded until drop; c_name is NUL-terminated.
        let address = unsafe { GetProcAddress(self.module, PCSTR(c_name.as_ptr().cast())) };
        match address {
            Some(f) => Ok(f as *mut c_void),
            None => Err(PlatformError::SymbolNotFound {
                name: name.to_owned(),
                reason: format!("GetProcAddress failed with error {}", unsafe { GetLastError() }.0),
            }),
        }
    }
}

impl Drop for WinDynamicLibrary {
    fn drop(&mut self) {
        // SAFETY: the module came from LoadLibraryW and is freed exactly once.
        if let Err(e) = unsafe { FreeLibrary(self.module) } {
            tracing::warn!(path = %self.path.display(), error = %e, "FreeLibrary failed");
        }
    }
}

/// Performance-counter clock started at construction.
pub struct WinClock {
    start: i64,
    frequency: i64,
}

fn performance_counter() -> i64 {
    let mut ticks = 0i64;
    // Always succeeds on Windows XP and later.
    let _ = unsafe { QueryPerformanceCounter(&mut ticks) };
    ticks
}

impl WinClock {
    pub fn new() -> Self {
        let mut frequency = 0i64;
        let _ = unsafe { QueryPerformanceFrequency(&mut frequency) };
        Self {
            start: performance_counter(),
            frequency: frequency.max(1),
        }
    }
}

impl Default for WinClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WinClock {
    fn time_elapsed(&self) -> f64 {
        (performance_counter() - self.start) as f64 / self.frequency as f64
    }

    fn sleep_milliseconds(&self, milliseconds: u32) {
        unsafe { Sleep(milliseconds) };
    }
}
