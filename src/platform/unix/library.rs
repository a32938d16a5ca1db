use std::ffi::{c_void, CStr, CString};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;

use crate::error::{PlatformError, PlatformResult};
use crate::platform::{DynamicLibrary, LibraryLoader};

/// Last `dlerror` message, if any.
fn last_error() -> Option<String> {
    // SAFETY: dlerror returns null or a NUL-terminated string that stays
    // valid until the next dl* call on this thread; it is copied at once.
    unsafe {
        let message = libc::dlerror();
        if message.is_null() {
            None
        } else {
            Some(CStr::from_ptr(message).to_string_lossy().into_owned())
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UnixLibraryLoader;

impl LibraryLoader for UnixLibraryLoader {
    fn load(&self, path: &Path) -> PlatformResult<Box<dyn DynamicLibrary>> {
        let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|_| {
            PlatformError::LibraryLoad {
                path: path.to_path_buf(),
                reason: String::from("path contains a NUL byte"),
            }
        })?;

        // SAFETY: c_path is a valid NUL-terminated string for the call.
        let handle = unsafe { libc::dlopen(c_path.as_ptr(), libc::RTLD_LAZY | libc::RTLD_LOCAL) };
        let Some(handle) = NonNull::new(handle) else {
            return Err(PlatformError::LibraryLoad {
                path: path.to_path_buf(),
                reason: last_error().unwrap_or_else(|| String::from("unknown error")),
            });
        };

        tracing::trace!(path = %path.display(), "library loaded");
        Ok(Box::new(UnixDynamicLibrary {
            handle,
            path: path.to_path_buf(),
        }))
    }
}

pub struct UnixDynamicLibrary {
    handle: NonNull<c_void>,
    path: PathBuf,
}

impl DynamicLibrary for UnixDynamicLibrary {
    fn path(&self) -> &Path {
        &self.path
    }

    fn symbol(&self, name: &str) -> PlatformResult<*mut c_void> {
        let c_name =
            CString::new(name).map_err(|_| PlatformError::InvalidSymbolName(name.to_owned()))?;

        // Clear any stale error so a null result can be told apart.
        let _ = last_error();
        // SAFETY: the handle came from dlopen and is open until drop.
        let address = unsafe { libc::dlsym(self.handle.as_ptr(), c_name.as_ptr()) };
        if address.is_null() {
            return Err(PlatformError::SymbolNotFound {
                name: name.to_owned(),
                reason: last_error().unwrap_or_else(|| String::from("symbol is null")),
            });
        }
        Ok(address)
    }
}

impl Drop for UnixDynamicLibrary {
    fn drop(&mut self) {
        // SAFETY: the handle came from dlopen and is closed exactly once.
        if unsafe { libc::dlclose(self.handle.as_ptr()) } != 0 {
            tracing::warn!(
                path = %self.path.display(),
                error = last_error().as_deref().unwrap_or("unknown error"),
                "dlclose failed"
            );
        }
    }
}

impl std::fmt::Debug for UnixDynamicLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnixDynamicLibrary")
            .field("path", &self.path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_library_reports_path() {
        let Err(err) = UnixLibraryLoader.load(Path::new("/nonexistent/libstrata_missing.so"))
        else {
            panic!("loaded a missing library");
        };
        match err {
            PlatformError::LibraryLoad { path, reason } => {
                assert!(path.ends_with("libstrata_missing.so"));
                assert!(!reason.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn nul_in_path_is_rejected() {
        assert!(matches!(
            UnixLibraryLoader.load(Path::new("lib\0c.so")),
            Err(PlatformError::LibraryLoad { .. })
        ));
    }
}
