//! Entry point to the platform services.
//!
//! File system, library loader and clock are process-wide and created on
//! first use. Window managers are created per call since they own windows.

use std::sync::OnceLock;

use tracing::Dispatch;

use crate::config::PlatformConfig;
use crate::platform::{
    Clock, FileSystem, LibraryLoader, PlatformClock, PlatformFileSystem, PlatformLibraryLoader,
};
use crate::window::PlatformWindowManager;

pub struct PlatformFactory;

impl PlatformFactory {
    pub fn file_system() -> &'static dyn FileSystem {
        static FILE_SYSTEM: PlatformFileSystem = PlatformFileSystem;
        &FILE_SYSTEM
    }

    pub fn library_loader() -> &'static dyn LibraryLoader {
        static LIBRARY_LOADER: PlatformLibraryLoader = PlatformLibraryLoader;
        &LIBRARY_LOADER
    }

    /// The clock starts counting the first time this is called.
    pub fn clock() -> &'static dyn Clock {
        static CLOCK: OnceLock<PlatformClock> = OnceLock::new();
        CLOCK.get_or_init(PlatformClock::new)
    }

    /// An uninitialised window manager for the compiled-in backend.
    pub fn window_manager(config: &PlatformConfig, log: Option<Dispatch>) -> PlatformWindowManager {
        PlatformWindowManager::new(config, log)
    }
}
