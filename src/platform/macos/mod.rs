//! macOS file system queries using Foundation via objc2.

use std::path::PathBuf;

use objc2::rc::autoreleasepool;
use objc2_foundation::NSBundle;

use crate::error::{PlatformError, PlatformResult};
use crate::platform::{parent_directory, FileSystem};

#[derive(Debug, Default, Clone, Copy)]
pub struct MacFileSystem;

impl FileSystem for MacFileSystem {
    fn working_directory(&self) -> PlatformResult<PathBuf> {
        Ok(std::env::current_dir()?)
    }

    /// Directory of the main bundle's executable.
    fn executable_directory(&self) -> PlatformResult<PathBuf> {
        autoreleasepool(|_| {
            let bundle = NSBundle::mainBundle();
            let executable = bundle
                .executablePath()
                .ok_or(PlatformError::ExecutablePath)?;
            parent_directory(PathBuf::from(executable.to_string()))
        })
    }
}
