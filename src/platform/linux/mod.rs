//! Linux file system queries.

use std::path::PathBuf;

use crate::error::PlatformResult;
use crate::platform::{parent_directory, FileSystem};

#[derive(Debug, Default, Clone, Copy)]
pub struct LinuxFileSystem;

impl FileSystem for LinuxFileSystem {
    fn working_directory(&self) -> PlatformResult<PathBuf> {
        Ok(std::env::current_dir()?)
    }

    fn executable_directory(&self) -> PlatformResult<PathBuf> {
        parent_directory(std::fs::read_link("/proc/self/exe")?)
    }
}
