//! Monitors and cursors of the headless backend.

use crate::config::MonitorConfig;
use crate::window::{Cursor, CursorType, FSize, Monitor, Point, Size};

#[derive(Debug, Clone)]
pub struct HeadlessMonitor {
    config: MonitorConfig,
}

impl HeadlessMonitor {
    pub fn new(config: MonitorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }
}

impl Monitor for HeadlessMonitor {
    fn name(&self) -> String {
        self.config.name.clone()
    }

    fn position(&self) -> Point {
        self.config.position
    }

    fn physical_size(&self) -> Size {
        self.config.physical_size
    }

    fn resolution(&self) -> Size {
        self.config.resolution
    }

    fn work_area(&self) -> Size {
        self.config.work_area
    }

    fn content_scale(&self) -> FSize {
        self.config.content_scale
    }

    fn refresh_rate(&self) -> u32 {
        self.config.refresh_rate
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessCursor {
    kind: CursorType,
}

impl HeadlessCursor {
    pub fn new(kind: CursorType) -> Self {
        Self { kind }
    }
}

impl Cursor for HeadlessCursor {
    fn kind(&self) -> CursorType {
        self.kind
    }
}
