//! Platform abstraction layer.
//!
//! File system queries, dynamic libraries, a monotonic clock and windowing,
//! each behind a trait with one implementation per target. Windows report
//! input through typed events dispatched per window; see [`events`].

pub mod config;
pub mod error;
pub mod events;
pub mod factory;
pub mod logging;
pub mod platform;
pub mod window;

pub use config::{LoggingConfig, MonitorConfig, PlatformConfig};
pub use error::{PlatformError, PlatformResult};
pub use factory::PlatformFactory;
pub use window::{PlatformWindowManager, Window, WindowInput, WindowManager};
