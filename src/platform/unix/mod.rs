//! Services shared by every Unix target: `dlopen` library loading and the
//! `CLOCK_MONOTONIC` clock.

pub mod clock;
pub mod library;

pub use clock::UnixClock;
pub use library::{UnixDynamicLibrary, UnixLibraryLoader};
