use std::time::Duration;

use crate::platform::Clock;

fn monotonic_now() -> libc::timespec {
    // SAFETY: timespec is plain data; clock_gettime fills it in.
    let mut now: libc::timespec = unsafe { std::mem::zeroed() };
    // CLOCK_MONOTONIC is always available, so the call cannot fail.
    unsafe {
        libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut now);
    }
    now
}

/// Monotonic clock started at construction.
pub struct UnixClock {
    start: libc::timespec,
}

impl UnixClock {
    pub fn new() -> Self {
        Self {
            start: monotonic_now(),
        }
    }
}

impl Default for UnixClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for UnixClock {
    fn time_elapsed(&self) -> f64 {
        let now = monotonic_now();
        (now.tv_sec - self.start.tv_sec) as f64 + (now.tv_nsec - self.start.tv_nsec) as f64 / 1e9
    }

    fn sleep_milliseconds(&self, milliseconds: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(milliseconds)));
    }
}
