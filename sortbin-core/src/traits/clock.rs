//! Monotonic time source

/// Millisecond clock
///
/// Must be monotonic. The firmware backs this with the embassy time
/// driver; tests substitute a manually advanced fake.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed epoch (usually boot)
    fn now_ms(&self) -> u64;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
