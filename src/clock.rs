/// Monotonic millisecond time source.
///
/// Paired with `embedded_hal::blocking::delay::DelayMs<u16>` for the blocking
/// conversion waits. The value wraps like an Arduino style `millis()` counter.
pub trait Clock {
    fn millis(&self) -> u32;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn millis(&self) -> u32 {
        (**self).millis()
    }
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn millis(&self) -> u32 {
        (**self).millis()
    }
}
