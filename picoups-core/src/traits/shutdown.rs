//! Host shutdown trait

/// One-shot host shutdown request
///
/// Implementations start the shutdown and return. Whether it worked is not
/// reported: once triggered there is no fallback, so callers proceed as if
/// power-off is imminent.
pub trait ShutdownAction {
    /// Request the host to halt
    fn trigger(&mut self);
}

impl<S: ShutdownAction + ?Sized> ShutdownAction for &mut S {
    fn trigger(&mut self) {
        (**self).trigger()
    }
}
