//! Time abstraction traits for platform-agnostic tick scheduling.

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait for abstracting the one-shot timer that drives the controller.
///
/// The timer fires once per [`schedule`](TickTimer::schedule) call; the expiry
/// handler is expected to call [`TrafficDevice::on_timer`], which re-arms it.
/// This self-rescheduling shape lets a changed cycle rate apply from the next
/// period on.
///
/// [`TrafficDevice::on_timer`]: crate::device::TrafficDevice::on_timer
pub trait TickTimer<D: TimeDuration> {
    /// Arms the timer to fire once after `delay`.
    ///
    /// Re-arming replaces any pending expiry.
    fn schedule(&mut self, delay: D);

    /// Cancels any pending expiry.
    ///
    /// Must not return while an expiry handler is still running, so that the
    /// caller may release the outputs right afterwards.
    fn cancel(&mut self);
}
