//! Shared signal controller.
//!
//! Provides [`SignalController`], the single owner of the [`SignalState`]. It is
//! entered from three independent contexts: the tick timer, the button
//! interrupts and the configuration write path. Every entry point runs its
//! whole read-modify-write inside one critical section, so the mode, counter
//! and pedestrian flags are always observed and updated together.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::lights::SignalLights;
use crate::signal::SignalState;
use crate::status::Snapshot;
use crate::time::TimeDuration;
use crate::types::{CycleRate, OperatingMode};

/// Traffic signal controller shared between interrupt, timer and I/O contexts.
///
/// `SignalController::new` is `const`, so the controller can live in a
/// `static` and be reached from interrupt handlers:
///
/// ```
/// use traffic_signal::SignalController;
///
/// static SIGNAL: SignalController = SignalController::new();
///
/// fn mode_button_isr() {
///     SIGNAL.on_button_a();
/// }
/// # mode_button_isr();
/// ```
pub struct SignalController {
    state: Mutex<RefCell<SignalState>>,
}

impl SignalController {
    /// Creates a controller in normal mode at the default cycle rate.
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(SignalState::new())),
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut SignalState) -> R) -> R {
        critical_section::with(|cs| f(&mut self.state.borrow_ref_mut(cs)))
    }

    /// Runs one tick: computes the lamp values, writes them to `lights` and
    /// returns the delay until the next tick.
    ///
    /// The delay is derived from the cycle rate read in the same critical
    /// section as the state update, so a rate change takes effect from the
    /// following period. The lamps are written after the critical section has
    /// been left; a failed write is the sink's business and is corrected by
    /// the next tick.
    pub fn on_tick<L: SignalLights, D: TimeDuration>(&self, lights: &mut L) -> D {
        let (lamps, rate) = self.with_state(|state| (state.tick(), state.cycle_rate()));

        trace!(
            "tick: red={} yellow={} green={}",
            lamps.red,
            lamps.yellow,
            lamps.green
        );
        lights.apply(lamps);

        D::from_millis(rate.period_millis())
    }

    /// Mode button (button A) falling-edge handler.
    ///
    /// Safe to call from interrupt context: constant time, no allocation.
    /// Every edge counts; contact bounce advances the mode more than once.
    pub fn on_button_a(&self) {
        let mode = self.with_state(|state| state.press_mode_button());
        debug!("mode button: now {}", mode);
    }

    /// Pedestrian button (button B) falling-edge handler.
    ///
    /// Safe to call from interrupt context. Only latches a request in normal
    /// mode when none is pending.
    pub fn on_button_b(&self) {
        if self.with_state(|state| state.press_pedestrian_button()) {
            debug!("pedestrian crossing requested");
        }
    }

    /// Returns the current operating mode.
    pub fn mode(&self) -> OperatingMode {
        self.with_state(|state| state.mode())
    }

    /// Returns the configured cycle rate.
    pub fn cycle_rate(&self) -> CycleRate {
        self.with_state(|state| state.cycle_rate())
    }

    /// Sets the cycle rate. Applies from the next scheduled tick.
    pub fn set_cycle_rate(&self, rate: CycleRate) {
        let previous = self.with_state(|state| {
            let previous = state.cycle_rate();
            state.set_cycle_rate(rate);
            previous
        });

        if previous != rate {
            info!("cycle rate {} -> {}", previous, rate);
        }
    }

    /// Returns a consistent copy of the full state.
    pub fn state(&self) -> SignalState {
        self.with_state(|state| *state)
    }

    /// Takes a status snapshot in one critical section.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(&self.state())
    }
}

impl Default for SignalController {
    fn default() -> Self {
        Self::new()
    }
}
