//! Traffic signal state machine.
//!
//! [`SignalState`] holds everything the controller knows: operating mode, tick
//! counter, pedestrian flags, cycle rate and the lamp values computed by the
//! last tick. It is plain data with no interior mutability; sharing it between
//! interrupt and timer contexts is the job of
//! [`SignalController`](crate::controller::SignalController).

use crate::types::{CycleRate, LightState, OperatingMode, PedestrianRequest};

/// Ticks in one green/yellow/red cycle of normal mode.
pub const NORMAL_CYCLE_TICKS: u32 = 6;

/// Counter value at which the red phase starts.
pub const RED_PHASE_TICK: u32 = 4;

/// Ticks the red+yellow crossing overlay stays on.
pub const CROSSING_TICKS: u32 = 5;

/// Complete controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalState {
    mode: OperatingMode,
    counter: u32,
    pedestrian: PedestrianRequest,
    rate: CycleRate,
    lights: LightState,
}

impl SignalState {
    /// Normal mode at the start of the green phase, 1 Hz, lamps off.
    pub const fn new() -> Self {
        Self {
            mode: OperatingMode::Normal,
            counter: 0,
            pedestrian: PedestrianRequest::IDLE,
            rate: CycleRate::DEFAULT,
            lights: LightState::OFF,
        }
    }

    /// Returns the lamp values for the current phase, i.e. what the next tick
    /// will display.
    ///
    /// Normal mode: counter 0-2 green, 3 yellow, 4-5 red, red and yellow
    /// together while a crossing is in progress. Flashing modes light their
    /// lamp on odd counter values, so the lamp starts dark on the first tick
    /// after entering the mode.
    pub fn phase_lights(&self) -> LightState {
        match self.mode {
            OperatingMode::Normal if self.pedestrian.crossing => LightState::CROSSING,
            OperatingMode::Normal => match self.counter {
                0..=2 => LightState::GREEN,
                3 => LightState::YELLOW,
                _ => LightState::RED,
            },
            OperatingMode::FlashingRed => LightState::new(self.counter % 2 == 1, false, false),
            OperatingMode::FlashingYellow => LightState::new(false, self.counter % 2 == 1, false),
        }
    }

    /// Advances the state machine by one tick and returns the lamp values to
    /// display for it.
    pub fn tick(&mut self) -> LightState {
        let lights = self.phase_lights();

        match self.mode {
            OperatingMode::Normal if self.pedestrian.crossing => self.advance_crossing(),
            OperatingMode::Normal => self.advance_normal(),
            OperatingMode::FlashingRed | OperatingMode::FlashingYellow => {
                self.counter = self.counter.wrapping_add(1);
            }
        }

        self.lights = lights;
        lights
    }

    fn advance_crossing(&mut self) {
        self.counter += 1;
        if self.counter >= CROSSING_TICKS {
            self.pedestrian = PedestrianRequest::IDLE;
            self.counter = 0;
        }
    }

    fn advance_normal(&mut self) {
        if self.counter == RED_PHASE_TICK && self.pedestrian.requested {
            // The overlay counts its own ticks from zero.
            self.pedestrian.crossing = true;
            self.counter = 0;
        } else {
            self.counter += 1;
            if self.counter >= NORMAL_CYCLE_TICKS {
                self.counter = 0;
            }
        }
    }

    /// Handles a mode button edge: advance the mode and restart its timing.
    pub fn press_mode_button(&mut self) -> OperatingMode {
        self.mode = self.mode.next();
        self.counter = 0;
        self.mode
    }

    /// Handles a pedestrian button edge.
    ///
    /// Latches a crossing request in normal mode; ignored in flashing modes
    /// and while a request is already pending. Returns whether a new request
    /// was latched.
    pub fn press_pedestrian_button(&mut self) -> bool {
        if self.mode == OperatingMode::Normal && !self.pedestrian.requested {
            self.pedestrian.requested = true;
            true
        } else {
            false
        }
    }

    /// Returns the current operating mode.
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Returns the tick counter.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Returns the pedestrian flags.
    pub fn pedestrian(&self) -> PedestrianRequest {
        self.pedestrian
    }

    /// Returns the configured cycle rate.
    pub fn cycle_rate(&self) -> CycleRate {
        self.rate
    }

    /// Sets the cycle rate used to schedule the following ticks.
    pub fn set_cycle_rate(&mut self, rate: CycleRate) {
        self.rate = rate;
    }

    /// Returns the lamp values written by the last tick.
    pub fn lights(&self) -> LightState {
        self.lights
    }
}

impl Default for SignalState {
    fn default() -> Self {
        Self::new()
    }
}
