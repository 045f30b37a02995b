//! Device configuration.

use crate::types::{Button, CycleRate, Light};

/// Board pin numbers of the lamps and buttons.
///
/// Defaults match the reference board wiring: red 67, yellow 68, green 44,
/// mode button 26, pedestrian button 46.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment {
    pub red: u32,
    pub yellow: u32,
    pub green: u32,
    pub mode_button: u32,
    pub pedestrian_button: u32,
}

impl PinAssignment {
    /// Returns the pin driving `light`.
    pub const fn light(&self, light: Light) -> u32 {
        match light {
            Light::Red => self.red,
            Light::Yellow => self.yellow,
            Light::Green => self.green,
        }
    }

    /// Returns the pin sensing `button`.
    pub const fn button(&self, button: Button) -> u32 {
        match button {
            Button::Mode => self.mode_button,
            Button::Pedestrian => self.pedestrian_button,
        }
    }
}

impl Default for PinAssignment {
    fn default() -> Self {
        Self {
            red: 67,
            yellow: 68,
            green: 44,
            mode_button: 26,
            pedestrian_button: 46,
        }
    }
}

/// Startup configuration for a [`TrafficDevice`](crate::device::TrafficDevice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    /// Pin numbers handed to the board.
    pub pins: PinAssignment,

    /// Cycle rate applied at startup.
    pub initial_rate: CycleRate,

    /// Lamps light when their pin is driven low.
    pub active_low: bool,
}

impl DeviceConfig {
    /// Replaces the pin assignment.
    pub fn with_pins(mut self, pins: PinAssignment) -> Self {
        self.pins = pins;
        self
    }

    /// Replaces the startup cycle rate.
    pub fn with_initial_rate(mut self, rate: CycleRate) -> Self {
        self.initial_rate = rate;
        self
    }

    /// Selects active-low lamp wiring.
    pub fn with_active_low(mut self, active_low: bool) -> Self {
        self.active_low = active_low;
        self
    }
}
