//! Light output abstraction.
//!
//! Defines the [`SignalLights`] trait the controller writes lamp values to, and
//! [`GpioLights`], an implementation over three `embedded-hal` output pins.

use embedded_hal::digital::OutputPin;

use crate::types::{Light, LightState};

/// Trait for abstracting the three lamp outputs.
///
/// Implement this for your hardware (GPIO, shift register, relay board, etc.)
/// to let the controller drive it. The lamps are written one at a time; no
/// atomic update of all three is assumed.
pub trait SignalLights {
    /// Switches a single lamp on or off.
    ///
    /// Handle any hardware errors internally - this method cannot fail. The
    /// controller rewrites every lamp on each tick, so a failed write is
    /// corrected by the next one.
    fn set(&mut self, light: Light, on: bool);

    /// Writes all three lamps, red first.
    fn apply(&mut self, state: LightState) {
        for light in Light::ALL {
            self.set(light, state.get(light));
        }
    }

    /// Switches all lamps off.
    fn all_off(&mut self) {
        self.apply(LightState::OFF);
    }
}

/// Lamps wired to three GPIO output pins.
///
/// Pin write errors are logged and otherwise ignored so the control loop keeps
/// running.
pub struct GpioLights<R, Y, G>
where
    R: OutputPin,
    Y: OutputPin,
    G: OutputPin,
{
    red: R,
    yellow: Y,
    green: G,
    active_low: bool,
}

impl<R, Y, G> GpioLights<R, Y, G>
where
    R: OutputPin,
    Y: OutputPin,
    G: OutputPin,
{
    /// Creates lamps driven active-high (pin high = lamp on).
    pub fn new(red: R, yellow: Y, green: G) -> Self {
        Self {
            red,
            yellow,
            green,
            active_low: false,
        }
    }

    /// Selects active-low wiring (pin low = lamp on).
    pub fn active_low(mut self, active_low: bool) -> Self {
        self.active_low = active_low;
        self
    }

    /// Releases the pins.
    pub fn into_parts(self) -> (R, Y, G) {
        (self.red, self.yellow, self.green)
    }

    fn drive<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), P::Error> {
        if high { pin.set_high() } else { pin.set_low() }
    }
}

impl<R, Y, G> SignalLights for GpioLights<R, Y, G>
where
    R: OutputPin,
    Y: OutputPin,
    G: OutputPin,
{
    fn set(&mut self, light: Light, on: bool) {
        let high = on != self.active_low;
        let ok = match light {
            Light::Red => Self::drive(&mut self.red, high).is_ok(),
            Light::Yellow => Self::drive(&mut self.yellow, high).is_ok(),
            Light::Green => Self::drive(&mut self.green, high).is_ok(),
        };

        if !ok {
            warn!("failed to switch {} light {}", light, if on { "on" } else { "off" });
        }
    }
}
