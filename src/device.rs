//! Device lifecycle: resource acquisition, tick driving and shutdown.
//!
//! [`TrafficDevice`] ties a [`SignalController`] to the platform. It claims the
//! lamp outputs and button interrupts through a [`Board`], keeps the one-shot
//! [`TickTimer`] re-armed and tears everything down in an order that never
//! writes to a released pin.

use core::marker::PhantomData;

use embedded_hal::digital::OutputPin;

use crate::config::{DeviceConfig, PinAssignment};
use crate::controller::SignalController;
use crate::lights::{GpioLights, SignalLights};
use crate::status::{self, StatusSession};
use crate::time::{TickTimer, TimeDuration};
use crate::types::{Button, Light};

/// Platform resource primitives.
///
/// Implement this for your HAL. Button handlers registered by
/// [`claim_button`](Board::claim_button) must forward falling edges to
/// [`SignalController::on_button_a`] (mode) or
/// [`SignalController::on_button_b`] (pedestrian).
pub trait Board {
    /// Output pin type handed out for the lamps.
    type Output: OutputPin;

    /// Error reported when a resource cannot be claimed.
    type Error;

    /// Claims the output pin for `light`, configured as an output driven low.
    fn claim_output(&mut self, light: Light, pin: u32) -> Result<Self::Output, Self::Error>;

    /// Returns a previously claimed output pin to the platform.
    fn release_output(&mut self, light: Light, output: Self::Output);

    /// Configures `pin` as an input and registers the falling-edge handler
    /// for `button`.
    fn claim_button(&mut self, button: Button, pin: u32) -> Result<(), Self::Error>;

    /// Unregisters the handler for `button` and releases its pin.
    fn release_button(&mut self, button: Button);
}

/// Lamp outputs built from a board's pins.
pub type BoardLights<B> =
    GpioLights<<B as Board>::Output, <B as Board>::Output, <B as Board>::Output>;

/// A resource that could not be claimed during startup.
///
/// Everything claimed before the failure has already been released when this
/// error is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupError<E> {
    /// Lamp output pin unavailable.
    Output { light: Light, source: E },

    /// Button pin or interrupt line unavailable.
    Button { button: Button, source: E },
}

impl<E: core::fmt::Display> core::fmt::Display for StartupError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StartupError::Output { light, source } => {
                write!(f, "failed to claim {} light output: {}", light, source)
            }
            StartupError::Button { button, source } => {
                write!(f, "failed to claim {}: {}", button, source)
            }
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug + core::fmt::Display> std::error::Error for StartupError<E> {}

/// A running traffic light.
///
/// # Type Parameters
/// * `'c` - Lifetime of the controller reference
/// * `B` - Board providing pins and interrupts
/// * `T` - One-shot tick timer
/// * `D` - Duration type accepted by the timer
pub struct TrafficDevice<'c, B: Board, T: TickTimer<D>, D: TimeDuration> {
    board: B,
    timer: T,
    lights: BoardLights<B>,
    controller: &'c SignalController,
    _duration: PhantomData<D>,
}

impl<'c, B: Board, T: TickTimer<D>, D: TimeDuration> TrafficDevice<'c, B, T, D> {
    /// Claims all resources, switches the lamps off and arms the first tick.
    ///
    /// Acquisition is all-or-nothing: on failure every resource claimed so
    /// far is released again, the controller is left untouched and the timer
    /// is never armed.
    pub fn start(
        mut board: B,
        mut timer: T,
        controller: &'c SignalController,
        config: &DeviceConfig,
    ) -> Result<Self, StartupError<B::Error>> {
        let lights = match claim_all(&mut board, &config.pins) {
            Ok(lights) => lights,
            Err(err) => {
                match &err {
                    StartupError::Output { light, .. } => {
                        error!("startup failed: {} light output unavailable", light)
                    }
                    StartupError::Button { button, .. } => {
                        error!("startup failed: {} unavailable", button)
                    }
                }
                return Err(err);
            }
        };

        let mut lights = lights.active_low(config.active_low);
        lights.all_off();

        controller.set_cycle_rate(config.initial_rate);
        timer.schedule(D::from_millis(config.initial_rate.period_millis()));
        info!("traffic device started at {}", config.initial_rate);

        Ok(Self {
            board,
            timer,
            lights,
            controller,
            _duration: PhantomData,
        })
    }

    /// Timer expiry handler: runs one tick and re-arms the timer with the
    /// period read during that tick.
    pub fn on_timer(&mut self) {
        let delay: D = self.controller.on_tick(&mut self.lights);
        self.timer.schedule(delay);
    }

    /// Opens a session on the status channel.
    pub fn open_status(&self) -> StatusSession<'c> {
        StatusSession::open(self.controller)
    }

    /// Handles a write to the configuration channel.
    pub fn write_config(&self, input: &[u8]) -> usize {
        status::write_config(self.controller, input)
    }

    /// Returns the controller driven by this device.
    pub fn controller(&self) -> &'c SignalController {
        self.controller
    }

    /// Stops the device and hands the board and timer back.
    ///
    /// The timer is cancelled first, so no tick can touch the lamps while
    /// they are switched off and released.
    pub fn stop(mut self) -> (B, T) {
        self.timer.cancel();

        self.board.release_button(Button::Pedestrian);
        self.board.release_button(Button::Mode);

        self.lights.all_off();
        let (red, yellow, green) = self.lights.into_parts();
        self.board.release_output(Light::Green, green);
        self.board.release_output(Light::Yellow, yellow);
        self.board.release_output(Light::Red, red);

        info!("traffic device stopped");
        (self.board, self.timer)
    }
}

fn claim_all<B: Board>(
    board: &mut B,
    pins: &PinAssignment,
) -> Result<BoardLights<B>, StartupError<B::Error>> {
    let red = board
        .claim_output(Light::Red, pins.light(Light::Red))
        .map_err(|source| StartupError::Output {
            light: Light::Red,
            source,
        })?;

    let yellow = match board.claim_output(Light::Yellow, pins.light(Light::Yellow)) {
        Ok(pin) => pin,
        Err(source) => {
            board.release_output(Light::Red, red);
            return Err(StartupError::Output {
                light: Light::Yellow,
                source,
            });
        }
    };

    let green = match board.claim_output(Light::Green, pins.light(Light::Green)) {
        Ok(pin) => pin,
        Err(source) => {
            board.release_output(Light::Yellow, yellow);
            board.release_output(Light::Red, red);
            return Err(StartupError::Output {
                light: Light::Green,
                source,
            });
        }
    };

    let lights = GpioLights::new(red, yellow, green);

    if let Err(source) = board.claim_button(Button::Mode, pins.button(Button::Mode)) {
        release_lights(board, lights);
        return Err(StartupError::Button {
            button: Button::Mode,
            source,
        });
    }

    if let Err(source) = board.claim_button(Button::Pedestrian, pins.button(Button::Pedestrian)) {
        board.release_button(Button::Mode);
        release_lights(board, lights);
        return Err(StartupError::Button {
            button: Button::Pedestrian,
            source,
        });
    }

    Ok(lights)
}

fn release_lights<B: Board>(board: &mut B, lights: BoardLights<B>) {
    let (red, yellow, green) = lights.into_parts();
    board.release_output(Light::Green, green);
    board.release_output(Light::Yellow, yellow);
    board.release_output(Light::Red, red);
}
