//! Status and configuration channel.
//!
//! The controller is exposed as a small byte-oriented device: reading yields a
//! text status block once per session, writing a decimal number sets the
//! cycle rate.
//!
//! ```text
//! Current Mode: Normal Mode
//! Cycle Rate: 1 Hz
//! Red: off
//! Yellow: off
//! Green: on
//! Pedestrian: Not Active
//! ```

use core::fmt::Write;

use heapless::String;

use crate::controller::SignalController;
use crate::signal::SignalState;
use crate::types::{CycleRate, LightState, OperatingMode};

/// Longest configuration input that is decoded; anything after it is dropped.
pub const MAX_CONFIG_LEN: usize = 15;

/// Capacity of the formatted status block.
pub const STATUS_CAPACITY: usize = 160;

/// Status text buffer.
pub type StatusText = String<STATUS_CAPACITY>;

/// Point-in-time view of the controller for the status channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    pub mode: OperatingMode,
    pub cycle_rate: CycleRate,
    pub lights: LightState,
    pub pedestrian_active: bool,
}

impl Snapshot {
    /// Renders the status block.
    pub fn to_text(&self) -> StatusText {
        let mut text = StatusText::new();
        // The longest rendering is well below STATUS_CAPACITY.
        let result = write!(text, "{}", self);
        debug_assert!(result.is_ok(), "status block exceeds STATUS_CAPACITY");
        text
    }
}

/// Lamp values come from the phase of the copied state, so they always agree
/// with the mode, counter and pedestrian flags taken alongside them.
impl From<&SignalState> for Snapshot {
    fn from(state: &SignalState) -> Self {
        Self {
            mode: state.mode(),
            cycle_rate: state.cycle_rate(),
            lights: state.phase_lights(),
            pedestrian_active: state.pedestrian().is_active(),
        }
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

impl core::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Current Mode: {}", self.mode)?;
        writeln!(f, "Cycle Rate: {}", self.cycle_rate)?;
        writeln!(f, "Red: {}", on_off(self.lights.red))?;
        writeln!(f, "Yellow: {}", on_off(self.lights.yellow))?;
        writeln!(f, "Green: {}", on_off(self.lights.green))?;
        writeln!(
            f,
            "Pedestrian: {}",
            if self.pedestrian_active { "Active" } else { "Not Active" }
        )
    }
}

/// One open/read/close cycle on the status channel.
///
/// The first [`read`](StatusSession::read) takes a snapshot and delivers it;
/// every later read returns 0 (end of data). Open a new session to get fresh
/// status.
pub struct StatusSession<'c> {
    controller: &'c SignalController,
    delivered: bool,
}

impl<'c> StatusSession<'c> {
    /// Opens a session.
    pub fn open(controller: &'c SignalController) -> Self {
        Self {
            controller,
            delivered: false,
        }
    }

    /// Reads the status block into `buf`.
    ///
    /// Returns the number of bytes written. The block is truncated if `buf`
    /// is too small; the remainder is not delivered later.
    /// An empty `buf` does not consume the snapshot.
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        if buf.is_empty() || self.delivered {
            return 0;
        }
        self.delivered = true;

        let text = self.controller.snapshot().to_text();
        let len = text.len().min(buf.len());
        buf[..len].copy_from_slice(&text.as_bytes()[..len]);
        len
    }

    /// Returns true once the snapshot has been delivered.
    pub fn is_exhausted(&self) -> bool {
        self.delivered
    }
}

/// Reasons a configuration write is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Input is not valid UTF-8.
    NotUtf8,

    /// Input is not a base-10 integer.
    NotANumber,

    /// Integer outside the accepted cycle rate range.
    OutOfRange(i32),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::NotUtf8 => write!(f, "input is not valid UTF-8"),
            ConfigError::NotANumber => write!(f, "input is not a decimal integer"),
            ConfigError::OutOfRange(value) => write!(
                f,
                "cycle rate {} out of range ({}-{})",
                value,
                CycleRate::MIN.hz(),
                CycleRate::MAX.hz()
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Decodes a cycle rate from configuration input.
///
/// Only the first [`MAX_CONFIG_LEN`] bytes are considered. One trailing
/// newline and a leading sign are accepted.
pub fn parse_cycle_rate(input: &[u8]) -> Result<CycleRate, ConfigError> {
    let input = &input[..input.len().min(MAX_CONFIG_LEN)];
    let text = core::str::from_utf8(input).map_err(|_| ConfigError::NotUtf8)?;
    let text = text.strip_suffix('\n').unwrap_or(text);

    let value: i32 = text.parse().map_err(|_| ConfigError::NotANumber)?;
    u8::try_from(value)
        .ok()
        .and_then(|hz| CycleRate::new(hz).ok())
        .ok_or(ConfigError::OutOfRange(value))
}

/// Handles a write to the configuration channel.
///
/// Sets the cycle rate when `input` holds a valid rate and silently drops it
/// otherwise. Always reports the whole input as consumed.
pub fn write_config(controller: &SignalController, input: &[u8]) -> usize {
    match parse_cycle_rate(input) {
        Ok(rate) => controller.set_cycle_rate(rate),
        Err(err) => warn!("ignoring configuration write: {}", err),
    }
    input.len()
}
