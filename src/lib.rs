#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`SignalController`**: Shared, interrupt-safe owner of the signal state; entered by ticks, buttons and config writes
//! - **`SignalState`**: The state machine itself: mode, tick counter, pedestrian flags, cycle rate, lamp values
//! - **`OperatingMode`**: `Normal`, `FlashingRed` or `FlashingYellow`, cycled by the mode button
//! - **`CycleRate`**: Tick rate in hertz (1-9), sets the tick period to `1000 / hz` ms
//! - **`SignalLights`**: Trait to implement for your lamp hardware (`GpioLights` covers `embedded-hal` pins)
//! - **`TickTimer`**: Trait to implement for your one-shot timer
//! - **`Board`**: Trait to implement for pin and interrupt acquisition
//! - **`TrafficDevice`**: Claims resources, drives the tick loop and shuts down cleanly
//! - **`StatusSession`** / **`write_config`**: The status/configuration channel
//!
//! Shared state is guarded by a `critical-section` mutex. Provide a
//! critical-section implementation for your target (e.g. `cortex-m`'s
//! `critical-section-single-core` feature, or `critical-section/std` on a host).

// Must come first so the logging macros are visible to the other modules.
#[macro_use]
mod fmt;

pub mod config;
pub mod controller;
pub mod device;
pub mod lights;
pub mod signal;
pub mod status;
pub mod time;
pub mod types;

pub use config::{DeviceConfig, PinAssignment};
pub use controller::SignalController;
pub use device::{Board, BoardLights, StartupError, TrafficDevice};
pub use lights::{GpioLights, SignalLights};
pub use signal::{CROSSING_TICKS, NORMAL_CYCLE_TICKS, RED_PHASE_TICK, SignalState};
pub use status::{
    ConfigError, MAX_CONFIG_LEN, Snapshot, StatusSession, parse_cycle_rate, write_config,
};
pub use time::{TickTimer, TimeDuration};
pub use types::{
    Button, CycleRate, CycleRateError, Light, LightState, OperatingMode, PedestrianRequest,
};
