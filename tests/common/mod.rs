//! Shared test infrastructure for traffic-signal integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use traffic_signal::{Board, Button, Light, LightState, SignalLights, TickTimer, TimeDuration};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

// ============================================================================
// Event Log
// ============================================================================

/// Everything the mocks observe, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    ClaimOutput(Light, u32),
    ReleaseOutput(Light),
    ClaimButton(Button, u32),
    ReleaseButton(Button),
    PinWrite(Light, bool),
    Schedule(u64),
    Cancel,
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

// ============================================================================
// Mock Lights
// ============================================================================

/// Mock lamps that record every applied state
pub struct MockLights {
    current: LightState,
    history: heapless::Vec<LightState, 64>,
}

impl MockLights {
    pub fn new() -> Self {
        Self {
            current: LightState::OFF,
            history: heapless::Vec::new(),
        }
    }

    pub fn current(&self) -> LightState {
        self.current
    }

    pub fn history(&self) -> &[LightState] {
        &self.history
    }
}

impl SignalLights for MockLights {
    fn set(&mut self, light: Light, on: bool) {
        match light {
            Light::Red => self.current.red = on,
            Light::Yellow => self.current.yellow = on,
            Light::Green => {
                self.current.green = on;
                // Green is written last; record the completed state
                let _ = self.history.push(self.current);
            }
        }
    }
}

// ============================================================================
// Mock Timer
// ============================================================================

/// One-shot timer that only records what it was asked to do
pub struct MockTimer {
    log: EventLog,
    pending: Option<TestDuration>,
}

impl MockTimer {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            pending: None,
        }
    }

    pub fn pending(&self) -> Option<TestDuration> {
        self.pending
    }
}

impl TickTimer<TestDuration> for MockTimer {
    fn schedule(&mut self, delay: TestDuration) {
        self.pending = Some(delay);
        self.log.borrow_mut().push(Event::Schedule(delay.0));
    }

    fn cancel(&mut self) {
        self.pending = None;
        self.log.borrow_mut().push(Event::Cancel);
    }
}

// ============================================================================
// Mock Board
// ============================================================================

/// Pin write failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Output pin that logs its writes, optionally failing them
pub struct MockPin {
    light: Light,
    log: EventLog,
    failing: bool,
}

impl MockPin {
    pub fn new(light: Light, log: &EventLog) -> Self {
        Self {
            light,
            log: log.clone(),
            failing: false,
        }
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    fn write(&mut self, high: bool) -> Result<(), PinFault> {
        if self.failing {
            return Err(PinFault);
        }
        self.log.borrow_mut().push(Event::PinWrite(self.light, high));
        Ok(())
    }
}

impl ErrorType for MockPin {
    type Error = PinFault;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

/// Resource that a [`MockBoard`] refuses to hand out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailable {
    Output(Light),
    Button(Button),
}

/// Board claim failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Busy;

impl core::fmt::Display for Busy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("resource busy")
    }
}

/// Board that logs claims and releases
pub struct MockBoard {
    log: EventLog,
    unavailable: Option<Unavailable>,
    failing_light: Option<Light>,
}

impl MockBoard {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            unavailable: None,
            failing_light: None,
        }
    }

    /// Refuse to claim the given resource
    pub fn refusing(mut self, resource: Unavailable) -> Self {
        self.unavailable = Some(resource);
        self
    }

    /// Hand out a pin whose writes fail for the given light
    pub fn with_failing_pin(mut self, light: Light) -> Self {
        self.failing_light = Some(light);
        self
    }
}

impl Board for MockBoard {
    type Output = MockPin;
    type Error = Busy;

    fn claim_output(&mut self, light: Light, pin: u32) -> Result<MockPin, Busy> {
        if self.unavailable == Some(Unavailable::Output(light)) {
            return Err(Busy);
        }
        self.log.borrow_mut().push(Event::ClaimOutput(light, pin));

        let output = MockPin::new(light, &self.log);
        if self.failing_light == Some(light) {
            Ok(output.failing())
        } else {
            Ok(output)
        }
    }

    fn release_output(&mut self, light: Light, _output: MockPin) {
        self.log.borrow_mut().push(Event::ReleaseOutput(light));
    }

    fn claim_button(&mut self, button: Button, pin: u32) -> Result<(), Busy> {
        if self.unavailable == Some(Unavailable::Button(button)) {
            return Err(Busy);
        }
        self.log.borrow_mut().push(Event::ClaimButton(button, pin));
        Ok(())
    }

    fn release_button(&mut self, button: Button) {
        self.log.borrow_mut().push(Event::ReleaseButton(button));
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Claim and release events only, in order
pub fn resource_events(log: &EventLog) -> Vec<Event> {
    log.borrow()
        .iter()
        .copied()
        .filter(|e| {
            matches!(
                e,
                Event::ClaimOutput(..)
                    | Event::ReleaseOutput(_)
                    | Event::ClaimButton(..)
                    | Event::ReleaseButton(_)
            )
        })
        .collect()
}
