//! Core types shared by the controller, the lights and the status interface.

/// Operating mode of the signal head.
///
/// The mode button walks through the variants in declaration order and wraps
/// back to `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// Regular green, yellow, red cycle with pedestrian crossing support.
    #[default]
    Normal,

    /// Red light blinks, other lights off.
    FlashingRed,

    /// Yellow light blinks, other lights off.
    FlashingYellow,
}

impl OperatingMode {
    /// Returns the mode selected by the next mode button press.
    #[inline]
    pub const fn next(self) -> Self {
        match self {
            OperatingMode::Normal => OperatingMode::FlashingRed,
            OperatingMode::FlashingRed => OperatingMode::FlashingYellow,
            OperatingMode::FlashingYellow => OperatingMode::Normal,
        }
    }

    /// Name reported on the status channel.
    pub const fn name(self) -> &'static str {
        match self {
            OperatingMode::Normal => "Normal Mode",
            OperatingMode::FlashingRed => "Flashing-red Mode",
            OperatingMode::FlashingYellow => "Flashing-yellow",
        }
    }
}

impl core::fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Tick rate of the controller in hertz, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleRate(u8);

impl CycleRate {
    /// Slowest accepted rate.
    pub const MIN: Self = CycleRate(1);

    /// Fastest accepted rate.
    pub const MAX: Self = CycleRate(9);

    /// Rate used until something else is configured.
    pub const DEFAULT: Self = CycleRate::MIN;

    /// Creates a rate, rejecting values outside `1..=9`.
    pub const fn new(hz: u8) -> Result<Self, CycleRateError> {
        if hz >= Self::MIN.0 && hz <= Self::MAX.0 {
            Ok(CycleRate(hz))
        } else {
            Err(CycleRateError::OutOfRange(hz))
        }
    }

    /// Rate in hertz.
    #[inline]
    pub const fn hz(self) -> u8 {
        self.0
    }

    /// Time between two ticks, `1000 / hz` milliseconds (integer division).
    #[inline]
    pub const fn period_millis(self) -> u64 {
        1000 / self.0 as u64
    }
}

impl Default for CycleRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl core::fmt::Display for CycleRate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} Hz", self.0)
    }
}

/// Rejected cycle rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleRateError {
    /// Rate outside `1..=9` Hz.
    OutOfRange(u8),
}

impl core::fmt::Display for CycleRateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CycleRateError::OutOfRange(hz) => {
                write!(
                    f,
                    "cycle rate {} Hz out of range ({}-{} Hz)",
                    hz,
                    CycleRate::MIN.0,
                    CycleRate::MAX.0
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CycleRateError {}

/// One of the three lamps of the signal head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Light {
    Red,
    Yellow,
    Green,
}

impl Light {
    /// All lights, top to bottom.
    pub const ALL: [Light; 3] = [Light::Red, Light::Yellow, Light::Green];

    pub const fn name(self) -> &'static str {
        match self {
            Light::Red => "red",
            Light::Yellow => "yellow",
            Light::Green => "green",
        }
    }
}

impl core::fmt::Display for Light {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the two push buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Button A, cycles the operating mode.
    Mode,

    /// Button B, requests a pedestrian crossing.
    Pedestrian,
}

impl core::fmt::Display for Button {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Button::Mode => f.write_str("mode button"),
            Button::Pedestrian => f.write_str("pedestrian button"),
        }
    }
}

/// On/off value of each lamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightState {
    pub red: bool,
    pub yellow: bool,
    pub green: bool,
}

impl LightState {
    /// All lamps dark.
    pub const OFF: Self = Self::new(false, false, false);

    /// Red only (stop).
    pub const RED: Self = Self::new(true, false, false);

    /// Yellow only (prepare to stop).
    pub const YELLOW: Self = Self::new(false, true, false);

    /// Green only (go).
    pub const GREEN: Self = Self::new(false, false, true);

    /// Red and yellow together, shown while pedestrians cross.
    pub const CROSSING: Self = Self::new(true, true, false);

    #[inline]
    pub const fn new(red: bool, yellow: bool, green: bool) -> Self {
        Self { red, yellow, green }
    }

    /// Returns the value of a single lamp.
    #[inline]
    pub const fn get(&self, light: Light) -> bool {
        match light {
            Light::Red => self.red,
            Light::Yellow => self.yellow,
            Light::Green => self.green,
        }
    }

    /// Number of lamps switched on.
    pub const fn lit_count(&self) -> u8 {
        self.red as u8 + self.yellow as u8 + self.green as u8
    }
}

/// Pedestrian crossing flags.
///
/// `requested` is latched by the pedestrian button; `crossing` is raised by the
/// tick that starts the red phase while a request is pending. Both are cleared
/// together when the crossing overlay ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PedestrianRequest {
    pub requested: bool,
    pub crossing: bool,
}

impl PedestrianRequest {
    /// No request pending and no crossing in progress.
    pub const IDLE: Self = Self {
        requested: false,
        crossing: false,
    };

    /// True while a crossing is pending or in progress.
    #[inline]
    pub const fn is_active(&self) -> bool {
        self.requested || self.crossing
    }
}
