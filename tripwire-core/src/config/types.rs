//! Configuration type definitions
//!
//! These types describe one countdown installation: how long the timer runs,
//! where the expiry callback goes, how the display is driven and which
//! physical trigger arms it.

use core::ops::Deref;

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::url::{Endpoint, UrlError};

/// Maximum callback URL length
pub const MAX_URL_LEN: usize = 128;

/// Longest accepted countdown (one hour)
pub const MAX_DURATION_S: u32 = 3600;

/// Brightest dimming step
pub const MAX_BRIGHTNESS: u8 = 15;

/// Slowest blink setting (0.5 Hz)
pub const MAX_BLINK_RATE: u8 = 3;

/// Default HT16K33 backpack address
pub const DEFAULT_DISPLAY_ADDRESS: u8 = 0x70;

/// Which physical trigger arms the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ArmSequence {
    /// Arm as soon as the sense wire is connected
    SenseOnly,
    /// Arm on a button press-then-release; the wire is still checked every tick
    ButtonOnly,
    /// Wait for the sense wire, then a button press-then-release
    #[default]
    SenseThenButton,
}

impl ArmSequence {
    /// Whether arming waits for the sense wire
    pub fn needs_sense(self) -> bool {
        matches!(self, ArmSequence::SenseOnly | ArmSequence::SenseThenButton)
    }

    /// Whether arming waits for the button
    pub fn needs_button(self) -> bool {
        matches!(self, ArmSequence::ButtonOnly | ArmSequence::SenseThenButton)
    }
}

/// Pin numbers of the four logical lines
///
/// The core never touches pins by number; board glue uses these to build
/// the concrete line objects it hands to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineBindings {
    /// Arming button (pull-up, pressed = low)
    pub button: u8,
    /// Wire-sense loop (pull-up, intact = low)
    pub sense: u8,
    /// "Ready, not armed" indicator
    pub ready_led: u8,
    /// Armed indicator, blinks with the seconds
    pub armed_led: u8,
}

impl Default for LineBindings {
    fn default() -> Self {
        Self {
            button: 15,
            sense: 27,
            ready_led: 10,
            armed_led: 7,
        }
    }
}

/// Complete countdown configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CountdownConfig {
    /// Countdown length in seconds (0-3600)
    pub duration_s: u32,
    /// Endpoint called once on expiry
    pub url: String<MAX_URL_LEN>,
    /// Display brightness (0-15)
    pub brightness: u8,
    /// Display blink rate (0 = off, 1 = 2 Hz, 2 = 1 Hz, 3 = 0.5 Hz)
    pub blink_rate: u8,
    /// Log every displayed value
    pub verbose: bool,
    /// Arming trigger
    pub arm: ArmSequence,
    /// 7-bit I2C address of the display backpack
    pub display_address: u8,
    /// Pin assignments
    pub pins: LineBindings,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        let mut url = String::new();
        // Fits: the literal is far below MAX_URL_LEN
        let _ = url.push_str("http://localhost/bomb");
        Self {
            duration_s: 180,
            url,
            brightness: MAX_BRIGHTNESS,
            blink_rate: 0,
            verbose: true,
            arm: ArmSequence::default(),
            display_address: DEFAULT_DISPLAY_ADDRESS,
            pins: LineBindings::default(),
        }
    }
}

/// Reasons a configuration is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Duration outside 0-3600 s
    InvalidDuration(u32),
    /// Callback URL does not parse
    InvalidUrl(UrlError),
    /// Brightness above 15
    InvalidBrightness(u8),
    /// Blink rate above 3
    InvalidBlinkRate(u8),
    /// Address outside the non-reserved 7-bit range
    InvalidAddress(u8),
    /// Configuration text could not be read
    Parse(super::loader::ParseError),
}

impl From<UrlError> for ConfigError {
    fn from(e: UrlError) -> Self {
        ConfigError::InvalidUrl(e)
    }
}

impl From<super::loader::ParseError> for ConfigError {
    fn from(e: super::loader::ParseError) -> Self {
        ConfigError::Parse(e)
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidDuration(v) => write!(f, "invalid time value: {}", v),
            ConfigError::InvalidUrl(e) => write!(f, "invalid url: {}", e),
            ConfigError::InvalidBrightness(v) => write!(f, "invalid brightness: {}", v),
            ConfigError::InvalidBlinkRate(v) => write!(f, "invalid blink rate: {}", v),
            ConfigError::InvalidAddress(v) => write!(f, "invalid display address: {:#04x}", v),
            ConfigError::Parse(e) => write!(f, "config parse error: {:?}", e),
        }
    }
}

impl CountdownConfig {
    /// Check every field and seal the config
    ///
    /// Checks run in field order and report the first violation.
    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        if self.duration_s > MAX_DURATION_S {
            return Err(ConfigError::InvalidDuration(self.duration_s));
        }
        Endpoint::parse(&self.url)?;
        if self.brightness > MAX_BRIGHTNESS {
            return Err(ConfigError::InvalidBrightness(self.brightness));
        }
        if self.blink_rate > MAX_BLINK_RATE {
            return Err(ConfigError::InvalidBlinkRate(self.blink_rate));
        }
        if !(0x08..=0x77).contains(&self.display_address) {
            return Err(ConfigError::InvalidAddress(self.display_address));
        }
        Ok(ValidatedConfig(self))
    }
}

/// A configuration that passed [`CountdownConfig::validate`]
///
/// The controller only accepts this type, so an invalid configuration can
/// never reach the arming loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig(CountdownConfig);

impl ValidatedConfig {
    /// Give back the plain config
    pub fn into_inner(self) -> CountdownConfig {
        self.0
    }
}

impl Deref for ValidatedConfig {
    type Target = CountdownConfig;

    fn deref(&self) -> &CountdownConfig {
        &self.0
    }
}
