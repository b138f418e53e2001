//! This is a platform-agnostic Rust driver for the MIKROE Pressure Click 14
//! board, built around a Honeywell MPR series pressure sensor, based on the
//! [`embedded-hal`] traits.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//!
//! For further details of the device architecture and operation, please refer
//! to the official [`Datasheet`].
//!
//! [`Datasheet`]: https://prod-edam.honeywell.com/content/dam/honeywell-edam/sps/siot/en-us/products/sensors/pressure-sensors/board-mount-pressure-sensors/micropressure-mpr-series/documents/sps-siot-mpr-series-datasheet-32332628-ciid-172626.pdf

#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

mod registers;
pub use registers::*;

mod units;
pub use units::*;

pub mod blocking;

/// Factory I2C address of the sensor.
pub const DEFAULT_ADDRESS: u8 = 0x28;

/// Default number of 1 ms polls before a conversion is considered stuck.
pub const DEFAULT_POLL_LIMIT: u32 = 1000;

/// Calibrated pressure range of the fitted sensor, in PSI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressureRange {
    min_psi: i16,
    max_psi: i16,
}

impl PressureRange {
    /// Create a range. Returns `None` when `min_psi > max_psi`.
    #[must_use]
    pub const fn new(min_psi: i16, max_psi: i16) -> Option<Self> {
        if min_psi > max_psi {
            None
        } else {
            Some(Self { min_psi, max_psi })
        }
    }

    /// Pressure reported at the bottom of the transfer function.
    #[must_use]
    pub const fn min_psi(&self) -> i16 {
        self.min_psi
    }

    /// Pressure reported at the top of the transfer function.
    #[must_use]
    pub const fn max_psi(&self) -> i16 {
        self.max_psi
    }
}

/// The Pressure Click 14 ships with a 0 to 60 PSI part.
impl Default for PressureRange {
    fn default() -> Self {
        Self { min_psi: 0, max_psi: 60 }
    }
}

/// Driver configuration, fixed for the lifetime of a driver instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    /// I2C address.
    pub address: u8,

    /// Calibrated pressure range.
    pub range: PressureRange,

    /// Maximum number of 1 ms polls while waiting for a conversion.
    /// `None` waits forever.
    pub poll_limit: Option<u32>,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            range: PressureRange::default(),
            poll_limit: Some(DEFAULT_POLL_LIMIT),
        }
    }
}

impl SensorConfig {
    /// Configure the I2C address.
    #[must_use]
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Configure the calibrated pressure range.
    #[must_use]
    pub fn with_pressure_range(mut self, range: PressureRange) -> Self {
        self.range = range;
        self
    }

    /// Configure the conversion poll limit.
    #[must_use]
    pub fn with_poll_limit(mut self, limit: Option<u32>) -> Self {
        self.poll_limit = limit;
        self
    }
}

/// Placeholder for an optional pin that is not wired.
///
/// The driver never drives or samples a `NoPin`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPin;

impl embedded_hal::digital::ErrorType for NoPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::InputPin for NoPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

impl embedded_hal::digital::OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
