#![allow(missing_docs)]
use bilge::prelude::*;

/// Lower bound of the pressure transfer function (10% of 2^24 counts).
pub const PRESSURE_OUTPUT_MIN: u32 = 0x0019_999A;

/// Upper bound of the pressure transfer function (90% of 2^24 counts).
pub const PRESSURE_OUTPUT_MAX: u32 = 0x00E6_6666;

/// Full scale of the raw temperature field.
pub const TEMPERATURE_OUTPUT_MAX: u32 = 0x00FF_FFFF;

/// Temperature at a raw count of zero, in degrees Celsius.
pub const TEMPERATURE_MIN_CELSIUS: f32 = -50.0;

/// Temperature at full scale, in degrees Celsius.
pub const TEMPERATURE_MAX_CELSIUS: f32 = 150.0;

/// Size of a measurement response on the wire.
pub const MEASUREMENT_LEN: usize = 7;

/// Commands understood by the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Exit standby and start a pressure and temperature conversion.
    Measure,
}

impl Command {
    /// Bytes written on the bus for this command.
    #[must_use]
    pub const fn bytes(self) -> [u8; 3] {
        match self {
            Command::Measure => [0xAA, 0x00, 0x00],
        }
    }
}

/// Status byte, returned alone or as the first byte of a measurement.
#[bitsize(8)]
#[derive(DebugBits, FromBits, PartialEq, Clone, Copy)]
pub struct Status {
    /// Internal math saturation occurred, the reading is invalid.
    pub math_saturation: bool,

    reserved1: bool,

    /// Memory integrity check failed, the reading is invalid.
    pub integrity_error: bool,

    reserved3_4: u2,

    /// A conversion is in progress.
    pub busy: bool,

    /// Device is powered.
    pub powered: bool,

    reserved7: bool,
}

impl Status {
    /// Value read back when nothing drives the bus.
    pub const DISCONNECTED: u8 = 0xFF;

    /// True when the byte is the all-ones pattern of an absent device.
    #[must_use]
    pub fn is_disconnected(self) -> bool {
        u8::from(self) == Self::DISCONNECTED
    }

    /// True when the data bytes following this status cannot be trusted.
    #[must_use]
    pub fn is_invalid(self) -> bool {
        self.integrity_error() || self.math_saturation()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Status {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Status({=u8:#x})", u8::from(*self));
    }
}

/// One 7-byte measurement response.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawFrame {
    /// Status at the time of the read.
    pub status: Status,

    /// 24-bit raw pressure count.
    pub pressure: u32,

    /// 24-bit raw temperature count.
    pub temperature: u32,
}

impl From<[u8; MEASUREMENT_LEN]> for RawFrame {
    fn from(buf: [u8; MEASUREMENT_LEN]) -> Self {
        Self {
            status: Status::from(buf[0]),
            pressure: u32::from_be_bytes([0, buf[1], buf[2], buf[3]]),
            temperature: u32::from_be_bytes([0, buf[4], buf[5], buf[6]]),
        }
    }
}

/// Map a raw pressure count onto the calibrated range, in PSI.
///
/// Counts outside the transfer function extrapolate linearly.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn pressure_psi(raw: u32, min_psi: i16, max_psi: i16) -> f32 {
    let span = f32::from(max_psi) - f32::from(min_psi);
    let counts = (PRESSURE_OUTPUT_MAX - PRESSURE_OUTPUT_MIN) as f32;
    (raw as f32 - PRESSURE_OUTPUT_MIN as f32) * span / counts + f32::from(min_psi)
}

/// Map a raw temperature count onto degrees Celsius.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn temperature_celsius(raw: u32) -> f32 {
    let span = TEMPERATURE_MAX_CELSIUS - TEMPERATURE_MIN_CELSIUS;
    raw as f32 * span / TEMPERATURE_OUTPUT_MAX as f32 + TEMPERATURE_MIN_CELSIUS
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn measure_command() {
        assert_eq!(Command::Measure.bytes(), [0xAA, 0x00, 0x00]);
    }

    #[test]
    fn status_bits() {
        let status = Status::from(0x40);
        assert!(status.powered());
        assert!(!status.busy());
        assert!(!status.is_invalid());

        let status = Status::from(0x60);
        assert!(status.busy());

        assert!(Status::from(0x44).integrity_error());
        assert!(Status::from(0x44).is_invalid());
        assert!(Status::from(0x41).math_saturation());
        assert!(Status::from(0x41).is_invalid());

        assert!(Status::from(0xff).is_disconnected());
        assert!(!Status::from(0x7f).is_disconnected());
        assert_eq!(u8::from(Status::from(0x5a)), 0x5a);
    }

    #[test]
    fn parse_frame() {
        let frame = RawFrame::from([0x40, 0x12, 0x34, 0x56, 0xab, 0xcd, 0xef]);
        assert_eq!(u8::from(frame.status), 0x40);
        assert_eq!(frame.pressure, 0x12_3456);
        assert_eq!(frame.temperature, 0xab_cdef);
    }

    #[test]
    fn pressure_transfer_function_bounds() {
        for (min, max) in [(0, 60), (0, 1), (-15, 15), (10, 10), (-1, 150)] {
            assert_approx_eq!(pressure_psi(PRESSURE_OUTPUT_MIN, min, max), f32::from(min), 1e-4);
            assert_approx_eq!(pressure_psi(PRESSURE_OUTPUT_MAX, min, max), f32::from(max), 1e-4);
        }
    }

    #[test]
    fn pressure_mid_scale() {
        assert_approx_eq!(pressure_psi(0x7f_ffff, 0, 60), 30.0, 1e-3);
    }

    #[test]
    fn pressure_below_range_extrapolates() {
        assert!(pressure_psi(0, 0, 60) < 0.0);
        assert_approx_eq!(pressure_psi(0, 0, 60), -7.5, 1e-3);
    }

    #[test]
    fn temperature_transfer_function() {
        assert_approx_eq!(temperature_celsius(0), -50.0);
        assert_approx_eq!(temperature_celsius(TEMPERATURE_OUTPUT_MAX), 150.0, 1e-4);
        assert_approx_eq!(temperature_celsius(0x80_0000), 50.0, 1e-3);
    }
}
