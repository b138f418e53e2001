//! Output units for pressure and temperature readings.

/// Pressure units a reading can be returned in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressureUnit {
    /// Pounds per square inch, the sensor's native unit (default).
    #[default]
    Psi,

    /// Pascal.
    Pa,

    /// Kilopascal.
    Kpa,

    /// Torr (mmHg).
    Torr,

    /// Inch of mercury.
    InHg,

    /// Standard atmosphere.
    Atm,

    /// Bar.
    Bar,
}

impl PressureUnit {
    /// Multiplier applied to a PSI value to express it in this unit.
    #[must_use]
    pub const fn factor(self) -> f32 {
        match self {
            Self::Psi => 1.0,
            Self::Pa => 6894.7573,
            Self::Kpa => 6.89476,
            Self::Torr => 51.7149,
            Self::InHg => 2.03602,
            Self::Atm => 0.06805,
            Self::Bar => 0.06895,
        }
    }

    /// Convert a value in PSI into this unit.
    #[must_use]
    pub fn from_psi(self, psi: f32) -> f32 {
        psi * self.factor()
    }
}

/// Unknown codes fall back to PSI.
impl From<u8> for PressureUnit {
    fn from(code: u8) -> Self {
        match code {
            1 => Self::Pa,
            2 => Self::Kpa,
            3 => Self::Torr,
            4 => Self::InHg,
            5 => Self::Atm,
            6 => Self::Bar,
            _ => Self::Psi,
        }
    }
}

/// Temperature units a reading can be returned in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureUnit {
    /// Kelvin.
    Kelvin,

    /// Degrees Celsius (default).
    #[default]
    Celsius,

    /// Degrees Fahrenheit.
    Fahrenheit,
}

impl TemperatureUnit {
    /// `(multiplier, offset)` applied to a Celsius value.
    #[must_use]
    pub const fn affine(self) -> (f32, f32) {
        match self {
            Self::Kelvin => (1.0, 273.15),
            Self::Celsius => (1.0, 0.0),
            Self::Fahrenheit => (1.8, 32.0),
        }
    }

    /// Convert a value in degrees Celsius into this unit.
    #[must_use]
    pub fn from_celsius(self, celsius: f32) -> f32 {
        let (mult, add) = self.affine();
        celsius * mult + add
    }
}

/// Unknown codes fall back to Celsius.
impl From<u8> for TemperatureUnit {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::Kelvin,
            2 => Self::Fahrenheit,
            _ => Self::Celsius,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn pressure_scaling_is_multiplicative() {
        let units: [(PressureUnit, f32); 7] = [
            (PressureUnit::Psi, 1.0),
            (PressureUnit::Pa, 6894.7573),
            (PressureUnit::Kpa, 6.89476),
            (PressureUnit::Torr, 51.7149),
            (PressureUnit::InHg, 2.03602),
            (PressureUnit::Atm, 0.06805),
            (PressureUnit::Bar, 0.06895),
        ];

        for (unit, factor) in units {
            assert_approx_eq!(unit.from_psi(0.0), 0.0);
            assert_approx_eq!(unit.from_psi(1.0), factor);
            assert_approx_eq!(unit.from_psi(30.0), 30.0 * factor, 1e-2);
        }
    }

    #[test]
    fn unknown_pressure_code_is_psi() {
        assert_eq!(PressureUnit::from(6), PressureUnit::Bar);
        assert_eq!(PressureUnit::from(7), PressureUnit::Psi);
        assert_eq!(PressureUnit::from(0xff), PressureUnit::Psi);
        assert_approx_eq!(PressureUnit::from(42).from_psi(12.5), 12.5);
    }

    #[test]
    fn temperature_affine_transforms() {
        assert_approx_eq!(TemperatureUnit::Celsius.from_celsius(21.5), 21.5);
        assert_approx_eq!(TemperatureUnit::Kelvin.from_celsius(0.0), 273.15);
        assert_approx_eq!(TemperatureUnit::Kelvin.from_celsius(-50.0), 223.15, 1e-4);
        assert_approx_eq!(TemperatureUnit::Fahrenheit.from_celsius(100.0), 212.0, 1e-4);
        assert_approx_eq!(TemperatureUnit::Fahrenheit.from_celsius(-40.0), -40.0, 1e-4);
    }

    #[test]
    fn unknown_temperature_code_is_celsius() {
        assert_eq!(TemperatureUnit::from(0), TemperatureUnit::Kelvin);
        assert_eq!(TemperatureUnit::from(1), TemperatureUnit::Celsius);
        assert_eq!(TemperatureUnit::from(2), TemperatureUnit::Fahrenheit);
        assert_eq!(TemperatureUnit::from(3), TemperatureUnit::Celsius);
    }

    #[test]
    fn defaults() {
        assert_eq!(PressureUnit::default(), PressureUnit::Psi);
        assert_eq!(TemperatureUnit::default(), TemperatureUnit::Celsius);
    }
}
