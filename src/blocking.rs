//! Pressure Click 14 Blocking API

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::i2c::I2c;
#[cfg(feature = "embedded-sensors-hal")]
use embedded_sensors_hal::sensor;
#[cfg(feature = "embedded-sensors-hal")]
use embedded_sensors_hal::temperature::{DegreesCelsius, TemperatureSensor};

use super::{
    pressure_psi, temperature_celsius, Command, NoPin, PressureUnit, RawFrame, SensorConfig, Status, TemperatureUnit,
    MEASUREMENT_LEN,
};

/// A pressure and a temperature taken from the same conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Pressure in the requested unit, NaN when the reading is invalid.
    pub pressure: f32,

    /// Temperature in the requested unit, NaN when the reading is invalid.
    pub temperature: f32,
}

/// Pressure Click 14 blocking device driver
pub struct Pressure14<I2C: I2c, DELAY: DelayNs, EOC: InputPin = NoPin, RST: OutputPin = NoPin> {
    /// The concrete I2C bus implementation
    i2c: I2C,

    /// The concrete [`embedded_hal::delay::DelayNs`] implementation
    delay: DELAY,

    /// End-of-conversion input, if wired.
    eoc: Option<EOC>,

    /// Reset output, if wired.
    rst: Option<RST>,

    pub(crate) config: SensorConfig,
}

impl<I2C: I2c, DELAY: DelayNs> Pressure14<I2C, DELAY> {
    /// Create a new driver instance. The bus is not touched until
    /// [`Pressure14::init`].
    pub fn new(i2c: I2C, delay: DELAY, config: SensorConfig) -> Self {
        Self {
            i2c,
            delay,
            eoc: None,
            rst: None,
            config,
        }
    }

    /// Create a new driver instance for a 0 to 60 PSI sensor at address
    /// `0x28`.
    pub fn new_with_default_config(i2c: I2C, delay: DELAY) -> Self {
        Self::new(i2c, delay, SensorConfig::default())
    }
}

impl<I2C: I2c, DELAY: DelayNs, EOC: InputPin, RST: OutputPin> Pressure14<I2C, DELAY, EOC, RST> {
    const MEASUREMENT_POLL_MS: u32 = 1;
    const RESET_SETTLE_MS: u32 = 5;

    /// Wait on the EOC pin instead of polling the status byte.
    ///
    /// The pin must already be configured as an input.
    pub fn with_eoc_pin<P: InputPin>(self, eoc: P) -> Pressure14<I2C, DELAY, P, RST> {
        Pressure14 {
            i2c: self.i2c,
            delay: self.delay,
            eoc: Some(eoc),
            rst: self.rst,
            config: self.config,
        }
    }

    /// Pulse this pin to hardware-reset the sensor during [`Pressure14::init`].
    pub fn with_reset_pin<P: OutputPin>(self, rst: P) -> Pressure14<I2C, DELAY, EOC, P> {
        Pressure14 {
            i2c: self.i2c,
            delay: self.delay,
            eoc: self.eoc,
            rst: Some(rst),
            config: self.config,
        }
    }

    /// Driver configuration.
    #[must_use]
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Destroy the driver instance, return the I2C bus instance.
    pub fn destroy(self) -> I2C {
        self.i2c
    }

    /// Destroy the driver instance, return the bus, delay and pins.
    pub fn release(self) -> (I2C, DELAY, Option<EOC>, Option<RST>) {
        (self.i2c, self.delay, self.eoc, self.rst)
    }

    /// Reset the sensor if a reset pin is wired, then probe its address.
    ///
    /// Returns `Ok(false)` when the device does not acknowledge. The probe
    /// is attempted once.
    ///
    /// # Errors
    ///
    /// `Error::Pin` when the reset pin cannot be driven
    pub fn init(&mut self) -> Result<bool, Error<I2C::Error>> {
        if let Some(rst) = self.rst.as_mut() {
            trace!("pulsing reset");
            rst.set_low().map_err(Self::pin_error)?;
            self.delay.delay_ms(Self::RESET_SETTLE_MS);
            rst.set_high().map_err(Self::pin_error)?;
            self.delay.delay_ms(Self::RESET_SETTLE_MS);
        }

        let present = self.i2c.write(self.config.address, &[]).is_ok();
        if present {
            debug!("sensor found at {:#x}", self.config.address);
        } else {
            warn!("no sensor at {:#x}", self.config.address);
        }

        Ok(present)
    }

    /// Read the status byte.
    ///
    /// # Errors
    ///
    /// `Error::Bus` when the I2C transaction fails
    pub fn read_status(&mut self) -> Result<Status, Error<I2C::Error>> {
        let mut byte = [0; 1];
        self.i2c.read(self.config.address, &mut byte).map_err(Error::Bus)?;
        Ok(Status::from(byte[0]))
    }

    /// Trigger a conversion, wait for it and read the raw response.
    ///
    /// # Errors
    ///
    /// `Error::Bus` when an I2C transaction fails, `Error::Pin` when the EOC
    /// pin cannot be read, `Error::Timeout` when the conversion does not
    /// finish within the configured poll limit
    pub fn read_frame(&mut self) -> Result<RawFrame, Error<I2C::Error>> {
        self.i2c
            .write(self.config.address, &Command::Measure.bytes())
            .map_err(Error::Bus)?;

        self.wait_for_conversion()?;

        let mut buf = [0; MEASUREMENT_LEN];
        self.i2c.read(self.config.address, &mut buf).map_err(Error::Bus)?;
        let frame = RawFrame::from(buf);

        if frame.status.is_invalid() {
            warn!("invalid reading, status {:#x}", u8::from(frame.status));
        }

        Ok(frame)
    }

    /// Measure pressure. Returns NaN when the sensor flags the reading as
    /// invalid.
    ///
    /// # Errors
    ///
    /// See [`Pressure14::read_frame`]
    pub fn read_pressure(&mut self, unit: PressureUnit) -> Result<f32, Error<I2C::Error>> {
        let frame = self.read_frame()?;
        Ok(self.convert_pressure(&frame, unit))
    }

    /// Measure temperature. Returns NaN when the sensor flags the reading as
    /// invalid.
    ///
    /// # Errors
    ///
    /// See [`Pressure14::read_frame`]
    pub fn read_temperature(&mut self, unit: TemperatureUnit) -> Result<f32, Error<I2C::Error>> {
        let frame = self.read_frame()?;
        Ok(Self::convert_temperature(&frame, unit))
    }

    /// Measure pressure and temperature from a single conversion.
    ///
    /// # Errors
    ///
    /// See [`Pressure14::read_frame`]
    pub fn read_pressure_and_temperature(
        &mut self,
        pressure_unit: PressureUnit,
        temperature_unit: TemperatureUnit,
    ) -> Result<Measurement, Error<I2C::Error>> {
        let frame = self.read_frame()?;
        Ok(Measurement {
            pressure: self.convert_pressure(&frame, pressure_unit),
            temperature: Self::convert_temperature(&frame, temperature_unit),
        })
    }

    fn wait_for_conversion(&mut self) -> Result<(), Error<I2C::Error>> {
        let limit = self.config.poll_limit;
        let mut polls = 0;

        if let Some(eoc) = self.eoc.as_mut() {
            while !eoc.is_high().map_err(Self::pin_error)? {
                Self::poll(&mut polls, limit)?;
                self.delay.delay_ms(Self::MEASUREMENT_POLL_MS);
            }
            return Ok(());
        }

        let mut status = self.read_status()?;
        while status.busy() && !status.is_disconnected() {
            Self::poll(&mut polls, limit)?;
            self.delay.delay_ms(Self::MEASUREMENT_POLL_MS);
            status = self.read_status()?;
        }

        if status.is_disconnected() {
            warn!("status reads {:#x}, sensor disconnected?", Status::DISCONNECTED);
        }

        Ok(())
    }

    fn pin_error<E: embedded_hal::digital::Error>(e: E) -> Error<I2C::Error> {
        Error::Pin(e.kind())
    }

    fn poll(polls: &mut u32, limit: Option<u32>) -> Result<(), Error<I2C::Error>> {
        if limit.is_some_and(|limit| *polls >= limit) {
            warn!("conversion still running after {} polls", *polls);
            return Err(Error::Timeout);
        }
        *polls += 1;
        Ok(())
    }

    fn convert_pressure(&self, frame: &RawFrame, unit: PressureUnit) -> f32 {
        if frame.status.is_invalid() {
            return f32::NAN;
        }
        let range = self.config.range;
        unit.from_psi(pressure_psi(frame.pressure, range.min_psi(), range.max_psi()))
    }

    fn convert_temperature(frame: &RawFrame, unit: TemperatureUnit) -> f32 {
        if frame.status.is_invalid() {
            return f32::NAN;
        }
        unit.from_celsius(temperature_celsius(frame.temperature))
    }
}

/// Pressure Click 14 Errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E: embedded_hal::i2c::Error> {
    /// I2C Bus Error
    Bus(E),

    /// EOC or reset pin error
    Pin(embedded_hal::digital::ErrorKind),

    /// Conversion did not complete within the poll limit
    Timeout,
}

#[cfg(feature = "embedded-sensors-hal")]
impl<E: embedded_hal::i2c::Error> sensor::Error for Error<E> {
    fn kind(&self) -> sensor::ErrorKind {
        sensor::ErrorKind::Other
    }
}

#[cfg(feature = "embedded-sensors-hal")]
impl<I2C: I2c, DELAY: DelayNs, EOC: InputPin, RST: OutputPin> sensor::ErrorType for Pressure14<I2C, DELAY, EOC, RST> {
    type Error = Error<I2C::Error>;
}

#[cfg(feature = "embedded-sensors-hal")]
impl<I2C: I2c, DELAY: DelayNs, EOC: InputPin, RST: OutputPin> TemperatureSensor for Pressure14<I2C, DELAY, EOC, RST> {
    fn temperature(&mut self) -> Result<DegreesCelsius, Self::Error> {
        self.read_temperature(TemperatureUnit::Celsius)
    }
}
