//! BME280 temperature / humidity / pressure reader
//!
//! [`Bme280`] is the register-level driver. [`SensorReader`] wraps it in the
//! periodic worker that formats a summary line and publishes it as the
//! `sensor` source.

mod bus;
mod calibration;
mod compensation;

pub use bus::{I2cBus, SensorBus};
pub use calibration::Calibration;
pub use compensation::{
    compensate, compensate_humidity, compensate_pressure, compensate_temperature, Measurement,
    RawSample,
};

use crate::error::SensorError;
use calibration::{HUMIDITY_CALIB_REG, HUMIDITY_H1_REG, PRESSURE_CALIB_REG, TEMPERATURE_CALIB_REG};
use compensation::DATA_REG;
use log::{debug, info, warn};
use rgb_marquee_core::ContentStore;
use rgb_marquee_types::{Message, SensorSourceConfig, SourceKind};
use std::sync::Arc;
use std::time::Duration;

pub const CHIP_ID_REG: u8 = 0xD0;
pub const CHIP_ID: u8 = 0x60;
pub const CTRL_HUM_REG: u8 = 0xF2;
pub const CTRL_MEAS_REG: u8 = 0xF4;
pub const CONFIG_REG: u8 = 0xF5;

/// Sleep mode, required while changing config
const CTRL_MEAS_SLEEP: u8 = 0x00;
/// 1000 ms standby, filter off
const CONFIG_STANDBY_1000MS: u8 = 0xA0;
/// Humidity oversampling x1
const CTRL_HUM_X1: u8 = 0x01;
/// Temperature and pressure oversampling x1, normal mode
const CTRL_MEAS_NORMAL_X1: u8 = 0x27;

/// Initialised BME280 on a bus
pub struct Bme280<B> {
    bus: B,
    address: u8,
    calibration: Calibration,
}

impl<B: SensorBus> Bme280<B> {
    /// Probe, configure and read the trim values.
    ///
    /// An unreadable chip id means there is no sensor and is returned as
    /// [`SensorError::Absent`]; an unexpected id is only logged.
    pub fn init(mut bus: B, address: u8) -> Result<Self, SensorError> {
        let calibration = Self::setup(&mut bus, address)?;
        Ok(Self {
            bus,
            address,
            calibration,
        })
    }

    /// Like [`Bme280::init`], but a bus error during setup is retried after
    /// `retry`. Only [`SensorError::Absent`] is returned.
    pub fn init_with_retry(mut bus: B, address: u8, retry: Duration) -> Result<Self, SensorError> {
        loop {
            match Self::setup(&mut bus, address) {
                Ok(calibration) => {
                    return Ok(Self {
                        bus,
                        address,
                        calibration,
                    })
                }
                Err(e @ SensorError::Absent { .. }) => return Err(e),
                Err(e) => {
                    warn!("BME280 setup failed, retrying in {:?}: {}", retry, e);
                    std::thread::sleep(retry);
                }
            }
        }
    }

    fn setup(bus: &mut B, address: u8) -> Result<Calibration, SensorError> {
        let id = bus
            .read_byte(address, CHIP_ID_REG)
            .map_err(|e| SensorError::Absent {
                address,
                reason: e.to_string(),
            })?;
        if id != CHIP_ID {
            warn!(
                "Unexpected chip id 0x{:02X} at 0x{:02X} (expected 0x{:02X}), continuing",
                id, address, CHIP_ID
            );
        }

        bus.write_byte(address, CTRL_MEAS_REG, CTRL_MEAS_SLEEP)?;
        bus.write_byte(address, CONFIG_REG, CONFIG_STANDBY_1000MS)?;
        bus.write_byte(address, CTRL_HUM_REG, CTRL_HUM_X1)?;
        bus.write_byte(address, CTRL_MEAS_REG, CTRL_MEAS_NORMAL_X1)?;

        let mut temperature = [0u8; 6];
        let mut pressure = [0u8; 18];
        let mut humidity = [0u8; 7];
        bus.read_block(address, TEMPERATURE_CALIB_REG, &mut temperature)?;
        bus.read_block(address, PRESSURE_CALIB_REG, &mut pressure)?;
        let h1 = bus.read_byte(address, HUMIDITY_H1_REG)?;
        bus.read_block(address, HUMIDITY_CALIB_REG, &mut humidity)?;

        let calibration = Calibration::from_registers(&temperature, &pressure, h1, &humidity);
        debug!("BME280 calibration: {:?}", calibration);
        Ok(calibration)
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Burst-read the measurement registers and compensate
    pub fn measure(&mut self) -> Result<Measurement, SensorError> {
        let mut data = [0u8; 8];
        self.bus.read_block(self.address, DATA_REG, &mut data)?;
        Ok(compensate(&self.calibration, &RawSample::from_registers(&data)))
    }
}

/// Whole millibars, used for the pressure trend
fn whole_millibars(pascals: f64) -> i64 {
    (pascals / 100.0).floor() as i64
}

/// Build the summary line from the enabled metrics.
///
/// `previous_millibars` is the whole-millibar pressure of the last reading;
/// without one no trend is shown. Returns `None` when every metric is off.
pub fn format_reading(
    measurement: &Measurement,
    config: &SensorSourceConfig,
    previous_millibars: Option<i64>,
) -> Option<String> {
    let mut parts = Vec::new();

    if config.temperature {
        parts.push(format!(
            "{:.1}{}",
            config.temp_unit.from_celsius(measurement.celsius),
            config.temp_unit.suffix()
        ));
    }

    if config.humidity {
        parts.push(format!("{:.1}% RH", measurement.humidity));
    }

    if config.pressure {
        let millibars = measurement.pascals / 100.0;
        let trend = match previous_millibars {
            Some(prev) if whole_millibars(measurement.pascals) > prev => " and rising",
            Some(prev) if whole_millibars(measurement.pascals) < prev => " and falling",
            _ => "",
        };
        parts.push(format!("{:.1} millibars{}", millibars, trend));
    }

    if parts.is_empty() {
        return None;
    }
    Some(format!("Environment: {}", parts.join(", ")))
}

/// Periodic BME280 worker publishing the `sensor` source
pub struct SensorReader<B> {
    sensor: Bme280<B>,
    config: SensorSourceConfig,
    store: Arc<ContentStore>,
    last_millibars: Option<i64>,
}

impl<B: SensorBus> SensorReader<B> {
    /// Initialise the sensor on `bus`.
    ///
    /// Bus errors during setup are retried every update interval; only an
    /// absent sensor is returned as an error.
    pub fn new(
        bus: B,
        config: SensorSourceConfig,
        store: Arc<ContentStore>,
    ) -> Result<Self, SensorError> {
        let retry = Duration::from_secs(config.update_interval_secs);
        let sensor = Bme280::init_with_retry(bus, config.address, retry)?;
        info!("BME280 ready at 0x{:02X}", config.address);
        Ok(Self {
            sensor,
            config,
            store,
            last_millibars: None,
        })
    }

    /// Take one reading and publish it.
    ///
    /// Returns whether a message was published. A bus error leaves the
    /// previous message and the trend baseline in place.
    pub fn sample(&mut self) -> Result<bool, SensorError> {
        let measurement = self.sensor.measure()?;
        debug!(
            "BME280: {:.2} C, {:.2} Pa, {:.2} %RH",
            measurement.celsius, measurement.pascals, measurement.humidity
        );

        let text = format_reading(&measurement, &self.config, self.last_millibars);
        self.last_millibars = Some(whole_millibars(measurement.pascals));

        match text {
            Some(text) => {
                self.store
                    .replace(SourceKind::Sensor, vec![Message::bright(text)]);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Sample forever at the configured interval. Blocks the calling thread.
    pub fn run(mut self) {
        let interval = Duration::from_secs(self.config.update_interval_secs);
        loop {
            if let Err(e) = self.sample() {
                warn!("Skipping sensor sample: {}", e);
            }
            std::thread::sleep(interval);
        }
    }
}
