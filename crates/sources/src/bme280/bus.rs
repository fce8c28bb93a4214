//! Register-level access to the sensor bus.

use crate::error::SensorError;
use embedded_hal::i2c::I2c;

/// Byte-register access to devices on an I2C bus
pub trait SensorBus: Send {
    /// Read `buf.len()` consecutive registers starting at `register`
    fn read_block(&mut self, address: u8, register: u8, buf: &mut [u8]) -> Result<(), SensorError>;

    fn read_byte(&mut self, address: u8, register: u8) -> Result<u8, SensorError> {
        let mut buf = [0u8; 1];
        self.read_block(address, register, &mut buf)?;
        Ok(buf[0])
    }

    fn write_byte(&mut self, address: u8, register: u8, value: u8) -> Result<(), SensorError>;
}

/// Adapts any blocking `embedded-hal` I2C peripheral
pub struct I2cBus<I> {
    i2c: I,
}

impl<I: I2c> I2cBus<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }
}

impl<I: I2c + Send> SensorBus for I2cBus<I> {
    fn read_block(&mut self, address: u8, register: u8, buf: &mut [u8]) -> Result<(), SensorError> {
        self.i2c
            .write_read(address, &[register], buf)
            .map_err(|e| SensorError::Bus(format!("read 0x{:02X}: {:?}", register, e)))
    }

    fn write_byte(&mut self, address: u8, register: u8, value: u8) -> Result<(), SensorError> {
        self.i2c
            .write(address, &[register, value])
            .map_err(|e| SensorError::Bus(format!("write 0x{:02X}: {:?}", register, e)))
    }
}

#[cfg(feature = "i2c")]
impl I2cBus<linux_embedded_hal::I2cdev> {
    /// Open a Linux i2c-dev bus such as `/dev/i2c-1`
    pub fn open(path: &std::path::Path) -> Result<Self, SensorError> {
        let i2c = linux_embedded_hal::I2cdev::new(path)
            .map_err(|e| SensorError::Bus(format!("open {}: {}", path.display(), e)))?;
        Ok(Self::new(i2c))
    }
}
