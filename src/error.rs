//! Error definitions for the INA228 driver.

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug)]
pub enum Error<I2cError> {
    /// Underlying I2C transaction failed.
    I2c(I2cError),
    /// Device did not answer at the configured address or reported a
    /// manufacturer ID other than 0x5449.
    DeviceNotFound,
    /// Provided parameter was outside datasheet limits.
    OutOfRange,
    /// A register field read back an encoding with no defined meaning.
    InvalidConfig,
}

impl<I2cError: core::fmt::Debug> core::fmt::Display for Error<I2cError> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C error: {:?}", e),
            Error::DeviceNotFound => write!(f, "device not found on bus"),
            Error::OutOfRange => write!(f, "parameter out of range"),
            Error::InvalidConfig => write!(f, "undefined register field encoding"),
        }
    }
}
