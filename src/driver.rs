//! Driver for the INA228.
//! Blocking I2C accessors; the async version mirrors this API behind the
//! `async` feature.

use crate::data_types::{
    AlertFlags, AlertLatch, AlertPolarity, AlertType, AveragingCount, ConversionTime,
    MeasurementMode,
};
use crate::error::Error;
use crate::registers::{
    ADC_CONFIG_AVG_MASK, ADC_CONFIG_VBUSCT_MASK, ADC_CONFIG_VBUSCT_SHIFT, ADC_CONFIG_VSHCT_MASK,
    ADC_CONFIG_VSHCT_SHIFT, CONFIG_MODE_MASK, CONFIG_RST, CONFIG_RSTACC, DEFAULT_I2C_ADDRESS,
    DIAG_ALERT_TYPE_MASK, DIAG_ALERT_TYPE_SHIFT, DiagAlertBits, MANUFACTURER_ID, POWER_LSB_FACTOR,
    SHUNT_CAL_MAX, SHUNT_TEMPCO_MAX, addr, bus_voltage_v, charge_c, current_a,
    current_lsb_from_max, die_temp_c, energy_j, power_w, shunt_cal_code, shunt_voltage_v,
};

/// Shunt resistance of the common breakout board (Ω), applied by [`Ina228::init`].
pub const DEFAULT_SHUNT_OHMS: f32 = 0.1;
/// Expected maximum current (A) paired with [`DEFAULT_SHUNT_OHMS`].
pub const DEFAULT_MAX_CURRENT_A: f32 = 3.2;

/// INA228 device handle: the bus handle, the 7-bit address and the derived
/// current-per-LSB scale. Not designed for concurrent access; callers sharing
/// a handle across threads must serialize themselves.
pub struct Ina228<I2C> {
    i2c: I2C,
    address: u8,
    current_lsb: f32,
}

impl<I2C> Ina228<I2C> {
    /// Create a new driver instance with the default I2C address (0x40).
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_I2C_ADDRESS)
    }

    /// Create a new driver instance with a custom I2C address (A1/A0 straps).
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            current_lsb: current_lsb_from_max(DEFAULT_MAX_CURRENT_A),
        }
    }

    /// Return the 7-bit I2C address configured for this instance.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the bus handle.
    pub fn free(self) -> I2C {
        self.i2c
    }

    /// Amps represented by one LSB of the current register, as configured by
    /// the last [`set_shunt`](Ina228::set_shunt) call.
    pub fn current_lsb(&self) -> f32 {
        self.current_lsb
    }

    /// Watts represented by one LSB of the power register.
    pub fn power_lsb(&self) -> f32 {
        POWER_LSB_FACTOR * self.current_lsb
    }

    /// Alert limit scale for a given trigger: power alerts compare against
    /// the power LSB, every other limit against the current LSB.
    fn alert_limit_scale(&self, alert_type: AlertType) -> f32 {
        match alert_type {
            AlertType::OverPower => self.power_lsb(),
            _ => self.current_lsb,
        }
    }

    /// Threshold in physical units to the nearest raw LSB, `None` when it
    /// does not fit the 16-bit limit register.
    fn alert_limit_code(&self, limit: f32, alert_type: AlertType) -> Option<u16> {
        let code = limit / self.alert_limit_scale(alert_type) + 0.5;
        if !(0.0..=65535.9).contains(&code) {
            return None;
        }
        Some(code as u16)
    }
}

impl<I2C> Ina228<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Verify the device answers at the configured address, reset it to
    /// power-on defaults and apply the breakout-board shunt configuration
    /// (0.1 Ω, 3.2 A).
    ///
    /// Fails with [`Error::DeviceNotFound`] when the bus does not
    /// acknowledge the address or the manufacturer ID does not read back
    /// as 0x5449.
    pub fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        let mfg = self
            .read_reg_u16(addr::MFG_UID)
            .map_err(|_| Error::DeviceNotFound)?;
        if mfg != MANUFACTURER_ID {
            return Err(Error::DeviceNotFound);
        }
        self.reset()?;
        self.set_shunt(DEFAULT_SHUNT_OHMS, DEFAULT_MAX_CURRENT_A)
    }

    /// Reset the chip to power-on defaults (CONFIG RST, self-clearing).
    pub fn reset(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_reg_u16(addr::CONFIG, CONFIG_RST)
    }

    /// Clear the energy and charge accumulators without disturbing the rest
    /// of the configuration.
    pub fn reset_accumulators(&mut self) -> Result<(), Error<I2C::Error>> {
        self.update_reg_u16(addr::CONFIG, CONFIG_RSTACC, CONFIG_RSTACC)
    }

    /// Write a 16-bit register (big-endian payload).
    pub fn write_reg_u16(&mut self, reg: u8, value: u16) -> Result<(), Error<I2C::Error>> {
        let bytes = value.to_be_bytes();
        self.i2c
            .write(self.address, &[reg, bytes[0], bytes[1]])
            .map_err(Error::I2c)
    }

    /// Read a 16-bit register.
    pub fn read_reg_u16(&mut self, reg: u8) -> Result<u16, Error<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.read_regs(reg, &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Update masked bits in a 16-bit register (read-modify-write).
    pub fn update_reg_u16(&mut self, reg: u8, mask: u16, value: u16) -> Result<(), Error<I2C::Error>> {
        let cur = self.read_reg_u16(reg)?;
        let new = (cur & !mask) | (value & mask);
        self.write_reg_u16(reg, new)
    }

    /// Read a register's full byte span (2, 3 or 5 bytes depending on width).
    pub fn read_regs(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write_read(self.address, &[reg], data)
            .map_err(Error::I2c)
    }

    fn read_reg_u24(&mut self, reg: u8) -> Result<u32, Error<I2C::Error>> {
        let mut buf = [0u8; 3];
        self.read_regs(reg, &mut buf)?;
        Ok(u32::from(buf[0]) << 16 | u32::from(buf[1]) << 8 | u32::from(buf[2]))
    }

    fn read_reg_u40(&mut self, reg: u8) -> Result<u64, Error<I2C::Error>> {
        let mut buf = [0u8; 5];
        self.read_regs(reg, &mut buf)?;
        let mut value = 0u64;
        for byte in buf {
            value = value << 8 | u64::from(byte);
        }
        Ok(value)
    }

    /// Configure the shunt: derive the current LSB from the expected maximum
    /// current (2^19 steps) and write the datasheet calibration value
    /// `13107.2e6 × current_lsb × resistance` to SHUNT_CAL.
    ///
    /// Rejects combinations whose calibration value exceeds the register's
    /// 15 bits instead of silently truncating.
    pub fn set_shunt(
        &mut self,
        resistance_ohms: f32,
        max_current_a: f32,
    ) -> Result<(), Error<I2C::Error>> {
        let lsb = current_lsb_from_max(max_current_a);
        let cal = shunt_cal_code(resistance_ohms, lsb);
        if cal > SHUNT_CAL_MAX {
            return Err(Error::OutOfRange);
        }
        self.write_reg_u16(addr::SHUNT_CAL, cal as u16)?;
        self.current_lsb = lsb;
        Ok(())
    }

    /// Set the shunt temperature coefficient (ppm/°C, 14-bit).
    pub fn set_shunt_tempco(&mut self, ppm_per_deg_c: u16) -> Result<(), Error<I2C::Error>> {
        if ppm_per_deg_c > SHUNT_TEMPCO_MAX {
            return Err(Error::OutOfRange);
        }
        self.write_reg_u16(addr::SHUNT_TEMPCO, ppm_per_deg_c)
    }

    /// Set the measurement mode. Each call is an unconditional write; writing
    /// [`MeasurementMode::Triggered`] again re-arms the one-shot.
    pub fn set_mode(&mut self, mode: MeasurementMode) -> Result<(), Error<I2C::Error>> {
        self.update_reg_u16(addr::CONFIG, CONFIG_MODE_MASK, mode.bits())
    }

    /// Read the active measurement mode back from CONFIG.
    pub fn mode(&mut self) -> Result<MeasurementMode, Error<I2C::Error>> {
        let cfg = self.read_reg_u16(addr::CONFIG)?;
        MeasurementMode::from_bits(cfg & CONFIG_MODE_MASK).ok_or(Error::InvalidConfig)
    }

    /// Set the bus voltage conversion time.
    pub fn set_voltage_conversion_time(
        &mut self,
        time: ConversionTime,
    ) -> Result<(), Error<I2C::Error>> {
        self.update_reg_u16(
            addr::ADC_CONFIG,
            ADC_CONFIG_VBUSCT_MASK,
            time.bits() << ADC_CONFIG_VBUSCT_SHIFT,
        )
    }

    /// Read the bus voltage conversion time.
    pub fn voltage_conversion_time(&mut self) -> Result<ConversionTime, Error<I2C::Error>> {
        let cfg = self.read_reg_u16(addr::ADC_CONFIG)?;
        ConversionTime::from_bits((cfg & ADC_CONFIG_VBUSCT_MASK) >> ADC_CONFIG_VBUSCT_SHIFT)
            .ok_or(Error::InvalidConfig)
    }

    /// Set the current (shunt) conversion time.
    pub fn set_current_conversion_time(
        &mut self,
        time: ConversionTime,
    ) -> Result<(), Error<I2C::Error>> {
        self.update_reg_u16(
            addr::ADC_CONFIG,
            ADC_CONFIG_VSHCT_MASK,
            time.bits() << ADC_CONFIG_VSHCT_SHIFT,
        )
    }

    /// Read the current (shunt) conversion time.
    pub fn current_conversion_time(&mut self) -> Result<ConversionTime, Error<I2C::Error>> {
        let cfg = self.read_reg_u16(addr::ADC_CONFIG)?;
        ConversionTime::from_bits((cfg & ADC_CONFIG_VSHCT_MASK) >> ADC_CONFIG_VSHCT_SHIFT)
            .ok_or(Error::InvalidConfig)
    }

    /// Set the averaging window size.
    pub fn set_averaging_count(&mut self, count: AveragingCount) -> Result<(), Error<I2C::Error>> {
        self.update_reg_u16(addr::ADC_CONFIG, ADC_CONFIG_AVG_MASK, count.bits())
    }

    /// Read the averaging window size.
    pub fn averaging_count(&mut self) -> Result<AveragingCount, Error<I2C::Error>> {
        let cfg = self.read_reg_u16(addr::ADC_CONFIG)?;
        AveragingCount::from_bits(cfg & ADC_CONFIG_AVG_MASK).ok_or(Error::InvalidConfig)
    }

    /// Select the condition that drives the alert pin.
    pub fn set_alert_type(&mut self, alert_type: AlertType) -> Result<(), Error<I2C::Error>> {
        self.update_reg_u16(
            addr::DIAG_ALRT,
            DIAG_ALERT_TYPE_MASK,
            alert_type.bits() << DIAG_ALERT_TYPE_SHIFT,
        )
    }

    /// Read the configured alert trigger back from DIAG_ALRT.
    pub fn alert_type(&mut self) -> Result<AlertType, Error<I2C::Error>> {
        let diag = self.read_reg_u16(addr::DIAG_ALRT)?;
        AlertType::from_bits((diag & DIAG_ALERT_TYPE_MASK) >> DIAG_ALERT_TYPE_SHIFT)
            .ok_or(Error::InvalidConfig)
    }

    /// Set the alert pin polarity.
    pub fn set_alert_polarity(&mut self, polarity: AlertPolarity) -> Result<(), Error<I2C::Error>> {
        let bits = match polarity {
            AlertPolarity::ActiveHigh => DiagAlertBits::empty(),
            AlertPolarity::ActiveLow => DiagAlertBits::APOL,
        };
        self.update_reg_u16(addr::DIAG_ALRT, DiagAlertBits::APOL.bits(), bits.bits())
    }

    /// Read the alert pin polarity.
    pub fn alert_polarity(&mut self) -> Result<AlertPolarity, Error<I2C::Error>> {
        let diag = self.read_diag_raw()?;
        Ok(if diag.contains(DiagAlertBits::APOL) {
            AlertPolarity::ActiveLow
        } else {
            AlertPolarity::ActiveHigh
        })
    }

    /// Set the alert pin latch behavior.
    pub fn set_alert_latch(&mut self, latch: AlertLatch) -> Result<(), Error<I2C::Error>> {
        let bits = match latch {
            AlertLatch::Transparent => DiagAlertBits::empty(),
            AlertLatch::Latched => DiagAlertBits::LEN,
        };
        self.update_reg_u16(addr::DIAG_ALRT, DiagAlertBits::LEN.bits(), bits.bits())
    }

    /// Read the alert pin latch behavior.
    pub fn alert_latch(&mut self) -> Result<AlertLatch, Error<I2C::Error>> {
        let diag = self.read_diag_raw()?;
        Ok(if diag.contains(DiagAlertBits::LEN) {
            AlertLatch::Latched
        } else {
            AlertLatch::Transparent
        })
    }

    /// Set the alert threshold in physical units: watts when the active
    /// alert type is [`AlertType::OverPower`], amps/volts-equivalent current
    /// LSBs otherwise. Rounded to the nearest LSB.
    pub fn set_alert_limit(&mut self, limit: f32) -> Result<(), Error<I2C::Error>> {
        let alert_type = self.alert_type()?;
        let code = self
            .alert_limit_code(limit, alert_type)
            .ok_or(Error::OutOfRange)?;
        self.write_reg_u16(addr::ALERT_LIMIT, code)
    }

    /// Read the alert threshold back in the active alert type's units.
    pub fn alert_limit(&mut self) -> Result<f32, Error<I2C::Error>> {
        let alert_type = self.alert_type()?;
        let raw = self.read_reg_u16(addr::ALERT_LIMIT)?;
        Ok(raw as f32 * self.alert_limit_scale(alert_type))
    }

    /// True when a conversion cycle has completed (CVRF flag).
    pub fn conversion_ready(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.read_diag_raw()?.contains(DiagAlertBits::CVRF))
    }

    /// Read DIAG_ALRT raw bits.
    pub fn read_diag_raw(&mut self) -> Result<DiagAlertBits, Error<I2C::Error>> {
        let val = self.read_reg_u16(addr::DIAG_ALRT)?;
        Ok(DiagAlertBits::from_bits_truncate(val))
    }

    /// Decode the DIAG_ALRT read-side flags.
    pub fn alert_function_flags(&mut self) -> Result<AlertFlags, Error<I2C::Error>> {
        let bits = self.read_diag_raw()?;
        Ok(AlertFlags {
            alert_function: bits.contains(DiagAlertBits::AFF),
            conversion_ready: bits.contains(DiagAlertBits::CVRF),
            math_overflow: bits.contains(DiagAlertBits::OVF),
        })
    }

    /// Read the shunt voltage in volts (signed).
    pub fn read_shunt_voltage(&mut self) -> Result<f32, Error<I2C::Error>> {
        let raw = self.read_reg_u24(addr::VSHUNT)?;
        Ok(shunt_voltage_v(raw))
    }

    /// Read the bus voltage in volts.
    pub fn read_bus_voltage(&mut self) -> Result<f32, Error<I2C::Error>> {
        let raw = self.read_reg_u24(addr::VBUS)?;
        Ok(bus_voltage_v(raw))
    }

    /// Read the die temperature in degrees Celsius (signed).
    pub fn read_die_temp(&mut self) -> Result<f32, Error<I2C::Error>> {
        let raw = self.read_reg_u16(addr::DIETEMP)?;
        Ok(die_temp_c(raw))
    }

    /// Read the calibrated current in amps (signed).
    pub fn read_current(&mut self) -> Result<f32, Error<I2C::Error>> {
        let raw = self.read_reg_u24(addr::CURRENT)?;
        Ok(current_a(raw, self.current_lsb))
    }

    /// Read the calibrated power in watts.
    pub fn read_power(&mut self) -> Result<f32, Error<I2C::Error>> {
        let raw = self.read_reg_u24(addr::POWER)?;
        Ok(power_w(raw, self.current_lsb))
    }

    /// Read the accumulated energy in joules.
    pub fn read_energy(&mut self) -> Result<f32, Error<I2C::Error>> {
        let raw = self.read_reg_u40(addr::ENERGY)?;
        Ok(energy_j(raw, self.current_lsb))
    }

    /// Read the accumulated charge in coulombs (signed).
    pub fn read_charge(&mut self) -> Result<f32, Error<I2C::Error>> {
        let raw = self.read_reg_u40(addr::CHARGE)?;
        Ok(charge_c(raw, self.current_lsb))
    }

    /// Read the device ID / die revision register.
    pub fn device_id(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.read_reg_u16(addr::DVC_UID)
    }
}

#[cfg(feature = "async")]
impl<I2C> Ina228<I2C>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    /// Async version of [`init`](Ina228::init).
    pub async fn init_async(&mut self) -> Result<(), Error<I2C::Error>> {
        let mfg = self
            .read_reg_u16_async(addr::MFG_UID)
            .await
            .map_err(|_| Error::DeviceNotFound)?;
        if mfg != MANUFACTURER_ID {
            return Err(Error::DeviceNotFound);
        }
        self.reset_async().await?;
        self.set_shunt_async(DEFAULT_SHUNT_OHMS, DEFAULT_MAX_CURRENT_A)
            .await
    }

    pub async fn reset_async(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_reg_u16_async(addr::CONFIG, CONFIG_RST).await
    }

    pub async fn reset_accumulators_async(&mut self) -> Result<(), Error<I2C::Error>> {
        self.update_reg_u16_async(addr::CONFIG, CONFIG_RSTACC, CONFIG_RSTACC)
            .await
    }

    pub async fn write_reg_u16_async(&mut self, reg: u8, value: u16) -> Result<(), Error<I2C::Error>> {
        let bytes = value.to_be_bytes();
        self.i2c
            .write(self.address, &[reg, bytes[0], bytes[1]])
            .await
            .map_err(Error::I2c)
    }

    pub async fn read_reg_u16_async(&mut self, reg: u8) -> Result<u16, Error<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.read_regs_async(reg, &mut buf).await?;
        Ok(u16::from_be_bytes(buf))
    }

    pub async fn update_reg_u16_async(
        &mut self,
        reg: u8,
        mask: u16,
        value: u16,
    ) -> Result<(), Error<I2C::Error>> {
        let cur = self.read_reg_u16_async(reg).await?;
        let new = (cur & !mask) | (value & mask);
        self.write_reg_u16_async(reg, new).await
    }

    pub async fn read_regs_async(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write_read(self.address, &[reg], data)
            .await
            .map_err(Error::I2c)
    }

    async fn read_reg_u24_async(&mut self, reg: u8) -> Result<u32, Error<I2C::Error>> {
        let mut buf = [0u8; 3];
        self.read_regs_async(reg, &mut buf).await?;
        Ok(u32::from(buf[0]) << 16 | u32::from(buf[1]) << 8 | u32::from(buf[2]))
    }

    async fn read_reg_u40_async(&mut self, reg: u8) -> Result<u64, Error<I2C::Error>> {
        let mut buf = [0u8; 5];
        self.read_regs_async(reg, &mut buf).await?;
        let mut value = 0u64;
        for byte in buf {
            value = value << 8 | u64::from(byte);
        }
        Ok(value)
    }

    pub async fn set_shunt_async(
        &mut self,
        resistance_ohms: f32,
        max_current_a: f32,
    ) -> Result<(), Error<I2C::Error>> {
        let lsb = current_lsb_from_max(max_current_a);
        let cal = shunt_cal_code(resistance_ohms, lsb);
        if cal > SHUNT_CAL_MAX {
            return Err(Error::OutOfRange);
        }
        self.write_reg_u16_async(addr::SHUNT_CAL, cal as u16).await?;
        self.current_lsb = lsb;
        Ok(())
    }

    pub async fn set_shunt_tempco_async(&mut self, ppm_per_deg_c: u16) -> Result<(), Error<I2C::Error>> {
        if ppm_per_deg_c > SHUNT_TEMPCO_MAX {
            return Err(Error::OutOfRange);
        }
        self.write_reg_u16_async(addr::SHUNT_TEMPCO, ppm_per_deg_c).await
    }

    pub async fn set_mode_async(&mut self, mode: MeasurementMode) -> Result<(), Error<I2C::Error>> {
        self.update_reg_u16_async(addr::CONFIG, CONFIG_MODE_MASK, mode.bits())
            .await
    }

    pub async fn mode_async(&mut self) -> Result<MeasurementMode, Error<I2C::Error>> {
        let cfg = self.read_reg_u16_async(addr::CONFIG).await?;
        MeasurementMode::from_bits(cfg & CONFIG_MODE_MASK).ok_or(Error::InvalidConfig)
    }

    pub async fn set_voltage_conversion_time_async(
        &mut self,
        time: ConversionTime,
    ) -> Result<(), Error<I2C::Error>> {
        self.update_reg_u16_async(
            addr::ADC_CONFIG,
            ADC_CONFIG_VBUSCT_MASK,
            time.bits() << ADC_CONFIG_VBUSCT_SHIFT,
        )
        .await
    }

    pub async fn voltage_conversion_time_async(&mut self) -> Result<ConversionTime, Error<I2C::Error>> {
        let cfg = self.read_reg_u16_async(addr::ADC_CONFIG).await?;
        ConversionTime::from_bits((cfg & ADC_CONFIG_VBUSCT_MASK) >> ADC_CONFIG_VBUSCT_SHIFT)
            .ok_or(Error::InvalidConfig)
    }

    pub async fn set_current_conversion_time_async(
        &mut self,
        time: ConversionTime,
    ) -> Result<(), Error<I2C::Error>> {
        self.update_reg_u16_async(
            addr::ADC_CONFIG,
            ADC_CONFIG_VSHCT_MASK,
            time.bits() << ADC_CONFIG_VSHCT_SHIFT,
        )
        .await
    }

    pub async fn current_conversion_time_async(&mut self) -> Result<ConversionTime, Error<I2C::Error>> {
        let cfg = self.read_reg_u16_async(addr::ADC_CONFIG).await?;
        ConversionTime::from_bits((cfg & ADC_CONFIG_VSHCT_MASK) >> ADC_CONFIG_VSHCT_SHIFT)
            .ok_or(Error::InvalidConfig)
    }

    pub async fn set_averaging_count_async(
        &mut self,
        count: AveragingCount,
    ) -> Result<(), Error<I2C::Error>> {
        self.update_reg_u16_async(addr::ADC_CONFIG, ADC_CONFIG_AVG_MASK, count.bits())
            .await
    }

    pub async fn averaging_count_async(&mut self) -> Result<AveragingCount, Error<I2C::Error>> {
        let cfg = self.read_reg_u16_async(addr::ADC_CONFIG).await?;
        AveragingCount::from_bits(cfg & ADC_CONFIG_AVG_MASK).ok_or(Error::InvalidConfig)
    }

    pub async fn set_alert_type_async(&mut self, alert_type: AlertType) -> Result<(), Error<I2C::Error>> {
        self.update_reg_u16_async(
            addr::DIAG_ALRT,
            DIAG_ALERT_TYPE_MASK,
            alert_type.bits() << DIAG_ALERT_TYPE_SHIFT,
        )
        .await
    }

    pub async fn alert_type_async(&mut self) -> Result<AlertType, Error<I2C::Error>> {
        let diag = self.read_reg_u16_async(addr::DIAG_ALRT).await?;
        AlertType::from_bits((diag & DIAG_ALERT_TYPE_MASK) >> DIAG_ALERT_TYPE_SHIFT)
            .ok_or(Error::InvalidConfig)
    }

    pub async fn set_alert_polarity_async(
        &mut self,
        polarity: AlertPolarity,
    ) -> Result<(), Error<I2C::Error>> {
        let bits = match polarity {
            AlertPolarity::ActiveHigh => DiagAlertBits::empty(),
            AlertPolarity::ActiveLow => DiagAlertBits::APOL,
        };
        self.update_reg_u16_async(addr::DIAG_ALRT, DiagAlertBits::APOL.bits(), bits.bits())
            .await
    }

    pub async fn alert_polarity_async(&mut self) -> Result<AlertPolarity, Error<I2C::Error>> {
        let diag = self.read_diag_raw_async().await?;
        Ok(if diag.contains(DiagAlertBits::APOL) {
            AlertPolarity::ActiveLow
        } else {
            AlertPolarity::ActiveHigh
        })
    }

    pub async fn set_alert_latch_async(&mut self, latch: AlertLatch) -> Result<(), Error<I2C::Error>> {
        let bits = match latch {
            AlertLatch::Transparent => DiagAlertBits::empty(),
            AlertLatch::Latched => DiagAlertBits::LEN,
        };
        self.update_reg_u16_async(addr::DIAG_ALRT, DiagAlertBits::LEN.bits(), bits.bits())
            .await
    }

    pub async fn alert_latch_async(&mut self) -> Result<AlertLatch, Error<I2C::Error>> {
        let diag = self.read_diag_raw_async().await?;
        Ok(if diag.contains(DiagAlertBits::LEN) {
            AlertLatch::Latched
        } else {
            AlertLatch::Transparent
        })
    }

    pub async fn set_alert_limit_async(&mut self, limit: f32) -> Result<(), Error<I2C::Error>> {
        let alert_type = self.alert_type_async().await?;
        let code = self
            .alert_limit_code(limit, alert_type)
            .ok_or(Error::OutOfRange)?;
        self.write_reg_u16_async(addr::ALERT_LIMIT, code).await
    }

    pub async fn alert_limit_async(&mut self) -> Result<f32, Error<I2C::Error>> {
        let alert_type = self.alert_type_async().await?;
        let raw = self.read_reg_u16_async(addr::ALERT_LIMIT).await?;
        Ok(raw as f32 * self.alert_limit_scale(alert_type))
    }

    pub async fn conversion_ready_async(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.read_diag_raw_async().await?.contains(DiagAlertBits::CVRF))
    }

    pub async fn read_diag_raw_async(&mut self) -> Result<DiagAlertBits, Error<I2C::Error>> {
        let val = self.read_reg_u16_async(addr::DIAG_ALRT).await?;
        Ok(DiagAlertBits::from_bits_truncate(val))
    }

    pub async fn alert_function_flags_async(&mut self) -> Result<AlertFlags, Error<I2C::Error>> {
        let bits = self.read_diag_raw_async().await?;
        Ok(AlertFlags {
            alert_function: bits.contains(DiagAlertBits::AFF),
            conversion_ready: bits.contains(DiagAlertBits::CVRF),
            math_overflow: bits.contains(DiagAlertBits::OVF),
        })
    }

    pub async fn read_shunt_voltage_async(&mut self) -> Result<f32, Error<I2C::Error>> {
        let raw = self.read_reg_u24_async(addr::VSHUNT).await?;
        Ok(shunt_voltage_v(raw))
    }

    pub async fn read_bus_voltage_async(&mut self) -> Result<f32, Error<I2C::Error>> {
        let raw = self.read_reg_u24_async(addr::VBUS).await?;
        Ok(bus_voltage_v(raw))
    }

    pub async fn read_die_temp_async(&mut self) -> Result<f32, Error<I2C::Error>> {
        let raw = self.read_reg_u16_async(addr::DIETEMP).await?;
        Ok(die_temp_c(raw))
    }

    pub async fn read_current_async(&mut self) -> Result<f32, Error<I2C::Error>> {
        let raw = self.read_reg_u24_async(addr::CURRENT).await?;
        Ok(current_a(raw, self.current_lsb))
    }

    pub async fn read_power_async(&mut self) -> Result<f32, Error<I2C::Error>> {
        let raw = self.read_reg_u24_async(addr::POWER).await?;
        Ok(power_w(raw, self.current_lsb))
    }

    pub async fn read_energy_async(&mut self) -> Result<f32, Error<I2C::Error>> {
        let raw = self.read_reg_u40_async(addr::ENERGY).await?;
        Ok(energy_j(raw, self.current_lsb))
    }

    pub async fn read_charge_async(&mut self) -> Result<f32, Error<I2C::Error>> {
        let raw = self.read_reg_u40_async(addr::CHARGE).await?;
        Ok(charge_c(raw, self.current_lsb))
    }

    pub async fn device_id_async(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.read_reg_u16_async(addr::DVC_UID).await
    }
}
