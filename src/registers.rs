//! Register map and constants for INA228.
//! Addresses, field layouts and scale factors come from the datasheet.

/// Default I2C address (A1 = A0 = GND).
pub const DEFAULT_I2C_ADDRESS: u8 = 0x40;

/// Manufacturer ID register value ("TI" in ASCII).
pub const MANUFACTURER_ID: u16 = 0x5449;

/// Register addresses.
pub mod addr {
    /// Device configuration (reset, accumulator reset, measurement mode).
    pub const CONFIG: u8 = 0x00;
    /// ADC configuration (conversion times, averaging count).
    pub const ADC_CONFIG: u8 = 0x01;
    /// Shunt calibration value (15-bit).
    pub const SHUNT_CAL: u8 = 0x02;
    /// Shunt temperature coefficient (14-bit, ppm/°C).
    pub const SHUNT_TEMPCO: u8 = 0x03;
    /// Shunt voltage measurement (24-bit, signed, data in bits 23:4).
    pub const VSHUNT: u8 = 0x04;
    /// Bus voltage measurement (24-bit, data in bits 23:4).
    pub const VBUS: u8 = 0x05;
    /// Die temperature measurement (16-bit, signed).
    pub const DIETEMP: u8 = 0x06;
    /// Calibrated current (24-bit, signed, data in bits 23:4).
    pub const CURRENT: u8 = 0x07;
    /// Calibrated power (24-bit).
    pub const POWER: u8 = 0x08;
    /// Accumulated energy (40-bit).
    pub const ENERGY: u8 = 0x09;
    /// Accumulated charge (40-bit, signed).
    pub const CHARGE: u8 = 0x0A;
    /// Diagnostics and alert configuration/flags.
    pub const DIAG_ALRT: u8 = 0x0B;
    /// Alert threshold for the active alert type.
    pub const ALERT_LIMIT: u8 = 0x0C;
    /// Manufacturer ID (reads 0x5449, "TI").
    pub const MFG_UID: u8 = 0x3E;
    /// Device ID and die revision.
    pub const DVC_UID: u8 = 0x3F;
}

/// CONFIG bit 15: reset the device to power-on defaults (self-clearing).
pub const CONFIG_RST: u16 = 1 << 15;
/// CONFIG bit 14: clear the energy and charge accumulators (self-clearing).
pub const CONFIG_RSTACC: u16 = 1 << 14;
/// CONFIG bits 3:0: measurement mode field.
pub const CONFIG_MODE_MASK: u16 = 0x000F;

/// ADC_CONFIG bits 11:9: bus voltage conversion time.
pub const ADC_CONFIG_VBUSCT_SHIFT: u16 = 9;
pub const ADC_CONFIG_VBUSCT_MASK: u16 = 0b111 << ADC_CONFIG_VBUSCT_SHIFT;
/// ADC_CONFIG bits 8:6: current (shunt) conversion time.
pub const ADC_CONFIG_VSHCT_SHIFT: u16 = 6;
pub const ADC_CONFIG_VSHCT_MASK: u16 = 0b111 << ADC_CONFIG_VSHCT_SHIFT;
/// ADC_CONFIG bits 2:0: averaging count.
pub const ADC_CONFIG_AVG_MASK: u16 = 0b111;

/// DIAG_ALRT bits 15:10: alert trigger selection (one-hot).
pub const DIAG_ALERT_TYPE_SHIFT: u16 = 10;
pub const DIAG_ALERT_TYPE_MASK: u16 = 0x3F << DIAG_ALERT_TYPE_SHIFT;

bitflags::bitflags! {
    /// DIAG_ALRT register bits (0x0B). Bits 15-10 select which condition
    /// drives the alert pin; bits 4-2 are read-side flags; bits 1-0 configure
    /// pin polarity and latch behavior.
    pub struct DiagAlertBits: u16 {
        /// Bit 15: alert on current over limit.
        const OCL  = 1 << 15;
        /// Bit 14: alert on current under limit.
        const UCL  = 1 << 14;
        /// Bit 13: alert on bus voltage over limit.
        const BOL  = 1 << 13;
        /// Bit 12: alert on bus voltage under limit.
        const BUL  = 1 << 12;
        /// Bit 11: alert on power over limit.
        const POL  = 1 << 11;
        /// Bit 10: alert on conversion ready.
        const CNVR = 1 << 10;
        /// Bit 4: alert function flag (the selected condition fired).
        const AFF  = 1 << 4;
        /// Bit 3: conversion ready flag.
        const CVRF = 1 << 3;
        /// Bit 2: arithmetic overflow in the current/power computation.
        const OVF  = 1 << 2;
        /// Bit 1: alert pin polarity (0 = active high, 1 = active low).
        const APOL = 1 << 1;
        /// Bit 0: alert latch enable (0 = transparent, 1 = latched).
        const LEN  = 1 << 0;
    }
}

/// Bus voltage scale: 195.3125 µV per LSB of the 20-bit field.
pub const BUS_VOLTAGE_LSB_V: f32 = 195.3125e-6;
/// Shunt voltage scale: 312.5 nV per LSB of the 20-bit field.
pub const SHUNT_VOLTAGE_LSB_V: f32 = 312.5e-9;
/// Die temperature scale: 7.8125 m°C per LSB.
pub const DIE_TEMP_LSB_C: f32 = 7.8125e-3;
/// Power LSB as a multiple of the current LSB.
pub const POWER_LSB_FACTOR: f32 = 3.2;
/// Energy LSB as a multiple of the current LSB (16 × power factor).
pub const ENERGY_LSB_FACTOR: f32 = 16.0 * POWER_LSB_FACTOR;
/// SHUNT_CAL = 13107.2e6 × current_lsb × R_shunt (datasheet equation).
pub const SHUNT_CAL_FACTOR: f64 = 13107.2e6;
/// SHUNT_CAL holds a 15-bit value.
pub const SHUNT_CAL_MAX: u32 = 0x7FFF;
/// SHUNT_TEMPCO holds a 14-bit value.
pub const SHUNT_TEMPCO_MAX: u16 = 0x3FFF;
/// The current ADC resolves the expected maximum current into 2^19 steps.
pub const CURRENT_LSB_STEPS: u32 = 1 << 19;

/// Current represented by one LSB for a given expected maximum current.
pub fn current_lsb_from_max(max_current_a: f32) -> f32 {
    max_current_a / CURRENT_LSB_STEPS as f32
}

/// Calibration register value for a shunt resistance and current LSB.
/// Rounded to the nearest integer; callers check the result against
/// [`SHUNT_CAL_MAX`].
pub fn shunt_cal_code(shunt_ohms: f32, current_lsb_a: f32) -> u32 {
    (SHUNT_CAL_FACTOR * current_lsb_a as f64 * shunt_ohms as f64 + 0.5) as u32
}

/// Extract the signed 20-bit data field from a 24-bit measurement register
/// (VSHUNT, CURRENT). The field occupies bits 23:4.
pub fn signed_measurement_field(raw: u32) -> i32 {
    // Sign-extend from bit 23, then drop the reserved low nibble.
    (((raw as i32) << 8) >> 8) >> 4
}

/// Sign-extend a 40-bit accumulator value (CHARGE).
pub fn sign_extend_40(raw: u64) -> i64 {
    ((raw as i64) << 24) >> 24
}

/// Convert a raw VBUS register value to volts.
pub fn bus_voltage_v(raw: u32) -> f32 {
    (raw >> 4) as f32 * BUS_VOLTAGE_LSB_V
}

/// Convert a raw VSHUNT register value to volts.
pub fn shunt_voltage_v(raw: u32) -> f32 {
    signed_measurement_field(raw) as f32 * SHUNT_VOLTAGE_LSB_V
}

/// Convert a raw DIETEMP register value to degrees Celsius.
pub fn die_temp_c(raw: u16) -> f32 {
    raw as i16 as f32 * DIE_TEMP_LSB_C
}

/// Convert a raw CURRENT register value to amps.
pub fn current_a(raw: u32, current_lsb_a: f32) -> f32 {
    signed_measurement_field(raw) as f32 * current_lsb_a
}

/// Convert a raw POWER register value to watts.
pub fn power_w(raw: u32, current_lsb_a: f32) -> f32 {
    raw as f32 * POWER_LSB_FACTOR * current_lsb_a
}

/// Convert a raw ENERGY accumulator value to joules.
pub fn energy_j(raw: u64, current_lsb_a: f32) -> f32 {
    raw as f32 * ENERGY_LSB_FACTOR * current_lsb_a
}

/// Convert a raw CHARGE accumulator value to coulombs.
pub fn charge_c(raw: u64, current_lsb_a: f32) -> f32 {
    sign_extend_40(raw) as f32 * current_lsb_a
}
