#![cfg(not(feature = "async"))]

use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};
use ina228_rs::Error;
use ina228_rs::data_types::{
    AlertLatch, AlertPolarity, AlertType, AveragingCount, ConversionTime, MeasurementMode,
};
use ina228_rs::driver::Ina228;

const ADDR: u8 = 0x40;

#[test]
fn init_probes_resets_and_calibrates() {
    let expectations = [
        // Manufacturer ID probe reads "TI".
        I2cTrans::write_read(ADDR, vec![0x3E], vec![0x54, 0x49]),
        // CONFIG RST.
        I2cTrans::write(ADDR, vec![0x00, 0x80, 0x00]),
        // SHUNT_CAL for 0.1 Ω / 3.2 A = 8000.
        I2cTrans::write(ADDR, vec![0x02, 0x1F, 0x40]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut dev = Ina228::new(mock);
    dev.init().unwrap();
    dev.free().done();
}

#[test]
fn init_rejects_wrong_manufacturer() {
    let expectations = [I2cTrans::write_read(ADDR, vec![0x3E], vec![0x12, 0x34])];
    let mock = I2cMock::new(&expectations);
    let mut dev = Ina228::new(mock);
    assert!(matches!(dev.init(), Err(Error::DeviceNotFound)));
    dev.free().done();
}

#[test]
fn mode_roundtrip_all_modes() {
    let modes = [
        (MeasurementMode::Shutdown, 0x00u8),
        (MeasurementMode::Triggered, 0x07),
        (MeasurementMode::Continuous, 0x0F),
    ];
    let mut expectations = Vec::new();
    for (_, bits) in modes {
        // set_mode: read-modify-write of CONFIG.
        expectations.push(I2cTrans::write_read(ADDR, vec![0x00], vec![0x00, 0x00]));
        expectations.push(I2cTrans::write(ADDR, vec![0x00, 0x00, bits]));
        // mode: read back.
        expectations.push(I2cTrans::write_read(ADDR, vec![0x00], vec![0x00, bits]));
    }
    let mock = I2cMock::new(&expectations);
    let mut dev = Ina228::new(mock);
    for (mode, _) in modes {
        dev.set_mode(mode).unwrap();
        assert_eq!(dev.mode().unwrap(), mode);
    }
    dev.free().done();
}

const ALL_TIMES: [ConversionTime; 8] = [
    ConversionTime::Us50,
    ConversionTime::Us84,
    ConversionTime::Us150,
    ConversionTime::Us280,
    ConversionTime::Us540,
    ConversionTime::Us1052,
    ConversionTime::Us2074,
    ConversionTime::Us4120,
];

#[test]
fn voltage_conversion_time_roundtrip_all_values() {
    let mut expectations = Vec::new();
    for time in ALL_TIMES {
        let field = time.bits() << 9;
        expectations.push(I2cTrans::write_read(ADDR, vec![0x01], vec![0x00, 0x00]));
        expectations.push(I2cTrans::write(
            ADDR,
            vec![0x01, (field >> 8) as u8, field as u8],
        ));
        expectations.push(I2cTrans::write_read(
            ADDR,
            vec![0x01],
            vec![(field >> 8) as u8, field as u8],
        ));
    }
    let mock = I2cMock::new(&expectations);
    let mut dev = Ina228::new(mock);
    for time in ALL_TIMES {
        dev.set_voltage_conversion_time(time).unwrap();
        assert_eq!(dev.voltage_conversion_time().unwrap(), time);
    }
    dev.free().done();
}

#[test]
fn current_conversion_time_roundtrip_all_values() {
    let mut expectations = Vec::new();
    for time in ALL_TIMES {
        let field = time.bits() << 6;
        expectations.push(I2cTrans::write_read(ADDR, vec![0x01], vec![0x00, 0x00]));
        expectations.push(I2cTrans::write(
            ADDR,
            vec![0x01, (field >> 8) as u8, field as u8],
        ));
        expectations.push(I2cTrans::write_read(
            ADDR,
            vec![0x01],
            vec![(field >> 8) as u8, field as u8],
        ));
    }
    let mock = I2cMock::new(&expectations);
    let mut dev = Ina228::new(mock);
    for time in ALL_TIMES {
        dev.set_current_conversion_time(time).unwrap();
        assert_eq!(dev.current_conversion_time().unwrap(), time);
    }
    dev.free().done();
}

#[test]
fn averaging_count_roundtrip_all_values() {
    let counts = [
        AveragingCount::Count1,
        AveragingCount::Count4,
        AveragingCount::Count16,
        AveragingCount::Count64,
        AveragingCount::Count128,
        AveragingCount::Count256,
        AveragingCount::Count512,
        AveragingCount::Count1024,
    ];
    let mut expectations = Vec::new();
    for count in counts {
        expectations.push(I2cTrans::write_read(ADDR, vec![0x01], vec![0x00, 0x00]));
        expectations.push(I2cTrans::write(ADDR, vec![0x01, 0x00, count.bits() as u8]));
        expectations.push(I2cTrans::write_read(
            ADDR,
            vec![0x01],
            vec![0x00, count.bits() as u8],
        ));
    }
    let mock = I2cMock::new(&expectations);
    let mut dev = Ina228::new(mock);
    for count in counts {
        dev.set_averaging_count(count).unwrap();
        assert_eq!(dev.averaging_count().unwrap(), count);
    }
    dev.free().done();
}

#[test]
fn overcurrent_alert_limit_roundtrip() {
    // 0.015 Ω / 32 A gives an exact current LSB of 2^-14 A, so a 2.5 A
    // threshold stores 40960 and round-trips exactly.
    let expectations = [
        I2cTrans::write(ADDR, vec![0x02, 0x2E, 0xE0]),
        // set_alert_type(OverCurrent): 0x20 << 10 = bit 15.
        I2cTrans::write_read(ADDR, vec![0x0B], vec![0x00, 0x00]),
        I2cTrans::write(ADDR, vec![0x0B, 0x80, 0x00]),
        // set_alert_limit reads the active type, then writes the threshold.
        I2cTrans::write_read(ADDR, vec![0x0B], vec![0x80, 0x00]),
        I2cTrans::write(ADDR, vec![0x0C, 0xA0, 0x00]),
        // alert_limit reads the type and the raw threshold back.
        I2cTrans::write_read(ADDR, vec![0x0B], vec![0x80, 0x00]),
        I2cTrans::write_read(ADDR, vec![0x0C], vec![0xA0, 0x00]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut dev = Ina228::new(mock);
    dev.set_shunt(0.015, 32.0).unwrap();
    dev.set_alert_type(AlertType::OverCurrent).unwrap();
    dev.set_alert_limit(2.5).unwrap();
    let limit = dev.alert_limit().unwrap();
    assert!((limit - 2.5).abs() <= dev.current_lsb());
    dev.free().done();
}

#[test]
fn overpower_alert_limit_roundtrip() {
    let expectations = [
        I2cTrans::write(ADDR, vec![0x02, 0x2E, 0xE0]),
        // set_alert_type(OverPower): 0x02 << 10 = bit 11.
        I2cTrans::write_read(ADDR, vec![0x0B], vec![0x00, 0x00]),
        I2cTrans::write(ADDR, vec![0x0B, 0x08, 0x00]),
        // 10 W / (3.2 × 2^-14 W) = 51200 = 0xC800.
        I2cTrans::write_read(ADDR, vec![0x0B], vec![0x08, 0x00]),
        I2cTrans::write(ADDR, vec![0x0C, 0xC8, 0x00]),
        I2cTrans::write_read(ADDR, vec![0x0B], vec![0x08, 0x00]),
        I2cTrans::write_read(ADDR, vec![0x0C], vec![0xC8, 0x00]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut dev = Ina228::new(mock);
    dev.set_shunt(0.015, 32.0).unwrap();
    dev.set_alert_type(AlertType::OverPower).unwrap();
    dev.set_alert_limit(10.0).unwrap();
    let limit = dev.alert_limit().unwrap();
    assert!((limit - 10.0).abs() <= dev.power_lsb());
    dev.free().done();
}

#[test]
fn alert_limit_rejects_threshold_beyond_register() {
    // With the default 3.2 A range the current LSB is ~6.1 µA, so 2.5 A
    // needs 19 bits and must be refused rather than truncated.
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x0B], vec![0x00, 0x00]),
        I2cTrans::write(ADDR, vec![0x0B, 0x80, 0x00]),
        I2cTrans::write_read(ADDR, vec![0x0B], vec![0x80, 0x00]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut dev = Ina228::new(mock);
    dev.set_alert_type(AlertType::OverCurrent).unwrap();
    assert!(matches!(dev.set_alert_limit(2.5), Err(Error::OutOfRange)));
    dev.free().done();
}

#[test]
fn current_read_scales_by_calibrated_lsb() {
    let expectations = [
        I2cTrans::write(ADDR, vec![0x02, 0x1F, 0x40]),
        // CURRENT raw 0x010000: 20-bit field 0x1000 after the reserved nibble.
        I2cTrans::write_read(ADDR, vec![0x07], vec![0x01, 0x00, 0x00]),
        // Negative full-scale-adjacent value: field -1.
        I2cTrans::write_read(ADDR, vec![0x07], vec![0xFF, 0xFF, 0xF0]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut dev = Ina228::new(mock);
    dev.set_shunt(0.1, 3.2).unwrap();

    let amps = dev.read_current().unwrap();
    let expected = 4096.0 * dev.current_lsb();
    assert!((amps - expected).abs() < 1e-7);
    assert!((amps - 0.025).abs() < 1e-6);

    let amps = dev.read_current().unwrap();
    assert!((amps + dev.current_lsb()).abs() < 1e-9);
    dev.free().done();
}

#[test]
fn energy_read_scales_by_power_lsb_times_16() {
    let expectations = [I2cTrans::write_read(
        ADDR,
        vec![0x09],
        vec![0x00, 0x00, 0x00, 0x03, 0xE8],
    )];
    let mock = I2cMock::new(&expectations);
    let mut dev = Ina228::new(mock);
    // Constructor default is the 3.2 A breakout scale.
    let joules = dev.read_energy().unwrap();
    assert!((joules - 0.3125).abs() < 1e-5);
    dev.free().done();
}

#[test]
fn flags_read_without_bit_bleed() {
    let expectations = [
        // Only CVRF set.
        I2cTrans::write_read(ADDR, vec![0x0B], vec![0x00, 0x08]),
        // AFF and OVF set, CVRF clear.
        I2cTrans::write_read(ADDR, vec![0x0B], vec![0x00, 0x14]),
        // Configuration bits only (OCL, APOL, LEN): no flag may leak.
        I2cTrans::write_read(ADDR, vec![0x0B], vec![0x80, 0x03]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut dev = Ina228::new(mock);

    assert!(dev.conversion_ready().unwrap());

    let flags = dev.alert_function_flags().unwrap();
    assert!(flags.alert_function);
    assert!(!flags.conversion_ready);
    assert!(flags.math_overflow);

    let flags = dev.alert_function_flags().unwrap();
    assert_eq!(flags, Default::default());
    dev.free().done();
}

#[test]
fn polarity_and_latch_roundtrip() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x0B], vec![0x00, 0x00]),
        I2cTrans::write(ADDR, vec![0x0B, 0x00, 0x02]),
        I2cTrans::write_read(ADDR, vec![0x0B], vec![0x00, 0x02]),
        I2cTrans::write_read(ADDR, vec![0x0B], vec![0x00, 0x02]),
        I2cTrans::write(ADDR, vec![0x0B, 0x00, 0x03]),
        I2cTrans::write_read(ADDR, vec![0x0B], vec![0x00, 0x03]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut dev = Ina228::new(mock);

    dev.set_alert_polarity(AlertPolarity::ActiveLow).unwrap();
    assert_eq!(dev.alert_polarity().unwrap(), AlertPolarity::ActiveLow);

    dev.set_alert_latch(AlertLatch::Latched).unwrap();
    assert_eq!(dev.alert_latch().unwrap(), AlertLatch::Latched);
    dev.free().done();
}

#[test]
fn tempco_and_accumulator_reset() {
    let expectations = [
        I2cTrans::write(ADDR, vec![0x03, 0x0B, 0xB8]),
        // reset_accumulators: RSTACC read-modify-write preserves the mode.
        I2cTrans::write_read(ADDR, vec![0x00], vec![0x00, 0x0F]),
        I2cTrans::write(ADDR, vec![0x00, 0x40, 0x0F]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut dev = Ina228::new(mock);

    dev.set_shunt_tempco(3000).unwrap();
    assert!(matches!(
        dev.set_shunt_tempco(0x4000),
        Err(Error::OutOfRange)
    ));
    dev.reset_accumulators().unwrap();
    dev.free().done();
}

#[test]
fn shunt_config_rejects_calibration_overflow() {
    // No transactions: the range check fires before any bus traffic.
    let mock = I2cMock::new(&[]);
    let mut dev = Ina228::new(mock);
    assert!(matches!(
        dev.set_shunt(10.0, 100.0),
        Err(Error::OutOfRange)
    ));
    // The stored scale is untouched by the failed call.
    assert_eq!(dev.current_lsb(), 3.2 / 524_288.0);
    dev.free().done();
}
