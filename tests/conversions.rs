use ina228_rs::registers::{
    BUS_VOLTAGE_LSB_V, POWER_LSB_FACTOR, SHUNT_CAL_MAX, SHUNT_VOLTAGE_LSB_V, bus_voltage_v,
    charge_c, current_a, current_lsb_from_max, die_temp_c, energy_j, power_w, shunt_cal_code,
    shunt_voltage_v, sign_extend_40, signed_measurement_field,
};

#[test]
fn calibration_matches_datasheet_example() {
    // 0.1 Ω shunt, 3.2 A expected maximum: the datasheet worked example.
    let lsb = current_lsb_from_max(3.2);
    assert!((lsb - 3.2 / 524_288.0).abs() < 1e-12);
    assert_eq!(shunt_cal_code(0.1, lsb), 8000);
}

#[test]
fn calibration_power_of_two_max_current_is_exact() {
    // 32 A over 2^19 steps gives an exactly representable LSB of 2^-14 A.
    let lsb = current_lsb_from_max(32.0);
    assert_eq!(lsb, 6.103_515_625e-5);
    assert_eq!(shunt_cal_code(0.015, lsb), 12_000);
}

#[test]
fn calibration_overflows_for_extreme_shunts() {
    // 10 Ω with 100 A expected maximum cannot be represented in 15 bits.
    let lsb = current_lsb_from_max(100.0);
    assert!(shunt_cal_code(10.0, lsb) > SHUNT_CAL_MAX);
}

#[test]
fn power_scale_is_fixed_multiple_of_current_scale() {
    let lsb = current_lsb_from_max(3.2);
    let one_power_lsb = power_w(1, lsb);
    assert!((one_power_lsb - POWER_LSB_FACTOR * lsb).abs() < 1e-12);
    // Energy accumulates 16 power LSBs per count.
    assert!((energy_j(1, lsb) - 16.0 * one_power_lsb).abs() < 1e-9);
}

#[test]
fn measurement_field_drops_reserved_nibble_and_sign_extends() {
    assert_eq!(signed_measurement_field(0x01_0000), 0x1000);
    assert_eq!(signed_measurement_field(0xFF_FFF0), -1);
    assert_eq!(signed_measurement_field(0x80_0000), -(1 << 19));
    assert_eq!(signed_measurement_field(0x7F_FFF0), (1 << 19) - 1);
}

#[test]
fn current_conversion_is_signed() {
    let lsb = current_lsb_from_max(3.2);
    let amps = current_a(0x01_0000, lsb);
    assert!((amps - 4096.0 * lsb).abs() < 1e-9);
    assert!((current_a(0xFF_FFF0, lsb) + lsb).abs() < 1e-9);
}

#[test]
fn bus_and_shunt_voltage_scales() {
    // Field value 0x40000 = 262144 LSBs of 195.3125 µV = 51.2 V.
    let v = bus_voltage_v(0x40_0000);
    assert!((v - 51.2).abs() < 1e-4);
    assert!((bus_voltage_v(0x00_0010) - BUS_VOLTAGE_LSB_V).abs() < 1e-9);

    assert!((shunt_voltage_v(0x00_0010) - SHUNT_VOLTAGE_LSB_V).abs() < 1e-12);
    assert!((shunt_voltage_v(0xFF_FFF0) + SHUNT_VOLTAGE_LSB_V).abs() < 1e-12);
}

#[test]
fn die_temp_scale_and_sign() {
    assert!((die_temp_c(0x0800) - 16.0).abs() < 1e-4);
    assert!((die_temp_c(0xF800) + 16.0).abs() < 1e-4);
    assert_eq!(die_temp_c(0x0000), 0.0);
}

#[test]
fn forty_bit_accumulators_sign_extend() {
    assert_eq!(sign_extend_40(0xFF_FFFF_FFFF), -1);
    assert_eq!(sign_extend_40(0x7F_FFFF_FFFF), 0x7F_FFFF_FFFF);

    let lsb = current_lsb_from_max(3.2);
    assert!((charge_c(0xFF_FFFF_FFFF, lsb) + lsb).abs() < 1e-9);
    // Energy is an unsigned accumulator.
    let joules = energy_j(1000, lsb);
    assert!((joules - 0.3125).abs() < 1e-5);
}
