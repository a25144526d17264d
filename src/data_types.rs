//! User-facing data types for the INA228 driver.
//! Each enum carries the exact field encoding from the datasheet.

/// Measurement mode (CONFIG bits 3:0).
///
/// Writing [`Triggered`](MeasurementMode::Triggered) while already in
/// triggered mode re-arms the one-shot; the software side performs an
/// unconditional write either way.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MeasurementMode {
    /// Minimize quiescent current; ADC inputs off. Set another mode to exit.
    Shutdown,
    /// One-shot measurement of temperature, current and bus voltage.
    Triggered,
    /// Continuously update the measurement registers (power-on default).
    Continuous,
}

impl MeasurementMode {
    /// Field encoding for the CONFIG mode bits.
    pub fn bits(self) -> u16 {
        match self {
            MeasurementMode::Shutdown => 0x0,
            MeasurementMode::Triggered => 0x7,
            MeasurementMode::Continuous => 0xF,
        }
    }

    /// Decode the CONFIG mode field. Returns `None` for encodings the
    /// driver never writes.
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            0x0 => Some(MeasurementMode::Shutdown),
            0x7 => Some(MeasurementMode::Triggered),
            0xF => Some(MeasurementMode::Continuous),
            _ => None,
        }
    }
}

/// ADC conversion time (3-bit field, shared encoding for the bus voltage
/// and current channels).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConversionTime {
    Us50,
    Us84,
    Us150,
    Us280,
    Us540,
    Us1052,
    Us2074,
    Us4120,
}

impl ConversionTime {
    pub fn bits(self) -> u16 {
        match self {
            ConversionTime::Us50 => 0b000,
            ConversionTime::Us84 => 0b001,
            ConversionTime::Us150 => 0b010,
            ConversionTime::Us280 => 0b011,
            ConversionTime::Us540 => 0b100,
            ConversionTime::Us1052 => 0b101,
            ConversionTime::Us2074 => 0b110,
            ConversionTime::Us4120 => 0b111,
        }
    }

    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            0b000 => Some(ConversionTime::Us50),
            0b001 => Some(ConversionTime::Us84),
            0b010 => Some(ConversionTime::Us150),
            0b011 => Some(ConversionTime::Us280),
            0b100 => Some(ConversionTime::Us540),
            0b101 => Some(ConversionTime::Us1052),
            0b110 => Some(ConversionTime::Us2074),
            0b111 => Some(ConversionTime::Us4120),
            _ => None,
        }
    }

    /// Conversion duration in microseconds.
    pub fn microseconds(self) -> u16 {
        match self {
            ConversionTime::Us50 => 50,
            ConversionTime::Us84 => 84,
            ConversionTime::Us150 => 150,
            ConversionTime::Us280 => 280,
            ConversionTime::Us540 => 540,
            ConversionTime::Us1052 => 1052,
            ConversionTime::Us2074 => 2074,
            ConversionTime::Us4120 => 4120,
        }
    }
}

/// ADC sample averaging window (ADC_CONFIG bits 2:0).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AveragingCount {
    /// 1 sample (power-on default).
    Count1,
    Count4,
    Count16,
    Count64,
    Count128,
    Count256,
    Count512,
    Count1024,
}

impl AveragingCount {
    pub fn bits(self) -> u16 {
        match self {
            AveragingCount::Count1 => 0b000,
            AveragingCount::Count4 => 0b001,
            AveragingCount::Count16 => 0b010,
            AveragingCount::Count64 => 0b011,
            AveragingCount::Count128 => 0b100,
            AveragingCount::Count256 => 0b101,
            AveragingCount::Count512 => 0b110,
            AveragingCount::Count1024 => 0b111,
        }
    }

    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            0b000 => Some(AveragingCount::Count1),
            0b001 => Some(AveragingCount::Count4),
            0b010 => Some(AveragingCount::Count16),
            0b011 => Some(AveragingCount::Count64),
            0b100 => Some(AveragingCount::Count128),
            0b101 => Some(AveragingCount::Count256),
            0b110 => Some(AveragingCount::Count512),
            0b111 => Some(AveragingCount::Count1024),
            _ => None,
        }
    }

    /// Number of samples in the averaging window.
    pub fn samples(self) -> u16 {
        match self {
            AveragingCount::Count1 => 1,
            AveragingCount::Count4 => 4,
            AveragingCount::Count16 => 16,
            AveragingCount::Count64 => 64,
            AveragingCount::Count128 => 128,
            AveragingCount::Count256 => 256,
            AveragingCount::Count512 => 512,
            AveragingCount::Count1024 => 1024,
        }
    }
}

/// Condition that drives the alert pin (DIAG_ALRT bits 15:10, one-hot).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AlertType {
    /// Alert pin not driven (power-on default).
    None,
    /// Trigger on conversion ready.
    ConversionReady,
    /// Trigger on power over limit.
    OverPower,
    /// Trigger on bus voltage under limit.
    UnderVoltage,
    /// Trigger on bus voltage over limit.
    OverVoltage,
    /// Trigger on current under limit.
    UnderCurrent,
    /// Trigger on current over limit.
    OverCurrent,
}

impl AlertType {
    /// One-hot encoding of the alert selection field.
    pub fn bits(self) -> u16 {
        match self {
            AlertType::None => 0x00,
            AlertType::ConversionReady => 0x01,
            AlertType::OverPower => 0x02,
            AlertType::UnderVoltage => 0x04,
            AlertType::OverVoltage => 0x08,
            AlertType::UnderCurrent => 0x10,
            AlertType::OverCurrent => 0x20,
        }
    }

    /// Decode the alert selection field. Returns `None` for multi-bit
    /// combinations the driver never writes.
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            0x00 => Some(AlertType::None),
            0x01 => Some(AlertType::ConversionReady),
            0x02 => Some(AlertType::OverPower),
            0x04 => Some(AlertType::UnderVoltage),
            0x08 => Some(AlertType::OverVoltage),
            0x10 => Some(AlertType::UnderCurrent),
            0x20 => Some(AlertType::OverCurrent),
            _ => None,
        }
    }
}

/// Alert pin polarity (DIAG_ALRT bit 1).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AlertPolarity {
    /// Active-high open collector (power-on default).
    ActiveHigh,
    /// Active-low open collector.
    ActiveLow,
}

/// Alert pin latch behavior (DIAG_ALRT bit 0).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AlertLatch {
    /// Alert clears as soon as the fault condition clears.
    Transparent,
    /// Alert stays asserted until DIAG_ALRT is read.
    Latched,
}

/// Read-side flags decoded from DIAG_ALRT.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AlertFlags {
    /// The selected alert condition fired.
    pub alert_function: bool,
    /// A conversion cycle completed.
    pub conversion_ready: bool,
    /// The current/power computation overflowed.
    pub math_overflow: bool,
}
