//! INA228 Rust Driver
//!
//! Driver for the TI INA228 85-V, 20-bit current/power/energy monitor on
//! I2C. No-std, optional async mirror behind the `async` feature, optional
//! `defmt` formatting, type-safe register access.

#![no_std]

pub mod data_types;
pub mod driver;
pub mod error;
pub mod registers;

pub use driver::Ina228;
pub use error::Error;
pub use registers::DEFAULT_I2C_ADDRESS;
