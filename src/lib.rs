//! Character LCD and ultrasonic ranger drivers for the ATmega128
//!
//! The drivers only depend on `embedded-hal` traits, so they build and test
//! on the host. The register-level `hal` module is compiled for AVR targets only.
#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod drivers;

#[cfg(target_arch = "avr")]
pub mod hal;
