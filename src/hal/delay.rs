use embedded_hal::blocking::delay::{DelayMs, DelayUs};

use crate::config::CPU_FREQ_HZ;

const CYCLES_PER_US: u32 = CPU_FREQ_HZ / 1_000_000;

// nop plus loop counter at opt-level "s"
const CYCLES_PER_ITERATION: u32 = 4;

/// Busy-wait delay. Never shorter than requested; interrupts taken while
/// spinning only make it longer.
pub struct Delay {
    _private: (),
}

impl Delay {
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for Delay {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayUs<u16> for Delay {
    fn delay_us(&mut self, us: u16) {
        let iterations = us as u32 * CYCLES_PER_US / CYCLES_PER_ITERATION;
        for _ in 0..iterations {
            avr_device::asm::nop();
        }
    }
}

impl DelayMs<u16> for Delay {
    fn delay_ms(&mut self, ms: u16) {
        for _ in 0..ms {
            self.delay_us(1000);
        }
    }
}

// Millisecond delay without holding a Delay
pub fn delay_ms(ms: u16) {
    Delay::new().delay_ms(ms);
}
