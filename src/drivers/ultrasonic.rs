//! HC-SR04 ultrasonic ranger
//!
//! A 10 µs trigger pulse starts a measurement; the sensor answers with an
//! echo pulse whose width is the round-trip time of flight.

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::config::{RANGER_TIMEOUT_US, RANGER_TRIGGER_US};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UltrasonicError<E> {
    Pin(E),
    /// No echo edge within the timeout
    Timeout,
}

/// Measured echo pulse
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Echo {
    pub width_us: u32,
}

impl Echo {
    /// Sound travels 0.034 cm/µs, halved for the round trip
    pub fn centimeters(&self) -> u32 {
        (u64::from(self.width_us) * 17 / 1000) as u32
    }

    /// Sound travels 0.0133 in/µs, halved for the round trip
    pub fn inches(&self) -> u32 {
        (u64::from(self.width_us) * 133 / 20_000) as u32
    }
}

pub struct Ultrasonic<TRIG, ECHO> {
    trigger: TRIG,
    echo: ECHO,
    timeout_us: u32,
}

impl<TRIG, ECHO, E> Ultrasonic<TRIG, ECHO>
where
    TRIG: OutputPin<Error = E>,
    ECHO: InputPin<Error = E>,
{
    pub fn new(trigger: TRIG, echo: ECHO) -> Self {
        Self {
            trigger,
            echo,
            timeout_us: RANGER_TIMEOUT_US,
        }
    }

    pub fn with_timeout(mut self, timeout_us: u32) -> Self {
        self.timeout_us = timeout_us;
        self
    }

    /// Trigger a measurement and time the echo
    pub fn measure<D: DelayUs<u16>>(&mut self, delay: &mut D) -> Result<Echo, UltrasonicError<E>> {
        self.trigger(delay)?;
        let width_us = self.pulse_in(delay)?;
        Ok(Echo { width_us })
    }

    fn trigger<D: DelayUs<u16>>(&mut self, delay: &mut D) -> Result<(), UltrasonicError<E>> {
        self.trigger.set_high().map_err(UltrasonicError::Pin)?;
        delay.delay_us(RANGER_TRIGGER_US);
        self.trigger.set_low().map_err(UltrasonicError::Pin)
    }

    /// Width of the next high pulse on the echo line, in 1 µs steps
    fn pulse_in<D: DelayUs<u16>>(&mut self, delay: &mut D) -> Result<u32, UltrasonicError<E>> {
        // Wait for any previous pulse to end
        self.wait_while(true, delay)?;
        // Wait for the pulse to start
        self.wait_while(false, delay)?;
        self.wait_while(true, delay)
    }

    /// Count microseconds while the echo line stays at `level`
    fn wait_while<D: DelayUs<u16>>(&mut self, level: bool, delay: &mut D) -> Result<u32, UltrasonicError<E>> {
        let mut elapsed = 0u32;
        while self.echo.is_high().map_err(UltrasonicError::Pin)? == level {
            if elapsed >= self.timeout_us {
                return Err(UltrasonicError::Timeout);
            }
            elapsed += 1;
            delay.delay_us(1);
        }
        Ok(elapsed)
    }

    pub fn release(self) -> (TRIG, ECHO) {
        (self.trigger, self.echo)
    }
}
