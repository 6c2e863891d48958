//! Parallel bus between the MCU and the display controller
//!
//! A bus only knows how to drive its lines. Nibble order, strobe timing and
//! settle delays are the driver's job.

use embedded_hal::digital::v2::OutputPin;

use super::command::BusWidth;

/// Level of the Register-Select line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Register {
    /// RS low
    Command,
    /// RS high
    Data,
}

pub trait DataBus {
    type Error;

    fn width(&self) -> BusWidth;

    fn set_register(&mut self, register: Register) -> Result<(), Self::Error>;

    /// Drive the data lines. A 4-bit bus presents the low nibble of `bits`
    /// on D4..D7.
    fn present(&mut self, bits: u8) -> Result<(), Self::Error>;

    fn set_enable(&mut self, high: bool) -> Result<(), Self::Error>;
}

#[inline]
fn set_level<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), P::Error> {
    if high {
        pin.set_high()
    } else {
        pin.set_low()
    }
}

/// RS, E and the upper four data lines D4..D7
pub struct FourBitBus<RS, EN, D4, D5, D6, D7> {
    rs: RS,
    en: EN,
    d4: D4,
    d5: D5,
    d6: D6,
    d7: D7,
}

impl<RS, EN, D4, D5, D6, D7> FourBitBus<RS, EN, D4, D5, D6, D7> {
    pub fn new(rs: RS, en: EN, d4: D4, d5: D5, d6: D6, d7: D7) -> Self {
        Self {
            rs,
            en,
            d4,
            d5,
            d6,
            d7,
        }
    }

    pub fn release(self) -> (RS, EN, D4, D5, D6, D7) {
        (self.rs, self.en, self.d4, self.d5, self.d6, self.d7)
    }
}

impl<RS, EN, D4, D5, D6, D7, E> DataBus for FourBitBus<RS, EN, D4, D5, D6, D7>
where
    RS: OutputPin<Error = E>,
    EN: OutputPin<Error = E>,
    D4: OutputPin<Error = E>,
    D5: OutputPin<Error = E>,
    D6: OutputPin<Error = E>,
    D7: OutputPin<Error = E>,
{
    type Error = E;

    fn width(&self) -> BusWidth {
        BusWidth::Four
    }

    fn set_register(&mut self, register: Register) -> Result<(), E> {
        set_level(&mut self.rs, register == Register::Data)
    }

    fn present(&mut self, bits: u8) -> Result<(), E> {
        set_level(&mut self.d4, bits & 0x01 != 0)?;
        set_level(&mut self.d5, bits & 0x02 != 0)?;
        set_level(&mut self.d6, bits & 0x04 != 0)?;
        set_level(&mut self.d7, bits & 0x08 != 0)
    }

    fn set_enable(&mut self, high: bool) -> Result<(), E> {
        set_level(&mut self.en, high)
    }
}

/// RS, E and all eight data lines D0..D7
pub struct EightBitBus<RS, EN, D0, D1, D2, D3, D4, D5, D6, D7> {
    rs: RS,
    en: EN,
    d0: D0,
    d1: D1,
    d2: D2,
    d3: D3,
    d4: D4,
    d5: D5,
    d6: D6,
    d7: D7,
}

impl<RS, EN, D0, D1, D2, D3, D4, D5, D6, D7> EightBitBus<RS, EN, D0, D1, D2, D3, D4, D5, D6, D7> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(rs: RS, en: EN, d0: D0, d1: D1, d2: D2, d3: D3, d4: D4, d5: D5, d6: D6, d7: D7) -> Self {
        Self {
            rs,
            en,
            d0,
            d1,
            d2,
            d3,
            d4,
            d5,
            d6,
            d7,
        }
    }

    #[allow(clippy::type_complexity)]
    pub fn release(self) -> (RS, EN, D0, D1, D2, D3, D4, D5, D6, D7) {
        (
            self.rs, self.en, self.d0, self.d1, self.d2, self.d3, self.d4, self.d5, self.d6, self.d7,
        )
    }
}

impl<RS, EN, D0, D1, D2, D3, D4, D5, D6, D7, E> DataBus
    for EightBitBus<RS, EN, D0, D1, D2, D3, D4, D5, D6, D7>
where
    RS: OutputPin<Error = E>,
    EN: OutputPin<Error = E>,
    D0: OutputPin<Error = E>,
    D1: OutputPin<Error = E>,
    D2: OutputPin<Error = E>,
    D3: OutputPin<Error = E>,
    D4: OutputPin<Error = E>,
    D5: OutputPin<Error = E>,
    D6: OutputPin<Error = E>,
    D7: OutputPin<Error = E>,
{
    type Error = E;

    fn width(&self) -> BusWidth {
        BusWidth::Eight
    }

    fn set_register(&mut self, register: Register) -> Result<(), E> {
        set_level(&mut self.rs, register == Register::Data)
    }

    fn present(&mut self, bits: u8) -> Result<(), E> {
        set_level(&mut self.d0, bits & 0x01 != 0)?;
        set_level(&mut self.d1, bits & 0x02 != 0)?;
        set_level(&mut self.d2, bits & 0x04 != 0)?;
        set_level(&mut self.d3, bits & 0x08 != 0)?;
        set_level(&mut self.d4, bits & 0x10 != 0)?;
        set_level(&mut self.d5, bits & 0x20 != 0)?;
        set_level(&mut self.d6, bits & 0x40 != 0)?;
        set_level(&mut self.d7, bits & 0x80 != 0)
    }

    fn set_enable(&mut self, high: bool) -> Result<(), E> {
        set_level(&mut self.en, high)
    }
}
