use avr_device::atmega128a::{PORTA, PORTB, PORTC, PORTD, PORTE, PORTF};
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::digital::v2::{InputPin, OutputPin};

pub trait PinMode {}
pub struct Input;
pub struct Output;
impl PinMode for Input {}
impl PinMode for Output {}

/// Typed port pin. Pins are only created by [`board::pins`], which consumes
/// the port peripherals, so each pin has exactly one owner.
#[derive(Debug)]
pub struct Pin<PORT, const PIN: u8, MODE> {
    _port: PhantomData<PORT>,
    _mode: PhantomData<MODE>,
}

impl<PORT, const P: u8> Pin<PORT, P, Input> {
    const fn new() -> Self {
        Pin {
            _port: PhantomData,
            _mode: PhantomData,
        }
    }
}

macro_rules! impl_port {
    ($PORT:ident, $port:ident, $ddr:ident, $pin:ident) => {
        impl<const P: u8, MODE: PinMode> Pin<$PORT, P, MODE> {
            pub fn into_output(self) -> Pin<$PORT, P, Output> {
                // Set DDRx bit
                unsafe {
                    (*$PORT::ptr()).$ddr.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
                Pin {
                    _port: PhantomData,
                    _mode: PhantomData,
                }
            }

            pub fn into_input(self) -> Pin<$PORT, P, Input> {
                // Clear DDRx bit and disable pull-up
                unsafe {
                    (*$PORT::ptr()).$ddr.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                }
                Pin {
                    _port: PhantomData,
                    _mode: PhantomData,
                }
            }
        }

        impl<const P: u8> OutputPin for Pin<$PORT, P, Output> {
            type Error = Infallible;

            #[inline]
            fn set_high(&mut self) -> Result<(), Infallible> {
                unsafe {
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
                Ok(())
            }

            #[inline]
            fn set_low(&mut self) -> Result<(), Infallible> {
                unsafe {
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                }
                Ok(())
            }
        }

        impl<const P: u8> InputPin for Pin<$PORT, P, Input> {
            type Error = Infallible;

            #[inline]
            fn is_high(&self) -> Result<bool, Infallible> {
                let bits = unsafe { (*$PORT::ptr()).$pin.read().bits() };
                Ok(bits & (1 << P) != 0)
            }

            #[inline]
            fn is_low(&self) -> Result<bool, Infallible> {
                self.is_high().map(|high| !high)
            }
        }
    };
}

// Implement for all ATmega128 ports
impl_port!(PORTA, porta, ddra, pina);
impl_port!(PORTB, portb, ddrb, pinb);
impl_port!(PORTC, portc, ddrc, pinc);
impl_port!(PORTD, portd, ddrd, pind);
impl_port!(PORTE, porte, ddre, pine);
impl_port!(PORTF, portf, ddrf, pinf);

/// Distance meter wiring
///
/// LCD in 4-bit mode: D4..D7 on PB4..PB7, RS on PD6, E on PD7, RW tied to
/// GND. HC-SR04: TRIG on PB1, ECHO on PB2. USART0 (PE0/PE1) carries the
/// console.
pub mod board {
    use super::*;

    pub type LcdRs = Pin<PORTD, 6, Output>;
    pub type LcdEn = Pin<PORTD, 7, Output>;
    pub type LcdD4 = Pin<PORTB, 4, Output>;
    pub type LcdD5 = Pin<PORTB, 5, Output>;
    pub type LcdD6 = Pin<PORTB, 6, Output>;
    pub type LcdD7 = Pin<PORTB, 7, Output>;

    pub type RangerTrigger = Pin<PORTB, 1, Output>;
    pub type RangerEcho = Pin<PORTB, 2, Input>;

    const PORTB_LCD_DATA: u8 = 0xF0;
    const PORTB_RANGER: u8 = (1 << 1) | (1 << 2);
    const PORTD_LCD_CONTROL: u8 = (1 << 6) | (1 << 7);

    const _: () = assert!(PORTB_LCD_DATA & PORTB_RANGER == 0);
    const _: () = assert!(PORTD_LCD_CONTROL.count_ones() == 2);

    pub struct Pins {
        pub lcd_rs: LcdRs,
        pub lcd_en: LcdEn,
        pub lcd_d4: LcdD4,
        pub lcd_d5: LcdD5,
        pub lcd_d6: LcdD6,
        pub lcd_d7: LcdD7,
        pub trigger: RangerTrigger,
        pub echo: RangerEcho,
    }

    /// Configure directions and hand out the board pins
    pub fn pins(_portb: PORTB, _portd: PORTD) -> Pins {
        Pins {
            lcd_rs: Pin::<PORTD, 6, Input>::new().into_output(),
            lcd_en: Pin::<PORTD, 7, Input>::new().into_output(),
            lcd_d4: Pin::<PORTB, 4, Input>::new().into_output(),
            lcd_d5: Pin::<PORTB, 5, Input>::new().into_output(),
            lcd_d6: Pin::<PORTB, 6, Input>::new().into_output(),
            lcd_d7: Pin::<PORTB, 7, Input>::new().into_output(),
            trigger: Pin::<PORTB, 1, Input>::new().into_output(),
            echo: Pin::<PORTB, 2, Input>::new().into_input(),
        }
    }
}
