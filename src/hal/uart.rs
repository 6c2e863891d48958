use avr_device::atmega128a::USART0;
use core::convert::Infallible;
use embedded_hal::serial::Write;

use crate::config::{CPU_FREQ_HZ, UART_BAUD};

// Baud rate calculation, 103 for 9600 at 16MHz
const UBRR: u16 = (CPU_FREQ_HZ / (16 * UART_BAUD) - 1) as u16;

const UCSRA_UDRE: u8 = 1 << 5;
const UCSRB_RXEN: u8 = 1 << 4;
const UCSRB_TXEN: u8 = 1 << 3;
// 8 data bits, no parity, 1 stop bit
const UCSRC_8N1: u8 = (1 << 2) | (1 << 1);

/// Polled USART0
pub struct Uart {
    usart: USART0,
}

impl Uart {
    pub fn new(usart: USART0) -> Self {
        unsafe {
            usart.ubrr0h.write(|w| w.bits((UBRR >> 8) as u8));
            usart.ubrr0l.write(|w| w.bits(UBRR as u8));
            usart.ucsr0c.write(|w| w.bits(UCSRC_8N1));
            usart.ucsr0b.write(|w| w.bits(UCSRB_RXEN | UCSRB_TXEN));
        }
        Self { usart }
    }

    fn data_register_empty(&self) -> bool {
        self.usart.ucsr0a.read().bits() & UCSRA_UDRE != 0
    }
}

impl Write<u8> for Uart {
    type Error = Infallible;

    fn write(&mut self, word: u8) -> nb::Result<(), Infallible> {
        if !self.data_register_empty() {
            return Err(nb::Error::WouldBlock);
        }
        unsafe {
            self.usart.udr0.write(|w| w.bits(word));
        }
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Infallible> {
        if self.data_register_empty() {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}
