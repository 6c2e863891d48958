//! Configuration constants for the ATmega128 LCD firmware

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 16_000_000;

/// UART baud rate
pub const UART_BAUD: u32 = 9600;

/// Power-on settle before the first LCD transfer, in milliseconds
pub const LCD_POWER_ON_MS: u16 = 20;

/// Minimum width of the enable strobe, in microseconds
pub const LCD_ENABLE_PULSE_US: u16 = 1;

/// Settle after each of the three function-set probes, in microseconds
pub const LCD_PROBE_SETTLE_US: [u16; 3] = [4500, 150, 100];

/// Settle after ordinary commands and character data, in microseconds
pub const LCD_COMMAND_SETTLE_US: u16 = 100;

/// Settle after clear and return-home, in milliseconds
pub const LCD_CLEAR_SETTLE_MS: u16 = 2;

/// Number of DDRAM cells per line of a two-line display
pub const LCD_LINE_LENGTH: u8 = 40;

/// Number of DDRAM cells of a one-line display
pub const LCD_SINGLE_LINE_LENGTH: u8 = 80;

/// DDRAM base address of each display line
pub const LCD_LINE_BASE: [u8; 2] = [0x00, 0x40];

/// Width of the HC-SR04 trigger pulse, in microseconds
pub const RANGER_TRIGGER_US: u16 = 10;

/// Longest wait for any echo edge before giving up, in microseconds
pub const RANGER_TIMEOUT_US: u32 = 38_000;

/// Pause between two distance measurements, in milliseconds
pub const MEASURE_INTERVAL_MS: u16 = 500;
