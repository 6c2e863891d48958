//! HD44780 character LCD driver
//!
//! Write-only: the busy flag is never read, every transfer is followed by the
//! controller's documented worst-case settle time instead. RW must be tied
//! low.
//!
//! The driver only exists in the ready state. [`Lcd::new`] runs the bring-up
//! sequence before handing the driver out, and [`Lcd::release`] is the only
//! way to get the bus back.

pub mod bus;
pub mod command;

use core::convert::Infallible;

use embedded_hal::blocking::delay::{DelayMs, DelayUs};

use crate::config::{
    LCD_CLEAR_SETTLE_MS, LCD_COMMAND_SETTLE_US, LCD_ENABLE_PULSE_US, LCD_LINE_BASE, LCD_LINE_LENGTH,
    LCD_POWER_ON_MS, LCD_PROBE_SETTLE_US, LCD_SINGLE_LINE_LENGTH,
};

pub use bus::{DataBus, EightBitBus, FourBitBus, Register};
pub use command::{
    BusWidth, Command, Direction, DisplayControl, EntryMode, Font, FunctionSet, Lines, Shift,
};

use command::{needs_long_settle, CLEAR_DISPLAY, FUNCTION_SET, RETURN_HOME};

/// What [`Lcd::goto`] does with a position outside the display
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressPolicy {
    /// Reject the position with an error, nothing is sent
    Strict,
    /// Ignore invalid rows silently and add the column unchecked
    Lenient,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LcdError<E> {
    /// A bus line could not be driven
    Bus(E),
    RowOutOfRange(u8),
    ColumnOutOfRange(u8),
    /// CGRAM only holds eight glyphs
    SlotOutOfRange(u8),
}

impl LcdError<Infallible> {
    /// Addressing errors never involve the bus
    fn widen<E>(self) -> LcdError<E> {
        match self {
            LcdError::Bus(never) => match never {},
            LcdError::RowOutOfRange(row) => LcdError::RowOutOfRange(row),
            LcdError::ColumnOutOfRange(column) => LcdError::ColumnOutOfRange(column),
            LcdError::SlotOutOfRange(slot) => LcdError::SlotOutOfRange(slot),
        }
    }
}

/// Controller settings applied during bring-up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LcdConfig {
    pub lines: Lines,
    pub font: Font,
    pub display: DisplayControl,
    pub entry: EntryMode,
    pub policy: AddressPolicy,
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self {
            lines: Lines::Two,
            font: Font::Dots5x8,
            display: DisplayControl::default(),
            entry: EntryMode::default(),
            policy: AddressPolicy::Strict,
        }
    }
}

impl LcdConfig {
    pub fn lines(mut self, lines: Lines) -> Self {
        self.lines = lines;
        self
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn cursor(mut self, on: bool) -> Self {
        self.display.cursor = on;
        self
    }

    pub fn blink(mut self, on: bool) -> Self {
        self.display.blink = on;
        self
    }

    pub fn entry(mut self, entry: EntryMode) -> Self {
        self.entry = entry;
        self
    }

    pub fn policy(mut self, policy: AddressPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// DDRAM address of `(row, column)`, or `None` when the lenient policy drops
/// the position.
pub(crate) fn ddram_address(
    config: &LcdConfig,
    row: u8,
    column: u8,
) -> Result<Option<u8>, LcdError<Infallible>> {
    let rows = config.lines.rows();
    let line_length = match config.lines {
        Lines::One => LCD_SINGLE_LINE_LENGTH,
        Lines::Two => LCD_LINE_LENGTH,
    };

    match config.policy {
        AddressPolicy::Strict => {
            if row >= rows {
                return Err(LcdError::RowOutOfRange(row));
            }
            if column >= line_length {
                return Err(LcdError::ColumnOutOfRange(column));
            }
            Ok(Some(LCD_LINE_BASE[row as usize] + column))
        }
        AddressPolicy::Lenient => {
            if row >= rows {
                return Ok(None);
            }
            Ok(Some(LCD_LINE_BASE[row as usize].wrapping_add(column) & 0x7F))
        }
    }
}

/// One enable strobe latching `bits` from the data lines
fn pulse<B, D>(bus: &mut B, delay: &mut D, bits: u8) -> Result<(), B::Error>
where
    B: DataBus,
    D: DelayUs<u16>,
{
    bus.present(bits)?;
    bus.set_enable(true)?;
    delay.delay_us(LCD_ENABLE_PULSE_US);
    bus.set_enable(false)
}

pub struct Lcd<B, D> {
    bus: B,
    delay: D,
    config: LcdConfig,
}

impl<B, D> Lcd<B, D>
where
    B: DataBus,
    D: DelayUs<u16> + DelayMs<u16>,
{
    /// Bring up the controller and return a ready driver
    pub fn new(bus: B, delay: D, config: LcdConfig) -> Result<Self, LcdError<B::Error>> {
        let mut lcd = Self { bus, delay, config };
        lcd.initialize()?;
        Ok(lcd)
    }

    fn initialize(&mut self) -> Result<(), LcdError<B::Error>> {
        self.bus.set_enable(false).map_err(LcdError::Bus)?;
        self.delay.delay_ms(LCD_POWER_ON_MS);

        // An 8-bit function-set is understood in 8-bit mode and in either
        // nibble phase of 4-bit mode, so three of them resynchronize the
        // controller whatever state it woke up in.
        let probe = FUNCTION_SET | BusWidth::Eight as u8;
        for settle in LCD_PROBE_SETTLE_US {
            self.strobe_command(probe)?;
            self.delay.delay_us(settle);
        }

        let width = self.bus.width();
        if width == BusWidth::Four {
            // Switch to 4-bit, still latched as a single 8-bit transfer
            self.strobe_command(FUNCTION_SET)?;
            self.delay.delay_us(LCD_COMMAND_SETTLE_US);
        }

        let function = FunctionSet {
            width,
            lines: self.config.lines,
            font: self.config.font,
        };
        self.send_command(function.bits())?;
        self.send_command(self.config.display.bits())?;
        self.clear()?;
        self.send_command(self.config.entry.bits())
    }

    /// Single strobe with RS low. On a 4-bit bus only the high nibble of
    /// `code` is presented.
    fn strobe_command(&mut self, code: u8) -> Result<(), LcdError<B::Error>> {
        let Self { bus, delay, .. } = self;
        critical_section::with(|_| {
            bus.set_register(Register::Command)?;
            match bus.width() {
                BusWidth::Four => pulse(bus, delay, code >> 4),
                BusWidth::Eight => pulse(bus, delay, code),
            }
        })
        .map_err(LcdError::Bus)
    }

    fn transfer(&mut self, register: Register, byte: u8) -> Result<(), LcdError<B::Error>> {
        let Self { bus, delay, .. } = self;
        // Interrupts must not split the nibble pair
        critical_section::with(|_| {
            bus.set_register(register)?;
            match bus.width() {
                BusWidth::Four => {
                    pulse(bus, delay, byte >> 4)?;
                    pulse(bus, delay, byte & 0x0F)
                }
                BusWidth::Eight => pulse(bus, delay, byte),
            }
        })
        .map_err(LcdError::Bus)?;

        if register == Register::Command && needs_long_settle(byte) {
            self.delay.delay_ms(LCD_CLEAR_SETTLE_MS);
        } else {
            self.delay.delay_us(LCD_COMMAND_SETTLE_US);
        }
        Ok(())
    }

    pub fn send_command(&mut self, code: u8) -> Result<(), LcdError<B::Error>> {
        self.transfer(Register::Command, code)
    }

    pub fn send_data(&mut self, byte: u8) -> Result<(), LcdError<B::Error>> {
        self.transfer(Register::Data, byte)
    }

    pub fn command(&mut self, command: Command) -> Result<(), LcdError<B::Error>> {
        self.send_command(command.code())
    }

    /// Blank the display and move the cursor to address 0
    pub fn clear(&mut self) -> Result<(), LcdError<B::Error>> {
        self.send_command(CLEAR_DISPLAY)
    }

    /// Cursor to address 0 and undo any display shift, DDRAM is kept
    pub fn return_home(&mut self) -> Result<(), LcdError<B::Error>> {
        self.send_command(RETURN_HOME)
    }

    /// Move the cursor to a zero-based `row` and `column`
    pub fn goto(&mut self, row: u8, column: u8) -> Result<(), LcdError<B::Error>> {
        match ddram_address(&self.config, row, column).map_err(LcdError::widen)? {
            Some(address) => self.command(Command::SetDdramAddress(address)),
            None => Ok(()),
        }
    }

    /// Send every byte of `text` as character data. Nothing wraps: bytes past
    /// the end of the line land wherever the controller puts them.
    pub fn write_text(&mut self, text: &str) -> Result<(), LcdError<B::Error>> {
        self.write_bytes(text.as_bytes())
    }

    /// Raw character codes, including the CGRAM glyphs 0..=7
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), LcdError<B::Error>> {
        for &byte in bytes {
            self.send_data(byte)?;
        }
        Ok(())
    }

    pub fn set_display(&mut self, control: DisplayControl) -> Result<(), LcdError<B::Error>> {
        self.command(Command::DisplayControl(control))?;
        self.config.display = control;
        Ok(())
    }

    pub fn display_on(&mut self, on: bool) -> Result<(), LcdError<B::Error>> {
        self.set_display(DisplayControl {
            display: on,
            ..self.config.display
        })
    }

    pub fn set_cursor_visible(&mut self, visible: bool) -> Result<(), LcdError<B::Error>> {
        self.set_display(DisplayControl {
            cursor: visible,
            ..self.config.display
        })
    }

    pub fn set_blink(&mut self, blink: bool) -> Result<(), LcdError<B::Error>> {
        self.set_display(DisplayControl {
            blink,
            ..self.config.display
        })
    }

    pub fn set_entry_mode(&mut self, entry: EntryMode) -> Result<(), LcdError<B::Error>> {
        self.command(Command::EntryMode(entry))?;
        self.config.entry = entry;
        Ok(())
    }

    pub fn shift(&mut self, shift: Shift) -> Result<(), LcdError<B::Error>> {
        self.command(Command::Shift(shift))
    }

    /// Store a 5x8 glyph in CGRAM `slot`; print it with `write_bytes(&[slot])`.
    /// Leaves the cursor at row 0, column 0.
    pub fn define_char(&mut self, slot: u8, bitmap: &[u8; 8]) -> Result<(), LcdError<B::Error>> {
        if slot >= 8 {
            return Err(LcdError::SlotOutOfRange(slot));
        }
        self.command(Command::SetCgramAddress(slot << 3))?;
        for &row in bitmap {
            self.send_data(row & 0x1F)?;
        }
        self.command(Command::SetDdramAddress(0))
    }

    pub fn config(&self) -> &LcdConfig {
        &self.config
    }

    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}

impl<B, D> ufmt::uWrite for Lcd<B, D>
where
    B: DataBus,
    D: DelayUs<u16> + DelayMs<u16>,
{
    type Error = LcdError<B::Error>;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.write_text(s)
    }
}
