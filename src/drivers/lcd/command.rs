//! HD44780 instruction set

pub const CLEAR_DISPLAY: u8 = 0x01;
pub const RETURN_HOME: u8 = 0x02;
pub const ENTRY_MODE: u8 = 0x04;
pub const DISPLAY_CONTROL: u8 = 0x08;
pub const SHIFT: u8 = 0x10;
pub const FUNCTION_SET: u8 = 0x20;
pub const SET_CGRAM_ADDR: u8 = 0x40;
pub const SET_DDRAM_ADDR: u8 = 0x80;

/// Number of data lines wired to the controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum BusWidth {
    Four = 0x00,
    Eight = 0x10,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Lines {
    One = 0x00,
    Two = 0x08,
}

impl Lines {
    /// Number of addressable rows
    pub const fn rows(self) -> u8 {
        match self {
            Lines::One => 1,
            Lines::Two => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Font {
    Dots5x8 = 0x00,
    Dots5x10 = 0x04,
}

/// Address counter direction after each data transfer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Direction {
    Decrement = 0x00,
    Increment = 0x02,
}

/// Cursor or display shift, without touching DDRAM
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Shift {
    CursorLeft = 0x00,
    CursorRight = 0x04,
    DisplayLeft = 0x08,
    DisplayRight = 0x0C,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FunctionSet {
    pub width: BusWidth,
    pub lines: Lines,
    pub font: Font,
}

impl FunctionSet {
    pub const fn bits(self) -> u8 {
        FUNCTION_SET | self.width as u8 | self.lines as u8 | self.font as u8
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayControl {
    pub display: bool,
    pub cursor: bool,
    pub blink: bool,
}

impl DisplayControl {
    pub const fn bits(self) -> u8 {
        DISPLAY_CONTROL
            | if self.display { 0x04 } else { 0x00 }
            | if self.cursor { 0x02 } else { 0x00 }
            | if self.blink { 0x01 } else { 0x00 }
    }
}

impl Default for DisplayControl {
    fn default() -> Self {
        Self {
            display: true,
            cursor: false,
            blink: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryMode {
    pub direction: Direction,
    /// Shift the whole display instead of the cursor
    pub shift: bool,
}

impl EntryMode {
    pub const fn bits(self) -> u8 {
        ENTRY_MODE | self.direction as u8 | if self.shift { 0x01 } else { 0x00 }
    }
}

impl Default for EntryMode {
    fn default() -> Self {
        Self {
            direction: Direction::Increment,
            shift: false,
        }
    }
}

/// Typed controller instruction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Clear,
    ReturnHome,
    EntryMode(EntryMode),
    DisplayControl(DisplayControl),
    Shift(Shift),
    FunctionSet(FunctionSet),
    SetCgramAddress(u8),
    SetDdramAddress(u8),
}

impl Command {
    pub const fn code(self) -> u8 {
        match self {
            Command::Clear => CLEAR_DISPLAY,
            Command::ReturnHome => RETURN_HOME,
            Command::EntryMode(mode) => mode.bits(),
            Command::DisplayControl(ctrl) => ctrl.bits(),
            Command::Shift(shift) => SHIFT | shift as u8,
            Command::FunctionSet(func) => func.bits(),
            Command::SetCgramAddress(addr) => SET_CGRAM_ADDR | (addr & 0x3F),
            Command::SetDdramAddress(addr) => SET_DDRAM_ADDR | (addr & 0x7F),
        }
    }
}

/// Clear and return-home need the long settle; the bit 0 of return-home is
/// a don't-care, so 0x03 is a return-home as well.
pub const fn needs_long_settle(code: u8) -> bool {
    code == CLEAR_DISPLAY || code & 0xFE == RETURN_HOME
}
