pub mod lcd;
pub mod serial_console;
pub mod ultrasonic;

pub use lcd::{AddressPolicy, Lcd, LcdConfig, LcdError};
pub use serial_console::SerialConsole;
pub use ultrasonic::{Echo, Ultrasonic, UltrasonicError};
