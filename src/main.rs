//! Ultrasonic distance meter: HC-SR04 readings on a 16x2 LCD
#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(target_arch = "avr")]
use panic_halt as _;

#[cfg(target_arch = "avr")]
use avr_charlcd::{
    config::MEASURE_INTERVAL_MS,
    drivers::lcd::{DataBus, FourBitBus},
    drivers::{Echo, Lcd, LcdConfig, LcdError, SerialConsole, Ultrasonic, UltrasonicError},
    hal::{board, delay_ms, Delay, Uart},
};
#[cfg(target_arch = "avr")]
use embedded_hal::blocking::delay::{DelayMs, DelayUs};
#[cfg(target_arch = "avr")]
use ufmt::{uwrite, uwriteln};

#[cfg(target_arch = "avr")]
fn halt() -> ! {
    loop {
        avr_device::asm::sleep();
    }
}

#[cfg(target_arch = "avr")]
#[avr_device::entry]
fn main() -> ! {
    let Some(dp) = avr_device::atmega128a::Peripherals::take() else {
        halt()
    };

    let pins = board::pins(dp.PORTB, dp.PORTD);
    let mut console = SerialConsole::new(Uart::new(dp.USART0));

    // Enable interrupts globally
    unsafe { avr_device::interrupt::enable() };

    let bus = FourBitBus::new(
        pins.lcd_rs,
        pins.lcd_en,
        pins.lcd_d4,
        pins.lcd_d5,
        pins.lcd_d6,
        pins.lcd_d7,
    );
    let mut lcd = match Lcd::new(bus, Delay::new(), LcdConfig::default()) {
        Ok(lcd) => lcd,
        Err(_) => halt(),
    };
    let mut ranger = Ultrasonic::new(pins.trigger, pins.echo);
    let mut delay = Delay::new();

    // Print startup message
    console.write_line("ATmega128 distance meter v0.1.0").ok();
    console.write_line("Ready...").ok();

    let mut timeouts: u8 = 0;

    loop {
        match ranger.measure(&mut delay) {
            Ok(echo) => {
                show(&mut lcd, &echo).ok();
                uwriteln!(console, "Duration: {}", echo.width_us).ok();
                uwriteln!(console, "Distance cm: {}", echo.centimeters()).ok();
                uwriteln!(console, "Distance inch: {}", echo.inches()).ok();
                #[cfg(feature = "debug")]
                console
                    .debug("echo cm", u8::try_from(echo.centimeters()).unwrap_or(u8::MAX))
                    .ok();
            }
            Err(UltrasonicError::Timeout) => {
                timeouts = timeouts.wrapping_add(1);
                lcd.clear().ok();
                lcd.write_text("No echo").ok();
                console.debug("ranger timeout", timeouts).ok();
            }
            Err(UltrasonicError::Pin(never)) => match never {},
        }

        delay_ms(MEASURE_INTERVAL_MS);
    }
}

#[cfg(target_arch = "avr")]
fn show<B, D>(lcd: &mut Lcd<B, D>, echo: &Echo) -> Result<(), LcdError<B::Error>>
where
    B: DataBus,
    D: DelayUs<u16> + DelayMs<u16>,
{
    // Trailing blanks wipe digits left over from a longer reading
    lcd.goto(0, 0)?;
    uwrite!(lcd, "Dist: {} cm    ", echo.centimeters())?;
    lcd.goto(1, 0)?;
    uwrite!(lcd, "Dist: {} in    ", echo.inches())?;
    Ok(())
}

#[cfg(not(target_arch = "avr"))]
fn main() {
    eprintln!("avr_charlcd firmware only runs on ATmega128; build with an AVR target");
}
