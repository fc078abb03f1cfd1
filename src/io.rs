/*
 * The I/O module for the blinkers.
 *
 * This is the only part of the program that knows the lines live on a Linux
 * GPIO character device. Everything else talks to the `embedded-hal` digital
 * traits, so the control logic can be driven by mock pins in tests.
 *
 * Edge detection is polled, not interrupt driven. Every poll first waits out
 * the debounce window, which also rate-limits the loop that polls.
 */

use embassy_time::{Duration, Timer};
use embedded_hal::digital::{InputPin, PinState, StatefulOutputPin};
use gpiocdev_embedded_hal as cdev;

use crate::error::{Error, gpio_error};

pub const DEBOUNCE: Duration = Duration::from_millis(50);

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Edge {
    Rising,
    Falling,
    Both,
}

impl Edge {
    pub fn matches(self, old: PinState, new: PinState) -> bool {
        match (self, old, new) {
            (_, old, new) if old == new => false,
            (Edge::Rising, PinState::Low, PinState::High) => true,
            (Edge::Falling, PinState::High, PinState::Low) => true,
            (Edge::Both, _, _) => true,
            (Edge::Rising, _, _) | (Edge::Falling, _, _) => false,
        }
    }
}

pub async fn delay(duration: Duration) {
    if duration.as_ticks() > 0 {
        Timer::after(duration).await;
    }
}

/// Waits out the debounce window, then samples `line` and reports whether
/// `edge` happened since the sample stored in `previous`.
///
/// `previous` always ends up holding the fresh sample, match or not.
pub async fn event_detected<P: InputPin>(
    line: &mut P,
    edge: Edge,
    previous: &mut PinState,
) -> Result<bool, Error> {
    delay(DEBOUNCE).await;

    let new = PinState::from(line.is_high().map_err(gpio_error)?);
    let old = core::mem::replace(previous, new);

    Ok(edge.matches(old, new))
}

pub fn toggle<P: StatefulOutputPin>(line: &mut P) -> Result<(), Error> {
    line.toggle().map_err(gpio_error)
}

pub async fn blink<P: StatefulOutputPin>(line: &mut P, interval: Duration) -> Result<(), Error> {
    toggle(line)?;
    delay(interval).await;
    Ok(())
}

pub fn acquire_input(chip: &str, pin: u32) -> Result<cdev::InputPin, Error> {
    cdev::InputPin::new(chip, pin).map_err(|source| Error::Line {
        pin,
        source: source.into(),
    })
}

// Outputs start low, so the LEDs are dark until a button press.
pub fn acquire_output(chip: &str, pin: u32) -> Result<cdev::OutputPin, Error> {
    cdev::OutputPin::new(chip, pin, PinState::Low).map_err(|source| Error::Line {
        pin,
        source: source.into(),
    })
}
