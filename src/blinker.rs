pub mod semaphore;

use core::convert::Infallible;
use core::fmt;
use std::io::Write;
use std::sync::Arc;

use embassy_time::Duration;
use embedded_hal::digital::{InputPin, OutputPin, PinState};
use log::debug;

use crate::error::{Error, gpio_error};
use crate::io::{Edge, delay, event_detected};
use semaphore::{SemaphoreSet, Semaphores};

// How long a notification keeps the console to itself.
pub const NOTIFY_HOLD: Duration = Duration::from_millis(10);

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
    Disabled,
    Enabled,
}

impl Mode {
    fn toggled(self) -> Self {
        match self {
            Mode::Disabled => Mode::Enabled,
            Mode::Enabled => Mode::Disabled,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Disabled => "disabled",
            Mode::Enabled => "enabled",
        })
    }
}

/*
 * One button and the LED pair it controls. A rising edge on the button flips
 * the pair between dark and blinking, and announces the change on the
 * console. The console is shared with the other blinkers, so the announcement
 * happens under the print semaphore.
 */
pub struct Blinker<I, O, W> {
    button: I,
    leds: [O; 2],
    pins: [u32; 2],
    blink_interval: Duration,
    mode: Mode,
    last_value: PinState,
    semaphores: Arc<SemaphoreSet>,
    console: W,
}

impl<I: InputPin, O: OutputPin, W: Write> Blinker<I, O, W> {
    pub fn new(
        button: I,
        leds: [O; 2],
        pins: [u32; 2],
        blink_interval: Duration,
        semaphores: Arc<SemaphoreSet>,
        console: W,
    ) -> Self {
        Blinker {
            button,
            leds,
            pins,
            blink_interval,
            mode: Mode::Disabled,
            last_value: PinState::Low,
            semaphores,
            console,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /*
     * One pass of the control loop. Returns the mode we switched to, if the
     * button was pressed.
     *
     * While enabled, a pass is a full square wave: high for one interval, low
     * for one interval. While disabled the only wait is the debounce.
     */
    pub async fn step(&mut self) -> Result<Option<Mode>, Error> {
        let pressed = event_detected(&mut self.button, Edge::Rising, &mut self.last_value).await?;

        let switched = if pressed {
            self.mode = self.mode.toggled();
            debug!("{}: button pressed, now {}", self, self.mode);
            self.notify().await?;
            Some(self.mode)
        } else {
            None
        };

        match self.mode {
            Mode::Enabled => {
                self.light(PinState::High)?;
                delay(self.blink_interval).await;
                self.light(PinState::Low)?;
                delay(self.blink_interval).await;
            }
            Mode::Disabled => self.light(PinState::Low)?,
        }

        Ok(switched)
    }

    /// Runs the control loop until a line or the console fails.
    pub async fn run(&mut self) -> Result<Infallible, Error> {
        loop {
            self.step().await?;
        }
    }

    fn light(&mut self, state: PinState) -> Result<(), Error> {
        for led in &mut self.leds {
            led.set_state(state).map_err(gpio_error)?;
        }
        Ok(())
    }

    async fn notify(&mut self) -> Result<(), Error> {
        let _print = self.semaphores.guard(Semaphores::Print.id())?;

        writeln!(
            self.console,
            "LEDs connected to pin {} and {} now {}!\n",
            self.pins[0], self.pins[1], self.mode
        )?;
        self.console.flush()?;

        // Keep the console a little longer, so a burst of presses can't flood it.
        // Holding a spinning semaphore across an await is only sound because
        // every executor runs a single blinker: a second task on the same
        // executor reserving the print semaphore would spin forever.
        delay(NOTIFY_HOLD).await;
        Ok(())
    }
}

impl<I, O, W> fmt::Display for Blinker<I, O, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LEDs {}/{}", self.pins[0], self.pins[1])
    }
}
