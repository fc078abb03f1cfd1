use embedded_hal::digital::ErrorKind;
use thiserror::Error;

use crate::blinker::semaphore::SEMAPHORE_COUNT;

#[derive(Debug, Error)]
pub enum Error {
    #[error("semaphore id {0} is outside 0..{count}", count = SEMAPHORE_COUNT)]
    InvalidSemaphore(u8),

    #[error("could not request GPIO line {pin}")]
    Line {
        pin: u32,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // The HAL error types differ per pin type, only their kind survives.
    #[error("GPIO line access failed: {0:?}")]
    Gpio(ErrorKind),

    #[error("could not write notification")]
    Console(#[from] std::io::Error),
}

pub fn gpio_error<E: embedded_hal::digital::Error>(error: E) -> Error {
    Error::Gpio(error.kind())
}
