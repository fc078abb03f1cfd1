/*
 * Button-controlled LED pairs on a Linux GPIO character device.
 *
 * The control logic (blinkers, edge detection, the print semaphore) lives
 * here, behind the `embedded-hal` digital traits. The binary only wires it to
 * real lines and threads.
 */

pub mod blinker;
pub mod config;
pub mod error;
pub mod io;
#[cfg(test)]
mod mock;
