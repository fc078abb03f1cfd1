/*
 * The hardware topology of the board: which chip, which pins and how fast each
 * LED pair blinks. It is built once at startup and handed to each blinker, so
 * that pin numbers never show up in control-flow code.
 */

use embassy_time::Duration;

pub const PAIR_COUNT: usize = 2;

#[derive(Debug, Clone, Copy)]
pub struct PairConfig {
    pub leds: [u32; 2],
    pub button: u32,
    pub blink_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct Topology {
    pub chip: &'static str,
    pub pairs: [PairConfig; PAIR_COUNT],
}

impl Default for Topology {
    fn default() -> Self {
        Topology {
            chip: "/dev/gpiochip0",
            pairs: [
                PairConfig {
                    leds: [17, 22],
                    button: 27,
                    blink_interval: Duration::from_millis(100),
                },
                PairConfig {
                    leds: [23, 24],
                    button: 25,
                    blink_interval: Duration::from_millis(500),
                },
            ],
        }
    }
}
