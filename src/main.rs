/*
 * Two buttons, each controlling a pair of LEDs on a Raspberry Pi.
 *
 * Pressing a button toggles its LED pair between dark and blinking, and prints
 * which pair changed. Each pair is driven by its own thread, running its own
 * executor, so one pair's delays never hold up the other.
 */

use std::io::Stdout;
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use embassy_executor::Executor;
use gpiocdev_embedded_hal::{InputPin, OutputPin};
use log::{error, info};

use twin_blinker::blinker::Blinker;
use twin_blinker::blinker::semaphore::SemaphoreSet;
use twin_blinker::config::{PairConfig, Topology};
use twin_blinker::io;

type LineBlinker = Blinker<InputPin, OutputPin, Stdout>;

#[embassy_executor::task(pool_size = 2)]
async fn blinker_task(mut blinker: LineBlinker) {
    let Err(e) = blinker.run().await;
    error!("{blinker}: stopped: {e}");
}

fn acquire(
    chip: &str,
    pair: &PairConfig,
    semaphores: &Arc<SemaphoreSet>,
) -> Result<LineBlinker, twin_blinker::error::Error> {
    let leds = [
        io::acquire_output(chip, pair.leds[0])?,
        io::acquire_output(chip, pair.leds[1])?,
    ];
    let button = io::acquire_input(chip, pair.button)?;

    Ok(Blinker::new(
        button,
        leds,
        pair.leds,
        pair.blink_interval,
        Arc::clone(semaphores),
        std::io::stdout(),
    ))
}

// Never returns: the executor keeps the thread even after its task ends.
fn run_executor(blinker: LineBlinker) {
    let executor: &'static mut Executor = Box::leak(Box::new(Executor::new()));
    executor.run(move |spawner| {
        if let Err(e) = spawner.spawn(blinker_task(blinker)) {
            error!("could not spawn blinker task: {e:?}");
        }
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let topology = Topology::default();
    let semaphores = Arc::new(SemaphoreSet::new());

    let mut handles = Vec::with_capacity(topology.pairs.len());
    for pair in &topology.pairs {
        let blinker = acquire(topology.chip, pair, &semaphores).with_context(|| {
            format!(
                "setting up LEDs {}/{} with button {} on {}",
                pair.leds[0], pair.leds[1], pair.button, topology.chip
            )
        })?;
        info!(
            "{blinker}: button on pin {}, blinking every {} ms",
            pair.button,
            pair.blink_interval.as_millis()
        );

        let handle = thread::Builder::new()
            .name(format!("blinker-{}-{}", pair.leds[0], pair.leds[1]))
            .spawn(move || run_executor(blinker))
            .context("spawning blinker thread")?;
        handles.push(handle);
    }

    for handle in handles {
        if handle.join().is_err() {
            error!("blinker thread panicked");
        }
    }

    Ok(())
}
