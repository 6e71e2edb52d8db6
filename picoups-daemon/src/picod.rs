//! `picod` setup and main loop

use std::convert::Infallible;

use embedded_hal::delay::DelayNs;
use picoups_core::watch::PulseWatch;
use picoups_hal::Direction;
use picoups_hal_linux::{daemonize, HaltCommand, StdDelay, SysfsGpio};
use tracing::info;

use crate::config::PicodConfig;
use crate::exit::PicodError;

/// Export the pulse line and, unless the FSSD feature is off, the watch line
pub fn setup_lines<D: DelayNs>(
    config: &PicodConfig,
    delay: &mut D,
) -> Result<SysfsGpio, PicodError> {
    let gpio = SysfsGpio::new(&config.gpio_root);

    gpio.setup(config.pins.pulse, Direction::Output, delay)
        .map_err(PicodError::PulseLine)?;

    if let Some(watch) = config.pins.watch {
        gpio.setup(watch, Direction::Input, delay)
            .map_err(PicodError::WatchLine)?;
    }

    Ok(gpio)
}

/// Set up the lines, detach if asked and pulse forever
pub fn run(config: &PicodConfig) -> Result<Infallible, PicodError> {
    let mut delay = StdDelay;
    let gpio = setup_lines(config, &mut delay)?;

    if config.daemonize {
        daemonize().map_err(PicodError::Daemonize)?;
    }

    info!(
        pulse = %config.pins.pulse,
        watch = ?config.pins.watch.map(|pin| pin.0),
        "pulse train starting"
    );

    let mut watch = PulseWatch::new(
        gpio,
        delay,
        HaltCommand::default(),
        config.pins,
        config.timing,
    );
    watch.run()
}
