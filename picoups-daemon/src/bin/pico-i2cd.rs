//! pico-i2cd - PIco UPS telemetry and button reporting over I2C

use clap::Parser;
use picoups_daemon::cli::I2cdArgs;
use picoups_daemon::config::I2cdConfig;
use picoups_daemon::{exit, i2cd, logging, I2CD_VERSION};

fn main() {
    let args = I2cdArgs::try_parse().unwrap_or_else(|err| exit::usage(err));

    if args.version {
        println!("pico-i2cd/{I2CD_VERSION}");
        return;
    }

    logging::init();

    let config = I2cdConfig::from(&args);
    if let Err(err) = i2cd::run(&config) {
        exit::fatal("pico-i2cd", &err, err.exit_code());
    }
}
