//! picod - host-alive pulse train and FSSD shutdown for the PIco UPS

use clap::Parser;
use picoups_daemon::cli::PicodArgs;
use picoups_daemon::config::PicodConfig;
use picoups_daemon::{exit, logging, picod, PICOD_VERSION};

fn main() {
    let args = PicodArgs::try_parse().unwrap_or_else(|err| exit::usage(err));

    if args.version {
        println!("picod/{PICOD_VERSION}");
        return;
    }

    logging::init();

    let config = PicodConfig::from(&args);
    if let Err(err) = picod::run(&config) {
        exit::fatal("picod", &err, err.exit_code());
    }
}
