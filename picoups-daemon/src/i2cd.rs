//! `pico-i2cd` setup and main loop

use std::io::{self, Write};

use embedded_hal::delay::DelayNs;
use picoups_core::buttons::{input_device, key_codes, KeyReporter};
use picoups_core::telemetry::Snapshot;
use picoups_hal::{I2cChannel, Register, RegisterChannel};
use picoups_hal_linux::{daemonize, I2cDev, StdDelay, UinputDevice};
use tracing::{info, warn};

use crate::config::I2cdConfig;
use crate::exit::I2cdError;
use crate::I2CD_VERSION;

/// Read a fresh snapshot and write it to `out`
///
/// Failed reads show up as their negative codes in the output.
pub fn print_status<C, W>(channel: &mut C, out: &mut W) -> io::Result<()>
where
    C: RegisterChannel<Address = Register> + ?Sized,
    W: Write + ?Sized,
{
    let snapshot = Snapshot::read(channel);
    if !snapshot.is_complete() {
        warn!("some telemetry registers could not be read");
    }
    write!(out, "{snapshot}")?;
    out.flush()
}

/// Open the adaptor, print the status if asked and report buttons forever
///
/// Returns only without the input loop, or on a setup failure.
pub fn run(config: &I2cdConfig) -> Result<(), I2cdError> {
    let bus = I2cDev::open(&config.adaptor).map_err(I2cdError::Adaptor)?;
    let mut channel = I2cChannel::new(bus);

    if config.status {
        if let Err(err) = print_status(&mut channel, &mut io::stdout().lock()) {
            warn!(error = %err, "could not write status");
        }
    }

    if !config.input_loop {
        return Ok(());
    }

    let mut device = UinputDevice::open(&config.uinput).map_err(I2cdError::Uinput)?;

    if config.daemonize {
        daemonize().map_err(I2cdError::Daemonize)?;
    }

    device
        .register(&input_device(I2CD_VERSION), &key_codes())
        .map_err(I2cdError::Register)?;

    info!(interval_us = config.poll.interval_us, "button loop starting");

    let mut reporter = KeyReporter::new(channel, device);
    let mut delay = StdDelay;
    loop {
        reporter.poll();
        delay.delay_us(config.poll.interval_us);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picoups_hal::ChannelError;
    use std::path::PathBuf;

    /// UPS answering every register with its offset
    struct EchoUps;

    impl RegisterChannel for EchoUps {
        type Address = Register;

        fn read(&mut self, register: Register) -> Result<u16, ChannelError> {
            Ok(u16::from(register.offset))
        }

        fn write(&mut self, _register: Register, _value: u16) -> Result<(), ChannelError> {
            Ok(())
        }
    }

    #[test]
    fn test_status_output() {
        let mut out = Vec::new();

        print_status(&mut EchoUps, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "pico_firmware_version 0\n\
             pico_mode 0\n\
             pico_battery_volts 0.010000\n\
             pico_host_volts 0.030000\n\
             pico_temperature_1_celsius_degrees 12\n\
             pico_temperature_2_celsius_degrees 13\n"
        );
    }

    #[test]
    fn test_missing_adaptor_exit_code() {
        let config = I2cdConfig {
            adaptor: PathBuf::from("/nonexistent/i2c-1"),
            ..I2cdConfig::default()
        };

        let err = run(&config).unwrap_err();

        assert!(matches!(err, I2cdError::Adaptor(_)));
        assert_eq!(err.exit_code(), -1);
    }

    #[test]
    fn test_missing_uinput_exit_code() {
        let adaptor = tempfile::NamedTempFile::new().unwrap();
        let config = I2cdConfig {
            adaptor: adaptor.path().to_path_buf(),
            uinput: PathBuf::from("/nonexistent/uinput"),
            ..I2cdConfig::default()
        };

        let err = run(&config).unwrap_err();

        assert!(matches!(err, I2cdError::Uinput(_)));
        assert_eq!(err.exit_code(), -2);
    }

    #[test]
    fn test_registration_failure_exit_code() {
        let adaptor = tempfile::NamedTempFile::new().unwrap();
        let uinput = tempfile::NamedTempFile::new().unwrap();
        let config = I2cdConfig {
            adaptor: adaptor.path().to_path_buf(),
            uinput: uinput.path().to_path_buf(),
            ..I2cdConfig::default()
        };

        let err = run(&config).unwrap_err();

        assert!(matches!(err, I2cdError::Register(_)));
        assert_eq!(err.exit_code(), -5);
    }

    #[test]
    fn test_status_on_unreachable_ups() {
        // A plain file rejects the address select ioctl
        let adaptor = tempfile::NamedTempFile::new().unwrap();
        let mut channel = I2cChannel::new(I2cDev::open(adaptor.path()).unwrap());
        let mut out = Vec::new();

        print_status(&mut channel, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "pico_firmware_version -1\n\
             pico_mode -1\n\
             pico_battery_volts -1.000000\n\
             pico_host_volts -1.000000\n\
             pico_temperature_1_celsius_degrees -1\n\
             pico_temperature_2_celsius_degrees -1\n"
        );
    }

    #[test]
    fn test_without_input_loop_returns() {
        let adaptor = tempfile::NamedTempFile::new().unwrap();
        let config = I2cdConfig {
            adaptor: adaptor.path().to_path_buf(),
            status: false,
            input_loop: false,
            ..I2cdConfig::default()
        };

        run(&config).unwrap();
    }
}
