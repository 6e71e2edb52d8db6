//! Telemetry snapshot and text output
//!
//! A snapshot is read in one go and never updated afterwards. Output is one
//! `<metric_name> <value>` pair per line, compatible with line-oriented
//! metrics scrapers. Failed reads are still printed, as their negative
//! failure code.

use core::fmt;

use picoups_hal::{ChannelError, Register, RegisterChannel};

use super::fixed::decode_fixed;
use super::registers;

/// Outcome of reading one register
pub type Reading<T> = Result<T, ChannelError>;

/// Reported metrics, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    FirmwareVersion,
    PowerMode,
    BatteryVolts,
    HostVolts,
    Temperature1,
    Temperature2,
}

impl Metric {
    /// All metrics in output order
    pub const ALL: [Metric; 6] = [
        Metric::FirmwareVersion,
        Metric::PowerMode,
        Metric::BatteryVolts,
        Metric::HostVolts,
        Metric::Temperature1,
        Metric::Temperature2,
    ];

    /// Metric name as printed
    pub fn name(self) -> &'static str {
        match self {
            Metric::FirmwareVersion => "pico_firmware_version",
            Metric::PowerMode => "pico_mode",
            Metric::BatteryVolts => "pico_battery_volts",
            Metric::HostVolts => "pico_host_volts",
            Metric::Temperature1 => "pico_temperature_1_celsius_degrees",
            Metric::Temperature2 => "pico_temperature_2_celsius_degrees",
        }
    }

    /// Register backing this metric
    pub fn register(self) -> Register {
        match self {
            Metric::FirmwareVersion => registers::FIRMWARE_VERSION,
            Metric::PowerMode => registers::POWER_MODE,
            Metric::BatteryVolts => registers::BATTERY_VOLTAGE,
            Metric::HostVolts => registers::HOST_VOLTAGE,
            Metric::Temperature1 => registers::TEMPERATURE_1,
            Metric::Temperature2 => registers::TEMPERATURE_2,
        }
    }
}

/// Decoded UPS state at one point in time
#[derive(Debug)]
pub struct Snapshot {
    pub firmware_version: Reading<u8>,
    pub power_mode: Reading<u8>,
    pub battery_volts: Reading<f32>,
    pub host_volts: Reading<f32>,
    pub temperature_1: Reading<u8>,
    pub temperature_2: Reading<u8>,
}

impl Snapshot {
    /// Read every metric from the UPS
    pub fn read<C>(channel: &mut C) -> Self
    where
        C: RegisterChannel<Address = Register> + ?Sized,
    {
        Self {
            firmware_version: read_byte(channel, Metric::FirmwareVersion),
            power_mode: read_byte(channel, Metric::PowerMode),
            battery_volts: read_volts(channel, Metric::BatteryVolts),
            host_volts: read_volts(channel, Metric::HostVolts),
            temperature_1: read_byte(channel, Metric::Temperature1),
            temperature_2: read_byte(channel, Metric::Temperature2),
        }
    }

    /// Printed value of one metric
    pub fn value_text(&self, metric: Metric) -> String {
        match metric {
            Metric::FirmwareVersion => integer_text(&self.firmware_version),
            Metric::PowerMode => integer_text(&self.power_mode),
            Metric::BatteryVolts => volts_text(&self.battery_volts),
            Metric::HostVolts => volts_text(&self.host_volts),
            Metric::Temperature1 => integer_text(&self.temperature_1),
            Metric::Temperature2 => integer_text(&self.temperature_2),
        }
    }

    /// Check if every register read succeeded
    pub fn is_complete(&self) -> bool {
        self.firmware_version.is_ok()
            && self.power_mode.is_ok()
            && self.battery_volts.is_ok()
            && self.host_volts.is_ok()
            && self.temperature_1.is_ok()
            && self.temperature_2.is_ok()
    }
}

fn read_byte<C>(channel: &mut C, metric: Metric) -> Reading<u8>
where
    C: RegisterChannel<Address = Register> + ?Sized,
{
    channel.read(metric.register()).and_then(|value| {
        u8::try_from(value).map_err(|_| ChannelError::ValueOutOfRange(value))
    })
}

fn read_volts<C>(channel: &mut C, metric: Metric) -> Reading<f32>
where
    C: RegisterChannel<Address = Register> + ?Sized,
{
    channel.read(metric.register()).map(decode_fixed)
}

fn integer_text(reading: &Reading<u8>) -> String {
    match reading {
        Ok(value) => value.to_string(),
        Err(err) => err.code().to_string(),
    }
}

fn volts_text(reading: &Reading<f32>) -> String {
    let value = match reading {
        Ok(volts) => *volts,
        Err(err) => err.code() as f32,
    };
    format!("{value:.6}")
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for metric in Metric::ALL {
            writeln!(f, "{} {}", metric.name(), self.value_text(metric))?;
        }
        Ok(())
    }
}
