//! This build script turns `config/clock_radio.json` into Rust constants.
//!
//! The generated `clock_radio_config.rs` lands in `OUT_DIR` and is pulled into
//! the crate by `src/config.rs`. Any key missing from the JSON file (or the
//! whole file) falls back to the appliance defaults below, so a fresh checkout
//! builds without extra setup.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::print_stdout)]

use std::{
    env, fs,
    fs::File,
    io,
    io::Write,
    path::Path,
};

use serde_json::Value;

fn main() {
    clock_radio_config().unwrap();
}

/// Read an unsigned integer at `section.key`, falling back to `default`
fn read_u64(config: &Value, section: &str, key: &str, default: u64) -> u64 {
    config[section][key].as_u64().unwrap_or(default)
}

/// Read a bool at `section.key`, falling back to `default`
fn read_bool(config: &Value, section: &str, key: &str, default: bool) -> bool {
    config[section][key].as_bool().unwrap_or(default)
}

/// Read an unsigned integer and make sure it stays below `limit`
fn read_bounded(config: &Value, section: &str, key: &str, default: u64, limit: u64) -> u64 {
    let value = read_u64(config, section, key, default);
    assert!(
        value < limit,
        "{section}.{key} in clock_radio.json must be below {limit}, got {value}"
    );
    value
}

/// Generate `clock_radio_config.rs` from `clock_radio.json`
fn clock_radio_config() -> io::Result<()> {
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR environment variable not set");
    let dest_path = Path::new(&out_dir).join("clock_radio_config.rs");
    let mut f = File::create(dest_path).expect("Could not create clock_radio_config.rs file");

    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR environment variable not set");
    let config_path = Path::new(&manifest_dir).join("config/clock_radio.json");
    println!("cargo:rerun-if-changed={}", config_path.display());

    let config: Value = if config_path.exists() {
        let contents =
            fs::read_to_string(&config_path).expect("Could not read clock_radio.json file");
        serde_json::from_str(&contents).expect("Could not parse clock_radio.json file")
    } else {
        println!("clock_radio.json not found, using built-in defaults");
        Value::Null
    };

    let clock_hour = read_bounded(&config, "clock", "hour", 12, 24);
    let clock_minute = read_bounded(&config, "clock", "minute", 0, 60);
    let clock_second = read_bounded(&config, "clock", "second", 0, 60);
    let use_12_hour = read_bool(&config, "clock", "use_12_hour", true);

    let alarm_hour = read_bounded(&config, "alarm", "hour", 6, 24);
    let alarm_minute = read_bounded(&config, "alarm", "minute", 30, 60);
    let alarm_second = read_bounded(&config, "alarm", "second", 0, 60);

    let station_mhz = config["radio"]["station_mhz"].as_f64().unwrap_or(99.9);
    assert!(
        (88.0..=108.0).contains(&station_mhz),
        "radio.station_mhz in clock_radio.json must lie within 88.0..=108.0, got {station_mhz}"
    );
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let station_tenths = (station_mhz * 10.0).round() as u16;

    let brightness_armed = read_bounded(&config, "display", "brightness_armed", 60, 101);
    let brightness_disarmed = read_bounded(&config, "display", "brightness_disarmed", 10, 101);

    let tick_ms = read_u64(&config, "timing", "tick_ms", 500);
    let button_cooldown_ms = read_u64(&config, "timing", "button_cooldown_ms", 250);
    let button_repeat_ms = read_u64(&config, "timing", "button_repeat_ms", 500);

    writeln!(f, "/// Clock time on power-up as (hour, minute, second)")?;
    writeln!(
        f,
        "pub const DEFAULT_CLOCK: (i32, i32, i32) = ({clock_hour}, {clock_minute}, {clock_second});"
    )?;
    writeln!(f, "/// Whether the display shows 12-hour time")?;
    writeln!(f, "pub const USE_12_HOUR: bool = {use_12_hour};")?;
    writeln!(f, "/// Alarm target on power-up as (hour, minute, second)")?;
    writeln!(
        f,
        "pub const DEFAULT_ALARM: (i32, i32, i32) = ({alarm_hour}, {alarm_minute}, {alarm_second});"
    )?;
    writeln!(f, "/// Station on power-up in tenths of a MHz")?;
    writeln!(f, "pub const DEFAULT_STATION_TENTHS: u16 = {station_tenths};")?;
    writeln!(f, "/// Display brightness in percent while the alarm is armed")?;
    writeln!(f, "pub const BRIGHTNESS_ARMED: u8 = {brightness_armed};")?;
    writeln!(f, "/// Display brightness in percent while the alarm is disarmed")?;
    writeln!(f, "pub const BRIGHTNESS_DISARMED: u8 = {brightness_disarmed};")?;
    writeln!(f, "/// Polling cycle period in milliseconds")?;
    writeln!(f, "pub const TICK_MILLIS: u64 = {tick_ms};")?;
    writeln!(f, "/// Minimum time between two accepted button presses in milliseconds")?;
    writeln!(f, "pub const BUTTON_COOLDOWN_MILLIS: u64 = {button_cooldown_ms};")?;
    writeln!(f, "/// Hold-to-repeat interval for adjustment buttons in milliseconds")?;
    writeln!(f, "pub const BUTTON_REPEAT_MILLIS: u64 = {button_repeat_ms};")?;
    Ok(())
}
