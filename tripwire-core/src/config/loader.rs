//! Minimal TOML reader for countdown configuration
//!
//! Handles only the subset a countdown config needs. It does NOT support
//! the full TOML grammar.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - Integers in decimal or `0x` hexadecimal
//! - `[countdown]` and `[pins]` section headers (keys before any header
//!   belong to `[countdown]`)
//! - Comments (# ...)
//!
//! NOT supported:
//! - Escapes inside strings
//! - Arrays, inline tables, dotted keys

use super::types::{ArmSequence, ConfigError, CountdownConfig, ValidatedConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is neither a header nor `key = value`
    InvalidLine,
    /// Key not known in its section
    UnknownKey,
    /// Value has the wrong type or is out of its type's range
    InvalidValue,
    /// String value exceeds its capacity
    ValueTooLong,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Countdown,
    Pins,
}

/// A single parsed value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Value<'a> {
    Str(&'a str),
    Int(u32),
    Bool(bool),
}

/// Parse configuration text into a [`CountdownConfig`]
///
/// Missing keys keep their defaults. The result is not validated.
pub fn parse_config(input: &str) -> Result<CountdownConfig, ParseError> {
    let mut config = CountdownConfig::default();
    let mut section = Section::Countdown;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        match section {
            Section::Countdown => apply_countdown(&mut config, key, value)?,
            Section::Pins => apply_pin(&mut config, key, value)?,
        }
    }

    Ok(config)
}

/// Parse and validate in one step
pub fn load_config(input: &str) -> Result<ValidatedConfig, ConfigError> {
    let config = parse_config(input)?;
    config.validate()
}

fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let name = line
        .split('#')
        .next()
        .map(str::trim)
        .and_then(|h| h.strip_prefix('['))
        .and_then(|h| h.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?;

    match name.trim() {
        "countdown" => Ok(Section::Countdown),
        "pins" => Ok(Section::Pins),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Split `key = value`, stripping trailing comments outside of strings
fn parse_key_value(line: &str) -> Option<(&str, Value<'_>)> {
    let (key, rest) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    let rest = rest.trim_start();
    let value = if let Some(quoted) = rest.strip_prefix('"') {
        let end = quoted.find('"')?;
        let trailing = quoted[end + 1..].trim();
        if !trailing.is_empty() && !trailing.starts_with('#') {
            return None;
        }
        Value::Str(&quoted[..end])
    } else {
        let raw = rest.split('#').next().unwrap_or("").trim();
        parse_scalar(raw)?
    };

    Some((key, value))
}

fn parse_scalar(raw: &str) -> Option<Value<'_>> {
    match raw {
        "true" => return Some(Value::Bool(true)),
        "false" => return Some(Value::Bool(false)),
        _ => {}
    }

    let digits = strip_separators(raw)?;
    if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        return u32::from_str_radix(hex, 16).ok().map(Value::Int);
    }
    digits.parse().ok().map(Value::Int)
}

/// Drop `_` digit separators (`1_000`)
///
/// Returns `None` when the literal is too long to be a `u32`.
fn strip_separators(raw: &str) -> Option<heapless::String<16>> {
    let mut out = heapless::String::new();
    for c in raw.chars().filter(|c| *c != '_') {
        out.push(c).ok()?;
    }
    Some(out)
}

fn as_u8(value: Value<'_>) -> Result<u8, ParseError> {
    match value {
        Value::Int(v) => u8::try_from(v).map_err(|_| ParseError::InvalidValue),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_countdown(
    config: &mut CountdownConfig,
    key: &str,
    value: Value<'_>,
) -> Result<(), ParseError> {
    match (key, value) {
        ("duration_s" | "time", Value::Int(v)) => config.duration_s = v,
        ("url", Value::Str(s)) => {
            config.url.clear();
            config
                .url
                .push_str(s)
                .map_err(|_| ParseError::ValueTooLong)?;
        }
        ("brightness", v) => config.brightness = as_u8(v)?,
        ("blink_rate" | "rate", v) => config.blink_rate = as_u8(v)?,
        ("verbose", Value::Bool(b)) => config.verbose = b,
        ("arm", Value::Str(s)) => config.arm = parse_arm(s)?,
        ("display_address", v) => config.display_address = as_u8(v)?,
        ("duration_s" | "time" | "url" | "verbose" | "arm", _) => {
            return Err(ParseError::InvalidValue)
        }
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn apply_pin(config: &mut CountdownConfig, key: &str, value: Value<'_>) -> Result<(), ParseError> {
    let pin = match key {
        "button" => &mut config.pins.button,
        "sense" => &mut config.pins.sense,
        "ready_led" => &mut config.pins.ready_led,
        "armed_led" => &mut config.pins.armed_led,
        _ => return Err(ParseError::UnknownKey),
    };
    *pin = as_u8(value)?;
    Ok(())
}

fn parse_arm(s: &str) -> Result<ArmSequence, ParseError> {
    match s {
        "sense" => Ok(ArmSequence::SenseOnly),
        "button" => Ok(ArmSequence::ButtonOnly),
        "sense+button" | "sense_then_button" => Ok(ArmSequence::SenseThenButton),
        _ => Err(ParseError::InvalidValue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Escape room prop, short fuse
[countdown]
duration_s = 65
url = "http://192.168.1.20:8080/boom"   # fire the fog machine
brightness = 8
blink_rate = 0
verbose = false
arm = "sense"
display_address = 0x71

[pins]
button = 17
sense = 22
"#;

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.duration_s, 65);
        assert_eq!(config.url.as_str(), "http://192.168.1.20:8080/boom");
        assert_eq!(config.brightness, 8);
        assert!(!config.verbose);
        assert_eq!(config.arm, ArmSequence::SenseOnly);
        assert_eq!(config.display_address, 0x71);
        assert_eq!(config.pins.button, 17);
        assert_eq!(config.pins.sense, 22);
        // Untouched keys keep defaults
        assert_eq!(config.pins.ready_led, 10);
        assert_eq!(config.pins.armed_led, 7);
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), CountdownConfig::default());
    }

    #[test]
    fn test_root_keys_belong_to_countdown() {
        let config = parse_config("time = 1_200\nrate = 2").unwrap();
        assert_eq!(config.duration_s, 1200);
        assert_eq!(config.blink_rate, 2);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_config("[display]"), Err(ParseError::InvalidSection));
        assert_eq!(parse_config("nonsense"), Err(ParseError::InvalidLine));
        assert_eq!(parse_config("volume = 3"), Err(ParseError::UnknownKey));
        assert_eq!(parse_config("verbose = 1"), Err(ParseError::InvalidValue));
        assert_eq!(parse_config("brightness = 300"), Err(ParseError::InvalidValue));
        assert_eq!(parse_config("arm = \"wire\""), Err(ParseError::InvalidValue));
        assert_eq!(
            parse_config("[pins]\nsense = \"27\""),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(parse_config("url = \"http://x"), Err(ParseError::InvalidLine));
    }

    #[test]
    fn test_load_validates() {
        assert_eq!(
            load_config("duration_s = 4000"),
            Err(ConfigError::InvalidDuration(4000))
        );
        assert!(load_config("duration_s = 3600").is_ok());
        assert_eq!(
            load_config("volume = 3"),
            Err(ConfigError::Parse(ParseError::UnknownKey))
        );
    }
}
