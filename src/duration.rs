//! Human-readable durations for config values ("10s", "500ms", "2m").

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{de, Deserialize, Deserializer, Serializer};

// Longest suffix first so "ms" wins over "s".
const UNITS: &[(&str, u64)] = &[
    ("ms", 1),
    ("d", 24 * 60 * 60 * 1000),
    ("h", 60 * 60 * 1000),
    ("m", 60 * 1000),
    ("s", 1000),
];

/// Parse a duration such as `"10s"`, `"500ms"`, `"2m"`, `"1h"` or `"1d"`.
///
/// Case-insensitive; surrounding whitespace is ignored.
///
/// ```
/// use spotbook::duration::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("10s").unwrap(), Duration::from_secs(10));
/// assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
/// ```
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim().to_lowercase();
    let (num, millis_per_unit) = UNITS
        .iter()
        .find_map(|(suffix, factor)| s.strip_suffix(suffix).map(|num| (num, *factor)))
        .context("Duration must end with ms, s, m, h, or d")?;

    let num: u64 = num
        .parse()
        .with_context(|| format!("Invalid number in duration: {s}"))?;
    let millis = num
        .checked_mul(millis_per_unit)
        .context("Duration is too large")?;

    Ok(Duration::from_millis(millis))
}

/// Inverse of [`parse_duration`] using the largest unit that divides evenly.
pub fn format_duration(d: Duration) -> String {
    let millis = d.as_millis();
    for (suffix, factor) in UNITS.iter().filter(|(suffix, _)| *suffix != "ms") {
        let factor = u128::from(*factor);
        if millis >= factor && millis % factor == 0 {
            return format!("{}{suffix}", millis / factor);
        }
    }
    format!("{millis}ms")
}

/// Use with `#[serde(deserialize_with = "deserialize_duration")]`.
pub fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(de::Error::custom)
}

/// Use with `#[serde(serialize_with = "serialize_duration")]`.
pub fn serialize_duration<S>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_duration(*d))
}
