use chrono::Duration;
use regex::Regex;
use std::sync::OnceLock;

/// Parses durations as stored in the configuration table (`24h`, `30m`, `7d`).
///
/// A bare number is read as seconds.
#[must_use]
pub fn parse_duration(value: &str) -> Option<Duration> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(?i)^(\d+)\s*([smhd])?$").expect("Invalid regex"));

    let caps = re.captures(value.trim())?;
    let amount: i64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps
        .get(2)
        .map_or_else(|| "s".to_string(), |m| m.as_str().to_lowercase());

    match unit.as_str() {
        "s" => Duration::try_seconds(amount),
        "m" => Duration::try_minutes(amount),
        "h" => Duration::try_hours(amount),
        "d" => Duration::try_days(amount),
        _ => None,
    }
}
