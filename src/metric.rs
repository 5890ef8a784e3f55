//! Units used throughout the crate: lane widths in metres, speeds with their
//! source unit preserved.

use serde::{Deserialize, Serialize};

/// A distance in metres. A thin newtype so callers can't confuse metres with
/// feet or some other unit at the type level.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metre(f64);

impl Metre {
    #[must_use]
    pub const fn new(val: f64) -> Self {
        Self(val)
    }

    #[must_use]
    pub fn val(self) -> f64 {
        self.0
    }
}

impl std::ops::Add for Metre {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl std::ops::Mul<f64> for Metre {
    type Output = Self;
    fn mul(self, scale: f64) -> Self {
        Self(self.0 * scale)
    }
}

const FEET_PER_METRE: f64 = 3.280_839_9;

/// Parse a width value in the unit OSM's `width=*` key uses: a bare number is
/// metres, a number followed by a feet-and-inches suffix (`6'6"`) is
/// imperial.
pub fn parse_width(raw: &str) -> Option<Metre> {
    let raw = raw.trim();
    if let Some((feet, rest)) = raw.split_once('\'') {
        let feet: f64 = feet.trim().parse().ok()?;
        let inches: f64 = rest.trim_end_matches('"').trim().parse().unwrap_or(0.0);
        let total_feet = feet + inches / 12.0;
        return Some(Metre::new(total_feet / FEET_PER_METRE));
    }
    raw.parse::<f64>().ok().map(Metre::new)
}

/// Unit a [`Speed`] was expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    Kmh,
    Mph,
}

/// A speed, keeping the unit it was originally tagged in so the JSON output
/// serializes as `{"unit":"mph","value":25.0}`
/// instead of silently normalizing to km/h.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Speed {
    pub unit: SpeedUnit,
    pub value: f64,
}

impl Speed {
    #[must_use]
    pub fn kmh(value: f64) -> Self {
        Self {
            unit: SpeedUnit::Kmh,
            value,
        }
    }

    #[must_use]
    pub fn mph(value: f64) -> Self {
        Self {
            unit: SpeedUnit::Mph,
            value,
        }
    }

    /// Parse OSM's `maxspeed=*` value: a bare number in km/h, or a number
    /// suffixed with `mph`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Some(number) = raw.strip_suffix("mph") {
            return number.trim().parse().ok().map(Speed::mph);
        }
        raw.parse().ok().map(Speed::kmh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_width() {
        assert_eq!(parse_width("3.5"), Some(Metre::new(3.5)));
    }

    #[test]
    fn parses_feet_inches_width() {
        let m = parse_width("6'6\"").unwrap();
        assert!((m.val() - 1.981_2).abs() < 0.001);
    }

    #[test]
    fn parses_speed_kmh() {
        assert_eq!(Speed::parse("50"), Some(Speed::kmh(50.0)));
    }

    #[test]
    fn parses_speed_mph() {
        assert_eq!(Speed::parse("25 mph"), Some(Speed::mph(25.0)));
    }
}
