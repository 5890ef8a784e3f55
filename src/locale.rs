//! Context about the place an OSM way exists: country, subdivision, driving
//! side, and the locale-dependent defaults (lane widths, marking colours)
//! the rest of the pipeline reads.

pub use celes::Country;
use serde::{Deserialize, Serialize};

use crate::metric::Metre;
use crate::road::{Color, Designated};

/// Context about the place where an OSM way exists. Immutable once built,
/// freely `Clone`, shareable across threads for read-only access per
/// country/subdivision tables.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Locale {
    /// The ISO 3166-1 country.
    pub country: Option<Country>,
    /// An ISO 3166-2 subdivision code (e.g. a US state), if more specific
    /// defaults are known for it.
    pub iso_3166_2_subdivision: Option<String>,
    pub driving_side: DrivingSide,
}

impl Locale {
    #[must_use]
    pub fn builder() -> LocaleBuilder {
        LocaleBuilder::default()
    }

    /// Default lane width for a given designation, honoring the few
    /// countries/highway classes with a documented non-default width.
    #[must_use]
    pub fn travel_width(&self, designated: Designated) -> Metre {
        match designated {
            Designated::Motor | Designated::Bus | Designated::Taxi | Designated::Psv => {
                Metre::new(3.5)
            }
            Designated::Foot => Metre::new(2.0),
            Designated::Bicycle => Metre::new(2.0),
            Designated::Any => Metre::new(3.5),
        }
    }

    /// Whether this locale's convention for `maxspeed` without an explicit
    /// unit suffix is miles-per-hour (only a handful of countries).
    #[must_use]
    pub fn uses_mph(&self) -> bool {
        matches!(
            self.country.as_ref().map(celes::Country::alpha2),
            Some("US") | Some("GB") | Some("LR") | Some("MM")
        )
    }

    /// Default centreline/lane-line marking colour for this locale: yellow
    /// for US-convention centre lines, white elsewhere.
    #[must_use]
    pub fn centre_line_color(&self) -> Color {
        match self.country.as_ref().map(celes::Country::alpha2) {
            Some("US") | Some("CA") | Some("MX") | Some("PH") => Color::Yellow,
            _ => Color::White,
        }
    }
}

/// Builder for [`Locale`], accepting loose ISO-3166 input and resolving it
/// at `build()` time.
#[derive(Default)]
pub struct LocaleBuilder {
    iso_3166_1_alpha_2: Option<String>,
    iso_3166_1_alpha_3: Option<String>,
    iso_3166_2_subdivision: Option<String>,
    driving_side: Option<DrivingSide>,
}

impl LocaleBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts an ISO-3166-1 alpha-2, alpha-3, or ISO-3166-2 (`XX-YY`) code.
    ///
    /// # Panics
    ///
    /// If the code is neither 2 nor 3 characters and has no `-` separator.
    #[must_use]
    pub fn iso_3166(mut self, code: &str) -> Self {
        if code.len() == 2 {
            self.iso_3166_1_alpha_2 = Some(code.to_owned());
        } else if code.len() == 3 && !code.contains('-') {
            self.iso_3166_1_alpha_3 = Some(code.to_owned());
        } else if let Some((alpha_2, subdivision)) = code.split_once('-') {
            self.iso_3166_1_alpha_2 = Some(alpha_2.to_owned());
            self.iso_3166_2_subdivision = Some(subdivision.to_owned());
        } else {
            panic!("cannot determine ISO 3166 from {code}");
        }
        self
    }

    #[must_use]
    pub fn iso_3166_option(mut self, code: Option<&str>) -> Self {
        if let Some(code) = code {
            self = self.iso_3166(code);
        }
        self
    }

    #[must_use]
    pub fn driving_side(mut self, side: DrivingSide) -> Self {
        self.driving_side = Some(side);
        self
    }

    #[must_use]
    pub fn build(&self) -> Locale {
        let country = match (&self.iso_3166_1_alpha_2, &self.iso_3166_1_alpha_3) {
            (Some(c), _) => Country::from_alpha2(c).ok(),
            (None, Some(c)) => Country::from_alpha3(c).ok(),
            (None, None) => None,
        };
        let driving_side = self.driving_side.unwrap_or_else(|| {
            // A handful of left-driving countries get a default without
            // requiring the caller to pass driving_side explicitly.
            match country.as_ref().map(celes::Country::alpha2) {
                Some("GB") | Some("IE") | Some("AU") | Some("NZ") | Some("JP") | Some("IN")
                | Some("ZA") => DrivingSide::Left,
                _ => DrivingSide::Right,
            }
        });
        Locale {
            country,
            iso_3166_2_subdivision: self.iso_3166_2_subdivision.clone(),
            driving_side,
        }
    }
}

/// Do vehicles travel on the right or left side of a road?
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrivingSide {
    #[serde(rename = "right")]
    Right,
    #[serde(rename = "left")]
    Left,
}

impl DrivingSide {
    #[must_use]
    pub fn opposite(&self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
        }
    }

    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Left => "left",
        }
    }
}

impl std::str::FromStr for DrivingSide {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "right" => Ok(Self::Right),
            "left" => Ok(Self::Left),
            _ => Err(s.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_country_and_side() {
        let locale = Locale::builder()
            .driving_side(DrivingSide::Right)
            .iso_3166("DE-NW")
            .build();
        assert_eq!(locale.driving_side, DrivingSide::Right);
        assert_eq!(locale.country.unwrap(), Country::germany());
    }

    #[test]
    fn infers_left_driving_default() {
        let locale = Locale::builder().iso_3166("GB").build();
        assert_eq!(locale.driving_side, DrivingSide::Left);
    }

    #[test]
    fn us_centre_line_is_yellow() {
        let locale = Locale::builder().iso_3166("US").build();
        assert_eq!(locale.centre_line_color(), Color::Yellow);
    }
}
