//! Separator markings: the visual description attached to a [`super::Lane::Separator`].

use serde::{Deserialize, Serialize};

use crate::locale::Locale;
use crate::metric::Metre;

/// Paint/structure style of a single marking stripe.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    SolidLine,
    BrokenLine,
    DashedLine,
    DottedLine,
    DoubleSolid,
    GoreChevron,
    DiagonalHatched,
    CrissCross,
    /// A gap between two other markings in the same [`Markings`] sequence,
    /// e.g. the unpainted space between the two lines of a double solid.
    NoFill,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    White,
    Yellow,
    Red,
    Green,
    Blue,
}

/// One stripe within a separator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marking {
    pub style: Style,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Metre>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl Marking {
    #[must_use]
    pub fn new(style: Style) -> Self {
        Self {
            style,
            width: None,
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: Metre) -> Self {
        self.width = Some(width);
        self
    }
}

/// Default width for a single painted line.
pub const DEFAULT_MARKING_WIDTH: Metre = Metre::new(0.2);

/// The ordered sequence of markings that makes up a [`super::Lane::Separator`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Markings(pub Vec<Marking>);

impl Markings {
    #[must_use]
    pub fn single(style: Style) -> Self {
        Self(vec![Marking::new(style)])
    }

    /// A double line (e.g. a solid+solid centreline) with the unpainted gap
    /// between them represented explicitly.
    #[must_use]
    pub fn double(style: Style, color: Color) -> Self {
        Self(vec![
            Marking::new(style).with_color(color).with_width(DEFAULT_MARKING_WIDTH),
            Marking::new(Style::NoFill).with_width(Metre::new(0.1)),
            Marking::new(style).with_color(color).with_width(DEFAULT_MARKING_WIDTH),
        ])
    }

    /// Mirror the marking order (used when mirroring an entire [`super::Road`]
    /// between driving sides).
    pub fn flip(&mut self) {
        self.0.reverse();
    }

    /// Sum of each stripe's width, falling back to the default line width for
    /// any stripe that didn't specify one.
    #[must_use]
    pub fn width(&self, _locale: &Locale) -> Metre {
        self.0
            .iter()
            .map(|m| m.width.unwrap_or(DEFAULT_MARKING_WIDTH))
            .fold(Metre::new(0.0), |a, b| a + b)
    }
}
