//! The output data model: a `Road` is an ordered left-to-right cross section
//! of `Lane`s, built up by the `transform` pipeline from a way's tags.

mod lane;
mod marking;

pub use lane::{
    Access, AccessValue, Designated, Direction, Lane, ParkingOrientation, Printable, Semantic,
    TurnDirection,
};
pub use marking::{Color, Marking, Markings, Style, DEFAULT_MARKING_WIDTH};
use serde::{Deserialize, Serialize};

use crate::locale::Locale;
use crate::metric::Metre;
use crate::tag::Tags;

/// OSM's `highway=*` classification, as far as lane assembly cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighwayClass {
    Motorway,
    MotorwayLink,
    Trunk,
    TrunkLink,
    Primary,
    PrimaryLink,
    Secondary,
    SecondaryLink,
    Tertiary,
    TertiaryLink,
    Unclassified,
    Residential,
    LivingStreet,
    Service,
    Footway,
    Cycleway,
    Path,
    Pedestrian,
    Construction,
}

impl HighwayClass {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "motorway" => Some(Self::Motorway),
            "motorway_link" => Some(Self::MotorwayLink),
            "trunk" => Some(Self::Trunk),
            "trunk_link" => Some(Self::TrunkLink),
            "primary" => Some(Self::Primary),
            "primary_link" => Some(Self::PrimaryLink),
            "secondary" => Some(Self::Secondary),
            "secondary_link" => Some(Self::SecondaryLink),
            "tertiary" => Some(Self::Tertiary),
            "tertiary_link" => Some(Self::TertiaryLink),
            "unclassified" => Some(Self::Unclassified),
            "residential" => Some(Self::Residential),
            "living_street" => Some(Self::LivingStreet),
            "service" => Some(Self::Service),
            "footway" => Some(Self::Footway),
            "cycleway" => Some(Self::Cycleway),
            "path" => Some(Self::Path),
            "pedestrian" => Some(Self::Pedestrian),
            "construction" => Some(Self::Construction),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_motorized(self) -> bool {
        !matches!(
            self,
            Self::Footway | Self::Cycleway | Self::Path | Self::Pedestrian
        )
    }

    #[must_use]
    pub fn is_non_motorized(self) -> bool {
        matches!(
            self,
            Self::Footway | Self::Cycleway | Self::Path | Self::Pedestrian
        )
    }

    /// The `highway=*` value that parses back to this class.
    #[must_use]
    pub fn tag_value(self) -> &'static str {
        match self {
            Self::Motorway => "motorway",
            Self::MotorwayLink => "motorway_link",
            Self::Trunk => "trunk",
            Self::TrunkLink => "trunk_link",
            Self::Primary => "primary",
            Self::PrimaryLink => "primary_link",
            Self::Secondary => "secondary",
            Self::SecondaryLink => "secondary_link",
            Self::Tertiary => "tertiary",
            Self::TertiaryLink => "tertiary_link",
            Self::Unclassified => "unclassified",
            Self::Residential => "residential",
            Self::LivingStreet => "living_street",
            Self::Service => "service",
            Self::Footway => "footway",
            Self::Cycleway => "cycleway",
            Self::Path => "path",
            Self::Pedestrian => "pedestrian",
            Self::Construction => "construction",
        }
    }
}

/// A road, as an ordered cross section of lanes from its leftmost edge to
/// its rightmost.
///
/// Invariants, upheld by the `transform` pipeline rather than
/// by this struct's constructor, since a `Road` is also the *input* to the
/// `lanes_to_tags` projector and may be hand-built by callers/tests:
///
/// 1. Travel lanes run leftmost-first, rightmost-last.
/// 2. A `Separator` never appears as the first or last element unless it
///    represents a road edge.
/// 3. Between any two non-separator lanes exactly one `Separator` appears.
/// 4. Backward-direction travel lanes sit left of centre, forward right of
///    centre, for non-oneway roads (mirrored for left-driving locales).
/// 5. A lane's `designated` is never absent; `Any` is the fallback.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Road {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub highway_class: Option<HighwayClass>,
    pub lanes: Vec<Lane>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lit: Option<bool>,
    /// Tags neither recognized nor touched by any scheme parser, carried
    /// through so `lanes_to_tags` can re-emit them unchanged.
    #[serde(skip_serializing_if = "is_empty_tags", default)]
    pub other_attrs: Tags,
}

fn is_empty_tags(tags: &Tags) -> bool {
    tags.map().is_empty()
}

impl Road {
    /// Sum of every lane's width, used by renderers to scale a cross section
    /// to the canvas.
    #[must_use]
    pub fn width(&self, locale: &Locale) -> Metre {
        self.lanes
            .iter()
            .map(|lane| lane.width(locale))
            .fold(Metre::new(0.0), |a, b| a + b)
    }

    /// Verify the structural invariant: between any
    /// two non-separator lanes exactly one separator appears. Equivalent to
    /// saying no two adjacent lanes share the same "is a separator" status.
    #[must_use]
    pub fn check_separator_invariant(&self) -> bool {
        self.lanes
            .windows(2)
            .all(|pair| pair[0].is_separator() != pair[1].is_separator())
    }

    /// The road a mirrored driving-side locale would produce from the same,
    /// side-symmetric tags: lane order reversed, separator marking order
    /// flipped. Used to check the mirror-symmetry invariant (§8) rather
    /// than at runtime by the pipeline itself, which instead reads
    /// `Locale.driving_side` directly in `RoadBuilder::into_ltr`.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self {
            name: self.name.clone(),
            highway_class: self.highway_class,
            lanes: self.lanes.iter().rev().cloned().map(Lane::mirror).collect(),
            lit: self.lit,
            other_attrs: self.other_attrs.clone(),
        }
    }
}
