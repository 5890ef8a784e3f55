use enumset::{EnumSet, EnumSetType};
use serde::{Deserialize, Serialize};

use super::Markings;
use crate::locale::Locale;
use crate::metric::{Metre, Speed};

/// A single lane, ordered left-to-right as part of a [`super::Road`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Lane {
    Travel {
        /// `None` for lanes with no inherent direction (a foot lane that
        /// simply exists, rather than one that was explicitly tagged
        /// bidirectional).
        #[serde(skip_serializing_if = "Option::is_none")]
        direction: Option<Direction>,
        designated: Designated,
        #[serde(skip_serializing_if = "Option::is_none")]
        width: Option<Metre>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_speed: Option<Speed>,
        #[serde(skip_serializing_if = "Option::is_none")]
        access: Option<Access>,
        #[serde(skip_serializing_if = "Option::is_none")]
        turn_markings: Option<EnumSet<TurnDirection>>,
    },
    Parking {
        direction: Direction,
        designated: Designated,
        orientation: ParkingOrientation,
        #[serde(skip_serializing_if = "Option::is_none")]
        width: Option<Metre>,
    },
    Shoulder {
        #[serde(skip_serializing_if = "Option::is_none")]
        width: Option<Metre>,
    },
    Separator {
        semantic: Semantic,
        markings: Markings,
    },
    Construction {
        #[serde(skip_serializing_if = "Option::is_none")]
        width: Option<Metre>,
    },
}

impl Lane {
    // EUROPEAN AGREEMENT 1 ON MAIN INTERNATIONAL TRAFFIC ARTERIES (AGR) 1975
    // III.1.1.1
    pub const DEFAULT_WIDTH: Metre = Metre::new(3.5);

    /// Width in metres, falling back to locale defaults for travel/parking
    /// lanes that didn't specify one explicitly.
    #[must_use]
    pub fn width(&self, locale: &Locale) -> Metre {
        match self {
            Lane::Separator { markings, .. } => markings.width(locale),
            Lane::Travel {
                width, designated, ..
            } => width.unwrap_or_else(|| locale.travel_width(*designated)),
            Lane::Parking {
                width, designated, ..
            } => width.unwrap_or_else(|| locale.travel_width(*designated)),
            Lane::Shoulder { width } | Lane::Construction { width } => {
                width.unwrap_or(Lane::DEFAULT_WIDTH)
            },
        }
    }

    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Lane::Travel { direction, .. } => *direction,
            Lane::Parking { direction, .. } => Some(*direction),
            Lane::Shoulder { .. } | Lane::Separator { .. } | Lane::Construction { .. } => None,
        }
    }

    /// This lane's designation, for the variants that carry one.
    #[must_use]
    pub fn designated(&self) -> Option<Designated> {
        match self {
            Lane::Travel { designated, .. } | Lane::Parking { designated, .. } => Some(*designated),
            Lane::Shoulder { .. } | Lane::Separator { .. } | Lane::Construction { .. } => None,
        }
    }

    #[must_use]
    pub fn is_motor(&self) -> bool {
        matches!(
            self,
            Lane::Travel {
                designated: Designated::Motor,
                ..
            }
        )
    }

    #[must_use]
    pub fn is_bicycle(&self) -> bool {
        matches!(
            self,
            Lane::Travel {
                designated: Designated::Bicycle,
                ..
            }
        )
    }

    #[must_use]
    pub fn is_bus(&self) -> bool {
        matches!(
            self,
            Lane::Travel {
                designated: Designated::Bus,
                ..
            }
        )
    }

    #[must_use]
    pub fn is_foot(&self) -> bool {
        matches!(
            self,
            Lane::Travel {
                designated: Designated::Foot,
                ..
            }
        )
    }

    #[must_use]
    pub fn is_shoulder(&self) -> bool {
        matches!(self, Lane::Shoulder { .. })
    }

    #[must_use]
    pub fn is_separator(&self) -> bool {
        matches!(self, Lane::Separator { .. })
    }

    /// Mirror a single lane for a driving-side flip. `Direction` is relative
    /// to the way's own start-to-end digitization, not to the physical
    /// side of the road, so it is untouched here: `RoadBuilder::into_ltr`
    /// already produces exactly reversed lane *order* between driving
    /// sides (reversing the backward/forward concatenation), which is all
    /// [`super::Road::mirrored`] needs to replicate. Separators do reverse
    /// their marking stripe order, since that sequence is written physical
    /// left-to-right.
    #[must_use]
    pub fn mirror(self) -> Self {
        match self {
            Self::Separator { semantic, mut markings } => {
                markings.flip();
                Self::Separator { semantic, markings }
            },
            other => other,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
    Both,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Designated {
    Foot,
    Bicycle,
    #[serde(rename = "motor_vehicle")]
    Motor,
    Bus,
    Taxi,
    Psv,
    Any,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParkingOrientation {
    Parallel,
    Diagonal,
    Perpendicular,
}

impl ParkingOrientation {
    /// The `parking:lane:*=*` value that parses back to this orientation.
    #[must_use]
    pub fn tag_value(self) -> &'static str {
        match self {
            Self::Parallel => "parallel",
            Self::Diagonal => "diagonal",
            Self::Perpendicular => "perpendicular",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Semantic {
    Shoulder,
    Lane,
    Modal,
    Centre,
}

/// A single turn a lane's markings indicate, per
/// <https://wiki.openstreetmap.org/wiki/Key:turn>.
#[derive(Debug, EnumSetType, Serialize, Deserialize)]
#[enumset(serialize_as_list)]
#[serde(rename_all = "snake_case")]
pub enum TurnDirection {
    Left,
    SlightLeft,
    SharpLeft,
    Through,
    Right,
    SlightRight,
    SharpRight,
    Reverse,
    MergeLeft,
    MergeRight,
}

impl TurnDirection {
    /// Parse one `;`-free `turn=*` token.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "through" => Some(Self::Through),
            "" | "none" => None,
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "slight_left" => Some(Self::SlightLeft),
            "slight_right" => Some(Self::SlightRight),
            "sharp_left" => Some(Self::SharpLeft),
            "sharp_right" => Some(Self::SharpRight),
            "reverse" => Some(Self::Reverse),
            "merge_to_left" => Some(Self::MergeLeft),
            "merge_to_right" => Some(Self::MergeRight),
            _ => None,
        }
    }

    /// Parse a `;`-joined set of turn tokens, e.g. `left;through`.
    #[must_use]
    pub fn parse_set(value: &str) -> EnumSet<Self> {
        let mut set = EnumSet::new();
        for token in value.split(';') {
            let token = token.trim();
            if token.is_empty() || token == "none" {
                continue;
            }
            if let Some(dir) = Self::parse(token) {
                set.insert(dir);
            }
        }
        set
    }

    #[must_use]
    pub fn tag_value(self) -> &'static str {
        match self {
            Self::Through => "through",
            Self::Left => "left",
            Self::Right => "right",
            Self::SlightLeft => "slight_left",
            Self::SlightRight => "slight_right",
            Self::SharpLeft => "sharp_left",
            Self::SharpRight => "sharp_right",
            Self::Reverse => "reverse",
            Self::MergeLeft => "merge_to_left",
            Self::MergeRight => "merge_to_right",
        }
    }
}

/// Display lane detail as printable characters, used by debug tooling and
/// ASCII-art test fixtures.
pub trait Printable {
    fn as_ascii(&self) -> char;
    fn as_utf8(&self) -> char;
}

impl Printable for Lane {
    fn as_ascii(&self) -> char {
        match self {
            Self::Travel {
                designated: Designated::Foot,
                ..
            } => 's',
            Self::Travel {
                designated: Designated::Bicycle,
                ..
            } => 'b',
            Self::Travel {
                designated: Designated::Motor | Designated::Any,
                ..
            } => 'd',
            Self::Travel {
                designated: Designated::Bus,
                ..
            } => 'B',
            Self::Travel {
                designated: Designated::Taxi,
                ..
            } => 't',
            Self::Travel {
                designated: Designated::Psv,
                ..
            } => 'P',
            Self::Shoulder { .. } => 'S',
            Self::Parking { .. } => 'p',
            Self::Separator { .. } => '|',
            Self::Construction { .. } => 'C',
        }
    }

    fn as_utf8(&self) -> char {
        match self {
            Self::Travel {
                designated: Designated::Foot,
                ..
            } => '🚶',
            Self::Travel {
                designated: Designated::Bicycle,
                ..
            } => '🚲',
            Self::Travel {
                designated: Designated::Motor | Designated::Any,
                ..
            } => '🚗',
            Self::Travel {
                designated: Designated::Bus,
                ..
            } => '🚌',
            Self::Travel {
                designated: Designated::Taxi,
                ..
            } => '🚕',
            Self::Travel {
                designated: Designated::Psv,
                ..
            } => '🚍',
            Self::Shoulder { .. } => '🛆',
            Self::Parking { .. } => '🅿',
            Self::Separator { .. } => '|',
            Self::Construction { .. } => '🚧',
        }
    }
}

impl Printable for Direction {
    fn as_ascii(&self) -> char {
        match self {
            Self::Forward => '^',
            Self::Backward => 'v',
            Self::Both => '|',
        }
    }

    fn as_utf8(&self) -> char {
        match self {
            Self::Forward => '↑',
            Self::Backward => '↓',
            Self::Both => '↕',
        }
    }
}

/// A value from OSM's `access=*` scheme, as applied to a single mode on a
/// single lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessValue {
    Yes,
    No,
    Designated,
    Private,
    Permissive,
}

impl AccessValue {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            "designated" => Some(Self::Designated),
            "private" => Some(Self::Private),
            "permissive" => Some(Self::Permissive),
            _ => None,
        }
    }
}

/// Access by vehicle type.
/// Types as defined in <https://wiki.openstreetmap.org/wiki/Key:access#Land-based_transportation>
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Access {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foot: Option<AccessValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bicycle: Option<AccessValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxi: Option<AccessValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bus: Option<AccessValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psv: Option<AccessValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motor: Option<AccessValue>,
}
