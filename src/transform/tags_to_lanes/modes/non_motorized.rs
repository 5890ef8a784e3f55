//! Short circuits for ways that never get the ordinary mode pipeline: paths
//! built only for pedestrians/cyclists, and ways still under construction.

use crate::road::{Designated, Direction, HighwayClass, Lane};
use crate::tag::Tags;
use crate::transform::error::RoadWarnings;
use crate::transform::tags_to_lanes::road::RoadBuilder;

/// If `highway_class` is one of the non-motorized classes or `construction`,
/// build the (very short) lane list directly and report `true`; otherwise
/// leave `builder` untouched and report `false` so the caller runs the
/// ordinary per-mode pipeline.
pub(crate) fn try_build(
    tags: &Tags,
    highway_class: Option<HighwayClass>,
    builder: &mut RoadBuilder,
    _warnings: &mut RoadWarnings,
) -> bool {
    match highway_class {
        Some(HighwayClass::Construction) => {
            let width = tags.get_consume("width").and_then(|w| w.parse().ok());
            builder.push_forward_outside(Lane::Construction { width });
            true
        },
        Some(HighwayClass::Footway | HighwayClass::Pedestrian) => {
            builder.push_forward_outside(Lane::Travel {
                direction: None,
                designated: Designated::Foot,
                width: None,
                max_speed: None,
                access: None,
                turn_markings: None,
            });
            true
        },
        Some(HighwayClass::Cycleway) => {
            let oneway = tags.is("oneway", "yes");
            let direction = if oneway {
                Some(Direction::Forward)
            } else {
                Some(Direction::Both)
            };
            builder.push_forward_outside(Lane::Travel {
                direction,
                designated: Designated::Bicycle,
                width: None,
                max_speed: None,
                access: None,
                turn_markings: None,
            });
            true
        },
        Some(HighwayClass::Path) => {
            let bicycle_allowed = !tags.is("bicycle", "no");
            builder.push_forward_outside(Lane::Travel {
                direction: None,
                designated: if bicycle_allowed {
                    Designated::Any
                } else {
                    Designated::Foot
                },
                width: None,
                max_speed: None,
                access: None,
                turn_markings: None,
            });
            true
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::tags_to_lanes::road::Oneway;

    #[test]
    fn footway_gets_single_foot_lane() {
        let tags = Tags::default();
        let mut builder = RoadBuilder::new(Oneway::No);
        let mut warnings = RoadWarnings::default();
        let handled = try_build(&tags, Some(HighwayClass::Footway), &mut builder, &mut warnings);
        assert!(handled);
        assert_eq!(builder.forward_side.len(), 1);
        assert!(builder.forward_side[0].is_foot());
    }

    #[test]
    fn residential_is_not_short_circuited() {
        let tags = Tags::default();
        let mut builder = RoadBuilder::new(Oneway::No);
        let mut warnings = RoadWarnings::default();
        let handled = try_build(
            &tags,
            Some(HighwayClass::Residential),
            &mut builder,
            &mut warnings,
        );
        assert!(!handled);
    }

    #[test]
    fn construction_gets_single_construction_lane() {
        let tags = Tags::default();
        let mut builder = RoadBuilder::new(Oneway::No);
        let mut warnings = RoadWarnings::default();
        let handled = try_build(
            &tags,
            Some(HighwayClass::Construction),
            &mut builder,
            &mut warnings,
        );
        assert!(handled);
        assert!(builder.forward_side[0].width(&crate::locale::Locale::builder().build()) > crate::metric::Metre::new(0.0));
    }
}
