//! Lanes-to-Tags Projector: the inverse of [`super::tags_to_lanes::tags_to_lanes`],
//! producing a minimal tag set that reproduces a [`Road`]'s lane structure up
//! to default-filled attributes (width, marking colour).

use log::trace;

use crate::locale::{DrivingSide, Locale};
use crate::road::{Designated, Direction, Lane, ParkingOrientation, Road, TurnDirection};
use crate::tag::Tags;
use crate::transform::error::{Code, Diagnostic, RoadError, RoadWarnings};
use crate::transform::tags_to_lanes;

/// Options controlling [`lanes_to_tags`]. Mirrors
/// [`tags_to_lanes::Config`]'s home in the same pipeline, but this direction
/// only has one flag worth exposing: whether to pay for the self-check.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Re-parse the emitted tags and verify they reproduce the input
    /// road's lane sequence, after stripping defaulted attributes. Default
    /// `true`; callers emitting tags for storage rather than verification
    /// may want to skip the extra pass.
    pub check_roundtrip: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { check_roundtrip: true }
    }
}

fn non_separator(lanes: &[Lane]) -> Vec<Lane> {
    lanes.iter().filter(|lane| !lane.is_separator()).cloned().collect()
}

fn outermost_non_motor(lanes: &[Lane], rev: bool) -> Box<dyn Iterator<Item = &Lane> + '_> {
    if rev {
        Box::new(lanes.iter().rev().take_while(|lane| !lane.is_motor()))
    } else {
        Box::new(lanes.iter().take_while(|lane| !lane.is_motor()))
    }
}

/// Emit `sidewalk`/`shoulder`-shaped tags from the left/right presence of a
/// road-edge feature (sidewalks and shoulders share the same
/// `none`/`left`/`right`/`both` vocabulary).
fn edge_presence_tag(tags: &mut Tags, key: &'static str, left: bool, right: bool, none_value: &'static str) {
    match (left, right) {
        (false, false) => {
            tags.insert(key, none_value);
        },
        (true, false) => {
            tags.insert(key, "left");
        },
        (false, true) => {
            tags.insert(key, "right");
        },
        (true, true) => {
            tags.insert(key, "both");
        },
    }
}

fn cycle_lane_oneway_value(direction: Direction) -> &'static str {
    match direction {
        Direction::Forward => "yes",
        Direction::Backward => "-1",
        Direction::Both => "no",
    }
}

/// Project a [`Road`] back into the OSM tag set that would reproduce it.
///
/// # Errors
///
/// `Code::RoundTrip` if `config.check_roundtrip` is set and re-parsing the
/// emitted tags does not reproduce the input road's non-separator lane
/// sequence (ignoring defaulted widths/colours). Otherwise propagates
/// whatever `tags_to_lanes` itself could fail with while checking.
pub fn lanes_to_tags(road: &Road, locale: &Locale, config: &Config) -> Result<(Tags, RoadWarnings), RoadError> {
    let warnings = RoadWarnings::default();
    let mut tags = road.other_attrs.clone();
    let lanes = non_separator(&road.lanes);

    if let Some(name) = &road.name {
        tags.insert("name", name.clone());
    }
    if let Some(class) = road.highway_class {
        tags.insert("highway", class.tag_value());
    }
    if let Some(lit) = road.lit {
        tags.insert("lit", if lit { "yes" } else { "no" });
    }

    // `highway=construction` short-circuits: a lone Construction lane carries
    // nothing else worth projecting.
    if lanes.len() == 1 && matches!(lanes[0], Lane::Construction { .. }) {
        trace!("lanes_to_tags: construction short circuit, no further tags emitted");
        return Ok((tags, warnings));
    }

    // `lanes=*` counts every lane open to motorized through-traffic, which
    // includes bus/taxi/psv-designated travel lanes, not just plain
    // `Designated::Motor` ones (`is_motor()` is reserved for "is this an
    // ordinary travel lane", used elsewhere to find the edge of the
    // carriageway).
    let motorized_lanes: Vec<&Lane> = lanes
        .iter()
        .filter(|lane| matches!(lane, Lane::Travel { designated, .. } if !matches!(designated, Designated::Foot | Designated::Bicycle)))
        .collect();
    tags.insert("lanes", motorized_lanes.len().to_string());

    let mut oneway = false;
    if !motorized_lanes.is_empty() {
        let all_forward = motorized_lanes.iter().all(|lane| lane.direction() == Some(Direction::Forward));
        let all_backward = motorized_lanes.iter().all(|lane| lane.direction() == Some(Direction::Backward));
        if all_forward {
            tags.insert("oneway", "yes");
            oneway = true;
        } else if all_backward {
            // The reverse of the `-1` rewrite: a road whose motor lanes are
            // uniformly backward is exactly what `oneway=-1` produces.
            tags.insert("oneway", "-1");
            oneway = true;
        }
    }

    if lanes.iter().any(|lane| {
        matches!(
            lane,
            Lane::Travel {
                designated: Designated::Motor,
                direction: Some(Direction::Both),
                ..
            }
        )
    }) {
        tags.insert("centre_turn_lane", "yes");
    }

    // Shoulder / sidewalk: both read off the outermost lanes of the
    // left-to-right sequence.
    let left_shoulder = lanes.first().map_or(false, Lane::is_shoulder);
    let right_shoulder = lanes.last().map_or(false, Lane::is_shoulder);
    edge_presence_tag(&mut tags, "shoulder", left_shoulder, right_shoulder, "no");

    let left_foot = lanes.first().map_or(false, Lane::is_foot);
    let right_foot = lanes.last().map_or(false, Lane::is_foot);
    edge_presence_tag(&mut tags, "sidewalk", left_foot, right_foot, "none");

    // Parking: outermost non-motor lane on each side, if it is a Parking lane.
    let left_parking = outermost_non_motor(&lanes, false).find_map(|lane| match lane {
        Lane::Parking { orientation, .. } => Some(*orientation),
        _ => None,
    });
    let right_parking = outermost_non_motor(&lanes, true).find_map(|lane| match lane {
        Lane::Parking { orientation, .. } => Some(*orientation),
        _ => None,
    });
    emit_parking(&mut tags, left_parking, right_parking);

    // Cycleway: outermost non-motor lane on each side, if it is a bicycle lane.
    let left_cycle = outermost_non_motor(&lanes, false).find(|lane| lane.is_bicycle());
    let right_cycle = outermost_non_motor(&lanes, true).find(|lane| lane.is_bicycle());
    emit_cycleway(&mut tags, left_cycle, right_cycle, oneway);

    // Busway: outermost non-motor lane on each side, if it is a bus lane;
    // fall back to a bar-separated `bus:lanes` when a bus lane exists but
    // isn't at either edge (e.g. a bus-designated travel lane in the middle
    // of the motor block).
    let left_bus = outermost_non_motor(&lanes, false).find(|lane| lane.is_bus());
    let right_bus = outermost_non_motor(&lanes, true).find(|lane| lane.is_bus());
    if left_bus.is_none() && right_bus.is_none() && lanes.iter().any(Lane::is_bus) {
        emit_bus_lanes_bar_separated(&mut tags, &lanes);
    } else {
        emit_busway(&mut tags, left_bus, right_bus, locale, oneway, &lanes);
    }

    emit_per_lane_overrides(&mut tags, &lanes, locale);

    if config.check_roundtrip {
        check_roundtrip(&tags, locale, &lanes)?;
    }

    Ok((tags, warnings))
}

fn emit_parking(tags: &mut Tags, left: Option<ParkingOrientation>, right: Option<ParkingOrientation>) {
    match (left, right) {
        (None, None) => {},
        (Some(o), None) => {
            tags.insert("parking:lane:left", o.tag_value());
        },
        (None, Some(o)) => {
            tags.insert("parking:lane:right", o.tag_value());
        },
        (Some(l), Some(r)) if l == r => {
            tags.insert("parking:lane:both", l.tag_value());
        },
        (Some(l), Some(r)) => {
            tags.insert("parking:lane:left", l.tag_value());
            tags.insert("parking:lane:right", r.tag_value());
        },
    }
}

fn emit_cycleway(tags: &mut Tags, left: Option<&Lane>, right: Option<&Lane>, oneway: bool) {
    let left_dir = left.and_then(Lane::direction);
    let right_dir = right.and_then(Lane::direction);

    match (left.is_some(), right.is_some()) {
        (false, false) => return,
        (true, false) => {
            tags.insert("cycleway:left", "lane");
        },
        (false, true) => {
            tags.insert("cycleway:right", "lane");
        },
        (true, true) => {
            tags.insert("cycleway:both", "lane");
        },
    }

    // A bike lane running backward on a oneway road is contraflow: note it
    // explicitly so routers don't assume the whole way is one-directional
    // for bicycles too.
    if oneway && (left_dir == Some(Direction::Backward) || right_dir == Some(Direction::Backward)) {
        tags.insert("oneway:bicycle", "no");
    }

    if let Some(dir) = left_dir {
        tags.insert("cycleway:left:oneway", cycle_lane_oneway_value(dir));
    }
    if let Some(dir) = right_dir {
        tags.insert("cycleway:right:oneway", cycle_lane_oneway_value(dir));
    }
}

/// `busway:*` single-sided forms only round-trip when the side named is the
/// driving side (`modes::bus` always accepts `busway:<driving side>`) or the
/// road is oneway (where `busway:<opposite side>` is accepted as the
/// contraflow case). A backward-side bus lane on a two-way road has no
/// single-sided `busway:*` form `modes::bus` will accept back, so it falls
/// back to the same bar-separated `bus:lanes` form used for a bus lane that
/// isn't at either edge.
fn emit_busway(tags: &mut Tags, left: Option<&Lane>, right: Option<&Lane>, locale: &Locale, oneway: bool, lanes: &[Lane]) {
    match (left.is_some(), right.is_some()) {
        (false, false) => {},
        (true, false) => emit_busway_side(tags, locale, true, oneway, lanes),
        (false, true) => emit_busway_side(tags, locale, false, oneway, lanes),
        (true, true) => {
            tags.insert("busway:both", "lane");
        },
    }
}

fn emit_busway_side(tags: &mut Tags, locale: &Locale, is_left_lane: bool, oneway: bool, lanes: &[Lane]) {
    let is_driving_side = matches!(
        (locale.driving_side, is_left_lane),
        (DrivingSide::Right, false) | (DrivingSide::Left, true)
    );
    if is_driving_side || oneway {
        let key = format!("busway:{}", busway_side(locale, is_left_lane));
        tags.insert(key, "lane");
    } else {
        emit_bus_lanes_bar_separated(tags, lanes);
    }
}

fn emit_bus_lanes_bar_separated(tags: &mut Tags, lanes: &[Lane]) {
    let spec = lanes
        .iter()
        .map(|lane| if lane.is_bus() { "designated" } else { "" })
        .collect::<Vec<_>>()
        .join("|");
    tags.insert("bus:lanes", spec);
}

/// `busway:*` side keys name the absolute side of the way, mirroring
/// `modes::bus`'s own driving-side mapping in the forward direction.
fn busway_side(locale: &Locale, is_left_lane: bool) -> &'static str {
    match (locale.driving_side, is_left_lane) {
        (DrivingSide::Right, true) => "left",
        (DrivingSide::Right, false) => "right",
        (DrivingSide::Left, true) => "right",
        (DrivingSide::Left, false) => "left",
    }
}

/// `turn:lanes`/`width:lanes`: only emitted when at least one lane carries
/// the attribute, since most roads have no per-lane deviation worth spelling
/// out explicitly.
fn emit_per_lane_overrides(tags: &mut Tags, lanes: &[Lane], locale: &Locale) {
    if lanes
        .iter()
        .any(|lane| matches!(lane, Lane::Travel { turn_markings: Some(set), .. } if !set.is_empty()))
    {
        let spec = lanes
            .iter()
            .map(|lane| match lane {
                Lane::Travel {
                    turn_markings: Some(set),
                    ..
                } => set.iter().map(TurnDirection::tag_value).collect::<Vec<_>>().join(";"),
                _ => String::new(),
            })
            .collect::<Vec<_>>()
            .join("|");
        tags.insert("turn:lanes", spec);
    }

    let any_width_deviates = lanes.iter().any(|lane| match lane {
        Lane::Travel {
            width: Some(w),
            designated: Designated::Motor,
            ..
        } => *w != locale.travel_width(Designated::Motor),
        _ => false,
    });
    if any_width_deviates {
        let spec = lanes
            .iter()
            .map(|lane| match lane {
                Lane::Travel { width: Some(w), .. } => format!("{}", w.val()),
                _ => String::new(),
            })
            .collect::<Vec<_>>()
            .join("|");
        tags.insert("width:lanes", spec);
    }
}

/// Re-parse the emitted tags and verify the non-separator lane sequence
/// matches, modulo defaulted width/speed/access that re-parsing may not
/// reproduce exactly.
fn check_roundtrip(tags: &Tags, locale: &Locale, lanes: &[Lane]) -> Result<(), RoadError> {
    let (roundtrip_road, _warnings) = tags_to_lanes::tags_to_lanes(tags, locale, &tags_to_lanes::Config::default())?;
    let roundtrip_lanes = non_separator(&roundtrip_road.lanes);
    let matches = lanes.len() == roundtrip_lanes.len()
        && lanes
            .iter()
            .zip(roundtrip_lanes.iter())
            .all(|(a, b)| lane_signature(a) == lane_signature(b));
    if !matches {
        return Err(RoadError::new(Diagnostic::error(
            Code::RoundTrip,
            "lanes_to_tags output does not round-trip back to the input lane sequence",
            tags.clone(),
        )));
    }
    Ok(())
}

/// The part of a `Lane` the round-trip contract actually promises to
/// preserve: shape, direction, and designation, but not defaulted
/// widths/speeds/colours.
fn lane_signature(lane: &Lane) -> (&'static str, Option<Direction>, Option<Designated>) {
    let kind = match lane {
        Lane::Travel { .. } => "travel",
        Lane::Parking { .. } => "parking",
        Lane::Shoulder { .. } => "shoulder",
        Lane::Separator { .. } => "separator",
        Lane::Construction { .. } => "construction",
    };
    (kind, lane.direction(), lane.designated())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::road::HighwayClass;
    use crate::transform::tags_to_lanes;

    fn roundtrip(tags: Tags, locale: &Locale) -> (Tags, Road) {
        let (road, _warnings) =
            tags_to_lanes::tags_to_lanes(&tags, locale, &tags_to_lanes::Config::default()).unwrap();
        let (projected, _warnings) = lanes_to_tags(&road, locale, &Config::default()).unwrap();
        (projected, road)
    }

    #[test]
    fn two_lane_oneway_projects_lanes_and_oneway() {
        let tags = Tags::from_pairs([("lanes", "2"), ("oneway", "yes"), ("shoulder", "no")]);
        let locale = Locale::builder().build();
        let (projected, _) = roundtrip(tags, &locale);
        assert_eq!(projected.get("lanes"), Some("2"));
        assert_eq!(projected.get("oneway"), Some("yes"));
    }

    #[test]
    fn two_way_road_has_no_oneway_tag() {
        let tags = Tags::from_pairs([("lanes", "2"), ("shoulder", "no")]);
        let locale = Locale::builder().build();
        let (projected, _) = roundtrip(tags, &locale);
        assert_eq!(projected.get("oneway"), None);
        assert_eq!(projected.get("lanes"), Some("2"));
    }

    #[test]
    fn sidewalk_both_round_trips() {
        let tags = Tags::from_pairs([("lanes", "2"), ("sidewalk", "both")]);
        let locale = Locale::builder().build();
        let (projected, _) = roundtrip(tags, &locale);
        assert_eq!(projected.get("sidewalk"), Some("both"));
    }

    #[test]
    fn construction_projects_to_bare_highway_tag() {
        let tags = Tags::from_pairs([("highway", "construction")]);
        let locale = Locale::builder().build();
        let (road, _warnings) =
            tags_to_lanes::tags_to_lanes(&tags, &locale, &tags_to_lanes::Config::default()).unwrap();
        let (projected, _) = lanes_to_tags(&road, &locale, &Config::default()).unwrap();
        assert_eq!(projected.get("highway"), Some("construction"));
        assert_eq!(projected.get("lanes"), None);
    }

    #[test]
    fn backward_only_bus_lane_round_trips_via_bus_lanes() {
        let tags = Tags::from_pairs([("lanes", "2"), ("bus:lanes", "designated|no"), ("shoulder", "no")]);
        let locale = Locale::builder().build();
        let (projected, _) = roundtrip(tags, &locale);
        assert_eq!(projected.get("bus:lanes"), Some("designated|no"));
        assert_eq!(projected.get("busway:left"), None);
    }

    #[test]
    fn busway_lane_round_trips_to_busway_both() {
        let tags = Tags::from_pairs([("lanes", "2"), ("busway", "lane"), ("shoulder", "no")]);
        let locale = Locale::builder().build();
        let (projected, _) = roundtrip(tags, &locale);
        assert_eq!(projected.get("busway:both"), Some("lane"));
    }

    #[test]
    fn highway_class_round_trips() {
        let tags = Tags::from_pairs([("highway", "residential"), ("lanes", "2"), ("shoulder", "no")]);
        let locale = Locale::builder().build();
        let (projected, road) = roundtrip(tags, &locale);
        assert_eq!(road.highway_class, Some(HighwayClass::Residential));
        assert_eq!(projected.get("highway"), Some("residential"));
    }
}
