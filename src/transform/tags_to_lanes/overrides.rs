//! Per-lane bar-separated override schemes: `bus:lanes`/`psv:lanes`,
//! `bicycle:lanes`, `vehicle:lanes`, `turn:lanes`, `width:lanes`,
//! `maxspeed:lanes`, each optionally suffixed `:forward`/`:backward`. The
//! directional `bus:lanes:forward`/`:backward` forms are handled by
//! [`super::modes::bus`] instead, since that scheme also covers `busway` and
//! needs to index the still-separate forward/backward builder sides.
//!
//! Directional (`:forward`/`:backward`) forms apply before [`super::road::RoadBuilder::into_ltr`]
//! runs, indexed from the centreline outward on their own side. The bare,
//! undirected form applies afterwards, indexed from the leftmost lane of the
//! final left-to-right sequence.

use crate::metric::{parse_width, Speed};
use crate::road::{Designated, Lane, TurnDirection};
use crate::tag::Tags;
use crate::transform::error::{Code, Diagnostic, RoadWarnings};
use crate::transform::tags_to_lanes::road::RoadBuilder;

fn apply_by_index<F: FnMut(&mut Lane, &str)>(
    lanes: &mut [Lane],
    spec: &str,
    key: &str,
    tags: &Tags,
    warnings: &mut RoadWarnings,
    mut set: F,
) {
    let parts: Vec<&str> = spec.split('|').collect();
    if parts.len() != lanes.len() {
        warnings.push(Diagnostic::warning(
            Code::LaneCountMismatch,
            format!("{key}={spec} has {} entries but there are {} lane(s)", parts.len(), lanes.len()),
            tags.subset(&[key]),
        ));
    }
    for (lane, part) in lanes.iter_mut().zip(parts) {
        let part = part.trim();
        if !part.is_empty() {
            set(lane, part);
        }
    }
}

fn set_designated(lane: &mut Lane, value: &str, designated: Designated) {
    if let Lane::Travel { designated: d, .. } = lane {
        if value == "designated" || value == "yes" {
            *d = designated;
        }
    }
}

fn set_turn(lane: &mut Lane, value: &str) {
    if let Lane::Travel { turn_markings, .. } = lane {
        *turn_markings = Some(TurnDirection::parse_set(value));
    }
}

fn set_width(lane: &mut Lane, value: &str) {
    if let Some(m) = parse_width(value) {
        if let Lane::Travel { width, .. } = lane {
            *width = Some(m);
        }
    }
}

fn set_speed(lane: &mut Lane, value: &str) {
    if let Some(s) = Speed::parse(value) {
        if let Lane::Travel { max_speed, .. } = lane {
            *max_speed = Some(s);
        }
    }
}

/// Apply `:forward`/`:backward`-suffixed overrides directly onto the
/// assembler's still-separate forward/backward stacks, before `into_ltr`.
pub(crate) fn parse_directional(tags: &Tags, builder: &mut RoadBuilder, warnings: &mut RoadWarnings) {
    for (key_base, designated) in [
        ("bicycle:lanes", Designated::Bicycle),
        ("vehicle:lanes", Designated::Any),
    ] {
        let forward_key = format!("{key_base}:forward");
        if let Some(spec) = tags.get_consume(forward_key.clone()) {
            apply_by_index(&mut builder.forward_side, spec, &forward_key, tags, warnings, |l, v| {
                set_designated(l, v, designated);
            });
        }
        let backward_key = format!("{key_base}:backward");
        if let Some(spec) = tags.get_consume(backward_key.clone()) {
            apply_by_index(&mut builder.backward_side, spec, &backward_key, tags, warnings, |l, v| {
                set_designated(l, v, designated);
            });
        }
    }
    if let Some(spec) = tags.get_consume("turn:lanes:forward") {
        apply_by_index(&mut builder.forward_side, spec, "turn:lanes:forward", tags, warnings, set_turn);
    }
    if let Some(spec) = tags.get_consume("turn:lanes:backward") {
        apply_by_index(&mut builder.backward_side, spec, "turn:lanes:backward", tags, warnings, set_turn);
    }
    if let Some(spec) = tags.get_consume("width:lanes:forward") {
        apply_by_index(&mut builder.forward_side, spec, "width:lanes:forward", tags, warnings, set_width);
    }
    if let Some(spec) = tags.get_consume("width:lanes:backward") {
        apply_by_index(&mut builder.backward_side, spec, "width:lanes:backward", tags, warnings, set_width);
    }
    if let Some(spec) = tags.get_consume("maxspeed:lanes:forward") {
        apply_by_index(&mut builder.forward_side, spec, "maxspeed:lanes:forward", tags, warnings, set_speed);
    }
    if let Some(spec) = tags.get_consume("maxspeed:lanes:backward") {
        apply_by_index(&mut builder.backward_side, spec, "maxspeed:lanes:backward", tags, warnings, set_speed);
    }
}

/// Apply bare (undirected) overrides onto the final left-to-right lane
/// sequence, counted from the leftmost lane.
pub(crate) fn parse_undirected(tags: &Tags, lanes: &mut [Lane], warnings: &mut RoadWarnings) {
    if let Some(spec) = tags.get_consume("bus:lanes").or_else(|| tags.get_consume("psv:lanes")) {
        apply_by_index(lanes, spec, "bus:lanes", tags, warnings, |l, v| {
            set_designated(l, v, Designated::Bus);
        });
    }
    if let Some(spec) = tags.get_consume("bicycle:lanes") {
        apply_by_index(lanes, spec, "bicycle:lanes", tags, warnings, |l, v| {
            set_designated(l, v, Designated::Bicycle);
        });
    }
    if let Some(spec) = tags.get_consume("vehicle:lanes") {
        apply_by_index(lanes, spec, "vehicle:lanes", tags, warnings, |l, v| {
            set_designated(l, v, Designated::Any);
        });
    }
    if let Some(spec) = tags.get_consume("turn:lanes") {
        apply_by_index(lanes, spec, "turn:lanes", tags, warnings, set_turn);
    }
    if let Some(spec) = tags.get_consume("width:lanes") {
        apply_by_index(lanes, spec, "width:lanes", tags, warnings, set_width);
    }
    if let Some(spec) = tags.get_consume("maxspeed:lanes") {
        apply_by_index(lanes, spec, "maxspeed:lanes", tags, warnings, set_speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::road::{Direction, Lane};

    fn motor_lane(direction: Direction) -> Lane {
        Lane::Travel {
            direction: Some(direction),
            designated: Designated::Motor,
            width: None,
            max_speed: None,
            access: None,
            turn_markings: None,
        }
    }

    #[test]
    fn turn_lanes_assigns_per_lane() {
        let tags = Tags::from_pairs([("turn:lanes", "left|through;right")]);
        let mut warnings = RoadWarnings::default();
        let mut lanes = vec![motor_lane(Direction::Forward), motor_lane(Direction::Forward)];
        parse_undirected(&tags, &mut lanes, &mut warnings);
        let Lane::Travel { turn_markings, .. } = &lanes[0] else { panic!() };
        assert!(turn_markings.unwrap().contains(TurnDirection::Left));
        let Lane::Travel { turn_markings, .. } = &lanes[1] else { panic!() };
        assert!(turn_markings.unwrap().contains(TurnDirection::Through));
        assert!(turn_markings.unwrap().contains(TurnDirection::Right));
    }

    #[test]
    fn mismatched_count_warns() {
        let tags = Tags::from_pairs([("turn:lanes", "left|through|right")]);
        let mut warnings = RoadWarnings::default();
        let mut lanes = vec![motor_lane(Direction::Forward)];
        parse_undirected(&tags, &mut lanes, &mut warnings);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn bus_designated_by_index() {
        let tags = Tags::from_pairs([("bicycle:lanes", "designated|")]);
        let mut warnings = RoadWarnings::default();
        let mut lanes = vec![motor_lane(Direction::Forward), motor_lane(Direction::Forward)];
        parse_undirected(&tags, &mut lanes, &mut warnings);
        assert!(lanes[0].is_bicycle());
        assert!(lanes[1].is_motor());
    }
}
