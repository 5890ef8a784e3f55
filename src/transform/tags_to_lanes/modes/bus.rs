//! Bus lane schemes: `busway`, `lanes:bus`/`lanes:psv`, `bus:lanes`/
//! `psv:lanes`. Three mutually exclusive ways to say the same thing, per
//! <https://wiki.openstreetmap.org/wiki/Bus_lanes> — only one at a time is
//! supported.

use crate::locale::Locale;
use crate::road::{Designated, Direction, Lane};
use crate::tag::{TagKey, Tags};
use crate::transform::error::{Code, Diagnostic, RoadError, RoadWarnings};
use crate::transform::tags_to_lanes::road::{Oneway, RoadBuilder};

const BUSWAY: TagKey = TagKey::from("busway");

fn set_bus(lane: &mut Lane) {
    if let Lane::Travel { designated, .. } = lane {
        *designated = Designated::Bus;
    }
}

fn outermost_mut(side: &mut Vec<Lane>) -> Option<&mut Lane> {
    side.last_mut()
}

pub(crate) fn parse(
    tags: &Tags,
    locale: &Locale,
    builder: &mut RoadBuilder,
    warnings: &mut RoadWarnings,
) -> Result<(), RoadError> {
    let has_busway = tags.get("busway").is_some()
        || tags.get("busway:both").is_some()
        || tags.get(BUSWAY + locale.driving_side.tag()).is_some()
        || tags.get(BUSWAY + locale.driving_side.opposite().tag()).is_some();
    let has_lanes_bus = tags.get("lanes:bus").is_some() || tags.get("lanes:psv").is_some();
    let has_bus_lanes = tags.get("bus:lanes").is_some()
        || tags.get("psv:lanes").is_some()
        || tags.get("bus:lanes:forward").is_some()
        || tags.get("bus:lanes:backward").is_some()
        || tags.get("psv:lanes:forward").is_some()
        || tags.get("psv:lanes:backward").is_some();

    match (has_busway, has_lanes_bus, has_bus_lanes) {
        (false, false, false) => Ok(()),
        (true, false, false) => busway(tags, locale, builder),
        (false, true, false) => {
            lanes_bus(tags, warnings);
            Ok(())
        },
        (false, false, true) => bus_lanes(tags, builder),
        _ => Err(RoadError::unsupported(
            "more than one bus lane scheme used at once",
            tags.subset(&[
                "busway",
                "lanes:bus",
                "lanes:psv",
                "bus:lanes",
                "psv:lanes",
            ]),
        )),
    }
}

fn busway(tags: &Tags, locale: &Locale, builder: &mut RoadBuilder) -> Result<(), RoadError> {
    let oneway_bus = tags.is("oneway:bus", "yes");
    let oneway = bool::from(builder.oneway) || oneway_bus;

    if tags.is(BUSWAY, "lane") {
        set_bus(outermost_mut(&mut builder.forward_side).ok_or_else(|| {
            RoadError::unsupported("no forward lanes for busway=lane", tags.subset(&["busway"]))
        })?);
        if !oneway {
            set_bus(outermost_mut(&mut builder.backward_side).ok_or_else(|| {
                RoadError::unsupported(
                    "no backward lanes for busway=lane",
                    tags.subset(&["busway"]),
                )
            })?);
        }
    }
    if tags.is(BUSWAY, "opposite_lane") {
        set_bus(outermost_mut(&mut builder.backward_side).ok_or_else(|| {
            RoadError::unsupported(
                "no backward lanes for busway=opposite_lane",
                tags.subset(&["busway"]),
            )
        })?);
    }
    if tags.is(BUSWAY + "both", "lane") {
        if oneway {
            return Err(RoadError::unsupported(
                "busway:both=lane on a oneway road is ambiguous",
                tags.subset(&["busway:both", "oneway"]),
            ));
        }
        set_bus(outermost_mut(&mut builder.forward_side).ok_or_else(|| {
            RoadError::unsupported(
                "no forward lanes for busway:both=lane",
                tags.subset(&["busway:both"]),
            )
        })?);
        set_bus(outermost_mut(&mut builder.backward_side).ok_or_else(|| {
            RoadError::unsupported(
                "no backward lanes for busway:both=lane",
                tags.subset(&["busway:both"]),
            )
        })?);
    }
    if tags.is(BUSWAY + locale.driving_side.tag(), "lane") {
        set_bus(outermost_mut(&mut builder.forward_side).ok_or_else(|| {
            RoadError::unsupported(
                "no forward lanes for busway:<driving side>=lane",
                tags.subset(&["busway"]),
            )
        })?);
    }
    if tags.is(BUSWAY + locale.driving_side.opposite().tag(), "lane") {
        if oneway {
            builder.forward_side.first_mut().map(set_bus).ok_or_else(|| {
                RoadError::unsupported(
                    "no forward lanes for busway:<opposite side>=lane",
                    tags.subset(&["busway"]),
                )
            })?;
        } else {
            return Err(RoadError::unsupported(
                "busway:<opposite side>=lane on a bidirectional road is ambiguous",
                tags.subset(&["busway"]),
            ));
        }
    }
    Ok(())
}

/// `lanes:bus`/`lanes:psv`: recognized but not implemented, matching the
/// teacher's own unimplemented-scheme admission rather than guessing.
fn lanes_bus(tags: &Tags, warnings: &mut RoadWarnings) {
    warnings.push(Diagnostic::warning(
        Code::Unimplemented,
        "lanes:bus/lanes:psv (bus lane count without placement) is not implemented",
        tags.subset(&[
            "lanes:bus",
            "lanes:bus:forward",
            "lanes:bus:backward",
            "lanes:psv",
            "lanes:psv:forward",
            "lanes:psv:backward",
        ]),
    ));
}

/// Directional (`:forward`/`:backward`) and, on oneway roads only, bare
/// `bus:lanes`/`psv:lanes` (equivalent to `:forward` when there's no
/// backward side). The bare form on a two-way road is left unconsumed here
/// and picked up by [`super::super::overrides::parse_undirected`] instead,
/// since it indexes the final left-to-right lane list, not a single side.
fn bus_lanes(tags: &Tags, builder: &mut RoadBuilder) -> Result<(), RoadError> {
    let forward_spec = tags
        .get_consume("bus:lanes:forward")
        .or_else(|| tags.get_consume("psv:lanes:forward"))
        .or_else(|| {
            if bool::from(builder.oneway) {
                tags.get_consume("bus:lanes").or_else(|| tags.get_consume("psv:lanes"))
            } else {
                None
            }
        });
    if let Some(spec) = forward_spec {
        let parts: Vec<&str> = spec.split('|').collect();
        let offset = usize::from(builder.has_centre_turn_lane());
        if parts.len() == builder.forward_side.len().saturating_sub(offset) {
            for (idx, part) in parts.into_iter().enumerate() {
                if part == "designated" {
                    set_bus(&mut builder.forward_side[idx + offset]);
                }
            }
        }
    }

    if let Some(spec) = tags
        .get_consume("bus:lanes:backward")
        .or_else(|| tags.get_consume("psv:lanes:backward"))
    {
        let parts: Vec<&str> = spec.split('|').collect();
        if parts.len() == builder.backward_side.len() {
            for (idx, part) in parts.into_iter().enumerate() {
                if part == "designated" {
                    set_bus(&mut builder.backward_side[idx]);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::road::Designated;

    fn one_lane_each_way() -> RoadBuilder {
        let mut builder = RoadBuilder::new(Oneway::No);
        builder.push_forward_outside(Lane::Travel {
            direction: Some(Direction::Forward),
            designated: Designated::Motor,
            width: None,
            max_speed: None,
            access: None,
            turn_markings: None,
        });
        builder.push_backward_outside(Lane::Travel {
            direction: Some(Direction::Backward),
            designated: Designated::Motor,
            width: None,
            max_speed: None,
            access: None,
            turn_markings: None,
        });
        builder
    }

    #[test]
    fn busway_lane_marks_both_sides() {
        let tags = Tags::from_pairs([("busway", "lane")]);
        let locale = Locale::builder().build();
        let mut builder = one_lane_each_way();
        let mut warnings = RoadWarnings::default();
        parse(&tags, &locale, &mut builder, &mut warnings).unwrap();
        assert!(builder.forward_side[0].is_bus());
        assert!(builder.backward_side[0].is_bus());
    }

    #[test]
    fn conflicting_schemes_error() {
        let tags = Tags::from_pairs([("busway", "lane"), ("lanes:bus", "2")]);
        let locale = Locale::builder().build();
        let mut builder = one_lane_each_way();
        let mut warnings = RoadWarnings::default();
        assert!(parse(&tags, &locale, &mut builder, &mut warnings).is_err());
    }

    #[test]
    fn bus_lanes_by_index() {
        let tags = Tags::from_pairs([("bus:lanes:forward", "designated")]);
        let locale = Locale::builder().build();
        let mut builder = RoadBuilder::new(Oneway::Yes);
        builder.push_forward_outside(Lane::Travel {
            direction: Some(Direction::Forward),
            designated: Designated::Motor,
            width: None,
            max_speed: None,
            access: None,
            turn_markings: None,
        });
        let mut warnings = RoadWarnings::default();
        parse(&tags, &locale, &mut builder, &mut warnings).unwrap();
        assert!(builder.forward_side[0].is_bus());
    }
}
