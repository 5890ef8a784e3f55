//! `maxspeed` scheme: `maxspeed`, `maxspeed:forward`, `maxspeed:backward`.
//! `maxspeed:lanes[:forward|:backward]` (per-lane) is handled by
//! `overrides`.

use crate::metric::Speed;
use crate::road::{Designated, Lane};
use crate::tag::Tags;
use crate::transform::error::{Code, Diagnostic, RoadError, RoadWarnings};
use crate::transform::tags::MAXSPEED;
use crate::transform::tags_to_lanes::road::RoadBuilder;

fn apply(side: &mut [Lane], speed: Speed) {
    for lane in side.iter_mut() {
        if let Lane::Travel {
            max_speed: s @ None,
            designated: Designated::Motor,
            ..
        } = lane
        {
            *s = Some(speed);
        }
    }
}

/// # Errors
///
/// `Code::UnitParseFailure` if the bare `maxspeed` value can't be parsed;
/// directional forms that fail to parse are reported as warnings instead,
/// since the bare scheme still has a usable default.
pub(crate) fn parse(
    tags: &Tags,
    builder: &mut RoadBuilder,
    warnings: &mut RoadWarnings,
) -> Result<(), RoadError> {
    // Directional forms run first so the bare scheme, applied below, only
    // fills lanes that are still unset: more specific keys win.
    if let Some(raw) = tags.get_consume("maxspeed:forward") {
        match Speed::parse(raw) {
            Some(speed) => apply(&mut builder.forward_side, speed),
            None => warnings.push(Diagnostic::warning(
                Code::UnitParseFailure,
                format!("maxspeed:forward={raw} could not be parsed"),
                tags.subset(&["maxspeed:forward"]),
            )),
        }
    }
    if let Some(raw) = tags.get_consume("maxspeed:backward") {
        match Speed::parse(raw) {
            Some(speed) => apply(&mut builder.backward_side, speed),
            None => warnings.push(Diagnostic::warning(
                Code::UnitParseFailure,
                format!("maxspeed:backward={raw} could not be parsed"),
                tags.subset(&["maxspeed:backward"]),
            )),
        }
    }
    if let Some(raw) = tags.get_consume(MAXSPEED) {
        match Speed::parse(raw) {
            Some(speed) => {
                apply(&mut builder.forward_side, speed);
                apply(&mut builder.backward_side, speed);
            },
            None => {
                return Err(RoadError::new(Diagnostic::error(
                    Code::UnitParseFailure,
                    format!("maxspeed={raw} could not be parsed"),
                    tags.subset(&[MAXSPEED]),
                )));
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::road::Direction;
    use crate::transform::tags_to_lanes::road::Oneway;

    fn builder_with_one_each_way() -> RoadBuilder {
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
    fn bare_maxspeed_applies_both_sides() {
        let tags = Tags::from_pairs([("maxspeed", "50")]);
        let mut builder = builder_with_one_each_way();
        let mut warnings = RoadWarnings::default();
        parse(&tags, &mut builder, &mut warnings).unwrap();
        let Lane::Travel { max_speed, .. } = &builder.forward_side[0] else { panic!() };
        assert_eq!(max_speed.unwrap(), Speed::kmh(50.0));
    }

    #[test]
    fn directional_overrides_bare() {
        let tags = Tags::from_pairs([("maxspeed", "50"), ("maxspeed:forward", "30")]);
        let mut builder = builder_with_one_each_way();
        let mut warnings = RoadWarnings::default();
        parse(&tags, &mut builder, &mut warnings).unwrap();
        let Lane::Travel { max_speed, .. } = &builder.forward_side[0] else { panic!() };
        assert_eq!(max_speed.unwrap(), Speed::kmh(30.0));
    }
}
