//! Cycleway scheme: `cycleway`, `cycleway:left`, `cycleway:right`,
//! `cycleway:both`. Values `lane`/`track` place a lane; `opposite_lane`/
//! `opposite_track` are deprecated contraflow spellings; `no`/absent place
//! nothing.

use crate::locale::Locale;
use crate::metric::{parse_width, Metre};
use crate::road::{Designated, Direction, Lane};
use crate::tag::Tags;
use crate::transform::error::{Code, Diagnostic, RoadError, RoadWarnings};
use crate::transform::tags::CYCLEWAY;
use crate::transform::tags_to_lanes::road::RoadBuilder;

fn cycle_lane(direction: Direction, width: Option<Metre>) -> Lane {
    Lane::Travel {
        direction: Some(direction),
        designated: Designated::Bicycle,
        width,
        max_speed: None,
        access: None,
        turn_markings: None,
    }
}

fn is_lane_or_track(value: &str) -> bool {
    value.eq_ignore_ascii_case("lane") || value.eq_ignore_ascii_case("track")
}

fn is_opposite(value: &str) -> bool {
    value.eq_ignore_ascii_case("opposite_lane") || value.eq_ignore_ascii_case("opposite_track")
}

fn oneway_overridden(tags: &Tags, side: &'static str) -> bool {
    tags.is(CYCLEWAY + side + "oneway", "no") || tags.is("oneway:bicycle", "no")
}

/// `cycleway=*`: the bare, side-agnostic form. Not supported alongside any
/// side-keyed `cycleway:*=*` value.
pub(crate) fn parse(
    tags: &Tags,
    locale: &Locale,
    builder: &mut RoadBuilder,
    warnings: &mut RoadWarnings,
) -> Result<(), RoadError> {
    let bare = tags.get_consume(CYCLEWAY);
    let both = tags.get_consume(CYCLEWAY + "both");
    let left = tags.get_consume(CYCLEWAY + "left");
    let right = tags.get_consume(CYCLEWAY + "right");
    let bare_width = tags.get_consume(CYCLEWAY + "width").and_then(parse_width);
    let both_width = tags
        .get_consume(CYCLEWAY + "both" + "width")
        .and_then(parse_width);
    let left_width = tags
        .get_consume(CYCLEWAY + "left" + "width")
        .and_then(parse_width);
    let right_width = tags
        .get_consume(CYCLEWAY + "right" + "width")
        .and_then(parse_width);

    if let Some(value) = bare {
        if is_lane_or_track(value) {
            if both.is_some() || left.is_some() || right.is_some() {
                return Err(RoadError::unsupported(
                    "cycleway=* is not supported alongside cycleway:*=* values",
                    tags.subset(&[CYCLEWAY]),
                ));
            }
            builder.push_forward_outside(cycle_lane(Direction::Forward, bare_width));
            if bool::from(builder.oneway) {
                if !builder.backward_side.is_empty() {
                    warnings.push(Diagnostic::warning(
                        Code::AmbiguousDirection,
                        "cycleway=* on a oneway road with existing backward lanes adds a forward-only bike lane",
                        tags.subset(&[CYCLEWAY, "oneway".into()]),
                    ));
                }
            } else {
                builder.push_backward_outside(cycle_lane(Direction::Backward, bare_width));
            }
            return Ok(());
        }
        if value.eq_ignore_ascii_case("opposite_lane") {
            warnings.push(Diagnostic::warning(
                Code::DeprecatedTagForm,
                "cycleway=opposite_lane is deprecated, use cycleway:<side>=opposite_lane",
                tags.subset(&[CYCLEWAY]),
            ));
            builder.push_backward_outside(cycle_lane(Direction::Backward, bare_width));
        } else if !value.eq_ignore_ascii_case("no") {
            warnings.push(Diagnostic::warning(
                Code::UnknownValue,
                format!("unrecognized cycleway value {value:?}"),
                tags.subset(&[CYCLEWAY]),
            ));
        }
    }

    if let Some(value) = both {
        if left.is_some() || right.is_some() {
            warnings.push(Diagnostic::warning(
                Code::TagConflict,
                "cycleway:both is overridden by the more specific cycleway:left/right",
                tags.subset(&[CYCLEWAY + "both"]),
            ));
        } else if is_lane_or_track(value) {
            builder.push_forward_outside(cycle_lane(Direction::Forward, both_width));
            builder.push_backward_outside(cycle_lane(Direction::Backward, both_width));
            return Ok(());
        } else if !value.eq_ignore_ascii_case("no") {
            warnings.push(Diagnostic::warning(
                Code::Unimplemented,
                format!("cycleway:both={value} is not implemented"),
                tags.subset(&[CYCLEWAY + "both"]),
            ));
        }
    }

    let driving = locale.driving_side;
    let opposite = driving.opposite();
    let (driving_value, driving_width) = if driving.tag() == "left" {
        (left, left_width)
    } else {
        (right, right_width)
    };
    let (opposite_value, opposite_width) = if driving.tag() == "left" {
        (right, right_width)
    } else {
        (left, left_width)
    };

    if let Some(value) = driving_value {
        if is_lane_or_track(value) {
            if oneway_overridden(tags, driving.tag()) {
                builder.push_forward_outside(cycle_lane(Direction::Both, driving_width));
            } else {
                builder.push_forward_outside(cycle_lane(Direction::Forward, driving_width));
            }
        } else if is_opposite(value) {
            warnings.push(Diagnostic::warning(
                Code::DeprecatedTagForm,
                format!("cycleway:{}=opposite_lane/opposite_track is deprecated", driving.tag()),
                tags.subset(&[CYCLEWAY + driving.tag()]),
            ));
            builder.push_forward_outside(cycle_lane(Direction::Backward, driving_width));
        } else if !value.eq_ignore_ascii_case("no") {
            warnings.push(Diagnostic::warning(
                Code::UnknownValue,
                format!("unrecognized cycleway:{} value {value:?}", driving.tag()),
                tags.subset(&[CYCLEWAY + driving.tag()]),
            ));
        }
    }

    if let Some(value) = opposite_value {
        if is_lane_or_track(value) {
            if oneway_overridden(tags, opposite.tag()) {
                builder.push_backward_outside(cycle_lane(Direction::Both, opposite_width));
            } else if bool::from(builder.oneway) {
                builder.push_forward_inside(cycle_lane(Direction::Forward, opposite_width));
            } else {
                builder.push_backward_outside(cycle_lane(Direction::Backward, opposite_width));
            }
        } else if is_opposite(value) {
            return Err(RoadError::unsupported(
                format!("cycleway:{}=opposite_lane/opposite_track is unsupported", opposite.tag()),
                tags.subset(&[CYCLEWAY + opposite.tag()]),
            ));
        } else if !value.eq_ignore_ascii_case("no") {
            warnings.push(Diagnostic::warning(
                Code::UnknownValue,
                format!("unrecognized cycleway:{} value {value:?}", opposite.tag()),
                tags.subset(&[CYCLEWAY + opposite.tag()]),
            ));
        }
    }

    Ok(())
}
