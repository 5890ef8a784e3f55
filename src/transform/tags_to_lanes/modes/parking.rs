//! Parking scheme: `parking:lane:{left,right,both}`, values `parallel`,
//! `diagonal`, `perpendicular`. `left`/`right` name the absolute side of the
//! way, so which assembler side they land on depends on driving side: for
//! right-driving locales the forward lanes sit on the way's right, so
//! `parking:lane:right` attaches to the forward side and `:left` to the
//! backward side (mirrored for left-driving locales).

use crate::locale::{DrivingSide, Locale};
use crate::road::{Designated, Direction, Lane, ParkingOrientation};
use crate::tag::{TagKey, Tags};
use crate::transform::error::{Code, Diagnostic, RoadError, RoadWarnings};
use crate::transform::tags_to_lanes::road::RoadBuilder;

const PARKING_LANE: TagKey = TagKey::from("parking:lane");

fn orientation(value: &str) -> Option<ParkingOrientation> {
    match value {
        "parallel" => Some(ParkingOrientation::Parallel),
        "diagonal" => Some(ParkingOrientation::Diagonal),
        "perpendicular" => Some(ParkingOrientation::Perpendicular),
        _ => None,
    }
}

fn parking_lane(direction: Direction, orientation: ParkingOrientation) -> Lane {
    Lane::Parking {
        direction,
        designated: Designated::Motor,
        orientation,
        width: None,
    }
}

pub(crate) fn parse(
    tags: &Tags,
    locale: &Locale,
    builder: &mut RoadBuilder,
    warnings: &mut RoadWarnings,
) -> Result<(), RoadError> {
    let both = tags.get_consume(PARKING_LANE + "both");
    let left = tags.get_consume(PARKING_LANE + "left");
    let right = tags.get_consume(PARKING_LANE + "right");

    if both.is_some() && (left.is_some() || right.is_some()) {
        warnings.push(Diagnostic::warning(
            Code::TagConflict,
            "parking:lane:both is overridden by the more specific parking:lane:left/right",
            tags.subset(&[PARKING_LANE + "both"]),
        ));
    }

    let left_value = left.or(both);
    let right_value = right.or(both);

    let (forward_value, backward_value) = match locale.driving_side {
        DrivingSide::Right => (right_value, left_value),
        DrivingSide::Left => (left_value, right_value),
    };

    if let Some(value) = forward_value {
        if let Some(orientation) = orientation(value) {
            builder.push_forward_outside(parking_lane(Direction::Forward, orientation));
        } else if value != "no" {
            warnings.push(Diagnostic::warning(
                Code::UnknownValue,
                format!("unrecognized parking:lane value {value:?}"),
                tags.subset(&[PARKING_LANE + "right"]),
            ));
        }
    }
    if let Some(value) = backward_value {
        if let Some(orientation) = orientation(value) {
            builder.push_backward_outside(parking_lane(Direction::Backward, orientation));
        } else if value != "no" {
            warnings.push(Diagnostic::warning(
                Code::UnknownValue,
                format!("unrecognized parking:lane value {value:?}"),
                tags.subset(&[PARKING_LANE + "left"]),
            ));
        }
    }

    Ok(())
}
