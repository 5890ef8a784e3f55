//! Access scheme: `access`, `bicycle`, `foot`, `motor_vehicle`, `bus`,
//! `psv`. Per-mode values fall back to the bare `access` value when absent,
//! and the resulting [`Access`] is applied uniformly to every travel lane.
//! `:lanes` variants are per-lane and out of scope for this parser (none of
//! the example corpus's sources implement them either).

use crate::road::{Access, AccessValue, Lane};
use crate::tag::Tags;
use crate::transform::tags_to_lanes::road::RoadBuilder;

pub(crate) fn parse(tags: &Tags, builder: &mut RoadBuilder) {
    let general = tags.get_consume("access").and_then(AccessValue::parse);
    let foot = tags.get_consume("foot").and_then(AccessValue::parse).or(general);
    let bicycle = tags.get_consume("bicycle").and_then(AccessValue::parse).or(general);
    let motor = tags.get_consume("motor_vehicle").and_then(AccessValue::parse).or(general);
    let bus = tags.get_consume("bus").and_then(AccessValue::parse).or(general);
    let psv = tags.get_consume("psv").and_then(AccessValue::parse).or(general);
    let taxi = tags.get_consume("taxi").and_then(AccessValue::parse).or(general);

    if [foot, bicycle, motor, bus, psv, taxi].iter().all(Option::is_none) {
        return;
    }

    let access = Access {
        foot,
        bicycle,
        motor,
        bus,
        psv,
        taxi,
    };
    for side in [&mut builder.forward_side, &mut builder.backward_side] {
        for lane in side.iter_mut() {
            if let Lane::Travel { access: a, .. } = lane {
                *a = Some(access.clone());
            }
        }
    }
}
