//! Sidewalk scheme: `sidewalk`, `sidewalk:left`, `sidewalk:right`,
//! `sidewalk:both`. `none`/absence produces a shoulder instead, per
//! `include_shoulders`. Like `parking:lane`, side keys name the absolute
//! side of the way and are mapped onto the forward/backward assembler sides
//! by driving side.

use crate::locale::{DrivingSide, Locale};
use crate::metric::{parse_width, Metre};
use crate::road::{Designated, HighwayClass, Lane};
use crate::tag::Tags;
use crate::transform::error::{Code, Diagnostic, RoadWarnings};
use crate::transform::tags::SIDEWALK;
use crate::transform::tags_to_lanes::road::RoadBuilder;

fn foot_lane(width: Option<Metre>) -> Lane {
    Lane::Travel {
        direction: None,
        designated: Designated::Foot,
        width,
        max_speed: None,
        access: None,
        turn_markings: None,
    }
}

fn shoulder_lane() -> Lane {
    Lane::Shoulder { width: None }
}

fn bare_sides(value: &str) -> (bool, bool) {
    match value {
        "both" => (true, true),
        "left" => (true, false),
        "right" => (false, true),
        _ => (false, false),
    }
}

/// `highway` classes that never get a default shoulder, per spec's resolved
/// open question: `include_shoulders` only applies to motorized classes.
fn wants_shoulder_by_default(highway_class: Option<HighwayClass>) -> bool {
    match highway_class {
        Some(class) => class.is_motorized(),
        None => true,
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn parse(
    tags: &Tags,
    locale: &Locale,
    highway_class: Option<HighwayClass>,
    include_shoulders: bool,
    builder: &mut RoadBuilder,
    warnings: &mut RoadWarnings,
) {
    let bare = tags.get_consume(SIDEWALK);
    let side_both = tags.get_consume(SIDEWALK + "both");
    let side_left = tags.get_consume(SIDEWALK + "left");
    let side_right = tags.get_consume(SIDEWALK + "right");
    let width = tags.get_consume(SIDEWALK + "width").and_then(parse_width);

    if bare.is_some() && (side_both.is_some() || side_left.is_some() || side_right.is_some()) {
        warnings.push(Diagnostic::warning(
            Code::TagConflict,
            "sidewalk=* is overridden by the more specific sidewalk:left/right/both",
            tags.subset(&[SIDEWALK]),
        ));
    }

    let (bare_left, bare_right) = match bare {
        Some(value @ ("both" | "left" | "right")) => bare_sides(value),
        Some("no" | "none" | "separate") | None => (false, false),
        Some(other) => {
            warnings.push(Diagnostic::warning(
                Code::UnknownValue,
                format!("unrecognized sidewalk value {other:?}"),
                tags.subset(&[SIDEWALK]),
            ));
            (false, false)
        },
    };

    let side_value = |side: Option<&str>, bare_default: bool| -> bool {
        match side.or(side_both) {
            Some("yes") => true,
            Some(_) => false,
            None => bare_default,
        }
    };
    let left_has_sidewalk = side_value(side_left, bare_left);
    let right_has_sidewalk = side_value(side_right, bare_right);

    let (forward_has, backward_has) = match locale.driving_side {
        DrivingSide::Right => (right_has_sidewalk, left_has_sidewalk),
        DrivingSide::Left => (left_has_sidewalk, right_has_sidewalk),
    };

    if forward_has {
        builder.push_forward_outside(foot_lane(width));
    }
    if backward_has {
        builder.push_backward_outside(foot_lane(width));
    }

    let shoulders_wanted =
        include_shoulders && wants_shoulder_by_default(highway_class) && !tags.is("shoulder", "no");
    tags.consume("shoulder");

    if shoulders_wanted {
        if !forward_has {
            builder.push_forward_outside(shoulder_lane());
        }
        if !backward_has && !bool::from(builder.oneway) {
            builder.push_backward_outside(shoulder_lane());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::tags_to_lanes::road::Oneway;

    #[test]
    fn both_sides_add_foot_lanes() {
        let tags = Tags::from_pairs([("sidewalk", "both")]);
        let locale = Locale::builder().build();
        let mut builder = RoadBuilder::new(Oneway::No);
        let mut warnings = RoadWarnings::default();
        parse(&tags, &locale, Some(HighwayClass::Residential), true, &mut builder, &mut warnings);
        assert!(builder.forward_side[0].is_foot());
        assert!(builder.backward_side[0].is_foot());
    }

    #[test]
    fn none_defaults_to_shoulders_on_motorized() {
        let tags = Tags::from_pairs([("sidewalk", "none")]);
        let locale = Locale::builder().build();
        let mut builder = RoadBuilder::new(Oneway::No);
        let mut warnings = RoadWarnings::default();
        parse(&tags, &locale, Some(HighwayClass::Residential), true, &mut builder, &mut warnings);
        assert!(builder.forward_side[0].is_shoulder());
        assert!(builder.backward_side[0].is_shoulder());
    }

    #[test]
    fn shoulder_no_suppresses_default() {
        let tags = Tags::from_pairs([("shoulder", "no")]);
        let locale = Locale::builder().build();
        let mut builder = RoadBuilder::new(Oneway::No);
        let mut warnings = RoadWarnings::default();
        parse(&tags, &locale, Some(HighwayClass::Residential), true, &mut builder, &mut warnings);
        assert!(builder.forward_side.is_empty());
        assert!(builder.backward_side.is_empty());
    }

    #[test]
    fn footway_does_not_default_to_shoulders() {
        let tags = Tags::default();
        let locale = Locale::builder().build();
        let mut builder = RoadBuilder::new(Oneway::No);
        let mut warnings = RoadWarnings::default();
        parse(&tags, &locale, Some(HighwayClass::Footway), true, &mut builder, &mut warnings);
        assert!(builder.forward_side.is_empty());
    }

    #[test]
    fn oneway_gets_forward_shoulder_only() {
        let tags = Tags::default();
        let locale = Locale::builder().build();
        let mut builder = RoadBuilder::new(Oneway::Yes);
        let mut warnings = RoadWarnings::default();
        parse(&tags, &locale, Some(HighwayClass::Residential), true, &mut builder, &mut warnings);
        assert_eq!(builder.forward_side.len(), 1);
        assert!(builder.backward_side.is_empty());
    }
}
