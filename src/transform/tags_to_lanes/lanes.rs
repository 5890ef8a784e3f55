//! Lane count scheme: `lanes`, `lanes:forward`, `lanes:backward`,
//! `lanes:both_ways`.

use crate::tag::Tags;
use crate::transform::error::{Code, Diagnostic, RoadError, RoadWarnings};
use crate::transform::tags_to_lanes::road::Oneway;

/// Number of forward/backward motor travel lanes, and whether a shared
/// centre turn lane was requested.
pub(crate) struct LaneCount {
    pub forward: usize,
    pub backward: usize,
    pub centre_turn_lane: bool,
}

fn parse_count(tags: &Tags, key: &'static str) -> Result<Option<usize>, RoadError> {
    match tags.get_consume(key) {
        None => Ok(None),
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(n) if n > 0 => Ok(Some(n as usize)),
            Ok(_) => Err(RoadError::new(Diagnostic::error(
                Code::MalformedLaneCount,
                format!("{key}={raw} must be a positive integer"),
                tags.subset(&[key]),
            ))),
            Err(_) => Err(RoadError::new(Diagnostic::error(
                Code::MalformedLaneCount,
                format!("{key}={raw} is not an integer"),
                tags.subset(&[key]),
            ))),
        },
    }
}

/// # Errors
///
/// `Code::MalformedLaneCount` for non-positive or non-numeric lane counts
/// (e.g. `lanes=0`).
pub(crate) fn parse(
    tags: &Tags,
    oneway: Oneway,
    driving_side_right: bool,
    warnings: &mut RoadWarnings,
) -> Result<LaneCount, RoadError> {
    let both_ways = parse_count(tags, "lanes:both_ways")?.unwrap_or(0);
    let centre_turn_lane = tags.is("centre_turn_lane", "yes") || both_ways >= 1;

    let explicit_forward = parse_count(tags, "lanes:forward")?;
    let explicit_backward = parse_count(tags, "lanes:backward")?;
    let total = parse_count(tags, "lanes")?;

    let (forward, backward) = match (explicit_forward, explicit_backward, total) {
        (Some(f), Some(b), _) => (f, b),
        (Some(f), None, Some(n)) => (f, n.saturating_sub(f).saturating_sub(both_ways)),
        (None, Some(b), Some(n)) => (n.saturating_sub(b).saturating_sub(both_ways), b),
        (Some(f), None, None) => (f, if oneway.into() { 0 } else { 1 }),
        (None, Some(b), None) => (if oneway.into() { b } else { 1 }, b),
        (None, None, Some(n)) => {
            let directional = n.saturating_sub(both_ways);
            if bool::from(oneway) {
                (directional, 0)
            } else if driving_side_right {
                let fwd = (directional + 1) / 2;
                (fwd, directional.saturating_sub(fwd))
            } else {
                let back = (directional + 1) / 2;
                (directional.saturating_sub(back), back)
            }
        },
        (None, None, None) => {
            if bool::from(oneway) {
                (1, 0)
            } else {
                (1, 1)
            }
        },
    };

    if bool::from(oneway) && backward > 0 {
        warnings.push(Diagnostic::warning(
            Code::InconsistentOneway,
            format!("oneway road but {backward} backward lane(s) were derived from tags"),
            tags.subset(&["lanes", "lanes:backward", "oneway"]),
        ));
    }

    Ok(LaneCount {
        forward,
        backward,
        centre_turn_lane,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tags_default_two_way_one_lane() {
        let tags = Tags::default();
        let mut warnings = RoadWarnings::default();
        let count = parse(&tags, Oneway::No, true, &mut warnings).unwrap();
        assert_eq!((count.forward, count.backward), (1, 1));
    }

    #[test]
    fn oneway_defaults_all_forward() {
        let tags = Tags::default();
        let mut warnings = RoadWarnings::default();
        let count = parse(&tags, Oneway::Yes, true, &mut warnings).unwrap();
        assert_eq!((count.forward, count.backward), (1, 0));
    }

    #[test]
    fn splits_even_lanes_right_driving() {
        let tags = Tags::from_pairs([("lanes", "4")]);
        let mut warnings = RoadWarnings::default();
        let count = parse(&tags, Oneway::No, true, &mut warnings).unwrap();
        assert_eq!((count.forward, count.backward), (2, 2));
    }

    #[test]
    fn centre_turn_lane_from_both_ways() {
        let tags = Tags::from_pairs([("lanes", "3"), ("lanes:both_ways", "1")]);
        let mut warnings = RoadWarnings::default();
        let count = parse(&tags, Oneway::No, true, &mut warnings).unwrap();
        assert!(count.centre_turn_lane);
        assert_eq!((count.forward, count.backward), (1, 1));
    }

    #[test]
    fn odd_lanes_with_explicit_centre_turn_lane_favors_forward_right_driving() {
        let tags = Tags::from_pairs([("lanes", "3"), ("centre_turn_lane", "yes")]);
        let mut warnings = RoadWarnings::default();
        let count = parse(&tags, Oneway::No, true, &mut warnings).unwrap();
        assert!(count.centre_turn_lane);
        assert_eq!((count.forward, count.backward), (2, 1));
    }

    #[test]
    fn odd_lanes_favors_backward_left_driving() {
        let tags = Tags::from_pairs([("lanes", "3")]);
        let mut warnings = RoadWarnings::default();
        let count = parse(&tags, Oneway::No, false, &mut warnings).unwrap();
        assert_eq!((count.forward, count.backward), (1, 2));
    }

    #[test]
    fn bare_lanes_3_does_not_infer_centre() {
        let tags = Tags::from_pairs([("lanes", "3")]);
        let mut warnings = RoadWarnings::default();
        let count = parse(&tags, Oneway::No, true, &mut warnings).unwrap();
        assert!(!count.centre_turn_lane);
    }

    #[test]
    fn zero_lanes_errors() {
        let tags = Tags::from_pairs([("lanes", "0")]);
        let mut warnings = RoadWarnings::default();
        assert!(parse(&tags, Oneway::No, true, &mut warnings).is_err());
    }

    #[test]
    fn minus_one_lanes_two() {
        let tags = Tags::from_pairs([("lanes", "2")]);
        let mut warnings = RoadWarnings::default();
        let count = parse(&tags, Oneway::Yes, true, &mut warnings).unwrap();
        assert_eq!((count.forward, count.backward), (2, 0));
    }
}
