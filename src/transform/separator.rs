//! Separator Placer: walks an assembled lane list and inserts a
//! [`Lane::Separator`] between every adjacent non-separator pair and at
//! each end, choosing marking style from the direction/designation
//! adjacency of its two neighbors and the locale.

use crate::locale::Locale;
use crate::road::{Color, Designated, Direction, Lane, Markings, Semantic, Style, DEFAULT_MARKING_WIDTH};

fn separator_lane(semantic: Semantic, markings: Markings) -> Lane {
    Lane::Separator { semantic, markings }
}

fn road_edge(neighbor: Option<&Lane>) -> Lane {
    let markings = match neighbor {
        Some(Lane::Shoulder { .. }) => Markings::single(Style::SolidLine),
        _ => Markings(Vec::new()),
    };
    separator_lane(Semantic::Shoulder, markings)
}

/// Choose the semantic and markings for the boundary between two adjacent
/// non-separator lanes.
fn between(left: &Lane, right: &Lane, locale: &Locale) -> Lane {
    let left_motor_dir = match left {
        Lane::Travel {
            designated: Designated::Motor | Designated::Any,
            direction,
            ..
        } => *direction,
        _ => None,
    };
    let right_motor_dir = match right {
        Lane::Travel {
            designated: Designated::Motor | Designated::Any,
            direction,
            ..
        } => *direction,
        _ => None,
    };

    if let (Some(l), Some(r)) = (left_motor_dir, right_motor_dir) {
        let opposing = matches!(
            (l, r),
            (Direction::Forward, Direction::Backward) | (Direction::Backward, Direction::Forward)
        );
        if opposing {
            return separator_lane(
                Semantic::Centre,
                Markings::double(Style::DoubleSolid, locale.centre_line_color()),
            );
        }
        return separator_lane(
            Semantic::Lane,
            Markings::single(Style::BrokenLine),
        );
    }

    if left.is_bicycle() != right.is_bicycle() && (left.is_bicycle() || left.is_motor())
        && (right.is_bicycle() || right.is_motor())
    {
        return separator_lane(
            Semantic::Modal,
            Markings::single(Style::SolidLine).with_color_white(),
        );
    }

    if left.is_shoulder() || left.is_foot() || right.is_shoulder() || right.is_foot() {
        return separator_lane(Semantic::Shoulder, Markings::single(Style::SolidLine));
    }

    separator_lane(Semantic::Lane, Markings::single(Style::SolidLine))
}

trait MarkingsExt {
    fn with_color_white(self) -> Self;
}

impl MarkingsExt for Markings {
    fn with_color_white(mut self) -> Self {
        for marking in &mut self.0 {
            if marking.color.is_none() {
                marking.color = Some(Color::White);
            }
            if marking.width.is_none() {
                marking.width = Some(DEFAULT_MARKING_WIDTH);
            }
        }
        self
    }
}

/// Insert separators into an already left-to-right-ordered lane list.
#[must_use]
pub(crate) fn place(lanes: Vec<Lane>, locale: &Locale) -> Vec<Lane> {
    if lanes.is_empty() {
        return lanes;
    }
    let mut out = Vec::with_capacity(lanes.len() * 2 + 1);
    out.push(road_edge(lanes.first()));
    for window in lanes.windows(2) {
        out.push(window[0].clone());
        out.push(between(&window[0], &window[1], locale));
    }
    out.push(lanes.last().expect("checked non-empty above").clone());
    out.push(road_edge(lanes.last()));
    out
}
