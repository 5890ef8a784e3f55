//! Bare `width` scheme: a single value applied to every motor travel lane
//! that didn't already get a more specific width from a mode scheme or
//! `width:lanes`. `cycleway:width`/`sidewalk:width` are consumed directly by
//! `modes::bicycle`/`modes::foot_shoulder`; `width:lanes` by `overrides`.

use crate::metric::parse_width;
use crate::road::{Designated, Lane};
use crate::tag::Tags;
use crate::transform::error::{Code, Diagnostic, RoadError};
use crate::transform::tags::WIDTH;

/// # Errors
///
/// `Code::UnitParseFailure` if `width` can't be parsed; `Code::NegativeWidth`
/// if it parses to a negative value.
pub(crate) fn parse(tags: &Tags, lanes: &mut [Lane]) -> Result<(), RoadError> {
    let Some(raw) = tags.get_consume(WIDTH) else {
        return Ok(());
    };
    let Some(width) = parse_width(raw) else {
        return Err(RoadError::new(Diagnostic::error(
            Code::UnitParseFailure,
            format!("width={raw} could not be parsed"),
            tags.subset(&[WIDTH]),
        )));
    };
    if width.val() < 0.0 {
        return Err(RoadError::new(Diagnostic::error(
            Code::NegativeWidth,
            format!("width={raw} is negative"),
            tags.subset(&[WIDTH]),
        )));
    }
    for lane in lanes.iter_mut() {
        if let Lane::Travel {
            width: w @ None,
            designated: Designated::Motor,
            ..
        } = lane
        {
            *w = Some(width);
        }
    }
    Ok(())
}
