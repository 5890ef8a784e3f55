//! Oneway scheme: `oneway`, `junction=roundabout`, and the `-1` reversal
//! rewrite.

use crate::tag::Tags;
use crate::transform::error::{Code, Diagnostic, RoadError, RoadWarnings};
pub(crate) use crate::transform::tags_to_lanes::road::Oneway;
use crate::transform::tags::ONEWAY;

/// Parsed result of the oneway scheme: whether the road is one-directional,
/// and whether `oneway=-1` was given, in which case every `Forward` in the
/// final lane list is rewritten to `Backward`.
pub(crate) struct OnewayScheme {
    pub oneway: Oneway,
    pub reversed: bool,
}

/// # Errors
///
/// Mixing `oneway=yes` with a nonzero `lanes:backward` is only reported as a
/// warning (`Code::InconsistentOneway`); `oneway=reversible` is the one
/// value that is unsupported and errors.
pub(crate) fn parse(tags: &Tags, warnings: &mut RoadWarnings) -> Result<OnewayScheme, RoadError> {
    let (oneway, reversed) = match tags.get_consume("oneway") {
        Some("yes") | Some("true") | Some("1") => (true, false),
        Some("-1") => (true, true),
        Some("no") | Some("false") | Some("0") | None => (false, false),
        Some("reversible") => {
            return Err(RoadError::new(Diagnostic::error(
                Code::Unsupported,
                "oneway=reversible is not supported: direction depends on time-of-day signage",
                tags.subset(&[ONEWAY]),
            )));
        },
        Some(other) => {
            warnings.push(Diagnostic::warning(
                Code::UnknownValue,
                format!("unrecognized oneway value {other:?}, treating as no"),
                tags.subset(&[ONEWAY]),
            ));
            (false, false)
        },
    };
    let roundabout = tags.is("junction", "roundabout");
    if roundabout && tags.get("oneway") == Some("no") {
        warnings.push(Diagnostic::warning(
            Code::TagConflict,
            "junction=roundabout implies oneway, but oneway=no was given explicitly",
            tags.subset(&[ONEWAY, "junction".into()]),
        ));
    }
    let oneway = oneway || roundabout;

    if !oneway && tags.get("lanes:backward").is_some() && tags.get("lanes:forward").is_some() {
        // not actually a conflict, just both directions given explicitly; no warning
    } else if oneway && (tags.get("lanes:backward").is_some() || tags.get("oneway") == Some("yes"))
        && tags.get("lanes:backward").map_or(false, |n| n != "0")
    {
        warnings.push(Diagnostic::warning(
            Code::InconsistentOneway,
            "oneway=yes but lanes:backward is set to a nonzero count",
            tags.subset(&[ONEWAY, "lanes:backward".into()]),
        ));
    }

    Ok(OnewayScheme {
        oneway: Oneway::from(oneway),
        reversed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_yes() {
        let tags = Tags::from_pairs([("oneway", "yes")]);
        let mut warnings = RoadWarnings::default();
        let scheme = parse(&tags, &mut warnings).unwrap();
        assert_eq!(scheme.oneway, Oneway::Yes);
        assert!(!scheme.reversed);
    }

    #[test]
    fn minus_one_marks_reversed() {
        let tags = Tags::from_pairs([("oneway", "-1")]);
        let mut warnings = RoadWarnings::default();
        let scheme = parse(&tags, &mut warnings).unwrap();
        assert_eq!(scheme.oneway, Oneway::Yes);
        assert!(scheme.reversed);
    }

    #[test]
    fn roundabout_implies_oneway() {
        let tags = Tags::from_pairs([("junction", "roundabout")]);
        let mut warnings = RoadWarnings::default();
        let scheme = parse(&tags, &mut warnings).unwrap();
        assert_eq!(scheme.oneway, Oneway::Yes);
    }

    #[test]
    fn inconsistent_oneway_warns() {
        let tags = Tags::from_pairs([("oneway", "yes"), ("lanes:backward", "1")]);
        let mut warnings = RoadWarnings::default();
        parse(&tags, &mut warnings).unwrap();
        assert!(!warnings.is_empty());
    }
}
