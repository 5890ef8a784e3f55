//! Highway class scheme: `highway=*`.

use crate::road::HighwayClass;
use crate::tag::Tags;
use crate::transform::error::{Code, Diagnostic, RoadError};
use crate::transform::tags::HIGHWAY;

/// Parse the `highway` tag into a [`HighwayClass`].
///
/// # Errors
///
/// `Code::UnknownHighwayClass` if `highway` is present but not one of the
/// recognized values.
pub(crate) fn parse(tags: &Tags) -> Result<Option<HighwayClass>, RoadError> {
    match tags.get_consume("highway") {
        None => Ok(None),
        Some(value) => HighwayClass::parse(value).map(Some).ok_or_else(|| {
            RoadError::new(Diagnostic::error(
                Code::UnknownHighwayClass,
                format!("unrecognized highway class {value:?}"),
                tags.subset(&[HIGHWAY]),
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_residential() {
        let tags = Tags::from_pairs([("highway", "residential")]);
        assert_eq!(parse(&tags).unwrap(), Some(HighwayClass::Residential));
    }

    #[test]
    fn rejects_unknown_class() {
        let tags = Tags::from_pairs([("highway", "skyway")]);
        assert!(parse(&tags).is_err());
    }

    #[test]
    fn absent_is_none() {
        let tags = Tags::default();
        assert_eq!(parse(&tags).unwrap(), None);
    }
}
