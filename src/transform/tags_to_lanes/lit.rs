//! `lit` scheme: whether the way is illuminated. A simple tri-state
//! (`yes`/`no`/unknown) carried on [`crate::road::Road`] rather than on
//! individual lanes.

pub(crate) fn parse(tags: &crate::tag::Tags) -> Option<bool> {
    match tags.get_consume("lit") {
        Some("yes") => Some(true),
        Some("no") => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::Tags;

    #[test]
    fn yes_and_no_parse() {
        assert_eq!(parse(&Tags::from_pairs([("lit", "yes")])), Some(true));
        assert_eq!(parse(&Tags::from_pairs([("lit", "no")])), Some(false));
    }

    #[test]
    fn unknown_or_absent_is_none() {
        assert_eq!(parse(&Tags::default()), None);
        assert_eq!(parse(&Tags::from_pairs([("lit", "sunset-sunrise")])), None);
    }
}
