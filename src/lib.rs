//! Transforms the free-form tags of an OpenStreetMap way into an ordered,
//! left-to-right cross section of lanes, and back again.
//!
//! The core pipeline lives in [`transform`]: [`transform::tags_to_lanes`]
//! parses the recognized OSM tagging schemes and assembles a [`road::Road`];
//! [`transform::lanes_to_tags`] is the inverse projection.

pub mod locale;
pub mod metric;
pub mod road;
pub mod tag;
pub mod transform;
