//! Shared tag-key constants used by more than one scheme parser.

use crate::tag::TagKey;

pub const HIGHWAY: TagKey = TagKey::from("highway");
pub const CYCLEWAY: TagKey = TagKey::from("cycleway");
pub const SIDEWALK: TagKey = TagKey::from("sidewalk");
pub const ONEWAY: TagKey = TagKey::from("oneway");
pub const WIDTH: TagKey = TagKey::from("width");
pub const MAXSPEED: TagKey = TagKey::from("maxspeed");
