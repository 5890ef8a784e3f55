//! End-to-end scenarios over the public `tags_to_lanes`/`lanes_to_tags` API,
//! run through `serde_json` to pin down the documented wire shape rather
//! than constructing `Lane` literals by hand.

mod common;

use osm2lanes::locale::Locale;
use osm2lanes::road::Designated;
use osm2lanes::tag::Tags;
use osm2lanes::transform::error::Code;
use osm2lanes::transform::tags_to_lanes::{tags_to_lanes, Config};

fn non_separator_types(road_json: &serde_json::Value) -> Vec<String> {
    road_json["lanes"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|lane| lane["type"] != "separator")
        .map(|lane| lane["type"].as_str().unwrap().to_owned())
        .collect()
}

#[test]
fn oneway_sidewalk_left_cycleway() {
    common::init_logging();
    let tags = Tags::from_pairs([
        ("lanes", "2"),
        ("oneway", "yes"),
        ("sidewalk", "both"),
        ("cycleway:left", "lane"),
    ]);
    let locale = Locale::builder().build();
    let (road, _warnings) = tags_to_lanes(&tags, &locale, &Config::default()).unwrap();
    let value = serde_json::to_value(&road).unwrap();

    // sidewalk=both on both sides means no default shoulder is ever
    // considered, so all 5 non-separator lanes are the `Travel` variant;
    // they're told apart by `designated`, not `type`.
    let types = non_separator_types(&value);
    assert_eq!(types, vec!["travel", "travel", "travel", "travel", "travel"]);

    let lanes = value["lanes"].as_array().unwrap();
    let non_sep: Vec<&serde_json::Value> = lanes.iter().filter(|l| l["type"] != "separator").collect();
    assert_eq!(non_sep[0]["designated"], "foot");
    assert_eq!(non_sep[1]["designated"], "bicycle");
    assert_eq!(non_sep[2]["designated"], "motor_vehicle");
    assert_eq!(non_sep[3]["designated"], "motor_vehicle");
    assert_eq!(non_sep[4]["designated"], "foot");
}

#[test]
fn residential_four_lane_parking_both() {
    common::init_logging();
    let tags = Tags::from_pairs([
        ("highway", "residential"),
        ("lanes", "4"),
        ("sidewalk", "none"),
        ("parking:lane:both", "parallel"),
    ]);
    let locale = Locale::builder().build();
    let (road, _warnings) = tags_to_lanes(&tags, &locale, &Config::default()).unwrap();
    let non_sep: Vec<_> = road.lanes.iter().filter(|l| !l.is_separator()).collect();

    assert!(non_sep[0].is_shoulder());
    assert_eq!(non_sep[1].designated(), Some(Designated::Motor));
    assert_eq!(non_sep[non_sep.len() - 1].designated(), None);
    let motor_count = non_sep.iter().filter(|l| l.is_motor()).count();
    assert_eq!(motor_count, 4);
    assert!(non_sep.last().unwrap().is_shoulder());
}

#[test]
fn three_lanes_with_centre_turn_lane() {
    common::init_logging();
    let tags = Tags::from_pairs([("lanes", "3"), ("centre_turn_lane", "yes"), ("shoulder", "no")]);
    let locale = Locale::builder().build();
    let (road, _warnings) = tags_to_lanes(&tags, &locale, &Config::default()).unwrap();
    let non_sep: Vec<_> = road.lanes.iter().filter(|l| !l.is_separator()).collect();

    use osm2lanes::road::Direction;
    let centre_count = non_sep
        .iter()
        .filter(|l| l.direction() == Some(Direction::Both))
        .count();
    assert_eq!(centre_count, 1);
    let forward_count = non_sep
        .iter()
        .filter(|l| l.direction() == Some(Direction::Forward))
        .count();
    let backward_count = non_sep
        .iter()
        .filter(|l| l.direction() == Some(Direction::Backward))
        .count();
    // lanes=3 plus an explicit centre_turn_lane is never inferred from the
    // bare count alone (it takes the explicit tag), and the 3 splits across
    // both directions with at least one lane each.
    assert_eq!(forward_count + backward_count, 3);
    assert!(forward_count >= 1 && backward_count >= 1);
}

#[test]
fn reversed_oneway_is_all_backward() {
    common::init_logging();
    let tags = Tags::from_pairs([("oneway", "-1"), ("lanes", "2"), ("shoulder", "no")]);
    let locale = Locale::builder().build();
    let (road, _warnings) = tags_to_lanes(&tags, &locale, &Config::default()).unwrap();
    let non_sep: Vec<_> = road.lanes.iter().filter(|l| !l.is_separator()).collect();
    use osm2lanes::road::Direction;
    assert_eq!(non_sep.len(), 2);
    assert!(non_sep.iter().all(|l| l.direction() == Some(Direction::Backward)));
}

#[test]
fn construction_is_a_single_bare_lane() {
    common::init_logging();
    let tags = Tags::from_pairs([("highway", "construction"), ("lanes", "2")]);
    let locale = Locale::builder().build();
    let (road, warnings) = tags_to_lanes(&tags, &locale, &Config::default()).unwrap();
    assert_eq!(road.lanes.len(), 1);
    assert!(!road.lanes[0].is_separator());
    assert!(warnings.iter().any(|d| d.code == Code::UnconsumedKnownTag));
}

#[test]
fn bus_lanes_by_index() {
    common::init_logging();
    let tags = Tags::from_pairs([("lanes", "2"), ("bus:lanes", "designated|no"), ("shoulder", "no")]);
    let locale = Locale::builder().build();
    let (road, _warnings) = tags_to_lanes(&tags, &locale, &Config::default()).unwrap();
    let non_sep: Vec<_> = road.lanes.iter().filter(|l| !l.is_separator()).collect();
    assert_eq!(non_sep[0].designated(), Some(Designated::Bus));
    assert_eq!(non_sep[1].designated(), Some(Designated::Motor));
}

#[test]
fn empty_tags_default_to_one_lane_each_way() {
    common::init_logging();
    let tags = Tags::default();
    let locale = Locale::builder().build();
    let (road, warnings) = tags_to_lanes(&tags, &locale, &Config::default()).unwrap();
    assert!(warnings.is_empty());
    let motor_count = road.lanes.iter().filter(|l| l.is_motor()).count();
    assert_eq!(motor_count, 2);
}

#[test]
fn zero_lanes_is_a_malformed_lane_count_error() {
    common::init_logging();
    let tags = Tags::from_pairs([("lanes", "0")]);
    let locale = Locale::builder().build();
    let err = tags_to_lanes(&tags, &locale, &Config::default()).unwrap_err();
    assert_eq!(err.diagnostic.code, Code::MalformedLaneCount);
}

#[test]
fn negative_width_is_an_error() {
    common::init_logging();
    let tags = Tags::from_pairs([("width", "-1")]);
    let locale = Locale::builder().build();
    let err = tags_to_lanes(&tags, &locale, &Config::default()).unwrap_err();
    assert_eq!(err.diagnostic.code, Code::NegativeWidth);
}

#[test]
fn oneway_with_explicit_backward_lanes_warns_inconsistent() {
    common::init_logging();
    let tags = Tags::from_pairs([("oneway", "yes"), ("lanes:backward", "1")]);
    let locale = Locale::builder().build();
    let (_road, warnings) = tags_to_lanes(&tags, &locale, &Config::default()).unwrap();
    assert!(warnings.iter().any(|d| d.code == Code::InconsistentOneway));
}
