//! Tags-to-Lanes transform: the forward direction of the pipeline, wiring
//! the highway/oneway/lane-count schemes, the non-motorized short circuits,
//! the per-mode inside-out assembler, the per-lane overrides, and finally
//! the separator placer into one `tags_to_lanes` call.

pub(crate) mod access;
pub(crate) mod highway;
pub(crate) mod lanes;
pub(crate) mod lit;
pub(crate) mod modes;
pub(crate) mod oneway;
pub(crate) mod overrides;
pub(crate) mod road;
pub(crate) mod speed;
pub(crate) mod width;

use log::debug;

use crate::locale::{DrivingSide, Locale};
use crate::road::{Designated, Direction, HighwayClass, Lane, Road};
use crate::tag::Tags;
use crate::transform::error::{Code, Diagnostic, RoadError, RoadWarnings};
use crate::transform::separator;
use road::RoadBuilder;

/// Tag key prefixes this crate owns a scheme for, used to tell a genuinely
/// unrecognized tag (silently tolerated) apart from a recognized one nobody
/// consumed (`Code::UnconsumedKnownTag`).
const RECOGNIZED_PREFIXES: &[&str] = &[
    "highway",
    "lanes",
    "oneway",
    "junction",
    "centre_turn_lane",
    "cycleway",
    "sidewalk",
    "shoulder",
    "busway",
    "parking",
    "bus",
    "psv",
    "bicycle",
    "vehicle",
    "turn",
    "width",
    "maxspeed",
    "access",
    "foot",
    "motor_vehicle",
    "taxi",
    "lit",
    "name",
];

/// Options controlling how [`tags_to_lanes`] fills in ambiguous or absent
/// input.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Insert `Separator` lanes between adjacent travel lanes and at road
    /// edges. Default `true`.
    pub include_separators: bool,
    /// Emit a default shoulder on motorized roads with no sidewalk/shoulder
    /// tagging. Default `true`.
    pub include_shoulders: bool,
    /// Apply locale defaults (shoulder emission, among others) when a scheme
    /// is silent rather than leaving the road's cross section exactly as
    /// tagged. Default `true`.
    pub infer_defaults: bool,
    /// Promote accumulated warnings to a fatal `RoadError`. Default `false`.
    pub error_on_warnings: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            include_separators: true,
            include_shoulders: true,
            infer_defaults: true,
            error_on_warnings: false,
        }
    }
}

fn seed_travel_lanes(builder: &mut RoadBuilder, count: &lanes::LaneCount) {
    for _ in 0..count.forward {
        builder.push_forward_outside(Lane::Travel {
            direction: Some(Direction::Forward),
            designated: Designated::Motor,
            width: None,
            max_speed: None,
            access: None,
            turn_markings: None,
        });
    }
    for _ in 0..count.backward {
        builder.push_backward_outside(Lane::Travel {
            direction: Some(Direction::Backward),
            designated: Designated::Motor,
            width: None,
            max_speed: None,
            access: None,
            turn_markings: None,
        });
    }
    if count.centre_turn_lane {
        builder.push_forward_inside(Lane::Travel {
            direction: Some(Direction::Both),
            designated: Designated::Motor,
            width: None,
            max_speed: None,
            access: None,
            turn_markings: None,
        });
    }
}

/// `oneway=-1` rewrite: the road is treated as oneway, with every `Forward`
/// direction in the final lane list replaced by `Backward`.
fn apply_reversal(lanes: &mut [Lane]) {
    for lane in lanes.iter_mut() {
        match lane {
            Lane::Travel {
                direction: d @ Some(Direction::Forward),
                ..
            } => *d = Some(Direction::Backward),
            Lane::Parking {
                direction: d @ Direction::Forward,
                ..
            } => *d = Direction::Backward,
            _ => {},
        }
    }
}

fn unconsumed_known_tag_warnings(tags: &Tags, warnings: &mut RoadWarnings) {
    for key in tags.unused() {
        let prefix = key.split(':').next().unwrap_or(&key);
        if RECOGNIZED_PREFIXES.contains(&prefix) {
            warnings.push(Diagnostic::warning(
                Code::UnconsumedKnownTag,
                format!("{key} is a recognized tag but was not consumed by any scheme"),
                tags.subset(&[key.clone()]),
            ));
        }
    }
}

fn other_attrs(tags: &Tags) -> Tags {
    let unused: Vec<String> = tags
        .unused()
        .into_iter()
        .filter(|key| {
            let prefix = key.split(':').next().unwrap_or(key);
            !RECOGNIZED_PREFIXES.contains(&prefix)
        })
        .collect();
    tags.subset(&unused)
}

/// Parse an OSM way's tags into a left-to-right cross section of lanes.
///
/// # Errors
///
/// Returns `RoadError` for structurally malformed input (unknown highway
/// class, non-positive lane count, unparseable width/speed, unsupported
/// scheme combinations), or if `config.error_on_warnings` is set and any
/// warning was accumulated.
pub fn tags_to_lanes(
    tags: &Tags,
    locale: &Locale,
    config: &Config,
) -> Result<(Road, RoadWarnings), RoadError> {
    let mut warnings = RoadWarnings::default();
    let name = tags.get_consume("name").map(str::to_owned);

    let highway_class = highway::parse(tags).map_err(|e| e.with_partial_warnings(&warnings))?;
    let oneway_scheme =
        oneway::parse(tags, &mut warnings).map_err(|e| e.with_partial_warnings(&warnings))?;
    let driving_side_right = locale.driving_side == DrivingSide::Right;

    let mut builder = RoadBuilder::new(oneway_scheme.oneway);

    let short_circuited =
        modes::non_motorized::try_build(tags, highway_class, &mut builder, &mut warnings);

    if !short_circuited {
        let count = lanes::parse(tags, oneway_scheme.oneway, driving_side_right, &mut warnings)
            .map_err(|e| e.with_partial_warnings(&warnings))?;
        debug!(
            "lane count: {} forward, {} backward, centre_turn_lane={}",
            count.forward, count.backward, count.centre_turn_lane
        );
        seed_travel_lanes(&mut builder, &count);

        modes::bus::parse(tags, locale, &mut builder, &mut warnings)
            .map_err(|e| e.with_partial_warnings(&warnings))?;
        modes::parking::parse(tags, locale, &mut builder, &mut warnings)
            .map_err(|e| e.with_partial_warnings(&warnings))?;
        modes::bicycle::parse(tags, locale, &mut builder, &mut warnings)
            .map_err(|e| e.with_partial_warnings(&warnings))?;
        modes::foot_shoulder::parse(
            tags,
            locale,
            highway_class,
            config.include_shoulders && config.infer_defaults,
            &mut builder,
            &mut warnings,
        );

        overrides::parse_directional(tags, &mut builder, &mut warnings);
        speed::parse(tags, &mut builder, &mut warnings)
            .map_err(|e| e.with_partial_warnings(&warnings))?;
        access::parse(tags, &mut builder);
    }

    let mut flat = builder.into_ltr(locale);
    if oneway_scheme.reversed {
        apply_reversal(&mut flat);
    }

    if !short_circuited {
        overrides::parse_undirected(tags, &mut flat, &mut warnings);
        width::parse(tags, &mut flat).map_err(|e| e.with_partial_warnings(&warnings))?;
    }

    let lit = lit::parse(tags);

    let lanes_out = if config.include_separators && highway_class != Some(HighwayClass::Construction) {
        separator::place(flat, locale)
    } else {
        flat
    };

    unconsumed_known_tag_warnings(tags, &mut warnings);
    let road = Road {
        name,
        highway_class,
        lanes: lanes_out,
        lit,
        other_attrs: other_attrs(tags),
    };

    if config.error_on_warnings && !warnings.is_empty() {
        return Err(RoadError::from(warnings));
    }

    Ok((road, warnings))
}
