//! The inside-out assembler's scratch state: two stacks of lanes growing
//! outward from the centreline.

use crate::locale::{DrivingSide, Locale};
use crate::road::{Direction, Lane};

/// Whether a way is (effectively) one-directional, folding in
/// `oneway=yes`/`junction=roundabout`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Oneway {
    Yes,
    No,
}

impl From<bool> for Oneway {
    fn from(oneway: bool) -> Self {
        if oneway {
            Self::Yes
        } else {
            Self::No
        }
    }
}

impl From<Oneway> for bool {
    fn from(oneway: Oneway) -> Self {
        matches!(oneway, Oneway::Yes)
    }
}

/// Scratch state for the inside-out assembly algorithm.
///
/// `forward_side`/`backward_side` are ordered from the road centre
/// *outwards*: index 0 is the lane nearest the centreline on that side,
/// and each mode pushes further travel/bus/parking/cycleway/shoulder lanes
/// onto the outward end as it runs. The final left-to-right order is
/// produced by [`RoadBuilder::into_ltr`].
pub(crate) struct RoadBuilder {
    pub forward_side: Vec<Lane>,
    pub backward_side: Vec<Lane>,
    pub oneway: Oneway,
}

impl RoadBuilder {
    pub fn new(oneway: Oneway) -> Self {
        Self {
            forward_side: Vec::new(),
            backward_side: Vec::new(),
            oneway,
        }
    }

    pub fn push_forward_outside(&mut self, lane: Lane) {
        self.forward_side.push(lane);
    }

    pub fn push_forward_inside(&mut self, lane: Lane) {
        self.forward_side.insert(0, lane);
    }

    pub fn push_backward_outside(&mut self, lane: Lane) {
        self.backward_side.push(lane);
    }

    pub fn push_backward_inside(&mut self, lane: Lane) {
        self.backward_side.insert(0, lane);
    }

    /// The innermost lanes on each side: where bus/parking/cycleway/shoulder
    /// modes look to find "the travel lane to attach to".
    pub fn innermost_forward(&self) -> Option<&Lane> {
        self.forward_side.first()
    }

    pub fn innermost_backward(&self) -> Option<&Lane> {
        self.backward_side.first()
    }

    /// Number of lanes with `Direction::Both` already placed at the centre
    /// (the shared centre turn lane, if any): it is inserted
    /// as the innermost forward-side lane.
    pub fn has_centre_turn_lane(&self) -> bool {
        matches!(
            self.forward_side.first(),
            Some(Lane::Travel {
                direction: Some(Direction::Both),
                ..
            })
        )
    }

    /// Assemble the final left-to-right order, upholding
    /// invariant 4: the direction travelling away from the driving side
    /// appears on the left of the median, the driving-side direction on the
    /// right (mirrored for left-driving locales).
    pub fn into_ltr(self, locale: &Locale) -> Vec<Lane> {
        match locale.driving_side {
            DrivingSide::Right => {
                let mut left: Vec<Lane> = self.backward_side;
                left.reverse();
                left.extend(self.forward_side);
                left
            },
            DrivingSide::Left => {
                let mut left: Vec<Lane> = self.forward_side;
                left.reverse();
                left.extend(self.backward_side);
                left
            },
        }
    }
}
