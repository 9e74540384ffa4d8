//! Output geometry: rings, polygons and line strings

use crate::types::Vector2;

/// Gap below which an unclosed ring is reported as "nearly closed".
pub const CLOSURE_EPSILON: f64 = 1e-6;

/// Ordered coordinate sequence bounding an area.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ring {
    points: Vec<Vector2>,
}

/// What [`make_ring_closed`] did to a ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RingClosure {
    /// Nothing to close.
    Empty,
    /// First and last points were already identical.
    AlreadyClosed,
    /// A copy of the first point was appended; `gap` is the distance that
    /// separated the two ends.
    Appended { gap: f64 },
}

impl RingClosure {
    /// The ends nearly met but were not identical.
    pub fn is_near_miss(&self) -> bool {
        matches!(self, RingClosure::Appended { gap } if *gap < CLOSURE_EPSILON)
    }
}

/// Close a ring by appending its first point when first and last differ.
///
/// Only exact equality counts as closed.
pub fn make_ring_closed(ring: &mut Ring) -> RingClosure {
    let (first, last) = match (ring.points.first(), ring.points.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return RingClosure::Empty,
    };
    if first == last {
        return RingClosure::AlreadyClosed;
    }
    ring.points.push(first);
    RingClosure::Appended {
        gap: first.distance(&last),
    }
}

impl Ring {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<Vector2>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Vector2] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Vector2> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Vector2> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Vector2> {
        self.points.last()
    }

    pub fn is_closed(&self) -> bool {
        !self.points.is_empty() && self.points.first() == self.points.last()
    }

    /// Append a run of points, dropping the first one when it repeats the
    /// current end of the ring.
    pub fn append_run(&mut self, points: impl IntoIterator<Item = Vector2>) {
        let mut points = points.into_iter().peekable();
        let repeats_end = match (self.points.last(), points.peek()) {
            (Some(last), Some(next)) => last == next,
            _ => false,
        };
        if repeats_end {
            points.next();
        }
        self.points.extend(points);
    }
}

/// Shell followed by holes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    rings: Vec<Ring>,
}

impl Polygon {
    pub fn new(rings: Vec<Ring>) -> Self {
        Self { rings }
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn shell(&self) -> Option<&Ring> {
        self.rings.first()
    }

    pub fn holes(&self) -> &[Ring] {
        self.rings.get(1..).unwrap_or(&[])
    }
}

/// Open coordinate sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineString {
    points: Vec<Vector2>,
}

impl LineString {
    pub fn new(points: Vec<Vector2>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Vector2] {
        &self.points
    }
}

/// Geometry of one feature.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Polygon(Polygon),
    LineString(LineString),
}

impl Geometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Polygon(_) => "Polygon",
            Geometry::LineString(_) => "LineString",
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Geometry::Polygon(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_line_string(&self) -> Option<&LineString> {
        match self {
            Geometry::LineString(l) => Some(l),
            _ => None,
        }
    }
}
