//! Closest-center collision detection.

use super::geometry::{Point, Rect};

/// Direction a sortable list is laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left to right (column headers).
    Horizontal,
    /// Top to bottom (rows).
    Vertical,
}

impl Axis {
    /// Distance between two points measured along this axis only.
    pub fn distance(&self, a: Point, b: Point) -> f32 {
        match self {
            Axis::Horizontal => (a.x - b.x).abs(),
            Axis::Vertical => (a.y - b.y).abs(),
        }
    }
}

/// A drop slot reported by the host layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Droppable {
    pub id: String,
    pub rect: Rect,
}

impl Droppable {
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
        }
    }
}

/// Pick the droppable whose center is nearest `point` along `axis`.
///
/// Ties go to the earlier slot. Returns `None` only for an empty slot list.
pub fn closest_center<'a>(point: Point, droppables: &'a [Droppable], axis: Axis) -> Option<&'a Droppable> {
    droppables.iter().fold(None, |best: Option<(&Droppable, f32)>, d| {
        let dist = axis.distance(point, d.rect.center());
        match best {
            Some((_, best_dist)) if best_dist <= dist => best,
            _ => Some((d, dist)),
        }
    })
    .map(|(d, _)| d)
}

/// Bounding box of every droppable, or `None` for an empty list.
pub fn bounds(droppables: &[Droppable]) -> Option<Rect> {
    let mut iter = droppables.iter();
    let first = iter.next()?.rect;
    Some(iter.fold(first, |acc, d| acc.union(&d.rect)))
}
