//! The flattened intermediate consumed by the tessellator and back-ends
//! (spec.md §3 "Polygon").

use vex2d_core::{bounds_of, Point, Rect};

/// Points, plus a run-length of per-contour point counts terminated by a
/// `0` sentinel, plus whether the whole polygon is known convex.
///
/// The sum of the (non-sentinel) counts always equals `points.len()`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point>,
    /// Per-contour point counts, terminated by a trailing `0`.
    pub counts: Vec<u32>,
    pub convex: bool,
}

impl Polygon {
    pub fn new() -> Polygon {
        Polygon {
            points: Vec::new(),
            counts: vec![0],
            convex: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounds(&self) -> Option<Rect> {
        bounds_of(&self.points)
    }

    /// Iterates over each contour as a point slice, skipping the
    /// terminating `0` sentinel.
    pub fn contours(&self) -> ContourIter<'_> {
        ContourIter {
            points: &self.points,
            counts: &self.counts,
            offset: 0,
            count_index: 0,
        }
    }

    pub fn contour_count(&self) -> usize {
        self.counts.iter().filter(|&&c| c != 0).count()
    }

    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        let sum: u32 = self.counts.iter().filter(|&&c| c != 0).sum();
        debug_assert_eq!(sum as usize, self.points.len());
        debug_assert_eq!(*self.counts.last().unwrap_or(&0), 0);
    }
}

pub struct ContourIter<'a> {
    points: &'a [Point],
    counts: &'a [u32],
    offset: usize,
    count_index: usize,
}

impl<'a> Iterator for ContourIter<'a> {
    type Item = &'a [Point];

    fn next(&mut self) -> Option<&'a [Point]> {
        let count = *self.counts.get(self.count_index)?;
        if count == 0 {
            return None;
        }
        let start = self.offset;
        let end = start + count as usize;
        self.offset = end;
        self.count_index += 1;
        Some(&self.points[start..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vex2d_core::point;

    #[test]
    fn contour_iter_splits_by_counts() {
        let poly = Polygon {
            points: vec![point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0), point(5.0, 5.0), point(6.0, 5.0)],
            counts: vec![3, 2, 0],
            convex: false,
        };
        let contours: Vec<_> = poly.contours().collect();
        assert_eq!(contours.len(), 2);
        assert_eq!(contours[0].len(), 3);
        assert_eq!(contours[1].len(), 2);
    }
}
