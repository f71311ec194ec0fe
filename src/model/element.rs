use serde::Serialize;

use crate::error::{AlmanacError, Result};
use crate::model::Interval;

/// One contiguous rewrite: `[source_start, source_start + length)` is carried
/// onto `[dest_start, dest_start + length)` by a constant offset.
///
/// Both ranges lie inside the domain, which keeps every translation below exact
/// in `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MappingElement {
    source_start: i64,
    dest_start: i64,
    length: i64,
}

impl MappingElement {
    pub fn new(source_start: i64, dest_start: i64, length: i64) -> Result<Self> {
        if length <= 0 {
            return Err(AlmanacError::MalformedMapping(format!(
                "element {dest_start} {source_start} {length} has a non-positive length"
            )));
        }
        Interval::try_new(source_start, length)?;
        Interval::try_new(dest_start, length)?;
        Ok(Self {
            source_start,
            dest_start,
            length,
        })
    }

    /// An element that maps `[start, start + length)` onto itself.
    pub fn identity(start: i64, length: i64) -> Result<Self> {
        Self::new(start, start, length)
    }

    #[inline]
    pub fn source_start(&self) -> i64 {
        self.source_start
    }

    #[inline]
    pub fn dest_start(&self) -> i64 {
        self.dest_start
    }

    #[inline]
    pub fn length(&self) -> i64 {
        self.length
    }

    #[inline]
    pub fn source_end(&self) -> i64 {
        self.source_start + self.length
    }

    /// `dest_start - source_start`; both are non-negative, so this cannot overflow.
    #[inline]
    pub fn offset(&self) -> i64 {
        self.dest_start - self.source_start
    }

    pub fn source(&self) -> Interval {
        Interval::from_bounds(self.source_start, self.source_end())
    }

    pub fn destination(&self) -> Interval {
        Interval::from_bounds(self.dest_start, self.dest_start + self.length)
    }

    /// True for elements that leave values unchanged, including the ones
    /// gap-filling synthesizes. Used when inspecting a built mapping.
    pub fn is_identity(&self) -> bool {
        self.source_start == self.dest_start
    }

    #[inline]
    pub fn maps_point(&self, x: i64) -> bool {
        self.source_start <= x && x < self.source_end()
    }

    /// Translate `x`, or `None` when `x` lies outside this element's source range.
    pub fn map_point(&self, x: i64) -> Option<i64> {
        self.maps_point(x).then(|| x + self.offset())
    }

    /// The part of `interval` covered by this element, in destination coordinates.
    ///
    /// `interval` is given in the same coordinates as `source_start`. Returns
    /// `None` when the two do not overlap (which includes an empty `interval`).
    pub fn intersect(&self, interval: Interval) -> Option<Interval> {
        if interval.is_empty()
            || interval.start() >= self.source_end()
            || self.source_start >= interval.end()
        {
            return None;
        }

        let overlap_start = self.source_start.max(interval.start());
        let overlap_end = self.source_end().min(interval.end());
        let offset = self.offset();
        Some(Interval::from_bounds(
            overlap_start + offset,
            overlap_end + offset,
        ))
    }
}
