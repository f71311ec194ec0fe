use serde::Serialize;

use crate::error::{AlmanacError, Result};
use crate::model::DOMAIN_MAX;

/// A half-open run of integers `[start, start + length)`.
///
/// Intervals never leave the domain `[0, DOMAIN_MAX]`: `start >= 0`,
/// `length >= 0` and `start + length <= DOMAIN_MAX`. Every constructor either
/// checks this or is only reachable with values that already satisfy it, so
/// `end()` can never overflow.
///
/// A zero-length interval is empty and carries no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub struct Interval {
    start: i64,
    length: i64,
}

impl Interval {
    /// Build an interval, rejecting anything outside the domain.
    pub fn try_new(start: i64, length: i64) -> Result<Self> {
        if start < 0 || length < 0 {
            return Err(AlmanacError::MalformedMapping(format!(
                "interval ({start}, {length}) has a negative bound"
            )));
        }
        match start.checked_add(length) {
            Some(end) if end <= DOMAIN_MAX => Ok(Self { start, length }),
            _ => Err(AlmanacError::MalformedMapping(format!(
                "interval ({start}, {length}) extends past {DOMAIN_MAX}"
            ))),
        }
    }

    /// Build an interval from a pair of bounds already known to be in the domain.
    #[inline]
    pub(crate) fn from_bounds(start: i64, end: i64) -> Self {
        debug_assert!(0 <= start && start <= end, "Interval start must be <= end");
        Self {
            start,
            length: end - start,
        }
    }

    #[inline]
    pub fn start(&self) -> i64 {
        self.start
    }

    #[inline]
    pub fn length(&self) -> i64 {
        self.length
    }

    /// Exclusive upper bound.
    #[inline]
    pub fn end(&self) -> i64 {
        self.start + self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    pub fn contains(&self, x: i64) -> bool {
        self.start <= x && x < self.end()
    }

    /// Every value in the interval, in ascending order.
    ///
    /// The resolver never enumerates; this is for checking range answers
    /// against point answers on small inputs.
    pub fn values(&self) -> std::ops::Range<i64> {
        self.start..self.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_domain_bounds() {
        assert!(Interval::try_new(-1, 3).is_err());
        assert!(Interval::try_new(3, -1).is_err());
        assert!(Interval::try_new(DOMAIN_MAX, 1).is_err());
        assert!(Interval::try_new(DOMAIN_MAX - 5, 5).is_ok());
    }

    #[test]
    fn zero_length_is_empty_and_contains_nothing() {
        let iv = Interval::try_new(10, 0).unwrap();
        assert!(iv.is_empty());
        assert!(!iv.contains(10));
        assert_eq!(iv.values().count(), 0);
    }

    #[test]
    fn end_is_exclusive() {
        let iv = Interval::try_new(79, 14).unwrap();
        assert_eq!(iv.end(), 93);
        assert!(iv.contains(92));
        assert!(!iv.contains(93));
    }
}
