//! Pushing values and ranges through an almanac's chain.
//!
//! Range resolution never enumerates individual values. An interval is split
//! at the element boundaries of each stage and every piece is followed down
//! the chain on its own; at the terminal category the smallest value a piece
//! can reach is its own start.
//!
//! That last step assumes every mapping element is a pure translation by a
//! constant offset (never a reversal or a scale), which is what
//! `MappingElement` models. Under that assumption the result is identical to
//! enumerating every point.

use crate::error::{AlmanacError, Result};
use crate::model::{Almanac, Interval, Mapping};

/// Map a single value from the head category to the terminal category.
pub fn resolve_point(almanac: &Almanac, x: i64) -> Result<i64> {
    let mut value = x;
    let mut category = almanac.head();
    while category != almanac.terminal() {
        let mapping = stage(almanac, category)?;
        value = mapping.map_value(value)?;
        category = mapping.destination();
    }
    Ok(value)
}

/// Like [`resolve_point`], but keeps the value at every category.
pub fn trace_point(almanac: &Almanac, x: i64) -> Result<Vec<(String, i64)>> {
    let mut out = vec![(almanac.head().to_string(), x)];
    let mut value = x;
    let mut category = almanac.head();
    while category != almanac.terminal() {
        let mapping = stage(almanac, category)?;
        value = mapping.map_value(value)?;
        category = mapping.destination();
        out.push((category.to_string(), value));
    }
    Ok(out)
}

/// Minimum terminal value over `points`; `None` when there are no points.
pub fn minimum_for_points(almanac: &Almanac, points: &[i64]) -> Result<Option<i64>> {
    let mut best: Option<i64> = None;
    for &p in points {
        let value = resolve_point(almanac, p)?;
        best = Some(best.map_or(value, |b| b.min(value)));
    }
    Ok(best)
}

/// Minimum terminal value over every interval in `inputs`.
///
/// Empty intervals contribute nothing; `None` means no interval had a value.
pub fn minimum_for_ranges(almanac: &Almanac, inputs: &[Interval]) -> Result<Option<i64>> {
    let mut best: Option<i64> = None;
    for &interval in inputs {
        if interval.is_empty() {
            continue;
        }
        let value = minimum_from(almanac, interval, almanac.head())?;
        tracing::debug!(
            start = interval.start(),
            length = interval.length(),
            minimum = value,
            "resolved seed range"
        );
        best = Some(best.map_or(value, |b| b.min(value)));
    }
    Ok(best)
}

/// Minimum terminal value reachable from a non-empty `interval` that currently
/// lives in `category`.
pub fn minimum_from(almanac: &Almanac, interval: Interval, category: &str) -> Result<i64> {
    let mapping = stage(almanac, category)?;
    let pieces = mapping.map_interval(interval);
    if pieces.is_empty() {
        return Err(AlmanacError::Invariant(format!(
            "{}-to-{}: interval [{}, {}) has no image",
            mapping.source(),
            mapping.destination(),
            interval.start(),
            interval.end()
        )));
    }

    let next = mapping.destination();
    if next == almanac.terminal() {
        return pieces
            .iter()
            .map(|p| p.start())
            .min()
            .ok_or_else(|| AlmanacError::Invariant("no candidate at terminal".to_string()));
    }

    let mut best = i64::MAX;
    for piece in pieces {
        best = best.min(minimum_from(almanac, piece, next)?);
    }
    Ok(best)
}

fn stage<'a>(almanac: &'a Almanac, category: &str) -> Result<&'a Mapping> {
    almanac
        .mapping_from(category)
        .filter(|m| m.matches_source(category))
        .ok_or_else(|| {
            AlmanacError::Invariant(format!("no mapping starts at category '{category}'"))
        })
}
