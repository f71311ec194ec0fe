use serde::Serialize;

use crate::error::{AlmanacError, Result};
use crate::model::{DOMAIN_MAX, Interval, MappingElement, RawElement};

/// One named stage of the chain, e.g. `seed -> soil`.
///
/// `elements` is sorted by source start and tiles `[0, DOMAIN_MAX)` with no
/// gaps and no overlaps, so every value in the domain is matched by exactly one
/// element. Uncovered source positions are filled with identity elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mapping {
    source: String,
    destination: String,
    elements: Vec<MappingElement>,
    /// How many of `elements` came from the input rather than gap-filling.
    declared: usize,
}

impl Mapping {
    /// Build a stage from unordered `(dest_start, source_start, length)` rows.
    pub fn from_specification(
        source: impl Into<String>,
        destination: impl Into<String>,
        raw: &[RawElement],
    ) -> Result<Self> {
        let source = source.into();
        let destination = destination.into();

        // prefix errors with the stage name so the caller can find the block.
        let in_stage = |e: AlmanacError| match e {
            AlmanacError::MalformedMapping(msg) => {
                AlmanacError::MalformedMapping(format!("{source}-to-{destination}: {msg}"))
            }
            other => other,
        };

        let declared = raw
            .iter()
            .map(|r| MappingElement::new(r.source_start, r.dest_start, r.length))
            .collect::<Result<Vec<_>>>()
            .map_err(in_stage)?;

        let declared_count = declared.len();
        let elements = fill_gaps(declared).map_err(in_stage)?;

        tracing::debug!(
            %source,
            %destination,
            declared = declared_count,
            total = elements.len(),
            "built mapping"
        );

        Ok(Self {
            source,
            destination,
            elements,
            declared: declared_count,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn elements(&self) -> &[MappingElement] {
        &self.elements
    }

    pub fn declared_count(&self) -> usize {
        self.declared
    }

    pub fn synthesized_count(&self) -> usize {
        self.elements.len() - self.declared
    }

    pub fn matches_source(&self, category: &str) -> bool {
        self.source == category
    }

    pub fn matches_destination(&self, category: &str) -> bool {
        self.destination == category
    }

    /// Map a single value through this stage.
    pub fn map_value(&self, x: i64) -> Result<i64> {
        let mut matches = self.elements.iter().filter(|e| e.maps_point(x));
        match (matches.next(), matches.next()) {
            (Some(e), None) => Ok(x + e.offset()),
            (None, _) => Err(AlmanacError::Invariant(format!(
                "{}-to-{}: no element maps {x}",
                self.source, self.destination
            ))),
            (Some(_), Some(_)) => Err(AlmanacError::Invariant(format!(
                "{}-to-{}: more than one element maps {x}",
                self.source, self.destination
            ))),
        }
    }

    /// The image of `interval`, split at element boundaries.
    ///
    /// Sub-intervals come back in source order and never empty; their lengths
    /// sum to `interval.length()`.
    pub fn map_interval(&self, interval: Interval) -> Vec<Interval> {
        let first = self
            .elements
            .partition_point(|e| e.source_end() <= interval.start());

        self.elements[first..]
            .iter()
            .take_while(|e| e.source_start() < interval.end())
            .filter_map(|e| e.intersect(interval))
            .collect()
    }
}

/// Sort `elements` by source start and insert identity elements wherever the
/// domain `[0, DOMAIN_MAX)` is not covered.
///
/// Overlapping source ranges are rejected. Filling an already filled set
/// returns it unchanged.
pub fn fill_gaps(mut elements: Vec<MappingElement>) -> Result<Vec<MappingElement>> {
    elements.sort_by_key(|e| e.source_start());

    if let Some(pair) = elements
        .windows(2)
        .find(|w| w[0].source_end() > w[1].source_start())
    {
        return Err(AlmanacError::MalformedMapping(format!(
            "source ranges [{}, {}) and [{}, {}) overlap",
            pair[0].source_start(),
            pair[0].source_end(),
            pair[1].source_start(),
            pair[1].source_end()
        )));
    }

    let mut out = Vec::with_capacity(elements.len() * 2 + 1);
    let mut cursor = 0i64;
    for e in elements {
        if e.source_start() > cursor {
            out.push(MappingElement::identity(cursor, e.source_start() - cursor)?);
        }
        cursor = e.source_end();
        out.push(e);
    }
    if cursor < DOMAIN_MAX {
        out.push(MappingElement::identity(cursor, DOMAIN_MAX - cursor)?);
    }
    Ok(out)
}
