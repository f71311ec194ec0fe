use std::collections::{HashMap, HashSet};

use crate::error::{AlmanacError, Result};
use crate::model::{DOMAIN_MAX, Interval, Mapping};
use crate::resolve;

/// A validated chain of mappings plus the seed values that feed it.
///
/// Mappings are keyed by source category and walked by name, so the order in
/// which they were declared does not matter. Construction guarantees an
/// unbroken, acyclic path from `head` to `terminal`.
#[derive(Debug, Clone)]
pub struct Almanac {
    head: String,
    terminal: String,
    mappings: HashMap<String, Mapping>,
    seeds: Vec<i64>,
}

impl Almanac {
    /// Validate and assemble an almanac.
    ///
    /// When `terminal` is `None`, the chain ends at the first category that no
    /// mapping starts from. Mappings that are not on the chain are dropped.
    pub fn new(
        head: impl Into<String>,
        terminal: Option<&str>,
        mappings: Vec<Mapping>,
        seeds: Vec<i64>,
    ) -> Result<Self> {
        let head = head.into();

        if let Some(seed) = seeds.iter().find(|s| !(0..DOMAIN_MAX).contains(*s)) {
            return Err(AlmanacError::MalformedMapping(format!(
                "seed value {seed} is outside [0, {DOMAIN_MAX})"
            )));
        }
        if terminal == Some(head.as_str()) {
            return Err(AlmanacError::MalformedMapping(format!(
                "terminal category '{head}' is also the head category"
            )));
        }

        let mut by_source: HashMap<String, Mapping> = HashMap::with_capacity(mappings.len());
        for m in mappings {
            if by_source.contains_key(m.source()) {
                return Err(AlmanacError::MalformedMapping(format!(
                    "more than one mapping starts at category '{}'",
                    m.source()
                )));
            }
            by_source.insert(m.source().to_string(), m);
        }

        let mut on_chain: HashSet<String> = HashSet::new();
        let mut current = head.clone();
        let terminal = loop {
            if terminal == Some(current.as_str()) {
                break current;
            }
            let Some(m) = by_source.get(&current).filter(|m| m.matches_source(&current)) else {
                if let Some(t) = terminal {
                    return Err(AlmanacError::MalformedMapping(format!(
                        "chain stops at category '{current}' before reaching '{t}'"
                    )));
                }
                if on_chain.is_empty() {
                    return Err(AlmanacError::MalformedMapping(format!(
                        "no mapping starts at head category '{head}'"
                    )));
                }
                break current;
            };
            on_chain.insert(current);
            let next = m.destination().to_string();
            if on_chain.contains(&next) {
                return Err(AlmanacError::MalformedMapping(format!(
                    "chain loops back to category '{next}'"
                )));
            }
            current = next;
        };

        by_source.retain(|source, m| {
            let keep = on_chain.contains(source);
            if !keep {
                tracing::warn!(
                    source = %m.source(),
                    destination = %m.destination(),
                    "mapping is not on the {head} -> {terminal} chain; ignoring it"
                );
            }
            keep
        });

        tracing::debug!(%head, %terminal, stages = by_source.len(), "almanac chain validated");

        Ok(Self {
            head,
            terminal,
            mappings: by_source,
            seeds,
        })
    }

    pub fn head(&self) -> &str {
        &self.head
    }

    pub fn terminal(&self) -> &str {
        &self.terminal
    }

    pub fn seeds(&self) -> &[i64] {
        &self.seeds
    }

    /// The mapping that starts at `category`, if it is on the chain.
    pub fn mapping_from(&self, category: &str) -> Option<&Mapping> {
        self.mappings.get(category)
    }

    /// The mappings in chain order, head first.
    pub fn chain(&self) -> Vec<&Mapping> {
        let mut out = Vec::with_capacity(self.mappings.len());
        let mut current = self.head.as_str();
        while let Some(m) = self.mapping_from(current) {
            out.push(m);
            if m.matches_destination(&self.terminal) {
                break;
            }
            current = m.destination();
        }
        out
    }

    /// Every category on the chain, head to terminal.
    pub fn categories(&self) -> Vec<&str> {
        let mut out = vec![self.head.as_str()];
        out.extend(self.chain().into_iter().map(|m| m.destination()));
        out
    }

    /// The seeds read as `(start, length)` pairs.
    pub fn seed_ranges(&self) -> Result<Vec<Interval>> {
        let pairs = self.seeds.chunks_exact(2);
        if !pairs.remainder().is_empty() {
            return Err(AlmanacError::MalformedMapping(format!(
                "{} seed values cannot be read as (start, length) pairs",
                self.seeds.len()
            )));
        }
        pairs.map(|p| Interval::try_new(p[0], p[1])).collect()
    }

    /// Minimum terminal value over every seed taken as a single point.
    pub fn minimum_location_for_points(&self) -> Result<Option<i64>> {
        resolve::minimum_for_points(self, &self.seeds)
    }

    /// Minimum terminal value over every seed range.
    pub fn minimum_location_for_ranges(&self) -> Result<Option<i64>> {
        resolve::minimum_for_ranges(self, &self.seed_ranges()?)
    }

    /// The `(category, value)` path of `x` from head to terminal.
    pub fn trace_point(&self, x: i64) -> Result<Vec<(String, i64)>> {
        resolve::trace_point(self, x)
    }
}
