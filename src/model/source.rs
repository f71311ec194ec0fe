use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` into the raw almanac text, tagged with
/// the 1-based line it starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Hash)]
pub struct LineSpan {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    #[inline]
    pub fn new(line: usize, start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "LineSpan start must be <= end");
        Self { line, start, end }
    }

    /// Extend `self` to also cover `other`, keeping the earlier line number.
    #[inline]
    pub fn cover(self, other: LineSpan) -> LineSpan {
        LineSpan {
            line: self.line.min(other.line),
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// One row of a map block as written in the almanac: `dest source length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawElement {
    pub dest_start: i64,
    pub source_start: i64,
    pub length: i64,
}

/// A `<source>-to-<destination> map:` block and its rows, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingBlock {
    pub source: String,
    pub destination: String,
    pub rows: Vec<RawElement>,
    pub span: LineSpan,
}

/// The almanac as read from text, before any validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AlmanacSource {
    /// The word before the colon on the seeds line, e.g. `seeds`.
    pub seed_label: Option<String>,
    pub seeds: Vec<i64>,
    pub blocks: Vec<MappingBlock>,
}

impl AlmanacSource {
    /// The head category implied by the seeds line: `seeds` becomes `seed`.
    pub fn head_category(&self) -> Option<String> {
        let label = self.seed_label.as_deref()?.trim();
        let head = label.strip_suffix('s').filter(|s| !s.is_empty()).unwrap_or(label);
        Some(head.to_string())
    }
}
