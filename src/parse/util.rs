use crate::model::{Diagnostic, DiagnosticPhase, LineSpan, Severity};

/// A byte range for a single line in the source.
///
/// - `start..end` is the line content excluding the trailing `\n`.
/// - `number` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub number: usize,
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn span(&self) -> LineSpan {
        LineSpan::new(self.number, self.start, self.end)
    }
}

pub fn collect_lines(src: &str) -> Vec<LineRange> {
    let bytes = src.as_bytes();
    let mut out: Vec<LineRange> = Vec::new();
    let mut start = 0usize;
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'\n' {
            out.push(LineRange {
                number: out.len() + 1,
                start,
                end: i,
            });
            start = i + 1;
        }
    }
    if start < src.len() {
        out.push(LineRange {
            number: out.len() + 1,
            start,
            end: src.len(),
        });
    }
    out
}

pub fn strip_cr(s: &str) -> &str {
    s.strip_suffix('\r').unwrap_or(s)
}

/// Recognize `<source>-to-<destination> map:` and return both category names.
///
/// Returns `Some(None)` when the line looks like a header (ends in `map:`) but
/// the names cannot be extracted, so the caller can report it.
pub fn parse_map_header(text: &str) -> Option<Option<(String, String)>> {
    let body = text.trim().strip_suffix("map:")?;
    let names = body.trim().split_once("-to-").and_then(|(src, dst)| {
        let (src, dst) = (src.trim(), dst.trim());
        let valid = |s: &str| !s.is_empty() && !s.contains(char::is_whitespace);
        (valid(src) && valid(dst)).then(|| (src.to_string(), dst.to_string()))
    });
    Some(names)
}

/// Parse every whitespace-separated token of `text` as an `i64`.
///
/// `base` is the absolute byte offset of `text` within the source. Bad tokens
/// are reported individually; `None` is returned if any token was bad.
pub fn parse_numbers(
    text: &str,
    base: usize,
    line: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<Vec<i64>> {
    let mut out = Vec::new();
    let mut ok = true;
    let mut offset = 0usize;
    for token in text.split_whitespace() {
        // split_whitespace hands out sub-slices, so find the token's position.
        let rel = text[offset..].find(token).map_or(offset, |p| offset + p);
        offset = rel + token.len();

        match token.parse::<i64>() {
            Ok(n) => out.push(n),
            Err(e) => {
                ok = false;
                diagnostics.push(Diagnostic {
                    severity: Severity::Error,
                    phase: Some(DiagnosticPhase::Parse),
                    code: Some("almanac.number.invalid".to_string()),
                    message: format!("'{token}' is not a valid integer: {e}"),
                    span: Some(LineSpan::new(line, base + rel, base + offset)),
                    notes: vec![],
                });
            }
        }
    }
    ok.then_some(out)
}
