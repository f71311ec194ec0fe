//! Almanac text -> `AlmanacSource`, and `AlmanacSource` -> validated `Almanac`.
//!
//! The reader is **error-tolerant**: it never panics on malformed input,
//! records a `Diagnostic` (with a line span and a stable code) for everything it
//! cannot make sense of, and keeps reading. Whether those diagnostics are fatal
//! is decided by [`build_almanac`].
//!
//! Accepted layout:
//!
//! ```text
//! seeds: 79 14 55 13
//!
//! seed-to-soil map:
//! 50 98 2
//! 52 50 48
//! ```
//!
//! Blocks may be declared in any order. A blank line ends a block.

mod util;

use crate::error::{AlmanacError, Result};
use crate::model::*;

use util::{collect_lines, parse_map_header, parse_numbers, strip_cr};

/// Result of reading almanac text.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub document: AlmanacSource,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Options that override what the text implies about the chain.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Head category; defaults to the seeds label without its plural `s`.
    pub head_category: Option<String>,
    /// Terminal category; defaults to the end of the chain.
    pub terminal_category: Option<String>,
}

fn diag(severity: Severity, code: &str, message: String, span: LineSpan) -> Diagnostic {
    Diagnostic {
        severity,
        phase: Some(DiagnosticPhase::Parse),
        code: Some(code.to_string()),
        message,
        span: Some(span),
        notes: vec![],
    }
}

/// Read almanac text.
pub fn parse_almanac(src: &str) -> ParseOutput {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut document = AlmanacSource::default();
    let mut seeds_span: Option<LineSpan> = None;

    // the block rows are currently attached to; `skipping` swallows the rows of
    // a block whose header could not be read.
    let mut current: Option<MappingBlock> = None;
    let mut skipping = false;

    for line in collect_lines(src) {
        let text = strip_cr(&src[line.start..line.end]);
        let trimmed = text.trim();

        if trimmed.is_empty() {
            close_block(&mut current, &mut document, &mut diagnostics);
            skipping = false;
            continue;
        }

        // `<a>-to-<b> map:`
        if let Some(header) = parse_map_header(trimmed) {
            close_block(&mut current, &mut document, &mut diagnostics);
            match header {
                Some((source, destination)) => {
                    skipping = false;
                    current = Some(MappingBlock {
                        source,
                        destination,
                        rows: vec![],
                        span: line.span(),
                    });
                }
                None => {
                    skipping = true;
                    let mut d = diag(
                        Severity::Error,
                        "almanac.map.bad_header",
                        format!("cannot read map header '{trimmed}'"),
                        line.span(),
                    );
                    d.notes
                        .push("expected '<source>-to-<destination> map:'".to_string());
                    d.notes.push("rows of this block are ignored".to_string());
                    diagnostics.push(d);
                }
            }
            continue;
        }

        // `<label>: n n n ...`
        if current.is_none()
            && !skipping
            && let Some((label, rest)) = text.split_once(':')
        {
            let base = line.start + label.len() + 1;
            if let Some(first) = seeds_span {
                let mut d = diag(
                    Severity::Error,
                    "almanac.seeds.duplicate",
                    format!("second seeds line (first on line {})", first.line),
                    line.span(),
                );
                d.notes.push("only the first seeds line is used".to_string());
                diagnostics.push(d);
                continue;
            }
            seeds_span = Some(line.span());
            document.seed_label = Some(label.trim().to_string());
            if let Some(values) = parse_numbers(rest, base, line.number, &mut diagnostics) {
                document.seeds = values;
            }
            continue;
        }

        if skipping {
            continue;
        }

        let Some(block) = current.as_mut() else {
            diagnostics.push(diag(
                Severity::Error,
                "almanac.row.orphan",
                format!("'{trimmed}' does not belong to any map block"),
                line.span(),
            ));
            continue;
        };

        block.span = block.span.cover(line.span());
        let Some(values) = parse_numbers(text, line.start, line.number, &mut diagnostics) else {
            continue;
        };
        match values[..] {
            [dest_start, source_start, length] => block.rows.push(RawElement {
                dest_start,
                source_start,
                length,
            }),
            _ => diagnostics.push(diag(
                Severity::Error,
                "almanac.map.bad_row",
                format!(
                    "map rows need 3 numbers (destination, source, length), found {}",
                    values.len()
                ),
                line.span(),
            )),
        }
    }
    close_block(&mut current, &mut document, &mut diagnostics);

    if seeds_span.is_none() {
        diagnostics.push(Diagnostic {
            severity: Severity::Error,
            phase: Some(DiagnosticPhase::Parse),
            code: Some("almanac.seeds.missing".to_string()),
            message: "no seeds line found".to_string(),
            span: None,
            notes: vec!["expected a line like 'seeds: 79 14 55 13'".to_string()],
        });
    }

    ParseOutput {
        document,
        diagnostics,
    }
}

fn close_block(
    current: &mut Option<MappingBlock>,
    document: &mut AlmanacSource,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let Some(block) = current.take() else {
        return;
    };
    if block.rows.is_empty() {
        let mut d = diag(
            Severity::Warning,
            "almanac.map.empty",
            format!(
                "{}-to-{} map has no rows",
                block.source, block.destination
            ),
            block.span,
        );
        d.notes.push("every value maps to itself".to_string());
        diagnostics.push(d);
    }
    document.blocks.push(block);
}

/// Turn parsed text into a validated [`Almanac`].
///
/// The first error-severity diagnostic aborts the build; warnings are logged.
pub fn build_almanac(parsed: &ParseOutput, opts: &BuildOptions) -> Result<Almanac> {
    if let Some(err) = parsed.diagnostics.iter().find(|d| d.is_error()) {
        return Err(AlmanacError::Parse {
            message: err.message.clone(),
            line: err.span.map(|s| s.line),
        });
    }
    for d in &parsed.diagnostics {
        tracing::warn!(
            code = d.code.as_deref().unwrap_or("-"),
            line = d.span.map(|s| s.line),
            "{}",
            d.message
        );
    }

    let doc = &parsed.document;
    let head = opts
        .head_category
        .clone()
        .or_else(|| doc.head_category())
        .ok_or_else(|| AlmanacError::Parse {
            message: "cannot tell the head category".to_string(),
            line: None,
        })?;

    let mappings = doc
        .blocks
        .iter()
        .map(|b| Mapping::from_specification(&b.source, &b.destination, &b.rows))
        .collect::<Result<Vec<_>>>()?;

    Almanac::new(
        head,
        opts.terminal_category.as_deref(),
        mappings,
        doc.seeds.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(out: &ParseOutput) -> Vec<&str> {
        out.diagnostics
            .iter()
            .filter_map(|d| d.code.as_deref())
            .collect()
    }

    #[test]
    fn reads_seeds_and_blocks_in_order() {
        let src = "seeds: 1 2\r\n\r\nb-to-c map:\r\n0 5 1\r\n\r\na-to-b map:\r\n7 0 2\r\n";
        let out = parse_almanac(src);
        assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
        assert_eq!(out.document.seed_label.as_deref(), Some("seeds"));
        assert_eq!(out.document.head_category().as_deref(), Some("seed"));
        assert_eq!(out.document.seeds, vec![1, 2]);
        let names: Vec<(&str, &str)> = out
            .document
            .blocks
            .iter()
            .map(|b| (b.source.as_str(), b.destination.as_str()))
            .collect();
        assert_eq!(names, vec![("b", "c"), ("a", "b")]);
        assert_eq!(out.document.blocks[1].span.line, 6);
    }

    #[test]
    fn bad_rows_and_orphans_are_reported() {
        let src = "seeds: 1\n5 5 5\n\nx-to-y map:\n1 2\n1 2 3\n";
        let out = parse_almanac(src);
        assert_eq!(codes(&out), vec!["almanac.row.orphan", "almanac.map.bad_row"]);
        assert_eq!(out.document.blocks[0].rows.len(), 1);
        assert!(out.has_errors());
    }

    #[test]
    fn bad_header_swallows_its_rows() {
        let src = "seeds: 1\n\nbroken map:\n1 2 3\n4 5 6\n";
        let out = parse_almanac(src);
        assert_eq!(codes(&out), vec!["almanac.map.bad_header"]);
        assert!(out.document.blocks.is_empty());
    }

    #[test]
    fn missing_and_duplicate_seeds() {
        let out = parse_almanac("a-to-b map:\n1 2 3\n");
        assert_eq!(codes(&out), vec!["almanac.seeds.missing"]);

        let out = parse_almanac("seeds: 1\nseeds: 2\n");
        assert_eq!(codes(&out), vec!["almanac.seeds.duplicate"]);
        assert_eq!(out.document.seeds, vec![1]);
    }

    #[test]
    fn empty_block_is_a_warning_and_still_builds() {
        let out = parse_almanac("seeds: 4 9\n\nseed-to-soil map:\n\nsoil-to-water map:\n0 4 1\n");
        assert_eq!(codes(&out), vec!["almanac.map.empty"]);
        assert!(!out.has_errors());

        let almanac = build_almanac(&out, &BuildOptions::default()).unwrap();
        assert_eq!(almanac.terminal(), "water");
        assert_eq!(almanac.minimum_location_for_points().unwrap(), Some(0));
    }

    #[test]
    fn parse_errors_abort_the_build() {
        let out = parse_almanac("seeds: 1 zz\n\nseed-to-soil map:\n1 1 1\n");
        let err = build_almanac(&out, &BuildOptions::default()).unwrap_err();
        match err {
            AlmanacError::Parse { line, .. } => assert_eq!(line, Some(1)),
            other => panic!("expected parse error, got {other}"),
        }
    }

    #[test]
    fn options_override_chain_ends() {
        let out = parse_almanac("seeds: 3\n\na-to-b map:\n10 0 5\n\nb-to-c map:\n0 10 5\n");
        let opts = BuildOptions {
            head_category: Some("a".to_string()),
            terminal_category: Some("b".to_string()),
        };
        let almanac = build_almanac(&out, &opts).unwrap();
        assert_eq!(almanac.minimum_location_for_points().unwrap(), Some(13));
        assert_eq!(almanac.chain().len(), 1);
    }
}
