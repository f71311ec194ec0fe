//! AFL++ fuzz target for `almanac`.
//!
//! This binary is intentionally stdin-driven, so it can be used with AFL++.
//! Build and run it via `cargo-afl`:
//!
//! ```bash
//! cargo install cargo-afl
//!
//! cargo afl build --release --features afl_fuzz --bin almanac_afl_parse
//!
//! mkdir -p fuzz/afl/out
//!
//! cargo afl fuzz \
//!   -i fuzz/afl/in \
//!   -o fuzz/afl/out \
//!   target/release/almanac_afl_parse
//! ```
//!
//! Rust panics normally unwind and exit with a non-crashing status code.
//! AFL++ only treats crashes as signals/aborts. We therefore catch any unwind
//! and turn it into `abort()`.

use std::io::Read;

use almanac::model::{Almanac, Interval, LineSpan};
use almanac::parse::{self, BuildOptions};

const MAX_INPUT_LEN: usize = 1_000_000; // 1MB guardrail; AFL++ will typically cap this anyway.

/// Ranges up to this length are also checked point by point.
const MAX_ENUMERATED_LEN: i64 = 256;

fn check_span(span: &LineSpan, len: usize) {
    assert!(span.start <= span.end, "invalid span: start > end: {span:?}");
    assert!(span.end <= len, "span out of bounds (len={len}): {span:?}");
    assert!(span.line >= 1, "line numbers are 1-based: {span:?}");
}

fn check_mappings(almanac: &Almanac) {
    for m in almanac.chain() {
        let elements = m.elements();
        assert_eq!(elements.first().map(|e| e.source_start()), Some(0));
        assert_eq!(
            elements.last().map(|e| e.source_end()),
            Some(almanac::model::DOMAIN_MAX)
        );
        for w in elements.windows(2) {
            assert_eq!(w[0].source_end(), w[1].source_start(), "gap or overlap");
        }
    }
}

fn check_ranges(almanac: &Almanac, ranges: &[Interval]) {
    let by_ranges = almanac::resolve::minimum_for_ranges(almanac, ranges).unwrap();

    if ranges.iter().all(|r| r.length() <= MAX_ENUMERATED_LEN) {
        let points: Vec<i64> = ranges.iter().flat_map(|r| r.values()).collect();
        let by_points = almanac::resolve::minimum_for_points(almanac, &points).unwrap();
        assert_eq!(by_ranges, by_points, "range and point resolution disagree");
    }
}

fn run_one_input(data: &[u8]) {
    if data.len() > MAX_INPUT_LEN {
        // guardrail: avoid pathological OOM on enormous inputs.
        return;
    }

    // lossy conversion keeps the harness total (no early returns that reduce coverage).
    let src = String::from_utf8_lossy(data).to_string();

    let out = parse::parse_almanac(&src);
    for d in &out.diagnostics {
        if let Some(span) = &d.span {
            check_span(span, src.len());
        }
    }
    for b in &out.document.blocks {
        check_span(&b.span, src.len());
    }

    // building may fail on bad data, but must never panic.
    let Ok(almanac) = parse::build_almanac(&out, &BuildOptions::default()) else {
        return;
    };
    check_mappings(&almanac);

    // point resolution must succeed for every in-domain seed.
    almanac.minimum_location_for_points().unwrap();

    if let Ok(ranges) = almanac.seed_ranges() {
        check_ranges(&almanac, &ranges);
    }
}

fn main() {
    let mut data = Vec::new();
    std::io::stdin().read_to_end(&mut data).unwrap();

    // convert any panic into an abort().
    if std::panic::catch_unwind(|| run_one_input(&data)).is_err() {
        std::process::abort();
    }
}
