use std::path::PathBuf;

use almanac::model::Almanac;
use almanac::parse::{self, BuildOptions};
use almanac::{Mode, SolveOptions, solve_str};

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
        .join("sample.txt")
}

fn sample_src() -> String {
    let path = sample_path();
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

fn sample_almanac() -> Almanac {
    let parsed = parse::parse_almanac(&sample_src());
    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
    parse::build_almanac(&parsed, &BuildOptions::default()).unwrap()
}

#[test]
fn sample_points_and_ranges() {
    let almanac = sample_almanac();
    assert_eq!(almanac.minimum_location_for_points().unwrap(), Some(35));
    assert_eq!(almanac.minimum_location_for_ranges().unwrap(), Some(46));
}

#[test]
fn sample_chain_is_walked_by_name() {
    let almanac = sample_almanac();
    assert_eq!(almanac.head(), "seed");
    assert_eq!(almanac.terminal(), "location");
    assert_eq!(
        almanac.categories(),
        vec![
            "seed",
            "soil",
            "fertilizer",
            "water",
            "light",
            "temperature",
            "humidity",
            "location"
        ]
    );
}

#[test]
fn sample_per_seed_locations() {
    let almanac = sample_almanac();
    let got: Vec<i64> = almanac
        .seeds()
        .iter()
        .map(|&s| almanac::resolve::resolve_point(&almanac, s).unwrap())
        .collect();
    assert_eq!(got, vec![82, 43, 86, 35]);

    let trace = almanac.trace_point(79).unwrap();
    let values: Vec<i64> = trace.iter().map(|(_, v)| *v).collect();
    assert_eq!(values, vec![79, 81, 81, 81, 74, 78, 78, 82]);
}

#[test]
fn block_order_does_not_matter() {
    let src = sample_src().replace("\r\n", "\n");
    let mut parts: Vec<&str> = src.split("\n\n").collect();
    let seeds = parts.remove(0);
    parts.reverse();
    let shuffled = format!("{seeds}\n\n{}", parts.join("\n\n"));

    let parsed = parse::parse_almanac(&shuffled);
    let almanac = parse::build_almanac(&parsed, &BuildOptions::default()).unwrap();
    assert_eq!(almanac.minimum_location_for_points().unwrap(), Some(35));
    assert_eq!(almanac.minimum_location_for_ranges().unwrap(), Some(46));
}

#[test]
fn stopping_early_with_a_terminal_override() {
    let opts = SolveOptions {
        mode: Mode::Points,
        build: BuildOptions {
            head_category: None,
            terminal_category: Some("soil".to_string()),
        },
        ..SolveOptions::default()
    };
    let solution = solve_str(&sample_src(), &opts).unwrap();
    // soil values of the sample seeds are 81, 14, 57 and 13.
    assert_eq!(solution.results.points, Some(13));
    assert_eq!(solution.results.ranges, None);
    assert_eq!(solution.chain.stages.len(), 1);
}

#[test]
fn solve_str_collects_traces_when_asked() {
    let opts = SolveOptions {
        trace: true,
        ..SolveOptions::default()
    };
    let solution = solve_str(&sample_src(), &opts).unwrap();
    assert_eq!(solution.traces.len(), 4);
    assert_eq!(solution.traces[3].last(), Some(&("location".to_string(), 35)));
    assert_eq!(solution.results.points, Some(35));
    assert_eq!(solution.results.ranges, Some(46));
}
