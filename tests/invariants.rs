//! Property checks over randomly generated mappings; no external fuzz harness required.

use almanac::model::{Almanac, DOMAIN_MAX, Interval, Mapping, RawElement, fill_gaps};
use almanac::resolve;

struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    fn gen_range(&mut self, hi: i64) -> i64 {
        (self.next_u64() % hi as u64) as i64
    }
}

/// Random non-overlapping rows inside `[0, span)`, in shuffled order.
fn gen_rows(rng: &mut XorShift64, span: i64) -> Vec<RawElement> {
    let count = rng.gen_range(6);
    let mut cursor = 0i64;
    let mut rows = Vec::new();
    for _ in 0..count {
        cursor += rng.gen_range(span / 8 + 1);
        let length = 1 + rng.gen_range(span / 6 + 1);
        if cursor + length > span {
            break;
        }
        rows.push(RawElement {
            dest_start: rng.gen_range(span),
            source_start: cursor,
            length,
        });
        cursor += length;
    }
    // declaration order must not matter.
    rows.reverse();
    rows
}

fn gen_almanac(rng: &mut XorShift64, stages: usize, span: i64) -> Almanac {
    let names: Vec<String> = (0..=stages).map(|i| format!("c{i}")).collect();
    let mut mappings: Vec<Mapping> = (0..stages)
        .map(|i| Mapping::from_specification(&names[i], &names[i + 1], &gen_rows(rng, span)).unwrap())
        .collect();
    mappings.reverse();
    Almanac::new(names[0].clone(), None, mappings, vec![]).unwrap()
}

fn assert_single_match(m: &Mapping, x: i64) {
    let n = m.elements().iter().filter(|e| e.maps_point(x)).count();
    assert_eq!(n, 1, "{x} matched by {n} elements");
}

#[test]
fn every_point_has_exactly_one_element() {
    let mut rng = XorShift64::new(0xC0FFEE);
    for _case in 0..300 {
        let rows = gen_rows(&mut rng, 1_000);
        let m = Mapping::from_specification("a", "b", &rows).unwrap();

        for x in 0..1_100 {
            assert_single_match(&m, x);
        }
        for x in [DOMAIN_MAX - 1, DOMAIN_MAX / 2, 4_294_967_296] {
            assert_single_match(&m, x);
        }
    }
}

#[test]
fn map_interval_partitions_the_image() {
    let mut rng = XorShift64::new(0xBADC0DE);
    for _case in 0..500 {
        let m = Mapping::from_specification("a", "b", &gen_rows(&mut rng, 10_000)).unwrap();
        let start = rng.gen_range(12_000);
        let length = rng.gen_range(5_000);
        let iv = Interval::try_new(start, length).unwrap();

        let parts = m.map_interval(iv);
        assert!(parts.iter().all(|p| !p.is_empty()));
        assert_eq!(parts.iter().map(|p| p.length()).sum::<i64>(), length);

        // pieces come back in source order, so walking them re-covers `iv` exactly.
        let mut cursor = iv.start();
        for p in &parts {
            let back = m.map_value(cursor).unwrap();
            assert_eq!(back, p.start());
            cursor += p.length();
        }
        assert_eq!(cursor, iv.end());
    }
}

#[test]
fn range_minimum_equals_point_enumeration() {
    let mut rng = XorShift64::new(0x5EED);
    for _case in 0..200 {
        let stages = 1 + rng.gen_range(6) as usize;
        let almanac = gen_almanac(&mut rng, stages, 2_000);
        let ranges: Vec<Interval> = (0..1 + rng.gen_range(3))
            .map(|_| Interval::try_new(rng.gen_range(2_200), rng.gen_range(1_000)).unwrap())
            .collect();

        let by_ranges = resolve::minimum_for_ranges(&almanac, &ranges).unwrap();
        let points: Vec<i64> = ranges.iter().flat_map(|r| r.values()).collect();
        let by_points = resolve::minimum_for_points(&almanac, &points).unwrap();
        assert_eq!(by_ranges, by_points, "ranges {ranges:?}");
    }
}

#[test]
fn gap_filling_twice_is_a_no_op() {
    let mut rng = XorShift64::new(0xFEED);
    for _case in 0..200 {
        let m = Mapping::from_specification("a", "b", &gen_rows(&mut rng, 500)).unwrap();
        let once = m.elements().to_vec();
        let twice = fill_gaps(once.clone()).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn interval_outside_declared_rows_maps_to_itself() {
    let rows = [
        RawElement {
            dest_start: 500,
            source_start: 10,
            length: 5,
        },
        RawElement {
            dest_start: 0,
            source_start: 100,
            length: 50,
        },
    ];
    let m = Mapping::from_specification("a", "b", &rows).unwrap();
    for iv in [
        Interval::try_new(0, 10).unwrap(),
        Interval::try_new(20, 80).unwrap(),
        Interval::try_new(150, 3_000_000_000).unwrap(),
    ] {
        assert_eq!(m.map_interval(iv), vec![iv]);
    }
}

#[test]
fn zero_length_intervals_never_show_up() {
    let mut rng = XorShift64::new(0xABCD);
    let almanac = gen_almanac(&mut rng, 3, 1_000);
    for m in almanac.chain() {
        for start in [0, 5, 999, 1_000, DOMAIN_MAX - 1] {
            assert!(m.map_interval(Interval::try_new(start, 0).unwrap()).is_empty());
        }
    }
    let empty = [Interval::try_new(7, 0).unwrap()];
    assert_eq!(resolve::minimum_for_ranges(&almanac, &empty).unwrap(), None);
}

#[test]
fn huge_ranges_resolve_without_enumeration() {
    let rows = [RawElement {
        dest_start: 0,
        source_start: 3_000_000_000,
        length: 1_000_000_000,
    }];
    let m = Mapping::from_specification("seed", "location", &rows).unwrap();
    let almanac = Almanac::new("seed", None, vec![m], vec![1_000_000_000, 4_000_000_000]).unwrap();
    assert_eq!(almanac.minimum_location_for_ranges().unwrap(), Some(0));
    assert_eq!(almanac.minimum_location_for_points().unwrap(), Some(1_000_000_000));
}
