use super::*;
use crate::bucket::{cycle_secs, BLOCK_SIZE};
use crate::Variant;

/// Fills bytes from a counter so that every draw is distinct and predictable.
#[derive(Clone, Debug, Default)]
struct CountingRandSource(u8);

impl RandSource for CountingRandSource {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for e in dest {
            *e = self.0;
            self.0 = self.0.wrapping_add(0x25);
        }
    }
}

/// Delegates to `rand::random()`.
#[derive(Clone, Debug, Default)]
struct MockRandSource;

impl RandSource for MockRandSource {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), dest)
    }
}

/// Steps forward by `self.1` seconds on each reading.
#[derive(Clone, Debug)]
struct MockTimeSource(i64, i64);

impl TimeSource for MockTimeSource {
    fn unix_ts_sec(&mut self) -> i64 {
        let ts = self.0;
        self.0 += self.1;
        ts
    }
}

impl CombGenerator<()> {
    fn for_testing() -> CombGenerator<impl RandSource + Clone, MockTimeSource> {
        CombGenerator::with_rand_and_time_sources(MockRandSource, MockTimeSource(1_660_513, 60))
    }
}

fn as_bucket_number(e: &Uuid) -> u16 {
    let bytes = e.as_bytes();
    (u16::from(bytes[0]) << 8) | u16::from(bytes[1])
}

/// Writes bucket of worked example into first two bytes
#[test]
fn writes_bucket_of_worked_example_into_first_two_bytes() {
    let mut g = CombGenerator::for_testing();
    let e = g.generate_core(1_660_513);
    assert_eq!(e.as_bytes()[0], 0x6c);
    assert_eq!(e.as_bytes()[1], 0x1b);
    assert!(e.encode().starts_with("6c1b"));
}

/// Increments bucket every period and wraps after block size periods
#[test]
fn increments_bucket_every_period_and_wraps_after_block_size_periods() {
    // start of a cycle in July 2022, plus a few seconds into the period
    let t0 = 422 * cycle_secs(60) + 17;
    let mut g = CombGenerator::for_testing();

    for i in 0..BLOCK_SIZE as i64 {
        let e = g.generate_core(t0 + i * 60);
        assert_eq!(i64::from(as_bucket_number(&e)), i);
    }
    let wrapped = g.generate_core(t0 + cycle_secs(60));
    assert_eq!(as_bucket_number(&wrapped), 0);
}

/// Orders successive periods from arbitrary start
#[test]
fn orders_successive_periods_from_arbitrary_start() {
    let mut g = CombGenerator::for_testing();
    let mut prev = as_bucket_number(&g.generate_core(1_660_513));
    for i in 1..BLOCK_SIZE as i64 {
        let curr = as_bucket_number(&g.generate_core(1_660_513 + i * 60));
        if curr != 0 {
            assert!(curr > prev, "step {i}: {curr} <= {prev}");
        } else {
            assert_eq!(prev, u16::MAX, "step {i}");
        }
        prev = curr;
    }
}

/// Wraps to same prefix after a full cycle at boundary timestamps
#[test]
fn wraps_to_same_prefix_after_a_full_cycle_at_boundary_timestamps() {
    let post_earth = i64::MAX - cycle_secs(60);
    let cases = [
        1,
        1_660_513,
        i64::from(i32::MAX),
        i64::from(u32::MAX),
        post_earth - 1,
        post_earth,
    ];

    let mut g = CombGenerator::for_testing();
    for start in cases {
        let end = start + cycle_secs(60);
        let first = g.generate_core(start);
        let next = g.generate_core(start + 60);
        let prev = g.generate_core(end - 60);
        let last = g.generate_core(end);

        assert_eq!(first.as_bytes()[..2], last.as_bytes()[..2]);

        for (older, newer) in [(first, next), (prev, last)] {
            let (older, newer) = (as_bucket_number(&older), as_bucket_number(&newer));
            if newer != 0 {
                assert!(newer > older, "start {start}");
            } else {
                assert_eq!(older, u16::MAX, "start {start}");
            }
        }
    }
}

/// Leaves bytes after prefix exactly as base generator produced them
#[test]
fn leaves_bytes_after_prefix_exactly_as_base_generator_produced_them() {
    let mut g = CombGenerator::with_rand_and_time_sources(
        CountingRandSource::default(),
        MockTimeSource(0, 60),
    );
    let mut base = g.clone();

    for ts in [-61, 0, 1_660_513, i64::MAX] {
        let expected = Uuid::from_random_bytes_v4(base.random_bytes());
        let e = g.generate_core(ts);
        assert_eq!(e.as_bytes()[2..], expected.as_bytes()[2..]);
        assert_eq!(e.time_bucket(), crate::bucket::time_bucket(ts, 60));
    }
}

/// Stamps bucket over version 4 shaped bytes
#[test]
fn stamps_bucket_over_version_4_shaped_bytes() {
    let g = CombGenerator::for_testing().with_period(1);
    let e = g.comb_from_random_bytes([0xff; 16], 0x0102);
    assert_eq!(e.encode().as_str(), "0102ffff-ffff-4fff-bfff-ffffffffffff");
    assert_eq!(e.version(), Some(4));

    let e = g.comb_from_random_bytes([0x00; 16], -1);
    assert_eq!(e.encode().as_str(), "ffff0000-0000-4000-8000-000000000000");
}

/// Produces identical prefixes and distinct tails for same timestamp
#[test]
fn produces_identical_prefixes_and_distinct_tails_for_same_timestamp() {
    let mut g = CombGenerator::for_testing();
    for _ in 0..1_000 {
        let x = g.generate_core(1_660_513);
        let y = g.generate_core(1_660_513);
        assert_eq!(x.as_bytes()[..2], y.as_bytes()[..2]);
        assert_ne!(x.as_bytes()[2..], y.as_bytes()[2..]);
    }
}

/// Keeps version and variant of base generator
#[test]
fn keeps_version_and_variant_of_base_generator() {
    let mut g = CombGenerator::for_testing();
    for ts in [-1, 0, 1_660_513, i64::MIN, i64::MAX] {
        let e = g.generate_core(ts);
        assert_eq!(e.variant(), Variant::Var10);
        assert_eq!(e.version(), Some(4));
    }
}

/// Reads timestamp from time source
#[test]
fn reads_timestamp_from_time_source() {
    let mut g = CombGenerator::for_testing();
    assert_eq!(g.generate().time_bucket(), 0x6c1b);
    assert_eq!(g.generate().time_bucket(), 0x6c1c);

    let buckets: Vec<u16> = g.take(3).map(|e| e.time_bucket()).collect();
    assert_eq!(buckets, [0x6c1d_u16, 0x6c1e, 0x6c1f]);
}

/// Advances bucket at custom period
#[test]
fn advances_bucket_at_custom_period() {
    let mut g = CombGenerator::for_testing().with_period(3600);
    assert_eq!(g.period_secs(), 3600);
    assert_eq!(g.generate_core(3599).time_bucket(), 0);
    assert_eq!(g.generate_core(3600).time_bucket(), 1);
    assert_eq!(g.generate_core(cycle_secs(3600)).time_bucket(), 0);
    assert_eq!(g.generate_core(-1).time_bucket(), u16::MAX);
}

/// Uses default period when built by default
#[test]
fn uses_default_period_when_built_by_default() {
    let g: CombGenerator<CountingRandSource> = Default::default();
    assert_eq!(g.period_secs(), crate::bucket::DEFAULT_PERIOD_SECS);
    assert_eq!(CombGenerator::new(MockRandSource).period_secs(), 60);
}

/// Panics if period is zero
#[test]
#[should_panic(expected = "`period_secs` must be a positive integer")]
fn panics_if_period_is_zero() {
    let _ = CombGenerator::for_testing().with_period(0);
}

/// Reads up-to-date timestamp from system clock
#[cfg(feature = "std")]
#[test]
fn reads_up_to_date_timestamp_from_system_clock() {
    use std::time;
    let ts_now = time::SystemTime::now()
        .duration_since(time::UNIX_EPOCH)
        .expect("clock may have gone backwards")
        .as_secs() as i64;
    let ts = StdSystemTime.unix_ts_sec();
    assert!((ts - ts_now).abs() <= 1);
}

/// Generates independently on each thread
#[cfg(feature = "std")]
#[test]
fn generates_independently_on_each_thread() {
    use std::{collections::HashSet, thread};

    let handles: Vec<_> = (0..4)
        .map(|_| {
            thread::spawn(|| {
                let mut g = CombGenerator::for_testing();
                (0..10_000)
                    .map(|_| g.generate_core(1_660_513))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut s = HashSet::new();
    for h in handles {
        for e in h.join().unwrap() {
            assert_eq!(e.time_bucket(), 0x6c1b);
            s.insert(e);
        }
    }
    assert_eq!(s.len(), 4 * 10_000);
}
