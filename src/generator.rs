//! COMB UUID generator and related types.

use crate::bucket::{time_bucket, DEFAULT_PERIOD_SECS};
use crate::Uuid;

pub mod with_rand08;

#[cfg(test)]
mod tests;

/// A trait that defines the minimum random number generator interface for [`CombGenerator`].
pub trait RandSource {
    /// Fills `dest` with random data.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// A trait that defines the minimum system clock interface for [`CombGenerator`].
pub trait TimeSource {
    /// Returns the current Unix timestamp in whole seconds, rounded toward negative infinity.
    fn unix_ts_sec(&mut self) -> i64;
}

/// The default [`TimeSource`] that uses [`std::time::SystemTime`].
///
/// Instants before the Unix epoch are reported as negative values.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl TimeSource for StdSystemTime {
    fn unix_ts_sec(&mut self) -> i64 {
        use std::time;
        match time::SystemTime::now().duration_since(time::UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_secs() as i64,
            Err(err) => {
                let before = err.duration();
                -(before.as_secs() as i64) - i64::from(before.subsec_nanos() > 0)
            }
        }
    }
}

/// Represents a COMB UUID generator that places a wrapping time bucket in the first two bytes of
/// otherwise random UUIDv4s.
///
/// The generator keeps no state between calls other than its random number generator, so every
/// call is independent. The time bucket advances once every `period_secs` seconds (by default,
/// every minute) and wraps to zero after 65536 periods. UUIDs generated within that window sort in
/// the order of their creation periods; UUIDs generated within the same period share the same
/// prefix and are ordered randomly.
///
/// # Examples
///
/// ```rust
/// use combuuid::CombGenerator;
///
/// let mut g = CombGenerator::with_rand08(rand::rngs::OsRng);
/// let x = g.generate_core(1_660_513);
/// assert_eq!(x.as_bytes()[..2], [0x6c_u8, 0x1b]);
/// assert_eq!(x.version(), Some(4));
/// ```
///
/// # Generator functions
///
/// | Flavor                   | Timestamp | Random source failure |
/// | ------------------------ | --------- | --------------------- |
/// | [`generate`]             | Now       | Up to the source      |
/// | [`generate_core`]        | Argument  | Up to the source      |
/// | [`try_generate_core`]    | Argument  | Returns `Err`         |
///
/// [`generate`]: CombGenerator::generate
/// [`generate_core`]: CombGenerator::generate_core
/// [`try_generate_core`]: CombGenerator::try_generate_core
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CombGenerator<R, T = StdSystemTime> {
    period_secs: u32,

    /// The random number generator used by the generator.
    rand_source: R,

    /// The system clock used by the generator.
    time_source: T,
}

impl<R> CombGenerator<R> {
    /// Creates a generator object with a specified random number generator and the default
    /// period. The random number generator should be cryptographically strong and securely
    /// seeded.
    ///
    /// Use [`CombGenerator::with_rand_and_time_sources()`] to create a generator with a custom
    /// clock.
    pub const fn new(rand_source: R) -> Self {
        Self::with_rand_and_time_sources(rand_source, StdSystemTime)
    }
}

impl<R, T> CombGenerator<R, T> {
    /// Creates a generator object with specified random number generator and system clock.
    pub const fn with_rand_and_time_sources(rand_source: R, time_source: T) -> Self {
        Self {
            period_secs: DEFAULT_PERIOD_SECS,
            rand_source,
            time_source,
        }
    }

    /// Returns this generator with the time bucket advancing every `period_secs` seconds instead
    /// of the default 60.
    ///
    /// # Panics
    ///
    /// Panics if `period_secs` is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use combuuid::CombGenerator;
    ///
    /// let mut g = CombGenerator::with_rand08(rand::rngs::OsRng).with_period(3600);
    /// assert_eq!(g.generate_core(1_660_513).time_bucket(), 461);
    /// ```
    pub fn with_period(self, period_secs: u32) -> Self {
        assert!(period_secs > 0, "`period_secs` must be a positive integer");
        Self {
            period_secs,
            ..self
        }
    }

    /// Returns the number of seconds after which the time bucket advances by one.
    pub const fn period_secs(&self) -> u32 {
        self.period_secs
    }
}

impl<R: Default, T: Default> Default for CombGenerator<R, T> {
    fn default() -> Self {
        Self::with_rand_and_time_sources(R::default(), T::default())
    }
}

impl<R: RandSource, T: TimeSource> CombGenerator<R, T> {
    /// Generates a new COMB UUID object from the current timestamp.
    pub fn generate(&mut self) -> Uuid {
        let unix_ts_sec = self.time_source.unix_ts_sec();
        self.generate_core(unix_ts_sec)
    }
}

impl<R: RandSource, T> CombGenerator<R, T> {
    /// Generates a new COMB UUID object from the `unix_ts_sec` passed.
    ///
    /// Any timestamp is accepted. Negative timestamps follow the same floor-division rule as
    /// positive ones; see [`time_bucket`](crate::bucket::time_bucket).
    pub fn generate_core(&mut self, unix_ts_sec: i64) -> Uuid {
        let bytes = self.random_bytes();
        self.comb_from_random_bytes(bytes, unix_ts_sec)
    }

    fn random_bytes(&mut self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        self.rand_source.fill_bytes(&mut bytes);
        bytes
    }
}

impl<R, T> CombGenerator<R, T> {
    /// Shapes 16 random bytes into a UUIDv4 and stamps the time bucket of `unix_ts_sec` over its
    /// first two bytes. Every generating method ends here.
    fn comb_from_random_bytes(&self, bytes: [u8; 16], unix_ts_sec: i64) -> Uuid {
        Uuid::from_random_bytes_v4(bytes)
            .with_time_bucket(time_bucket(unix_ts_sec, self.period_secs))
    }
}

/// Supports operations as an infinite iterator that produces a new COMB UUID object for each call
/// of `next()`.
///
/// # Examples
///
/// ```rust
/// use combuuid::CombGenerator;
///
/// CombGenerator::with_rand08(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e));
/// ```
impl<R: RandSource, T: TimeSource> Iterator for CombGenerator<R, T> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RandSource, T: TimeSource> core::iter::FusedIterator for CombGenerator<R, T> {}
