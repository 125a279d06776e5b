//! Integration with `rand` (v0.8) crate.

use super::{CombGenerator, RandSource, StdSystemTime};
use crate::Uuid;
use rand::RngCore;

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> RandSource for Adapter<T> {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }
}

impl<T: RngCore> CombGenerator<Adapter<T>> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use combuuid::CombGenerator;
    ///
    /// let mut g = CombGenerator::with_rand08(rand::thread_rng());
    /// println!("{}", g.generate());
    /// ```
    pub const fn with_rand08(rng: T) -> Self {
        Self::with_rand_and_time_sources(Adapter(rng), StdSystemTime)
    }
}

impl<T: RngCore, S> CombGenerator<Adapter<T>, S> {
    /// Generates a new COMB UUID object from the `unix_ts_sec` passed, or returns the error of
    /// the random number generator as is if it fails to produce random bytes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use combuuid::CombGenerator;
    ///
    /// let mut g = CombGenerator::with_rand08(rand::rngs::OsRng);
    /// let x = g.try_generate_core(1_660_513)?;
    /// assert_eq!(x.time_bucket(), 0x6c1b);
    /// # Ok::<(), rand::Error>(())
    /// ```
    pub fn try_generate_core(&mut self, unix_ts_sec: i64) -> Result<Uuid, rand::Error> {
        let mut bytes = [0u8; 16];
        self.rand_source.0.try_fill_bytes(&mut bytes)?;
        Ok(self.comb_from_random_bytes(bytes, unix_ts_sec))
    }
}
