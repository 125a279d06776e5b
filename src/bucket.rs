//! Time-bucket arithmetic
//!
//! A time bucket is the 16-bit value written into the two most-significant bytes of a COMB UUID.
//! It is the number of whole periods elapsed since the Unix epoch, wrapped at [`BLOCK_SIZE`]:
//!
//! ```text
//! bucket = floor(unix_ts_sec / period_secs) mod 65536
//! ```
//!
//! Both the division and the modulo round toward negative infinity, so every period is exactly
//! `period_secs` long and the bucket keeps ascending across the epoch:
//!
//! ```rust
//! use combuuid::bucket::time_bucket;
//!
//! assert_eq!(time_bucket(1_660_513, 60), 0x6c1b);
//! assert_eq!(time_bucket(0, 60), 0);
//! assert_eq!(time_bucket(-1, 60), 0xffff);
//! assert_eq!(time_bucket(-61, 60), 0xfffe);
//! ```

/// Number of distinct bucket values, dictated by the 2-byte prefix width.
pub const BLOCK_SIZE: u32 = 1 << 16;

/// Default period length in seconds: the bucket advances once per minute.
pub const DEFAULT_PERIOD_SECS: u32 = 60;

/// Computes the time bucket of `unix_ts_sec` for a period of `period_secs` seconds.
///
/// # Panics
///
/// Panics if `period_secs` is zero.
pub const fn time_bucket(unix_ts_sec: i64, period_secs: u32) -> u16 {
    assert!(period_secs > 0, "`period_secs` must be a positive integer");
    let period_index = unix_ts_sec.div_euclid(period_secs as i64);
    period_index.rem_euclid(BLOCK_SIZE as i64) as u16
}

/// Returns the length in seconds of one full bucket cycle, after which the bucket wraps to the
/// same value again.
///
/// At the default period this is 3,932,160 seconds (about 45.5 days).
pub const fn cycle_secs(period_secs: u32) -> i64 {
    BLOCK_SIZE as i64 * period_secs as i64
}
