//! Time-biased ("COMB") UUIDs for database primary keys
//!
//! ```rust
//! use combuuid::combuuid;
//!
//! let uuid = combuuid();
//! println!("{}", uuid); // e.g., "6c1b79f3-2b4d-4c1e-9a3f-1d2e3f405162"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//! ```
//!
//! A COMB UUID is a random UUID (version 4) whose two most-significant bytes are replaced by a
//! coarse time counter. Identifiers created close in time share or nearly share that prefix, so
//! they land close together in B-tree indexes that compare keys as raw bytes. This improves
//! insertion locality compared with fully random UUIDs, at the cost of 16 of the 122 random bits.
//!
//! See [Sequential UUID Generators](https://www.2ndquadrant.com/en/blog/sequential-uuid-generators/)
//! for the background.
//!
//! # Field and bit layout
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          time_bucket          |             rand              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |             rand              |  ver  |         rand          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                          rand                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 16-bit big-endian `time_bucket` field holds `floor(unix_ts_sec / period_secs) mod 65536`.
//!   With the default period of 60 seconds it advances once a minute and wraps to zero roughly
//!   every 45.5 days.
//! - The 4-bit `ver` field is set at `0100` and the 2-bit `var` field at `10`, as in UUIDv4.
//! - The remaining 106 `rand` bits are filled with a cryptographically strong random number.
//!
//! UUIDs sort in creation order only within one wrap window. Across a wrap the prefix restarts
//! at zero, which keeps recent insertions clustered without promising global ordering.
//!
//! # Crate features
//!
//! Default features:
//!
//! - `std`: integrates the library with, among others, the system clock and the `String` type.
//! - `global_gen`: provides the thread-local default generator and the [`combuuid()`] and
//!   [`combuuid_at()`] entry points. This feature implies `std`.
//!
//! Optional features:
//!
//! - `serde`: enables serialization/deserialization of [`Uuid`] via serde.
//! - `uuid`: enables conversion between [`Uuid`] and the `uuid` crate's `Uuid`.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod id;
pub use id::{ParseError, Uuid, Variant};

pub mod bucket;

pub mod generator;
pub use generator::CombGenerator;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{combuuid, combuuid_at};
