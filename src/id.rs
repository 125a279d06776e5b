#[cfg(not(feature = "std"))]
use core as std;

use std::{fmt, str};

/// Represents a Universally Unique IDentifier.
///
/// Identifiers compare by their big-endian bytes, which is also how relational databases order
/// 16-byte keys, so COMB UUIDs with ascending time buckets sort in ascending order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates a UUIDv4 from 16 random bytes, overwriting the version and variant bits.
    pub(crate) const fn from_random_bytes_v4(bytes: [u8; 16]) -> Self {
        let mut bytes = bytes;
        bytes[6] = 0x40 | (bytes[6] >> 4);
        bytes[8] = 0x80 | (bytes[8] >> 2);
        Self(bytes)
    }

    /// Returns the 16-bit time bucket stored in the first two bytes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use combuuid::Uuid;
    ///
    /// let x = "6c1b79f3-2b4d-4c1e-9a3f-1d2e3f405162".parse::<Uuid>()?;
    /// assert_eq!(x.time_bucket(), 0x6c1b);
    /// # Ok::<(), combuuid::ParseError>(())
    /// ```
    pub const fn time_bucket(&self) -> u16 {
        u16::from_be_bytes([self.0[0], self.0[1]])
    }

    /// Returns a copy of this UUID with the first two bytes replaced by `bucket` in big-endian
    /// order. Bytes 2 through 15 are left as they are.
    ///
    /// This is the building block of COMB UUIDs; it lets a UUID from any source (for example, a
    /// fallible one) be turned into a time-biased one:
    ///
    /// ```rust
    /// use combuuid::{bucket::time_bucket, Uuid};
    ///
    /// let base = "a0b1c2d3-e4f5-4617-8899-aabbccddeeff".parse::<Uuid>()?;
    /// let comb = base.with_time_bucket(time_bucket(1_660_513, 60));
    /// assert_eq!(comb.encode().as_str(), "6c1bc2d3-e4f5-4617-8899-aabbccddeeff");
    /// # Ok::<(), combuuid::ParseError>(())
    /// ```
    pub const fn with_time_bucket(&self, bucket: u16) -> Self {
        let mut bytes = self.0;
        let prefix = bucket.to_be_bytes();
        bytes[0] = prefix[0];
        bytes[1] = prefix[1];
        Self(bytes)
    }

    /// Reports the variant field value of the UUID or, if appropriate, "NIL" or "MAX".
    ///
    /// For convenience, this method reports [`Variant::Nil`] or [`Variant::Max`] if `self`
    /// represents the Nil or Max UUID, although the Nil and Max UUIDs are technically subsumed
    /// under the variants `0b0` and `0b111`, respectively.
    pub fn variant(&self) -> Variant {
        match self.0[8] >> 4 {
            0b0000..=0b0111 if self == &Self::NIL => Variant::Nil,
            0b0000..=0b0111 => Variant::Var0,
            0b1000..=0b1011 => Variant::Var10,
            0b1100..=0b1101 => Variant::Var110,
            0b1110..=0b1111 if self == &Self::MAX => Variant::Max,
            _ => Variant::VarReserved,
        }
    }

    /// Returns the version field value of the UUID or `None` if `self` does not have the
    /// variant field value of `0b10`.
    ///
    /// COMB UUIDs built on a UUIDv4 base keep reporting version 4.
    pub fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[6] >> 4),
            _ => None,
        }
    }

    /// Renders the UUID as 36 lowercase characters, `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`,
    /// without allocating. The time bucket is the first four hex digits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use combuuid::Uuid;
    ///
    /// let x = "6C1B79F3-2B4D-4C1E-9A3F-1D2E3F405162".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(y.as_str(), "6c1b79f3-2b4d-4c1e-9a3f-1d2e3f405162");
    /// assert_eq!(&y[..4], "6c1b");
    /// # Ok::<(), combuuid::ParseError>(())
    /// ```
    pub fn encode(&self) -> fstr::FStr<36> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [b'-'; 36];
        let mut nibbles = self.0.iter().flat_map(|e| [e >> 4, e & 15]);
        for (pos, slot) in buffer.iter_mut().enumerate() {
            if !HYPHEN_POSITIONS.contains(&pos) {
                // 32 non-hyphen slots for 32 nibbles
                *slot = DIGITS[nibbles.next().unwrap_or_default() as usize];
            }
        }
        debug_assert!(buffer.is_ascii());
        // SAFETY: the buffer consists of ASCII hex digits and hyphens only
        unsafe { fstr::FStr::from_inner_unchecked(buffer) }
    }
}

/// Character offsets of the hyphens in the 8-4-4-4-12 form.
const HYPHEN_POSITIONS: [usize; 4] = [8, 13, 18, 23];

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Parses the 8-4-4-4-12 form. Hex digits may be in either case; braces, URNs and the
    /// hyphen-less form are rejected.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let mut dst = [0u8; 16];
        let mut nibbles = 0;
        for (position, &c) in src.as_bytes().iter().enumerate() {
            let err = ParseError { position };
            if HYPHEN_POSITIONS.contains(&position) {
                if c != b'-' {
                    return Err(err);
                }
                continue;
            }
            if nibbles == 32 {
                return Err(err);
            }
            let digit = char::from(c).to_digit(16).ok_or(err)? as u8;
            dst[nibbles / 2] |= if nibbles % 2 == 0 { digit << 4 } else { digit };
            nibbles += 1;
        }
        if nibbles == 32 {
            Ok(Self(dst))
        } else {
            Err(ParseError {
                position: src.len(),
            })
        }
    }
}

/// Big-endian bytes, bucket first.
impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// The bucket lands in the 16 most-significant bits, so integer order matches byte order.
impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

/// The reserved UUID variants and the Nil and Max UUIDs.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    Nil,

    /// The variant field value of `0b0`, excluding the Nil UUID.
    Var0,

    /// The variant field value of `0b10`, used by UUIDv4 and therefore by COMB UUIDs.
    Var10,

    /// The variant field value of `0b110`.
    Var110,

    /// The reserved variant field value of `0b111`, excluding the Max UUID.
    VarReserved,

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    Max,
}

/// Error returned when a string is not in the 8-4-4-4-12 hexadecimal form.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {
    position: usize,
}

impl ParseError {
    /// Returns the byte offset of the first offending character, or the input length if the
    /// input ended early.
    pub const fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid UUID string at position {}: expected 8-4-4-4-12 hexadecimal digits",
            self.position
        )
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod std_ext {
    use super::{ParseError, Uuid};

    impl From<Uuid> for String {
        fn from(src: Uuid) -> Self {
            src.to_string()
        }
    }

    impl TryFrom<String> for Uuid {
        type Error = ParseError;

        fn try_from(src: String) -> Result<Self, Self::Error> {
            src.parse()
        }
    }

    impl std::error::Error for ParseError {}
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }

}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "an 8-4-4-4-12 UUID string or 16 raw bytes")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(|_| de::Error::invalid_length(value.len(), &self))
        }
    }

}
