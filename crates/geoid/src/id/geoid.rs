use super::codec::{self, ENCODED_LEN};
use crate::{Error, Result};
use core::{fmt, str::FromStr};

/// A county identifier on the SLOPE platform: `G` followed by seven
/// zero-padded decimal digits, e.g. `G0100010`.
///
/// The payload is a single unsigned integer in `0..=9_999_999`. It is not
/// split into sub-fields here; see [`crate::fips::Fips`] for the state/county
/// view.
///
/// A `GeoId` can only hold payloads that fit the fixed width, so encoding
/// never overflows and `GeoId::decode(&id.encode()) == Ok(id)` always holds.
///
/// # Example
///
/// ```
/// use geoid::GeoId;
///
/// let id: GeoId = "G0100010".parse().unwrap();
/// assert_eq!(id.get(), 100_010);
/// assert_eq!(id.to_string(), "G0100010");
/// assert_eq!(GeoId::new(42).unwrap().encode(), "G0000042");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GeoId(u32);

impl GeoId {
    /// The required leading character.
    pub const PREFIX: char = codec::PREFIX as char;

    /// Number of payload digits.
    pub const WIDTH: usize = codec::WIDTH;

    /// Length in bytes of an encoded identifier.
    pub const ENCODED_LEN: usize = ENCODED_LEN;

    /// Largest payload that fits in [`Self::WIDTH`] digits.
    pub const MAX_RAW: u32 = 9_999_999;

    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(Self::MAX_RAW);

    /// Constructs an identifier from its numeric payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] if `raw` needs more than seven digits.
    pub fn new(raw: u32) -> Result<Self> {
        if raw > Self::MAX_RAW {
            return Err(Error::Overflow {
                value: u64::from(raw),
            });
        }
        Ok(Self(raw))
    }

    /// Wraps a payload already known to be `<= MAX_RAW`.
    #[inline]
    pub(crate) const fn from_raw_unchecked(raw: u32) -> Self {
        debug_assert!(raw <= Self::MAX_RAW);
        Self(raw)
    }

    /// Returns the numeric payload.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Decodes an identifier string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if the input does not start with `G`,
    /// or if what follows is not exactly seven ASCII digits.
    pub fn decode(s: &str) -> Result<Self> {
        codec::decode_decimal(s)
            .map(Self)
            .map_err(|reason| Error::invalid_format(s, reason))
    }

    /// Encodes this identifier into a freshly allocated [`String`].
    pub fn encode(&self) -> String {
        let mut buf = [0_u8; ENCODED_LEN];
        self.encode_to_buf(&mut buf);
        buf.iter().map(|&b| b as char).collect()
    }

    /// Encodes this identifier into `buf` without allocating.
    ///
    /// ```
    /// use geoid::GeoId;
    ///
    /// let mut buf = [0_u8; GeoId::ENCODED_LEN];
    /// GeoId::new(5_600_450).unwrap().encode_to_buf(&mut buf);
    /// assert_eq!(&buf, b"G5600450");
    /// ```
    #[inline]
    pub fn encode_to_buf(&self, buf: &mut [u8; ENCODED_LEN]) {
        codec::encode_decimal(self.0, buf);
    }

    /// Adds `n` to the payload, returning `None` past [`GeoId::MAX`].
    #[inline]
    pub fn checked_add(self, n: u32) -> Option<Self> {
        self.0
            .checked_add(n)
            .filter(|&raw| raw <= Self::MAX_RAW)
            .map(Self)
    }
}

impl fmt::Display for GeoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0_u8; ENCODED_LEN];
        self.encode_to_buf(&mut buf);
        // Encoded output is always ASCII.
        let s = core::str::from_utf8(&buf).map_err(|_| fmt::Error)?;
        f.pad(s)
    }
}

impl fmt::Debug for GeoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GeoId")
            .field(&format_args!("{self}"))
            .finish()
    }
}

impl FromStr for GeoId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl TryFrom<&str> for GeoId {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl TryFrom<u32> for GeoId {
    type Error = Error;

    fn try_from(raw: u32) -> Result<Self> {
        Self::new(raw)
    }
}

impl From<GeoId> for u32 {
    fn from(id: GeoId) -> Self {
        id.0
    }
}

impl PartialEq<str> for GeoId {
    fn eq(&self, other: &str) -> bool {
        Self::decode(other).is_ok_and(|id| id == *self)
    }
}

impl PartialEq<&str> for GeoId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
