//! Serde support, enabled by the `serde` feature.
//!
//! [`GeoId`] serializes as its encoded string (`"G0100010"`) and deserializes
//! through [`GeoId::decode`], so malformed identifiers are rejected at the
//! boundary. Use [`as_raw`] with `#[serde(with = "...")]` to store the numeric
//! payload instead.
//!
//! [`GeoIdRange`] serializes as `{"start": "G0100010", "end": "G0100019"}`,
//! with `end` set to `null` for an empty range.

use crate::{GeoId, GeoIdRange};
use core::fmt;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
    ser::SerializeStruct,
};

impl Serialize for GeoId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut buf = [0_u8; GeoId::ENCODED_LEN];
        self.encode_to_buf(&mut buf);
        let encoded = core::str::from_utf8(&buf).map_err(serde::ser::Error::custom)?;
        s.serialize_str(encoded)
    }
}

impl<'de> Deserialize<'de> for GeoId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct GeoIdVisitor;

        impl Visitor<'_> for GeoIdVisitor {
            type Value = GeoId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a GeoID string such as \"G0100010\"")
            }

            #[inline]
            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                GeoId::decode(v).map_err(E::custom)
            }
        }

        d.deserialize_str(GeoIdVisitor)
    }
}

impl Serialize for GeoIdRange {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut state = s.serialize_struct("GeoIdRange", 2)?;
        state.serialize_field("start", &self.start())?;
        state.serialize_field("end", &self.end())?;
        state.end()
    }
}

/// (De)serialize a [`GeoId`] as its numeric payload.
pub mod as_raw {
    use super::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::GeoId;

    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S: Serializer>(id: &GeoId, s: S) -> Result<S::Ok, S::Error> {
        id.get().serialize(s)
    }

    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the payload
    /// needs more than seven digits.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<GeoId, D::Error> {
        let raw = u32::deserialize(d)?;
        GeoId::new(raw).map_err(serde::de::Error::custom)
    }
}
