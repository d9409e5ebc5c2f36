//! State/county view of a [`GeoId`] payload.
//!
//! The codec treats the seven digits as one integer. Downstream consumers that
//! group results by state read them as two FIPS-style fields instead: two
//! state digits followed by five county digits (`G0100010` is state `01`,
//! county `00010`).

use crate::GeoId;
use core::fmt;

const COUNTY_DIGITS: u32 = 5;
const COUNTY_MODULUS: u32 = 10_u32.pow(COUNTY_DIGITS);

/// The state and county fields of a [`GeoId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Fips {
    state: u8,
    county: u32,
}

impl Fips {
    /// The two-digit state code (`0..=99`).
    pub const fn state_code(&self) -> u8 {
        self.state
    }

    /// The five-digit county code (`0..=99_999`).
    pub const fn county_code(&self) -> u32 {
        self.county
    }

    /// The state code zero-padded to two digits.
    pub fn state(&self) -> String {
        format!("{:02}", self.state)
    }

    /// The county code zero-padded to five digits.
    pub fn county(&self) -> String {
        format!("{:05}", self.county)
    }
}

impl From<GeoId> for Fips {
    fn from(id: GeoId) -> Self {
        let raw = id.get();
        Self {
            // `raw <= 9_999_999`, so the quotient is at most 99.
            state: (raw / COUNTY_MODULUS) as u8,
            county: raw % COUNTY_MODULUS,
        }
    }
}

impl fmt::Display for Fips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:05}", self.state, self.county)
    }
}
