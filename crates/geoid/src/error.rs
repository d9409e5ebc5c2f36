use crate::GeoId;
use core::fmt;

/// A result type defaulting to the crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All possible errors that `geoid` can produce.
///
/// Every variant is an input-validation failure raised synchronously by the
/// call that received the bad input. Nothing here is retried or recovered
/// internally; callers decide whether to skip the offending range or bail.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The identifier is not a `G` followed by exactly seven ASCII digits.
    #[error("invalid GeoID format: {input:?} ({reason})")]
    InvalidFormat {
        /// The rejected input, verbatim.
        input: String,
        /// Which structural check failed.
        reason: FormatReason,
    },

    /// The payload does not fit in the fixed seven-digit width.
    #[error("GeoID payload {value} exceeds {max}", max = GeoId::MAX_RAW)]
    Overflow { value: u64 },

    /// A partition was requested over a range whose start is after its end.
    #[error("degenerate range: start {start} is after end {end}")]
    DegenerateRange { start: GeoId, end: GeoId },

    /// The requested worker count cannot partition the range.
    ///
    /// Either zero workers were requested, or more workers than there are
    /// identifiers at stride 1 (`max`).
    #[error("invalid worker count {workers} (expected 1..={max})")]
    WorkerCountInvalid { workers: usize, max: u64 },
}

/// The structural check that rejected an identifier during decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FormatReason {
    /// The first byte is not the `G` prefix (or the input is empty).
    MissingPrefix { found: Option<u8> },
    /// The payload after the prefix is not exactly seven bytes long.
    InvalidLen { len: usize },
    /// A payload byte is not an ASCII digit.
    InvalidDigit { byte: u8, index: usize },
}

impl fmt::Display for FormatReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPrefix { found: None } => write!(f, "empty input"),
            Self::MissingPrefix { found: Some(byte) } => {
                write!(f, "expected prefix 'G', found byte {byte:#04x}")
            }
            Self::InvalidLen { len } => {
                write!(f, "expected {} payload digits, found {len}", GeoId::WIDTH)
            }
            Self::InvalidDigit { byte, index } => {
                write!(f, "non-digit byte {byte:#04x} at index {index}")
            }
        }
    }
}

impl Error {
    pub(crate) fn invalid_format(input: &str, reason: FormatReason) -> Self {
        Self::InvalidFormat {
            input: input.to_owned(),
            reason,
        }
    }
}
