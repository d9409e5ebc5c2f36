use crate::FormatReason;

pub(crate) const PREFIX: u8 = b'G';
pub(crate) const WIDTH: usize = 7;
pub(crate) const ENCODED_LEN: usize = WIDTH + 1;

/// Writes `G` followed by `value` zero-padded to [`WIDTH`] digits.
///
/// The caller guarantees `value` has at most [`WIDTH`] decimal digits; any
/// higher digits are silently dropped. [`crate::GeoId`] upholds this at
/// construction.
#[inline]
pub(crate) fn encode_decimal(mut value: u32, buf: &mut [u8; ENCODED_LEN]) {
    buf[0] = PREFIX;
    for slot in buf[1..].iter_mut().rev() {
        // `value % 10` is in 0..=9, so the cast cannot truncate.
        *slot = b'0' + (value % 10) as u8;
        value /= 10;
    }
}

/// Decodes `G` + seven ASCII digits into the numeric payload.
///
/// Returns the first structural failure. Indices in
/// [`FormatReason::InvalidDigit`] refer to the whole input, prefix included.
#[inline]
pub(crate) fn decode_decimal(encoded: &str) -> Result<u32, FormatReason> {
    let bytes = encoded.as_bytes();
    match bytes.first() {
        Some(&PREFIX) => {}
        found => {
            return Err(FormatReason::MissingPrefix {
                found: found.copied(),
            });
        }
    }

    let payload = &bytes[1..];
    if payload.len() != WIDTH {
        return Err(FormatReason::InvalidLen { len: payload.len() });
    }

    let mut acc = 0_u32;
    for (i, &b) in payload.iter().enumerate() {
        if !b.is_ascii_digit() {
            return Err(FormatReason::InvalidDigit {
                byte: b,
                index: i + 1,
            });
        }
        acc = acc * 10 + u32::from(b - b'0');
    }

    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_str(value: u32) -> String {
        let mut buf = [0_u8; ENCODED_LEN];
        encode_decimal(value, &mut buf);
        String::from_utf8(buf.to_vec()).unwrap()
    }

    #[test]
    fn encodes_zero_padded() {
        assert_eq!(encode_str(0), "G0000000");
        assert_eq!(encode_str(100_010), "G0100010");
        assert_eq!(encode_str(5_600_450), "G5600450");
        assert_eq!(encode_str(9_999_999), "G9999999");
    }

    #[test]
    fn decodes_payload() {
        assert_eq!(decode_decimal("G0100010"), Ok(100_010));
        assert_eq!(decode_decimal("G0000000"), Ok(0));
        assert_eq!(decode_decimal("G9999999"), Ok(9_999_999));
    }

    #[test]
    fn rejects_missing_prefix() {
        assert_eq!(
            decode_decimal("X0100010"),
            Err(FormatReason::MissingPrefix { found: Some(b'X') })
        );
        assert_eq!(
            decode_decimal("g0100010"),
            Err(FormatReason::MissingPrefix { found: Some(b'g') })
        );
        assert_eq!(
            decode_decimal(""),
            Err(FormatReason::MissingPrefix { found: None })
        );
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            decode_decimal("G100010"),
            Err(FormatReason::InvalidLen { len: 6 })
        );
        assert_eq!(
            decode_decimal("G01000100"),
            Err(FormatReason::InvalidLen { len: 8 })
        );
        assert_eq!(decode_decimal("G"), Err(FormatReason::InvalidLen { len: 0 }));
    }

    #[test]
    fn rejects_non_digits() {
        assert_eq!(
            decode_decimal("G01000A0"),
            Err(FormatReason::InvalidDigit {
                byte: b'A',
                index: 6
            })
        );
        assert_eq!(
            decode_decimal("G-100010"),
            Err(FormatReason::InvalidDigit {
                byte: b'-',
                index: 1
            })
        );
    }

    #[test]
    fn multibyte_input_is_rejected_by_length() {
        // "é" is two bytes, so the payload is eight bytes long.
        assert_eq!(
            decode_decimal("G010001é"),
            Err(FormatReason::InvalidLen { len: 8 })
        );
    }
}
