//! 64 bit integers on wire, assembled from two 32 bit words.
//!
//! The input is a signed base-16 string as produced by `Decimal::to_hex_string`. The last eight digits form the low
//! word, the eight digits before them the high word; anything further left is dropped, so magnitudes wider than
//! 64 bits wrap silently. Negative values are negated across the word pair in two's complement.

use crate::decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Wide {
    pub high: u32,
    pub low: u32,
}

impl Wide {

    pub fn from_hex(hex: &str) -> Self {
        let (negative, digits) = match hex.strip_prefix('-') {
            Some(rest) => (true, rest),
            None       => (false, hex),
        };
        let digits = digits.as_bytes();
        let len = digits.len();
        let low = Self::word(&digits[len.saturating_sub(8)..]);
        let high = Self::word(&digits[len.saturating_sub(16)..len.saturating_sub(8)]);
        if negative {
            let low = (!low).wrapping_add(1);
            // the carry out of the low word only survives if the low word was zero
            let high = (!high).wrapping_add((low == 0) as u32);
            Wide { high, low }
        } else {
            Wide { high, low }
        }
    }

    pub fn from_decimal(value: &Decimal) -> Self {
        Self::from_hex(&value.to_hex_string())
    }

    /// Big endian, high word first
    pub fn to_be_bytes(&self) -> [u8; 8] {
        let mut buf = [0u8; 8];
        buf[..4].copy_from_slice(&self.high.to_be_bytes());
        buf[4..].copy_from_slice(&self.low.to_be_bytes());
        buf
    }

    /// Reinterprets the word pair as a two's complement integer
    pub fn to_i64(&self) -> i64 {
        ((self.high as u64) << 32 | self.low as u64) as i64
    }

    /// Digits that are no valid base-16 number read as zero, as does the empty slice
    fn word(digits: &[u8]) -> u32 {
        std::str::from_utf8(digits).ok()
            .and_then(|d| u32::from_str_radix(d, 16).ok())
            .unwrap_or(0)
    }

}

impl From<i64> for Wide {
    fn from(v: i64) -> Self {
        Self::from_decimal(&Decimal::from_i128(i128::from(v)))
    }
}

#[cfg(test)]
mod tests {
    use super::Wide;

    #[test]
    fn minus_one() {
        assert_eq!([0xff; 8], Wide::from(-1).to_be_bytes());
        assert_eq!([0xff; 8], Wide::from_hex("-1").to_be_bytes());
    }

    #[test]
    fn carry_into_high_word() {
        assert_eq!([0, 0, 0, 1, 0, 0, 0, 0], Wide::from_hex("100000000").to_be_bytes());
        assert_eq!([0xff, 0xff, 0xff, 0xff, 0, 0, 0, 0], Wide::from_hex("-100000000").to_be_bytes());
        assert_eq!(-(1 << 32), Wide::from_hex("-100000000").to_i64());
    }

    #[test]
    fn extremes() {
        assert_eq!(i64::MAX, Wide::from(i64::MAX).to_i64());
        assert_eq!(i64::MIN, Wide::from(i64::MIN).to_i64());
        assert_eq!([0x80, 0, 0, 0, 0, 0, 0, 0], Wide::from(i64::MIN).to_be_bytes());
        assert_eq!(Wide { high: 0, low: 0 }, Wide::from_hex("0"));
        assert_eq!(Wide { high: 0, low: 0 }, Wide::from_hex("-0"));
    }

    #[test]
    fn every_sign_and_width() {
        for shift in 0..63 {
            for v in [1i64 << shift, (1i64 << shift) - 1, (1i64 << shift) + 1] {
                assert_eq!(v, Wide::from(v).to_i64());
                assert_eq!(-v, Wide::from(-v).to_i64());
                assert_eq!(v.to_be_bytes(), Wide::from(v).to_be_bytes());
            }
        }
    }

    #[test]
    fn wider_than_64_bits_wraps() {
        // 2^64 + 5
        assert_eq!(5, Wide::from_hex("10000000000000005").to_i64());
        assert_eq!(-5, Wide::from_hex("-10000000000000005").to_i64());
    }

}
