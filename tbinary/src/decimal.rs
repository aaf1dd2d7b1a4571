//! Integers of arbitrary size, only as far as the wide integer encoder needs them: built from literals, floats or
//! native integers and rendered as a signed base-16 string.

use crate::literal::Literal;
use std::fmt::Write;

/// Exponents above this are refused instead of materializing a gigantic digit string
pub const MAX_EXPONENT: i64 = 1000;

/// Sign and magnitude. The magnitude is stored as little endian base 2^32 limbs without trailing zero limbs, so zero
/// has no limbs and is never negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
    negative: bool,
    limbs: Vec<u32>,
}

impl Decimal {

    pub fn zero() -> Self {
        Decimal { negative: false, limbs: Vec::new() }
    }

    /// Fractional digits are dropped, so the value gets truncated towards zero. Returns `None` for infinities and for
    /// exponents above `MAX_EXPONENT`.
    pub fn from_literal(literal: &Literal) -> Option<Self> {
        match *literal {
            Literal::Infinity { .. } => None,
            Literal::Radix { radix, digits } => {
                let mut d = Self::zero();
                for c in digits.chars() {
                    d.mul_add(radix, c.to_digit(radix)?);
                }
                Some(d)
            },
            Literal::Decimal { exp, .. } if exp > MAX_EXPONENT => None,
            Literal::Decimal { negative, int, frac, exp } => {
                let point = int.len() as i64 + exp;
                if point <= 0 {
                    return Some(Self::zero());
                }
                let point = point as usize;
                let mut d = Self::zero();
                for c in int.chars().chain(frac.chars()).take(point) {
                    d.mul_add(10, c.to_digit(10)?);
                }
                for _ in (int.len() + frac.len())..point {
                    d.mul_add(10, 0);
                }
                d.negative = negative && !d.is_zero();
                Some(d)
            },
        }
    }

    /// Truncates towards zero. Returns `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        // exact decimal expansion of the integral part
        let text = format!("{:.0}", value.trunc());
        Literal::parse(&text).and_then(|l| Self::from_literal(&l))
    }

    pub fn from_i128(value: i128) -> Self {
        let mut magnitude = value.unsigned_abs();
        let mut limbs = Vec::new();
        while magnitude != 0 {
            limbs.push(magnitude as u32);
            magnitude >>= 32;
        }
        Decimal { negative: value < 0, limbs }
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Lowercase base-16 digits without leading zeros, prefixed with `-` for negative values
    pub fn to_hex_string(&self) -> String {
        let mut out = String::with_capacity(self.limbs.len() * 8 + 1);
        if self.negative {
            out.push('-');
        }
        match self.limbs.split_last() {
            None => out.push('0'),
            Some((top, rest)) => {
                // writing into a String cannot fail
                let _ = write!(out, "{:x}", top);
                for limb in rest.iter().rev() {
                    let _ = write!(out, "{:08x}", limb);
                }
            },
        }
        out
    }

    /// self = self * mul + add
    fn mul_add(&mut self, mul: u32, add: u32) {
        let mut carry = add as u64;
        for limb in self.limbs.iter_mut() {
            let v = *limb as u64 * mul as u64 + carry;
            *limb = v as u32;
            carry = v >> 32;
        }
        if carry != 0 {
            self.limbs.push(carry as u32);
        }
    }

}

#[cfg(test)]
mod tests {
    use super::Decimal;
    use crate::literal::Literal;

    fn hex(text: &str) -> String {
        Decimal::from_literal(&Literal::parse(text).unwrap()).unwrap().to_hex_string()
    }

    #[test]
    fn literals() {
        assert_eq!("0", hex("0"));
        assert_eq!("0", hex("-0"));
        assert_eq!("ff", hex("255"));
        assert_eq!("-1", hex("-1"));
        assert_eq!("100000000", hex("4294967296"));
        assert_eq!("7fffffffffffffff", hex("9223372036854775807"));
        assert_eq!("-8000000000000000", hex("-9223372036854775808"));
        assert_eq!("1ffffffffffffffff", hex("36893488147419103231"));
    }

    #[test]
    fn fractions_and_exponents() {
        assert_eq!("1", hex("1.9"));
        assert_eq!("-1", hex("-1.9"));
        assert_eq!("0", hex("-0.5"));
        assert_eq!("3e8", hex("1e3"));
        assert_eq!("3e8", hex("1.0e3"));
        assert_eq!("4d2", hex("12345e-1"));
        assert_eq!("0", hex("1e-3"));
        assert_eq!("1f", hex("0x1f"));
    }

    #[test]
    fn refused() {
        assert_eq!(None, Decimal::from_literal(&Literal::parse("Infinity").unwrap()));
        assert_eq!(None, Decimal::from_literal(&Literal::parse("1e1001").unwrap()));
        assert_eq!(None, Decimal::from_f64(f64::NAN));
        assert_eq!(None, Decimal::from_f64(f64::NEG_INFINITY));
    }

    #[test]
    fn floats() {
        assert_eq!("-2", Decimal::from_f64(-2.75).unwrap().to_hex_string());
        assert_eq!("0", Decimal::from_f64(-0.0).unwrap().to_hex_string());
        assert_eq!("10000000000000", Decimal::from_f64(2f64.powi(52)).unwrap().to_hex_string());
        assert_eq!("56bc75e2d63100000", Decimal::from_f64(1e20).unwrap().to_hex_string());
    }

    #[test]
    fn native_integers() {
        assert_eq!(Decimal::from_i128(-255), Decimal::from_literal(&Literal::parse("-255").unwrap()).unwrap());
        assert_eq!("-80000000000000000000000000000000", Decimal::from_i128(i128::MIN).to_hex_string());
        assert_eq!("0", Decimal::from_i128(0).to_hex_string());
    }

}
