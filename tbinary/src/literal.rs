//! Numeric literals as they appear in text values: `12`, `-1.5e3`, `.5`, `0x1F`, `0b101`, `Infinity`. Surrounding
//! whitespace is ignored and the empty string reads as zero.

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::{digit0, digit1, hex_digit1, oct_digit1, one_of},
    combinator::{all_consuming, map, opt},
    sequence::{pair, preceded, tuple},
    Finish,
    IResult,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal<'a> {
    /// `int.frac` times ten to the power of `exp`. Either digit string may be empty.
    Decimal { negative: bool, int: &'a str, frac: &'a str, exp: i64 },
    /// Unsigned digits in base 2, 8 or 16
    Radix { radix: u32, digits: &'a str },
    Infinity { negative: bool },
}

impl<'a> Literal<'a> {

    pub const ZERO: Literal<'static> = Literal::Decimal { negative: false, int: "", frac: "", exp: 0 };

    /// Parse a whole string. Returns `None` if anything but whitespace surrounds the literal.
    pub fn parse(input: &'a str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Some(Literal::ZERO);
        }
        all_consuming(literal)(trimmed).finish().ok().map(|(_, l)| l)
    }

    pub fn to_f64(&self) -> f64 {
        match *self {
            Literal::Decimal { negative, int, frac, exp } => {
                let text = format!("{}{}.{}e{}",
                    if negative { "-" } else { "" },
                    if int.is_empty() { "0" } else { int },
                    if frac.is_empty() { "0" } else { frac },
                    exp);
                text.parse().unwrap_or(f64::NAN)
            },
            Literal::Radix { radix, digits } => digits.chars()
                .filter_map(|c| c.to_digit(radix))
                .fold(0.0, |acc, d| acc * radix as f64 + d as f64),
            Literal::Infinity { negative: false } => f64::INFINITY,
            Literal::Infinity { negative: true } => f64::NEG_INFINITY,
        }
    }

}

fn sign(i: &str) -> IResult<&str, bool> {
    map(opt(one_of("+-")), |s| s == Some('-'))(i)
}

fn infinity(i: &str) -> IResult<&str, Literal> {
    map(pair(sign, tag("Infinity")), |(negative, _)| Literal::Infinity { negative })(i)
}

fn radix(i: &str) -> IResult<&str, Literal> {
    alt((
        map(preceded(tag_no_case("0x"), hex_digit1), |digits| Literal::Radix { radix: 16, digits }),
        map(preceded(tag_no_case("0o"), oct_digit1), |digits| Literal::Radix { radix: 8, digits }),
        map(preceded(tag_no_case("0b"), take_while1(|c| c == '0' || c == '1')), |digits| Literal::Radix { radix: 2, digits }),
    ))(i)
}

fn mantissa(i: &str) -> IResult<&str, (&str, &str)> {
    alt((
        pair(digit1, map(opt(preceded(tag("."), digit0)), |frac: Option<&str>| frac.unwrap_or(""))),
        map(preceded(tag("."), digit1), |frac| ("", frac)),
    ))(i)
}

fn exponent(i: &str) -> IResult<&str, i64> {
    map(preceded(one_of("eE"), pair(sign, digit1)), |(negative, digits): (bool, &str)| {
        // only overflow can make this fail, saturate instead
        let e = digits.parse::<i64>().unwrap_or(i64::MAX);
        if negative { -e } else { e }
    })(i)
}

fn decimal(i: &str) -> IResult<&str, Literal> {
    map(tuple((sign, mantissa, opt(exponent))), |(negative, (int, frac), exp)| {
        Literal::Decimal { negative, int, frac, exp: exp.unwrap_or(0) }
    })(i)
}

fn literal(i: &str) -> IResult<&str, Literal> {
    alt((infinity, radix, decimal))(i)
}
