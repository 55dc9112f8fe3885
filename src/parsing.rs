//! Parsers for measurements as they are written in running text: a number or range, an optional
//! error, an optional power-of-ten multiplier, and a unit string.

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{char, digit0, digit1, i32 as signed_int, multispace0, one_of};
use nom::combinator::{consumed, map_opt, opt, recognize, verify};
use nom::error::ParseError;
use nom::sequence::{delimited, pair, preceded, tuple};
use nom::IResult;

use crate::model::QuantityValue;

/// Largest power of ten, either sign, accepted in a `× 10^n` multiplier. Anything beyond this is
/// already outside the range of `f64`.
pub const MAX_TEN_POWER: i32 = 400;

/// A measurement as written, before its unit has been looked up.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMeasurement<'a> {
    pub value: QuantityValue,
    pub error: Option<f64>,
    /// The numeric part of the text, including any range, error, and multiplier.
    pub raw_value: &'a str,
    /// The unit token. Empty if the number wasn't followed by one.
    pub unit: &'a str,
}

/// Parses a complete measurement, e.g. `1.5-2 × 10^3 V/m` or `300 ± 5 K`.
pub fn measurement(input: &str) -> IResult<&str, RawMeasurement<'_>> {
    let (o, (raw_value, (first, second, error, power))) = consumed(tuple((
        number,
        opt(preceded(ws(range_separator), number)),
        opt(preceded(ws(plus_minus), number)),
        opt(ten_power),
    )))(input)?;

    let (o, unit) = opt(preceded(multispace0, unit_token))(o)?;

    let power = power.unwrap_or(0);
    let value = match second {
        Some(second) => QuantityValue::range(times_ten_to(first, power), times_ten_to(second, power)),
        None => QuantityValue::Single(times_ten_to(first, power)),
    };

    Ok((
        o,
        RawMeasurement {
            value,
            error: error.map(|e| times_ten_to(e, power)),
            raw_value: raw_value.trim_end(),
            unit: unit.unwrap_or(""),
        },
    ))
}

/// `x × 10^power`.
fn times_ten_to(x: f64, power: i32) -> f64 {
    if power >= 0 {
        x * 10f64.powi(power)
    } else {
        x / 10f64.powi(power.saturating_neg())
    }
}

/// Parses a decimal number with an optional sign and exponent: `3`, `-0.5`, `.25`, `1.6e-19`.
pub fn number(input: &str) -> IResult<&str, f64> {
    map_opt(
        recognize(tuple((
            opt(sign),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        |s: &str| normalize_minus(s).parse::<f64>().ok(),
    )(input)
}

/// Parses a `× 10^n` multiplier, also accepting `x`, `*`, `**`, and superscript exponents. The
/// exponent must be within [`MAX_TEN_POWER`].
pub fn ten_power(input: &str) -> IResult<&str, i32> {
    preceded(
        pair(ws(times_sign), tag("10")),
        verify(
            alt((preceded(alt((tag("^"), tag("**"))), signed_int), superscript_int)),
            |n: &i32| (-MAX_TEN_POWER..=MAX_TEN_POWER).contains(n),
        ),
    )(input)
}

/// Parses the separator of a range: a hyphen or dash, a tilde, or the word `to`.
pub fn range_separator(input: &str) -> IResult<&str, &str> {
    alt((
        tag("to"),
        tag("–"),
        tag("—"),
        tag("~"),
        tag("-"),
        tag("−"),
    ))(input)
}

/// Parses a plus-minus sign, in the usual ASCII spellings too.
pub fn plus_minus(input: &str) -> IResult<&str, &str> {
    alt((tag("±"), tag("+/-"), tag("+-")))(input)
}

/// Parses a unit token: everything up to whitespace or punctuation that can't be part of a unit.
pub fn unit_token(input: &str) -> IResult<&str, &str> {
    take_while1(is_unit_char)(input)
}

pub fn is_unit_char(c: char) -> bool {
    c.is_alphanumeric() || "/·*^°℃℉\u{030A}".contains(c)
}

/// Parses a minus sign, in many formats.
pub fn minus_sign(input: &str) -> IResult<&str, char> {
    one_of("-﹣－−")(input)
}

fn sign(input: &str) -> IResult<&str, char> {
    alt((minus_sign, char('+')))(input)
}

fn times_sign(input: &str) -> IResult<&str, char> {
    one_of("×x*")(input)
}

fn normalize_minus(s: &str) -> String {
    s.chars()
        .map(|c| if "﹣－−".contains(c) { '-' } else { c })
        .collect()
}

/// The ASCII character for a superscript digit or sign.
fn from_superscript(c: char) -> Option<char> {
    match c {
        '\u{2070}' => Some('0'),
        '\u{00B9}' => Some('1'),
        '\u{00B2}' => Some('2'),
        '\u{00B3}' => Some('3'),
        '\u{2074}' => Some('4'),
        '\u{2075}' => Some('5'),
        '\u{2076}' => Some('6'),
        '\u{2077}' => Some('7'),
        '\u{2078}' => Some('8'),
        '\u{2079}' => Some('9'),
        '\u{207A}' => Some('+'),
        '\u{207B}' => Some('-'),
        _ => None,
    }
}

/// Parses an integer written in superscript, like `⁻³`.
fn superscript_int(input: &str) -> IResult<&str, i32> {
    map_opt(
        take_while1(|c: char| from_superscript(c).is_some()),
        |s: &str| {
            s.chars()
                .map(from_superscript)
                .collect::<Option<String>>()?
                .parse()
                .ok()
        },
    )(input)
}

/// A combinator that takes a parser `inner` and produces a parser that also consumes both leading and
/// trailing whitespace, returning the output of `inner`.
fn ws<'a, F: 'a, O, E: ParseError<&'a str>>(
    inner: F,
) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
where
    F: Fn(&'a str) -> IResult<&'a str, O, E>,
{
    delimited(multispace0, inner, multispace0)
}
