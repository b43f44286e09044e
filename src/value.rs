//! Locale-independent value parsers shared by the cue-settings and
//! region-declaration tuple grammars.

use nom::{
    character::complete::char, combinator::verify, number::complete::float,
    sequence::terminated, IResult, Parser,
};

/// Parse a leading percent literal (`D+(.D+)?%`) and divide it by 100.
///
/// Fails if no float is consumed, if the value is outside `[0, 100]`, or if
/// the character immediately following the number is not `%`.
pub fn parse_percent(input: &str) -> IResult<&str, f32> {
    let (input, v) = terminated(verify(float, |v: &f32| (0.0..=100.0).contains(v)), char('%'))
        .parse(input)?;
    Ok((input, v / 100.0))
}

/// Parse two comma-separated percent literals (`P%,P%`).
pub fn parse_percent_pair(input: &str) -> IResult<&str, (f32, f32)> {
    let (input, x) = parse_percent(input)?;
    let (input, _) = char(',')(input)?;
    let (input, y) = parse_percent(input)?;
    Ok((input, (x, y)))
}

/// Split `s` on `sep` into tokens, then each token on the first `kv`,
/// yielding `(key, value)` pairs. A token is dropped silently if `kv` does
/// not appear in it, appears as its first character, or appears as its last
/// character (an empty key or empty value).
pub fn tuple_stream(s: &str, sep: char, kv: char) -> impl Iterator<Item = (&str, &str)> {
    s.split(sep).filter_map(move |token| {
        let split_at = token.find(kv)?;
        if split_at == 0 || split_at + kv.len_utf8() == token.len() {
            return None;
        }
        let (key, rest) = token.split_at(split_at);
        Some((key, &rest[kv.len_utf8()..]))
    })
}
