use std::fmt::{Debug, Display};

/// Wrapper around errors that can be produced while opening or feeding the decoder.
///
/// Most malformed input (bad percentages, unknown settings keys, a missing
/// region reference, an empty cue) is *not* an [`Error`]: the decoder treats
/// it as a silent fallback, per the source it is ported from. Only the two
/// cases below are surfaced to the caller.
#[non_exhaustive]
pub enum Error {
    /// `Decoder::open` was asked to open a codec tag other than WebVTT
    CodecMismatch,
    /// A box payload, or the extradata blob, was not valid UTF-8
    Utf8(std::str::Utf8Error),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Utf8(err) => Some(err),
            Error::CodecMismatch => None,
        }
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")?;
        if let Some(source) = std::error::Error::source(self) {
            writeln!(f, "Caused by:\n\t{source}")?;
        }
        Ok(())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::CodecMismatch => {
                write!(f, "codec tag does not indicate a WebVTT track")
            }
            Error::Utf8(err) => {
                write!(f, "payload was not valid UTF-8: {err}")
            }
        }
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(value: std::str::Utf8Error) -> Self {
        Self::Utf8(value)
    }
}
