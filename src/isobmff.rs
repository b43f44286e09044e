//! ISOBMFF payload demux: a pull iterator over nested boxes.

use nom::{
    bytes::complete::take,
    number::complete::{be_u32, be_u64},
    IResult,
};

/// Outer cue box carrying a fully-formed cue.
pub const ATOM_VTTC: &str = "vttc";
/// Outer cue box carrying a fully-formed cue (ISOBMFF extension tag).
pub const ATOM_VTTX: &str = "vttx";
/// Outer box marking an explicitly empty cue: iterated, but yields no cue.
pub const ATOM_VTTE: &str = "vtte";
/// Inner box: the cue identifier.
pub const ATOM_IDEN: &str = "iden";
/// Inner box: the cue-settings tuple stream.
pub const ATOM_STTG: &str = "sttg";
/// Inner box: the cue payload text fed to the DOM builder.
pub const ATOM_PAYL: &str = "payl";

/// One box header plus a borrowed slice of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsobmffBox<'a> {
    pub box_type: &'a str,
    pub payload: &'a [u8],
}

/// Pull iterator over a contiguous buffer of sibling ISOBMFF boxes.
///
/// A 4-byte big-endian size and 4-char type form the ordinary header; a size
/// of `1` means the real size follows as a big-endian `u64`; a size of `0`
/// means "the rest of this buffer". Tolerates nested iteration: construct a
/// fresh [`BoxIterator`] over a yielded box's `payload` to descend into it.
#[derive(Debug, Clone)]
pub struct BoxIterator<'a> {
    remaining: &'a [u8],
}

impl<'a> BoxIterator<'a> {
    #[must_use]
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { remaining: buffer }
    }
}

fn box_header(input: &[u8]) -> IResult<&[u8], (u64, &str)> {
    let (input, size32) = be_u32(input)?;
    let (input, type_bytes) = take(4usize)(input)?;
    let box_type = std::str::from_utf8(type_bytes).unwrap_or("????");
    if size32 == 1 {
        let (input, size64) = be_u64(input)?;
        Ok((input, (size64, box_type)))
    } else {
        Ok((input, (u64::from(size32), box_type)))
    }
}

impl<'a> Iterator for BoxIterator<'a> {
    type Item = IsobmffBox<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.len() < 8 {
            self.remaining = &[];
            return None;
        }

        let (rest, (size, box_type)) = box_header(self.remaining).ok()?;
        let header_len = self.remaining.len() - rest.len();

        let body_len = if size == 0 {
            rest.len()
        } else {
            (size as usize).checked_sub(header_len)?
        };
        if body_len > rest.len() {
            // Truncated box: stop iterating rather than read past the end.
            self.remaining = &[];
            return None;
        }

        let (payload, tail) = rest.split_at(body_len);
        self.remaining = tail;

        Some(IsobmffBox { box_type, payload })
    }
}
