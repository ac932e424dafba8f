use nom::bytes::streaming::tag;
use nom::combinator::verify;
use nom::number::streaming::u8;
use nom::sequence::{preceded, tuple};
use nom::IResult;

use crate::frame::{checksum, Frame, SYNC};

type Buf = [u8];

const SYNC_TAG: &Buf = &[SYNC];

/// Parse one wire frame from the start of `buf`.
///
/// Returns `Incomplete` when fewer than four bytes are available and
/// an error when the bytes at the start of `buf` are not a valid frame.
pub(crate) fn frame(buf: &Buf) -> IResult<&Buf, Frame> {
    let (buf, (addr_seq, data)) = preceded(tag(SYNC_TAG), tuple((u8, u8)))(buf)?;
    let (buf, sum) = verify(u8, |sum| checksum(addr_seq, data) == *sum)(buf)?;
    Ok((buf, Frame::from_bytes([SYNC, addr_seq, data, sum])))
}
