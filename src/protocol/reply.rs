//! Reply framing
//!
//! Decides when a buffered reply is complete and pulls items out of
//! retrieval replies.
//!
//! ```text
//! VALUE <key> <flags> <bytes> [<cas>]\r\n
//! <data block of <bytes> bytes>\r\n
//! ...
//! END\r\n
//! ```

use bytes::Bytes;

use super::constants::{COMMAND_TERMINATOR, END_RESPONSE, STAT_PREFIX, VALUE_PREFIX};
use super::matcher::starts_with_marker;

/// One item from a retrieval reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueBlock {
    pub key: String,
    pub flags: u32,
    /// Present for `gets` replies
    pub cas: Option<u64>,
    pub data: Bytes,
}

/// Parsed `VALUE` header line
struct ValueHeader<'a> {
    key: &'a str,
    flags: u32,
    len: usize,
    cas: Option<u64>,
}

/// True once `buf` holds a whole reply.
///
/// `VALUE` items and `STAT` lines are skipped; the first other terminated
/// line ends the reply. A `VALUE` header that cannot be parsed, or whose
/// byte count runs past `usize`, also ends it, leaving the classifier to deal
/// with whatever arrived.
pub fn reply_complete(buf: &[u8]) -> bool {
    let mut pos = 0;

    loop {
        let line_end = match find_terminator(buf, pos) {
            Some(end) => end,
            None => return false,
        };
        let line = &buf[pos..line_end];
        let next = line_end + COMMAND_TERMINATOR.len();

        if starts_with_marker(line, VALUE_PREFIX) {
            let header = match parse_value_header(line) {
                Some(header) => header,
                None => return true,
            };
            let block_end = match next
                .checked_add(header.len)
                .and_then(|end| end.checked_add(COMMAND_TERMINATOR.len()))
            {
                Some(end) => end,
                None => return true,
            };
            if buf.len() < block_end {
                return false;
            }
            pos = block_end;
        } else if starts_with_marker(line, STAT_PREFIX) {
            pos = next;
        } else {
            return true;
        }
    }
}

/// Items of a retrieval reply, in the order the server sent them.
///
/// Stops at `END`, at the first line that is not a `VALUE` header, or at a
/// data block that is truncated or claims more bytes than can be addressed.
pub fn parse_values(buf: &[u8]) -> Vec<ValueBlock> {
    let mut values = Vec::new();
    let mut pos = 0;

    while let Some(line_end) = find_terminator(buf, pos) {
        let line = &buf[pos..line_end];
        if line == END_RESPONSE {
            break;
        }

        let header = match parse_value_header(line) {
            Some(header) => header,
            None => break,
        };

        let data_start = line_end + COMMAND_TERMINATOR.len();
        let data_end = match data_start.checked_add(header.len) {
            Some(end) if end <= buf.len() => end,
            _ => break,
        };

        values.push(ValueBlock {
            key: header.key.to_string(),
            flags: header.flags,
            cas: header.cas,
            data: Bytes::copy_from_slice(&buf[data_start..data_end]),
        });
        pos = data_end + COMMAND_TERMINATOR.len();
    }

    values
}

fn find_terminator(buf: &[u8], from: usize) -> Option<usize> {
    if from >= buf.len() {
        return None;
    }
    buf[from..]
        .windows(COMMAND_TERMINATOR.len())
        .position(|w| w == COMMAND_TERMINATOR)
        .map(|offset| from + offset)
}

fn parse_value_header(line: &[u8]) -> Option<ValueHeader<'_>> {
    if !starts_with_marker(line, VALUE_PREFIX) {
        return None;
    }
    let text = std::str::from_utf8(line).ok()?;
    let mut fields = text.split(' ').skip(1);

    let key = fields.next()?;
    let flags = fields.next()?.parse().ok()?;
    let len = fields.next()?.parse().ok()?;
    let cas = match fields.next() {
        Some(cas) => Some(cas.parse().ok()?),
        None => None,
    };

    Some(ValueHeader {
        key,
        flags,
        len,
        cas,
    })
}
