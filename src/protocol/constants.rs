//! Protocol constants
//!
//! Fixed byte sequences of the memcached text protocol.

/// Line terminator, appended to every outgoing command
pub const COMMAND_TERMINATOR: &[u8] = b"\r\n";

/// Marker that ends a successful storage reply
pub const SERVER_SUCCESS_END_RESPONSE: &[u8] = b"STORED";

/// Marker for a command the server did not recognise
pub const GENERIC_ERROR_RESPONSE: &[u8] = b"ERROR";

/// Prefix of an error caused by the client's input
pub const CLIENT_ERROR_RESPONSE: &[u8] = b"CLIENT_ERROR ";

/// Prefix of an error inside the server
pub const SERVER_ERROR_RESPONSE: &[u8] = b"SERVER_ERROR ";

/// Terminal line of retrieval and stats replies
pub const END_RESPONSE: &[u8] = b"END";

/// Header of one item in a retrieval reply
pub const VALUE_PREFIX: &[u8] = b"VALUE ";

/// Header of one line in a stats reply
pub const STAT_PREFIX: &[u8] = b"STAT ";
