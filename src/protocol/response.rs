//! Response definitions
//!
//! Classification of raw replies into a small set of outcomes.

use bytes::Bytes;

use super::constants::{
    CLIENT_ERROR_RESPONSE, COMMAND_TERMINATOR, GENERIC_ERROR_RESPONSE, SERVER_ERROR_RESPONSE,
    SERVER_SUCCESS_END_RESPONSE,
};
use super::matcher::{ends_with_marker, starts_with_marker, terminated};

/// Outcome of one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResponseStatus {
    Ok,
    Error,
    ClientError,
    ServerError,
}

/// Result of executing one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    /// Classified outcome
    pub status: CommandResponseStatus,

    /// Reply bytes exactly as received; `None` if nothing was received
    pub raw_data: Option<Bytes>,

    /// Reply decoded as text. Only filled in when `status` is `Ok`.
    pub response_text: String,
}

impl CommandResponse {
    /// Classify `raw` and build the response around it
    pub fn from_raw(raw: Option<Bytes>) -> Self {
        let status = classify_response(raw.as_deref());
        let response_text = match (&raw, status) {
            (Some(bytes), CommandResponseStatus::Ok) => decode_ascii(bytes),
            _ => String::new(),
        };

        Self {
            status,
            raw_data: raw,
            response_text,
        }
    }

    /// An `Error` response with no reply data
    pub fn error() -> Self {
        Self {
            status: CommandResponseStatus::Error,
            raw_data: None,
            response_text: String::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == CommandResponseStatus::Ok
    }
}

/// Classify a raw reply.
///
/// Success and generic-error markers are matched against the tail of the
/// reply, client and server errors against its head. Replies matching none
/// of the markers are `Ok`, including malformed or truncated ones.
pub fn classify_response(raw: Option<&[u8]>) -> CommandResponseStatus {
    let raw = match raw {
        Some(raw) => raw,
        None => return CommandResponseStatus::Error,
    };

    if ends_with_marker(raw, &terminated(SERVER_SUCCESS_END_RESPONSE, COMMAND_TERMINATOR)) {
        return CommandResponseStatus::Ok;
    }

    if ends_with_marker(raw, &terminated(GENERIC_ERROR_RESPONSE, COMMAND_TERMINATOR)) {
        return CommandResponseStatus::Error;
    }

    if starts_with_marker(raw, CLIENT_ERROR_RESPONSE) {
        return CommandResponseStatus::ClientError;
    }

    if starts_with_marker(raw, SERVER_ERROR_RESPONSE) {
        return CommandResponseStatus::ServerError;
    }

    CommandResponseStatus::Ok
}

/// One byte per character; bytes outside ASCII decode as `?`
fn decode_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '?' })
        .collect()
}
