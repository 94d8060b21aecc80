//! Tests for reply classification
//!
//! These tests verify:
//! - Each marker maps to its status
//! - Rule order (suffix checks before prefix checks)
//! - Response text is only decoded for Ok replies

use bytes::Bytes;
use memcmd::protocol::{classify_response, CommandResponse, CommandResponseStatus};

fn response(raw: &'static [u8]) -> CommandResponse {
    CommandResponse::from_raw(Some(Bytes::from_static(raw)))
}

fn classify(raw: &[u8]) -> CommandResponseStatus {
    classify_response(Some(raw))
}

// =============================================================================
// Reply Scenarios
// =============================================================================

#[test]
fn test_stored_is_ok() {
    let resp = response(b"STORED\r\n");
    assert_eq!(resp.status, CommandResponseStatus::Ok);
    assert_eq!(resp.response_text, "STORED\r\n");
    assert_eq!(resp.raw_data.as_deref(), Some(&b"STORED\r\n"[..]));
}

#[test]
fn test_generic_error() {
    let resp = response(b"ERROR\r\n");
    assert_eq!(resp.status, CommandResponseStatus::Error);
    assert!(resp.response_text.is_empty());
    assert_eq!(resp.raw_data.as_deref(), Some(&b"ERROR\r\n"[..]));
}

#[test]
fn test_client_error() {
    let resp = response(b"CLIENT_ERROR bad command line format\r\n");
    assert_eq!(resp.status, CommandResponseStatus::ClientError);
    assert!(resp.response_text.is_empty());
    assert_eq!(
        resp.raw_data.as_deref(),
        Some(&b"CLIENT_ERROR bad command line format\r\n"[..])
    );
}

#[test]
fn test_server_error() {
    let resp = response(b"SERVER_ERROR out of memory\r\n");
    assert_eq!(resp.status, CommandResponseStatus::ServerError);
    assert!(resp.response_text.is_empty());
}

#[test]
fn test_absent_reply_is_error() {
    let resp = CommandResponse::from_raw(None);
    assert_eq!(resp.status, CommandResponseStatus::Error);
    assert!(resp.raw_data.is_none());
    assert!(resp.response_text.is_empty());
}

#[test]
fn test_retrieval_reply_falls_through_to_ok() {
    let raw = b"VALUE mykey 0 3\r\nabc\r\nEND\r\n";
    let resp = response(raw);
    assert_eq!(resp.status, CommandResponseStatus::Ok);
    assert_eq!(resp.raw_data.as_deref(), Some(&raw[..]));
    assert_eq!(resp.response_text, "VALUE mykey 0 3\r\nabc\r\nEND\r\n");
}

// =============================================================================
// Rule Ordering
// =============================================================================

#[test]
fn test_empty_reply_is_ok() {
    assert_eq!(classify(b""), CommandResponseStatus::Ok);
}

#[test]
fn test_success_suffix_beats_client_error_prefix() {
    // Starts like a client error but ends like a stored reply
    let raw = b"CLIENT_ERROR x\r\nSTORED\r\n";
    assert_eq!(classify(raw), CommandResponseStatus::Ok);
}

#[test]
fn test_generic_error_suffix_beats_server_error_prefix() {
    let raw = b"SERVER_ERROR\r\nERROR\r\n";
    assert_eq!(classify(raw), CommandResponseStatus::Error);
}

#[test]
fn test_bare_client_error_without_message_is_error() {
    // "CLIENT_ERROR\r\n" ends with "ERROR\r\n"
    assert_eq!(
        classify(b"CLIENT_ERROR\r\n"),
        CommandResponseStatus::Error
    );
}

#[test]
fn test_error_marker_mid_payload_ignored() {
    let raw = b"VALUE k 0 7\r\nERROR\r\n\r\nEND\r\n";
    assert_eq!(classify(raw), CommandResponseStatus::Ok);
}

#[test]
fn test_unrecognised_replies_default_to_ok() {
    let replies: [&[u8]; 5] = [
        b"NOT_STORED\r\n",
        b"NOT_FOUND\r\n",
        b"DELETED\r\n",
        b"42\r\n",
        b"garbage without terminator",
    ];
    for raw in replies {
        assert_eq!(classify(raw), CommandResponseStatus::Ok);
    }
}

#[test]
fn test_non_ascii_bytes_decode_as_question_marks() {
    let raw: &'static [u8] = b"VALUE k 0 2\r\n\xff\xfe\r\nEND\r\n";
    let resp = response(raw);
    assert_eq!(resp.status, CommandResponseStatus::Ok);
    assert_eq!(resp.response_text, "VALUE k 0 2\r\n??\r\nEND\r\n");
    assert_eq!(resp.raw_data.as_deref(), Some(raw));
}

#[test]
fn test_classification_is_deterministic() {
    let raw = b"SERVER_ERROR out of memory\r\n";
    let first = classify(raw);
    for _ in 0..10 {
        assert_eq!(classify(raw), first);
    }
}
