//! Tests for reply framing and retrieval parsing

use memcmd::protocol::{parse_values, reply_complete};

// =============================================================================
// Framing
// =============================================================================

#[test]
fn test_single_line_replies_complete() {
    assert!(reply_complete(b"STORED\r\n"));
    assert!(reply_complete(b"ERROR\r\n"));
    assert!(reply_complete(b"CLIENT_ERROR bad data chunk\r\n"));
    assert!(reply_complete(b"42\r\n"));
    assert!(reply_complete(b"VERSION 1.6.21\r\n"));
}

#[test]
fn test_unterminated_line_incomplete() {
    assert!(!reply_complete(b""));
    assert!(!reply_complete(b"STOR"));
    assert!(!reply_complete(b"STORED\r"));
}

#[test]
fn test_retrieval_needs_end_line() {
    assert!(!reply_complete(b"VALUE k 0 3\r\n"));
    assert!(!reply_complete(b"VALUE k 0 3\r\nab"));
    assert!(!reply_complete(b"VALUE k 0 3\r\nabc\r\n"));
    assert!(!reply_complete(b"VALUE k 0 3\r\nabc\r\nEN"));
    assert!(reply_complete(b"VALUE k 0 3\r\nabc\r\nEND\r\n"));
}

#[test]
fn test_data_block_containing_terminators() {
    // The data block holds "END\r\n" itself; only the real END finishes
    let partial = b"VALUE k 0 5\r\nEND\r\n\r\n";
    assert!(!reply_complete(partial));

    let full = b"VALUE k 0 5\r\nEND\r\n\r\nEND\r\n";
    assert!(reply_complete(full));
}

#[test]
fn test_stats_reply() {
    assert!(!reply_complete(b"STAT pid 1\r\nSTAT uptime 10\r\n"));
    assert!(reply_complete(b"STAT pid 1\r\nSTAT uptime 10\r\nEND\r\n"));
}

#[test]
fn test_malformed_value_header_completes() {
    assert!(reply_complete(b"VALUE k notanumber\r\n"));
}

#[test]
fn test_overflowing_byte_count_completes() {
    assert!(reply_complete(b"VALUE k 0 18446744073709551615\r\n"));
    assert!(reply_complete(
        b"VALUE k 0 18446744073709551615\r\nabc\r\nEND\r\n"
    ));
    assert!(reply_complete(b"VALUE k 0 18446744073709551600\r\n"));
}

// =============================================================================
// Retrieval Parsing
// =============================================================================

#[test]
fn test_parse_single_value() {
    let values = parse_values(b"VALUE mykey 5 3\r\nabc\r\nEND\r\n");
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].key, "mykey");
    assert_eq!(values[0].flags, 5);
    assert_eq!(values[0].cas, None);
    assert_eq!(&values[0].data[..], b"abc");
}

#[test]
fn test_parse_multiple_values_with_cas() {
    let raw = b"VALUE a 0 1 100\r\n1\r\nVALUE b 0 2 101\r\n22\r\nEND\r\n";
    let values = parse_values(raw);
    assert_eq!(values.len(), 2);
    assert_eq!(values[0].key, "a");
    assert_eq!(values[0].cas, Some(100));
    assert_eq!(values[1].key, "b");
    assert_eq!(&values[1].data[..], b"22");
    assert_eq!(values[1].cas, Some(101));
}

#[test]
fn test_parse_binary_data() {
    let mut raw = b"VALUE bin 0 4\r\n".to_vec();
    raw.extend_from_slice(&[0x00, 0xFF, b'\r', b'\n']);
    raw.extend_from_slice(b"\r\nEND\r\n");

    let values = parse_values(&raw);
    assert_eq!(values.len(), 1);
    assert_eq!(&values[0].data[..], &[0x00, 0xFF, b'\r', b'\n']);
}

#[test]
fn test_parse_miss_and_non_retrieval() {
    assert!(parse_values(b"END\r\n").is_empty());
    assert!(parse_values(b"STORED\r\n").is_empty());
    assert!(parse_values(b"").is_empty());
}

#[test]
fn test_parse_truncated_block() {
    let values = parse_values(b"VALUE a 0 1\r\n1\r\nVALUE b 0 10\r\nshort");
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].key, "a");
}

#[test]
fn test_parse_overflowing_byte_count() {
    assert!(parse_values(b"VALUE k 0 18446744073709551615\r\nabc\r\nEND\r\n").is_empty());

    let values = parse_values(b"VALUE a 0 1\r\n1\r\nVALUE b 0 18446744073709551615\r\nxyz\r\nEND\r\n");
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].key, "a");
}
