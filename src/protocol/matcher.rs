//! Marker matching
//!
//! Exact comparisons over a window exactly as long as the marker. No
//! substring search: a marker in the middle of a payload never matches.

/// True if the last `marker.len()` bytes of `haystack` equal `marker`.
///
/// An empty marker matches everything; a haystack shorter than the marker
/// never matches.
pub fn ends_with_marker(haystack: &[u8], marker: &[u8]) -> bool {
    if haystack.len() < marker.len() {
        return false;
    }
    let window = &haystack[haystack.len() - marker.len()..];
    window == marker
}

/// True if the first `marker.len()` bytes of `haystack` equal `marker`.
pub fn starts_with_marker(haystack: &[u8], marker: &[u8]) -> bool {
    if haystack.len() < marker.len() {
        return false;
    }
    let window = &haystack[..marker.len()];
    window == marker
}

/// `marker` followed by `terminator`, as one owned sequence
pub(crate) fn terminated(marker: &[u8], terminator: &[u8]) -> Vec<u8> {
    let mut line = Vec::with_capacity(marker.len() + terminator.len());
    line.extend_from_slice(marker);
    line.extend_from_slice(terminator);
    line
}
