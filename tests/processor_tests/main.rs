//! Processor Tests
//!
//! The command processor end to end against a local fake server, plus the
//! payload serializer.

#[path = "../common/mod.rs"]
mod common;
