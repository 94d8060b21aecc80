//! # memcmd
//!
//! Command/response processing for the memcached text protocol:
//! - Command templates with positional arguments
//! - One blocking write/read per command over an owned TCP connection
//! - Marker-based reply classification (Ok / Error / ClientError / ServerError)
//! - Transport failures bubbled to explicitly registered listeners
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 GenericCommandProcessor                      │
//! │        (format command, execute, classify reply)             │
//! └──────┬──────────────────────┬──────────────────────┬────────┘
//!        │                      │                      │
//!        ▼                      ▼                      ▼
//! ┌─────────────┐       ┌──────────────┐       ┌─────────────┐
//! │CommandMapper│       │CommandSocket │       │  Protocol   │
//! │ (templates) │       │ (TCP, 1 conn)│       │  Constants  │
//! └─────────────┘       └──────┬───────┘       └─────────────┘
//!                              │ CommunicationFailure
//!                              ▼
//!                     processor's listeners
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use memcmd::{GenericCommandProcessor, SupportedCommand, TracingLogger};
//!
//! let mut get = GenericCommandProcessor::new(
//!     Arc::new(TracingLogger),
//!     SupportedCommand::Get,
//!     "127.0.0.1",
//!     11211,
//! );
//! get.subscribe(|failure| eprintln!("{}", failure));
//! get.set_command_parameters(&["mykey"]).unwrap();
//! let response = get.execute_command().unwrap();
//! println!("{:?}: {}", response.status, response.response_text);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;
pub mod logging;

pub mod protocol;
pub mod network;
pub mod serialization;
pub mod processor;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{MemcmdError, Result};
pub use config::ClientConfig;
pub use logging::{Logger, TracingLogger};
pub use network::{CommandSocket, CommunicationFailure, FailureStage, SubscriptionId};
pub use processor::GenericCommandProcessor;
pub use protocol::{CommandMapper, CommandResponse, CommandResponseStatus, SupportedCommand};
pub use serialization::{BincodeSerializer, PayloadSerializer};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of memcmd
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
