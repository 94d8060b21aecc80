//! Network Module
//!
//! TCP transport to a single memcached server.
//!
//! ## Model
//! - One socket, one endpoint, one connection
//! - Blocking write then blocking read per command
//! - Transport faults go to subscribed listeners, never to the caller

mod events;
mod socket;

pub use events::{
    CommunicationFailure, FailureListener, FailureNotifier, FailureStage, SubscriptionId,
};
pub use socket::CommandSocket;
