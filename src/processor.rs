//! Command Processor
//!
//! Builds, sends and classifies one memcached command.
//!
//! ## Lifecycle
//! ```text
//! new(logger, command, host, port)
//!     │   creates the CommandSocket, forwards its failures
//!     ▼
//! set_command_parameters(args)     (optional; zero args if skipped)
//!     │   template + args + terminator, cached
//!     ▼
//! execute_command() ──► CommandSocket::send ──► classify ──► CommandResponse
//! ```
//!
//! Transport faults reach callers twice: as an `Error` status in the
//! returned response, and through the failure listeners registered with
//! [`GenericCommandProcessor::subscribe`].

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{MemcmdError, Result};
use crate::logging::Logger;
use crate::network::{CommandSocket, CommunicationFailure, FailureNotifier, SubscriptionId};
use crate::protocol::constants::COMMAND_TERMINATOR;
use crate::protocol::{
    encode_ascii, format_template, CommandMapper, CommandResponse, SupportedCommand,
};
use crate::serialization::{BincodeSerializer, PayloadSerializer};

/// Executes one kind of command against one server
pub struct GenericCommandProcessor<S: PayloadSerializer = BincodeSerializer> {
    /// Operation this processor sends
    command: SupportedCommand,

    /// Template table
    mapper: CommandMapper,

    /// Owned connection to the server
    socket: CommandSocket,

    /// Formatted command, built by `set_command_parameters`
    command_to_execute: Option<Vec<u8>>,

    /// Listeners that receive failures bubbled up from the socket
    failures: FailureNotifier,

    logger: Arc<dyn Logger>,

    serializer: S,
}

impl GenericCommandProcessor<BincodeSerializer> {
    /// Processor for `command` against `host:port` with default settings
    pub fn new(
        logger: Arc<dyn Logger>,
        command: SupportedCommand,
        host: impl Into<String>,
        port: u16,
    ) -> Self {
        let config = ClientConfig::builder().endpoint(host, port).build();
        Self::with_config(logger, command, config)
    }

    /// Processor for `command` using the endpoint and settings in `config`
    pub fn with_config(
        logger: Arc<dyn Logger>,
        command: SupportedCommand,
        config: ClientConfig,
    ) -> Self {
        Self::with_serializer(logger, command, config, BincodeSerializer)
    }
}

impl<S: PayloadSerializer> GenericCommandProcessor<S> {
    /// Processor with a custom payload serializer
    pub fn with_serializer(
        logger: Arc<dyn Logger>,
        command: SupportedCommand,
        config: ClientConfig,
        serializer: S,
    ) -> Self {
        let socket = CommandSocket::with_config(config);
        let failures = FailureNotifier::new();

        let bubbled = failures.clone();
        socket.subscribe(move |failure: &CommunicationFailure| {
            bubbled.notify(failure);
        });

        Self {
            command,
            mapper: CommandMapper::default(),
            socket,
            command_to_execute: None,
            failures,
            logger,
            serializer,
        }
    }

    /// Replace the template table. Clears any formatted command.
    pub fn with_mapper(mut self, mapper: CommandMapper) -> Self {
        self.mapper = mapper;
        self.command_to_execute = None;
        self
    }

    pub fn command(&self) -> SupportedCommand {
        self.command
    }

    pub fn endpoint(&self) -> &str {
        self.socket.endpoint()
    }

    pub fn protocol_socket(&self) -> &CommandSocket {
        &self.socket
    }

    /// The cached formatted command, if one has been built
    pub fn formatted_command(&self) -> Option<&[u8]> {
        self.command_to_execute.as_deref()
    }

    // -------------------------------------------------------------------------
    // Failure notification
    // -------------------------------------------------------------------------

    /// Register a listener for communication failures on this processor
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CommunicationFailure) + Send + 'static,
    {
        self.failures.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.failures.unsubscribe(id)
    }

    /// Deliver `failure` to this processor's listeners unchanged
    pub fn fire_comms_failure_bubbled_event(&self, failure: &CommunicationFailure) -> usize {
        self.failures.notify(failure)
    }

    // -------------------------------------------------------------------------
    // Payload serialization
    // -------------------------------------------------------------------------

    pub fn serialise_data<T: Serialize + ?Sized>(&self, data: &T) -> Result<Vec<u8>> {
        self.logger.write_info_message("Serialising data");
        self.serializer.serialize(data)
    }

    pub fn deserialise_data<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        self.logger.write_info_message("Deserialising data");
        self.serializer.deserialize(data)
    }

    // -------------------------------------------------------------------------
    // Command construction
    // -------------------------------------------------------------------------

    /// Build and cache the formatted command.
    ///
    /// With no `args` the template is used as-is. Fails only if the command
    /// has no template or the template needs more arguments than given.
    pub fn set_command_parameters(&mut self, args: &[&str]) -> Result<&[u8]> {
        self.logger.write_info_message("Setting command parameters");

        let template = self.mapper.command_format(self.command)?;
        let mut text = if args.is_empty() {
            template.to_string()
        } else {
            format_template(template, args)?
        };
        text.push_str(terminator_str());

        let bytes = encode_ascii(&text);
        self.logger
            .write_info_message(&format!("Cmd To Execute: [{}]", bytes.escape_ascii()));

        Ok(self.command_to_execute.insert(bytes).as_slice())
    }

    /// Build and cache a storage command with a binary data block.
    ///
    /// Only the first line of the template is formatted with `args`; the
    /// data block is `data` verbatim, framed by terminators.
    pub fn set_command_data(&mut self, args: &[&str], data: &[u8]) -> Result<&[u8]> {
        self.logger.write_info_message("Setting command parameters with data block");

        let template = self.mapper.command_format(self.command)?;
        let line = template.split(terminator_str()).next().unwrap_or(template);
        let line = format_template(line, args)?;

        let mut bytes = encode_ascii(&line);
        bytes.reserve(data.len() + 2 * COMMAND_TERMINATOR.len());
        bytes.extend_from_slice(COMMAND_TERMINATOR);
        bytes.extend_from_slice(data);
        bytes.extend_from_slice(COMMAND_TERMINATOR);

        self.logger.write_info_message(&format!(
            "Cmd To Execute: [{}] with {} data bytes",
            line,
            data.len()
        ));

        Ok(self.command_to_execute.insert(bytes).as_slice())
    }

    // -------------------------------------------------------------------------
    // Execution
    // -------------------------------------------------------------------------

    /// Send the formatted command and classify the reply.
    ///
    /// Transport trouble never produces `Err`; it yields an `Error` status.
    /// `Err` is reserved for a missing or unsatisfiable template.
    pub fn execute_command(&mut self) -> Result<CommandResponse> {
        if self.command_to_execute.is_none() {
            self.set_command_parameters(&[])?;
        }

        let request = self.command_to_execute.as_deref().unwrap_or_default();
        let socket = &mut self.socket;
        let sent = panic::catch_unwind(AssertUnwindSafe(|| socket.send(request)));

        let response = match sent {
            Ok(raw) => self.process_response(raw),
            Err(payload) => {
                let error = MemcmdError::SendPanicked(panic_message(payload.as_ref()));
                self.logger.write_exception(&error);
                CommandResponse::error()
            }
        };
        Ok(response)
    }

    /// Classify a raw reply and log the outcome
    pub fn process_response(&self, raw: Option<Bytes>) -> CommandResponse {
        self.logger.write_info_message("Processing Response");

        let response = CommandResponse::from_raw(raw);

        self.logger.write_info_message(&format!(
            "Response Text :[{}], Response Status: [{:?}]",
            response.response_text.escape_debug(),
            response.status
        ));
        response
    }
}

fn terminator_str() -> &'static str {
    // The terminator is plain ASCII
    std::str::from_utf8(COMMAND_TERMINATOR).unwrap_or("\r\n")
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
