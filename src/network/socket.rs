//! Command Socket
//!
//! Owns the connection to one memcached endpoint and performs one
//! write-then-read exchange per call.

use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};

use bytes::{Bytes, BytesMut};

use crate::config::ClientConfig;
use crate::error::{MemcmdError, Result};
use crate::protocol::reply_complete;

use super::events::{CommunicationFailure, FailureNotifier, FailureStage, SubscriptionId};

/// Size of each read from the stream
const READ_CHUNK_SIZE: usize = 4096;

/// Connection to a single server endpoint
#[derive(Debug)]
pub struct CommandSocket {
    /// Connection settings
    config: ClientConfig,

    /// `host:port`, also reported in failures
    endpoint: String,

    /// Open connection, created on first send
    stream: Option<TcpStream>,

    /// Listeners for transport faults
    failures: FailureNotifier,
}

impl CommandSocket {
    /// Socket for `host:port` with default settings
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::with_config(ClientConfig::builder().endpoint(host, port).build())
    }

    /// Socket for the endpoint and settings in `config`
    pub fn with_config(config: ClientConfig) -> Self {
        let endpoint = config.endpoint();
        Self {
            config,
            endpoint,
            stream: None,
            failures: FailureNotifier::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Register a communication failure listener
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CommunicationFailure) + Send + 'static,
    {
        self.failures.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.failures.unsubscribe(id)
    }

    /// Send `request` and return the reply.
    ///
    /// Transport faults are not returned as errors: listeners are notified,
    /// the connection is dropped, and `None` is returned.
    pub fn send(&mut self, request: &[u8]) -> Option<Bytes> {
        match self.exchange(request) {
            Ok(reply) => Some(reply),
            Err((stage, error)) => {
                tracing::warn!("{:?} failed on {}: {}", stage, self.endpoint, error);
                let failure = CommunicationFailure {
                    endpoint: self.endpoint.clone(),
                    stage,
                    error,
                };
                self.failures.notify(&failure);
                None
            }
        }
    }

    /// One write/read cycle. The stream is only kept if the cycle succeeds.
    fn exchange(
        &mut self,
        request: &[u8],
    ) -> std::result::Result<Bytes, (FailureStage, MemcmdError)> {
        let mut stream = match self.stream.take() {
            Some(stream) => stream,
            None => self.connect().map_err(|e| (FailureStage::Connect, e))?,
        };

        tracing::trace!("Sending {} bytes to {}", request.len(), self.endpoint);
        write_request(&mut stream, request).map_err(|e| (FailureStage::Write, e))?;

        let reply = read_reply(&mut stream, self.config.max_reply_size)
            .map_err(|e| (FailureStage::Read, e))?;
        tracing::trace!("Received {} bytes from {}", reply.len(), self.endpoint);

        self.stream = Some(stream);
        Ok(reply)
    }

    fn connect(&self) -> Result<TcpStream> {
        self.config.validate()?;

        let stream = match self.config.connect_timeout() {
            Some(timeout) => {
                let mut last_err = None;
                let mut connected = None;
                for addr in self.endpoint.to_socket_addrs()? {
                    match TcpStream::connect_timeout(&addr, timeout) {
                        Ok(stream) => {
                            connected = Some(stream);
                            break;
                        }
                        Err(e) => last_err = Some(e),
                    }
                }
                match (connected, last_err) {
                    (Some(stream), _) => stream,
                    (None, Some(e)) => return Err(e.into()),
                    (None, None) => {
                        return Err(io::Error::new(
                            io::ErrorKind::AddrNotAvailable,
                            format!("{} did not resolve to any address", self.endpoint),
                        )
                        .into())
                    }
                }
            }
            None => TcpStream::connect(&self.endpoint)?,
        };

        stream.set_nodelay(self.config.nodelay)?;
        stream.set_read_timeout(self.config.read_timeout())?;
        stream.set_write_timeout(self.config.write_timeout())?;

        tracing::debug!("Connected to {}", self.endpoint);
        Ok(stream)
    }
}

fn write_request<W: Write>(writer: &mut W, request: &[u8]) -> Result<()> {
    writer.write_all(request)?;
    writer.flush()?;
    Ok(())
}

/// Read until one whole reply is buffered, or the peer closes.
fn read_reply<R: Read>(reader: &mut R, max_reply_size: usize) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(READ_CHUNK_SIZE);
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        if n == 0 {
            if buf.is_empty() {
                return Err(MemcmdError::EmptyReply);
            }
            // Peer closed mid-reply; hand over what arrived
            break;
        }

        buf.extend_from_slice(&chunk[..n]);
        if buf.len() > max_reply_size {
            return Err(MemcmdError::ReplyTooLarge {
                limit: max_reply_size,
            });
        }

        if reply_complete(&buf) {
            break;
        }
    }

    Ok(buf.freeze())
}
