//! Protocol Module
//!
//! The memcached text protocol as seen from the client side.
//!
//! ## Request Format
//! ```text
//! <command line with arguments substituted>\r\n
//! [<data block>\r\n]                      (storage commands only)
//! ```
//!
//! ## Reply Format
//! ```text
//! [<payload lines>]<marker>\r\n
//! ```
//!
//! ### Reply Classification (first match wins)
//! 1. no reply at all          -> Error
//! 2. ends with `STORED\r\n`   -> Ok
//! 3. ends with `ERROR\r\n`    -> Error
//! 4. starts `CLIENT_ERROR `   -> ClientError
//! 5. starts `SERVER_ERROR `   -> ServerError
//! 6. anything else            -> Ok

pub mod constants;
mod mapper;
mod matcher;
mod reply;
mod response;
mod template;

pub use mapper::{CommandMapper, SupportedCommand};
pub use matcher::{ends_with_marker, starts_with_marker};
pub use reply::{parse_values, reply_complete, ValueBlock};
pub use response::{classify_response, CommandResponse, CommandResponseStatus};
pub use template::{encode_ascii, format_template};
