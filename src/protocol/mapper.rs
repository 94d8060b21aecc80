//! Command mapper
//!
//! Maps a command identifier to its text-protocol template. Templates use
//! `{n}` placeholders for the n-th argument.

use std::collections::HashMap;

use crate::error::{MemcmdError, Result};

/// Server operations this client knows how to send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedCommand {
    Get,
    Gets,
    Set,
    Add,
    Replace,
    Append,
    Prepend,
    Cas,
    Delete,
    Incr,
    Decr,
    Touch,
    Stats,
    Version,
    FlushAll,
    Verbosity,
    Quit,
}

impl SupportedCommand {
    /// Every command, in declaration order
    pub const ALL: [SupportedCommand; 17] = [
        SupportedCommand::Get,
        SupportedCommand::Gets,
        SupportedCommand::Set,
        SupportedCommand::Add,
        SupportedCommand::Replace,
        SupportedCommand::Append,
        SupportedCommand::Prepend,
        SupportedCommand::Cas,
        SupportedCommand::Delete,
        SupportedCommand::Incr,
        SupportedCommand::Decr,
        SupportedCommand::Touch,
        SupportedCommand::Stats,
        SupportedCommand::Version,
        SupportedCommand::FlushAll,
        SupportedCommand::Verbosity,
        SupportedCommand::Quit,
    ];

    /// Storage commands carry a data block after the command line
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            SupportedCommand::Set
                | SupportedCommand::Add
                | SupportedCommand::Replace
                | SupportedCommand::Append
                | SupportedCommand::Prepend
                | SupportedCommand::Cas
        )
    }

    /// Template used by the default mapper
    fn default_template(&self) -> &'static str {
        match self {
            SupportedCommand::Get => "get {0}",
            SupportedCommand::Gets => "gets {0}",
            SupportedCommand::Set => "set {0} {1} {2} {3}\r\n{4}",
            SupportedCommand::Add => "add {0} {1} {2} {3}\r\n{4}",
            SupportedCommand::Replace => "replace {0} {1} {2} {3}\r\n{4}",
            SupportedCommand::Append => "append {0} {1} {2} {3}\r\n{4}",
            SupportedCommand::Prepend => "prepend {0} {1} {2} {3}\r\n{4}",
            SupportedCommand::Cas => "cas {0} {1} {2} {3} {4}\r\n{5}",
            SupportedCommand::Delete => "delete {0}",
            SupportedCommand::Incr => "incr {0} {1}",
            SupportedCommand::Decr => "decr {0} {1}",
            SupportedCommand::Touch => "touch {0} {1}",
            SupportedCommand::Stats => "stats",
            SupportedCommand::Version => "version",
            SupportedCommand::FlushAll => "flush_all",
            SupportedCommand::Verbosity => "verbosity {0}",
            SupportedCommand::Quit => "quit",
        }
    }
}

/// Lookup table from command to template
#[derive(Debug, Clone)]
pub struct CommandMapper {
    templates: HashMap<SupportedCommand, String>,
}

impl Default for CommandMapper {
    fn default() -> Self {
        Self::with_templates(
            SupportedCommand::ALL
                .iter()
                .map(|cmd| (*cmd, cmd.default_template())),
        )
    }
}

impl CommandMapper {
    /// Mapper covering every [`SupportedCommand`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapper over a caller-supplied table, which may be partial
    pub fn with_templates<I, T>(templates: I) -> Self
    where
        I: IntoIterator<Item = (SupportedCommand, T)>,
        T: Into<String>,
    {
        Self {
            templates: templates
                .into_iter()
                .map(|(cmd, template)| (cmd, template.into()))
                .collect(),
        }
    }

    /// Template for `command`.
    ///
    /// A miss means the processor was built against the wrong table; callers
    /// should treat it as a bug, not retry.
    pub fn command_format(&self, command: SupportedCommand) -> Result<&str> {
        self.templates
            .get(&command)
            .map(String::as_str)
            .ok_or(MemcmdError::UnknownCommand(command))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
