//! Tests for CommandMapper
//!
//! These tests verify:
//! - Every supported command has a non-empty default template
//! - Lookup misses on custom tables fail with UnknownCommand

use memcmd::protocol::{CommandMapper, SupportedCommand};
use memcmd::MemcmdError;

#[test]
fn test_default_mapper_covers_every_command() {
    let mapper = CommandMapper::default();
    assert_eq!(mapper.len(), SupportedCommand::ALL.len());

    for cmd in SupportedCommand::ALL {
        let template = mapper.command_format(cmd).unwrap();
        assert!(!template.is_empty(), "{:?} has an empty template", cmd);
    }
}

#[test]
fn test_default_templates() {
    let mapper = CommandMapper::new();
    assert_eq!(mapper.command_format(SupportedCommand::Get).unwrap(), "get {0}");
    assert_eq!(mapper.command_format(SupportedCommand::Delete).unwrap(), "delete {0}");
    assert_eq!(mapper.command_format(SupportedCommand::Incr).unwrap(), "incr {0} {1}");
    assert_eq!(mapper.command_format(SupportedCommand::Stats).unwrap(), "stats");
    assert_eq!(mapper.command_format(SupportedCommand::FlushAll).unwrap(), "flush_all");
    assert_eq!(
        mapper.command_format(SupportedCommand::Set).unwrap(),
        "set {0} {1} {2} {3}\r\n{4}"
    );
}

#[test]
fn test_storage_templates_carry_data_block() {
    let mapper = CommandMapper::default();
    for cmd in SupportedCommand::ALL {
        let template = mapper.command_format(cmd).unwrap();
        assert_eq!(
            cmd.is_storage(),
            template.contains("\r\n"),
            "{:?} storage flag disagrees with its template",
            cmd
        );
    }
}

#[test]
fn test_lookup_outside_table_fails() {
    let mapper = CommandMapper::with_templates([(SupportedCommand::Get, "get {0}")]);

    assert!(mapper.command_format(SupportedCommand::Get).is_ok());
    match mapper.command_format(SupportedCommand::Set) {
        Err(MemcmdError::UnknownCommand(cmd)) => assert_eq!(cmd, SupportedCommand::Set),
        other => panic!("Expected UnknownCommand, got {:?}", other),
    }
}

#[test]
fn test_empty_table() {
    let mapper = CommandMapper::with_templates(Vec::<(SupportedCommand, String)>::new());
    assert!(mapper.is_empty());
    assert!(mapper.command_format(SupportedCommand::Version).is_err());
}
