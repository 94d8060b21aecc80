//! memcmd CLI Client
//!
//! Sends a single command to a memcached server and prints the reply.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use memcmd::logging::init_tracing;
use memcmd::protocol::parse_values;
use memcmd::{
    ClientConfig, CommandResponseStatus, GenericCommandProcessor, SupportedCommand, TracingLogger,
};

/// memcmd CLI
#[derive(Parser, Debug)]
#[command(name = "memcmd-cli")]
#[command(about = "Send one command to a memcached server")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "11211")]
    port: u16,

    /// Connect/read/write timeout in milliseconds (0 = wait forever)
    #[arg(short, long, default_value = "0")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,

        /// Opaque client flags stored with the item
        #[arg(long, default_value = "0")]
        flags: u32,

        /// Expiry in seconds (0 = never)
        #[arg(long, default_value = "0")]
        exptime: u32,
    },

    /// Delete a key
    Delete {
        /// The key to delete
        key: String,
    },

    /// Increment a numeric value
    Incr {
        key: String,
        #[arg(default_value = "1")]
        delta: u64,
    },

    /// Decrement a numeric value
    Decr {
        key: String,
        #[arg(default_value = "1")]
        delta: u64,
    },

    /// Update the expiry of a key
    Touch { key: String, exptime: u32 },

    /// Print server statistics
    Stats,

    /// Print the server version
    Version,

    /// Invalidate every item
    FlushAll,
}

fn main() {
    init_tracing();

    let args = Args::parse();

    let config = ClientConfig::builder()
        .endpoint(&args.host, args.port)
        .connect_timeout_ms(args.timeout_ms)
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .build();
    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        std::process::exit(2);
    }

    let (command, is_get) = match &args.command {
        Commands::Get { .. } => (SupportedCommand::Get, true),
        Commands::Set { .. } => (SupportedCommand::Set, false),
        Commands::Delete { .. } => (SupportedCommand::Delete, false),
        Commands::Incr { .. } => (SupportedCommand::Incr, false),
        Commands::Decr { .. } => (SupportedCommand::Decr, false),
        Commands::Touch { .. } => (SupportedCommand::Touch, false),
        Commands::Stats => (SupportedCommand::Stats, false),
        Commands::Version => (SupportedCommand::Version, false),
        Commands::FlushAll => (SupportedCommand::FlushAll, false),
    };

    let mut processor =
        GenericCommandProcessor::with_config(Arc::new(TracingLogger), command, config);
    processor.subscribe(|failure| eprintln!("{}", failure));

    let prepared = match &args.command {
        Commands::Get { key } | Commands::Delete { key } => {
            processor.set_command_parameters(&[key.as_str()]).map(|_| ())
        }
        Commands::Set {
            key,
            value,
            flags,
            exptime,
        } => {
            let flags = flags.to_string();
            let exptime = exptime.to_string();
            let len = value.len().to_string();
            processor
                .set_command_data(
                    &[key.as_str(), flags.as_str(), exptime.as_str(), len.as_str()],
                    value.as_bytes(),
                )
                .map(|_| ())
        }
        Commands::Incr { key, delta } | Commands::Decr { key, delta } => {
            let delta = delta.to_string();
            processor
                .set_command_parameters(&[key.as_str(), delta.as_str()])
                .map(|_| ())
        }
        Commands::Touch { key, exptime } => {
            let exptime = exptime.to_string();
            processor
                .set_command_parameters(&[key.as_str(), exptime.as_str()])
                .map(|_| ())
        }
        Commands::Stats | Commands::Version | Commands::FlushAll => {
            processor.set_command_parameters(&[]).map(|_| ())
        }
    };
    if let Err(e) = prepared {
        eprintln!("{}", e);
        std::process::exit(2);
    }

    let response = match processor.execute_command() {
        Ok(response) => response,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    match (&response.raw_data, response.status) {
        (Some(raw), CommandResponseStatus::Ok) if is_get => {
            let values = parse_values(raw);
            if values.is_empty() {
                println!("(not found)");
            }
            for value in values {
                println!("{} = {}", value.key, String::from_utf8_lossy(&value.data));
            }
        }
        (_, CommandResponseStatus::Ok) => print!("{}", response.response_text),
        (Some(raw), status) => {
            eprint!("{:?}: {}", status, String::from_utf8_lossy(raw));
            std::process::exit(1);
        }
        (None, status) => {
            eprintln!("{:?}: no reply from {}", status, processor.endpoint());
            std::process::exit(1);
        }
    }
}
