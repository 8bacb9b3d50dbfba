//! Command line interface for the `msgframe` binary.
//!
//! Also compiled by the build script to render the man page, so this module
//! depends on nothing but `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line arguments for the `msgframe` binary.
#[derive(Debug, Parser)]
#[command(
    name = "msgframe",
    version,
    about = "Encode and decode binary header/payload messages"
)]
pub struct Cli {
    /// JSON configuration file with a `codec` limits section.
    #[arg(long, global = true, env = "MSGFRAME_CONFIG")]
    pub config: Option<PathBuf>,

    /// Maximum payload size in bytes.
    #[arg(long, global = true, env = "MSGFRAME_MAX_PAYLOAD_BYTES")]
    pub max_payload_bytes: Option<usize>,

    /// Maximum number of headers.
    #[arg(long, global = true, env = "MSGFRAME_MAX_HEADERS")]
    pub max_headers: Option<usize>,

    /// Maximum header key length in bytes.
    #[arg(long, global = true, env = "MSGFRAME_MAX_HEADER_KEY_BYTES")]
    pub max_header_key_bytes: Option<usize>,

    /// Maximum header value length in bytes.
    #[arg(long, global = true, env = "MSGFRAME_MAX_HEADER_VALUE_BYTES")]
    pub max_header_value_bytes: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

/// Operations offered by the binary.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encode a JSON message document and print the result as base64.
    Encode {
        /// File holding the JSON document; standard input when omitted.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Decode a message and print it as a JSON document.
    Decode {
        /// Base64 text of the encoded message.
        #[arg(long, conflicts_with = "input")]
        base64: Option<String>,
        /// File holding the raw encoded bytes.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn parses_encode_with_input_file() {
        let cli = Cli::parse_from(["msgframe", "encode", "--input", "msg.json"]);
        match cli.command {
            Command::Encode { input } => assert_eq!(input.as_deref(), Some(Path::new("msg.json"))),
            Command::Decode { .. } => panic!("expected encode"),
        }
    }

    #[test]
    fn parses_global_limit_overrides_after_subcommand() {
        let cli = Cli::parse_from(["msgframe", "decode", "--base64", "AA==", "--max-headers", "2"]);
        assert_eq!(cli.max_headers, Some(2));
        match cli.command {
            Command::Decode { base64, input } => {
                assert_eq!(base64.as_deref(), Some("AA=="));
                assert!(input.is_none());
            }
            Command::Encode { .. } => panic!("expected decode"),
        }
    }

    #[test]
    fn rejects_base64_and_input_together() {
        let result = Cli::try_parse_from([
            "msgframe", "decode", "--base64", "AA==", "--input", "msg.bin",
        ]);
        assert!(result.is_err());
    }
}
