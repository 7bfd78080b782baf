//! Error types for the script crate.

use std::path::PathBuf;

use strata_codec::CodecError;
use strata_core::StrataError;
use thiserror::Error;

/// Errors that can occur while parsing or executing a command.
#[derive(Error, Debug)]
pub enum ScriptError {
    /// The line does not name a known command.
    #[error("unrecognized command: {0:?}")]
    UnknownCommand(String),

    /// A command was given without a required argument.
    #[error("{command} requires a {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    /// An argument could not be interpreted.
    #[error("invalid {argument} for {command}: {value:?}")]
    InvalidArgument {
        command: &'static str,
        argument: &'static str,
        value: String,
    },

    /// A layer command ran against an empty stack.
    #[error("no layers present")]
    NoLayers,

    /// The layer stack rejected the command.
    #[error(transparent)]
    Model(#[from] StrataError),

    /// Reading or writing an image file failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Reading a script file failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for script operations.
pub type Result<T> = std::result::Result<T, ScriptError>;
