//! Errors raised while talking to the Actions host.

use std::path::PathBuf;

/// Failure of a host accessor.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("Input required and not supplied: {0}")]
    InputRequired(String),

    #[error("Input {0} is not valid UTF-8")]
    InputNotUnicode(String),

    #[error("failed to read event payload from {path}: {source}")]
    ReadEvent {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("event payload at {path} is not valid JSON: {source}")]
    ParseEvent {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write output file {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write workflow command: {0}")]
    WriteCommand(#[source] std::io::Error),

    #[error("unexpected input: name should not contain the delimiter \"{0}\"")]
    DelimiterInName(String),

    #[error("unexpected input: value should not contain the delimiter \"{0}\"")]
    DelimiterInValue(String),

    #[error("output \"{0}\" has already been set")]
    DuplicateOutput(String),

    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ActionError>;
