use sparselife::DecodeError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Options(#[from] getopts::Fail),

    #[error("invalid value {value:?} for --{name}")]
    InvalidValue { name: &'static str, value: String },

    #[error("fill of {width}x{height} exceeds {max} cells")]
    FillTooLarge { width: i32, height: i32, max: u64 },

    #[error("--{0} cannot be combined with --{1}")]
    Conflict(&'static str, &'static str),

    #[error("unknown scenario {0}, expected 0 to {max}", max = crate::scenario::COUNT - 1)]
    UnknownScenario(usize),

    #[error("{path}: {source}")]
    File {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: DecodeError,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
