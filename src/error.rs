//! A complete collection of errors.

use std::error;
use std::fmt::{self, Display, Formatter};
use std::io;
use toml::de;

/// A convenient `Result` type whose error type is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The set of possible errors.
#[derive(Debug)]
pub enum Error {
    /// An I/O error reported by the operating system.
    Os { cause: io::Error },

    /// An I/O error resulting from an operation on a file referenced by `path`.
    Io { path: String, cause: io::Error },

    /// The contents of the file referenced by `path` could not be decoded as UTF-8.
    Decode { path: String, cause: String },

    /// A `line` was addressed outside the range `1..=count` of a buffer.
    OutOfRange { line: usize, count: usize },

    /// The formatter `command` failed, where `cause` is either its diagnostic output
    /// or a description of how it failed.
    Formatter { command: String, cause: String },

    /// The formatter `command` did not finish within `millis` milliseconds.
    FormatterTimeout { command: String, millis: u64 },

    /// The platform clipboard could not be accessed.
    ClipboardUnavailable { cause: String },

    /// An unexpected command-line argument `arg`.
    UnexpectedArg { arg: String },

    /// A value is expected for a command-line argument `arg`.
    ExpectedValue { arg: String },

    /// A `value` given for a command-line argument `arg` is not valid.
    InvalidValue { arg: String, value: String },

    /// An operation `op` is not recognized.
    UnknownOp { op: String },

    /// An error occurred while parsing a configuration file referenced by `path`.
    Configuration { path: String, cause: String },
}

impl error::Error for Error {}

impl Error {
    pub fn io(path: &str, cause: io::Error) -> Error {
        Error::Io {
            path: path.to_string(),
            cause,
        }
    }

    pub fn decode(path: &str, cause: &dyn Display) -> Error {
        Error::Decode {
            path: path.to_string(),
            cause: format!("{cause}"),
        }
    }

    pub fn out_of_range(line: usize, count: usize) -> Error {
        Error::OutOfRange { line, count }
    }

    pub fn formatter(command: &str, cause: &str) -> Error {
        Error::Formatter {
            command: command.to_string(),
            cause: cause.to_string(),
        }
    }

    pub fn formatter_timeout(command: &str, millis: u64) -> Error {
        Error::FormatterTimeout {
            command: command.to_string(),
            millis,
        }
    }

    pub fn clipboard_unavailable(cause: &dyn Display) -> Error {
        Error::ClipboardUnavailable {
            cause: format!("{cause}"),
        }
    }

    pub fn unexpected_arg(arg: &str) -> Error {
        Error::UnexpectedArg {
            arg: arg.to_string(),
        }
    }

    pub fn expected_value(arg: &str) -> Error {
        Error::ExpectedValue {
            arg: arg.to_string(),
        }
    }

    pub fn invalid_value(arg: &str, value: &str) -> Error {
        Error::InvalidValue {
            arg: arg.to_string(),
            value: value.to_string(),
        }
    }

    pub fn unknown_op(op: &str) -> Error {
        Error::UnknownOp { op: op.to_string() }
    }

    pub fn configuration(path: &str, e: &de::Error) -> Error {
        Error::Configuration {
            path: path.to_string(),
            cause: format!("{e}"),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Os { cause } => write!(f, "I/O error: {cause}"),
            Error::Io { path, cause } => write!(f, "{path}: {cause}"),
            Error::Decode { path, cause } => write!(f, "{path}: cannot decode as text: {cause}"),
            Error::OutOfRange { line, count } => {
                write!(f, "{line}: line out of range (1..={count})")
            }
            Error::Formatter { command, cause } => write!(f, "{command}: formatter failed: {cause}"),
            Error::FormatterTimeout { command, millis } => {
                write!(f, "{command}: formatter timed out after {millis} ms")
            }
            Error::ClipboardUnavailable { cause } => write!(f, "clipboard unavailable: {cause}"),
            Error::UnexpectedArg { arg } => write!(f, "{arg}: unexpected argument"),
            Error::ExpectedValue { arg } => write!(f, "{arg}: expecting value to follow"),
            Error::InvalidValue { arg, value } => {
                write!(f, "{value}: invalid value following {arg}")
            }
            Error::UnknownOp { op } => write!(f, "{op}: unknown operation"),
            Error::Configuration { path, cause } => {
                write!(f, "{path}: configuration error: {cause}")
            }
        }
    }
}

impl From<io::Error> for Error {
    fn from(cause: io::Error) -> Error {
        Error::Os { cause }
    }
}
