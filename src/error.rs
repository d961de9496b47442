use thiserror::Error;

/// Recoverable failure for a single token. The token is dropped and the
/// stream carries on with the next one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Grammar error in '{token}': {reason}")]
    Grammar { token: String, reason: String },
    #[error("Value error in '{token}': {reason}")]
    Value { token: String, reason: String },
    #[error("State error in '{token}': {reason}")]
    State { token: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ErrorKind {
    Grammar,
    Value,
    State,
}

impl TokenError {
    pub fn grammar<T: Into<String>, R: Into<String>>(token: T, reason: R) -> Self {
        TokenError::Grammar {
            token: token.into(),
            reason: reason.into(),
        }
    }

    pub fn value<T: Into<String>, R: Into<String>>(token: T, reason: R) -> Self {
        TokenError::Value {
            token: token.into(),
            reason: reason.into(),
        }
    }

    pub fn state<T: Into<String>, R: Into<String>>(token: T, reason: R) -> Self {
        TokenError::State {
            token: token.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TokenError::Grammar { .. } => ErrorKind::Grammar,
            TokenError::Value { .. } => ErrorKind::Value,
            TokenError::State { .. } => ErrorKind::State,
        }
    }

    pub fn token(&self) -> &str {
        match self {
            TokenError::Grammar { token, .. }
            | TokenError::Value { token, .. }
            | TokenError::State { token, .. } => token,
        }
    }
}

pub type TokenResult<T> = Result<T, TokenError>;

/// Hard failures surfaced to the caller of a stream.
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("No output is available as not yet generated")]
    NoOutputAvailable,
    #[error("Index '{index}' is out of range (output length {len})")]
    OutOfRange { index: usize, len: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("Config error: {0}")]
    Config(String),
}

pub type StreamResult<T> = Result<T, StreamError>;

impl StreamError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        StreamError::Config(message.into())
    }
}
