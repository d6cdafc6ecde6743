use std::borrow::Cow;

/// The one error kind surfaced to content consumers.
///
/// Cloneable: a single failed fetch is delivered to every caller that was
/// waiting on it.
#[nf_derive::nf_error]
#[derive(Clone, PartialEq, Eq)]
pub enum ContentLoadError {
    /// The server answered with a non-success status code.
    #[error("Content request failed with status {status}{}", format_context(.context))]
    Status { status: u16, context: Option<Cow<'static, str>> },

    /// The request never produced a response (connect, TLS, timeout, body read).
    #[error("Content transport error{}: {message}", format_context(.context))]
    Transport { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The body is not valid JSON.
    #[error("Malformed content document{}: {message}", format_context(.context))]
    Decode { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A local content file could not be read.
    #[error("Content file error{}: {message}", format_context(.context))]
    Io { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ContentLoadError {
    /// HTTP status of the failed response, if the failure was a status error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn decode(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Decode { message: message.into(), context: None }
    }
}

impl From<reqwest::Error> for ContentLoadError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Status { status: status.as_u16(), context: None },
            None => Self::Transport { message: err.to_string().into(), context: None },
        }
    }
}

impl From<std::io::Error> for ContentLoadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io { message: err.to_string().into(), context: None }
    }
}
