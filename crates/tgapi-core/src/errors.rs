use std::fmt;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Core error type for the Bot API client.
///
/// Transport crates map their specific failures into [`RequestError`] so callers
/// can branch on [`RequestErrorKind`] regardless of the HTTP stack underneath.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid chat id: {0:?} is neither an @username nor an integer")]
    InvalidChatId(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("request cancelled")]
    Cancelled,

    /// The service answered with `ok: false`.
    #[error("api error {code}: {message}")]
    Api {
        code: i64,
        message: String,
        retry_after: Option<u64>,
        migrate_to_chat_id: Option<i64>,
    },

    #[error("external error: {0}")]
    External(String),
}

impl Error {
    pub fn request_kind(&self) -> Option<RequestErrorKind> {
        match self {
            Error::Request(e) => Some(e.kind),
            _ => None,
        }
    }

    pub fn is_invalid_token(&self) -> bool {
        self.request_kind() == Some(RequestErrorKind::InvalidToken)
    }

    pub fn is_timeout(&self) -> bool {
        self.request_kind() == Some(RequestErrorKind::TimedOut)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure classes distinguished at the transport boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestErrorKind {
    /// The service rejected the bot token (HTTP 401).
    InvalidToken,
    /// The network deadline elapsed without the caller cancelling.
    TimedOut,
    /// A non-success status whose body was not a response envelope.
    HttpStatus,
    /// Connection-level failure with no status at all.
    Network,
}

impl fmt::Display for RequestErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RequestErrorKind::InvalidToken => "invalid token",
            RequestErrorKind::TimedOut => "timed out",
            RequestErrorKind::HttpStatus => "http status",
            RequestErrorKind::Network => "network",
        };
        f.write_str(s)
    }
}

/// A classified transport failure.
///
/// `code` is status-like: the HTTP status where one exists, 408 for timeouts and
/// 0 for connection failures that never produced a status.
#[derive(Debug, thiserror::Error)]
#[error("{message} ({code})")]
pub struct RequestError {
    pub kind: RequestErrorKind,
    pub message: String,
    pub code: u16,
    #[source]
    pub source: Option<BoxError>,
}

impl RequestError {
    pub fn new(kind: RequestErrorKind, message: impl Into<String>, code: u16) -> Self {
        Self {
            kind,
            message: message.into(),
            code,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn invalid_token(source: impl Into<BoxError>) -> Self {
        Self::new(RequestErrorKind::InvalidToken, "Invalid token", 401).with_source(source)
    }

    pub fn timed_out(source: impl Into<BoxError>) -> Self {
        Self::new(RequestErrorKind::TimedOut, "Request timed out", 408).with_source(source)
    }

    pub fn status(code: u16, body: &str) -> Self {
        let preview = body.chars().take(200).collect::<String>();
        Self::new(
            RequestErrorKind::HttpStatus,
            format!("unexpected status {code}: {preview}"),
            code,
        )
    }

    pub fn network(source: impl Into<BoxError>) -> Self {
        Self::new(RequestErrorKind::Network, "Request failed", 0).with_source(source)
    }
}
