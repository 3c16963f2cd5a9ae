//! Error types for rule construction and traversal


/// Result type for rule engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by a rule handler to abort the traversal
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result type returned by rule handlers
pub type HandlerResult = std::result::Result<(), HandlerError>;

/// Unified error type for the rule engine and its adapters
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rule kind does not agree with the construction form used
    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    /// XML parsing failed in an adapter
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// A handler returned an error; the traversal was aborted
    #[error("Handler for {rule} failed at depth {depth}: {source}")]
    Handler {
        rule: String,
        depth: usize,
        #[source]
        source: HandlerError,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new invalid rule error
    pub fn invalid_rule<S: Into<String>>(msg: S) -> Self {
        Error::InvalidRule(msg.into())
    }

    /// Create a new XML parsing error
    pub fn xml_parse<S: Into<String>>(msg: S) -> Self {
        Error::XmlParse(msg.into())
    }
}
