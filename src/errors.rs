use std::str::FromStr;

#[derive(Debug, strum::EnumIter)]
pub enum ErrorKind {
    InvalidInput(String),
    NotFound(String),
    RPCError(String),
    SourceError(String),
    InternalError(String),
}

/// Instead of utilizing HTTP status codes to describe node errors (which often
/// do not have a good analog), rich errors are returned using this object.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Error {
    /// Code is a network-specific error code. If desired, this code can be
    /// equivalent to an HTTP status code.
    pub code: u32,

    /// Message is a network-specific error message.
    pub message: String,

    /// An error is retriable if the same request may succeed if submitted
    /// again.
    pub retriable: bool,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let retriable = if self.retriable { " (retriable)" } else { "" };
        write!(f, "Error #{}{}: {}", self.code, retriable, self.message)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn from_error_kind(err: ErrorKind) -> Self {
        match err {
            ErrorKind::InvalidInput(message) => Self {
                code: 400,
                message: format!("Invalid Input: {}", message),
                retriable: false,
            },
            ErrorKind::NotFound(message) => Self {
                code: 404,
                message: format!("Not Found: {}", message),
                retriable: false,
            },
            ErrorKind::RPCError(message) => Self {
                code: 500,
                message: format!("RPC error: {}", message),
                retriable: true,
            },
            ErrorKind::SourceError(message) => Self {
                code: 502,
                message: format!("Source error: {}", message),
                retriable: true,
            },
            ErrorKind::InternalError(message) => Self {
                code: 500,
                message: format!("Internal Error: {}", message),
                retriable: true,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.code == 404
    }
}

impl<T> From<T> for Error
where
    T: Into<ErrorKind>,
{
    fn from(err: T) -> Self {
        Self::from_error_kind(err.into())
    }
}

impl From<reqwest::Error> for ErrorKind {
    fn from(error: reqwest::Error) -> Self {
        Self::SourceError(format!("Failed HTTP request: {}", error))
    }
}

impl From<serde_json::Error> for ErrorKind {
    fn from(error: serde_json::Error) -> Self {
        Self::InternalError(format!("Serialization failure: {:#?}", error))
    }
}

impl From<near_primitives::account::id::ParseAccountError> for ErrorKind {
    fn from(error: near_primitives::account::id::ParseAccountError) -> Self {
        Self::InvalidInput(format!("Could not parse account: {:#?}", error))
    }
}

pub(crate) fn validate_crypto_hash(crypto_hash: &str) -> crate::Result<near_primitives::hash::CryptoHash> {
    near_primitives::hash::CryptoHash::from_str(crypto_hash).map_err(|_| {
        ErrorKind::InvalidInput(format!("Could not parse CryptoHash {}", crypto_hash)).into()
    })
}
