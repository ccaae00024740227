use std::fmt::Display;

/// Transport-level failure of a gateway call.
///
/// Business errors reported by the gateway arrive inside a successful response body and
/// are never turned into a `GatewayError`.
#[derive(Debug)]
pub enum GatewayError {
    /// Connection, DNS, invalid endpoint or non-success HTTP status
    RequestError(reqwest::Error),
    /// Request parameters could not be form encoded
    FormEncoding(serde_urlencoded::ser::Error),
    /// Response bytes are not valid in the requested encoding
    Decode { encoding: &'static str },
}

impl GatewayError {
    /// HTTP status of the failed response, if the gateway answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            GatewayError::RequestError(e) => e.status(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(value: reqwest::Error) -> Self {
        Self::RequestError(value)
    }
}

impl From<serde_urlencoded::ser::Error> for GatewayError {
    fn from(value: serde_urlencoded::ser::Error) -> Self {
        Self::FormEncoding(value)
    }
}

impl std::error::Error for GatewayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GatewayError::RequestError(e) => Some(e),
            GatewayError::FormEncoding(e) => Some(e),
            GatewayError::Decode { .. } => None,
        }
    }
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::RequestError(e) => write!(f, "http request error: {e}"),
            GatewayError::FormEncoding(e) => write!(f, "gateway request encoding: {e}"),
            GatewayError::Decode { encoding } => {
                write!(f, "gateway response is not valid {encoding} text")
            }
        }
    }
}
