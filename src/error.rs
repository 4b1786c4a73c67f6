//! Error types for URI parsing and mutation.

use std::fmt;

use crate::constants::ALLOWED_SCHEMES;

/// Errors that can occur when parsing or mutating a [`Uri`](crate::Uri).
///
/// The receiver of a failed `with_*` call is never modified; the error
/// carries the argument that was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriError {
    /// The input that was rejected
    pub input: String,
    /// The specific error that occurred
    pub kind: UriErrorKind,
}

impl UriError {
    pub(crate) fn new(input: impl Into<String>, kind: UriErrorKind) -> Self {
        let err = Self {
            input: input.into(),
            kind,
        };
        tracing::debug!(input = %err.input, error = %err.kind, "rejected URI input");
        err
    }

    /// Returns the specific error that occurred.
    #[must_use]
    pub const fn kind(&self) -> &UriErrorKind {
        &self.kind
    }
}

/// Specific URI error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriErrorKind {
    /// A textual argument did not arrive as a string
    TypeError {
        /// Operation that received the argument
        method: &'static str,
        /// Description of the expected type
        expected: &'static str,
        /// Description of the type actually received
        found: &'static str,
    },
    /// Input cannot be decomposed per the RFC 3986 generic grammar
    MalformedUri {
        /// Which grammar rule was violated
        reason: &'static str,
    },
    /// Normalized scheme is not in the allowed set
    UnsupportedScheme {
        /// The normalized scheme that was requested
        scheme: String,
    },
    /// Port has the wrong type or is out of range
    InvalidPort(PortError),
    /// Path contains a raw `?`
    PathContainsQuery,
    /// Path contains a raw `#`
    PathContainsFragment,
    /// Query contains a raw `#`
    QueryContainsFragment,
}

impl fmt::Display for UriErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeError {
                method,
                expected,
                found,
            } => write!(f, "{method} expects a {expected} argument; received {found}"),
            Self::MalformedUri { reason } => {
                write!(f, "Invalid source URI present. Uri appears to be malformed: {reason}")
            }
            Self::UnsupportedScheme { scheme } => {
                write!(
                    f,
                    "Unsupported scheme requested \"{scheme}\"; must be empty or in the set ("
                )?;
                for (i, (name, _)) in ALLOWED_SCHEMES.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(name)?;
                }
                f.write_str(")")
            }
            Self::InvalidPort(e) => write!(f, "{e}"),
            Self::PathContainsQuery => {
                write!(f, "Invalid path provided; must not contain a query string")
            }
            Self::PathContainsFragment => {
                write!(f, "Invalid path provided; must not contain a URI fragment")
            }
            Self::QueryContainsFragment => {
                write!(f, "Invalid query string provided; must not contain a URI fragment")
            }
        }
    }
}

impl fmt::Display for UriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for UriError {}

/// Errors for port coercion and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortError {
    /// Value is neither null, an integer, nor an integer string
    InvalidType {
        /// Type of the value received
        found: &'static str,
    },
    /// Value is numeric but outside `1..=65535`
    OutOfRange {
        /// The offending value
        port: i64,
    },
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidType { found } => write!(
                f,
                "Invalid port \"{found}\" specified; must be an integer, an integer string, or null"
            ),
            Self::OutOfRange { port } => {
                write!(f, "Invalid port \"{port}\" specified; must be a valid TCP/UDP port")
            }
        }
    }
}

impl std::error::Error for PortError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_scheme_lists_allowed_set() {
        let kind = UriErrorKind::UnsupportedScheme {
            scheme: "ftp".to_string(),
        };
        assert_eq!(
            kind.to_string(),
            "Unsupported scheme requested \"ftp\"; must be empty or in the set (http, https)"
        );
    }

    #[test]
    fn error_display_is_kind_display() {
        let err = UriError::new("/a?b", UriErrorKind::PathContainsQuery);
        assert_eq!(err.to_string(), err.kind().to_string());
        assert_eq!(err.input, "/a?b");
    }

    #[test]
    fn port_messages_cite_value() {
        assert_eq!(
            PortError::OutOfRange { port: 65536 }.to_string(),
            "Invalid port \"65536\" specified; must be a valid TCP/UDP port"
        );
        assert_eq!(
            PortError::InvalidType { found: "boolean" }.to_string(),
            "Invalid port \"boolean\" specified; must be an integer, an integer string, or null"
        );
    }

    #[test]
    fn type_error_names_method() {
        let kind = UriErrorKind::TypeError {
            method: "Uri::from_bytes",
            expected: "string",
            found: "non-UTF-8 bytes",
        };
        assert_eq!(
            kind.to_string(),
            "Uri::from_bytes expects a string argument; received non-UTF-8 bytes"
        );
    }
}
