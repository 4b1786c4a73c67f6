//! Port arguments accepted by [`Uri::with_port`](crate::Uri::with_port).

use std::fmt;

use crate::constants::{MAX_PORT, MIN_PORT};
use crate::error::PortError;

/// A port value as handed over by a message layer.
///
/// Headers, configuration files and deserialized payloads deliver ports in
/// several shapes. `PortArg` collects them so the coercion rules live in one
/// place: null removes the port, numbers and numeric strings are truncated
/// toward zero and range-checked, and anything else is a type error.
///
/// # Examples
///
/// ```
/// use uri_value::PortArg;
///
/// assert_eq!(PortArg::from(8080u16), PortArg::Int(8080));
/// assert_eq!(PortArg::from("8080"), PortArg::Str("8080".to_string()));
/// assert_eq!(PortArg::from(None::<u16>), PortArg::Null);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PortArg {
    /// No port; removes port information
    Null,
    /// An integer port, not yet range-checked
    Int(i64),
    /// A floating-point port, truncated toward zero
    Float(f64),
    /// A string expected to hold a decimal number
    Str(String),
    /// A value of some other type, described by its type name
    Other(&'static str),
}

impl PortArg {
    /// Coerces the argument to an optional integer without range checking.
    ///
    /// Strings may carry surrounding ASCII whitespace, a sign, a fraction
    /// and an exponent (`"80.5"`, `"1e3"`); fractions are truncated.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::InvalidType`] for non-numeric strings and for
    /// [`PortArg::Other`].
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_value::PortArg;
    ///
    /// assert_eq!(PortArg::from("1e3").coerce(), Ok(Some(1000)));
    /// assert_eq!(PortArg::from(80.9).coerce(), Ok(Some(80)));
    /// assert!(PortArg::from("0x50").coerce().is_err());
    /// ```
    pub fn coerce(&self) -> Result<Option<i64>, PortError> {
        match self {
            Self::Null => Ok(None),
            Self::Int(n) => Ok(Some(*n)),
            Self::Float(f) => Ok(Some(truncate(*f))),
            Self::Str(s) => coerce_str(s.trim_matches(|c: char| c.is_ascii_whitespace())),
            Self::Other(found) => Err(PortError::InvalidType { found: *found }),
        }
    }
}

fn coerce_str(s: &str) -> Result<Option<i64>, PortError> {
    if let Ok(n) = s.parse::<i64>() {
        return Ok(Some(n));
    }
    if !is_numeric(s) {
        return Err(PortError::InvalidType { found: "string" });
    }
    s.parse::<f64>()
        .map(|f| Some(truncate(f)))
        .map_err(|_| PortError::InvalidType { found: "string" })
}

/// `[sign] (digits ["." digits] / "." digits) [("e" / "E") [sign] digits]`
fn is_numeric(s: &str) -> bool {
    fn digits(bytes: &[u8]) -> usize {
        bytes.iter().take_while(|b| b.is_ascii_digit()).count()
    }

    let bytes = s.as_bytes();
    let mut i = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let whole = digits(&bytes[i..]);
    i += whole;
    let mut fraction = 0;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        fraction = digits(&bytes[i..]);
        i += fraction;
    }
    if whole + fraction == 0 {
        return false;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exponent = digits(&bytes[i..]);
        if exponent == 0 {
            return false;
        }
        i += exponent;
    }

    i == bytes.len()
}

/// Truncates toward zero; NaN maps to 0 and infinities saturate.
#[allow(clippy::cast_possible_truncation)]
fn truncate(f: f64) -> i64 {
    f.trunc() as i64
}

/// Checks that a coerced port lies in `1..=65535`.
///
/// # Errors
///
/// Returns [`PortError::OutOfRange`] citing the offending value.
pub(crate) fn validate(port: Option<i64>) -> Result<Option<u16>, PortError> {
    match port {
        None => Ok(None),
        Some(n) => u16::try_from(n)
            .ok()
            .filter(|p| (MIN_PORT..=MAX_PORT).contains(p))
            .map(Some)
            .ok_or(PortError::OutOfRange { port: n }),
    }
}

impl fmt::Display for PortArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
            Self::Other(found) => f.write_str(found),
        }
    }
}

impl From<u16> for PortArg {
    fn from(port: u16) -> Self {
        Self::Int(i64::from(port))
    }
}

impl From<u32> for PortArg {
    fn from(port: u32) -> Self {
        Self::Int(i64::from(port))
    }
}

impl From<i32> for PortArg {
    fn from(port: i32) -> Self {
        Self::Int(i64::from(port))
    }
}

impl From<i64> for PortArg {
    fn from(port: i64) -> Self {
        Self::Int(port)
    }
}

impl From<Option<u16>> for PortArg {
    fn from(port: Option<u16>) -> Self {
        port.map_or(Self::Null, Self::from)
    }
}

impl From<&str> for PortArg {
    fn from(port: &str) -> Self {
        Self::Str(port.to_string())
    }
}

impl From<String> for PortArg {
    fn from(port: String) -> Self {
        Self::Str(port)
    }
}

impl From<bool> for PortArg {
    fn from(_: bool) -> Self {
        Self::Other("boolean")
    }
}

impl From<f64> for PortArg {
    fn from(port: f64) -> Self {
        Self::Float(port)
    }
}
