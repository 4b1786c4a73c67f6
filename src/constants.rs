//! Constants for URI validation.

/// Schemes a [`Uri`](crate::Uri) may carry, paired with their default ports.
///
/// Order matters: it is the order used when listing the set in
/// [`UnsupportedScheme`](crate::UriErrorKind::UnsupportedScheme) messages.
pub const ALLOWED_SCHEMES: &[(&str, u16)] = &[("http", 80), ("https", 443)];

/// Lowest valid TCP/UDP port.
pub const MIN_PORT: u16 = 1;

/// Highest valid TCP/UDP port.
pub const MAX_PORT: u16 = 65535;

/// Returns the default port for an allowed scheme.
///
/// The lookup is exact; callers normalize the scheme to lowercase first.
///
/// # Examples
///
/// ```
/// use uri_value::default_port;
///
/// assert_eq!(default_port("https"), Some(443));
/// assert_eq!(default_port("ftp"), None);
/// ```
#[must_use]
pub fn default_port(scheme: &str) -> Option<u16> {
    ALLOWED_SCHEMES
        .iter()
        .find(|(name, _)| *name == scheme)
        .map(|&(_, port)| port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ports() {
        assert_eq!(default_port("http"), Some(80));
        assert_eq!(default_port("https"), Some(443));
    }

    #[test]
    fn unknown_or_uppercase_scheme_has_no_default() {
        assert_eq!(default_port("ftp"), None);
        assert_eq!(default_port("HTTP"), None);
        assert_eq!(default_port(""), None);
    }
}
