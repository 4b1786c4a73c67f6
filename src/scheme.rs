//! Scheme normalization against the allowed-scheme table.

use crate::constants::ALLOWED_SCHEMES;
use crate::error::UriErrorKind;

/// Normalizes a requested scheme.
///
/// Lowercases the input and strips one trailing `:` together with an
/// optional `//` after it, so `HTTP`, `http:` and `HTTP://` all become
/// `http`. An empty result means "no scheme" and is always accepted.
///
/// # Errors
///
/// Returns [`UriErrorKind::UnsupportedScheme`] if the normalized scheme is
/// non-empty and not in [`ALLOWED_SCHEMES`].
pub(crate) fn normalize(input: &str) -> Result<String, UriErrorKind> {
    let lowered = input.to_ascii_lowercase();
    let trimmed = lowered
        .strip_suffix("://")
        .or_else(|| lowered.strip_suffix(':'))
        .unwrap_or(lowered.as_str());

    if trimmed.is_empty() || is_allowed(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(UriErrorKind::UnsupportedScheme {
            scheme: trimmed.to_string(),
        })
    }
}

/// Returns true if `scheme` (already lowercase) is in the allowed set.
pub(crate) fn is_allowed(scheme: &str) -> bool {
    ALLOWED_SCHEMES.iter().any(|(name, _)| *name == scheme)
}

/// Checks the RFC 3986 scheme production:
/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
pub(crate) fn is_valid_syntax(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
