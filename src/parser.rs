//! Generic-URI grammar split.
//!
//! # Grammar Reference
//!
//! ```abnf
//! URI-reference = [ scheme ":" ] [ "//" authority ] path [ "?" query ] [ "#" fragment ]
//! authority     = [ userinfo "@" ] host [ ":" port ]
//! host          = IP-literal / reg-name
//! IP-literal    = "[" ( IPv6address / IPvFuture ) "]"
//! IPvFuture     = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )
//! reg-name      = *( unreserved / pct-encoded / sub-delims )
//! port          = *DIGIT
//! ```
//!
//! The splitter only decomposes and checks structure. Character-level
//! encoding of user info, path, query and fragment is left to the component
//! filters, so inputs like `/a b` are accepted here and encoded later.

use std::net::Ipv6Addr;

use crate::constants::MAX_PORT;
use crate::encoding::{self, CharClass};
use crate::error::UriErrorKind;
use crate::scheme;

/// Borrowed components of a URI string, before filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RawParts<'a> {
    pub scheme: Option<&'a str>,
    pub user: Option<&'a str>,
    pub password: Option<&'a str>,
    pub host: Option<&'a str>,
    pub port: Option<i64>,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

/// Splits `input` into its raw components.
///
/// # Errors
///
/// Returns [`UriErrorKind::MalformedUri`] when the input violates the
/// grammar above.
pub(crate) fn split(input: &str) -> Result<RawParts<'_>, UriErrorKind> {
    let mut parts = RawParts::default();

    let (rest, fragment) = split_once_opt(input, '#');
    parts.fragment = fragment;

    let (mut rest, query) = split_once_opt(rest, '?');
    parts.query = query;

    if let Some(colon) = rest.find(':') {
        let candidate = &rest[..colon];
        if !candidate.contains('/') {
            if !scheme::is_valid_syntax(candidate) {
                return Err(malformed("invalid scheme name"));
            }
            parts.scheme = Some(candidate);
            rest = &rest[colon + 1..];
        }
    }

    if let Some(after) = rest.strip_prefix("//") {
        let end = after.find('/').unwrap_or(after.len());
        split_authority(&after[..end], &mut parts)?;
        rest = &after[end..];
    }

    parts.path = rest;
    Ok(parts)
}

fn split_authority<'a>(authority: &'a str, parts: &mut RawParts<'a>) -> Result<(), UriErrorKind> {
    let host_port = match authority.rfind('@') {
        Some(at) => {
            let (user, password) = split_once_opt(&authority[..at], ':');
            parts.user = Some(user);
            parts.password = password;
            &authority[at + 1..]
        }
        None => authority,
    };

    let (host, port) = if host_port.starts_with('[') {
        let close = host_port
            .find(']')
            .ok_or_else(|| malformed("unterminated IP literal"))?;
        let host = &host_port[..=close];
        let tail = &host_port[close + 1..];
        let port = match tail.strip_prefix(':') {
            Some(port) => Some(port),
            None if tail.is_empty() => None,
            None => return Err(malformed("unexpected text after IP literal")),
        };
        if !is_valid_ip_literal(&host[1..host.len() - 1]) {
            return Err(malformed("invalid IP literal"));
        }
        (host, port)
    } else {
        let (host, port) = split_once_opt_last(host_port, ':');
        if !encoding::is_encoded(host, CharClass::USER_INFO) {
            return Err(malformed("invalid character in host"));
        }
        (host, port)
    };

    if host.is_empty() {
        return Err(malformed("authority without host"));
    }

    parts.host = Some(host);
    parts.port = port.map(parse_port).transpose()?.flatten();
    Ok(())
}

fn parse_port(port: &str) -> Result<Option<i64>, UriErrorKind> {
    if port.is_empty() {
        return Ok(None);
    }
    if !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed("port must be numeric"));
    }
    match port.parse::<i64>() {
        Ok(n) if n <= i64::from(MAX_PORT) => Ok(Some(n)),
        _ => Err(malformed("port out of range")),
    }
}

fn is_valid_ip_literal(inner: &str) -> bool {
    if let Some(future) = inner.strip_prefix(['v', 'V']) {
        let Some((version, address)) = future.split_once('.') else {
            return false;
        };
        return !version.is_empty()
            && version.bytes().all(|b| b.is_ascii_hexdigit())
            && !address.is_empty()
            && address
                .chars()
                .all(|c| c.is_ascii() && (c == ':' || CharClass::USER_INFO.allows(c)));
    }
    inner.parse::<Ipv6Addr>().is_ok()
}

fn split_once_opt(input: &str, delim: char) -> (&str, Option<&str>) {
    match input.split_once(delim) {
        Some((head, tail)) => (head, Some(tail)),
        None => (input, None),
    }
}

fn split_once_opt_last(input: &str, delim: char) -> (&str, Option<&str>) {
    match input.rsplit_once(delim) {
        Some((head, tail)) => (head, Some(tail)),
        None => (input, None),
    }
}

const fn malformed(reason: &'static str) -> UriErrorKind {
    UriErrorKind::MalformedUri { reason }
}
