//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use uri_value::prelude::*;
//!
//! let uri = Uri::parse("http://example.com/").unwrap();
//! assert!(encode(uri.path(), CharClass::PATH) == uri.path());
//! ```

pub use crate::{
    // Core types
    CharClass, PortArg, Uri,
    // Encoding
    encode, is_encoded,
    // Errors
    PortError, UriError, UriErrorKind,
    // Constants
    ALLOWED_SCHEMES, MAX_PORT, MIN_PORT, default_port,
};
