//! Kani proof harnesses for the encoder and port validation.
//!
//! # Usage
//!
//! Kani is not a Cargo dependency. Install and run with:
//!
//! ```bash
//! cargo install --locked kani-verifier
//! cargo kani setup
//! cargo kani --features kani
//! ```
//!
//! This module is only compiled when using Kani (`#[cfg(kani)]`).

use crate::encoding::{CharClass, encode, is_encoded};
use crate::port::{self, PortArg};
use crate::{MAX_PORT, MIN_PORT, Uri};

/// ASCII characters that exercise every branch of the encoder
const PROBE_CHARS: &[u8] = b"aZ09-._~!$&'()*+,;=:@/?#% F";

/// Generate a short ASCII string drawn from `PROBE_CHARS`
fn arbitrary_probe_string() -> String {
    let len: usize = kani::any();
    let len = len % 5;
    (0..len)
        .map(|_| {
            let idx: usize = kani::any();
            PROBE_CHARS[idx % PROBE_CHARS.len()] as char
        })
        .collect()
}

/// Proof: encoder output is always in encoded form
#[kani::proof]
#[kani::unwind(6)]
fn proof_encode_output_is_encoded() {
    let input = arbitrary_probe_string();
    let out = encode(&input, CharClass::PATH);
    assert!(is_encoded(&out, CharClass::PATH));
}

/// Proof: encoding twice equals encoding once
#[kani::proof]
#[kani::unwind(6)]
fn proof_encode_idempotent() {
    let input = arbitrary_probe_string();
    let once = encode(&input, CharClass::USER_INFO).into_owned();
    let twice = encode(&once, CharClass::USER_INFO);
    assert_eq!(once, twice);
}

/// Proof: validated ports are always within range
#[kani::proof]
fn proof_validated_port_in_range() {
    let n: i64 = kani::any();
    if let Ok(Some(port)) = port::validate(Some(n)) {
        assert!(port >= MIN_PORT && port <= MAX_PORT);
        assert_eq!(i64::from(port), n);
    }
}

/// Proof: every in-range integer is accepted by `with_port`
#[kani::proof]
fn proof_with_port_accepts_range() {
    let n: u16 = kani::any();
    kani::assume(n >= MIN_PORT);
    let uri = Uri::new().with_port(PortArg::from(n)).expect("in range");
    assert_eq!(uri.port(), Some(n));
}
