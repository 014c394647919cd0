//! # tsumiki
//!
//! Shared conversion trait for the key import workspace.
//!
//! Every layer turns one representation into the next:
//!
//! ```text
//! &[u8] (PEM text) → Pem → Vec<u8> → Der → ASN1Object → Element → key record
//! ```
//!
//! Each arrow is an implementation of [`decoder::Decoder`]. The destination
//! side is constrained by the [`decoder::DecodableFrom`] marker, so a pair
//! that was never implemented does not type check.

#![forbid(unsafe_code)]

pub mod decoder;
