//! Conversion from a source representation `T` into a destination `D`.
//!
//! Two traits work together:
//!
//! 1. [`Decoder<T, D>`] is implemented on the source and performs the work.
//! 2. [`DecodableFrom<T>`] is implemented on the destination and admits the pair.
//!
//! ```no_run
//! use tsumiki::decoder::{DecodableFrom, Decoder};
//!
//! struct Octets(Vec<u8>);
//! struct Length(usize);
//!
//! impl DecodableFrom<Octets> for Length {}
//!
//! impl Decoder<Octets, Length> for Octets {
//!     type Error = std::convert::Infallible;
//!
//!     fn decode(&self) -> Result<Length, Self::Error> {
//!         Ok(Length(self.0.len()))
//!     }
//! }
//! ```
//!
//! A source can implement several destinations. Callers pick one with a type
//! annotation:
//!
//! ```ignore
//! let der: Der = pem.decode()?;
//! let key: RSAPrivateKey = element.decode()?;
//! ```

/// Decode `self` (of type `T`) into `D`.
pub trait Decoder<T, D: DecodableFrom<T>> {
    type Error;

    /// # Errors
    ///
    /// Whatever the implementation reports when `self` is not a valid
    /// encoding of `D`.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker admitting `Self` as a decode destination for `T`.
pub trait DecodableFrom<T> {}
