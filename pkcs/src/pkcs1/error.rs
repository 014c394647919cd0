use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} is not a SEQUENCE")]
    ExpectedSequence(&'static str),

    #[error("{actual} fields where {expected} are required")]
    InvalidElementCount {
        expected: &'static str,
        actual: usize,
    },

    #[error("{0} is not an INTEGER")]
    ExpectedInteger(&'static str),

    /// 0 is two-prime, 1 is multi-prime.
    #[error("RSAPrivateKey version {0} is neither two-prime nor multi-prime")]
    InvalidVersion(String),
}
