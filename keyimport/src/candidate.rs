//! Candidate tables.
//!
//! Each object kind owns a fixed list of `(label, DecodeKind)` pairs in
//! precedence order. Self-describing legacy labels come first, then the
//! generic PKCS#8 label, then the encrypted generic label.

use std::fmt::{Display, Formatter};

use pem::Label;

/// How the payload of a matched block is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeKind {
    /// Algorithm-specific structure named by the label itself.
    /// May be encrypted through `Proc-Type`/`DEK-Info` headers.
    RawLegacyStructure,
    /// PKCS#8 PrivateKeyInfo / OneAsymmetricKey.
    Pkcs8PrivateKeyInfo,
    /// PKCS#8 EncryptedPrivateKeyInfo, always encrypted.
    Pkcs8EncryptedPrivateKeyInfo,
    /// X.509 SubjectPublicKeyInfo.
    SubjectPublicKeyInfo,
    /// Bare parameter structure (`EC PARAMETERS`, `DH PARAMETERS`).
    RawAsn1Sequence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateEntry {
    pub label: Label,
    pub kind: DecodeKind,
}

impl CandidateEntry {
    const fn new(label: Label, kind: DecodeKind) -> Self {
        Self { label, kind }
    }
}

/// What a caller asked for.
///
/// `AnyPublicKey` and `AnyPrivateKey` are the classification queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Certificate,
    Crl,
    Csr,
    DhParameters,
    RsaPublicKey,
    RsaPrivateKey,
    DsaPublicKey,
    DsaPrivateKey,
    EcParameters,
    EcPublicKey,
    EcPrivateKey,
    EddsaPublicKey,
    EddsaPrivateKey,
    AnyPublicKey,
    AnyPrivateKey,
}

use DecodeKind::*;

const RAW_CERTIFICATE: CandidateEntry = CandidateEntry::new(Label::Certificate, RawLegacyStructure);
const RAW_CRL: CandidateEntry = CandidateEntry::new(Label::X509CRL, RawLegacyStructure);
const RAW_CSR: CandidateEntry = CandidateEntry::new(Label::CertificateRequest, RawLegacyStructure);
const DH_PARAMETERS: CandidateEntry = CandidateEntry::new(Label::DHParameters, RawAsn1Sequence);
const EC_PARAMETERS: CandidateEntry = CandidateEntry::new(Label::ECParameters, RawAsn1Sequence);
const RSA_PUBLIC_KEY: CandidateEntry = CandidateEntry::new(Label::RSAPublicKey, RawLegacyStructure);
const RSA_PRIVATE_KEY: CandidateEntry =
    CandidateEntry::new(Label::RSAPrivateKey, RawLegacyStructure);
const DSA_PRIVATE_KEY: CandidateEntry =
    CandidateEntry::new(Label::DSAPrivateKey, RawLegacyStructure);
const EC_PRIVATE_KEY: CandidateEntry = CandidateEntry::new(Label::ECPrivateKey, RawLegacyStructure);
const PUBLIC_KEY: CandidateEntry = CandidateEntry::new(Label::PublicKey, SubjectPublicKeyInfo);
const PRIVATE_KEY: CandidateEntry = CandidateEntry::new(Label::PrivateKey, Pkcs8PrivateKeyInfo);
const ENCRYPTED_PRIVATE_KEY: CandidateEntry =
    CandidateEntry::new(Label::EncryptedPrivateKey, Pkcs8EncryptedPrivateKeyInfo);

impl ObjectKind {
    /// Candidates in precedence order.
    pub fn candidates(self) -> &'static [CandidateEntry] {
        match self {
            ObjectKind::Certificate => &[RAW_CERTIFICATE],
            ObjectKind::Crl => &[RAW_CRL],
            ObjectKind::Csr => &[RAW_CSR],
            ObjectKind::DhParameters => &[DH_PARAMETERS],
            ObjectKind::RsaPublicKey => &[RSA_PUBLIC_KEY, PUBLIC_KEY],
            ObjectKind::RsaPrivateKey => &[RSA_PRIVATE_KEY, PRIVATE_KEY, ENCRYPTED_PRIVATE_KEY],
            ObjectKind::DsaPublicKey => &[PUBLIC_KEY],
            ObjectKind::DsaPrivateKey => &[DSA_PRIVATE_KEY, PRIVATE_KEY, ENCRYPTED_PRIVATE_KEY],
            ObjectKind::EcParameters => &[EC_PARAMETERS, EC_PRIVATE_KEY, PRIVATE_KEY, PUBLIC_KEY],
            ObjectKind::EcPublicKey => &[PUBLIC_KEY],
            ObjectKind::EcPrivateKey => &[EC_PRIVATE_KEY, PRIVATE_KEY, ENCRYPTED_PRIVATE_KEY],
            ObjectKind::EddsaPublicKey => &[PUBLIC_KEY],
            ObjectKind::EddsaPrivateKey => &[PRIVATE_KEY, ENCRYPTED_PRIVATE_KEY],
            // Legacy labels of disabled families are not probed.
            ObjectKind::AnyPublicKey => &[
                #[cfg(feature = "rsa")]
                RSA_PUBLIC_KEY,
                PUBLIC_KEY,
            ],
            ObjectKind::AnyPrivateKey => &[
                #[cfg(feature = "rsa")]
                RSA_PRIVATE_KEY,
                #[cfg(feature = "dsa")]
                DSA_PRIVATE_KEY,
                #[cfg(feature = "ec")]
                EC_PRIVATE_KEY,
                PRIVATE_KEY,
            ],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Certificate => "certificate",
            ObjectKind::Crl => "CRL",
            ObjectKind::Csr => "certificate request",
            ObjectKind::DhParameters => "DH parameters",
            ObjectKind::RsaPublicKey => "RSA public key",
            ObjectKind::RsaPrivateKey => "RSA private key",
            ObjectKind::DsaPublicKey => "DSA public key",
            ObjectKind::DsaPrivateKey => "DSA private key",
            ObjectKind::EcParameters => "EC domain parameters",
            ObjectKind::EcPublicKey => "EC public key",
            ObjectKind::EcPrivateKey => "EC private key",
            ObjectKind::EddsaPublicKey => "EdDSA public key",
            ObjectKind::EddsaPrivateKey => "EdDSA private key",
            ObjectKind::AnyPublicKey => "public key",
            ObjectKind::AnyPrivateKey => "private key",
        }
    }
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
