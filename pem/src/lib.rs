//! RFC 7468 textual encoding ("PEM").
//!
//! Besides parsing a single block with [`Pem::from_str`], this crate locates a
//! block with a given label inside arbitrary text ([`Pem::find`]) and decodes
//! its payload in two phases: [`Pem::decoded_len`] reports the exact payload
//! size so the caller can allocate, then [`Pem::decode_into`] fills the
//! caller's buffer.

pub mod error;
pub mod header;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
    sync::LazyLock,
};

use base64::{DecodeSliceError, Engine, engine::general_purpose::STANDARD};
use error::Error;
use regex::Regex;
use tsumiki::decoder::{DecodableFrom, Decoder};

pub use header::{DekInfo, Header, ProcType};

const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";
const ENCRYPTED_PRIVATE_KEY_LABEL: &str = "ENCRYPTED PRIVATE KEY";
const RSA_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";
const DSA_PRIVATE_KEY_LABEL: &str = "DSA PRIVATE KEY";
const EC_PRIVATE_KEY_LABEL: &str = "EC PRIVATE KEY";
const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";
const RSA_PUBLIC_KEY_LABEL: &str = "RSA PUBLIC KEY";
const EC_PARAMETERS_LABEL: &str = "EC PARAMETERS";
const DH_PARAMETERS_LABEL: &str = "DH PARAMETERS";
const CERTIFICATE_LABEL: &str = "CERTIFICATE";
const X509_CRL_LABEL: &str = "X509 CRL";
const CERTIFICATE_REQUEST_LABEL: &str = "CERTIFICATE REQUEST";

static BOUNDARY: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^-----(?:BEGIN|END) ([A-Z0-9 ]+)-----\s*$"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// PKCS#8 private key (non-encrypted)
    PrivateKey,
    /// PKCS#8 encrypted private key
    EncryptedPrivateKey,
    /// PKCS#1 RSA private key
    RSAPrivateKey,
    /// OpenSSL legacy DSA private key
    DSAPrivateKey,
    /// SEC1 EC private key
    ECPrivateKey,
    /// X.509 SubjectPublicKeyInfo
    PublicKey,
    /// PKCS#1 RSA public key
    RSAPublicKey,
    /// RFC 5480 ECParameters
    ECParameters,
    /// PKCS#3 DHParameter
    DHParameters,
    /// X.509 Certificate
    Certificate,
    /// X.509 Certificate Revocation List
    X509CRL,
    /// PKCS#10 Certification Request
    CertificateRequest,
    Unknown,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::PrivateKey => PRIVATE_KEY_LABEL,
            Label::EncryptedPrivateKey => ENCRYPTED_PRIVATE_KEY_LABEL,
            Label::RSAPrivateKey => RSA_PRIVATE_KEY_LABEL,
            Label::DSAPrivateKey => DSA_PRIVATE_KEY_LABEL,
            Label::ECPrivateKey => EC_PRIVATE_KEY_LABEL,
            Label::PublicKey => PUBLIC_KEY_LABEL,
            Label::RSAPublicKey => RSA_PUBLIC_KEY_LABEL,
            Label::ECParameters => EC_PARAMETERS_LABEL,
            Label::DHParameters => DH_PARAMETERS_LABEL,
            Label::Certificate => CERTIFICATE_LABEL,
            Label::X509CRL => X509_CRL_LABEL,
            Label::CertificateRequest => CERTIFICATE_REQUEST_LABEL,
            Label::Unknown => "UNKNOWN",
        }
    }

    fn get_label(line: &str) -> Result<Label, Error> {
        let re = BOUNDARY
            .as_ref()
            .map_err(|_| Error::InvalidEncapsulationBoundary)?;
        let captured = re
            .captures(line)
            .ok_or(Error::InvalidEncapsulationBoundary)?;
        captured
            .get(1)
            .ok_or(Error::InvalidEncapsulationBoundary)
            .map(|c| Label::from_str(c.as_str()))?
    }

    fn begin_boundary(&self) -> String {
        format!("-----BEGIN {}-----", self.as_str())
    }

    fn end_boundary(&self) -> String {
        format!("-----END {}-----", self.as_str())
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Label {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PRIVATE_KEY_LABEL => Ok(Label::PrivateKey),
            ENCRYPTED_PRIVATE_KEY_LABEL => Ok(Label::EncryptedPrivateKey),
            RSA_PRIVATE_KEY_LABEL => Ok(Label::RSAPrivateKey),
            DSA_PRIVATE_KEY_LABEL => Ok(Label::DSAPrivateKey),
            EC_PRIVATE_KEY_LABEL => Ok(Label::ECPrivateKey),
            PUBLIC_KEY_LABEL => Ok(Label::PublicKey),
            RSA_PUBLIC_KEY_LABEL => Ok(Label::RSAPublicKey),
            EC_PARAMETERS_LABEL => Ok(Label::ECParameters),
            DH_PARAMETERS_LABEL => Ok(Label::DHParameters),
            CERTIFICATE_LABEL => Ok(Label::Certificate),
            X509_CRL_LABEL => Ok(Label::X509CRL),
            CERTIFICATE_REQUEST_LABEL => Ok(Label::CertificateRequest),
            _ => Err(Error::InvalidLabel),
        }
    }
}

/*
ref: https://www.rfc-editor.org/rfc/rfc7468.html#section-3
ref: https://www.rfc-editor.org/rfc/rfc1421.html#section-4.4 (encapsulated header)
*/

#[derive(Debug, Clone)]
pub struct Pem {
    label: Label,
    header: Header,
    base64_data: String, // base64 encoded data
}

impl Pem {
    pub fn new(label: Label, base64_data: String) -> Self {
        Pem {
            label,
            header: Header::default(),
            base64_data,
        }
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn data(&self) -> &str {
        &self.base64_data
    }

    /// Locate the first block labeled `label` in `input`.
    ///
    /// Text before the block and other blocks are skipped. The label match is
    /// exact, so searching `PRIVATE KEY` never matches `RSA PRIVATE KEY` or
    /// `ENCRYPTED PRIVATE KEY`. Returns the parsed block together with the
    /// number of input bytes consumed up to the end of the post-encapsulation
    /// boundary, including one trailing line break.
    pub fn find(input: &[u8], label: Label) -> Result<(Pem, usize), Error> {
        let begin = label.begin_boundary();
        let end = label.end_boundary();

        let start = find_bytes(input, begin.as_bytes())
            .ok_or(Error::MissingPreEncapsulationBoundary)?;
        let body_start = start + begin.len();
        let end_start = find_bytes(&input[body_start..], end.as_bytes())
            .map(|pos| body_start + pos)
            .ok_or(Error::MissingPostEncapsulationBoundary)?;
        let block_end = end_start + end.len();

        let block = &input[start..block_end];
        if !block.is_ascii() {
            return Err(Error::NonAsciiText);
        }
        let text = std::str::from_utf8(block).map_err(|_| Error::NonAsciiText)?;
        let pem = Pem::from_str(text)?;

        let rest = &input[block_end..];
        let consumed = block_end
            + if rest.starts_with(b"\r\n") {
                2
            } else if rest.starts_with(b"\n") {
                1
            } else {
                0
            };

        Ok((pem, consumed))
    }

    /// Exact number of bytes [`Pem::decode_into`] will write.
    ///
    /// The base64 text is validated here, so a successful size probe means the
    /// payload is decodable.
    pub fn decoded_len(&self) -> Result<usize, Error> {
        let data = self.base64_data.as_bytes();
        if data.is_empty() {
            return Err(Error::MissingData);
        }
        if data.len() % 4 != 0 {
            return Err(Error::InvalidBase64Finl);
        }
        let padding = data.iter().rev().take_while(|&&b| b == b'=').count();
        if padding > 2 {
            return Err(Error::InvalidBase64Finl);
        }
        let body = &data[..data.len() - padding];
        if !body
            .iter()
            .all(|&b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/')
        {
            return Err(Error::InvalidBase64Line);
        }
        Ok(data.len() / 4 * 3 - padding)
    }

    /// Decode the payload into `dest`, returning the number of bytes written.
    pub fn decode_into(&self, dest: &mut [u8]) -> Result<usize, Error> {
        let needed = self.decoded_len()?;
        if dest.len() < needed {
            return Err(Error::OutputTooSmall(needed));
        }
        STANDARD
            .decode_slice(self.data(), &mut dest[..needed])
            .map_err(|e| match e {
                DecodeSliceError::DecodeError(e) => Error::Base64Decode(e),
                DecodeSliceError::OutputSliceTooSmall => Error::OutputTooSmall(needed),
            })
    }
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

impl DecodableFrom<Pem> for Vec<u8> {}

impl Decoder<Pem, Vec<u8>> for Pem {
    type Error = Error;

    fn decode(&self) -> Result<Vec<u8>, Self::Error> {
        // This discards label and header information from Pem format.
        let decoded = STANDARD.decode(self.data()).map_err(Error::Base64Decode)?;
        Ok(decoded)
    }
}

impl DecodableFrom<&str> for Pem {}

impl Decoder<&str, Pem> for &str {
    type Error = Error;

    fn decode(&self) -> Result<Pem, Self::Error> {
        Pem::from_str(self)
    }
}

impl FromStr for Pem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut state = PemParsingState::default();
        let mut label = Label::Unknown;
        let mut header_lines: Vec<String> = vec![];
        let mut base64_lines = vec![];
        let mut base64_finl_lines = vec![];
        let mut lines = s.lines().map(str::trim_end);
        loop {
            match state {
                PemParsingState::Init => match lines.next() {
                    Some(line) => {
                        if let Ok(l) = Label::get_label(line) {
                            label = l;
                            state = PemParsingState::PreEncapsulationBoundary;
                        }
                        // Explanatory text before the block is skipped.
                        // https://www.rfc-editor.org/rfc/rfc7468.html#section-5.2
                    }
                    None => return Err(Error::MissingPreEncapsulationBoundary),
                },
                PemParsingState::PreEncapsulationBoundary => match lines.next() {
                    Some(line) => {
                        if line.is_empty() || Label::get_label(line).is_ok() {
                            return Err(Error::MissingData);
                        }
                        if line.contains(':') {
                            if !header_lines.is_empty() {
                                return Err(Error::InvalidHeader(line.to_string()));
                            }
                            header_lines.push(line.to_string());
                            state = PemParsingState::Headers;
                        } else if is_base64_finl(line) {
                            base64_finl_lines.push(line);
                            state = PemParsingState::Base64Finl;
                        } else {
                            base64_lines.push(line.trim_start());
                            state = PemParsingState::Base64Lines;
                        }
                    }
                    None => return Err(Error::MissingData),
                },
                PemParsingState::Headers => match lines.next() {
                    Some(line) => {
                        if line.is_empty() {
                            // blank line separates headers from the base64 text
                            state = PemParsingState::PreEncapsulationBoundary;
                        } else if line.starts_with([' ', '\t']) {
                            // folded continuation of the previous field
                            if let Some(last) = header_lines.last_mut() {
                                last.push_str(line.trim_start());
                            }
                        } else if line.contains(':') {
                            header_lines.push(line.to_string());
                        } else {
                            return Err(Error::InvalidHeader(line.to_string()));
                        }
                    }
                    None => return Err(Error::MissingData),
                },
                PemParsingState::Base64Lines => match lines.next() {
                    Some(line) => {
                        if line.is_empty() {
                            return Err(Error::InvalidBase64Line);
                        }
                        if let Ok(l) = Label::get_label(line) {
                            // reach postdb
                            if l.ne(&label) {
                                return Err(Error::LabelMissMatch);
                            }
                            state = PemParsingState::PostEncapsulationBoundary;
                        } else if is_base64_finl(line) {
                            base64_finl_lines.push(line);
                            state = PemParsingState::Base64Finl;
                        } else {
                            base64_lines.push(line.trim_start());
                        }
                    }
                    None => return Err(Error::MissingPostEncapsulationBoundary),
                },
                PemParsingState::Base64Finl => match lines.next() {
                    Some(line) => {
                        if line.is_empty() {
                            return Err(Error::InvalidBase64Finl);
                        }
                        if let Ok(l) = Label::get_label(line) {
                            // reach postdb
                            if l.ne(&label) {
                                return Err(Error::LabelMissMatch);
                            }
                            state = PemParsingState::PostEncapsulationBoundary;
                        } else {
                            if !is_base64_finl(line) {
                                return Err(Error::InvalidBase64Finl);
                            }
                            base64_finl_lines.push(line);
                        }
                    }
                    None => return Err(Error::MissingPostEncapsulationBoundary),
                },
                PemParsingState::PostEncapsulationBoundary => break,
            }
        }
        let finl = base64_finl(&base64_finl_lines)?;
        base64_lines.push(&finl);

        Ok(Pem {
            label,
            header: Header::parse(&header_lines),
            base64_data: base64_lines.join(""),
        })
    }
}

/*
* pre-eb -> headers -> blank -> base64finl -> post-eb
*        ------------------> base64lines-|---------->
*                                |_|
 */
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
enum PemParsingState {
    #[default]
    Init,
    PreEncapsulationBoundary,
    Headers,
    Base64Lines,
    Base64Finl,
    PostEncapsulationBoundary,
}

fn base64_finl(lines: &[&str]) -> Result<String, Error> {
    // base64finl = *base64char (base64pad *WSP eol base64pad / *2base64pad) *WSP eol
    // exp-1)
    // ..AB=\s\s\s\n
    // =\s\s\n
    // exp-2)
    // ..AB==\s\s\n
    if lines.iter().any(|l| l.is_empty()) {
        return Err(Error::InvalidBase64Finl);
    }
    let lines = lines.iter().map(|l| l.trim()).collect::<Vec<&str>>();
    let content = lines.join("");
    Ok(content)
}

fn is_base64_finl(line: &str) -> bool {
    line.contains('=')
}
