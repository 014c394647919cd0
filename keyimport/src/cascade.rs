//! Candidate cascade.
//!
//! One engine serves every object kind. The kind's candidate table is walked
//! in precedence order and the first label whose block size-probes cleanly is
//! committed to. Nothing after the committed entry is tried, even when the
//! committed block later fails to decrypt, parse or import.

use log::{debug, trace};
use pem::Pem;

use crate::buffer::DecodedContainer;
use crate::candidate::{CandidateEntry, DecodeKind, ObjectKind};
use crate::error::{Error, Result};
use crate::gate;

/// Parse and import step of one object kind.
pub(crate) trait Adapter {
    type Output;

    const KIND: ObjectKind;

    /// Turn the (decrypted) payload of a committed candidate into a record.
    fn adapt(&self, kind: DecodeKind, container: &DecodedContainer) -> Result<Self::Output>;
}

/// A committed candidate with its size probe result.
#[derive(Debug)]
pub(crate) struct Committed {
    pub entry: CandidateEntry,
    pem: Pem,
    len: usize,
    consumed: usize,
}

impl Committed {
    /// Decode the committed block into exact-size scratch storage.
    pub(crate) fn acquire(&self) -> Result<DecodedContainer> {
        DecodedContainer::acquire(&self.pem, self.len, self.consumed)
    }
}

/// Size-probe each candidate of `kind` and commit to the first match.
pub(crate) fn commit(kind: ObjectKind, input: &[u8]) -> Result<Committed> {
    for entry in kind.candidates() {
        let probe = Pem::find(input, entry.label)
            .and_then(|(pem, consumed)| Ok((pem.decoded_len()?, pem, consumed)));
        match probe {
            Ok((len, pem, consumed)) => {
                debug!(
                    "{kind}: committed to {} block ({len} bytes, {:?})",
                    entry.label, entry.kind
                );
                return Ok(Committed {
                    entry: *entry,
                    pem,
                    len,
                    consumed,
                });
            }
            Err(e) => trace!("{kind}: no usable {} block: {e}", entry.label),
        }
    }
    Err(Error::NotFound(kind))
}

/// Run the full pipeline for one adapter. Returns the record together with
/// the number of input bytes consumed by the committed block.
pub(crate) fn run<A: Adapter>(
    adapter: &A,
    input: &[u8],
    password: Option<&[u8]>,
) -> Result<(A::Output, usize)> {
    let committed = commit(A::KIND, input)?;
    let container = committed.acquire()?;
    let container = gate::open(committed.entry.kind, container, password)?;
    let output = adapter.adapt(committed.entry.kind, &container)?;
    Ok((output, container.consumed()))
}

/// Error for a table entry an adapter has no parser for.
pub(crate) fn unexpected(object: ObjectKind, kind: DecodeKind) -> Error {
    Error::malformed(format!("{object} cannot be read from {kind:?}"))
}
