//! JSON encoding of documents and document collections

use super::errors::{CodecError, CodecResult};
use super::types::Document;

/// Encodes a single document to its persisted bytes.
pub fn encode<D: Document>(doc: &D) -> CodecResult<Vec<u8>> {
    serde_json::to_vec(doc).map_err(|source| CodecError::Encode {
        doc_type: D::DOC_TYPE,
        key: doc.key().to_string(),
        source,
    })
}

/// Decodes bytes stored at `key` as a document of kind `D`.
///
/// Fails if the bytes are not valid JSON for `D` or carry a different
/// `docType`.
pub fn decode<D: Document>(key: &str, bytes: &[u8]) -> CodecResult<D> {
    let doc: D = serde_json::from_slice(bytes).map_err(|source| CodecError::Decode {
        doc_type: D::DOC_TYPE,
        key: key.to_string(),
        source,
    })?;

    if doc.doc_type() != D::DOC_TYPE {
        return Err(CodecError::WrongDocType {
            key: key.to_string(),
            expected: D::DOC_TYPE,
            found: doc.doc_type(),
        });
    }

    Ok(doc)
}

/// Decodes every `(key, bytes)` pair, stopping at the first failure.
///
/// All-or-nothing: a single bad document fails the whole collection.
pub fn decode_collection<'a, D, I>(records: I) -> CodecResult<Vec<D>>
where
    D: Document,
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    records
        .into_iter()
        .map(|(key, bytes)| decode::<D>(key, bytes))
        .collect()
}

/// Encodes a collection as one JSON array. Empty collections encode as `[]`.
pub fn encode_collection<D: Document>(docs: &[D]) -> CodecResult<String> {
    serde_json::to_string(docs).map_err(|source| CodecError::Encode {
        doc_type: D::DOC_TYPE,
        key: "<collection>".to_string(),
        source,
    })
}
