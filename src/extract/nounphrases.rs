//! Noun-phrase extraction.
//!
//! Walks engine-provided noun-chunk spans per document. Chunk detection is
//! the engine's job (it typically needs the dependency parse); this module
//! only flattens the spans it finds.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::Result;
use crate::registry::{DocKey, DocRegistry};

/// One row of the noun-phrase table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NounPhraseRecord {
    /// String form of the owning document's key.
    pub doc: String,
    pub text: String,
    /// Surface text of the chunk's syntactic root token.
    pub root_text: String,
    /// Token index of the first token in the chunk.
    pub start_id: usize,
    /// Token index of the root token.
    pub root_id: usize,
    /// Chunk length in tokens.
    pub length: usize,
}

/// Noun-chunk texts per document key.
pub fn nounphrase_list(
    registry: &DocRegistry,
    keys: &[DocKey],
) -> Result<FxHashMap<String, Vec<String>>> {
    let mut out = FxHashMap::default();
    for key in keys {
        let doc = registry.get(key)?;
        let texts: Vec<String> = doc
            .noun_chunks
            .iter()
            .map(|c| doc.span_text(c.start_token, c.end_token).to_string())
            .collect();
        out.insert(key.as_str().to_string(), texts);
    }
    Ok(out)
}

/// Noun-phrase table over the requested documents.
///
/// Documents without chunks contribute no rows.
pub fn nounphrase_table(
    registry: &DocRegistry,
    keys: &[DocKey],
) -> Result<Vec<NounPhraseRecord>> {
    let mut rows = Vec::new();
    for key in keys {
        let doc = registry.get(key)?;
        for chunk in &doc.noun_chunks {
            rows.push(NounPhraseRecord {
                doc: key.as_str().to_string(),
                text: doc.span_text(chunk.start_token, chunk.end_token).to_string(),
                root_text: doc.tokens[chunk.root_token].text.clone(),
                start_id: chunk.start_token,
                root_id: chunk.root_token,
                length: chunk.end_token - chunk.start_token,
            });
        }
    }
    Ok(rows)
}
