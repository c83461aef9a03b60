//! Sentence extraction.
//!
//! Walks each document's sentence boundaries and returns the sentence texts
//! per key. A sentence's text runs to the start of the next sentence, so it
//! carries its trailing separators; `trim_trailing` strips them.

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::registry::{DocKey, DocRegistry};

/// Sentence texts per document key, in document order.
pub fn sentence_texts(
    registry: &DocRegistry,
    keys: &[DocKey],
    trim_trailing: bool,
) -> Result<FxHashMap<String, Vec<String>>> {
    let mut out = FxHashMap::default();
    for key in keys {
        let doc = registry.get(key)?;
        let sents: Vec<String> = doc
            .sentences
            .iter()
            .map(|s| {
                let text = doc.sentence_text(s);
                if trim_trailing {
                    text.trim_end().to_string()
                } else {
                    text.to_string()
                }
            })
            .collect();
        out.insert(key.as_str().to_string(), sents);
    }
    Ok(out)
}
