//! Per-token attribute extraction.
//!
//! Walks the tokens of each requested document in key order and collects one
//! attribute per token into a single flat sequence. The coarse/detailed tag
//! split is plain name-based branching between the two built-in schemes —
//! nothing else is configurable.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::registry::{DocKey, DocRegistry};
use crate::types::Token;

/// Which tagset [`tags`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagScheme {
    /// The coarse universal tagset ([`PosTag`](crate::PosTag) codes).
    Universal,
    /// The engine's fine-grained treebank tags.
    Detailed,
}

/// A per-token attribute selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenAttr {
    /// Surface text.
    Text,
    Lemma,
    /// Coarse universal tag code.
    TagUniversal,
    /// Detailed treebank tag.
    TagDetailed,
    /// Entity label, empty string outside entities.
    EntityType,
}

fn attr_of(token: &Token, attr: TokenAttr) -> String {
    match attr {
        TokenAttr::Text => token.text.clone(),
        TokenAttr::Lemma => token.lemma.clone(),
        TokenAttr::TagUniversal => token.pos.as_str().to_string(),
        TokenAttr::TagDetailed => token.tag.clone(),
        TokenAttr::EntityType => token.ent_type.clone().unwrap_or_default(),
    }
}

/// Collect `attr` for every token of every requested document, flattened in
/// key order.
pub fn attributes(
    registry: &DocRegistry,
    keys: &[DocKey],
    attr: TokenAttr,
) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for key in keys {
        let doc = registry.get(key)?;
        out.extend(doc.tokens.iter().map(|t| attr_of(t, attr)));
    }
    Ok(out)
}

/// Like [`attributes`], but walks tokens grouped through each document's
/// sentence spans. Tokens outside any sentence span are skipped.
pub fn attributes_by_sent(
    registry: &DocRegistry,
    keys: &[DocKey],
    attr: TokenAttr,
) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for key in keys {
        let doc = registry.get(key)?;
        for sent in &doc.sentences {
            out.extend(doc.sentence_tokens(sent).iter().map(|t| attr_of(t, attr)));
        }
    }
    Ok(out)
}

/// Surface text of every token, flattened in key order.
pub fn tokens(registry: &DocRegistry, keys: &[DocKey]) -> Result<Vec<String>> {
    attributes(registry, keys, TokenAttr::Text)
}

/// POS tags under the selected scheme, flattened in key order.
///
/// Both schemes walk the same tokens, so for the same keys the two sequences
/// always have equal length.
pub fn tags(registry: &DocRegistry, keys: &[DocKey], scheme: TagScheme) -> Result<Vec<String>> {
    let attr = match scheme {
        TagScheme::Universal => TokenAttr::TagUniversal,
        TagScheme::Detailed => TokenAttr::TagDetailed,
    };
    attributes(registry, keys, attr)
}

/// Dependency head index of every token, walked sentence by sentence.
pub fn dep_head_ids(registry: &DocRegistry, keys: &[DocKey]) -> Result<Vec<usize>> {
    let mut out = Vec::new();
    for key in keys {
        let doc = registry.get(key)?;
        for sent in &doc.sentences {
            out.extend(doc.sentence_tokens(sent).iter().map(|t| t.head));
        }
    }
    Ok(out)
}
