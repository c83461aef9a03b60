//! Named-entity extraction.
//!
//! Walks engine-provided entity spans per document and emits either plain
//! span texts or table rows. The category filter splits the label space into
//! a "named" subset (people, places, organizations, ...) and an "extended"
//! subset (numeric, temporal, monetary labels) using a fixed list — the two
//! partition the unfiltered set.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::registry::{DocKey, DocRegistry};

/// Labels counted as "extended" (numeric/temporal/monetary) entities.
pub const EXTENDED_ENTITY_LABELS: [&str; 7] = [
    "DATE", "TIME", "PERCENT", "MONEY", "QUANTITY", "ORDINAL", "CARDINAL",
];

/// Which entity labels to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    All,
    /// Everything outside [`EXTENDED_ENTITY_LABELS`].
    Named,
    /// Only [`EXTENDED_ENTITY_LABELS`].
    Extended,
}

impl EntityCategory {
    /// Whether an entity with this label passes the filter.
    pub fn admits(&self, label: &str) -> bool {
        let extended = EXTENDED_ENTITY_LABELS.contains(&label);
        match self {
            Self::All => true,
            Self::Named => !extended,
            Self::Extended => extended,
        }
    }
}

/// One row of the entity table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRecord {
    /// String form of the owning document's key.
    pub doc: String,
    pub text: String,
    pub ent_type: String,
    /// Token index of the first token in the span.
    pub start_id: usize,
    /// Span length in tokens.
    pub length: usize,
}

/// A (label, text) pair, the listing form of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityListing {
    pub label: String,
    pub text: String,
}

/// Entity span texts per document key, filtered by category.
///
/// Every requested key gets an entry, empty when the document has no
/// matching entities.
pub fn entity_list(
    registry: &DocRegistry,
    keys: &[DocKey],
    category: EntityCategory,
) -> Result<FxHashMap<String, Vec<String>>> {
    let mut out = FxHashMap::default();
    for key in keys {
        let doc = registry.get(key)?;
        let texts: Vec<String> = doc
            .entities
            .iter()
            .filter(|e| category.admits(&e.label))
            .map(|e| doc.span_text(e.start_token, e.end_token).to_string())
            .collect();
        out.insert(key.as_str().to_string(), texts);
    }
    Ok(out)
}

/// Entity table over the requested documents.
///
/// Documents without entities contribute no rows.
pub fn entity_table(registry: &DocRegistry, keys: &[DocKey]) -> Result<Vec<EntityRecord>> {
    let mut rows = Vec::new();
    for key in keys {
        let doc = registry.get(key)?;
        for ent in &doc.entities {
            rows.push(EntityRecord {
                doc: key.as_str().to_string(),
                text: doc.span_text(ent.start_token, ent.end_token).to_string(),
                ent_type: ent.label.clone(),
                start_id: ent.start_token,
                length: ent.end_token - ent.start_token,
            });
        }
    }
    Ok(rows)
}

/// (label, text) listings per document key.
pub fn entity_listings(
    registry: &DocRegistry,
    keys: &[DocKey],
) -> Result<FxHashMap<String, Vec<EntityListing>>> {
    let mut out = FxHashMap::default();
    for key in keys {
        let doc = registry.get(key)?;
        let listings: Vec<EntityListing> = doc
            .entities
            .iter()
            .map(|e| EntityListing {
                label: e.label.clone(),
                text: doc.span_text(e.start_token, e.end_token).to_string(),
            })
            .collect();
        out.insert(key.as_str().to_string(), listings);
    }
    Ok(out)
}
