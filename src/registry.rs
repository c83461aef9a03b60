//! Document registry — parse once, query many times.
//!
//! [`DocRegistry`] owns every parsed [`Doc`] for the lifetime of a session.
//! Each parse call stores the engine's output under a freshly generated
//! [`DocKey`] and hands the keys back to the caller; all later queries
//! (attribute extraction, entity tables, token counts) resolve through those
//! keys. Entries are never evicted — if this layer ever backs a long-running
//! service, an explicit lifecycle policy has to come first.
//!
//! Single-threaded by contract: one writer, one reader, one process. The
//! registry is deliberately not `Sync` wrapped; any parallelism belongs to
//! the engine's own batch path.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::error::{BridgeError, Result};
use crate::trace_op;
use crate::types::{Doc, Stage};

// ============================================================================
// DocKey
// ============================================================================

const KEY_SUFFIX_LEN: usize = 10;
const KEY_SUFFIX_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Opaque identifier for a registered document.
///
/// Generated from the epoch-microsecond clock plus a random suffix so that
/// two parses within the same timer tick still get distinct keys. The format
/// is not part of the API contract; treat the key as an opaque handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocKey(String);

impl DocKey {
    pub(crate) fn generate() -> Self {
        let micros = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros())
            .unwrap_or_default();
        let mut rng = rand::thread_rng();
        let mut key = micros.to_string();
        for _ in 0..KEY_SUFFIX_LEN {
            let idx = rng.gen_range(0..KEY_SUFFIX_CHARS.len());
            key.push(KEY_SUFFIX_CHARS[idx] as char);
        }
        DocKey(key)
    }

    /// Reconstruct a key from its string form (e.g. one previously handed
    /// across the interchange boundary).
    pub fn from_raw(raw: &str) -> Self {
        DocKey(raw.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decode raw bytes to the UTF-8 representation submitted to the engine.
/// Invalid sequences are replaced rather than rejected.
pub fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

// ============================================================================
// DocRegistry
// ============================================================================

/// Session-lifetime store of parsed documents.
#[derive(Debug, Default)]
pub struct DocRegistry {
    documents: FxHashMap<DocKey, Doc>,
}

impl DocRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `texts` with the engine and register each resulting document.
    ///
    /// Returns one fresh key per input, in input order. With `batch` set the
    /// engine's native [`Engine::pipe`] path is used; otherwise texts are
    /// parsed one at a time. Engine failures abort the call and surface
    /// unmodified; documents already stored by a previous call are untouched.
    pub fn parse<E>(&mut self, engine: &mut E, texts: &[String], batch: bool) -> Result<Vec<DocKey>>
    where
        E: Engine + ?Sized,
    {
        trace_op!("parse");
        let docs = if batch {
            engine.pipe(texts)?
        } else {
            texts
                .iter()
                .map(|t| engine.parse(t))
                .collect::<Result<Vec<_>>>()?
        };

        let mut keys = Vec::with_capacity(docs.len());
        for doc in docs {
            keys.push(self.insert(doc));
        }
        Ok(keys)
    }

    /// Parse raw byte inputs, decoding each with [`decode_text`] first.
    ///
    /// Convenience over [`DocRegistry::parse`] for callers whose texts arrive
    /// as undecoded bytes; invalid sequences are replaced, not rejected.
    pub fn parse_bytes<E>(
        &mut self,
        engine: &mut E,
        texts: &[Vec<u8>],
        batch: bool,
    ) -> Result<Vec<DocKey>>
    where
        E: Engine + ?Sized,
    {
        let decoded: Vec<String> = texts.iter().map(|t| decode_text(t)).collect();
        self.parse(engine, &decoded, batch)
    }

    /// Register an already-parsed document under a fresh key.
    pub fn insert(&mut self, doc: Doc) -> DocKey {
        let mut key = DocKey::generate();
        // Regenerate on the (unlikely) suffix collision within one tick.
        while self.documents.contains_key(&key) {
            key = DocKey::generate();
        }
        self.documents.insert(key.clone(), doc);
        key
    }

    pub fn get(&self, key: &DocKey) -> Result<&Doc> {
        self.documents
            .get(key)
            .ok_or_else(|| BridgeError::UnknownKey(key.clone()))
    }

    pub fn get_mut(&mut self, key: &DocKey) -> Result<&mut Doc> {
        self.documents
            .get_mut(key)
            .ok_or_else(|| BridgeError::UnknownKey(key.clone()))
    }

    pub fn contains(&self, key: &DocKey) -> bool {
        self.documents.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Token count per document, in key order.
    pub fn ntokens(&self, keys: &[DocKey]) -> Result<Vec<usize>> {
        keys.iter().map(|k| Ok(self.get(k)?.len())).collect()
    }

    /// Per-sentence token counts per document, in key order.
    pub fn ntokens_by_sent(&self, keys: &[DocKey]) -> Result<Vec<Vec<usize>>> {
        keys.iter()
            .map(|k| {
                let doc = self.get(k)?;
                Ok(doc
                    .sentences
                    .iter()
                    .map(|s| s.end_token - s.start_token)
                    .collect())
            })
            .collect()
    }

    /// Run the tagger stage over the stored documents, in place.
    pub fn run_tagger<E>(&mut self, engine: &mut E, keys: &[DocKey]) -> Result<()>
    where
        E: Engine + ?Sized,
    {
        self.run_stage(engine, keys, Stage::Tagger)
    }

    /// Run named-entity recognition over the stored documents, in place.
    pub fn run_entity<E>(&mut self, engine: &mut E, keys: &[DocKey]) -> Result<()>
    where
        E: Engine + ?Sized,
    {
        self.run_stage(engine, keys, Stage::Ner)
    }

    /// Run the dependency parser over the stored documents, in place.
    pub fn run_dependency_parser<E>(&mut self, engine: &mut E, keys: &[DocKey]) -> Result<()>
    where
        E: Engine + ?Sized,
    {
        self.run_stage(engine, keys, Stage::Parser)
    }

    fn run_stage<E>(&mut self, engine: &mut E, keys: &[DocKey], stage: Stage) -> Result<()>
    where
        E: Engine + ?Sized,
    {
        trace_op!("run_stage");
        for key in keys {
            let doc = self.get_mut(key)?;
            engine.annotate(doc, stage)?;
            doc.stages.insert(stage);
        }
        Ok(())
    }
}
