//! lexbridge — a registry-and-extraction layer over an external NLP engine.
//!
//! The linguistic work (tokenization, POS tagging, dependency parsing, NER,
//! noun-phrase detection) is delegated to an engine implementing the
//! [`Engine`] trait. This crate contributes the plumbing around it:
//!
//! - [`DocRegistry`] — a session-lifetime store mapping generated opaque
//!   [`DocKey`]s to parsed [`Doc`]s, so an expensive parse is computed once
//!   and queried many times.
//! - [`extract`] — flattening routines that walk a document's tokens,
//!   sentences, entities, and noun chunks and project them into flat
//!   sequences and small serializable records.
//! - [`tokenize`] — a tokenizer-only fast path that narrows the engine to its
//!   tokenizer stage, with token-class filtering and optional padding.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use lexbridge::{extract, DocRegistry, Engine, TagScheme};
//!
//! let mut engine = MyEngine::load("en_core_web_sm")?;
//! let mut registry = DocRegistry::new();
//!
//! let texts = vec!["Rust is fast.".to_string()];
//! let keys = registry.parse(&mut engine, &texts, true)?;
//!
//! let tags = extract::tags(&registry, &keys, TagScheme::Universal)?;
//! ```
//!
//! # What this crate does not do
//!
//! No tagging models, no parsing algorithms, no entity recognizers, and no
//! eviction: registry entries live until the registry is dropped. Engine
//! failures (missing model, bad input) surface unmodified as
//! [`BridgeError::Engine`].

/// Enter a tracing span for a bridge operation (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_op {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("bridge_op", op = $name).entered();
    };
}
pub(crate) use trace_op;

pub mod engine;
pub mod error;
pub mod extract;
pub mod registry;
pub mod tokenize;
pub mod types;

#[cfg(test)]
pub(crate) mod testkit;

pub use engine::{Engine, StageGuard};
pub use error::{BridgeError, Result};
pub use extract::attributes::{TagScheme, TokenAttr};
pub use extract::entities::EntityCategory;
pub use registry::{DocKey, DocRegistry};
pub use tokenize::TokenizeOptions;
pub use types::{ChunkSpan, Doc, EntitySpan, PosTag, SentenceSpan, Stage, StageSet, Token};
