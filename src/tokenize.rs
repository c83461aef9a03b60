//! Tokenizer-only fast path.
//!
//! Runs just the tokenizer stage — skipping tagging, parsing, and NER — for
//! callers that only want token strings. When the engine supports stage
//! toggling, downstream stages are disabled for the duration of the call and
//! restored afterward via [`StageGuard`]; engines that cannot toggle simply
//! run their full pipeline.
//!
//! One exception mirrors the symbol filter's needs: removing symbol tokens
//! requires the coarse POS tag (`SYM`), so with `remove_symbols` set the
//! pipeline stays fully enabled.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::engine::{Engine, StageGuard};
use crate::error::{BridgeError, Result};
use crate::trace_op;
use crate::types::{StageSet, Token};

/// Token-filtering options for [`tokenize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizeOptions {
    /// Drop tokens the engine classifies as punctuation.
    pub remove_punct: bool,
    /// Drop number-like tokens.
    pub remove_numbers: bool,
    /// Drop URL- and email-like tokens.
    pub remove_url: bool,
    /// Drop whitespace separators (on by default). When off, each token's
    /// trailing whitespace is emitted as its own list element.
    pub remove_separators: bool,
    /// Drop symbol and currency tokens. Requires POS, so the engine's
    /// pipeline stays fully enabled.
    pub remove_symbols: bool,
    /// Keep a removed token's position by emitting an empty string instead
    /// of dropping it.
    pub padding: bool,
    /// Never disable downstream pipeline stages, even when the engine
    /// supports it.
    pub keep_pipes: bool,
}

impl Default for TokenizeOptions {
    fn default() -> Self {
        TokenizeOptions {
            remove_punct: false,
            remove_numbers: false,
            remove_url: false,
            remove_separators: true,
            remove_symbols: false,
            padding: false,
            keep_pipes: false,
        }
    }
}

impl TokenizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_remove_punct(mut self, on: bool) -> Self {
        self.remove_punct = on;
        self
    }

    pub fn with_remove_numbers(mut self, on: bool) -> Self {
        self.remove_numbers = on;
        self
    }

    pub fn with_remove_url(mut self, on: bool) -> Self {
        self.remove_url = on;
        self
    }

    pub fn with_remove_separators(mut self, on: bool) -> Self {
        self.remove_separators = on;
        self
    }

    pub fn with_remove_symbols(mut self, on: bool) -> Self {
        self.remove_symbols = on;
        self
    }

    pub fn with_padding(mut self, on: bool) -> Self {
        self.padding = on;
        self
    }

    pub fn with_keep_pipes(mut self, on: bool) -> Self {
        self.keep_pipes = on;
        self
    }
}

/// Whether a token falls to one of the enabled removal filters.
fn should_remove(tok: &Token, opts: &TokenizeOptions) -> bool {
    (opts.remove_punct && tok.pos.is_punct())
        || (opts.remove_url && (tok.like_url || tok.like_email))
        || (opts.remove_numbers && tok.like_num)
        || (opts.remove_separators && tok.pos.is_space())
        || (opts.remove_symbols && (tok.is_currency || tok.pos.is_symbol()))
}

/// Tokenize `texts`, keyed by the caller-supplied `docnames`.
///
/// Results bypass the registry: this is a one-shot path for callers that do
/// not need the parsed documents afterwards. `texts` and `docnames` must have
/// equal length.
pub fn tokenize<E>(
    engine: &mut E,
    texts: &[String],
    docnames: &[String],
    opts: &TokenizeOptions,
) -> Result<FxHashMap<String, Vec<String>>>
where
    E: Engine + ?Sized,
{
    trace_op!("tokenize");
    if texts.len() != docnames.len() {
        return Err(BridgeError::LengthMismatch {
            texts: texts.len(),
            docnames: docnames.len(),
        });
    }

    let narrow = engine.supports_stage_toggling() && !opts.keep_pipes && !opts.remove_symbols;
    let docs = if narrow {
        let mut guard = StageGuard::narrow(engine, StageSet::EMPTY);
        guard.engine().pipe(texts)?
    } else {
        engine.pipe(texts)?
    };

    let mut out = FxHashMap::default();
    for (name, doc) in docnames.iter().zip(docs) {
        let mut toks = Vec::new();
        for tok in &doc.tokens {
            let removed = should_remove(tok, opts);
            if removed && !opts.padding {
                // A dropped token takes its trailing separator with it.
                continue;
            }
            if removed {
                // Padded: hold the position with an empty string; its
                // separator is still real input and is kept below.
                toks.push(String::new());
            } else {
                toks.push(tok.text.clone());
            }
            if !opts.remove_separators && !tok.whitespace.is_empty() {
                toks.push(tok.whitespace.clone());
            }
        }
        out.insert(name.clone(), toks);
    }
    Ok(out)
}

/// Split `texts` into sentence strings, keyed by `docnames`.
///
/// Runs the full pipeline (sentence boundaries usually need it). With
/// `remove_separators` each sentence is trimmed of trailing whitespace.
pub fn sentence_tokenize<E>(
    engine: &mut E,
    texts: &[String],
    docnames: &[String],
    remove_separators: bool,
) -> Result<FxHashMap<String, Vec<String>>>
where
    E: Engine + ?Sized,
{
    trace_op!("sentence_tokenize");
    if texts.len() != docnames.len() {
        return Err(BridgeError::LengthMismatch {
            texts: texts.len(),
            docnames: docnames.len(),
        });
    }

    let docs = engine.pipe(texts)?;
    let mut out = FxHashMap::default();
    for (name, doc) in docnames.iter().zip(docs) {
        let sents: Vec<String> = doc
            .sentences
            .iter()
            .map(|s| {
                let text = doc.sentence_text(s);
                if remove_separators {
                    text.trim_end().to_string()
                } else {
                    text.to_string()
                }
            })
            .collect();
        out.insert(name.clone(), sents);
    }
    Ok(out)
}
