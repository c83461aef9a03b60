//! Core annotation types.
//!
//! Everything here is produced by the external engine and traversed read-only
//! by the extraction routines. Spans are half-open token ranges; character
//! positions are byte offsets into [`Doc::text`], so span text is a plain
//! slice of the original input.

use serde::{Deserialize, Serialize};

// ============================================================================
// PosTag — coarse universal tagset
// ============================================================================

/// Coarse part-of-speech category (the universal tagset).
///
/// The fine-grained, treebank-specific tag lives on [`Token::tag`] as an
/// opaque string; this enum is the closed coarse scheme the engine maps
/// every token into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosTag {
    Adjective,
    Adposition,
    Adverb,
    Auxiliary,
    CoordinatingConjunction,
    Determiner,
    Interjection,
    Noun,
    Numeral,
    Particle,
    Pronoun,
    ProperNoun,
    Punctuation,
    SubordinatingConjunction,
    Symbol,
    Verb,
    /// Whitespace-only token.
    Space,
    /// Anything the engine could not classify (the `X` category).
    Other,
}

impl PosTag {
    /// The standard universal-tagset code for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adjective => "ADJ",
            Self::Adposition => "ADP",
            Self::Adverb => "ADV",
            Self::Auxiliary => "AUX",
            Self::CoordinatingConjunction => "CCONJ",
            Self::Determiner => "DET",
            Self::Interjection => "INTJ",
            Self::Noun => "NOUN",
            Self::Numeral => "NUM",
            Self::Particle => "PART",
            Self::Pronoun => "PRON",
            Self::ProperNoun => "PROPN",
            Self::Punctuation => "PUNCT",
            Self::SubordinatingConjunction => "SCONJ",
            Self::Symbol => "SYM",
            Self::Verb => "VERB",
            Self::Space => "SPACE",
            Self::Other => "X",
        }
    }

    /// Is this a noun category (common or proper)?
    pub fn is_noun(&self) -> bool {
        matches!(self, Self::Noun | Self::ProperNoun)
    }

    pub fn is_punct(&self) -> bool {
        matches!(self, Self::Punctuation)
    }

    pub fn is_space(&self) -> bool {
        matches!(self, Self::Space)
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol)
    }
}

// ============================================================================
// Stage / StageSet — annotation pipeline stages
// ============================================================================

/// One incremental annotation stage of the engine's pipeline.
///
/// The tokenizer itself is not listed: it always runs and cannot be disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Part-of-speech tagging (coarse and detailed tags, lemmas).
    Tagger,
    /// Dependency parsing (head indices, noun chunks).
    Parser,
    /// Named-entity recognition (entity spans and per-token labels).
    Ner,
}

impl Stage {
    fn bit(self) -> u8 {
        match self {
            Self::Tagger => 0b001,
            Self::Parser => 0b010,
            Self::Ner => 0b100,
        }
    }
}

/// A small set of [`Stage`]s, used both for "which stages has this document
/// been through" and "which stages are currently enabled on the engine".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSet {
    bits: u8,
}

impl StageSet {
    /// The empty set: tokenizer only.
    pub const EMPTY: StageSet = StageSet { bits: 0 };

    /// All three annotation stages.
    pub fn all() -> Self {
        StageSet { bits: 0b111 }
    }

    pub fn contains(&self, stage: Stage) -> bool {
        self.bits & stage.bit() != 0
    }

    pub fn insert(&mut self, stage: Stage) {
        self.bits |= stage.bit();
    }

    pub fn remove(&mut self, stage: Stage) {
        self.bits &= !stage.bit();
    }

    /// Builder-style insert.
    pub fn with(mut self, stage: Stage) -> Self {
        self.insert(stage);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

// ============================================================================
// Token
// ============================================================================

/// One engine-annotated token.
///
/// `start`/`end` are byte offsets into the owning [`Doc::text`];
/// `whitespace` is the separator text that followed the token in the input
/// (empty when the next token was adjacent). The `like_*` / `is_currency`
/// flags are lexical attributes the engine sets at tokenization time; the
/// tokenize-only filter path consumes them without requiring the tagger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    /// Trailing whitespace, as it appeared in the input.
    pub whitespace: String,
    pub lemma: String,
    /// Coarse universal tag.
    pub pos: PosTag,
    /// Detailed treebank tag (engine-specific, e.g. Penn `NN`, `VBZ`).
    pub tag: String,
    /// Entity label when this token is inside an entity span.
    pub ent_type: Option<String>,
    /// Token index of the dependency head (self-index for roots).
    pub head: usize,
    /// Byte offset of the first byte in the document text.
    pub start: usize,
    /// Byte offset one past the last byte in the document text.
    pub end: usize,
    pub sentence_idx: usize,
    pub token_idx: usize,
    pub like_num: bool,
    pub like_url: bool,
    pub like_email: bool,
    pub is_currency: bool,
}

impl Token {
    /// Create a token with the given core attributes; the detailed tag,
    /// entity label, head, and lexical flags start at their defaults and are
    /// filled by the engine's later stages.
    pub fn new(
        text: &str,
        lemma: &str,
        pos: PosTag,
        start: usize,
        end: usize,
        sentence_idx: usize,
        token_idx: usize,
    ) -> Self {
        Token {
            text: text.to_string(),
            whitespace: String::new(),
            lemma: lemma.to_string(),
            pos,
            tag: String::new(),
            ent_type: None,
            head: token_idx,
            start,
            end,
            sentence_idx,
            token_idx,
            like_num: false,
            like_url: false,
            like_email: false,
            is_currency: false,
        }
    }

    /// Set the detailed treebank tag.
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = tag.to_string();
        self
    }

    /// Set the trailing whitespace.
    pub fn with_whitespace(mut self, ws: &str) -> Self {
        self.whitespace = ws.to_string();
        self
    }

    /// Set the entity label.
    pub fn with_ent_type(mut self, label: &str) -> Self {
        self.ent_type = Some(label.to_string());
        self
    }

    /// Set the dependency head index.
    pub fn with_head(mut self, head: usize) -> Self {
        self.head = head;
        self
    }
}

// ============================================================================
// Spans
// ============================================================================

/// A sentence: a half-open token range plus byte offsets into the document
/// text. `end_char` extends to the start of the next sentence (or the end of
/// the text), so trailing separators belong to the sentence they follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceSpan {
    pub start_token: usize,
    pub end_token: usize,
    pub start_char: usize,
    pub end_char: usize,
}

/// A named-entity span over a half-open token range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub label: String,
    pub start_token: usize,
    pub end_token: usize,
}

/// A noun-chunk span over a half-open token range, with the index of its
/// syntactic root token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSpan {
    pub start_token: usize,
    pub end_token: usize,
    pub root_token: usize,
}

// ============================================================================
// Doc
// ============================================================================

/// An engine-parsed document.
///
/// Owned by the registry after parsing; this crate only ever walks it
/// read-only (mutation happens exclusively through
/// [`Engine::annotate`](crate::Engine::annotate), which fills in the stage a
/// `run_*` call requested).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Doc {
    /// The original input text, UTF-8.
    pub text: String,
    pub tokens: Vec<Token>,
    pub sentences: Vec<SentenceSpan>,
    pub entities: Vec<EntitySpan>,
    pub noun_chunks: Vec<ChunkSpan>,
    /// Annotation stages this document has been through.
    pub stages: StageSet,
}

impl Doc {
    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens of one sentence.
    pub fn sentence_tokens(&self, sent: &SentenceSpan) -> &[Token] {
        &self.tokens[sent.start_token..sent.end_token]
    }

    /// Surface text of a half-open token range, sliced from the input.
    ///
    /// Empty ranges yield an empty string.
    pub fn span_text(&self, start_token: usize, end_token: usize) -> &str {
        if start_token >= end_token {
            return "";
        }
        let start = self.tokens[start_token].start;
        let end = self.tokens[end_token - 1].end;
        &self.text[start..end]
    }

    /// Sentence text including trailing separators (see [`SentenceSpan`]).
    pub fn sentence_text(&self, sent: &SentenceSpan) -> &str {
        &self.text[sent.start_char..sent.end_char]
    }
}
