//! Deterministic stub engine for unit tests.
//!
//! [`StubEngine`] implements [`Engine`] with rule-based annotations: a
//! whitespace/punctuation splitter, a tiny lexicon tagger, capitalized-run
//! and numeric entity rules, and period sentence splitting. It exists so
//! tests can exercise the registry and extraction layers against a known
//! collaborator; it is not an NLP implementation and is compiled only for
//! tests.

use crate::engine::Engine;
use crate::error::{BridgeError, Result};
use crate::types::{ChunkSpan, Doc, EntitySpan, PosTag, SentenceSpan, Stage, StageSet, Token};

const PUNCT_CHARS: [char; 6] = ['.', ',', '!', '?', ';', ':'];
const CURRENCY_CHARS: [char; 3] = ['$', '€', '£'];

/// Rule-based engine stand-in with toggleable stages.
pub(crate) struct StubEngine {
    enabled: StageSet,
    toggling: bool,
}

impl StubEngine {
    pub fn new() -> Self {
        StubEngine {
            enabled: StageSet::all(),
            toggling: true,
        }
    }

    /// An engine that predates stage toggling: it always runs everything.
    pub fn without_toggling() -> Self {
        StubEngine {
            enabled: StageSet::all(),
            toggling: false,
        }
    }

    fn build_doc(&self, text: &str) -> Doc {
        let mut doc = tokenize(text);
        let run_all = !self.toggling;
        for stage in [Stage::Tagger, Stage::Parser, Stage::Ner] {
            if run_all || self.enabled.contains(stage) {
                apply_stage(&mut doc, stage);
                doc.stages.insert(stage);
            }
        }
        doc
    }
}

impl Engine for StubEngine {
    fn parse(&mut self, text: &str) -> Result<Doc> {
        Ok(self.build_doc(text))
    }

    fn annotate(&mut self, doc: &mut Doc, stage: Stage) -> Result<()> {
        apply_stage(doc, stage);
        doc.stages.insert(stage);
        Ok(())
    }

    fn enabled_stages(&self) -> StageSet {
        self.enabled
    }

    fn set_enabled_stages(&mut self, stages: StageSet) {
        if self.toggling {
            self.enabled = stages;
        }
    }

    fn supports_stage_toggling(&self) -> bool {
        self.toggling
    }
}

/// Engine whose every call fails, for error pass-through tests.
pub(crate) struct FailingEngine;

impl Engine for FailingEngine {
    fn parse(&mut self, _text: &str) -> Result<Doc> {
        Err(BridgeError::engine("stub model unavailable"))
    }

    fn annotate(&mut self, _doc: &mut Doc, _stage: Stage) -> Result<()> {
        Err(BridgeError::engine("stub model unavailable"))
    }

    fn enabled_stages(&self) -> StageSet {
        StageSet::all()
    }

    fn set_enabled_stages(&mut self, _stages: StageSet) {}
}

// ============================================================================
// Tokenization
// ============================================================================

fn tokenize(text: &str) -> Doc {
    // Non-whitespace runs, then peel currency prefixes and trailing
    // punctuation into their own tokens.
    let mut words: Vec<(usize, usize)> = Vec::new();
    let mut word_start: Option<usize> = None;
    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(ws) = word_start.take() {
                words.push((ws, idx));
            }
        } else if word_start.is_none() {
            word_start = Some(idx);
        }
    }
    if let Some(ws) = word_start {
        words.push((ws, text.len()));
    }

    let mut tokens: Vec<Token> = Vec::new();
    for (w, &(start, end)) in words.iter().enumerate() {
        let ws_end = words.get(w + 1).map(|&(s, _)| s).unwrap_or(text.len());
        let whitespace = &text[end..ws_end];

        let mut pieces: Vec<(usize, usize)> = Vec::new();
        let mut core_start = start;
        let mut core_end = end;

        if let Some(first) = text[core_start..core_end].chars().next() {
            if CURRENCY_CHARS.contains(&first) && core_start + first.len_utf8() < core_end {
                pieces.push((core_start, core_start + first.len_utf8()));
                core_start += first.len_utf8();
            }
        }

        let mut trailing: Vec<(usize, usize)> = Vec::new();
        loop {
            let core = &text[core_start..core_end];
            let last = core.chars().next_back();
            match last {
                Some(ch) if PUNCT_CHARS.contains(&ch) && core.chars().count() > 1 => {
                    trailing.push((core_end - ch.len_utf8(), core_end));
                    core_end -= ch.len_utf8();
                }
                _ => break,
            }
        }

        pieces.push((core_start, core_end));
        trailing.reverse();
        pieces.extend(trailing);

        let n = pieces.len();
        for (p, &(ps, pe)) in pieces.iter().enumerate() {
            let piece_ws = if p + 1 == n { whitespace } else { "" };
            let idx = tokens.len();
            tokens.push(make_token(text, ps, pe, idx, piece_ws));
        }
    }

    assign_sentences(text, &mut tokens);
    let sentences = sentence_spans(text, &tokens);

    Doc {
        text: text.to_string(),
        tokens,
        sentences,
        entities: Vec::new(),
        noun_chunks: Vec::new(),
        stages: StageSet::EMPTY,
    }
}

fn make_token(text: &str, start: usize, end: usize, token_idx: usize, ws: &str) -> Token {
    let surface = &text[start..end];
    let pos = classify(surface);
    let mut tok = Token::new(surface, surface, pos, start, end, 0, token_idx).with_whitespace(ws);
    tok.like_num = surface.parse::<f64>().is_ok();
    tok.like_url = surface.starts_with("http://")
        || surface.starts_with("https://")
        || surface.starts_with("www.");
    tok.like_email = surface.contains('@') && surface.contains('.');
    tok.is_currency = surface.chars().count() == 1
        && surface.chars().next().map(|c| CURRENCY_CHARS.contains(&c)) == Some(true);
    tok
}

fn classify(surface: &str) -> PosTag {
    let mut chars = surface.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return PosTag::Other,
    };
    if surface.chars().count() == 1 && PUNCT_CHARS.contains(&first) {
        return PosTag::Punctuation;
    }
    if CURRENCY_CHARS.contains(&first) && surface.chars().count() == 1 {
        return PosTag::Symbol;
    }
    if surface.parse::<f64>().is_ok() {
        return PosTag::Numeral;
    }
    if surface.starts_with("http://") || surface.starts_with("https://") || surface.starts_with("www.")
    {
        return PosTag::Other;
    }
    if surface.contains('@') && surface.contains('.') {
        return PosTag::Other;
    }
    match surface.to_lowercase().as_str() {
        "the" | "a" | "an" | "this" | "that" => PosTag::Determiner,
        "is" | "are" | "was" | "were" | "be" | "been" | "can" | "will" => PosTag::Auxiliary,
        "and" | "or" | "but" => PosTag::CoordinatingConjunction,
        "in" | "on" | "of" | "at" | "over" | "to" | "with" | "from" => PosTag::Adposition,
        "very" | "quickly" | "soon" | "not" => PosTag::Adverb,
        "quick" | "lazy" | "big" | "small" | "fast" | "brown" | "new" | "old" => PosTag::Adjective,
        "he" | "she" | "it" | "they" | "we" | "i" | "you" => PosTag::Pronoun,
        "if" | "because" | "while" => PosTag::SubordinatingConjunction,
        "jumps" | "jumped" | "runs" | "ran" | "works" | "worked" | "visited" | "went" | "sees"
        | "saw" | "likes" | "paid" => PosTag::Verb,
        _ if first.is_uppercase() => PosTag::ProperNoun,
        _ => PosTag::Noun,
    }
}

fn assign_sentences(_text: &str, tokens: &mut [Token]) {
    let mut sent = 0usize;
    for tok in tokens.iter_mut() {
        tok.sentence_idx = sent;
        if tok.pos == PosTag::Punctuation && matches!(tok.text.as_str(), "." | "!" | "?") {
            sent += 1;
        }
    }
}

fn sentence_spans(text: &str, tokens: &[Token]) -> Vec<SentenceSpan> {
    let mut spans: Vec<SentenceSpan> = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let sent = tokens[i].sentence_idx;
        let start_token = i;
        while i < tokens.len() && tokens[i].sentence_idx == sent {
            i += 1;
        }
        let start_char = tokens[start_token].start;
        let end_char = tokens.get(i).map(|t| t.start).unwrap_or(text.len());
        spans.push(SentenceSpan {
            start_token,
            end_token: i,
            start_char,
            end_char,
        });
    }
    spans
}

// ============================================================================
// Stages
// ============================================================================

fn apply_stage(doc: &mut Doc, stage: Stage) {
    match stage {
        Stage::Tagger => fill_tagger(doc),
        Stage::Parser => fill_parser(doc),
        Stage::Ner => fill_ner(doc),
    }
}

fn fill_tagger(doc: &mut Doc) {
    for tok in &mut doc.tokens {
        tok.lemma = tok.text.to_lowercase();
        tok.tag = detailed_tag(tok.pos, &tok.text).to_string();
    }
}

fn detailed_tag(pos: PosTag, surface: &str) -> &'static str {
    match pos {
        PosTag::Adjective => "JJ",
        PosTag::Adposition => "IN",
        PosTag::Adverb => "RB",
        PosTag::Auxiliary => "MD",
        PosTag::CoordinatingConjunction => "CC",
        PosTag::Determiner => "DT",
        PosTag::Interjection => "UH",
        PosTag::Noun => "NN",
        PosTag::Numeral => "CD",
        PosTag::Particle => "RP",
        PosTag::Pronoun => "PRP",
        PosTag::ProperNoun => "NNP",
        PosTag::Punctuation => {
            if surface == "," {
                ","
            } else {
                "."
            }
        }
        PosTag::SubordinatingConjunction => "IN",
        PosTag::Symbol => "$",
        PosTag::Verb => "VBZ",
        PosTag::Space => "_SP",
        PosTag::Other => "FW",
    }
}

fn fill_parser(doc: &mut Doc) {
    doc.noun_chunks.clear();
    let sentences = doc.sentences.clone();
    for sent in &sentences {
        // Heads: every token attaches to the first verb of its sentence,
        // which is its own head.
        let root = (sent.start_token..sent.end_token)
            .find(|&i| matches!(doc.tokens[i].pos, PosTag::Verb | PosTag::Auxiliary))
            .unwrap_or(sent.start_token);
        for i in sent.start_token..sent.end_token {
            doc.tokens[i].head = root;
        }

        // Noun chunks: (ADJ)* (NOUN|PROPN)+ runs, root = last noun.
        let mut i = sent.start_token;
        while i < sent.end_token {
            let chunk_start = i;
            let mut j = i;
            while j < sent.end_token && doc.tokens[j].pos == PosTag::Adjective {
                j += 1;
            }
            let noun_start = j;
            while j < sent.end_token && doc.tokens[j].pos.is_noun() {
                j += 1;
            }
            if j > noun_start {
                doc.noun_chunks.push(ChunkSpan {
                    start_token: chunk_start,
                    end_token: j,
                    root_token: j - 1,
                });
                i = j;
            } else {
                i = if j > chunk_start { j } else { i + 1 };
            }
        }
    }
}

fn fill_ner(doc: &mut Doc) {
    doc.entities.clear();
    for tok in &mut doc.tokens {
        tok.ent_type = None;
    }

    let n = doc.tokens.len();
    let mut i = 0;
    while i < n {
        let (label, end) = if doc.tokens[i].pos == PosTag::ProperNoun {
            let mut j = i + 1;
            while j < n && doc.tokens[j].pos == PosTag::ProperNoun {
                j += 1;
            }
            ("PERSON", j)
        } else if doc.tokens[i].like_num {
            ("CARDINAL", i + 1)
        } else if doc.tokens[i].is_currency {
            ("MONEY", i + 1)
        } else {
            i += 1;
            continue;
        };

        for tok in &mut doc.tokens[i..end] {
            tok.ent_type = Some(label.to_string());
        }
        doc.entities.push(EntitySpan {
            label: label.to_string(),
            start_token: i,
            end_token: end,
        });
        i = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_tokenizes_and_splits_punct() {
        let mut engine = StubEngine::new();
        let doc = engine.parse("Anna visited Paris.").unwrap();
        let texts: Vec<&str> = doc.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Anna", "visited", "Paris", "."]);
    }

    #[test]
    fn test_stub_offsets_slice_back_to_surface() {
        let mut engine = StubEngine::new();
        let text = "The quick fox jumps.";
        let doc = engine.parse(text).unwrap();
        for tok in &doc.tokens {
            assert_eq!(&text[tok.start..tok.end], tok.text);
        }
    }

    #[test]
    fn test_stub_sentence_split() {
        let mut engine = StubEngine::new();
        let doc = engine.parse("One two. Three four!").unwrap();
        assert_eq!(doc.sentences.len(), 2);
        assert_eq!(doc.tokens[0].sentence_idx, 0);
        assert_eq!(doc.tokens[4].sentence_idx, 1);
    }

    #[test]
    fn test_stub_entities_cover_names_and_numbers() {
        let mut engine = StubEngine::new();
        let doc = engine.parse("Anna Smith paid 42 dollars.").unwrap();
        let labels: Vec<&str> = doc.entities.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["PERSON", "CARDINAL"]);
        assert_eq!(doc.entities[0].end_token - doc.entities[0].start_token, 2);
    }

    #[test]
    fn test_stub_noun_chunks() {
        let mut engine = StubEngine::new();
        let doc = engine.parse("The quick brown fox jumps.").unwrap();
        assert_eq!(doc.noun_chunks.len(), 1);
        let chunk = doc.noun_chunks[0];
        assert_eq!(doc.span_text(chunk.start_token, chunk.end_token), "quick brown fox");
        assert_eq!(doc.tokens[chunk.root_token].text, "fox");
    }

    #[test]
    fn test_stub_heads_point_at_sentence_verb() {
        let mut engine = StubEngine::new();
        let doc = engine.parse("Anna visited Paris.").unwrap();
        let verb_idx = 1;
        for tok in &doc.tokens {
            assert_eq!(tok.head, verb_idx);
        }
    }

    #[test]
    fn test_stub_currency_and_number_flags() {
        let mut engine = StubEngine::new();
        let doc = engine.parse("It costs $5 now.").unwrap();
        let dollar = doc.tokens.iter().find(|t| t.text == "$").unwrap();
        let five = doc.tokens.iter().find(|t| t.text == "5").unwrap();
        assert!(dollar.is_currency);
        assert!(five.like_num);
    }

    #[test]
    fn test_without_toggling_ignores_stage_narrowing() {
        let mut engine = StubEngine::without_toggling();
        engine.set_enabled_stages(StageSet::EMPTY);
        let doc = engine.parse("Anna visited Paris.").unwrap();
        assert!(doc.stages.contains(Stage::Ner));
        assert!(!doc.entities.is_empty());
    }
}
