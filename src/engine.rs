//! The boundary with the external NLP engine.
//!
//! [`Engine`] is the seam between this crate and whatever actually does the
//! linguistic work. An implementation wraps a concrete NLP library: text goes
//! in, annotated [`Doc`]s come out, and this crate never looks behind the
//! trait. Engine failures are reported through
//! [`BridgeError::Engine`](crate::BridgeError::Engine) and pass to the caller
//! unmodified.
//!
//! # Contract
//!
//! - **`parse`**: run every currently enabled stage over one text and return
//!   a fully populated [`Doc`] whose [`Doc::stages`] records what ran.
//! - **`pipe`**: the batch path. The default implementation maps `parse` over
//!   the slice; engines with a native batch mode should override it and
//!   dispatch there — any internal parallelism is theirs to manage.
//! - **`annotate`**: apply one stage to an already-parsed document in place.
//!   Must be idempotent.
//! - **Stage toggling**: `enabled_stages` / `set_enabled_stages` control
//!   which stages `parse` runs. Engines that cannot toggle (older pipeline
//!   APIs) return `false` from `supports_stage_toggling` and always run the
//!   full pipeline; callers fall back accordingly.

use crate::error::Result;
use crate::types::{Doc, Stage, StageSet};

/// An external NLP pipeline.
pub trait Engine {
    /// Parse one text through all currently enabled stages.
    fn parse(&mut self, text: &str) -> Result<Doc>;

    /// Parse a batch of texts, preserving input order.
    ///
    /// Override this with the engine's native batch/streaming mode when it
    /// has one.
    fn pipe(&mut self, texts: &[String]) -> Result<Vec<Doc>> {
        texts.iter().map(|t| self.parse(t)).collect()
    }

    /// Apply one annotation stage to an existing document, in place.
    fn annotate(&mut self, doc: &mut Doc, stage: Stage) -> Result<()>;

    /// The stages `parse` currently runs (tokenizer excluded: it always runs).
    fn enabled_stages(&self) -> StageSet;

    /// Replace the enabled-stage set.
    fn set_enabled_stages(&mut self, stages: StageSet);

    /// Whether this engine version supports stage toggling at all.
    fn supports_stage_toggling(&self) -> bool {
        true
    }
}

/// RAII guard that narrows an engine's enabled stages and restores the
/// previous set on drop, including on the error path.
///
/// ```rust,ignore
/// let mut guard = StageGuard::narrow(&mut engine, StageSet::EMPTY);
/// let docs = guard.engine().pipe(&texts)?; // tokenizer only
/// drop(guard); // full pipeline restored
/// ```
pub struct StageGuard<'e, E: Engine + ?Sized> {
    engine: &'e mut E,
    saved: StageSet,
}

impl<'e, E: Engine + ?Sized> StageGuard<'e, E> {
    /// Save the current enabled set and narrow it to `stages`.
    pub fn narrow(engine: &'e mut E, stages: StageSet) -> Self {
        let saved = engine.enabled_stages();
        engine.set_enabled_stages(stages);
        StageGuard { engine, saved }
    }

    /// Access the engine while the guard is active.
    pub fn engine(&mut self) -> &mut E {
        self.engine
    }
}

impl<E: Engine + ?Sized> Drop for StageGuard<'_, E> {
    fn drop(&mut self) {
        self.engine.set_enabled_stages(self.saved);
    }
}
