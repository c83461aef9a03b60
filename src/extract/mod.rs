//! Flattening and extraction over registered documents.
//!
//! Every function here is a linear walk over documents resolved from a
//! [`DocRegistry`](crate::DocRegistry): no state is kept, results are built
//! per call and handed to the caller. Outputs are flat sequences
//! (`Vec<String>`, `Vec<usize>`), per-key tables (`FxHashMap<String,
//! Vec<String>>` keyed by the key's string form), or rows of small
//! serializable records — the shapes that cross a data-interchange boundary
//! cleanly.

pub mod attributes;
pub mod entities;
pub mod nounphrases;
pub mod sentences;

pub use self::attributes::{attributes, attributes_by_sent, dep_head_ids, tags, tokens};
pub use self::entities::{entity_list, entity_listings, entity_table, EntityListing, EntityRecord};
pub use self::nounphrases::{nounphrase_list, nounphrase_table, NounPhraseRecord};
pub use self::sentences::sentence_texts;
