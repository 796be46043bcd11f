//! Language-independent Intermediate Representation (IR): a `Corpus` of `Document`s
//! (one per book, lexicon, or general-book root), each holding one or more
//! `ContentBlock`s with raw markup preserved losslessly alongside a derived plain-text
//! extraction and its SHA-256 hash.

mod markup;

pub use markup::strip_markup;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub use crate::config::ModuleCategory;

/// How much of the source module's fidelity survives a [`Corpus`]. `L0` (byte-exact
/// original) is never produced by this crate's own extraction path; only `L1` (full
/// text with markup parsed) or `L2` (metadata only, e.g. an encrypted module's
/// configuration) are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossClass {
    L1,
    L2,
}

/// A full extracted module: its identity plus every document extracted from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corpus {
    pub identifier: String,
    pub version: String,
    pub module_type: ModuleCategory,
    pub language: String,
    pub title: String,
    pub versification: String,
    pub loss_class: LossClass,
    /// Configuration keys this crate doesn't give first-class fields to (`About`,
    /// `Copyright`, `DistributionLicense`, `Category`, ...), preserved verbatim for
    /// round-tripping through `emit`.
    pub attributes: BTreeMap<String, String>,
    pub documents: Vec<Document>,
}

impl Corpus {
    pub fn new(identifier: impl Into<String>, versification: impl Into<String>) -> Self {
        Corpus {
            identifier: identifier.into(),
            version: String::new(),
            module_type: ModuleCategory::Unknown,
            language: String::new(),
            title: String::new(),
            versification: versification.into(),
            loss_class: LossClass::L1,
            attributes: BTreeMap::new(),
            documents: Vec::new(),
        }
    }

    /// Serializes the corpus to its JSON interchange form.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a corpus from its JSON interchange form.
    pub fn from_json(text: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// One book, lexicon, or general-book root: an identifier, an optional display title,
/// the order it occupies in its module, and the content blocks beneath it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// OSIS book code for Bible/commentary documents, the module identifier for a
    /// lexicon's single document, or a general book's root-node path segment.
    pub identifier: String,
    pub title: Option<String>,
    pub order_index: usize,
    pub blocks: Vec<ContentBlock>,
}

impl Document {
    pub fn new(identifier: impl Into<String>, order_index: usize) -> Self {
        Document {
            identifier: identifier.into(),
            title: None,
            order_index,
            blocks: Vec::new(),
        }
    }

    /// Total plain-text byte length across every block, used for extraction stats.
    pub fn plain_text_len(&self) -> usize {
        self.blocks.iter().map(|b| b.plain_text.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|b| b.plain_text.trim().is_empty())
    }
}

/// One addressable unit of content: a verse, a lexicon entry, or a general-book leaf.
/// Raw markup is preserved losslessly; plain text and its hash are derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    /// `Book.Chapter.Verse` for verse formats, a hierarchical `/`-joined path for
    /// general books, or the key string for lexicon entries.
    pub identifier: String,
    /// The absolute verse ordinal(s) (§4.2) this block occupies in its source
    /// testament's addressing scheme; empty for lexicon/general-book content, which
    /// has no ordinal addressing.
    pub ordinals: Vec<u32>,
    pub plain_text: String,
    pub raw_markup: String,
    /// Parsed tokens, when a caller has populated them; this crate's own extraction
    /// never does (tokenization is out of scope, §1).
    pub tokens: Option<Vec<String>>,
    /// Parsed annotations (footnotes, cross-references, ...), when a caller has
    /// populated them; same scope note as `tokens`.
    pub annotations: Option<Vec<String>>,
    pub sha256: String,
}

impl ContentBlock {
    /// Builds a block from raw OSIS/ThML markup, deriving plain text and its hash.
    pub fn from_markup(identifier: impl Into<String>, raw_markup: impl Into<String>) -> Self {
        let raw_markup = raw_markup.into();
        let plain_text = strip_markup(&raw_markup);
        let sha256 = hex_sha256(plain_text.as_bytes());
        ContentBlock {
            identifier: identifier.into(),
            ordinals: Vec::new(),
            raw_markup,
            plain_text,
            tokens: None,
            annotations: None,
            sha256,
        }
    }
}

fn hex_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Counts produced while walking a module into a [`Corpus`], used to judge extraction
/// completeness (how much of a module's content survived the pass).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub document_count: usize,
    pub verse_count: usize,
    pub skipped_empty_count: usize,
    pub plain_text_bytes: usize,
    pub raw_markup_bytes: usize,
}
