//! # swordcodec
//!
//! A codec for the SWORD family of religious-text binary module formats.
//!
//! ## Features
//!
//! - Read and write `zText`/`zCom` (compressed Bible/commentary), `zLD` (compressed
//!   lexicon), and `RawGenBook` (tree-structured general book) modules
//! - Convert between testament versification references (`Gen.1.1`, `Genesis 1:1`) and
//!   the absolute verse ordinals used on disk
//! - Represent module content in a language-independent Intermediate Representation
//!   (IR) with lossless raw-markup preservation, plain-text extraction, and a JSON
//!   interchange form
//!
//! ## Quick Start
//!
//! ```
//! use swordcodec::corpus;
//! use swordcodec::ir::{Corpus, Document, ContentBlock, ModuleCategory};
//!
//! let mut corpus = Corpus::new("KJV", "KJV");
//! corpus.module_type = ModuleCategory::Bible;
//! let mut doc = Document::new("Gen", 0);
//! doc.blocks.push(ContentBlock::from_markup("Gen.1.1", "In the beginning..."));
//! corpus.documents.push(doc);
//!
//! let (config, files) = corpus::emit(&corpus)?;
//! let (roundtripped, stats) = corpus::extract(&config, &files)?;
//! assert_eq!(stats.document_count, 1);
//! # Ok::<(), swordcodec::Error>(())
//! ```

pub mod codec;
pub mod config;
pub mod corpus;
pub mod error;
pub mod ir;
pub mod reference;
pub mod versification;

pub use error::{Error, Result};
pub use ir::Corpus;
pub use reference::Reference;
pub use versification::VersificationTable;
