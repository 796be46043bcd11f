//! Versification tables: book order, per-chapter verse counts, and the conversion
//! between `(Book, Chapter, Verse)` references and the absolute verse ordinal used by
//! the compressed-text and lexicon codecs.
//!
//! Each testament keeps its own independent index space. Walking a testament's books in
//! order, every book consumes one "book intro" slot before its chapters, and every
//! chapter consumes one "chapter heading" slot before its verses; the testament itself
//! opens with one header slot at ordinal 0. This mirrors the interleaved header-slot
//! convention native SWORD tooling expects in `.bzv`/`.bzs` verse indices.

mod kjv;

use crate::error::{Error, Result};

/// Which half of the canon a book belongs to. Each testament has its own index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Testament {
    Old,
    New,
}

/// Static description of one book: its OSIS abbreviation, display name, testament, and
/// the verse count of every chapter.
#[derive(Debug, Clone, Copy)]
pub struct BookInfo {
    pub osis: &'static str,
    pub name: &'static str,
    pub testament: Testament,
    pub chapters: &'static [u32],
}

/// A fully resolved `(Book, Chapter, Verse)` address within a versification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address {
    pub book: usize,
    pub chapter: u32,
    pub verse: u32,
}

/// A named versification: book order plus per-chapter verse counts for both testaments.
pub struct VersificationTable {
    pub name: &'static str,
    ot_books: &'static [BookInfo],
    nt_books: &'static [BookInfo],
}

impl VersificationTable {
    fn books_for(&self, testament: Testament) -> &'static [BookInfo] {
        match testament {
            Testament::Old => self.ot_books,
            Testament::New => self.nt_books,
        }
    }

    /// All books of the canon, OT followed by NT, in canonical order.
    pub fn books(&self) -> impl Iterator<Item = &'static BookInfo> {
        self.ot_books.iter().chain(self.nt_books.iter())
    }

    /// Finds a book by OSIS abbreviation or display name (case-insensitive), returning
    /// its testament and its 0-based index within that testament.
    pub fn get_book_index(&self, name: &str) -> Result<(Testament, usize)> {
        for (testament, books) in [
            (Testament::Old, self.ot_books),
            (Testament::New, self.nt_books),
        ] {
            if let Some(idx) = books
                .iter()
                .position(|b| b.osis.eq_ignore_ascii_case(name) || b.name.eq_ignore_ascii_case(name))
            {
                return Ok((testament, idx));
            }
        }
        Err(Error::ReferenceInvalid(format!("unknown book name: {name}")))
    }

    /// Number of chapters in a book.
    pub fn get_chapter_count(&self, name: &str) -> Result<u32> {
        let (testament, idx) = self.get_book_index(name)?;
        Ok(self.books_for(testament)[idx].chapters.len() as u32)
    }

    /// Number of verses in a specific chapter (1-based chapter number).
    pub fn get_verse_count(&self, name: &str, chapter: u32) -> Result<u32> {
        let (testament, idx) = self.get_book_index(name)?;
        let book = &self.books_for(testament)[idx];
        let chapter_idx = chapter
            .checked_sub(1)
            .ok_or_else(|| Error::ReferenceInvalid(format!("chapter 0 invalid in {name}")))?
            as usize;
        book.chapters
            .get(chapter_idx)
            .copied()
            .ok_or_else(|| Error::ReferenceInvalid(format!("{name} has no chapter {chapter}")))
    }

    /// Total verses across every chapter of a book.
    pub fn get_total_verses(&self, name: &str) -> Result<u32> {
        let (testament, idx) = self.get_book_index(name)?;
        Ok(self.books_for(testament)[idx].chapters.iter().sum())
    }

    /// Converts a `(Book, Chapter, Verse)` reference into its absolute verse ordinal
    /// within the book's testament. Ordinal 0 is the testament header slot; each book
    /// and chapter contributes one extra slot ahead of its content, per the header-slot
    /// convention native tooling uses for verse-keyed indices.
    pub fn calculate_index(&self, name: &str, chapter: u32, verse: u32) -> Result<u32> {
        let (testament, book_idx) = self.get_book_index(name)?;
        let books = self.books_for(testament);
        let chapter_idx = chapter
            .checked_sub(1)
            .ok_or_else(|| Error::ReferenceInvalid(format!("chapter 0 invalid in {name}")))?
            as usize;

        let mut running: u32 = 1; // testament header slot
        for book in &books[..book_idx] {
            running += 1; // book intro slot
            for &verses in book.chapters {
                running += 1 + verses; // chapter heading slot + verses
            }
        }

        let book = &books[book_idx];
        if chapter_idx >= book.chapters.len() {
            return Err(Error::ReferenceInvalid(format!(
                "{name} has no chapter {chapter}"
            )));
        }
        running += 1; // book intro slot for the target book
        for &verses in &book.chapters[..chapter_idx] {
            running += 1 + verses;
        }
        running += 1; // chapter heading slot for the target chapter

        let verse_count = book.chapters[chapter_idx];
        if verse == 0 || verse > verse_count {
            return Err(Error::ReferenceInvalid(format!(
                "{name} {chapter}:{verse} out of range (chapter has {verse_count} verses)"
            )));
        }

        Ok(running + verse)
    }

    /// Inverse of [`calculate_index`](Self::calculate_index): resolves an absolute
    /// verse ordinal within a testament back to its `(Book, Chapter, Verse)` address.
    pub fn index_to_ref(&self, testament: Testament, index: u32) -> Result<Address> {
        let books = self.books_for(testament);
        if index == 0 {
            return Err(Error::ReferenceInvalid(
                "index 0 is the testament header slot, not an addressable verse".into(),
            ));
        }
        let mut running: u32 = 1;
        for (book_idx, book) in books.iter().enumerate() {
            running += 1; // book intro slot
            if index < running {
                return Err(Error::ReferenceInvalid(format!(
                    "index {index} falls in a book intro slot"
                )));
            }
            for (chapter_idx, &verses) in book.chapters.iter().enumerate() {
                running += 1; // chapter heading slot
                if index < running {
                    return Err(Error::ReferenceInvalid(format!(
                        "index {index} falls in a chapter heading slot"
                    )));
                }
                if index < running + verses {
                    return Ok(Address {
                        book: book_idx,
                        chapter: (chapter_idx + 1) as u32,
                        verse: index - running + 1,
                    });
                }
                running += verses;
            }
        }
        Err(Error::ReferenceInvalid(format!(
            "index {index} exceeds the testament's range"
        )))
    }
}

/// Looks up a versification by name. An empty name or the literal `"KJV"` resolves to
/// the built-in King James Version table. Any other name this crate does not ship data
/// for is an error; we never silently substitute KJV data for an unrecognized
/// tradition.
pub fn lookup(name: &str) -> Result<&'static VersificationTable> {
    static KJV: VersificationTable = VersificationTable {
        name: "KJV",
        ot_books: kjv::OT_BOOKS,
        nt_books: kjv::NT_BOOKS,
    };

    if name.is_empty() || name.eq_ignore_ascii_case("KJV") {
        Ok(&KJV)
    } else {
        Err(Error::UnknownVersification(name.to_string()))
    }
}
