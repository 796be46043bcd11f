//! Parses OSIS-style (`Gen.1.1`) and human-readable (`Genesis 1:1-5`) scripture
//! references, normalizing book names against a versification table.

use crate::error::{Error, Result};
use crate::versification::VersificationTable;

/// Additional book-name aliases the human form accepts beyond a table's own OSIS code
/// and display name: short forms and historic names in common use that don't appear
/// verbatim in the versification data itself.
const EXTRA_ALIASES: &[(&str, &str)] = &[
    ("Mt", "Matt"),
    ("Mk", "Mark"),
    ("Lk", "Luke"),
    ("Jn", "John"),
    ("Apocalypse", "Rev"),
    ("Apoc", "Rev"),
    ("Psalm", "Ps"),
    ("Canticles", "Song"),
    ("Qoheleth", "Eccl"),
    ("Ecclesiastes", "Eccl"),
    ("Paralipomenon", "1Chr"),
    ("1Paralipomenon", "1Chr"),
    ("2Paralipomenon", "2Chr"),
    ("1Cor", "1Cor"),
    ("1Corinthians", "1Cor"),
    ("2Corinthians", "2Cor"),
    ("1Thessalonians", "1Thess"),
    ("2Thessalonians", "2Thess"),
    ("1Timothy", "1Tim"),
    ("2Timothy", "2Tim"),
    ("Apocalypse of John", "Rev"),
];

/// A resolved reference, optionally spanning a verse range within one chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// OSIS book abbreviation, as normalized by the versification table.
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub verse_end: Option<u32>,
}

impl Reference {
    /// Parses an OSIS-form reference: `Book.Chapter.Verse`, with an optional verse
    /// range suffix on the verse segment (`Gen.1.1-5`) or a full OSIS range
    /// (`Gen.1.1-Gen.1.5`, where only the end verse is honored; cross-chapter OSIS
    /// ranges are not supported).
    pub fn parse_osis(text: &str, table: &VersificationTable) -> Result<Self> {
        let text = text.trim();
        let (head, verse_end) = match text.split_once('-') {
            Some((head, tail)) => {
                let end_verse = tail.rsplit('.').next().unwrap_or(tail);
                (head, Some(end_verse))
            }
            None => (text, None),
        };

        let mut parts = head.split('.');
        let book_raw = parts
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::ReferenceInvalid(format!("empty OSIS reference: {text}")))?;
        let chapter: u32 = parts
            .next()
            .ok_or_else(|| Error::ReferenceInvalid(format!("missing chapter in: {text}")))?
            .parse()
            .map_err(|_| Error::ReferenceInvalid(format!("invalid chapter in: {text}")))?;
        let verse: u32 = parts
            .next()
            .ok_or_else(|| Error::ReferenceInvalid(format!("missing verse in: {text}")))?
            .parse()
            .map_err(|_| Error::ReferenceInvalid(format!("invalid verse in: {text}")))?;

        let verse_end = verse_end
            .map(|v| {
                v.parse::<u32>()
                    .map_err(|_| Error::ReferenceInvalid(format!("invalid end verse in: {text}")))
            })
            .transpose()?;

        let book = normalize_osis_book_name(table, book_raw)?;

        Ok(Reference {
            book,
            chapter,
            verse,
            verse_end,
        })
    }

    /// Parses a human-form reference: `Genesis 1:1` or `Genesis 1:1-5`.
    pub fn parse_human(text: &str, table: &VersificationTable) -> Result<Self> {
        let text = text.trim();
        let sep = text
            .rfind(char::is_whitespace)
            .ok_or_else(|| Error::ReferenceInvalid(format!("no chapter:verse in: {text}")))?;
        let (book_raw, rest) = text.split_at(sep);
        let rest = rest.trim();

        let (chapter_str, verse_part) = rest
            .split_once(':')
            .ok_or_else(|| Error::ReferenceInvalid(format!("missing ':' in: {text}")))?;
        let chapter: u32 = chapter_str
            .trim()
            .parse()
            .map_err(|_| Error::ReferenceInvalid(format!("invalid chapter in: {text}")))?;

        let (verse_str, verse_end) = match verse_part.split_once('-') {
            Some((start, end)) => (start, Some(end)),
            None => (verse_part, None),
        };
        let verse: u32 = verse_str
            .trim()
            .parse()
            .map_err(|_| Error::ReferenceInvalid(format!("invalid verse in: {text}")))?;
        let verse_end = verse_end
            .map(|v| {
                v.trim()
                    .parse::<u32>()
                    .map_err(|_| Error::ReferenceInvalid(format!("invalid end verse in: {text}")))
            })
            .transpose()?;

        let book = normalize_human_book_name(table, book_raw.trim())?;

        Ok(Reference {
            book,
            chapter,
            verse,
            verse_end,
        })
    }
}

/// Resolves an OSIS-form book segment to its canonical OSIS abbreviation. OSIS form
/// matches the tradition's OSIS code exactly, case-sensitively (§4.6): no aliases, no
/// display-name fallback.
fn normalize_osis_book_name(table: &VersificationTable, name: &str) -> Result<String> {
    table
        .books()
        .find(|b| b.osis == name)
        .map(|b| b.osis.to_string())
        .ok_or_else(|| Error::ReferenceInvalid(format!("unknown OSIS book code: {name}")))
}

/// Resolves a human-form book name (OSIS abbreviation, display name, or a known
/// alias) to its canonical OSIS abbreviation, matching case-insensitively.
fn normalize_human_book_name(table: &VersificationTable, name: &str) -> Result<String> {
    if let Some(b) = table
        .books()
        .find(|b| b.osis.eq_ignore_ascii_case(name) || b.name.eq_ignore_ascii_case(name))
    {
        return Ok(b.osis.to_string());
    }
    if let Some(&(_, osis)) = EXTRA_ALIASES.iter().find(|(alias, _)| alias.eq_ignore_ascii_case(name)) {
        if table.books().any(|b| b.osis == osis) {
            return Ok(osis.to_string());
        }
    }
    Err(Error::ReferenceInvalid(format!("unknown book name: {name}")))
}
