//! Deterministic plain-text extraction from OSIS/ThML markup.
//!
//! The markup is XML-shaped, so a `quick-xml` event loop tokenizes it the same way
//! ebook container XML is tokenized elsewhere in this crate: walk `Start`/`Empty`/
//! `Text`/`GeneralRef`/`End` events, collect text content, and insert a single space at
//! block-level element boundaries so words from adjacent elements don't run together.

use quick_xml::Reader;
use quick_xml::events::Event;

/// Tags whose boundaries should introduce whitespace in the extracted plain text, so
/// that e.g. adjacent `<p>` or verse-divider elements don't concatenate words.
fn is_block_boundary(local_name: &[u8]) -> bool {
    matches!(
        local_name,
        b"p" | b"div" | b"lg" | b"l" | b"q" | b"title" | b"head" | b"milestone" | b"verse"
            | b"chapter" | b"note" | b"list" | b"item" | b"row" | b"cell"
    )
}

fn local_name(qname: &[u8]) -> &[u8] {
    match qname.iter().position(|&b| b == b':') {
        Some(idx) => &qname[idx + 1..],
        None => qname,
    }
}

/// Strips OSIS/ThML markup, returning plain text with collapsed whitespace. Input that
/// isn't well-formed XML (a bare run of text with no tags, or malformed fragments) falls
/// back to the raw text rather than erroring, since this function is a best-effort
/// convenience extraction and raw markup is always preserved separately.
pub fn strip_markup(markup: &str) -> String {
    let wrapped = format!("<root>{markup}</root>");
    let mut reader = Reader::from_str(&wrapped);
    reader.config_mut().trim_text(false);

    let mut text = String::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::End(e)) => {
                if is_block_boundary(local_name(e.name().as_ref())) {
                    text.push(' ');
                }
            }
            Ok(Event::Text(e)) => {
                text.push_str(&e.unescape().unwrap_or_else(|_| String::from_utf8_lossy(&e).into()));
            }
            Ok(Event::GeneralRef(e)) => {
                let entity = String::from_utf8_lossy(e.as_ref());
                text.push_str(match entity.as_ref() {
                    "apos" => "'",
                    "quot" => "\"",
                    "lt" => "<",
                    "gt" => ">",
                    "amp" => "&",
                    _ => "",
                });
            }
            Ok(Event::Eof) => break,
            Err(_) => return collapse_whitespace(markup),
            _ => {}
        }
    }

    collapse_whitespace(&text)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
