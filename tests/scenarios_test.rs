//! End-to-end scenarios against the public API: build a corpus, emit it to module
//! files, reopen, and check what comes back. These are the "Concrete end-to-end
//! scenarios" a module-format codec's own test suite would carry alongside its
//! per-file unit tests; S1-S6 below follow the module driver enumerated in README/
//! design docs for zText, zCom, zLD, and RawGenBook in turn.

use swordcodec::codec::rawgenbook::{RawGenBookReader, RawGenBookWriter};
use swordcodec::codec::zld::{ZLdReader, ZLdWriter};
use swordcodec::corpus;
use swordcodec::ir::{ContentBlock, Corpus, Document, ModuleCategory};
use swordcodec::versification;

/// S1: a two-testament Bible corpus round-trips through zText with both verses intact.
#[test]
fn s1_bible_round_trip_across_both_testaments() {
    let mut corpus = Corpus::new("KJV", "KJV");
    corpus.module_type = ModuleCategory::Bible;

    let mut gen = Document::new("Gen", 0);
    gen.blocks.push(ContentBlock::from_markup(
        "Gen.1.1",
        "In the beginning God created the heaven and the earth.",
    ));
    corpus.documents.push(gen);

    let mut john = Document::new("John", 1);
    john.blocks.push(ContentBlock::from_markup(
        "John.1.1",
        "In the beginning was the Word, and the Word was with God, and the Word was God.",
    ));
    corpus.documents.push(john);

    let (config, files) = corpus::emit(&corpus).unwrap();
    let (roundtripped, stats) = corpus::extract(&config, &files).unwrap();

    assert_eq!(stats.verse_count, 2);
    let gen_text = &roundtripped
        .documents
        .iter()
        .find(|d| d.identifier == "Gen")
        .unwrap()
        .blocks[0]
        .plain_text;
    assert_eq!(
        gen_text,
        "In the beginning God created the heaven and the earth."
    );
    let john_text = &roundtripped
        .documents
        .iter()
        .find(|d| d.identifier == "John")
        .unwrap()
        .blocks[0]
        .plain_text;
    assert_eq!(
        john_text,
        "In the beginning was the Word, and the Word was with God, and the Word was God."
    );
}

/// S2: a single-entry commentary round-trips through zCom.
#[test]
fn s2_commentary_round_trip() {
    let mut corpus = Corpus::new("GenComm", "KJV");
    corpus.module_type = ModuleCategory::Commentary;

    let mut gen = Document::new("Gen", 0);
    gen.blocks.push(ContentBlock::from_markup(
        "Gen.1.1",
        "This is a commentary on Genesis 1:1.",
    ));
    corpus.documents.push(gen);

    let (config, files) = corpus::emit(&corpus).unwrap();
    assert_eq!(config.get("ModDrv"), Some("zCom"));

    let (roundtripped, _stats) = corpus::extract(&config, &files).unwrap();
    let entry = &roundtripped.documents[0].blocks[0];
    assert_eq!(entry.identifier, "Gen.1.1");
    assert_eq!(entry.plain_text, "This is a commentary on Genesis 1:1.");
}

/// S3: a lexicon with Greek and Hebrew entries round-trips through zLD with every
/// payload byte-exact, including multi-byte UTF-8.
#[test]
fn s3_lexicon_round_trip_preserves_utf8() {
    let entries: [(&str, &str); 3] = [
        ("G0001", "ἄλφα (alpha) - First letter of Greek alphabet"),
        ("G2316", "θεός (theos) - God"),
        ("H7965", "שָׁלוֹם (shalom) - peace"),
    ];

    let mut writer = ZLdWriter::new(4096);
    for (key, text) in &entries {
        writer.add_entry(*key, text.as_bytes());
    }
    let (idx, zdx, zdt) = writer.finish();

    let reader = ZLdReader::open(&idx, &zdx, &zdt).unwrap();
    assert_eq!(reader.keys().count(), entries.len());
    for (key, text) in &entries {
        let payload = reader.lookup(key).unwrap();
        assert_eq!(String::from_utf8(payload).unwrap(), *text);
    }
}

/// S4: a general book with two root trees (WCF, WSC) round-trips through RawGenBook,
/// with every content slice intact and paths reconstructible from any leaf.
#[test]
fn s4_general_book_round_trip() {
    let mut writer = RawGenBookWriter::new();
    writer.add_path("/WCF", b"");
    writer.add_path("/WCF/Chapter 1", b"");
    writer.add_path("/WCF/Chapter 1/Article 1", b"Of the Holy Scripture");
    writer.add_path("/WCF/Chapter 2", b"");
    writer.add_path("/WSC", b"");
    writer.add_path("/WSC/Q1", b"What is the chief end of man?");
    writer.add_path("/WSC/A1", b"Man's chief end is to glorify God.");
    let (bdt, idx, dat) = writer.finish();

    let reader = RawGenBookReader::open(&bdt, &idx, &dat).unwrap();
    assert_eq!(reader.node_count(), 7);

    let (article_id, _) = reader
        .list_keys()
        .unwrap()
        .into_iter()
        .find(|(_, path)| path == "/WCF/Chapter 1/Article 1")
        .unwrap();
    assert_eq!(reader.full_path(article_id).unwrap(), "/WCF/Chapter 1/Article 1");
    assert_eq!(reader.node_content(article_id).unwrap(), b"Of the Holy Scripture");

    for (path, content) in [
        ("/WCF/Chapter 2", &b""[..]),
        ("/WSC/Q1", b"What is the chief end of man?"),
        ("/WSC/A1", b"Man's chief end is to glorify God."),
    ] {
        let (id, _) = reader
            .list_keys()
            .unwrap()
            .into_iter()
            .find(|(_, p)| p == path)
            .unwrap();
        assert_eq!(reader.node_content(id).unwrap(), content);
    }
}

/// S5: opening a KJV module and reading Gen 1:1 gives back plain text with its
/// markup stripped, containing the expected words.
#[test]
fn s5_kjv_verse_strips_markup_to_plain_text() {
    let mut corpus = Corpus::new("KJV", "KJV");
    corpus.module_type = ModuleCategory::Bible;
    let mut gen = Document::new("Gen", 0);
    gen.blocks.push(ContentBlock::from_markup(
        "Gen.1.1",
        "<w lemma=\"strong:H0430\">In the beginning</w> <w lemma=\"strong:H0001\">God</w> created the heaven and the earth.",
    ));
    corpus.documents.push(gen);

    let (config, files) = corpus::emit(&corpus).unwrap();
    let (roundtripped, _stats) = corpus::extract(&config, &files).unwrap();
    let plain_text = &roundtripped.documents[0].blocks[0].plain_text;
    assert!(plain_text.contains("beginning"));
    assert!(plain_text.contains("God"));
    assert!(!plain_text.contains('<'));
}

/// S6: a hand-synthesized three-node tree with sentinel links (Root -> Child1 ->
/// Child2 siblings) parses to the expected children, matching §8 property 12's
/// 0xFFFFFFFF <-> "no link" convention.
#[test]
fn s6_sentinel_links_synthesize_expected_tree() {
    const NULL: u32 = 0xFFFFFFFF;
    let mut bdt = Vec::new();
    let mut write_node = |parent: u32, first_child: u32, next_sibling: u32, name: &str| {
        bdt.extend_from_slice(&parent.to_le_bytes());
        bdt.extend_from_slice(&first_child.to_le_bytes());
        bdt.extend_from_slice(&next_sibling.to_le_bytes());
        bdt.extend_from_slice(name.as_bytes());
        bdt.push(0);
    };
    write_node(NULL, 1, NULL, "Root");
    write_node(0, NULL, 2, "Child1");
    write_node(0, NULL, NULL, "Child2");

    let mut idx = Vec::new();
    for _ in 0..3 {
        idx.extend_from_slice(&0u32.to_le_bytes());
        idx.extend_from_slice(&0u32.to_le_bytes());
    }

    let reader = RawGenBookReader::open(&bdt, &idx, &[]).unwrap();
    let children = reader.children(0).unwrap();
    let names: Vec<&str> = children
        .iter()
        .map(|&id| reader.node(id).unwrap().name.as_str())
        .collect();
    assert_eq!(names, vec!["Child1", "Child2"]);
}

/// Rounding out the scenario list: a module written to disk via `write_module`, then
/// reloaded with `ModuleFiles::load`, carries the same verse through the filesystem
/// boundary the in-memory scenarios above never cross.
#[test]
fn bible_module_round_trips_through_disk() {
    use swordcodec::config::{Config, ModuleDriver};
    use swordcodec::corpus::ModuleFiles;

    let mut corpus = Corpus::new("KJV", "KJV");
    corpus.module_type = ModuleCategory::Bible;
    let mut gen = Document::new("Gen", 0);
    gen.blocks.push(ContentBlock::from_markup(
        "Gen.1.1",
        "In the beginning God created the heaven and the earth.",
    ));
    corpus.documents.push(gen);

    let tmp = tempfile::tempdir().unwrap();
    let config = corpus::write_module(&corpus, tmp.path()).unwrap();
    let data_path = config.data_path().unwrap().trim_start_matches("./");
    let module_dir = tmp.path().join(data_path);
    assert!(module_dir.join("ot.bzv").exists());
    assert!(!module_dir.join("nt.bzv").exists());

    let reloaded_config = Config::parse(&config.serialize()).unwrap();
    let files = ModuleFiles::load(&module_dir, ModuleDriver::ZText).unwrap();
    let (roundtripped, stats) = corpus::extract(&reloaded_config, &files).unwrap();
    assert_eq!(stats.verse_count, 1);
    assert_eq!(
        roundtripped.documents[0].blocks[0].plain_text,
        "In the beginning God created the heaven and the earth."
    );
}

/// §8 property 9: reference normalization across aliases, and rejection of malformed
/// human-form references.
#[test]
fn reference_aliases_normalize_to_osis_codes() {
    use swordcodec::reference::Reference;

    let table = versification::lookup("KJV").unwrap();
    for alias in ["Mt", "Matt", "Matthew", "matthew"] {
        let reference = Reference::parse_human(&format!("{alias} 1:1"), table).unwrap();
        assert_eq!(reference.book, "Matt");
    }
    for alias in ["Ps", "Psalm", "Psalms"] {
        let reference = Reference::parse_human(&format!("{alias} 23:1"), table).unwrap();
        assert_eq!(reference.book, "Ps");
    }
    for alias in ["Rev", "Revelation", "Apocalypse"] {
        let reference = Reference::parse_human(&format!("{alias} 1:1"), table).unwrap();
        assert_eq!(reference.book, "Rev");
    }
    for alias in ["1 John", "1john"] {
        let reference = Reference::parse_human(&format!("{alias} 1:1"), table).unwrap();
        assert_eq!(reference.book, "1John");
    }

    for malformed in ["", "NotABook 1:1", "Gen", "Gen 1", "1:1"] {
        assert!(Reference::parse_human(malformed, table).is_err());
    }
}
