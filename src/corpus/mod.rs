//! Corpus Extractor / Emitter: walks a versification to materialize IR from a module's
//! binary data, and the reverse: walking IR to accumulate a module's binary data.
//! Dispatches to the codec named by the module's `ModDrv` configuration key.

use std::collections::HashMap;
use std::path::Path;

use crate::codec::rawgenbook::{RawGenBookReader, RawGenBookWriter};
use crate::codec::zld::{ZLdReader, ZLdWriter};
use crate::codec::ztext::{ZTextReader, ZTextWriter};
use crate::codec::NULL_INDEX;
use crate::config::{Config, ModuleCategory, ModuleDriver};
use crate::error::{Error, Result};
use crate::ir::{ContentBlock, Corpus, Document, ExtractionStats};
use crate::versification::{self, Testament};

/// Default block-accumulation threshold, matching the flush point the writers in this
/// crate use unless a caller has a reason to tune it for a particular module's size.
pub const DEFAULT_FLUSH_THRESHOLD: usize = 16 * 1024;

/// One testament's `.bzv`/`.bzs`/`.bzz` triple. OT and NT each address their own
/// ordinal space starting at 0 (§4.2), so they cannot share a single reader: a module
/// with both testaments needs two independent ones.
#[derive(Debug, Default, Clone)]
pub struct ZTextTestamentFiles {
    pub bzv: Vec<u8>,
    pub bzs: Vec<u8>,
    pub bzz: Vec<u8>,
}

impl ZTextTestamentFiles {
    fn is_present(&self) -> bool {
        !self.bzv.is_empty() || !self.bzs.is_empty() || !self.bzz.is_empty()
    }
}

/// The raw bytes of a module's data files, already loaded into memory. Field names
/// follow each driver's on-disk file extensions. `zLD`'s sibling `.dat` file (a
/// `RawLD` leftover some lexicon modules carry) is loaded for completeness but never
/// read or written by this crate's zLD codec.
#[derive(Debug, Default)]
pub struct ModuleFiles {
    pub ot: ZTextTestamentFiles,
    pub nt: ZTextTestamentFiles,
    pub idx: Vec<u8>,
    pub dat: Vec<u8>,
    pub zdx: Vec<u8>,
    pub zdt: Vec<u8>,
    pub bdt: Vec<u8>,
}

impl ModuleFiles {
    /// Loads a module's data files from `dir`, using the extensions implied by
    /// `driver`. A testament is absent (§4.3) iff any of its three files is missing;
    /// this loads each present file independently rather than falling one testament
    /// back onto the other's files. `data_path` naming module files without the
    /// driver's extension (the SWORD convention of a shared basename across the
    /// sibling files) is the caller's responsibility; this reads whichever of the
    /// known extensions exist in `dir`.
    pub fn load(dir: &Path, driver: ModuleDriver) -> Result<Self> {
        let mut files = ModuleFiles::default();
        let read = |name: &str| -> Result<Vec<u8>> { Ok(std::fs::read(dir.join(name))?) };
        match driver {
            ModuleDriver::ZText | ModuleDriver::ZCom => {
                files.ot = ZTextTestamentFiles {
                    bzv: read("ot.bzv").unwrap_or_default(),
                    bzs: read("ot.bzs").unwrap_or_default(),
                    bzz: read("ot.bzz").unwrap_or_default(),
                };
                files.nt = ZTextTestamentFiles {
                    bzv: read("nt.bzv").unwrap_or_default(),
                    bzs: read("nt.bzs").unwrap_or_default(),
                    bzz: read("nt.bzz").unwrap_or_default(),
                };
            }
            ModuleDriver::ZLd => {
                files.idx = read("lex.idx")?;
                files.dat = read("lex.dat").unwrap_or_default();
                files.zdx = read("lex.zdx")?;
                files.zdt = read("lex.zdt")?;
            }
            ModuleDriver::RawGenBook => {
                files.bdt = read("book.bdt")?;
                files.idx = read("book.idx")?;
                files.dat = read("book.dat")?;
            }
        }
        Ok(files)
    }

    /// Writes whichever files a given driver owns into `dir`, creating it if absent. A
    /// testament with no content (§4.3) writes no files at all, rather than an empty
    /// triple; this is what makes a testament "absent" to a later `load`.
    pub fn write_to_disk(&self, dir: &Path, driver: ModuleDriver) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        let write = |name: &str, bytes: &[u8]| -> Result<()> { Ok(std::fs::write(dir.join(name), bytes)?) };
        match driver {
            ModuleDriver::ZText | ModuleDriver::ZCom => {
                if self.ot.is_present() {
                    write("ot.bzv", &self.ot.bzv)?;
                    write("ot.bzs", &self.ot.bzs)?;
                    write("ot.bzz", &self.ot.bzz)?;
                }
                if self.nt.is_present() {
                    write("nt.bzv", &self.nt.bzv)?;
                    write("nt.bzs", &self.nt.bzs)?;
                    write("nt.bzz", &self.nt.bzz)?;
                }
            }
            ModuleDriver::ZLd => {
                write("lex.idx", &self.idx)?;
                write("lex.zdx", &self.zdx)?;
                write("lex.zdt", &self.zdt)?;
            }
            ModuleDriver::RawGenBook => {
                write("book.bdt", &self.bdt)?;
                write("book.idx", &self.idx)?;
                write("book.dat", &self.dat)?;
            }
        }
        Ok(())
    }
}

/// Extracts a [`Corpus`] from an already-loaded module's data files, using the
/// versification named by `config`. Preserves `Description`/`Lang`/`Versification`/
/// the module identifier, and copies every unrecognized configuration key into the
/// corpus's open attribute mapping (§8 property 10).
pub fn extract(config: &Config, files: &ModuleFiles) -> Result<(Corpus, ExtractionStats)> {
    if config.is_encrypted() {
        log::warn!("refusing encrypted module: {}", config.module_name);
        return Err(Error::EncryptedRefused(config.module_name.clone()));
    }
    log::info!("extracting module {}", config.module_name);

    let table = versification::lookup(config.versification())?;
    let mut corpus = Corpus::new(config.module_name.clone(), table.name.to_string());
    corpus.module_type = config.module_category();
    corpus.language = config.get("Lang").unwrap_or_default().to_string();
    corpus.title = config.get("Description").unwrap_or_default().to_string();
    corpus.attributes = config
        .attributes()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let mut stats = ExtractionStats::default();

    match config.module_type()? {
        ModuleDriver::ZText | ModuleDriver::ZCom => {
            extract_ztext(table, files, &mut corpus, &mut stats)?
        }
        ModuleDriver::ZLd => extract_zld(files, &mut corpus, &mut stats)?,
        ModuleDriver::RawGenBook => extract_rawgenbook(files, &mut corpus, &mut stats)?,
    }

    log::debug!(
        "extracted {} documents, {} verses ({} skipped empty) from {}",
        stats.document_count,
        stats.verse_count,
        stats.skipped_empty_count,
        config.module_name
    );

    Ok((corpus, stats))
}

fn extract_ztext(
    table: &versification::VersificationTable,
    files: &ModuleFiles,
    corpus: &mut Corpus,
    stats: &mut ExtractionStats,
) -> Result<()> {
    let mut order_index = 0;
    for (testament, testament_files) in [(Testament::Old, &files.ot), (Testament::New, &files.nt)] {
        if !testament_files.is_present() {
            continue;
        }
        let reader = ZTextReader::open(&testament_files.bzv, &testament_files.bzs, &testament_files.bzz)?;

        for book in table.books().filter(|b| b.testament == testament) {
            let mut doc = Document::new(book.osis, order_index);
            doc.title = Some(book.name.to_string());

            for (chapter_idx, &verse_count) in book.chapters.iter().enumerate() {
                let chapter = (chapter_idx + 1) as u32;
                for verse in 1..=verse_count {
                    let ordinal = table.calculate_index(book.osis, chapter, verse)?;
                    if ordinal as usize >= reader.verse_count() {
                        continue;
                    }
                    let raw = reader.read_verse(ordinal)?;
                    if raw.is_empty() {
                        stats.skipped_empty_count += 1;
                        continue;
                    }
                    let markup = String::from_utf8(raw)?;
                    let identifier = format!("{}.{chapter}.{verse}", book.osis);
                    let mut block = ContentBlock::from_markup(identifier, markup);
                    block.ordinals.push(ordinal);
                    stats.plain_text_bytes += block.plain_text.len();
                    stats.raw_markup_bytes += block.raw_markup.len();
                    stats.verse_count += 1;
                    doc.blocks.push(block);
                }
            }

            if !doc.blocks.is_empty() {
                stats.document_count += 1;
                order_index += 1;
                corpus.documents.push(doc);
            }
        }
    }
    Ok(())
}

fn extract_zld(files: &ModuleFiles, corpus: &mut Corpus, stats: &mut ExtractionStats) -> Result<()> {
    let reader = ZLdReader::open(&files.idx, &files.zdx, &files.zdt)?;
    let mut doc = Document::new(corpus.identifier.clone(), 0);

    let keys: Vec<String> = reader.keys().map(str::to_string).collect();
    for key in keys {
        let raw = reader.lookup(&key)?;
        if raw.is_empty() {
            stats.skipped_empty_count += 1;
            continue;
        }
        let markup = String::from_utf8(raw)?;
        let block = ContentBlock::from_markup(key, markup);
        stats.plain_text_bytes += block.plain_text.len();
        stats.raw_markup_bytes += block.raw_markup.len();
        stats.verse_count += 1;
        doc.blocks.push(block);
    }

    if !doc.blocks.is_empty() {
        stats.document_count += 1;
        corpus.documents.push(doc);
    }
    Ok(())
}

fn extract_rawgenbook(
    files: &ModuleFiles,
    corpus: &mut Corpus,
    stats: &mut ExtractionStats,
) -> Result<()> {
    let reader = RawGenBookReader::open(&files.bdt, &files.idx, &files.dat)?;
    if reader.node_count() == 0 {
        return Ok(());
    }

    let roots: Vec<u32> = (0..reader.node_count() as u32)
        .filter(|&id| reader.node(id).map(|n| n.parent == NULL_INDEX).unwrap_or(false))
        .collect();

    for (order_index, root_id) in roots.into_iter().enumerate() {
        let root_node = reader.node(root_id)?;
        let mut doc = Document::new(root_node.name.clone(), order_index);
        doc.title = Some(root_node.name.clone());
        collect_rawgenbook_blocks(&reader, root_id, &mut doc, stats)?;
        stats.document_count += 1;
        corpus.documents.push(doc);
    }
    Ok(())
}

fn collect_rawgenbook_blocks(
    reader: &RawGenBookReader,
    id: u32,
    doc: &mut Document,
    stats: &mut ExtractionStats,
) -> Result<()> {
    let path = reader.full_path(id)?;
    let content = reader.node_content(id)?;
    if content.is_empty() {
        stats.skipped_empty_count += 1;
    } else {
        let markup = std::str::from_utf8(content)
            .map_err(|e| Error::IndexCorrupt {
                file: ".dat".into(),
                detail: format!("node content is not valid UTF-8: {e}"),
            })?
            .to_string();
        let block = ContentBlock::from_markup(path, markup);
        stats.plain_text_bytes += block.plain_text.len();
        stats.raw_markup_bytes += block.raw_markup.len();
        stats.verse_count += 1;
        doc.blocks.push(block);
    }

    for child in reader.children(id)? {
        collect_rawgenbook_blocks(reader, child, doc, stats)?;
    }
    Ok(())
}

/// Driver + output-subdirectory pair a module category routes to, per §4.7.
fn route_for(category: ModuleCategory) -> Result<(ModuleDriver, &'static str, &'static str)> {
    match category {
        ModuleCategory::Bible => Ok((ModuleDriver::ZText, "texts", "ztext")),
        ModuleCategory::Commentary => Ok((ModuleDriver::ZCom, "comments", "zcom")),
        ModuleCategory::Dictionary => Ok((ModuleDriver::ZLd, "lexdict", "zld")),
        ModuleCategory::GenBook => Ok((ModuleDriver::RawGenBook, "genbook", "rawgenbook")),
        ModuleCategory::Unknown => Err(Error::ConfigMalformed(
            "corpus has no module_type to emit as".into(),
        )),
    }
}

fn driver_name(driver: ModuleDriver) -> &'static str {
    match driver {
        ModuleDriver::ZText => "zText",
        ModuleDriver::ZCom => "zCom",
        ModuleDriver::ZLd => "zLD",
        ModuleDriver::RawGenBook => "RawGenBook",
    }
}

/// Emits a [`Corpus`] into module data files plus a freshly-built Configuration
/// Record: `ModDrv`/`Encoding`/`DataPath` are regenerated from the corpus's module
/// type and identifier, and every attribute in the corpus's open mapping is copied
/// verbatim (§4.7).
pub fn emit(corpus: &Corpus) -> Result<(Config, ModuleFiles)> {
    let table = versification::lookup(&corpus.versification)?;
    let (driver, category_dir, format_dir) = route_for(corpus.module_type)?;

    let files = match driver {
        ModuleDriver::ZText | ModuleDriver::ZCom => emit_ztext(table, corpus)?,
        ModuleDriver::ZLd => emit_zld(corpus)?,
        ModuleDriver::RawGenBook => emit_rawgenbook(corpus)?,
    };

    let lower_id = corpus.identifier.to_lowercase();
    let data_path = format!("./modules/{category_dir}/{format_dir}/{lower_id}/");

    let mut config = Config::parse(&format!("[{}]\n", corpus.identifier))?;
    config.set("ModDrv", driver_name(driver));
    config.set("Encoding", "UTF-8");
    config.set("DataPath", data_path);
    config.set("Versification", corpus.versification.clone());
    if !corpus.language.is_empty() {
        config.set("Lang", corpus.language.clone());
    }
    if !corpus.title.is_empty() {
        config.set("Description", corpus.title.clone());
    }
    for (key, value) in &corpus.attributes {
        config.set(key.clone(), value.clone());
    }

    Ok((config, files))
}

/// Emits a corpus and writes its data files to disk under `output_root`, following
/// the freshly-built Configuration Record's `DataPath`. Returns that Configuration
/// Record; writing it to a `.conf` file alongside is the caller's responsibility.
pub fn write_module(corpus: &Corpus, output_root: &Path) -> Result<Config> {
    let (config, files) = emit(corpus)?;
    let driver = config.module_type()?;
    let relative = config.data_path()?.trim_start_matches("./");
    let dir = output_root.join(relative);
    log::info!("writing module {} to {}", corpus.identifier, dir.display());
    files.write_to_disk(&dir, driver)?;
    Ok(config)
}

fn emit_ztext(table: &versification::VersificationTable, corpus: &Corpus) -> Result<ModuleFiles> {
    let by_identifier: HashMap<&str, &ContentBlock> = corpus
        .documents
        .iter()
        .flat_map(|d| d.blocks.iter())
        .map(|b| (b.identifier.as_str(), b))
        .collect();
    let has_content: std::collections::HashSet<&str> = corpus
        .documents
        .iter()
        .filter(|d| !d.is_empty())
        .map(|d| d.identifier.as_str())
        .collect();

    let mut files = ModuleFiles::default();
    for testament in [Testament::Old, Testament::New] {
        let books: Vec<_> = table.books().filter(|b| b.testament == testament).collect();
        if !books.iter().any(|b| has_content.contains(b.osis)) {
            continue;
        }

        let mut writer = ZTextWriter::new(DEFAULT_FLUSH_THRESHOLD);
        for book in &books {
            for (chapter_idx, &verse_count) in book.chapters.iter().enumerate() {
                let chapter = (chapter_idx + 1) as u32;
                for verse in 1..=verse_count {
                    let ordinal = table.calculate_index(book.osis, chapter, verse)?;
                    let identifier = format!("{}.{chapter}.{verse}", book.osis);
                    let text = by_identifier
                        .get(identifier.as_str())
                        .map(|b| b.raw_markup.as_bytes())
                        .unwrap_or(&[]);
                    writer.add_verse(ordinal, text);
                }
            }
        }
        let (bzv, bzs, bzz) = writer.finish();
        let testament_files = ZTextTestamentFiles { bzv, bzs, bzz };
        match testament {
            Testament::Old => files.ot = testament_files,
            Testament::New => files.nt = testament_files,
        }
    }
    Ok(files)
}

fn emit_zld(corpus: &Corpus) -> Result<ModuleFiles> {
    let mut writer = ZLdWriter::new(DEFAULT_FLUSH_THRESHOLD);
    for doc in &corpus.documents {
        for block in &doc.blocks {
            writer.add_entry(block.identifier.clone(), block.raw_markup.as_bytes());
        }
    }
    let (idx, zdx, zdt) = writer.finish();
    Ok(ModuleFiles {
        idx,
        zdx,
        zdt,
        ..Default::default()
    })
}

fn emit_rawgenbook(corpus: &Corpus) -> Result<ModuleFiles> {
    let mut writer = RawGenBookWriter::new();
    for doc in &corpus.documents {
        for block in &doc.blocks {
            writer.add_path(block.identifier.clone(), block.raw_markup.as_bytes());
        }
    }
    let (bdt, idx, dat) = writer.finish();
    Ok(ModuleFiles {
        bdt,
        idx,
        dat,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ModuleCategory as Category;

    fn ztext_config() -> Config {
        Config::parse("[KJV]\nDataPath=./modules/texts/ztext/kjv/\nModDrv=zText\nVersification=KJV\n")
            .unwrap()
    }

    fn bible_corpus() -> Corpus {
        let mut corpus = Corpus::new("KJV", "KJV");
        corpus.module_type = Category::Bible;
        let mut gen = Document::new("Gen", 0);
        gen.blocks.push(ContentBlock::from_markup(
            "Gen.1.1",
            "In the beginning God created the heaven and the earth.",
        ));
        corpus.documents.push(gen);
        corpus
    }

    #[test]
    fn round_trips_a_handful_of_verses_through_corpus() {
        let _ = env_logger::try_init();
        let config = ztext_config();
        let table = versification::lookup("KJV").unwrap();
        let corpus = bible_corpus();

        let files = emit_ztext(table, &corpus).unwrap();
        let (extracted, stats) = extract(&config, &files).unwrap();

        let doc = extracted.documents.iter().find(|d| d.identifier == "Gen").unwrap();
        let block = doc.blocks.iter().find(|b| b.identifier == "Gen.1.1").unwrap();
        assert_eq!(
            block.plain_text,
            "In the beginning God created the heaven and the earth."
        );
        assert!(stats.verse_count >= 1);
        assert!(stats.skipped_empty_count > 0);
    }

    #[test]
    fn both_testaments_round_trip_independently() {
        // Spec scenario S1: Gen 1:1 (OT) and John 1:1 (NT) in one corpus. OT and NT
        // each address ordinal 0 independently, so this is the case a single merged
        // reader/writer would silently cross-wire.
        let config = ztext_config();
        let table = versification::lookup("KJV").unwrap();

        let mut corpus = Corpus::new("KJV", "KJV");
        corpus.module_type = Category::Bible;
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

        let files = emit_ztext(table, &corpus).unwrap();
        assert!(files.ot.is_present());
        assert!(files.nt.is_present());

        let (extracted, _stats) = extract(&config, &files).unwrap();
        let gen_block = extracted
            .documents
            .iter()
            .find(|d| d.identifier == "Gen")
            .unwrap()
            .blocks
            .iter()
            .find(|b| b.identifier == "Gen.1.1")
            .unwrap();
        assert_eq!(
            gen_block.plain_text,
            "In the beginning God created the heaven and the earth."
        );
        let john_block = extracted
            .documents
            .iter()
            .find(|d| d.identifier == "John")
            .unwrap()
            .blocks
            .iter()
            .find(|b| b.identifier == "John.1.1")
            .unwrap();
        assert_eq!(
            john_block.plain_text,
            "In the beginning was the Word, and the Word was with God, and the Word was God."
        );
    }

    #[test]
    fn absent_testament_writes_no_files() {
        let config = ztext_config();
        let table = versification::lookup("KJV").unwrap();
        let corpus = bible_corpus(); // Gen only, no NT content.

        let files = emit_ztext(table, &corpus).unwrap();
        assert!(files.ot.is_present());
        assert!(!files.nt.is_present());

        let tmp = tempfile::tempdir().unwrap();
        files.write_to_disk(tmp.path(), ModuleDriver::ZText).unwrap();
        assert!(tmp.path().join("ot.bzv").exists());
        assert!(!tmp.path().join("nt.bzv").exists());

        let (extracted, _stats) = extract(&config, &files).unwrap();
        assert!(extracted.documents.iter().all(|d| d.identifier != "Matt"));
    }

    #[test]
    fn encrypted_modules_are_refused() {
        let config = Config::parse(
            "[KJV]\nDataPath=./x/\nModDrv=zText\nVersification=KJV\nCipherKey=deadbeef\n",
        )
        .unwrap();
        let files = ModuleFiles::default();
        assert!(matches!(extract(&config, &files), Err(Error::EncryptedRefused(_))));
    }

    #[test]
    fn rawgenbook_round_trips_through_corpus() {
        let mut corpus = Corpus::new("Treasury", "KJV");
        corpus.module_type = Category::GenBook;
        let mut doc = Document::new("Treasury", 0);
        doc.blocks
            .push(ContentBlock::from_markup("/Treasury", "Root matter"));
        doc.blocks.push(ContentBlock::from_markup(
            "/Treasury/Chapter A",
            "Chapter A body text",
        ));
        corpus.documents.push(doc);

        let files = emit_rawgenbook(&corpus).unwrap();
        let config = Config::parse("[Treasury]\nDataPath=./x/\nModDrv=RawGenBook\n").unwrap();
        let (extracted, stats) = extract(&config, &files).unwrap();
        assert_eq!(stats.document_count, 1);
        let chapter = extracted.documents[0]
            .blocks
            .iter()
            .find(|b| b.identifier == "/Treasury/Chapter A")
            .unwrap();
        assert_eq!(chapter.plain_text, "Chapter A body text");
    }

    #[test]
    fn zld_round_trips_through_corpus() {
        let mut corpus = Corpus::new("StrongsGreek", "KJV");
        corpus.module_type = Category::Dictionary;
        let mut doc = Document::new("StrongsGreek", 0);
        doc.blocks
            .push(ContentBlock::from_markup("G2316", "θεός (theos) - God"));
        corpus.documents.push(doc);

        let files = emit_zld(&corpus).unwrap();
        let config = Config::parse("[StrongsGreek]\nDataPath=./x/\nModDrv=zLD\n").unwrap();
        let (extracted, _stats) = extract(&config, &files).unwrap();
        let block = extracted.documents[0]
            .blocks
            .iter()
            .find(|b| b.identifier == "G2316")
            .unwrap();
        assert_eq!(block.plain_text, "θεός (theos) - God");
    }

    #[test]
    fn emit_regenerates_fresh_configuration_record() {
        let corpus = bible_corpus();
        let (config, _files) = emit(&corpus).unwrap();
        assert_eq!(config.module_name, "KJV");
        assert_eq!(config.get("ModDrv"), Some("zText"));
        assert_eq!(config.get("Encoding"), Some("UTF-8"));
        assert_eq!(config.get("DataPath"), Some("./modules/texts/ztext/kjv/"));
        assert_eq!(config.versification(), "KJV");
    }

    #[test]
    fn emit_preserves_unknown_attributes_round_trip() {
        let config = Config::parse(
            "[KJV]\nDataPath=./x/\nModDrv=zText\nVersification=KJV\nAbout=Public domain\n",
        )
        .unwrap();
        let (mut corpus, _stats) = extract(&config, &ModuleFiles::default()).unwrap();
        corpus.module_type = Category::Bible;
        let (reemitted, _files) = emit(&corpus).unwrap();
        assert_eq!(reemitted.attributes().find(|(k, _)| *k == "About"), Some(("About", "Public domain")));
    }

    #[test]
    fn write_module_writes_files_under_routed_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let corpus = bible_corpus();
        let config = write_module(&corpus, tmp.path()).unwrap();
        let dir = tmp.path().join("modules/texts/ztext/kjv");
        assert!(dir.join("ot.bzv").exists());
        assert!(dir.join("ot.bzs").exists());
        assert!(dir.join("ot.bzz").exists());
        assert_eq!(config.data_path().unwrap(), "./modules/texts/ztext/kjv/");
    }
}
