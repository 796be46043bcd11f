//! Reader/writer for the `zText`/`zCom` three-file compressed layout: a verse index
//! (`.bzv`), a block index (`.bzs`), and the compressed block data itself (`.bzz`).
//!
//! `.bzv` holds one fixed-width [`VerseIndexEntry`] per absolute verse ordinal, in
//! ordinal order, so record N is verse ordinal N: a verse with no content in this
//! module (one the translation simply lacks) has an all-zero record. `.bzs` holds one
//! [`BlockIndexEntry`] per compressed block, in block-number order. All fields are
//! little-endian.

use std::collections::BTreeMap;

use super::{BlockAccumulator, BlockCache, BlockIndexEntry, VerseIndexEntry};
use crate::error::{Error, Result};

/// Accumulates verses into zlib blocks and serializes the three on-disk files once
/// every verse has been added.
pub struct ZTextWriter {
    accumulator: BlockAccumulator,
    verse_index: BTreeMap<u32, VerseIndexEntry>,
    max_ordinal: u32,
}

impl ZTextWriter {
    /// `flush_threshold` bounds how many uncompressed bytes accumulate before a block
    /// is compressed and flushed; SWORD's own `zText` writer uses roughly this size for
    /// its default block grouping.
    pub fn new(flush_threshold: usize) -> Self {
        ZTextWriter {
            accumulator: BlockAccumulator::new(flush_threshold),
            verse_index: BTreeMap::new(),
            max_ordinal: 0,
        }
    }

    /// Adds one verse's text at its absolute verse ordinal. Ordinals must be added in
    /// non-decreasing order, matching a versification walk.
    pub fn add_verse(&mut self, ordinal: u32, text: &[u8]) {
        let entry = if text.is_empty() {
            VerseIndexEntry::EMPTY
        } else {
            let loc = self.accumulator.append(text);
            VerseIndexEntry {
                block_num: loc.block_num,
                entry_offset: loc.offset,
                entry_len: u16::try_from(loc.len)
                    .expect("verse text exceeds 64KiB, unrepresentable in a 10-byte verse index entry"),
            }
        };
        self.verse_index.insert(ordinal, entry);
        self.max_ordinal = self.max_ordinal.max(ordinal);
    }

    /// Serializes `(bzv, bzs, bzz)` file contents.
    pub fn finish(self) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
        let max_ordinal = self.max_ordinal;
        let verse_index = self.verse_index;
        let (blocks, compressed_data) = self.accumulator.finish();

        let mut bzv = Vec::with_capacity((max_ordinal as usize + 1) * VerseIndexEntry::ENCODED_LEN);
        for ordinal in 0..=max_ordinal {
            let entry = verse_index.get(&ordinal).copied().unwrap_or(VerseIndexEntry::EMPTY);
            entry.write_le(&mut bzv);
        }

        let mut bzs = Vec::with_capacity(blocks.len() * BlockIndexEntry::ENCODED_LEN);
        for block in &blocks {
            block.write_le(&mut bzs);
        }

        (bzv, bzs, compressed_data)
    }
}

/// Opens the three on-disk files for random-access verse reads.
pub struct ZTextReader<'a> {
    bzv: &'a [u8],
    block_index: Vec<BlockIndexEntry>,
    bzz: &'a [u8],
    cache: BlockCache,
}

impl<'a> ZTextReader<'a> {
    pub fn open(bzv: &'a [u8], bzs: &'a [u8], bzz: &'a [u8]) -> Result<Self> {
        if bzv.len() % VerseIndexEntry::ENCODED_LEN != 0 {
            return Err(Error::IndexCorrupt {
                file: ".bzv".into(),
                detail: format!("length {} not a multiple of {}", bzv.len(), VerseIndexEntry::ENCODED_LEN),
            });
        }
        if bzs.len() % BlockIndexEntry::ENCODED_LEN != 0 {
            return Err(Error::IndexCorrupt {
                file: ".bzs".into(),
                detail: format!("length {} not a multiple of {}", bzs.len(), BlockIndexEntry::ENCODED_LEN),
            });
        }

        let mut block_index = Vec::with_capacity(bzs.len() / BlockIndexEntry::ENCODED_LEN);
        for chunk in bzs.chunks_exact(BlockIndexEntry::ENCODED_LEN) {
            block_index.push(BlockIndexEntry::read_le(chunk)?);
        }

        log::debug!(
            "opened zText testament: {} verse slots, {} blocks",
            bzv.len() / VerseIndexEntry::ENCODED_LEN,
            block_index.len()
        );

        Ok(ZTextReader {
            bzv,
            block_index,
            bzz,
            cache: BlockCache::new(),
        })
    }

    pub fn verse_count(&self) -> usize {
        self.bzv.len() / VerseIndexEntry::ENCODED_LEN
    }

    fn verse_entry(&self, ordinal: u32) -> Result<VerseIndexEntry> {
        let start = ordinal as usize * VerseIndexEntry::ENCODED_LEN;
        let chunk = self
            .bzv
            .get(start..start + VerseIndexEntry::ENCODED_LEN)
            .ok_or_else(|| Error::IndexCorrupt {
                file: ".bzv".into(),
                detail: format!("ordinal {ordinal} out of range"),
            })?;
        VerseIndexEntry::read_le(chunk)
    }

    /// Reads a verse's raw markup bytes. Returns an empty vector for a verse this
    /// module has no content for (an all-zero index record).
    pub fn read_verse(&self, ordinal: u32) -> Result<Vec<u8>> {
        let entry = self.verse_entry(ordinal)?;
        if entry.entry_len == 0 {
            return Ok(Vec::new());
        }
        let block = self
            .block_index
            .get(entry.block_num as usize)
            .copied()
            .ok_or_else(|| Error::IndexCorrupt {
                file: ".bzs".into(),
                detail: format!("block {} referenced by verse {ordinal} does not exist", entry.block_num),
            })?;
        let decompressed = self.cache.get_or_decompress(entry.block_num, block, self.bzz)?;
        let start = entry.entry_offset as usize;
        let end = start + entry.entry_len as usize;
        decompressed
            .get(start..end)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| Error::IndexCorrupt {
                file: ".bzz".into(),
                detail: format!("verse {ordinal} range {start}..{end} out of decompressed block bounds"),
            })
    }
}
