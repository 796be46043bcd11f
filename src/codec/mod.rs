//! Binary codecs for the three SWORD module data layouts this crate understands:
//! compressed text (`zText`/`zCom`), compressed lexicons (`zLD`), and tree-structured
//! general books (`RawGenBook`).
//!
//! All multi-byte fields are little-endian, with one deliberate exception: the
//! lexicon's `.idx` key-offset field is big-endian, matching the convention native
//! SWORD tooling expects there. Every codec in this module calls that out at the read
//! and write site rather than hiding it behind a shared helper, so the asymmetry stays
//! visible in the code that actually gets it wrong if touched carelessly.

pub mod rawgenbook;
pub mod zld;
pub mod ztext;

use std::collections::{HashMap, VecDeque};
use std::io::{Read, Write};
use std::sync::{Arc, Mutex};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use crate::error::{Error, Result};

/// Sentinel used for "no link" in fixed-width index fields (tree parent/child/sibling
/// pointers, and anywhere else an absent forward reference needs a fixed-width marker).
pub const NULL_INDEX: u32 = 0xFFFF_FFFF;

/// One compressed block's location and sizes within a `.bzz`/`.zdt` data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockIndexEntry {
    pub offset: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
}

impl BlockIndexEntry {
    pub const ENCODED_LEN: usize = 12;

    pub fn read_le(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::ENCODED_LEN {
            return Err(Error::IndexCorrupt {
                file: "block index".into(),
                detail: format!("record truncated: {} bytes", bytes.len()),
            });
        }
        Ok(BlockIndexEntry {
            offset: u32::from_le_bytes(bytes[0..4].try_into().unwrap()),
            compressed_size: u32::from_le_bytes(bytes[4..8].try_into().unwrap()),
            uncompressed_size: u32::from_le_bytes(bytes[8..12].try_into().unwrap()),
        })
    }

    pub fn write_le(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.offset.to_le_bytes());
        out.extend_from_slice(&self.compressed_size.to_le_bytes());
        out.extend_from_slice(&self.uncompressed_size.to_le_bytes());
    }
}

/// Where one verse sits within a decompressed block's text buffer: the `.bzv` Verse
/// Index Entry. Unlike [`BlockIndexEntry`] this is a 10-byte record, using a `u16`,
/// not a `u32`, for `size`, so it is its own type rather than shared with the
/// lexicon's 8-byte Compressed Index Entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerseIndexEntry {
    pub block_num: u32,
    pub entry_offset: u32,
    pub entry_len: u16,
}

impl VerseIndexEntry {
    pub const ENCODED_LEN: usize = 10;

    pub const EMPTY: VerseIndexEntry = VerseIndexEntry {
        block_num: 0,
        entry_offset: 0,
        entry_len: 0,
    };

    pub fn read_le(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::ENCODED_LEN {
            return Err(Error::IndexCorrupt {
                file: ".bzv".into(),
                detail: format!("record truncated: {} bytes", bytes.len()),
            });
        }
        Ok(VerseIndexEntry {
            block_num: u32::from_le_bytes(bytes[0..4].try_into().unwrap()),
            entry_offset: u32::from_le_bytes(bytes[4..8].try_into().unwrap()),
            entry_len: u16::from_le_bytes(bytes[8..10].try_into().unwrap()),
        })
    }

    pub fn write_le(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.block_num.to_le_bytes());
        out.extend_from_slice(&self.entry_offset.to_le_bytes());
        out.extend_from_slice(&self.entry_len.to_le_bytes());
    }
}

/// A pending entry's location within a [`BlockAccumulator`], before it is narrowed to
/// whichever on-disk index record shape the caller's format uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLocation {
    pub block_num: u32,
    pub offset: u32,
    pub len: u32,
}

pub fn zlib_compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

pub fn zlib_decompress(data: &[u8], expected_len: u32) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::with_capacity(expected_len as usize);
    decoder
        .read_to_end(&mut out)
        .map_err(|e| Error::DecompressFailed {
            offset: 0,
            detail: e.to_string(),
        })?;
    Ok(out)
}

/// Accumulates entries (verses or lexicon definitions) into an in-memory buffer and
/// flushes it to a compressed block once the buffer crosses `flush_threshold` bytes.
/// This is the block-accumulation-with-threshold shape every compressed format in this
/// crate's writer side shares.
pub struct BlockAccumulator {
    flush_threshold: usize,
    buffer: Vec<u8>,
    pub blocks: Vec<BlockIndexEntry>,
    pub compressed_data: Vec<u8>,
    current_block_num: u32,
}

impl BlockAccumulator {
    pub fn new(flush_threshold: usize) -> Self {
        BlockAccumulator {
            flush_threshold,
            buffer: Vec::new(),
            blocks: Vec::new(),
            compressed_data: Vec::new(),
            current_block_num: 0,
        }
    }

    /// Appends one entry's bytes, returning the entry's location: which block it will
    /// land in (once flushed) and its byte range within that block's buffer.
    pub fn append(&mut self, data: &[u8]) -> BlockLocation {
        let offset = self.buffer.len() as u32;
        self.buffer.extend_from_slice(data);
        let entry = BlockLocation {
            block_num: self.current_block_num,
            offset,
            len: data.len() as u32,
        };
        if self.buffer.len() >= self.flush_threshold {
            self.flush();
        }
        entry
    }

    pub fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let uncompressed_size = self.buffer.len() as u32;
        let compressed = zlib_compress(&self.buffer).expect("in-memory zlib compression");
        let offset = self.compressed_data.len() as u32;
        self.blocks.push(BlockIndexEntry {
            offset,
            compressed_size: compressed.len() as u32,
            uncompressed_size,
        });
        self.compressed_data.extend_from_slice(&compressed);
        self.buffer.clear();
        self.current_block_num += 1;
    }

    /// Flushes any remaining buffered data; call once after the last `append`.
    pub fn finish(mut self) -> (Vec<BlockIndexEntry>, Vec<u8>) {
        self.flush();
        (self.blocks, self.compressed_data)
    }
}

/// Default byte budget for a [`BlockCache`] before it starts evicting. Block
/// uncompressed sizes vary widely, so eviction is governed by total bytes held, not by
/// block count (§5: "4-16 MiB is reasonable").
pub const DEFAULT_CACHE_BUDGET_BYTES: usize = 8 * 1024 * 1024;

struct BlockCacheState {
    blocks: HashMap<u32, Arc<Vec<u8>>>,
    recency: VecDeque<u32>,
    bytes: usize,
}

/// Bounded least-recently-used cache of decompressed blocks, keyed by block number.
/// Reading verses in canonical order touches each block once; a miss decompresses and
/// inserts, then evicts the least-recently-used blocks until the cache is back under
/// its byte budget.
pub struct BlockCache {
    byte_budget: usize,
    state: Mutex<BlockCacheState>,
}

impl Default for BlockCache {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockCache {
    pub fn new() -> Self {
        Self::with_budget(DEFAULT_CACHE_BUDGET_BYTES)
    }

    pub fn with_budget(byte_budget: usize) -> Self {
        BlockCache {
            byte_budget,
            state: Mutex::new(BlockCacheState {
                blocks: HashMap::new(),
                recency: VecDeque::new(),
                bytes: 0,
            }),
        }
    }

    fn touch(state: &mut BlockCacheState, block_num: u32) {
        if let Some(pos) = state.recency.iter().position(|&b| b == block_num) {
            state.recency.remove(pos);
        }
        state.recency.push_back(block_num);
    }

    /// Returns the decompressed bytes of `block_num`, decompressing and caching them on
    /// a miss. `data_file` is expected to contain `compressed[entry.offset..][..entry.compressed_size]`.
    pub fn get_or_decompress(
        &self,
        block_num: u32,
        entry: BlockIndexEntry,
        data_file: &[u8],
    ) -> Result<Arc<Vec<u8>>> {
        let mut state = self.state.lock().expect("block cache lock poisoned");
        if let Some(block) = state.blocks.get(&block_num) {
            let block = Arc::clone(block);
            Self::touch(&mut state, block_num);
            return Ok(block);
        }

        let start = entry.offset as usize;
        let end = start + entry.compressed_size as usize;
        let compressed = data_file.get(start..end).ok_or_else(|| Error::IndexCorrupt {
            file: "data file".into(),
            detail: format!("block {block_num} range {start}..{end} out of bounds"),
        })?;
        let decompressed = Arc::new(zlib_decompress(compressed, entry.uncompressed_size)?);

        state.bytes += decompressed.len();
        state.blocks.insert(block_num, Arc::clone(&decompressed));
        Self::touch(&mut state, block_num);

        while state.bytes > self.byte_budget {
            let Some(lru) = state.recency.pop_front() else {
                break;
            };
            if let Some(evicted) = state.blocks.remove(&lru) {
                state.bytes -= evicted.len();
            }
        }

        Ok(decompressed)
    }
}
