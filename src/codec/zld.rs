//! Reader/writer for the `zLD` four-file key-indexed compressed lexicon layout:
//! `.idx` (keys plus a big-endian offset field), `.zdx` (per-key block locator,
//! positionally aligned with `.idx`), and `.zdt` (length-prefixed zlib blocks). The
//! sibling `.dat` file some lexicon modules carry is a `RawLD` leftover; this codec
//! never reads or writes it.
//!
//! `.idx` holds, for each entry in the module's native key order, a 4-byte
//! **big-endian** offset field followed by the NUL-terminated key, the one field in
//! this whole codec family that is not little-endian. Get this backwards and every
//! lookup after the first key silently returns the wrong entry instead of failing
//! loudly, so it is called out here and nowhere else is byte order handled implicitly.
//!
//! `.zdt` has no companion block-index file the way `.bzz` has `.bzs`: blocks are
//! simply concatenated, each self-delimited by a 4-byte little-endian compressed-size
//! header, and located by sequential position (block 0 first, block 1 next, ...).

use std::collections::HashMap;

use super::{zlib_compress, zlib_decompress};
use crate::error::{Error, Result};

/// Accumulates NUL-terminated entry bodies into zlib blocks using the `zLD`
/// length-prefixed block shape, distinct from [`super::BlockAccumulator`] because
/// `zLD` has no separate block-index file: block boundaries live entirely in `.zdt`.
struct ZldBlockAccumulator {
    flush_threshold: usize,
    buffer: Vec<u8>,
    zdt: Vec<u8>,
    current_block_num: u32,
}

impl ZldBlockAccumulator {
    fn new(flush_threshold: usize) -> Self {
        ZldBlockAccumulator {
            flush_threshold,
            buffer: Vec::new(),
            zdt: Vec::new(),
            current_block_num: 0,
        }
    }

    /// Appends one entry's payload plus its NUL terminator, returning `(block_num,
    /// offset_in_block)`.
    fn append(&mut self, payload: &[u8]) -> (u32, u32) {
        let offset = self.buffer.len() as u32;
        self.buffer.extend_from_slice(payload);
        self.buffer.push(0);
        let location = (self.current_block_num, offset);
        if self.buffer.len() >= self.flush_threshold {
            self.flush();
        }
        location
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let compressed = zlib_compress(&self.buffer).expect("in-memory zlib compression");
        self.zdt
            .extend_from_slice(&(compressed.len() as u32).to_le_bytes());
        self.zdt.extend_from_slice(&compressed);
        self.buffer.clear();
        self.current_block_num += 1;
    }

    fn finish(mut self) -> Vec<u8> {
        self.flush();
        self.zdt
    }
}

pub struct ZLdWriter {
    flush_threshold: usize,
    entries: Vec<(String, Vec<u8>)>,
}

impl ZLdWriter {
    pub fn new(flush_threshold: usize) -> Self {
        ZLdWriter {
            flush_threshold,
            entries: Vec::new(),
        }
    }

    /// Adds one entry. Entries are written to `.zdt`/`.idx`/`.zdx` in the order
    /// they're added; the module's "native key order" (§4.4) is the caller's
    /// responsibility; this writer does not sort.
    pub fn add_entry(&mut self, key: impl Into<String>, text: &[u8]) {
        self.entries.push((key.into(), text.to_vec()));
    }

    /// Serializes `(idx, zdx, zdt)` file contents, in the insertion order entries were
    /// added.
    pub fn finish(self) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
        let mut accumulator = ZldBlockAccumulator::new(self.flush_threshold);
        let mut idx = Vec::new();
        let mut zdx = Vec::with_capacity(self.entries.len() * 8);

        for (ordinal, (key, text)) in self.entries.iter().enumerate() {
            let (block_num, offset) = accumulator.append(text);
            zdx.extend_from_slice(&block_num.to_le_bytes());
            zdx.extend_from_slice(&offset.to_le_bytes());

            // The one big-endian field in this codec family.
            idx.extend_from_slice(&(ordinal as u32).to_be_bytes());
            idx.extend_from_slice(key.as_bytes());
            idx.push(0);
        }

        let zdt = accumulator.finish();
        (idx, zdx, zdt)
    }
}

struct IdxRecord {
    key: String,
    offset_field: u32,
}

fn parse_idx(idx: &[u8]) -> Result<Vec<IdxRecord>> {
    let mut records = Vec::new();
    let mut pos = 0;
    while pos < idx.len() {
        let offset_bytes = idx.get(pos..pos + 4).ok_or_else(|| Error::IndexCorrupt {
            file: ".idx".into(),
            detail: "truncated big-endian offset field".into(),
        })?;
        // Big-endian: the one field in this codec family that isn't little-endian.
        let offset_field = u32::from_be_bytes(offset_bytes.try_into().unwrap());
        let key_start = pos + 4;
        let nul = memchr::memchr(0, &idx[key_start..]).ok_or_else(|| Error::IndexCorrupt {
            file: ".idx".into(),
            detail: "unterminated key (no NUL byte)".into(),
        })?;
        let key = std::str::from_utf8(&idx[key_start..key_start + nul])
            .map_err(|e| Error::IndexCorrupt {
                file: ".idx".into(),
                detail: format!("key is not valid UTF-8: {e}"),
            })?
            .to_string();
        records.push(IdxRecord { key, offset_field });
        pos = key_start + nul + 1;
    }
    Ok(records)
}

/// One block's byte range within `.zdt`, found by a single sequential scan at open
/// time (there is no block-index file to look this up in, unlike `zText`'s `.bzs`).
fn scan_zdt_blocks(zdt: &[u8]) -> Result<Vec<(usize, usize)>> {
    let mut blocks = Vec::new();
    let mut pos = 0;
    while pos < zdt.len() {
        let header = zdt.get(pos..pos + 4).ok_or_else(|| Error::IndexCorrupt {
            file: ".zdt".into(),
            detail: "truncated block length header".into(),
        })?;
        let csize = u32::from_le_bytes(header.try_into().unwrap()) as usize;
        let start = pos + 4;
        let end = start + csize;
        if end > zdt.len() {
            return Err(Error::IndexCorrupt {
                file: ".zdt".into(),
                detail: format!("block at {start} claims {csize} bytes, past end of file"),
            });
        }
        blocks.push((start, csize));
        pos = end;
    }
    Ok(blocks)
}

pub struct ZLdReader<'a> {
    records: Vec<IdxRecord>,
    locations: HashMap<String, (u32, u32)>,
    zdt: &'a [u8],
    block_ranges: Vec<(usize, usize)>,
}

impl<'a> ZLdReader<'a> {
    pub fn open(idx: &'a [u8], zdx: &'a [u8], zdt: &'a [u8]) -> Result<Self> {
        let records = parse_idx(idx)?;

        if zdx.len() % 8 != 0 {
            return Err(Error::IndexCorrupt {
                file: ".zdx".into(),
                detail: format!("length {} not a multiple of 8", zdx.len()),
            });
        }
        if zdx.len() / 8 != records.len() {
            return Err(Error::IndexCorrupt {
                file: ".zdx".into(),
                detail: format!(
                    "{} rows does not match {} keys in .idx",
                    zdx.len() / 8,
                    records.len()
                ),
            });
        }

        let mut locations = HashMap::with_capacity(records.len());
        for (record, chunk) in records.iter().zip(zdx.chunks_exact(8)) {
            let block_num = u32::from_le_bytes(chunk[0..4].try_into().unwrap());
            let offset = u32::from_le_bytes(chunk[4..8].try_into().unwrap());
            locations.insert(record.key.clone(), (block_num, offset));
        }

        let block_ranges = scan_zdt_blocks(zdt)?;

        log::debug!(
            "opened zLD lexicon: {} keys, {} blocks",
            records.len(),
            block_ranges.len()
        );

        Ok(ZLdReader {
            records,
            locations,
            zdt,
            block_ranges,
        })
    }

    pub fn key_count(&self) -> usize {
        self.records.len()
    }

    /// Every key, in the module's native (on-disk) order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.key.as_str())
    }

    /// Linear scan for every key starting with `prefix`, per §4.4's `search`.
    pub fn search(&self, prefix: &str) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.key.as_str())
            .filter(|k| k.starts_with(prefix))
            .collect()
    }

    fn decompress_block(&self, block_num: u32) -> Result<Vec<u8>> {
        let &(start, csize) = self
            .block_ranges
            .get(block_num as usize)
            .ok_or_else(|| Error::IndexCorrupt {
                file: ".zdt".into(),
                detail: format!("block {block_num} does not exist"),
            })?;
        zlib_decompress(&self.zdt[start..start + csize], 0)
    }

    /// Looks up an entry by exact key.
    pub fn lookup(&self, key: &str) -> Result<Vec<u8>> {
        let &(block_num, offset) = self
            .locations
            .get(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))?;
        let decompressed = self.decompress_block(block_num)?;
        let start = offset as usize;
        let body = decompressed.get(start..).ok_or_else(|| Error::IndexCorrupt {
            file: ".zdt".into(),
            detail: format!("key {key:?} offset {start} out of decompressed block bounds"),
        })?;
        let nul = memchr::memchr(0, body).ok_or_else(|| Error::IndexCorrupt {
            file: ".zdt".into(),
            detail: format!("key {key:?} entry has no NUL terminator"),
        })?;
        Ok(body[..nul].to_vec())
    }
}
