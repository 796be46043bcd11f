//! Reader/writer for the `RawGenBook` three-file tree layout: a parent/child/sibling
//! tree (`.bdt`), a per-node content locator array (`.idx`), and the raw (uncompressed)
//! content bytes those locators point into (`.dat`).
//!
//! `.bdt` holds [`TreeNode`] records: three 32-bit little-endian index fields
//! (parent, first-child, next-sibling) followed by a NUL-terminated name, in
//! depth-first creation order. [`NULL_INDEX`] is "no link", the same parent-pointer /
//! first-child / next-sibling arena shape used for in-memory IR trees elsewhere in
//! this crate, here made persistent. `.idx` is a flat array of 8-byte Data Index
//! Entries (offset, size into `.dat`), positionally aligned with `.bdt`: node *i*'s
//! content lives at `idx[i]`.

use super::NULL_INDEX;
use crate::error::{Error, Result};

/// One tree node as stored in `.bdt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub parent: u32,
    pub first_child: u32,
    pub next_sibling: u32,
    pub name: String,
}

impl TreeNode {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.parent.to_le_bytes());
        out.extend_from_slice(&self.first_child.to_le_bytes());
        out.extend_from_slice(&self.next_sibling.to_le_bytes());
        out.extend_from_slice(self.name.as_bytes());
        out.push(0);
    }

    /// Decodes one record starting at `bytes[0]`, returning the node and the number of
    /// bytes it consumed (so the caller can advance to the next record).
    fn decode(bytes: &[u8]) -> Result<(Self, usize)> {
        if bytes.len() < 12 {
            return Err(Error::IndexCorrupt {
                file: ".bdt".into(),
                detail: format!("node record truncated: {} bytes", bytes.len()),
            });
        }
        let parent = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
        let first_child = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
        let next_sibling = u32::from_le_bytes(bytes[8..12].try_into().unwrap());
        let nul = memchr::memchr(0, &bytes[12..]).ok_or_else(|| Error::IndexCorrupt {
            file: ".bdt".into(),
            detail: "node name runs past end of file before its NUL terminator".into(),
        })?;
        let name = std::str::from_utf8(&bytes[12..12 + nul])
            .map_err(|e| Error::IndexCorrupt {
                file: ".bdt".into(),
                detail: format!("node name is not valid UTF-8: {e}"),
            })?
            .to_string();
        Ok((
            TreeNode {
                parent,
                first_child,
                next_sibling,
                name,
            },
            12 + nul + 1,
        ))
    }
}

/// One `(path, content)` pair to be written as a node. Paths begin with `/` and use it
/// as the hierarchy separator.
pub struct PathEntry {
    pub path: String,
    pub content: Vec<u8>,
}

/// Builds a `RawGenBook` tree from a flat set of `/`-delimited paths, following §4.5's
/// algorithm: sort by path, derive parent/child/sibling links from the sorted array's
/// positions, and emit the three files.
pub struct RawGenBookWriter {
    entries: Vec<PathEntry>,
}

impl Default for RawGenBookWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl RawGenBookWriter {
    pub fn new() -> Self {
        RawGenBookWriter { entries: Vec::new() }
    }

    /// Adds a node at `path` (must start with `/`). Ancestor paths that are never
    /// added explicitly are synthesized with empty content, so a leaf can be added
    /// without first adding every containing path.
    pub fn add_path(&mut self, path: impl Into<String>, content: &[u8]) {
        self.entries.push(PathEntry {
            path: path.into(),
            content: content.to_vec(),
        });
    }

    /// Serializes `(bdt, idx, dat)` file contents.
    pub fn finish(mut self) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
        // Close over ancestor paths: every prefix of every path becomes its own node,
        // even if the caller never added it explicitly (§4.5 invariant: parent/child/
        // sibling form a forest, so every node's ancestors must themselves be nodes).
        let mut by_path: std::collections::BTreeMap<String, Vec<u8>> = std::collections::BTreeMap::new();
        for entry in self.entries.drain(..) {
            by_path.insert(entry.path, entry.content);
        }
        for path in by_path.keys().cloned().collect::<Vec<_>>() {
            let mut rest = path.as_str();
            while let Some(idx) = rest.rfind('/') {
                rest = &rest[..idx];
                if rest.is_empty() {
                    break;
                }
                by_path.entry(rest.to_string()).or_default();
            }
        }

        // Lexicographic order on `/`-joined paths is a valid preorder: every path
        // sorts after its own prefixes and before any sibling that follows it.
        let mut paths: Vec<String> = by_path.keys().cloned().collect();
        paths.sort();

        let index_of: std::collections::HashMap<&str, u32> = paths
            .iter()
            .enumerate()
            .map(|(i, p)| (p.as_str(), i as u32))
            .collect();

        let parent_of = |path: &str| -> u32 {
            match path.rfind('/') {
                Some(0) | None => NULL_INDEX,
                Some(idx) => index_of.get(&path[..idx]).copied().unwrap_or(NULL_INDEX),
            }
        };

        let mut nodes: Vec<TreeNode> = paths
            .iter()
            .map(|path| {
                let name = path.rsplit('/').next().unwrap_or(path).to_string();
                TreeNode {
                    parent: parent_of(path),
                    first_child: NULL_INDEX,
                    next_sibling: NULL_INDEX,
                    name,
                }
            })
            .collect();

        // First child = first later node with this parent; next sibling = next later
        // node sharing that parent. A single backward pass over `last_child_of`
        // suffices because children always appear after their parent.
        let mut last_child_of: std::collections::HashMap<u32, u32> = std::collections::HashMap::new();
        for i in 0..nodes.len() {
            let parent = nodes[i].parent;
            if parent == NULL_INDEX {
                continue;
            }
            match last_child_of.get(&parent) {
                None => nodes[parent as usize].first_child = i as u32,
                Some(&last) => nodes[last as usize].next_sibling = i as u32,
            }
            last_child_of.insert(parent, i as u32);
        }

        let mut bdt = Vec::new();
        let mut idx = Vec::with_capacity(nodes.len() * 8);
        let mut dat = Vec::new();
        for (path, node) in paths.iter().zip(nodes.iter()) {
            node.encode(&mut bdt);
            let content = &by_path[path];
            let offset = dat.len() as u32;
            idx.extend_from_slice(&offset.to_le_bytes());
            idx.extend_from_slice(&(content.len() as u32).to_le_bytes());
            dat.extend_from_slice(content);
        }

        (bdt, idx, dat)
    }
}

/// Random-access reader over a serialized tree.
pub struct RawGenBookReader<'a> {
    nodes: Vec<TreeNode>,
    content_ranges: Vec<(u32, u32)>,
    dat: &'a [u8],
}

impl<'a> RawGenBookReader<'a> {
    pub fn open(bdt: &[u8], idx: &'a [u8], dat: &'a [u8]) -> Result<Self> {
        if idx.len() % 8 != 0 {
            return Err(Error::IndexCorrupt {
                file: ".idx".into(),
                detail: format!("length {} not a multiple of 8", idx.len()),
            });
        }
        let content_ranges: Vec<(u32, u32)> = idx
            .chunks_exact(8)
            .map(|c| {
                let offset = u32::from_le_bytes(c[0..4].try_into().unwrap());
                let size = u32::from_le_bytes(c[4..8].try_into().unwrap());
                (offset, size)
            })
            .collect();

        let mut nodes = Vec::with_capacity(content_ranges.len());
        let mut pos = 0;
        while pos < bdt.len() {
            let (node, consumed) = TreeNode::decode(&bdt[pos..])?;
            nodes.push(node);
            pos += consumed;
        }

        if nodes.len() != content_ranges.len() {
            return Err(Error::IndexCorrupt {
                file: ".idx".into(),
                detail: format!(
                    "{} entries does not match {} nodes in .bdt",
                    content_ranges.len(),
                    nodes.len()
                ),
            });
        }

        log::debug!("opened RawGenBook tree: {} nodes", nodes.len());

        Ok(RawGenBookReader {
            nodes,
            content_ranges,
            dat,
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: u32) -> Result<&TreeNode> {
        self.nodes.get(id as usize).ok_or_else(|| Error::IndexCorrupt {
            file: ".bdt".into(),
            detail: format!("node {id} out of range"),
        })
    }

    pub fn node_content(&self, id: u32) -> Result<&'a [u8]> {
        let &(offset, size) = self.content_ranges.get(id as usize).ok_or_else(|| Error::IndexCorrupt {
            file: ".idx".into(),
            detail: format!("node {id} out of range"),
        })?;
        let start = offset as usize;
        let end = start + size as usize;
        self.dat.get(start..end).ok_or_else(|| Error::IndexCorrupt {
            file: ".dat".into(),
            detail: format!("node {id} range {start}..{end} out of bounds"),
        })
    }

    /// Children of `id`, in sibling order, by walking `first_child`/`next_sibling`.
    pub fn children(&self, id: u32) -> Result<Vec<u32>> {
        let node = self.node(id)?;
        let mut out = Vec::new();
        let mut cursor = node.first_child;
        while cursor != NULL_INDEX {
            out.push(cursor);
            cursor = self.node(cursor)?.next_sibling;
        }
        Ok(out)
    }

    /// Reconstructs a node's full `/`-joined path by walking parent links to the root.
    pub fn full_path(&self, id: u32) -> Result<String> {
        let mut segments = vec![self.node(id)?.name.clone()];
        let mut cursor = self.node(id)?.parent;
        while cursor != NULL_INDEX {
            let node = self.node(cursor)?;
            segments.push(node.name.clone());
            cursor = node.parent;
        }
        segments.reverse();
        Ok(format!("/{}", segments.join("/")))
    }

    /// All node ids with their full `/`-joined path.
    pub fn list_keys(&self) -> Result<Vec<(u32, String)>> {
        (0..self.nodes.len() as u32)
            .map(|id| self.full_path(id).map(|path| (id, path)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_small_tree() {
        let mut writer = RawGenBookWriter::new();
        writer.add_path("/WCF", b"");
        writer.add_path("/WCF/Chapter 1", b"");
        writer.add_path("/WCF/Chapter 1/Article 1", b"Of the Holy Scripture");
        writer.add_path("/WCF/Chapter 2", b"Of God");
        let (bdt, idx, dat) = writer.finish();

        let reader = RawGenBookReader::open(&bdt, &idx, &dat).unwrap();
        assert_eq!(reader.node_count(), 4);

        let root_id = reader
            .list_keys()
            .unwrap()
            .into_iter()
            .find(|(_, p)| p == "/WCF")
            .unwrap()
            .0;
        let children: Vec<String> = reader
            .children(root_id)
            .unwrap()
            .into_iter()
            .map(|id| reader.node(id).unwrap().name.clone())
            .collect();
        assert_eq!(children, vec!["Chapter 1", "Chapter 2"]);

        let article_id = reader
            .list_keys()
            .unwrap()
            .into_iter()
            .find(|(_, p)| p == "/WCF/Chapter 1/Article 1")
            .unwrap()
            .0;
        assert_eq!(
            reader.node_content(article_id).unwrap(),
            b"Of the Holy Scripture"
        );
        assert_eq!(
            reader.full_path(article_id).unwrap(),
            "/WCF/Chapter 1/Article 1"
        );
    }

    #[test]
    fn root_has_no_parent() {
        let mut writer = RawGenBookWriter::new();
        writer.add_path("/WCF", b"");
        let (bdt, idx, dat) = writer.finish();
        let reader = RawGenBookReader::open(&bdt, &idx, &dat).unwrap();
        assert_eq!(reader.node(0).unwrap().parent, NULL_INDEX);
    }

    #[test]
    fn out_of_range_node_id_is_rejected() {
        let mut writer = RawGenBookWriter::new();
        writer.add_path("/WCF", b"");
        let (bdt, idx, dat) = writer.finish();
        let reader = RawGenBookReader::open(&bdt, &idx, &dat).unwrap();
        assert!(reader.node(99).is_err());
    }

    #[test]
    fn ancestor_paths_are_synthesized() {
        let mut writer = RawGenBookWriter::new();
        writer.add_path("/WCF/Chapter 1/Article 1", b"leaf only");
        let (bdt, idx, dat) = writer.finish();
        let reader = RawGenBookReader::open(&bdt, &idx, &dat).unwrap();
        assert_eq!(reader.node_count(), 3);
        let keys: Vec<String> = reader.list_keys().unwrap().into_iter().map(|(_, p)| p).collect();
        assert!(keys.contains(&"/WCF".to_string()));
        assert!(keys.contains(&"/WCF/Chapter 1".to_string()));
    }

    #[test]
    fn two_top_level_paths_form_a_forest() {
        let mut writer = RawGenBookWriter::new();
        writer.add_path("/WCF", b"");
        writer.add_path("/WCF/Chapter 1", b"");
        writer.add_path("/WSC", b"");
        writer.add_path("/WSC/Q1", b"question one");
        writer.add_path("/WSC/A1", b"answer one");
        let (bdt, idx, dat) = writer.finish();
        let reader = RawGenBookReader::open(&bdt, &idx, &dat).unwrap();
        assert_eq!(reader.node_count(), 5);

        let wsc_id = reader
            .list_keys()
            .unwrap()
            .into_iter()
            .find(|(_, p)| p == "/WSC")
            .unwrap()
            .0;
        assert_eq!(reader.node(wsc_id).unwrap().parent, NULL_INDEX);
        let children: Vec<String> = reader
            .children(wsc_id)
            .unwrap()
            .into_iter()
            .map(|id| reader.node(id).unwrap().name.clone())
            .collect();
        assert_eq!(children, vec!["A1", "Q1"]);
    }

    #[test]
    fn reading_sentinel_links_yields_no_link() {
        // Synthesize three nodes by hand: Root -> [Child1, Child2], no other links.
        let mut bdt = Vec::new();
        let mut node = |parent: u32, first_child: u32, next_sibling: u32, name: &str| {
            bdt.extend_from_slice(&parent.to_le_bytes());
            bdt.extend_from_slice(&first_child.to_le_bytes());
            bdt.extend_from_slice(&next_sibling.to_le_bytes());
            bdt.extend_from_slice(name.as_bytes());
            bdt.push(0);
        };
        node(NULL_INDEX, 1, NULL_INDEX, "Root");
        node(0, NULL_INDEX, 2, "Child1");
        node(0, NULL_INDEX, NULL_INDEX, "Child2");

        let mut idx = Vec::new();
        for _ in 0..3 {
            idx.extend_from_slice(&0u32.to_le_bytes());
            idx.extend_from_slice(&0u32.to_le_bytes());
        }

        let reader = RawGenBookReader::open(&bdt, &idx, &[]).unwrap();
        assert_eq!(reader.node(0).unwrap().parent, NULL_INDEX);
        let children: Vec<String> = reader
            .children(0)
            .unwrap()
            .into_iter()
            .map(|id| reader.node(id).unwrap().name.clone())
            .collect();
        assert_eq!(children, vec!["Child1", "Child2"]);
    }
}
