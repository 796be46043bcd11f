//! The Configuration Record: the per-module `.conf` text file that names a module's
//! data driver, data path, compression, and optional encryption key.
//!
//! The format is INI-like: a single `[ModuleName]` section header followed by
//! `Key=Value` lines. A trailing backslash continues a value onto the next line (used
//! by long `About=` fields in the wild), and `#` or `;` at the start of a trimmed line
//! marks a comment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which binary codec a module's `ModDrv` key selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleDriver {
    ZText,
    ZCom,
    ZLd,
    RawGenBook,
}

impl ModuleDriver {
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "zText" => Ok(Self::ZText),
            "zCom" => Ok(Self::ZCom),
            "zLD" => Ok(Self::ZLd),
            "RawGenBook" => Ok(Self::RawGenBook),
            other => Err(Error::ConfigMalformed(format!(
                "unsupported ModDrv (no codec implements it): {other}"
            ))),
        }
    }
}

/// The coarse category a `ModDrv` value belongs to, independent of whether this
/// crate's codecs implement that specific driver. `RawText`/`RawCom`/`RawLD` are
/// classified here (they're valid SWORD drivers) even though this crate has no
/// uncompressed-format codec for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleCategory {
    Bible,
    Commentary,
    Dictionary,
    GenBook,
    Unknown,
}

impl ModuleCategory {
    fn from_driver_str(s: &str) -> Self {
        match s {
            "zText" | "zText4" | "RawText" => ModuleCategory::Bible,
            "zCom" | "zCom4" | "RawCom" => ModuleCategory::Commentary,
            "zLD" | "RawLD" => ModuleCategory::Dictionary,
            "RawGenBook" => ModuleCategory::GenBook,
            _ => ModuleCategory::Unknown,
        }
    }
}

/// A parsed Configuration Record for one module.
#[derive(Debug, Clone)]
pub struct Config {
    pub module_name: String,
    entries: BTreeMap<String, String>,
}

impl Config {
    /// Parses the text of a `.conf` file. The first non-blank, non-comment line must be
    /// a `[ModuleName]` section header.
    pub fn parse(text: &str) -> Result<Self> {
        let mut module_name = None;
        let mut entries = BTreeMap::new();
        let mut pending_key: Option<String> = None;
        let mut pending_value = String::new();

        for raw_line in text.lines() {
            let line = raw_line.trim_end_matches(['\r']);

            if let Some(key) = pending_key.take() {
                let trimmed = line.trim_end();
                if let Some(continued) = trimmed.strip_suffix('\\') {
                    pending_value.push('\n');
                    pending_value.push_str(continued.trim_end());
                    pending_key = Some(key);
                    continue;
                }
                pending_value.push('\n');
                pending_value.push_str(trimmed);
                entries.insert(key, std::mem::take(&mut pending_value));
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            if let Some(name) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                if module_name.is_some() {
                    return Err(Error::ConfigMalformed(
                        "more than one module section header".into(),
                    ));
                }
                module_name = Some(name.trim().to_string());
                continue;
            }

            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(Error::ConfigMalformed(format!(
                    "line is neither a section header nor a key=value pair: {trimmed}"
                )));
            };
            let key = key.trim().to_string();
            let value = value.trim_end();

            if let Some(continued) = value.strip_suffix('\\') {
                pending_key = Some(key);
                pending_value = continued.trim_end().to_string();
                continue;
            }

            entries.insert(key, value.trim_start().to_string());
        }

        let module_name = module_name
            .ok_or_else(|| Error::ConfigMalformed("missing [ModuleName] section header".into()))?;

        log::debug!("parsed configuration record for [{module_name}] ({} keys)", entries.len());

        Ok(Config {
            module_name,
            entries,
        })
    }

    /// Serializes back to `.conf` text. Required fields are emitted first in the fixed
    /// order §4.1 specifies (`ModDrv`, `Description`, `Lang`, `Encoding`, `DataPath`,
    /// `Versification`), skipping any that aren't set; every other key follows in
    /// alphabetical order, which `entries` (a `BTreeMap`) already iterates in.
    /// Multi-line values (joined with `\n` on parse) are re-split across continuation
    /// lines.
    pub fn serialize(&self) -> String {
        const LEADING_ORDER: &[&str] = &[
            "ModDrv",
            "Description",
            "Lang",
            "Encoding",
            "DataPath",
            "Versification",
        ];

        let mut out = format!("[{}]\n", self.module_name);
        for key in LEADING_ORDER {
            if let Some(value) = self.entries.get(*key) {
                write_entry(&mut out, key, value);
            }
        }
        for (key, value) in &self.entries {
            if LEADING_ORDER.contains(&key.as_str()) {
                continue;
            }
            write_entry(&mut out, key, value);
        }
        out
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn data_path(&self) -> Result<&str> {
        self.get("DataPath")
            .ok_or_else(|| Error::ConfigMalformed("missing DataPath".into()))
    }

    pub fn module_type(&self) -> Result<ModuleDriver> {
        let drv = self
            .get("ModDrv")
            .ok_or_else(|| Error::ConfigMalformed("missing ModDrv".into()))?;
        ModuleDriver::from_str(drv)
    }

    /// The coarse category (§4.1) this module's `ModDrv` belongs to, regardless of
    /// whether this crate's codecs implement that exact driver.
    pub fn module_category(&self) -> ModuleCategory {
        self.get("ModDrv")
            .map(ModuleCategory::from_driver_str)
            .unwrap_or(ModuleCategory::Unknown)
    }

    /// True iff `ModDrv` starts with `z`, the `zText`/`zCom`/`zLD` family. `RawGenBook`
    /// and the `Raw*` drivers store their data uncompressed and are not compressed by
    /// this definition.
    pub fn is_compressed(&self) -> bool {
        self.get("ModDrv").is_some_and(|drv| drv.starts_with('z'))
    }

    /// A non-empty `CipherKey` marks the module as encrypted. This crate refuses to
    /// read or write encrypted modules; see [`Error::EncryptedRefused`].
    pub fn is_encrypted(&self) -> bool {
        self.get("CipherKey").is_some_and(|k| !k.is_empty())
    }

    pub fn versification(&self) -> &str {
        self.get("Versification").unwrap_or("")
    }

    /// Every entry not covered by one of this crate's first-class accessors
    /// (`About`, `Copyright`, `DistributionLicense`, `Category`, `CompressType`, and any
    /// key this crate doesn't recognize), preserved for round-tripping through
    /// [`crate::ir::Corpus::attributes`].
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter(|(k, _)| !KNOWN_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

const KNOWN_KEYS: &[&str] = &[
    "ModDrv",
    "DataPath",
    "Encoding",
    "Versification",
    "Lang",
    "Description",
    "CipherKey",
];

fn write_entry(out: &mut String, key: &str, value: &str) {
    let mut lines = value.split('\n');
    if let Some(first) = lines.next() {
        write_continued(out, key, first, value.contains('\n'));
    }
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
}

fn write_continued(out: &mut String, key: &str, first_line: &str, has_more: bool) {
    out.push_str(key);
    out.push('=');
    out.push_str(first_line);
    if has_more {
        out.push('\\');
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_ztext_config() {
        let text = "[KJV]\nDataPath=./modules/texts/ztext/kjv/\nModDrv=zText\nCompressType=ZIP\nVersification=KJV\n";
        let config = Config::parse(text).unwrap();
        assert_eq!(config.module_name, "KJV");
        assert_eq!(config.data_path().unwrap(), "./modules/texts/ztext/kjv/");
        assert_eq!(config.module_type().unwrap(), ModuleDriver::ZText);
        assert!(config.is_compressed());
        assert!(!config.is_encrypted());
    }

    #[test]
    fn comment_lines_are_skipped() {
        let text = "# a comment\n; another comment\n[KJV]\nModDrv=zText\nDataPath=./x/\n";
        let config = Config::parse(text).unwrap();
        assert_eq!(config.module_name, "KJV");
    }

    #[test]
    fn continuation_lines_join_with_newline() {
        let text = "[KJV]\nModDrv=zText\nDataPath=./x/\nAbout=This is a long\\\ndescription split\\\nacross lines.\n";
        let config = Config::parse(text).unwrap();
        assert_eq!(
            config.get("About").unwrap(),
            "This is a long\ndescription split\nacross lines."
        );
    }

    #[test]
    fn missing_section_header_is_an_error() {
        assert!(Config::parse("ModDrv=zText\n").is_err());
    }

    #[test]
    fn rawgenbook_is_not_compressed() {
        let text = "[WCF]\nModDrv=RawGenBook\nDataPath=./x/book\n";
        let config = Config::parse(text).unwrap();
        assert!(!config.is_compressed());
        assert_eq!(config.module_category(), ModuleCategory::GenBook);
    }

    #[test]
    fn rawld_is_classified_as_dictionary_but_unimplemented() {
        let text = "[Strongs]\nModDrv=RawLD\nDataPath=./x/\n";
        let config = Config::parse(text).unwrap();
        assert_eq!(config.module_category(), ModuleCategory::Dictionary);
        assert!(config.module_type().is_err());
    }

    #[test]
    fn cipher_key_marks_encrypted() {
        let text = "[KJV]\nModDrv=zText\nDataPath=./x/\nCipherKey=abc123\n";
        let config = Config::parse(text).unwrap();
        assert!(config.is_encrypted());
    }

    #[test]
    fn attributes_excludes_known_keys() {
        let text = "[KJV]\nModDrv=zText\nDataPath=./x/\nLang=en\nDescription=King James\nAbout=Public domain\nCategory=Bible\n";
        let config = Config::parse(text).unwrap();
        let attrs: BTreeMap<_, _> = config.attributes().collect();
        assert_eq!(attrs.get("About"), Some(&"Public domain"));
        assert_eq!(attrs.get("Category"), Some(&"Bible"));
        assert!(!attrs.contains_key("Lang"));
        assert!(!attrs.contains_key("Description"));
        assert!(!attrs.contains_key("ModDrv"));
    }

    #[test]
    fn round_trips_through_serialize() {
        let text = "[KJV]\nDataPath=./x/\nModDrv=zText\n";
        let config = Config::parse(text).unwrap();
        let reparsed = Config::parse(&config.serialize()).unwrap();
        assert_eq!(reparsed.module_name, config.module_name);
        assert_eq!(reparsed.data_path().unwrap(), config.data_path().unwrap());
    }

    #[test]
    fn serialize_emits_required_fields_in_fixed_order_then_attributes_alphabetically() {
        let text = "[KJV]\nCategory=Bible\nVersification=KJV\nAbout=Public domain\nDataPath=./x/\nModDrv=zText\nLang=en\nDescription=King James\nEncoding=UTF-8\n";
        let config = Config::parse(text).unwrap();
        let serialized = config.serialize();
        let keys: Vec<&str> = serialized
            .lines()
            .skip(1)
            .filter_map(|line| line.split('=').next())
            .collect();
        assert_eq!(
            keys,
            vec![
                "ModDrv",
                "Description",
                "Lang",
                "Encoding",
                "DataPath",
                "Versification",
                "About",
                "Category",
            ]
        );
    }
}
