use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use biblatex::{Chunk, Entry};
use regex::Regex;

use super::Bibliography;
use crate::error::BibliographyError;

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct IndexedEntry {
    year: Option<i32>,
    title: Option<String>,
}

/// Keys, years and titles of one or more BibTeX/BibLaTeX files.
///
/// When several files define the same key the first definition wins.
#[derive(Debug, Clone, Default)]
pub struct BibtexIndex {
    entries: BTreeMap<String, IndexedEntry>,
}

impl BibtexIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a single database held in memory. `path` is only used for error
    /// messages.
    pub fn parse(src: &str, path: &Path) -> Result<Self, BibliographyError> {
        let mut index = Self::new();
        index.add_source(src, path)?;
        Ok(index)
    }

    /// Read and merge every file in `paths`.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self, BibliographyError> {
        let mut index = Self::new();
        for path in paths {
            let path = path.as_ref();
            let src = std::fs::read_to_string(path).map_err(|source| BibliographyError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            index.add_source(&src, path)?;
        }
        Ok(index)
    }

    fn add_source(&mut self, src: &str, path: &Path) -> Result<(), BibliographyError> {
        let bibliography =
            biblatex::Bibliography::parse(src).map_err(|err| BibliographyError::Parse {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;

        let before = self.entries.len();
        for entry in bibliography.into_iter() {
            let indexed = IndexedEntry {
                year: entry_year(&entry),
                title: field_text(&entry, "title"),
            };
            self.entries.entry(entry.key.clone()).or_insert(indexed);
        }

        log::info!(
            "Loaded {} entries from {}",
            self.entries.len() - before,
            path.display()
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Bibliography for BibtexIndex {
    fn year(&self, key: &str) -> Option<i32> {
        self.entries.get(key).and_then(|e| e.year)
    }

    fn title(&self, key: &str) -> Option<String> {
        self.entries.get(key).and_then(|e| e.title.clone())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

fn field_text(entry: &Entry, name: &str) -> Option<String> {
    let chunks = entry.fields.get(name)?;
    let text: String = chunks
        .iter()
        .map(|c| match &c.v {
            Chunk::Normal(s) | Chunk::Verbatim(s) => s.as_str(),
            _ => "",
        })
        .collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// `year` field, else the first four digits of `date`.
fn entry_year(entry: &Entry) -> Option<i32> {
    ["year", "date"]
        .iter()
        .filter_map(|name| field_text(entry, name))
        .find_map(|text| YEAR.find(&text).and_then(|m| m.as_str().parse().ok()))
}
