use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;

/// One matched note, as displayed to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultEntry {
    /// `<timestamp>\t<title>`
    pub title: String,
    /// Absolute path to the note file.
    pub path: PathBuf,
}

/// Matched notes in traversal order. An entry's position is its selection
/// index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    entries: Vec<ResultEntry>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, title: String, path: PathBuf) {
        self.entries.push(ResultEntry { title, path });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ResultEntry> {
        self.entries.get(index)
    }

    /// Path of the entry shown as `[index]`.
    pub fn path(&self, index: usize) -> Option<&Path> {
        self.get(index).map(|e| e.path.as_path())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultEntry> {
        self.entries.iter()
    }

    /// Write one `[index] title` line per entry.
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        for (i, entry) in self.entries.iter().enumerate() {
            writeln!(out, "[{i}] {}", entry.title)?;
        }
        Ok(())
    }

    /// Serialize as `{"terms": [...], "results": [{index, title, path}]}`.
    pub fn to_json(&self, terms: &[String]) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct Indexed<'a> {
            index: usize,
            #[serde(flatten)]
            entry: &'a ResultEntry,
        }

        #[derive(Serialize)]
        struct Output<'a> {
            terms: &'a [String],
            results: Vec<Indexed<'a>>,
        }

        let results = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| Indexed { index, entry })
            .collect();
        serde_json::to_string(&Output { terms, results })
    }
}
