//! Append-only ledger of processed paper titles.
//!
//! One title per line, UTF-8. Runs of whitespace collapse to single spaces so a
//! title containing line breaks still occupies exactly one line. The file is read
//! once at startup and only ever appended to; a title that has been recorded stays
//! processed for every later run that reads the same file.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::LedgerError;

/// Processed-title set backed by a file.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    titles: HashSet<String>,
}

impl Ledger {
    /// Open the ledger at `path`, loading every recorded title.
    ///
    /// A missing file is an empty ledger; it is created on the first [`record`](Self::record).
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let path = path.into();
        let titles = Self::load(&path)?;
        tracing::debug!(path = %path.display(), titles = titles.len(), "Loaded ledger");
        Ok(Self { path, titles })
    }

    /// Read all recorded titles from `path`. Blank lines are ignored.
    pub fn load(path: &Path) -> Result<HashSet<String>, LedgerError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashSet::new()),
            Err(source) => return Err(LedgerError { path: path.to_path_buf(), source }),
        };

        let mut titles = HashSet::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|source| LedgerError { path: path.to_path_buf(), source })?;
            let title = normalize(&line);
            if !title.is_empty() {
                titles.insert(title);
            }
        }
        Ok(titles)
    }

    /// Whether `identifier` has already been processed.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.titles.contains(&normalize(identifier))
    }

    /// Add `identifier` to the in-memory set, then append it to the file.
    ///
    /// Call only after the paper was published. Recording an identifier twice is a no-op.
    /// The in-memory set is updated even when the append fails, so the title stays
    /// processed for the rest of this run; the error only means later runs won't see it.
    pub fn record(&mut self, identifier: &str) -> Result<(), LedgerError> {
        let title = normalize(identifier);
        if title.is_empty() || !self.titles.insert(title.clone()) {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| LedgerError { path: self.path.clone(), source })?;
        writeln!(file, "{title}").map_err(|source| LedgerError { path: self.path.clone(), source })
    }

    /// Number of processed titles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// True if nothing has been processed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn normalize(identifier: &str) -> String {
    identifier.split_whitespace().collect::<Vec<_>>().join(" ")
}
