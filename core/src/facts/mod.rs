//! file: core/src/facts/mod.rs
//! description: fact directory loader.
//!
//! Scans a directory for per-relation fact files (`<relation>.<ext>`) and
//! parses every line into a tab-separated record. Nothing here interprets
//! the fields; that is left to the aggregator in `crate::graph`.

use glob::{glob, Pattern};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

mod err;

pub use err::LoadError;

/// One line of a relation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactRecord {
    /// Tab-separated fields, in file order. Empty for a blank line.
    pub fields: Vec<String>,
    /// 1-based line number within the relation file.
    pub line: usize,
}

impl FactRecord {
    pub fn parse(line: &str, line_number: usize) -> Self {
        let fields = if line.is_empty() {
            Vec::new()
        } else {
            line.split('\t').map(str::to_string).collect()
        };
        FactRecord {
            fields,
            line: line_number,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Relation {
    pub name: String,
    pub path: PathBuf,
    pub records: Vec<FactRecord>,
}

impl Relation {
    /// Parse relation content; a trailing newline does not produce a record.
    pub fn from_source(name: &str, path: PathBuf, content: &str) -> Self {
        let records = content
            .lines()
            .enumerate()
            .map(|(idx, line)| FactRecord::parse(line, idx + 1))
            .collect();
        Relation {
            name: name.to_string(),
            path,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Every relation found in one fact directory, ordered by path.
#[derive(Debug, Clone, Default)]
pub struct FactSet {
    pub directory: PathBuf,
    pub relations: Vec<Relation>,
}

impl FactSet {
    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations.iter().find(|r| r.name == name)
    }

    pub fn record_count(&self) -> usize {
        self.relations.iter().map(Relation::len).sum()
    }
}

/// Load every `*.<extension>` file of `dir` as a relation.
pub fn load_fact_set(dir: &Path, extension: &str) -> Result<FactSet, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::missing_directory(dir));
    }

    let dir_str = dir.to_str().ok_or_else(|| LoadError::non_utf8_path(dir))?;
    let pattern = format!("{}/*.{}", Pattern::escape(dir_str), extension);
    let paths = glob(&pattern).map_err(|e| LoadError::bad_pattern(&pattern, e))?;

    let mut relations = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| LoadError::unreadable(e.path(), e.error()))?;
        if !path.is_file() {
            continue;
        }
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| LoadError::non_utf8_path(&path))?
            .to_string();
        let content = fs::read_to_string(&path).map_err(|e| LoadError::unreadable(&path, e))?;
        let relation = Relation::from_source(&name, path, &content);
        debug!("loaded relation '{}' with {} record(s)", relation.name, relation.len());
        relations.push(relation);
    }

    let set = FactSet {
        directory: dir.to_path_buf(),
        relations,
    };
    info!(
        "loaded {} relation(s), {} record(s) from '{}'",
        set.relations.len(),
        set.record_count(),
        dir.display()
    );
    Ok(set)
}
