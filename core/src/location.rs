use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Location {
    /// The fact file in which the location is found.
    pub file: String,
    /// The 1-based line number (record) within the file, 0 when unknown.
    pub line: usize,
    /// The 1-based field column within the record, 0 when unknown.
    pub column: usize,
}

impl Location {
    /// Creates a new `Location`.
    pub fn new(file: String, line: usize, column: usize) -> Self {
        Self { file, line, column }
    }

    /// A location that only names a file or directory.
    pub fn file(path: &Path) -> Self {
        Self::new(path.display().to_string(), 0, 0)
    }

    /// A location pointing at one record of a relation file.
    pub fn record(path: &Path, line: usize) -> Self {
        Self::new(path.display().to_string(), line, 1)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line, self.column) {
            (0, _) => write!(f, "{}", self.file),
            (line, 0) => write!(f, "{}:{}", self.file, line),
            (line, column) => write!(f, "{}:{}:{}", self.file, line, column),
        }
    }
}
