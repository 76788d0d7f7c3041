//! Error type for the fact loader.
//!
//! `LoadError` is returned when a fact directory cannot be scanned or one of
//! its relation files cannot be read. It implements `FactGraphErrorExt` for
//! unified diagnostic reporting.

use std::path::Path;

use crate::error::{impl_fact_graph_error, Level};
use crate::location::Location;

const ISSUER: &str = "factgraph.facts";

#[derive(Debug, Clone)]
pub struct LoadError {
    level: Level,
    message: String,
    issuer: String,
    location: Option<Location>,
}

impl LoadError {
    pub fn with(level: Level, message: String, issuer: String, location: Option<Location>) -> Self {
        LoadError {
            level,
            message,
            issuer,
            location,
        }
    }

    pub fn missing_directory(dir: &Path) -> Self {
        Self::with(
            Level::Error,
            format!("fact directory '{}' does not exist or is not a directory", dir.display()),
            ISSUER.to_string(),
            Some(Location::file(dir)),
        )
    }

    pub fn non_utf8_path(path: &Path) -> Self {
        Self::with(
            Level::Error,
            format!("path '{}' is not valid UTF-8", path.display()),
            ISSUER.to_string(),
            Some(Location::file(path)),
        )
    }

    pub fn bad_pattern(pattern: &str, reason: impl std::fmt::Display) -> Self {
        Self::with(
            Level::Error,
            format!("invalid relation pattern '{}': {}", pattern, reason),
            ISSUER.to_string(),
            None,
        )
    }

    pub fn unreadable(path: &Path, reason: impl std::fmt::Display) -> Self {
        Self::with(
            Level::Error,
            format!("could not read relation file '{}': {}", path.display(), reason),
            ISSUER.to_string(),
            Some(Location::file(path)),
        )
    }
}

impl_fact_graph_error!(LoadError);
