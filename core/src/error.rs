use std::fmt;

use crate::location::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level_str = match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        };
        write!(f, "{}", level_str)
    }
}

/// Common diagnostic surface shared by every error the pipeline can raise.
///
/// Loader, aggregator, config and layout errors all implement this so the
/// CLI can report them uniformly without knowing the concrete type.
pub trait FactGraphErrorExt {
    fn level(&self) -> Level;
    fn message(&self) -> String;
    fn issuer(&self) -> String;
    fn location(&self) -> Option<Location>;

    /// Fatal errors abort the run; anything below `Error` is only reported.
    fn is_fatal(&self) -> bool {
        self.level() >= Level::Error
    }
}

impl fmt::Debug for dyn FactGraphErrorExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loc_str = match self.location() {
            Some(loc) => loc.to_string(),
            None => "unknown".to_string(),
        };

        write!(
            f,
            "FACTGRAPH | {} | {} | {} | {}",
            self.level(),
            loc_str,
            self.issuer(),
            self.message()
        )
    }
}

impl fmt::Display for dyn FactGraphErrorExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Implements `Display`, `Error`, `FactGraphErrorExt` and the boxing
/// conversion for a module error struct with the usual
/// `level`/`message`/`issuer`/`location` fields.
macro_rules! impl_fact_graph_error {
    ($ty:ty) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let loc_str = match &self.location {
                    Some(loc) => loc.to_string(),
                    None => "unknown".to_string(),
                };
                write!(
                    f,
                    "FACTGRAPH | {} | {} | {} | {}",
                    self.level, loc_str, self.issuer, self.message
                )
            }
        }

        impl std::error::Error for $ty {}

        impl $crate::error::FactGraphErrorExt for $ty {
            fn level(&self) -> $crate::error::Level {
                self.level
            }

            fn message(&self) -> String {
                self.message.clone()
            }

            fn issuer(&self) -> String {
                self.issuer.clone()
            }

            fn location(&self) -> Option<$crate::location::Location> {
                self.location.clone()
            }
        }

        impl From<$ty> for Box<dyn $crate::error::FactGraphErrorExt> {
            fn from(err: $ty) -> Self {
                Box::new(err)
            }
        }
    };
}

pub(crate) use impl_fact_graph_error;

/// Failure to write the rendered document to its destination.
#[derive(Debug, Clone)]
pub struct WriteError {
    level: Level,
    message: String,
    issuer: String,
    location: Option<Location>,
}

impl WriteError {
    pub fn new(path: &std::path::Path, reason: impl fmt::Display) -> Self {
        WriteError {
            level: Level::Error,
            message: format!("could not write graph to '{}': {}", path.display(), reason),
            issuer: "factgraph.write".to_string(),
            location: Some(Location::file(path)),
        }
    }
}

impl_fact_graph_error!(WriteError);
