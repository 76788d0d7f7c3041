//! file: core/src/layout.rs
//! description: external graph layout invocation.
//!
//! Runs a Graphviz-compatible tool (`dot` by default) on a written DOT file
//! using the `-T<format> -O <file>` convention, which writes the image next
//! to the input as `<file>.<format>`. Failures here are warnings: the DOT
//! document is already on disk and is never touched.

use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::LayoutConfig;
use crate::error::{impl_fact_graph_error, Level};
use crate::location::Location;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutInvoker {
    tool: String,
    format: String,
}

impl LayoutInvoker {
    pub fn new(tool: &str, format: &str) -> Self {
        LayoutInvoker {
            tool: tool.to_string(),
            format: format.to_string(),
        }
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(&config.tool, &config.format)
    }

    /// Path the tool will write for `document` under `-O`.
    pub fn artifact_path(&self, document: &Path) -> PathBuf {
        let mut name = document.as_os_str().to_owned();
        name.push(".");
        name.push(&self.format);
        PathBuf::from(name)
    }

    pub fn command(&self, exe: &Path, document: &Path) -> Command {
        let mut cmd = Command::new(exe);
        cmd.arg(format!("-T{}", self.format));
        cmd.arg("-O");
        cmd.arg(document);
        cmd
    }

    /// Lay out `document`, blocking until the tool exits.
    pub fn run(&self, document: &Path) -> Result<PathBuf, LayoutError> {
        let exe = which::which(&self.tool)
            .map_err(|e| LayoutError::new(document, format!("layout tool '{}' not found: {}", self.tool, e)))?;
        debug!("running {} -T{} -O {}", exe.display(), self.format, document.display());

        let output = self
            .command(&exe, document)
            .output()
            .map_err(|e| LayoutError::new(document, format!("spawn '{}': {}", exe.display(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LayoutError::new(
                document,
                format!("'{}' exited with {}: {}", self.tool, output.status, stderr.trim()),
            ));
        }

        let artifact = self.artifact_path(document);
        info!("rendered {}", artifact.display());
        Ok(artifact)
    }
}

#[derive(Debug, Clone)]
pub struct LayoutError {
    level: Level,
    message: String,
    issuer: String,
    location: Option<Location>,
}

impl LayoutError {
    pub fn new(document: &Path, message: String) -> Self {
        LayoutError {
            level: Level::Warning,
            message,
            issuer: "factgraph.layout".to_string(),
            location: Some(Location::file(document)),
        }
    }
}

impl_fact_graph_error!(LayoutError);
