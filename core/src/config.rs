//! file: core/src/config.rs
//! description: render configuration and its JSON loader.
//!
//! `RenderConfig` names the special relations, the fact file extensions,
//! which relations to highlight and how to invoke the layout tool. Every
//! field has a default so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{impl_fact_graph_error, Level};
use crate::location::Location;

pub const ENV_LAYOUT_TOOL: &str = "FACTGRAPH_LAYOUT_TOOL";
pub const ENV_NO_LAYOUT: &str = "FACTGRAPH_NO_LAYOUT";

/// Which node ids get a block in the rendered graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeSetPolicy {
    /// Every node seen anywhere: text, input, output or either edge endpoint.
    #[default]
    Union,
    /// Only nodes owning at least one input fact.
    InputFacts,
    /// Only nodes with a node-text record.
    NodeText,
}

impl NodeSetPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "union" => Some(NodeSetPolicy::Union),
            "input_facts" => Some(NodeSetPolicy::InputFacts),
            "node_text" => Some(NodeSetPolicy::NodeText),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NodeSetPolicy::Union => "union",
            NodeSetPolicy::InputFacts => "input_facts",
            NodeSetPolicy::NodeText => "node_text",
        }
    }
}

impl fmt::Display for NodeSetPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_layout_tool")]
    pub tool: String,
    #[serde(default = "default_layout_format")]
    pub format: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            enabled: true,
            tool: default_layout_tool(),
            format: default_layout_format(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_node_text_relation")]
    pub node_text_relation: String,
    #[serde(default = "default_edge_relation")]
    pub edge_relation: String,
    #[serde(default = "default_input_extension")]
    pub input_extension: String,
    #[serde(default = "default_output_extension")]
    pub output_extension: String,
    #[serde(default = "default_important_relations")]
    pub important_relations: Vec<String>,
    #[serde(default = "default_separator")]
    pub separator: String,
    #[serde(default)]
    pub label_node_ids: bool,
    #[serde(default)]
    pub node_set: NodeSetPolicy,
    #[serde(default)]
    pub layout: LayoutConfig,
}

fn default_true() -> bool { true }
fn default_layout_tool() -> String { "dot".to_string() }
fn default_layout_format() -> String { "pdf".to_string() }
fn default_node_text_relation() -> String { "node_text".to_string() }
fn default_edge_relation() -> String { "cfg_edge".to_string() }
fn default_input_extension() -> String { "facts".to_string() }
fn default_output_extension() -> String { "csv".to_string() }
fn default_important_relations() -> Vec<String> { vec!["invalidated_origin_accessed".to_string()] }
fn default_separator() -> String { "-------------------".to_string() }

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            node_text_relation: default_node_text_relation(),
            edge_relation: default_edge_relation(),
            input_extension: default_input_extension(),
            output_extension: default_output_extension(),
            important_relations: default_important_relations(),
            separator: default_separator(),
            label_node_ids: false,
            node_set: NodeSetPolicy::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Load a config from a JSON file path. Missing fields take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<RenderConfig, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::at(path, format!("read config: {}", e)))?;
        Self::from_json(&raw).map_err(|e| ConfigError::at(path, e.message))
    }

    pub fn from_json(raw: &str) -> Result<RenderConfig, ConfigError> {
        let config: RenderConfig = serde_json::from_str(raw)
            .map_err(|e| ConfigError::new(format!("parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node_text_relation.trim().is_empty() || self.edge_relation.trim().is_empty() {
            return Err(ConfigError::new("relation names must not be empty".to_string()));
        }
        if self.node_text_relation == self.edge_relation {
            return Err(ConfigError::new(format!(
                "node text relation and edge relation are both '{}'",
                self.edge_relation
            )));
        }
        for ext in [&self.input_extension, &self.output_extension] {
            if ext.is_empty() || ext.starts_with('.') {
                return Err(ConfigError::new(format!(
                    "invalid fact file extension '{}' (expected e.g. 'facts', without a dot)",
                    ext
                )));
            }
        }
        if self.layout.tool.trim().is_empty() || self.layout.format.trim().is_empty() {
            return Err(ConfigError::new("layout tool and format must not be empty".to_string()));
        }
        Ok(())
    }

    /// Apply `FACTGRAPH_LAYOUT_TOOL` / `FACTGRAPH_NO_LAYOUT` from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(tool) = lookup(ENV_LAYOUT_TOOL).filter(|t| !t.trim().is_empty()) {
            self.layout.tool = tool;
        }
        if lookup(ENV_NO_LAYOUT).is_some() {
            self.layout.enabled = false;
        }
    }

    pub fn is_important(&self, relation: &str) -> bool {
        self.important_relations.iter().any(|r| r == relation)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigError {
    level: Level,
    message: String,
    issuer: String,
    location: Option<Location>,
}

impl ConfigError {
    pub fn new(message: String) -> Self {
        ConfigError {
            level: Level::Error,
            message,
            issuer: "factgraph.config".to_string(),
            location: None,
        }
    }

    pub fn at(path: &Path, message: String) -> Self {
        ConfigError {
            location: Some(Location::file(path)),
            ..Self::new(message)
        }
    }
}

impl_fact_graph_error!(ConfigError);
