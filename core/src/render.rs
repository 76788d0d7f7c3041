//! file: core/src/render.rs
//! description: Graphviz DOT renderer for an aggregated `NodeGraph`.
//!
//! Each node becomes a rectangle whose label is an HTML-like table: the node
//! text, its sorted input facts and, when present, a separator row followed
//! by its sorted output facts. Edges from predecessors follow each block.

use html_escape::encode_text;
use std::fmt;

use crate::config::RenderConfig;
use crate::graph::{Fact, Importance, NodeGraph};

const HEADER: &str = r#"digraph G {
    rankdir = "TD"
    node [ shape = "rectangle" ]
"#;

impl Importance {
    fn style(&self) -> &'static str {
        match self {
            Self::High => r#" bgcolor="yellow""#,
            Self::Low => "",
        }
    }
}

/// Borrowed view that renders a `NodeGraph` as DOT through `Display`.
pub struct DotGraph<'a> {
    graph: &'a NodeGraph,
    config: &'a RenderConfig,
}

impl<'a> DotGraph<'a> {
    pub fn new(graph: &'a NodeGraph, config: &'a RenderConfig) -> Self {
        DotGraph { graph, config }
    }

    /// Label header text; falls back to the node id when no text was recorded.
    fn header_text(&self, node: &str) -> String {
        match self.graph.text(node) {
            Some(text) if self.config.label_node_ids => format!("{}: {}", node, text),
            Some(text) => text.to_string(),
            None => node.to_string(),
        }
    }

    fn write_facts(f: &mut fmt::Formatter<'_>, facts: &[Fact]) -> fmt::Result {
        let mut sorted: Vec<&Fact> = facts.iter().collect();
        sorted.sort();
        for fact in sorted {
            writeln!(
                f,
                "    <tr><td{}>{}</td></tr>",
                fact.importance.style(),
                encode_text(&fact.text)
            )?;
        }
        Ok(())
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, node: &str) -> fmt::Result {
        writeln!(f, r#"    {} [ label = <<table border="0">"#, node)?;
        writeln!(f, "    <tr><td>{}</td></tr>", encode_text(&self.header_text(node)))?;
        Self::write_facts(f, self.graph.input_facts(node))?;

        let output_facts = self.graph.output_facts(node);
        if !output_facts.is_empty() {
            writeln!(f, "    <tr><td>{}</td></tr>", encode_text(&self.config.separator))?;
            Self::write_facts(f, output_facts)?;
        }
        writeln!(f, "    </table>> ]")?;

        for pred in self.graph.predecessors(node) {
            writeln!(f, "    {} -> {}", pred, node)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for DotGraph<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", HEADER)?;
        for node in self.graph.node_ids(self.config.node_set) {
            self.write_node(f, node)?;
        }
        writeln!(f, "}}")
    }
}

pub fn render_dot(graph: &NodeGraph, config: &RenderConfig) -> String {
    DotGraph::new(graph, config).to_string()
}
