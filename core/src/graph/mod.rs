//! file: core/src/graph/mod.rs
//! description: per-node aggregation of input and output facts.
//!
//! `NodeGraph` groups the records of both fact sets by the node id carried
//! in each record and derives the predecessor lists from the control-flow
//! edge relation. It is built once and only queried afterwards.

use itertools::Itertools;
use log::debug;
use std::collections::{BTreeSet, HashMap};

use crate::config::{NodeSetPolicy, RenderConfig};
use crate::facts::{FactSet, Relation};

mod err;

pub use err::AggregateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Importance {
    High,
    #[default]
    Low,
}

impl From<bool> for Importance {
    fn from(is_important: bool) -> Self {
        match is_important {
            true => Self::High,
            false => Self::Low,
        }
    }
}

/// A formatted `relation(field, ...)` attached to a node.
///
/// Ordering compares the text first, so sorting a node's facts sorts them
/// lexicographically by their rendered form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fact {
    pub text: String,
    pub importance: Importance,
}

impl Fact {
    pub fn new(relation: &str, atoms: &[String], importance: Importance) -> Self {
        Fact {
            text: format!("{}({})", relation, atoms.iter().join(", ")),
            importance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphCounts {
    pub texts: usize,
    pub input_facts: usize,
    pub output_facts: usize,
    pub edges: usize,
}

#[derive(Debug, Clone, Default)]
pub struct NodeGraph {
    node_texts: HashMap<String, String>,
    input_per_node: HashMap<String, Vec<Fact>>,
    output_per_node: HashMap<String, Vec<Fact>>,
    predecessors: HashMap<String, Vec<String>>,
}

impl NodeGraph {
    pub fn from_facts(
        input: &FactSet,
        output: &FactSet,
        config: &RenderConfig,
    ) -> Result<Self, AggregateError> {
        let mut graph = NodeGraph::default();

        for relation in &input.relations {
            if relation.name == config.node_text_relation {
                graph.add_node_texts(relation)?;
            } else if relation.name == config.edge_relation {
                graph.add_edges(relation)?;
            } else {
                let importance = config.is_important(&relation.name).into();
                add_facts(&mut graph.input_per_node, relation, importance)?;
            }
        }

        // No relation is special on the output side.
        for relation in &output.relations {
            let importance = config.is_important(&relation.name).into();
            add_facts(&mut graph.output_per_node, relation, importance)?;
        }

        debug!("aggregated {:?}", graph.counts());
        Ok(graph)
    }

    fn add_node_texts(&mut self, relation: &Relation) -> Result<(), AggregateError> {
        for record in &relation.records {
            let Some((node, text)) = record.fields.split_last() else {
                return Err(AggregateError::malformed(relation, record, "empty record"));
            };
            if text.is_empty() {
                return Err(AggregateError::malformed(relation, record, "node text record has no text"));
            }
            self.node_texts.insert(node.clone(), text.join("\t"));
        }
        Ok(())
    }

    fn add_edges(&mut self, relation: &Relation) -> Result<(), AggregateError> {
        for record in &relation.records {
            let [p, q] = record.fields.as_slice() else {
                return Err(AggregateError::malformed(
                    relation,
                    record,
                    "edge record must be exactly (predecessor, successor)",
                ));
            };
            self.predecessors.entry(q.clone()).or_default().push(p.clone());
        }
        Ok(())
    }

    /// The sorted, deduplicated node set selected by `policy`.
    pub fn node_ids(&self, policy: NodeSetPolicy) -> Vec<&str> {
        let ids: BTreeSet<&str> = match policy {
            NodeSetPolicy::InputFacts => self.input_per_node.keys().map(String::as_str).collect(),
            NodeSetPolicy::NodeText => self.node_texts.keys().map(String::as_str).collect(),
            NodeSetPolicy::Union => self
                .node_texts
                .keys()
                .chain(self.input_per_node.keys())
                .chain(self.output_per_node.keys())
                .chain(self.predecessors.keys())
                .chain(self.predecessors.values().flatten())
                .map(String::as_str)
                .collect(),
        };
        ids.into_iter().collect()
    }

    pub fn text(&self, node: &str) -> Option<&str> {
        self.node_texts.get(node).map(String::as_str)
    }

    pub fn input_facts(&self, node: &str) -> &[Fact] {
        self.input_per_node.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn output_facts(&self, node: &str) -> &[Fact] {
        self.output_per_node.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Predecessors of `node` in the order their edges were read.
    pub fn predecessors(&self, node: &str) -> &[String] {
        self.predecessors.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn counts(&self) -> GraphCounts {
        GraphCounts {
            texts: self.node_texts.len(),
            input_facts: self.input_per_node.values().map(Vec::len).sum(),
            output_facts: self.output_per_node.values().map(Vec::len).sum(),
            edges: self.predecessors.values().map(Vec::len).sum(),
        }
    }
}

// Except the edge relation, every relation carries its node as the last atom.
fn add_facts(
    per_node: &mut HashMap<String, Vec<Fact>>,
    relation: &Relation,
    importance: Importance,
) -> Result<(), AggregateError> {
    for record in &relation.records {
        let Some((node, atoms)) = record.fields.split_last() else {
            return Err(AggregateError::malformed(relation, record, "empty record"));
        };
        per_node
            .entry(node.clone())
            .or_default()
            .push(Fact::new(&relation.name, atoms, importance));
    }
    Ok(())
}
