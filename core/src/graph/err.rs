//! Error type for the node aggregator.
//!
//! Raised when a record does not have the shape its relation requires. The
//! location always points at the offending relation file and line.

use crate::error::{impl_fact_graph_error, Level};
use crate::facts::{FactRecord, Relation};
use crate::location::Location;

#[derive(Debug, Clone)]
pub struct AggregateError {
    level: Level,
    message: String,
    issuer: String,
    location: Option<Location>,
}

impl AggregateError {
    pub fn malformed(relation: &Relation, record: &FactRecord, reason: &str) -> Self {
        AggregateError {
            level: Level::Error,
            message: format!(
                "malformed record in relation '{}': {} (found {} field(s))",
                relation.name,
                reason,
                record.fields.len()
            ),
            issuer: "factgraph.graph".to_string(),
            location: Some(Location::record(&relation.path, record.line)),
        }
    }
}

impl_fact_graph_error!(AggregateError);
