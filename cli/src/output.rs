/// cli/src/output.rs
/// Output utilities for the CLI
/// description: styled diagnostics on stderr and the relation summary table
/// printed by `factgraph stats`.

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};
use console::Style;
use factgraph_core::{FactGraphErrorExt, FactSet, Level, Location, NodeGraph, NodeSetPolicy};

/// ====================================================================
/// Reports

/// One diagnostic line shown to the user.
/// # Example
/// ```ignore
/// let report = Report::from_error(err.as_ref());
/// eprintln!("{}", report.pretty());
/// ```
#[derive(Debug, Clone)]
pub struct Report {
    pub message: String,
    pub level: Level,
    pub issuer: String,
    pub location: Option<Location>,
}

impl Report {
    pub fn from_error(error: &dyn FactGraphErrorExt) -> Self {
        Report {
            message: error.message(),
            level: error.level(),
            issuer: error.issuer(),
            location: error.location(),
        }
    }

    fn level_style(&self) -> Style {
        match self.level {
            Level::Critical => Style::new().for_stderr().on_red().white().bold(),
            Level::Error => Style::new().for_stderr().red().bold(),
            Level::Warning => Style::new().for_stderr().yellow().bold(),
            Level::Info => Style::new().for_stderr().blue().bold(),
        }
    }

    /// Render with console styling; colors are dropped when stderr is not a tty.
    pub fn pretty(&self) -> String {
        let mut out = format!(
            "{} {}",
            self.level_style().apply_to(format!("[{}]", self.level)),
            Style::new().for_stderr().bold().apply_to(&self.message)
        );
        if let Some(loc) = &self.location {
            out.push_str(&format!("\n --> {}", loc));
        }
        out.push_str(&format!("\n {}", Style::new().for_stderr().dim().apply_to(&self.issuer)));
        out
    }
}

/// Collects reports for one run and decides the exit code.
#[derive(Debug, Clone, Default)]
pub struct ReportCollector {
    pub reports: Vec<Report>,
}

impl ReportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, r: Report) {
        self.reports.push(r);
    }

    pub fn has_fatal(&self) -> bool {
        self.reports.iter().any(|r| r.level >= Level::Error)
    }

    /// 0 = success (warnings allowed), 1 = a fatal error was reported
    pub fn exit_code(&self) -> i32 {
        if self.has_fatal() { 1 } else { 0 }
    }

    pub fn print_all(&self) {
        for r in &self.reports {
            eprintln!("{}", r.pretty());
        }
    }
}

/// ====================================================================
/// Stats table

pub fn stats_table(input: &FactSet, output: &FactSet) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Side", "Relation", "Records"]);

    for (side, set) in [("input", input), ("output", output)] {
        for relation in &set.relations {
            table.add_row(vec![
                Cell::new(side),
                Cell::new(&relation.name),
                Cell::new(relation.len()).set_alignment(CellAlignment::Right),
            ]);
        }
    }
    table
}

pub fn graph_summary(graph: &NodeGraph) -> String {
    let counts = graph.counts();
    format!(
        "nodes: {}  (with text: {}, with input facts: {})\nedges: {}\ninput facts: {}\noutput facts: {}",
        graph.node_ids(NodeSetPolicy::Union).len(),
        counts.texts,
        graph.node_ids(NodeSetPolicy::InputFacts).len(),
        counts.edges,
        counts.input_facts,
        counts.output_facts
    )
}
