pub mod config;
pub mod error;
pub mod facts;
pub mod graph;
pub mod layout;
pub mod location;
pub mod render;

use log::{debug, info};
use std::path::{Path, PathBuf};

pub use config::{LayoutConfig, NodeSetPolicy, RenderConfig};
pub use error::{FactGraphErrorExt, Level, WriteError};
pub use facts::{load_fact_set, FactSet};
pub use graph::NodeGraph;
pub use layout::{LayoutError, LayoutInvoker};
pub use location::Location;
pub use render::{render_dot, DotGraph};

/// Subdirectory of a fact root holding the input facts.
pub const INPUT_FACTS_DIR: &str = "facts";
/// Subdirectory of a fact root holding the analysis output.
pub const OUTPUT_FACTS_DIR: &str = "output";

/// Load both fact directories, eagerly and in full.
pub fn load_fact_sets(
    input_dir: &Path,
    output_dir: &Path,
    config: &RenderConfig,
) -> Result<(FactSet, FactSet), Box<dyn FactGraphErrorExt>> {
    let input = load_fact_set(input_dir, &config.input_extension)?;
    let output = load_fact_set(output_dir, &config.output_extension)?;
    Ok((input, output))
}

pub fn build_graph(
    input_dir: &Path,
    output_dir: &Path,
    config: &RenderConfig,
) -> Result<NodeGraph, Box<dyn FactGraphErrorExt>> {
    let (input, output) = load_fact_sets(input_dir, output_dir, config)?;
    Ok(NodeGraph::from_facts(&input, &output, config)?)
}

/// Render the graph for two fact directories as a DOT document.
pub fn generate_graph(
    input_dir: &Path,
    output_dir: &Path,
    config: &RenderConfig,
) -> Result<String, Box<dyn FactGraphErrorExt>> {
    let graph = build_graph(input_dir, output_dir, config)?;
    Ok(render_dot(&graph, config))
}

/// Name-only output paths are placed inside the fact root.
pub fn resolve_output_path(fact_root: &Path, output: &Path) -> PathBuf {
    if output.components().count() == 1 {
        fact_root.join(output)
    } else {
        output.to_path_buf()
    }
}

#[derive(Debug)]
pub struct GraphArtifact {
    /// The DOT file that was written.
    pub document: PathBuf,
    /// The image produced by the layout tool, if it ran successfully.
    pub rendered: Option<PathBuf>,
    /// Why layout failed; the document is still valid when this is set.
    pub layout_error: Option<LayoutError>,
}

/// Render `<fact_root>/facts` + `<fact_root>/output` into `output`, then lay it out.
pub fn create_graph(
    fact_root: &Path,
    output: &Path,
    config: &RenderConfig,
) -> Result<GraphArtifact, Box<dyn FactGraphErrorExt>> {
    let document = resolve_output_path(fact_root, output);
    let dot = generate_graph(
        &fact_root.join(INPUT_FACTS_DIR),
        &fact_root.join(OUTPUT_FACTS_DIR),
        config,
    )?;

    std::fs::write(&document, dot).map_err(|e| WriteError::new(&document, e))?;
    info!("wrote {}", document.display());

    let mut artifact = GraphArtifact {
        document,
        rendered: None,
        layout_error: None,
    };
    if config.layout.enabled {
        match LayoutInvoker::from_config(&config.layout).run(&artifact.document) {
            Ok(path) => artifact.rendered = Some(path),
            Err(e) => {
                debug!("layout failed, keeping {}", artifact.document.display());
                artifact.layout_error = Some(e);
            }
        }
    }
    Ok(artifact)
}
