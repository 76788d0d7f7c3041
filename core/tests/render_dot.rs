use factgraph_core::facts::{FactSet, Relation};
use factgraph_core::{render_dot, NodeGraph, NodeSetPolicy, RenderConfig};
use std::path::PathBuf;

fn relation(name: &str, content: &str) -> Relation {
    Relation::from_source(name, PathBuf::from(format!("{}.facts", name)), content)
}

fn fact_set(relations: Vec<Relation>) -> FactSet {
    FactSet {
        directory: PathBuf::new(),
        relations,
    }
}

fn sample_graph() -> NodeGraph {
    let input = fact_set(vec![
        relation("node_text", "start node\tN1\nnext\tN2\n"),
        relation("assign", "x\t1\tN1\n"),
        relation("cfg_edge", "N1\tN2\n"),
    ]);
    let output = fact_set(vec![relation("live", "x\tN1\n")]);
    NodeGraph::from_facts(&input, &output, &RenderConfig::default()).expect("aggregate")
}

#[test]
fn renders_the_documented_example_exactly() {
    let dot = render_dot(&sample_graph(), &RenderConfig::default());
    let expected = r#"digraph G {
    rankdir = "TD"
    node [ shape = "rectangle" ]

    N1 [ label = <<table border="0">
    <tr><td>start node</td></tr>
    <tr><td>assign(x, 1)</td></tr>
    <tr><td>-------------------</td></tr>
    <tr><td>live(x)</td></tr>
    </table>> ]

    N2 [ label = <<table border="0">
    <tr><td>next</td></tr>
    </table>> ]
    N1 -> N2

}
"#;
    assert_eq!(dot, expected);
}

#[test]
fn rendering_is_deterministic() {
    let config = RenderConfig::default();
    let first = render_dot(&sample_graph(), &config);
    let second = render_dot(&sample_graph(), &config);
    assert_eq!(first, second);
}

#[test]
fn facts_are_sorted_and_separator_only_with_output() {
    let input = fact_set(vec![
        relation("node_text", "n\tA\n"),
        relation("use", "z\tA\n"),
        relation("assign", "y\tA\nb\tA\n"),
    ]);
    let output = fact_set(vec![relation("live", "q\tA\np\tA\n")]);
    let graph = NodeGraph::from_facts(&input, &output, &RenderConfig::default()).expect("aggregate");
    let dot = render_dot(&graph, &RenderConfig::default());

    let rows: Vec<&str> = dot
        .lines()
        .filter(|l| l.trim_start().starts_with("<tr>"))
        .collect();
    assert_eq!(
        rows,
        vec![
            "    <tr><td>n</td></tr>",
            "    <tr><td>assign(b)</td></tr>",
            "    <tr><td>assign(y)</td></tr>",
            "    <tr><td>use(z)</td></tr>",
            "    <tr><td>-------------------</td></tr>",
            "    <tr><td>live(p)</td></tr>",
            "    <tr><td>live(q)</td></tr>",
        ]
    );

    let no_output = NodeGraph::from_facts(&input, &FactSet::default(), &RenderConfig::default())
        .expect("aggregate");
    assert!(!render_dot(&no_output, &RenderConfig::default()).contains("-------------------"));
}

#[test]
fn nodes_are_emitted_in_ascending_order() {
    let input = fact_set(vec![relation("node_text", "c\tN3\na\tN1\nb\tN2\n")]);
    let graph = NodeGraph::from_facts(&input, &FactSet::default(), &RenderConfig::default())
        .expect("aggregate");
    let dot = render_dot(&graph, &RenderConfig::default());

    let positions: Vec<usize> = ["N1 [", "N2 [", "N3 ["]
        .iter()
        .map(|n| dot.find(n).expect("node block"))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn each_edge_renders_once_in_the_successor_block() {
    let input = fact_set(vec![
        relation("node_text", "p\tP\nq\tQ\n"),
        relation("assign", "a\tP\nb\tP\nc\tQ\n"),
        relation("cfg_edge", "P\tQ\n"),
    ]);
    let graph = NodeGraph::from_facts(&input, &FactSet::default(), &RenderConfig::default())
        .expect("aggregate");
    let dot = render_dot(&graph, &RenderConfig::default());

    assert_eq!(dot.matches("P -> Q").count(), 1);
    let q_block = dot.find("Q [").expect("Q block");
    assert!(dot.find("P -> Q").expect("edge") > q_block);
}

#[test]
fn markup_characters_are_escaped() {
    let input = fact_set(vec![
        relation("node_text", "a < b && c\tN1\n"),
        relation("cmp", "x<y\tN1\n"),
    ]);
    let graph = NodeGraph::from_facts(&input, &FactSet::default(), &RenderConfig::default())
        .expect("aggregate");
    let dot = render_dot(&graph, &RenderConfig::default());

    assert!(dot.contains("<tr><td>a &lt; b &amp;&amp; c</td></tr>"), "got:\n{}", dot);
    assert!(dot.contains("<tr><td>cmp(x&lt;y)</td></tr>"), "got:\n{}", dot);
}

#[test]
fn missing_text_falls_back_to_node_id() {
    let input = fact_set(vec![relation("assign", "x\tN7\n")]);
    let graph = NodeGraph::from_facts(&input, &FactSet::default(), &RenderConfig::default())
        .expect("aggregate");
    let dot = render_dot(&graph, &RenderConfig::default());

    assert!(dot.contains("    N7 [ label = <<table border=\"0\">\n    <tr><td>N7</td></tr>\n"));
}

#[test]
fn output_only_and_edge_only_nodes_depend_on_policy() {
    let input = fact_set(vec![
        relation("node_text", "t\tN1\n"),
        relation("assign", "x\tN2\n"),
        relation("cfg_edge", "N0\tN1\n"),
    ]);
    let output = fact_set(vec![relation("live", "x\tN3\n")]);
    let graph = NodeGraph::from_facts(&input, &output, &RenderConfig::default()).expect("aggregate");

    let render_with = |policy| {
        let config = RenderConfig {
            node_set: policy,
            ..RenderConfig::default()
        };
        render_dot(&graph, &config)
    };

    let union = render_with(NodeSetPolicy::Union);
    for node in ["N0 [", "N1 [", "N2 [", "N3 ["] {
        assert!(union.contains(node), "union is missing {}", node);
    }

    let by_input = render_with(NodeSetPolicy::InputFacts);
    assert!(by_input.contains("N2 [") && !by_input.contains("N1 [") && !by_input.contains("N3 ["));

    let by_text = render_with(NodeSetPolicy::NodeText);
    assert!(by_text.contains("N1 [") && !by_text.contains("N2 ["));
    assert!(by_text.contains("N0 -> N1"));
}

#[test]
fn important_facts_are_highlighted() {
    let output = fact_set(vec![relation("invalidated_origin_accessed", "'a\tN1\n")]);
    let graph = NodeGraph::from_facts(&FactSet::default(), &output, &RenderConfig::default())
        .expect("aggregate");
    let dot = render_dot(&graph, &RenderConfig::default());

    assert!(dot.contains(r#"<tr><td bgcolor="yellow">invalidated_origin_accessed('a)</td></tr>"#), "got:\n{}", dot);
}

#[test]
fn label_node_ids_prefixes_text() {
    let config = RenderConfig {
        label_node_ids: true,
        separator: "~~~".to_string(),
        ..RenderConfig::default()
    };
    let dot = render_dot(&sample_graph(), &config);
    assert!(dot.contains("<tr><td>N1: start node</td></tr>"));
    assert!(dot.contains("<tr><td>~~~</td></tr>"));
}
