use factgraph_core::facts::{load_fact_set, FactRecord};
use factgraph_core::FactGraphErrorExt;
use std::fs;

#[test]
fn loads_relations_by_stem_and_splits_on_tabs() {
    let td = tempfile::tempdir().expect("tempdir");
    let dir = td.path();
    fs::write(dir.join("assign.facts"), "x\t1\tN1\ny\t2\tN2\n").expect("write assign");
    fs::write(dir.join("node_text.facts"), "start node\tN1\n").expect("write node_text");
    // other extensions are ignored
    fs::write(dir.join("live.csv"), "x\tN1\n").expect("write csv");

    let set = load_fact_set(dir, "facts").expect("load");
    let names: Vec<&str> = set.relations.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["assign", "node_text"]);

    let assign = set.relation("assign").expect("assign relation");
    assert_eq!(assign.len(), 2, "trailing newline must not add a record");
    assert_eq!(assign.records[0].fields, vec!["x", "1", "N1"]);
    assert_eq!(assign.records[1].line, 2);
    assert_eq!(set.record_count(), 3);
}

#[test]
fn empty_relation_file_has_no_records() {
    let td = tempfile::tempdir().expect("tempdir");
    fs::write(td.path().join("cfg_edge.facts"), "").expect("write");

    let set = load_fact_set(td.path(), "facts").expect("load");
    let edges = set.relation("cfg_edge").expect("relation present");
    assert!(edges.is_empty());
}

#[test]
fn blank_line_parses_to_zero_fields() {
    let record = FactRecord::parse("", 4);
    assert!(record.fields.is_empty());
    assert_eq!(record.line, 4);

    let record = FactRecord::parse("a\t\tb", 1);
    assert_eq!(record.fields, vec!["a", "", "b"]);
}

#[test]
fn missing_directory_is_an_error() {
    let td = tempfile::tempdir().expect("tempdir");
    let missing = td.path().join("nope");

    let err = load_fact_set(&missing, "facts").expect_err("missing dir must fail");
    assert!(err.is_fatal());
    assert!(err.message().contains("does not exist"), "got: {}", err);
    assert_eq!(err.issuer(), "factgraph.facts");
}

#[test]
fn directory_with_glob_metacharacters_is_scanned_literally() {
    let td = tempfile::tempdir().expect("tempdir");
    let dir = td.path().join("run[1]");
    fs::create_dir(&dir).expect("mkdir");
    fs::write(dir.join("assign.facts"), "x\tN1\n").expect("write");

    let set = load_fact_set(&dir, "facts").expect("load");
    assert_eq!(set.relations.len(), 1);
}
