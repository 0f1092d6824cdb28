use std::fs;
use std::process::Command;
use std::sync::Arc;

use indoc::indoc;
use serde_json::Value;

use completion_cache::syntax::{CursorKind, NodeId, TranslationUnit};
use completion_cache::{AccessFilter, Cache, CacheConfig, CacheError, SyntaxTree};
use test_utils::syntax::fixtures::geometry_json;

const TREE: &str = indoc! {r#"
    {
      "nodes": [
        { "kind": "translation_unit", "children": [1, 5] },
        { "kind": "namespace", "spelling": "ns", "children": [2, 3] },
        {
          "kind": "function_decl",
          "spelling": "f",
          "completion": { "chunks": [
            { "kind": "typed_text", "text": "f" },
            { "kind": "text", "text": "(" },
            { "kind": "placeholder", "text": "int" },
            { "kind": "text", "text": ")" }
          ] }
        },
        { "kind": "class_decl", "spelling": "Base", "children": [4] },
        {
          "kind": { "cxx_method": { "is_static": true } },
          "spelling": "make",
          "access": "protected",
          "completion": { "chunks": [
            { "kind": "typed_text", "text": "make" },
            { "kind": "text", "text": "(" },
            { "kind": "text", "text": ")" },
            { "kind": "result_type", "text": "Base" }
          ] }
        },
        { "kind": "class_decl", "spelling": "Derived", "bases": [{ "class": 3, "access": "public" }] }
      ]
    }
"#};

fn cache() -> Cache {
    let tree = Arc::new(SyntaxTree::from_json_str(TREE).unwrap());
    let root = tree.root();
    Cache::new(tree, root).unwrap()
}

#[test]
fn test_tree_from_json() {
    let tree = SyntaxTree::from_json_str(TREE).unwrap();
    assert_eq!(tree.len(), 6);
    assert_eq!(tree.cursor(NodeId(4)).map(|c| c.kind), Some(CursorKind::CxxMethod { is_static: true }));
    assert_eq!(tree.base_classes(NodeId(5)).len(), 1);
}

#[test]
fn test_queries_over_json_tree() {
    let cache = cache();

    let ns = cache.complete_namespace(&["ns"]);
    assert_eq!(ns.at(0).unwrap().display(), "f(int)");
    assert_eq!(ns.at(0).unwrap().insert(), "f(${1:int})");

    let derived = cache.find_type(&[], "Derived").unwrap();
    let members = cache.complete_cursor(derived, AccessFilter::All);
    assert_eq!(members.len(), 1);
    let make = members.at(0).unwrap();
    assert_eq!(make.display(), "make()\tBase");
    assert!(make.is_static());
    assert!(make.is_base_class());

    assert!(cache.complete_cursor(derived, AccessFilter::PublicOnly).is_empty());
}

#[test]
fn test_root_must_be_translation_unit() {
    let json = r#"{ "nodes": [{ "kind": "namespace", "spelling": "ns" }] }"#;
    assert!(matches!(SyntaxTree::from_json_str(json), Err(CacheError::InvalidRoot(_))));
    assert!(matches!(SyntaxTree::from_json_str("{ nodes"), Err(CacheError::Json(_))));
}

#[test]
fn test_result_view_serializes_entries() {
    let cache = cache();
    let json = serde_json::to_value(cache.complete_namespace(&["ns"])).unwrap();
    assert_eq!(json[0]["display"], "f(int)");
    assert_eq!(json[0]["insert"], "f(${1:int})");
    assert_eq!(json[0]["is_static"], false);
    assert_eq!(json[0]["reference"]["node"], 2);
}

#[test]
fn test_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        indoc! {r#"
            {
              "index_inherited_members": false,
              "member_filter": "non-private"
            }
        "#},
    )
    .unwrap();

    let config = CacheConfig::load(&path).unwrap();
    assert!(!config.index_inherited_members);
    assert!(config.dedup_live_results);
    assert_eq!(config.member_filter, AccessFilter::NonPrivate);

    let tree = Arc::new(SyntaxTree::from_json_str(TREE).unwrap());
    let root = tree.root();
    let cache = Cache::with_config(tree, root, config).unwrap();
    let derived = cache.find_type(&[], "Derived").unwrap();
    assert!(cache.complete_cursor(derived, AccessFilter::All).is_empty());

    assert!(matches!(
        CacheConfig::load(dir.path().join("missing.json")),
        Err(CacheError::Io(_))
    ));
}

fn run_cli(args: &[&str]) -> Value {
    let output = Command::new(env!("CARGO_BIN_EXE_completion-cache"))
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_cli_queries() {
    let dir = tempfile::tempdir().unwrap();
    let tree_path = dir.path().join("geometry.json");
    fs::write(&tree_path, geometry_json()).unwrap();
    let tree = tree_path.to_str().unwrap();

    let members = run_cli(&["--tree", tree, "--log-level", "error", "members", "geo::Circle", "--filter", "public"]);
    let displays: Vec<_> = members
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["display"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        displays,
        vec!["area()\tdouble", "radius\tdouble", "describe()\tstd::string", "create(int)\tShape*"]
    );

    let found = run_cli(&["--tree", tree, "--log-level", "error", "find-type", "::geo::Point"]);
    assert!(found["node"].is_u64());

    let items = run_cli(&["--tree", tree, "--log-level", "error", "--lsp", "starts-with", "Sha"]);
    assert_eq!(items[0]["label"], "Shape");
    assert_eq!(items[0]["detail"], "class");
    assert_eq!(items[1]["label"], "Shape()");
}
