//! Every Python fixture with an AST dump must survive py2xml -> xml2py

mod common;

use std::fs;

use common::fixtures::{ast_path, discover_fixtures, load_fixture};
use pyxml::{py2xml, to_tree, xml2py, ConvertOptions};

#[test]
fn test_all_fixtures_round_trip() {
    let fixtures = discover_fixtures();

    assert!(
        !fixtures.is_empty(),
        "No .py fixtures found! Check tests/fixtures/ directory."
    );

    let mut failures = Vec::new();

    for path in &fixtures {
        let source = fs::read_to_string(path).expect(&format!("Failed to read {:?}", path));
        let ast = fs::read_to_string(ast_path(path))
            .expect(&format!("Failed to read AST dump for {:?}", path));

        let restored = py2xml(&source, &ast).and_then(|xml| xml2py(&xml));
        match restored {
            Ok(restored) if restored == source => {
                println!("✓ Round-trip: {}", path.display());
            }
            Ok(restored) => {
                eprintln!("✗ Restored source differs: {}", path.display());
                failures.push((path.clone(), format!("got {:?}", restored)));
            }
            Err(err) => {
                eprintln!("✗ Failed to convert: {}", path.display());
                eprintln!("  Error: {}", err);
                failures.push((path.clone(), err.to_string()));
            }
        }
    }

    if !failures.is_empty() {
        panic!(
            "\n{} out of {} fixtures failed to round-trip:\n{}",
            failures.len(),
            fixtures.len(),
            failures
                .iter()
                .map(|(path, err)| format!("  - {}: {}", path.display(), err))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}

#[test]
fn test_fixtures_need_no_fallback() {
    for path in discover_fixtures() {
        let source = fs::read_to_string(&path).expect("Failed to read fixture");
        let ast = fs::read_to_string(ast_path(&path)).expect("Failed to read AST dump");
        let conversion = to_tree(&source, &ast, ConvertOptions::strict())
            .unwrap_or_else(|e| panic!("{}: {}", path.display(), e));
        assert!(conversion.is_lossless(), "{}", path.display());
    }
}

#[test]
fn test_function_fixture_structure() {
    let source = load_fixture("functions.py");
    let ast = load_fixture("functions.ast.json");
    let conversion = to_tree(&source, &ast, ConvertOptions::default()).expect("conversion");
    let tree = conversion.tree;

    let names: Vec<&str> = tree
        .find_all("FunctionDef")
        .into_iter()
        .filter_map(|f| f.attribute("name"))
        .collect();
    assert_eq!(names, vec!["fetch", "inner", "outer", "bump"]);

    let fetch = tree.find("FunctionDef").expect("fetch");
    assert_eq!(fetch.find("vararg").and_then(|e| e.attribute("name")), Some("args"));
    assert_eq!(fetch.find("kwarg").and_then(|e| e.attribute("name")), Some("options"));
    assert_eq!(
        fetch.find("decorator_list").map(|e| e.find_all("Call").len()),
        Some(1)
    );
}

#[test]
fn test_basics_fixture_keeps_comments_in_place() {
    let source = load_fixture("basics.py");
    let ast = load_fixture("basics.ast.json");
    let conversion = to_tree(&source, &ast, ConvertOptions::default()).expect("conversion");

    let list = conversion.tree.find("List").expect("numbers list");
    assert!(list.text().contains("# three"));
    let assign = conversion
        .tree
        .find_all("AugAssign")
        .into_iter()
        .find(|e| e.text().contains("tab before"))
        .expect("AugAssign with comment");
    assert!(assign.text().starts_with("mask\t|="));
}

#[test]
fn test_fixture_dumps_are_module_roots() {
    for path in discover_fixtures() {
        let ast = fs::read_to_string(ast_path(&path)).expect("Failed to read AST dump");
        let value: serde_json::Value = serde_json::from_str(&ast).expect("valid JSON");
        assert_eq!(value["_type"], "Module", "{}", path.display());
        assert!(value["body"].is_array(), "{}", path.display());
    }
}
