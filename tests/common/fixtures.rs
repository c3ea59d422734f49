use std::fs;
use std::path::{Path, PathBuf};

/// The tests/fixtures/ directory
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a test fixture from tests/fixtures/
pub fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).expect(&format!("Failed to load fixture: {}", name))
}

/// The AST dump next to a Python fixture: `name.py` -> `name.ast.json`
pub fn ast_path(source: &Path) -> PathBuf {
    source.with_extension("ast.json")
}

/// Discover all .py fixtures that have an AST dump next to them
pub fn discover_fixtures() -> Vec<PathBuf> {
    let mut fixtures: Vec<PathBuf> = fs::read_dir(fixtures_dir())
        .expect("Failed to read fixtures directory")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("py"))
        .filter(|path| ast_path(path).exists())
        .collect();
    fixtures.sort();
    fixtures
}
