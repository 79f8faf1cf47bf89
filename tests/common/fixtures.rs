use std::fs;
use std::path::{Path, PathBuf};

use eqlkit::analysis::SchemaScalar;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Load a test fixture from tests/fixtures/
pub fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Load a scalar catalogue fixture
pub fn load_schema(name: &str) -> Vec<SchemaScalar> {
    serde_json::from_str(&load_fixture(name))
        .unwrap_or_else(|e| panic!("Invalid schema fixture {}: {}", name, e))
}

/// Names of every .edgeql fixture
pub fn script_fixtures() -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(fixtures_dir())
        .expect("Failed to read fixtures directory")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("edgeql"))
        .filter_map(|path| path.file_name()?.to_str().map(str::to_string))
        .collect();
    names.sort();
    names
}
