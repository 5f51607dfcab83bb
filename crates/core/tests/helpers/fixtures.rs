//! Fixture lookup for integration tests. Fixture directories are flat: Go sources
//! plus an optional `.mockgen.toml`.

use std::path::{Path, PathBuf};

/// Absolute path of a named fixture directory.
pub fn fixture_dir(name: &str) -> PathBuf {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
    assert!(dir.is_dir(), "Fixture '{name}' not found at {}", dir.display());
    dir
}

/// Read one file of a fixture.
pub fn read_fixture(name: &str, file: &str) -> String {
    let path = fixture_dir(name).join(file);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
}

/// Copy every file of fixture `name` into `dst`, returning how many were copied.
pub fn install_fixture(name: &str, dst: &Path) -> usize {
    let entries = std::fs::read_dir(fixture_dir(name))
        .unwrap_or_else(|e| panic!("Failed to list fixture '{name}': {e}"));
    entries
        .map(|entry| entry.expect("Failed to read fixture entry").path())
        .filter(|path| path.is_file())
        .map(|path| {
            let file_name = path.file_name().expect("fixture entries have names");
            std::fs::copy(&path, dst.join(file_name))
                .unwrap_or_else(|e| panic!("Failed to copy {}: {e}", path.display()));
        })
        .count()
}
