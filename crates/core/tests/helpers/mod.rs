//! Test harness for directory-level mock generation.
//!
//! Copies a fixture directory into a temp dir so generated files never land in
//! the source tree.

pub mod fixtures;

use mockgen_core::scan::{generate_mock_in_dir, GeneratedMock, ScanError};
use mockgen_core::{load_mockgen_config, MockgenConfig};
use std::path::Path;
use tempfile::TempDir;

pub struct TestHarness {
    pub config: MockgenConfig,
    temp_dir: TempDir,
}

impl TestHarness {
    /// Create a harness from a named fixture directory.
    pub fn from_fixture(name: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let copied = fixtures::install_fixture(name, temp_dir.path());
        assert!(copied > 0, "Fixture '{name}' is empty");
        let config = load_mockgen_config(temp_dir.path());
        TestHarness { config, temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Generate the mock for `interface` into the default output file.
    pub fn generate(&self, interface: &str) -> Result<GeneratedMock, ScanError> {
        generate_mock_in_dir(self.root(), interface, &self.config, None)
    }
}
