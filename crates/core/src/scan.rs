//! Directory-level driver: find the file declaring an interface and write its mock.

use ignore::WalkBuilder;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::MockgenError;
use crate::synth::synthesize_with;
use crate::types::{MockgenConfig, TypeData};

/// Failures of the directory driver. Extraction errors are wrapped with the file
/// they came from; [`MockgenError::DeclarationNotFound`] never surfaces here on its
/// own, it only moves the search on to the next file.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no Go file in {dir} declares interface {name}")]
    NotFound { dir: PathBuf, name: String },

    #[error("{path}: {source}")]
    Extract {
        path: PathBuf,
        #[source]
        source: MockgenError,
    },
}

/// The file an interface was found in, with its extracted data.
#[derive(Debug, Clone)]
pub struct FoundInterface {
    pub path: PathBuf,
    pub data: TypeData,
}

/// Result of [`generate_mock_in_dir`].
#[derive(Debug, Clone)]
pub struct GeneratedMock {
    pub source_path: PathBuf,
    pub output_path: PathBuf,
    pub data: TypeData,
    pub text: String,
}

/// Go files directly inside `dir`, sorted by name. Test files and previously
/// generated mocks are skipped.
pub fn go_source_files(dir: &Path, config: &MockgenConfig) -> Vec<PathBuf> {
    WalkBuilder::new(dir)
        .max_depth(Some(1))
        .hidden(true)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .filter(|path| {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            name.ends_with(".go")
                && !name.ends_with("_test.go")
                && !name.ends_with(config.file_suffix.as_str())
        })
        .collect()
}

/// Find the first file (in name order) declaring interface `name`.
///
/// Files are read and parsed in parallel, but results are judged in name order: the
/// first success wins, and the first non-recoverable error aborts the search.
pub fn find_interface_in_dir(
    dir: &Path,
    name: &str,
    config: &MockgenConfig,
) -> Result<FoundInterface, ScanError> {
    let files = go_source_files(dir, config);
    debug!(dir = %dir.display(), candidates = files.len(), "Scanning for interface");

    let results: Vec<(PathBuf, std::io::Result<crate::Result<TypeData>>)> = files
        .into_par_iter()
        .map(|path| {
            let result = fs::read_to_string(&path).map(|source| crate::extract(&source, name));
            (path, result)
        })
        .collect();

    for (path, result) in results {
        match result {
            Err(source) => return Err(ScanError::Read { path, source }),
            Ok(Ok(data)) => {
                info!(file = %path.display(), interface = name, "Found interface");
                return Ok(FoundInterface { path, data });
            }
            Ok(Err(e)) if e.is_recoverable() => {
                debug!(file = %path.display(), "Interface not declared here");
            }
            Ok(Err(source)) => return Err(ScanError::Extract { path, source }),
        }
    }

    Err(ScanError::NotFound { dir: dir.to_path_buf(), name: name.to_string() })
}

/// Find interface `name` in `dir`, render its mock and write it to `out`, or to
/// [`MockgenConfig::output_file_name`] inside `dir` when `out` is `None`.
pub fn generate_mock_in_dir(
    dir: &Path,
    name: &str,
    config: &MockgenConfig,
    out: Option<&Path>,
) -> Result<GeneratedMock, ScanError> {
    let found = find_interface_in_dir(dir, name, config)?;
    let text = synthesize_with(name, &found.data, &config.style());

    let output_path = match out {
        Some(path) => path.to_path_buf(),
        None => dir.join(config.output_file_name(name)),
    };
    fs::write(&output_path, &text)
        .map_err(|source| ScanError::Write { path: output_path.clone(), source })?;

    info!(
        interface = name,
        output = %output_path.display(),
        methods = found.data.methods.len(),
        "Mock written"
    );

    Ok(GeneratedMock { source_path: found.path, output_path, data: found.data, text })
}
