//! Swift source discovery under a project's source root.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use mockgen_syntax::ParseConfig;

const SWIFT_EXTENSION: &str = "swift";

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to walk '{root}': {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{path}' is too large ({len} bytes, max {max} bytes)")]
    TooLarge { path: PathBuf, len: u64, max: usize },
}

/// A discovered source file and its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub source: String,
}

/// Return `true` for paths with a `.swift` extension.
pub fn is_swift_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(SWIFT_EXTENSION)
}

/// Recursively list `.swift` files under `root`, sorted.
pub fn discover_swift_files(root: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|source| DiscoveryError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() || !is_swift_file(entry.path()) {
            continue;
        }
        files.push(entry.into_path());
    }
    files.sort();
    Ok(files)
}

/// Read one source file, refusing anything over `config.max_source_len`.
pub fn read_source(path: &Path, config: &ParseConfig) -> Result<String, DiscoveryError> {
    let metadata = fs::metadata(path).map_err(|source| DiscoveryError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let fits = usize::try_from(metadata.len()).is_ok_and(|len| config.accepts_source_len(len));
    if !fits {
        return Err(DiscoveryError::TooLarge {
            path: path.to_path_buf(),
            len: metadata.len(),
            max: config.max_source_len,
        });
    }
    fs::read_to_string(path).map_err(|source| DiscoveryError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Discover and read every `.swift` file under `root`.
///
/// Unreadable or oversized files are skipped with a warning; only a failure to walk `root` is an error.
#[tracing::instrument(skip_all, fields(root = %root.display()))]
pub fn discover_sources(root: &Path, config: &ParseConfig) -> Result<Vec<SourceFile>, DiscoveryError> {
    let mut sources = Vec::new();
    for path in discover_swift_files(root)? {
        match read_source(&path, config) {
            Ok(source) => sources.push(SourceFile { path, source }),
            Err(err) => tracing::warn!(error = %err, "skipping source file"),
        }
    }
    tracing::debug!(count = sources.len(), "discovered swift sources");
    Ok(sources)
}
