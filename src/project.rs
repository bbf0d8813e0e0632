//! Open-project path resolution.
//!
//! Something outside mockgen knows which project the user has open (an editor, a wrapper script, the
//! command line). A [`WorkspacePathSource`] reports that raw path; [`ProjectPathFinder`] decides whether it is
//! usable and what kind of project it names.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable consulted when no project is passed on the command line.
pub const OPEN_PROJECT_ENV: &str = "MOCKGEN_OPEN_PROJECT";

const WORKSPACE_EXTENSION: &str = "xcworkspace";
const PROJECT_EXTENSION: &str = "xcodeproj";

/// Reports the path of the currently open workspace or project, if any.
pub trait WorkspacePathSource {
    fn find_open_workspace_path(&self) -> Option<String>;
}

impl<S: WorkspacePathSource + ?Sized> WorkspacePathSource for Box<S> {
    fn find_open_workspace_path(&self) -> Option<String> {
        (**self).find_open_workspace_path()
    }
}

/// A path given explicitly, e.g. as a CLI argument.
#[derive(Debug, Clone, Default)]
pub struct ExplicitWorkspacePath(pub Option<String>);

impl ExplicitWorkspacePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(Some(path.into()))
    }
}

impl WorkspacePathSource for ExplicitWorkspacePath {
    fn find_open_workspace_path(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Reads the path from an environment variable ([`OPEN_PROJECT_ENV`] by default).
#[derive(Debug, Clone)]
pub struct EnvWorkspacePath {
    var: String,
}

impl EnvWorkspacePath {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvWorkspacePath {
    fn default() -> Self {
        Self::new(OPEN_PROJECT_ENV)
    }
}

impl WorkspacePathSource for EnvWorkspacePath {
    fn find_open_workspace_path(&self) -> Option<String> {
        env::var(&self.var).ok().filter(|value| !value.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    Workspace,
    Project,
    Directory,
}

/// A resolved, absolute project location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPath {
    pub path: String,
    pub kind: ProjectKind,
}

impl ProjectPath {
    /// Directory whose Swift sources belong to the project.
    ///
    /// Workspace and project bundles sit next to their sources, so the bundle's parent is used.
    pub fn source_root(&self) -> PathBuf {
        let path = Path::new(&self.path);
        match self.kind {
            ProjectKind::Directory => path.to_path_buf(),
            ProjectKind::Workspace | ProjectKind::Project => {
                path.parent().map(Path::to_path_buf).unwrap_or_else(|| path.to_path_buf())
            }
        }
    }
}

/// Validates what a [`WorkspacePathSource`] reports.
#[derive(Debug, Clone, Default)]
pub struct ProjectPathFinder<S> {
    source: S,
}

impl<S: WorkspacePathSource> ProjectPathFinder<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Return the open project, or `None` when nothing is open or the reported path is not absolute.
    pub fn find_open_project_path(&self) -> Option<ProjectPath> {
        let raw = self.source.find_open_workspace_path()?;
        let trimmed = raw.trim();
        let path = match trimmed.trim_end_matches('/') {
            "" => trimmed,
            stripped => stripped,
        };
        if !Path::new(path).is_absolute() {
            tracing::debug!(path, "ignoring relative project path");
            return None;
        }

        let kind = match Path::new(path).extension().and_then(|ext| ext.to_str()) {
            Some(WORKSPACE_EXTENSION) => ProjectKind::Workspace,
            Some(PROJECT_EXTENSION) => ProjectKind::Project,
            _ => ProjectKind::Directory,
        };
        Some(ProjectPath {
            path: path.to_string(),
            kind,
        })
    }
}
