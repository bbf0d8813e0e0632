//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::Path;

use serde::Serialize;

use mockgen_syntax::ast::*;
use mockgen_syntax::diagnostics::SyntaxError;
use mockgen_syntax::{FileBuilder, IndexedFileBuilder, ParseConfig, Parsed, SyntaxFileBuilder, lexer, parser};

use crate::discovery;
use crate::outline::{OutlineOptions, render_outline_with};
use crate::project::{EnvWorkspacePath, ExplicitWorkspacePath, OPEN_PROJECT_ENV, ProjectPathFinder, WorkspacePathSource};

use super::{CliError, CliResult, ExitCode};

/// Parser configuration with CLI overrides applied.
pub fn parse_config(max_depth: Option<usize>) -> ParseConfig {
    match max_depth {
        Some(depth) => ParseConfig::new().with_max_nesting_depth(depth),
        None => ParseConfig::new(),
    }
}

/// Read a source file, refusing anything over the configured size.
pub fn read_source(path: &Path, config: &ParseConfig) -> CliResult<String> {
    discovery::read_source(path, config).map_err(|e| CliError::failure(format!("Error: {}", e)))
}

/// Render diagnostics against their source through miette's graphical handler.
pub fn format_diagnostics(name: &str, source: &str, diagnostics: &[SyntaxError]) -> String {
    let mut out = String::new();
    for err in diagnostics {
        let report = miette::Report::new(err.with_source(name, source.to_string()));
        out.push_str(&format!("{:?}\n", report));
    }
    out
}

/// Print diagnostics to stderr and pick the exit code.
fn finish(name: &str, source: &str, diagnostics: &[SyntaxError]) -> ExitCode {
    if diagnostics.is_empty() {
        return ExitCode::SUCCESS;
    }
    eprint!("{}", format_diagnostics(name, source, diagnostics));
    ExitCode::DIAGNOSTICS
}

/// Build a file's element tree, from the grammars or from a structure index.
pub fn build_tree(source: &str, index: Option<&Path>, config: ParseConfig) -> CliResult<Parsed<File>> {
    match index {
        Some(index_path) => {
            let json = fs::read_to_string(index_path).map_err(|e| {
                CliError::failure(format!("Error reading index '{}': {}", index_path.display(), e))
            })?;
            let builder = IndexedFileBuilder::from_json(&json)
                .map_err(|e| CliError::failure(format!("Error: {}: {}", index_path.display(), e)))?
                .with_config(config);
            Ok(builder.build(source))
        }
        None => Ok(SyntaxFileBuilder::with_config(config).build(source)),
    }
}

/// Print the outline of one file.
pub fn outline_file(
    file: &Path,
    index: Option<&Path>,
    spans: bool,
    declarations_only: bool,
    config: ParseConfig,
) -> CliResult<ExitCode> {
    let source = read_source(file, &config)?;
    let parsed = build_tree(&source, index, config)?;
    let options = OutlineOptions {
        spans,
        declarations_only,
    };
    print!("{}", render_outline_with(&parsed.node, options));
    Ok(finish(&file.display().to_string(), &source, &parsed.diagnostics))
}

/// Parse a single type identifier.
pub fn parse_type_text(text: &str, config: ParseConfig) -> CliResult<ExitCode> {
    match parser::parse_type_with(text, config) {
        Ok(ty) => {
            println!("{}\t{:?}\t{}..{}", ty.name, ty.kind, ty.span.start, ty.span.end);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Err(CliError::new(
            format_diagnostics("<type>", text, std::slice::from_ref(&err)).trim_end(),
            ExitCode::DIAGNOSTICS,
        )),
    }
}

/// Lex and display tokens.
pub fn dump_tokens(file: &Path, config: ParseConfig) -> CliResult<ExitCode> {
    let source = read_source(file, &config)?;
    let (tokens, diagnostics) = lexer::lex_lossy(&source);
    for tok in &tokens {
        let newline = if tok.newline_before { " \u{21b5}" } else { "" };
        println!("{}..{}\t{:?}{}", tok.span.start, tok.span.end, tok.kind, newline);
    }
    Ok(finish(&file.display().to_string(), &source, &diagnostics))
}

/// Declaration counts for one scanned file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub path: String,
    pub types: usize,
    pub functions: usize,
    pub variables: usize,
    pub subscripts: usize,
    pub diagnostics: usize,
}

impl<'ast> Visitor<'ast> for FileSummary {
    fn visit_type_declaration(&mut self, _decl: &'ast TypeDeclaration) {
        self.types += 1;
    }

    fn visit_function_declaration(&mut self, _decl: &'ast FunctionDeclaration) {
        self.functions += 1;
    }

    fn visit_variable_declaration(&mut self, _decl: &'ast VariableDeclaration) {
        self.variables += 1;
    }

    fn visit_subscript_declaration(&mut self, _decl: &'ast SubscriptDeclaration) {
        self.subscripts += 1;
    }
}

/// Count the declarations in one parsed file.
pub fn summarize(path: impl Into<String>, parsed: &Parsed<File>) -> FileSummary {
    let mut summary = FileSummary {
        path: path.into(),
        diagnostics: parsed.diagnostics.len(),
        ..FileSummary::default()
    };
    parsed.node.accept(&mut summary);
    summary
}

/// Resolve the open project, discover its sources and summarize each file.
pub fn scan_project(project: Option<String>, json: bool, config: ParseConfig) -> CliResult<ExitCode> {
    let source: Box<dyn WorkspacePathSource> = match project {
        Some(path) => Box::new(ExplicitWorkspacePath::new(path)),
        None => Box::new(EnvWorkspacePath::default()),
    };
    let project = ProjectPathFinder::new(source).find_open_project_path().ok_or_else(|| {
        CliError::failure(format!(
            "Error: no open project (pass an absolute path or set {})",
            OPEN_PROJECT_ENV
        ))
    })?;
    let root = project.source_root();
    tracing::info!(project = %project.path, kind = ?project.kind, "scanning project");

    let sources = discovery::discover_sources(&root, &config).map_err(|e| CliError::failure(format!("Error: {}", e)))?;
    let builder = SyntaxFileBuilder::with_config(config);
    let summaries: Vec<FileSummary> = sources
        .iter()
        .map(|file| {
            let relative = file.path.strip_prefix(&root).unwrap_or(&file.path);
            summarize(relative.display().to_string(), &builder.build(&file.source))
        })
        .collect();

    if json {
        let rendered = serde_json::to_string_pretty(&summaries)
            .map_err(|e| CliError::failure(format!("Error serializing summary: {}", e)))?;
        println!("{}", rendered);
    } else {
        for summary in &summaries {
            println!(
                "{}: {} types, {} functions, {} variables, {} subscripts",
                summary.path, summary.types, summary.functions, summary.variables, summary.subscripts
            );
            if summary.diagnostics > 0 {
                println!("  {} diagnostics", summary.diagnostics);
            }
        }
    }

    if summaries.iter().any(|s| s.diagnostics > 0) {
        Ok(ExitCode::DIAGNOSTICS)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
