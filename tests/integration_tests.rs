//! Integration tests for the mockgen frontend and tooling layer

use std::fs;
use std::path::Path;

use mockgen::ast::*;
use mockgen::{FileBuilder, ParseConfig, ProjectPathFinder, SyntaxFileBuilder, discover_sources};
use mockgen::project::ExplicitWorkspacePath;
use mockgen_core::lang::ownership::Ownership;

fn fixture(path: &str) -> String {
    fs::read_to_string(Path::new("tests/fixtures").join(path)).unwrap()
}

/// Test that all valid fixtures build without diagnostics
#[test]
fn test_valid_fixtures() {
    let sources = discover_sources(Path::new("tests/fixtures/valid"), &ParseConfig::default()).unwrap();
    assert!(!sources.is_empty());
    for file in &sources {
        let parsed = SyntaxFileBuilder::new().build(&file.source);
        assert!(
            parsed.diagnostics.is_empty(),
            "{} produced diagnostics: {:?}",
            file.path.display(),
            parsed.diagnostics
        );
    }
}

#[test]
fn test_invalid_member_is_reported_and_skipped() {
    let parsed = SyntaxFileBuilder::new().build(&fixture("invalid/broken_member.swift"));
    assert_eq!(parsed.diagnostics.len(), 1);
    let broken = parsed.node.type_declarations().next().unwrap();
    let names: Vec<_> = broken.function_declarations().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["ok", "alsoOk"]);
}

#[test]
fn test_service_fixture_members() {
    let parsed = SyntaxFileBuilder::new().build(&fixture("valid/service.swift"));
    let service = parsed.node.type_declarations().find(|t| t.name == "Service").unwrap();
    assert_eq!(service.kind, TypeDeclarationKind::Class);
    let inherited: Vec<_> = service.inherited_types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(inherited, ["NSObject", "Sendable"]);

    let vars: Vec<_> = service.variable_declarations().collect();
    let facts: Vec<_> = vars.iter().map(|v| (v.name.as_str(), v.is_writable, v.ownership)).collect();
    assert_eq!(
        facts,
        [
            ("delegate", true, Some(Ownership::Weak)),
            ("count", true, None),
            ("name", false, None),
            ("isReady", false, None),
        ]
    );

    let fetch = service.function_declarations().find(|f| f.name == "fetch").unwrap();
    assert!(fetch.throws);
    assert_eq!(fetch.return_type.as_ref().unwrap().kind, TypeKind::Dictionary);
}

#[test]
fn test_store_fixture_protocol_and_generic_struct() {
    let parsed = SyntaxFileBuilder::new().build(&fixture("valid/store.swift"));
    let kinds: Vec<_> = parsed.node.type_declarations().map(|t| (t.kind, t.name.as_str())).collect();
    assert_eq!(
        kinds,
        [
            (TypeDeclarationKind::Protocol, "Store"),
            (TypeDeclarationKind::Extension, "Store"),
            (TypeDeclarationKind::Struct, "Box"),
        ]
    );

    let store = &parsed.node.type_declarations().next().unwrap();
    let writable: Vec<_> = store.variable_declarations().map(|v| (v.name.as_str(), v.is_writable)).collect();
    assert_eq!(writable, [("values", true), ("count", false)]);
    let empty = store.function_declarations().find(|f| f.name == "empty").unwrap();
    assert!(empty.is_static);
    assert_eq!(empty.return_type.as_ref().unwrap().name, "Self");

    let boxed = parsed.node.type_declarations().nth(2).unwrap();
    let inherited: Vec<_> = boxed.inherited_types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(inherited, ["Store", "Sendable"]);
    let owner = boxed.variable_declarations().find(|v| v.name == "owner").unwrap();
    assert_eq!(owner.ownership, Some(Ownership::UnownedUnsafe));
    let on_change = boxed.variable_declarations().find(|v| v.name == "onChange").unwrap();
    assert!(on_change.is_writable);
    assert_eq!(on_change.type_annotation.as_ref().unwrap().kind, TypeKind::Optional);
}

#[test]
fn test_open_project_to_sources() {
    let root = fs::canonicalize("tests/fixtures").unwrap();
    let finder = ProjectPathFinder::new(ExplicitWorkspacePath::new(root.display().to_string()));
    let project = finder.find_open_project_path().unwrap();
    let sources = discover_sources(&project.source_root(), &ParseConfig::default()).unwrap();
    let names: Vec<_> = sources
        .iter()
        .map(|s| s.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["broken_member.swift", "service.swift", "store.swift"]);
}

#[test]
fn test_nesting_limit_from_config() {
    let source = "struct A { struct B { struct C { let x: Int } } }";
    let shallow = SyntaxFileBuilder::with_config(ParseConfig::new().with_max_nesting_depth(2)).build(source);
    assert!(shallow.has_errors());
    let deep = SyntaxFileBuilder::new().build(source);
    assert!(!deep.has_errors());
}
