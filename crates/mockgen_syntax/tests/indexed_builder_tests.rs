//! Index-backed construction: properties, functions, subscripts and bad entries.

use mockgen_core::lang::ownership::Ownership;
use mockgen_syntax::ast::*;
use mockgen_syntax::index::WEAK_ATTRIBUTE;
use mockgen_syntax::{ErrorKind, FileBuilder, IndexedFileBuilder};
use serde_json::{Value, json};

const OWNER: &str = r#"class Owner {
    weak var delegate: Delegate?
    unowned(safe) var parent: Parent
    var plain: Int
    let constant: String = "x"
    var inferred = 0
    func fetch(id: Int, _ retries: Int = 3) throws -> Data {}
    static func make() -> Owner { Owner() }
    subscript(index: Int) -> String { get set }
}
"#;

fn at(text: &str) -> (usize, usize) {
    let start = OWNER.find(text).unwrap_or_else(|| panic!("{:?} not in fixture", text));
    (start, text.len())
}

/// Entry whose range starts at `decl` (the keyword) and covers `decl` exactly.
fn entry(kind: &str, name: &str, decl: &str, extra: Value) -> Value {
    let (offset, length) = at(decl);
    let mut value = json!({
        "key.kind": format!("source.lang.swift.decl.{}", kind),
        "key.name": name,
        "key.offset": offset,
        "key.length": length,
    });
    if let (Some(map), Value::Object(extra)) = (value.as_object_mut(), extra) {
        map.extend(extra);
    }
    value
}

fn weak() -> Value {
    json!([{ "key.attribute": WEAK_ATTRIBUTE }])
}

fn settable() -> &'static str {
    "source.lang.swift.accessibility.internal"
}

fn build(members: Vec<Value>) -> mockgen_syntax::Parsed<File> {
    let (offset, length) = at(OWNER.trim_end());
    let index = json!({
        "key.substructure": [{
            "key.kind": "source.lang.swift.decl.class",
            "key.name": "Owner",
            "key.offset": offset,
            "key.length": length,
            "key.nameoffset": offset + 6,
            "key.namelength": 5,
            "key.substructure": members,
        }]
    });
    IndexedFileBuilder::from_json(&index.to_string()).unwrap().build(OWNER)
}

fn owner(file: &File) -> &TypeDeclaration {
    file.type_declarations().next().unwrap()
}

#[test]
fn test_property_facts_come_from_index() {
    let parsed = build(vec![
        entry("var.instance", "delegate", "var delegate: Delegate?", json!({
            "key.typename": "Delegate?",
            "key.setter_accessibility": settable(),
            "key.attributes": weak(),
        })),
        entry("var.instance", "parent", "var parent: Parent", json!({
            "key.typename": "Parent",
            "key.setter_accessibility": settable(),
            "key.attributes": weak(),
        })),
        entry("var.instance", "plain", "var plain: Int", json!({
            "key.typename": "Int",
            "key.setter_accessibility": settable(),
        })),
        entry("var.instance", "constant", "let constant: String = \"x\"", json!({ "key.typename": "String" })),
        entry("var.instance", "inferred", "var inferred = 0", json!({})),
    ]);
    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);

    let vars: Vec<_> = owner(&parsed.node).variable_declarations().collect();
    assert_eq!(vars.len(), 5);

    assert_eq!(vars[0].name, "delegate");
    assert_eq!(vars[0].type_name, "Delegate?");
    assert!(vars[0].is_writable);
    assert_eq!(vars[0].ownership, Some(Ownership::Weak));
    assert_eq!(vars[0].type_annotation.as_ref().map(|t| t.name.as_str()), Some("Delegate?"));

    assert_eq!(vars[1].ownership, Some(Ownership::UnownedSafe));
    assert_eq!(vars[2].ownership, None);
    assert!(vars[2].is_writable);

    assert_eq!(vars[3].type_name, "String");
    assert!(!vars[3].is_writable);

    assert_eq!(vars[4].type_name, "");
    assert!(vars[4].type_annotation.is_none());
}

#[test]
fn test_ownership_rescan_requires_weak_attribute() {
    // Without the attribute the text before the declaration is not consulted.
    let parsed = build(vec![entry("var.instance", "delegate", "var delegate: Delegate?", json!({
        "key.typename": "Delegate?",
    }))]);
    let var = owner(&parsed.node).variable_declarations().next().unwrap();
    assert_eq!(var.ownership, None);
}

#[test]
fn test_functions_and_subscripts_use_grammar_internals() {
    let fetch_text = "func fetch(id: Int, _ retries: Int = 3) throws -> Data {}";
    let make_text = "func make() -> Owner { Owner() }";
    let parsed = build(vec![
        entry("function.method.instance", "fetch(id:_:)", fetch_text, json!({})),
        entry("function.method.static", "make()", make_text, json!({})),
        entry("function.subscript", "subscript(_:)", "subscript(index: Int) -> String { get set }", json!({})),
    ]);
    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
    let owner = owner(&parsed.node);

    let funcs: Vec<_> = owner.function_declarations().collect();
    assert_eq!(funcs[0].name, "fetch");
    assert_eq!(funcs[0].text, fetch_text);
    assert!(funcs[0].throws);
    assert_eq!(funcs[0].parameters.len(), 2);
    assert_eq!(funcs[0].parameters[1].default_value.as_deref(), Some("3"));
    assert_eq!(funcs[0].return_type.as_ref().map(|t| t.name.as_str()), Some("Data"));
    assert!(!funcs[0].is_static);

    assert_eq!(funcs[1].name, "make");
    assert!(funcs[1].is_static);

    let subscript = owner.subscript_declarations().next().unwrap();
    assert!(subscript.is_writable);
    assert_eq!(subscript.parameters[0].local_name, "index");
}

#[test]
fn test_inherited_types_parsed_between_name_and_body() {
    let source = "protocol Store: AnyObject, Sendable where Self: Actor {\n}\n";
    let index = json!({
        "key.substructure": [{
            "key.kind": "source.lang.swift.decl.protocol",
            "key.name": "Store",
            "key.offset": 0,
            "key.length": source.trim_end().len(),
            "key.nameoffset": 9,
            "key.namelength": 5,
            "key.bodyoffset": source.find('{').unwrap() + 1,
            "key.bodylength": 1,
        }]
    });
    let parsed = IndexedFileBuilder::from_json(&index.to_string()).unwrap().build(source);
    let store = parsed.node.type_declarations().next().unwrap();
    let names: Vec<_> = store.inherited_types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["AnyObject", "Sendable"]);
    assert_eq!(store.inherited_types[0].text, "AnyObject");
}

#[test]
fn test_invalid_range_is_skipped_with_diagnostic() {
    let parsed = build(vec![
        json!({
            "key.kind": "source.lang.swift.decl.var.instance",
            "key.name": "ghost",
            "key.offset": OWNER.len() - 2,
            "key.length": 50,
        }),
        entry("var.instance", "plain", "var plain: Int", json!({ "key.typename": "Int" })),
    ]);
    assert_eq!(parsed.diagnostics.len(), 1);
    assert_eq!(parsed.diagnostics[0].kind, ErrorKind::InvalidRange);
    let names: Vec<_> = owner(&parsed.node).variable_declarations().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["plain"]);
}

#[test]
fn test_unmodelled_kinds_are_skipped() {
    let parsed = build(vec![
        entry("var.local", "tmp", "var plain: Int", json!({})),
        json!({ "key.kind": "source.lang.swift.expr.call", "key.name": "Owner", "key.offset": 0, "key.length": 1 }),
    ]);
    assert!(parsed.diagnostics.is_empty());
    assert!(owner(&parsed.node).members.is_empty());
}

#[test]
fn test_malformed_json() {
    assert!(IndexedFileBuilder::from_json("not json").is_err());
}
