#[cfg(test)]
/// Parser unit tests.
///
/// These cover the type, self-expression, function, subscript and accessor grammars on their own, and the
/// whole-file grammar including recovery from malformed members.
mod tests {
    use super::*;

    fn ty(source: &str) -> TypeIdentifier {
        parse_type(source).unwrap_or_else(|e| panic!("failed to parse type {:?}: {}", source, e))
    }

    fn ty_name(source: &str) -> String {
        ty(source).name
    }

    // ========================================================================
    // Types
    // ========================================================================

    #[test]
    fn test_plain_and_dotted_names() {
        assert_eq!(ty_name("Type"), "Type");
        assert_eq!(ty_name("Swift.Deep.Nested.Type"), "Swift.Deep.Nested.Type");
        assert_eq!(ty_name("T.Type"), "T.Type");
        assert_eq!(ty_name("Any"), "Any");
        assert_eq!(ty_name("Self"), "Self");
    }

    #[test]
    fn test_generics() {
        let generic = ty("Generic<Type>");
        assert_eq!(generic.name, "Generic<Type>");
        assert_eq!(generic.kind, TypeKind::Named);
        assert_eq!(generic.children.len(), 1);
        assert_eq!(generic.children[0].name, "Type");

        assert_eq!(ty_name("Generic|Type>"), "Generic");
        assert_eq!(ty_name("Generic<"), "Generic<");
        assert_eq!(ty_name("Generic< >"), "Generic<>");
        assert_eq!(ty_name("Generic<A, B>"), "Generic<A, B>");
        assert_eq!(ty_name("Generic<A,B>"), "Generic<A, B>");
        assert_eq!(
            ty_name("Dictionary<String, Array<Optional<Set<Int>>>>"),
            "Dictionary<String, Array<Optional<Set<Int>>>>"
        );
        assert_eq!(
            ty_name("Result< Swift.Array<[String: Int?]>, Error >"),
            "Result<Swift.Array<[String:Int?]>, Error>"
        );
    }

    #[test]
    fn test_span_is_consumed_text_only() {
        let parsed = ty("A < B,C > next element");
        assert_eq!(parsed.name, "A<B, C>");
        assert_eq!(parsed.span, Span::new(0, 9));
        assert_eq!(parsed.text, "A < B,C >");
    }

    #[test]
    fn test_generic_that_is_not_a_clause_ends_the_type() {
        assert_eq!(ty_name("Generic<0>"), "Generic");
    }

    #[test]
    fn test_array_sugar() {
        assert_eq!(ty_name("[Int]"), "[Int]");
        assert_eq!(ty("[Int]").kind, TypeKind::Array);
        assert_eq!(ty_name("[]"), "[]");
        assert_eq!(ty_name("[[[Int]]]"), "[[[Int]]]");
    }

    #[test]
    fn test_array_wrong_terminator_fails() {
        let err = parse_type("[Type)").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
    }

    #[test]
    fn test_dictionary_sugar() {
        let dict = ty("[A:B]");
        assert_eq!(dict.name, "[A:B]");
        assert_eq!(dict.kind, TypeKind::Dictionary);
        assert_eq!(dict.children.len(), 2);

        assert_eq!(ty_name("[A.B.C:D.E.F]"), "[A.B.C:D.E.F]");
        assert_eq!(ty_name("[[Int]:[String]]"), "[[Int]:[String]]");
        assert_eq!(ty_name("[String: Int]?"), "[String:Int]?");
    }

    #[test]
    fn test_optional_and_iuo_suffixes() {
        assert_eq!(ty_name("[Int?]?"), "[Int?]?");
        assert_eq!(ty_name("[[String?:Int?]?:Int?]?"), "[[String?:Int?]?:Int?]?");
        assert_eq!(ty_name("Int??"), "Int??");
        assert_eq!(ty_name("Int!!"), "Int!!");
        assert_eq!(ty_name("[[String!:Int!]!:Int!]!"), "[[String!:Int!]!:Int!]!");

        let optional = ty("Int?");
        assert_eq!(optional.kind, TypeKind::Optional);
        assert_eq!(optional.children[0].name, "Int");
        assert_eq!(ty("Int!").kind, TypeKind::ImplicitlyUnwrapped);
    }

    #[test]
    fn test_protocol_composition() {
        let composed = ty("A & B");
        assert_eq!(composed.name, "A & B");
        assert_eq!(composed.kind, TypeKind::Composition);
        assert_eq!(composed.children.len(), 2);

        assert_eq!(ty_name("A &"), "A");
        assert_eq!(ty_name("A & 0"), "A");
        assert_eq!(ty_name("A | B"), "A");
        assert_eq!(ty_name("A & B & C & D"), "A & B & C & D");
        assert_eq!(ty_name("A & B | C"), "A & B");
        assert_eq!(ty_name("A & B & 0"), "A & B & ");
        assert_eq!(ty_name("A & B?"), "A & B?");
    }

    #[test]
    fn test_empty_input_is_empty_type() {
        assert_eq!(parse_type("").unwrap_err().kind, ErrorKind::EmptyType);
        assert_eq!(parse_type("  \n ").unwrap_err().kind, ErrorKind::EmptyType);
    }

    #[test]
    fn test_tuple_and_function_types() {
        let tuple = ty("(Int, String)");
        assert_eq!(tuple.name, "(Int, String)");
        assert_eq!(tuple.kind, TypeKind::Tuple);
        assert_eq!(ty_name("(x: Int, y: Int)"), "(x: Int, y: Int)");
        assert_eq!(ty_name("()"), "()");

        let function = ty("(Int) throws -> Bool");
        assert_eq!(function.name, "(Int) throws -> Bool");
        assert_eq!(function.kind, TypeKind::Function);
        assert_eq!(function.children.len(), 2);
        assert_eq!(ty_name("() async -> Void"), "() async -> Void");
        assert_eq!(ty_name("((Int) -> Void)?"), "((Int) -> Void)?");
        assert_eq!(ty_name("(inout Int, String...) -> Void"), "(inout Int, String...) -> Void");
    }

    #[test]
    fn test_some_and_any_prefixes() {
        let opaque = ty("some Collection");
        assert_eq!(opaque.name, "some Collection");
        assert_eq!(opaque.kind, TypeKind::Prefixed);
        assert_eq!(ty_name("any P & Q"), "any P & Q");
        // A type that happens to be called `some`.
        assert_eq!(ty_name("some"), "some");
    }

    #[test]
    fn test_nesting_limit_fails_closed() {
        let deep = format!("{}Int{}", "[".repeat(200), "]".repeat(200));
        assert_eq!(parse_type(&deep).unwrap_err().kind, ErrorKind::RecursionLimit);

        let shallow = ParseConfig::default().with_max_nesting_depth(2);
        assert_eq!(
            parse_type_with("[[Int]]", shallow).unwrap_err().kind,
            ErrorKind::RecursionLimit
        );
        let enough = ParseConfig::default().with_max_nesting_depth(3);
        assert_eq!(parse_type_with("[[Int]]", enough).unwrap().name, "[[Int]]");
    }

    #[test]
    fn test_prefix_chain_fails_closed() {
        let chain = format!("{}P", "some ".repeat(200_000));
        assert_eq!(parse_type(&chain).unwrap_err().kind, ErrorKind::RecursionLimit);

        let short = parse_type("some any P").unwrap();
        assert_eq!(short.name, "some any P");
        assert_eq!(short.kind, TypeKind::Prefixed);
    }

    #[test]
    fn test_suffix_chain_counts_against_nesting_limit() {
        let chain = format!("Int{}", "?".repeat(200_000));
        assert_eq!(parse_type(&chain).unwrap_err().kind, ErrorKind::RecursionLimit);

        let config = ParseConfig::default().with_max_nesting_depth(4);
        assert_eq!(parse_type_with("Int???", config).unwrap().name, "Int???");
        assert_eq!(
            parse_type_with("Int????", config).unwrap_err().kind,
            ErrorKind::RecursionLimit
        );
    }

    // ========================================================================
    // Self expressions
    // ========================================================================

    #[test]
    fn test_self_expressions() {
        let cases = [
            ("self", SelfExpressionKind::Bare, "self"),
            ("self.identifier", SelfExpressionKind::Method, "self.identifier"),
            ("self.init", SelfExpressionKind::Initializer, "self.init"),
            ("self[a: expr, ++]", SelfExpressionKind::Subscript, "self[a: expr, ++]"),
            ("self[a: expr", SelfExpressionKind::Subscript, "self[a: expr"),
            ("self[]", SelfExpressionKind::Subscript, "self[]"),
            ("self expr]", SelfExpressionKind::Bare, "self"),
        ];
        for (source, kind, text) in cases {
            let expr = parse_self_expression(source).unwrap();
            assert_eq!(expr.kind, kind, "kind of {:?}", source);
            assert_eq!(expr.text, text, "text of {:?}", source);
        }
    }

    #[test]
    fn test_self_expression_requires_self() {
        assert!(parse_self_expression("super.foo").is_err());
    }

    // ========================================================================
    // Functions
    // ========================================================================

    #[test]
    fn test_function_signature() {
        let parsed = parse_function_declaration("func f(a: Int, _ b: String) throws -> Bool where T: X {}").unwrap();
        assert!(!parsed.has_errors());
        let func = parsed.node;
        assert_eq!(func.name, "f");
        assert!(func.throws);
        assert_eq!(func.return_type.as_ref().map(|t| t.name.as_str()), Some("Bool"));
        assert_eq!(func.text, "func f(a: Int, _ b: String) throws -> Bool where T: X");

        assert_eq!(func.parameters.len(), 2);
        let a = &func.parameters[0];
        assert_eq!(a.external_name, None);
        assert_eq!(a.local_name, "a");
        assert_eq!(a.ty.name, "Int");
        assert_eq!(a.argument_label(), Some("a"));
        assert_eq!(a.text, "a: Int");

        let b = &func.parameters[1];
        assert_eq!(b.external_name.as_deref(), Some("_"));
        assert_eq!(b.local_name, "b");
        assert_eq!(b.argument_label(), None);
    }

    #[test]
    fn test_function_without_result_or_throws() {
        let func = parse_function_declaration("func g()").unwrap().node;
        assert_eq!(func.name, "g");
        assert!(func.parameters.is_empty());
        assert!(func.return_type.is_none());
        assert!(!func.throws);
        assert!(!func.is_static);
    }

    #[test]
    fn test_static_generic_rethrows() {
        let func = parse_function_declaration("static func make<T: Decodable>(from data: Data) rethrows -> T")
            .unwrap()
            .node;
        assert!(func.is_static);
        assert!(!func.throws);
        assert_eq!(func.parameters[0].external_name.as_deref(), Some("from"));
        assert_eq!(func.parameters[0].local_name, "data");
        assert_eq!(func.return_type.unwrap().name, "T");
    }

    #[test]
    fn test_async_throws() {
        let func = parse_function_declaration("func load() async throws -> [Item]").unwrap().node;
        assert!(func.throws);
        assert_eq!(func.return_type.unwrap().name, "[Item]");
    }

    #[test]
    fn test_operator_and_initializer_names() {
        let eq = parse_function_declaration("static func ==(lhs: Foo, rhs: Foo) -> Bool").unwrap().node;
        assert_eq!(eq.name, "==");
        assert_eq!(eq.parameters.len(), 2);

        let lt = parse_function_declaration("func <(lhs: A, rhs: A) -> Bool").unwrap().node;
        assert_eq!(lt.name, "<");

        let init = parse_function_declaration("init?(rawValue: String)").unwrap().node;
        assert_eq!(init.name, "init?");
        assert!(init.return_type.is_none());

        let convenience = parse_function_declaration("public convenience init(name: String)").unwrap().node;
        assert_eq!(convenience.name, "init");
    }

    #[test]
    fn test_keyword_labels() {
        let func = parse_function_declaration("func f(in: Int, for key: String)").unwrap().node;
        assert_eq!(func.parameters[0].local_name, "in");
        assert_eq!(func.parameters[1].external_name.as_deref(), Some("for"));
        assert_eq!(func.parameters[1].local_name, "key");
    }

    #[test]
    fn test_parameter_attributes_variadic_and_defaults() {
        let func = parse_function_declaration(
            "func f(_ values: Int..., handler: @escaping (Int) -> Void = { _ in }, count: inout [Int])",
        )
        .unwrap()
        .node;
        assert_eq!(func.parameters.len(), 3);
        assert!(func.parameters[0].variadic);
        assert_eq!(func.parameters[1].ty.name, "(Int) -> Void");
        assert_eq!(func.parameters[1].ty.kind, TypeKind::Function);
        assert_eq!(func.parameters[1].default_value.as_deref(), Some("{ _ in }"));
        assert_eq!(func.parameters[2].ty.name, "[Int]");
        assert_eq!(func.parameters[2].default_value, None);
    }

    #[test]
    fn test_bad_parameter_is_reported_and_skipped() {
        let parsed = parse_function_declaration("func f(a: Int, 0, b: String)").unwrap();
        assert_eq!(parsed.diagnostics.len(), 1);
        assert!(parsed.diagnostics[0].message.contains("Expected parameter name"));
        let names: Vec<_> = parsed.node.parameters.iter().map(|p| p.local_name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_missing_function_name_fails() {
        assert!(parse_function_declaration("func (x: Int)").is_err());
    }

    // ========================================================================
    // Subscripts and accessor blocks
    // ========================================================================

    #[test]
    fn test_subscript_with_keyword_block() {
        let sub = parse_subscript_declaration("subscript(index: Int) -> String { get set }").unwrap().node;
        assert_eq!(sub.parameters.len(), 1);
        assert_eq!(sub.return_type.as_ref().map(|t| t.name.as_str()), Some("String"));
        assert!(sub.is_writable);
        assert_eq!(sub.accessors.as_ref().map(|b| b.text.as_str()), Some("{ get set }"));

        let read_only = parse_subscript_declaration("subscript(key: String) -> Int { get }").unwrap().node;
        assert!(!read_only.is_writable);
        assert!(read_only.accessors.is_some());
    }

    #[test]
    fn test_subscript_with_getter_body_is_read_only() {
        let sub = parse_subscript_declaration("subscript(i: Int) -> Int { return i }").unwrap().node;
        assert!(!sub.is_writable);
        assert!(sub.accessors.is_none());
        assert!(sub.text.ends_with("{ return i }"));
    }

    #[test]
    fn test_subscript_without_keyword() {
        let sub = parse_subscript_declaration("<T>(key: Key<T>) -> T? { get }").unwrap().node;
        assert_eq!(sub.return_type.unwrap().name, "T?");
    }

    #[test]
    fn test_getter_setter_blocks() {
        let cases = [
            ("{ get set }", true),
            ("{ set get }", true),
            ("{ get }", false),
            ("{ set }", true),
            ("{}", false),
            ("{ @inlinable get }", false),
            ("{ mutating get nonmutating set }", true),
            ("{ get async throws }", false),
            ("{ get { return 1 } set(newValue) { x = newValue } }", true),
            ("{ get set", true),
        ];
        for (source, writable) in cases {
            let block = parse_getter_setter_block(source).unwrap_or_else(|e| panic!("{:?}: {}", source, e));
            assert_eq!(block.is_writable, writable, "writability of {:?}", source);
        }
    }

    #[test]
    fn test_getter_setter_block_requires_brace() {
        assert!(parse_getter_setter_block("get set }").is_err());
        assert!(parse_getter_setter_block("{ get set return }").is_err());
    }

    // ========================================================================
    // Variables
    // ========================================================================

    #[test]
    fn test_variable_declarations() {
        let weak = parse_variable_declaration("weak var delegate: Delegate?").unwrap();
        assert_eq!(weak.name, "delegate");
        assert_eq!(weak.type_name, "Delegate?");
        assert_eq!(weak.ownership, Some(Ownership::Weak));
        assert!(weak.is_writable);

        let owner = parse_variable_declaration("unowned(unsafe) let owner: Owner").unwrap();
        assert_eq!(owner.ownership, Some(Ownership::UnownedUnsafe));
        assert!(!owner.is_writable);

        let inferred = parse_variable_declaration("var count = 0").unwrap();
        assert_eq!(inferred.type_name, "");
        assert!(inferred.type_annotation.is_none());
        assert!(inferred.is_writable);
    }

    // ========================================================================
    // Files
    // ========================================================================

    const SERVICE_FILE: &str = r#"import Foundation

protocol Service: AnyObject {
    var name: String { get }
    var count: Int { get set }
    func fetch(id: Int) async throws -> Data
    subscript(index: Int) -> String { get }
}

final class Client: Base, Service {
    weak var delegate: Delegate?
    unowned(unsafe) let owner: Owner
    private(set) var state = State.idle
    static let shared = Client()
    let a = 1, b = 2
    var computed: Int { return 42 }
    var observed: Int = 0 {
        didSet { print(observed) }
    }

    init(name: String) {
        self.name = name
    }

    func fetch(id: Int) async throws -> Data {
        return Data()
    }

    deinit {}
}

extension Client: CustomStringConvertible where Self: AnyObject {
    var description: String { "client" }
}
"#;

    #[test]
    fn test_file_skeleton() {
        let parsed = parse_file(SERVICE_FILE);
        assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
        let file = parsed.node;
        assert_eq!(file.text, SERVICE_FILE);

        let types: Vec<_> = file.type_declarations().collect();
        assert_eq!(types.len(), 3);
        assert_eq!(types[0].kind, TypeDeclarationKind::Protocol);
        assert_eq!(types[1].kind, TypeDeclarationKind::Class);
        assert_eq!(types[2].kind, TypeDeclarationKind::Extension);
        assert_eq!(types[2].name, "Client");
        assert_eq!(types[2].inherited_types[0].name, "CustomStringConvertible");
    }

    #[test]
    fn test_protocol_members() {
        let file = parse_file(SERVICE_FILE).node;
        let service = file.type_declarations().next().unwrap();
        assert_eq!(service.name, "Service");
        assert_eq!(service.inherited_types[0].name, "AnyObject");

        let vars: Vec<_> = service.variable_declarations().collect();
        assert_eq!(vars.len(), 2);
        assert!(!vars[0].is_writable);
        assert!(vars[0].accessors.is_some());
        assert!(vars[1].is_writable);

        let fetch = service.function_declarations().next().unwrap();
        assert!(fetch.throws);
        assert_eq!(service.subscript_declarations().count(), 1);
    }

    #[test]
    fn test_class_members() {
        let file = parse_file(SERVICE_FILE).node;
        let client = file.type_declarations().nth(1).unwrap();
        let names: Vec<_> = client.inherited_types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Base", "Service"]);

        let vars: Vec<_> = client.variable_declarations().collect();
        let summary: Vec<_> = vars.iter().map(|v| (v.name.as_str(), v.is_writable)).collect();
        assert_eq!(
            summary,
            [
                ("delegate", true),
                ("owner", false),
                ("state", true),
                ("shared", false),
                ("a", false),
                ("b", false),
                ("computed", false),
                ("observed", true),
            ]
        );
        assert_eq!(vars[0].ownership, Some(Ownership::Weak));
        assert_eq!(vars[1].ownership, Some(Ownership::UnownedUnsafe));
        assert!(vars[3].is_static);
        assert_eq!(vars[4].text, "let a = 1");
        assert_eq!(vars[5].text, "b = 2");

        let funcs: Vec<_> = client.function_declarations().collect();
        assert_eq!(funcs.len(), 2);
        assert_eq!(funcs[0].name, "init");
        assert!(funcs[0].text.ends_with('}'), "function span covers the body");
        assert_eq!(funcs[1].name, "fetch");
    }

    #[test]
    fn test_sibling_spans_are_ordered_and_disjoint() {
        let file = parse_file(SERVICE_FILE).node;
        for ty in file.type_declarations() {
            let spans: Vec<_> = ty.members.iter().map(Declaration::span).collect();
            for pair in spans.windows(2) {
                assert!(pair[0].end <= pair[1].start, "{:?} overlaps {:?}", pair[0], pair[1]);
            }
            for span in spans {
                assert!(ty.span.contains(span));
            }
        }
    }

    #[test]
    fn test_statements_and_directives_are_skipped() {
        let source = "#if DEBUG\nlet x = 1\n#endif\nprint(x)\nif x > 0 {\n  print(\"big\")\n}\nfunc top() {}\n";
        let parsed = parse_file(source);
        assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
        assert_eq!(parsed.node.variable_declarations().count(), 1);
        assert_eq!(parsed.node.function_declarations().count(), 1);
    }

    #[test]
    fn test_bad_member_recovers_at_next_declaration() {
        let source = "class A {\n    func (x: Int) {}\n    var ok = 1\n}\n";
        let parsed = parse_file(source);
        assert_eq!(parsed.diagnostics.len(), 1);
        let a = parsed.node.type_declarations().next().unwrap();
        let names: Vec<_> = a.variable_declarations().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["ok"]);
    }

    #[test]
    fn test_type_body_nesting_limit() {
        let source = "class A { class B { class C {} } }";
        let tokens = lexer::lex(source).unwrap();
        let config = ParseConfig::default().with_max_nesting_depth(2);
        let parsed = Parser::new(source, &tokens).with_config(config).parse_file();
        assert_eq!(parsed.diagnostics.len(), 1);
        assert_eq!(parsed.diagnostics[0].kind, ErrorKind::RecursionLimit);
        let a = parsed.node.type_declarations().next().unwrap();
        let b = a.type_declarations().next().unwrap();
        assert_eq!(b.name, "B");
        assert!(b.members.is_empty());
    }

    #[test]
    fn test_windowed_parser_stops_at_window_end() {
        let source = "var a: Int\nvar b: String";
        let tokens = lexer::lex(source).unwrap();
        let mut parser = Parser::windowed(source, &tokens, Span::new(11, source.len()));
        let var = parser.parse_variable_declaration().unwrap();
        assert_eq!(var.name, "b");
        assert_eq!(var.span, Span::new(11, source.len()));

        let mut first = Parser::windowed(source, &tokens, Span::new(0, 10));
        let var = first.parse_variable_declaration().unwrap();
        assert_eq!(var.type_name, "Int");
        assert!(first.is_at_end());
    }

    #[test]
    fn test_conditional_advance_stops_at_window_end() {
        let source = "func ( )";
        let tokens = lexer::lex(source).unwrap();
        let mut parser = Parser::windowed(source, &tokens, Span::new(0, 6));
        assert!(!parser.match_punct(PunctuationId::LParen));
        assert!(parser.match_keyword(KeywordId::Func));
        assert!(!parser.match_keyword(KeywordId::Func));
        assert!(parser.match_punct(PunctuationId::LParen));
        // `)` lies outside the window; the cursor reports end of input instead.
        assert!(!parser.match_punct(PunctuationId::RParen));
        assert!(parser.is_at_end());
        assert_eq!(parser.previous_end(), 6);
    }
}
