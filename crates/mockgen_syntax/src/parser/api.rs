/// Grammar entry points for callers that drive a [`Parser`] themselves, typically over a token window.
impl<'a> Parser<'a> {
    pub fn parse_type_identifier(&mut self) -> Result<TypeIdentifier, SyntaxError> {
        self.type_identifier()
    }

    pub fn parse_self_expression(&mut self) -> Result<SelfExpression, SyntaxError> {
        self.self_expression()
    }

    /// Function or initializer declaration, leading attributes and modifiers included. The body is not consumed.
    pub fn parse_function_declaration(&mut self) -> Result<FunctionDeclaration, SyntaxError> {
        self.function_declaration()
    }

    pub fn parse_subscript_declaration(&mut self) -> Result<SubscriptDeclaration, SyntaxError> {
        self.subscript_declaration()
    }

    /// First binding of a `var`/`let` declaration (the keyword may be omitted).
    pub fn parse_variable_declaration(&mut self) -> Result<VariableDeclaration, SyntaxError> {
        let start = self.current_offset();
        let modifiers = self.declaration_modifiers();
        let is_let = self.check_keyword(KeywordId::Let);
        if is_let || self.check_keyword(KeywordId::Var) {
            self.advance();
        }
        self.variable_binding(start, is_let, modifiers)
    }

    pub fn parse_getter_setter_block(&mut self) -> Result<GetterSetterKeywordBlock, SyntaxError> {
        self.getter_setter_block()
    }

    /// Inherited types after a type's name: optional generic clause, then `: A, B`.
    pub fn parse_inheritance(&mut self) -> Result<Vec<TypeIdentifier>, SyntaxError> {
        if self.check_punct(PunctuationId::LAngle) {
            self.skip_angle_clause();
        }
        self.inheritance_clause()
    }
}

/// Lex `source` and run one grammar rule from its first token.
fn parse_fragment<T>(
    source: &str,
    config: ParseConfig,
    rule: impl FnOnce(&mut Parser<'_>) -> Result<T, SyntaxError>,
) -> Result<Parsed<T>, SyntaxError> {
    let (tokens, mut diagnostics) = lexer::lex_lossy(source);
    let mut parser = Parser::new(source, &tokens).with_config(config);
    let node = rule(&mut parser)?;
    diagnostics.extend(parser.take_errors());
    Ok(Parsed::new(node, diagnostics))
}

/// Parse a type identifier such as `[String: Int]?` or `A & B`.
///
/// Parsing stops at the first token that cannot continue the type; the returned span covers exactly the
/// consumed text.
///
/// ## Errors
/// Returns [`ErrorKind::EmptyType`] for empty input, and a syntax error for malformed sugar (`[Type)`).
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse_type(source: &str) -> Result<TypeIdentifier, SyntaxError> {
    parse_type_with(source, ParseConfig::default())
}

pub fn parse_type_with(source: &str, config: ParseConfig) -> Result<TypeIdentifier, SyntaxError> {
    parse_fragment(source, config, |p| p.type_identifier()).map(|parsed| parsed.node)
}

/// Classify a `self` expression: bare, member, `self.init` or subscript.
pub fn parse_self_expression(source: &str) -> Result<SelfExpression, SyntaxError> {
    parse_fragment(source, ParseConfig::default(), |p| p.self_expression()).map(|parsed| parsed.node)
}

/// Parse a function, initializer or operator declaration signature.
///
/// Parameters that fail to parse are skipped and reported in [`Parsed::diagnostics`].
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse_function_declaration(source: &str) -> Result<Parsed<FunctionDeclaration>, SyntaxError> {
    parse_fragment(source, ParseConfig::default(), |p| p.function_declaration())
}

/// Parse a subscript declaration, with or without the leading `subscript` keyword.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse_subscript_declaration(source: &str) -> Result<Parsed<SubscriptDeclaration>, SyntaxError> {
    parse_fragment(source, ParseConfig::default(), |p| p.subscript_declaration())
}

pub fn parse_variable_declaration(source: &str) -> Result<VariableDeclaration, SyntaxError> {
    parse_fragment(source, ParseConfig::default(), |p| p.parse_variable_declaration()).map(|parsed| parsed.node)
}

/// Parse a `{ get set }` accessor keyword block.
pub fn parse_getter_setter_block(source: &str) -> Result<GetterSetterKeywordBlock, SyntaxError> {
    parse_fragment(source, ParseConfig::default(), |p| p.getter_setter_block()).map(|parsed| parsed.node)
}

/// Parse a whole file with the default configuration.
pub fn parse_file(source: &str) -> Parsed<File> {
    parse_file_with(source, ParseConfig::default())
}

/// Parse a whole file: lexer diagnostics first, then grammar diagnostics.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse_file_with(source: &str, config: ParseConfig) -> Parsed<File> {
    let (tokens, mut diagnostics) = lexer::lex_lossy(source);
    let parsed = Parser::new(source, &tokens).with_config(config).parse_file();
    diagnostics.extend(parsed.diagnostics);
    Parsed::new(parsed.node, diagnostics)
}
