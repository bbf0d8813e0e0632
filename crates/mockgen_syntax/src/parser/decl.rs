/// Declaration parsing.
///
/// This chunk contains the grammars for:
/// - type declarations (`class`, `struct`, `enum`, `protocol`, `extension`, `actor`) and their bodies
/// - functions, initializers and operator functions, with the shared parameter clause
/// - subscripts and `{ get set }` accessor keyword blocks
/// - `var`/`let` bindings, including observers and computed getters
///
/// Constructs with no node of their own (`import`, `typealias`, enum `case`s, `#if` lines, statements) are
/// skipped.
impl<'a> Parser<'a> {
    // ========================================================================
    // Members
    // ========================================================================

    /// Parse one declaration at file or type-body scope.
    ///
    /// Returns no declarations for skipped constructs and several for `var a = 1, b = 2`.
    fn member_declarations(&mut self) -> Result<Vec<Declaration>, SyntaxError> {
        if self.check_punct(PunctuationId::Hash) {
            self.advance();
            self.skip_statement();
            return Ok(Vec::new());
        }
        if self.match_punct(PunctuationId::Semicolon) {
            return Ok(Vec::new());
        }

        let start = self.current_offset();
        let modifiers = self.declaration_modifiers();
        let kind = self.peek().kind.clone();
        match kind {
            TokenKind::Keyword(KeywordId::Class) => self.type_member(start, TypeDeclarationKind::Class),
            TokenKind::Keyword(KeywordId::Struct) => self.type_member(start, TypeDeclarationKind::Struct),
            TokenKind::Keyword(KeywordId::Enum) => self.type_member(start, TypeDeclarationKind::Enum),
            TokenKind::Keyword(KeywordId::Protocol) => self.type_member(start, TypeDeclarationKind::Protocol),
            TokenKind::Keyword(KeywordId::Extension) => self.type_member(start, TypeDeclarationKind::Extension),
            TokenKind::Ident(_)
                if self.check_contextual(ContextualId::Actor)
                    && matches!(self.peek_nth(1).kind, TokenKind::Ident(_)) =>
            {
                self.type_member(start, TypeDeclarationKind::Actor)
            }
            TokenKind::Keyword(KeywordId::Func | KeywordId::Init) => {
                let mut func = self.function_after_modifiers(start, modifiers)?;
                if self.check_punct(PunctuationId::LBrace) {
                    self.skip_group();
                    func.span = Span::new(func.span.start, self.previous_end());
                    func.text = self.text_of(func.span);
                }
                Ok(vec![Declaration::Function(func)])
            }
            TokenKind::Keyword(KeywordId::Subscript) => {
                let subscript = self.subscript_after_modifiers(start)?;
                Ok(vec![Declaration::Subscript(subscript)])
            }
            TokenKind::Keyword(KeywordId::Var | KeywordId::Let) => Ok(self
                .variable_declarations(start, modifiers)?
                .into_iter()
                .map(Declaration::Variable)
                .collect()),
            TokenKind::Keyword(KeywordId::Deinit) => {
                self.advance();
                if self.check_punct(PunctuationId::LBrace) {
                    self.skip_group();
                }
                Ok(Vec::new())
            }
            TokenKind::Keyword(
                id @ (KeywordId::Import
                | KeywordId::Typealias
                | KeywordId::Associatedtype
                | KeywordId::Case
                | KeywordId::Operator
                | KeywordId::Precedencegroup),
            ) => {
                tracing::debug!(keyword = keywords::as_str(id), offset = start, "skipping declaration");
                self.skip_statement();
                Ok(Vec::new())
            }
            _ => {
                self.skip_statement();
                Ok(Vec::new())
            }
        }
    }

    fn type_member(&mut self, start: usize, kind: TypeDeclarationKind) -> Result<Vec<Declaration>, SyntaxError> {
        Ok(vec![Declaration::Type(self.type_declaration(start, kind)?)])
    }

    // ========================================================================
    // Type declarations
    // ========================================================================

    /// Parse a type declaration whose introducer keyword is at the cursor.
    fn type_declaration(&mut self, start: usize, kind: TypeDeclarationKind) -> Result<TypeDeclaration, SyntaxError> {
        self.advance(); // introducer
        let name = if kind == TypeDeclarationKind::Extension {
            self.type_identifier()?.name
        } else {
            match &self.peek().kind {
                TokenKind::Ident(name) => {
                    let name = name.clone();
                    self.advance();
                    name
                }
                _ => return Err(self.error_here(&format!("Expected {} name", kind))),
            }
        };

        if self.check_punct(PunctuationId::LAngle) {
            self.skip_angle_clause();
        }
        let inherited_types = self.inheritance_clause()?;
        self.skip_where_clause();

        if !self.check_punct(PunctuationId::LBrace) {
            return Err(self.error_here(&format!("Expected '{{' to start {} body", kind)));
        }
        let open = self.checkpoint();
        self.advance();
        let members = match self.type_body() {
            Ok(members) => members,
            Err(e) => {
                self.rewind(open);
                self.skip_group();
                return Err(e);
            }
        };
        self.match_punct(PunctuationId::RBrace);

        let span = Span::new(start, self.previous_end());
        Ok(TypeDeclaration {
            kind,
            name,
            span,
            text: self.text_of(span),
            inherited_types,
            members,
        })
    }

    /// Parse `: A, B` after a type name. No colon means no inherited types.
    fn inheritance_clause(&mut self) -> Result<Vec<TypeIdentifier>, SyntaxError> {
        let mut inherited = Vec::new();
        if !self.match_punct(PunctuationId::Colon) {
            return Ok(inherited);
        }
        loop {
            // Legacy `protocol P: class` constraint has no type node.
            self.skip_attributes();
            if !self.match_keyword(KeywordId::Class) {
                inherited.push(self.type_identifier()?);
            }
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        Ok(inherited)
    }

    /// Members up to (not including) the closing `}`.
    fn type_body(&mut self) -> Result<Vec<Declaration>, SyntaxError> {
        self.nested(|p| {
            let mut members = Vec::new();
            while !p.is_at_end() && !p.check_punct(PunctuationId::RBrace) {
                let before = p.pos;
                match p.member_declarations() {
                    Ok(decls) => members.extend(decls),
                    Err(e) => {
                        p.errors.push(e);
                        p.synchronize();
                    }
                }
                if p.pos == before {
                    p.advance();
                }
            }
            Ok(members)
        })
    }

    /// Skip a generic `where` clause, up to a body or the next declaration.
    fn skip_where_clause(&mut self) {
        if !self.match_keyword(KeywordId::Where) {
            return;
        }
        while !self.is_at_end()
            && !self.check_punct(PunctuationId::LBrace)
            && !self.check_punct(PunctuationId::RBrace)
            && !(self.peek().newline_before && self.at_declaration_start())
        {
            if self.at_group_open() {
                self.skip_group();
            } else {
                self.advance();
            }
        }
    }

    // ========================================================================
    // Functions
    // ========================================================================

    /// Parse a function or initializer declaration, including leading attributes and modifiers.
    fn function_declaration(&mut self) -> Result<FunctionDeclaration, SyntaxError> {
        let start = self.current_offset();
        let modifiers = self.declaration_modifiers();
        self.function_after_modifiers(start, modifiers)
    }

    fn function_after_modifiers(&mut self, start: usize, modifiers: Modifiers) -> Result<FunctionDeclaration, SyntaxError> {
        let name = if self.check_keyword(KeywordId::Init) {
            self.initializer_name()
        } else {
            self.match_keyword(KeywordId::Func);
            self.function_name()?
        };
        self.function_signature(start, name, modifiers.is_static)
    }

    /// `init`, `init?` or `init!`.
    fn initializer_name(&mut self) -> String {
        self.advance();
        let mut name = keywords::as_str(KeywordId::Init).to_string();
        if (self.check_punct(PunctuationId::Question) || self.check_punct(PunctuationId::Bang)) && self.is_adjacent() {
            name.push_str(&self.label_text_at(0));
            self.advance();
        }
        name
    }

    fn function_name(&mut self) -> Result<String, SyntaxError> {
        if let TokenKind::Ident(name) = &self.peek().kind {
            let name = name.clone();
            self.advance();
            return Ok(name);
        }
        if !self.is_operator_part(self.peek()) {
            return Err(self.error_here("Expected function name"));
        }

        // `==`, `<=`, `+++`: join adjacent operator characters the lexer split apart.
        let mut name = self.operator_text(self.peek());
        self.advance();
        while self.is_adjacent() && self.is_operator_part(self.peek()) {
            name.push_str(&self.operator_text(self.peek()));
            self.advance();
        }
        Ok(name)
    }

    fn is_operator_part(&self, token: &Token) -> bool {
        matches!(
            token.kind,
            TokenKind::Operator(_)
                | TokenKind::Punctuation(
                    PunctuationId::LAngle
                        | PunctuationId::RAngle
                        | PunctuationId::Question
                        | PunctuationId::Bang
                        | PunctuationId::Amp
                        | PunctuationId::Eq
                        | PunctuationId::Dot
                        | PunctuationId::Ellipsis
                )
        )
    }

    fn operator_text(&self, token: &Token) -> String {
        match &token.kind {
            TokenKind::Operator(op) => op.clone(),
            TokenKind::Punctuation(id) => punctuation::as_str(*id).to_string(),
            other => other.describe(),
        }
    }

    /// Everything after the name: generic clause, parameters, effects, result and `where` clause.
    fn function_signature(&mut self, start: usize, name: String, is_static: bool) -> Result<FunctionDeclaration, SyntaxError> {
        if self.check_punct(PunctuationId::LAngle) {
            self.skip_angle_clause();
        }
        let parameters = self.parameter_clause()?;
        self.match_contextual(ContextualId::Async);
        let throws = self.match_keyword(KeywordId::Throws);
        if throws && self.check_punct(PunctuationId::LParen) && self.is_adjacent() {
            // typed throws: `throws(MyError)`
            self.skip_group();
        }
        self.match_keyword(KeywordId::Rethrows);
        let return_type = self.result_type()?;
        self.skip_where_clause();

        let span = Span::new(start, self.previous_end());
        Ok(FunctionDeclaration {
            name,
            span,
            text: self.text_of(span),
            parameters,
            return_type,
            throws,
            is_static,
        })
    }

    /// `-> Type`, or `None` when there is no arrow.
    fn result_type(&mut self) -> Result<Option<TypeIdentifier>, SyntaxError> {
        if !self.match_punct(PunctuationId::Arrow) {
            return Ok(None);
        }
        self.skip_attributes();
        Ok(Some(self.type_identifier()?))
    }

    /// `( parameter, ... )`. Parameters that fail to parse are reported and skipped.
    fn parameter_clause(&mut self) -> Result<Vec<MethodParameter>, SyntaxError> {
        self.nested(|p| {
            p.expect_punct(PunctuationId::LParen, "Expected '(' to start parameter list")?;
            let mut parameters = Vec::new();
            if p.match_punct(PunctuationId::RParen) {
                return Ok(parameters);
            }
            loop {
                match p.parameter() {
                    Ok(param) => parameters.push(param),
                    Err(e) if e.kind == ErrorKind::RecursionLimit => return Err(e),
                    Err(e) => {
                        p.errors.push(e);
                        p.skip_parameter_rest();
                    }
                }
                if !p.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
            if !p.match_punct(PunctuationId::RParen) && !p.is_at_end() {
                return Err(p.error_here("Expected ')' to close parameter list"));
            }
            Ok(parameters)
        })
    }

    /// `external local: @attr inout Type... = default`.
    fn parameter(&mut self) -> Result<MethodParameter, SyntaxError> {
        let start = self.current_offset();
        if !self.is_label_at(0) {
            return Err(self.error_here("Expected parameter name"));
        }
        let first = self.label_text_at(0);
        self.advance();
        let second = match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Some(name)
            }
            _ => None,
        };
        let (external_name, local_name) = match second {
            Some(local) => (Some(first), local),
            None => (None, first),
        };

        self.expect_punct(PunctuationId::Colon, "Expected ':' after parameter name")?;
        self.skip_attributes();
        self.match_keyword(KeywordId::Inout);
        let ty = self.type_identifier()?;
        let variadic = self.match_punct(PunctuationId::Ellipsis);

        let default_value = if self.match_punct(PunctuationId::Eq) {
            let value_start = self.current_offset();
            self.skip_parameter_rest();
            let value_span = Span::new(value_start, self.previous_end().max(value_start));
            Some(self.text_of(value_span).trim().to_string())
        } else {
            None
        };

        let span = Span::new(start, self.previous_end());
        Ok(MethodParameter {
            external_name,
            local_name,
            ty,
            variadic,
            default_value,
            span,
            text: self.text_of(span),
        })
    }

    /// Skip to the next `,` or `)` of the enclosing parameter clause.
    fn skip_parameter_rest(&mut self) {
        while !self.is_at_end() && !self.check_punct(PunctuationId::Comma) && !self.check_punct(PunctuationId::RParen) {
            if self.at_group_open() {
                self.skip_group();
            } else {
                self.advance();
            }
        }
    }

    // ========================================================================
    // Subscripts and accessor blocks
    // ========================================================================

    fn subscript_declaration(&mut self) -> Result<SubscriptDeclaration, SyntaxError> {
        let start = self.current_offset();
        self.declaration_modifiers();
        self.subscript_after_modifiers(start)
    }

    fn subscript_after_modifiers(&mut self, start: usize) -> Result<SubscriptDeclaration, SyntaxError> {
        self.match_keyword(KeywordId::Subscript);
        if self.check_punct(PunctuationId::LAngle) {
            self.skip_angle_clause();
        }
        let parameters = self.parameter_clause()?;
        let return_type = self.result_type()?;
        self.skip_where_clause();
        let (accessors, is_writable) = self.accessors_or_body()?;

        let span = Span::new(start, self.previous_end());
        Ok(SubscriptDeclaration {
            span,
            text: self.text_of(span),
            parameters,
            return_type,
            accessors,
            is_writable,
        })
    }

    /// A keyword block (`{ get set }`) becomes an accessor node; a plain getter body is skipped as read-only.
    fn accessors_or_body(&mut self) -> Result<(Option<GetterSetterKeywordBlock>, bool), SyntaxError> {
        if !self.check_punct(PunctuationId::LBrace) {
            return Ok((None, false));
        }
        if self.keyword_block_ahead() {
            let block = self.getter_setter_block()?;
            let is_writable = block.is_writable;
            return Ok((Some(block), is_writable));
        }
        self.skip_group();
        Ok((None, false))
    }

    /// `{` followed (after attributes and mutation modifiers) by `get`, `set` or `}`.
    fn keyword_block_ahead(&mut self) -> bool {
        self.block_starts_with(&[ContextualId::Get, ContextualId::Set], true)
    }

    /// `{` followed (after attributes) by `willSet` or `didSet`.
    fn observers_ahead(&mut self) -> bool {
        self.block_starts_with(&[ContextualId::WillSet, ContextualId::DidSet], false)
    }

    fn block_starts_with(&mut self, words: &[ContextualId], empty_matches: bool) -> bool {
        if !self.check_punct(PunctuationId::LBrace) {
            return false;
        }
        let checkpoint = self.checkpoint();
        self.advance();
        self.skip_attributes();
        self.skip_mutation_modifiers();
        let found = words.iter().any(|id| self.check_contextual(*id))
            || (empty_matches && (self.check_punct(PunctuationId::RBrace) || self.is_at_end()));
        self.rewind(checkpoint);
        found
    }

    fn skip_mutation_modifiers(&mut self) {
        while self.match_contextual(ContextualId::Mutating) || self.match_contextual(ContextualId::Nonmutating) {}
    }

    /// `{ get set }`: up to two accessors, each optionally preceded by attributes and `mutating`/`nonmutating`.
    ///
    /// Writable iff a `set` accessor is present.
    fn getter_setter_block(&mut self) -> Result<GetterSetterKeywordBlock, SyntaxError> {
        let start = self.current_offset();
        self.expect_punct(PunctuationId::LBrace, "Expected '{' to start accessor block")?;

        let mut is_writable = false;
        for _ in 0..2 {
            self.skip_attributes();
            self.skip_mutation_modifiers();
            if self.check_contextual(ContextualId::Set) {
                is_writable = true;
            }
            if self.match_contextual(ContextualId::Get) || self.match_contextual(ContextualId::Set) {
                self.skip_accessor_tail();
            }
        }

        if !self.match_punct(PunctuationId::RBrace) && !self.is_at_end() {
            return Err(self.error_here("Expected '}' to close accessor block"));
        }

        let span = Span::new(start, self.previous_end());
        Ok(GetterSetterKeywordBlock {
            span,
            text: self.text_of(span),
            is_writable,
        })
    }

    /// `set(newValue)`, `get async throws` and accessor bodies.
    fn skip_accessor_tail(&mut self) {
        if self.check_punct(PunctuationId::LParen) && self.is_adjacent() {
            self.skip_group();
        }
        self.match_contextual(ContextualId::Async);
        if !self.match_keyword(KeywordId::Throws) {
            self.match_keyword(KeywordId::Rethrows);
        }
        if self.check_punct(PunctuationId::LBrace) {
            self.skip_group();
        }
    }

    // ========================================================================
    // Variables
    // ========================================================================

    /// `var`/`let` at the cursor, with one declaration per named binding.
    fn variable_declarations(&mut self, start: usize, modifiers: Modifiers) -> Result<Vec<VariableDeclaration>, SyntaxError> {
        let is_let = self.check_keyword(KeywordId::Let);
        self.advance();

        let mut variables = Vec::new();
        let mut binding_start = start;
        loop {
            if self.check_punct(PunctuationId::LParen) {
                // `let (a, b) = pair` binds no property we model.
                tracing::debug!(offset = binding_start, "skipping tuple pattern binding");
                self.skip_statement();
                break;
            }
            variables.push(self.variable_binding(binding_start, is_let, modifiers)?);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
            binding_start = self.current_offset();
        }
        Ok(variables)
    }

    fn variable_binding(&mut self, start: usize, is_let: bool, modifiers: Modifiers) -> Result<VariableDeclaration, SyntaxError> {
        let name = match &self.peek().kind {
            TokenKind::Ident(name) => name.clone(),
            _ => return Err(self.error_here("Expected variable name")),
        };
        self.advance();

        let type_annotation = if self.match_punct(PunctuationId::Colon) {
            self.skip_attributes();
            Some(self.type_identifier()?)
        } else {
            None
        };
        if self.match_punct(PunctuationId::Eq) {
            self.skip_initializer();
        }

        let (accessors, is_writable) = if self.observers_ahead() {
            self.skip_group();
            (None, !is_let)
        } else if self.check_punct(PunctuationId::LBrace) {
            self.accessors_or_body()?
        } else {
            (None, !is_let)
        };

        let span = Span::new(start, self.previous_end());
        Ok(VariableDeclaration {
            name,
            span,
            text: self.text_of(span),
            type_name: type_annotation.as_ref().map(|t| t.name.clone()).unwrap_or_default(),
            type_annotation,
            accessors,
            is_writable,
            ownership: modifiers.ownership,
            is_static: modifiers.is_static,
        })
    }

    /// Skip an initializer expression: up to `,`, a closer, observers, or a line break that ends the expression.
    fn skip_initializer(&mut self) {
        let start = self.pos;
        while !self.is_at_end() {
            if self.check_punct(PunctuationId::Comma)
                || self.check_punct(PunctuationId::Semicolon)
                || self.check_punct(PunctuationId::RBrace)
                || self.check_punct(PunctuationId::RParen)
                || self.check_punct(PunctuationId::RBracket)
            {
                return;
            }
            if self.pos > start && self.peek().newline_before && !self.continues_expression() {
                return;
            }
            if self.check_punct(PunctuationId::LBrace) && self.observers_ahead() {
                return;
            }
            if self.at_group_open() {
                self.skip_group();
            } else {
                self.advance();
            }
        }
    }

    /// Return `true` if the current token (first on its line) continues the previous line's expression.
    fn continues_expression(&self) -> bool {
        let continues_line = matches!(
            self.peek().kind,
            TokenKind::Operator(_)
                | TokenKind::Punctuation(PunctuationId::Dot | PunctuationId::Question)
        );
        let dangling = self.pos > self.first
            && matches!(
                self.tokens[self.pos - 1].kind,
                TokenKind::Operator(_) | TokenKind::Punctuation(PunctuationId::Eq | PunctuationId::Dot)
            );
        continues_line || dangling
    }
}
