/// Type identifier grammar.
///
/// Grammar, outermost first:
///
/// ```text
/// type        := composition ( '?' | '!' )*
/// composition := primary ( '&' named )*
/// primary     := '[' ']' | '[' type ( ':' type )? ']' | '(' tuple ')' ( effects '->' type )?
///              | ( 'some' | 'any' ) composition | named
/// named       := segment generics? ( '.' segment generics? )*
/// ```
///
/// The grammar stops at (rather than fails on) the first token that cannot continue a type, so
/// `A < B,C > next` yields `A<B, C>` and leaves `next` unconsumed.
impl<'a> Parser<'a> {
    /// Parse a full type identifier, including suffixes and composition.
    fn type_identifier(&mut self) -> Result<TypeIdentifier, SyntaxError> {
        if self.is_at_end() {
            return Err(SyntaxError::empty_type(self.current_span()));
        }
        self.nested(|p| p.type_with_suffixes())
    }

    fn type_with_suffixes(&mut self) -> Result<TypeIdentifier, SyntaxError> {
        let start = self.current_offset();
        let mut ty = self.type_composition()?;
        // Each suffix wraps the type once more and counts as a nesting level.
        let mut wrappers = 0;
        loop {
            // Postfix sugar must touch the type it wraps.
            if self.peek().newline_before {
                break;
            }
            let (kind, suffix) = if self.check_punct(PunctuationId::Question) {
                (TypeKind::Optional, '?')
            } else if self.check_punct(PunctuationId::Bang) {
                (TypeKind::ImplicitlyUnwrapped, '!')
            } else {
                break;
            };
            if self.depth + wrappers >= self.config.max_nesting_depth {
                return Err(self.recursion_limit());
            }
            wrappers += 1;
            self.advance();
            let name = format!("{}{}", ty.name, suffix);
            ty = self.finish_type(name, kind, start, vec![ty]);
        }
        Ok(ty)
    }

    fn type_composition(&mut self) -> Result<TypeIdentifier, SyntaxError> {
        let start = self.current_offset();
        let first = self.type_primary()?;
        if !(self.check_punct(PunctuationId::Amp) && self.is_type_name_at(1)) {
            return Ok(first);
        }

        let mut name = first.name.clone();
        let mut parts = vec![first];
        while self.check_punct(PunctuationId::Amp) {
            self.advance();
            name.push_str(" & ");
            if !self.is_type_name_at(0) {
                // `A & B & 0`: the dangling `&` stays in the name.
                break;
            }
            let part = self.type_named()?;
            name.push_str(&part.name);
            parts.push(part);
        }
        Ok(self.finish_type(name, TypeKind::Composition, start, parts))
    }

    fn type_primary(&mut self) -> Result<TypeIdentifier, SyntaxError> {
        match &self.peek().kind {
            TokenKind::Eof => Err(SyntaxError::empty_type(self.current_span())),
            TokenKind::Punctuation(PunctuationId::LBracket) => self.type_collection(),
            TokenKind::Punctuation(PunctuationId::LParen) => self.type_tuple_or_function(),
            TokenKind::Ident(_) if self.at_type_prefix() => self.type_prefixed(),
            _ if self.is_type_name_at(0) => self.type_named(),
            _ => Err(self.error_here("Expected type")),
        }
    }

    /// `[]`, `[Element]` or `[Key:Value]`.
    fn type_collection(&mut self) -> Result<TypeIdentifier, SyntaxError> {
        let start = self.current_offset();
        self.advance(); // '['
        if self.match_punct(PunctuationId::RBracket) {
            return Ok(self.finish_type("[]".to_string(), TypeKind::Array, start, Vec::new()));
        }

        let key = self.type_identifier()?;
        if self.match_punct(PunctuationId::Colon) {
            let value = self.type_identifier()?;
            self.expect_punct(PunctuationId::RBracket, "Expected ']' after dictionary value type")?;
            let name = format!("[{}:{}]", key.name, value.name);
            return Ok(self.finish_type(name, TypeKind::Dictionary, start, vec![key, value]));
        }

        self.expect_punct(PunctuationId::RBracket, "Expected ']' after array element type")?;
        let name = format!("[{}]", key.name);
        Ok(self.finish_type(name, TypeKind::Array, start, vec![key]))
    }

    /// Dotted name with optional generic arguments on each segment.
    fn type_named(&mut self) -> Result<TypeIdentifier, SyntaxError> {
        let start = self.current_offset();
        let mut name = String::new();
        let mut children = Vec::new();
        loop {
            let segment = self.type_name_segment()?;
            name.push_str(&segment);

            if self.check_punct(PunctuationId::LAngle) {
                let checkpoint = self.checkpoint();
                match self.generic_arguments() {
                    Ok((rendered, args)) => {
                        name.push_str(&rendered);
                        children.extend(args);
                    }
                    Err(e) if e.kind == ErrorKind::RecursionLimit => return Err(e),
                    Err(_) => {
                        // `a < 0`: not a generic clause, the type ends before the `<`.
                        self.rewind(checkpoint);
                        break;
                    }
                }
            }

            if self.check_punct(PunctuationId::Dot) && self.is_type_name_at(1) {
                self.advance();
                name.push('.');
                continue;
            }
            break;
        }
        Ok(self.finish_type(name, TypeKind::Named, start, children))
    }

    fn type_name_segment(&mut self) -> Result<String, SyntaxError> {
        let segment = match &self.peek().kind {
            TokenKind::Ident(name) => name.clone(),
            TokenKind::Keyword(id @ (KeywordId::Any | KeywordId::SelfType)) => keywords::as_str(*id).to_string(),
            _ => return Err(self.error_here("Expected type name")),
        };
        self.advance();
        Ok(segment)
    }

    /// Parse `<A, B>` after a type name. Returns the canonical rendering and the arguments.
    ///
    /// An argument list cut off by the end of input is kept as far as it goes (`Generic<`).
    fn generic_arguments(&mut self) -> Result<(String, Vec<TypeIdentifier>), SyntaxError> {
        self.advance(); // '<'
        let mut rendered = String::from("<");
        let mut args: Vec<TypeIdentifier> = Vec::new();
        if self.match_punct(PunctuationId::RAngle) {
            rendered.push('>');
            return Ok((rendered, args));
        }
        loop {
            if self.is_at_end() {
                return Ok((rendered, args));
            }
            let arg = self.type_identifier()?;
            if !args.is_empty() {
                rendered.push_str(", ");
            }
            rendered.push_str(&arg.name);
            args.push(arg);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        if self.match_punct(PunctuationId::RAngle) {
            rendered.push('>');
            return Ok((rendered, args));
        }
        if self.is_at_end() {
            return Ok((rendered, args));
        }
        Err(self.error_here("Expected '>' to close generic arguments"))
    }

    /// `(A, label: B)` or a function type `(A) async throws -> B`.
    fn type_tuple_or_function(&mut self) -> Result<TypeIdentifier, SyntaxError> {
        let start = self.current_offset();
        self.advance(); // '('
        let mut elements = Vec::new();
        let mut rendered = Vec::new();
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                let (text, element) = self.tuple_type_element()?;
                rendered.push(text);
                elements.push(element);
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(PunctuationId::RParen, "Expected ')' to close tuple type")?;
        let tuple_name = format!("({})", rendered.join(", "));

        let checkpoint = self.checkpoint();
        let mut effects = Vec::new();
        if self.match_contextual(ContextualId::Async) {
            effects.push(contextual::as_str(ContextualId::Async));
        }
        if self.match_keyword(KeywordId::Throws) {
            effects.push(keywords::as_str(KeywordId::Throws));
        } else if self.match_keyword(KeywordId::Rethrows) {
            effects.push(keywords::as_str(KeywordId::Rethrows));
        }
        if !self.match_punct(PunctuationId::Arrow) {
            self.rewind(checkpoint);
            return Ok(self.finish_type(tuple_name, TypeKind::Tuple, start, elements));
        }

        let result = self.type_identifier()?;
        let mut name = tuple_name;
        for effect in effects {
            name.push(' ');
            name.push_str(effect);
        }
        name.push_str(" -> ");
        name.push_str(&result.name);
        elements.push(result);
        Ok(self.finish_type(name, TypeKind::Function, start, elements))
    }

    /// One tuple/function-type element: optional label(s), attributes, `inout`, type, `...`.
    fn tuple_type_element(&mut self) -> Result<(String, TypeIdentifier), SyntaxError> {
        let labels = if self.peek_nth(1).kind.is_punctuation(PunctuationId::Colon) && self.is_label_at(0) {
            1
        } else if self.peek_nth(2).kind.is_punctuation(PunctuationId::Colon)
            && self.is_label_at(0)
            && self.is_label_at(1)
        {
            2
        } else {
            0
        };
        let mut prefix = Vec::new();
        for _ in 0..labels {
            prefix.push(self.label_text_at(0));
            self.advance();
        }
        if labels > 0 {
            self.advance(); // ':'
        }

        self.skip_attributes();
        let is_inout = self.match_keyword(KeywordId::Inout);
        let ty = self.type_identifier()?;
        let mut text = ty.name.clone();
        if is_inout {
            text = format!("inout {}", text);
        }
        if self.match_punct(PunctuationId::Ellipsis) {
            text.push_str("...");
        }
        if !prefix.is_empty() {
            text = format!("{}: {}", prefix.join(" "), text);
        }
        Ok((text, ty))
    }

    /// `some P` / `any P`.
    fn type_prefixed(&mut self) -> Result<TypeIdentifier, SyntaxError> {
        let start = self.current_offset();
        let keyword = self.peek().kind.ident().unwrap_or_default().to_string();
        self.advance();
        let inner = self.nested(|p| p.type_composition())?;
        let name = format!("{} {}", keyword, inner.name);
        Ok(self.finish_type(name, TypeKind::Prefixed, start, vec![inner]))
    }

    // ========================================================================
    // Lookahead
    // ========================================================================

    /// Return `true` if the token `n` ahead can start a named type.
    fn is_type_name_at(&self, n: usize) -> bool {
        matches!(
            self.peek_nth(n).kind,
            TokenKind::Ident(_) | TokenKind::Keyword(KeywordId::Any | KeywordId::SelfType)
        )
    }

    /// Return `true` if the current `some`/`any` word prefixes a type rather than naming one.
    fn at_type_prefix(&self) -> bool {
        let is_prefix = matches!(
            self.peek().kind.contextual_id(),
            Some(ContextualId::Some | ContextualId::AnyExistential)
        );
        let next = self.peek_nth(1);
        is_prefix
            && !next.newline_before
            && (self.is_type_name_at(1)
                || next.kind.is_punctuation(PunctuationId::LParen)
                || next.kind.is_punctuation(PunctuationId::LBracket))
    }

    fn finish_type(&self, name: String, kind: TypeKind, start: usize, children: Vec<TypeIdentifier>) -> TypeIdentifier {
        let span = Span::new(start, self.previous_end().max(start));
        TypeIdentifier {
            name,
            kind,
            span,
            text: self.text_of(span),
            children,
        }
    }
}
