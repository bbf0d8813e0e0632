/// Parsing utilities.
///
/// This chunk contains small helpers shared by the declaration and type grammars: source slicing,
/// argument-label lookahead, attribute skipping and declaration-modifier collection.
impl<'a> Parser<'a> {
    /// Exact source text covered by `span` (empty if the span is not a valid slice).
    fn text_of(&self, span: Span) -> String {
        span.slice(self.source).unwrap_or_default().to_string()
    }

    /// Return `true` if the token `n` ahead can be an argument label or parameter name.
    ///
    /// Reserved words are valid labels except `inout`, `var` and `let`.
    fn is_label_at(&self, n: usize) -> bool {
        match &self.peek_nth(n).kind {
            TokenKind::Ident(_) | TokenKind::Punctuation(PunctuationId::Underscore) => true,
            TokenKind::Keyword(id) => keywords::is_argument_label(*id),
            _ => false,
        }
    }

    /// Spelling of the label token `n` ahead (call only when [`Parser::is_label_at`] holds).
    fn label_text_at(&self, n: usize) -> String {
        match &self.peek_nth(n).kind {
            TokenKind::Ident(name) => name.clone(),
            TokenKind::Punctuation(id) => punctuation::as_str(*id).to_string(),
            TokenKind::Keyword(id) => keywords::as_str(*id).to_string(),
            other => other.describe(),
        }
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    /// Skip any number of `@attribute`, `@attribute(args)` and `@Module.Wrapper<T>(args)` prefixes.
    fn skip_attributes(&mut self) {
        while self.check_punct(PunctuationId::At) {
            self.advance();
            if !matches!(self.peek().kind, TokenKind::Ident(_) | TokenKind::Keyword(_)) {
                continue;
            }
            self.advance();
            while self.check_punct(PunctuationId::Dot) && matches!(self.peek_nth(1).kind, TokenKind::Ident(_)) {
                self.advance();
                self.advance();
            }
            if self.check_punct(PunctuationId::LAngle) && self.is_adjacent() {
                self.skip_angle_clause();
            }
            // `@escaping (Int) -> Void`: a parenthesis after whitespace belongs to what follows.
            if self.check_punct(PunctuationId::LParen) && self.is_adjacent() {
                self.skip_group();
            }
        }
    }

    // ========================================================================
    // Declaration modifiers
    // ========================================================================

    /// Consume attributes and modifiers in front of a declaration keyword.
    fn declaration_modifiers(&mut self) -> Modifiers {
        let mut modifiers = Modifiers::default();
        loop {
            if self.check_punct(PunctuationId::At) {
                self.skip_attributes();
                continue;
            }
            match &self.peek().kind {
                TokenKind::Keyword(KeywordId::Static) => {
                    self.advance();
                    modifiers.is_static = true;
                }
                TokenKind::Keyword(KeywordId::Class) if self.class_is_modifier() => {
                    self.advance();
                    modifiers.is_static = true;
                }
                TokenKind::Keyword(
                    KeywordId::Private | KeywordId::Fileprivate | KeywordId::Internal | KeywordId::Public,
                ) => {
                    self.advance();
                    self.skip_modifier_argument();
                }
                TokenKind::Ident(_) => match self.peek().kind.contextual_id() {
                    Some(id) if contextual::is_declaration_modifier(id) && self.modifier_applies() => {
                        self.advance();
                        match id {
                            ContextualId::Weak => modifiers.ownership = Some(Ownership::Weak),
                            ContextualId::Unowned => modifiers.ownership = Some(self.unowned_variant()),
                            _ => self.skip_modifier_argument(),
                        }
                    }
                    _ => return modifiers,
                },
                _ => return modifiers,
            }
        }
    }

    /// `class func` / `class var`: `class` as a type-member modifier rather than a declaration.
    fn class_is_modifier(&self) -> bool {
        let next = &self.peek_nth(1).kind;
        matches!(
            next,
            TokenKind::Keyword(
                KeywordId::Func | KeywordId::Var | KeywordId::Let | KeywordId::Subscript | KeywordId::Typealias
            )
        ) || next.contextual_id().is_some_and(|id| {
            matches!(id, ContextualId::Override | ContextualId::Final | ContextualId::Open)
        })
    }

    /// Return `true` if the contextual word at the cursor is followed by something a modifier can precede.
    fn modifier_applies(&self) -> bool {
        let next = self.peek_nth(1);
        match &next.kind {
            TokenKind::Keyword(_) | TokenKind::Punctuation(PunctuationId::At) => true,
            // `unowned(safe)`, `nonisolated(unsafe)`
            TokenKind::Punctuation(PunctuationId::LParen) => next.span.start == self.peek().span.end,
            TokenKind::Ident(_) => next.kind.contextual_id().is_some_and(|id| {
                contextual::is_declaration_modifier(id) || id == ContextualId::Actor
            }),
            _ => false,
        }
    }

    /// Resolve `unowned`, `unowned(safe)` or `unowned(unsafe)` after the `unowned` word was consumed.
    fn unowned_variant(&mut self) -> Ownership {
        if !(self.check_punct(PunctuationId::LParen) && self.is_adjacent()) {
            return Ownership::Unowned;
        }
        let ownership = match self.peek_nth(1).kind.contextual_id() {
            Some(ContextualId::Safe) => Ownership::UnownedSafe,
            Some(ContextualId::Unsafe) => Ownership::UnownedUnsafe,
            _ => Ownership::Unowned,
        };
        self.skip_group();
        ownership
    }

    /// Skip `(set)` after an access modifier, and similar parenthesised modifier arguments.
    fn skip_modifier_argument(&mut self) {
        if self.check_punct(PunctuationId::LParen) && self.is_adjacent() {
            self.skip_group();
        }
    }
}
