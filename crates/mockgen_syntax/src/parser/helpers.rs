/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `peek_nth`, `advance`, `advance_if`)
/// - Matching / expecting keywords, contextual keywords and punctuation
/// - Backtracking (`checkpoint`, `rewind`) and position → byte offset conversion
/// - Depth guarding (`nested`)
/// - Skipping balanced groups and error recovery (`skip_group`, `synchronize`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Cursor
    // ========================================================================

    /// Return `true` if the cursor is past the window or on [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    /// Return the token `n` positions ahead without consuming anything.
    fn peek_nth(&self, n: usize) -> &Token {
        let index = self.pos + n;
        if index < self.limit {
            &self.tokens[index]
        } else {
            &self.eof
        }
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &Token {
        if self.is_at_end() {
            return &self.eof;
        }
        self.pos += 1;
        &self.tokens[self.pos - 1]
    }

    /// If the current token is exactly `kind`, consume it and return `true`.
    fn advance_if(&mut self, kind: &TokenKind) -> bool {
        if self.peek().kind == *kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn checkpoint(&self) -> usize {
        self.pos
    }

    fn rewind(&mut self, checkpoint: usize) {
        self.pos = checkpoint.clamp(self.first, self.limit);
    }

    /// Byte offset at which the token at `position` starts.
    fn offset_of(&self, position: usize) -> usize {
        if position < self.limit {
            self.tokens[position].span.start
        } else {
            self.eof.span.start
        }
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    fn current_offset(&self) -> usize {
        self.offset_of(self.pos)
    }

    /// End offset of the last consumed token (or the current offset if nothing was consumed yet).
    fn previous_end(&self) -> usize {
        if self.pos > self.first {
            self.tokens[self.pos - 1].span.end
        } else {
            self.current_offset()
        }
    }

    /// Return `true` if the current token directly follows the previous one with no whitespace.
    fn is_adjacent(&self) -> bool {
        self.pos > self.first && self.peek().span.start == self.previous_end()
    }

    // ========================================================================
    // Matching
    // ========================================================================

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    /// Return `true` if the current token is an identifier spelling the contextual keyword `id`.
    fn check_contextual(&self, id: ContextualId) -> bool {
        self.peek().kind.is_contextual(id)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        self.advance_if(&TokenKind::Keyword(id))
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        self.advance_if(&TokenKind::Punctuation(id))
    }

    fn match_contextual(&mut self, id: ContextualId) -> bool {
        if self.check_contextual(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, id: KeywordId, msg: &str) -> Result<Span, SyntaxError> {
        if self.check_keyword(id) {
            Ok(self.advance().span)
        } else {
            Err(self.error_here(msg))
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, msg: &str) -> Result<Span, SyntaxError> {
        if self.check_punct(id) {
            Ok(self.advance().span)
        } else {
            Err(self.error_here(msg))
        }
    }

    /// Build a syntax error at the current token: `"{msg}, found {token}"`.
    fn error_here(&self, msg: &str) -> SyntaxError {
        SyntaxError::syntax(
            format!("{}, found {}", msg, self.peek().kind.describe()),
            self.current_span(),
        )
    }

    // ========================================================================
    // Depth guard
    // ========================================================================

    /// Run `f` one nesting level deeper, failing once the configured limit is reached.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, SyntaxError>) -> Result<T, SyntaxError> {
        if self.depth >= self.config.max_nesting_depth {
            return Err(self.recursion_limit());
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn recursion_limit(&self) -> SyntaxError {
        SyntaxError::new(
            ErrorKind::RecursionLimit,
            format!("nesting exceeds {} levels", self.config.max_nesting_depth),
            self.current_span(),
        )
        .with_hint("raise `max_nesting_depth` in the parse configuration")
    }

    // ========================================================================
    // Skipping
    // ========================================================================

    /// Consume a balanced `(...)`, `[...]` or `{...}` group starting at the current opener.
    ///
    /// Other bracket kinds inside the group are tracked too; a missing closer runs to the end of input.
    fn skip_group(&mut self) {
        let mut stack: Vec<PunctuationId> = Vec::new();
        loop {
            let id = match self.peek().kind {
                TokenKind::Eof => return,
                TokenKind::Punctuation(id) => Some(id),
                _ => None,
            };
            self.advance();
            match id {
                Some(open @ (PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace)) => {
                    if let Some(close) = punctuation::closing(open) {
                        stack.push(close);
                    }
                }
                Some(close @ (PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace)) => {
                    // Pop through mismatched closers so a stray one cannot swallow the rest of the file.
                    while let Some(expected) = stack.pop() {
                        if expected == close {
                            break;
                        }
                    }
                }
                _ => {}
            }
            if stack.is_empty() {
                return;
            }
        }
    }

    /// Consume a `<...>` clause starting at the current `<`, including nested angle brackets.
    fn skip_angle_clause(&mut self) {
        let mut depth = 0usize;
        loop {
            if self.is_at_end() {
                return;
            }
            if self.check_punct(PunctuationId::LParen)
                || self.check_punct(PunctuationId::LBracket)
                || self.check_punct(PunctuationId::LBrace)
            {
                self.skip_group();
                continue;
            }
            if self.check_punct(PunctuationId::LAngle) {
                depth += 1;
            } else if self.check_punct(PunctuationId::RAngle) {
                depth = depth.saturating_sub(1);
            }
            self.advance();
            if depth == 0 {
                return;
            }
        }
    }

    /// Return `true` if the current token is an opening bracket handled by [`Parser::skip_group`].
    fn at_group_open(&self) -> bool {
        self.check_punct(PunctuationId::LParen)
            || self.check_punct(PunctuationId::LBracket)
            || self.check_punct(PunctuationId::LBrace)
    }

    /// Skip one statement-like run: up to the next line break at bracket depth zero, or a closing `}`.
    fn skip_statement(&mut self) {
        let start = self.pos;
        while !self.is_at_end() {
            if self.pos > start && self.peek().newline_before {
                return;
            }
            if self.check_punct(PunctuationId::RBrace) || self.check_punct(PunctuationId::Semicolon) {
                return;
            }
            if self.at_group_open() {
                self.skip_group();
            } else {
                self.advance();
            }
        }
    }

    /// Return `true` if the current token can begin a declaration.
    fn at_declaration_start(&self) -> bool {
        match &self.peek().kind {
            TokenKind::Keyword(id) => matches!(
                id,
                KeywordId::Associatedtype
                    | KeywordId::Case
                    | KeywordId::Class
                    | KeywordId::Deinit
                    | KeywordId::Enum
                    | KeywordId::Extension
                    | KeywordId::Fileprivate
                    | KeywordId::Func
                    | KeywordId::Import
                    | KeywordId::Init
                    | KeywordId::Internal
                    | KeywordId::Let
                    | KeywordId::Operator
                    | KeywordId::Precedencegroup
                    | KeywordId::Private
                    | KeywordId::Protocol
                    | KeywordId::Public
                    | KeywordId::Static
                    | KeywordId::Struct
                    | KeywordId::Subscript
                    | KeywordId::Typealias
                    | KeywordId::Var
            ),
            TokenKind::Punctuation(PunctuationId::At | PunctuationId::Hash) => true,
            TokenKind::Ident(_) => self.peek().kind.contextual_id().is_some_and(|id| {
                contextual::is_declaration_modifier(id) || id == ContextualId::Actor
            }),
            _ => false,
        }
    }

    /// Skip ahead to the next plausible declaration boundary after an error.
    fn synchronize(&mut self) {
        // Never consume the closer of the enclosing body.
        if self.check_punct(PunctuationId::RBrace) {
            return;
        }
        if self.at_group_open() {
            self.skip_group();
        } else {
            self.advance();
        }
        while !self.is_at_end() {
            if self.check_punct(PunctuationId::RBrace) {
                return;
            }
            if self.peek().newline_before && self.at_declaration_start() {
                return;
            }
            if self.at_group_open() {
                self.skip_group();
            } else {
                self.advance();
            }
        }
    }
}
