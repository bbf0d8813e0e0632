/// `self` expression grammar.
///
/// Only the shape right after `self` matters to callers (a member reference, a delegating `self.init`, or
/// a subscript), so nothing beyond that is parsed.
impl<'a> Parser<'a> {
    fn self_expression(&mut self) -> Result<SelfExpression, SyntaxError> {
        let start = self.current_offset();
        self.expect_keyword(KeywordId::SelfKw, "Expected 'self'")?;

        let kind = if self.check_punct(PunctuationId::Dot) {
            match &self.peek_nth(1).kind {
                TokenKind::Keyword(KeywordId::Init) => {
                    self.advance();
                    self.advance();
                    SelfExpressionKind::Initializer
                }
                TokenKind::Ident(_) => {
                    self.advance();
                    self.advance();
                    SelfExpressionKind::Method
                }
                _ => SelfExpressionKind::Bare,
            }
        } else if self.check_punct(PunctuationId::LBracket) && !self.peek().newline_before {
            // Arguments are not parsed; an unterminated `self[a` runs to the end of input.
            self.skip_group();
            SelfExpressionKind::Subscript
        } else {
            SelfExpressionKind::Bare
        };

        let span = Span::new(start, self.previous_end());
        Ok(SelfExpression {
            kind,
            span,
            text: self.text_of(span),
        })
    }
}
