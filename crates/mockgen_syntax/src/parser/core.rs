/// Parser core types and entrypoints.
///
/// This chunk defines the [`Parser`] type, its constructors (whole stream or a byte window of it), and the
/// whole-file entrypoint [`Parser::parse_file`].
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.

/// Declaration modifiers and attributes seen before a declaration keyword.
#[derive(Debug, Clone, Copy, Default)]
struct Modifiers {
    is_static: bool,
    ownership: Option<Ownership>,
}

/// Parser state.
///
/// ## Notes
/// - The parser reads a borrowed token slice. A window limits it to the tokens inside a byte range; past the
///   window the parser sees a synthetic `Eof`, so grammars never read outside their entry.
/// - Grammars return `Result`; recoverable failures (a bad parameter, a bad member) are collected in
///   `errors` and surfaced through [`Parsed::diagnostics`].
pub struct Parser<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
    /// Index of the first token of the window.
    first: usize,
    /// Tokens at or after this index are outside the window.
    limit: usize,
    eof: Token,
    depth: usize,
    config: ParseConfig,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    /// Create a parser over a whole token stream.
    ///
    /// ## Parameters
    /// - `source`: The text `tokens` were lexed from; used to slice node text.
    /// - `tokens`: Token stream produced by `mockgen_syntax::lexer`.
    pub fn new(source: &'a str, tokens: &'a [Token]) -> Self {
        let limit = tokens
            .iter()
            .position(|t| matches!(t.kind, TokenKind::Eof))
            .unwrap_or(tokens.len());
        let eof_span = tokens.get(limit).map_or(Span::new(source.len(), source.len()), |t| t.span);
        Self {
            source,
            tokens,
            pos: 0,
            first: 0,
            limit,
            eof: Token::new(TokenKind::Eof, eof_span),
            depth: 0,
            config: ParseConfig::default(),
            errors: Vec::new(),
        }
    }

    /// Create a parser over the tokens that lie entirely inside `window`.
    pub fn windowed(source: &'a str, tokens: &'a [Token], window: Span) -> Self {
        let first = tokens.partition_point(|t| t.span.start < window.start);
        let limit = tokens.partition_point(|t| t.span.end <= window.end).max(first);
        Self {
            source,
            tokens,
            pos: first,
            first,
            limit,
            eof: Token::new(TokenKind::Eof, Span::new(window.end, window.end)),
            depth: 0,
            config: ParseConfig::default(),
            errors: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: ParseConfig) -> Self {
        self.config = config;
        self
    }

    /// Drain the recoverable errors collected so far.
    pub fn take_errors(&mut self) -> Vec<SyntaxError> {
        std::mem::take(&mut self.errors)
    }

    /// Parse the whole window as a file: top-level declarations, with statements skipped.
    ///
    /// Members that fail to parse are reported in the diagnostics and skipped; the file node always covers
    /// the full source.
    pub fn parse_file(mut self) -> Parsed<File> {
        let mut declarations = Vec::new();
        while !self.is_at_end() {
            if self.check_punct(PunctuationId::RBrace) {
                // Unbalanced closer at file scope.
                self.errors.push(SyntaxError::syntax(
                    "Unexpected '}' at file scope",
                    self.current_span(),
                ));
                self.advance();
                continue;
            }
            let before = self.pos;
            match self.member_declarations() {
                Ok(decls) => declarations.extend(decls),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                }
            }
            if self.pos == before {
                self.advance();
            }
        }

        let file = File {
            span: Span::new(0, self.source.len()),
            text: self.source.to_string(),
            declarations,
        };
        Parsed::new(file, self.errors)
    }
}
