// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for Objective-C source code.
//!
//! This module converts source text into a stream of [`Token`]s. The
//! lexer is hand-written for maximum control over error recovery.
//!
//! # Design Principles
//!
//! - **Error recovery**: never panic on malformed input; emit
//!   [`TokenKind::Error`] and keep going
//! - **Trivia preservation**: comments are stripped from the stream but
//!   their extents are recorded as leading trivia on the next token
//! - **Precise spans**: every token carries its exact source location
//!
//! # Example
//!
//! ```
//! use objswift_core::source_analysis::{Lexer, TokenKind};
//!
//! let tokens: Vec<_> = Lexer::new("@interface Foo").collect();
//! assert_eq!(tokens.len(), 2); // @interface, Foo
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use ecow::EcoString;

use super::error::LexError;
use super::{AtKeyword, Span, Token, TokenKind, Trivia, TriviaKind};

/// A lexer that tokenizes Objective-C source code.
///
/// The lexer is a pull-based producer: it implements [`Iterator`], and
/// the parser asks for one token at a time with single-token lookahead
/// layered on top.
///
/// # Error Recovery
///
/// The lexer never fails completely. Unknown characters, unterminated
/// strings and unrecognized `@` directives produce [`TokenKind::Error`]
/// tokens plus a recorded [`LexError`]; lexing continues at the next
/// character.
pub struct Lexer<'src> {
    /// The source text being lexed.
    source: &'src str,
    /// Character iterator with byte positions.
    chars: Peekable<CharIndices<'src>>,
    /// Current byte position in source.
    position: usize,
    /// Pending trivia to attach to the next token.
    pending_trivia: Vec<Trivia>,
    /// Lexical errors recorded alongside error tokens.
    errors: Vec<LexError>,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("position", &self.position)
            .field("remaining", &self.source.get(self.position..).unwrap_or(""))
            .finish()
    }
}

/// Lexes `source` into tokens, excluding the trailing EOF marker.
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// Lexes `source` into tokens, with an EOF token appended.
///
/// The EOF token carries any trivia that follows the last real token, so
/// trailing comments keep their recorded extents.
#[must_use]
pub fn lex_with_eof(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.lex_token();
        let is_eof = token.kind().is_eof();
        tokens.push(token);
        if is_eof {
            break;
        }
    }
    tokens
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            position: 0,
            pending_trivia: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Takes the lexical errors recorded so far.
    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peeks `n+1` characters ahead without consuming (n=0 is the same as
    /// `peek_char`).
    fn peek_char_n(&self, n: usize) -> Option<char> {
        let mut iter = self.chars.clone();
        for _ in 0..n {
            iter.next();
        }
        iter.next().map(|(_, c)| c)
    }

    /// Consumes the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.position = pos + c.len_utf8();
        Some(c)
    }

    /// Consumes characters while the predicate is true.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Returns the current byte position.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    fn current_position(&self) -> u32 {
        self.position as u32
    }

    /// Creates a span from start to current position.
    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.current_position())
    }

    /// Extracts source text for a span.
    fn text_for(&self, span: Span) -> &'src str {
        &self.source[span.as_range()]
    }

    /// Skips whitespace and comments, collecting them as trivia.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek_char() {
                Some(' ' | '\t' | '\r' | '\n') => {
                    let start = self.current_position();
                    self.advance_while(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));
                    self.pending_trivia.push(Trivia {
                        kind: TriviaKind::Whitespace,
                        span: self.span_from(start),
                    });
                }
                Some('/') if self.peek_char_n(1) == Some('/') => {
                    let start = self.current_position();
                    self.advance(); // /
                    self.advance(); // /
                    self.advance_while(|c| c != '\n');
                    self.pending_trivia.push(Trivia {
                        kind: TriviaKind::LineComment,
                        span: self.span_from(start),
                    });
                }
                Some('/') if self.peek_char_n(1) == Some('*') => {
                    self.lex_block_comment();
                }
                Some('#') => {
                    // Preprocessor lines are not part of the token
                    // stream; their extents are kept like comments.
                    let start = self.current_position();
                    self.advance_while(|c| c != '\n');
                    self.pending_trivia.push(Trivia {
                        kind: TriviaKind::Directive,
                        span: self.span_from(start),
                    });
                }
                _ => break,
            }
        }
    }

    /// Lexes a block comment: `/* ... */` (C-style, not nested).
    fn lex_block_comment(&mut self) {
        let start = self.current_position();
        self.advance(); // /
        self.advance(); // *

        let mut terminated = false;
        loop {
            match self.peek_char() {
                None => break,
                Some('*') if self.peek_char_n(1) == Some('/') => {
                    self.advance(); // *
                    self.advance(); // /
                    terminated = true;
                    break;
                }
                _ => {
                    self.advance();
                }
            }
        }

        let span = self.span_from(start);
        if !terminated {
            self.errors.push(LexError::new(
                super::error::LexErrorKind::UnterminatedComment,
                span,
            ));
        }
        self.pending_trivia.push(Trivia {
            kind: TriviaKind::BlockComment,
            span,
        });
    }

    /// Lexes the next token.
    pub(super) fn lex_token(&mut self) -> Token {
        self.skip_trivia();
        let leading_trivia = std::mem::take(&mut self.pending_trivia);

        let start = self.current_position();

        let kind = match self.peek_char() {
            None => TokenKind::Eof,
            Some(c) => self.lex_token_kind(c, start),
        };

        Token::with_trivia(kind, self.span_from(start), leading_trivia)
    }

    /// Lexes a token kind based on the first character.
    fn lex_token_kind(&mut self, c: char, start: u32) -> TokenKind {
        match c {
            'a'..='z' | 'A'..='Z' | '_' => self.lex_identifier(),
            '0'..='9' => self.lex_number(),
            '"' => self.lex_string(start),
            '@' => self.lex_at_directive(start),

            '(' => {
                self.advance();
                TokenKind::LeftParen
            }
            ')' => {
                self.advance();
                TokenKind::RightParen
            }
            '{' => {
                self.advance();
                TokenKind::LeftBrace
            }
            '}' => {
                self.advance();
                TokenKind::RightBrace
            }
            '[' => {
                self.advance();
                TokenKind::LeftBracket
            }
            ']' => {
                self.advance();
                TokenKind::RightBracket
            }
            ',' => {
                self.advance();
                TokenKind::Comma
            }
            ';' => {
                self.advance();
                TokenKind::Semicolon
            }
            ':' => {
                self.advance();
                TokenKind::Colon
            }
            '*' => {
                self.advance();
                TokenKind::Star
            }
            '<' => {
                self.advance();
                TokenKind::LessThan
            }
            '>' => {
                self.advance();
                TokenKind::GreaterThan
            }

            '+' | '-' | '=' | '!' | '&' | '|' | '/' | '%' | '^' | '~' | '?' | '.' => {
                self.lex_operator()
            }

            _ => {
                self.advance();
                let span = self.span_from(start);
                let text = self.text_for(span);
                self.errors.push(LexError::unexpected_char(c, span));
                TokenKind::Error(EcoString::from(text))
            }
        }
    }

    /// Lexes an identifier.
    fn lex_identifier(&mut self) -> TokenKind {
        let start = self.current_position();
        self.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let text = self.text_for(self.span_from(start));
        TokenKind::Identifier(EcoString::from(text))
    }

    /// Lexes an `@` directive using the fixed keyword table, or an
    /// Objective-C string literal `@"..."`.
    ///
    /// Keyword recognition happens *after* identifier lexing: the word
    /// following `@` is lexed first, then looked up. An unrecognized
    /// directive becomes an error token.
    fn lex_at_directive(&mut self, start: u32) -> TokenKind {
        self.advance(); // @

        if self.peek_char() == Some('"') {
            return self.lex_string(start);
        }

        if !self
            .peek_char()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        {
            let span = self.span_from(start);
            self.errors.push(LexError::unexpected_char('@', span));
            return TokenKind::Error(EcoString::from("@"));
        }

        let ident_start = self.current_position();
        self.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let ident = self.text_for(self.span_from(ident_start));

        match AtKeyword::from_ident(ident) {
            Some(keyword) => TokenKind::At(keyword),
            None => {
                let span = self.span_from(start);
                let text = self.text_for(span);
                self.errors.push(LexError::unknown_directive(text, span));
                TokenKind::Error(EcoString::from(text))
            }
        }
    }

    /// Lexes an integer or float literal.
    ///
    /// Accepts decimal, hex (`0x`), octal (leading `0`), float forms with
    /// an exponent, and the C suffixes (`f`/`F` for floats, `u`/`U`/`l`/`L`
    /// for integers).
    fn lex_number(&mut self) -> TokenKind {
        let start = self.current_position();

        // Hex: 0x...
        if self.peek_char() == Some('0') && matches!(self.peek_char_n(1), Some('x' | 'X')) {
            self.advance(); // 0
            self.advance(); // x
            self.advance_while(|c| c.is_ascii_hexdigit());
            self.advance_while(|c| matches!(c, 'u' | 'U' | 'l' | 'L'));
            let text = self.text_for(self.span_from(start));
            return TokenKind::Integer(EcoString::from(text));
        }

        // Integer part (decimal, or octal when it starts with 0)
        self.advance_while(|c| c.is_ascii_digit());

        // Float: decimal point followed by a digit
        let mut is_float = false;
        if self.peek_char() == Some('.') && self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.advance(); // .
            self.advance_while(|c| c.is_ascii_digit());
            is_float = true;
        }

        // Exponent: e or E, optional sign
        if matches!(self.peek_char(), Some('e' | 'E'))
            && (self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit())
                || (matches!(self.peek_char_n(1), Some('+' | '-'))
                    && self.peek_char_n(2).is_some_and(|c| c.is_ascii_digit())))
        {
            self.advance(); // e
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.advance();
            }
            self.advance_while(|c| c.is_ascii_digit());
            is_float = true;
        }

        // Suffixes
        if matches!(self.peek_char(), Some('f' | 'F')) {
            self.advance();
            is_float = true;
        } else if !is_float {
            self.advance_while(|c| matches!(c, 'u' | 'U' | 'l' | 'L'));
        }

        let text = self.text_for(self.span_from(start));
        if is_float {
            TokenKind::Float(EcoString::from(text))
        } else {
            TokenKind::Integer(EcoString::from(text))
        }
    }

    /// Lexes a string literal with backslash escapes.
    ///
    /// Adjacent string literals separated only by whitespace concatenate
    /// into one token whose span covers all parts.
    fn lex_string(&mut self, start: u32) -> TokenKind {
        let mut content = String::new();

        loop {
            self.advance(); // opening quote
            let terminated = self.lex_string_body(&mut content, start);
            if !terminated {
                let span = self.span_from(start);
                self.errors.push(LexError::unterminated_string(span));
                return TokenKind::Error(EcoString::from(self.text_for(span)));
            }

            // Adjacent-string concatenation: look past whitespace for
            // another opening quote (with an optional `@` prefix).
            let mut lookahead = 0;
            while matches!(self.peek_char_n(lookahead), Some(' ' | '\t' | '\r' | '\n')) {
                lookahead += 1;
            }
            let next_is_string = match self.peek_char_n(lookahead) {
                Some('"') => true,
                Some('@') => self.peek_char_n(lookahead + 1) == Some('"'),
                _ => false,
            };
            if !next_is_string {
                break;
            }
            for _ in 0..lookahead {
                self.advance();
            }
            if self.peek_char() == Some('@') {
                self.advance();
            }
        }

        TokenKind::String(EcoString::from(content.as_str()))
    }

    /// Consumes one quoted string body (after the opening quote), pushing
    /// decoded characters into `content`. Returns `false` on EOF before
    /// the closing quote.
    fn lex_string_body(&mut self, content: &mut String, _start: u32) -> bool {
        loop {
            match self.peek_char() {
                None => return false,
                Some('"') => {
                    self.advance();
                    return true;
                }
                Some('\\') => {
                    self.advance();
                    match self.advance() {
                        None => return false,
                        Some('n') => content.push('\n'),
                        Some('t') => content.push('\t'),
                        Some('r') => content.push('\r'),
                        Some('0') => content.push('\0'),
                        Some('\\') => content.push('\\'),
                        Some('"') => content.push('"'),
                        Some('\'') => content.push('\''),
                        // Unknown escapes are preserved verbatim.
                        Some(c) => {
                            content.push('\\');
                            content.push(c);
                        }
                    }
                }
                Some(c) => {
                    self.advance();
                    content.push(c);
                }
            }
        }
    }

    /// Lexes an operator token, greedily matching common two-character
    /// forms.
    fn lex_operator(&mut self) -> TokenKind {
        let start = self.current_position();
        let first = self.advance().unwrap_or_default();

        let second = self.peek_char();
        let two_char = matches!(
            (first, second),
            ('=' | '!' | '+' | '-' | '/' | '%' | '^', Some('='))
                | ('+', Some('+'))
                | ('-', Some('-' | '>'))
                | ('&', Some('&' | '='))
                | ('|', Some('|' | '='))
        );
        if two_char {
            self.advance();
        }

        let text = self.text_for(self.span_from(start));
        TokenKind::Operator(EcoString::from(text))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.lex_token();
        if token.kind().is_eof() {
            None
        } else {
            Some(token)
        }
    }
}
