// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Token types for Objective-C lexical analysis.
//!
//! Each token consists of:
//! - A [`TokenKind`] indicating the type of token
//! - A [`Span`] indicating its location in source
//! - Leading [`Trivia`] (whitespace and comments) with exact extents
//!
//! # At-keywords
//!
//! Objective-C directives (`@interface`, `@property`, …) form a closed
//! set, modeled by [`AtKeyword`]. The lexer recognizes them *after*
//! identifier lexing via [`AtKeyword::from_ident`]; an `@` followed by
//! anything else becomes an error token.

use ecow::EcoString;

use super::Span;

/// The closed set of Objective-C `@`-directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtKeyword {
    /// `@interface`
    Interface,
    /// `@implementation`
    Implementation,
    /// `@protocol`
    Protocol,
    /// `@end`
    End,
    /// `@class` (forward declaration)
    Class,
    /// `@property`
    Property,
    /// `@synthesize`
    Synthesize,
    /// `@dynamic`
    Dynamic,
    /// `@private`
    Private,
    /// `@protected`
    Protected,
    /// `@package`
    Package,
    /// `@public`
    Public,
    /// `@optional`
    Optional,
    /// `@required`
    Required,
    /// `@selector`
    Selector,
}

impl AtKeyword {
    /// Looks up an at-keyword from the identifier following `@`.
    ///
    /// This is the fixed keyword table consulted after identifier lexing.
    #[must_use]
    pub fn from_ident(ident: &str) -> Option<Self> {
        match ident {
            "interface" => Some(Self::Interface),
            "implementation" => Some(Self::Implementation),
            "protocol" => Some(Self::Protocol),
            "end" => Some(Self::End),
            "class" => Some(Self::Class),
            "property" => Some(Self::Property),
            "synthesize" => Some(Self::Synthesize),
            "dynamic" => Some(Self::Dynamic),
            "private" => Some(Self::Private),
            "protected" => Some(Self::Protected),
            "package" => Some(Self::Package),
            "public" => Some(Self::Public),
            "optional" => Some(Self::Optional),
            "required" => Some(Self::Required),
            "selector" => Some(Self::Selector),
            _ => None,
        }
    }

    /// Returns the source spelling, including the leading `@`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Interface => "@interface",
            Self::Implementation => "@implementation",
            Self::Protocol => "@protocol",
            Self::End => "@end",
            Self::Class => "@class",
            Self::Property => "@property",
            Self::Synthesize => "@synthesize",
            Self::Dynamic => "@dynamic",
            Self::Private => "@private",
            Self::Protected => "@protected",
            Self::Package => "@package",
            Self::Public => "@public",
            Self::Optional => "@optional",
            Self::Required => "@required",
            Self::Selector => "@selector",
        }
    }

    /// Returns `true` for the ivar visibility directives.
    #[must_use]
    pub const fn is_visibility(self) -> bool {
        matches!(
            self,
            Self::Private | Self::Protected | Self::Package | Self::Public
        )
    }
}

/// The kind of token, not including source location or trivia.
///
/// Tokens are cheap to clone (string data uses [`EcoString`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// An identifier: `NSString`, `myMethod`, `_ivar`
    Identifier(EcoString),

    /// An integer literal: `42`, `0xFF`, `0755`
    Integer(EcoString),

    /// A floating-point literal: `3.14`, `2.5e10`, `1.0f`
    Float(EcoString),

    /// A string literal: `"hello"`. Adjacent literals are concatenated
    /// into a single token; the content excludes the quotes.
    String(EcoString),

    /// One of the closed set of `@`-directives.
    At(AtKeyword),

    /// Left parenthesis: `(`
    LeftParen,
    /// Right parenthesis: `)`
    RightParen,
    /// Left brace: `{`
    LeftBrace,
    /// Right brace: `}`
    RightBrace,
    /// Left bracket: `[`
    LeftBracket,
    /// Right bracket: `]`
    RightBracket,
    /// Comma: `,`
    Comma,
    /// Semicolon: `;`
    Semicolon,
    /// Colon: `:`
    Colon,
    /// Asterisk: `*` (pointer declarator or multiplication)
    Star,
    /// Less-than: `<` (generic/protocol list open or comparison)
    LessThan,
    /// Greater-than: `>` (generic/protocol list close or comparison)
    GreaterThan,

    /// Any other operator: `+`, `-`, `=`, `->`, `==`, `&&`, …
    Operator(EcoString),

    /// End of file
    Eof,

    /// Invalid/error token (preserves unrecognized text for recovery)
    Error(EcoString),
}

impl TokenKind {
    /// Returns `true` if this token is an identifier.
    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        matches!(self, Self::Identifier(_))
    }

    /// Returns `true` if this token is a literal value.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_) | Self::String(_))
    }

    /// Returns `true` if this is the given at-keyword.
    #[must_use]
    pub fn is_at(&self, keyword: AtKeyword) -> bool {
        matches!(self, Self::At(k) if *k == keyword)
    }

    /// Returns `true` if this is any at-keyword.
    #[must_use]
    pub const fn is_any_at(&self) -> bool {
        matches!(self, Self::At(_))
    }

    /// Returns `true` if this is the end-of-file marker.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }

    /// Returns `true` if this is an error token.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Returns the string content if this token carries one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Identifier(s)
            | Self::Integer(s)
            | Self::Float(s)
            | Self::String(s)
            | Self::Operator(s)
            | Self::Error(s) => Some(s),
            Self::At(k) => Some(k.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(s) | Self::Integer(s) | Self::Float(s) | Self::Operator(s) => {
                write!(f, "{s}")
            }
            Self::String(s) => write!(f, "\"{s}\""),
            Self::At(k) => write!(f, "{}", k.as_str()),
            Self::Error(s) => write!(f, "<error: {s}>"),
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
            Self::LeftBrace => write!(f, "{{"),
            Self::RightBrace => write!(f, "}}"),
            Self::LeftBracket => write!(f, "["),
            Self::RightBracket => write!(f, "]"),
            Self::Comma => write!(f, ","),
            Self::Semicolon => write!(f, ";"),
            Self::Colon => write!(f, ":"),
            Self::Star => write!(f, "*"),
            Self::LessThan => write!(f, "<"),
            Self::GreaterThan => write!(f, ">"),
            Self::Eof => write!(f, "<eof>"),
        }
    }
}

/// Non-semantic content: whitespace and comments.
///
/// Comments are stripped from the token stream but their extents are
/// recorded here, attached to the following token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trivia {
    /// The kind of trivia.
    pub kind: TriviaKind,
    /// The exact source extent of this trivia piece.
    pub span: Span,
}

/// The kind of a [`Trivia`] piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaKind {
    /// Spaces, tabs, newlines.
    Whitespace,
    /// A line comment: `// …`
    LineComment,
    /// A block comment: `/* … */` (C-style, not nested)
    BlockComment,
    /// A preprocessor line: `#import …`, `#define …`
    Directive,
}

impl Trivia {
    /// Returns `true` if this is a comment.
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(self.kind, TriviaKind::LineComment | TriviaKind::BlockComment)
    }
}

/// A token with its source location and leading trivia.
///
/// # Examples
///
/// ```
/// use objswift_core::source_analysis::{Span, Token, TokenKind};
///
/// let token = Token::new(TokenKind::Identifier("foo".into()), Span::new(0, 3));
/// assert!(token.kind().is_identifier());
/// assert_eq!(token.span().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    span: Span,
    leading_trivia: Vec<Trivia>,
}

impl Token {
    /// Creates a new token with no trivia.
    #[must_use]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            leading_trivia: Vec::new(),
        }
    }

    /// Creates a new token with leading trivia.
    #[must_use]
    pub fn with_trivia(kind: TokenKind, span: Span, leading_trivia: Vec<Trivia>) -> Self {
        Self {
            kind,
            span,
            leading_trivia,
        }
    }

    /// Returns the kind of this token.
    #[must_use]
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Consumes the token and returns its kind.
    #[must_use]
    pub fn into_kind(self) -> TokenKind {
        self.kind
    }

    /// Returns the source span of this token (excluding trivia).
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Returns the trivia that precedes this token.
    #[must_use]
    pub fn leading_trivia(&self) -> &[Trivia] {
        &self.leading_trivia
    }

    /// Returns `true` if this token has any leading comments.
    #[must_use]
    pub fn has_leading_comment(&self) -> bool {
        self.leading_trivia.iter().any(Trivia::is_comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_keyword_table() {
        assert_eq!(AtKeyword::from_ident("interface"), Some(AtKeyword::Interface));
        assert_eq!(AtKeyword::from_ident("end"), Some(AtKeyword::End));
        assert_eq!(AtKeyword::from_ident("selector"), Some(AtKeyword::Selector));
        assert_eq!(AtKeyword::from_ident("autoreleasepool"), None);
        assert_eq!(AtKeyword::from_ident(""), None);
    }

    #[test]
    fn at_keyword_spelling_roundtrip() {
        for kw in [
            AtKeyword::Interface,
            AtKeyword::Implementation,
            AtKeyword::Protocol,
            AtKeyword::End,
            AtKeyword::Class,
            AtKeyword::Property,
            AtKeyword::Synthesize,
            AtKeyword::Dynamic,
            AtKeyword::Private,
            AtKeyword::Protected,
            AtKeyword::Package,
            AtKeyword::Public,
            AtKeyword::Optional,
            AtKeyword::Required,
            AtKeyword::Selector,
        ] {
            let spelled = kw.as_str();
            assert_eq!(AtKeyword::from_ident(&spelled[1..]), Some(kw));
        }
    }

    #[test]
    fn visibility_predicate() {
        assert!(AtKeyword::Private.is_visibility());
        assert!(AtKeyword::Protected.is_visibility());
        assert!(AtKeyword::Package.is_visibility());
        assert!(AtKeyword::Public.is_visibility());
        assert!(!AtKeyword::Interface.is_visibility());
    }

    #[test]
    fn token_kind_display() {
        assert_eq!(TokenKind::Identifier("foo".into()).to_string(), "foo");
        assert_eq!(TokenKind::Integer("42".into()).to_string(), "42");
        assert_eq!(TokenKind::String("hi".into()).to_string(), "\"hi\"");
        assert_eq!(TokenKind::At(AtKeyword::Property).to_string(), "@property");
        assert_eq!(TokenKind::Star.to_string(), "*");
        assert_eq!(TokenKind::Semicolon.to_string(), ";");
        assert_eq!(TokenKind::Eof.to_string(), "<eof>");
    }

    #[test]
    fn token_kind_predicates() {
        assert!(TokenKind::Identifier("x".into()).is_identifier());
        assert!(TokenKind::Integer("1".into()).is_literal());
        assert!(TokenKind::Float("1.5".into()).is_literal());
        assert!(!TokenKind::Identifier("x".into()).is_literal());
        assert!(TokenKind::At(AtKeyword::End).is_at(AtKeyword::End));
        assert!(!TokenKind::At(AtKeyword::End).is_at(AtKeyword::Interface));
        assert!(TokenKind::Eof.is_eof());
        assert!(TokenKind::Error("?".into()).is_error());
    }

    #[test]
    fn token_creation_and_accessors() {
        let token = Token::new(TokenKind::Identifier("foo".into()), Span::new(0, 3));
        assert!(matches!(token.kind(), TokenKind::Identifier(s) if s == "foo"));
        assert_eq!(token.span().start(), 0);
        assert!(token.leading_trivia().is_empty());
    }

    #[test]
    fn token_with_comment_trivia() {
        let trivia = vec![
            Trivia {
                kind: TriviaKind::LineComment,
                span: Span::new(0, 10),
            },
            Trivia {
                kind: TriviaKind::Whitespace,
                span: Span::new(10, 11),
            },
        ];
        let token = Token::with_trivia(TokenKind::Semicolon, Span::new(11, 12), trivia);
        assert!(token.has_leading_comment());
        assert_eq!(token.leading_trivia().len(), 2);
        assert_eq!(token.leading_trivia()[0].span, Span::new(0, 10));
    }
}
