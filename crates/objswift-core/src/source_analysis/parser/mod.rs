// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for Objective-C declarations.
//!
//! This parser builds a concrete syntax tree from a stream of tokens. It
//! is designed for rewriting tooling, with comprehensive error recovery
//! and diagnostics.
//!
//! # Design Philosophy
//!
//! - **Error recovery is mandatory** — the parser always produces a tree
//! - **Multiple errors** — report all errors, don't stop at the first
//! - **Precise spans** — every diagnostic points at an exact location
//! - **Follow sets** — recovery discards tokens until the nearest member
//!   of the construct's follow set, which is left unconsumed
//!
//! # Entry points
//!
//! [`Parser::parse_main`] consumes the whole stream into a
//! [`GlobalContext`]. Per-construct entry points
//! ([`Parser::parse_class_interface_node`],
//! [`Parser::parse_class_implementation_node`],
//! [`Parser::parse_class_category_node`],
//! [`Parser::parse_protocol_reference_list`]) are exposed for targeted
//! testing; each runs in a *temporary context* that collects produced
//! nodes into a fresh root and restores the context stack on every exit
//! path.
//!
//! # Usage
//!
//! ```
//! use objswift_core::source_analysis::parse_source;
//!
//! let (context, diagnostics) = parse_source("@class MyClass;").unwrap();
//! assert_eq!(diagnostics.error_count(), 0);
//! assert_eq!(context.members.len(), 1);
//! ```

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::ast::{GlobalContext, TopLevel};
use crate::source_analysis::{
    AtKeyword, Diagnostic, Diagnostics, Lexer, Span, Token, TokenKind,
};

mod declarations;
mod types;

/// A parser state that cannot be recovered from.
///
/// Recoverable syntax errors never surface here; they become
/// [`Diagnostics`] entries. Fatal errors abort the whole rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum FatalParseError {
    /// The token stream ended in a position where no recovery point can
    /// exist, e.g. inside an ivar block's type.
    #[error("unexpected end of file while parsing {context}")]
    UnexpectedEof {
        /// What was being parsed.
        context: &'static str,
        /// Location of the end of input.
        #[label("input ends here")]
        span: Span,
    },
}

/// Parses `source` into a [`GlobalContext`] plus session diagnostics.
///
/// Lexical errors (unknown characters, unterminated strings) are folded
/// into the diagnostics log in source order, ahead of parse diagnostics.
///
/// # Errors
///
/// Returns a [`FatalParseError`] only for unrecoverable states; all
/// syntax problems are reported through the returned [`Diagnostics`].
pub fn parse_source(source: &str) -> Result<(GlobalContext, Diagnostics), FatalParseError> {
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

    let mut diagnostics = Diagnostics::new();
    for error in lexer.take_errors() {
        diagnostics.push(Diagnostic::error(error.to_string(), error.span));
    }

    let mut parser = Parser::with_diagnostics(tokens, diagnostics);
    let context = parser.parse_main()?;
    Ok((context, parser.into_diagnostics()))
}

/// The set of tokens at which panic-mode recovery stops.
///
/// The first member found is left unconsumed, so the caller can decide
/// whether it belongs to the recovered construct or to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FollowSet {
    /// Class/implementation/category body: `@end`, the next
    /// `@interface`/`@implementation`, or EOF.
    ClassBody,
    /// Ivar block: `}` or `@end`.
    IVarBlock,
    /// Property declaration: `;`.
    Property,
    /// Method signature in an interface: `;`.
    MethodInterface,
    /// Method signature in an implementation: `;` or `{`.
    MethodImplementation,
    /// Protocol reference list: `>`, `;` or `{`.
    ProtocolRefList,
}

impl FollowSet {
    /// Returns `true` if recovery should stop at `kind`.
    fn contains(self, kind: &TokenKind) -> bool {
        match self {
            Self::ClassBody => matches!(
                kind,
                TokenKind::At(
                    AtKeyword::End | AtKeyword::Interface | AtKeyword::Implementation
                )
            ),
            Self::IVarBlock => {
                matches!(kind, TokenKind::RightBrace | TokenKind::At(AtKeyword::End))
            }
            Self::Property => matches!(kind, TokenKind::Semicolon),
            Self::MethodInterface => matches!(kind, TokenKind::Semicolon),
            Self::MethodImplementation => {
                matches!(kind, TokenKind::Semicolon | TokenKind::LeftBrace)
            }
            Self::ProtocolRefList => matches!(
                kind,
                TokenKind::GreaterThan | TokenKind::Semicolon | TokenKind::LeftBrace
            ),
        }
    }
}

/// The parser state.
pub struct Parser {
    /// The tokens being parsed.
    tokens: Vec<Token>,
    /// Current token index.
    current: usize,
    /// Accumulated diagnostics.
    diagnostics: Diagnostics,
    /// Whether an `NS_ASSUME_NONNULL_BEGIN` region is open.
    pub(super) assume_nonnull: bool,
    /// Stack of collection roots for temporary contexts.
    context_stack: Vec<GlobalContext>,
}

impl Parser {
    /// Creates a new parser for the given tokens.
    ///
    /// The token stream should end with an EOF token; [`Lexer`] output
    /// via [`crate::source_analysis::lex_with_eof`] satisfies this.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_diagnostics(tokens, Diagnostics::new())
    }

    /// Creates a parser seeded with pre-existing diagnostics (lexical
    /// errors reported ahead of parse errors).
    #[must_use]
    pub fn with_diagnostics(mut tokens: Vec<Token>, diagnostics: Diagnostics) -> Self {
        if !tokens.last().is_some_and(|t| t.kind().is_eof()) {
            let end = tokens.last().map_or(0, |t| t.span().end());
            tokens.push(Token::new(TokenKind::Eof, Span::new(end, end)));
        }
        Self {
            tokens,
            current: 0,
            diagnostics,
            assume_nonnull: false,
            context_stack: Vec::new(),
        }
    }

    /// Returns the diagnostics accumulated so far.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Consumes the parser and returns its diagnostics log.
    #[must_use]
    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Returns the current token.
    pub(super) fn current_token(&self) -> &Token {
        if self.current < self.tokens.len() {
            &self.tokens[self.current]
        } else {
            // Past the end: fall back to the trailing EOF token.
            self.tokens
                .last()
                .expect("Parser has no tokens; expected at least an EOF token")
        }
    }

    /// Returns the current token kind.
    pub(super) fn current_kind(&self) -> &TokenKind {
        self.current_token().kind()
    }

    /// Returns the current token's span.
    pub(super) fn current_span(&self) -> Span {
        self.current_token().span()
    }

    /// Peeks at the next token kind without consuming.
    pub(super) fn peek_kind(&self) -> Option<&TokenKind> {
        self.tokens.get(self.current + 1).map(Token::kind)
    }

    /// Checks if we're at the end of input.
    pub(super) fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Advances to the next token and returns the previous one.
    pub(super) fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.tokens[self.current.saturating_sub(1)].clone()
    }

    /// Checks if the current token matches the given kind exactly.
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consumes the current token if it matches the given kind.
    pub(super) fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Checks if the current token is the given at-keyword.
    pub(super) fn check_at(&self, keyword: AtKeyword) -> bool {
        self.current_kind().is_at(keyword)
    }

    /// Checks if the current token is the given operator.
    pub(super) fn check_operator(&self, op: &str) -> bool {
        matches!(self.current_kind(), TokenKind::Operator(s) if s == op)
    }

    /// Expects the current token to match `kind`, advancing if it does.
    ///
    /// If the token doesn't match, reports an error and returns `None`.
    pub(super) fn expect(&mut self, kind: &TokenKind, message: &str) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            self.error(message);
            None
        }
    }

    // ========================================================================
    // Error Handling & Recovery
    // ========================================================================

    /// Reports an error at the current token.
    pub(super) fn error(&mut self, message: impl Into<ecow::EcoString>) {
        let span = self.current_span();
        self.diagnostics.push(Diagnostic::error(message, span));
    }

    /// Synchronizes to the nearest member of `follow`, which is left
    /// unconsumed. Error tokens crossed during recovery do not produce
    /// further diagnostics — the triggering diagnostic already covers
    /// the region.
    pub(super) fn synchronize(&mut self, follow: FollowSet) {
        while !self.is_at_end() && !follow.contains(self.current_kind()) {
            self.advance();
        }
    }

    /// Reports an error token at the current position as a diagnostic
    /// and consumes it. Returns `true` if the current token was one.
    pub(super) fn consume_error_token(&mut self) -> bool {
        if let TokenKind::Error(text) = self.current_kind() {
            let message = ecow::eco_format!("unexpected input '{text}'");
            self.error(message);
            self.advance();
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Temporary Contexts
    // ========================================================================

    /// Runs `f` inside a fresh collection root, restoring the previous
    /// context on every exit path (success or propagated fatal error).
    pub(super) fn with_temporary_context<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, FatalParseError>,
    ) -> Result<T, FatalParseError> {
        self.context_stack.push(GlobalContext::default());
        let result = f(self);
        self.context_stack.pop();
        result
    }

    /// Appends a declaration to the innermost collection root.
    pub(super) fn emit_member(&mut self, member: TopLevel) {
        if let Some(root) = self.context_stack.last_mut() {
            root.span = if root.members.is_empty() {
                member.span()
            } else {
                root.span.merge(member.span())
            };
            root.members.push(member);
        }
    }

    // ========================================================================
    // Entry Points
    // ========================================================================

    /// Parses the whole token stream into a [`GlobalContext`].
    ///
    /// # Errors
    ///
    /// Returns a [`FatalParseError`] for unrecoverable states; syntax
    /// errors are recorded as diagnostics instead.
    pub fn parse_main(&mut self) -> Result<GlobalContext, FatalParseError> {
        self.context_stack.push(GlobalContext::default());
        let result = self.parse_top_level_members();
        let context = self.context_stack.pop().unwrap_or_default();
        result?;
        Ok(context)
    }

    /// Parses all top-level declarations into the current root.
    fn parse_top_level_members(&mut self) -> Result<(), FatalParseError> {
        while !self.is_at_end() {
            if self.consume_error_token() {
                continue;
            }
            match self.current_kind() {
                TokenKind::At(AtKeyword::Interface) => {
                    // `@interface Name (` introduces a category.
                    if self.at_category_start() {
                        let node = self.parse_category()?;
                        self.emit_member(TopLevel::ClassCategory(node));
                    } else {
                        let node = self.parse_interface()?;
                        self.emit_member(TopLevel::ClassInterface(node));
                    }
                }
                TokenKind::At(AtKeyword::Implementation) => {
                    let node = self.parse_implementation()?;
                    self.emit_member(TopLevel::ClassImplementation(node));
                }
                TokenKind::At(AtKeyword::Protocol) => {
                    let node = self.parse_protocol_declaration()?;
                    self.emit_member(TopLevel::ProtocolDeclaration(node));
                }
                TokenKind::At(AtKeyword::Class) => {
                    let node = self.parse_forward_class_declaration();
                    self.emit_member(TopLevel::ForwardClassDeclaration(node));
                }
                TokenKind::Identifier(name) if name == "NS_ASSUME_NONNULL_BEGIN" => {
                    self.assume_nonnull = true;
                    self.advance();
                }
                TokenKind::Identifier(name) if name == "NS_ASSUME_NONNULL_END" => {
                    self.assume_nonnull = false;
                    self.advance();
                }
                TokenKind::Semicolon => {
                    // Stray terminators are tolerated at file scope.
                    self.advance();
                }
                _ => {
                    self.error("expected a declaration at file scope");
                    self.advance();
                }
            }
        }
        Ok(())
    }

    /// Returns `true` if the stream sits at `@interface Name (`.
    fn at_category_start(&self) -> bool {
        if !self.check_at(AtKeyword::Interface) {
            return false;
        }
        matches!(self.peek_kind(), Some(TokenKind::Identifier(_)))
            && matches!(
                self.tokens.get(self.current + 2).map(Token::kind),
                Some(TokenKind::LeftParen)
            )
    }

    /// Parses a single `@interface` in a temporary context.
    ///
    /// # Errors
    ///
    /// Propagates [`FatalParseError`] from unrecoverable states.
    pub fn parse_class_interface_node(
        &mut self,
    ) -> Result<crate::ast::ClassInterface, FatalParseError> {
        self.with_temporary_context(|parser| {
            let node = parser.parse_interface()?;
            parser.emit_member(TopLevel::ClassInterface(node.clone()));
            Ok(node)
        })
    }

    /// Parses a single `@implementation` in a temporary context.
    ///
    /// # Errors
    ///
    /// Propagates [`FatalParseError`] from unrecoverable states.
    pub fn parse_class_implementation_node(
        &mut self,
    ) -> Result<crate::ast::ClassImplementation, FatalParseError> {
        self.with_temporary_context(|parser| {
            let node = parser.parse_implementation()?;
            parser.emit_member(TopLevel::ClassImplementation(node.clone()));
            Ok(node)
        })
    }

    /// Parses a single `@interface Name (Category)` in a temporary
    /// context.
    ///
    /// # Errors
    ///
    /// Propagates [`FatalParseError`] from unrecoverable states.
    pub fn parse_class_category_node(
        &mut self,
    ) -> Result<crate::ast::ClassCategory, FatalParseError> {
        self.with_temporary_context(|parser| {
            let node = parser.parse_category()?;
            parser.emit_member(TopLevel::ClassCategory(node.clone()));
            Ok(node)
        })
    }

    /// Parses a `<Proto, …>` reference list in a temporary context.
    ///
    /// # Errors
    ///
    /// Propagates [`FatalParseError`] from unrecoverable states.
    pub fn parse_protocol_reference_list(
        &mut self,
    ) -> Result<crate::ast::ProtocolReferenceList, FatalParseError> {
        self.with_temporary_context(|parser| Ok(parser.parse_protocol_list()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::find_keyword;
    use crate::source_analysis::lex_with_eof;

    /// Helper to parse a string and assert no errors.
    fn parse_ok(source: &str) -> GlobalContext {
        let (context, diagnostics) = parse_source(source).expect("no fatal error");
        assert_eq!(
            diagnostics.error_count(),
            0,
            "expected no errors, got: {:?}",
            diagnostics.entries()
        );
        context
    }

    /// Helper to parse a string expecting at least one error.
    fn parse_err(source: &str) -> (GlobalContext, Diagnostics) {
        let (context, diagnostics) = parse_source(source).expect("no fatal error");
        assert!(
            diagnostics.error_count() > 0,
            "expected errors for {source:?}"
        );
        (context, diagnostics)
    }

    #[test]
    fn forward_declaration_only() {
        let context = parse_ok("@class MyClass;");
        assert_eq!(context.members.len(), 1);
        match &context.members[0] {
            TopLevel::ForwardClassDeclaration(node) => {
                assert_eq!(node.identifiers.len(), 1);
                assert_eq!(node.identifiers[0].name, "MyClass");
            }
            other => panic!("expected forward declaration, got {other:?}"),
        }
    }

    #[test]
    fn empty_interface_with_keyword_children() {
        let context = parse_ok("@interface MyClass\n@end");
        assert_eq!(context.members.len(), 1);
        let TopLevel::ClassInterface(interface) = &context.members[0] else {
            panic!("expected class interface");
        };
        assert_eq!(interface.identifier.name, "MyClass");
        assert!(interface.ivars.is_none());
        assert!(find_keyword(&interface.keywords, AtKeyword::Interface).is_some());
        assert!(find_keyword(&interface.keywords, AtKeyword::End).is_some());
    }

    #[test]
    fn unexpected_top_level_token_recovers() {
        let (context, diagnostics) = parse_err("42 @interface MyClass\n@end");
        assert_eq!(diagnostics.error_count(), 1);
        assert_eq!(context.members.len(), 1);
    }

    #[test]
    fn assume_nonnull_region_toggles() {
        let context = parse_ok(
            "NS_ASSUME_NONNULL_BEGIN\n@interface A\n@end\nNS_ASSUME_NONNULL_END\n@interface B\n@end",
        );
        let TopLevel::ClassInterface(a) = &context.members[0] else {
            panic!("expected interface");
        };
        let TopLevel::ClassInterface(b) = &context.members[1] else {
            panic!("expected interface");
        };
        assert!(a.in_nonnull_region);
        assert!(!b.in_nonnull_region);
    }

    #[test]
    fn temporary_context_restores_stack_on_success() {
        let tokens = lex_with_eof("@interface MyClass\n@end");
        let mut parser = Parser::new(tokens);
        let node = parser.parse_class_interface_node().expect("parse");
        assert_eq!(node.identifier.name, "MyClass");
        assert!(parser.context_stack.is_empty());
    }

    #[test]
    fn temporary_context_restores_stack_on_fatal_error() {
        // EOF in the middle of an ivar block type is fatal.
        let tokens = lex_with_eof("@interface A { NSString");
        let mut parser = Parser::new(tokens);
        let result = parser.parse_class_interface_node();
        assert!(result.is_err());
        assert!(parser.context_stack.is_empty());
    }

    #[test]
    fn error_iff_recovery_invoked() {
        // Clean parse: no errors.
        let (_, clean) = parse_source("@interface A\n@end").expect("parse");
        assert_eq!(clean.error_count(), 0);

        // Recovered parse: at least one error, tree still present.
        let (context, recovered) =
            parse_source("@interface A : <MyProtocol1, >\n@end").expect("parse");
        assert!(recovered.error_count() > 0);
        assert_eq!(context.members.len(), 1);
    }

    #[test]
    fn diagnostics_in_source_order() {
        let (_, diagnostics) = parse_err("@interface A <P, >\n@end\n@interface B <Q, >\n@end");
        let spans: Vec<_> = diagnostics.errors().map(|d| d.span.start()).collect();
        let mut sorted = spans.clone();
        sorted.sort_unstable();
        assert_eq!(spans, sorted);
    }

    #[test]
    fn span_containment_for_members() {
        let context = parse_ok(
            "@interface MyClass : NSObject <P>\n@property (nonatomic) NSInteger count;\n- (void)run;\n@end",
        );
        let TopLevel::ClassInterface(interface) = &context.members[0] else {
            panic!("expected interface");
        };
        assert!(context.span.contains(interface.span));
        for property in &interface.properties {
            assert!(interface.span.contains(property.span));
            for keyword in &property.keywords {
                assert!(property.span.contains(keyword.span));
            }
        }
        for method in &interface.methods {
            assert!(interface.span.contains(method.span));
        }
        for keyword in &interface.keywords {
            assert!(interface.span.contains(keyword.span));
        }
        if let Some(protocols) = &interface.protocols {
            assert!(interface.span.contains(protocols.span));
        }
    }
}
