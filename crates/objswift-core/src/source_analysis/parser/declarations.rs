// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Declaration parsing for Objective-C.
//!
//! This module handles the declaration grammar:
//! - `@interface` / `@implementation` / categories / `@protocol`
//! - `@property` declarations with attribute lists
//! - instance variable blocks with visibility directives
//! - method signatures (bare and keyword selectors)
//! - `@synthesize` / `@dynamic` property implementations
//!
//! Method bodies are not parsed into statements; a balanced-brace skip
//! records their source range.

use crate::ast::{
    ClassCategory, ClassImplementation, ClassInterface, ForwardClassDeclaration, IVarDeclaration,
    IVarVisibility, IVarsList, Identifier, KeywordNode, MethodBody, MethodSignature, ObjcType,
    PropertyAttribute, PropertyAttributeKind, PropertyDeclaration, PropertyImplementation,
    PropertyImplementationKind, PropertySynthesizeItem, ProtocolDeclaration,
    ProtocolReferenceList, Selector, SelectorPart,
};
use crate::source_analysis::{AtKeyword, Span, TokenKind};

use super::{FatalParseError, FollowSet, Parser};

/// Members collected while parsing a class-like body.
#[derive(Default)]
struct MemberList {
    properties: Vec<PropertyDeclaration>,
    methods: Vec<MethodSignature>,
    property_impls: Vec<PropertyImplementation>,
    keywords: Vec<KeywordNode>,
}

impl Parser {
    /// Returns the span of the most recently consumed token.
    fn previous_span(&self) -> Span {
        if self.current == 0 {
            self.current_span()
        } else {
            self.tokens[self.current - 1].span()
        }
    }

    /// Helper to parse an identifier, reporting an error if not found.
    pub(super) fn parse_identifier(&mut self, message: &str) -> Identifier {
        if let TokenKind::Identifier(name) = self.current_kind() {
            let ident = Identifier::new(name.clone(), self.current_span());
            self.advance();
            ident
        } else {
            let span = self.current_span();
            self.error(message);
            Identifier::new("Error", span)
        }
    }

    /// Consumes the current token as a [`KeywordNode`].
    ///
    /// The caller must have checked that the current token is the given
    /// at-keyword.
    fn consume_keyword(&mut self, keyword: AtKeyword) -> KeywordNode {
        let span = self.current_span();
        self.advance();
        KeywordNode { keyword, span }
    }

    // ========================================================================
    // Class Interface
    // ========================================================================

    /// Parses `@interface Name … @end`.
    pub(super) fn parse_interface(&mut self) -> Result<ClassInterface, FatalParseError> {
        let start = self.current_span();
        let in_nonnull_region = self.assume_nonnull;
        let mut keywords = vec![self.consume_keyword(AtKeyword::Interface)];

        let identifier = self.parse_identifier("expected class name after '@interface'");

        let superclass = if self.match_token(&TokenKind::Colon) {
            if self.current_kind().is_identifier() {
                Some(self.parse_identifier("expected superclass name"))
            } else {
                self.error("expected superclass name after ':'");
                None
            }
        } else {
            None
        };

        let protocols = if self.check(&TokenKind::LessThan) {
            Some(self.parse_protocol_list())
        } else {
            None
        };

        let ivars = if self.check(&TokenKind::LeftBrace) {
            Some(self.parse_ivars_list()?)
        } else {
            None
        };

        let members = self.parse_member_list(BodyKind::Interface)?;
        let end_keyword = self.expect_at_end("expected '@end' to close '@interface'");
        keywords.extend(members.keywords);
        keywords.extend(end_keyword);

        Ok(ClassInterface {
            identifier,
            superclass,
            protocols,
            ivars,
            properties: members.properties,
            methods: members.methods,
            keywords,
            in_nonnull_region,
            span: start.merge(self.previous_span()),
        })
    }

    // ========================================================================
    // Class Implementation
    // ========================================================================

    /// Parses `@implementation Name … @end`.
    pub(super) fn parse_implementation(
        &mut self,
    ) -> Result<ClassImplementation, FatalParseError> {
        let start = self.current_span();
        let mut keywords = vec![self.consume_keyword(AtKeyword::Implementation)];

        let identifier = self.parse_identifier("expected class name after '@implementation'");

        let superclass = if self.match_token(&TokenKind::Colon) {
            if self.current_kind().is_identifier() {
                Some(self.parse_identifier("expected superclass name"))
            } else {
                self.error("expected superclass name after ':'");
                None
            }
        } else {
            None
        };

        // Category implementation: `@implementation Name (Category)`.
        // The category name only scopes method lookup, which pairing
        // already does by selector, so it is consumed and not stored.
        if self.match_token(&TokenKind::LeftParen) {
            if self.current_kind().is_identifier() {
                self.advance();
            }
            self.expect(&TokenKind::RightParen, "expected ')' after category name");
        }

        let ivars = if self.check(&TokenKind::LeftBrace) {
            Some(self.parse_ivars_list()?)
        } else {
            None
        };

        let members = self.parse_member_list(BodyKind::Implementation)?;
        let end_keyword = self.expect_at_end("expected '@end' to close '@implementation'");
        keywords.extend(members.keywords);
        keywords.extend(end_keyword);

        Ok(ClassImplementation {
            identifier,
            superclass,
            ivars,
            methods: members.methods,
            property_impls: members.property_impls,
            keywords,
            span: start.merge(self.previous_span()),
        })
    }

    // ========================================================================
    // Category
    // ========================================================================

    /// Parses `@interface Name (Category) … @end`.
    pub(super) fn parse_category(&mut self) -> Result<ClassCategory, FatalParseError> {
        let start = self.current_span();
        let in_nonnull_region = self.assume_nonnull;
        let mut keywords = vec![self.consume_keyword(AtKeyword::Interface)];

        let class_identifier = self.parse_identifier("expected class name after '@interface'");

        self.expect(&TokenKind::LeftParen, "expected '(' to open category name");
        let category_name = if self.current_kind().is_identifier() {
            Some(self.parse_identifier("expected category name"))
        } else {
            None
        };
        self.expect(&TokenKind::RightParen, "expected ')' after category name");

        let protocols = if self.check(&TokenKind::LessThan) {
            Some(self.parse_protocol_list())
        } else {
            None
        };

        let members = self.parse_member_list(BodyKind::Interface)?;
        let end_keyword = self.expect_at_end("expected '@end' to close category");
        keywords.extend(members.keywords);
        keywords.extend(end_keyword);

        Ok(ClassCategory {
            class_identifier,
            category_name,
            protocols,
            properties: members.properties,
            methods: members.methods,
            keywords,
            in_nonnull_region,
            span: start.merge(self.previous_span()),
        })
    }

    // ========================================================================
    // Protocol Declaration
    // ========================================================================

    /// Parses `@protocol Name … @end` or the forward form
    /// `@protocol Name;`.
    pub(super) fn parse_protocol_declaration(
        &mut self,
    ) -> Result<ProtocolDeclaration, FatalParseError> {
        let start = self.current_span();
        let in_nonnull_region = self.assume_nonnull;
        let mut keywords = vec![self.consume_keyword(AtKeyword::Protocol)];

        let identifier = self.parse_identifier("expected protocol name after '@protocol'");

        let protocols = if self.check(&TokenKind::LessThan) {
            Some(self.parse_protocol_list())
        } else {
            None
        };

        // Forward declaration: `@protocol Name;` has no body.
        if self.match_token(&TokenKind::Semicolon) {
            return Ok(ProtocolDeclaration {
                identifier,
                protocols,
                properties: Vec::new(),
                methods: Vec::new(),
                keywords,
                in_nonnull_region,
                span: start.merge(self.previous_span()),
            });
        }

        let members = self.parse_member_list(BodyKind::Protocol)?;
        let end_keyword = self.expect_at_end("expected '@end' to close '@protocol'");
        keywords.extend(members.keywords);
        keywords.extend(end_keyword);

        Ok(ProtocolDeclaration {
            identifier,
            protocols,
            properties: members.properties,
            methods: members.methods,
            keywords,
            in_nonnull_region,
            span: start.merge(self.previous_span()),
        })
    }

    // ========================================================================
    // Forward Class Declaration
    // ========================================================================

    /// Parses `@class Name, Other;`.
    pub(super) fn parse_forward_class_declaration(&mut self) -> ForwardClassDeclaration {
        let start = self.current_span();
        let keywords = vec![self.consume_keyword(AtKeyword::Class)];

        let mut identifiers = Vec::new();
        loop {
            if self.current_kind().is_identifier() {
                identifiers.push(self.parse_identifier("expected class name"));
            } else {
                self.error("expected class name after '@class'");
                break;
            }
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }

        if self.expect(&TokenKind::Semicolon, "expected ';' after '@class'").is_none() {
            self.synchronize(FollowSet::Property);
            self.match_token(&TokenKind::Semicolon);
        }

        ForwardClassDeclaration {
            identifiers,
            keywords,
            span: start.merge(self.previous_span()),
        }
    }

    // ========================================================================
    // Shared Body Parsing
    // ========================================================================

    /// Consumes `@end` as a keyword node, or reports an error when it is
    /// missing (next construct or EOF reached first).
    fn expect_at_end(&mut self, message: &str) -> Option<KeywordNode> {
        if self.check_at(AtKeyword::End) {
            Some(self.consume_keyword(AtKeyword::End))
        } else {
            self.error(message);
            None
        }
    }

    /// Parses body members until `@end`, the next top-level construct,
    /// or EOF — the class-body follow set.
    fn parse_member_list(&mut self, kind: BodyKind) -> Result<MemberList, FatalParseError> {
        let mut members = MemberList::default();
        let mut in_optional_section = false;

        loop {
            if self.is_at_end() || FollowSet::ClassBody.contains(self.current_kind()) {
                break;
            }
            if self.consume_error_token() {
                continue;
            }
            match self.current_kind() {
                TokenKind::At(AtKeyword::Property) => {
                    members.properties.push(self.parse_property());
                }
                TokenKind::Operator(op) if op == "-" || op == "+" => {
                    let mut method = self.parse_method_signature(kind == BodyKind::Implementation);
                    method.is_optional = in_optional_section;
                    members.methods.push(method);
                }
                TokenKind::At(AtKeyword::Optional) if kind == BodyKind::Protocol => {
                    members.keywords.push(self.consume_keyword(AtKeyword::Optional));
                    in_optional_section = true;
                }
                TokenKind::At(AtKeyword::Required) if kind == BodyKind::Protocol => {
                    members.keywords.push(self.consume_keyword(AtKeyword::Required));
                    in_optional_section = false;
                }
                TokenKind::At(AtKeyword::Synthesize) if kind == BodyKind::Implementation => {
                    members
                        .property_impls
                        .push(self.parse_property_implementation(PropertyImplementationKind::Synthesize));
                }
                TokenKind::At(AtKeyword::Dynamic) if kind == BodyKind::Implementation => {
                    members
                        .property_impls
                        .push(self.parse_property_implementation(PropertyImplementationKind::Dynamic));
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
                    self.advance();
                }
                _ => {
                    self.error("unexpected token in declaration body");
                    self.advance();
                }
            }
        }

        Ok(members)
    }

    // ========================================================================
    // Property Declarations
    // ========================================================================

    /// Parses `@property (attrs) Type name;`. Recovery stops at `;`.
    fn parse_property(&mut self) -> PropertyDeclaration {
        let start = self.current_span();
        let keywords = vec![self.consume_keyword(AtKeyword::Property)];

        let attributes = if self.check(&TokenKind::LeftParen) {
            self.parse_property_attributes()
        } else {
            Vec::new()
        };

        let ty = match self.parse_objc_type() {
            Some(ty) => ty,
            None => {
                self.synchronize(FollowSet::Property);
                self.match_token(&TokenKind::Semicolon);
                return PropertyDeclaration {
                    attributes,
                    ty: ObjcType::named("Error"),
                    identifier: Identifier::new("Error", self.previous_span()),
                    keywords,
                    in_nonnull_region: self.assume_nonnull,
                    span: start.merge(self.previous_span()),
                };
            }
        };

        let identifier = self.parse_identifier("expected property name");

        if self
            .expect(&TokenKind::Semicolon, "expected ';' after property declaration")
            .is_none()
        {
            self.synchronize(FollowSet::Property);
            self.match_token(&TokenKind::Semicolon);
        }

        PropertyDeclaration {
            attributes,
            ty,
            identifier,
            keywords,
            in_nonnull_region: self.assume_nonnull,
            span: start.merge(self.previous_span()),
        }
    }

    /// Parses the paren-delimited property attribute list.
    fn parse_property_attributes(&mut self) -> Vec<PropertyAttribute> {
        self.advance(); // (
        let mut attributes = Vec::new();

        loop {
            match self.current_kind() {
                TokenKind::Identifier(name) => {
                    let name = name.clone();
                    let start = self.current_span();
                    self.advance();
                    let kind = if (name == "getter" || name == "setter")
                        && self.check_operator("=")
                    {
                        self.advance(); // =
                        let accessor =
                            self.parse_identifier("expected accessor name after '='");
                        if name == "setter" {
                            // The trailing colon of a setter name is part
                            // of its selector.
                            self.match_token(&TokenKind::Colon);
                            PropertyAttributeKind::Setter(accessor.name)
                        } else {
                            PropertyAttributeKind::Getter(accessor.name)
                        }
                    } else {
                        PropertyAttributeKind::Keyword(name)
                    };
                    attributes.push(PropertyAttribute {
                        kind,
                        span: start.merge(self.previous_span()),
                    });
                }
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::RightParen => {
                    self.advance();
                    break;
                }
                TokenKind::Eof => {
                    self.error("expected ')' to close property attributes");
                    break;
                }
                _ => {
                    self.error("expected property attribute");
                    self.advance();
                }
            }
        }

        attributes
    }

    // ========================================================================
    // Method Signatures
    // ========================================================================

    /// Parses a `-`/`+` method signature, and its balanced-brace body in
    /// implementations. Recovery stops at `;` (interfaces) or `;`/`{`
    /// (implementations).
    fn parse_method_signature(&mut self, in_implementation: bool) -> MethodSignature {
        let start = self.current_span();
        let is_class_method = self.check_operator("+");
        self.advance(); // - or +

        let return_type = if self.match_token(&TokenKind::LeftParen) {
            let ty = self.parse_objc_type();
            self.expect(&TokenKind::RightParen, "expected ')' after return type");
            ty
        } else {
            None
        };

        let selector = self.parse_selector(in_implementation);

        let body = if in_implementation && self.check(&TokenKind::LeftBrace) {
            Some(self.skip_method_body())
        } else {
            if self
                .expect(&TokenKind::Semicolon, "expected ';' after method signature")
                .is_none()
            {
                let follow = if in_implementation {
                    FollowSet::MethodImplementation
                } else {
                    FollowSet::MethodInterface
                };
                self.synchronize(follow);
                if in_implementation && self.check(&TokenKind::LeftBrace) {
                    return MethodSignature {
                        is_class_method,
                        return_type,
                        selector,
                        body: Some(self.skip_method_body()),
                        is_optional: false,
                        in_nonnull_region: self.assume_nonnull,
                        span: start.merge(self.previous_span()),
                    };
                }
                self.match_token(&TokenKind::Semicolon);
            }
            None
        };

        MethodSignature {
            is_class_method,
            return_type,
            selector,
            body,
            is_optional: false,
            in_nonnull_region: self.assume_nonnull,
            span: start.merge(self.previous_span()),
        }
    }

    /// Parses a bare or keyword selector with its typed parameters.
    fn parse_selector(&mut self, in_implementation: bool) -> Selector {
        if !self.current_kind().is_identifier() {
            self.error("expected method selector");
            let follow = if in_implementation {
                FollowSet::MethodImplementation
            } else {
                FollowSet::MethodInterface
            };
            self.synchronize(follow);
            return Selector::Bare(Identifier::new("Error", self.previous_span()));
        }

        let first = self.parse_identifier("expected method selector");
        if !self.check(&TokenKind::Colon) {
            return Selector::Bare(first);
        }

        let mut parts = Vec::new();
        let mut keyword = first;
        loop {
            let part_start = keyword.span;
            self.advance(); // :

            let ty = if self.match_token(&TokenKind::LeftParen) {
                let ty = self.parse_objc_type();
                self.expect(&TokenKind::RightParen, "expected ')' after parameter type");
                ty
            } else {
                None
            };

            // An identifier directly followed by `:` is the next keyword
            // part, not this part's parameter name.
            let parameter = if self.current_kind().is_identifier()
                && !matches!(self.peek_kind(), Some(TokenKind::Colon))
            {
                Some(self.parse_identifier("expected parameter name"))
            } else {
                None
            };

            parts.push(SelectorPart {
                keyword,
                ty,
                parameter,
                span: part_start.merge(self.previous_span()),
            });

            // Another `keyword:` part?
            if self.current_kind().is_identifier()
                && matches!(self.peek_kind(), Some(TokenKind::Colon))
            {
                keyword = self.parse_identifier("expected selector keyword");
            } else {
                break;
            }
        }

        Selector::Keyword(parts)
    }

    /// Skips a `{ … }` method body by brace counting, recording its
    /// extent.
    fn skip_method_body(&mut self) -> MethodBody {
        let start = self.current_span();
        self.advance(); // {
        let mut depth = 1_u32;

        while depth > 0 && !self.is_at_end() {
            match self.current_kind() {
                TokenKind::LeftBrace => depth += 1,
                TokenKind::RightBrace => depth -= 1,
                _ => {}
            }
            self.advance();
        }

        if depth > 0 {
            self.error("unterminated method body");
        }

        MethodBody {
            span: start.merge(self.previous_span()),
        }
    }

    // ========================================================================
    // Instance Variable Blocks
    // ========================================================================

    /// Parses `{ … }` with visibility directives and ivar declarations.
    ///
    /// A visibility directive applies to the ivars that follow it; the
    /// default is `@protected`. Recovery stops at `}` or `@end`.
    ///
    /// # Errors
    ///
    /// EOF in the middle of an ivar declaration is unrecoverable and
    /// surfaces as [`FatalParseError::UnexpectedEof`].
    fn parse_ivars_list(&mut self) -> Result<IVarsList, FatalParseError> {
        let start = self.current_span();
        self.advance(); // {

        let mut ivars = Vec::new();
        let mut keywords = Vec::new();
        let mut visibility = IVarVisibility::default();

        loop {
            match self.current_kind() {
                TokenKind::RightBrace => {
                    self.advance();
                    break;
                }
                TokenKind::At(keyword) if keyword.is_visibility() => {
                    let keyword = *keyword;
                    visibility = match keyword {
                        AtKeyword::Private => IVarVisibility::Private,
                        AtKeyword::Package => IVarVisibility::Package,
                        AtKeyword::Public => IVarVisibility::Public,
                        _ => IVarVisibility::Protected,
                    };
                    keywords.push(self.consume_keyword(keyword));
                }
                TokenKind::At(AtKeyword::End) => {
                    self.error("expected '}' to close instance variable block");
                    break;
                }
                TokenKind::Eof => {
                    return Err(FatalParseError::UnexpectedEof {
                        context: "an instance variable block",
                        span: self.current_span(),
                    });
                }
                TokenKind::Semicolon => {
                    self.advance();
                }
                TokenKind::Error(_) => {
                    self.consume_error_token();
                }
                _ => {
                    let decl_start = self.current_span();
                    let Some(ty) = self.parse_objc_type() else {
                        self.synchronize(FollowSet::IVarBlock);
                        continue;
                    };
                    if self.is_at_end() {
                        return Err(FatalParseError::UnexpectedEof {
                            context: "an instance variable declaration",
                            span: self.current_span(),
                        });
                    }
                    let identifier = self.parse_identifier("expected instance variable name");
                    if self
                        .expect(&TokenKind::Semicolon, "expected ';' after instance variable")
                        .is_none()
                    {
                        self.synchronize(FollowSet::IVarBlock);
                    }
                    ivars.push(IVarDeclaration {
                        ty,
                        identifier,
                        visibility,
                        span: decl_start.merge(self.previous_span()),
                    });
                }
            }
        }

        Ok(IVarsList {
            ivars,
            keywords,
            span: start.merge(self.previous_span()),
        })
    }

    // ========================================================================
    // Property Implementations
    // ========================================================================

    /// Parses `@synthesize a, b=_b;` or `@dynamic c;`.
    fn parse_property_implementation(
        &mut self,
        kind: PropertyImplementationKind,
    ) -> PropertyImplementation {
        let start = self.current_span();
        let keyword = match kind {
            PropertyImplementationKind::Synthesize => AtKeyword::Synthesize,
            PropertyImplementationKind::Dynamic => AtKeyword::Dynamic,
        };
        let keywords = vec![self.consume_keyword(keyword)];

        let mut items = Vec::new();
        loop {
            if !self.current_kind().is_identifier() {
                self.error("expected property name");
                break;
            }
            let name = self.parse_identifier("expected property name");
            let item_start = name.span;

            let ivar = if self.check_operator("=") {
                self.advance();
                Some(self.parse_identifier("expected ivar name after '='"))
            } else {
                None
            };

            items.push(PropertySynthesizeItem {
                name,
                ivar,
                span: item_start.merge(self.previous_span()),
            });

            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }

        if self
            .expect(&TokenKind::Semicolon, "expected ';' after property implementation")
            .is_none()
        {
            self.synchronize(FollowSet::Property);
            self.match_token(&TokenKind::Semicolon);
        }

        PropertyImplementation {
            kind,
            items,
            keywords,
            span: start.merge(self.previous_span()),
        }
    }

    // ========================================================================
    // Protocol Reference Lists
    // ========================================================================

    /// Parses `<Proto1, Proto2>`, preserving both angle tokens.
    ///
    /// Recovery stops at `>`, `;` or `{`; a stray comma yields exactly
    /// one error while the successfully parsed names are kept.
    pub(super) fn parse_protocol_list(&mut self) -> ProtocolReferenceList {
        let start = self.current_span();
        let open_angle = Some(self.current_span());
        self.advance(); // <

        let mut protocols = Vec::new();
        let mut close_angle = None;
        let mut expect_name = true;

        loop {
            if self.consume_error_token() {
                continue;
            }
            match self.current_kind() {
                TokenKind::Identifier(name) => {
                    let name = name.clone();
                    if !expect_name {
                        self.error("expected ',' between protocol names");
                    }
                    let span = self.current_span();
                    protocols.push(Identifier::new(name, span));
                    self.advance();
                    expect_name = false;
                }
                TokenKind::Comma => {
                    if expect_name {
                        self.error("expected protocol name");
                        expect_name = false;
                    } else {
                        expect_name = true;
                    }
                    self.advance();
                }
                TokenKind::GreaterThan => {
                    if expect_name {
                        self.error("expected protocol name");
                    }
                    close_angle = Some(self.current_span());
                    self.advance();
                    break;
                }
                TokenKind::Semicolon | TokenKind::LeftBrace | TokenKind::Eof => {
                    self.error("unterminated protocol reference list");
                    break;
                }
                _ => {
                    self.error("expected protocol name");
                    self.synchronize(FollowSet::ProtocolRefList);
                    if self.check(&TokenKind::GreaterThan) {
                        close_angle = Some(self.current_span());
                        self.advance();
                    }
                    break;
                }
            }
        }

        ProtocolReferenceList {
            protocols,
            open_angle,
            close_angle,
            span: start.merge(self.previous_span()),
        }
    }
}

/// Which body grammar is in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Interface,
    Implementation,
    Protocol,
}
