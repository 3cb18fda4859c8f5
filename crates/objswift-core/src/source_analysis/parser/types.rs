// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Objective-C type expression parsing.
//!
//! Folds pointers (`*`), generics (`<…>`), declaration specifiers
//! (`__weak`, `const`, …) and the bare `id` with optional protocol
//! qualification into the [`ObjcType`] sum. Postfix `_Nullable` /
//! `_Nonnull` specifiers wrap the type they follow.

use ecow::EcoString;

use crate::ast::{ObjcType, TypeSpecifier};
use crate::source_analysis::TokenKind;

use super::{FollowSet, Parser};

/// C type words that combine into one multi-word scalar type
/// (`unsigned long long`, `signed char`, …).
const C_TYPE_WORDS: &[&str] = &[
    "unsigned", "signed", "short", "long", "int", "char", "float", "double",
];

impl Parser {
    /// Parses a type expression, or reports an error and returns `None`
    /// when the stream does not start one.
    pub(super) fn parse_objc_type(&mut self) -> Option<ObjcType> {
        // Prefix declaration specifiers.
        let mut specifiers = Vec::new();
        while let TokenKind::Identifier(name) = self.current_kind() {
            let Some(specifier) = prefix_specifier(name) else {
                break;
            };
            specifiers.push(specifier);
            self.advance();
        }

        let base = self.parse_base_type()?;
        let ty = self.parse_type_suffixes(base);

        if specifiers.is_empty() {
            Some(ty)
        } else {
            Some(ObjcType::Specified {
                specifiers,
                base: Box::new(ty),
            })
        }
    }

    /// Parses the named core of a type: `id<…>`, a generic application,
    /// a multi-word C scalar, or a plain name.
    fn parse_base_type(&mut self) -> Option<ObjcType> {
        let name = match self.current_kind() {
            TokenKind::Identifier(name) => name.clone(),
            _ => {
                self.error("expected a type name");
                return None;
            }
        };
        self.advance();

        if name == "id" {
            let protocols = if self.check(&TokenKind::LessThan) {
                self.parse_protocol_qualifiers()
            } else {
                Vec::new()
            };
            return Some(ObjcType::Id { protocols });
        }

        if C_TYPE_WORDS.contains(&name.as_str()) {
            return Some(ObjcType::Struct(self.parse_c_type_words(name)));
        }

        if self.check(&TokenKind::LessThan) {
            let parameters = self.parse_generic_parameters();
            return Some(ObjcType::Generic { name, parameters });
        }

        Some(ObjcType::Struct(name))
    }

    /// Applies pointer declarators and postfix nullability specifiers.
    fn parse_type_suffixes(&mut self, mut ty: ObjcType) -> ObjcType {
        loop {
            if self.match_token(&TokenKind::Star) {
                ty = ObjcType::Pointer(Box::new(ty));
                continue;
            }
            if let TokenKind::Identifier(name) = self.current_kind() {
                if let Some(specifier) = nullability_specifier(name) {
                    self.advance();
                    ty = ObjcType::Specified {
                        specifiers: vec![specifier],
                        base: Box::new(ty),
                    };
                    continue;
                }
            }
            break;
        }
        ty
    }

    /// Combines consecutive C type words: `unsigned long long` → one name.
    fn parse_c_type_words(&mut self, first: EcoString) -> EcoString {
        let mut combined = first;
        while let TokenKind::Identifier(name) = self.current_kind() {
            if !C_TYPE_WORDS.contains(&name.as_str()) {
                break;
            }
            combined.push(' ');
            combined.push_str(name);
            self.advance();
        }
        combined
    }

    /// Parses `<Proto, …>` after `id`. Returns the protocol names.
    fn parse_protocol_qualifiers(&mut self) -> Vec<EcoString> {
        self.advance(); // <
        let mut protocols = Vec::new();

        loop {
            match self.current_kind() {
                TokenKind::Identifier(name) => {
                    protocols.push(name.clone());
                    self.advance();
                }
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::GreaterThan => {
                    self.advance();
                    break;
                }
                _ => {
                    self.error("expected protocol name in 'id<…>' qualification");
                    self.synchronize(FollowSet::ProtocolRefList);
                    self.match_token(&TokenKind::GreaterThan);
                    break;
                }
            }
        }

        protocols
    }

    /// Parses `<Type, …>` generic arguments.
    fn parse_generic_parameters(&mut self) -> Vec<ObjcType> {
        self.advance(); // <
        let mut parameters = Vec::new();

        loop {
            match self.current_kind() {
                TokenKind::GreaterThan => {
                    self.advance();
                    break;
                }
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::Identifier(_) => match self.parse_objc_type() {
                    Some(ty) => parameters.push(ty),
                    None => {
                        self.synchronize(FollowSet::ProtocolRefList);
                        self.match_token(&TokenKind::GreaterThan);
                        break;
                    }
                },
                _ => {
                    self.error("expected type argument");
                    self.synchronize(FollowSet::ProtocolRefList);
                    self.match_token(&TokenKind::GreaterThan);
                    break;
                }
            }
        }

        parameters
    }
}

/// Specifiers legal in prefix position.
fn prefix_specifier(name: &str) -> Option<TypeSpecifier> {
    match name {
        "__weak" => Some(TypeSpecifier::Weak),
        "__strong" => Some(TypeSpecifier::Strong),
        "__unsafe_unretained" => Some(TypeSpecifier::UnsafeUnretained),
        "const" => Some(TypeSpecifier::Const),
        "volatile" => Some(TypeSpecifier::Volatile),
        _ => None,
    }
}

/// Nullability specifiers legal in postfix position.
fn nullability_specifier(name: &str) -> Option<TypeSpecifier> {
    match name {
        "_Nullable" | "__nullable" | "nullable" => Some(TypeSpecifier::Nullable),
        "_Nonnull" | "__nonnull" | "nonnull" => Some(TypeSpecifier::Nonnull),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::lex_with_eof;

    fn parse_type(source: &str) -> (Option<ObjcType>, usize) {
        let mut parser = Parser::new(lex_with_eof(source));
        let ty = parser.parse_objc_type();
        (ty, parser.diagnostics().error_count())
    }

    fn parse_type_ok(source: &str) -> ObjcType {
        let (ty, errors) = parse_type(source);
        assert_eq!(errors, 0, "unexpected errors for {source:?}");
        ty.expect("type")
    }

    #[test]
    fn named_type() {
        assert_eq!(parse_type_ok("NSInteger"), ObjcType::named("NSInteger"));
    }

    #[test]
    fn pointer_type() {
        assert_eq!(
            parse_type_ok("NSString *"),
            ObjcType::pointer_to("NSString")
        );
    }

    #[test]
    fn double_pointer() {
        assert_eq!(
            parse_type_ok("NSError **"),
            ObjcType::Pointer(Box::new(ObjcType::pointer_to("NSError")))
        );
    }

    #[test]
    fn bare_id() {
        assert_eq!(parse_type_ok("id"), ObjcType::Id { protocols: vec![] });
    }

    #[test]
    fn protocol_qualified_id() {
        assert_eq!(
            parse_type_ok("id<Delegate, NSCopying>"),
            ObjcType::Id {
                protocols: vec!["Delegate".into(), "NSCopying".into()]
            }
        );
    }

    #[test]
    fn weak_specified_id() {
        assert_eq!(
            parse_type_ok("__weak id"),
            ObjcType::Specified {
                specifiers: vec![TypeSpecifier::Weak],
                base: Box::new(ObjcType::Id { protocols: vec![] }),
            }
        );
    }

    #[test]
    fn const_char_pointer() {
        assert_eq!(
            parse_type_ok("const char *"),
            ObjcType::Specified {
                specifiers: vec![TypeSpecifier::Const],
                base: Box::new(ObjcType::pointer_to("char")),
            }
        );
    }

    #[test]
    fn multi_word_c_type() {
        assert_eq!(
            parse_type_ok("unsigned long long"),
            ObjcType::named("unsigned long long")
        );
    }

    #[test]
    fn generic_array() {
        assert_eq!(
            parse_type_ok("NSArray<NSString *> *"),
            ObjcType::Pointer(Box::new(ObjcType::Generic {
                name: "NSArray".into(),
                parameters: vec![ObjcType::pointer_to("NSString")],
            }))
        );
    }

    #[test]
    fn generic_dictionary_two_arguments() {
        assert_eq!(
            parse_type_ok("NSDictionary<NSString *, NSNumber *> *"),
            ObjcType::Pointer(Box::new(ObjcType::Generic {
                name: "NSDictionary".into(),
                parameters: vec![
                    ObjcType::pointer_to("NSString"),
                    ObjcType::pointer_to("NSNumber"),
                ],
            }))
        );
    }

    #[test]
    fn postfix_nullability_wraps_pointer() {
        assert_eq!(
            parse_type_ok("NSString * _Nullable"),
            ObjcType::Specified {
                specifiers: vec![TypeSpecifier::Nullable],
                base: Box::new(ObjcType::pointer_to("NSString")),
            }
        );
    }

    #[test]
    fn not_a_type_reports_error() {
        let (ty, errors) = parse_type("42");
        assert!(ty.is_none());
        assert_eq!(errors, 1);
    }

    #[test]
    fn malformed_generic_recovers_at_close_angle() {
        let (ty, errors) = parse_type("NSArray<42> *");
        assert!(errors > 0);
        // The malformed argument list is dropped, the pointer still folds.
        assert_eq!(
            ty,
            Some(ObjcType::Pointer(Box::new(ObjcType::Generic {
                name: "NSArray".into(),
                parameters: vec![],
            })))
        );
    }
}
