// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Concrete syntax tree definitions for Objective-C declarations.
//!
//! The tree represents the declaration structure of one source file after
//! parsing. Every node carries a [`Span`] for error reporting; container
//! nodes keep their children in source order.
//!
//! # Design Philosophy
//!
//! - **All nodes have spans** — child spans are contained in their
//!   parent's span, and diagnostics point at exact locations
//! - **Error recovery** — the parser produces partially populated nodes
//!   rather than failing; missing pieces are `None`/empty
//! - **Keyword preservation** — directive tokens (`@interface`, `@end`,
//!   `@property`, …) are attached as first-class [`KeywordNode`] children
//!   so later stages can recover them by filtered lookup
//!
//! Method *bodies* are not parsed into statements: the core records their
//! balanced-brace source range and carries it through to emission.

use ecow::{EcoString, eco_format};

use crate::source_analysis::{AtKeyword, Span};

/// A named occurrence in source: the name plus where it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// The identifier text.
    pub name: EcoString,
    /// Source location.
    pub span: Span,
}

impl Identifier {
    /// Creates a new identifier.
    #[must_use]
    pub fn new(name: impl Into<EcoString>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A directive token preserved as a first-class child node.
///
/// The parser attaches these for `@interface`, `@end`, `@property`,
/// `@synthesize`, `@dynamic` and the ivar visibility directives, in
/// source order, so tests and the emitter can recover them by filtered
/// lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordNode {
    /// Which directive this is.
    pub keyword: AtKeyword,
    /// Source location of the directive token.
    pub span: Span,
}

/// Looks up the first [`KeywordNode`] for `keyword` in a node's keyword
/// children.
#[must_use]
pub fn find_keyword(keywords: &[KeywordNode], keyword: AtKeyword) -> Option<&KeywordNode> {
    keywords.iter().find(|k| k.keyword == keyword)
}

/// The root of one parsed file: all top-level declarations in source
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalContext {
    /// Top-level declarations in source order.
    pub members: Vec<TopLevel>,
    /// Span covering the whole file.
    pub span: Span,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopLevel {
    /// `@interface Name … @end`
    ClassInterface(ClassInterface),
    /// `@implementation Name … @end`
    ClassImplementation(ClassImplementation),
    /// `@interface Name (Category) … @end`
    ClassCategory(ClassCategory),
    /// `@protocol Name … @end`
    ProtocolDeclaration(ProtocolDeclaration),
    /// `@class Name, Other;` — produces no intention
    ForwardClassDeclaration(ForwardClassDeclaration),
}

impl TopLevel {
    /// The source span of this declaration.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::ClassInterface(n) => n.span,
            Self::ClassImplementation(n) => n.span,
            Self::ClassCategory(n) => n.span,
            Self::ProtocolDeclaration(n) => n.span,
            Self::ForwardClassDeclaration(n) => n.span,
        }
    }
}

/// An `@interface` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInterface {
    /// The class name. Recovery may produce a placeholder identifier.
    pub identifier: Identifier,
    /// Optional superclass after `:`.
    pub superclass: Option<Identifier>,
    /// Optional `<Proto, …>` conformance list.
    pub protocols: Option<ProtocolReferenceList>,
    /// Optional `{ … }` instance variable block.
    pub ivars: Option<IVarsList>,
    /// `@property` declarations in source order.
    pub properties: Vec<PropertyDeclaration>,
    /// Method signatures in source order.
    pub methods: Vec<MethodSignature>,
    /// Directive tokens (`@interface`, `@end`) in source order.
    pub keywords: Vec<KeywordNode>,
    /// Whether this declaration sits inside an assume-nonnull region.
    pub in_nonnull_region: bool,
    /// Span of the whole declaration.
    pub span: Span,
}

/// An `@implementation` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassImplementation {
    /// The class name.
    pub identifier: Identifier,
    /// Optional superclass (rare but legal in implementations).
    pub superclass: Option<Identifier>,
    /// Optional ivar block.
    pub ivars: Option<IVarsList>,
    /// Method definitions (signatures with bodies) in source order.
    pub methods: Vec<MethodSignature>,
    /// `@synthesize` / `@dynamic` directives in source order.
    pub property_impls: Vec<PropertyImplementation>,
    /// Directive tokens in source order.
    pub keywords: Vec<KeywordNode>,
    /// Span of the whole declaration.
    pub span: Span,
}

/// An `@interface Name (Category)` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassCategory {
    /// The extended class name.
    pub class_identifier: Identifier,
    /// The category name; `None` for a class extension `()`.
    pub category_name: Option<Identifier>,
    /// Optional conformance list.
    pub protocols: Option<ProtocolReferenceList>,
    /// `@property` declarations.
    pub properties: Vec<PropertyDeclaration>,
    /// Method signatures.
    pub methods: Vec<MethodSignature>,
    /// Directive tokens in source order.
    pub keywords: Vec<KeywordNode>,
    /// Whether this declaration sits inside an assume-nonnull region.
    pub in_nonnull_region: bool,
    /// Span of the whole declaration.
    pub span: Span,
}

/// An `@protocol` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolDeclaration {
    /// The protocol name.
    pub identifier: Identifier,
    /// Inherited protocols.
    pub protocols: Option<ProtocolReferenceList>,
    /// `@property` requirements.
    pub properties: Vec<PropertyDeclaration>,
    /// Method requirements; `is_optional` is set for those following
    /// `@optional`.
    pub methods: Vec<MethodSignature>,
    /// Directive tokens in source order.
    pub keywords: Vec<KeywordNode>,
    /// Whether this declaration sits inside an assume-nonnull region.
    pub in_nonnull_region: bool,
    /// Span of the whole declaration.
    pub span: Span,
}

/// A `@class Name, Other;` forward declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardClassDeclaration {
    /// The declared class names.
    pub identifiers: Vec<Identifier>,
    /// The `@class` directive token.
    pub keywords: Vec<KeywordNode>,
    /// Span of the whole declaration.
    pub span: Span,
}

/// A `<Proto1, Proto2>` reference list.
///
/// Recovery keeps this list empty-safe: on malformed input it contains
/// the successfully parsed names, and both angle-bracket tokens are
/// preserved when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolReferenceList {
    /// The referenced protocol names in source order.
    pub protocols: Vec<Identifier>,
    /// Span of the opening `<`, when present.
    pub open_angle: Option<Span>,
    /// Span of the closing `>`, when present.
    pub close_angle: Option<Span>,
    /// Span of the whole list.
    pub span: Span,
}

/// An instance-variable block `{ … }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IVarsList {
    /// Declarations in source order.
    pub ivars: Vec<IVarDeclaration>,
    /// Visibility directive tokens in source order.
    pub keywords: Vec<KeywordNode>,
    /// Span of the whole block including braces.
    pub span: Span,
}

/// One instance variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IVarDeclaration {
    /// The declared type.
    pub ty: ObjcType,
    /// The ivar name.
    pub identifier: Identifier,
    /// Visibility in effect at the declaration site.
    pub visibility: IVarVisibility,
    /// Span of the declaration.
    pub span: Span,
}

/// Ivar visibility.
///
/// A visibility directive applies to the suffix of ivars following it;
/// the default is `@protected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IVarVisibility {
    /// `@private`
    Private,
    /// `@protected` (the default)
    #[default]
    Protected,
    /// `@package`
    Package,
    /// `@public`
    Public,
}

/// An `@property` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDeclaration {
    /// Paren-delimited attributes, in source order.
    pub attributes: Vec<PropertyAttribute>,
    /// The property type.
    pub ty: ObjcType,
    /// The property name.
    pub identifier: Identifier,
    /// The `@property` directive token.
    pub keywords: Vec<KeywordNode>,
    /// Whether this declaration sits inside an assume-nonnull region.
    pub in_nonnull_region: bool,
    /// Span of the whole declaration.
    pub span: Span,
}

impl PropertyDeclaration {
    /// Returns `true` if the attribute list contains the bare keyword
    /// `name` (e.g. `weak`, `readonly`).
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes
            .iter()
            .any(|a| matches!(&a.kind, PropertyAttributeKind::Keyword(k) if k == name))
    }
}

/// One property attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyAttribute {
    /// The attribute content.
    pub kind: PropertyAttributeKind,
    /// Source location.
    pub span: Span,
}

/// The content of a property attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyAttributeKind {
    /// A bare keyword: `nonatomic`, `copy`, `weak`, `readonly`, …
    Keyword(EcoString),
    /// `getter=name`
    Getter(EcoString),
    /// `setter=name:`
    Setter(EcoString),
}

/// A method signature, with its body range when one was present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    /// `true` for `+` (class) methods, `false` for `-` (instance).
    pub is_class_method: bool,
    /// The parenthesized return type, when written.
    pub return_type: Option<ObjcType>,
    /// The selector with its typed parameters.
    pub selector: Selector,
    /// The balanced-brace body range (implementations only).
    pub body: Option<MethodBody>,
    /// Set for protocol requirements following `@optional`.
    pub is_optional: bool,
    /// Whether this declaration sits inside an assume-nonnull region.
    pub in_nonnull_region: bool,
    /// Span of the whole signature (and body, when present).
    pub span: Span,
}

/// The source range of a `{ … }` method body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodBody {
    /// Span from the opening to the closing brace, inclusive.
    pub span: Span,
}

/// A method selector: bare, or one-or-more `keyword:(type)name` parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// A parameterless selector: `count`
    Bare(Identifier),
    /// A keyword selector: `initWithName:age:`
    Keyword(Vec<SelectorPart>),
}

impl Selector {
    /// The canonical selector name: keyword parts joined with `:`.
    ///
    /// Selector equality — the ordered tuple of keyword parts — is what
    /// pairs interface declarations with implementation definitions.
    #[must_use]
    pub fn name(&self) -> EcoString {
        match self {
            Self::Bare(ident) => ident.name.clone(),
            Self::Keyword(parts) => {
                let mut name = EcoString::new();
                for part in parts {
                    name.push_str(&part.keyword.name);
                    name.push(':');
                }
                name
            }
        }
    }

    /// The source span covering the selector.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Bare(ident) => ident.span,
            Self::Keyword(parts) => parts
                .iter()
                .map(|p| p.span)
                .reduce(Span::merge)
                .unwrap_or_default(),
        }
    }
}

/// One `keyword:(type)name` part of a keyword selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorPart {
    /// The keyword before the colon.
    pub keyword: Identifier,
    /// The parenthesized parameter type, when written.
    pub ty: Option<ObjcType>,
    /// The parameter name, when written.
    pub parameter: Option<Identifier>,
    /// Span of the whole part.
    pub span: Span,
}

/// An `@synthesize` or `@dynamic` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyImplementation {
    /// Which directive this is.
    pub kind: PropertyImplementationKind,
    /// The listed properties.
    pub items: Vec<PropertySynthesizeItem>,
    /// The directive token.
    pub keywords: Vec<KeywordNode>,
    /// Span of the whole directive.
    pub span: Span,
}

/// The kind of property implementation directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyImplementationKind {
    /// `@synthesize`
    Synthesize,
    /// `@dynamic`
    Dynamic,
}

/// One `name` or `name=ivar` item in a property implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySynthesizeItem {
    /// The property name.
    pub name: Identifier,
    /// The backing ivar after `=`, when written.
    pub ivar: Option<Identifier>,
    /// Span of the item.
    pub span: Span,
}

/// An Objective-C type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjcType {
    /// A named (struct or scalar) type: `NSString`, `int`, `void`
    Struct(EcoString),
    /// `id`, optionally protocol-qualified: `id<Delegate>`
    Id {
        /// The protocol qualification, empty for bare `id`.
        protocols: Vec<EcoString>,
    },
    /// A pointer to another type: `NSString *`
    Pointer(Box<ObjcType>),
    /// A generic application: `NSArray<NSString *>`
    Generic {
        /// The generic type name.
        name: EcoString,
        /// The type arguments in source order.
        parameters: Vec<ObjcType>,
    },
    /// A type with declaration specifiers: `__weak id`, `const char`
    Specified {
        /// The specifiers in source order.
        specifiers: Vec<TypeSpecifier>,
        /// The underlying type.
        base: Box<ObjcType>,
    },
}

impl ObjcType {
    /// Shorthand for a named type.
    #[must_use]
    pub fn named(name: impl Into<EcoString>) -> Self {
        Self::Struct(name.into())
    }

    /// Shorthand for a pointer to a named type.
    #[must_use]
    pub fn pointer_to(name: impl Into<EcoString>) -> Self {
        Self::Pointer(Box::new(Self::named(name)))
    }

    /// The type beneath any [`ObjcType::Specified`] wrappers.
    #[must_use]
    pub fn unspecified(&self) -> &ObjcType {
        match self {
            Self::Specified { base, .. } => base.unspecified(),
            other => other,
        }
    }

    /// All specifiers applied to this type, outermost first.
    #[must_use]
    pub fn specifiers(&self) -> Vec<TypeSpecifier> {
        match self {
            Self::Specified { specifiers, base } => {
                let mut all = specifiers.clone();
                all.extend(base.specifiers());
                all
            }
            _ => Vec::new(),
        }
    }

    /// Returns `true` for object-typed expressions: `id`, any pointer,
    /// or a specified wrapper around one.
    #[must_use]
    pub fn is_object(&self) -> bool {
        match self.unspecified() {
            Self::Id { .. } | Self::Pointer(_) => true,
            Self::Struct(_) | Self::Generic { .. } => false,
            Self::Specified { .. } => unreachable!("unspecified() strips Specified"),
        }
    }
}

impl std::fmt::Display for ObjcType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Struct(name) => write!(f, "{name}"),
            Self::Id { protocols } if protocols.is_empty() => write!(f, "id"),
            Self::Id { protocols } => write!(f, "id<{}>", protocols.join(", ")),
            Self::Pointer(base) => write!(f, "{base}*"),
            Self::Generic { name, parameters } => {
                let params: Vec<String> = parameters.iter().map(ToString::to_string).collect();
                write!(f, "{name}<{}>", params.join(", "))
            }
            Self::Specified { specifiers, base } => {
                for specifier in specifiers {
                    write!(f, "{} ", specifier.as_str())?;
                }
                write!(f, "{base}")
            }
        }
    }
}

/// A declaration specifier on a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSpecifier {
    /// `__weak`
    Weak,
    /// `__strong`
    Strong,
    /// `__unsafe_unretained`
    UnsafeUnretained,
    /// `const`
    Const,
    /// `volatile`
    Volatile,
    /// `_Nullable`
    Nullable,
    /// `_Nonnull`
    Nonnull,
}

impl TypeSpecifier {
    /// Looks up a specifier from its source spelling.
    #[must_use]
    pub fn from_ident(ident: &str) -> Option<Self> {
        match ident {
            "__weak" => Some(Self::Weak),
            "__strong" => Some(Self::Strong),
            "__unsafe_unretained" => Some(Self::UnsafeUnretained),
            "const" => Some(Self::Const),
            "volatile" => Some(Self::Volatile),
            "_Nullable" | "nullable" | "__nullable" => Some(Self::Nullable),
            "_Nonnull" | "nonnull" | "__nonnull" => Some(Self::Nonnull),
            _ => None,
        }
    }

    /// The canonical source spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weak => "__weak",
            Self::Strong => "__strong",
            Self::UnsafeUnretained => "__unsafe_unretained",
            Self::Const => "const",
            Self::Volatile => "volatile",
            Self::Nullable => "_Nullable",
            Self::Nonnull => "_Nonnull",
        }
    }
}

/// Formats a selector the way diagnostics quote it: `-[Class selector]`.
#[must_use]
pub fn selector_reference(class: &str, selector: &Selector, is_class_method: bool) -> EcoString {
    let marker = if is_class_method { '+' } else { '-' };
    eco_format!("{marker}[{class} {}]", selector.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Identifier {
        Identifier::new(name, Span::new(0, name.len() as u32))
    }

    #[test]
    fn bare_selector_name() {
        let selector = Selector::Bare(ident("count"));
        assert_eq!(selector.name(), "count");
    }

    #[test]
    fn keyword_selector_name_joins_parts() {
        let selector = Selector::Keyword(vec![
            SelectorPart {
                keyword: ident("initWithName"),
                ty: Some(ObjcType::pointer_to("NSString")),
                parameter: Some(ident("name")),
                span: Span::new(0, 10),
            },
            SelectorPart {
                keyword: ident("age"),
                ty: Some(ObjcType::named("NSInteger")),
                parameter: Some(ident("age")),
                span: Span::new(11, 20),
            },
        ]);
        assert_eq!(selector.name(), "initWithName:age:");
        assert_eq!(selector.span(), Span::new(0, 20));
    }

    #[test]
    fn objc_type_display() {
        assert_eq!(ObjcType::pointer_to("NSString").to_string(), "NSString*");
        assert_eq!(
            ObjcType::Id {
                protocols: vec!["Delegate".into()]
            }
            .to_string(),
            "id<Delegate>"
        );
        let weak_id = ObjcType::Specified {
            specifiers: vec![TypeSpecifier::Weak],
            base: Box::new(ObjcType::Id {
                protocols: Vec::new(),
            }),
        };
        assert_eq!(weak_id.to_string(), "__weak id");
    }

    #[test]
    fn objc_type_is_object() {
        assert!(ObjcType::pointer_to("NSString").is_object());
        assert!(ObjcType::Id { protocols: vec![] }.is_object());
        assert!(!ObjcType::named("NSInteger").is_object());
        let weak_id = ObjcType::Specified {
            specifiers: vec![TypeSpecifier::Weak],
            base: Box::new(ObjcType::Id { protocols: vec![] }),
        };
        assert!(weak_id.is_object());
    }

    #[test]
    fn specifiers_collect_through_nesting() {
        let ty = ObjcType::Specified {
            specifiers: vec![TypeSpecifier::Const],
            base: Box::new(ObjcType::Specified {
                specifiers: vec![TypeSpecifier::Weak],
                base: Box::new(ObjcType::Id { protocols: vec![] }),
            }),
        };
        assert_eq!(
            ty.specifiers(),
            vec![TypeSpecifier::Const, TypeSpecifier::Weak]
        );
        assert_eq!(*ty.unspecified(), ObjcType::Id { protocols: vec![] });
    }

    #[test]
    fn type_specifier_table() {
        assert_eq!(TypeSpecifier::from_ident("__weak"), Some(TypeSpecifier::Weak));
        assert_eq!(TypeSpecifier::from_ident("const"), Some(TypeSpecifier::Const));
        assert_eq!(
            TypeSpecifier::from_ident("_Nullable"),
            Some(TypeSpecifier::Nullable)
        );
        assert_eq!(TypeSpecifier::from_ident("static"), None);
    }

    #[test]
    fn find_keyword_filters() {
        let keywords = vec![
            KeywordNode {
                keyword: AtKeyword::Interface,
                span: Span::new(0, 10),
            },
            KeywordNode {
                keyword: AtKeyword::End,
                span: Span::new(50, 54),
            },
        ];
        assert_eq!(
            find_keyword(&keywords, AtKeyword::End).map(|k| k.span),
            Some(Span::new(50, 54))
        );
        assert!(find_keyword(&keywords, AtKeyword::Property).is_none());
    }

    #[test]
    fn property_attribute_lookup() {
        let property = PropertyDeclaration {
            attributes: vec![
                PropertyAttribute {
                    kind: PropertyAttributeKind::Keyword("nonatomic".into()),
                    span: Span::new(11, 20),
                },
                PropertyAttribute {
                    kind: PropertyAttributeKind::Getter("isEnabled".into()),
                    span: Span::new(22, 38),
                },
            ],
            ty: ObjcType::named("BOOL"),
            identifier: ident("enabled"),
            keywords: Vec::new(),
            in_nonnull_region: false,
            span: Span::new(0, 50),
        };
        assert!(property.has_attribute("nonatomic"));
        assert!(!property.has_attribute("getter"));
    }

    #[test]
    fn selector_reference_format() {
        let selector = Selector::Bare(ident("count"));
        assert_eq!(selector_reference("NSArray", &selector, false), "-[NSArray count]");
        assert_eq!(selector_reference("NSArray", &selector, true), "+[NSArray count]");
    }
}
