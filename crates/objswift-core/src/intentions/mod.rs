// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The intention graph: a language-neutral description of the Swift
//! program to be produced.
//!
//! Intentions sit between the Objective-C front end and the Swift
//! emitter. The [`IntentionBuilder`](builder::IntentionBuilder) folds the
//! concrete trees of *all* input files into one graph, merging paired
//! header/implementation declarations; the emitter consumes the graph
//! read-only.
//!
//! The graph is a rooted tree: `file → (type | protocol | global fn |
//! global var | typealias)*`, with each intention variant carrying a
//! common [`IntentionHeader`] (source origin, access level, known
//! attributes). Ownership is by the tree; traversals pass parent context
//! down instead of materializing back-references.

pub mod builder;

use camino::Utf8PathBuf;
use ecow::EcoString;

use crate::ast::ObjcType;
use crate::source_analysis::Span;

/// Reference counting semantics of a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ownership {
    /// The default strong reference; emits no modifier.
    #[default]
    Strong,
    /// `weak`
    Weak,
    /// `unowned(safe)`
    UnownedSafe,
    /// `unowned(unsafe)`
    UnownedUnsafe,
}

impl Ownership {
    /// The Swift modifier spelling, or `None` for [`Ownership::Strong`].
    #[must_use]
    pub const fn modifier(self) -> Option<&'static str> {
        match self {
            Self::Strong => None,
            Self::Weak => Some("weak"),
            Self::UnownedSafe => Some("unowned(safe)"),
            Self::UnownedUnsafe => Some("unowned(unsafe)"),
        }
    }
}

/// Swift access level, ordered from most to least restrictive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum AccessLevel {
    /// `private`
    Private,
    /// `fileprivate` — used only when setter visibility narrowing
    /// requires it
    FilePrivate,
    /// `internal` (the default; omitted in output)
    #[default]
    Internal,
    /// `public`
    Public,
    /// `open` — emitted as the literal token
    Open,
}

impl AccessLevel {
    /// The Swift keyword for this level.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::FilePrivate => "fileprivate",
            Self::Internal => "internal",
            Self::Public => "public",
            Self::Open => "open",
        }
    }
}

/// Nullability of a value, resolved from specifiers, attributes and
/// assume-nonnull regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Nullability {
    /// Known non-null; emits the plain type.
    Nonnull,
    /// Known nullable; emits an optional (`?`).
    Nullable,
    /// No information; emits an implicitly-unwrapped optional (`!`).
    #[default]
    Unspecified,
}

/// The type, ownership and constancy of a stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueStorage {
    /// The Objective-C type; mapped to Swift at emission.
    pub ty: ObjcType,
    /// Resolved nullability of the value.
    pub nullability: Nullability,
    /// Reference ownership.
    pub ownership: Ownership,
    /// `true` emits `let`, `false` emits `var`.
    pub is_constant: bool,
}

impl ValueStorage {
    /// Creates storage with strong ownership and unspecified nullability.
    #[must_use]
    pub fn new(ty: ObjcType) -> Self {
        Self {
            ty,
            nullability: Nullability::default(),
            ownership: Ownership::default(),
            is_constant: false,
        }
    }
}

/// Where an intention came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOrigin {
    /// The input file the declaration was read from.
    pub file: Utf8PathBuf,
    /// The declaration's span within that file.
    pub span: Span,
}

/// The common header carried by every intention.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntentionHeader {
    /// The source declaration this intention was built from, if any.
    pub source: Option<SourceOrigin>,
    /// The Swift access level to emit.
    pub access_level: AccessLevel,
    /// Free-form attributes recognized by decorators (`convenience`,
    /// `override`, `mutating`, …).
    pub known_attributes: Vec<EcoString>,
}

impl IntentionHeader {
    /// Creates a header with the given source origin and default access.
    #[must_use]
    pub fn from_source(file: Utf8PathBuf, span: Span) -> Self {
        Self {
            source: Some(SourceOrigin { file, span }),
            access_level: AccessLevel::default(),
            known_attributes: Vec::new(),
        }
    }

    /// Returns `true` if `attribute` is among the known attributes.
    #[must_use]
    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.known_attributes.iter().any(|a| a == attribute)
    }
}

/// One output file and the intentions emitted into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIntention {
    /// The output path; also named by the end-of-file trailer.
    pub path: Utf8PathBuf,
    /// Members in emission order.
    pub members: Vec<FileMember>,
}

/// A top-level member of a file intention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileMember {
    /// A class or extension.
    Type(TypeIntention),
    /// A protocol.
    Protocol(ProtocolIntention),
    /// A free function.
    GlobalFunction(GlobalFunctionIntention),
    /// A file-scope variable.
    GlobalVariable(GlobalVariableIntention),
    /// A `typealias`.
    Typealias(TypealiasIntention),
}

/// What kind of type declaration to emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// A class with an optional superclass (defaults to `NSObject` in
    /// emission when absent).
    Class {
        /// The superclass name, when declared.
        superclass: Option<EcoString>,
    },
    /// An extension derived from a category.
    Extension {
        /// The category name, kept for documentation purposes.
        category: Option<EcoString>,
    },
}

/// A class or extension to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeIntention {
    /// Common intention header.
    pub header: IntentionHeader,
    /// The type name.
    pub name: EcoString,
    /// Class or extension.
    pub kind: TypeKind,
    /// Protocol conformances in declaration order.
    pub conformances: Vec<EcoString>,
    /// Stored fields promoted from ivars.
    pub fields: Vec<FieldIntention>,
    /// Properties in declaration order.
    pub properties: Vec<PropertyIntention>,
    /// Initializers in declaration order.
    pub initializers: Vec<InitIntention>,
    /// Methods in declaration order.
    pub methods: Vec<MethodIntention>,
}

impl TypeIntention {
    /// Creates an empty class intention.
    #[must_use]
    pub fn class(name: impl Into<EcoString>, superclass: Option<EcoString>) -> Self {
        Self {
            header: IntentionHeader::default(),
            name: name.into(),
            kind: TypeKind::Class { superclass },
            conformances: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            initializers: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Creates an empty extension intention.
    #[must_use]
    pub fn extension(name: impl Into<EcoString>, category: Option<EcoString>) -> Self {
        Self {
            header: IntentionHeader::default(),
            name: name.into(),
            kind: TypeKind::Extension { category },
            conformances: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            initializers: Vec::new(),
            methods: Vec::new(),
        }
    }
}

/// A stored field promoted from an instance variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIntention {
    /// Common intention header.
    pub header: IntentionHeader,
    /// The field name.
    pub name: EcoString,
    /// The field's storage.
    pub storage: ValueStorage,
}

/// A property to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyIntention {
    /// Common intention header.
    pub header: IntentionHeader,
    /// The property name.
    pub name: EcoString,
    /// The property's storage.
    pub storage: ValueStorage,
    /// A narrower setter access level (`readonly` properties).
    pub setter_access: Option<AccessLevel>,
    /// The backing ivar bound by `@synthesize`, when any.
    pub backing_ivar: Option<EcoString>,
    /// `@dynamic` — storage generation is suppressed.
    pub is_dynamic: bool,
    /// `true` for class (`static`) properties.
    pub is_static: bool,
    /// Set for protocol requirements following `@optional`.
    pub is_optional: bool,
}

impl PropertyIntention {
    /// Creates a plain instance property.
    #[must_use]
    pub fn new(name: impl Into<EcoString>, storage: ValueStorage) -> Self {
        Self {
            header: IntentionHeader::default(),
            name: name.into(),
            storage,
            setter_access: None,
            backing_ivar: None,
            is_dynamic: false,
            is_static: false,
            is_optional: false,
        }
    }
}

/// One parameter of a method or initializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterIntention {
    /// The external argument label; `None` emits `_`.
    pub label: Option<EcoString>,
    /// The internal parameter name.
    pub name: EcoString,
    /// The parameter type.
    pub ty: ObjcType,
    /// The parameter's nullability.
    pub nullability: Nullability,
}

/// A method to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodIntention {
    /// Common intention header.
    pub header: IntentionHeader,
    /// The Swift function name (first selector part).
    pub name: EcoString,
    /// The full Objective-C selector, used for pairing.
    pub selector: EcoString,
    /// Parameters in order.
    pub parameters: Vec<ParameterIntention>,
    /// Return type; `None` or `void` is omitted in output.
    pub return_type: Option<(ObjcType, Nullability)>,
    /// `true` for class methods (`static`).
    pub is_static: bool,
    /// Set for protocol requirements following `@optional`.
    pub is_optional: bool,
    /// Whether an implementation body was found for this method.
    pub has_body: bool,
}

impl MethodIntention {
    /// Creates a bare instance method with no parameters.
    #[must_use]
    pub fn new(name: impl Into<EcoString>) -> Self {
        let name = name.into();
        Self {
            header: IntentionHeader::default(),
            selector: name.clone(),
            name,
            parameters: Vec::new(),
            return_type: None,
            is_static: false,
            is_optional: false,
            has_body: false,
        }
    }
}

/// An initializer to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitIntention {
    /// Common intention header.
    pub header: IntentionHeader,
    /// The full Objective-C selector, used for pairing.
    pub selector: EcoString,
    /// Parameters in order.
    pub parameters: Vec<ParameterIntention>,
    /// `true` emits the `convenience` modifier.
    pub is_convenience: bool,
    /// Whether an implementation body was found.
    pub has_body: bool,
}

/// A protocol to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolIntention {
    /// Common intention header.
    pub header: IntentionHeader,
    /// The protocol name.
    pub name: EcoString,
    /// Inherited protocols.
    pub conformances: Vec<EcoString>,
    /// Property requirements.
    pub properties: Vec<PropertyIntention>,
    /// Method requirements.
    pub methods: Vec<MethodIntention>,
}

/// A free function to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalFunctionIntention {
    /// Common intention header.
    pub header: IntentionHeader,
    /// The function name.
    pub name: EcoString,
    /// Parameters in order.
    pub parameters: Vec<ParameterIntention>,
    /// Return type; `None` or `void` is omitted in output.
    pub return_type: Option<(ObjcType, Nullability)>,
}

/// A file-scope variable to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalVariableIntention {
    /// Common intention header.
    pub header: IntentionHeader,
    /// The variable name.
    pub name: EcoString,
    /// The variable's storage.
    pub storage: ValueStorage,
}

/// A `typealias` to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypealiasIntention {
    /// Common intention header.
    pub header: IntentionHeader,
    /// The alias name.
    pub name: EcoString,
    /// The aliased type.
    pub aliased: ObjcType,
    /// Nullability of the aliased type.
    pub nullability: Nullability,
}
