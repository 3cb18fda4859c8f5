// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Swift source emission from the intention graph.
//!
//! The emitter traverses a [`FileIntention`] in declaration order,
//! consulting the [`ModifierChain`] to prefix each declaration with its
//! modifier tokens, and builds a [`Document`] tree that is rendered in a
//! final pass. Block indentation is scoped by `nest`, so indents are
//! balanced on every path by construction.
//!
//! The end-of-file trailer is *not* produced here; appending
//! `// End of file <path>` is the closing [`FileOutput`] contract (see
//! [`crate::output`]).
//!
//! [`FileOutput`]: crate::output::FileOutput

use crate::docvec;
use crate::intentions::{
    FieldIntention, FileIntention, FileMember, GlobalFunctionIntention, GlobalVariableIntention,
    InitIntention, MethodIntention, Nullability, ParameterIntention, PropertyIntention,
    ProtocolIntention, TypeIntention, TypeKind, TypealiasIntention,
};

use super::document::{Document, INDENT, concat, join, line, nest, nil};
use super::modifiers::{DecoratableElement, ModifierChain};
use super::types::{swift_return_type, swift_type};

/// Emits Swift text from file intentions.
///
/// # Examples
///
/// ```
/// use objswift_core::codegen::swift::SwiftEmitter;
/// use objswift_core::intentions::{FileIntention, FileMember, TypeIntention};
///
/// let file = FileIntention {
///     path: "objc.h".into(),
///     members: vec![FileMember::Type(TypeIntention::class("MyClass", None))],
/// };
/// let text = SwiftEmitter::new().emit_file(&file);
/// assert_eq!(text, "class MyClass: NSObject {\n}");
/// ```
#[derive(Default)]
pub struct SwiftEmitter {
    chain: ModifierChain,
}

impl SwiftEmitter {
    /// Creates an emitter with the default modifier chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an emitter with a custom modifier chain.
    #[must_use]
    pub fn with_chain(chain: ModifierChain) -> Self {
        Self { chain }
    }

    /// Renders one file intention to Swift source text, without the
    /// end-of-file trailer.
    #[must_use]
    pub fn emit_file(&self, file: &FileIntention) -> String {
        let members: Vec<Document<'static>> = file
            .members
            .iter()
            .map(|member| self.member_doc(member))
            .collect();
        join(members, &docvec![line(), line()]).render()
    }

    fn member_doc(&self, member: &FileMember) -> Document<'static> {
        match member {
            FileMember::Type(ty) => self.type_doc(ty),
            FileMember::Protocol(protocol) => self.protocol_doc(protocol),
            FileMember::GlobalFunction(function) => self.global_function_doc(function),
            FileMember::GlobalVariable(variable) => self.global_variable_doc(variable),
            FileMember::Typealias(alias) => self.typealias_doc(alias),
        }
    }

    /// The space-separated modifier prefix for a declaration, ending
    /// with a trailing space when any modifier fired.
    fn modifier_prefix(&self, element: &DecoratableElement<'_>) -> Document<'static> {
        let modifiers = self.chain.modifiers_for(element);
        if modifiers.is_empty() {
            return nil();
        }
        let mut prefix = String::new();
        for modifier in &modifiers {
            prefix.push_str(modifier);
            prefix.push(' ');
        }
        Document::String(prefix)
    }

    // ========================================================================
    // Types
    // ========================================================================

    fn type_doc(&self, ty: &TypeIntention) -> Document<'static> {
        let header = match &ty.kind {
            TypeKind::Class { superclass } => {
                let mut inherits: Vec<&str> =
                    vec![superclass.as_ref().map_or("NSObject", |s| s.as_str())];
                inherits.extend(ty.conformances.iter().map(ecow::EcoString::as_str));
                docvec![
                    self.modifier_prefix(&DecoratableElement::Type(ty)),
                    "class ",
                    ty.name.clone(),
                    ": ",
                    inherits.join(", "),
                ]
            }
            TypeKind::Extension { .. } => {
                let conformances = if ty.conformances.is_empty() {
                    nil()
                } else {
                    let names: Vec<&str> =
                        ty.conformances.iter().map(ecow::EcoString::as_str).collect();
                    docvec![": ", names.join(", ")]
                };
                docvec![
                    self.modifier_prefix(&DecoratableElement::Type(ty)),
                    "extension ",
                    ty.name.clone(),
                    conformances,
                ]
            }
        };

        let mut members: Vec<Document<'static>> = Vec::new();
        for field in &ty.fields {
            members.push(self.field_doc(field));
        }
        for property in &ty.properties {
            members.push(self.property_doc(property, false));
        }
        for init in &ty.initializers {
            members.push(self.init_doc(init));
        }
        for method in &ty.methods {
            members.push(self.method_doc(method, true));
        }

        block(header, members)
    }

    fn protocol_doc(&self, protocol: &ProtocolIntention) -> Document<'static> {
        let inherits = if protocol.conformances.is_empty() {
            nil()
        } else {
            let names: Vec<&str> = protocol
                .conformances
                .iter()
                .map(ecow::EcoString::as_str)
                .collect();
            docvec![": ", names.join(", ")]
        };
        let header = docvec!["protocol ", protocol.name.clone(), inherits];

        let mut members: Vec<Document<'static>> = Vec::new();
        for property in &protocol.properties {
            members.push(self.property_doc(property, true));
        }
        for method in &protocol.methods {
            members.push(self.method_doc(method, false));
        }

        block(header, members)
    }

    // ========================================================================
    // Members
    // ========================================================================

    fn field_doc(&self, field: &FieldIntention) -> Document<'static> {
        let keyword = if field.storage.is_constant { "let " } else { "var " };
        docvec![
            self.modifier_prefix(&DecoratableElement::Field(field)),
            keyword,
            field.name.clone(),
            ": ",
            swift_type(&field.storage.ty, field.storage.nullability).to_string(),
        ]
    }

    fn property_doc(&self, property: &PropertyIntention, in_protocol: bool) -> Document<'static> {
        let accessors = if in_protocol {
            if property.setter_access.is_some() {
                " { get }"
            } else {
                " { get set }"
            }
        } else {
            ""
        };
        docvec![
            self.modifier_prefix(&DecoratableElement::Property(property)),
            "var ",
            property.name.clone(),
            ": ",
            swift_type(&property.storage.ty, property.storage.nullability).to_string(),
            accessors,
        ]
    }

    fn method_doc(&self, method: &MethodIntention, with_body: bool) -> Document<'static> {
        let signature = docvec![
            self.modifier_prefix(&DecoratableElement::Method(method)),
            "func ",
            method.name.clone(),
            "(",
            parameters_doc(&method.parameters),
            ")",
            return_doc(method.return_type.as_ref()),
        ];
        if with_body {
            docvec![signature, " {", line(), "}"]
        } else {
            signature
        }
    }

    fn init_doc(&self, init: &InitIntention) -> Document<'static> {
        docvec![
            self.modifier_prefix(&DecoratableElement::Initializer(init)),
            "init(",
            parameters_doc(&init.parameters),
            ") {",
            line(),
            "}",
        ]
    }

    // ========================================================================
    // File-scope members
    // ========================================================================

    fn global_function_doc(&self, function: &GlobalFunctionIntention) -> Document<'static> {
        docvec![
            self.modifier_prefix(&DecoratableElement::GlobalFunction(function)),
            "func ",
            function.name.clone(),
            "(",
            parameters_doc(&function.parameters),
            ")",
            return_doc(function.return_type.as_ref()),
            " {",
            line(),
            "}",
        ]
    }

    fn global_variable_doc(&self, variable: &GlobalVariableIntention) -> Document<'static> {
        let keyword = if variable.storage.is_constant { "let " } else { "var " };
        docvec![
            self.modifier_prefix(&DecoratableElement::GlobalVariable(variable)),
            keyword,
            variable.name.clone(),
            ": ",
            swift_type(&variable.storage.ty, variable.storage.nullability).to_string(),
        ]
    }

    fn typealias_doc(&self, alias: &TypealiasIntention) -> Document<'static> {
        docvec![
            "typealias ",
            alias.name.clone(),
            " = ",
            swift_type(&alias.aliased, alias.nullability).to_string(),
        ]
    }
}

/// Builds a braced block: the header, `{`, nested members (one per
/// line), and the closing `}` back at the outer level.
fn block(header: Document<'static>, members: Vec<Document<'static>>) -> Document<'static> {
    if members.is_empty() {
        return docvec![header, " {", line(), "}"];
    }
    let mut inner: Vec<Document<'static>> = Vec::new();
    for member in members {
        inner.push(line());
        inner.push(member);
    }
    docvec![header, " {", nest(INDENT, concat(inner)), line(), "}"]
}

/// Renders a parameter list: `_ name: Type, label name: Type`.
fn parameters_doc(parameters: &[ParameterIntention]) -> Document<'static> {
    let rendered: Vec<Document<'static>> = parameters
        .iter()
        .map(|parameter| {
            let ty = swift_type(&parameter.ty, parameter.nullability).to_string();
            let text = match &parameter.label {
                Some(label) if *label == parameter.name => {
                    format!("{}: {ty}", parameter.name)
                }
                Some(label) => format!("{label} {}: {ty}", parameter.name),
                None => format!("_ {}: {ty}", parameter.name),
            };
            Document::String(text)
        })
        .collect();
    join(rendered, &Document::Str(", "))
}

/// Renders ` -> Type` for non-void, non-elided return types.
fn return_doc(
    return_type: Option<&(crate::ast::ObjcType, Nullability)>,
) -> Document<'static> {
    match return_type {
        Some((ty, nullability)) => match swift_return_type(ty, *nullability) {
            Some(mapped) => Document::String(format!(" -> {mapped}")),
            None => nil(),
        },
        None => nil(),
    }
}
