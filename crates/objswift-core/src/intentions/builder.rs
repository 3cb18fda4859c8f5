// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Builds the intention graph from parsed files.
//!
//! The builder visits input files in the order supplied and folds their
//! concrete trees into one graph:
//!
//! - For every class name declared by any `@interface` or
//!   `@implementation` across the whole set, exactly one
//!   [`TypeIntention`] is produced. Interface properties are taken
//!   verbatim; implementation bodies attach to interface methods by
//!   selector equality; implementation-only methods are appended with a
//!   *warning* when an interface exists.
//! - A header-only class is emitted to its header's path. When an
//!   implementation file exists the class is emitted to the `.m` path
//!   instead and the header is not re-emitted.
//! - Categories become extension intentions in their own file; their
//!   method bodies are claimed from the class implementation.
//! - Forward declarations (`@class`, `@protocol Name;`) produce no
//!   intention.

use std::collections::HashMap;

use camino::Utf8PathBuf;
use ecow::{EcoString, eco_format};

use crate::ast::{
    ClassCategory, ClassImplementation, ClassInterface, GlobalContext, IVarDeclaration,
    IVarVisibility, MethodSignature, ObjcType, PropertyAttributeKind, PropertyDeclaration,
    PropertyImplementationKind, ProtocolDeclaration, Selector, TopLevel, TypeSpecifier,
    find_keyword, selector_reference,
};
use crate::source_analysis::{AtKeyword, Diagnostic, Diagnostics};

use super::{
    AccessLevel, FieldIntention, FileIntention, FileMember, InitIntention, IntentionHeader,
    MethodIntention, Nullability, Ownership, ParameterIntention, PropertyIntention,
    ProtocolIntention, TypeIntention, ValueStorage,
};

/// Folds parsed files into an intention graph.
///
/// # Examples
///
/// ```
/// use objswift_core::intentions::builder::IntentionBuilder;
/// use objswift_core::source_analysis::parse_source;
///
/// let (context, _) = parse_source("@interface A\n@end").unwrap();
/// let mut builder = IntentionBuilder::new();
/// builder.add_file("a.h", context);
/// let (files, diagnostics) = builder.build();
/// assert_eq!(files.len(), 1);
/// assert!(diagnostics.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct IntentionBuilder {
    files: Vec<ParsedFile>,
    diagnostics: Diagnostics,
}

#[derive(Debug)]
struct ParsedFile {
    path: Utf8PathBuf,
    context: GlobalContext,
}

/// Everything known about one class across the input set.
#[derive(Debug, Default)]
struct ClassParts {
    interface: Option<Placed<ClassInterface>>,
    implementation: Option<Placed<ClassImplementation>>,
}

/// A declaration plus its position in the input set.
#[derive(Debug)]
struct Placed<T> {
    file: usize,
    order: usize,
    node: T,
}

impl IntentionBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one parsed file. Files are visited in insertion order.
    pub fn add_file(&mut self, path: impl Into<Utf8PathBuf>, context: GlobalContext) {
        self.files.push(ParsedFile {
            path: path.into(),
            context,
        });
    }

    /// Builds the intention graph, consuming the builder.
    ///
    /// Returns the file intentions in input order plus the semantic
    /// diagnostics (pairing mismatches are warnings, never errors).
    #[must_use]
    pub fn build(mut self) -> (Vec<FileIntention>, Diagnostics) {
        let mut class_order: Vec<EcoString> = Vec::new();
        let mut classes: HashMap<EcoString, ClassParts> = HashMap::new();
        let mut categories: Vec<Placed<ClassCategory>> = Vec::new();
        let mut protocols: Vec<Placed<ProtocolDeclaration>> = Vec::new();

        for (file, parsed) in self.files.iter().enumerate() {
            for (order, member) in parsed.context.members.iter().enumerate() {
                match member {
                    TopLevel::ClassInterface(node) => {
                        let name = node.identifier.name.clone();
                        let parts = classes.entry(name.clone()).or_insert_with(|| {
                            class_order.push(name.clone());
                            ClassParts::default()
                        });
                        parts.interface = Some(Placed {
                            file,
                            order,
                            node: node.clone(),
                        });
                    }
                    TopLevel::ClassImplementation(node) => {
                        let name = node.identifier.name.clone();
                        let parts = classes.entry(name.clone()).or_insert_with(|| {
                            class_order.push(name.clone());
                            ClassParts::default()
                        });
                        parts.implementation = Some(Placed {
                            file,
                            order,
                            node: node.clone(),
                        });
                    }
                    TopLevel::ClassCategory(node) => categories.push(Placed {
                        file,
                        order,
                        node: node.clone(),
                    }),
                    TopLevel::ProtocolDeclaration(node) => {
                        // A forward declaration (`@protocol Name;`) has no
                        // `@end` token and produces no intention.
                        if find_keyword(&node.keywords, AtKeyword::End).is_some() {
                            protocols.push(Placed {
                                file,
                                order,
                                node: node.clone(),
                            });
                        }
                    }
                    TopLevel::ForwardClassDeclaration(_) => {}
                }
            }
        }

        // (file index, declaration order, member) for final grouping.
        let mut placed_members: Vec<(usize, usize, FileMember)> = Vec::new();

        for name in &class_order {
            let parts = classes.remove(name).unwrap_or_default();
            let class_categories: Vec<&Placed<ClassCategory>> = categories
                .iter()
                .filter(|c| &c.node.class_identifier.name == name)
                .collect();

            let (file, order) = match (&parts.implementation, &parts.interface) {
                (Some(implementation), _) => (implementation.file, implementation.order),
                (None, Some(interface)) => (interface.file, interface.order),
                (None, None) => continue,
            };

            let (type_intention, extensions) = self.build_class(name, &parts, &class_categories);
            placed_members.push((file, order, FileMember::Type(type_intention)));
            for (placed, extension) in class_categories.iter().zip(extensions) {
                placed_members.push((placed.file, placed.order, FileMember::Type(extension)));
            }
        }

        // Categories of classes that never appear as interface or
        // implementation still produce standalone extensions.
        for placed in &categories {
            let name = &placed.node.class_identifier.name;
            if class_order.contains(name) {
                continue;
            }
            let extension = self.build_category(&placed.node, &mut Vec::new());
            placed_members.push((placed.file, placed.order, FileMember::Type(extension)));
        }

        for placed in &protocols {
            let file_path = self.files[placed.file].path.clone();
            let protocol = build_protocol(&placed.node, &file_path);
            placed_members.push((placed.file, placed.order, FileMember::Protocol(protocol)));
        }

        // Group members by output file, keeping input order across files
        // and declaration order within one file.
        placed_members.sort_by_key(|(file, order, _)| (*file, *order));
        let mut result: Vec<FileIntention> = Vec::new();
        for (file, _, member) in placed_members {
            let path = self.files[file].path.clone();
            match result.last_mut() {
                Some(last) if last.path == path => last.members.push(member),
                _ => result.push(FileIntention {
                    path,
                    members: vec![member],
                }),
            }
        }

        (result, self.diagnostics)
    }

    /// Builds the merged class intention plus one extension per category.
    fn build_class(
        &mut self,
        name: &EcoString,
        parts: &ClassParts,
        categories: &[&Placed<ClassCategory>],
    ) -> (TypeIntention, Vec<TypeIntention>) {
        let interface = parts.interface.as_ref();
        let implementation = parts.implementation.as_ref();

        let superclass = interface
            .and_then(|i| i.node.superclass.as_ref())
            .or_else(|| implementation.and_then(|i| i.node.superclass.as_ref()))
            .map(|s| s.name.clone());

        let mut intention = TypeIntention::class(name.clone(), superclass);

        if let Some(interface) = interface {
            let path = self.files[interface.file].path.clone();
            intention.header = IntentionHeader::from_source(path, interface.node.span);
            if let Some(protocols) = &interface.node.protocols {
                intention.conformances =
                    protocols.protocols.iter().map(|p| p.name.clone()).collect();
            }
        } else if let Some(implementation) = implementation {
            let path = self.files[implementation.file].path.clone();
            intention.header = IntentionHeader::from_source(path, implementation.node.span);
        }

        // Properties come from the interface verbatim.
        if let Some(interface) = interface {
            for property in &interface.node.properties {
                intention.properties.push(build_property(property));
            }
        }

        // `@synthesize` / `@dynamic` bind storage behavior.
        if let Some(implementation) = implementation {
            for property_impl in &implementation.node.property_impls {
                for item in &property_impl.items {
                    let Some(property) = intention
                        .properties
                        .iter_mut()
                        .find(|p| p.name == item.name.name)
                    else {
                        self.diagnostics.push(Diagnostic::warning(
                            eco_format!(
                                "property implementation for '{}' has no matching '@property'",
                                item.name.name
                            ),
                            item.span,
                        ));
                        continue;
                    };
                    match property_impl.kind {
                        PropertyImplementationKind::Synthesize => {
                            property.backing_ivar = Some(
                                item.ivar
                                    .as_ref()
                                    .map_or_else(|| item.name.name.clone(), |i| i.name.clone()),
                            );
                        }
                        PropertyImplementationKind::Dynamic => property.is_dynamic = true,
                    }
                }
            }
        }

        // Interface methods, with bodies attached by selector equality.
        let mut leftovers: Vec<&MethodSignature> = implementation
            .map(|i| i.node.methods.iter().collect())
            .unwrap_or_default();

        if let Some(interface) = interface {
            for method in &interface.node.methods {
                let matched = take_matching(&mut leftovers, method);
                self.push_member_method(&mut intention, method, matched.is_some());
            }
        }

        // Category-declared methods claim their bodies next.
        let mut extensions = Vec::new();
        for placed in categories {
            extensions.push(self.build_category(&placed.node, &mut leftovers));
        }

        // Whatever remains was declared only in the implementation.
        let warn_unmatched = interface.is_some();
        let leftovers: Vec<MethodSignature> = leftovers.into_iter().cloned().collect();
        for method in &leftovers {
            if warn_unmatched {
                self.diagnostics.push(Diagnostic::warning(
                    eco_format!(
                        "{} is not declared in the class interface",
                        selector_reference(name, &method.selector, method.is_class_method)
                    ),
                    method.selector.span(),
                ));
            }
            self.push_member_method(&mut intention, method, true);
        }

        // Ivars not consumed as property backing storage become fields.
        let backing: Vec<EcoString> = intention
            .properties
            .iter()
            .filter_map(|p| p.backing_ivar.clone())
            .collect();
        let ivar_lists = interface
            .and_then(|i| i.node.ivars.as_ref())
            .into_iter()
            .chain(implementation.and_then(|i| i.node.ivars.as_ref()));
        for list in ivar_lists {
            for ivar in &list.ivars {
                if backing.contains(&ivar.identifier.name) {
                    continue;
                }
                intention.fields.push(build_field(ivar));
            }
        }

        (intention, extensions)
    }

    /// Builds an extension intention from a category, claiming method
    /// bodies from `leftovers`.
    fn build_category(
        &mut self,
        category: &ClassCategory,
        leftovers: &mut Vec<&MethodSignature>,
    ) -> TypeIntention {
        let mut intention = TypeIntention::extension(
            category.class_identifier.name.clone(),
            category.category_name.as_ref().map(|n| n.name.clone()),
        );
        if let Some(protocols) = &category.protocols {
            intention.conformances = protocols.protocols.iter().map(|p| p.name.clone()).collect();
        }
        for property in &category.properties {
            intention.properties.push(build_property(property));
        }
        for method in &category.methods {
            let matched = take_matching(leftovers, method);
            self.push_member_method(&mut intention, method, matched.is_some());
        }
        intention
    }

    /// Adds a method signature to a type as either an initializer or a
    /// plain method intention.
    fn push_member_method(
        &mut self,
        intention: &mut TypeIntention,
        method: &MethodSignature,
        has_body: bool,
    ) {
        if is_initializer(method) {
            intention.initializers.push(build_init(method, has_body));
        } else {
            let mut built = build_method(method);
            built.has_body = has_body || built.has_body;
            intention.methods.push(built);
        }
    }
}

/// Removes and returns the implementation method matching `method` by
/// selector equality (and class-method marker).
fn take_matching<'a>(
    leftovers: &mut Vec<&'a MethodSignature>,
    method: &MethodSignature,
) -> Option<&'a MethodSignature> {
    let position = leftovers.iter().position(|candidate| {
        candidate.is_class_method == method.is_class_method
            && candidate.selector.name() == method.selector.name()
    })?;
    Some(leftovers.remove(position))
}

/// Returns `true` for instance methods that translate to initializers:
/// the selector starts with `init` and the return type is
/// `instancetype`, `id` or unwritten.
fn is_initializer(method: &MethodSignature) -> bool {
    if method.is_class_method {
        return false;
    }
    let first = match &method.selector {
        Selector::Bare(ident) => &ident.name,
        Selector::Keyword(parts) => match parts.first() {
            Some(part) => &part.keyword.name,
            None => return false,
        },
    };
    if !first.starts_with("init") {
        return false;
    }
    match &method.return_type {
        None => true,
        Some(ty) => matches!(
            ty.unspecified(),
            ObjcType::Struct(name) if name == "instancetype"
        ) || matches!(ty.unspecified(), ObjcType::Id { protocols } if protocols.is_empty()),
    }
}

/// Maps a property declaration to its intention, deriving ownership,
/// nullability and setter access from the attribute list.
fn build_property(property: &PropertyDeclaration) -> PropertyIntention {
    let ty = property.ty.clone();

    let ownership = property_ownership(property);
    let nullability = resolve_nullability(
        &ty,
        Some(property),
        property.in_nonnull_region,
    );

    let mut intention = PropertyIntention::new(
        property.identifier.name.clone(),
        ValueStorage {
            ty,
            nullability,
            ownership,
            is_constant: false,
        },
    );

    if property.has_attribute("readonly") {
        // The setter narrows below the property's own access level.
        intention.setter_access = Some(AccessLevel::Private);
    }
    if property.has_attribute("class") {
        intention.is_static = true;
    }
    for attribute in &property.attributes {
        if let PropertyAttributeKind::Keyword(keyword) = &attribute.kind {
            intention.header.known_attributes.push(keyword.clone());
        }
    }

    intention
}

/// Ownership of a property: explicit attributes first, then type
/// specifiers, then the strong default for object types.
fn property_ownership(property: &PropertyDeclaration) -> Ownership {
    if property.has_attribute("weak") {
        return Ownership::Weak;
    }
    if (property.has_attribute("unsafe_unretained") || property.has_attribute("assign"))
        && property.ty.is_object()
    {
        return Ownership::UnownedUnsafe;
    }
    ownership_from_specifiers(&property.ty)
}

/// Ownership implied by `__weak` / `__unsafe_unretained` specifiers.
fn ownership_from_specifiers(ty: &ObjcType) -> Ownership {
    for specifier in ty.specifiers() {
        match specifier {
            TypeSpecifier::Weak => return Ownership::Weak,
            TypeSpecifier::UnsafeUnretained if ty.is_object() => {
                return Ownership::UnownedUnsafe;
            }
            _ => {}
        }
    }
    Ownership::Strong
}

/// Resolves nullability: explicit type specifiers win, then
/// `nullable`/`nonnull` attributes, then the assume-nonnull region,
/// and finally unspecified.
fn resolve_nullability(
    ty: &ObjcType,
    property: Option<&PropertyDeclaration>,
    in_nonnull_region: bool,
) -> Nullability {
    for specifier in ty.specifiers() {
        match specifier {
            TypeSpecifier::Nullable => return Nullability::Nullable,
            TypeSpecifier::Nonnull => return Nullability::Nonnull,
            _ => {}
        }
    }
    if let Some(property) = property {
        if property.has_attribute("nullable") {
            return Nullability::Nullable;
        }
        if property.has_attribute("nonnull") {
            return Nullability::Nonnull;
        }
    }
    if in_nonnull_region {
        return Nullability::Nonnull;
    }
    Nullability::Unspecified
}

/// Maps an ivar to a stored field intention.
fn build_field(ivar: &IVarDeclaration) -> FieldIntention {
    let access_level = match ivar.visibility {
        IVarVisibility::Private => AccessLevel::Private,
        IVarVisibility::Protected | IVarVisibility::Package => AccessLevel::Internal,
        IVarVisibility::Public => AccessLevel::Public,
    };
    let is_constant = ivar.ty.specifiers().contains(&TypeSpecifier::Const);

    FieldIntention {
        header: IntentionHeader {
            access_level,
            ..IntentionHeader::default()
        },
        name: ivar.identifier.name.clone(),
        storage: ValueStorage {
            ty: ivar.ty.clone(),
            nullability: resolve_nullability(&ivar.ty, None, false),
            ownership: ownership_from_specifiers(&ivar.ty),
            is_constant,
        },
    }
}

/// Maps a method signature to a method intention.
fn build_method(method: &MethodSignature) -> MethodIntention {
    let selector = method.selector.name();
    let (name, parameters) = match &method.selector {
        Selector::Bare(ident) => (ident.name.clone(), Vec::new()),
        Selector::Keyword(parts) => {
            let name = parts
                .first()
                .map(|p| p.keyword.name.clone())
                .unwrap_or_default();
            let parameters = parts
                .iter()
                .enumerate()
                .map(|(index, part)| ParameterIntention {
                    label: if index == 0 {
                        None
                    } else {
                        Some(part.keyword.name.clone())
                    },
                    name: part
                        .parameter
                        .as_ref()
                        .map_or_else(|| eco_format!("arg{index}"), |p| p.name.clone()),
                    ty: part
                        .ty
                        .clone()
                        .unwrap_or(ObjcType::Id { protocols: vec![] }),
                    nullability: part.ty.as_ref().map_or(Nullability::Unspecified, |ty| {
                        resolve_nullability(ty, None, method.in_nonnull_region)
                    }),
                })
                .collect();
            (name, parameters)
        }
    };

    let return_type = method.return_type.as_ref().map(|ty| {
        (
            ty.clone(),
            resolve_nullability(ty, None, method.in_nonnull_region),
        )
    });

    MethodIntention {
        header: IntentionHeader::default(),
        name,
        selector,
        parameters,
        return_type,
        is_static: method.is_class_method,
        is_optional: method.is_optional,
        has_body: method.body.is_some(),
    }
}

/// Maps an `init…` method to an initializer intention, deriving the
/// first argument label from the `initWith` prefix.
fn build_init(method: &MethodSignature, has_body: bool) -> InitIntention {
    let selector = method.selector.name();
    let parameters = match &method.selector {
        Selector::Bare(_) => Vec::new(),
        Selector::Keyword(parts) => parts
            .iter()
            .enumerate()
            .map(|(index, part)| {
                let label = if index == 0 {
                    first_init_label(&part.keyword.name)
                } else {
                    Some(part.keyword.name.clone())
                };
                ParameterIntention {
                    label,
                    name: part
                        .parameter
                        .as_ref()
                        .map_or_else(|| eco_format!("arg{index}"), |p| p.name.clone()),
                    ty: part
                        .ty
                        .clone()
                        .unwrap_or(ObjcType::Id { protocols: vec![] }),
                    nullability: part.ty.as_ref().map_or(Nullability::Unspecified, |ty| {
                        resolve_nullability(ty, None, method.in_nonnull_region)
                    }),
                }
            })
            .collect(),
    };

    InitIntention {
        header: IntentionHeader::default(),
        selector,
        parameters,
        is_convenience: false,
        has_body: has_body || method.body.is_some(),
    }
}

/// Derives the first init argument label: `initWithName` → `name`.
fn first_init_label(keyword: &str) -> Option<EcoString> {
    let rest = keyword.strip_prefix("initWith")?;
    let mut chars = rest.chars();
    let first = chars.next()?;
    let mut label = EcoString::new();
    for c in first.to_lowercase() {
        label.push(c);
    }
    label.push_str(chars.as_str());
    Some(label)
}

/// Maps a protocol declaration to its intention.
fn build_protocol(protocol: &ProtocolDeclaration, path: &Utf8PathBuf) -> ProtocolIntention {
    let mut intention = ProtocolIntention {
        header: IntentionHeader::from_source(path.clone(), protocol.span),
        name: protocol.identifier.name.clone(),
        conformances: protocol
            .protocols
            .as_ref()
            .map(|list| list.protocols.iter().map(|p| p.name.clone()).collect())
            .unwrap_or_default(),
        properties: Vec::new(),
        methods: Vec::new(),
    };
    for property in &protocol.properties {
        intention.properties.push(build_property(property));
    }
    for method in &protocol.methods {
        let mut built = build_method(method);
        built.is_optional = method.is_optional;
        intention.methods.push(built);
    }
    intention
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intentions::TypeKind;
    use crate::source_analysis::parse_source;

    fn build_files(files: &[(&str, &str)]) -> (Vec<FileIntention>, Diagnostics) {
        let mut builder = IntentionBuilder::new();
        for (path, source) in files {
            let (context, diagnostics) = parse_source(source).expect("parse");
            assert_eq!(
                diagnostics.error_count(),
                0,
                "unexpected parse errors in {path}: {:?}",
                diagnostics.entries()
            );
            builder.add_file(*path, context);
        }
        builder.build()
    }

    fn single_type(files: &[(&str, &str)]) -> TypeIntention {
        let (result, _) = build_files(files);
        assert_eq!(result.len(), 1, "expected one output file, got {result:?}");
        let FileMember::Type(ty) = &result[0].members[0] else {
            panic!("expected a type member");
        };
        ty.clone()
    }

    #[test]
    fn forward_declaration_produces_no_intention() {
        let (result, diagnostics) = build_files(&[("objc.h", "@class MyClass;")]);
        assert!(result.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn header_only_class_emits_to_header_path() {
        let (result, _) = build_files(&[("objc.h", "@interface MyClass\n@end")]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].path, "objc.h");
    }

    #[test]
    fn paired_class_emits_to_implementation_path_only() {
        let (result, _) = build_files(&[
            ("objc.h", "@interface MyClass\n- (void)myMethod;\n@end"),
            ("objc.m", "@implementation MyClass\n- (void)myMethod {\n}\n@end"),
        ]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].path, "objc.m");

        let FileMember::Type(ty) = &result[0].members[0] else {
            panic!("expected type");
        };
        assert_eq!(ty.methods.len(), 1);
        assert!(ty.methods[0].has_body);
    }

    #[test]
    fn implementation_only_class_is_legal() {
        let (result, diagnostics) =
            build_files(&[("only.m", "@implementation Loner\n- (void)run {\n}\n@end")]);
        assert_eq!(result.len(), 1);
        // No interface means no mismatch warnings.
        assert!(diagnostics.warnings().count() == 0);
        let FileMember::Type(ty) = &result[0].members[0] else {
            panic!("expected type");
        };
        assert_eq!(ty.name, "Loner");
        assert_eq!(ty.methods.len(), 1);
    }

    #[test]
    fn implementation_only_method_warns_and_is_kept() {
        let (result, diagnostics) = build_files(&[
            ("a.h", "@interface A\n- (void)declared;\n@end"),
            (
                "a.m",
                "@implementation A\n- (void)declared {\n}\n- (void)extra {\n}\n@end",
            ),
        ]);
        assert_eq!(diagnostics.warnings().count(), 1);
        assert_eq!(diagnostics.error_count(), 0);

        let FileMember::Type(ty) = &result[0].members[0] else {
            panic!("expected type");
        };
        let names: Vec<_> = ty.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["declared", "extra"]);
    }

    #[test]
    fn property_ownership_mapping() {
        let ty = single_type(&[(
            "a.h",
            "@interface A\n\
             @property (nonatomic, weak) id delegate;\n\
             @property (nonatomic, assign) id target;\n\
             @property (nonatomic, copy) NSString *name;\n\
             @property (nonatomic, assign) NSInteger count;\n\
             @end",
        )]);
        assert_eq!(ty.properties[0].storage.ownership, Ownership::Weak);
        assert_eq!(ty.properties[1].storage.ownership, Ownership::UnownedUnsafe);
        assert_eq!(ty.properties[2].storage.ownership, Ownership::Strong);
        // `assign` on a non-object type stays strong (value semantics).
        assert_eq!(ty.properties[3].storage.ownership, Ownership::Strong);
    }

    #[test]
    fn readonly_narrows_setter_access() {
        let ty = single_type(&[(
            "a.h",
            "@interface A\n@property (nonatomic, readonly) NSInteger count;\n@end",
        )]);
        let property = &ty.properties[0];
        assert_eq!(property.setter_access, Some(AccessLevel::Private));
        assert!(property.setter_access.unwrap() < property.header.access_level);
    }

    #[test]
    fn synthesize_binds_backing_ivar() {
        let ty = single_type(&[
            (
                "a.h",
                "@interface A\n@property (nonatomic) NSInteger abc;\n@property (nonatomic) NSInteger ghi;\n@end",
            ),
            ("a.m", "@implementation A\n@synthesize abc;\n@synthesize ghi=_ghi;\n@end"),
        ]);
        assert_eq!(ty.properties[0].backing_ivar.as_deref(), Some("abc"));
        assert_eq!(ty.properties[1].backing_ivar.as_deref(), Some("_ghi"));
    }

    #[test]
    fn dynamic_suppresses_storage() {
        let ty = single_type(&[
            ("a.h", "@interface A\n@property (nonatomic) NSInteger abc;\n@end"),
            ("a.m", "@implementation A\n@dynamic abc;\n@end"),
        ]);
        assert!(ty.properties[0].is_dynamic);
    }

    #[test]
    fn backing_ivar_is_not_promoted_to_field() {
        let ty = single_type(&[
            (
                "a.h",
                "@interface A {\n    NSInteger _ghi;\n    NSString *_other;\n}\n@property (nonatomic) NSInteger ghi;\n@end",
            ),
            ("a.m", "@implementation A\n@synthesize ghi=_ghi;\n@end"),
        ]);
        let field_names: Vec<_> = ty.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(field_names, vec!["_other"]);
    }

    #[test]
    fn ivar_visibility_maps_to_access_levels() {
        let ty = single_type(&[(
            "a.h",
            "@interface A {\n@private\n    int _a;\n@protected\n    int _b;\n@package\n    int _c;\n@public\n    int _d;\n}\n@end",
        )]);
        let levels: Vec<_> = ty.fields.iter().map(|f| f.header.access_level).collect();
        assert_eq!(
            levels,
            vec![
                AccessLevel::Private,
                AccessLevel::Internal,
                AccessLevel::Internal,
                AccessLevel::Public,
            ]
        );
    }

    #[test]
    fn weak_ivar_ownership_and_const_constant() {
        let ty = single_type(&[(
            "a.h",
            "@interface A {\n    __weak id _delegate;\n    const int _limit;\n}\n@end",
        )]);
        assert_eq!(ty.fields[0].storage.ownership, Ownership::Weak);
        assert!(ty.fields[1].storage.is_constant);
    }

    #[test]
    fn init_methods_become_initializers() {
        let ty = single_type(&[(
            "a.h",
            "@interface A\n- (instancetype)init;\n- (instancetype)initWithName:(NSString *)name age:(NSInteger)age;\n- (void)initialize;\n@end",
        )]);
        assert_eq!(ty.initializers.len(), 2);
        assert!(ty.initializers[0].parameters.is_empty());

        let with_name = &ty.initializers[1];
        assert_eq!(with_name.selector, "initWithName:age:");
        assert_eq!(with_name.parameters[0].label.as_deref(), Some("name"));
        assert_eq!(with_name.parameters[1].label.as_deref(), Some("age"));

        // `initialize` has a void return type, so it stays a method.
        assert_eq!(ty.methods.len(), 1);
        assert_eq!(ty.methods[0].name, "initialize");
    }

    #[test]
    fn nullability_resolution_order() {
        let ty = single_type(&[(
            "a.h",
            "NS_ASSUME_NONNULL_BEGIN\n\
             @interface A\n\
             @property (nonatomic) NSString * _Nullable explicit;\n\
             @property (nonatomic, nullable) NSString *attributed;\n\
             @property (nonatomic) NSString *regional;\n\
             @end\n\
             NS_ASSUME_NONNULL_END\n\
             @interface B\n\
             @property (nonatomic) NSString *unmarked;\n\
             @end",
        )]);
        assert_eq!(ty.properties[0].storage.nullability, Nullability::Nullable);
        assert_eq!(ty.properties[1].storage.nullability, Nullability::Nullable);
        assert_eq!(ty.properties[2].storage.nullability, Nullability::Nonnull);
    }

    #[test]
    fn unmarked_property_is_unspecified() {
        let ty = single_type(&[(
            "b.h",
            "@interface B\n@property (nonatomic) NSString *unmarked;\n@end",
        )]);
        assert_eq!(
            ty.properties[0].storage.nullability,
            Nullability::Unspecified
        );
    }

    #[test]
    fn category_becomes_extension_and_claims_bodies() {
        let (result, diagnostics) = build_files(&[
            ("a.h", "@interface A\n@end"),
            ("a+extras.h", "@interface A (Extras)\n- (void)extra;\n@end"),
            ("a.m", "@implementation A\n- (void)extra {\n}\n@end"),
        ]);
        // The category method's body comes from the class implementation,
        // so no mismatch warning fires.
        assert_eq!(diagnostics.warnings().count(), 0);
        assert_eq!(result.len(), 2);

        let extension_file = result
            .iter()
            .find(|f| f.path == "a+extras.h")
            .expect("extension file");
        let FileMember::Type(extension) = &extension_file.members[0] else {
            panic!("expected extension");
        };
        assert!(matches!(extension.kind, TypeKind::Extension { .. }));
        assert!(extension.methods[0].has_body);
    }

    #[test]
    fn protocol_intention_with_optional_methods() {
        let (result, _) = build_files(&[(
            "p.h",
            "@protocol Watcher <NSObject>\n- (void)observe;\n@optional\n- (void)tearDown;\n@end",
        )]);
        let FileMember::Protocol(protocol) = &result[0].members[0] else {
            panic!("expected protocol");
        };
        assert_eq!(protocol.name, "Watcher");
        assert_eq!(protocol.conformances, vec![EcoString::from("NSObject")]);
        assert!(!protocol.methods[0].is_optional);
        assert!(protocol.methods[1].is_optional);
    }

    #[test]
    fn forward_protocol_declaration_produces_no_intention() {
        let (result, _) = build_files(&[("p.h", "@protocol Forward;")]);
        assert!(result.is_empty());
    }

    #[test]
    fn files_visited_in_provider_order() {
        let (result, _) = build_files(&[
            ("z.h", "@interface Z\n@end"),
            ("a.h", "@interface A\n@end"),
        ]);
        let paths: Vec<_> = result.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["z.h", "a.h"]);
    }
}
