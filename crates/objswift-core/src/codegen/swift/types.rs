// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Objective-C → Swift type mapping.
//!
//! [`swift_type`] is a pure function from an [`ObjcType`] plus resolved
//! [`Nullability`] to a [`SwiftType`]:
//!
//! | Objective-C | Swift |
//! |---|---|
//! | `BOOL` | `Bool` |
//! | `NSInteger` / `NSUInteger` | `Int` / `UInt` |
//! | `NSString *` (nonnull) | `String` |
//! | `NSString *` (nullable) | `String?` |
//! | `NSArray<T*>*` (nonnull) | `[T]` |
//! | `NSDictionary<K*,V*>*` | `[K: V]` |
//! | `id` | `AnyObject` |
//! | `id<P>` | `P` |
//! | `void` (return) | omitted |
//!
//! Unspecified nullability emits an implicitly-unwrapped optional;
//! scalars never take a nullability suffix.

use ecow::EcoString;

use crate::ast::ObjcType;
use crate::intentions::Nullability;

/// A Swift type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwiftType {
    /// A plain named type: `Int`, `String`, `MyClass`
    Named(EcoString),
    /// An optional: `T?`
    Optional(Box<SwiftType>),
    /// An implicitly-unwrapped optional: `T!`
    ImplicitlyUnwrapped(Box<SwiftType>),
    /// A sugar-form array: `[T]`
    Array(Box<SwiftType>),
    /// A sugar-form dictionary: `[K: V]`
    Dictionary(Box<SwiftType>, Box<SwiftType>),
}

impl std::fmt::Display for SwiftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::Optional(inner) => write!(f, "{inner}?"),
            Self::ImplicitlyUnwrapped(inner) => write!(f, "{inner}!"),
            Self::Array(element) => write!(f, "[{element}]"),
            Self::Dictionary(key, value) => write!(f, "[{key}: {value}]"),
        }
    }
}

/// Scalar and bridged-name mappings for non-pointer types.
fn scalar_name(name: &str) -> EcoString {
    match name {
        "BOOL" | "bool" => "Bool".into(),
        "NSInteger" | "int" | "long" | "long long" | "short" => "Int".into(),
        "NSUInteger" | "unsigned" | "unsigned int" | "unsigned long" | "unsigned long long" => {
            "UInt".into()
        }
        "NSTimeInterval" | "double" => "Double".into(),
        "float" => "Float".into(),
        "char" | "signed char" => "Int8".into(),
        "unsigned char" => "UInt8".into(),
        other => other.into(),
    }
}

/// Foundation class names that bridge to Swift standard types when used
/// behind a pointer.
fn bridged_class_name(name: &str) -> EcoString {
    match name {
        "NSString" => "String".into(),
        "NSNumber" => "NSNumber".into(),
        other => other.into(),
    }
}

/// Maps an Objective-C type to Swift.
///
/// Declaration specifiers (`__weak`, `const`, …) do not affect the type
/// itself — ownership and constancy are carried by the surrounding
/// declaration — so they are stripped before mapping.
#[must_use]
pub fn swift_type(ty: &ObjcType, nullability: Nullability) -> SwiftType {
    let mapped = map_base(ty.unspecified());
    if is_reference(ty) {
        apply_nullability(mapped, nullability)
    } else {
        mapped
    }
}

/// Maps a return type. `void` and `instancetype` returns are omitted —
/// `instancetype` is `Self`, which the printed Swift elides.
#[must_use]
pub fn swift_return_type(ty: &ObjcType, nullability: Nullability) -> Option<SwiftType> {
    match ty.unspecified() {
        ObjcType::Struct(name) if name == "void" => None,
        ObjcType::Struct(name) if name == "instancetype" => None,
        _ => Some(swift_type(ty, nullability)),
    }
}

/// Returns `true` for types that take a nullability suffix (object
/// references), `false` for scalars.
fn is_reference(ty: &ObjcType) -> bool {
    matches!(
        ty.unspecified(),
        ObjcType::Pointer(_) | ObjcType::Id { .. }
    )
}

fn apply_nullability(ty: SwiftType, nullability: Nullability) -> SwiftType {
    match nullability {
        Nullability::Nonnull => ty,
        Nullability::Nullable => SwiftType::Optional(Box::new(ty)),
        Nullability::Unspecified => SwiftType::ImplicitlyUnwrapped(Box::new(ty)),
    }
}

fn map_base(ty: &ObjcType) -> SwiftType {
    match ty {
        ObjcType::Struct(name) => SwiftType::Named(scalar_name(name)),
        ObjcType::Id { protocols } => {
            if protocols.is_empty() {
                SwiftType::Named("AnyObject".into())
            } else {
                SwiftType::Named(protocols.join(" & ").into())
            }
        }
        ObjcType::Pointer(base) => map_pointee(base),
        ObjcType::Generic { name, parameters } => map_generic(name, parameters),
        ObjcType::Specified { base, .. } => map_base(base),
    }
}

/// Maps the pointee of a `T *`. Pointers to Foundation containers and
/// classes collapse to the bridged Swift type.
fn map_pointee(base: &ObjcType) -> SwiftType {
    match base.unspecified() {
        ObjcType::Struct(name) => SwiftType::Named(bridged_class_name(name)),
        ObjcType::Generic { name, parameters } => map_generic(name, parameters),
        // `id *` and `T **` have no sugar form; fall back to the pointee.
        other => map_base(other),
    }
}

/// Maps generic applications, turning Foundation containers into their
/// sugar forms. Container elements are reference types declared inside
/// the container, so they map as nonnull.
fn map_generic(name: &str, parameters: &[ObjcType]) -> SwiftType {
    match (name, parameters) {
        ("NSArray" | "NSMutableArray", [element]) => {
            SwiftType::Array(Box::new(swift_type(element, Nullability::Nonnull)))
        }
        ("NSDictionary" | "NSMutableDictionary", [key, value]) => SwiftType::Dictionary(
            Box::new(swift_type(key, Nullability::Nonnull)),
            Box::new(swift_type(value, Nullability::Nonnull)),
        ),
        _ => {
            let arguments: Vec<String> = parameters
                .iter()
                .map(|p| swift_type(p, Nullability::Nonnull).to_string())
                .collect();
            if arguments.is_empty() {
                SwiftType::Named(name.into())
            } else {
                SwiftType::Named(format!("{name}<{}>", arguments.join(", ")).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TypeSpecifier;

    fn named(name: &str) -> ObjcType {
        ObjcType::named(name)
    }

    fn pointer(name: &str) -> ObjcType {
        ObjcType::pointer_to(name)
    }

    #[test]
    fn bool_maps_to_bool() {
        assert_eq!(
            swift_type(&named("BOOL"), Nullability::Unspecified).to_string(),
            "Bool"
        );
    }

    #[test]
    fn integer_types() {
        assert_eq!(
            swift_type(&named("NSInteger"), Nullability::Unspecified).to_string(),
            "Int"
        );
        assert_eq!(
            swift_type(&named("NSUInteger"), Nullability::Unspecified).to_string(),
            "UInt"
        );
    }

    #[test]
    fn scalars_never_take_nullability_suffix() {
        assert_eq!(
            swift_type(&named("NSInteger"), Nullability::Nullable).to_string(),
            "Int"
        );
    }

    #[test]
    fn nsstring_pointer_by_nullability() {
        assert_eq!(
            swift_type(&pointer("NSString"), Nullability::Nonnull).to_string(),
            "String"
        );
        assert_eq!(
            swift_type(&pointer("NSString"), Nullability::Nullable).to_string(),
            "String?"
        );
        assert_eq!(
            swift_type(&pointer("NSString"), Nullability::Unspecified).to_string(),
            "String!"
        );
    }

    #[test]
    fn plain_class_pointer_keeps_name() {
        assert_eq!(
            swift_type(&pointer("MyClass"), Nullability::Nonnull).to_string(),
            "MyClass"
        );
    }

    #[test]
    fn id_maps_to_anyobject() {
        let id = ObjcType::Id { protocols: vec![] };
        assert_eq!(swift_type(&id, Nullability::Nonnull).to_string(), "AnyObject");
        assert_eq!(
            swift_type(&id, Nullability::Unspecified).to_string(),
            "AnyObject!"
        );
    }

    #[test]
    fn qualified_id_maps_to_protocol() {
        let single = ObjcType::Id {
            protocols: vec!["Delegate".into()],
        };
        assert_eq!(swift_type(&single, Nullability::Nonnull).to_string(), "Delegate");

        let composed = ObjcType::Id {
            protocols: vec!["A".into(), "B".into()],
        };
        assert_eq!(swift_type(&composed, Nullability::Nonnull).to_string(), "A & B");
    }

    #[test]
    fn array_sugar() {
        let array = ObjcType::Pointer(Box::new(ObjcType::Generic {
            name: "NSArray".into(),
            parameters: vec![pointer("NSString")],
        }));
        assert_eq!(swift_type(&array, Nullability::Nonnull).to_string(), "[String]");
        assert_eq!(
            swift_type(&array, Nullability::Nullable).to_string(),
            "[String]?"
        );
    }

    #[test]
    fn dictionary_sugar() {
        let dictionary = ObjcType::Pointer(Box::new(ObjcType::Generic {
            name: "NSDictionary".into(),
            parameters: vec![pointer("NSString"), pointer("NSNumber")],
        }));
        assert_eq!(
            swift_type(&dictionary, Nullability::Nonnull).to_string(),
            "[String: NSNumber]"
        );
    }

    #[test]
    fn specifiers_are_stripped() {
        let weak_id = ObjcType::Specified {
            specifiers: vec![TypeSpecifier::Weak],
            base: Box::new(ObjcType::Id { protocols: vec![] }),
        };
        assert_eq!(
            swift_type(&weak_id, Nullability::Nullable).to_string(),
            "AnyObject?"
        );
    }

    #[test]
    fn void_return_is_omitted() {
        assert_eq!(swift_return_type(&named("void"), Nullability::Unspecified), None);
    }

    #[test]
    fn instancetype_return_is_elided() {
        assert_eq!(
            swift_return_type(&named("instancetype"), Nullability::Unspecified),
            None
        );
    }

    #[test]
    fn other_returns_map_normally() {
        assert_eq!(
            swift_return_type(&pointer("NSString"), Nullability::Nonnull)
                .map(|t| t.to_string()),
            Some("String".to_string())
        );
    }
}
