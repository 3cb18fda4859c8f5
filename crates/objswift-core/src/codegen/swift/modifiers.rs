// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The modifier decorator chain.
//!
//! For each declaration the emitter consults an ordered list of
//! *decorators*, each a pure function contributing zero or more modifier
//! tokens. The registration order in [`ModifierChain::default`] is
//! observable — it determines the order modifiers appear in the output —
//! and is not derivable from the decorators themselves:
//!
//! 1. Access level (omits `internal`)
//! 2. Property setter access (`private(set)`, …)
//! 3. Protocol `optional`
//! 4. `static`
//! 5. `override`
//! 6. `convenience`
//! 7. `mutating`
//! 8. Ownership (`weak`, `unowned(safe)`, `unowned(unsafe)`; strong
//!    emits nothing)

use ecow::{EcoString, eco_format};

use crate::intentions::{
    AccessLevel, FieldIntention, GlobalFunctionIntention, GlobalVariableIntention, InitIntention,
    MethodIntention, PropertyIntention, TypeIntention, ValueStorage,
};

/// A declaration a decorator can inspect: a member intention or a local
/// variable declaration.
#[derive(Debug, Clone, Copy)]
pub enum DecoratableElement<'a> {
    /// A class or extension.
    Type(&'a TypeIntention),
    /// A stored field promoted from an ivar.
    Field(&'a FieldIntention),
    /// A property.
    Property(&'a PropertyIntention),
    /// A method.
    Method(&'a MethodIntention),
    /// An initializer.
    Initializer(&'a InitIntention),
    /// A free function.
    GlobalFunction(&'a GlobalFunctionIntention),
    /// A file-scope variable.
    GlobalVariable(&'a GlobalVariableIntention),
    /// A local variable declaration inside a generated body.
    LocalVariable(&'a ValueStorage),
}

impl<'a> DecoratableElement<'a> {
    /// The declared access level, when the element has one.
    fn access_level(self) -> Option<AccessLevel> {
        match self {
            Self::Type(t) => Some(t.header.access_level),
            Self::Field(f) => Some(f.header.access_level),
            Self::Property(p) => Some(p.header.access_level),
            Self::Method(m) => Some(m.header.access_level),
            Self::Initializer(i) => Some(i.header.access_level),
            Self::GlobalFunction(f) => Some(f.header.access_level),
            Self::GlobalVariable(v) => Some(v.header.access_level),
            Self::LocalVariable(_) => None,
        }
    }

    /// The element's storage, when it stores a value.
    fn storage(self) -> Option<&'a ValueStorage> {
        match self {
            Self::Field(f) => Some(&f.storage),
            Self::Property(p) => Some(&p.storage),
            Self::GlobalVariable(v) => Some(&v.storage),
            Self::LocalVariable(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the element carries the given known attribute.
    fn has_attribute(self, attribute: &str) -> bool {
        match self {
            Self::Type(t) => t.header.has_attribute(attribute),
            Self::Field(f) => f.header.has_attribute(attribute),
            Self::Property(p) => p.header.has_attribute(attribute),
            Self::Method(m) => m.header.has_attribute(attribute),
            Self::Initializer(i) => i.header.has_attribute(attribute),
            Self::GlobalFunction(f) => f.header.has_attribute(attribute),
            Self::GlobalVariable(v) => v.header.has_attribute(attribute),
            Self::LocalVariable(_) => false,
        }
    }
}

/// A pure function contributing zero or more modifier tokens.
pub type Decorator = fn(&DecoratableElement<'_>) -> Vec<EcoString>;

/// An ordered chain of decorators.
///
/// # Examples
///
/// ```
/// use objswift_core::codegen::swift::modifiers::{DecoratableElement, ModifierChain};
/// use objswift_core::intentions::{Ownership, PropertyIntention, ValueStorage};
/// use objswift_core::ast::ObjcType;
///
/// let mut property = PropertyIntention::new(
///     "delegate",
///     ValueStorage::new(ObjcType::Id { protocols: vec![] }),
/// );
/// property.storage.ownership = Ownership::Weak;
///
/// let chain = ModifierChain::default();
/// let modifiers = chain.modifiers_for(&DecoratableElement::Property(&property));
/// assert_eq!(modifiers, vec!["weak"]);
/// ```
pub struct ModifierChain {
    decorators: Vec<Decorator>,
}

impl Default for ModifierChain {
    /// Registers the decorators in the default, observable order.
    fn default() -> Self {
        Self {
            decorators: vec![
                access_level_decorator,
                setter_access_decorator,
                optional_decorator,
                static_decorator,
                override_decorator,
                convenience_decorator,
                mutating_decorator,
                ownership_decorator,
            ],
        }
    }
}

impl ModifierChain {
    /// Creates a chain with an explicit decorator list.
    #[must_use]
    pub fn new(decorators: Vec<Decorator>) -> Self {
        Self { decorators }
    }

    /// Collects all modifier tokens for `element`, in chain order.
    #[must_use]
    pub fn modifiers_for(&self, element: &DecoratableElement<'_>) -> Vec<EcoString> {
        self.decorators
            .iter()
            .flat_map(|decorator| decorator(element))
            .collect()
    }
}

/// 1. Access level. `internal` is the default and is omitted.
fn access_level_decorator(element: &DecoratableElement<'_>) -> Vec<EcoString> {
    match element.access_level() {
        Some(AccessLevel::Internal) | None => Vec::new(),
        Some(level) => vec![level.keyword().into()],
    }
}

/// 2. Setter access narrowing: `private(set)`, `fileprivate(set)`, …
fn setter_access_decorator(element: &DecoratableElement<'_>) -> Vec<EcoString> {
    let DecoratableElement::Property(property) = element else {
        return Vec::new();
    };
    match property.setter_access {
        Some(level) if level < property.header.access_level => {
            vec![eco_format!("{}(set)", level.keyword())]
        }
        _ => Vec::new(),
    }
}

/// 3. Protocol `optional` requirements.
fn optional_decorator(element: &DecoratableElement<'_>) -> Vec<EcoString> {
    let is_optional = match element {
        DecoratableElement::Method(method) => method.is_optional,
        DecoratableElement::Property(property) => property.is_optional,
        _ => false,
    };
    if is_optional {
        vec!["optional".into()]
    } else {
        Vec::new()
    }
}

/// 4. `static` for class-side members.
fn static_decorator(element: &DecoratableElement<'_>) -> Vec<EcoString> {
    let is_static = match element {
        DecoratableElement::Method(method) => method.is_static,
        DecoratableElement::Property(property) => property.is_static,
        _ => false,
    };
    if is_static {
        vec!["static".into()]
    } else {
        Vec::new()
    }
}

/// 5. `override`, carried as a known attribute.
fn override_decorator(element: &DecoratableElement<'_>) -> Vec<EcoString> {
    if element.has_attribute("override") {
        vec!["override".into()]
    } else {
        Vec::new()
    }
}

/// 6. `convenience` initializers.
fn convenience_decorator(element: &DecoratableElement<'_>) -> Vec<EcoString> {
    let is_convenience = match element {
        DecoratableElement::Initializer(init) => {
            init.is_convenience || init.header.has_attribute("convenience")
        }
        _ => false,
    };
    if is_convenience {
        vec!["convenience".into()]
    } else {
        Vec::new()
    }
}

/// 7. `mutating`, carried as a known attribute on methods.
fn mutating_decorator(element: &DecoratableElement<'_>) -> Vec<EcoString> {
    if matches!(element, DecoratableElement::Method(_)) && element.has_attribute("mutating") {
        vec!["mutating".into()]
    } else {
        Vec::new()
    }
}

/// 8. Ownership. Strong emits nothing.
fn ownership_decorator(element: &DecoratableElement<'_>) -> Vec<EcoString> {
    element
        .storage()
        .and_then(|storage| storage.ownership.modifier())
        .map(|modifier| vec![modifier.into()])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ObjcType;
    use crate::intentions::Ownership;

    fn property(name: &str) -> PropertyIntention {
        PropertyIntention::new(name, ValueStorage::new(ObjcType::pointer_to("NSString")))
    }

    #[test]
    fn internal_access_is_omitted() {
        let p = property("name");
        let chain = ModifierChain::default();
        assert!(chain
            .modifiers_for(&DecoratableElement::Property(&p))
            .is_empty());
    }

    #[test]
    fn public_access_is_emitted() {
        let mut p = property("name");
        p.header.access_level = AccessLevel::Public;
        let chain = ModifierChain::default();
        assert_eq!(
            chain.modifiers_for(&DecoratableElement::Property(&p)),
            vec!["public"]
        );
    }

    #[test]
    fn open_emits_the_literal_token() {
        let mut ty = TypeIntention::class("Widget", None);
        ty.header.access_level = AccessLevel::Open;
        let chain = ModifierChain::default();
        assert_eq!(
            chain.modifiers_for(&DecoratableElement::Type(&ty)),
            vec!["open"]
        );
    }

    #[test]
    fn setter_access_narrowing() {
        let mut p = property("count");
        p.setter_access = Some(AccessLevel::Private);
        let chain = ModifierChain::default();
        assert_eq!(
            chain.modifiers_for(&DecoratableElement::Property(&p)),
            vec!["private(set)"]
        );
    }

    #[test]
    fn setter_access_equal_to_access_is_omitted() {
        let mut p = property("count");
        p.header.access_level = AccessLevel::Private;
        p.setter_access = Some(AccessLevel::Private);
        let chain = ModifierChain::default();
        assert_eq!(
            chain.modifiers_for(&DecoratableElement::Property(&p)),
            vec!["private"]
        );
    }

    #[test]
    fn ownership_modifiers() {
        let mut p = property("delegate");
        p.storage.ownership = Ownership::Weak;
        let chain = ModifierChain::default();
        assert_eq!(
            chain.modifiers_for(&DecoratableElement::Property(&p)),
            vec!["weak"]
        );

        p.storage.ownership = Ownership::UnownedUnsafe;
        assert_eq!(
            chain.modifiers_for(&DecoratableElement::Property(&p)),
            vec!["unowned(unsafe)"]
        );
    }

    #[test]
    fn chain_order_is_observable() {
        // A deliberately over-decorated property: every applicable
        // decorator fires, and the output order matches registration.
        let mut p = property("shared");
        p.header.access_level = AccessLevel::Public;
        p.setter_access = Some(AccessLevel::Private);
        p.is_optional = true;
        p.is_static = true;
        p.storage.ownership = Ownership::Weak;

        let chain = ModifierChain::default();
        assert_eq!(
            chain.modifiers_for(&DecoratableElement::Property(&p)),
            vec!["public", "private(set)", "optional", "static", "weak"]
        );
    }

    #[test]
    fn method_modifiers() {
        let mut method = MethodIntention::new("reset");
        method.is_static = true;
        method.header.known_attributes.push("override".into());
        method.header.known_attributes.push("mutating".into());

        let chain = ModifierChain::default();
        assert_eq!(
            chain.modifiers_for(&DecoratableElement::Method(&method)),
            vec!["static", "override", "mutating"]
        );
    }

    #[test]
    fn convenience_initializer() {
        let init = InitIntention {
            header: Default::default(),
            selector: "initWithName:".into(),
            parameters: Vec::new(),
            is_convenience: true,
            has_body: false,
        };
        let chain = ModifierChain::default();
        assert_eq!(
            chain.modifiers_for(&DecoratableElement::Initializer(&init)),
            vec!["convenience"]
        );
    }

    #[test]
    fn local_variable_gets_only_ownership() {
        let mut storage = ValueStorage::new(ObjcType::Id { protocols: vec![] });
        storage.ownership = Ownership::UnownedSafe;
        let chain = ModifierChain::default();
        assert_eq!(
            chain.modifiers_for(&DecoratableElement::LocalVariable(&storage)),
            vec!["unowned(safe)"]
        );
    }
}
