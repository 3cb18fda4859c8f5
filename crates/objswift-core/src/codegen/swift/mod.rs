// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Swift code generation.
//!
//! This module transforms the intention graph into Swift source text:
//!
//! - [`document`] — the renderable document tree all output flows
//!   through (no `format!`-and-concatenate emission)
//! - [`types`] — the pure Objective-C → Swift type mapping
//! - [`modifiers`] — the ordered modifier decorator chain
//! - [`emitter`] — the traversal that ties the three together
//!
//! # Example
//!
//! Objective-C source:
//! ```objc
//! @interface MyClass
//! - (void)myMethod;
//! @end
//! ```
//!
//! Generated Swift:
//! ```swift
//! class MyClass: NSObject {
//!     func myMethod() {
//!     }
//! }
//! ```

pub mod document;
pub mod emitter;
pub mod modifiers;
pub mod types;

pub use emitter::SwiftEmitter;
pub use modifiers::{DecoratableElement, Decorator, ModifierChain};
pub use types::{SwiftType, swift_return_type, swift_type};
