// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Objective-C → Swift transpiler core.
//!
//! This crate contains the core rewriting functionality:
//! - Lexical analysis (tokenization with error recovery)
//! - Parsing (concrete syntax tree construction with diagnostics)
//! - Intention building (header/implementation pairing into a
//!   language-neutral intermediate representation)
//! - Swift emission (decorator-driven modifier placement and
//!   pretty-printing)
//!
//! File I/O stays behind the [`input`] and [`output`] interfaces so the
//! core is embeddable without touching a real filesystem.
#![doc = include_str!("../../../README.md")]

pub mod ast;
pub mod codegen;
pub mod input;
pub mod intentions;
pub mod output;
pub mod rewriter;
pub mod source_analysis;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::ast::{
        ClassCategory, ClassImplementation, ClassInterface, GlobalContext, Identifier, ObjcType,
        ProtocolDeclaration, Selector, TopLevel,
    };
    pub use crate::codegen::swift::SwiftEmitter;
    pub use crate::input::{InputSource, InputSourcesProvider, StringInputSource};
    pub use crate::intentions::builder::IntentionBuilder;
    pub use crate::intentions::{FileIntention, FileMember, TypeIntention};
    pub use crate::output::{FileOutput, MemoryWriterOutput, WriterOutput};
    pub use crate::rewriter::{RewriteError, Rewriter};
    pub use crate::source_analysis::{Diagnostics, Span};
}
