// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parsing infrastructure for Objective-C source code.
//!
//! This module contains the lexer, diagnostics and parser.
//!
//! # Lexical Analysis
//!
//! The [`Lexer`] converts source text into a stream of [`Token`]s. Each
//! token carries its source location via [`Span`]; comments and
//! whitespace are attached as [`Trivia`] with their exact extents.
//!
//! ```
//! use objswift_core::source_analysis::{Lexer, TokenKind};
//!
//! let tokens: Vec<_> = Lexer::new("@property NSString *name;").collect();
//! assert_eq!(tokens.len(), 5); // @property, NSString, *, name, ;
//! ```
//!
//! # Parsing
//!
//! [`parse_source`] converts text into a
//! [`GlobalContext`](crate::ast::GlobalContext) plus a [`Diagnostics`]
//! log. The parser always produces a tree; recoverable syntax problems
//! become diagnostics with severity [`Severity::Error`], and panic-mode
//! recovery resumes at per-construct follow sets (see [`Parser`]).
//!
//! # Error Handling
//!
//! The lexer converts invalid input into [`TokenKind::Error`] tokens
//! rather than stopping; the recorded [`LexError`]s are folded into the
//! session diagnostics by [`parse_source`]. Only unrecoverable states
//! (e.g. EOF inside an ivar block) surface as [`FatalParseError`].

mod diagnostics;
mod error;
mod lexer;
mod parser;
mod span;
mod token;


pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{LexError, LexErrorKind};
pub use lexer::{Lexer, lex, lex_with_eof};
pub use parser::{FatalParseError, Parser, parse_source};
pub use span::{Location, Span};
pub use token::{AtKeyword, Token, TokenKind, Trivia, TriviaKind};
