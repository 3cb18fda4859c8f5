// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Code generation for the rewriter.
//!
//! This module contains code generators for target languages:
//! - **`swift`**: Swift source emission from the intention graph

pub mod swift;
