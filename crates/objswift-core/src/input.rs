// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Input interfaces.
//!
//! The core never touches the filesystem directly; it reads sources
//! through [`InputSource`] and discovers them through
//! [`InputSourcesProvider`]. The order returned by
//! [`InputSourcesProvider::sources`] is the order the pipeline visits
//! files, which is observable in output ordering.
//!
//! [`StringInputSource`] backs both tests and library embedding.

use camino::{Utf8Path, Utf8PathBuf};

/// One named input source.
pub trait InputSource {
    /// The name (path) of this source.
    fn source_name(&self) -> &Utf8Path;

    /// Loads the source text.
    ///
    /// # Errors
    ///
    /// I/O failures abort the pipeline as fatal driver errors.
    fn load_source(&self) -> std::io::Result<String>;
}

/// An ordered collection of input sources.
pub trait InputSourcesProvider {
    /// The sources, in the order the pipeline must visit them.
    fn sources(&self) -> Vec<&dyn InputSource>;
}

/// An in-memory input source.
#[derive(Debug, Clone)]
pub struct StringInputSource {
    name: Utf8PathBuf,
    source: String,
}

impl StringInputSource {
    /// Creates a named in-memory source.
    #[must_use]
    pub fn new(name: impl Into<Utf8PathBuf>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Wraps a list of sources into a provider preserving their order.
    #[must_use]
    pub fn provider(sources: Vec<StringInputSource>) -> VecSourcesProvider {
        VecSourcesProvider {
            sources: sources
                .into_iter()
                .map(|s| Box::new(s) as Box<dyn InputSource>)
                .collect(),
        }
    }
}

impl InputSource for StringInputSource {
    fn source_name(&self) -> &Utf8Path {
        &self.name
    }

    fn load_source(&self) -> std::io::Result<String> {
        Ok(self.source.clone())
    }
}

/// A provider over a fixed, ordered list of sources.
pub struct VecSourcesProvider {
    sources: Vec<Box<dyn InputSource>>,
}

impl VecSourcesProvider {
    /// Creates a provider from boxed sources.
    #[must_use]
    pub fn new(sources: Vec<Box<dyn InputSource>>) -> Self {
        Self { sources }
    }
}

impl InputSourcesProvider for VecSourcesProvider {
    fn sources(&self) -> Vec<&dyn InputSource> {
        self.sources.iter().map(AsRef::as_ref).collect()
    }
}
