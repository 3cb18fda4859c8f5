// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Output interfaces.
//!
//! Emitted text flows through three seams:
//!
//! - [`WriterOutput`] creates one [`FileOutput`] per output path
//! - [`FileOutput`] exposes a streaming [`RewriterOutputTarget`] and is
//!   closed exactly once — `close` consumes the handle, so re-closing is
//!   impossible by construction
//! - [`RewriterOutputTarget`] receives incremental text and fires a
//!   change callback on every buffer mutation
//!
//! Closing a file is the only point at which the
//! `// End of file <path>` trailer is appended.
//!
//! [`MemoryWriterOutput`] is the in-memory implementation used by tests
//! and library embedders; a disk-backed implementation lives with the
//! host application, not in the core.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use camino::{Utf8Path, Utf8PathBuf};

/// A streaming sink for emitted text.
pub trait RewriterOutputTarget {
    /// Appends text to the buffer, firing the change callback.
    fn write_text(&mut self, text: &str);
}

/// A string-backed output target with an optional change callback.
#[derive(Default)]
pub struct StringOutputTarget {
    buffer: String,
    on_change: Option<Box<dyn FnMut(&str)>>,
}

impl std::fmt::Debug for StringOutputTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringOutputTarget")
            .field("buffer", &self.buffer)
            .field("has_callback", &self.on_change.is_some())
            .finish()
    }
}

impl StringOutputTarget {
    /// Creates an empty target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a target whose callback fires after every mutation with
    /// the full buffer contents.
    #[must_use]
    pub fn with_callback(on_change: impl FnMut(&str) + 'static) -> Self {
        Self {
            buffer: String::new(),
            on_change: Some(Box::new(on_change)),
        }
    }

    /// The accumulated buffer.
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Consumes the target and returns its buffer.
    #[must_use]
    pub fn into_buffer(self) -> String {
        self.buffer
    }
}

impl RewriterOutputTarget for StringOutputTarget {
    fn write_text(&mut self, text: &str) {
        self.buffer.push_str(text);
        if let Some(on_change) = &mut self.on_change {
            on_change(&self.buffer);
        }
    }
}

/// One open output file.
pub trait FileOutput {
    /// The streaming sink for this file.
    fn output_target(&mut self) -> &mut dyn RewriterOutputTarget;

    /// Flushes the buffer, appending exactly `\n// End of file <path>`
    /// first. Consuming `self` makes a second close unrepresentable.
    fn close(self: Box<Self>);
}

/// Creates output files by path.
pub trait WriterOutput {
    /// Opens a new output file.
    fn create_file(&mut self, path: &Utf8Path) -> Box<dyn FileOutput>;
}

/// An in-memory writer collecting closed files into a shared map.
///
/// Cloning shares the underlying map, so a test can keep one handle
/// while the pipeline consumes another.
///
/// # Examples
///
/// ```
/// use objswift_core::output::{MemoryWriterOutput, WriterOutput};
///
/// let mut output = MemoryWriterOutput::new();
/// let mut file = output.create_file(camino::Utf8Path::new("a.swift"));
/// file.output_target().write_text("let x = 1");
/// file.close();
///
/// assert_eq!(
///     output.file("a.swift").as_deref(),
///     Some("let x = 1\n// End of file a.swift")
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryWriterOutput {
    files: Rc<RefCell<BTreeMap<Utf8PathBuf, String>>>,
}

impl MemoryWriterOutput {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The closed file at `path`, if any.
    #[must_use]
    pub fn file(&self, path: impl AsRef<Utf8Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    /// All closed files, by path.
    #[must_use]
    pub fn files(&self) -> BTreeMap<Utf8PathBuf, String> {
        self.files.borrow().clone()
    }
}

impl WriterOutput for MemoryWriterOutput {
    fn create_file(&mut self, path: &Utf8Path) -> Box<dyn FileOutput> {
        Box::new(MemoryFileOutput {
            path: path.to_path_buf(),
            target: StringOutputTarget::new(),
            files: Rc::clone(&self.files),
        })
    }
}

struct MemoryFileOutput {
    path: Utf8PathBuf,
    target: StringOutputTarget,
    files: Rc<RefCell<BTreeMap<Utf8PathBuf, String>>>,
}

impl FileOutput for MemoryFileOutput {
    fn output_target(&mut self) -> &mut dyn RewriterOutputTarget {
        &mut self.target
    }

    fn close(self: Box<Self>) {
        let mut text = self.target.into_buffer();
        text.push_str("\n// End of file ");
        text.push_str(self.path.as_str());
        self.files.borrow_mut().insert(self.path, text);
    }
}
