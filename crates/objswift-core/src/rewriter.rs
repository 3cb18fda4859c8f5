// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The rewrite pipeline driver.
//!
//! [`Rewriter::rewrite`] is the public entry point: it loads sources in
//! provider order, parses each file, builds the intention graph, emits
//! Swift, and writes the result through the [`WriterOutput`]
//! collaborator. The pipeline is single-threaded and strictly
//! sequential; data flows forward only.
//!
//! Recoverable problems (syntax errors, pairing mismatches) come back in
//! the returned [`Diagnostics`]. Only I/O failures and unrecoverable
//! parser states abort the pipeline as [`RewriteError`]s.

use camino::Utf8PathBuf;
use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::codegen::swift::SwiftEmitter;
use crate::input::InputSourcesProvider;
use crate::intentions::builder::IntentionBuilder;
use crate::output::WriterOutput;
use crate::source_analysis::{Diagnostics, FatalParseError, parse_source};

/// A fatal driver error. Syntax problems never surface here.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum RewriteError {
    /// An input source failed to load.
    #[error("failed to load source '{path}'")]
    SourceLoad {
        /// The source that failed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The parser reached an unrecoverable state.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] FatalParseError),
}

/// The transpilation pipeline: sources in, Swift files out.
///
/// # Examples
///
/// ```
/// use objswift_core::input::StringInputSource;
/// use objswift_core::output::MemoryWriterOutput;
/// use objswift_core::rewriter::Rewriter;
///
/// let provider = StringInputSource::provider(vec![StringInputSource::new(
///     "objc.h",
///     "@interface MyClass\n- (void)myMethod;\n@end",
/// )]);
/// let output = MemoryWriterOutput::new();
///
/// let diagnostics = Rewriter::new(provider, output.clone()).rewrite()?;
/// assert_eq!(diagnostics.error_count(), 0);
/// assert!(output.file("objc.h").unwrap().ends_with("// End of file objc.h"));
/// # Ok::<(), objswift_core::rewriter::RewriteError>(())
/// ```
pub struct Rewriter<P, W> {
    provider: P,
    output: W,
}

impl<P: InputSourcesProvider, W: WriterOutput> Rewriter<P, W> {
    /// Creates a rewriter over the given collaborators.
    #[must_use]
    pub fn new(provider: P, output: W) -> Self {
        Self { provider, output }
    }

    /// Runs the whole pipeline and returns the session diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError`] for I/O failures in source loading and
    /// for unrecoverable parser states; everything else is reported
    /// through the returned [`Diagnostics`].
    #[instrument(skip_all)]
    pub fn rewrite(mut self) -> Result<Diagnostics, RewriteError> {
        let mut session = Diagnostics::new();
        let mut builder = IntentionBuilder::new();

        let sources = self.provider.sources();
        info!(count = sources.len(), "starting rewrite");

        for source in sources {
            let path = source.source_name().to_path_buf();
            debug!(%path, "parsing source");
            let text = source
                .load_source()
                .map_err(|source| RewriteError::SourceLoad {
                    path: path.clone(),
                    source,
                })?;
            let (context, diagnostics) = parse_source(&text)?;
            debug!(
                %path,
                members = context.members.len(),
                errors = diagnostics.error_count(),
                "parsed source"
            );
            session.extend(diagnostics);
            builder.add_file(path, context);
        }

        let (files, build_diagnostics) = builder.build();
        session.extend(build_diagnostics);

        let emitter = SwiftEmitter::new();
        for file in &files {
            debug!(path = %file.path, members = file.members.len(), "emitting file");
            let mut out = self.output.create_file(&file.path);
            let text = emitter.emit_file(file);
            out.output_target().write_text(&text);
            out.close();
        }

        info!(
            files = files.len(),
            errors = session.error_count(),
            warnings = session.warnings().count(),
            "rewrite complete"
        );
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputSource, StringInputSource, VecSourcesProvider};
    use camino::Utf8Path;

    fn rewrite(files: &[(&str, &str)]) -> (crate::output::MemoryWriterOutput, Diagnostics) {
        let provider = StringInputSource::provider(
            files
                .iter()
                .map(|(name, source)| StringInputSource::new(*name, *source))
                .collect(),
        );
        let output = crate::output::MemoryWriterOutput::new();
        let diagnostics = Rewriter::new(provider, output.clone())
            .rewrite()
            .expect("no fatal error");
        (output, diagnostics)
    }

    #[test]
    fn interface_only_produces_swift() {
        let (output, diagnostics) = rewrite(&[(
            "objc.h",
            "@interface MyClass\n- (void)myMethod;\n@end",
        )]);
        assert_eq!(diagnostics.error_count(), 0);
        assert_eq!(
            output.file("objc.h").as_deref(),
            Some(
                "class MyClass: NSObject {\n    func myMethod() {\n    }\n}\n// End of file objc.h"
            )
        );
    }

    #[test]
    fn header_and_implementation_collapse_to_one_file() {
        let (output, diagnostics) = rewrite(&[
            ("objc.h", "@interface MyClass\n- (void)myMethod;\n@end"),
            (
                "objc.m",
                "@implementation MyClass\n- (void)myMethod {\n}\n@end",
            ),
        ]);
        assert_eq!(diagnostics.error_count(), 0);

        // Exactly one output file, trailing with the .m name; the header
        // is not re-emitted.
        let files = output.files();
        assert_eq!(files.len(), 1);
        let text = files.get(Utf8Path::new("objc.m")).expect("objc.m output");
        assert!(text.ends_with("// End of file objc.m"));
        assert!(output.file("objc.h").is_none());
    }

    #[test]
    fn forward_declaration_produces_no_output() {
        let (output, diagnostics) = rewrite(&[("objc.h", "@class MyClass;")]);
        assert_eq!(diagnostics.error_count(), 0);
        assert!(output.files().is_empty());
    }

    #[test]
    fn recovered_errors_are_reported_and_output_still_produced() {
        let (output, diagnostics) = rewrite(&[(
            "objc.h",
            "@interface MyClass : Superclass <MyProtocol1, >\n@end",
        )]);
        assert!(diagnostics.error_count() > 0);
        let text = output.file("objc.h").expect("output despite errors");
        assert!(text.starts_with("class MyClass: Superclass, MyProtocol1 {"));
    }

    #[test]
    fn pairing_mismatch_is_a_warning_not_an_error() {
        let (_, diagnostics) = rewrite(&[
            ("a.h", "@interface A\n@end"),
            ("a.m", "@implementation A\n- (void)undeclared {\n}\n@end"),
        ]);
        assert_eq!(diagnostics.error_count(), 0);
        assert_eq!(diagnostics.warnings().count(), 1);
    }

    #[test]
    fn source_load_failure_is_fatal() {
        struct FailingSource;
        impl InputSource for FailingSource {
            fn source_name(&self) -> &Utf8Path {
                Utf8Path::new("missing.h")
            }
            fn load_source(&self) -> std::io::Result<String> {
                Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
            }
        }

        let provider = VecSourcesProvider::new(vec![Box::new(FailingSource)]);
        let result = Rewriter::new(provider, crate::output::MemoryWriterOutput::new()).rewrite();
        assert!(matches!(result, Err(RewriteError::SourceLoad { .. })));
    }

    #[test]
    fn fatal_parse_error_aborts_pipeline() {
        let provider = StringInputSource::provider(vec![StringInputSource::new(
            "broken.h",
            "@interface A { NSString",
        )]);
        let result = Rewriter::new(provider, crate::output::MemoryWriterOutput::new()).rewrite();
        assert!(matches!(result, Err(RewriteError::Parse(_))));
    }
}
