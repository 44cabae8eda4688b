//! Run configuration.

use crate::domain::{PageSelection, PageSpec};
use crate::error::RedactorResult;
use crate::output::{same_file, OutputTarget};
use std::path::{Path, PathBuf};

/// Immutable settings for one redaction run.
///
/// Built once from the command line; the page expression is parsed here so
/// a bad `--pages` value fails before any document is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    input: PathBuf,
    mask: PathBuf,
    output: OutputTarget,
    selection: PageSelection,
    verbose: bool,
}

impl RunConfig {
    /// Creates a configuration.
    ///
    /// `pages` is ignored when `all` is set. An absent `output` means the
    /// input file is replaced.
    ///
    /// # Errors
    /// [`crate::RedactorError::InvalidPageSpec`] for a malformed `pages` value.
    pub fn new(
        input: &Path,
        mask: &Path,
        output: Option<&Path>,
        pages: &str,
        all: bool,
        verbose: bool,
    ) -> RedactorResult<Self> {
        let selection = if all {
            PageSelection::All
        } else {
            PageSelection::Explicit(PageSpec::parse(pages)?)
        };

        let output = OutputTarget::resolve(input, output);
        // The mask is fully loaded before the output is written
        if mask == output.path() || same_file(mask, output.path()) {
            log::warn!(
                "output {} replaces the redaction mask {}",
                output.path().display(),
                mask.display()
            );
        }

        Ok(Self {
            input: input.to_path_buf(),
            mask: mask.to_path_buf(),
            output,
            selection,
            verbose,
        })
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn mask(&self) -> &Path {
        &self.mask
    }

    pub fn output(&self) -> &OutputTarget {
        &self.output
    }

    pub fn selection(&self) -> &PageSelection {
        &self.selection
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
