//! Output finalisation.
//!
//! Writes the composed document either straight to its destination or, when
//! the destination is the input file itself, to a temporary sibling that is
//! renamed over the input once the write has completed.

use crate::error::{RedactorError, RedactorResult};
use crate::pdf::OutputBuilder;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Where the output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// A path distinct from the input
    Direct(PathBuf),

    /// The input file is replaced
    ReplaceInput(PathBuf),
}

impl OutputTarget {
    /// Determines the output target for `input`.
    ///
    /// No requested output means the input is replaced. A requested path
    /// that names the same file as the input, even spelled differently, is
    /// treated the same way.
    pub fn resolve(input: &Path, requested: Option<&Path>) -> Self {
        let Some(requested) = requested else {
            return Self::ReplaceInput(input.to_path_buf());
        };

        if requested == input {
            return Self::ReplaceInput(input.to_path_buf());
        }

        if same_file(input, requested) {
            log::warn!(
                "output {} refers to the input {}; replacing the input",
                requested.display(),
                input.display()
            );
            return Self::ReplaceInput(input.to_path_buf());
        }

        Self::Direct(requested.to_path_buf())
    }

    /// Final location of the output file.
    pub fn path(&self) -> &Path {
        match self {
            Self::Direct(path) | Self::ReplaceInput(path) => path,
        }
    }

    pub fn replaces_input(&self) -> bool {
        matches!(self, Self::ReplaceInput(_))
    }
}

/// True when both paths name the same existing file.
pub(crate) fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Persists `builder` to `target` and returns the final output path.
///
/// Input documents must already be released when the target replaces the
/// input.
///
/// # Errors
/// [`RedactorError::Persist`] if the write or the rename fails. On a failed
/// write the temporary file is left behind; on a failed rename it holds the
/// complete output. The input file is untouched in both cases.
pub fn finalize(builder: OutputBuilder, target: &OutputTarget) -> RedactorResult<PathBuf> {
    match target {
        OutputTarget::Direct(path) => {
            builder.save(path)?;
            Ok(path.clone())
        }
        OutputTarget::ReplaceInput(path) => {
            replace_via_sibling(path, |temp_path| builder.save(temp_path))?;
            Ok(path.clone())
        }
    }
}

/// Writes a new version of `path` through a temporary sibling.
///
/// `write` fills the sibling; the sibling then takes over the permissions of
/// `path` and is renamed over it. Any failure leaves `path` as it was and
/// the sibling on disk.
fn replace_via_sibling<F>(path: &Path, write: F) -> RedactorResult<()>
where
    F: FnOnce(&Path) -> RedactorResult<()>,
{
    let temp_path = reserve_sibling(path)?;
    log::debug!("writing output to temporary {}", temp_path.display());
    write(&temp_path)?;

    let kept = |action: &str, e: io::Error| RedactorError::Persist {
        path: path.to_path_buf(),
        reason: format!(
            "could not {}; complete output kept at '{}': {}",
            action,
            temp_path.display(),
            e
        ),
        source: Some(e),
    };

    let permissions = fs::metadata(path)
        .map_err(|e| kept("read input permissions", e))?
        .permissions();
    fs::set_permissions(&temp_path, permissions)
        .map_err(|e| kept("copy input permissions", e))?;

    fs::rename(&temp_path, path).map_err(|e| kept("replace input", e))
}

/// Creates a uniquely named empty file next to `path`, named
/// `<file name>.<random suffix>`, and returns its path.
///
/// The file is kept on drop so a failed write leaves it for inspection.
pub fn reserve_sibling(path: &Path) -> RedactorResult<PathBuf> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());

    let temp = tempfile::Builder::new()
        .prefix(&format!("{}.", file_name))
        .rand_bytes(16)
        .tempfile_in(parent)
        .map_err(|e| RedactorError::Persist {
            path: path.to_path_buf(),
            reason: format!("could not create temporary file: {}", e),
            source: Some(e),
        })?;

    temp.into_temp_path().keep().map_err(|e| RedactorError::Persist {
        path: path.to_path_buf(),
        reason: format!("could not keep temporary file: {}", e),
        source: Some(e.error),
    })
}
