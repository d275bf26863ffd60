//! File discovery: expands directory arguments into supported files.
//!
//! Only the CLI uses this; the engine itself takes explicit inputs.

use std::path::PathBuf;

use crate::extract;

/// Outcome of expanding a set of path arguments.
pub struct Discovered {
    /// Files to analyze, in argument order with directory contents sorted.
    pub files: Vec<PathBuf>,
    /// Non-fatal walk errors (e.g. permission denied on a subdirectory).
    pub errors: Vec<DiscoverError>,
}

impl Discovered {
    /// Returns `true` if the walk encountered any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// A non-fatal error encountered while walking a directory tree.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("{message}")]
#[diagnostic(code(toklens::walk::entry))]
pub struct DiscoverError {
    message: String,
}

/// Expand `paths` into concrete input files.
///
/// Explicitly named files pass through untouched, even unsupported or
/// missing ones, so extraction can classify them per item. Directories
/// are walked (honouring `.gitignore`/`.ignore` unless `no_ignore`) and
/// contribute only files with supported extensions, sorted by path for
/// deterministic output.
#[must_use]
pub fn discover(paths: &[PathBuf], no_ignore: bool) -> Discovered {
    let mut files = Vec::new();
    let mut errors = Vec::new();

    for path in paths {
        if path.is_dir() {
            walk_dir(path, no_ignore, &mut files, &mut errors);
        } else {
            files.push(path.clone());
        }
    }

    Discovered { files, errors }
}

fn walk_dir(
    root: &std::path::Path,
    no_ignore: bool,
    files: &mut Vec<PathBuf>,
    errors: &mut Vec<DiscoverError>,
) {
    let mut builder = ignore::WalkBuilder::new(root);
    if no_ignore {
        builder
            .ignore(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false);
    }

    let mut found = Vec::new();
    for result in builder.build() {
        match result {
            Ok(entry) => {
                if entry.file_type().is_some_and(|ft| ft.is_file())
                    && extract::is_supported(entry.path())
                {
                    found.push(entry.into_path());
                }
            }
            Err(e) => errors.push(DiscoverError {
                message: e.to_string(),
            }),
        }
    }

    found.sort();
    files.extend(found);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &std::path::Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    /// Directory walks keep supported files only, sorted.
    #[test]
    fn directories_expand_to_sorted_supported_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "z.txt", "z");
        write(dir.path(), "a.md", "a");
        write(dir.path(), "photo.png", "binary");

        let d = discover(&[dir.path().to_path_buf()], true);
        let names: Vec<String> = d
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.md", "z.txt"]);
        assert!(!d.has_errors());
    }

    /// Explicitly named files pass through, supported or not.
    #[test]
    fn explicit_files_pass_through() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "doc.pdf", "not really a pdf");
        let pdf = dir.path().join("doc.pdf");
        let missing = dir.path().join("nope.txt");

        let d = discover(&[pdf.clone(), missing.clone()], true);
        assert_eq!(d.files, vec![pdf, missing]);
    }

    /// `.ignore` rules apply unless `no_ignore` is set.
    #[test]
    fn ignore_rules_are_honoured() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "kept.txt", "kept");
        write(dir.path(), "skipped.txt", "skipped");
        write(dir.path(), ".ignore", "skipped.txt\n");

        let with_rules = discover(&[dir.path().to_path_buf()], false);
        let names: Vec<_> = with_rules
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["kept.txt"]);

        let without_rules = discover(&[dir.path().to_path_buf()], true);
        assert_eq!(without_rules.files.len(), 2);
    }

    /// Subdirectory files sort by full path after their parent's files.
    #[test]
    fn nested_files_keep_deterministic_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        write(dir.path(), "top.txt", "top");
        write(&dir.path().join("sub"), "deep.txt", "deep");

        let d = discover(&[dir.path().to_path_buf()], true);
        assert_eq!(d.files.len(), 2);
        let a = discover(&[dir.path().to_path_buf()], true);
        assert_eq!(a.files, d.files);
    }
}
