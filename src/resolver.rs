use crate::alias::{find_type_alias, AliasTable};
use crate::error::CliError;
use crate::parser;
use crate::resolve::resolve as resolve_type;
use crate::scope::Scope;
use crate::synthesize::RESERVED_NAME;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_VIRTUAL_FILE: &str = "virtual.ts";

/// Wraps a filesystem-facing content-loading capability behind a single method, so it can be
/// decorated without touching the real filesystem. Mirrors the teacher's habit of keeping each
/// concern in its own small module; this is the seam the spec's "content interception hook"
/// lives at.
pub trait ContentLoader {
    fn load(&self, path: &Path) -> Option<String>;
}

pub struct FsLoader;

impl ContentLoader for FsLoader {
    fn load(&self, path: &Path) -> Option<String> {
        fs::read_to_string(path).ok()
    }
}

/// Answers one canonicalized path with spliced content; every other request passes through to
/// the wrapped loader unmodified. This is how the synthetic declaration becomes visible to the
/// oracle without the source file on disk ever being written to.
pub struct InterceptingLoader<'a, L: ContentLoader> {
    inner: &'a L,
    addressed_path: PathBuf,
    spliced_content: String,
}

impl<'a, L: ContentLoader> InterceptingLoader<'a, L> {
    pub fn new(inner: &'a L, addressed_path: PathBuf, spliced_content: String) -> Self {
        InterceptingLoader {
            inner,
            addressed_path,
            spliced_content,
        }
    }
}

impl<'a, L: ContentLoader> ContentLoader for InterceptingLoader<'a, L> {
    fn load(&self, path: &Path) -> Option<String> {
        if canonicalize_for_comparison(path) == canonicalize_for_comparison(&self.addressed_path) {
            Some(self.spliced_content.clone())
        } else {
            self.inner.load(path)
        }
    }
}

fn canonicalize_for_comparison(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(path)
    };
    normalize_path(&absolute)
}

fn normalize_path(path: &Path) -> PathBuf {
    use std::path::Component;
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                result.pop();
            }
            Component::CurDir => {}
            other => result.push(other.as_os_str()),
        }
    }
    result
}

/// Runs the full splice-and-extract protocol (section 4.2): locate the addressed path, splice
/// the synthetic declaration onto its content through an intercepting loader, parse, find the
/// declaration by its reserved name, resolve it, render it.
pub fn resolve(source_path: Option<&Path>, declaration: &str) -> Result<String, CliError> {
    let addressed_path = match source_path {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(DEFAULT_VIRTUAL_FILE),
    };

    let fs_loader = FsLoader;
    let original_content = fs_loader.load(&addressed_path);
    if source_path.is_some() && original_content.is_none() {
        return Err(CliError::Source(format!(
            "Could not read source file: {}",
            addressed_path.display()
        )));
    }

    let spliced_content = match &original_content {
        Some(content) => format!("{content}\n{declaration}"),
        None => declaration.to_string(),
    };

    let intercepting =
        InterceptingLoader::new(&fs_loader, addressed_path.clone(), spliced_content);
    let content = intercepting
        .load(&addressed_path)
        .expect("the intercepting loader always answers its own addressed path");

    let module = parser::parse_module(&content, &addressed_path.to_string_lossy())
        .map_err(|e| CliError::Source(format!("Could not read source file: {}: {}", addressed_path.display(), e)))?;

    let declaration_ty = find_type_alias(&module, RESERVED_NAME).ok_or_else(|| {
        CliError::Resolution(format!(
            "Could not find type {RESERVED_NAME} in {}",
            addressed_path.display()
        ))
    })?;

    let aliases = AliasTable::from_module(&module);
    let resolved = resolve_type(&aliases, &Scope::new(), declaration_ty).map_err(|e| {
        CliError::Resolution(format!("{e} in {}", addressed_path.display()))
    })?;

    Ok(resolved.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn interception_scope_passes_through_unrelated_paths() {
        let dir = tempdir().unwrap();
        let other = dir.path().join("other.ts");
        fs::write(&other, "export const x = 1;").unwrap();
        let addressed = dir.path().join("addressed.ts");

        let fs_loader = FsLoader;
        let intercepting =
            InterceptingLoader::new(&fs_loader, addressed.clone(), "spliced".to_string());

        assert_eq!(
            intercepting.load(&other),
            Some("export const x = 1;".to_string())
        );
        assert_eq!(intercepting.load(&addressed), Some("spliced".to_string()));
    }

    #[test]
    fn interception_matches_relative_and_absolute_spellings() {
        let dir = tempdir().unwrap();
        let addressed = dir.path().join("addressed.ts");
        fs::write(&addressed, "original").unwrap();

        let fs_loader = FsLoader;
        let intercepting =
            InterceptingLoader::new(&fs_loader, addressed.clone(), "spliced".to_string());

        let relative_spelling = addressed.parent().unwrap().join("./addressed.ts");
        assert_eq!(
            intercepting.load(&relative_spelling),
            Some("spliced".to_string())
        );
    }

    #[test]
    fn does_not_mutate_the_real_source_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Test.d.ts");
        let original = "export type Main<Args extends [string]> = `Hello, ${Args[0]}!`;";
        fs::write(&path, original).unwrap();

        let declaration = crate::synthesize::synthesize(None, &["Joe".to_string()]);
        let output = resolve(Some(path.as_path()), &declaration).unwrap();

        assert_eq!(output, "\"Hello, Joe!\"");
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn undefined_main_is_a_resolution_error_naming_main_and_the_source_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Empty.d.ts");
        fs::write(&path, "export const notAType = 1;").unwrap();

        let declaration = crate::synthesize::synthesize(None, &[]);
        let err = resolve(Some(path.as_path()), &declaration).unwrap_err();
        assert!(matches!(
            err,
            CliError::Resolution(msg) if msg.contains("Main") && msg.contains(&path.display().to_string())
        ));
    }

    #[test]
    fn explicit_expression_without_a_source_file() {
        let declaration = crate::synthesize::synthesize(Some("1 | 2 | 3"), &[]);
        let output = resolve(None, &declaration).unwrap();
        assert_eq!(output, "1 | 2 | 3");
    }

    #[test]
    fn missing_source_file_is_a_source_error() {
        let declaration = crate::synthesize::synthesize(None, &[]);
        let err = resolve(Some(Path::new("/nonexistent/Test.d.ts")), &declaration).unwrap_err();
        assert!(matches!(err, CliError::Source(_)));
    }
}
