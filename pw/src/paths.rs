//! Mapping placeholder paths to files under the data root

use std::path::{Component, Path, PathBuf};

use tracing::debug;

/// Default extension for table sources
pub const DEFAULT_TABLE_EXTENSION: &str = "csv";

/// Default extension for line-list sources
pub const DEFAULT_LINE_EXTENSION: &str = "txt";

/// Which kind of source a placeholder references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Table,
    Line,
}

/// Outcome of a path lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Candidate file path (with extension when the segments were usable)
    pub path: PathBuf,
    /// Whether the candidate exists as a regular file
    pub found: bool,
}

/// Split placeholder path text on `/`, dropping empty segments
pub fn segments(path_text: &str) -> Vec<&str> {
    path_text.split('/').filter(|s| !s.is_empty()).collect()
}

/// Resolves placeholder paths against a data root
///
/// This is the only place that knows about directory joining and extension
/// conventions; both reference kinds go through [`PathResolver::resolve`].
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
    table_extension: String,
    line_extension: String,
}

impl PathResolver {
    /// Create a resolver with the default `csv` / `txt` extensions
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            table_extension: DEFAULT_TABLE_EXTENSION.to_string(),
            line_extension: DEFAULT_LINE_EXTENSION.to_string(),
        }
    }

    /// Override the extensions used for each source kind
    pub fn with_extensions(mut self, table: impl Into<String>, line: impl Into<String>) -> Self {
        self.table_extension = table.into();
        self.line_extension = line.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self, kind: SourceKind) -> &str {
        match kind {
            SourceKind::Table => &self.table_extension,
            SourceKind::Line => &self.line_extension,
        }
    }

    /// Resolve `/`-separated path text for the given kind
    pub fn resolve(&self, path_text: &str, kind: SourceKind) -> ResolvedPath {
        self.resolve_segments(&segments(path_text), kind)
    }

    /// Resolve already-split segments for the given kind
    ///
    /// Never fails: an empty segment list, a segment that is not a plain name
    /// (`.`, `..`, a drive prefix, an embedded separator) or a missing file all
    /// come back with `found: false`.
    pub fn resolve_segments(&self, segments: &[&str], kind: SourceKind) -> ResolvedPath {
        debug!(?segments, ?kind, "PathResolver::resolve_segments: called");

        if segments.is_empty() || !segments.iter().all(|s| is_plain_name(s)) {
            debug!("PathResolver::resolve_segments: unusable segments");
            return ResolvedPath {
                path: self.root.clone(),
                found: false,
            };
        }

        let mut path = self.root.clone();
        for segment in segments {
            path.push(segment);
        }

        // Append rather than set_extension so dotted names like `v1.2` survive
        let mut name = path.as_os_str().to_owned();
        name.push(".");
        name.push(self.extension(kind));
        let path = PathBuf::from(name);

        let found = path.is_file();
        debug!(path = %path.display(), found, "PathResolver::resolve_segments: resolved");
        ResolvedPath { path, found }
    }
}

fn is_plain_name(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_segments_drop_empty() {
        assert_eq!(segments("a//b/"), vec!["a", "b"]);
        assert_eq!(segments("/"), Vec::<&str>::new());
        assert_eq!(segments("animals"), vec!["animals"]);
    }

    #[test]
    fn test_resolve_flat_and_nested() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("animals.txt"), "cat\n").unwrap();
        fs::create_dir_all(temp.path().join("beasts")).unwrap();
        fs::write(temp.path().join("beasts").join("monster.csv"), "color\nred\n").unwrap();

        let resolver = PathResolver::new(temp.path());

        let line = resolver.resolve("animals", SourceKind::Line);
        assert!(line.found);
        assert_eq!(line.path, temp.path().join("animals.txt"));

        let table = resolver.resolve("beasts/monster", SourceKind::Table);
        assert!(table.found);
        assert_eq!(table.path, temp.path().join("beasts").join("monster.csv"));
    }

    #[test]
    fn test_resolve_kind_selects_extension() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("animals.txt"), "cat\n").unwrap();

        let resolver = PathResolver::new(temp.path());
        assert!(!resolver.resolve("animals", SourceKind::Table).found);
        assert!(resolver.resolve("animals", SourceKind::Line).found);
    }

    #[test]
    fn test_resolve_dotted_name_keeps_dots() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("names.v2.txt"), "a\n").unwrap();

        let resolved = PathResolver::new(temp.path()).resolve("names.v2", SourceKind::Line);
        assert!(resolved.found);
        assert_eq!(resolved.path, temp.path().join("names.v2.txt"));
    }

    #[test]
    fn test_resolve_missing() {
        let temp = TempDir::new().unwrap();
        let resolved = PathResolver::new(temp.path()).resolve("unknown:thing", SourceKind::Line);
        assert!(!resolved.found);
    }

    #[test]
    fn test_resolve_directory_is_not_a_file() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("dir.txt")).unwrap();
        assert!(!PathResolver::new(temp.path()).resolve("dir", SourceKind::Line).found);
    }

    #[test]
    fn test_resolve_rejects_escaping_segments() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("data");
        fs::create_dir_all(&root).unwrap();
        fs::write(temp.path().join("secret.txt"), "hidden\n").unwrap();

        let resolver = PathResolver::new(&root);
        assert!(!resolver.resolve("../secret", SourceKind::Line).found);
        assert!(!resolver.resolve("./../secret", SourceKind::Line).found);
        assert!(!resolver.resolve("", SourceKind::Line).found);
    }

    #[test]
    fn test_custom_extensions() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("monster.tsv"), "color\nred\n").unwrap();

        let resolver = PathResolver::new(temp.path()).with_extensions("tsv", "list");
        assert_eq!(resolver.extension(SourceKind::Table), "tsv");
        assert_eq!(resolver.extension(SourceKind::Line), "list");
        assert!(resolver.resolve("monster", SourceKind::Table).found);
    }
}
