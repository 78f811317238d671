//! Discovery of the sources available under a data root

use std::path::Path;

use eyre::{Context, Result};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::paths::{PathResolver, SourceKind};
use crate::placeholder::TABLE_PREFIX;
use crate::table;

/// A source file and the placeholders that reference it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wildcard {
    /// Path text as written in a placeholder (`/`-separated, no extension)
    pub name: String,
    pub kind: SourceKind,
    /// Normalized header names (tables only)
    pub columns: Vec<String>,
}

impl Wildcard {
    /// Placeholder tokens that resolve against this source
    pub fn placeholders(&self) -> Vec<String> {
        match self.kind {
            SourceKind::Line => vec![format!("{{{}}}", self.name)],
            SourceKind::Table => self
                .columns
                .iter()
                .map(|column| format!("{{{}{}:{}}}", TABLE_PREFIX, self.name, column))
                .collect(),
        }
    }
}

/// List every line-list and table source under the resolver's root
///
/// Entries are sorted by name. Tables whose headers cannot be read are listed
/// without columns.
pub fn list(paths: &PathResolver, delimiter: u8) -> Result<Vec<Wildcard>> {
    let root = paths.root();
    if !root.is_dir() {
        return Err(eyre::eyre!("Data directory not found: {}", root.display()));
    }

    let mut wildcards = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.context(format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(kind) = kind_of(paths, path) else {
            continue;
        };
        let Some(name) = placeholder_name(root, path, paths.extension(kind)) else {
            continue;
        };

        let columns = match kind {
            SourceKind::Line => Vec::new(),
            SourceKind::Table => table::read_headers(path, delimiter).unwrap_or_else(|e| {
                warn!("{}", e);
                Vec::new()
            }),
        };

        debug!(%name, ?kind, "catalog::list: found source");
        wildcards.push(Wildcard { name, kind, columns });
    }

    wildcards.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(wildcards)
}

fn kind_of(paths: &PathResolver, path: &Path) -> Option<SourceKind> {
    let extension = path.extension()?.to_str()?;
    [SourceKind::Table, SourceKind::Line]
        .into_iter()
        .find(|kind| paths.extension(*kind) == extension)
}

fn placeholder_name(root: &Path, path: &Path, extension: &str) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let segments: Vec<&str> = relative
        .iter()
        .map(|segment| segment.to_str())
        .collect::<Option<_>>()?;
    let joined = segments.join("/");
    joined
        .strip_suffix(extension)
        .and_then(|s| s.strip_suffix('.'))
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_list_sources() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("animals.txt"), "cat\n").unwrap();
        fs::create_dir_all(temp.path().join("beasts")).unwrap();
        fs::write(temp.path().join("beasts").join("monster.csv"), "Color,Size\nred,large\n").unwrap();
        fs::write(temp.path().join("notes.md"), "ignored").unwrap();

        let wildcards = list(&PathResolver::new(temp.path()), b',').unwrap();
        assert_eq!(wildcards.len(), 2);

        assert_eq!(wildcards[0].name, "animals");
        assert_eq!(wildcards[0].kind, SourceKind::Line);
        assert_eq!(wildcards[0].placeholders(), vec!["{animals}"]);

        assert_eq!(wildcards[1].name, "beasts/monster");
        assert_eq!(wildcards[1].kind, SourceKind::Table);
        assert_eq!(wildcards[1].columns, vec!["color", "size"]);
        assert_eq!(
            wildcards[1].placeholders(),
            vec!["{csv:beasts/monster:color}", "{csv:beasts/monster:size}"]
        );
    }

    #[test]
    fn test_list_keeps_dotted_names() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("names.v2.txt"), "a\n").unwrap();

        let wildcards = list(&PathResolver::new(temp.path()), b',').unwrap();
        assert_eq!(wildcards[0].name, "names.v2");
    }

    #[test]
    fn test_list_missing_root() {
        let temp = TempDir::new().unwrap();
        let result = list(&PathResolver::new(temp.path().join("absent")), b',');
        assert!(result.is_err());
    }

    #[test]
    fn test_listed_placeholders_resolve() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("beasts")).unwrap();
        fs::write(temp.path().join("beasts").join("monster.csv"), "color\nred\n").unwrap();

        let paths = PathResolver::new(temp.path());
        let wildcards = list(&paths, b',').unwrap();
        let resolved = paths.resolve(&wildcards[0].name, wildcards[0].kind);
        assert!(resolved.found);
    }
}
