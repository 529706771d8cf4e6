// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Per-extension file statistics for a directory tree.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{self, Display};
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

use log::trace;

use crate::filter::{dotted_extension, WalkStep};

#[derive(Debug)]
pub enum ExtensionError {
    /// The root path could not be probed.
    PathNotFound { path: PathBuf, source: io::Error },
    /// The root path exists but is not a directory.
    NotADirectory(PathBuf),
    Io(io::Error),
}

impl Display for ExtensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionError::PathNotFound { path, .. } => {
                write!(f, "path does not exist: {}", path.display())
            }
            ExtensionError::NotADirectory(path) => {
                write!(f, "path is not a directory: {}", path.display())
            }
            ExtensionError::Io(source) => write!(f, "walk failed: {}", source),
        }
    }
}

impl Error for ExtensionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ExtensionError::PathNotFound { source, .. } => Some(source),
            ExtensionError::NotADirectory(_) => None,
            ExtensionError::Io(source) => Some(source),
        }
    }
}

impl From<io::Error> for ExtensionError {
    fn from(source: io::Error) -> Self {
        ExtensionError::Io(source)
    }
}

/// Accumulated numbers for one file extension.
///
/// `name` is the dotted extension (`".txt"`), or `""` for files without
/// one. Sorting by name uses a case-folded key so that `".TXT"` and
/// `".txt"` group together in case-sensitive scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileExtension {
    pub name: String,
    pub count: u64,
    pub size: u64,
    key: String,
}

impl FileExtension {
    fn new(name: String) -> Self {
        FileExtension {
            key: name.to_lowercase(),
            name,
            count: 0,
            size: 0,
        }
    }
}

/// Scans `root` recursively and returns one [`FileExtension`] per
/// distinct extension, in no particular order.
///
/// With `case_sensitive` set to false, extensions are lowercased before
/// grouping, so `a.TXT` and `b.txt` land in the same bucket. Entries the
/// scan has no permission to read are skipped; any other walk error ends
/// the scan.
pub fn file_extensions(
    root: impl AsRef<Path>,
    case_sensitive: bool,
) -> Result<Vec<FileExtension>, ExtensionError> {
    file_extensions_with(root, case_sensitive, |_, _, _| WalkStep::Continue)
}

/// Like [`file_extensions`], but hands every visited entry to `observer`
/// as the scan progresses.
///
/// Directories arrive with `None`, files with the statistics of their
/// extension updated through the current file. The observer steers the
/// walk through its [`WalkStep`] return.
pub fn file_extensions_with<F>(
    root: impl AsRef<Path>,
    case_sensitive: bool,
    mut observer: F,
) -> Result<Vec<FileExtension>, ExtensionError>
where
    F: FnMut(&Path, &Metadata, Option<&FileExtension>) -> WalkStep,
{
    let root = root.as_ref();
    let probe = fs::metadata(root).map_err(|source| ExtensionError::PathNotFound {
        path: root.to_path_buf(),
        source,
    })?;
    if !probe.is_dir() {
        return Err(ExtensionError::NotADirectory(root.to_path_buf()));
    }

    let mut stats: HashMap<String, FileExtension> = HashMap::new();
    let mut entries = walkdir::WalkDir::new(root).into_iter();
    while let Some(entry) = entries.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) if is_permission_denied(&source) => {
                trace!("skipping unreadable entry: {}", source);
                continue;
            }
            Err(source) => return Err(ExtensionError::Io(source.into())),
        };
        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(source) if is_permission_denied(&source) => {
                trace!("skipping unreadable entry {:?}: {}", entry.path(), source);
                continue;
            }
            Err(source) => return Err(ExtensionError::Io(source.into())),
        };

        let current = if metadata.is_dir() {
            None
        } else {
            let file_name = entry.file_name().to_string_lossy();
            let extension = dotted_extension(&file_name);
            let extension = if case_sensitive {
                extension.to_string()
            } else {
                extension.to_lowercase()
            };

            let stat = stats
                .entry(extension.clone())
                .or_insert_with(|| FileExtension::new(extension));
            stat.count += 1;
            stat.size += metadata.len();
            Some(&*stat)
        };

        match observer(entry.path(), &metadata, current) {
            WalkStep::Continue => {}
            WalkStep::SkipDir => entries.skip_current_dir(),
            WalkStep::Stop => break,
        }
    }

    Ok(stats.into_values().collect())
}

fn is_permission_denied(error: &walkdir::Error) -> bool {
    error
        .io_error()
        .map(|source| source.kind() == io::ErrorKind::PermissionDenied)
        .unwrap_or(false)
}

/// Sorts by extension name ascending, case-folded. Names equal under
/// folding are ordered descending, so `".txt"` precedes `".TXT"`.
pub fn sort_by_name(extensions: &mut [FileExtension]) {
    extensions.sort_by(|a, b| a.key.cmp(&b.key).then_with(|| b.name.cmp(&a.name)));
}

/// Sorts by file count descending, then by total size descending.
pub fn sort_by_count(extensions: &mut [FileExtension]) {
    extensions.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| b.size.cmp(&a.size)));
}

/// Sorts by total size descending, then by file count descending.
pub fn sort_by_size(extensions: &mut [FileExtension]) {
    extensions.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| b.count.cmp(&a.count)));
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    fn stat(name: &str, count: u64, size: u64) -> FileExtension {
        FileExtension {
            key: name.to_lowercase(),
            name: name.to_string(),
            count,
            size,
        }
    }

    fn sample_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"abc").unwrap();
        fs::write(dir.path().join("b.TXT"), b"defgh").unwrap();
        fs::write(dir.path().join("main.rs"), b"x").unwrap();
        fs::write(dir.path().join("README"), b"ab").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.txt"), b"1234567").unwrap();
        dir
    }

    #[test]
    fn groups_case_insensitively_by_default() {
        let dir = sample_tree();
        let mut stats = file_extensions(dir.path(), false).unwrap();
        sort_by_name(&mut stats);

        assert_eq!(
            stats,
            vec![
                stat("", 1, 2),
                stat(".rs", 1, 1),
                stat(".txt", 3, 15),
            ]
        );
    }

    #[test]
    fn keeps_extension_case_when_sensitive() {
        let dir = sample_tree();
        let mut stats = file_extensions(dir.path(), true).unwrap();
        sort_by_name(&mut stats);

        assert_eq!(
            stats,
            vec![
                stat("", 1, 2),
                stat(".rs", 1, 1),
                stat(".txt", 2, 10),
                stat(".TXT", 1, 5),
            ]
        );
    }

    #[test]
    fn rejects_missing_and_non_directory_roots() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            file_extensions(&missing, false),
            Err(ExtensionError::PathNotFound { .. })
        ));

        let file = dir.path().join("plain.txt");
        fs::write(&file, b"x").unwrap();
        assert!(matches!(
            file_extensions(&file, false),
            Err(ExtensionError::NotADirectory(_))
        ));
    }

    #[test]
    fn observer_sees_directories_without_statistics() {
        let dir = sample_tree();
        let mut dirs = 0;
        let mut files = 0;
        file_extensions_with(dir.path(), false, |_, _, current| {
            match current {
                None => dirs += 1,
                Some(_) => files += 1,
            }
            WalkStep::Continue
        })
        .unwrap();

        // Root and "sub".
        assert_eq!(dirs, 2);
        assert_eq!(files, 5);
    }

    #[test]
    fn observer_can_stop_the_scan() {
        let dir = sample_tree();
        let stats = file_extensions_with(dir.path(), false, |_, metadata, _| {
            if metadata.is_file() {
                WalkStep::Stop
            } else {
                WalkStep::Continue
            }
        })
        .unwrap();

        assert_eq!(stats.iter().map(|s| s.count).sum::<u64>(), 1);
    }

    #[test]
    fn observer_can_skip_directories() {
        let dir = sample_tree();
        let sub = dir.path().join("sub");
        let stats = file_extensions_with(dir.path(), false, |path, _, _| {
            if path == sub {
                WalkStep::SkipDir
            } else {
                WalkStep::Continue
            }
        })
        .unwrap();

        let total: u64 = stats.iter().map(|s| s.count).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn name_sort_is_case_folded_with_descending_ties() {
        let mut stats = vec![stat(".TXT", 1, 1), stat(".md", 1, 1), stat(".txt", 1, 1)];
        sort_by_name(&mut stats);
        let names: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec![".md", ".txt", ".TXT"]);
    }

    #[test]
    fn count_sort_breaks_ties_by_size() {
        let mut stats = vec![stat(".a", 2, 10), stat(".b", 5, 1), stat(".c", 2, 20)];
        sort_by_count(&mut stats);
        let names: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec![".b", ".c", ".a"]);
    }

    #[test]
    fn size_sort_breaks_ties_by_count() {
        let mut stats = vec![stat(".a", 1, 10), stat(".b", 3, 10), stat(".c", 1, 50)];
        sort_by_size(&mut stats);
        let names: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec![".c", ".b", ".a"]);
    }
}
