// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Small filesystem helpers shared by the other modules.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

/// What a path points at, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Missing,
    File,
    Directory,
}

/// Probes `path` once and classifies it.
///
/// Anything that exists and is not a directory counts as a file. Errors
/// other than "not found" are passed through.
///
/// ```
/// use futil::fsutil::{path_kind, PathKind};
///
/// assert_eq!(path_kind(std::env::temp_dir())?, PathKind::Directory);
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn path_kind(path: impl AsRef<Path>) -> io::Result<PathKind> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(PathKind::Directory),
        Ok(_) => Ok(PathKind::File),
        Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(PathKind::Missing),
        Err(source) => Err(source),
    }
}

/// Copies the tree under `source` into `target`, creating directories as
/// they are encountered. `source` must be a directory; `target` and its
/// parents are created if missing.
pub fn copy_dir(source: impl AsRef<Path>, target: impl AsRef<Path>) -> io::Result<()> {
    let source = source.as_ref();
    let target = target.as_ref();
    if !fs::metadata(source)?.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("source is not a directory: {}", source.display()),
        ));
    }

    for entry in WalkDir::new(source) {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|stripped| io::Error::new(io::ErrorKind::Other, stripped))?;
        let destination = target.join(relative);
        // Directories are yielded before their contents.
        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination)?;
        } else {
            fs::copy(entry.path(), &destination)?;
        }
    }

    Ok(())
}

/// Counts of a directory tree. The root itself is included in
/// `dir_count`; `total_size` sums file sizes only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirStatistics {
    pub dir_count: u64,
    pub file_count: u64,
    pub total_size: u64,
}

/// Walks `path` and tallies directories, files and bytes.
pub fn dir_statistics(path: impl AsRef<Path>) -> io::Result<DirStatistics> {
    let mut stats = DirStatistics::default();
    for entry in WalkDir::new(path) {
        let entry = entry.map_err(io::Error::from)?;
        let metadata = entry.metadata().map_err(io::Error::from)?;
        if metadata.is_dir() {
            stats.dir_count += 1;
        } else {
            stats.file_count += 1;
            stats.total_size += metadata.len();
        }
    }
    Ok(stats)
}
