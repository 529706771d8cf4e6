// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Glob-based file filtering and steered directory walks.

use std::error::Error;
use std::fmt::{self, Display};
use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};

use glob::Pattern;
use log::trace;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

/// Why a directory entry was refused by [`FileFilter::qualify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefusalReason {
    IsDirectory,
    BelowMinSize,
    AboveMaxSize,
    Excluded,
    NotIncluded,
}

impl Display for RefusalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefusalReason::IsDirectory => write!(f, "file is a directory"),
            RefusalReason::BelowMinSize => write!(f, "file size is less than min size"),
            RefusalReason::AboveMaxSize => write!(f, "file size is larger than max size"),
            RefusalReason::Excluded => write!(f, "file name matches exclude"),
            RefusalReason::NotIncluded => write!(f, "file name does not match include"),
        }
    }
}

impl Error for RefusalReason {}

#[derive(Debug)]
pub enum FilterError {
    /// `min_file_size` exceeds a non-zero `max_file_size`.
    SizeBounds { min: u64, max: u64 },
    /// The include list is empty after normalization.
    EmptyInclude,
    /// A glob pattern failed to parse.
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
    Io(io::Error),
}

impl Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::SizeBounds { min, max } => write!(
                f,
                "max_file_size {} must be greater than or equal to min_file_size {}",
                max, min
            ),
            FilterError::EmptyInclude => write!(f, "include patterns must not be empty"),
            FilterError::Pattern { pattern, source } => {
                write!(f, "invalid pattern {:?}: {}", pattern, source)
            }
            FilterError::Io(source) => write!(f, "walk failed: {}", source),
        }
    }
}

impl Error for FilterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FilterError::Pattern { source, .. } => Some(source),
            FilterError::Io(source) => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for FilterError {
    fn from(source: io::Error) -> Self {
        FilterError::Io(source)
    }
}

impl From<walkdir::Error> for FilterError {
    fn from(source: walkdir::Error) -> Self {
        FilterError::Io(source.into())
    }
}

/// How the handler steers a walk after each file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStep {
    Continue,
    /// Skip the remaining entries of the directory containing the current
    /// file.
    SkipDir,
    /// End the whole walk.
    Stop,
}

/// Conditions a file must meet.
///
/// The struct deserializes from host-application config files, which is
/// why the serialized field names are camelCase:
///
/// ```
/// # use futil::filter::FileFilter;
/// let filter: FileFilter = serde_json::from_str(
///     r#"{ "include": ["*.flac", "*.ape"], "maxFileSize": 1048576 }"#,
/// ).unwrap();
/// assert_eq!(filter.include.len(), 2);
/// # let _ = filter;
/// ```
///
/// Patterns match the file name only, not the path. The empty pattern is
/// special: it matches files without an extension. A size limit of 0 means
/// no limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileFilter {
    /// When false, patterns and file names are compared case-insensitively.
    pub case_sensitive: bool,
    /// A file must match at least one of these glob patterns.
    pub include: Vec<String>,
    /// A file matching any of these glob patterns is refused.
    pub exclude: Vec<String>,
    pub min_file_size: u64,
    pub max_file_size: u64,
}

impl FileFilter {
    /// Normalizes the filter in place and reports the first problem.
    ///
    /// Patterns are whitespace-trimmed, lowercased when case-insensitive,
    /// deduplicated, sorted and syntax-checked. The include list must not
    /// end up empty, and a non-zero `max_file_size` must not be below
    /// `min_file_size`.
    pub fn validate(&mut self) -> Result<(), FilterError> {
        *self = self.validated()?;
        Ok(())
    }

    fn validated(&self) -> Result<FileFilter, FilterError> {
        if self.max_file_size != 0 && self.min_file_size > self.max_file_size {
            return Err(FilterError::SizeBounds {
                min: self.min_file_size,
                max: self.max_file_size,
            });
        }

        let exclude = normalized_patterns(&self.exclude, self.case_sensitive)?;
        let include = normalized_patterns(&self.include, self.case_sensitive)?;
        if include.is_empty() {
            return Err(FilterError::EmptyInclude);
        }

        Ok(FileFilter {
            case_sensitive: self.case_sensitive,
            include,
            exclude,
            min_file_size: self.min_file_size,
            max_file_size: self.max_file_size,
        })
    }

    /// Checks one directory entry against the filter, assuming the
    /// patterns are already normalized (see [`FileFilter::validate`]).
    ///
    /// The exclude list wins over the include list.
    pub fn qualify(
        &self,
        file_name: &str,
        file_size: u64,
        is_dir: bool,
    ) -> Result<(), RefusalReason> {
        if is_dir {
            return Err(RefusalReason::IsDirectory);
        }
        if self.min_file_size > 0 && file_size < self.min_file_size {
            return Err(RefusalReason::BelowMinSize);
        }
        if self.max_file_size > 0 && file_size > self.max_file_size {
            return Err(RefusalReason::AboveMaxSize);
        }

        let folded;
        let file_name = if self.case_sensitive {
            file_name
        } else {
            folded = file_name.to_lowercase();
            &folded
        };
        let extension = dotted_extension(file_name);

        if self
            .exclude
            .iter()
            .any(|pattern| matches(pattern, file_name, extension))
        {
            return Err(RefusalReason::Excluded);
        }
        if self
            .include
            .iter()
            .any(|pattern| matches(pattern, file_name, extension))
        {
            Ok(())
        } else {
            Err(RefusalReason::NotIncluded)
        }
    }

    /// Walks `root` and hands every qualified file to `handler`, which
    /// steers the walk through its [`WalkStep`] return. When `recursive`
    /// is false only the immediate entries of `root` are considered.
    ///
    /// The filter is validated first; the caller's filter is left
    /// untouched.
    pub fn for_each_file<F>(
        &self,
        root: impl AsRef<Path>,
        recursive: bool,
        mut handler: F,
    ) -> Result<(), FilterError>
    where
        F: FnMut(&Path, &Metadata) -> WalkStep,
    {
        let filter = self.validated()?;
        let max_depth = if recursive { usize::MAX } else { 1 };

        let mut entries = WalkDir::new(root).max_depth(max_depth).into_iter();
        while let Some(entry) = entries.next() {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }

            let metadata = entry.metadata()?;
            let file_name = entry.file_name().to_string_lossy();
            match filter.qualify(&file_name, metadata.len(), metadata.is_dir()) {
                Ok(()) => match handler(entry.path(), &metadata) {
                    WalkStep::Continue => {}
                    WalkStep::SkipDir => entries.skip_current_dir(),
                    WalkStep::Stop => break,
                },
                Err(reason) => {
                    trace!("refusing {:?}: {}", entry.path(), reason);
                }
            }
        }

        Ok(())
    }

    /// Collects the paths of all qualified files under `root`.
    pub fn files(
        &self,
        root: impl AsRef<Path>,
        recursive: bool,
    ) -> Result<Vec<PathBuf>, FilterError> {
        let mut result = Vec::new();
        self.for_each_file(root, recursive, |path, _| {
            result.push(path.to_path_buf());
            WalkStep::Continue
        })?;
        Ok(result)
    }

    /// Names the first field in which `other` differs, for config-reload
    /// logging. `None` when the filters are equal.
    pub fn diff(&self, other: &FileFilter) -> Option<&'static str> {
        if self.case_sensitive != other.case_sensitive {
            Some("case_sensitive")
        } else if self.max_file_size != other.max_file_size {
            Some("max_file_size")
        } else if self.min_file_size != other.min_file_size {
            Some("min_file_size")
        } else if self.include != other.include {
            Some("include")
        } else if self.exclude != other.exclude {
            Some("exclude")
        } else {
            None
        }
    }
}

/// The dotted extension of a file name, `""` when there is none.
pub(crate) fn dotted_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(index) => &file_name[index..],
        None => "",
    }
}

fn matches(pattern: &str, file_name: &str, extension: &str) -> bool {
    // The empty pattern stands for "no extension".
    if pattern.is_empty() && extension.is_empty() {
        return true;
    }
    Pattern::new(pattern)
        .map(|pattern| pattern.matches(file_name))
        .unwrap_or(false)
}

fn normalized_patterns(
    patterns: &[String],
    case_sensitive: bool,
) -> Result<Vec<String>, FilterError> {
    let mut result: Vec<String> = patterns
        .iter()
        .map(|pattern| {
            let pattern = pattern.trim();
            if case_sensitive {
                pattern.to_string()
            } else {
                pattern.to_lowercase()
            }
        })
        .collect();

    for pattern in &result {
        if let Err(source) = Pattern::new(pattern) {
            return Err(FilterError::Pattern {
                pattern: pattern.clone(),
                source,
            });
        }
    }

    result.sort();
    result.dedup();
    Ok(result)
}
