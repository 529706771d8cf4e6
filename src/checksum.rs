// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Streaming file checksums.
//!
//! One buffered pass over a file can produce two digests that share a
//! single hash state: a *header* digest over the first `header_size` bytes
//! (a mid-stream snapshot) and a *full* digest over the whole file. Media
//! indexers use the header digest as a cheap pre-filter before comparing
//! full digests.
//!
//! The hash is pluggable through the RustCrypto [`Digest`] trait, so
//! `sha2::Sha256`, `md5::Md5` and friends all work.

use std::error::Error;
use std::fmt::{self, Display};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use digest::Digest;
use log::debug;

/// Default read-buffer size for [`checksum_file`].
pub const DEFAULT_BUFFER_SIZE: usize = 32 * 1024;

/// What to compute for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumPlan {
    /// Bytes of the file head covered by the header digest. Only
    /// meaningful when `want_header` is set.
    pub header_size: usize,
    pub want_header: bool,
    pub want_full: bool,
}

impl ChecksumPlan {
    /// A plan computing only the full-file digest.
    pub fn full() -> Self {
        Self {
            header_size: 0,
            want_header: false,
            want_full: true,
        }
    }

    /// A plan computing only the header digest.
    pub fn header(header_size: usize) -> Self {
        Self {
            header_size,
            want_header: true,
            want_full: false,
        }
    }

    /// A plan computing both digests in the same pass.
    pub fn header_and_full(header_size: usize) -> Self {
        Self {
            header_size,
            want_header: true,
            want_full: true,
        }
    }

    fn validate(&self, buffer_size: usize) -> Result<(), ChecksumError> {
        if !self.want_header && !self.want_full {
            Err(ChecksumError::NothingRequested)
        } else if self.want_header && self.header_size == 0 {
            Err(ChecksumError::InvalidHeaderSize)
        } else if self.want_header && buffer_size < self.header_size {
            Err(ChecksumError::BufferTooSmall {
                buffer_size,
                header_size: self.header_size,
            })
        } else {
            Ok(())
        }
    }
}

/// Digests computed for one file.
///
/// When the file is no longer than the header, both digests cover the
/// whole file and are therefore equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChecksum {
    /// Digest of the first `header_size` bytes; present when requested.
    pub header: Option<Vec<u8>>,
    /// Digest of the whole file; present when requested.
    pub full: Option<Vec<u8>>,
    /// Length of the file in bytes, from metadata.
    pub file_size: u64,
}

#[derive(Debug)]
pub enum ChecksumError {
    /// Neither the header nor the full digest was requested.
    NothingRequested,
    /// A header digest was requested with a zero header size.
    InvalidHeaderSize,
    /// The supplied buffer cannot hold the requested header.
    BufferTooSmall {
        buffer_size: usize,
        header_size: usize,
    },
    Io(io::Error),
}

impl Display for ChecksumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChecksumError::NothingRequested => {
                write!(f, "at least one of the header and full digests must be requested")
            }
            ChecksumError::InvalidHeaderSize => {
                write!(f, "header size must be greater than 0")
            }
            ChecksumError::BufferTooSmall {
                buffer_size,
                header_size,
            } => write!(
                f,
                "buffer size {} is less than the header size {}",
                buffer_size, header_size
            ),
            ChecksumError::Io(source) => write!(f, "checksum read failed: {}", source),
        }
    }
}

impl Error for ChecksumError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ChecksumError::Io(source) => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for ChecksumError {
    fn from(source: io::Error) -> Self {
        ChecksumError::Io(source)
    }
}

/// Computes the digests requested by `plan` with a buffer of
/// [`DEFAULT_BUFFER_SIZE`], grown to the header size when needed.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use futil::checksum::{checksum_file, ChecksumPlan};
/// use sha2::Sha256;
///
/// let plan = ChecksumPlan::header_and_full(4096);
/// let sums = checksum_file::<Sha256>(Path::new("album/track01.flac"), &plan)?;
/// assert!(sums.header.is_some() && sums.full.is_some());
/// # Ok::<(), futil::checksum::ChecksumError>(())
/// ```
pub fn checksum_file<D: Digest + Clone>(
    path: &Path,
    plan: &ChecksumPlan,
) -> Result<FileChecksum, ChecksumError> {
    let buffer_size = if plan.want_header {
        DEFAULT_BUFFER_SIZE.max(plan.header_size)
    } else {
        DEFAULT_BUFFER_SIZE
    };
    let mut buffer = vec![0u8; buffer_size];
    checksum_file_with_buffer::<D>(path, plan, &mut buffer)
}

/// Computes the digests requested by `plan`, reading through the caller's
/// buffer so batch runs can reuse one allocation.
///
/// The buffer must hold at least `plan.header_size` bytes when a header
/// digest is requested.
///
/// # Errors
///
/// Returns a plan violation ([`ChecksumError::NothingRequested`],
/// [`ChecksumError::InvalidHeaderSize`], [`ChecksumError::BufferTooSmall`])
/// before any file is opened, and [`ChecksumError::Io`] for read failures.
pub fn checksum_file_with_buffer<D: Digest + Clone>(
    path: &Path,
    plan: &ChecksumPlan,
    buffer: &mut [u8],
) -> Result<FileChecksum, ChecksumError> {
    plan.validate(buffer.len())?;

    let mut file = File::open(path)?;
    let file_size = file.metadata()?.len();

    let mut hasher = D::new();
    let mut header = None;

    if plan.want_header {
        let filled = read_at_most(&mut file, &mut buffer[..plan.header_size])?;
        hasher.update(&buffer[..filled]);
        // Snapshot the running state; the full digest continues from it.
        header = Some(hasher.clone().finalize().to_vec());
        debug!(
            "header digest ready for {:?} after {} bytes",
            path, filled
        );
    }

    let full = if plan.want_full {
        loop {
            match file.read(buffer) {
                Ok(0) => break,
                Ok(filled) => hasher.update(&buffer[..filled]),
                Err(source) if source.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => return Err(source.into()),
            }
        }
        debug!("full digest ready for {:?}, {} bytes", path, file_size);
        Some(hasher.finalize().to_vec())
    } else {
        None
    };

    Ok(FileChecksum {
        header,
        full,
        file_size,
    })
}

/// Fills `buffer` from the reader, stopping early only at end of file.
fn read_at_most(reader: &mut impl Read, buffer: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(count) => filled += count,
            Err(source) if source.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => return Err(source),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use md5::Md5;
    use sha2::Sha256;
    use std::io::Write;

    fn fixture(content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn full_digest_matches_a_one_shot_hash() {
        let content = b"the quick brown fox jumps over the lazy dog";
        let file = fixture(content);

        let sums = checksum_file::<Sha256>(file.path(), &ChecksumPlan::full()).unwrap();
        assert_eq!(sums.header, None);
        assert_eq!(sums.full, Some(Sha256::digest(content).to_vec()));
        assert_eq!(sums.file_size, content.len() as u64);
    }

    #[test]
    fn header_digest_covers_only_the_head() {
        let content = b"0123456789abcdef";
        let file = fixture(content);

        let sums = checksum_file::<Md5>(file.path(), &ChecksumPlan::header(4)).unwrap();
        assert_eq!(sums.header, Some(Md5::digest(&content[..4]).to_vec()));
        assert_eq!(sums.full, None);
    }

    #[test]
    fn both_digests_come_from_one_pass() {
        let content = vec![7u8; 100_000];
        let file = fixture(&content);

        let sums =
            checksum_file::<Sha256>(file.path(), &ChecksumPlan::header_and_full(2000)).unwrap();
        assert_eq!(sums.header, Some(Sha256::digest(&content[..2000]).to_vec()));
        assert_eq!(sums.full, Some(Sha256::digest(&content).to_vec()));
        assert_eq!(sums.file_size, 100_000);
    }

    #[test]
    fn short_file_makes_both_digests_equal() {
        let content = b"tiny";
        let file = fixture(content);

        let sums =
            checksum_file::<Sha256>(file.path(), &ChecksumPlan::header_and_full(2000)).unwrap();
        assert_eq!(sums.header, sums.full);
        assert_eq!(sums.full, Some(Sha256::digest(content).to_vec()));
    }

    #[test]
    fn zero_length_file() {
        let file = fixture(b"");

        let sums =
            checksum_file::<Sha256>(file.path(), &ChecksumPlan::header_and_full(2000)).unwrap();
        assert_eq!(sums.header, Some(Sha256::digest(b"").to_vec()));
        assert_eq!(sums.full, Some(Sha256::digest(b"").to_vec()));
        assert_eq!(sums.file_size, 0);
    }

    #[test]
    fn a_buffer_smaller_than_the_file_still_digests_everything() {
        let content: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        let file = fixture(&content);

        let mut buffer = vec![0u8; 512];
        let sums = checksum_file_with_buffer::<Sha256>(
            file.path(),
            &ChecksumPlan::header_and_full(256),
            &mut buffer,
        )
        .unwrap();
        assert_eq!(sums.header, Some(Sha256::digest(&content[..256]).to_vec()));
        assert_eq!(sums.full, Some(Sha256::digest(&content).to_vec()));
    }

    #[test]
    fn plan_violations_are_reported_before_io() {
        let plan = ChecksumPlan {
            header_size: 0,
            want_header: false,
            want_full: false,
        };
        let missing = Path::new("does-not-exist");
        let err = checksum_file::<Sha256>(missing, &plan).unwrap_err();
        assert!(matches!(err, ChecksumError::NothingRequested));

        let err = checksum_file::<Sha256>(missing, &ChecksumPlan::header(0)).unwrap_err();
        assert!(matches!(err, ChecksumError::InvalidHeaderSize));

        let mut buffer = vec![0u8; 16];
        let err = checksum_file_with_buffer::<Sha256>(
            missing,
            &ChecksumPlan::header(32),
            &mut buffer,
        )
        .unwrap_err();
        assert!(matches!(err, ChecksumError::BufferTooSmall { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err =
            checksum_file::<Sha256>(Path::new("does-not-exist"), &ChecksumPlan::full()).unwrap_err();
        assert!(matches!(err, ChecksumError::Io(_)));
    }
}
