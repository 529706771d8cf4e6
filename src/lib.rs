// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Utility routines for building file-management tools.
//!
//! The crate grew out of tooling that sifts through large dump and media
//! directories, and bundles the pieces such tools keep needing:
//!
//! * fuzzy timestamp extraction from noisy strings ([`timestamp`]) - find
//!   the datetime buried in `abc2010-02-23 15:34:56.789ddd.jpg` or the
//!   unix epoch in `snapshot_1553867509757.png`
//! * streaming file checksums with a separately reported header digest
//!   ([`checksum`])
//! * glob-based file filtering and steered directory walks ([`filter`])
//! * file-extension statistics over a tree ([`extension`])
//! * directory probes, recursive copy and tree statistics ([`fsutil`])
//! * byte-count formatting ([`bytesize`]), version-string comparison
//!   ([`version`]) and a small stopwatch ([`stopwatch`])
//!
//! The timestamp extractors are re-exported at the crate root since they
//! are the most used surface.

pub mod bytesize;
pub mod checksum;
pub mod extension;
pub mod filter;
pub mod fsutil;
pub mod stopwatch;
pub mod timestamp;
pub mod version;

pub use timestamp::{
    is_datetime_field_valid, parse_date, parse_datetime, parse_time, parse_unix_time,
    require_datetime_field_valid, set_require_datetime_field_valid, TimestampParser,
    ValidationError,
};
