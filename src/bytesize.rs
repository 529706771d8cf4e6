// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Byte-count formatting with binary units.

const KB: f64 = 1024.0;
const MB: f64 = KB * 1024.0;
const GB: f64 = MB * 1024.0;
const TB: f64 = GB * 1024.0;
const PB: f64 = TB * 1024.0;

/// Formats a byte count with the default precision of 3.
///
/// # Examples
///
/// ```
/// use futil::bytesize::to_size_string;
///
/// assert_eq!(to_size_string(100), "100 bytes");
/// assert_eq!(to_size_string(1340), "1.309 KB");
/// ```
pub fn to_size_string(size: u64) -> String {
    to_size_string_with_precision(size, 3)
}

/// Formats a byte count using binary units, picking the largest unit that
/// keeps the value under 1024 (bytes, KB, MB, GB, TB, then PB). Values
/// under 1 KB are printed as a plain integer.
///
/// # Arguments
///
/// * `size` - Byte count.
/// * `precision` - Fraction digits for unit-scaled values, 0 through 9.
///
/// # Panics
///
/// Panics when `precision` is greater than 9; an out-of-range precision is
/// a programming error, not an input condition.
///
/// # Examples
///
/// ```
/// use futil::bytesize::to_size_string_with_precision;
///
/// assert_eq!(to_size_string_with_precision(1340, 2), "1.31 KB");
/// assert_eq!(to_size_string_with_precision(1340 * 1024 * 1024, 4), "1.3086 GB");
/// ```
pub fn to_size_string_with_precision(size: u64, precision: usize) -> String {
    assert!(
        precision <= 9,
        "invalid precision, must be between 0 and 9"
    );

    let value = size as f64;
    if value < KB {
        format!("{} bytes", size)
    } else if value < MB {
        format!("{:.precision$} KB", value / KB)
    } else if value < GB {
        format!("{:.precision$} MB", value / MB)
    } else if value < TB {
        format!("{:.precision$} GB", value / GB)
    } else if value < PB {
        format!("{:.precision$} TB", value / TB)
    } else {
        format!("{:.precision$} PB", value / PB)
    }
}
