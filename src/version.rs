// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Dotted version-string comparison.

use std::cmp::Ordering;
use std::sync::OnceLock;

use regex::Regex;

fn segment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // A segment is an optional integer followed by an arbitrary suffix.
    PATTERN.get_or_init(|| Regex::new(r"^(?P<number>\d*)(?P<suffix>.*)").unwrap())
}

/// Compares two dot-separated version strings.
///
/// Each segment splits into an integer part (missing digits count as 0) and
/// a residual suffix, which is whitespace-trimmed and compared
/// case-insensitively. Integer parts compare numerically first, suffixes
/// lexicographically second, and the shorter version is padded with
/// zero/empty segments. Dots at either end are ignored.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use futil::version::compare_versions;
///
/// assert_eq!(compare_versions("1.0.1", "1.0.0"), Ordering::Greater);
/// assert_eq!(compare_versions("1.1", "1.1.0"), Ordering::Equal);
/// assert_eq!(compare_versions("1.1a.0", "1.1A.0"), Ordering::Equal);
/// assert_eq!(compare_versions("1.1.0", "1.1b.1"), Ordering::Less);
/// ```
pub fn compare_versions(version1: &str, version2: &str) -> Ordering {
    let segments1: Vec<&str> = version1.trim_matches('.').split('.').collect();
    let segments2: Vec<&str> = version2.trim_matches('.').split('.').collect();

    for index in 0..segments1.len().max(segments2.len()) {
        let (number1, suffix1) = segment(&segments1, index);
        let (number2, suffix2) = segment(&segments2, index);

        let ordering = number1
            .cmp(&number2)
            .then_with(|| suffix1.cmp(&suffix2));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}

/// Splits one segment into its integer and suffix parts. Out-of-range
/// indices yield the padding segment `(0, "")`, and an integer too large
/// for `u64` counts as 0, leaving the whole segment to the suffix rules.
fn segment(segments: &[&str], index: usize) -> (u64, String) {
    let Some(raw) = segments.get(index) else {
        return (0, String::new());
    };

    let raw = raw.trim();
    let (number, suffix) = match segment_pattern().captures(raw) {
        Some(captures) => (
            captures
                .name("number")
                .map(|m| m.as_str())
                .unwrap_or_default(),
            captures
                .name("suffix")
                .map(|m| m.as_str())
                .unwrap_or_default(),
        ),
        None => ("", raw),
    };

    (
        number.parse().unwrap_or(0),
        suffix.trim().to_lowercase(),
    )
}
