use crate::version_diff::domain::{Build, KeyPolicy, VersionKey};
use std::cmp::Ordering;

/// VersionComparator - RPM label comparison over version keys
///
/// Implements the same segment algorithm as `rpmvercmp`: strings are split
/// into maximal runs of digits or letters, everything else separates
/// segments. Numeric segments compare by magnitude and beat alphabetic
/// ones, alphabetic segments compare byte-wise, `~` sorts before anything
/// (including the end of the string) and `^` sorts after the end of the
/// string but before any further segment.
pub struct VersionComparator;

impl VersionComparator {
    /// Compares epoch, then version, then release
    pub fn compare(a: &VersionKey, b: &VersionKey) -> Ordering {
        a.epoch()
            .cmp(&b.epoch())
            .then_with(|| Self::compare_labels(a.version(), b.version()))
            .then_with(|| Self::compare_labels(a.release(), b.release()))
    }

    /// Compares two builds after projecting them through the key policy
    pub fn compare_builds(a: &Build, b: &Build, policy: &KeyPolicy) -> Ordering {
        Self::compare(
            &VersionKey::from_build(a, policy),
            &VersionKey::from_build(b, policy),
        )
    }

    /// Compares two version or release strings segment by segment
    pub fn compare_labels(a: &str, b: &str) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }

        let one = a.as_bytes();
        let two = b.as_bytes();
        let (mut i, mut j) = (0, 0);

        while i < one.len() || j < two.len() {
            while i < one.len() && is_separator(one[i]) {
                i += 1;
            }
            while j < two.len() && is_separator(two[j]) {
                j += 1;
            }

            let c1 = one.get(i).copied();
            let c2 = two.get(j).copied();

            if c1 == Some(b'~') || c2 == Some(b'~') {
                if c1 != Some(b'~') {
                    return Ordering::Greater;
                }
                if c2 != Some(b'~') {
                    return Ordering::Less;
                }
                i += 1;
                j += 1;
                continue;
            }

            if c1 == Some(b'^') || c2 == Some(b'^') {
                if c1.is_none() {
                    return Ordering::Less;
                }
                if c2.is_none() {
                    return Ordering::Greater;
                }
                if c1 != Some(b'^') {
                    return Ordering::Greater;
                }
                if c2 != Some(b'^') {
                    return Ordering::Less;
                }
                i += 1;
                j += 1;
                continue;
            }

            if c1.is_none() || c2.is_none() {
                break;
            }

            // The segment type is decided by the left-hand side
            let numeric = one[i].is_ascii_digit();
            let end1 = segment_end(one, i, numeric);
            let end2 = segment_end(two, j, numeric);

            if end2 == j {
                // Different segment types: numeric always wins
                return if numeric {
                    Ordering::Greater
                } else {
                    Ordering::Less
                };
            }

            let mut seg1 = &one[i..end1];
            let mut seg2 = &two[j..end2];

            if numeric {
                seg1 = trim_leading_zeros(seg1);
                seg2 = trim_leading_zeros(seg2);
                match seg1.len().cmp(&seg2.len()) {
                    Ordering::Equal => {}
                    ord => return ord,
                }
            }

            match seg1.cmp(seg2) {
                Ordering::Equal => {}
                ord => return ord,
            }

            i = end1;
            j = end2;
        }

        // All segments tied; whichever side still has content wins.
        // Leftover separators were already skipped above.
        match (i >= one.len(), j >= two.len()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, _) => Ordering::Greater,
        }
    }
}

fn is_separator(c: u8) -> bool {
    !c.is_ascii_alphanumeric() && c != b'~' && c != b'^'
}

fn segment_end(s: &[u8], start: usize, numeric: bool) -> usize {
    let mut end = start;
    while end < s.len()
        && if numeric {
            s[end].is_ascii_digit()
        } else {
            s[end].is_ascii_alphabetic()
        }
    {
        end += 1;
    }
    end
}

fn trim_leading_zeros(s: &[u8]) -> &[u8] {
    let zeros = s.iter().take_while(|&&c| c == b'0').count();
    &s[zeros..]
}
