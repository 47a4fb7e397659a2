use std::any::type_name;

use memchr::memmem;

pub fn pretty_type_name<'a, T>() -> &'a str {
    type_name::<T>().split("::").last().unwrap_or_default()
}

pub trait With<F> {
    fn with(self, op: F) -> Self;
}

impl<T, F> With<F> for T
where
    F: FnOnce(&mut Self),
{
    fn with(mut self, op: F) -> Self {
        op(&mut self);

        self
    }
}

/// Replaces every non-overlapping occurrence of `needle` in `haystack`, scanning left to right.
///
/// An empty `needle` leaves the input untouched.
pub fn replace_all_bytes(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Vec<u8> {
    if needle.is_empty() {
        return haystack.to_vec();
    }

    let mut output = Vec::with_capacity(haystack.len());
    let mut copied_up_to = 0;

    for start in memmem::find_iter(haystack, needle) {
        output.extend_from_slice(&haystack[copied_up_to..start]);
        output.extend_from_slice(replacement);
        copied_up_to = start + needle.len();
    }

    output.extend_from_slice(&haystack[copied_up_to..]);

    output
}

#[cfg(test)]
mod tests {
    use super::{pretty_type_name, replace_all_bytes, With};

    #[test]
    fn replace_all_bytes_replaces_every_occurrence() {
        let output = replace_all_bytes(b"a-X-b-X-c-X", b"X", b"yy");

        assert_eq!(output, b"a-yy-b-yy-c-yy");
    }

    #[test]
    fn replace_all_bytes_does_not_rescan_replacements() {
        let output = replace_all_bytes(b"AAA", b"A", b"AA");

        assert_eq!(output, b"AAAAAA");
    }

    #[test]
    fn replace_all_bytes_handles_adjacent_and_overlapping_needles() {
        assert_eq!(replace_all_bytes(b"XXXX", b"XX", b"-"), b"--");
        assert_eq!(replace_all_bytes(b"XXX", b"XX", b"-"), b"-X");
    }

    #[test]
    fn replace_all_bytes_handles_short_and_empty_haystacks() {
        assert_eq!(replace_all_bytes(b"ab", b"abc", b"-"), b"ab");
        assert_eq!(replace_all_bytes(b"", b"abc", b"-"), b"");
        assert_eq!(replace_all_bytes(b"abc", b"abc", b""), b"");
    }

    #[test]
    fn replace_all_bytes_ignores_empty_needle() {
        assert_eq!(replace_all_bytes(b"abc", b"", b"zzz"), b"abc");
    }

    #[test]
    fn replace_all_bytes_keeps_non_utf8_content() {
        let output = replace_all_bytes(&[0xff, b'T', 0xfe], b"T", b"ok");

        assert_eq!(output, vec![0xff, b'o', b'k', 0xfe]);
    }

    #[test]
    fn with_applies_the_closure() {
        let value = vec![1].with(|v| v.push(2));

        assert_eq!(value, vec![1, 2]);
        assert_eq!(pretty_type_name::<Vec<u8>>(), "Vec<u8>");
    }
}
