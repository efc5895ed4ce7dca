//! Inline markup that can hide time-looking text.
//!
//! Detects URL and markdown link/image path spans (a time-looking fragment
//! inside them is not a time block) and masks `@done(...)` completion stamps.

use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:[a-z][a-z0-9+.\-]*://|www\.)[^\s<>]+").expect("valid URL pattern")
});

static LINK_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!?\[[^\]]*\]\((?P<path>[^)]*)\)").expect("valid link pattern")
});

static DONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@done\([^)]*\)").expect("valid @done pattern"));

/// Byte ranges of every URL and markdown link/image path in `line`.
pub fn url_and_link_path_spans(line: &str) -> Vec<Range<usize>> {
    let urls = URL_RE.find_iter(line).map(|m| m.range());
    let paths = LINK_PATH_RE
        .captures_iter(line)
        .filter_map(|caps| caps.name("path"))
        .map(|m| m.range());
    urls.chain(paths).collect()
}

/// Whether the byte range `candidate` of `line` lies within a URL or link path.
///
/// Judged by position: a fragment that also appears elsewhere in the line as
/// plain text is only inside a URL where it actually sits inside one.
pub fn is_inside_url_or_link_path(line: &str, candidate: &Range<usize>) -> bool {
    url_and_link_path_spans(line)
        .iter()
        .any(|span| span.start <= candidate.start && candidate.end <= span.end)
}

/// Replaces each `@done(...)` stamp with `_` of the same byte length.
///
/// Byte offsets into the returned string match offsets into `line`. The
/// filler is not whitespace, so text glued to a stamp stays glued.
pub fn mask_done_markers(line: &str) -> Cow<'_, str> {
    DONE_RE.replace_all(line, |caps: &regex::Captures<'_>| "_".repeat(caps[0].len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_urls_and_link_paths() {
        let line = "see https://example.com/a and [doc](files/b.md) or ![img](pic.png)";
        let spans: Vec<&str> = url_and_link_path_spans(line)
            .into_iter()
            .map(|r| &line[r])
            .collect();
        assert_eq!(spans, vec!["https://example.com/a", "files/b.md", "pic.png"]);
    }

    #[test]
    fn containment_is_positional() {
        let line = "12:30 https://example.com/2022-01-01/12:30";
        let plain = 0..5;
        let in_url = line.rfind("12:30").map(|s| s..s + 5).unwrap();
        assert!(!is_inside_url_or_link_path(line, &plain));
        assert!(is_inside_url_or_link_path(line, &in_url));
    }

    #[test]
    fn link_path_with_spaces() {
        let line = "[notes](my notes 12:30 draft.md)";
        let start = line.find("12:30").unwrap();
        assert!(is_inside_url_or_link_path(line, &(start..start + 5)));
        let text_start = line.find("notes").unwrap();
        assert!(!is_inside_url_or_link_path(line, &(text_start..text_start + 5)));
    }

    #[test]
    fn masks_done_stamps_keeping_offsets() {
        let line = "* task @done(2021-12-12 12:34 PM) after";
        let masked = mask_done_markers(line);
        assert_eq!(masked.len(), line.len());
        assert!(!masked.contains("12:34"));
        assert!(masked.ends_with(" after"));
        assert!(matches!(mask_done_markers("no stamp"), Cow::Borrowed(_)));
    }

    #[test]
    fn masking_adds_no_word_boundary() {
        let line = "@done(\u{e9})12:30";
        let masked = mask_done_markers(line);
        // `é` is two bytes
        assert_eq!(masked, format!("{}12:30", "_".repeat(9)));
    }
}
