//! Line and paragraph recognition.

use std::ops::Range;

use crate::grammar::{self, Alternative, BLOCK_GROUP};
use crate::markup;
use crate::paragraph::{Note, Paragraph};

/// A block found in a line, as a byte range into that line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub range: Range<usize>,
    pub alternative: Alternative,
}

impl Candidate {
    fn char_len(&self, line: &str) -> usize {
        line[self.range.clone()].chars().count()
    }
}

/// Every block any alternative finds in `line`, `@done(...)` stamps masked.
pub(crate) fn candidates(line: &str) -> Vec<Candidate> {
    let masked = markup::mask_done_markers(line);
    let mut found = Vec::new();

    for (alternative, re) in grammar::alternative_regexes() {
        let mut at = 0;
        while let Some(block) = re
            .captures_at(&masked, at)
            .and_then(|caps| caps.name(BLOCK_GROUP))
        {
            found.push(Candidate {
                range: block.range(),
                alternative: *alternative,
            });
            // Blocks always begin with an ASCII character.
            at = block.start() + 1;
        }
    }

    found
}

/// Longest candidate, leftmost on ties.
fn longest(line: &str, candidates: impl IntoIterator<Item = Candidate>) -> Option<Candidate> {
    candidates.into_iter().max_by(|a, b| {
        a.char_len(line)
            .cmp(&b.char_len(line))
            .then(b.range.start.cmp(&a.range.start))
    })
}

/// The text to report for a candidate.
///
/// A leading `at`/`from` is dropped when what follows is a complete block on
/// its own.
pub(crate) fn candidate_text(line: &str, candidate: &Candidate) -> String {
    let text = line[candidate.range.clone()].trim();
    if candidate.alternative == Alternative::LeadIn {
        if let Some((_, rest)) = text.split_once(char::is_whitespace) {
            let rest = rest.trim_start();
            if grammar::standalone_regex().is_match(rest) {
                return rest.to_string();
            }
        }
    }
    text.to_string()
}

fn passes_gate(content: &str, must_contain: Option<&str>) -> bool {
    match must_contain {
        Some(needle) if !needle.is_empty() => content.contains(needle),
        _ => true,
    }
}

/// Whether `content` contains a time block.
///
/// When `must_contain` is non-empty the line must also contain it literally
/// (case-sensitive); that check runs before any pattern matching.
pub fn is_time_block_line(content: &str, must_contain: Option<&str>) -> bool {
    if !passes_gate(content, must_contain) {
        return false;
    }
    grammar::app_regex().is_match(&markup::mask_done_markers(content))
}

/// The time block in `content`, or `""` if there is none.
///
/// When several blocks are found the longest one wins.
pub fn time_block_string(content: &str) -> String {
    longest(content, candidates(content))
        .map(|c| candidate_text(content, &c))
        .unwrap_or_default()
}

/// `content` with its time block (and any `at`/`from` before it) removed.
pub fn content_without_time_block(content: &str) -> String {
    match longest(content, candidates(content)) {
        Some(candidate) => remove_range(content, &candidate.range),
        None => content.trim().to_string(),
    }
}

pub(crate) fn remove_range(content: &str, range: &Range<usize>) -> String {
    let before = content[..range.start].trim_end();
    let after = content[range.end..].trim_start();
    match (before.is_empty(), after.is_empty()) {
        (true, _) => after.trim_end().to_string(),
        (false, true) => before.trim_start().to_string(),
        (false, false) => format!("{} {}", before.trim_start(), after.trim_end()),
    }
}

/// The block a paragraph carries, if it carries an active one.
pub(crate) fn para_candidate(para: &Paragraph, must_contain: Option<&str>) -> Option<Candidate> {
    if !para.para_type.can_have_time_block() || !is_time_block_line(&para.content, must_contain)
    {
        return None;
    }
    let outside_links = candidates(&para.content).into_iter().filter(|c| {
        let hidden = markup::is_inside_url_or_link_path(&para.content, &c.range);
        if hidden {
            tracing::debug!(
                line = para.line_index,
                block = &para.content[c.range.clone()],
                "ignoring time block inside URL or link path"
            );
        }
        !hidden
    });
    longest(&para.content, outside_links)
}

/// Whether a paragraph carries a time block.
///
/// The paragraph type must be eligible, the content must contain a block, and
/// that block must not sit inside a URL or markdown link path.
pub fn is_time_block_para(para: &Paragraph, must_contain: Option<&str>) -> bool {
    para_candidate(para, must_contain).is_some()
}

/// The block a paragraph carries and the paragraph content without it.
///
/// Unlike [`time_block_string`] this skips blocks inside URLs and link paths,
/// so it reports the same block [`is_time_block_para`] accepted.
pub fn time_block_details(
    para: &Paragraph,
    must_contain: Option<&str>,
) -> Option<(String, String)> {
    para_candidate(para, must_contain).map(|candidate| {
        (
            candidate_text(&para.content, &candidate),
            remove_range(&para.content, &candidate.range),
        )
    })
}

/// All paragraphs of `note` that carry a time block, in line order.
pub fn time_block_paras<'a>(note: &'a Note, must_contain: Option<&str>) -> Vec<&'a Paragraph> {
    note.paragraphs
        .iter()
        .filter(|para| is_time_block_para(para, must_contain))
        .collect()
}
